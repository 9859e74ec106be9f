/*! Horizontal and restricted horizontal mode.

The space factor (`\spacefactor`) starts at `1000`. Every character with a nonzero space factor code
sets it (never from below `1000` to above `1000` in one step, though), boxes and glue reset it to `1000`.
Interword glue depends on it:

| space factor | glue                                                                  |
|--------------|-----------------------------------------------------------------------|
| `0`          | none                                                                  |
| `1000`       | `\spaceskip`, or the font's interword glue                            |
| `≥ 2000`     | `\xspaceskip`, or as below with the font's extra space (`\fontdimen7`) |
| otherwise    | `\spaceskip` or the font's glue, stretch scaled by `sf/1000`, shrink by `1000/sf` |
*/

use crate::debug_log;
use crate::engine::fontsystem::{CharNodeFactory, FontRef, same_font};
use crate::engine::options::TypesetterOptions;
use crate::engine::state::modes::Mode;
use crate::engine::stomach::Collaborators;
use crate::engine::stomach::listmaker::ListMaker;
use crate::tex::nodes::{Node, NodeList};
use crate::tex::numerics::Dimen;
use crate::tex::numerics::glue::Glue;
use crate::utils::errors::TypesetterError;

/// The space factor of "normal" characters
pub const NORMAL_SPACE_FACTOR: i64 = 1000;

/// The interword glue for space factor `sf`, or `None` if there is none (`sf == 0`).
pub fn interword_glue(font:&FontRef,sf:i64,options:&dyn TypesetterOptions) -> Result<Option<Glue>,TypesetterError> {
    if sf <= 0 { return Ok(None) }
    if sf >= 2000 {
        if let Some(g) = options.glue_option("xspaceskip") {
            return Ok(Some(g))
        }
    }
    let mut glue = options.glue_option("spaceskip").unwrap_or_else(|| font.space());
    if sf == NORMAL_SPACE_FACTOR { return Ok(Some(glue)) }
    if sf >= 2000 {
        glue.length += font.extra_space();
    }
    Ok(Some(glue.multiply_stretch(sf,NORMAL_SPACE_FACTOR)?.multiply_shrink(NORMAL_SPACE_FACTOR,sf)?))
}

/// The list maker of paragraphs (horizontal mode) and of `\hbox`es (restricted horizontal mode).
pub struct HorizontalListMaker {
    restricted:bool,
    nodes:NodeList,
    spacefactor:i64
}
impl HorizontalListMaker {
    /// A paragraph
    pub fn new() -> Self {
        HorizontalListMaker { restricted:false, nodes:Vec::new(), spacefactor:NORMAL_SPACE_FACTOR }
    }
    /// An `\hbox` or alignment cell
    pub fn new_restricted() -> Self { HorizontalListMaker { restricted:true, ..Self::new() } }
    pub fn nodes(&self) -> &[Node] { &self.nodes }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
    /// Take the contents, leaving this list maker empty with space factor `1000`
    pub fn take_nodes(&mut self) -> NodeList {
        self.spacefactor = NORMAL_SPACE_FACTOR;
        std::mem::take(&mut self.nodes)
    }

    fn update_spacefactor(&mut self,code:i64) {
        if code != 0 {
            self.spacefactor = if self.spacefactor < NORMAL_SPACE_FACTOR && code > NORMAL_SPACE_FACTOR {
                NORMAL_SPACE_FACTOR
            } else { code };
        }
    }

    // replaces the last character by a ligature, if the font has one for it and `c`
    fn try_ligature(&mut self,c:char,font:&FontRef,factory:&dyn CharNodeFactory) -> bool {
        let (left,lig) = match self.nodes.last() {
            Some(Node::Char(prev)) if same_font(&prev.font,font) => match font.ligature(prev.char,c) {
                Some(lig) => (prev.char,lig),
                None => return false
            },
            _ => return false
        };
        let mut glyph = match factory.new_char_node(font,lig) {
            Some(g) => g,
            None => return false
        };
        let code = match factory.new_char_node(font,c) {
            Some(n) => n.space_factor,
            None => NORMAL_SPACE_FACTOR
        };
        glyph.space_factor = code;
        debug_log!(trace=>"ligature {}{} -> {}",left,c,lig);
        self.nodes.pop();
        self.nodes.push(Node::Ligature { glyph, parts:vec!(left,c) });
        self.update_spacefactor(code);
        true
    }
}
impl ListMaker for HorizontalListMaker {
    fn mode(&self) -> Mode {
        if self.restricted { Mode::RestrictedHorizontal } else { Mode::Horizontal }
    }
    fn add(&mut self, node: Node) -> Result<(), TypesetterError> {
        self.nodes.push(node);
        self.spacefactor = NORMAL_SPACE_FACTOR;
        Ok(())
    }
    fn add_glue(&mut self, glue: Glue) -> Result<(), TypesetterError> {
        self.nodes.push(Node::Glue(glue));
        self.spacefactor = NORMAL_SPACE_FACTOR;
        Ok(())
    }
    fn add_space(&mut self, options: &dyn TypesetterOptions, sf_override: Option<i64>) -> Result<(), TypesetterError> {
        let sf = sf_override.unwrap_or(self.spacefactor);
        if let Some(g) = interword_glue(&options.font(),sf,options)? {
            self.nodes.push(Node::Space(g));
        }
        Ok(())
    }
    fn letter(&mut self, c: char, font: &FontRef, factory: &dyn CharNodeFactory, _options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        if self.try_ligature(c,font,factory) { return Ok(()) }
        let node = match factory.new_char_node(font,c) {
            Some(n) => n,
            None => {
                log::warn!("Missing character {} in font {}",c,font.name());
                return Ok(())
            }
        };
        if let Some(prev) = self.nodes.last().and_then(Node::as_char) {
            if same_font(&prev.font,font) {
                let kern = font.kern(prev.char,c);
                if kern != Dimen::ZERO {
                    self.nodes.push(Node::Kern { width:kern, implicit:true });
                }
            }
        }
        self.update_spacefactor(node.space_factor);
        self.nodes.push(Node::Char(node));
        Ok(())
    }
    fn set_spacefactor(&mut self, sf: i64) -> Result<(), TypesetterError> {
        if sf <= 0 {
            return Err(TypesetterError::BadSpaceFactor { value:sf })
        }
        self.spacefactor = sf;
        Ok(())
    }
    fn spacefactor(&self) -> Result<i64, TypesetterError> { Ok(self.spacefactor) }
    fn last_node(&self) -> Option<&Node> { self.nodes.last() }
    fn remove_last_node(&mut self) -> Option<Node> { self.nodes.pop() }
    fn close(&mut self, _collaborators: &Collaborators, _options: &dyn TypesetterOptions) -> Result<NodeList, TypesetterError> {
        Ok(self.nodes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fontsystem::{SimpleFont, SpaceFactorTable};
    use crate::engine::options::ParameterTable;
    use crate::tex::numerics::GlueComponent;
    use crate::utils::Ptr;

    fn font() -> FontRef {
        Ptr::new(SimpleFont::new("cmr10")
            .with_default_metrics(Dimen(100),Dimen(70),Dimen(0))
            .with_dim(2,Dimen(300)).with_dim(3,Dimen(200)).with_dim(4,Dimen(100))
            .with_kern('A','V',Dimen(-20))
            .with_ligature('f','i','ﬁ'))
    }
    fn options() -> ParameterTable { ParameterTable::new(font()) }
    fn typeset(h:&mut HorizontalListMaker,s:&str) {
        let font = font();
        let factory = SpaceFactorTable::default();
        let options = ParameterTable::new(font.clone());
        for c in s.chars() {
            h.letter(c,&font,&factory,&options).unwrap();
        }
    }

    #[test]
    fn kerns_and_ligatures() {
        let mut h = HorizontalListMaker::new();
        typeset(&mut h,"AVfi");
        assert_eq!(h.nodes().len(),4);
        assert_eq!(h.nodes()[1],Node::Kern { width:Dimen(-20), implicit:true });
        assert!(matches!(&h.nodes()[3],Node::Ligature{glyph,parts} if glyph.char == 'ﬁ' && parts == &vec!('f','i')));
    }

    #[test]
    fn different_fonts_do_not_kern() {
        let mut h = HorizontalListMaker::new();
        typeset(&mut h,"A");
        let other = font();
        h.letter('V',&other,&SpaceFactorTable::default(),&options()).unwrap();
        assert_eq!(h.nodes().len(),2);
    }

    #[test]
    fn spacefactor_updates() {
        let mut h = HorizontalListMaker::new();
        typeset(&mut h,"A");
        assert_eq!(h.spacefactor(),Ok(999));
        // 999 -> 3000 is clamped
        typeset(&mut h,".");
        assert_eq!(h.spacefactor(),Ok(1000));
        typeset(&mut h,".");
        assert_eq!(h.spacefactor(),Ok(3000));
        // sfcode 0 leaves it alone
        typeset(&mut h,")");
        assert_eq!(h.spacefactor(),Ok(3000));
        h.add_glue(Glue::ZERO).unwrap();
        assert_eq!(h.spacefactor(),Ok(1000));
        assert_eq!(h.set_spacefactor(0),Err(TypesetterError::BadSpaceFactor { value:0 }));
    }

    #[test]
    fn space_bands() {
        let options = options();
        let mut h = HorizontalListMaker::new();
        h.add_space(&options,Some(0)).unwrap();
        assert!(h.is_empty());
        h.add_space(&options,None).unwrap();
        assert_eq!(h.last_node(),Some(&Node::Space(Glue::new(Dimen(300),GlueComponent::finite(200),GlueComponent::finite(100)))));
        h.add_space(&options,Some(2000)).unwrap();
        assert_eq!(h.last_node(),Some(&Node::Space(Glue::new(Dimen(300),GlueComponent::finite(400),GlueComponent::finite(50)))));
        h.add_space(&options,Some(500)).unwrap();
        assert_eq!(h.last_node(),Some(&Node::Space(Glue::new(Dimen(300),GlueComponent::finite(100),GlueComponent::finite(200)))));
        let options = options.with_glue("xspaceskip",Glue::from_dimen(Dimen(7)));
        h.add_space(&options,Some(3000)).unwrap();
        assert_eq!(h.last_node(),Some(&Node::Space(Glue::from_dimen(Dimen(7)))));
    }
}
