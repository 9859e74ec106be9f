/*! Nodes: the typeset material list makers accumulate.

A [`Node`] knows its own `width`, `height` and `depth`. For glue and kerns, the natural length is the
advance in the direction of the list they are in; [`HorizontalList`] and [`VerticalList`] compute
their natural sizes accordingly.
*/

pub mod math;

use std::fmt::{Display, Formatter};
use crate::engine::fontsystem::{FontRef, same_font};
use crate::tex::numerics::Dimen;
use crate::debug_log;
use crate::tex::numerics::glue::{Glue, GlueSet, Packing, WideGlue};
use crate::tex::tokens::{Token, display_tokens};

/// A list of nodes, as returned by a completed list maker.
pub type NodeList = Vec<Node>;

/// Sizes of typeset material.
pub trait NodeTrait {
    fn width(&self) -> Dimen;
    fn height(&self) -> Dimen;
    fn depth(&self) -> Dimen;
    /// Print this node the way `\showbox` does, indented by `indent` dots.
    fn readable_fmt(&self,indent:usize,f:&mut Formatter<'_>) -> std::fmt::Result;
}

fn dots(indent:usize,f:&mut Formatter<'_>) -> std::fmt::Result {
    f.write_str("\n")?;
    for _ in 0..indent { f.write_str(".")?; }
    Ok(())
}

/// A glyph in a font.
#[derive(Clone,Debug)]
pub struct CharNode {
    pub char:char,
    pub font:FontRef,
    pub width:Dimen,
    pub height:Dimen,
    pub depth:Dimen,
    /// The space factor code of the character; `0` means "leave the space factor alone".
    pub space_factor:i64
}
impl PartialEq for CharNode {
    fn eq(&self, other: &Self) -> bool {
        self.char == other.char && same_font(&self.font,&other.font) &&
            self.width == other.width && self.height == other.height && self.depth == other.depth
    }
}

#[derive(Clone,Debug,PartialEq)]
pub enum Node {
    Char(CharNode),
    /// A ligature glyph, remembering the characters it replaced
    Ligature{glyph:CharNode,parts:Vec<char>},
    /// A kern; `implicit` kerns are inserted by the font's kerning program
    Kern{width:Dimen,implicit:bool},
    Glue(Glue),
    /// Interword glue
    Space(Glue),
    Penalty(i64),
    Rule{width:Dimen,height:Dimen,depth:Dimen},
    HList(HorizontalList),
    VList(VerticalList),
    /// Start of a formula, with `\mathsurround`
    BeforeMath(Dimen),
    /// End of a formula, with `\mathsurround`
    AfterMath(Dimen),
    Mark(Vec<Token>)
}
impl Node {
    /// The glyph of a character or ligature node.
    pub fn as_char(&self) -> Option<&CharNode> {
        match self {
            Node::Char(c) | Node::Ligature{glyph:c,..} => Some(c),
            _ => None
        }
    }
    /// Glue, interword glue and kerns.
    pub fn advance(&self) -> Option<Dimen> {
        match self {
            Node::Glue(g) | Node::Space(g) => Some(g.length),
            Node::Kern{width,..} => Some(*width),
            _ => None
        }
    }
    /// Nodes that disappear at line and page breaks.
    pub fn discardable(&self) -> bool {
        matches!(self,Node::Glue(_) | Node::Space(_) | Node::Kern{..} | Node::Penalty(_) | Node::BeforeMath(_) | Node::AfterMath(_))
    }
}
impl NodeTrait for Node {
    fn width(&self) -> Dimen {
        match self {
            Node::Char(c) | Node::Ligature{glyph:c,..} => c.width,
            Node::Kern{width,..} | Node::Rule{width,..} => *width,
            Node::Glue(g) | Node::Space(g) => g.length,
            Node::HList(b) => b.width(),
            Node::VList(b) => b.width(),
            Node::BeforeMath(d) | Node::AfterMath(d) => *d,
            Node::Penalty(_) | Node::Mark(_) => Dimen::ZERO
        }
    }
    fn height(&self) -> Dimen {
        match self {
            Node::Char(c) | Node::Ligature{glyph:c,..} => c.height,
            Node::Rule{height,..} => *height,
            Node::HList(b) => b.height(),
            Node::VList(b) => b.height(),
            _ => Dimen::ZERO
        }
    }
    fn depth(&self) -> Dimen {
        match self {
            Node::Char(c) | Node::Ligature{glyph:c,..} => c.depth,
            Node::Rule{depth,..} => *depth,
            Node::HList(b) => b.depth(),
            Node::VList(b) => b.depth(),
            _ => Dimen::ZERO
        }
    }
    fn readable_fmt(&self, indent: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::HList(b) => b.readable_fmt(indent,f),
            Node::VList(b) => b.readable_fmt(indent,f),
            o => {
                dots(indent,f)?;
                match o {
                    Node::Char(c) => write!(f,"\\{} {}",c.font.name(),c.char),
                    Node::Ligature{glyph,parts} =>
                        write!(f,"\\{} {} (ligature {})",glyph.font.name(),glyph.char,parts.iter().collect::<String>()),
                    Node::Kern{width,implicit:true} => write!(f,"\\kern{}",width),
                    Node::Kern{width,implicit:false} => write!(f,"\\kern {}",width),
                    Node::Glue(g) => write!(f,"\\glue {}",g),
                    Node::Space(g) => write!(f,"\\glue(\\spaceskip) {}",g),
                    Node::Penalty(p) => write!(f,"\\penalty {}",p),
                    Node::Rule{width,height,depth} => write!(f,"\\rule({}+{})x{}",height,depth,width),
                    Node::BeforeMath(d) if *d == Dimen::ZERO => write!(f,"\\mathon"),
                    Node::AfterMath(d) if *d == Dimen::ZERO => write!(f,"\\mathoff"),
                    Node::BeforeMath(d) => write!(f,"\\mathon, surrounded {}",d),
                    Node::AfterMath(d) => write!(f,"\\mathoff, surrounded {}",d),
                    Node::Mark(tks) => write!(f,"\\mark{{{}}}",display_tokens(tks)),
                    Node::HList(_) | Node::VList(_) => Ok(())
                }
            }
        }
    }
}
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { self.readable_fmt(0,f) }
}

/// An `\hbox`: nodes laid out left to right.
#[derive(Clone,Debug,PartialEq,Default)]
pub struct HorizontalList {
    pub nodes:NodeList,
    /// If set, the box has been packed to this width
    pub target_width:Option<Dimen>,
    /// Shift of the box perpendicular to the list it is in (`\raise`/`\moveright`)
    pub shift:Dimen,
    pub glue_set:GlueSet
}
impl HorizontalList {
    pub fn new(nodes:NodeList) -> Self {
        HorizontalList { nodes, target_width:None, shift:Dimen::ZERO, glue_set:GlueSet::Natural }
    }
    /// The sum of the widths of the contents
    pub fn natural_width(&self) -> Dimen {
        self.nodes.iter().map(|n| n.width()).sum()
    }
    /// The widths of the contents, with the glue kept apart
    pub fn total_glue(&self) -> WideGlue {
        let mut total = WideGlue::new();
        for n in &self.nodes {
            match n {
                Node::Glue(g) | Node::Space(g) => total.add(g),
                n => total.add_length(n.width())
            }
        }
        total
    }
    /// Fix the width of this box, stretching or shrinking its glue to make the contents fit.
    pub fn pack_to(mut self,width:Dimen) -> Self {
        let total = self.total_glue();
        let packing = Packing::new(width - total.length(),&total);
        if !self.nodes.is_empty() { report("\\hbox","wide",&packing); }
        self.glue_set = packing.glue_set;
        self.target_width = Some(width);
        self
    }
}

fn report(what:&str,dir:&str,packing:&Packing) {
    if packing.overfull > Dimen::ZERO {
        log::warn!("Overfull {} ({} too {})",what,packing.overfull,dir);
    } else if packing.badness > 1000 {
        debug_log!(debug=>"Underfull {} (badness {})",what,packing.badness);
    }
}
impl NodeTrait for HorizontalList {
    fn width(&self) -> Dimen { self.target_width.unwrap_or_else(|| self.natural_width()) }
    fn height(&self) -> Dimen {
        self.nodes.iter().map(|n| match n {
            Node::HList(b) => b.height() - b.shift,
            Node::VList(b) => b.height() - b.shift,
            n => n.height()
        }).max().unwrap_or_default().max(Dimen::ZERO)
    }
    fn depth(&self) -> Dimen {
        self.nodes.iter().map(|n| match n {
            Node::HList(b) => b.depth() + b.shift,
            Node::VList(b) => b.depth() + b.shift,
            n => n.depth()
        }).max().unwrap_or_default().max(Dimen::ZERO)
    }
    fn readable_fmt(&self, indent: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        dots(indent,f)?;
        write!(f,"\\hbox({}+{})x{}",self.height(),self.depth(),self.width())?;
        if self.shift != Dimen::ZERO { write!(f,", shifted {}",self.shift)?; }
        for n in &self.nodes { n.readable_fmt(indent + 1,f)?; }
        Ok(())
    }
}

/// A `\vbox`: nodes stacked top to bottom.
#[derive(Clone,Debug,PartialEq,Default)]
pub struct VerticalList {
    pub nodes:NodeList,
    pub target_height:Option<Dimen>,
    pub target_width:Option<Dimen>,
    pub shift:Dimen,
    pub glue_set:GlueSet
}
impl VerticalList {
    pub fn new(nodes:NodeList) -> Self {
        VerticalList { nodes, target_height:None, target_width:None, shift:Dimen::ZERO, glue_set:GlueSet::Natural }
    }
    /// Natural height and depth: the depth is that of the last box or rule, unless glue or a kern
    /// follows it.
    fn natural(&self) -> (Dimen,Dimen) {
        let mut height = Dimen::ZERO;
        let mut depth = Dimen::ZERO;
        for n in &self.nodes {
            match n {
                Node::HList(_) | Node::VList(_) | Node::Rule{..} | Node::Char(_) | Node::Ligature{..} => {
                    height += depth + n.height();
                    depth = n.depth();
                }
                n => if let Some(d) = n.advance() {
                    height += depth + d;
                    depth = Dimen::ZERO;
                }
            }
        }
        (height,depth)
    }
    pub fn natural_height(&self) -> Dimen { self.natural().0 }
    /// Fix the height of this box, stretching or shrinking its glue to make the contents fit.
    pub fn pack_to(mut self,height:Dimen) -> Self {
        let mut total = WideGlue::new();
        for n in &self.nodes {
            if let Node::Glue(g) | Node::Space(g) = n { total.add(g) }
        }
        let packing = Packing::new(height - self.natural_height(),&total);
        if !self.nodes.is_empty() { report("\\vbox","high",&packing); }
        self.glue_set = packing.glue_set;
        self.target_height = Some(height);
        self
    }
}
impl NodeTrait for VerticalList {
    fn width(&self) -> Dimen {
        self.target_width.unwrap_or_else(|| self.nodes.iter().map(|n| match n {
            Node::HList(b) => b.width() + b.shift,
            Node::VList(b) => b.width() + b.shift,
            Node::Rule{width,..} => *width,
            Node::Char(c) | Node::Ligature{glyph:c,..} => c.width,
            _ => Dimen::ZERO
        }).max().unwrap_or_default())
    }
    fn height(&self) -> Dimen { self.target_height.unwrap_or_else(|| self.natural().0) }
    fn depth(&self) -> Dimen { self.natural().1 }
    fn readable_fmt(&self, indent: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        dots(indent,f)?;
        write!(f,"\\vbox({}+{})x{}",self.height(),self.depth(),self.width())?;
        if self.shift != Dimen::ZERO { write!(f,", shifted {}",self.shift)?; }
        for n in &self.nodes { n.readable_fmt(indent + 1,f)?; }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fontsystem::{CharNodeFactory, SimpleFont, SpaceFactorTable};
    use crate::tex::numerics::GlueComponent;
    use crate::utils::Ptr;

    fn chars(s:&str) -> NodeList {
        let font : FontRef = Ptr::new(SimpleFont::new("f").with_default_metrics(Dimen(10),Dimen(7),Dimen(2)));
        let factory = SpaceFactorTable::default();
        s.chars().filter_map(|c| factory.new_char_node(&font,c)).map(Node::Char).collect()
    }

    #[test]
    fn hlist_sizes() {
        let mut nodes = chars("ab");
        nodes.push(Node::Glue(Glue::from_dimen(Dimen(5))));
        nodes.push(Node::Kern{width:Dimen(-1),implicit:true});
        let b = HorizontalList::new(nodes);
        assert_eq!(b.width(),Dimen(24));
        assert_eq!(b.height(),Dimen(7));
        assert_eq!(b.depth(),Dimen(2));
        assert_eq!(b.clone().pack_to(Dimen(100)).width(),Dimen(100));
    }

    #[test]
    fn packing_hlists() {
        let mut nodes = chars("ab");
        nodes.push(Node::Space(Glue::new(Dimen(5),GlueComponent::finite(2),GlueComponent::finite(1))));
        nodes.extend(chars("c"));
        // underfull: the glue stretches ten times its stretchability
        let b = HorizontalList::new(nodes.clone()).pack_to(Dimen(55));
        assert_eq!(b.width(),Dimen(55));
        assert_eq!(b.glue_set,GlueSet::Stretch { ratio:10.0, order:0 });
        // overfull: the glue shrinks by its full shrinkability, and no more
        let b = HorizontalList::new(nodes.clone()).pack_to(Dimen(30));
        assert_eq!(b.width(),Dimen(30));
        assert_eq!(b.glue_set,GlueSet::Shrink { ratio:1.0, order:0 });
        assert_eq!(Packing::new(Dimen(30) - b.natural_width(),&b.total_glue()).overfull,Dimen(4));
        // fil glue takes everything
        nodes.push(Node::Glue(Glue::new(Dimen::ZERO,GlueComponent::new(1,1),GlueComponent::ZERO)));
        let b = HorizontalList::new(nodes).pack_to(Dimen(45));
        assert_eq!(b.glue_set,GlueSet::Stretch { ratio:10.0, order:1 });
        assert_eq!(HorizontalList::new(chars("a")).pack_to(Dimen(10)).glue_set,GlueSet::Natural);
    }

    #[test]
    fn packing_vlists() {
        let line = Node::HList(HorizontalList::new(chars("a")));
        let v = VerticalList::new(vec!(line.clone(),Node::Glue(Glue::new(Dimen(3),GlueComponent::new(2,2),GlueComponent::ZERO)),line));
        let v = v.pack_to(Dimen(29));
        assert_eq!(v.height(),Dimen(29));
        assert_eq!(v.glue_set,GlueSet::Stretch { ratio:5.0, order:2 });
    }

    #[test]
    fn vlist_sizes() {
        let line = Node::HList(HorizontalList::new(chars("ab")));
        let v = VerticalList::new(vec!(line.clone(),Node::Glue(Glue::from_dimen(Dimen(3))),line));
        // 7 + 2 + 3 + 7, depth 2
        assert_eq!(v.height(),Dimen(19));
        assert_eq!(v.depth(),Dimen(2));
        assert_eq!(v.width(),Dimen(20));
    }

    #[test]
    fn show_box() {
        let b = Node::HList(HorizontalList::new(chars("a")));
        assert_eq!(b.to_string(),"\n\\hbox(0.0001pt+0.00003pt)x0.00015pt\n.\\f a");
    }
}
