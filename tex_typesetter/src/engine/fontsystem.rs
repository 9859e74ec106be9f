/*! Fonts, as far as the list makers are concerned: glyph metrics, kerning, ligatures and the font
dimensions (`\fontdimen`) that determine interword spacing and the units `em` and `ex`.

Actual font files are not read here; [`SimpleFont`] is a table-backed [`Font`] that can be filled
from anywhere.
*/

use crate::tex::nodes::CharNode;
use crate::tex::numerics::{Dimen, GlueComponent};
use crate::tex::numerics::glue::Glue;
use crate::utils::{HMap, Ptr};

/// A font with its metrics.
pub trait Font:std::fmt::Debug {
    fn name(&self) -> &str;
    /// The `idx`th font dimension (1-based, as `\fontdimen`); `0` if not set.
    fn get_dim(&self,idx:u16) -> Dimen;
    fn has_glyph(&self,c:char) -> bool;
    fn width(&self,c:char) -> Dimen;
    fn height(&self,c:char) -> Dimen;
    fn depth(&self,c:char) -> Dimen;
    /// The kern between `left` and `right` if they are adjacent.
    fn kern(&self,left:char,right:char) -> Dimen;
    /// The ligature `left` and `right` form if they are adjacent.
    fn ligature(&self,left:char,right:char) -> Option<char>;

    /// Interword glue: `\fontdimen2` plus `\fontdimen3` minus `\fontdimen4`
    fn space(&self) -> Glue {
        Glue::new(self.get_dim(2),GlueComponent::from(self.get_dim(3)),GlueComponent::from(self.get_dim(4)))
    }
    /// `\fontdimen5`
    fn ex(&self) -> Dimen { self.get_dim(5) }
    /// `\fontdimen6`
    fn em(&self) -> Dimen { self.get_dim(6) }
    /// `\fontdimen7`
    fn extra_space(&self) -> Dimen { self.get_dim(7) }
}

/// Shared handle to a [`Font`].
pub type FontRef = Ptr<dyn Font>;

/// Whether `a` and `b` are the same font (identity, not equality of metrics).
pub fn same_font(a:&FontRef,b:&FontRef) -> bool {
    std::ptr::addr_eq(Ptr::as_ptr(a),Ptr::as_ptr(b))
}

/** A [`Font`] given by tables. Glyphs not listed explicitly get the default metrics.

```rust
use tex_typesetter::engine::fontsystem::{Font, SimpleFont};
use tex_typesetter::tex::numerics::Dimen;

let font = SimpleFont::new("cmr10")
    .with_dim(2,Dimen::from_pt(3))
    .with_kern('A','V',Dimen(-5000))
    .with_ligature('f','i','ﬁ');
assert_eq!(font.space().to_string(),"3.0pt");
assert_eq!(font.kern('A','V'),Dimen(-5000));
assert_eq!(font.ligature('f','i'),Some('ﬁ'));
```
*/
#[derive(Clone,Debug,Default)]
pub struct SimpleFont {
    name:String,
    dimen:Vec<Dimen>,
    default_metrics:(Dimen,Dimen,Dimen),
    metrics:HMap<char,(Dimen,Dimen,Dimen)>,
    missing:Vec<char>,
    kerns:HMap<(char,char),Dimen>,
    ligatures:HMap<(char,char),char>
}
impl SimpleFont {
    pub fn new<S:Into<String>>(name:S) -> Self {
        SimpleFont { name:name.into(), ..Default::default() }
    }
    pub fn with_dim(mut self,idx:u16,d:Dimen) -> Self {
        self.set_dim(idx,d);
        self
    }
    pub fn set_dim(&mut self,idx:u16,d:Dimen) {
        let idx = idx as usize;
        if idx == 0 { return }
        if self.dimen.len() < idx {
            self.dimen.resize(idx,Dimen::ZERO);
        }
        self.dimen[idx - 1] = d;
    }
    /// Width, height and depth of all glyphs without explicit metrics
    pub fn with_default_metrics(mut self,width:Dimen,height:Dimen,depth:Dimen) -> Self {
        self.default_metrics = (width,height,depth);
        self
    }
    pub fn with_glyph(mut self,c:char,width:Dimen,height:Dimen,depth:Dimen) -> Self {
        self.metrics.insert(c,(width,height,depth));
        self
    }
    /// Mark `c` as not present in this font
    pub fn without_glyph(mut self,c:char) -> Self {
        self.missing.push(c);
        self
    }
    pub fn with_kern(mut self,left:char,right:char,kern:Dimen) -> Self {
        self.kerns.insert((left,right),kern);
        self
    }
    pub fn with_ligature(mut self,left:char,right:char,lig:char) -> Self {
        self.ligatures.insert((left,right),lig);
        self
    }
    fn metrics(&self,c:char) -> (Dimen,Dimen,Dimen) {
        self.metrics.get(&c).copied().unwrap_or(self.default_metrics)
    }
}
impl Font for SimpleFont {
    fn name(&self) -> &str { &self.name }
    fn get_dim(&self,idx:u16) -> Dimen {
        match idx {
            0 => Dimen::ZERO,
            i => self.dimen.get(i as usize - 1).copied().unwrap_or_default()
        }
    }
    fn has_glyph(&self, c: char) -> bool { !self.missing.contains(&c) }
    fn width(&self, c: char) -> Dimen { self.metrics(c).0 }
    fn height(&self, c: char) -> Dimen { self.metrics(c).1 }
    fn depth(&self, c: char) -> Dimen { self.metrics(c).2 }
    fn kern(&self, left: char, right: char) -> Dimen {
        self.kerns.get(&(left,right)).copied().unwrap_or_default()
    }
    fn ligature(&self, left: char, right: char) -> Option<char> {
        self.ligatures.get(&(left,right)).copied()
    }
}

/// Turns a character in a font into a [`CharNode`], including its space factor.
pub trait CharNodeFactory {
    /// `None` if the font has no glyph for `c`.
    fn new_char_node(&self,font:&FontRef,c:char) -> Option<CharNode>;
}

/// A [`CharNodeFactory`] with a table of space factor codes (`\sfcode`). Characters not in the table
/// have space factor code `1000`.
#[derive(Clone,Debug)]
pub struct SpaceFactorTable {
    sfcodes:HMap<char,i64>
}
impl SpaceFactorTable {
    /// All characters have space factor code `1000`, as in INITEX.
    pub fn uniform() -> Self { SpaceFactorTable { sfcodes:HMap::default() } }
    pub fn set(&mut self,c:char,sf:i64) { self.sfcodes.insert(c,sf); }
    pub fn get(&self,c:char) -> i64 { self.sfcodes.get(&c).copied().unwrap_or(1000) }
}
impl Default for SpaceFactorTable {
    /// The space factor codes of plain TeX (`\frenchspacing` off).
    fn default() -> Self {
        let mut ret = Self::uniform();
        for c in 'A'..='Z' { ret.set(c,999) }
        for c in ['.','?','!'] { ret.set(c,3000) }
        ret.set(':',2000);
        ret.set(';',1500);
        ret.set(',',1250);
        for c in [')','\'',']'] { ret.set(c,0) }
        ret
    }
}
impl CharNodeFactory for SpaceFactorTable {
    fn new_char_node(&self,font:&FontRef,c:char) -> Option<CharNode> {
        if !font.has_glyph(c) { return None }
        Some(CharNode {
            char:c,
            font:font.clone(),
            width:font.width(c),
            height:font.height(c),
            depth:font.depth(c),
            space_factor:self.get(c)
        })
    }
}
