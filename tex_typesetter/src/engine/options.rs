/*! Typesetting parameters: the named glue, dimension, count and token list registers list makers consult,
e.g. `\baselineskip` or `\everymath`.

The interpreter owns these values; list makers only read them through [`TypesetterOptions`]. A parameter
that has never been set is `None`, which is different from being set to zero: e.g. an unset `\xspaceskip`
makes interword spacing fall back to `\spaceskip`.
*/

use crate::engine::fontsystem::{FontRef, SimpleFont};
use crate::tex::numerics::{Dimen, GlueComponent, ONE};
use crate::tex::numerics::glue::Glue;
use crate::tex::tokens::Token;
use crate::utils::{HMap, Ptr};

/// Read access to typesetting parameters.
pub trait TypesetterOptions {
    fn glue_option(&self,name:&str) -> Option<Glue>;
    fn dimen_option(&self,name:&str) -> Option<Dimen>;
    fn count_option(&self,name:&str) -> Option<i64>;
    fn toks_option(&self,name:&str) -> Option<&[Token]>;
    /// The current font
    fn font(&self) -> FontRef;
    /// `\mag`; `1000` if unset
    fn magnification(&self) -> i64 {
        self.count_option("mag").unwrap_or(1000)
    }
}

/// Glue parameters list makers know about
pub const GLUE_PARAMETERS: &[&str] = &[
    "baselineskip","lineskip","spaceskip","xspaceskip","parfillskip","parskip",
    "leftskip","rightskip","tabskip","abovedisplayskip","belowdisplayskip"
];
/// Dimension parameters list makers know about
pub const DIMEN_PARAMETERS: &[&str] = &[
    "lineskiplimit","hsize","vsize","parindent","mathsurround","scriptspace"
];
/// Integer parameters list makers know about
pub const COUNT_PARAMETERS: &[&str] = &[
    "mag","tolerance","pretolerance","language","hyphenpenalty","looseness"
];
/// Token list parameters list makers know about
pub const TOKS_PARAMETERS: &[&str] = &[
    "everymath","everydisplay","everymathend","everydisplayend","everypar","everyhbox","everyvbox","everycr"
];

/// An in-memory [`TypesetterOptions`]. Setting a parameter whose name is not one of the known ones
/// (e.g. [`GLUE_PARAMETERS`]) is ignored with a warning.
#[derive(Clone,Debug)]
pub struct ParameterTable {
    glue:HMap<&'static str,Glue>,
    dimen:HMap<&'static str,Dimen>,
    count:HMap<&'static str,i64>,
    toks:HMap<&'static str,Vec<Token>>,
    font:FontRef
}

fn known(names:&'static [&'static str],name:&str) -> Option<&'static str> {
    match names.iter().find(|n| **n == name) {
        Some(n) => Some(*n),
        None => {
            log::warn!("Unknown parameter \\{} ignored",name);
            None
        }
    }
}

impl ParameterTable {
    /// An empty table with the given current font.
    pub fn new(font:FontRef) -> Self {
        ParameterTable {
            glue:HMap::default(),
            dimen:HMap::default(),
            count:HMap::default(),
            toks:HMap::default(),
            font
        }
    }
    /// The values plain TeX assigns, e.g. `\baselineskip=12pt` and `\parfillskip=0pt plus 1fil`.
    pub fn plain(font:FontRef) -> Self {
        ParameterTable::new(font)
            .with_glue("baselineskip",Glue::from_dimen(Dimen::from_pt(12)))
            .with_glue("lineskip",Glue::from_dimen(Dimen::from_pt(1)))
            .with_glue("parfillskip",Glue::new(Dimen::ZERO,GlueComponent::new(ONE,2),GlueComponent::ZERO))
            .with_glue("tabskip",Glue::ZERO)
            .with_dimen("lineskiplimit",Dimen::ZERO)
            .with_dimen("scriptspace",Dimen(ONE / 2))
            .with_dimen("mathsurround",Dimen::ZERO)
            .with_count("mag",1000)
            .with_count("tolerance",200)
            .with_count("pretolerance",100)
            .with_count("hyphenpenalty",50)
    }

    pub fn set_glue(&mut self,name:&str,g:Glue) {
        if let Some(n) = known(GLUE_PARAMETERS,name) { self.glue.insert(n,g); }
    }
    pub fn set_dimen(&mut self,name:&str,d:Dimen) {
        if let Some(n) = known(DIMEN_PARAMETERS,name) { self.dimen.insert(n,d); }
    }
    pub fn set_count(&mut self,name:&str,i:i64) {
        if let Some(n) = known(COUNT_PARAMETERS,name) { self.count.insert(n,i); }
    }
    pub fn set_toks(&mut self,name:&str,tks:Vec<Token>) {
        if let Some(n) = known(TOKS_PARAMETERS,name) { self.toks.insert(n,tks); }
    }
    pub fn set_font(&mut self,font:FontRef) { self.font = font }
    /// Reset a parameter of any kind to "unset"
    pub fn unset(&mut self,name:&str) {
        self.glue.remove(name);
        self.dimen.remove(name);
        self.count.remove(name);
        self.toks.remove(name);
    }

    pub fn with_glue(mut self,name:&str,g:Glue) -> Self { self.set_glue(name,g); self }
    pub fn with_dimen(mut self,name:&str,d:Dimen) -> Self { self.set_dimen(name,d); self }
    pub fn with_count(mut self,name:&str,i:i64) -> Self { self.set_count(name,i); self }
    pub fn with_toks(mut self,name:&str,tks:Vec<Token>) -> Self { self.set_toks(name,tks); self }
}
impl Default for ParameterTable {
    /// An empty table whose current font is an empty `nullfont`.
    fn default() -> Self { ParameterTable::new(Ptr::new(SimpleFont::new("nullfont"))) }
}
impl TypesetterOptions for ParameterTable {
    fn glue_option(&self, name: &str) -> Option<Glue> { self.glue.get(name).copied() }
    fn dimen_option(&self, name: &str) -> Option<Dimen> { self.dimen.get(name).copied() }
    fn count_option(&self, name: &str) -> Option<i64> { self.count.get(name).copied() }
    fn toks_option(&self, name: &str) -> Option<&[Token]> { self.toks.get(name).map(|v| v.as_slice()) }
    fn font(&self) -> FontRef { self.font.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tex::tokens::letters_from_str;

    #[test]
    fn unset_is_none() {
        let mut table = ParameterTable::default();
        assert_eq!(table.glue_option("xspaceskip"),None);
        assert_eq!(table.magnification(),1000);
        table.set_glue("xspaceskip",Glue::ZERO);
        assert_eq!(table.glue_option("xspaceskip"),Some(Glue::ZERO));
        table.unset("xspaceskip");
        assert_eq!(table.glue_option("xspaceskip"),None);
    }

    #[test]
    fn plain_values() {
        let table = ParameterTable::plain(Ptr::new(SimpleFont::new("cmr10")))
            .with_count("mag",2000)
            .with_toks("everymath",letters_from_str("abc"));
        assert_eq!(table.glue_option("baselineskip").unwrap().to_string(),"12.0pt");
        assert_eq!(table.glue_option("parfillskip").unwrap().to_string(),"0.0pt plus 1.0fil");
        assert_eq!(table.magnification(),2000);
        assert_eq!(table.toks_option("everymath").map(|t| t.len()),Some(3));
        assert_eq!(table.font().name(),"cmr10");
    }

    #[test]
    fn unknown_names_are_dropped() {
        let table = ParameterTable::default().with_dimen("notaparameter",Dimen(1)).with_glue("hsize",Glue::ZERO);
        assert_eq!(table.dimen_option("notaparameter"),None);
        assert_eq!(table.glue_option("hsize"),None);
    }
}
