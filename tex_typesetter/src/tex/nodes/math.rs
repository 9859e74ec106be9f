/*! Noads: the elements of math lists, before they are turned into [`Node`]s.
*/

use std::fmt::{Display, Formatter};
use crate::engine::fontsystem::{FontRef, same_font};
use crate::tex::nodes::{Node, NodeTrait};
use crate::tex::numerics::glue::Glue;
use crate::utils::errors::TypesetterError;

/// The class of a math character, as in `\mathchar"7161`.
#[derive(Copy,Clone,PartialEq,Eq,Debug,Hash)]
pub enum MathClass {
    Ordinary,
    LargeOperator,
    Binary,
    Relation,
    Opening,
    Closing,
    Punctuation,
    /// An ordinary symbol whose family follows `\fam`, e.g. a letter
    Variable
}
impl MathClass {
    /// The name of the noad kind `\showlists` prints for this class.
    pub fn name(&self) -> &'static str {
        use MathClass::*;
        match self {
            Ordinary | Variable => "mathord",
            LargeOperator => "mathop",
            Binary => "mathbin",
            Relation => "mathrel",
            Opening => "mathopen",
            Closing => "mathclose",
            Punctuation => "mathpunct"
        }
    }
}

#[derive(Clone,Debug)]
pub enum Noad {
    /// A math character, with optional sub- and superscript
    Char{class:MathClass,char:char,font:FontRef,sub:Option<Box<Noad>>,sup:Option<Box<Noad>>},
    /// A braced subformula, with optional sub- and superscript
    List{noads:Vec<Noad>,sub:Option<Box<Noad>>,sup:Option<Box<Noad>>},
    Glue(Glue),
    /// Ordinary typeset material inside a formula, e.g. a box or a kern
    Node(Node)
}
impl Noad {
    pub fn char(class:MathClass,char:char,font:FontRef) -> Self {
        Noad::Char { class, char, font, sub:None, sup:None }
    }
    pub fn list(noads:Vec<Noad>) -> Self {
        Noad::List { noads, sub:None, sup:None }
    }
    /// Whether this noad can carry scripts
    pub fn is_scriptable(&self) -> bool {
        matches!(self,Noad::Char{..} | Noad::List{..})
    }
    pub fn subscript(&self) -> Option<&Noad> {
        match self {
            Noad::Char{sub,..} | Noad::List{sub,..} => sub.as_deref(),
            _ => None
        }
    }
    pub fn superscript(&self) -> Option<&Noad> {
        match self {
            Noad::Char{sup,..} | Noad::List{sup,..} => sup.as_deref(),
            _ => None
        }
    }
    /// Attach a subscript. Fails with [`DoubleSubscript`](TypesetterError::DoubleSubscript) if there
    /// already is one, and with [`MissingNoad`](TypesetterError::MissingNoad) if this noad cannot carry scripts.
    pub fn set_subscript(&mut self,script:Noad) -> Result<(),TypesetterError> {
        match self {
            Noad::Char{sub:Some(_),..} | Noad::List{sub:Some(_),..} => Err(TypesetterError::DoubleSubscript),
            Noad::Char{sub,..} | Noad::List{sub,..} => {
                *sub = Some(Box::new(script));
                Ok(())
            }
            _ => Err(TypesetterError::MissingNoad)
        }
    }
    /// Attach a superscript; see [`set_subscript`](Self::set_subscript).
    pub fn set_superscript(&mut self,script:Noad) -> Result<(),TypesetterError> {
        match self {
            Noad::Char{sup:Some(_),..} | Noad::List{sup:Some(_),..} => Err(TypesetterError::DoubleSuperscript),
            Noad::Char{sup,..} | Noad::List{sup,..} => {
                *sup = Some(Box::new(script));
                Ok(())
            }
            _ => Err(TypesetterError::MissingNoad)
        }
    }

    fn readable_fmt(&self,indent:&str,f:&mut Formatter<'_>) -> std::fmt::Result {
        if let Noad::Node(n) = self {
            return n.readable_fmt(indent.chars().count(),f)
        }
        write!(f,"\n{}",indent)?;
        match self {
            Noad::Char{class,char,font,..} => write!(f,"\\{}\n{}.\\{} {}",class.name(),indent,font.name(),char)?,
            Noad::List{noads,..} => {
                write!(f,"\\mathord")?;
                let inner = format!("{}.",indent);
                for n in noads { n.readable_fmt(&inner,f)?; }
            }
            Noad::Glue(g) => write!(f,"\\glue {}",g)?,
            Noad::Node(_) => ()
        }
        if let Some(sup) = self.superscript() {
            sup.readable_fmt(&format!("{}^",indent),f)?;
        }
        if let Some(sub) = self.subscript() {
            sub.readable_fmt(&format!("{}_",indent),f)?;
        }
        Ok(())
    }
}
impl PartialEq for Noad {
    fn eq(&self, other: &Self) -> bool {
        match (self,other) {
            (Noad::Char{class:c1,char:ch1,font:f1,sub:b1,sup:p1},Noad::Char{class:c2,char:ch2,font:f2,sub:b2,sup:p2}) =>
                c1 == c2 && ch1 == ch2 && same_font(f1,f2) && b1 == b2 && p1 == p2,
            (Noad::List{noads:n1,sub:b1,sup:p1},Noad::List{noads:n2,sub:b2,sup:p2}) =>
                n1 == n2 && b1 == b2 && p1 == p2,
            (Noad::Glue(g1),Noad::Glue(g2)) => g1 == g2,
            (Noad::Node(n1),Noad::Node(n2)) => n1 == n2,
            _ => false
        }
    }
}
impl Display for Noad {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { self.readable_fmt("",f) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fontsystem::SimpleFont;
    use crate::utils::Ptr;

    #[test]
    fn scripts() {
        let font : FontRef = Ptr::new(SimpleFont::new("cmmi10"));
        let mut x = Noad::char(MathClass::Variable,'x',font.clone());
        x.set_superscript(Noad::char(MathClass::Ordinary,'2',font.clone())).unwrap();
        assert_eq!(x.set_superscript(Noad::char(MathClass::Ordinary,'3',font.clone())),Err(TypesetterError::DoubleSuperscript));
        assert!(x.subscript().is_none());
        x.set_subscript(Noad::char(MathClass::Variable,'i',font.clone())).unwrap();
        assert_eq!(x.set_subscript(Noad::list(vec!())),Err(TypesetterError::DoubleSubscript));
        assert_eq!(x.to_string(),"\n\\mathord\n.\\cmmi10 x\n^\\mathord\n^.\\cmmi10 2\n_\\mathord\n_.\\cmmi10 i");
        let mut g = Noad::Glue(Glue::ZERO);
        assert!(!g.is_scriptable());
        assert_eq!(g.set_subscript(Noad::list(vec!())),Err(TypesetterError::MissingNoad));
    }
}
