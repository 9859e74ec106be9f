/*! Math and display math mode.

A [`MathListMaker`] collects [`Noad`]s; braces open nested groups, which become [`Noad::List`]s when
closed. When the formula ends, a [`MathConverter`] turns the noads into ordinary [`Node`]s.
*/

use crate::debug_log;
use crate::engine::fontsystem::{CharNodeFactory, FontRef};
use crate::engine::mouth::TokenSource;
use crate::engine::options::TypesetterOptions;
use crate::engine::state::modes::Mode;
use crate::engine::stomach::Collaborators;
use crate::engine::stomach::listmaker::ListMaker;
use crate::tex::catcodes::CommandCode;
use crate::tex::nodes::{CharNode, HorizontalList, Node, NodeList, NodeTrait};
use crate::tex::nodes::math::{MathClass, Noad};
use crate::tex::numerics::Dimen;
use crate::tex::numerics::glue::Glue;
use crate::tex::tokens::Token;
use crate::utils::errors::TypesetterError;

/// Turns a finished math list into a horizontal list.
pub trait MathConverter {
    fn convert(&self,noads:Vec<Noad>,display:bool,options:&dyn TypesetterOptions) -> Result<HorizontalList,TypesetterError>;
}

/// Sets noads side by side, without any of TeX's math spacing. Superscripts are raised by the font's
/// x-height, subscripts lowered by half of it; both are followed by a kern of `\scriptspace`.
#[derive(Clone,Copy,Debug,Default)]
pub struct SimpleMathConverter;
impl SimpleMathConverter {
    fn noad(&self,noad:Noad,options:&dyn TypesetterOptions,out:&mut NodeList) -> Result<(),TypesetterError> {
        let (nucleus,sub,sup) = match noad {
            Noad::Glue(g) => {
                out.push(Node::Glue(g));
                return Ok(())
            }
            Noad::Node(n) => {
                out.push(n);
                return Ok(())
            }
            Noad::Char{char,font,sub,sup,..} => {
                let node = CharNode {
                    width:font.width(char),
                    height:font.height(char),
                    depth:font.depth(char),
                    char, font, space_factor:0
                };
                (Node::Char(node),sub,sup)
            }
            Noad::List{noads,sub,sup} => {
                let mut inner = Vec::new();
                for n in noads { self.noad(n,options,&mut inner)?; }
                (Node::HList(HorizontalList::new(inner)),sub,sup)
            }
        };
        out.push(nucleus);
        let ex = options.font().ex();
        let scriptspace = options.dimen_option("scriptspace").unwrap_or(Dimen::ZERO);
        if let Some(sup) = sup {
            let mut b = self.script(*sup,options)?;
            b.shift = -ex;
            out.push(Node::HList(b));
            out.push(Node::Kern { width:scriptspace, implicit:false });
        }
        if let Some(sub) = sub {
            let mut b = self.script(*sub,options)?;
            b.shift = ex.scale(1,2)?;
            out.push(Node::HList(b));
            out.push(Node::Kern { width:scriptspace, implicit:false });
        }
        Ok(())
    }
    fn script(&self,noad:Noad,options:&dyn TypesetterOptions) -> Result<HorizontalList,TypesetterError> {
        let mut nodes = Vec::new();
        self.noad(noad,options,&mut nodes)?;
        Ok(HorizontalList::new(nodes))
    }
}
impl MathConverter for SimpleMathConverter {
    fn convert(&self, noads: Vec<Noad>, display: bool, options: &dyn TypesetterOptions) -> Result<HorizontalList, TypesetterError> {
        let mut nodes = Vec::new();
        for n in noads { self.noad(n,options,&mut nodes)?; }
        let ret = HorizontalList::new(nodes);
        debug_log!(trace=>"converted {} formula of width {}",if display {"display"} else {"inline"},ret.width());
        Ok(ret)
    }
}

/// Reads the argument of `^` and `_`.
pub trait NoadScanner {
    fn scan_noad(&self,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<Noad,TypesetterError>;
}

/// Accepts a single letter or other character, or a group in braces of those (and nested groups).
#[derive(Clone,Copy,Debug,Default)]
pub struct SimpleNoadScanner;
impl SimpleNoadScanner {
    fn char_noad(c:char,code:CommandCode,options:&dyn TypesetterOptions) -> Noad {
        let class = if code == CommandCode::Letter { MathClass::Variable } else { MathClass::Ordinary };
        Noad::char(class,c,options.font())
    }
    fn group(&self,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<Noad,TypesetterError> {
        let mut noads = Vec::new();
        loop {
            match source.get_next()? {
                None => return Err(TypesetterError::EndOfFile { context:"math group" }),
                Some(Token::Character{code:CommandCode::EndGroup,..}) => return Ok(Noad::list(noads)),
                Some(Token::Character{code:CommandCode::BeginGroup,..}) => noads.push(self.group(source,options)?),
                Some(Token::Character{code:CommandCode::Space,..}) => (),
                Some(Token::Character{char,code:code@(CommandCode::Letter | CommandCode::Other)}) =>
                    noads.push(Self::char_noad(char,code,options)),
                Some(tk) => {
                    source.requeue(tk);
                    return Err(TypesetterError::MissingNoad)
                }
            }
        }
    }
}
impl NoadScanner for SimpleNoadScanner {
    fn scan_noad(&self, source: &mut dyn TokenSource, options: &dyn TypesetterOptions) -> Result<Noad, TypesetterError> {
        source.skip_whitespace()?;
        match source.get_next()? {
            None => Err(TypesetterError::EndOfFile { context:"script" }),
            Some(Token::Character{code:CommandCode::BeginGroup,..}) => self.group(source,options),
            Some(Token::Character{char,code:code@(CommandCode::Letter | CommandCode::Other)}) =>
                Ok(Self::char_noad(char,code,options)),
            Some(tk) => {
                source.requeue(tk);
                Err(TypesetterError::MissingNoad)
            }
        }
    }
}

/// The list maker of inline and display formulas.
pub struct MathListMaker {
    display:bool,
    noads:Vec<Noad>,
    groups:Vec<Vec<Noad>>
}
impl MathListMaker {
    pub fn new() -> Self { MathListMaker { display:false, noads:Vec::new(), groups:Vec::new() } }
    pub fn new_display() -> Self { MathListMaker { display:true, ..Self::new() } }
    pub fn noads(&self) -> &[Noad] { &self.noads }
    /// The number of currently open groups
    pub fn group_depth(&self) -> usize { self.groups.len() }

    // the noad scripts attach to; an empty one if there is none
    fn nucleus(&mut self) -> &mut Noad {
        if !self.noads.last().is_some_and(Noad::is_scriptable) {
            self.noads.push(Noad::list(Vec::new()));
        }
        let last = self.noads.len() - 1;
        &mut self.noads[last]
    }
}
impl ListMaker for MathListMaker {
    fn mode(&self) -> Mode {
        if self.display { Mode::DisplayMath } else { Mode::Math }
    }
    fn add(&mut self, node: Node) -> Result<(), TypesetterError> {
        self.noads.push(Noad::Node(node));
        Ok(())
    }
    fn add_glue(&mut self, glue: Glue) -> Result<(), TypesetterError> {
        self.noads.push(Noad::Glue(glue));
        Ok(())
    }
    // spaces are ignored in math mode
    fn add_space(&mut self, _options: &dyn TypesetterOptions, _sf_override: Option<i64>) -> Result<(), TypesetterError> {
        Ok(())
    }
    fn letter(&mut self, c: char, font: &FontRef, _factory: &dyn CharNodeFactory, _options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        let class = if c.is_alphabetic() { MathClass::Variable } else { MathClass::Ordinary };
        self.noads.push(Noad::char(class,c,font.clone()));
        Ok(())
    }
    fn add_noad(&mut self, noad: Noad) -> Result<(), TypesetterError> {
        self.noads.push(noad);
        Ok(())
    }
    fn left_brace(&mut self) -> Result<(), TypesetterError> {
        self.groups.push(std::mem::take(&mut self.noads));
        Ok(())
    }
    fn right_brace(&mut self) -> Result<(), TypesetterError> {
        match self.groups.pop() {
            None => Err(TypesetterError::ExtraRightBrace),
            Some(outer) => {
                let group = std::mem::replace(&mut self.noads,outer);
                self.noads.push(Noad::list(group));
                Ok(())
            }
        }
    }
    fn sub_mark(&mut self, noad: Noad) -> Result<(), TypesetterError> {
        self.nucleus().set_subscript(noad)
    }
    fn sup_mark(&mut self, noad: Noad) -> Result<(), TypesetterError> {
        self.nucleus().set_superscript(noad)
    }
    fn last_node(&self) -> Option<&Node> {
        match self.noads.last() {
            Some(Noad::Node(n)) => Some(n),
            _ => None
        }
    }
    fn remove_last_node(&mut self) -> Option<Node> {
        match self.noads.pop() {
            Some(Noad::Node(n)) => Some(n),
            Some(o) => {
                self.noads.push(o);
                None
            }
            None => None
        }
    }
    fn close(&mut self, collaborators: &Collaborators, options: &dyn TypesetterOptions) -> Result<NodeList, TypesetterError> {
        let mut noads = self.noads.clone();
        for outer in self.groups.iter().rev() {
            log::warn!("Missing }} inserted");
            let group = std::mem::replace(&mut noads,outer.clone());
            noads.push(Noad::list(group));
        }
        Ok(collaborators.math_converter.convert(noads,self.display,options)?.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fontsystem::{SimpleFont, SpaceFactorTable};
    use crate::engine::mouth::pretokenized::TokenList;
    use crate::engine::options::ParameterTable;
    use crate::tex::tokens::plain_tokens_from_str;
    use crate::utils::Ptr;

    fn options() -> ParameterTable {
        let font : FontRef = Ptr::new(SimpleFont::new("cmmi10")
            .with_default_metrics(Dimen(100),Dimen(70),Dimen(10))
            .with_dim(5,Dimen(40)));
        ParameterTable::plain(font)
    }

    #[test]
    fn scripts_and_groups() {
        let options = options();
        let factory = SpaceFactorTable::default();
        let mut m = MathListMaker::new();
        m.letter('x',&options.font(),&factory,&options).unwrap();
        m.sup_mark(Noad::char(MathClass::Ordinary,'2',options.font())).unwrap();
        assert_eq!(m.sup_mark(Noad::char(MathClass::Ordinary,'3',options.font())),Err(TypesetterError::DoubleSuperscript));
        m.left_brace().unwrap();
        m.letter('y',&options.font(),&factory,&options).unwrap();
        assert_eq!(m.group_depth(),1);
        m.right_brace().unwrap();
        assert_eq!(m.right_brace(),Err(TypesetterError::ExtraRightBrace));
        assert_eq!(m.noads().len(),2);
        // nothing to attach to: an empty nucleus is inserted
        m.add_glue(Glue::ZERO).unwrap();
        m.sub_mark(Noad::char(MathClass::Variable,'i',options.font())).unwrap();
        assert_eq!(m.noads().len(),4);
        assert!(matches!(&m.noads()[3],Noad::List{noads,sub:Some(_),..} if noads.is_empty()));
    }

    #[test]
    fn closing_leaves_groups_open() {
        let options = options();
        let factory = SpaceFactorTable::default();
        let mut m = MathListMaker::new();
        m.letter('x',&options.font(),&factory,&options).unwrap();
        m.left_brace().unwrap();
        m.letter('y',&options.font(),&factory,&options).unwrap();
        let nodes = m.close(&Collaborators::default(),&options).unwrap();
        assert!(!nodes.is_empty());
        // the missing brace is only supplied in the result
        assert_eq!(m.group_depth(),1);
        assert_eq!(m.noads().len(),1);
    }

    #[test]
    fn noad_scanner() {
        let options = options();
        let mut src = TokenList::new(plain_tokens_from_str(" a{b c}"));
        let a = SimpleNoadScanner.scan_noad(&mut src,&options).unwrap();
        assert!(matches!(a,Noad::Char{char:'a',class:MathClass::Variable,..}));
        let bc = SimpleNoadScanner.scan_noad(&mut src,&options).unwrap();
        assert!(matches!(&bc,Noad::List{noads,..} if noads.len() == 2));
        let mut src = TokenList::new(vec!(Token::cs("relax")));
        assert_eq!(SimpleNoadScanner.scan_noad(&mut src,&options),Err(TypesetterError::MissingNoad));
        assert_eq!(src.remaining().len(),1);
        let mut src = TokenList::new(plain_tokens_from_str("{ab"));
        assert_eq!(SimpleNoadScanner.scan_noad(&mut src,&options),Err(TypesetterError::EndOfFile { context:"math group" }));
    }

    #[test]
    fn conversion() {
        let options = options();
        let mut x = Noad::char(MathClass::Variable,'x',options.font());
        x.set_superscript(Noad::char(MathClass::Ordinary,'2',options.font())).unwrap();
        let list = SimpleMathConverter.convert(vec!(x,Noad::Glue(Glue::from_dimen(Dimen(5)))),false,&options).unwrap();
        // x, raised 2, scriptspace kern, glue
        assert_eq!(list.nodes.len(),4);
        assert!(matches!(&list.nodes[1],Node::HList(b) if b.shift == Dimen(-40)));
        assert_eq!(list.width(),Dimen(100 + 100 + 32768 + 5));
    }
}
