/*! The stomach: list makers and the [`ListManager`] that keeps them on a stack.

The manager receives typesetting primitives (characters, spaces, glue, math shifts, alignment tabs, ...)
from the interpreter and hands them to the [`ListMaker`](listmaker::ListMaker) on top of the stack,
opening and closing list makers where the mode has to change: a letter in vertical mode starts a
paragraph, a math shift opens or closes a formula, a paragraph end breaks the paragraph into lines and
adds them to the enclosing vertical list.

```rust
use tex_typesetter::engine::stomach::ListManager;
use tex_typesetter::engine::mouth::pretokenized::TokenList;
use tex_typesetter::engine::options::ParameterTable;
use tex_typesetter::engine::state::modes::Mode;
use tex_typesetter::tex::tokens::Token;

let options = ParameterTable::default();
let mut source = TokenList::new(vec!());
let mut manager = ListManager::new();
manager.letter('a',Token::letter('a'),&mut source,&options).unwrap();
assert_eq!(manager.mode(),Mode::Horizontal);
manager.par(&options).unwrap();
assert_eq!(manager.mode(),Mode::Vertical);
assert_eq!(manager.finish(&options).unwrap().nodes.len(),1);
```
*/

pub mod listmaker;
pub mod vertical;
pub mod horizontal;
pub mod math;
pub mod halign;
pub mod builders;

use crate::debug_log;
use crate::engine::fontsystem::{CharNodeFactory, SpaceFactorTable};
use crate::engine::mouth::TokenSource;
use crate::engine::options::TypesetterOptions;
use crate::engine::state::modes::Mode;
use crate::engine::stomach::builders::{Hyphenator, NoHyphenation, ParagraphBuilder, ParagraphObserver, TrivialParagraphBuilder, hyphenate_words};
use crate::engine::stomach::halign::{AlignmentListMaker, PreambleItem};
use crate::engine::stomach::horizontal::{HorizontalListMaker, NORMAL_SPACE_FACTOR};
use crate::engine::stomach::listmaker::ListMaker;
use crate::engine::stomach::math::{MathConverter, MathListMaker, NoadScanner, SimpleMathConverter, SimpleNoadScanner};
use crate::engine::stomach::vertical::VerticalListMaker;
use crate::tex::nodes::{HorizontalList, Node, NodeList, VerticalList};
use crate::tex::nodes::math::Noad;
use crate::tex::numerics::Dimen;
use crate::tex::numerics::glue::Glue;
use crate::tex::tokens::Token;
use crate::utils::errors::TypesetterError;

/// The exchangeable parts of the typesetter.
pub struct Collaborators {
    pub char_factory:Box<dyn CharNodeFactory>,
    pub hyphenator:Box<dyn Hyphenator>,
    pub paragraph_builder:Box<dyn ParagraphBuilder>,
    pub math_converter:Box<dyn MathConverter>,
    pub noad_scanner:Box<dyn NoadScanner>
}
impl Default for Collaborators {
    fn default() -> Self {
        Collaborators {
            char_factory:Box::new(SpaceFactorTable::default()),
            hyphenator:Box::new(NoHyphenation),
            paragraph_builder:Box::new(TrivialParagraphBuilder),
            math_converter:Box::new(SimpleMathConverter),
            noad_scanner:Box::new(SimpleNoadScanner)
        }
    }
}
impl Collaborators {
    pub fn with_char_factory<F:CharNodeFactory + 'static>(mut self,factory:F) -> Self {
        self.char_factory = Box::new(factory);
        self
    }
    pub fn with_hyphenator<H:Hyphenator + 'static>(mut self,hyphenator:H) -> Self {
        self.hyphenator = Box::new(hyphenator);
        self
    }
    pub fn with_paragraph_builder<B:ParagraphBuilder + 'static>(mut self,builder:B) -> Self {
        self.paragraph_builder = Box::new(builder);
        self
    }
    pub fn with_math_converter<C:MathConverter + 'static>(mut self,converter:C) -> Self {
        self.math_converter = Box::new(converter);
        self
    }
    pub fn with_noad_scanner<N:NoadScanner + 'static>(mut self,scanner:N) -> Self {
        self.noad_scanner = Box::new(scanner);
        self
    }
}

/// The stack of [`ListMaker`]s. The bottom of the stack is the main vertical list, which is never
/// removed.
///
/// If an operation fails, the stack is left as it was before, with the list maker that rejected the
/// operation on top.
pub struct ListManager {
    outer:VerticalListMaker,
    stack:Vec<Box<dyn ListMaker>>,
    collaborators:Collaborators,
    observers:Vec<Box<dyn ParagraphObserver>>,
    // stack depths of the formulas whose closing token lists have been inserted
    math_end_inserted:Vec<usize>
}
impl ListManager {
    pub fn new() -> Self { Self::with_collaborators(Collaborators::default()) }
    pub fn with_collaborators(collaborators:Collaborators) -> Self {
        ListManager {
            outer:VerticalListMaker::new(),
            stack:Vec::new(),
            collaborators,
            observers:Vec::new(),
            math_end_inserted:Vec::new()
        }
    }
    pub fn collaborators(&self) -> &Collaborators { &self.collaborators }
    pub fn collaborators_mut(&mut self) -> &mut Collaborators { &mut self.collaborators }

    fn top(&self) -> &dyn ListMaker {
        match self.stack.last() {
            Some(t) => t.as_ref(),
            None => &self.outer
        }
    }
    fn top_mut(&mut self) -> &mut dyn ListMaker {
        match self.stack.last_mut() {
            Some(t) => t.as_mut(),
            None => &mut self.outer
        }
    }

    /// The mode of the current list maker
    pub fn mode(&self) -> Mode { self.top().mode() }
    /// The number of list makers on the stack, including the main vertical list
    pub fn depth(&self) -> usize { self.stack.len() + 1 }

    pub fn push(&mut self,maker:Box<dyn ListMaker>) {
        debug_log!(debug=>"entering {} mode",maker.mode());
        self.stack.push(maker);
    }
    /// Remove the current list maker. The main vertical list cannot be removed.
    pub fn pop(&mut self) -> Result<Box<dyn ListMaker>,TypesetterError> {
        match self.stack.pop() {
            Some(m) => {
                debug_log!(debug=>"leaving {} mode",m.mode());
                Ok(m)
            }
            None => Err(TypesetterError::StackUnderflow)
        }
    }
    /// Remove the current list maker and return its list, e.g. at the end of an `\hbox`. If closing
    /// fails, the list maker stays on top.
    pub fn close_top_list(&mut self,options:&dyn TypesetterOptions) -> Result<NodeList,TypesetterError> {
        let nodes = self.reduce_top(options)?;
        self.pop()?;
        Ok(nodes)
    }
    fn reduce_top(&mut self,options:&dyn TypesetterOptions) -> Result<NodeList,TypesetterError> {
        match self.stack.last_mut() {
            Some(top) => top.close(&self.collaborators,options),
            None => Err(TypesetterError::StackUnderflow)
        }
    }

    pub fn add(&mut self,node:Node) -> Result<(),TypesetterError> { self.top_mut().add(node) }
    pub fn add_glue(&mut self,glue:Glue) -> Result<(),TypesetterError> { self.top_mut().add_glue(glue) }
    pub fn add_space(&mut self,options:&dyn TypesetterOptions,sf_override:Option<i64>) -> Result<(),TypesetterError> {
        self.top_mut().add_space(options,sf_override)
    }
    pub fn add_noad(&mut self,noad:Noad) -> Result<(),TypesetterError> { self.top_mut().add_noad(noad) }
    pub fn last_node(&self) -> Option<&Node> { self.top().last_node() }
    pub fn remove_last_node(&mut self) -> Option<Node> { self.top_mut().remove_last_node() }
    pub fn set_spacefactor(&mut self,sf:i64) -> Result<(),TypesetterError> { self.top_mut().set_spacefactor(sf) }
    pub fn spacefactor(&self) -> Result<i64,TypesetterError> { self.top().spacefactor() }
    pub fn set_prevdepth(&mut self,pd:Option<Dimen>) -> Result<(),TypesetterError> { self.top_mut().set_prevdepth(pd) }
    pub fn prevdepth(&self) -> Result<Option<Dimen>,TypesetterError> { self.top().prevdepth() }
    pub fn left_brace(&mut self) -> Result<(),TypesetterError> { self.top_mut().left_brace() }
    pub fn right_brace(&mut self) -> Result<(),TypesetterError> { self.top_mut().right_brace() }

    /// The character `c` in the current font; `token` is the token it came from. In vertical mode, this
    /// starts a paragraph first; if that inserts `\everypar`, `token` is pushed back behind it.
    pub fn letter(&mut self,c:char,token:Token,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        if self.mode().is_vertical() {
            source.requeue(token);
            if self.start_paragraph(source,options)? { return Ok(()) }
            // nothing inserted
            source.get_next()?;
        }
        let font = options.font();
        let top : &mut dyn ListMaker = match self.stack.last_mut() {
            Some(t) => t.as_mut(),
            None => &mut self.outer
        };
        top.letter(c,&font,self.collaborators.char_factory.as_ref(),options)
    }

    /// Start a paragraph if in vertical mode: `\parskip` is added to the vertical list (unless it is
    /// empty), followed by an indentation box of width `\parindent` (if set) in the new paragraph.
    /// Returns whether `\everypar` was inserted.
    pub fn start_paragraph(&mut self,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<bool,TypesetterError> {
        if !self.mode().is_vertical() { return Ok(false) }
        if self.last_node().is_some() {
            if let Some(g) = options.glue_option("parskip") {
                self.add_glue(g)?;
            }
        }
        self.push(Box::new(HorizontalListMaker::new()));
        if let Some(indent) = options.dimen_option("parindent") {
            self.add(Node::HList(HorizontalList::new(Vec::new()).pack_to(indent)))?;
        }
        Ok(match options.toks_option("everypar") {
            Some(tks) if !tks.is_empty() => {
                source.push_tokens(tks);
                true
            }
            _ => false
        })
    }

    /// Register an observer to be notified at every paragraph end. Observers are notified in reverse
    /// order of registration.
    pub fn register_paragraph_observer(&mut self,observer:Box<dyn ParagraphObserver>) {
        self.observers.push(observer);
    }
    fn notify(&mut self,paragraph:Option<&VerticalList>) -> Result<(),TypesetterError> {
        for o in self.observers.iter_mut().rev() {
            o.at_paragraph(paragraph)?;
        }
        Ok(())
    }

    /// End the current paragraph (`\par`).
    pub fn par(&mut self,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        match self.mode() {
            Mode::Horizontal => self.end_paragraph(options),
            Mode::Vertical | Mode::InnerVertical => self.notify(None),
            m@(Mode::Math | Mode::DisplayMath) => {
                self.notify(None)?;
                Err(TypesetterError::UnsupportedOperation { mode:m, operation:"par" })
            }
            Mode::RestrictedHorizontal | Mode::Alignment => Ok(())
        }
    }
    // the paragraph stays open until its lines are built
    fn end_paragraph(&mut self,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        let nodes = self.reduce_top(options)?;
        let nodes = hyphenate_words(nodes,self.collaborators.hyphenator.as_ref(),options);
        let lines = self.collaborators.paragraph_builder.build(HorizontalList::new(nodes),options)?;
        self.pop()?;
        debug_log!(debug=>"paragraph ended");
        self.top_mut().add_and_adjust(lines.nodes.clone(),options)?;
        self.notify(Some(&lines))
    }

    /// A math shift character. Opens a formula (`$$` a displayed one, in horizontal mode) and inserts
    /// `\everymath` or `\everydisplay`, or closes the current one. In vertical mode, a paragraph is
    /// started first and `token` is read again afterwards.
    pub fn math_shift(&mut self,token:Token,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        match self.mode() {
            Mode::Math | Mode::DisplayMath => self.close_math(token,source,options),
            Mode::Vertical | Mode::InnerVertical => {
                source.requeue(token);
                self.start_paragraph(source,options)?;
                Ok(())
            }
            Mode::Horizontal => {
                let display = match source.get_next()? {
                    Some(tk) if tk.is_math_shift() => true,
                    Some(tk) => {
                        source.requeue(tk);
                        false
                    }
                    None => false
                };
                self.open_math(display,source,options);
                Ok(())
            }
            Mode::RestrictedHorizontal | Mode::Alignment => {
                self.open_math(false,source,options);
                Ok(())
            }
        }
    }
    fn open_math(&mut self,display:bool,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) {
        let (maker,every) = if display {
            (MathListMaker::new_display(),"everydisplay")
        } else { (MathListMaker::new(),"everymath") };
        self.push(Box::new(maker));
        if let Some(tks) = options.toks_option(every) {
            source.push_tokens(tks);
        }
    }
    fn close_math(&mut self,token:Token,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        let display = self.mode() == Mode::DisplayMath;
        let depth = self.depth();
        if self.math_end_inserted.last() != Some(&depth) {
            let end = if display { "everydisplayend" } else { "everymathend" };
            if let Some(tks) = options.toks_option(end) {
                if !tks.is_empty() {
                    self.math_end_inserted.push(depth);
                    source.requeue(token);
                    source.push_tokens(tks);
                    return Ok(())
                }
            }
        }
        if display {
            match source.get_next()? {
                Some(tk) if tk.is_math_shift() => (),
                Some(tk) => {
                    source.requeue(tk);
                    return Err(TypesetterError::DisplayMathEnd)
                }
                None => return Err(TypesetterError::DisplayMathEnd)
            }
        }
        let nodes = self.close_top_list(options)?;
        if self.math_end_inserted.last() == Some(&depth) {
            self.math_end_inserted.pop();
        }
        let parent = self.top_mut();
        if display {
            parent.add(Node::HList(HorizontalList::new(nodes)))?;
        } else {
            let surround = options.dimen_option("mathsurround").unwrap_or(Dimen::ZERO);
            parent.add(Node::BeforeMath(surround))?;
            for n in nodes { parent.add(n)?; }
            parent.add(Node::AfterMath(surround))?;
        }
        parent.set_spacefactor(NORMAL_SPACE_FACTOR)
    }

    /// `_`: reads the subscript with the [`NoadScanner`] and attaches it.
    pub fn sub_mark(&mut self,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        let mode = self.mode();
        if !mode.is_math() {
            return Err(TypesetterError::UnsupportedOperation { mode, operation:"sub_mark" })
        }
        let noad = self.collaborators.noad_scanner.scan_noad(source,options)?;
        self.top_mut().sub_mark(noad)
    }
    /// `^`: reads the superscript with the [`NoadScanner`] and attaches it.
    pub fn sup_mark(&mut self,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        let mode = self.mode();
        if !mode.is_math() {
            return Err(TypesetterError::UnsupportedOperation { mode, operation:"sup_mark" })
        }
        let noad = self.collaborators.noad_scanner.scan_noad(source,options)?;
        self.top_mut().sup_mark(noad)
    }

    /// `\halign`. In horizontal mode, the paragraph is ended first.
    pub fn start_alignment(&mut self,preamble:Vec<PreambleItem>,width:Option<Dimen>,spread:bool,source:&mut dyn TokenSource,options:&dyn TypesetterOptions)
        -> Result<(),TypesetterError> {
        match self.mode() {
            Mode::Horizontal => self.end_paragraph(options)?,
            m if m.is_math() => return Err(TypesetterError::UnsupportedOperation { mode:m, operation:"start_alignment" }),
            _ => ()
        }
        let maker = AlignmentListMaker::new(preamble,width,spread,source,options)?;
        self.push(Box::new(maker));
        Ok(())
    }
    pub fn tab(&mut self,token:Token,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        self.top_mut().tab(token,source,options)
    }
    pub fn cr(&mut self,token:Token,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        self.top_mut().cr(token,source,options)
    }
    pub fn crcr(&mut self,token:Token,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        self.top_mut().crcr(token,source,options)
    }
    pub fn span(&mut self,token:Token,source:&mut dyn TokenSource,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        self.top_mut().span(token,source,options)
    }
    pub fn noalign(&mut self,nodes:NodeList,source:&mut dyn TokenSource) -> Result<(),TypesetterError> {
        self.top_mut().noalign(nodes,source)
    }
    /// Finish the current alignment and add it to the enclosing list: row by row in vertical mode, as
    /// a single box otherwise.
    pub fn end_alignment(&mut self,options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        let mode = self.mode();
        if mode != Mode::Alignment {
            return Err(TypesetterError::UnsupportedOperation { mode, operation:"end_alignment" })
        }
        let nodes = self.close_top_list(options)?;
        let parent = self.top_mut();
        if parent.mode().is_vertical() {
            for n in nodes {
                match n {
                    Node::VList(table) => parent.add_and_adjust(table.nodes,options)?,
                    n => parent.add(n)?
                }
            }
            Ok(())
        } else {
            for n in nodes { parent.add(n)?; }
            Ok(())
        }
    }

    /// Close all open list makers and return the main vertical list, leaving it empty. Open paragraphs
    /// are ended, formulas and alignments are finished, boxes are added to their enclosing lists.
    pub fn shipout(&mut self,options:&dyn TypesetterOptions) -> Result<VerticalList,TypesetterError> {
        while self.depth() > 1 {
            match self.mode() {
                Mode::Horizontal => self.end_paragraph(options)?,
                Mode::Alignment => self.end_alignment(options)?,
                m => {
                    log::warn!("Unfinished {} mode at shipout",m);
                    let nodes = self.close_top_list(options)?;
                    let node = match m {
                        Mode::InnerVertical => Node::VList(VerticalList::new(nodes)),
                        _ => Node::HList(HorizontalList::new(nodes))
                    };
                    self.add(node)?;
                }
            }
        }
        self.math_end_inserted.clear();
        let nodes = self.outer.close(&self.collaborators,options)?;
        self.outer = VerticalListMaker::new();
        debug_log!(debug=>"shipping out {} nodes",nodes.len());
        Ok(VerticalList::new(nodes))
    }
    /// [`shipout`](Self::shipout), consuming the manager.
    pub fn finish(mut self,options:&dyn TypesetterOptions) -> Result<VerticalList,TypesetterError> {
        self.shipout(options)
    }
}
impl Default for ListManager {
    fn default() -> Self { Self::new() }
}
