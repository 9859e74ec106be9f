/*! Collaborators that turn a finished paragraph into lines: hyphenation and line breaking, plus the
observers notified whenever a paragraph ends.
*/

use crate::debug_log;
use crate::engine::options::TypesetterOptions;
use crate::tex::nodes::{HorizontalList, Node, NodeList, VerticalList};
use crate::tex::numerics::glue::Glue;
use crate::utils::errors::TypesetterError;

/// Inserts hyphenation points into a word.
pub trait Hyphenator {
    /// `word` is a run of character, ligature and implicit kern nodes; the result replaces it.
    fn hyphenate(&self,word:NodeList,options:&dyn TypesetterOptions) -> NodeList;
}

/// Leaves words alone.
#[derive(Clone,Copy,Debug,Default)]
pub struct NoHyphenation;
impl Hyphenator for NoHyphenation {
    fn hyphenate(&self, word: NodeList, _options: &dyn TypesetterOptions) -> NodeList { word }
}

/// Breaks a paragraph into lines.
pub trait ParagraphBuilder {
    fn build(&self,paragraph:HorizontalList,options:&dyn TypesetterOptions) -> Result<VerticalList,TypesetterError>;
}

/// Penalties of at most this value force a line break
pub const EJECT_PENALTY: i64 = -10000;

/// Breaks lines only where a penalty forces it. Every line gets `\leftskip` and `\rightskip` (if set) and is
/// packed to `\hsize` (if set). The last line ends with `\parfillskip` instead of its trailing glue.
/// The lines are returned as they are; baseline glue is added by the vertical list receiving them.
#[derive(Clone,Copy,Debug,Default)]
pub struct TrivialParagraphBuilder;
impl TrivialParagraphBuilder {
    fn line(&self,mut nodes:NodeList,options:&dyn TypesetterOptions) -> HorizontalList {
        if let Some(g) = options.glue_option("leftskip") { nodes.insert(0,Node::Glue(g)); }
        if let Some(g) = options.glue_option("rightskip") { nodes.push(Node::Glue(g)); }
        let line = HorizontalList::new(nodes);
        match options.dimen_option("hsize") {
            Some(w) => line.pack_to(w),
            None => line
        }
    }
}
impl ParagraphBuilder for TrivialParagraphBuilder {
    fn build(&self, paragraph: HorizontalList, options: &dyn TypesetterOptions) -> Result<VerticalList, TypesetterError> {
        let mut nodes = paragraph.nodes;
        while matches!(nodes.last(),Some(Node::Glue(_) | Node::Space(_))) { nodes.pop(); }
        nodes.push(Node::Penalty(10000));
        nodes.push(Node::Glue(options.glue_option("parfillskip").unwrap_or(Glue::ZERO)));

        let mut lines = Vec::new();
        let mut current = Vec::new();
        for n in nodes {
            match n {
                Node::Penalty(p) if p <= EJECT_PENALTY => {
                    lines.push(self.line(std::mem::take(&mut current),options));
                }
                // discardable material at the start of a line disappears
                n if current.is_empty() && !lines.is_empty() && n.discardable() => (),
                n => current.push(n)
            }
        }
        lines.push(self.line(current,options));
        debug_log!(debug=>"paragraph of {} lines",lines.len());
        Ok(VerticalList::new(lines.into_iter().map(Node::HList).collect()))
    }
}

/// Notified at the end of every paragraph, with the lines if there was one.
pub trait ParagraphObserver {
    fn at_paragraph(&mut self,paragraph:Option<&VerticalList>) -> Result<(),TypesetterError>;
}

/// Runs `hyphenator` on every word of `nodes`: maximal runs of character and ligature nodes, possibly
/// with implicit kerns between them. Formulas, i.e. everything from a [`BeforeMath`](Node::BeforeMath) to
/// the next [`AfterMath`](Node::AfterMath), are left as they are.
pub fn hyphenate_words(nodes:NodeList,hyphenator:&dyn Hyphenator,options:&dyn TypesetterOptions) -> NodeList {
    let mut ret = Vec::with_capacity(nodes.len());
    let mut word = Vec::new();
    let mut in_math = false;
    for n in nodes {
        match n {
            Node::BeforeMath(_) if !in_math => {
                flush_word(&mut word,&mut ret,hyphenator,options);
                in_math = true;
                ret.push(n)
            }
            Node::AfterMath(_) if in_math => {
                in_math = false;
                ret.push(n)
            }
            n if in_math => ret.push(n),
            n@(Node::Char(_) | Node::Ligature{..}) => word.push(n),
            n@Node::Kern{implicit:true,..} if !word.is_empty() => word.push(n),
            n => {
                flush_word(&mut word,&mut ret,hyphenator,options);
                ret.push(n)
            }
        }
    }
    flush_word(&mut word,&mut ret,hyphenator,options);
    ret
}
fn flush_word(word:&mut NodeList,out:&mut NodeList,hyphenator:&dyn Hyphenator,options:&dyn TypesetterOptions) {
    if word.is_empty() { return }
    // a trailing kern is not part of the word
    let trailing = match word.last() {
        Some(Node::Kern{..}) => word.pop(),
        _ => None
    };
    out.extend(hyphenator.hyphenate(std::mem::take(word),options));
    out.extend(trailing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fontsystem::{CharNodeFactory, FontRef, SimpleFont, SpaceFactorTable};
    use crate::engine::options::ParameterTable;
    use crate::tex::nodes::NodeTrait;
    use crate::tex::numerics::Dimen;
    use crate::utils::Ptr;
    use std::cell::RefCell;

    struct Recorder(RefCell<Vec<String>>);
    impl Hyphenator for Recorder {
        fn hyphenate(&self, word: NodeList, _options: &dyn TypesetterOptions) -> NodeList {
            self.0.borrow_mut().push(word.iter().filter_map(|n| n.as_char().map(|c| c.char)).collect());
            word
        }
    }

    fn chars(font:&FontRef,s:&str) -> NodeList {
        let factory = SpaceFactorTable::default();
        s.chars().filter_map(|c| factory.new_char_node(font,c)).map(Node::Char).collect()
    }

    #[test]
    fn words() {
        let font : FontRef = Ptr::new(SimpleFont::new("cmr10"));
        let mut nodes = chars(&font,"ab");
        nodes.push(Node::Kern { width:Dimen(-1), implicit:true });
        nodes.extend(chars(&font,"c"));
        nodes.push(Node::Space(Glue::ZERO));
        nodes.push(Node::BeforeMath(Dimen::ZERO));
        nodes.extend(chars(&font,"x"));
        nodes.push(Node::AfterMath(Dimen::ZERO));
        nodes.extend(chars(&font,"de"));
        nodes.push(Node::Kern { width:Dimen(1), implicit:false });
        nodes.extend(chars(&font,"f"));
        let len = nodes.len();
        let recorder = Recorder(RefCell::new(Vec::new()));
        let ret = hyphenate_words(nodes,&recorder,&ParameterTable::default());
        assert_eq!(ret.len(),len);
        assert_eq!(recorder.0.into_inner(),vec!("abc","de","f"));
    }

    #[test]
    fn forced_breaks() {
        let font : FontRef = Ptr::new(SimpleFont::new("cmr10").with_default_metrics(Dimen(10),Dimen(8),Dimen(2)));
        let options = ParameterTable::plain(font.clone()).with_dimen("hsize",Dimen(1000));
        let mut nodes = chars(&font,"ab");
        nodes.push(Node::Penalty(-10000));
        nodes.push(Node::Space(Glue::from_dimen(Dimen(3))));
        nodes.extend(chars(&font,"c"));
        nodes.push(Node::Space(Glue::from_dimen(Dimen(3))));
        let v = TrivialParagraphBuilder.build(HorizontalList::new(nodes),&options).unwrap();
        // two lines, nothing between them
        assert_eq!(v.nodes.len(),2);
        assert!(v.nodes.iter().all(|n| matches!(n,Node::HList(_))));
        match &v.nodes[1] {
            Node::HList(line) => {
                assert_eq!(line.width(),Dimen(1000));
                // c, \penalty10000, \parfillskip; the space after the break is gone
                assert_eq!(line.nodes.len(),3);
                assert_eq!(line.nodes[2],Node::Glue(options.glue_option("parfillskip").unwrap()));
            }
            _ => panic!("expected a line")
        }
    }
}
