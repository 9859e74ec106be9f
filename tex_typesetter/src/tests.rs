#[doc(hidden)]
#[cfg(any(test,doctest))]
#[allow(dead_code)]
pub mod test_utils {
    #[macro_export]
    macro_rules! measure {
        ($key:ident:$x:expr) => {{
            let measure_start = std::time::Instant::now();
            let ret = $x;
            log::warn!(target:stringify!($key),"Finished after {:?}",measure_start.elapsed());
            ret
        }};
    }

    #[allow(unused_must_use)]
    pub fn trace() {
        env_logger::builder().filter_level(log::LevelFilter::Trace).try_init();
    }
    #[allow(unused_must_use)]
    pub fn debug() {
        env_logger::builder().filter_level(log::LevelFilter::Debug).try_init();
    }
    #[allow(unused_must_use)]
    pub fn info() {
        env_logger::builder().filter_level(log::LevelFilter::Info).try_init();
    }
    #[allow(unused_must_use)]
    pub fn warn() {
        env_logger::builder().filter_level(log::LevelFilter::Warn).try_init();
    }
    #[allow(unused_must_use)]
    pub fn error() {
        env_logger::builder().filter_level(log::LevelFilter::Error).try_init();
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::*;
    use crate::prelude::*;
    use crate::measure;
    use crate::engine::fontsystem::{FontRef, SimpleFont};
    use crate::engine::stomach::builders::ParagraphObserver;
    use crate::engine::stomach::halign::PreambleItem;
    use crate::engine::stomach::horizontal::interword_glue;
    use crate::tex::tokens::display_tokens;
    use crate::utils::Ptr;
    use log::*;
    use std::cell::RefCell;

    fn mouth(s:&str) -> Mouth<StringLineSource> {
        Mouth::new(StringLineSource::from(s),CategoryCodeScheme::default(),TokenizerConfig::default())
    }
    fn all_tokens(s:&str) -> Vec<Token> {
        let mut m = mouth(s);
        let mut ret = Vec::new();
        while let Some(tk) = m.get_next().unwrap() { ret.push(tk) }
        ret
    }
    fn cmr() -> FontRef {
        Ptr::new(SimpleFont::new("cmr10")
            .with_default_metrics(Dimen::from_pt(5),Dimen::from_pt(7),Dimen::from_pt(2))
            .with_dim(2,Dimen::from_pt(3)).with_dim(3,Dimen::from_pt(2)).with_dim(4,Dimen::from_pt(1))
            .with_dim(6,Dimen::from_pt(10)).with_dim(7,Dimen::from_pt(1)))
    }

    // dispatches tokens to the list manager the way an interpreter would, stopping at `\stop`
    fn typeset(m:&mut ListManager,src:&mut dyn TokenSource,options:&ParameterTable) -> Result<(),TypesetterError> {
        while let Some(tk) = src.get_next()? {
            match &tk {
                Token::Character{char,code} => match code {
                    CommandCode::Letter | CommandCode::Other => m.letter(*char,tk.clone(),src,options)?,
                    CommandCode::Space => m.add_space(options,None)?,
                    CommandCode::MathShift => m.math_shift(tk.clone(),src,options)?,
                    CommandCode::AlignmentTab => m.tab(tk.clone(),src,options)?,
                    CommandCode::Superscript => m.sup_mark(src,options)?,
                    CommandCode::Subscript => m.sub_mark(src,options)?,
                    CommandCode::BeginGroup => m.left_brace()?,
                    CommandCode::EndGroup => m.right_brace()?,
                    _ => ()
                },
                t if t.is_cs("stop") => return Ok(()),
                t if t.is_cs("par") => m.par(options)?,
                t if t.is_cs("cr") => m.cr(tk.clone(),src,options)?,
                t if t.is_cs("crcr") => m.crcr(tk.clone(),src,options)?,
                t if t.is_cs("span") => m.span(tk.clone(),src,options)?,
                t if t.is_cs("hskip") => {
                    let g = src.get_glue(options)?;
                    m.add_glue(g)?
                }
                t => warn!("Ignoring {}",t)
            }
        }
        Ok(())
    }

    #[test]
    fn tokenizer() {
        debug();
        assert_eq!(display_tokens(&all_tokens("\\foo  {a}\n\nb")),"\\foo {a} \\par b ");
        let mut m = mouth("a@b\n@c");
        assert_eq!(m.get_next().unwrap(),Some(Token::letter('a')));
        assert_eq!(m.get_next().unwrap(),Some(Token::other('@')));
        // category codes apply from the next character on
        m.catcodes_mut().set('@',CategoryCode::Letter);
        assert_eq!(m.get_next().unwrap(),Some(Token::letter('b')));
        assert!(m.get_next().unwrap().is_some_and(|t| t.is_space()));
        assert_eq!(m.get_next().unwrap(),Some(Token::letter('@')));
    }

    #[test]
    fn caret_escapes() {
        debug();
        assert_eq!(all_tokens("^^4a^^4a"),all_tokens("JJ"));
        // ^^ followed by a character below 64 that is not a hex digit adds 64 to it
        assert_eq!(all_tokens("^^:"),all_tokens("z"));
        let mut m = mouth("^^4a");
        m.catcodes_mut().set('J',CategoryCode::Other);
        assert_eq!(m.get_next().unwrap(),Some(Token::other('J')));
    }

    #[test]
    fn glue_from_source() { measure!(glue_from_source: {
        debug();
        let options = ParameterTable::plain(cmr());
        let mut m = mouth("2.0pt plus 1.0fil minus 3pt x");
        let g = m.get_glue(&options).unwrap();
        assert_eq!(g.to_string(),"2.0pt plus 1.0fil minus 3.0pt");
        assert_eq!(m.get_next().unwrap(),Some(Token::letter('x')));
        let mut m = mouth("1.5em 2truept");
        let options = options.with_count("mag",500);
        assert_eq!(m.get_dimen(&options),Ok(Dimen::from_pt(15)));
        assert_eq!(m.get_dimen(&options),Ok(Dimen::from_pt(1)));
    })}

    #[test]
    fn paragraph_and_spaces() {
        debug();
        let options = ParameterTable::plain(cmr());
        let mut manager = ListManager::new();
        let mut src = mouth("ab.  c\\hskip 1pt plus 1fil d e\n\nnext\\stop");
        typeset(&mut manager,&mut src,&options).unwrap();
        assert_eq!(manager.mode(),Mode::Horizontal);
        let page = manager.finish(&options).unwrap();
        // two lines with baselineskip between them
        assert_eq!(page.nodes.len(),3);
        let first = match &page.nodes[0] {
            Node::HList(l) => l,
            n => panic!("expected a line, got {:?}",n)
        };
        // a b . space c glue d space e \penalty \parfillskip; the space at the end is gone
        let spaces : Vec<&Glue> = first.nodes.iter().filter_map(|n| match n { Node::Space(g) => Some(g), _ => None }).collect();
        assert_eq!(spaces.len(),2);
        assert_eq!(spaces[0],&interword_glue(&cmr(),3000,&options).unwrap().unwrap());
        assert_eq!(spaces[0].length,Dimen::from_pt(4));
        assert_eq!(spaces[1],&cmr().space());
        assert!(first.nodes.contains(&Node::Glue(Glue::new(Dimen::from_pt(1),GlueComponent::new(65536,1),GlueComponent::ZERO))));
        assert_eq!(page.nodes[1],Node::Glue(Glue::from_dimen(Dimen::from_pt(12) - Dimen::from_pt(9))));
    }

    #[test]
    fn inline_and_display_math() {
        debug();
        let options = ParameterTable::plain(cmr()).with_dimen("mathsurround",Dimen(7));
        let mut manager = ListManager::new();
        let mut src = mouth("a $x^2_{ij}$ b\\stop");
        typeset(&mut manager,&mut src,&options).unwrap();
        assert_eq!(manager.mode(),Mode::Horizontal);
        assert_eq!(manager.remove_last_node().and_then(|n| n.as_char().map(|c| c.char)),Some('b'));
        assert!(matches!(manager.remove_last_node(),Some(Node::Space(_))));
        assert_eq!(manager.last_node(),Some(&Node::AfterMath(Dimen(7))));

        let mut src = mouth("$$x$$\\stop");
        typeset(&mut manager,&mut src,&options).unwrap();
        assert!(matches!(manager.last_node(),Some(Node::HList(_))));
        let mut src = mouth("$$x$ \\stop");
        assert_eq!(typeset(&mut manager,&mut src,&options),Err(TypesetterError::DisplayMathEnd));
    }

    #[test]
    fn alignments() {
        debug();
        let options = ParameterTable::plain(cmr());
        let mut manager = ListManager::new();
        let mut src = mouth("a&bb&c\\cr x\\span y\\cr\\crcr\\stop");
        let preamble = vec!(PreambleItem::default(),PreambleItem::default(),PreambleItem::default());
        manager.start_alignment(preamble.clone(),None,false,&mut src,&options).unwrap();
        typeset(&mut manager,&mut src,&options).unwrap();
        manager.end_alignment(&options).unwrap();
        let page = manager.shipout(&options).unwrap();
        // two rows and the baselineskip between them
        assert_eq!(page.nodes.len(),3);
        for row in [&page.nodes[0],&page.nodes[2]] {
            assert_eq!(row.width(),Dimen::from_pt(5 + 10 + 5));
        }

        let mut src = mouth("a&b&c&d\\cr\\stop");
        manager.start_alignment(preamble,None,false,&mut src,&options).unwrap();
        assert_eq!(typeset(&mut manager,&mut src,&options),Err(TypesetterError::ExtraAlignTab { column:3 }));
        assert_eq!(manager.mode(),Mode::Alignment);
    }

    struct Named(&'static str,Ptr<RefCell<Vec<&'static str>>>);
    impl ParagraphObserver for Named {
        fn at_paragraph(&mut self, _paragraph: Option<&VerticalList>) -> Result<(), TypesetterError> {
            self.1.borrow_mut().push(self.0);
            Ok(())
        }
    }

    #[test]
    fn observers() {
        debug();
        let options = ParameterTable::plain(cmr());
        let seen = Ptr::new(RefCell::new(Vec::new()));
        let mut manager = ListManager::new();
        for name in ["A","B","C"] {
            manager.register_paragraph_observer(Box::new(Named(name,seen.clone())));
        }
        manager.par(&options).unwrap();
        assert_eq!(*seen.borrow(),vec!("C","B","A"));
        let mut src = mouth("x\n\n\\stop");
        typeset(&mut manager,&mut src,&options).unwrap();
        assert_eq!(seen.borrow().len(),6);
    }
}
