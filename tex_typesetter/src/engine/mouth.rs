/*! Sources of [`Token`]s.

[`TokenSource`] is what the [gullet](crate::engine::gullet) and the [list makers](crate::engine::stomach)
read from. [`Mouth`] tokenizes text with an [`InputTokenizer`](strings::InputTokenizer) under a mutable
[`CategoryCodeScheme`]; [`TokenList`](pretokenized::TokenList) reads tokens that already exist.
*/
pub mod strings;
pub mod pretokenized;

use crate::debug_log;
use crate::engine::mouth::strings::{InputTokenizer, TokenizerConfig};
use crate::tex::catcodes::CategoryCodeScheme;
use crate::tex::characters::TextLineSource;
use crate::tex::tokens::{Token, display_tokens};
use crate::utils::errors::{Locator, ScannerError};

/// A source of [`Token`]s with pushback.
pub trait TokenSource {
    /// The next [`Token`]; `None` at the end of the input
    fn get_next(&mut self) -> Result<Option<Token>,ScannerError>;
    /// Push a single [`Token`] back, to be read next
    fn requeue(&mut self,tk:Token);
    /// Insert [`Token`]s to be read next, in the given order
    fn push_tokens(&mut self,tks:&[Token]);
    /// The current position, for error messages
    fn locator(&self) -> Locator;

    /// Skip [`Space`](crate::tex::catcodes::CommandCode::Space) tokens
    fn skip_whitespace(&mut self) -> Result<(),ScannerError> {
        while let Some(tk) = self.get_next()? {
            if !tk.is_space() {
                self.requeue(tk);
                break
            }
        }
        Ok(())
    }
    /// The next [`Token`], without consuming it
    fn peek(&mut self) -> Result<Option<Token>,ScannerError> {
        let next = self.get_next()?;
        if let Some(tk) = &next { self.requeue(tk.clone()) }
        Ok(next)
    }
}

/// Tokenizes a [`TextLineSource`]. Pushed back tokens are read before the tokenizer continues.
pub struct Mouth<S:TextLineSource> {
    tokenizer:InputTokenizer<S>,
    catcodes:CategoryCodeScheme,
    pushback:Vec<Token>
}
impl<S:TextLineSource> Mouth<S> {
    pub fn new(source:S,catcodes:CategoryCodeScheme,config:TokenizerConfig) -> Self {
        Mouth { tokenizer:InputTokenizer::new(source,config), catcodes, pushback:Vec::new() }
    }
    pub fn catcodes(&self) -> &CategoryCodeScheme { &self.catcodes }
    /// Category codes can be changed at any time; tokens already pushed back are not affected.
    pub fn catcodes_mut(&mut self) -> &mut CategoryCodeScheme { &mut self.catcodes }
    pub fn tokenizer(&self) -> &InputTokenizer<S> { &self.tokenizer }
    pub fn tokenizer_mut(&mut self) -> &mut InputTokenizer<S> { &mut self.tokenizer }
    /// Drop pending pushed back tokens and the rest of the current line
    pub fn skip_line(&mut self) {
        self.pushback.clear();
        self.tokenizer.skip_line()
    }
    /// The pushed back tokens and the next characters of the input, for error messages
    pub fn preview(&self,len:usize) -> String {
        let mut pending : Vec<Token> = self.pushback.iter().rev().cloned().collect();
        pending.truncate(len);
        let mut ret = display_tokens(&pending);
        ret.push_str(&self.tokenizer.preview(len.saturating_sub(ret.chars().count())));
        ret
    }
}
impl<S:TextLineSource> TokenSource for Mouth<S> {
    fn get_next(&mut self) -> Result<Option<Token>,ScannerError> {
        match self.pushback.pop() {
            Some(t) => Ok(Some(t)),
            None => self.tokenizer.get_next(&self.catcodes)
        }
    }
    fn requeue(&mut self, tk: Token) {
        self.pushback.push(tk)
    }
    fn push_tokens(&mut self, tks: &[Token]) {
        debug_log!(trace=>"Pushing {}",display_tokens(tks));
        self.pushback.extend(tks.iter().rev().cloned())
    }
    fn locator(&self) -> Locator { self.tokenizer.locator() }
}
