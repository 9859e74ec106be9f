/*! A [`TokenSource`] over tokens that have already been produced, e.g. the contents of a token list
parameter or tokens built in code.
*/
use crate::engine::mouth::TokenSource;
use crate::tex::tokens::Token;
use crate::utils::errors::{Locator, ScannerError};

/// A list of [`Token`]s, read front to back. [`requeue`](TokenSource::requeue)d and
/// [pushed](TokenSource::push_tokens) tokens are read before the rest of the list.
#[derive(Clone,Debug,Default)]
pub struct TokenList {
    // reversed: the next token is at the end
    tokens:Vec<Token>,
    read:usize,
    name:String
}
impl TokenList {
    pub fn new(tks:Vec<Token>) -> Self {
        let mut tokens = tks;
        tokens.reverse();
        TokenList { tokens, read:0, name:String::new() }
    }
    /// Set the source name reported by [`locator`](TokenSource::locator).
    pub fn with_name<S:Into<String>>(mut self,name:S) -> Self {
        self.name = name.into();
        self
    }
    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }
    /// The tokens not read yet, in reading order
    pub fn remaining(&self) -> Vec<Token> {
        self.tokens.iter().rev().cloned().collect()
    }
}
impl From<Vec<Token>> for TokenList {
    fn from(tks: Vec<Token>) -> Self { TokenList::new(tks) }
}
impl TokenSource for TokenList {
    fn get_next(&mut self) -> Result<Option<Token>,ScannerError> {
        let next = self.tokens.pop();
        if next.is_some() { self.read += 1 }
        Ok(next)
    }
    fn requeue(&mut self, tk: Token) {
        self.read = self.read.saturating_sub(1);
        self.tokens.push(tk)
    }
    fn push_tokens(&mut self, tks: &[Token]) {
        self.tokens.extend(tks.iter().rev().cloned())
    }
    /// Line `0`; the column is the number of tokens read so far.
    fn locator(&self) -> Locator {
        Locator { source:self.name.clone(), line:0, column:self.read }
    }
}
