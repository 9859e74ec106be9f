/*! Scanning of keywords and quantities from a [`TokenSource`].

Every [`TokenSource`] is a [`Gullet`], so e.g. a [`Mouth`](crate::engine::mouth::Mouth) can be asked
directly for a [`Glue`]:

```rust
use tex_typesetter::engine::gullet::Gullet;
use tex_typesetter::engine::mouth::pretokenized::TokenList;
use tex_typesetter::engine::options::ParameterTable;
use tex_typesetter::tex::tokens::letters_from_str;

let mut source = TokenList::new(letters_from_str("2pt plus 1fil minus 3pt"));
let glue = source.get_glue(&ParameterTable::default()).unwrap();
assert_eq!(glue.to_string(),"2.0pt plus 1.0fil minus 3.0pt");
```
*/
pub mod numeric_methods;

use crate::debug_log;
use crate::engine::mouth::TokenSource;
use crate::engine::options::TypesetterOptions;
use crate::tex::numerics::{Dimen, GlueComponent};
use crate::tex::numerics::glue::Glue;
use crate::utils::errors::{NumericError, ScannerError};

/// Checks whether the next tokens spell `kw` (case insensitively, as [`Letter`](crate::tex::catcodes::CommandCode::Letter)
/// or [`Other`](crate::tex::catcodes::CommandCode::Other) tokens), skipping spaces before it. If so, they are
/// consumed; otherwise everything read after the spaces is pushed back.
pub fn get_keyword<S:TokenSource + ?Sized>(source:&mut S,kw:&str) -> Result<bool,ScannerError> {
    let mut read = Vec::new();
    let mut chars = kw.chars();
    let mut next_char = chars.next();
    while let Some(c) = next_char {
        match source.get_next()? {
            Some(tk) if tk.is_keyword_char(c) => {
                read.push(tk);
                next_char = chars.next();
            }
            Some(tk) if tk.is_space() && read.is_empty() => (),
            Some(tk) => {
                read.push(tk);
                source.push_tokens(&read);
                return Ok(false)
            }
            None => {
                source.push_tokens(&read);
                return Ok(false)
            }
        }
    }
    debug_log!(trace=>"Keyword {}",kw);
    Ok(true)
}

/// Consume a single space token, if there is one.
pub fn skip_optional_space<S:TokenSource + ?Sized>(source:&mut S) -> Result<(),ScannerError> {
    match source.get_next()? {
        Some(tk) if tk.is_space() => Ok(()),
        Some(tk) => {
            source.requeue(tk);
            Ok(())
        }
        None => Ok(())
    }
}

/// Scanning methods available on every [`TokenSource`]. See [`numeric_methods`] for details.
pub trait Gullet:TokenSource {
    fn get_keyword(&mut self,kw:&str) -> Result<bool,ScannerError> {
        get_keyword(self,kw)
    }
    /// A signed decimal number, as a scaled value
    fn get_decimal(&mut self) -> Result<i64,NumericError> {
        numeric_methods::scan_decimal(self)
    }
    fn get_dimen(&mut self,options:&dyn TypesetterOptions) -> Result<Dimen,NumericError> {
        numeric_methods::scan_dimen(self,options)
    }
    fn get_glue_component(&mut self,options:&dyn TypesetterOptions,allow_infinite:bool) -> Result<GlueComponent,NumericError> {
        numeric_methods::scan_glue_component(self,options,allow_infinite)
    }
    fn get_glue(&mut self,options:&dyn TypesetterOptions) -> Result<Glue,NumericError> {
        numeric_methods::scan_glue(self,options)
    }
}
impl<S:TokenSource + ?Sized> Gullet for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mouth::pretokenized::TokenList;
    use crate::tex::tokens::{Token, letters_from_str, display_tokens};

    #[test]
    fn keywords() {
        let mut src = TokenList::new(letters_from_str("  PlUs x"));
        assert!(src.get_keyword("plus").unwrap());
        assert!(!src.get_keyword("minus").unwrap());
        assert_eq!(display_tokens(&src.remaining()),"x");
        let mut src = TokenList::new(letters_from_str("pl"));
        assert!(!src.get_keyword("plus").unwrap());
        assert_eq!(display_tokens(&src.remaining()),"pl");
        let mut src = TokenList::new(vec!(Token::letter('t'),Token::cs("rue")));
        assert!(!src.get_keyword("true").unwrap());
        assert_eq!(src.remaining().len(),2);
    }

    #[test]
    fn optional_space() {
        let mut src = TokenList::new(letters_from_str("  a"));
        skip_optional_space(&mut src).unwrap();
        assert_eq!(src.remaining().len(),2);
    }
}
