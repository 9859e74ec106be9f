/*! The tokenizer: turns lines of characters into [`Token`]s, according to a [`CategoryCodeScheme`].
*/
use arrayvec::ArrayVec;
use crate::debug_log;
use crate::tex::catcodes::{CategoryCode, CategoryCodeScheme, CommandCode};
use crate::tex::characters::{TextLine, TextLineSource};
use crate::tex::tokens::{CSName, DEFAULT_NAMESPACE, Token};
use crate::utils::errors::{Locator, ScannerError};

/// An [`InputTokenizer`] is in one of three states
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub enum MouthState {
    /// Beginning of line
    NewLine,
    /// After a space (or a control word)
    SkipBlanks,
    /// In the middle of a line
    MidLine
}

/// The width of characters, which determines how many hex digits `^^` and `^^^^` read at most.
#[derive(Copy,Clone,PartialEq,Eq,Debug,Default)]
pub enum CharBits {
    Eight,
    Sixteen,
    #[default]
    ThirtyTwo
}
impl CharBits {
    pub fn max_hex_digits(&self) -> usize {
        match self {
            CharBits::Eight => 2,
            CharBits::Sixteen => 4,
            CharBits::ThirtyTwo => 8
        }
    }
}

/// Settings of an [`InputTokenizer`].
#[derive(Clone,Debug)]
pub struct TokenizerConfig {
    /// The maximal number of hex digits in a caret escape; at most 8
    pub max_hex_digits:usize,
    /// The character appended to every line (`\endlinechar`); `None` appends nothing
    pub endline_char:Option<char>,
    /// The namespace of all control sequences produced
    pub namespace:CSName
}
impl TokenizerConfig {
    pub fn with_char_bits(mut self,bits:CharBits) -> Self {
        self.max_hex_digits = bits.max_hex_digits();
        self
    }
    pub fn with_endline_char(mut self,c:Option<char>) -> Self {
        self.endline_char = c;
        self
    }
    pub fn with_namespace(mut self,ns:&str) -> Self {
        self.namespace = ns.into();
        self
    }
}
impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            max_hex_digits:CharBits::default().max_hex_digits(),
            endline_char:Some('\r'),
            namespace:DEFAULT_NAMESPACE.into()
        }
    }
}

/// Resolves the names in `^^^name;` escapes.
pub trait UnicodeNames {
    fn lookup(&self,name:&str) -> Option<char>;
}
/// [`UnicodeNames`] backed by the Unicode character database. Lookup ignores case, and `_` may be used
/// instead of a space, e.g. `^^^latin_small_letter_a;`.
#[derive(Clone,Copy,Debug,Default)]
pub struct UnicodeDatabase;
impl UnicodeNames for UnicodeDatabase {
    fn lookup(&self, name: &str) -> Option<char> {
        unicode_names2::character(&name.replace('_'," "))
    }
}

fn is_hex(c:char) -> bool {
    matches!(c,'0'..='9' | 'a'..='f')
}

/** Takes a [`TextLineSource`] and lazily turns it into [`Token`]s

  *Example:*
```rust
use tex_typesetter::engine::mouth::strings::{InputTokenizer, TokenizerConfig};
use tex_typesetter::tex::catcodes::{CategoryCodeScheme, CommandCode};
use tex_typesetter::tex::characters::StringLineSource;
use tex_typesetter::tex::tokens::Token;

let cc = CategoryCodeScheme::default();
let string = "\\foo   \n  \n   {a}{!}";
let input: StringLineSource = string.into();
let mut tokenizer = InputTokenizer::new(input,TokenizerConfig::default());
let next = tokenizer.get_next(&cc).unwrap(); // \foo
assert!(matches!(next,Some(Token::ControlSequence{name,..}) if &*name == "foo"));
let next = tokenizer.get_next(&cc).unwrap(); // \par
assert!(matches!(next,Some(Token::ControlSequence{name,..}) if &*name == "par"));
let next = tokenizer.get_next(&cc).unwrap().unwrap(); // {
assert_eq!(next.command_code(), Some(CommandCode::BeginGroup));
let next = tokenizer.get_next(&cc).unwrap().unwrap(); // a
assert_eq!(next.command_code(), Some(CommandCode::Letter));
let next = tokenizer.get_next(&cc).unwrap().unwrap(); // }
assert_eq!(next.command_code(), Some(CommandCode::EndGroup));
let next = tokenizer.get_next(&cc).unwrap().unwrap(); // {
assert_eq!(next.command_code(), Some(CommandCode::BeginGroup));
let next = tokenizer.get_next(&cc).unwrap().unwrap(); // !
assert_eq!(next.command_code(), Some(CommandCode::Other));
let next = tokenizer.get_next(&cc).unwrap().unwrap(); // }
assert_eq!(next.command_code(), Some(CommandCode::EndGroup));
let next = tokenizer.get_next(&cc).unwrap().unwrap(); // end of line => space
assert_eq!(next.command_code(), Some(CommandCode::Space));
assert!(tokenizer.get_next(&cc).unwrap().is_none()); // EOF
```
*/
pub struct InputTokenizer<S:TextLineSource> {
    state:MouthState,
    line:usize,
    col:usize,
    current_line:TextLine,
    source:S,
    eof:bool,
    config:TokenizerConfig,
    names:Box<dyn UnicodeNames>,
    tempstr:String
}

impl<S:TextLineSource> InputTokenizer<S> {
    /// Create a new [`InputTokenizer`] from a [`TextLineSource`]
    pub fn new(mut source:S,config:TokenizerConfig) -> Self {
        let (current_line,line,eof) = match source.get_line() {
            Some(l) => (l,1,false),
            None => (TextLine::default(),0,true)
        };
        Self {
            state: MouthState::NewLine,
            line,
            col: 0,
            current_line,
            source,
            eof,
            config,
            names:Box::new(UnicodeDatabase),
            tempstr:String::new()
        }
    }
    /// Use a different [`UnicodeNames`] for `^^^name;` escapes
    pub fn with_unicode_names<U:UnicodeNames + 'static>(mut self,names:U) -> Self {
        self.names = Box::new(names);
        self
    }
    pub fn config(&self) -> &TokenizerConfig { &self.config }
    pub fn config_mut(&mut self) -> &mut TokenizerConfig { &mut self.config }
    pub fn state(&self) -> MouthState { self.state }
    /// The current line
    pub fn line(&self) -> usize { self.line }
    /// The current column
    pub fn column(&self) -> usize { self.col + 1 }
    /// whether the input is exhausted
    pub fn eof(&self) -> bool { self.eof }
    /// The current position, for error messages
    pub fn locator(&self) -> Locator {
        Locator { source:self.source.source_name().to_string(), line:self.line, column:self.column() }
    }

    /// Up to `len` of the characters not yet read in the current line, without consuming them
    pub fn preview(&self,len:usize) -> String {
        self.current_line.get(self.col..).unwrap_or_default().iter().take(len).collect()
    }

    /// Discard the rest of the current line, e.g. to recover from a [`ScannerError`].
    pub fn skip_line(&mut self) {
        debug_log!(trace=>"Skipping rest of line {}: {}",self.line,self.preview(usize::MAX));
        self.next_line();
        self.state = MouthState::NewLine;
    }

    fn get_char(&mut self) -> Option<char> {
        let next = self.current_line.get(self.col).copied();
        if next.is_some() { self.col += 1 }
        next
    }

    fn next_line(&mut self) {
        if let Some(next) = self.source.get_line() {
            self.current_line = next;
            self.line += 1;
            self.col = 0;
            debug_log!(trace=>"Line {}: {}",self.line,self.current_line.iter().collect::<String>());
        } else {
            self.eof = true;
            self.col = self.current_line.len();
        }
    }

    fn cs(&self,name:&str) -> Token {
        Token::ControlSequence { name:name.into(), namespace:self.config.namespace.clone() }
    }

    /// Get the next [`Token`]; `None` if the input is exhausted.
    pub fn get_next(&mut self,cc:&CategoryCodeScheme) -> Result<Option<Token>,ScannerError> {
        loop {
            let next = match self.get_char() {
                None if self.eof => return Ok(None),
                None => self.return_endline(cc)?,
                Some(c) => self.check_char(cc,c)?
            };
            if let Some(t) = next {
                debug_log!(trace=>"Token at {}:{}: {}",self.line,self.col,t);
                return Ok(Some(t))
            }
        }
    }

    fn return_endline(&mut self,cc:&CategoryCodeScheme) -> Result<Option<Token>,ScannerError> {
        use CategoryCode::*;
        let state = self.state;
        let ret = match self.config.endline_char {
            None => None,
            Some(c) => match cc.get(c) {
                EOL | Space if state == MouthState::SkipBlanks => None,
                Space if state == MouthState::NewLine => None,
                EOL if state == MouthState::NewLine => Some(self.cs("par")),
                EOL | Space => Some(Token::space()),
                Ignored | Comment => None,
                Escape => Some(self.cs("")),
                Invalid => {
                    let locator = self.locator();
                    self.next_line();
                    self.state = MouthState::NewLine;
                    return Err(ScannerError::InvalidCharacter { char:c, locator })
                }
                o => CommandCode::try_from(o).ok().map(|code| Token::char(c,code))
            }
        };
        self.next_line();
        self.state = MouthState::NewLine;
        Ok(ret)
    }

    fn check_char(&mut self,cc:&CategoryCodeScheme,c:char) -> Result<Option<Token>,ScannerError> {
        use CategoryCode::*;
        match cc.get(c) {
            EOL => {
                let ret = match self.state {
                    MouthState::NewLine => Some(self.cs("par")),
                    MouthState::MidLine => Some(Token::space()),
                    MouthState::SkipBlanks => None
                };
                self.next_line();
                self.state = MouthState::NewLine;
                Ok(ret)
            }
            Space if self.state == MouthState::MidLine => {
                self.state = MouthState::SkipBlanks;
                Ok(Some(Token::space()))
            }
            Space | Ignored => Ok(None),
            Comment => {
                self.next_line();
                self.state = MouthState::NewLine;
                Ok(None)
            }
            Invalid => {
                self.state = MouthState::MidLine;
                Err(ScannerError::InvalidCharacter { char:c, locator:Locator { column:self.col, ..self.locator() } })
            }
            Escape => self.get_escape(cc).map(Some),
            Superscript => match self.caret_escape(c)? {
                Some(r) => self.check_char(cc,r),
                None => {
                    self.state = MouthState::MidLine;
                    Ok(Some(Token::char(c,CommandCode::Superscript)))
                }
            }
            o => {
                self.state = MouthState::MidLine;
                Ok(CommandCode::try_from(o).ok().map(|code| Token::char(c,code)))
            }
        }
    }

    fn get_escape(&mut self,cc:&CategoryCodeScheme) -> Result<Token,ScannerError> {
        let start = self.col;
        match self.get_char() {
            None => Ok(self.cs("")),
            Some(next) => self.check_escape(cc,next,start)
        }
    }

    /// `start` is the column `next` was read from; if `next` resulted from a caret escape, the
    /// whole escape is left unconsumed when it denotes an end of line.
    fn check_escape(&mut self,cc:&CategoryCodeScheme,next:char,start:usize) -> Result<Token,ScannerError> {
        match cc.get(next) {
            CategoryCode::EOL => {
                self.col = start;
                Ok(self.cs(""))
            }
            CategoryCode::Superscript => match self.caret_escape(next)? {
                Some(c) => self.check_escape(cc,c,start),
                None => {
                    self.state = MouthState::MidLine;
                    Ok(self.single_char_cs(next))
                }
            }
            CategoryCode::Letter => Ok(self.get_cs_name(cc,next)),
            _ => {
                self.state = MouthState::MidLine;
                Ok(self.single_char_cs(next))
            }
        }
    }

    fn single_char_cs(&mut self,c:char) -> Token {
        self.tempstr.clear();
        self.tempstr.push(c);
        self.cs(&self.tempstr)
    }

    fn get_cs_name(&mut self,cc:&CategoryCodeScheme,first:char) -> Token {
        self.tempstr.clear();
        self.tempstr.push(first);
        self.state = MouthState::SkipBlanks;
        while let Some(next) = self.get_char() {
            match cc.get(next) {
                CategoryCode::Letter => self.tempstr.push(next),
                CategoryCode::Superscript => {
                    let curr = self.col;
                    match self.caret_escape(next) {
                        Ok(Some(c)) if cc.get(c) == CategoryCode::Letter => self.tempstr.push(c),
                        _ => {
                            self.col = curr - 1;
                            break
                        }
                    }
                }
                _ => {
                    self.col -= 1;
                    break
                }
            }
        }
        self.cs(&self.tempstr)
    }

    /// Called after reading a [`Superscript`](CategoryCode::Superscript) character `sup`. Returns the
    /// character denoted by a caret escape starting there, or `None` if `sup` stands for itself.
    fn caret_escape(&mut self,sup:char) -> Result<Option<char>,ScannerError> {
        let start = self.col;
        let mut count = 1;
        while count < 5 && self.current_line.get(self.col) == Some(&sup) {
            self.col += 1;
            count += 1;
        }
        match count {
            1 => Ok(None),
            2 => match self.current_line.get(self.col).copied() {
                None => Err(ScannerError::NoDigitFoundAfter { locator:self.locator() }),
                Some(c) if is_hex(c) => self.read_hex().map(Some),
                Some(c) if (c as u32) < 64 => {
                    self.col += 1;
                    Ok(char::from_u32(c as u32 + 64))
                }
                Some(c) if (c as u32) < 128 => {
                    self.col += 1;
                    Ok(char::from_u32(c as u32 - 64))
                }
                Some(_) => {
                    self.col = start;
                    Ok(None)
                }
            }
            3 => self.read_unicode_name().map(Some),
            4 => match self.current_line.get(self.col) {
                Some(c) if is_hex(*c) => self.read_hex().map(Some),
                _ => Err(ScannerError::NoHexDigitFound { locator:self.locator() })
            }
            _ => Err(ScannerError::TooManySupMarks { locator:self.locator() })
        }
    }

    fn read_hex(&mut self) -> Result<char,ScannerError> {
        let mut digits = ArrayVec::<u32,8>::new();
        while digits.len() < self.config.max_hex_digits.min(8) {
            match self.current_line.get(self.col).copied() {
                Some(c) if is_hex(c) => {
                    self.col += 1;
                    digits.push(c.to_digit(16).unwrap_or_default());
                }
                _ => break
            }
        }
        let value = digits.iter().fold(0u32,|a,d| (a << 4) | d);
        char::from_u32(value).ok_or_else(|| ScannerError::InvalidCodePoint { value, locator:self.locator() })
    }

    fn read_unicode_name(&mut self) -> Result<char,ScannerError> {
        if self.col >= self.current_line.len() {
            return Err(ScannerError::NoUnicodeNameFoundAfter { locator:self.locator() })
        }
        let mut name = String::new();
        loop {
            match self.get_char() {
                Some(';') => break,
                Some(c) => name.push(c),
                None => return Err(ScannerError::UnterminatedUnicodeName { name, locator:self.locator() })
            }
        }
        if name.is_empty() {
            return Err(ScannerError::NoLetterFoundAfter { locator:self.locator() })
        }
        match self.names.lookup(&name) {
            Some(c) => Ok(c),
            None => Err(ScannerError::NoUnicodeName { name, locator:self.locator() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tex::characters::StringLineSource;
    use crate::tex::tokens::display_tokens;

    fn tokenize(s:&str) -> Vec<Token> {
        let cc = CategoryCodeScheme::default();
        let mut t = InputTokenizer::new(StringLineSource::from(s),TokenizerConfig::default());
        let mut ret = Vec::new();
        while let Some(tk) = t.get_next(&cc).unwrap() { ret.push(tk) }
        ret
    }
    fn first_error(s:&str) -> ScannerError {
        let cc = CategoryCodeScheme::default();
        let mut t = InputTokenizer::new(StringLineSource::from(s),TokenizerConfig::default());
        loop {
            match t.get_next(&cc) {
                Err(e) => return e,
                Ok(None) => panic!("no error in {}",s),
                Ok(Some(_)) => ()
            }
        }
    }

    #[test]
    fn spaces_and_pars() {
        assert_eq!(display_tokens(&tokenize("a  b\n\n\nc%comment\nd")),"a b \\par \\par cd ");
        assert_eq!(display_tokens(&tokenize("\\foo   x")),"\\foo x ");
        assert_eq!(display_tokens(&tokenize("\\ x\\1y")),"\\  x\\1y ");
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn no_endline_char() {
        let cc = CategoryCodeScheme::default();
        let config = TokenizerConfig::default().with_endline_char(None);
        let mut t = InputTokenizer::new(StringLineSource::from("a\n\nb"),config);
        let mut ret = Vec::new();
        while let Some(tk) = t.get_next(&cc).unwrap() { ret.push(tk) }
        assert_eq!(display_tokens(&ret),"ab");
    }

    #[test]
    fn carets() {
        assert_eq!(tokenize("^^4a"),tokenize("J"));
        assert_eq!(display_tokens(&tokenize("a^^M b")),"a ");
        assert_eq!(tokenize("a^^Ib")[1],Token::space());
        assert_eq!(tokenize("^^^latin_small_letter_a;")[0],Token::letter('a'));
        assert_eq!(tokenize("^^^^00e4")[0],Token::other('ä'));
        assert_eq!(tokenize("^x")[0],Token::char('^',CommandCode::Superscript));
        // letters produced by escapes continue control sequence names
        assert!(tokenize("\\fo^^6fx")[0].is_cs("foox"));
        assert!(tokenize("\\^^41B")[0].is_cs("AB"));
    }

    #[test]
    fn escape_at_end_of_line() {
        let empty = |t:&Token| t.is_cs("");
        // the end of line is still seen after the empty control sequence
        let tks = tokenize("a\\\nb");
        assert_eq!(tks.len(),5);
        assert!(empty(&tks[1]));
        assert!(tks[2].is_space());
        assert_eq!(tks[3],Token::letter('b'));

        let tks = tokenize("a\\\rx");
        assert_eq!(tks.len(),3);
        assert!(empty(&tks[1]));
        assert!(tks[2].is_space());

        // same for an end of line character given as a caret escape
        let tks = tokenize("a\\^^M b");
        assert_eq!(tks.len(),3);
        assert_eq!(tks[0],Token::letter('a'));
        assert!(empty(&tks[1]));
        assert!(tks[2].is_space());
        let tks = tokenize("\\^^M");
        assert_eq!(tks.len(),2);
        assert!(empty(&tks[0]));
        assert!(tks[1].is_cs("par"));
        // escape followed by end of file
        let cc = CategoryCodeScheme::default();
        let config = TokenizerConfig::default().with_endline_char(None);
        let mut t = InputTokenizer::new(StringLineSource::from("\\"),config);
        assert!(t.get_next(&cc).unwrap().is_some_and(|t| t.is_cs("")));
        assert_eq!(t.get_next(&cc).unwrap(),None);
    }

    #[test]
    fn caret_errors() {
        assert!(matches!(first_error("a^^"),ScannerError::NoDigitFoundAfter{..}));
        assert!(matches!(first_error("^^^^x"),ScannerError::NoHexDigitFound{..}));
        assert!(matches!(first_error("^^^"),ScannerError::NoUnicodeNameFoundAfter{..}));
        assert!(matches!(first_error("^^^;"),ScannerError::NoLetterFoundAfter{..}));
        assert!(matches!(first_error("^^^snowman"),ScannerError::UnterminatedUnicodeName{name,..} if name == "snowman"));
        assert!(matches!(first_error("^^^no such char;"),ScannerError::NoUnicodeName{..}));
        assert!(matches!(first_error("^^^^^a"),ScannerError::TooManySupMarks{..}));
        assert!(matches!(first_error("^^^^d800"),ScannerError::InvalidCodePoint{value:0xd800,..}));
    }

    #[test]
    fn recovery() {
        let cc = CategoryCodeScheme::default();
        let input = StringLineSource::from("a\u{7f}b^^^^^c\nd").with_name("test.tex");
        let mut t = InputTokenizer::new(input,TokenizerConfig::default());
        assert_eq!(t.get_next(&cc).unwrap(),Some(Token::letter('a')));
        let err = t.get_next(&cc).unwrap_err();
        assert!(matches!(err,ScannerError::InvalidCharacter{char:'\u{7f}',..}));
        assert_eq!(err.locator().to_string(),"test.tex:1:2");
        assert_eq!(t.preview(3),"b^^");
        assert_eq!(t.get_next(&cc).unwrap(),Some(Token::letter('b')));
        assert!(t.get_next(&cc).is_err());
        t.skip_line();
        assert_eq!(t.get_next(&cc).unwrap(),Some(Token::letter('d')));
        assert_eq!(t.line(),2);
    }

    #[test]
    fn narrow_hex() {
        let cc = CategoryCodeScheme::default();
        let config = TokenizerConfig::default().with_char_bits(CharBits::Eight);
        let mut t = InputTokenizer::new(StringLineSource::from("^^4a4"),config);
        assert_eq!(t.get_next(&cc).unwrap(),Some(Token::letter('J')));
        assert_eq!(t.get_next(&cc).unwrap(),Some(Token::other('4')));
    }

    #[test]
    fn namespaces() {
        let cc = CategoryCodeScheme::default();
        let config = TokenizerConfig::default().with_namespace("doc");
        let mut t = InputTokenizer::new(StringLineSource::from("\\x"),config);
        assert!(matches!(t.get_next(&cc).unwrap(),Some(Token::ControlSequence{namespace,..}) if &*namespace == "doc"));
    }
}
