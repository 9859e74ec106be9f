/*! A [Token] is either a control sequence (with a name and a namespace),
or a pair of a character and a [`CommandCode`] (i.e. conceptually a [`CategoryCode`](super::catcodes::CategoryCode),
minus the codes that never survive tokenization).

Tokens are immutable values; they are compared by value, except that all [`Space`](CommandCode::Space)
tokens are considered equal.
 */

use std::fmt::Write;
use crate::tex::catcodes::CommandCode;
use crate::utils::Ptr;

/// The name of a control sequence.
pub type CSName = Ptr<str>;

/// The namespace control sequences are created in unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "";

#[derive(Clone,Eq,Debug)]
pub enum Token {
    /// A control sequence `\name`; the namespace scopes macro lookups.
    ControlSequence{name:CSName,namespace:CSName},
    /// A character with its [`CommandCode`].
    Character{char:char,code:CommandCode}
}
impl PartialEq for Token {
    fn eq(&self,other:&Self) -> bool {
        match (self,other) {
            (Token::ControlSequence{name:n1,namespace:ns1},Token::ControlSequence{name:n2,namespace:ns2}) =>
                n1 == n2 && ns1 == ns2,
            (Token::Character{code:CommandCode::Space,..},Token::Character{code:CommandCode::Space,..}) => true,
            (Token::Character{char:c1,code:a},Token::Character{char:c2,code:b}) => c1 == c2 && a == b,
            _ => false
        }
    }
}

impl Token {
    /// A control sequence in the [`DEFAULT_NAMESPACE`].
    pub fn cs(name:&str) -> Self {
        Token::ControlSequence { name:name.into(), namespace:DEFAULT_NAMESPACE.into() }
    }
    /// A character token.
    pub fn char(char:char,code:CommandCode) -> Self { Token::Character { char, code } }
    /// A space token.
    pub fn space() -> Self { Token::Character { char:' ', code:CommandCode::Space } }
    /// A [`Letter`](CommandCode::Letter) token.
    pub fn letter(char:char) -> Self { Token::Character { char, code:CommandCode::Letter } }
    /// An [`Other`](CommandCode::Other) token.
    pub fn other(char:char) -> Self { Token::Character { char, code:CommandCode::Other } }

    /// The character of this token, if it is a character token.
    pub fn char_value(&self) -> Option<char> {
        match self {
            Token::Character{char,..} => Some(*char),
            _ => None
        }
    }
    /// The [`CommandCode`] of this token, if it is a character token.
    pub fn command_code(&self) -> Option<CommandCode> {
        match self {
            Token::Character{code,..} => Some(*code),
            _ => None
        }
    }
    /// Check if this token is a control sequence with the given name (in any namespace).
    pub fn is_cs(&self,cs:&str) -> bool {
        matches!(self,Token::ControlSequence{name,..} if &**name == cs)
    }
    pub fn is_space(&self) -> bool {
        matches!(self,Token::Character{code:CommandCode::Space,..})
    }
    pub fn is_begin_group(&self) -> bool {
        matches!(self,Token::Character{code:CommandCode::BeginGroup,..})
    }
    pub fn is_end_group(&self) -> bool {
        matches!(self,Token::Character{code:CommandCode::EndGroup,..})
    }
    pub fn is_math_shift(&self) -> bool {
        matches!(self,Token::Character{code:CommandCode::MathShift,..})
    }
    /// A [`Letter`](CommandCode::Letter) or [`Other`](CommandCode::Other) token with the given character,
    /// ignoring case; this is how TeX matches keywords.
    pub fn is_keyword_char(&self,c:char) -> bool {
        match self {
            Token::Character{char,code:CommandCode::Letter | CommandCode::Other} =>
                char.eq_ignore_ascii_case(&c),
            _ => false
        }
    }

    /// Display this token to a writer. Control sequences are prefixed with `escapechar` (if any),
    /// and followed by a space if their name consists of letters.
    pub fn display_fmt<W:Write>(&self,escapechar:Option<char>,f:&mut W) -> std::fmt::Result {
        match self {
            Token::Character{code:CommandCode::Space,..} => f.write_char(' '),
            Token::Character{char,..} => f.write_char(*char),
            Token::ControlSequence{name,..} => {
                if let Some(e) = escapechar { f.write_char(e)?; }
                f.write_str(name)?;
                let mut chars = name.chars();
                match (chars.next(),chars.next()) {
                    (Some(c),None) if !c.is_alphabetic() => Ok(()),
                    _ => f.write_char(' ')
                }
            }
        }
    }
}
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.display_fmt(Some('\\'),f)
    }
}

/// The tokens TeX's `\the` produces for a string: [`Space`](CommandCode::Space) tokens for spaces,
/// [`Other`](CommandCode::Other) tokens for everything else.
pub fn tokens_from_str(s:&str) -> Vec<Token> {
    s.chars().map(|c| if c == ' ' { Token::space() } else { Token::other(c) }).collect()
}

/// Like [`tokens_from_str`], but ASCII letters become [`Letter`](CommandCode::Letter) tokens,
/// as if tokenized under the default category codes.
pub fn letters_from_str(s:&str) -> Vec<Token> {
    s.chars().map(|c| match c {
        ' ' => Token::space(),
        c if c.is_ascii_alphabetic() => Token::letter(c),
        c => Token::other(c)
    }).collect()
}

/// Like [`letters_from_str`], but with plain TeX's special characters: `{}$&#^_~`. There are no
/// control sequences.
pub fn plain_tokens_from_str(s:&str) -> Vec<Token> {
    s.chars().map(|c| match c {
        '{' => Token::char(c,CommandCode::BeginGroup),
        '}' => Token::char(c,CommandCode::EndGroup),
        '$' => Token::char(c,CommandCode::MathShift),
        '&' => Token::char(c,CommandCode::AlignmentTab),
        '#' => Token::char(c,CommandCode::Parameter),
        '^' => Token::char(c,CommandCode::Superscript),
        '_' => Token::char(c,CommandCode::Subscript),
        '~' => Token::char(c,CommandCode::Active),
        ' ' => Token::space(),
        c if c.is_ascii_alphabetic() => Token::letter(c),
        c => Token::other(c)
    }).collect()
}

/// Display a list of tokens, e.g. for tracing.
pub fn display_tokens(tks:&[Token]) -> String {
    let mut ret = String::new();
    for t in tks { let _ = t.display_fmt(Some('\\'),&mut ret); }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality() {
        assert_eq!(Token::space(),Token::char('\t',CommandCode::Space));
        assert_ne!(Token::letter('a'),Token::other('a'));
        assert_eq!(Token::cs("par"),Token::cs("par"));
        let scoped = Token::ControlSequence{name:"par".into(),namespace:"math".into()};
        assert_ne!(Token::cs("par"),scoped);
        assert!(scoped.is_cs("par"));
    }

    #[test]
    fn display() {
        assert_eq!(display_tokens(&[Token::cs("foo"),Token::letter('a'),Token::cs("{"),Token::space()]),"\\foo a\\{ ");
        assert_eq!(display_tokens(&letters_from_str("1.0pt")),"1.0pt");
        assert!(tokens_from_str("a b")[1].is_space());
        assert!(Token::letter('P').is_keyword_char('p'));
    }
}
