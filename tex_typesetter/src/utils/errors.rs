/*! Errors.

   All errors are plain values carrying a stable message identifier (see [`MessageKey::id`]) and
   their structured parameters ([`MessageKey::params`]). Turning them into human readable sentences is the
   job of a [`Localizer`]; the [`Display`](std::fmt::Display) implementations only print the identifier and
   the parameters.

   | Error                  | Raised by                                   | Recoverable at                 |
   |------------------------|---------------------------------------------|--------------------------------|
   | [`ScannerError`]       | the [tokenizer](crate::engine::mouth)       | the current line               |
   | [`NumericError`]       | [numeric scanning](crate::engine::gullet)   | the current quantity           |
   | [`TypesetterError`]    | the [list makers](crate::engine::stomach)   | the current operation          |
*/

use std::fmt::{Display, Formatter};
use crate::engine::state::modes::Mode;

/// Where in the input something happened.
#[derive(Clone,Debug,PartialEq,Eq,Default)]
pub struct Locator {
    /// Description of the source, e.g. a file name
    pub source:String,
    /// 1-based line number; `0` if no line has been read yet
    pub line:usize,
    /// 1-based column
    pub column:usize
}
impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}:{}:{}",self.source,self.line,self.column)
    }
}

/// An error with a stable identifier and a list of parameters, to be rendered by a [`Localizer`].
pub trait MessageKey {
    /// The stable identifier of this error, e.g. `TTP.IllegalUnit`
    fn id(&self) -> &'static str;
    /// The parameters to insert into the localized message
    fn params(&self) -> Vec<String> { Vec::new() }
    /// Render this error using the given [`Localizer`]
    fn message<L:Localizer + ?Sized>(&self,localizer:&L) -> String where Self:Sized {
        localizer.format(self.id(),&self.params())
    }
}

/// Formats messages from their identifiers and parameters.
pub trait Localizer {
    fn format(&self,id:&str,params:&[String]) -> String;
}

/// A [`Localizer`] without any message catalogue; prints `id: param1, param2`.
#[derive(Clone,Copy,Debug,Default)]
pub struct PlainLocalizer;
impl Localizer for PlainLocalizer {
    fn format(&self, id: &str, params: &[String]) -> String {
        if params.is_empty() { id.to_string() } else {
            format!("{}: {}",id,params.join(", "))
        }
    }
}

/// Lexical errors raised while turning characters into [`Token`](crate::tex::tokens::Token)s.
#[derive(Clone,Debug,PartialEq,Eq,thiserror::Error)]
pub enum ScannerError {
    /// A character with [`CategoryCode::Invalid`](crate::tex::catcodes::CategoryCode::Invalid)
    #[error("TTP.InvalidChar: {char:?} at {locator}")]
    InvalidCharacter{char:char,locator:Locator},
    /// `^^` at the end of a line
    #[error("TTP.NoDigitFoundAfter at {locator}")]
    NoDigitFoundAfter{locator:Locator},
    /// `^^^^` not followed by a hex digit
    #[error("TTP.NoHexDigitFound at {locator}")]
    NoHexDigitFound{locator:Locator},
    /// `^^^` at the end of a line
    #[error("TTP.NoUnicodeNameFoundAfter at {locator}")]
    NoUnicodeNameFoundAfter{locator:Locator},
    /// `^^^;`
    #[error("TTP.NoLetterFoundAfter at {locator}")]
    NoLetterFoundAfter{locator:Locator},
    /// `^^^name` without the terminating `;`
    #[error("TTP.UnterminatedUnicodeName: {name} at {locator}")]
    UnterminatedUnicodeName{name:String,locator:Locator},
    /// `^^^name;` where `name` is not the name of a character
    #[error("TTP.NoUnicodeName: {name} at {locator}")]
    NoUnicodeName{name:String,locator:Locator},
    /// More than four consecutive sup marks
    #[error("TTP.TooManySupMarks at {locator}")]
    TooManySupMarks{locator:Locator},
    /// A hex escape that does not denote a unicode scalar value
    #[error("TTP.InvalidCodePoint: {value:x} at {locator}")]
    InvalidCodePoint{value:u32,locator:Locator}
}
impl ScannerError {
    /// Where the error occurred
    pub fn locator(&self) -> &Locator {
        use ScannerError::*;
        match self {
            InvalidCharacter{locator,..} | NoDigitFoundAfter{locator} | NoHexDigitFound{locator} |
            NoUnicodeNameFoundAfter{locator} | NoLetterFoundAfter{locator} |
            UnterminatedUnicodeName{locator,..} | NoUnicodeName{locator,..} |
            TooManySupMarks{locator} | InvalidCodePoint{locator,..} => locator
        }
    }
}
impl MessageKey for ScannerError {
    fn id(&self) -> &'static str {
        use ScannerError::*;
        match self {
            InvalidCharacter{..} => "TTP.InvalidChar",
            NoDigitFoundAfter{..} => "TTP.NoDigitFoundAfter",
            NoHexDigitFound{..} => "TTP.NoHexDigitFound",
            NoUnicodeNameFoundAfter{..} => "TTP.NoUnicodeNameFoundAfter",
            NoLetterFoundAfter{..} => "TTP.NoLetterFoundAfter",
            UnterminatedUnicodeName{..} => "TTP.UnterminatedUnicodeName",
            NoUnicodeName{..} => "TTP.NoUnicodeName",
            TooManySupMarks{..} => "TTP.TooManySupMarks",
            InvalidCodePoint{..} => "TTP.InvalidCodePoint"
        }
    }
    fn params(&self) -> Vec<String> {
        use ScannerError::*;
        let mut ret = match self {
            InvalidCharacter{char,..} => vec!(char.to_string()),
            UnterminatedUnicodeName{name,..} | NoUnicodeName{name,..} => vec!(name.clone()),
            InvalidCodePoint{value,..} => vec!(format!("{:x}",value)),
            _ => Vec::new()
        };
        ret.push(self.locator().to_string());
        ret
    }
}

/// Errors raised while scanning or computing with numbers, dimensions and glue.
#[derive(Clone,Debug,PartialEq,Eq,thiserror::Error)]
pub enum NumericError {
    #[error(transparent)]
    Scanner(#[from] ScannerError),
    /// No digits where a number was expected; TeX recovers by using `0`
    #[error("TTP.MissingNumber")]
    MissingNumber,
    /// The next tokens do not form a unit; they have been pushed back.
    #[error("TTP.NoSuitableUnit")]
    NoSuitableUnit,
    /// A unit that is not allowed here, e.g. `fil` in a dimension
    #[error("TTP.IllegalUnit: {unit}")]
    IllegalUnit{unit:String},
    /// `fillll` and beyond
    #[error("TTP.TooManyInfinities")]
    TooManyInfinities,
    /// Division by zero while scaling
    #[error("TTP.ArithOverflow")]
    ArithmeticOverflow,
    /// A dimension whose absolute value is at least `16384pt`
    #[error("TTP.DimenTooLarge")]
    DimensionTooLarge,
    /// The input ended while scanning a quantity
    #[error("TTP.EofInNumber")]
    EndOfFile
}
impl MessageKey for NumericError {
    fn id(&self) -> &'static str {
        use NumericError::*;
        match self {
            Scanner(e) => e.id(),
            MissingNumber => "TTP.MissingNumber",
            NoSuitableUnit => "TTP.NoSuitableUnit",
            IllegalUnit{..} => "TTP.IllegalUnit",
            TooManyInfinities => "TTP.TooManyInfinities",
            ArithmeticOverflow => "TTP.ArithOverflow",
            DimensionTooLarge => "TTP.DimenTooLarge",
            EndOfFile => "TTP.EofInNumber"
        }
    }
    fn params(&self) -> Vec<String> {
        match self {
            NumericError::Scanner(e) => e.params(),
            NumericError::IllegalUnit{unit} => vec!(unit.clone()),
            _ => Vec::new()
        }
    }
}

/// Errors raised by the list makers and their manager.
#[derive(Clone,Debug,PartialEq,Eq,thiserror::Error)]
pub enum TypesetterError {
    #[error(transparent)]
    Scanner(#[from] ScannerError),
    #[error(transparent)]
    Numeric(#[from] NumericError),
    /// The current list maker does not support this operation
    #[error("TTP.CantUseIn: {operation} in {mode} mode")]
    UnsupportedOperation{mode:Mode,operation:&'static str},
    /// More cells in an alignment row than the preamble has columns
    #[error("TTP.ExtraAlignTab: column {column}")]
    ExtraAlignTab{column:usize},
    /// Space factors must be positive
    #[error("TTP.BadSpaceFactor: {value}")]
    BadSpaceFactor{value:i64},
    #[error("TTP.DoubleSubscript")]
    DoubleSubscript,
    #[error("TTP.DoubleSuperscript")]
    DoubleSuperscript,
    /// Display math closed by a single math shift
    #[error("TTP.DisplayMathEnd")]
    DisplayMathEnd,
    /// A closing brace without an opening one in a math list
    #[error("TTP.ExtraRightBrace")]
    ExtraRightBrace,
    /// A math sub/superscript not followed by something that makes a noad
    #[error("TTP.MissingNoad")]
    MissingNoad,
    /// The input ended while `context` was being scanned
    #[error("TTP.EofIn: {context}")]
    EndOfFile{context:&'static str},
    /// The outermost list cannot be closed
    #[error("TTP.StackUnderflow")]
    StackUnderflow
}
impl MessageKey for TypesetterError {
    fn id(&self) -> &'static str {
        use TypesetterError::*;
        match self {
            Scanner(e) => e.id(),
            Numeric(e) => e.id(),
            UnsupportedOperation{..} => "TTP.CantUseIn",
            ExtraAlignTab{..} => "TTP.ExtraAlignTab",
            BadSpaceFactor{..} => "TTP.BadSpaceFactor",
            DoubleSubscript => "TTP.DoubleSubscript",
            DoubleSuperscript => "TTP.DoubleSuperscript",
            DisplayMathEnd => "TTP.DisplayMathEnd",
            ExtraRightBrace => "TTP.ExtraRightBrace",
            MissingNoad => "TTP.MissingNoad",
            EndOfFile{..} => "TTP.EofIn",
            StackUnderflow => "TTP.StackUnderflow"
        }
    }
    fn params(&self) -> Vec<String> {
        use TypesetterError::*;
        match self {
            Scanner(e) => e.params(),
            Numeric(e) => e.params(),
            UnsupportedOperation{mode,operation} => vec!(operation.to_string(),mode.to_string()),
            ExtraAlignTab{column} => vec!(column.to_string()),
            BadSpaceFactor{value} => vec!(value.to_string()),
            EndOfFile{context} => vec!(context.to_string()),
            _ => Vec::new()
        }
    }
}

/// Any error of this crate.
#[derive(Clone,Debug,PartialEq,Eq,thiserror::Error)]
pub enum TeXError {
    #[error(transparent)]
    Scanner(#[from] ScannerError),
    #[error(transparent)]
    Numeric(#[from] NumericError),
    #[error(transparent)]
    Typesetter(#[from] TypesetterError)
}
impl MessageKey for TeXError {
    fn id(&self) -> &'static str {
        match self {
            TeXError::Scanner(e) => e.id(),
            TeXError::Numeric(e) => e.id(),
            TeXError::Typesetter(e) => e.id()
        }
    }
    fn params(&self) -> Vec<String> {
        match self {
            TeXError::Scanner(e) => e.params(),
            TeXError::Numeric(e) => e.params(),
            TeXError::Typesetter(e) => e.params()
        }
    }
}
