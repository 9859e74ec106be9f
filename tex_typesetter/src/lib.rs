#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod utils;
pub mod engine;
pub mod tex;

#[doc(hidden)]
pub mod tests;

pub mod prelude {
    pub use crate::tex::catcodes::{CategoryCode, CategoryCodeScheme, CommandCode};
    pub use crate::tex::characters::{StringLineSource, TextLineSource};
    pub use crate::tex::tokens::Token;
    pub use crate::tex::numerics::{Dimen, GlueComponent};
    pub use crate::tex::numerics::glue::{Glue, GlueSet, WideGlue};
    pub use crate::tex::nodes::{Node, NodeTrait, HorizontalList, VerticalList};
    pub use crate::engine::mouth::{Mouth, TokenSource};
    pub use crate::engine::mouth::strings::TokenizerConfig;
    pub use crate::engine::gullet::Gullet;
    pub use crate::engine::options::{ParameterTable, TypesetterOptions};
    pub use crate::engine::stomach::ListManager;
    pub use crate::engine::state::modes::Mode;
    pub use crate::utils::errors::{TeXError, TypesetterError, NumericError, ScannerError};
}
