/*! Utility methods and data structures.*/

use std::rc::Rc;

pub mod errors;

/// A [`HashMap`](std::collections::HashMap) with [`rustc_hash::FxBuildHasher`] as hasher.
pub type HMap<A,B> = rustc_hash::FxHashMap<A,B>;
/// The reference counting pointer type used throughout the crate.
pub type Ptr<A> = Rc<A>;

/// Forwards to the macros of the [`log`] crate, e.g. `debug_log!(trace=>"read line {}",n)`.
#[macro_export]
macro_rules! debug_log {
    ($lvl:ident=>$($arg:tt)*) => { log::$lvl!($($arg)*) };
}
