/*! The [`ListMaker`] trait.

Every list maker accepts the same set of operations; the default implementations reject them with
[`UnsupportedOperation`](TypesetterError::UnsupportedOperation), naming the mode of the list maker and the
operation. A list maker overrides exactly the operations that make sense in its mode.
*/

use crate::engine::fontsystem::{CharNodeFactory, FontRef};
use crate::engine::mouth::TokenSource;
use crate::engine::options::TypesetterOptions;
use crate::engine::state::modes::Mode;
use crate::engine::stomach::Collaborators;
use crate::tex::nodes::{Node, NodeList};
use crate::tex::nodes::math::Noad;
use crate::tex::numerics::Dimen;
use crate::tex::numerics::glue::Glue;
use crate::tex::tokens::Token;
use crate::utils::errors::TypesetterError;

/// Shorthand for the error a list maker in mode `mode` returns for an operation it does not support.
pub fn unsupported<A>(mode:Mode,operation:&'static str) -> Result<A,TypesetterError> {
    Err(TypesetterError::UnsupportedOperation { mode, operation })
}

/// An accumulator of typeset material in one [`Mode`].
pub trait ListMaker {
    fn mode(&self) -> Mode;

    /// Append a node.
    fn add(&mut self,_node:Node) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"add")
    }
    fn add_glue(&mut self,_glue:Glue) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"add_glue")
    }
    /// Append interword glue. `sf_override` replaces the current space factor for this space only.
    fn add_space(&mut self,_options:&dyn TypesetterOptions,_sf_override:Option<i64>) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"add_space")
    }
    /// Append the character `c` in `font`.
    fn letter(&mut self,_c:char,_font:&FontRef,_factory:&dyn CharNodeFactory,_options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"letter")
    }
    fn add_noad(&mut self,_noad:Noad) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"add_noad")
    }
    /// Open a math group
    fn left_brace(&mut self) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"left_brace")
    }
    /// Close a math group
    fn right_brace(&mut self) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"right_brace")
    }
    /// Attach `noad` as subscript to the last noad.
    fn sub_mark(&mut self,_noad:Noad) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"sub_mark")
    }
    /// Attach `noad` as superscript to the last noad.
    fn sup_mark(&mut self,_noad:Noad) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"sup_mark")
    }
    fn set_spacefactor(&mut self,_sf:i64) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"set_spacefactor")
    }
    fn spacefactor(&self) -> Result<i64,TypesetterError> {
        unsupported(self.mode(),"spacefactor")
    }
    /// `None` means "ignore the previous depth", i.e. no baseline glue before the next box.
    fn set_prevdepth(&mut self,_pd:Option<Dimen>) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"set_prevdepth")
    }
    fn prevdepth(&self) -> Result<Option<Dimen>,TypesetterError> {
        unsupported(self.mode(),"prevdepth")
    }
    fn last_node(&self) -> Option<&Node> { None }
    fn remove_last_node(&mut self) -> Option<Node> { None }
    /// Append `nodes`, inserting baseline glue before boxes.
    fn add_and_adjust(&mut self,_nodes:NodeList,_options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"add_and_adjust")
    }
    /// Alignment tab; `token` is the token that triggered it.
    fn tab(&mut self,_token:Token,_source:&mut dyn TokenSource,_options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"tab")
    }
    fn cr(&mut self,_token:Token,_source:&mut dyn TokenSource,_options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"cr")
    }
    fn crcr(&mut self,_token:Token,_source:&mut dyn TokenSource,_options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"crcr")
    }
    fn span(&mut self,_token:Token,_source:&mut dyn TokenSource,_options:&dyn TypesetterOptions) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"span")
    }
    /// Vertical material between alignment rows
    fn noalign(&mut self,_nodes:NodeList,_source:&mut dyn TokenSource) -> Result<(),TypesetterError> {
        unsupported(self.mode(),"noalign")
    }
    /// Finish the list and return its contents. The list maker keeps its material, so that it can stay
    /// on the stack if this (or whatever is done with the result) fails; on success, the caller drops it.
    fn close(&mut self,collaborators:&Collaborators,options:&dyn TypesetterOptions) -> Result<NodeList,TypesetterError>;
}
