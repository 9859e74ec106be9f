//! Components of the typesetter: the [`Mouth`](mouth::Mouth) turning characters into tokens, the
//! [gullet](gullet) scanning quantities from tokens, and the [`ListManager`](stomach::ListManager)
//! building lists of nodes in the current [`Mode`](state::modes::Mode).

pub mod state;
pub mod mouth;
pub mod gullet;
pub mod stomach;
pub mod fontsystem;
pub mod options;
