/*! State that determines how material is processed; currently the [`Mode`](modes::Mode)s of the list makers. */

pub mod modes;
