/*! Glue: a natural length with stretchability and shrinkability.
*/

use std::fmt::{Display, Formatter};
use crate::tex::numerics::{Dimen, GlueComponent, MAX_ORDER, badness};
use crate::tex::tokens::{Token, tokens_from_str};
use crate::utils::errors::NumericError;

/// A natural [`length`](Glue::length) plus a [`stretch`](Glue::stretch) and a [`shrink`](Glue::shrink)
/// component, each of which may be infinite.
///
/// [`Glue`] is [`Copy`]; copies never alias their source.
#[derive(Copy,Clone,PartialEq,Eq,Debug,Default,Hash)]
pub struct Glue {
    pub length:Dimen,
    pub stretch:GlueComponent,
    pub shrink:GlueComponent
}
impl Glue {
    pub const ZERO: Glue = Glue { length:Dimen::ZERO, stretch:GlueComponent::ZERO, shrink:GlueComponent::ZERO };

    pub fn new(length:Dimen,stretch:GlueComponent,shrink:GlueComponent) -> Self {
        Glue { length, stretch, shrink }
    }
    /// Glue without stretch and shrink
    pub fn from_dimen(length:Dimen) -> Self {
        Glue { length, stretch:GlueComponent::ZERO, shrink:GlueComponent::ZERO }
    }
    pub fn is_zero(&self) -> bool {
        self.length == Dimen::ZERO && self.stretch.is_zero() && self.shrink.is_zero()
    }

    /// Componentwise addition; see [`GlueComponent::add`] for the treatment of orders.
    pub fn add(&self,other:&Glue) -> Glue {
        Glue {
            length:self.length + other.length,
            stretch:self.stretch.add(&other.stretch),
            shrink:self.shrink.add(&other.shrink)
        }
    }
    /// Componentwise subtraction; see [`GlueComponent::subtract`].
    pub fn subtract(&self,other:&Glue) -> Glue {
        Glue {
            length:self.length - other.length,
            stretch:self.stretch.subtract(&other.stretch),
            shrink:self.shrink.subtract(&other.shrink)
        }
    }
    pub fn negate(&self) -> Glue {
        Glue { length:-self.length, stretch:self.stretch.negate(), shrink:self.shrink.negate() }
    }
    /// Multiply all three components by `nom/denom`.
    pub fn multiply_all(&self,nom:i64,denom:i64) -> Result<Glue,NumericError> {
        Ok(Glue {
            length:self.length.scale(nom,denom)?,
            stretch:self.stretch.multiply(nom,denom)?,
            shrink:self.shrink.multiply(nom,denom)?
        })
    }
    /// Multiply only the stretch component by `nom/denom`.
    pub fn multiply_stretch(&self,nom:i64,denom:i64) -> Result<Glue,NumericError> {
        Ok(Glue { stretch:self.stretch.multiply(nom,denom)?, ..*self })
    }
    /// Multiply only the shrink component by `nom/denom`.
    pub fn multiply_shrink(&self,nom:i64,denom:i64) -> Result<Glue,NumericError> {
        Ok(Glue { shrink:self.shrink.multiply(nom,denom)?, ..*self })
    }

    /// The tokens of `\the` applied to this glue; spells out exactly the same text as [`Display`].
    pub fn to_tokens(&self) -> Vec<Token> {
        let mut ret = self.length.to_tokens();
        if !self.stretch.is_zero() {
            ret.extend(tokens_from_str(" plus "));
            ret.extend(self.stretch.to_tokens());
        }
        if !self.shrink.is_zero() {
            ret.extend(tokens_from_str(" minus "));
            ret.extend(self.shrink.to_tokens());
        }
        ret
    }
}
impl Display for Glue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.length)?;
        if !self.stretch.is_zero() {
            write!(f," plus {}",self.stretch)?;
        }
        if !self.shrink.is_zero() {
            write!(f," minus {}",self.shrink)?;
        }
        Ok(())
    }
}
impl From<Dimen> for Glue {
    fn from(d: Dimen) -> Self { Glue::from_dimen(d) }
}

const SLOTS: usize = MAX_ORDER as usize + 1;

/// An accumulator for summing up many [`Glue`]s, e.g. the glue in a list that is to be packed.
/// Unlike [`Glue::add`], it keeps the sums of *all* orders of infinity, so that e.g. adding `1fil` and
/// then `-1fil` leaves the finite stretch intact.
#[derive(Copy,Clone,PartialEq,Eq,Debug,Default)]
pub struct WideGlue {
    pub length:Dimen,
    pub stretch:[i64;SLOTS],
    pub shrink:[i64;SLOTS]
}
impl WideGlue {
    pub fn new() -> Self { WideGlue::default() }
    pub fn add(&mut self,glue:&Glue) {
        self.length += glue.length;
        self.stretch[glue.stretch.order() as usize] += glue.stretch.value();
        self.shrink[glue.shrink.order() as usize] += glue.shrink.value();
    }
    pub fn subtract(&mut self,glue:&Glue) {
        self.length -= glue.length;
        self.stretch[glue.stretch.order() as usize] -= glue.stretch.value();
        self.shrink[glue.shrink.order() as usize] -= glue.shrink.value();
    }
    /// Add a fixed length, e.g. the width of a box
    pub fn add_length(&mut self,d:Dimen) { self.length += d }
    pub fn length(&self) -> Dimen { self.length }

    fn dominant(slots:&[i64;SLOTS]) -> GlueComponent {
        match slots.iter().rposition(|v| *v != 0) {
            Some(i) => GlueComponent::new(slots[i],i as u8),
            None => GlueComponent::ZERO
        }
    }
    /// The highest order with nonzero total stretch, and that total.
    pub fn stretch(&self) -> GlueComponent { Self::dominant(&self.stretch) }
    /// The highest order with nonzero total shrink, and that total.
    pub fn shrink(&self) -> GlueComponent { Self::dominant(&self.shrink) }
    /// The order of [`stretch`](Self::stretch); `0` if there is no stretch at all
    pub fn stretch_order(&self) -> u8 { self.stretch().order() }
    /// Collapse to a [`Glue`] keeping only the dominant order of stretch and shrink.
    pub fn to_glue(&self) -> Glue {
        Glue { length:self.length, stretch:self.stretch(), shrink:self.shrink() }
    }
}

/// How the glue in a packed box is set: all glue of order `order` stretches (or shrinks) by `ratio`
/// times its stretch (or shrink) component, glue of lower orders keeps its natural length.
#[derive(Copy,Clone,PartialEq,Debug,Default)]
pub enum GlueSet {
    #[default]
    Natural,
    Stretch{ratio:f32,order:u8},
    Shrink{ratio:f32,order:u8}
}

/// The result of distributing a difference in size over the glue of a list.
#[derive(Copy,Clone,PartialEq,Debug)]
pub struct Packing {
    pub glue_set:GlueSet,
    /// `0` if infinite glue takes up the difference
    pub badness:i64,
    /// How much the material exceeds its size even with all finite shrink used up
    pub overfull:Dimen
}
impl Packing {
    /// Set the glue `total` so that the list grows by `excess` (the target size minus the natural size;
    /// negative to shrink). Only the highest order of stretch or shrink present is used. Finite
    /// shrink never shrinks glue below its natural length minus its shrink component.
    pub fn new(excess:Dimen,total:&WideGlue) -> Self {
        let natural = Packing { glue_set:GlueSet::Natural, badness:0, overfull:Dimen::ZERO };
        if excess > Dimen::ZERO {
            let stretch = total.stretch();
            let badness = if stretch.order() == 0 { badness(excess.0,stretch.value()) } else { 0 };
            if stretch.value() == 0 {
                return Packing { badness, ..natural }
            }
            let ratio = (excess.0 as f64 / stretch.value() as f64) as f32;
            Packing { glue_set:GlueSet::Stretch { ratio, order:stretch.order() }, badness, ..natural }
        } else if excess < Dimen::ZERO {
            let shrink = total.shrink();
            if shrink.value() == 0 {
                let badness = if shrink.order() == 0 { 1_000_000 } else { 0 };
                return Packing { badness, overfull:-excess, ..natural }
            }
            if shrink.order() == 0 && shrink.value() < -excess.0 {
                return Packing {
                    glue_set:GlueSet::Shrink { ratio:1.0, order:0 },
                    badness:1_000_000,
                    overfull:-excess - Dimen(shrink.value())
                }
            }
            let badness = if shrink.order() == 0 { badness(-excess.0,shrink.value()) } else { 0 };
            let ratio = (-excess.0 as f64 / shrink.value() as f64) as f32;
            Packing { glue_set:GlueSet::Shrink { ratio, order:shrink.order() }, badness, ..natural }
        } else { natural }
    }
}
