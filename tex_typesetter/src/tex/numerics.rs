/*! Fixed-point arithmetic.

All lengths are integers in *scaled points* (`sp`), where `65536sp = 1pt` ([`ONE`]). A [`GlueComponent`]
additionally carries an *order of infinity*; a [`Dimen`] is always finite.

Decimal rendering reproduces TeX's `print_scaled` exactly:

```rust
use tex_typesetter::tex::numerics::{Dimen, GlueComponent};

assert_eq!(Dimen(1).to_string(),"0.00002pt");
assert_eq!(Dimen(32768).to_string(),"0.5pt");
assert_eq!(GlueComponent::new(65536,2).to_string(),"1.0fil");
```
*/

pub mod glue;

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use crate::tex::tokens::Token;
use crate::utils::errors::NumericError;

/// `1pt` in scaled points.
pub const ONE: i64 = 65536;
/// The highest order of infinity (`filll`).
pub const MAX_ORDER: u8 = 4;
/// The largest absolute value of a dimension, `16383.99999pt`.
pub const MAX_DIMEN: i64 = 0x3FFF_FFFF;

/// Emits the decimal representation of a scaled value (without unit) character by character:
/// sign, integer part, `.`, and then as many fractional digits as are needed to identify `value` uniquely
/// (at most five).
pub fn write_scaled<F:FnMut(char)>(value:i64,mut f:F) {
    if value < 0 { f('-') }
    let abs = value.unsigned_abs();
    for c in (abs / ONE as u64).to_string().chars() { f(c) }
    f('.');
    let mut val = 10 * (abs % ONE as u64) as i64 + 5;
    let mut delta = 10;
    loop {
        if delta > ONE {
            // round the last digit
            val = val + 0o100000 - 50000;
        }
        f(char::from(b'0' + (val / ONE) as u8));
        val = 10 * (val % ONE);
        delta *= 10;
        if val <= delta { break }
    }
}

/// Computes the scaled value of the decimal number `integer.digits`, rounded as in TeX §102.
/// Only the first 17 fractional digits are significant.
pub fn scaled_from_decimal(integer:i64,digits:&[u8]) -> i64 {
    let mut a : i64 = 0;
    for d in digits.iter().take(17).rev() {
        a = (a + i64::from(*d) * 2 * ONE) / 10;
    }
    integer * ONE + (a + 1) / 2
}

/// A length with an order of infinity: a finite length in scaled points if [`order`](Self::order) is `0`,
/// otherwise a coefficient of `fi`, `fil`, `fill` or `filll`.
///
/// Components are ordered lexicographically by `(order, value)`: any infinite component is larger than
/// every finite one.
#[derive(Copy,Clone,PartialEq,Eq,Debug,Default,Hash)]
pub struct GlueComponent {
    value:i64,
    order:u8
}
impl GlueComponent {
    pub const ZERO: GlueComponent = GlueComponent { value:0, order:0 };

    /// `order` must be at most [`MAX_ORDER`].
    pub fn new(value:i64,order:u8) -> Self {
        debug_assert!(order <= MAX_ORDER,"illegal order {}",order);
        GlueComponent { value, order:order.min(MAX_ORDER) }
    }
    /// A finite component
    pub fn finite(value:i64) -> Self { GlueComponent { value, order:0 } }
    pub fn value(&self) -> i64 { self.value }
    pub fn order(&self) -> u8 { self.order }
    pub fn is_zero(&self) -> bool { self.value == 0 }

    /// Add `other`: if both have the same order the values add up; otherwise the one with the higher
    /// order wins and the other is discarded.
    pub fn add(&self,other:&GlueComponent) -> GlueComponent {
        match self.order.cmp(&other.order) {
            Ordering::Equal => GlueComponent { value:self.value + other.value, order:self.order },
            Ordering::Less => *other,
            Ordering::Greater => *self
        }
    }
    /// Like [`add`](Self::add), with `other` negated.
    pub fn subtract(&self,other:&GlueComponent) -> GlueComponent {
        self.add(&other.negate())
    }
    pub fn negate(&self) -> GlueComponent {
        GlueComponent { value:-self.value, order:self.order }
    }
    /// Multiply by `nom/denom`, truncating.
    pub fn multiply(&self,nom:i64,denom:i64) -> Result<GlueComponent,NumericError> {
        Ok(GlueComponent { value:scale(self.value,nom,denom)?, order:self.order })
    }

    /// Render with the unit `c1c2` for finite components, e.g. `('m','u')`.
    pub fn to_string_with_unit(&self,c1:char,c2:char) -> String {
        let mut ret = String::new();
        self.render(c1,c2,|c,_| ret.push(c));
        ret
    }
    /// The tokens of the rendered value: [`Other`](crate::tex::catcodes::CommandCode::Other) tokens for sign,
    /// digits and `.`, and [`Letter`](crate::tex::catcodes::CommandCode::Letter) tokens for the unit.
    pub fn to_tokens_with_unit(&self,c1:char,c2:char) -> Vec<Token> {
        let mut ret = Vec::new();
        self.render(c1,c2,|c,unit| ret.push(if unit { Token::letter(c) } else { Token::other(c) }));
        ret
    }
    /// [`to_tokens_with_unit`](Self::to_tokens_with_unit) with `pt`.
    pub fn to_tokens(&self) -> Vec<Token> { self.to_tokens_with_unit('p','t') }

    fn render<F:FnMut(char,bool)>(&self,c1:char,c2:char,mut f:F) {
        write_scaled(self.value,|c| f(c,false));
        if self.order == 0 {
            f(c1,true);
            f(c2,true);
        } else {
            f('f',true);
            f('i',true);
            for _ in 1..self.order { f('l',true) }
        }
    }
}
impl PartialOrd for GlueComponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl Ord for GlueComponent {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.order,self.value).cmp(&(other.order,other.value))
    }
}
impl Display for GlueComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        let mut ret = Ok(());
        self.render('p','t',|c,_| if ret.is_ok() { ret = f.write_char(c) });
        ret
    }
}
impl From<Dimen> for GlueComponent {
    fn from(d: Dimen) -> Self { GlueComponent::finite(d.0) }
}

/// The badness reported for glue that cannot stretch at all
pub const INF_BAD: i64 = 10000;

/// How bad it is to stretch or shrink glue with total stretch or shrink `s` by `t`: roughly
/// `100 * (t/s)^3`, and at most [`INF_BAD`].
pub fn badness(t:i64,s:i64) -> i64 {
    if t == 0 { return 0 }
    if s <= 0 { return INF_BAD }
    let r = if t <= 7_230_584 {
        (t * 297) / s
    } else if s >= 1_663_497 {
        t / (s / 297)
    } else { t };
    if r > 1290 { INF_BAD } else { (r * r * r + 0x20000) / 0x40000 }
}

/// `value * nom / denom` with truncating division.
pub fn scale(value:i64,nom:i64,denom:i64) -> Result<i64,NumericError> {
    if denom == 0 { return Err(NumericError::ArithmeticOverflow) }
    value.checked_mul(nom).map(|v| v / denom).ok_or(NumericError::ArithmeticOverflow)
}

/// A finite length in scaled points.
#[derive(Copy,Clone,PartialEq,Eq,PartialOrd,Ord,Debug,Default,Hash)]
pub struct Dimen(pub i64);
impl Dimen {
    pub const ZERO: Dimen = Dimen(0);
    /// `n` points
    pub fn from_pt(n:i64) -> Self { Dimen(n * ONE) }
    pub fn value(&self) -> i64 { self.0 }
    /// Multiply by `nom/denom`, truncating.
    pub fn scale(&self,nom:i64,denom:i64) -> Result<Dimen,NumericError> {
        Ok(Dimen(scale(self.0,nom,denom)?))
    }
    /// The tokens of `\the` applied to this dimension
    pub fn to_tokens(&self) -> Vec<Token> { GlueComponent::from(*self).to_tokens() }
}
impl Display for Dimen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&GlueComponent::from(*self),f)
    }
}
impl std::ops::Add for Dimen {
    type Output = Dimen;
    fn add(self, rhs: Self) -> Self::Output { Dimen(self.0 + rhs.0) }
}
impl std::ops::AddAssign for Dimen {
    fn add_assign(&mut self, rhs: Self) { self.0 += rhs.0 }
}
impl std::ops::Sub for Dimen {
    type Output = Dimen;
    fn sub(self, rhs: Self) -> Self::Output { Dimen(self.0 - rhs.0) }
}
impl std::ops::SubAssign for Dimen {
    fn sub_assign(&mut self, rhs: Self) { self.0 -= rhs.0 }
}
impl std::ops::Neg for Dimen {
    type Output = Dimen;
    fn neg(self) -> Self::Output { Dimen(-self.0) }
}
impl std::ops::Mul<i64> for Dimen {
    type Output = Dimen;
    fn mul(self, rhs: i64) -> Self::Output { Dimen(self.0 * rhs) }
}
impl std::iter::Sum for Dimen {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        iter.fold(Dimen::ZERO,|a,b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tex::tokens::display_tokens;

    #[test]
    fn rendering() {
        assert_eq!(Dimen(0).to_string(),"0.0pt");
        assert_eq!(Dimen(1).to_string(),"0.00002pt");
        assert_eq!(Dimen(999).to_string(),"0.01524pt");
        assert_eq!(Dimen(32768).to_string(),"0.5pt");
        assert_eq!(Dimen::from_pt(2).to_string(),"2.0pt");
        assert_eq!(Dimen(-65536 * 3 - 32768).to_string(),"-3.5pt");
        assert_eq!(Dimen(MAX_DIMEN).to_string(),"16383.99998pt");
        assert_eq!(GlueComponent::new(ONE,1).to_string(),"1.0fi");
        assert_eq!(GlueComponent::new(-ONE,4).to_string(),"-1.0filll");
        assert_eq!(GlueComponent::finite(ONE).to_string_with_unit('m','u'),"1.0mu");
    }

    #[test]
    fn badnesses() {
        assert_eq!(badness(0,0),0);
        assert_eq!(badness(ONE,0),INF_BAD);
        assert_eq!(badness(ONE,ONE),100);
        assert_eq!(badness(ONE,2 * ONE),12);
        assert_eq!(badness(10 * ONE,ONE),INF_BAD);
    }

    #[test]
    fn extreme_values() {
        let render = |v:i64| { let mut s = String::new(); write_scaled(v,|c| s.push(c)); s };
        assert_eq!(render(i64::MIN),"-140737488355328.0");
        assert_eq!(render(i64::MAX),"140737488355327.99998");
        assert_eq!(render(-ONE / 2),"-0.5");
    }

    #[test]
    fn string_and_tokens_agree() {
        for v in [0,1,7,999,32768,65535,65536,-123456,1_000_000_000] {
            for order in 0..=MAX_ORDER {
                let c = GlueComponent::new(v,order);
                assert_eq!(display_tokens(&c.to_tokens()),c.to_string());
            }
        }
        let tks = GlueComponent::finite(ONE).to_tokens();
        assert_eq!(tks[0],Token::other('1'));
        assert_eq!(tks[3],Token::letter('p'));
    }

    #[test]
    fn render_then_reparse() {
        for v in 0..1000i64 {
            let s = Dimen(v).to_string();
            let s = s.strip_suffix("pt").unwrap();
            let (int,frac) = s.split_once('.').unwrap();
            let digits : Vec<u8> = frac.bytes().map(|b| b - b'0').collect();
            assert_eq!(scaled_from_decimal(int.parse().unwrap(),&digits),v,"{}",s);
        }
    }

    #[test]
    fn decimal_scaling() {
        assert_eq!(scaled_from_decimal(1,&[]),ONE);
        assert_eq!(scaled_from_decimal(0,&[5]),32768);
        assert_eq!(scaled_from_decimal(1,&[3,3]),87163);
        assert_eq!(scaled_from_decimal(0,&[0,0,0,0,1]),1);
    }

    #[test]
    fn order_dominance() {
        let finite = GlueComponent::finite(5 * ONE);
        let fil = GlueComponent::new(2 * ONE,2);
        let fill = GlueComponent::new(ONE,3);
        assert_eq!(finite.add(&fil),fil);
        assert_eq!(fil.add(&finite),fil);
        assert_eq!(fil.add(&fill),fill);
        assert_eq!(fil.add(&fil),GlueComponent::new(4 * ONE,2));
        assert_eq!(fil.subtract(&finite),fil);
        assert_eq!(finite.subtract(&fil),GlueComponent::new(-2 * ONE,2));
        for a in [finite,fil,fill] {
            for b in [finite,fil,fill] {
                assert_eq!(a.add(&b).order(),a.order().max(b.order()));
            }
        }
    }

    #[test]
    fn comparison() {
        let big = GlueComponent::finite(1_000_000 * ONE);
        let tiny_fil = GlueComponent::new(1,2);
        assert!(tiny_fil > big);
        assert!(GlueComponent::new(1,3) > GlueComponent::new(1000,2));
        assert!(GlueComponent::finite(1) < GlueComponent::finite(2));
    }

    #[test]
    fn multiplication() {
        let c = GlueComponent::new(10,1);
        assert_eq!(c.multiply(3,4).unwrap(),GlueComponent::new(7,1));
        assert_eq!(c.multiply(1,0),Err(NumericError::ArithmeticOverflow));
        assert_eq!(Dimen(i64::MAX).scale(2,1),Err(NumericError::ArithmeticOverflow));
        assert_eq!(Dimen(-7).scale(1,2).unwrap(),Dimen(-3));
    }
}
