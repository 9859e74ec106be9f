/*! Scanning numbers, dimensions and glue.

Decimal constants are converted to scaled points exactly as TeX does (see [`scaled_from_decimal`]); units
are converted by truncating multiply-then-divide with TeX's ratios, e.g. `1in = 7227/100pt`. The result
of scanning `1in` is therefore exactly `4736286sp`, not the nearest value.
*/
use arrayvec::ArrayVec;
use crate::debug_log;
use crate::engine::gullet::{get_keyword, skip_optional_space};
use crate::engine::mouth::TokenSource;
use crate::engine::options::TypesetterOptions;
use crate::tex::catcodes::CommandCode;
use crate::tex::numerics::{Dimen, GlueComponent, MAX_DIMEN, MAX_ORDER, ONE, scale, scaled_from_decimal};
use crate::tex::numerics::glue::Glue;
use crate::tex::tokens::Token;
use crate::utils::errors::NumericError;

fn digit(tk:&Token) -> Option<u8> {
    match tk {
        Token::Character{char,code:CommandCode::Other} => char.to_digit(10).map(|d| d as u8),
        _ => None
    }
}
fn is_other(tk:&Token,c:char) -> bool {
    matches!(tk,Token::Character{char,code:CommandCode::Other} if *char == c)
}
fn unit_char(tk:&Token) -> Option<char> {
    match tk {
        Token::Character{char,code:CommandCode::Letter | CommandCode::Other} => Some(char.to_ascii_lowercase()),
        _ => None
    }
}

/// Reads a sequence of `+` and `-` signs, possibly interspersed with spaces; returns whether the result is negative.
pub fn scan_signs<S:TokenSource + ?Sized>(source:&mut S) -> Result<bool,NumericError> {
    let mut negative = false;
    loop {
        source.skip_whitespace()?;
        match source.get_next()? {
            Some(tk) if is_other(&tk,'-') => negative = !negative,
            Some(tk) if is_other(&tk,'+') => (),
            Some(tk) => {
                source.requeue(tk);
                return Ok(negative)
            }
            None => return Ok(negative)
        }
    }
}

/// Reads an optionally signed decimal constant, e.g. `-1.5` or `7,777`, and returns its value in scaled
/// points. Only the first 17 digits after the decimal point are significant.
pub fn scan_decimal<S:TokenSource + ?Sized>(source:&mut S) -> Result<i64,NumericError> {
    let negative = scan_signs(source)?;
    let mut integer : i64 = 0;
    let mut fraction = ArrayVec::<u8,17>::new();
    let mut in_fraction = false;
    let mut found = false;
    loop {
        match source.get_next()? {
            None if !found => return Err(NumericError::EndOfFile),
            None => break,
            Some(tk) => match digit(&tk) {
                Some(d) if in_fraction => {
                    found = true;
                    let _ = fraction.try_push(d);
                }
                Some(d) => {
                    found = true;
                    integer = integer * 10 + i64::from(d);
                    if integer > i64::from(i32::MAX) {
                        return Err(NumericError::ArithmeticOverflow)
                    }
                }
                None if !in_fraction && (is_other(&tk,'.') || is_other(&tk,',')) => {
                    found = true;
                    in_fraction = true;
                }
                None => {
                    source.requeue(tk);
                    break
                }
            }
        }
    }
    if !found { return Err(NumericError::MissingNumber) }
    let value = scaled_from_decimal(integer,&fraction);
    Ok(if negative { -value } else { value })
}

/** Reads a unit and applies it to `value` (in scaled points, as returned by [`scan_decimal`]).

Supported are an optional `true` (multiplies by `\mag/1000`), the units `pt`, `pc`, `in`, `bp`, `cm`, `mm`,
`dm`, `km`, `dd`, `cc`, `nd`, `nc`, `sp`, the font dependent `em` and `ex`, and, if `allow_infinite`,
`fi`, `fil`, `fill` and `filll`. Unit letters may be given in any case. One space after the unit is consumed.

If the next tokens are not a unit, they are pushed back and [`NoSuitableUnit`](NumericError::NoSuitableUnit)
is returned. Infinite units where they are not allowed are an [`IllegalUnit`](NumericError::IllegalUnit).
*/
pub fn scan_unit<S:TokenSource + ?Sized>(source:&mut S,value:i64,options:&dyn TypesetterOptions,allow_infinite:bool)
    -> Result<GlueComponent,NumericError> {
    let mag = if get_keyword(source,"true")? { options.magnification() } else { 1000 };
    source.skip_whitespace()?;
    let first = match source.get_next()? {
        Some(tk) => tk,
        None => return Err(NumericError::NoSuitableUnit)
    };
    let c1 = match unit_char(&first) {
        Some(c) => c,
        None => {
            source.requeue(first);
            return Err(NumericError::NoSuitableUnit)
        }
    };
    let second = match source.get_next()? {
        Some(tk) => tk,
        None => {
            source.requeue(first);
            return Err(NumericError::NoSuitableUnit)
        }
    };
    let c2 = match unit_char(&second) {
        Some(c) => c,
        None => {
            source.push_tokens(&[first,second]);
            return Err(NumericError::NoSuitableUnit)
        }
    };
    let v = value;
    let converted = match (c1,c2) {
        ('f','i') => return scan_fil(source,value,allow_infinite),
        ('p','t') => v,
        ('p','c') => scale(v,12,1)?,
        ('i','n') => scale(v,7227,100)?,
        ('b','p') => scale(v,7227,7200)?,
        ('c','m') => scale(v,7227,254)?,
        ('m','m') => scale(v,7227,2540)?,
        ('d','m') => scale(v,72_270,254)?,
        ('k','m') => scale(v,722_700_000,254)?,
        ('d','d') => scale(v,1238,1157)?,
        ('c','c') => scale(v,14856,1157)?,
        ('n','d') => scale(v,4818,635)?,
        ('n','c') => scale(v,803,1270)?,
        ('s','p') => v / ONE,
        ('e','m') => scale(v,options.font().em().value(),ONE)?,
        ('e','x') => scale(v,options.font().ex().value(),ONE)?,
        _ => {
            source.push_tokens(&[first,second]);
            return Err(NumericError::NoSuitableUnit)
        }
    };
    let converted = if mag == 1000 { converted } else { scale(converted,mag,1000)? };
    skip_optional_space(source)?;
    Ok(GlueComponent::finite(converted))
}

// after `fi`: count the `l`s
fn scan_fil<S:TokenSource + ?Sized>(source:&mut S,value:i64,allow_infinite:bool) -> Result<GlueComponent,NumericError> {
    let mut order : u8 = 1;
    let mut unit = String::from("fi");
    while let Some(tk) = source.get_next()? {
        if tk.is_keyword_char('l') {
            order = order.saturating_add(1);
            unit.push('l');
        } else {
            source.requeue(tk);
            break
        }
    }
    if !allow_infinite {
        return Err(NumericError::IllegalUnit { unit })
    }
    if order > MAX_ORDER {
        return Err(NumericError::TooManyInfinities)
    }
    skip_optional_space(source)?;
    Ok(GlueComponent::new(value,order))
}

/// A decimal constant with a unit; the unit may be infinite if `allow_infinite`.
pub fn scan_glue_component<S:TokenSource + ?Sized>(source:&mut S,options:&dyn TypesetterOptions,allow_infinite:bool)
    -> Result<GlueComponent,NumericError> {
    let value = scan_decimal(source)?;
    let ret = match scan_unit(source,value,options,allow_infinite) {
        Ok(c) => c,
        Err(NumericError::NoSuitableUnit) => {
            let unit = source.peek()?.map(|t| t.to_string()).unwrap_or_default();
            return Err(NumericError::IllegalUnit { unit })
        }
        Err(e) => return Err(e)
    };
    if ret.value().abs() > MAX_DIMEN {
        return Err(NumericError::DimensionTooLarge)
    }
    debug_log!(trace=>"Scanned {}",ret);
    Ok(ret)
}

/// A decimal constant with a finite unit.
pub fn scan_dimen<S:TokenSource + ?Sized>(source:&mut S,options:&dyn TypesetterOptions) -> Result<Dimen,NumericError> {
    scan_glue_component(source,options,false).map(|c| Dimen(c.value()))
}

/// A dimension, optionally followed by `plus` and a (possibly infinite) stretch component and
/// `minus` and a (possibly infinite) shrink component.
pub fn scan_glue<S:TokenSource + ?Sized>(source:&mut S,options:&dyn TypesetterOptions) -> Result<Glue,NumericError> {
    let length = scan_dimen(source,options)?;
    let stretch = if get_keyword(source,"plus")? {
        scan_glue_component(source,options,true)?
    } else { GlueComponent::ZERO };
    let shrink = if get_keyword(source,"minus")? {
        scan_glue_component(source,options,true)?
    } else { GlueComponent::ZERO };
    Ok(Glue::new(length,stretch,shrink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fontsystem::SimpleFont;
    use crate::engine::mouth::pretokenized::TokenList;
    use crate::engine::options::ParameterTable;
    use crate::tex::tokens::{letters_from_str, display_tokens};
    use crate::utils::Ptr;

    fn dimen(s:&str) -> Result<i64,NumericError> {
        let mut src = TokenList::new(letters_from_str(s));
        scan_dimen(&mut src,&ParameterTable::default()).map(|d| d.value())
    }

    #[test]
    fn unit_conversions() {
        assert_eq!(dimen("1in"),Ok(4736286));
        assert_eq!(dimen("1pt"),Ok(65536));
        assert_eq!(dimen("1cm"),Ok(1864679));
        assert_eq!(dimen("1.33cm"),Ok(2480027));
        assert_eq!(dimen("1dd"),Ok(70124));
        assert_eq!(dimen("1.25pc"),Ok(983040));
        assert_eq!(dimen("1.25bp"),Ok(82227));
        assert_eq!(dimen("7,777cc"),Ok(6544254));
        assert_eq!(dimen("100sp"),Ok(100));
        assert_eq!(dimen("1 PT"),Ok(65536));
        assert_eq!(dimen("10mm"),dimen("1cm"));
        assert_eq!(dimen("1dm"),Ok(18646798));
        assert_eq!(dimen("1km"),Err(NumericError::DimensionTooLarge));
        assert_eq!(dimen("1nd"),Ok(65536 * 4818 / 635));
        assert_eq!(dimen("1nc"),Ok(65536 * 803 / 1270));
    }

    #[test]
    fn signs_and_fractions() {
        assert_eq!(dimen("- -1pt"),Ok(65536));
        assert_eq!(dimen("-+ .5pt"),Ok(-32768));
        assert_eq!(dimen("-1in"),Ok(-4736286));
        assert_eq!(dimen("pt"),Err(NumericError::MissingNumber));
        assert_eq!(dimen(""),Err(NumericError::EndOfFile));
    }

    #[test]
    fn font_and_magnification() {
        let font = SimpleFont::new("cmr10").with_dim(6,Dimen::from_pt(10)).with_dim(5,Dimen(282168));
        let options = ParameterTable::new(Ptr::new(font)).with_count("mag",2000);
        let mut src = TokenList::new(letters_from_str("2em 1ex 1truept 1true in"));
        assert_eq!(scan_dimen(&mut src,&options),Ok(Dimen::from_pt(20)));
        assert_eq!(scan_dimen(&mut src,&options),Ok(Dimen(282168)));
        assert_eq!(scan_dimen(&mut src,&options),Ok(Dimen::from_pt(2)));
        assert_eq!(scan_dimen(&mut src,&options),Ok(Dimen(4736286 * 2)));
    }

    #[test]
    fn infinite_units() {
        let options = ParameterTable::default();
        let mut src = TokenList::new(letters_from_str("1fi 2fil 3FILL -4filll 1fillll"));
        for (value,order) in [(1,1),(2,2),(3,3),(-4,4)] {
            assert_eq!(scan_glue_component(&mut src,&options,true),Ok(GlueComponent::new(value * ONE,order)));
        }
        assert_eq!(scan_glue_component(&mut src,&options,true),Err(NumericError::TooManyInfinities));
        assert_eq!(dimen("1fil"),Err(NumericError::IllegalUnit{unit:"fil".to_string()}));
    }

    #[test]
    fn no_suitable_unit() {
        let options = ParameterTable::default();
        let mut src = TokenList::new(letters_from_str("xy z"));
        assert_eq!(scan_unit(&mut src,ONE,&options,false),Err(NumericError::NoSuitableUnit));
        assert_eq!(display_tokens(&src.remaining()),"xy z");
        assert_eq!(dimen("3xy"),Err(NumericError::IllegalUnit{unit:"x".to_string()}));
    }

    #[test]
    fn too_large() {
        assert_eq!(dimen("16383.99998pt"),Ok(MAX_DIMEN));
        assert_eq!(dimen("16384pt"),Err(NumericError::DimensionTooLarge));
        assert_eq!(dimen("-20000pt"),Err(NumericError::DimensionTooLarge));
    }

    #[test]
    fn glue() {
        let options = ParameterTable::default();
        let mut src = TokenList::new(letters_from_str("2pt plus 1fil minus 3pt x"));
        let g = scan_glue(&mut src,&options).unwrap();
        assert_eq!(g.to_string(),"2.0pt plus 1.0fil minus 3.0pt");
        assert_eq!(display_tokens(&src.remaining()),"x");
        let mut src = TokenList::new(letters_from_str("1pt minus 2fill"));
        assert_eq!(scan_glue(&mut src,&options).unwrap().to_string(),"1.0pt minus 2.0fill");
    }

    #[test]
    fn render_then_reparse() {
        let options = ParameterTable::default();
        for v in 0..1000 {
            let mut src = TokenList::new(Dimen(v).to_tokens());
            assert_eq!(scan_dimen(&mut src,&options),Ok(Dimen(v)));
        }
    }
}
