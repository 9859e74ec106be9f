/*!
    Category codes for characters, implemented as the enum [`CategoryCode`]. A [`CategoryCodeScheme`]
    maps each `char` to a [`CategoryCode`].
*/

use std::fmt::Formatter;
use lazy_static::lazy_static;
use crate::utils::HMap;

/** The category code of a character.

To convert between [`CategoryCode`]s and their numerical values (as [`u8`]), use [`CategoryCode::try_from`]
and [`CategoryCode::into`], respectively.

| Code | Variant         | usually          |
|------|-----------------|------------------|
| 0    | `Escape`        | `\`              |
| 1    | `BeginGroup`    | `{`              |
| 2    | `EndGroup`      | `}`              |
| 3    | `MathShift`     | `$`              |
| 4    | `AlignmentTab`  | `&`              |
| 5    | `EOL`           | `\r`             |
| 6    | `Parameter`     | `#`              |
| 7    | `Superscript`   | `^`              |
| 8    | `Subscript`     | `_`              |
| 9    | `Ignored`       | `\0`             |
| 10   | `Space`         | ` `              |
| 11   | `Letter`        | `a-z`,`A-Z`      |
| 12   | `Other`         | everything else  |
| 13   | `Active`        | `~`              |
| 14   | `Comment`       | `%`              |
| 15   | `Invalid`       | `DEL`            |

# Example
```rust
use tex_typesetter::tex::catcodes::CategoryCode;

let cat = CategoryCode::BeginGroup;
let num : u8 = cat.into();
assert_eq!(num,1);
let cat2 = CategoryCode::try_from(1).unwrap();
assert_eq!(cat2,cat);
```
 */
#[derive(Copy,PartialEq,Eq,Clone,Hash,PartialOrd,Ord,Default)]
pub enum CategoryCode {
    /// Escape character (0); usually `\`
    Escape,
    /// Begin group character (1); usually `{`
    BeginGroup,
    /// End group character (2); usually `}`
    EndGroup,
    /// Math shift character (3); usually `$`
    MathShift,
    /// Alignment tab character (4); usually `&`
    AlignmentTab,
    /// End of line character (5); usually `\r`
    EOL,
    /// Parameter character (6); usually `#`
    Parameter,
    /// Superscript character (7); usually `^`
    Superscript,
    /// Subscript character (8); usually `_`
    Subscript,
    /// Ignored character (9)
    Ignored,
    /// Space character (10); usually ` `
    Space,
    /// Letter character (11), usually a-z and A-Z
    Letter,
    /// Other character (12), usually e.g. `@`, `!`, `?`, etc.
    #[default]
    Other,
    /// Active character (13); usually `~`
    Active,
    /// Comment character (14); usually `%`
    Comment,
    /// Invalid character (15)
    Invalid
}

impl std::fmt::Debug for CategoryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self,f)
    }
}
impl std::fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use CategoryCode::*;
        write!(f,"{}",match self {
            Escape => "Escape",
            BeginGroup => "BeginGroup",
            EndGroup => "EndGroup",
            MathShift => "MathShift",
            AlignmentTab => "AlignmentTab",
            EOL => "EOL",
            Parameter => "Parameter",
            Superscript => "Superscript",
            Subscript => "Subscript",
            Ignored => "Ignored",
            Space => "Space",
            Letter => "Letter",
            Other => "Other",
            Active => "Active",
            Comment => "Comment",
            Invalid => "Invalid"
        })
    }
}

impl From<CategoryCode> for u8 {
    fn from(cc: CategoryCode) -> u8 {
        use CategoryCode::*;
        match cc {
            Escape => 0,
            BeginGroup => 1,
            EndGroup => 2,
            MathShift => 3,
            AlignmentTab => 4,
            EOL => 5,
            Parameter => 6,
            Superscript => 7,
            Subscript => 8,
            Ignored => 9,
            Space => 10,
            Letter => 11,
            Other => 12,
            Active => 13,
            Comment => 14,
            Invalid => 15
        }
    }
}

impl TryFrom<u8> for CategoryCode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use CategoryCode::*;
        Ok(match value {
            0 => Escape,
            1 => BeginGroup,
            2 => EndGroup,
            3 => MathShift,
            4 => AlignmentTab,
            5 => EOL,
            6 => Parameter,
            7 => Superscript,
            8 => Subscript,
            9 => Ignored,
            10 => Space,
            11 => Letter,
            12 => Other,
            13 => Active,
            14 => Comment,
            15 => Invalid,
            _ => return Err(())
        })
    }
}

/** The category codes that can occur in a [`Token`](crate::tex::tokens::Token). [`Escape`](CategoryCode::Escape)
    characters produce control sequences, and [`EOL`](CategoryCode::EOL), [`Ignored`](CategoryCode::Ignored),
    [`Comment`](CategoryCode::Comment) and [`Invalid`](CategoryCode::Invalid) characters never survive tokenization.
*/
#[derive(Copy,PartialEq,Eq,Clone,Debug,Hash)]
pub enum CommandCode {
    BeginGroup,
    EndGroup,
    MathShift,
    AlignmentTab,
    Parameter,
    Superscript,
    Subscript,
    Space,
    Letter,
    Other,
    Active
}
impl From<CommandCode> for CategoryCode {
    fn from(cc: CommandCode) -> CategoryCode {
        match cc {
            CommandCode::BeginGroup => CategoryCode::BeginGroup,
            CommandCode::EndGroup => CategoryCode::EndGroup,
            CommandCode::MathShift => CategoryCode::MathShift,
            CommandCode::AlignmentTab => CategoryCode::AlignmentTab,
            CommandCode::Parameter => CategoryCode::Parameter,
            CommandCode::Superscript => CategoryCode::Superscript,
            CommandCode::Subscript => CategoryCode::Subscript,
            CommandCode::Space => CategoryCode::Space,
            CommandCode::Letter => CategoryCode::Letter,
            CommandCode::Other => CategoryCode::Other,
            CommandCode::Active => CategoryCode::Active
        }
    }
}
impl TryFrom<CategoryCode> for CommandCode {
    type Error = CategoryCode;
    fn try_from(cc: CategoryCode) -> Result<Self, Self::Error> {
        Ok(match cc {
            CategoryCode::BeginGroup => CommandCode::BeginGroup,
            CategoryCode::EndGroup => CommandCode::EndGroup,
            CategoryCode::MathShift => CommandCode::MathShift,
            CategoryCode::AlignmentTab => CommandCode::AlignmentTab,
            CategoryCode::Parameter => CommandCode::Parameter,
            CategoryCode::Superscript => CommandCode::Superscript,
            CategoryCode::Subscript => CommandCode::Subscript,
            CategoryCode::Space => CommandCode::Space,
            CategoryCode::Letter => CommandCode::Letter,
            CategoryCode::Other => CommandCode::Other,
            CategoryCode::Active => CommandCode::Active,
            o => return Err(o)
        })
    }
}

/** A [`CategoryCodeScheme`] assigns a [`CategoryCode`] to each character. The first 256 code points are
    stored in an array, all others in a (usually empty) map; unassigned characters are [`Other`](CategoryCode::Other).

    A scheme is owned by whoever owns the interpreter state; it can be cloned freely,
    but is never shared mutably between independent documents.
 */
#[derive(Clone,Debug,PartialEq)]
pub struct CategoryCodeScheme {
    latin1:[CategoryCode;256],
    higher:HMap<char,CategoryCode>
}
impl CategoryCodeScheme {
    /// The [`CategoryCode`] of `c` under this scheme.
    pub fn get(&self,c:char) -> CategoryCode {
        match u8::try_from(c) {
            Ok(b) => self.latin1[b as usize],
            Err(_) => self.higher.get(&c).copied().unwrap_or_default()
        }
    }
    /// Assign a new [`CategoryCode`] to `c`.
    pub fn set(&mut self,c:char,cc:CategoryCode) {
        match u8::try_from(c) {
            Ok(b) => self.latin1[b as usize] = cc,
            Err(_) if cc == CategoryCode::Other => { self.higher.remove(&c); }
            Err(_) => { self.higher.insert(c,cc); }
        }
    }
    /// The scheme of INITEX (see [`STARTING_SCHEME`]).
    pub fn starting() -> Self {
        CategoryCodeScheme { latin1:*STARTING_SCHEME, higher:HMap::default() }
    }
}
impl Default for CategoryCodeScheme {
    /// The scheme of plain TeX (see [`DEFAULT_SCHEME`]).
    fn default() -> Self {
        CategoryCodeScheme { latin1:*DEFAULT_SCHEME, higher:HMap::default() }
    }
}
impl From<[CategoryCode;256]> for CategoryCodeScheme {
    fn from(latin1: [CategoryCode;256]) -> Self {
        CategoryCodeScheme { latin1, higher:HMap::default() }
    }
}

lazy_static! {
    /// The starting category code scheme of INITEX: `\` is [`Escape`](CategoryCode::Escape),
    /// `%` is [`Comment`](CategoryCode::Comment), `\r` is [`EOL`](CategoryCode::EOL),
    /// ` ` is [`Space`](CategoryCode::Space), `\0` is [`Ignored`](CategoryCode::Ignored),
    /// `DEL` is [`Invalid`](CategoryCode::Invalid), the ASCII letters are [`Letter`](CategoryCode::Letter)s
    /// and everything else is [`Other`](CategoryCode::Other).
    pub static ref STARTING_SCHEME : [CategoryCode;256] = array_init::array_init(|i| {
        match i as u8 {
            b'\\' => CategoryCode::Escape,
            b'%' => CategoryCode::Comment,
            b'\r' => CategoryCode::EOL,
            b' ' => CategoryCode::Space,
            0 => CategoryCode::Ignored,
            127 => CategoryCode::Invalid,
            c if c.is_ascii_alphabetic() => CategoryCode::Letter,
            _ => CategoryCode::Other
        }
    });

    /// The category code scheme of plain TeX: [`STARTING_SCHEME`], plus
    /// `{`,`}`,`$`,`&`,`#`,`^`,`_`,`~` and `^^I` (tab) as [`Space`](CategoryCode::Space).
    pub static ref DEFAULT_SCHEME : [CategoryCode;256] = {
        let mut scheme = *STARTING_SCHEME;
        scheme[b'{' as usize] = CategoryCode::BeginGroup;
        scheme[b'}' as usize] = CategoryCode::EndGroup;
        scheme[b'$' as usize] = CategoryCode::MathShift;
        scheme[b'&' as usize] = CategoryCode::AlignmentTab;
        scheme[b'#' as usize] = CategoryCode::Parameter;
        scheme[b'^' as usize] = CategoryCode::Superscript;
        scheme[b'_' as usize] = CategoryCode::Subscript;
        scheme[b'~' as usize] = CategoryCode::Active;
        scheme[9] = CategoryCode::Space;
        scheme
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_roundtrip() {
        for i in 0u8..16 {
            let cc = CategoryCode::try_from(i).unwrap();
            assert_eq!(u8::from(cc),i);
        }
        assert!(CategoryCode::try_from(16).is_err());
    }

    #[test]
    fn default_scheme() {
        let scheme = CategoryCodeScheme::default();
        assert_eq!(scheme.get('\\'),CategoryCode::Escape);
        assert_eq!(scheme.get('a'),CategoryCode::Letter);
        assert_eq!(scheme.get('Z'),CategoryCode::Letter);
        assert_eq!(scheme.get('%'),CategoryCode::Comment);
        assert_eq!(scheme.get('~'),CategoryCode::Active);
        assert_eq!(scheme.get('\r'),CategoryCode::EOL);
        assert_eq!(scheme.get('1'),CategoryCode::Other);
        assert_eq!(scheme.get('ä'),CategoryCode::Other);
        assert_eq!(scheme.get('λ'),CategoryCode::Other);
        assert_eq!(CategoryCodeScheme::starting().get('{'),CategoryCode::Other);
    }

    #[test]
    fn reassignment() {
        let mut scheme = CategoryCodeScheme::default();
        scheme.set('@',CategoryCode::Letter);
        scheme.set('λ',CategoryCode::Letter);
        assert_eq!(scheme.get('@'),CategoryCode::Letter);
        assert_eq!(scheme.get('λ'),CategoryCode::Letter);
        scheme.set('λ',CategoryCode::Other);
        assert_eq!(scheme.get('λ'),CategoryCode::Other);
        // a fresh scheme is unaffected
        assert_eq!(CategoryCodeScheme::default().get('@'),CategoryCode::Other);
    }

    #[test]
    fn command_codes() {
        assert_eq!(CommandCode::try_from(CategoryCode::Letter),Ok(CommandCode::Letter));
        assert_eq!(CommandCode::try_from(CategoryCode::Comment),Err(CategoryCode::Comment));
        assert_eq!(CategoryCode::from(CommandCode::Active),CategoryCode::Active);
    }
}
