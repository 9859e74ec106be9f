//! The modes a typesetter can be in.

use std::fmt::Display;

/// Every list maker is in one of these modes
#[derive(Copy,Clone,PartialEq,Eq,Debug,Hash,Default)]
pub enum Mode {
    /// initial mode outside of paragraphs and other boxes
    #[default]
    Vertical,
    /// mode inside of `\vbox` and similar boxes
    InnerVertical,
    /// mode inside of paragraphs
    Horizontal,
    /// mode inside of `\hbox` and similar boxes, and in alignment cells
    RestrictedHorizontal,
    /// mode inside of inline math
    Math,
    /// mode inside of display math
    DisplayMath,
    /// mode inside of `\halign`, between cells
    Alignment
}

impl Mode {
    pub fn is_vertical(&self) -> bool {
        matches!(self,Mode::Vertical | Mode::InnerVertical)
    }
    pub fn is_horizontal(&self) -> bool {
        matches!(self,Mode::Horizontal | Mode::RestrictedHorizontal)
    }
    pub fn is_math(&self) -> bool {
        matches!(self,Mode::Math | Mode::DisplayMath)
    }
}
impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Mode::*;
        write!(f,"{}",match self {
            Vertical => "vertical",
            InnerVertical => "internal vertical",
            Horizontal => "horizontal",
            RestrictedHorizontal => "restricted horizontal",
            Math => "math",
            DisplayMath => "display math",
            Alignment => "alignment"
        })
    }
}
