//! CEA-608 command elements.

use std::fmt;

/// Global control command such as `{EDM}` or `{RU2}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalControl {
    pub channel: &'static str,
    pub mnemonic: &'static str,
}

impl fmt::Display for GlobalControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.mnemonic)
    }
}

/// The half of a PAC selected by its style/address bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacPlacement {
    /// Style code: foreground colour or italics
    Color(&'static str),
    /// Address code: indent to this cursor column
    Cursor(u8),
}

/// Preamble Address Code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreambleAccess {
    pub channel: &'static str,
    pub underlined: bool,
    pub row: u8,
    pub placement: PacPlacement,
}

impl PreambleAccess {
    pub fn color(&self) -> Option<&'static str> {
        match self.placement {
            PacPlacement::Color(color) => Some(color),
            PacPlacement::Cursor(_) => None,
        }
    }

    pub fn cursor_column(&self) -> Option<u8> {
        match self.placement {
            PacPlacement::Cursor(column) => Some(column),
            PacPlacement::Color(_) => None,
        }
    }
}

impl fmt::Display for PreambleAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placement {
            PacPlacement::Cursor(column) => write!(f, "{{R{}:C{}", self.row, column)?,
            PacPlacement::Color(color) => write!(f, "{{R{}:{}", self.row, color)?,
        }
        if self.underlined {
            f.write_str(":UL")?;
        }
        f.write_str("}")
    }
}

/// Tab offset of 0-3 columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabOffset {
    pub channel: &'static str,
    pub offset: u8,
}

impl fmt::Display for TabOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{TO{}}}", self.offset)
    }
}

/// What a mid-row code changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidRowAttribute {
    Background(&'static str),
    Foreground(&'static str),
}

/// Mid-row style change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidRowStyle {
    pub channel: &'static str,
    pub partially_transparent: bool,
    pub underlined: bool,
    pub attribute: MidRowAttribute,
}

impl MidRowStyle {
    pub fn background_color(&self) -> Option<&'static str> {
        match self.attribute {
            MidRowAttribute::Background(color) => Some(color),
            MidRowAttribute::Foreground(_) => None,
        }
    }

    pub fn foreground_style(&self) -> Option<&'static str> {
        match self.attribute {
            MidRowAttribute::Foreground(style) => Some(style),
            MidRowAttribute::Background(_) => None,
        }
    }
}

impl fmt::Display for MidRowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute {
            MidRowAttribute::Foreground(style) => write!(f, "{{FG-{}", style)?,
            MidRowAttribute::Background(color) => write!(f, "{{BG-{}", color)?,
        }
        if self.partially_transparent {
            f.write_str(":PT")?;
        }
        if self.underlined {
            f.write_str(":UL")?;
        }
        f.write_str("}")
    }
}
