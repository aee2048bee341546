//! CEA-708 command elements.

use std::fmt;

/// C0 command; `P16` carries its two escaped bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct C0Command {
    pub mnemonic: &'static str,
    pub p16: Option<[u8; 2]>,
}

impl fmt::Display for C0Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.p16 {
            Some([first, second]) => write!(f, "{{{}:{}{}}}", self.mnemonic, first, second),
            None => write!(f, "{{{}}}", self.mnemonic),
        }
    }
}

/// The C1 commands that address windows through an 8-bit bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBitmapKind {
    Clear,
    Display,
    Hide,
    Toggle,
    Delete,
}

impl WindowBitmapKind {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Clear => "CLW",
            Self::Display => "DSW",
            Self::Hide => "HDW",
            Self::Toggle => "TGW",
            Self::Delete => "DLW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBitmapCommand {
    pub kind: WindowBitmapKind,
    /// Bit n selects window n
    pub bitmap: u8,
}

impl WindowBitmapCommand {
    pub fn windows(&self) -> impl Iterator<Item = u8> + '_ {
        (0..8).filter(move |window| self.bitmap & (1 << window) != 0)
    }
}

impl fmt::Display for WindowBitmapCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}:{:08b}}}", self.kind.mnemonic(), self.bitmap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}G{}B{}", self.red, self.green, self.blue)
    }
}

/// SPA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenAttributes {
    pub pen_size: &'static str,
    pub pen_offset: &'static str,
    pub text_tag: &'static str,
    pub font_tag: &'static str,
    pub edge_type: &'static str,
    pub underlined: bool,
    pub italic: bool,
}

impl fmt::Display for PenAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{SPA:Pen-[Size:{},Offset:{}]:TextTag-{}:FontTag-{}:EdgeType-{}",
            self.pen_size, self.pen_offset, self.text_tag, self.font_tag, self.edge_type
        )?;
        if self.underlined {
            f.write_str(":UL")?;
        }
        if self.italic {
            f.write_str(":IT")?;
        }
        f.write_str("}")
    }
}

/// SPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenColor {
    pub foreground_opacity: &'static str,
    pub foreground: Rgb,
    pub background_opacity: &'static str,
    pub background: Rgb,
    pub edge: Rgb,
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // no separator ahead of the edge colour
        write!(
            f,
            "{{SPC:FG-{}-{}:BG-{}-{}Edg-{}}}",
            self.foreground_opacity, self.foreground, self.background_opacity, self.background, self.edge
        )
    }
}

/// SPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenLocation {
    pub row: u8,
    pub column: u8,
}

impl fmt::Display for PenLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{SPL:R{}-C{}}}", self.row, self.column)
    }
}

/// SWA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowAttributes {
    pub fill_opacity: &'static str,
    pub fill: Rgb,
    pub border_type: &'static str,
    pub border: Rgb,
    pub word_wrapped: bool,
    pub print_direction: &'static str,
    pub scroll_direction: &'static str,
    pub justify: &'static str,
    pub effect_speed: &'static str,
    pub effect_direction: &'static str,
    pub display_effect: &'static str,
}

impl fmt::Display for WindowAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{SWA:Fill-{}-{}:Brdr-{}-{}:PD-{}:SD-{}:JD-{}:{}-{}sec-{}",
            self.fill_opacity,
            self.fill,
            self.border_type,
            self.border,
            self.print_direction,
            self.scroll_direction,
            self.justify,
            self.display_effect,
            self.effect_speed,
            self.effect_direction
        )?;
        if self.word_wrapped {
            f.write_str(":WW")?;
        }
        f.write_str("}")
    }
}

/// DF0-DF7
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDefinition {
    /// Window index 0-7
    pub window: u8,
    pub visible: bool,
    pub row_locked: bool,
    pub column_locked: bool,
    pub priority: u8,
    pub relative_position: bool,
    pub vertical_anchor: u8,
    pub horizontal_anchor: u8,
    pub anchor_id: &'static str,
    pub row_count: u8,
    pub column_count: u8,
    pub window_style: &'static str,
    pub pen_style: &'static str,
}

impl fmt::Display for WindowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{DF{}:{}:R{}-C{}:Anchor-{}-V{}-H{}:Pen-{}:Pr-{}",
            self.window,
            self.window_style,
            self.row_count,
            self.column_count,
            self.anchor_id,
            self.vertical_anchor,
            self.horizontal_anchor,
            self.pen_style,
            self.priority
        )?;
        let flags = [
            (self.visible, ":VIS"),
            (self.row_locked, ":RL"),
            (self.column_locked, ":CL"),
            (self.relative_position, ":RP"),
        ];
        for (set, suffix) in flags {
            if set {
                f.write_str(suffix)?;
            }
        }
        f.write_str("}")
    }
}
