/*!
 * Caption elements produced by the accumulation engine.
 *
 * Each element carries the `CaptionTime` of the code event that created it
 * and one `ElementKind`. Only `ElementKind::Text` is ever mutated after
 * creation, and only while it is the open trailing run of its channel.
 * Display output of every kind is the canonical text form compared by
 * conformance tests.
 */

use std::fmt;

use crate::caption_time::CaptionTime;

pub mod dtvcc;
pub mod line21;

pub use dtvcc::{
    C0Command, PenAttributes, PenColor, PenLocation, Rgb, WindowAttributes, WindowBitmapCommand,
    WindowBitmapKind, WindowDefinition,
};
pub use line21::{GlobalControl, MidRowAttribute, MidRowStyle, PacPlacement, PreambleAccess, TabOffset};

/// A run of decoded caption characters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    text: String,
    channel: Option<&'static str>,
}

impl TextRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line 21 display-channel label, set by special and extended characters
    pub fn channel(&self) -> Option<&'static str> {
        self.channel
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn set_channel(&mut self, label: &'static str) {
        self.channel = Some(label);
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }
}

impl fmt::Display for TextRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.text)
    }
}

/// The closed catalogue of element kinds for both protocols
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Text(TextRun),

    // CEA-608
    GlobalControl(GlobalControl),
    Preamble(PreambleAccess),
    TabOffset(TabOffset),
    MidRow(MidRowStyle),

    // CEA-708
    C0(C0Command),
    /// CW0-CW7, window index 0-7
    SetCurrentWindow(u8),
    WindowBitmap(WindowBitmapCommand),
    /// DLY, in tenths of a second
    Delay(u8),
    DelayCancel,
    Reset,
    SetPenAttributes(PenAttributes),
    SetPenColor(PenColor),
    SetPenLocation(PenLocation),
    SetWindowAttributes(WindowAttributes),
    DefineWindow(WindowDefinition),
    /// RSV93-RSV96
    Reserved(&'static str),
    /// C2/C3 code kept opaque, carrying its raw class discriminant
    Future(u8),
}

impl ElementKind {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(run) => write!(f, "{}", run),
            Self::GlobalControl(control) => write!(f, "{}", control),
            Self::Preamble(pac) => write!(f, "{}", pac),
            Self::TabOffset(tab) => write!(f, "{}", tab),
            Self::MidRow(mid_row) => write!(f, "{}", mid_row),
            Self::C0(command) => write!(f, "{}", command),
            Self::SetCurrentWindow(window) => write!(f, "{{CW{}}}", window),
            Self::WindowBitmap(command) => write!(f, "{}", command),
            Self::Delay(tenths) => write!(f, "{{DLY:{}00ms}}", tenths),
            Self::DelayCancel => f.write_str("{DLC}"),
            Self::Reset => f.write_str("{RST}"),
            Self::SetPenAttributes(attributes) => write!(f, "{}", attributes),
            Self::SetPenColor(color) => write!(f, "{}", color),
            Self::SetPenLocation(location) => write!(f, "{}", location),
            Self::SetWindowAttributes(attributes) => write!(f, "{}", attributes),
            Self::DefineWindow(definition) => write!(f, "{}", definition),
            Self::Reserved(mnemonic) => write!(f, "{{{}}}", mnemonic),
            Self::Future(class) => write!(f, "{{{}}}", class),
        }
    }
}

/// One timestamped element in a channel or service sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionElement {
    pub time: CaptionTime,
    pub kind: ElementKind,
}

impl CaptionElement {
    pub fn new(time: CaptionTime, kind: ElementKind) -> Self {
        CaptionElement { time, kind }
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match &self.kind {
            ElementKind::Text(run) => Some(run),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }
}

impl fmt::Display for CaptionElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
