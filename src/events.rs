/*!
 * Code events consumed from the demultiplexer.
 *
 * The demultiplexer reports one event per decoded code, either as the typed
 * `Line21Event` / `DtvccEvent` values below or as raw records carrying a
 * numeric discriminant and the payload bytes in the collaborator's field
 * order. Raw records are turned into typed events once the discriminant is
 * known; unknown discriminants are returned as errors so the caller sees them.
 */

use log::warn;
use serde::{Deserialize, Serialize};

use crate::caption_time::CaptionTime;
use crate::errors::DecodeError;
use crate::tables::line21::ExtendedCharSet;

/// Line 21 code kinds and their wire discriminants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line21CodeKind {
    BasicNa = 2,
    SpecialNa = 3,
    ExtendedWe = 4,
    GlobalControl = 5,
    Preamble = 6,
    TabControl = 7,
    MidRow = 8,
}

impl Line21CodeKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Self::BasicNa),
            3 => Some(Self::SpecialNa),
            4 => Some(Self::ExtendedWe),
            5 => Some(Self::GlobalControl),
            6 => Some(Self::Preamble),
            7 => Some(Self::TabControl),
            8 => Some(Self::MidRow),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Payload of a Line 21 event. `display_channel` is the 1-6 channel code
/// carried inside the command (5 and 6 being the 1&3 / 2&4 pairs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line21Payload {
    /// Two basic characters; 0x00 pads an unused slot
    BasicNa {
        first: u8,
        #[serde(default)]
        second: u8,
    },
    SpecialNa {
        display_channel: u8,
        code: u8,
    },
    ExtendedWe {
        display_channel: u8,
        char_set: ExtendedCharSet,
        code: u8,
    },
    GlobalControl {
        display_channel: u8,
        command: u8,
    },
    /// `style_address == 0` makes `data` a colour code, otherwise a cursor code
    Preamble {
        display_channel: u8,
        #[serde(default)]
        underlined: bool,
        row: u8,
        style_address: u8,
        data: u8,
    },
    TabControl {
        display_channel: u8,
        offset: u8,
    },
    /// `background_or_foreground == 0` makes `data` a background colour,
    /// otherwise a foreground style
    MidRow {
        display_channel: u8,
        #[serde(default)]
        partially_transparent: bool,
        #[serde(default)]
        underlined: bool,
        background_or_foreground: u8,
        data: u8,
    },
}

impl Line21Payload {
    pub fn kind(&self) -> Line21CodeKind {
        match self {
            Self::BasicNa { .. } => Line21CodeKind::BasicNa,
            Self::SpecialNa { .. } => Line21CodeKind::SpecialNa,
            Self::ExtendedWe { .. } => Line21CodeKind::ExtendedWe,
            Self::GlobalControl { .. } => Line21CodeKind::GlobalControl,
            Self::Preamble { .. } => Line21CodeKind::Preamble,
            Self::TabControl { .. } => Line21CodeKind::TabControl,
            Self::MidRow { .. } => Line21CodeKind::MidRow,
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(
            self.kind(),
            Line21CodeKind::BasicNa | Line21CodeKind::SpecialNa | Line21CodeKind::ExtendedWe
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line21Event {
    pub time: CaptionTime,
    /// Channel 1-4
    pub channel: u8,
    pub payload: Line21Payload,
}

impl Line21Event {
    pub fn new(time: CaptionTime, channel: u8, payload: Line21Payload) -> Self {
        Line21Event { time, channel, payload }
    }
}

/// A Line 21 code as handed over by the collaborator's callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine21Code {
    pub channel: u8,
    pub code_type: u8,
    /// Union bytes in declaration order of the selected member
    pub data: [u8; 5],
}

impl RawLine21Code {
    pub fn into_event(self, time: CaptionTime) -> Result<Line21Event, DecodeError> {
        let kind = Line21CodeKind::from_code(self.code_type).ok_or_else(|| {
            warn!("Unknown Line 21 code type {} on channel {}", self.code_type, self.channel);
            DecodeError::UnknownLine21Kind(self.code_type)
        })?;
        let [b0, b1, b2, b3, b4] = self.data;

        let payload = match kind {
            Line21CodeKind::BasicNa => Line21Payload::BasicNa { first: b0, second: b1 },
            Line21CodeKind::SpecialNa => Line21Payload::SpecialNa { display_channel: b0, code: b1 },
            Line21CodeKind::ExtendedWe => Line21Payload::ExtendedWe {
                display_channel: b0,
                char_set: ExtendedCharSet::from_code(b1),
                code: b2,
            },
            Line21CodeKind::GlobalControl => Line21Payload::GlobalControl { display_channel: b0, command: b1 },
            Line21CodeKind::Preamble => Line21Payload::Preamble {
                display_channel: b0,
                underlined: b1 != 0,
                row: b2,
                style_address: b3,
                data: b4,
            },
            Line21CodeKind::TabControl => Line21Payload::TabControl { display_channel: b0, offset: b1 },
            Line21CodeKind::MidRow => Line21Payload::MidRow {
                display_channel: b0,
                partially_transparent: b1 != 0,
                underlined: b2 != 0,
                background_or_foreground: b3,
                data: b4,
            },
        };

        Ok(Line21Event::new(time, self.channel, payload))
    }
}

/// DTVCC data classes and their wire discriminants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtvccClass {
    C0 = 1,
    C1 = 2,
    C2 = 3,
    C3 = 4,
    G0 = 5,
    G1 = 6,
    G2 = 7,
    G3 = 8,
}

impl DtvccClass {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::C0),
            2 => Some(Self::C1),
            3 => Some(Self::C2),
            4 => Some(Self::C3),
            5 => Some(Self::G0),
            6 => Some(Self::G1),
            7 => Some(Self::G2),
            8 => Some(Self::G3),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::C0 => "C0",
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::C3 => "C3",
            Self::G0 => "G0",
            Self::G1 => "G1",
            Self::G2 => "G2",
            Self::G3 => "G3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DtvccPayload {
    C0 {
        code: u8,
        /// Only meaningful for P16
        #[serde(default)]
        p16: [u8; 2],
    },
    /// C1 command code followed by its parameter bytes
    C1 {
        code: u8,
        #[serde(default)]
        data: Vec<u8>,
    },
    C2 {
        code: u8,
    },
    C3 {
        code: u8,
    },
    G0 {
        code: u8,
    },
    G1 {
        code: u8,
    },
    G2 {
        code: u8,
    },
    G3 {
        code: u8,
    },
}

impl DtvccPayload {
    pub fn class(&self) -> DtvccClass {
        match self {
            Self::C0 { .. } => DtvccClass::C0,
            Self::C1 { .. } => DtvccClass::C1,
            Self::C2 { .. } => DtvccClass::C2,
            Self::C3 { .. } => DtvccClass::C3,
            Self::G0 { .. } => DtvccClass::G0,
            Self::G1 { .. } => DtvccClass::G1,
            Self::G2 { .. } => DtvccClass::G2,
            Self::G3 { .. } => DtvccClass::G3,
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(
            self.class(),
            DtvccClass::G0 | DtvccClass::G1 | DtvccClass::G2 | DtvccClass::G3
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtvccEvent {
    pub time: CaptionTime,
    /// Service 1-16
    pub service: u8,
    pub payload: DtvccPayload,
}

impl DtvccEvent {
    pub fn new(time: CaptionTime, service: u8, payload: DtvccPayload) -> Self {
        DtvccEvent { time, service, payload }
    }
}

/// A DTVCC record as handed over by the collaborator's callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDtvccData {
    pub service: u8,
    pub dtvcc_type: u8,
    /// Command or character code first, then any parameter bytes
    pub data: Vec<u8>,
}

impl RawDtvccData {
    pub fn into_event(self, time: CaptionTime) -> Result<DtvccEvent, DecodeError> {
        let class = DtvccClass::from_code(self.dtvcc_type).ok_or_else(|| {
            warn!("Unknown DTVCC data type {} on service {}", self.dtvcc_type, self.service);
            DecodeError::UnknownDtvccType(self.dtvcc_type)
        })?;
        let (&code, rest) = self.data.split_first().ok_or(DecodeError::TruncatedPayload {
            command: class.mnemonic(),
            expected: 1,
            actual: 0,
        })?;

        let payload = match class {
            DtvccClass::C0 => DtvccPayload::C0 {
                code,
                p16: [
                    rest.first().copied().unwrap_or_default(),
                    rest.get(1).copied().unwrap_or_default(),
                ],
            },
            DtvccClass::C1 => DtvccPayload::C1 { code, data: rest.to_vec() },
            DtvccClass::C2 => DtvccPayload::C2 { code },
            DtvccClass::C3 => DtvccPayload::C3 { code },
            DtvccClass::G0 => DtvccPayload::G0 { code },
            DtvccClass::G1 => DtvccPayload::G1 { code },
            DtvccClass::G2 => DtvccPayload::G2 { code },
            DtvccClass::G3 => DtvccPayload::G3 { code },
        };

        Ok(DtvccEvent::new(time, self.service, payload))
    }
}

/// One entry of an event stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CaptionEvent {
    Line21(Line21Event),
    Dtvcc(DtvccEvent),
    EndOfStream,
}

/// The callback contract between the demultiplexer and a consumer
pub trait CaptionEventSink {
    fn on_line21(&mut self, event: &Line21Event) -> Result<(), DecodeError>;

    fn on_dtvcc(&mut self, event: &DtvccEvent) -> Result<(), DecodeError>;

    /// Signals that no further events follow
    fn on_end_of_stream(&mut self) {}

    fn on_event(&mut self, event: &CaptionEvent) -> Result<(), DecodeError> {
        match event {
            CaptionEvent::Line21(line21) => self.on_line21(line21),
            CaptionEvent::Dtvcc(dtvcc) => self.on_dtvcc(dtvcc),
            CaptionEvent::EndOfStream => {
                self.on_end_of_stream();
                Ok(())
            }
        }
    }
}
