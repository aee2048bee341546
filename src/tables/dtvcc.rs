//! CEA-708 / DTVCC lookup tables.

use super::{CodeTable, PLACEHOLDER_GLYPH};

/// First C1 code; `CWn` and `DFn` derive their window index from it
pub const C1_BASE: u8 = 0x80;

/// G0 0x7F is a music note whose exact glyph is ambiguous; keep the placeholder
pub const G0_MUSIC_NOTE: u8 = 0x7F;

/// The single defined G3 code, the [CC] icon
pub const G3_CC_ICON: u8 = 0xA0;

pub static C0_COMMANDS: CodeTable = CodeTable::new(
    "C0 command",
    &[
        (0x00, "NUL"),
        (0x03, "ETX"),  // flush text to current window
        (0x08, "BS"),
        (0x0C, "FF"),   // clear screen, pen to 0,0
        (0x0D, "CR"),
        (0x0E, "HCR"),  // pen to line start, clear line
        (0x10, "EXT1"), // escape into C2/C3/G2/G3
        (0x18, "P16"),  // two-byte escape
    ],
);

pub static C1_COMMANDS: CodeTable = CodeTable::new(
    "C1 command",
    &[
        (0x80, "CW0"),
        (0x81, "CW1"),
        (0x82, "CW2"),
        (0x83, "CW3"),
        (0x84, "CW4"),
        (0x85, "CW5"),
        (0x86, "CW6"),
        (0x87, "CW7"),
        (0x88, "CLW"),
        (0x89, "DSW"),
        (0x8A, "HDW"),
        (0x8B, "TGW"),
        (0x8C, "DLW"),
        (0x8D, "DLY"),
        (0x8E, "DLC"),
        (0x8F, "RST"),
        (0x90, "SPA"),
        (0x91, "SPC"),
        (0x92, "SPL"),
        (0x93, "RSV93"),
        (0x94, "RSV94"),
        (0x95, "RSV95"),
        (0x96, "RSV96"),
        (0x97, "SWA"),
        (0x98, "DF0"),
        (0x99, "DF1"),
        (0x9A, "DF2"),
        (0x9B, "DF3"),
        (0x9C, "DF4"),
        (0x9D, "DF5"),
        (0x9E, "DF6"),
        (0x9F, "DF7"),
    ],
);

pub static PEN_SIZES: CodeTable = CodeTable::new(
    "pen size",
    &[(0x00, "Small"), (0x01, "Standard"), (0x02, "Large"), (0x03, "IllegalValue")],
);

pub static PEN_OFFSETS: CodeTable = CodeTable::new(
    "pen offset",
    &[(0x00, "Subscript"), (0x01, "Normal"), (0x02, "Superscript"), (0x03, "IllegalValue")],
);

pub static TEXT_TAGS: CodeTable = CodeTable::new(
    "text tag",
    &[
        (0x00, "Dialog"),
        (0x01, "Source or Speaker ID"),
        (0x02, "Electronically Reproduced Voice"),
        (0x03, "Dialog in other Language"),
        (0x04, "Voiceover"),
        (0x05, "Audible Translation"),
        (0x06, "Subtitle Translation"),
        (0x07, "Voice Quality Description"),
        (0x08, "Song Lyrics"),
        (0x09, "Sound Effects Description"),
        (0x0A, "Musical Score Description"),
        (0x0B, "Oath"),
        (0x0C, "Undefined 0"),
        (0x0D, "Undefined 1"),
        (0x0E, "Undefined 2"),
        (0x0F, "Invisible"),
    ],
);

pub static FONT_TAGS: CodeTable = CodeTable::new(
    "font tag",
    &[
        (0x00, "Default"),
        (0x01, "Monospaced Serif"),
        (0x02, "Proportional Serif"),
        (0x03, "Monospaced SanSerif"),
        (0x04, "Proportional SanSerif"),
        (0x05, "Casual"),
        (0x06, "Cursive"),
        (0x07, "SmallCaps"),
    ],
);

pub static EDGE_TYPES: CodeTable = CodeTable::new(
    "edge type",
    &[
        (0x00, "None"),
        (0x01, "Raised"),
        (0x02, "Depressed"),
        (0x03, "Uniform"),
        (0x04, "Left Drop Shadow"),
        (0x05, "Right Drop Shadow"),
        (0x06, "IllegalValue"),
        (0x07, "IllegalValue1"),
    ],
);

pub static OPACITIES: CodeTable = CodeTable::new(
    "opacity",
    &[(0x00, "Solid"), (0x01, "Flash"), (0x02, "Translucent"), (0x03, "Transparent")],
);

pub static BORDER_TYPES: CodeTable = CodeTable::new(
    "border type",
    &[
        (0x00, "None"),
        (0x01, "Raised"),
        (0x02, "Depressed"),
        (0x03, "Uniform"),
        (0x04, "Shadow Left"),
        (0x05, "Shadow Right"),
    ],
);

/// Print, scroll and effect directions share one two-bit encoding
// codes 2 and 3 are TtoB and BtoT, not the 3 and 4 some caption tools emit
pub static DIRECTIONS: CodeTable = CodeTable::new(
    "direction",
    &[(0x00, "LtoR"), (0x01, "RtoL"), (0x02, "TtoB"), (0x03, "BtoT")],
);

pub static JUSTIFICATIONS: CodeTable = CodeTable::new(
    "justification",
    &[(0x00, "L/T"), (0x01, "R/B"), (0x02, "Cntr"), (0x03, "Full")],
);

/// Effect speed in half-second units
pub static EFFECT_SPEEDS: CodeTable = CodeTable::new(
    "effect speed",
    &[
        (0x00, "0"),
        (0x01, "0.5"),
        (0x02, "1.0"),
        (0x03, "1.5"),
        (0x04, "2.0"),
        (0x05, "2.5"),
        (0x06, "3.0"),
        (0x07, "3.5"),
        (0x08, "4.0"),
        (0x09, "4.5"),
        (0x0A, "5.0"),
        (0x0B, "5.5"),
        (0x0C, "6.0"),
        (0x0D, "6.5"),
        (0x0E, "7.0"),
        (0x0F, "7.5"),
    ],
);

pub static DISPLAY_EFFECTS: CodeTable = CodeTable::new(
    "display effect",
    &[(0x00, "Snap"), (0x01, "Fade"), (0x02, "Wipe"), (0x03, "Mask")],
);

pub static ANCHOR_IDS: CodeTable = CodeTable::new(
    "anchor id",
    &[
        (0x00, "UL"),
        (0x01, "UC"),
        (0x02, "UR"),
        (0x03, "ML"),
        (0x04, "MC"),
        (0x05, "MR"),
        (0x06, "LL"),
        (0x07, "LC"),
        (0x08, "LR"),
    ],
);

pub static WINDOW_STYLES: CodeTable = CodeTable::new(
    "predefined window style",
    &[
        (0x00, "608-PopUp"),
        (0x01, "PopUp-TransBG"),
        (0x02, "PopUp-Centered"),
        (0x03, "608-RollUp"),
        (0x04, "RollUp-TransBG"),
        (0x05, "RollUp-Centered"),
        (0x06, "TickerTape"),
    ],
);

pub static PEN_STYLES: CodeTable = CodeTable::new(
    "predefined pen style",
    &[
        (0x00, "Default"),
        (0x01, "MonoSerif"),
        (0x02, "ProportSerif"),
        (0x03, "MonoSanSerif"),
        (0x04, "ProportSanSerif"),
        (0x05, "MonoSanSerif-TransBG"),
        (0x06, "ProportSanSerif-TransBG"),
    ],
);

/// G0: printable ASCII, with the music note held at the placeholder
pub fn g0_char(code: u8) -> char {
    match code {
        G0_MUSIC_NOTE => PLACEHOLDER_GLYPH,
        0x20..=0x7E => char::from(code),
        _ => PLACEHOLDER_GLYPH,
    }
}

/// G1: ISO 8859-1 upper half, with the caption-file glyph substitutions
pub fn g1_char(code: u8) -> char {
    match code {
        0xA0 => ' ',
        0xAD => '-',
        // cent, pound, yen, not sign and macron have no caption-file glyph
        0xA2 | 0xA3 | 0xA5 | 0xAC | 0xAF => PLACEHOLDER_GLYPH,
        0xF6 => '÷',
        0xF7 => 'ø',
        0xF8 => 'ù',
        0xF9 => 'ú',
        0xFA => 'ü',
        0xA1..=0xFF => char::from(code),
        _ => PLACEHOLDER_GLYPH,
    }
}

/// G2 supplementary set. Listed codes without a caption-file glyph use the
/// placeholder; unlisted codes come back as their raw character.
pub fn g2_char(code: u8) -> char {
    match code {
        0x20 | 0x21 => ' ', // transparent and non-breaking transparent space
        0x31 | 0x32 => '\'',
        0x25 | 0x2A | 0x2C | 0x30 | 0x33..=0x35 | 0x39 | 0x3A | 0x3C | 0x3D | 0x3F | 0x76..=0x7F => {
            PLACEHOLDER_GLYPH
        }
        _ => char::from(code),
    }
}

/// Appends a G3 character; anything but the [CC] icon becomes a tagged placeholder
pub fn push_g3_char(text: &mut String, code: u8) {
    if code == G3_CC_ICON {
        text.push(PLACEHOLDER_GLYPH);
    } else {
        text.push_str(&format!("<???({})???>", code));
    }
}
