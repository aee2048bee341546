//! CEA-608 / Line 21 lookup tables.

use serde::{Deserialize, Serialize};

use super::{CodeTable, PLACEHOLDER_GLYPH};

/// Subtracted from a raw tab control byte to get the tab count
pub const TAB_OFFSET_BASE: u8 = 0x20;

/// Display label for the channel field carried inside a Line 21 code.
/// Field 1 channels 1/3 and field 2 channels 2/4 share a label pair.
pub static CHANNEL_LABELS: CodeTable = CodeTable::new(
    "channel label",
    &[(1, "1"), (2, "2"), (3, "3"), (4, "4"), (5, "1&3"), (6, "2&4")],
);

pub static GLOBAL_CONTROL_CODES: CodeTable = CodeTable::new(
    "global control",
    &[
        (0x20, "RCL"), // Resume Caption Loading
        (0x21, "BS"),  // Backspace
        (0x22, "AOF"), // Alarm Off
        (0x23, "AON"), // Alarm On
        (0x24, "DER"), // Delete to End of Row
        (0x25, "RU2"), // Roll-Up, two rows
        (0x26, "RU3"),
        (0x27, "RU4"),
        (0x28, "FON"), // Flash On
        (0x29, "RDC"), // Resume Direct Captioning
        (0x2A, "TR"),  // Text Restart
        (0x2B, "RTD"), // Resume Text Display
        (0x2C, "EDM"), // Erase Displayed Memory
        (0x2D, "CR"),  // Carriage Return
        (0x2E, "ENM"), // Erase Non-Displayed Memory
        (0x2F, "EOC"), // End Of Caption
    ],
);

pub static PAC_COLORS: CodeTable = CodeTable::new(
    "PAC color",
    &[
        (0x00, "White"),
        (0x02, "Green"),
        (0x04, "Blue"),
        (0x06, "Cyan"),
        (0x08, "Red"),
        (0x0A, "Yellow"),
        (0x0C, "Magenta"),
        (0x0E, "Italic White"),
    ],
);

pub static MIDROW_BACKGROUND_COLORS: CodeTable = CodeTable::new(
    "mid-row background color",
    &[
        (0x00, "White"),
        (0x02, "Green"),
        (0x04, "Blue"),
        (0x06, "Cyan"),
        (0x08, "Red"),
        (0x0A, "Yellow"),
        (0x0C, "Magenta"),
        (0x0E, "Black"),
    ],
);

pub static MIDROW_FOREGROUND_STYLES: CodeTable = CodeTable::new(
    "mid-row foreground style",
    &[
        (0x00, "White"),
        (0x02, "Green"),
        (0x04, "Blue"),
        (0x06, "Cyan"),
        (0x08, "Red"),
        (0x0A, "Yellow"),
        (0x0C, "Magenta"),
        (0x0E, "Italic White"),
    ],
);

/// Which of the two extended Western-European sets a character comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedCharSet {
    SpanishFrench,
    DutchGerman,
}

impl ExtendedCharSet {
    /// 0 selects Spanish/French/misc, anything else Portuguese/German/Danish
    pub fn from_code(code: u8) -> Self {
        if code == 0 {
            Self::SpanishFrench
        } else {
            Self::DutchGerman
        }
    }
}

/// PAC address codes step the cursor in four-column increments
pub fn pac_cursor_column(code: u8) -> Option<u8> {
    match code {
        0x00..=0x0E if code % 2 == 0 => Some(code / 2 * 4),
        _ => None,
    }
}

/// Basic North American character. `None` for the NUL padding byte.
pub fn basic_na_char(code: u8) -> Option<char> {
    let decoded = match code {
        0x00 => return None,
        0x2A => 'á',
        0x5C => 'é',
        0x5E => 'í',
        0x5F => 'ó',
        0x60 => 'ú',
        0x7B => 'ç',
        0x7C => '÷',
        0x7D => 'Ñ',
        0x7E => 'ñ',
        0x7F => PLACEHOLDER_GLYPH, // solid block
        0x20..=0x7E => char::from(code),
        _ => PLACEHOLDER_GLYPH,
    };
    Some(decoded)
}

pub fn special_na_char(code: u8) -> char {
    match code {
        0x30 => '®',
        0x31 => '°',
        0x32 => '½',
        0x33 => '¿',
        0x34 => PLACEHOLDER_GLYPH, // trademark
        0x35 => '¢',
        0x36 => '£',
        0x37 => PLACEHOLDER_GLYPH, // music note
        0x38 => 'à',
        0x39 => PLACEHOLDER_GLYPH, // transparent space
        0x3A => 'è',
        0x3B => 'â',
        0x3C => 'ê',
        0x3D => 'î',
        0x3E => 'ô',
        0x3F => 'û',
        _ => PLACEHOLDER_GLYPH,
    }
}

pub fn extended_we_char(set: ExtendedCharSet, code: u8) -> char {
    match set {
        ExtendedCharSet::SpanishFrench => spanish_french_char(code),
        ExtendedCharSet::DutchGerman => dutch_german_char(code),
    }
}

fn spanish_french_char(code: u8) -> char {
    match code {
        0x20 => 'Á',
        0x21 => 'É',
        0x22 => 'Ó',
        0x23 => 'Ú',
        0x24 => 'Ü',
        0x25 => 'ü',
        0x26 => '´',
        0x27 => '¡',
        0x28 => '*',
        0x29 => '\'',
        0x2A => '-',
        0x2B => '©',
        0x2C => PLACEHOLDER_GLYPH, // service mark
        0x2D => '·',
        0x2E => '"',
        0x2F => '"',
        0x30 => 'À',
        0x31 => 'Â',
        0x32 => 'Ç',
        0x33 => 'È',
        0x34 => 'Ê',
        0x35 => 'Ë',
        0x36 => 'ë',
        0x37 => 'Î',
        0x38 => 'Ï',
        0x39 => 'ï',
        0x3A => 'Ô',
        0x3B => 'Ù',
        0x3C => 'ù',
        0x3D => 'Û',
        0x3E => '«',
        0x3F => '»',
        _ => PLACEHOLDER_GLYPH,
    }
}

fn dutch_german_char(code: u8) -> char {
    match code {
        0x20 => 'Ã',
        0x21 => 'ã',
        0x22 => 'Í',
        0x23 => 'Ì',
        0x24 => 'ì',
        0x25 => 'Ò',
        0x26 => 'ò',
        0x27 => 'Õ',
        0x28 => 'õ',
        0x29 => '{',
        0x2A => '}',
        0x2B => '\\',
        0x2C => '^',
        0x2D => '_',
        0x2E => '|',
        0x2F => '~',
        0x30 => 'Ä',
        0x31 => 'ä',
        0x32 => 'Ö',
        0x33 => 'ö',
        0x34 => 'ß',
        0x35 => '¥',
        0x36 => '¤',
        0x37 => '|',
        0x38 => 'Å',
        0x39 => 'å',
        0x3A => 'Ø',
        0x3B => 'ø',
        // box-drawing corners
        0x3C..=0x3F => '+',
        _ => PLACEHOLDER_GLYPH,
    }
}
