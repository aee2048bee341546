/*!
 * Static lookup tables giving caption codes their meaning.
 *
 * - `line21`: CEA-608 character sets, global control mnemonics, PAC and
 *   mid-row colour/style names
 * - `dtvcc`: CEA-708 G0-G3 character sets, C0/C1 mnemonics and the pen and
 *   window attribute enumerations
 *
 * Character lookups are total: a miss yields the placeholder glyph. Command
 * tables are partial and expose misses to the caller, which treats them as
 * decode faults.
 */

pub mod dtvcc;
pub mod line21;

/// Glyph substituted for character codes with no table entry
pub const PLACEHOLDER_GLYPH: char = '?';

/// A named, sparse mapping from a one-byte code to a mnemonic or label
#[derive(Debug)]
pub struct CodeTable {
    name: &'static str,
    entries: &'static [(u8, &'static str)],
}

impl CodeTable {
    pub const fn new(name: &'static str, entries: &'static [(u8, &'static str)]) -> Self {
        CodeTable { name, entries }
    }

    /// Table name used in decode fault messages
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, code: u8) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry_code, _)| *entry_code == code)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, code: u8) -> bool {
        self.get(code).is_some()
    }

    /// Every code defined by this table, in table order
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
