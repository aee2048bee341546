/*!
 * The accumulation engine.
 *
 * `CaptionEngine` owns one `ElementSequence` per CEA-608 channel and per
 * CEA-708 service. Each event is decoded through the lookup tables and either
 * extends the addressed sequence's open text run or appends a closed element.
 * All table lookups for an event happen before its sequence is touched, so a
 * decode fault leaves the sequence exactly as it was.
 *
 * One engine belongs to one decode run. `SharedEngine` wraps an engine in a
 * mutex for callers that feed it from several threads.
 */

use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use crate::caption_time::CaptionTime;
use crate::channel::{DTVCC_SERVICES, ElementSequence, LINE21_CHANNELS};
use crate::elements::{
    C0Command, CaptionElement, ElementKind, GlobalControl, MidRowAttribute, MidRowStyle, PacPlacement,
    PenAttributes, PenColor, PenLocation, PreambleAccess, Rgb, TabOffset, WindowAttributes,
    WindowBitmapCommand, WindowBitmapKind, WindowDefinition,
};
use crate::errors::{DecodeError, Origin};
use crate::events::{CaptionEventSink, DtvccEvent, DtvccPayload, Line21Event, Line21Payload};
use crate::tables::CodeTable;
use crate::tables::dtvcc::{self as dtvcc_tables, C0_COMMANDS, C1_BASE, C1_COMMANDS};
use crate::tables::line21::{self as line21_tables, CHANNEL_LABELS, GLOBAL_CONTROL_CODES, TAB_OFFSET_BASE};

const C0_ETX: u8 = 0x03;
const C0_P16: u8 = 0x18;

/// Highest tab control byte (TO3)
const TAB_OFFSET_LAST: u8 = TAB_OFFSET_BASE + 3;

/// Origin and timestamp of the event being decoded, used to build faults
#[derive(Debug, Clone, Copy)]
struct EventScope {
    origin: Origin,
    time: CaptionTime,
}

impl EventScope {
    fn fault(&self, table: &'static str, code: u8) -> DecodeError {
        DecodeError::UnrecognizedCode {
            table,
            code,
            origin: self.origin,
            time: self.time,
        }
    }

    fn lookup(&self, table: &CodeTable, code: u8) -> Result<&'static str, DecodeError> {
        table.get(code).ok_or_else(|| self.fault(table.name(), code))
    }
}

/// Sequential reader over a C1 parameter block of known length
struct Params<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Params<'a> {
    fn new(command: &'static str, bytes: &'a [u8], expected: usize) -> Result<Self, DecodeError> {
        if bytes.len() < expected {
            return Err(DecodeError::TruncatedPayload {
                command,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Params { bytes, position: 0 })
    }

    fn byte(&mut self) -> u8 {
        let value = self.bytes.get(self.position).copied().unwrap_or_default();
        self.position += 1;
        value
    }

    fn flag(&mut self) -> bool {
        self.byte() != 0
    }

    fn rgb(&mut self) -> Rgb {
        let red = self.byte();
        let green = self.byte();
        let blue = self.byte();
        Rgb::new(red, green, blue)
    }
}

#[derive(Debug, Clone)]
pub struct CaptionEngine {
    line21: [ElementSequence; LINE21_CHANNELS],
    dtvcc: [ElementSequence; DTVCC_SERVICES],
    end_of_stream: bool,
}

impl Default for CaptionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionEngine {
    pub fn new() -> Self {
        CaptionEngine {
            line21: std::array::from_fn(|_| ElementSequence::new()),
            dtvcc: std::array::from_fn(|_| ElementSequence::new()),
            end_of_stream: false,
        }
    }

    /// Clears every channel and service, ready for an unrelated decode run
    pub fn reset(&mut self) {
        self.line21.iter_mut().for_each(ElementSequence::clear);
        self.dtvcc.iter_mut().for_each(ElementSequence::clear);
        self.end_of_stream = false;
        debug!("Caption engine reset");
    }

    /// Elements accumulated for Line 21 channel 1-4
    pub fn line21_elements(&self, channel: u8) -> Option<&[CaptionElement]> {
        line21_index(channel).ok().map(|index| self.line21[index].elements())
    }

    /// Elements accumulated for DTVCC service 1-16
    pub fn dtvcc_elements(&self, service: u8) -> Option<&[CaptionElement]> {
        dtvcc_index(service).ok().map(|index| self.dtvcc[index].elements())
    }

    /// Channel numbers paired with their sequences
    pub fn line21_channels(&self) -> impl Iterator<Item = (u8, &ElementSequence)> + '_ {
        (1u8..).zip(self.line21.iter())
    }

    /// Service numbers paired with their sequences
    pub fn dtvcc_services(&self) -> impl Iterator<Item = (u8, &ElementSequence)> + '_ {
        (1u8..).zip(self.dtvcc.iter())
    }

    pub fn element_count(&self) -> usize {
        self.line21.iter().chain(self.dtvcc.iter()).map(ElementSequence::len).sum()
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.end_of_stream
    }

    pub fn handle_line21(&mut self, event: &Line21Event) -> Result<(), DecodeError> {
        let index = line21_index(event.channel)?;
        let scope = EventScope {
            origin: Origin::Line21Channel(event.channel),
            time: event.time,
        };
        let sequence = &mut self.line21[index];

        let kind = match &event.payload {
            Line21Payload::BasicNa { first, second } => {
                sequence.with_open_run(event.time, |run| {
                    for code in [*first, *second] {
                        if let Some(c) = line21_tables::basic_na_char(code) {
                            run.push(c);
                        }
                    }
                });
                return Ok(());
            }
            Line21Payload::SpecialNa { display_channel, code } => {
                let label = scope.lookup(&CHANNEL_LABELS, *display_channel)?;
                sequence.with_open_run(event.time, |run| {
                    run.set_channel(label);
                    run.push(line21_tables::special_na_char(*code));
                });
                return Ok(());
            }
            Line21Payload::ExtendedWe { display_channel, char_set, code } => {
                let label = scope.lookup(&CHANNEL_LABELS, *display_channel)?;
                sequence.with_open_run(event.time, |run| {
                    run.set_channel(label);
                    run.push(line21_tables::extended_we_char(*char_set, *code));
                });
                return Ok(());
            }
            Line21Payload::GlobalControl { display_channel, command } => ElementKind::GlobalControl(GlobalControl {
                channel: scope.lookup(&CHANNEL_LABELS, *display_channel)?,
                mnemonic: scope.lookup(&GLOBAL_CONTROL_CODES, *command)?,
            }),
            Line21Payload::Preamble {
                display_channel,
                underlined,
                row,
                style_address,
                data,
            } => {
                let channel = scope.lookup(&CHANNEL_LABELS, *display_channel)?;
                let placement = if *style_address == 0 {
                    PacPlacement::Color(scope.lookup(&line21_tables::PAC_COLORS, *data)?)
                } else {
                    let column = line21_tables::pac_cursor_column(*data)
                        .ok_or_else(|| scope.fault("PAC cursor column", *data))?;
                    PacPlacement::Cursor(column)
                };
                ElementKind::Preamble(PreambleAccess {
                    channel,
                    underlined: *underlined,
                    row: *row,
                    placement,
                })
            }
            Line21Payload::TabControl { display_channel, offset } => {
                let channel = scope.lookup(&CHANNEL_LABELS, *display_channel)?;
                if !(TAB_OFFSET_BASE..=TAB_OFFSET_LAST).contains(offset) {
                    return Err(scope.fault("tab offset", *offset));
                }
                ElementKind::TabOffset(TabOffset {
                    channel,
                    offset: offset - TAB_OFFSET_BASE,
                })
            }
            Line21Payload::MidRow {
                display_channel,
                partially_transparent,
                underlined,
                background_or_foreground,
                data,
            } => {
                let channel = scope.lookup(&CHANNEL_LABELS, *display_channel)?;
                let attribute = if *background_or_foreground == 0 {
                    MidRowAttribute::Background(scope.lookup(&line21_tables::MIDROW_BACKGROUND_COLORS, *data)?)
                } else {
                    MidRowAttribute::Foreground(scope.lookup(&line21_tables::MIDROW_FOREGROUND_STYLES, *data)?)
                };
                ElementKind::MidRow(MidRowStyle {
                    channel,
                    partially_transparent: *partially_transparent,
                    underlined: *underlined,
                    attribute,
                })
            }
        };

        let element = CaptionElement::new(event.time, kind);
        debug!("{} {} {}", scope.origin, event.time, element);
        sequence.push(element);
        Ok(())
    }

    pub fn handle_dtvcc(&mut self, event: &DtvccEvent) -> Result<(), DecodeError> {
        let index = dtvcc_index(event.service)?;
        let scope = EventScope {
            origin: Origin::DtvccService(event.service),
            time: event.time,
        };
        let sequence = &mut self.dtvcc[index];

        let kind = match &event.payload {
            DtvccPayload::G0 { code } => {
                sequence.with_open_run(event.time, |run| run.push(dtvcc_tables::g0_char(*code)));
                return Ok(());
            }
            DtvccPayload::G1 { code } => {
                sequence.with_open_run(event.time, |run| run.push(dtvcc_tables::g1_char(*code)));
                return Ok(());
            }
            DtvccPayload::G2 { code } => {
                sequence.with_open_run(event.time, |run| run.push(dtvcc_tables::g2_char(*code)));
                return Ok(());
            }
            DtvccPayload::G3 { code } => {
                sequence.with_open_run(event.time, |run| dtvcc_tables::push_g3_char(run.text_mut(), *code));
                return Ok(());
            }
            DtvccPayload::C0 { code, p16 } => {
                let mnemonic = scope.lookup(&C0_COMMANDS, *code)?;
                if *code == C0_ETX {
                    debug!("{} {} ETX consumed", scope.origin, event.time);
                    return Ok(());
                }
                ElementKind::C0(C0Command {
                    mnemonic,
                    p16: (*code == C0_P16).then_some(*p16),
                })
            }
            DtvccPayload::C1 { code, data } => decode_c1(&scope, *code, data)?,
            DtvccPayload::C2 { .. } | DtvccPayload::C3 { .. } => ElementKind::Future(event.payload.class().code()),
        };

        let element = CaptionElement::new(event.time, kind);
        debug!("{} {} {}", scope.origin, event.time, element);
        sequence.push(element);
        Ok(())
    }

    pub fn handle_end_of_stream(&mut self) {
        self.end_of_stream = true;
        info!("End of caption stream: {} elements accumulated", self.element_count());
    }
}

impl CaptionEventSink for CaptionEngine {
    fn on_line21(&mut self, event: &Line21Event) -> Result<(), DecodeError> {
        self.handle_line21(event)
    }

    fn on_dtvcc(&mut self, event: &DtvccEvent) -> Result<(), DecodeError> {
        self.handle_dtvcc(event)
    }

    fn on_end_of_stream(&mut self) {
        self.handle_end_of_stream();
    }
}

fn line21_index(channel: u8) -> Result<usize, DecodeError> {
    match channel {
        1..=4 => Ok(usize::from(channel - 1)),
        _ => Err(DecodeError::ChannelOutOfRange(channel)),
    }
}

fn dtvcc_index(service: u8) -> Result<usize, DecodeError> {
    match service {
        1..=16 => Ok(usize::from(service - 1)),
        _ => Err(DecodeError::ServiceOutOfRange(service)),
    }
}

fn decode_c1(scope: &EventScope, code: u8, data: &[u8]) -> Result<ElementKind, DecodeError> {
    let mnemonic = scope.lookup(&C1_COMMANDS, code)?;

    let kind = match code {
        0x80..=0x87 => ElementKind::SetCurrentWindow(code - C1_BASE),
        0x88..=0x8C => {
            let kind = match code {
                0x88 => WindowBitmapKind::Clear,
                0x89 => WindowBitmapKind::Display,
                0x8A => WindowBitmapKind::Hide,
                0x8B => WindowBitmapKind::Toggle,
                _ => WindowBitmapKind::Delete,
            };
            let bitmap = Params::new(mnemonic, data, 1)?.byte();
            ElementKind::WindowBitmap(WindowBitmapCommand { kind, bitmap })
        }
        0x8D => ElementKind::Delay(Params::new(mnemonic, data, 1)?.byte()),
        0x8E => ElementKind::DelayCancel,
        0x8F => ElementKind::Reset,
        0x90 => {
            let mut params = Params::new(mnemonic, data, 7)?;
            ElementKind::SetPenAttributes(PenAttributes {
                pen_size: scope.lookup(&dtvcc_tables::PEN_SIZES, params.byte())?,
                pen_offset: scope.lookup(&dtvcc_tables::PEN_OFFSETS, params.byte())?,
                text_tag: scope.lookup(&dtvcc_tables::TEXT_TAGS, params.byte())?,
                font_tag: scope.lookup(&dtvcc_tables::FONT_TAGS, params.byte())?,
                edge_type: scope.lookup(&dtvcc_tables::EDGE_TYPES, params.byte())?,
                underlined: params.flag(),
                italic: params.flag(),
            })
        }
        0x91 => {
            let mut params = Params::new(mnemonic, data, 11)?;
            ElementKind::SetPenColor(PenColor {
                foreground_opacity: scope.lookup(&dtvcc_tables::OPACITIES, params.byte())?,
                foreground: params.rgb(),
                background_opacity: scope.lookup(&dtvcc_tables::OPACITIES, params.byte())?,
                background: params.rgb(),
                edge: params.rgb(),
            })
        }
        0x92 => {
            let mut params = Params::new(mnemonic, data, 2)?;
            ElementKind::SetPenLocation(PenLocation {
                row: params.byte(),
                column: params.byte(),
            })
        }
        0x93..=0x96 => ElementKind::Reserved(mnemonic),
        0x97 => {
            let mut params = Params::new(mnemonic, data, 15)?;
            ElementKind::SetWindowAttributes(WindowAttributes {
                fill_opacity: scope.lookup(&dtvcc_tables::OPACITIES, params.byte())?,
                fill: params.rgb(),
                border_type: scope.lookup(&dtvcc_tables::BORDER_TYPES, params.byte())?,
                border: params.rgb(),
                word_wrapped: params.flag(),
                print_direction: scope.lookup(&dtvcc_tables::DIRECTIONS, params.byte())?,
                scroll_direction: scope.lookup(&dtvcc_tables::DIRECTIONS, params.byte())?,
                justify: scope.lookup(&dtvcc_tables::JUSTIFICATIONS, params.byte())?,
                effect_speed: scope.lookup(&dtvcc_tables::EFFECT_SPEEDS, params.byte())?,
                effect_direction: scope.lookup(&dtvcc_tables::DIRECTIONS, params.byte())?,
                display_effect: scope.lookup(&dtvcc_tables::DISPLAY_EFFECTS, params.byte())?,
            })
        }
        0x98..=0x9F => {
            let mut params = Params::new(mnemonic, data, 12)?;
            ElementKind::DefineWindow(WindowDefinition {
                window: code - 0x98,
                visible: params.flag(),
                row_locked: params.flag(),
                column_locked: params.flag(),
                priority: params.byte(),
                relative_position: params.flag(),
                vertical_anchor: params.byte(),
                horizontal_anchor: params.byte(),
                anchor_id: scope.lookup(&dtvcc_tables::ANCHOR_IDS, params.byte())?,
                row_count: params.byte(),
                column_count: params.byte(),
                window_style: scope.lookup(&dtvcc_tables::WINDOW_STYLES, params.byte())?,
                pen_style: scope.lookup(&dtvcc_tables::PEN_STYLES, params.byte())?,
            })
        }
        _ => return Err(scope.fault(C1_COMMANDS.name(), code)),
    };

    Ok(kind)
}

/// A `CaptionEngine` behind a mutex, for decode runs fed from several threads
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<CaptionEngine>>,
}

impl SharedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_line21(&self, event: &Line21Event) -> Result<(), DecodeError> {
        self.inner.lock().handle_line21(event)
    }

    pub fn handle_dtvcc(&self, event: &DtvccEvent) -> Result<(), DecodeError> {
        self.inner.lock().handle_dtvcc(event)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Runs `f` against the engine while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&CaptionEngine) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Copies the current engine state out of the lock
    pub fn snapshot(&self) -> CaptionEngine {
        self.inner.lock().clone()
    }
}
