/*!
 * # ccinspect - Closed caption code inspector
 *
 * A Rust library that turns the code-level events of a closed-caption
 * demultiplexer into ordered, timestamped caption elements for every
 * CEA-608 (Line 21) channel and CEA-708 (DTVCC) service.
 *
 * ## Features
 *
 * - Line 21 basic, special and extended characters, global control codes,
 *   preamble address codes, tab offsets and mid-row codes
 * - DTVCC G0-G3 characters, C0 and C1 commands with their parameter blocks
 * - Text runs that merge consecutive characters until a command intervenes
 * - Canonical text rendering and timestamped transcripts
 * - JSON Lines event logs for offline decode runs
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `caption_time`: Caption timestamps and frame positions
 * - `tables`: Static code tables:
 *   - `tables::line21`: CEA-608 character sets and command names
 *   - `tables::dtvcc`: CEA-708 character sets, commands and attributes
 * - `elements`: Caption element kinds and their canonical text form
 * - `events`: Code events received from the demultiplexer
 * - `channel`: Per-channel element accumulation
 * - `engine`: The accumulation engine
 * - `renderer`: Transcript rendering
 * - `replay`: Decode runs over event logs
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod caption_time;
pub mod channel;
pub mod elements;
pub mod engine;
pub mod errors;
pub mod events;
pub mod renderer;
pub mod replay;
pub mod tables;

// Re-export main types for easier usage
pub use app_config::Config;
pub use caption_time::{CaptionTime, TimeSource};
pub use elements::{CaptionElement, ElementKind, TextRun};
pub use engine::{CaptionEngine, SharedEngine};
pub use errors::{AppError, DecodeError};
pub use events::{CaptionEvent, CaptionEventSink, DtvccEvent, DtvccPayload, Line21Event, Line21Payload};
pub use replay::{DecodeRun, FaultPolicy, RunSummary};
