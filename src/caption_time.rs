/*!
 * Normalized caption timestamps.
 *
 * A `CaptionTime` is the instant the demultiplexer attached to a code event.
 * Frame rates are carried multiplied by one hundred (2997 for 29.97 fps) so
 * the derived frame position stays in integer arithmetic.
 */

use std::fmt;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// How the timestamp was produced upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    #[default]
    Unknown,
    /// Timecode from frame counting (SCC/MCC style)
    FrameNumbering,
    /// Timecode derived from presentation timestamps
    PtsNumbering,
}

/// An immutable caption instant with its derived frame position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCaptionTime", into = "RawCaptionTime")]
pub struct CaptionTime {
    hour: u8,
    minute: u8,
    second: u8,
    frame: u8,
    millisecond: u16,
    drop_frame: bool,
    frame_rate_x100: u32,
    source: TimeSource,
    frame_position_x100: u64,
}

impl CaptionTime {
    /// Creates a caption time; the frame position is computed here and never changes
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hour: u8,
        minute: u8,
        second: u8,
        frame: u8,
        millisecond: u16,
        drop_frame: bool,
        frame_rate_x100: u32,
        source: TimeSource,
    ) -> Self {
        let whole_seconds = u64::from(hour) * 3600 + u64::from(minute) * 60 + u64::from(second);
        let frame_position_x100 = whole_seconds * u64::from(frame_rate_x100) + u64::from(frame) * 100;

        CaptionTime {
            hour,
            minute,
            second,
            frame,
            millisecond,
            drop_frame,
            frame_rate_x100,
            source,
            frame_position_x100,
        }
    }

    // @validates: Minutes and seconds inside 0-59, milliseconds inside 0-999
    #[allow(clippy::too_many_arguments)]
    pub fn new_validated(
        hour: u8,
        minute: u8,
        second: u8,
        frame: u8,
        millisecond: u16,
        drop_frame: bool,
        frame_rate_x100: u32,
        source: TimeSource,
    ) -> Result<Self> {
        if minute >= 60 || second >= 60 {
            return Err(anyhow!(
                "Invalid time components: {:02}:{:02}:{:02}",
                hour, minute, second
            ));
        }
        if millisecond >= 1000 {
            return Err(anyhow!("Invalid millisecond value: {}", millisecond));
        }

        Ok(Self::new(hour, minute, second, frame, millisecond, drop_frame, frame_rate_x100, source))
    }

    /// Frame-numbered timecode, as produced from SCC/MCC sources
    pub fn from_frames(hour: u8, minute: u8, second: u8, frame: u8, drop_frame: bool, frame_rate_x100: u32) -> Self {
        Self::new(hour, minute, second, frame, 0, drop_frame, frame_rate_x100, TimeSource::FrameNumbering)
    }

    /// Millisecond timecode, as produced from PTS-driven sources
    pub fn from_millis(hour: u8, minute: u8, second: u8, millisecond: u16, frame_rate_x100: u32) -> Self {
        Self::new(hour, minute, second, 0, millisecond, false, frame_rate_x100, TimeSource::PtsNumbering)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }

    /// Frame rate times one hundred
    pub fn frame_rate_x100(&self) -> u32 {
        self.frame_rate_x100
    }

    pub fn source(&self) -> TimeSource {
        self.source
    }

    /// Absolute frame position scaled by one hundred
    ///
    /// `(h * 3600 + m * 60 + s) * frame_rate_x100 + frame * 100`, exact for
    /// fractional rates such as 29.97.
    pub fn frame_position_x100(&self) -> u64 {
        self.frame_position_x100
    }

    /// Absolute frame position, truncated to a whole frame
    pub fn frame_position(&self) -> u64 {
        self.frame_position_x100 / 100
    }
}

impl fmt::Display for CaptionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            TimeSource::FrameNumbering => {
                let separator = if self.drop_frame { ';' } else { ':' };
                write!(
                    f,
                    "[{:02}:{:02}:{:02}{}{:02}]",
                    self.hour, self.minute, self.second, separator, self.frame
                )
            }
            _ => write!(
                f,
                "[{:02}:{:02}:{:02},{:03}]",
                self.hour, self.minute, self.second, self.millisecond
            ),
        }
    }
}

/// Wire form of a caption time, without the derived frame position
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCaptionTime {
    #[serde(default)]
    hour: u8,
    #[serde(default)]
    minute: u8,
    #[serde(default)]
    second: u8,
    #[serde(default)]
    frame: u8,
    #[serde(default)]
    millisecond: u16,
    #[serde(default)]
    drop_frame: bool,
    #[serde(default)]
    frame_rate_x100: u32,
    #[serde(default)]
    source: TimeSource,
}

impl TryFrom<RawCaptionTime> for CaptionTime {
    type Error = String;

    fn try_from(raw: RawCaptionTime) -> std::result::Result<Self, Self::Error> {
        CaptionTime::new_validated(
            raw.hour,
            raw.minute,
            raw.second,
            raw.frame,
            raw.millisecond,
            raw.drop_frame,
            raw.frame_rate_x100,
            raw.source,
        )
        .map_err(|e| e.to_string())
    }
}

impl From<CaptionTime> for RawCaptionTime {
    fn from(time: CaptionTime) -> Self {
        RawCaptionTime {
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            frame: time.frame,
            millisecond: time.millisecond,
            drop_frame: time.drop_frame,
            frame_rate_x100: time.frame_rate_x100,
            source: time.source,
        }
    }
}
