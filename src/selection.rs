//! Time-of-day selection emitted by the input control.

use chrono::NaiveTime;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raw value the slider reports when no time is selected.
pub const ANY_TIME: i32 = -1;

/// Last minute of the day.
pub const MAX_MINUTE: u16 = 1439;

/// Step between slider positions.
pub const SLIDER_STEP_MINUTES: u16 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Minute {0} is outside 0..=1439 (use -1 for any time)")]
    OutOfRange(i64),

    #[error("Cannot parse time selection {0:?}")]
    Unparsable(String),
}

/// Either every trip (`Any`) or trips near a minute of the day.
///
/// `At` holds a minute in `0..=1439`. Build it through [`TimeSelection::at`],
/// `TryFrom<i32>` or `FromStr` to have that checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeSelection {
    #[default]
    Any,
    At(u16),
}

impl TimeSelection {
    pub fn at(minute: u16) -> Result<Self, SelectionError> {
        if minute > MAX_MINUTE {
            return Err(SelectionError::OutOfRange(minute as i64));
        }
        Ok(TimeSelection::At(minute))
    }

    pub fn is_active(self) -> bool {
        matches!(self, TimeSelection::At(_))
    }

    pub fn minute(self) -> Option<u16> {
        match self {
            TimeSelection::Any => None,
            TimeSelection::At(minute) => Some(minute),
        }
    }

    /// Slider value: the minute, or `-1` for any time.
    pub fn raw(self) -> i32 {
        self.minute().map_or(ANY_TIME, i32::from)
    }

    /// Display text for the slider, e.g. `8:10 AM`.
    pub fn label(self) -> String {
        match self {
            TimeSelection::Any => "any time".to_string(),
            TimeSelection::At(minute) => {
                NaiveTime::from_hms_opt(u32::from(minute / 60), u32::from(minute % 60), 0)
                    .map(|t| t.format("%-I:%M %p").to_string())
                    .unwrap_or_else(|| format!("minute {minute}"))
            }
        }
    }
}

impl TryFrom<i32> for TimeSelection {
    type Error = SelectionError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            ANY_TIME => Ok(TimeSelection::Any),
            0..=1439 => Ok(TimeSelection::At(raw as u16)),
            _ => Err(SelectionError::OutOfRange(raw as i64)),
        }
    }
}

impl FromStr for TimeSelection {
    type Err = SelectionError;

    /// Accepts `-1`, `any`, a minute count (`480`) or a clock time (`08:00`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(TimeSelection::Any);
        }

        if let Ok(raw) = s.parse::<i64>() {
            let raw = i32::try_from(raw).map_err(|_| SelectionError::OutOfRange(raw))?;
            return TimeSelection::try_from(raw);
        }

        let time = NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|_| SelectionError::Unparsable(s.to_string()))?;
        TimeSelection::try_from(crate::traffic::minute_of_day(&time))
    }
}

impl fmt::Display for TimeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// Every slider position: `Any` first, then each `step` minutes from midnight.
pub fn slider_positions(step: u16) -> Vec<TimeSelection> {
    let step = step.max(1);
    std::iter::once(TimeSelection::Any)
        .chain(
            (0..=MAX_MINUTE)
                .step_by(usize::from(step))
                .map(TimeSelection::At),
        )
        .collect()
}
