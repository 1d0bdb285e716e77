use chrono::{Datelike, NaiveDate, Weekday};
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of every synthesized name, regardless of the source's case.
pub const TARGET_EXTENSION: &str = "jpg";

// `d` marks a digit; every other byte must match literally.
const STAMP_LAYOUT: &[u8] = b"dddd:dd:dd dd:dd:dd";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StampError {
    #[error("timestamp is not laid out as YYYY:MM:DD HH:MM:SS")]
    Layout,
    #[error("timestamp year is zero")]
    ZeroYear,
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// A validated EXIF `DateTime` value.
///
/// The date part is checked against the proleptic Gregorian calendar. The
/// time digits are carried through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureStamp {
    date: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
}

impl CaptureStamp {
    pub fn parse(raw: &str) -> Result<Self, StampError> {
        let bytes = raw.trim().as_bytes();
        let matches_layout = bytes.len() == STAMP_LAYOUT.len()
            && bytes
                .iter()
                .zip(STAMP_LAYOUT)
                .all(|(byte, expected)| match expected {
                    b'd' => byte.is_ascii_digit(),
                    sep => byte == sep,
                });
        if !matches_layout {
            return Err(StampError::Layout);
        }

        let number = |range: Range<usize>| {
            bytes[range]
                .iter()
                .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'))
        };

        let year = number(0..4) as i32;
        if year == 0 {
            return Err(StampError::ZeroYear);
        }
        let month = number(5..7);
        let day = number(8..10);
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(StampError::InvalidDate { year, month, day })?;

        Ok(Self {
            date,
            hour: number(11..13),
            minute: number(14..16),
            second: number(17..19),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn weekday_name(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// `YYYY-MM-DD_HH-MM-SS_Weekday.jpg`, safe on filesystems that reject `:`.
    pub fn file_name(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}_{}.{}",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.hour,
            self.minute,
            self.second,
            self.weekday_name(),
            TARGET_EXTENSION
        )
    }
}

pub fn make_filename_from_datetime(dir: &Path, raw: &str) -> Result<PathBuf, StampError> {
    let stamp = CaptureStamp::parse(raw)?;
    Ok(dir.join(stamp.file_name()))
}
