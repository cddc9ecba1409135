// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field extraction for a single AMPVer result file.
//!
//! A result file ends with two lines of interest. A data structure that passes reports:
//!
//! ```text
//! N schedules generated.  All tests pass.
//! Time (seconds) = 0.000
//! ```
//!
//! and one that fails reports:
//!
//! ```text
//! AMPVer: error detected on schedule x.  Exiting.
//! Time (seconds) = 0.000
//! ```
//!
//! Everything else in the file is ignored.

use crate::errors::ExtractError;
use regex::Regex;
use std::sync::LazyLock;

static TIME_MARKER: &str = "Time (seconds)";
static PASS_MARKER: &str = "All tests pass.";
static FAIL_MARKER: &str = "AMPVer: error";

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// The outcome of one (data structure, test) run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResultRecord {
    /// Wall-clock time in whole seconds, rounded half to even.
    pub elapsed_time: u64,

    /// Whether every explored schedule passed.
    pub passed: bool,

    /// For a passing run, the number of schedules generated. For a failing run, the schedule
    /// that triggered the failure.
    pub schedule_count: u64,
}

/// Extracts a [`ResultRecord`] from the lines of a result file.
///
/// `file_name` is only used in error messages.
///
/// The first `Time (seconds)` line and the first schedule count win, while the last pass or fail
/// marker decides `passed`. Every line is scanned, since a later marker can still flip `passed`.
pub fn extract_fields<'a, I>(lines: I, file_name: &str) -> Result<ResultRecord, ExtractError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut elapsed_time = None;
    let mut schedule_count = None;
    let mut passed = None;

    for line in lines {
        if line.starts_with(TIME_MARKER) && elapsed_time.is_none() {
            elapsed_time = Some(parse_time(line, file_name)?);
        } else if line.contains(PASS_MARKER) {
            passed = Some(true);
            if schedule_count.is_none() {
                schedule_count = Some(parse_schedule_count(line, file_name)?);
            }
        } else if line.starts_with(FAIL_MARKER) {
            passed = Some(false);
            if schedule_count.is_none() {
                schedule_count = Some(parse_schedule_count(line, file_name)?);
            }
        }
    }

    let elapsed_time = elapsed_time.ok_or_else(|| ExtractError::MissingTime {
        file_name: file_name.to_owned(),
    })?;
    let schedule_count = schedule_count.ok_or_else(|| ExtractError::MissingScheduleCount {
        file_name: file_name.to_owned(),
    })?;
    let passed = passed.ok_or_else(|| ExtractError::MissingStatus {
        file_name: file_name.to_owned(),
    })?;

    Ok(ResultRecord {
        elapsed_time,
        passed,
        schedule_count,
    })
}

/// Extracts a [`ResultRecord`] from the full contents of a result file.
pub fn extract_from_str(contents: &str, file_name: &str) -> Result<ResultRecord, ExtractError> {
    extract_fields(contents.lines(), file_name)
}

fn parse_time(line: &str, file_name: &str) -> Result<u64, ExtractError> {
    let value = line.split('=').nth(1).unwrap_or_default().trim();
    let invalid = |err| ExtractError::InvalidTime {
        file_name: file_name.to_owned(),
        value: value.to_owned(),
        err,
    };

    let seconds: f64 = value.parse().map_err(|err| invalid(Some(err)))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid(None));
    }
    Ok(seconds.round_ties_even() as u64)
}

fn parse_schedule_count(line: &str, file_name: &str) -> Result<u64, ExtractError> {
    let invalid = |err| ExtractError::InvalidScheduleCount {
        file_name: file_name.to_owned(),
        line: line.trim_end().to_owned(),
        err,
    };

    let digits = DIGITS_RE.find(line).ok_or_else(|| invalid(None))?;
    digits.as_str().parse().map_err(|err| invalid(Some(err)))
}
