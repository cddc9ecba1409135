// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while reading and rendering AMPVer results.

use crate::render::TableFormat;
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// An error that occurred while extracting fields from a single result file.
///
/// Every variant names the offending file. Extraction never substitutes defaults for
/// missing fields.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// No `Time (seconds)` line was found.
    #[error("no time recorded in file `{file_name}`")]
    MissingTime {
        /// The file being read.
        file_name: String,
    },

    /// No pass or fail marker carried a schedule count.
    #[error("no schedule number in file `{file_name}`")]
    MissingScheduleCount {
        /// The file being read.
        file_name: String,
    },

    /// Neither a pass nor a fail marker was found.
    #[error("could not find pass or fail status in `{file_name}`")]
    MissingStatus {
        /// The file being read.
        file_name: String,
    },

    /// The value of a `Time (seconds)` line could not be read as a duration.
    #[error("invalid time `{value}` in file `{file_name}`")]
    InvalidTime {
        /// The file being read.
        file_name: String,
        /// The text after `=`.
        value: String,
        /// The parse error, if the value was not a number at all.
        #[source]
        err: Option<ParseFloatError>,
    },

    /// A pass or fail marker did not carry a usable schedule count.
    #[error("invalid schedule number in file `{file_name}` (line: `{line}`)")]
    InvalidScheduleCount {
        /// The file being read.
        file_name: String,
        /// The marker line.
        line: String,
        /// The parse error, if a digit run was found but did not fit.
        #[source]
        err: Option<ParseIntError>,
    },
}

/// An error returned while parsing a result file name of the form `<DataStructure>_<TestId>.out`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("result file name `{file_name}` is not of the form `<DataStructure>_<TestId>.out`")]
pub struct ResultFileNameError {
    file_name: String,
}

impl ResultFileNameError {
    pub(crate) fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Returns the file name that failed to parse.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// An error that occurred while looking up the declared source file for a result file.
///
/// A missing detail log is not an error: it resolves to
/// [`SourcePath::NoFile`](crate::source::SourcePath::NoFile).
#[derive(Debug, Error)]
#[error("failed to read detail log `{path}`")]
pub struct SourceLookupError {
    path: Utf8PathBuf,
    #[source]
    err: std::io::Error,
}

impl SourceLookupError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self {
            path: path.into(),
            err,
        }
    }

    /// Returns the path of the detail log.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// An error that aborts aggregation of a result directory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AggregateError {
    /// The result directory could not be listed.
    #[error("failed to read result directory `{root_dir}`")]
    ReadDir {
        /// The result directory.
        root_dir: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: std::io::Error,
    },

    /// A directory entry had a name that is not valid UTF-8.
    #[error("result directory `{root_dir}` contains a non-UTF-8 file name: {file_name:?}")]
    NonUtf8FileName {
        /// The result directory.
        root_dir: Utf8PathBuf,
        /// The lossy form of the entry name.
        file_name: String,
    },

    /// A selected result file had a malformed name.
    #[error(transparent)]
    FileName(#[from] ResultFileNameError),

    /// A result file could not be read.
    #[error("failed to read result file `{path}`")]
    ReadResultFile {
        /// The result file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: std::io::Error,
    },

    /// A result file was malformed.
    #[error("failed to extract results from `{path}`")]
    Extract {
        /// The result file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: ExtractError,
    },

    /// A detail log existed but could not be read.
    #[error(transparent)]
    SourceLookup(#[from] SourceLookupError),
}

/// Error returned while parsing a [`TableFormat`] value from a string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error(
    "unrecognized value for format: {input}\n(known values: {})",
    TableFormat::variants().iter().join(", "),
)]
pub struct TableFormatParseError {
    input: String,
}

impl TableFormatParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
