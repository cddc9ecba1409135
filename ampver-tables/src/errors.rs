// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::StderrStyles;
use ampver_results::errors::{AggregateError, TableFormatParseError};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Exit codes returned by `ampver-tables`.
#[doc(hidden)]
pub enum ReportExitCode {}

impl ReportExitCode {
    /// The command line or the result directory could not be set up.
    pub const SETUP_ERROR: i32 = 96;

    /// A result file was malformed.
    pub const EXTRACT_FAILED: i32 = 101;

    /// A detail log existed but could not be read.
    pub const SOURCE_LOOKUP_FAILED: i32 = 102;

    /// The rendered table could not be written.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}

// The #[error()] strings are short placeholders: errors are meant to be printed with
// display_to_stderr, which also walks the chain of causes.

/// An error that terminates `ampver-tables`.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("invalid table format")]
    TableFormatParse {
        #[from]
        err: TableFormatParseError,
    },
    #[error("aggregation failed")]
    Aggregate {
        #[from]
        err: AggregateError,
    },
    #[error("failed to write output")]
    WriteOutput {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn write_output(path: Utf8PathBuf, err: atomicwrites::Error<std::io::Error>) -> Self {
        let err = match err {
            atomicwrites::Error::Internal(err) | atomicwrites::Error::User(err) => err,
        };
        Self::WriteOutput { path, err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::TableFormatParse { .. } => ReportExitCode::SETUP_ERROR,
            Self::Aggregate { err } => match err {
                AggregateError::Extract { .. } => ReportExitCode::EXTRACT_FAILED,
                AggregateError::SourceLookup(_) => ReportExitCode::SOURCE_LOOKUP_FAILED,
                _ => ReportExitCode::SETUP_ERROR,
            },
            Self::WriteOutput { .. } => ReportExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::TableFormatParse { err } => {
                tracing::error!("{err}");
                None
            }
            Self::Aggregate { err } => {
                tracing::error!("{err}");
                err.source()
            }
            Self::WriteOutput { path, err } => {
                tracing::error!("failed to write table to `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: "ampver_tables::no_heading", "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
