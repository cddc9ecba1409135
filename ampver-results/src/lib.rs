// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for `ampver-tables`.
//!
//! AMPVer writes one `<DataStructure>_<TestId>.out` file per run into a result directory. This
//! crate reads such a directory back:
//!
//! 1. [`aggregate::discover_result_files`] lists the result files.
//! 2. [`extract::extract_fields`] recovers the time, schedule count and outcome of each run.
//! 3. [`source::find_source`] attributes each data structure to its declared source file.
//! 4. [`aggregate::aggregate_files`] combines these into a [`ResultsTable`], which
//!    [`render`] turns into LaTeX or HTML.

pub mod aggregate;
pub mod errors;
pub mod extract;
pub mod render;
pub mod source;

pub use aggregate::ResultsTable;
