// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render AMPVer test-run results as LaTeX or HTML tables.
//!
//! ```text
//! ampver-tables <ROOT_DIR> <OUTPUT> [--format latex|html]
//! ```

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
