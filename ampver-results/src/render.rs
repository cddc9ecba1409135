// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of aggregated results as LaTeX or HTML tables.

mod html;
mod latex;
pub mod tooltip;

pub use html::{HtmlOptions, render_html};
pub use latex::render_latex;

use crate::{aggregate::ResultsTable, errors::TableFormatParseError};
use std::{fmt, str::FromStr};

/// The output format of a results table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableFormat {
    /// A LaTeX `table` environment.
    #[default]
    Latex,

    /// A self-contained HTML `<table>` with inline styling.
    Html,
}

impl TableFormat {
    /// Returns string representations of all known variants.
    pub fn variants() -> &'static [&'static str] {
        &["latex", "html"]
    }
}

impl FromStr for TableFormat {
    type Err = TableFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latex" => Ok(TableFormat::Latex),
            "html" => Ok(TableFormat::Html),
            other => Err(TableFormatParseError::new(other)),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Latex => f.write_str("latex"),
            TableFormat::Html => f.write_str("html"),
        }
    }
}

impl ResultsTable {
    /// Renders this table in the given format.
    ///
    /// `html_options` is only consulted for [`TableFormat::Html`].
    pub fn render(&self, format: TableFormat, html_options: &HtmlOptions) -> String {
        match format {
            TableFormat::Latex => render_latex(&self.results, &self.test_ids),
            TableFormat::Html => {
                render_html(&self.results, &self.test_ids, &self.source_paths, html_options)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_format_from_str() {
        assert_eq!("latex".parse::<TableFormat>(), Ok(TableFormat::Latex));
        assert_eq!("html".parse::<TableFormat>(), Ok(TableFormat::Html));

        let err = "markdown".parse::<TableFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unrecognized value for format: markdown\n(known values: latex, html)"
        );
    }

    #[test]
    fn table_format_display_round_trips() {
        for variant in TableFormat::variants() {
            let format: TableFormat = variant.parse().unwrap();
            assert_eq!(format.to_string(), *variant);
        }
    }
}
