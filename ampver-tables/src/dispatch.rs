// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line parsing and execution.

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts},
};
use ampver_results::{
    aggregate::aggregate,
    render::{HtmlOptions, TableFormat},
};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

/// Render AMPVer test-run results as a LaTeX or HTML table.
///
/// ROOT_DIR holds one `<DataStructure>_<TestId>.out` file per run, with per-schedule logs in
/// `<DataStructure>_<TestId>.dir/`.
#[derive(Debug, Parser)]
#[command(
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct AmpverTablesApp {
    /// The directory containing the result files
    #[arg(value_name = "ROOT_DIR")]
    root_dir: Utf8PathBuf,

    /// The file to write the table to
    #[arg(value_name = "OUTPUT")]
    output: Utf8PathBuf,

    /// The format of the table: latex or html
    #[arg(long, value_name = "FORMAT", default_value = "latex", env = "AMPVER_TABLE_FORMAT")]
    format: String,

    /// Prefix of the result file links in HTML tables
    #[arg(
        long,
        value_name = "PREFIX",
        default_value = HtmlOptions::DEFAULT_LINK_PREFIX,
        env = "AMPVER_LINK_PREFIX"
    )]
    link_prefix: String,

    #[clap(flatten)]
    output_opts: OutputOpts,
}

impl AmpverTablesApp {
    /// Initializes logging and returns the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output_opts.init()
    }

    /// Executes the app.
    pub fn exec(self) -> Result<()> {
        // Reject a bad format before touching the result directory.
        let format: TableFormat = self.format.parse()?;

        let table = aggregate(&self.root_dir)?;
        let html_options = HtmlOptions {
            link_prefix: self.link_prefix,
        };
        let rendered = table.render(format, &html_options);

        atomicwrites::AtomicFile::new(&self.output, atomicwrites::AllowOverwrite)
            .write(|file| file.write_all(rendered.as_bytes()))
            .map_err(|err| ExpectedError::write_output(self.output.clone(), err))?;

        tracing::info!(
            "wrote {format} table with {} data structures to {}",
            table.results.len(),
            self.output
        );
        Ok(())
    }
}
