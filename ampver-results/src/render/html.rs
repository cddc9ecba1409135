// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::tooltip::tooltip;
use crate::aggregate::{AggregatedResults, SourcePathMap};
use quick_xml::escape::escape;
use swrite::{SWrite, swrite, swriteln};

static STYLE: &str = r#"<style type="text/css">
.tg  {border-collapse:collapse;border-spacing:0;}
.tg td{border-color:black;border-style:solid;border-width:1px;
       font-family:Arial, sans-serif;font-size:14px;
       overflow:hidden;padding:10px 5px;word-break:normal;}
.tg th{border-color:black;border-style:solid;border-width:1px;
       font-family:Arial, sans-serif;font-size:14px;
       font-weight:normal;overflow:hidden;padding:10px 5px;word-break:normal;}
.tg .tg-head{border-color:inherit;font-family:serif !important;
             background-color:darkgrey;text-align:left;vertical-align:top;
             font-weight:bold}
.tg .tg-left{border-color:inherit;font-family:serif !important;
             background-color:lightgrey;text-align:left;vertical-align:top}
.tg .tg-base{border-color:inherit;font-family:serif !important;
             background-color:white;text-align:left;vertical-align:top}
.tg .tg-fail{border-color:inherit;font-family:serif !important;
             background-color:lightcoral;text-align:left;vertical-align:top;
             font-weight:bold}
</style>
"#;

/// Options for [`render_html`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Prefix of links to result files and their `.dir` directories, relative to the page.
    pub link_prefix: String,
}

impl HtmlOptions {
    /// The default link prefix.
    pub const DEFAULT_LINK_PREFIX: &'static str = "out/";
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            link_prefix: Self::DEFAULT_LINK_PREFIX.to_owned(),
        }
    }
}

/// Renders results as a styled HTML table.
///
/// Row labels link to the data structure's source file when one was resolved. Each present cell
/// links to the raw result file and its schedule directory, and failing cells also link to the
/// schedule that failed. Names, paths and tooltips are escaped for attribute and text positions.
pub fn render_html(
    results: &AggregatedResults,
    test_ids: &[String],
    source_paths: &SourcePathMap,
    options: &HtmlOptions,
) -> String {
    let prefix = &options.link_prefix;
    let mut out = String::from(STYLE);

    out.push_str("<table class=\"tg\"><thead>\n");
    out.push_str("  <tr>\n");
    out.push_str("    <th class=\"tg-head\"> </th>\n");
    for test_id in test_ids {
        swriteln!(
            out,
            "    <th class=\"tg-head\" title=\"{}\">{}</th>",
            escape(tooltip(test_id)),
            escape(test_id),
        );
    }
    out.push_str("  </tr></thead>\n");

    out.push_str("<tbody>\n");
    for (data_structure, records) in results {
        out.push_str("  <tr>\n");
        let label = escape(data_structure);

        match source_paths.get(data_structure).and_then(|p| p.as_resolved()) {
            Some(path) => swriteln!(
                out,
                "    <td class=\"tg-left\"><a href=\"{}\">{label}</a></td>",
                escape(path),
            ),
            None => swriteln!(out, "    <td class=\"tg-left\">{label}</td>"),
        }

        for test_id in test_ids {
            let Some(record) = records.get(test_id) else {
                out.push_str("    <td class=\"tg-base\">--</td>\n");
                continue;
            };

            let base = escape(&format!("{prefix}{data_structure}_{test_id}")).into_owned();
            if record.passed {
                swrite!(out, "    <td class=\"tg-base\">{} sec.", record.elapsed_time);
            } else {
                swrite!(
                    out,
                    "    <td class=\"tg-fail\"><a href=\"{base}.dir/schedule_{}.out\">{} sec.</a>",
                    record.schedule_count,
                    record.elapsed_time,
                );
            }
            swriteln!(
                out,
                " (<a href=\"{base}.out\">out</a>, <a href=\"{base}.dir\">dir</a>)</td>"
            );
        }
        out.push_str("  </tr>\n");
    }
    out.push_str("</tbody>\n");
    out.push_str("</table>\n");
    out
}
