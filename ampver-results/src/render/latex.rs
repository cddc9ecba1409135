// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::aggregate::AggregatedResults;
use swrite::{SWrite, swrite, swriteln};

/// Renders results as a LaTeX `table` with one row per data structure and one column per test.
///
/// Failing runs are set in bold and missing runs are shown as `--`. The table uses `\toprule` from
/// `booktabs` and expects a `\code` macro to be defined.
pub fn render_latex(results: &AggregatedResults, test_ids: &[String]) -> String {
    let mut out = String::new();

    out.push_str("\\begin{table}[ht]\n");
    out.push_str("\\small\n");
    out.push_str("\\centering\n");
    swriteln!(out, "\\begin{{tabular}}{{ l {} }}", " r".repeat(test_ids.len()));

    out.push_str("  Data\\ Structure");
    for test_id in test_ids {
        swrite!(out, " & {test_id}");
    }
    out.push_str(" \\\\\n");
    out.push_str("  \\toprule\n");

    for (data_structure, records) in results {
        swrite!(out, "  \\code{{{data_structure}}}");
        for test_id in test_ids {
            match records.get(test_id) {
                Some(record) if record.passed => swrite!(out, " & {}", record.elapsed_time),
                Some(record) => swrite!(out, " & \\textbf{{{}}}", record.elapsed_time),
                None => out.push_str(" & --"),
            }
        }
        out.push_str(" \\\\\n");
    }

    out.push_str("\\end{tabular}\n");
    out.push_str("\\caption{Results of the experiments.}\\label{tab:results}\n");
    out.push_str("\\end{table}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ResultRecord;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn record(elapsed_time: u64, passed: bool) -> ResultRecord {
        ResultRecord {
            elapsed_time,
            passed,
            schedule_count: 1,
        }
    }

    #[test]
    fn renders_pass_fail_and_missing() {
        let mut results = AggregatedResults::new();
        results.insert(
            "Queue".to_owned(),
            BTreeMap::from([("A".to_owned(), record(3, true))]),
        );
        results.insert(
            "Set".to_owned(),
            BTreeMap::from([
                ("A".to_owned(), record(12, true)),
                ("B".to_owned(), record(0, false)),
            ]),
        );
        let test_ids = vec!["A".to_owned(), "B".to_owned()];

        let expected = indoc! {r"
            \begin{table}[ht]
            \small
            \centering
            \begin{tabular}{ l  r r }
              Data\ Structure & A & B \\
              \toprule
              \code{Queue} & 3 & -- \\
              \code{Set} & 12 & \textbf{0} \\
            \end{tabular}
            \caption{Results of the experiments.}\label{tab:results}
            \end{table}
        "};
        assert_eq!(render_latex(&results, &test_ids), expected);
    }

    #[test]
    fn renders_empty_results() {
        let rendered = render_latex(&AggregatedResults::new(), &[]);
        assert!(rendered.contains("\\begin{tabular}{ l  }\n"));
        assert!(rendered.contains("  Data\\ Structure \\\\\n  \\toprule\n\\end{tabular}"));
    }
}
