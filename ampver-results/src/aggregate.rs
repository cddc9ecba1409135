// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregation of a directory of AMPVer result files into a table.
//!
//! The directory holds one `<DataStructure>_<TestId>.out` file per run, plus a `<base>.dir`
//! directory of per-schedule logs for each. Schedule outputs (names containing `_S`) are skipped.

use crate::{
    errors::{AggregateError, ResultFileNameError},
    extract::{ResultRecord, extract_from_str},
    source::{SourcePath, find_source, merge_source_path, needs_resolution},
};
use camino::Utf8Path;
use itertools::Itertools;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

static RESULT_SUFFIX: &str = ".out";
static SCHEDULE_MARKER: &str = "_S";

/// Results keyed by data structure, then by test id.
pub type AggregatedResults = BTreeMap<String, BTreeMap<String, ResultRecord>>;

/// Declared source paths keyed by data structure.
pub type SourcePathMap = BTreeMap<String, SourcePath>;

/// The name of a result file, split into its data structure and test id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResultFileName {
    file_name: String,
    split: usize,
}

impl ResultFileName {
    /// Parses a file name of the form `<DataStructure>_<TestId>.out`.
    ///
    /// The data structure is everything before the first underscore.
    pub fn new(file_name: impl Into<String>) -> Result<Self, ResultFileNameError> {
        let file_name = file_name.into();
        let Some(stem) = file_name.strip_suffix(RESULT_SUFFIX) else {
            return Err(ResultFileNameError::new(file_name));
        };
        match stem.find('_') {
            Some(split) if split > 0 && split + 1 < stem.len() => Ok(Self { file_name, split }),
            _ => Err(ResultFileNameError::new(file_name)),
        }
    }

    /// Returns true if `file_name` names a result file rather than a schedule output.
    pub fn is_result_file(file_name: &str) -> bool {
        file_name.ends_with(RESULT_SUFFIX) && !file_name.contains(SCHEDULE_MARKER)
    }

    /// The full file name.
    pub fn as_str(&self) -> &str {
        &self.file_name
    }

    /// The data structure under test.
    pub fn data_structure(&self) -> &str {
        &self.file_name[..self.split]
    }

    /// The test bound the data structure was run under.
    pub fn test_id(&self) -> &str {
        &self.file_name[self.split + 1..self.file_name.len() - RESULT_SUFFIX.len()]
    }
}

impl fmt::Display for ResultFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// The aggregated contents of a result directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultsTable {
    /// Results keyed by data structure and test id, in sorted order.
    pub results: AggregatedResults,

    /// Every test id seen, sorted.
    pub test_ids: Vec<String>,

    /// The source path recorded for each data structure.
    pub source_paths: SourcePathMap,
}

/// Lists the result files in `root_dir`, in the order the filesystem reports them.
///
/// Only regular files (or symlinks to them) are selected.
///
/// This is the only place where directory order enters aggregation.
pub fn discover_result_files(root_dir: &Utf8Path) -> Result<Vec<ResultFileName>, AggregateError> {
    let read_dir_err = |err| AggregateError::ReadDir {
        root_dir: root_dir.to_owned(),
        err,
    };

    let mut files = Vec::new();
    for entry in fs_err::read_dir(root_dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let file_name =
            entry
                .file_name()
                .into_string()
                .map_err(|name| AggregateError::NonUtf8FileName {
                    root_dir: root_dir.to_owned(),
                    file_name: name.to_string_lossy().into_owned(),
                })?;
        if !ResultFileName::is_result_file(&file_name) {
            continue;
        }

        let file_type = entry.file_type().map_err(read_dir_err)?;
        let is_file = if file_type.is_symlink() {
            entry.path().is_file()
        } else {
            file_type.is_file()
        };
        if !is_file {
            tracing::debug!("skipping `{file_name}`: not a regular file");
            continue;
        }

        files.push(ResultFileName::new(file_name)?);
    }

    Ok(files)
}

/// Aggregates the given result files from `root_dir`, processing them in order.
///
/// The first result file of a data structure to resolve a source path determines that data
/// structure's path, so the outcome for `source_paths` depends on the order of `files`. Records
/// and test ids do not.
pub fn aggregate_files<I>(root_dir: &Utf8Path, files: I) -> Result<ResultsTable, AggregateError>
where
    I: IntoIterator<Item = ResultFileName>,
{
    let mut results = AggregatedResults::new();
    let mut test_ids = BTreeSet::new();
    let mut source_paths = SourcePathMap::new();

    for file in files {
        tracing::info!("processing {file}");

        let path = root_dir.join(file.as_str());
        let contents =
            fs_err::read_to_string(&path).map_err(|err| AggregateError::ReadResultFile {
                path: path.clone(),
                err,
            })?;
        let record = extract_from_str(&contents, file.as_str())
            .map_err(|err| AggregateError::Extract { path, err })?;

        let data_structure = file.data_structure();
        if needs_resolution(source_paths.get(data_structure)) {
            let candidate = find_source(root_dir, file.as_str())?;
            let existing = source_paths.remove(data_structure);
            source_paths.insert(
                data_structure.to_owned(),
                merge_source_path(existing, candidate),
            );
        }

        test_ids.insert(file.test_id().to_owned());
        results
            .entry(data_structure.to_owned())
            .or_default()
            .insert(file.test_id().to_owned(), record);
    }

    tracing::info!(
        "found the following {} tests: {}",
        test_ids.len(),
        test_ids.iter().join(", ")
    );
    tracing::info!(
        "found the following {} data structures: {}",
        results.len(),
        results.keys().join(", ")
    );

    Ok(ResultsTable {
        results,
        test_ids: test_ids.into_iter().collect(),
        source_paths,
    })
}

/// Discovers and aggregates every result file in `root_dir`.
///
/// Any malformed result file aborts the whole aggregation.
pub fn aggregate(root_dir: &Utf8Path) -> Result<ResultsTable, AggregateError> {
    let files = discover_result_files(root_dir)?;
    aggregate_files(root_dir, files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExtractError;
    use camino_tempfile::{Utf8TempDir, tempdir};
    use camino_tempfile_ext::prelude::*;
    use test_case::test_case;

    static PASS: &str = "5 schedules generated.  All tests pass.\nTime (seconds) = 2.700\n";
    static FAIL: &str = "AMPVer: error detected on schedule 12.  Exiting.\nTime (seconds) = 0.400\n";

    fn write_result(dir: &Utf8TempDir, name: &str, contents: &str) {
        dir.child(name).write_str(contents).unwrap();
    }

    fn write_detail_log(dir: &Utf8TempDir, base: &str, sources: &[&str]) {
        dir.child(format!("{base}.dir")).create_dir_all().unwrap();
        let mut contents = String::from("Source files:\n");
        for source in sources {
            contents.push_str(source);
            contents.push('\n');
        }
        contents.push('\n');
        dir.child(format!("{base}.dir/schedule_0.out"))
            .write_str(&contents)
            .unwrap();
    }

    fn names(names: &[&str]) -> Vec<ResultFileName> {
        names
            .iter()
            .map(|name| ResultFileName::new(*name).unwrap())
            .collect()
    }

    #[test_case("Foo_A.out", "Foo", "A" ; "simple")]
    #[test_case("Foo_bound_A.out", "Foo", "bound_A" ; "split on first underscore")]
    #[test_case("Foo_A.1.out", "Foo", "A.1" ; "dotted test id")]
    fn result_file_name(file_name: &str, data_structure: &str, test_id: &str) {
        let name = ResultFileName::new(file_name).unwrap();
        assert_eq!(name.data_structure(), data_structure);
        assert_eq!(name.test_id(), test_id);
        assert_eq!(name.to_string(), file_name);
    }

    #[test_case("Foo.out" ; "no underscore")]
    #[test_case("_A.out" ; "empty data structure")]
    #[test_case("Foo_.out" ; "empty test id")]
    #[test_case("Foo_A.txt" ; "wrong suffix")]
    fn result_file_name_invalid(file_name: &str) {
        let err = ResultFileName::new(file_name).unwrap_err();
        assert_eq!(err.file_name(), file_name);
    }

    #[test]
    fn discover_skips_schedule_outputs() {
        let dir = tempdir().unwrap();
        write_result(&dir, "Foo_A.out", PASS);
        write_result(&dir, "Foo_S1.out", PASS);
        write_result(&dir, "notes.txt", "");
        write_detail_log(&dir, "Foo_A", &[]);
        dir.child("Foo_B.out").create_dir_all().unwrap();

        let files = discover_result_files(dir.path()).unwrap();
        assert_eq!(files, names(&["Foo_A.out"]));

        let table = aggregate(dir.path()).unwrap();
        assert_eq!(table.test_ids, vec!["A"]);
    }

    #[test]
    fn aggregate_directory() {
        let dir = tempdir().unwrap();
        write_result(&dir, "Foo_A.out", PASS);
        write_result(&dir, "Foo_B.out", FAIL);
        write_result(&dir, "Bar_B.out", PASS);
        write_detail_log(&dir, "Foo_A", &["Foo.java (src/Foo.java)"]);

        let table = aggregate(dir.path()).unwrap();
        assert_eq!(table.results.keys().collect::<Vec<_>>(), vec!["Bar", "Foo"]);
        assert_eq!(table.test_ids, vec!["A", "B"]);
        assert_eq!(
            table.results["Foo"]["B"],
            ResultRecord {
                elapsed_time: 0,
                passed: false,
                schedule_count: 12,
            }
        );
        assert_eq!(
            table.source_paths["Foo"],
            SourcePath::Resolved("src/Foo.java".to_owned())
        );
        assert_eq!(table.source_paths["Bar"], SourcePath::NoFile);
    }

    #[test]
    fn no_file_placeholder_is_replaced_later() {
        let dir = tempdir().unwrap();
        write_result(&dir, "Foo_A.out", PASS);
        write_result(&dir, "Foo_B.out", PASS);
        write_detail_log(&dir, "Foo_B", &["Foo.java (src/Foo.java)"]);

        for order in [["Foo_A.out", "Foo_B.out"], ["Foo_B.out", "Foo_A.out"]] {
            let table = aggregate_files(dir.path(), names(&order)).unwrap();
            assert_eq!(
                table.source_paths["Foo"],
                SourcePath::Resolved("src/Foo.java".to_owned()),
                "order {order:?}"
            );
        }
    }

    #[test]
    fn first_resolved_source_depends_on_order() {
        let dir = tempdir().unwrap();
        write_result(&dir, "Foo_A.out", PASS);
        write_result(&dir, "Foo_B.out", FAIL);
        write_detail_log(&dir, "Foo_A", &["Foo.java (src/a/Foo.java)"]);
        write_detail_log(&dir, "Foo_B", &["Foo.java (src/b/Foo.java)"]);

        let forward = aggregate_files(dir.path(), names(&["Foo_A.out", "Foo_B.out"])).unwrap();
        let backward = aggregate_files(dir.path(), names(&["Foo_B.out", "Foo_A.out"])).unwrap();

        assert_eq!(
            forward.source_paths["Foo"],
            SourcePath::Resolved("src/a/Foo.java".to_owned())
        );
        assert_eq!(
            backward.source_paths["Foo"],
            SourcePath::Resolved("src/b/Foo.java".to_owned())
        );
        assert_eq!(forward.results, backward.results);
        assert_eq!(forward.test_ids, backward.test_ids);
    }

    #[test]
    fn malformed_file_aborts() {
        let dir = tempdir().unwrap();
        write_result(&dir, "Foo_A.out", PASS);
        write_result(&dir, "Foo_B.out", "5 schedules generated.  All tests pass.\n");

        let err = aggregate(dir.path()).unwrap_err();
        match err {
            AggregateError::Extract { path, err } => {
                assert_eq!(path, dir.path().join("Foo_B.out"));
                assert_eq!(
                    err,
                    ExtractError::MissingTime {
                        file_name: "Foo_B.out".to_owned()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_root_dir() {
        let dir = tempdir().unwrap();
        let err = aggregate(&dir.path().join("missing")).unwrap_err();
        assert!(
            matches!(err, AggregateError::ReadDir { .. }),
            "unexpected error: {err:?}"
        );
    }
}
