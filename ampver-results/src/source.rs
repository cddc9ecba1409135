// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attribution of result files to the source file they were generated from.
//!
//! For a result file `<base>.out`, AMPVer writes per-schedule logs to `<base>.dir/`. The first of
//! these, `schedule_0.out`, lists the source files of the run after a `Source files` header:
//!
//! ```text
//! Source files:
//! Foo.java (src/Foo.java)
//! FooNode.java (src/FooNode.java)
//!
//! ```
//!
//! The source of a data structure is the first listed file whose name (up to its first `.`) is a
//! prefix of `<base>`.

use crate::errors::SourceLookupError;
use camino::{Utf8Path, Utf8PathBuf};
use std::{fmt, io};

static SOURCE_FILES_MARKER: &str = "Source files";
static NO_FILE: &str = "No file";

/// The name of the detail log within a `<base>.dir` directory.
pub static DETAIL_LOG_NAME: &str = "schedule_0.out";

/// The source file that a data structure was attributed to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourcePath {
    /// A path declared in the detail log.
    Resolved(String),

    /// No detail log existed, or none of its candidates matched.
    NoFile,
}

impl SourcePath {
    /// Returns the resolved path, if any.
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            SourcePath::Resolved(path) => Some(path),
            SourcePath::NoFile => None,
        }
    }

    /// Returns true if this is [`SourcePath::NoFile`].
    pub fn is_no_file(&self) -> bool {
        matches!(self, SourcePath::NoFile)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourcePath::Resolved(path) => f.write_str(path),
            SourcePath::NoFile => f.write_str(NO_FILE),
        }
    }
}

/// Combines a previously recorded source path with a newly resolved one.
///
/// A resolved path is never replaced. A missing entry or a [`SourcePath::NoFile`] placeholder is
/// replaced by the candidate.
pub fn merge_source_path(existing: Option<SourcePath>, candidate: SourcePath) -> SourcePath {
    match existing {
        Some(resolved @ SourcePath::Resolved(_)) => resolved,
        Some(SourcePath::NoFile) | None => candidate,
    }
}

/// Returns true if the source path for a data structure should be looked up.
pub fn needs_resolution(existing: Option<&SourcePath>) -> bool {
    existing.is_none_or(SourcePath::is_no_file)
}

/// One `Name.ext (path)` entry listed under `Source files`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceCandidate<'a> {
    line: &'a str,
}

impl<'a> SourceCandidate<'a> {
    /// The text before the first `.`.
    pub fn name(&self) -> &'a str {
        self.line.split('.').next().unwrap_or_default()
    }

    /// The text between the first `(` and the following `)`, if there is one.
    pub fn path(&self) -> Option<&'a str> {
        let (_, rest) = self.line.split_once('(')?;
        Some(rest.split(')').next().unwrap_or_default())
    }

    /// The trimmed line this candidate was read from.
    pub fn line(&self) -> &'a str {
        self.line
    }
}

/// Collects the candidates listed after the `Source files` header, stopping at the first blank
/// line.
pub fn parse_source_candidates<'a, I>(lines: I) -> Vec<SourceCandidate<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut in_section = false;
    let mut candidates = Vec::new();

    for line in lines {
        if line.contains(SOURCE_FILES_MARKER) {
            in_section = true;
        } else if in_section {
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            candidates.push(SourceCandidate { line });
        }
    }

    candidates
}

/// Returns the path of the first candidate whose name is a prefix of `base`.
///
/// Several candidates may share a prefix of `base` (`Set` and `SetNode` both prefix
/// `SetNode_A`). The earliest declared candidate always wins.
pub fn attribute(base: &str, candidates: &[SourceCandidate<'_>]) -> SourcePath {
    for candidate in candidates {
        if !base.starts_with(candidate.name()) {
            continue;
        }
        match candidate.path() {
            Some(path) => return SourcePath::Resolved(path.to_owned()),
            None => {
                tracing::warn!(
                    "source candidate `{}` for `{base}` has no parenthesized path, skipping",
                    candidate.line(),
                );
            }
        }
    }

    SourcePath::NoFile
}

/// Returns the detail log path for a result file name.
pub fn detail_log_path(root_dir: &Utf8Path, file_name: &str) -> Utf8PathBuf {
    root_dir
        .join(format!("{}.dir", file_stem(file_name)))
        .join(DETAIL_LOG_NAME)
}

/// Looks up the declared source file for the result file `file_name` in `root_dir`.
///
/// A missing detail log resolves to [`SourcePath::NoFile`]. Any other I/O error is returned.
pub fn find_source(root_dir: &Utf8Path, file_name: &str) -> Result<SourcePath, SourceLookupError> {
    let path = detail_log_path(root_dir, file_name);
    let contents = match fs_err::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no detail log at `{path}`");
            return Ok(SourcePath::NoFile);
        }
        Err(err) => return Err(SourceLookupError::new(path, err)),
    };

    let candidates = parse_source_candidates(contents.lines());
    Ok(attribute(file_stem(file_name), &candidates))
}

fn file_stem(file_name: &str) -> &str {
    Utf8Path::new(file_name).file_stem().unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use camino_tempfile_ext::prelude::*;
    use indoc::indoc;
    use test_case::test_case;

    static DETAIL_LOG: &str = indoc! {"
        AMPVer 1.0
        Source files:
        Set.java (src/set/Set.java)
        SetNode.java (src/set/SetNode.java)

        Trailing.java (src/Trailing.java)
    "};

    #[test]
    fn parse_candidates_stops_at_blank_line() {
        let candidates = parse_source_candidates(DETAIL_LOG.lines());
        let names: Vec<_> = candidates.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Set", "SetNode"]);
        assert_eq!(candidates[1].path(), Some("src/set/SetNode.java"));
    }

    #[test]
    fn parse_candidates_without_header() {
        assert!(parse_source_candidates(["Foo.java (src/Foo.java)"]).is_empty());
    }

    #[test_case("SetNode_A", "src/set/Set.java" ; "ambiguous prefix resolves to earliest")]
    #[test_case("Set_B", "src/set/Set.java" ; "exact name")]
    fn attribute_first_match(base: &str, expected: &str) {
        let candidates = parse_source_candidates(DETAIL_LOG.lines());
        assert_eq!(
            attribute(base, &candidates),
            SourcePath::Resolved(expected.to_owned())
        );
    }

    #[test]
    fn attribute_no_match() {
        let candidates = parse_source_candidates(DETAIL_LOG.lines());
        assert_eq!(attribute("Queue_A", &candidates), SourcePath::NoFile);
    }

    #[test]
    fn attribute_skips_candidate_without_path() {
        let candidates =
            parse_source_candidates(["Source files", "Foo.java", "FooBar.java (src/FooBar.java)"]);
        assert_eq!(
            attribute("FooBar_A", &candidates),
            SourcePath::Resolved("src/FooBar.java".to_owned())
        );
    }

    #[test]
    fn merge_rules() {
        let resolved = SourcePath::Resolved("src/Foo.java".to_owned());
        let other = SourcePath::Resolved("src/Other.java".to_owned());

        assert_eq!(merge_source_path(None, SourcePath::NoFile), SourcePath::NoFile);
        assert_eq!(merge_source_path(None, resolved.clone()), resolved);
        assert_eq!(
            merge_source_path(Some(resolved.clone()), SourcePath::NoFile),
            resolved
        );
        assert_eq!(merge_source_path(Some(resolved.clone()), other.clone()), resolved);
        assert_eq!(
            merge_source_path(Some(SourcePath::NoFile), resolved.clone()),
            resolved
        );

        assert!(needs_resolution(None));
        assert!(needs_resolution(Some(&SourcePath::NoFile)));
        assert!(!needs_resolution(Some(&resolved)));
    }

    #[test]
    fn display() {
        assert_eq!(SourcePath::NoFile.to_string(), "No file");
        assert_eq!(
            SourcePath::Resolved("src/Foo.java".to_owned()).to_string(),
            "src/Foo.java"
        );
    }

    #[test]
    fn find_source_missing_detail_log() {
        let temp_dir = Utf8TempDir::new().unwrap();
        assert_eq!(
            find_source(temp_dir.path(), "Foo_A.out").unwrap(),
            SourcePath::NoFile
        );
    }

    #[test]
    fn find_source_reads_detail_log() {
        let temp_dir = Utf8TempDir::new().unwrap();
        temp_dir.child("Foo_A.dir").create_dir_all().unwrap();
        temp_dir
            .child("Foo_A.dir/schedule_0.out")
            .write_str("Source files\nFoo.java (src/Foo.java)\n\n")
            .unwrap();

        assert_eq!(
            find_source(temp_dir.path(), "Foo_A.out").unwrap(),
            SourcePath::Resolved("src/Foo.java".to_owned())
        );
    }

    #[test]
    fn find_source_unreadable_detail_log() {
        let temp_dir = Utf8TempDir::new().unwrap();
        temp_dir
            .child("Foo_A.dir/schedule_0.out")
            .create_dir_all()
            .unwrap();

        let err = find_source(temp_dir.path(), "Foo_A.out").unwrap_err();
        assert_eq!(
            err.path(),
            temp_dir.path().join("Foo_A.dir").join(DETAIL_LOG_NAME)
        );
    }

    #[test]
    fn detail_log_path_strips_extension() {
        assert_eq!(
            detail_log_path(Utf8Path::new("results"), "Foo_A.out"),
            Utf8Path::new("results/Foo_A.dir/schedule_0.out")
        );
    }
}
