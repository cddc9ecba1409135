// Copyright (c) The ampver-tables Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptions of the predefined AMPVer test bounds, shown as column tooltips.

/// The tooltip used for test ids without a description.
pub static DEFAULT_TOOLTIP: &str = "No tooltip available.";

/// Descriptions of the predefined test bounds, keyed by test id.
pub static TOOLTIPS: &[(&str, &str)] = &[
    (
        "A",
        "BOUND_A:
Pre-adds: 0
Threads: 1-2
Steps: 1-2
Hashcode: identity
Set/List schedules: 63
Queue schedules: 9
SyncQueue schedules: 9
PQueue schedules: 7",
    ),
    (
        "B",
        "BOUND_B:
Pre-adds: 0-1
Threads: 1-2
Steps: 1-2
Hashcode: identity

Set/List schedules: 270
Queue schedules: 18
SyncQueue schedules: 25
PQueue schedules: 25",
    ),
    (
        "C",
        "BOUND_C:
Pre-adds: 0-1
Threads: 1-2
Steps: 1-2
Hashcode: nondeterministic

Set/List schedules: 270
Queue schedules: 18
SyncQueue schedules: 25
PQueue schedules: 25",
    ),
    (
        "D",
        "BOUND_D:
Pre-adds: 0-1
Threads: 1-3
Steps: 1-3
Hashcode: identity

Set/List schedules: 8108
Queue schedules: 58
SyncQueue schedules: 83
PQueue schedules: 156",
    ),
    (
        "E",
        "BOUND_E:
Pre-adds: 0-1
Threads: 1-3
Steps: 1-4
Hashcode: identity
Preemption bound: 2

Set/List schedules: 322930
Queue schedules: 166
SyncQueue schedules: 223
PQueue schedules: 1096",
    ),
];

/// Returns the tooltip for a test id, or [`DEFAULT_TOOLTIP`] if it has none.
pub fn tooltip(test_id: &str) -> &'static str {
    TOOLTIPS
        .iter()
        .find(|(id, _)| *id == test_id)
        .map_or(DEFAULT_TOOLTIP, |(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("A", "BOUND_A:" ; "a")]
    #[test_case("C", "BOUND_C:" ; "c")]
    #[test_case("E", "BOUND_E:" ; "e")]
    fn known_bounds(test_id: &str, first_line: &str) {
        assert_eq!(tooltip(test_id).lines().next(), Some(first_line));
    }

    #[test]
    fn unknown_bound() {
        assert_eq!(tooltip("F"), DEFAULT_TOOLTIP);
        assert_eq!(tooltip("a"), DEFAULT_TOOLTIP);
    }
}
