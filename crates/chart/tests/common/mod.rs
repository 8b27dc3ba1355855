//! Shared forest builders for the chart integration tests.

use chrono::NaiveDate;
use hgantt_chart::{Rgb, Task};

/// A day in January-April 2023.
pub fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, d).unwrap()
}

/// A leaf task with a neutral colour.
pub fn leaf(id: &str, start: NaiveDate, end: NaiveDate) -> Task {
    Task::new(id, format!("Task {id}"), start, end, Rgb::new(0x45, 0xb7, 0xd1))
}

/// One root with two children.
pub fn root_with_two_children() -> Vec<Task> {
    vec![
        leaf("root", day(1, 1), day(1, 31))
            .with_child(leaf("child1", day(1, 1), day(1, 15)))
            .with_child(leaf("child2", day(1, 16), day(1, 31))),
    ]
}

/// One root whose subtree is three levels deep.
pub fn deep_forest() -> Vec<Task> {
    vec![leaf("root", day(1, 1), day(3, 31)).with_children([
        leaf("a", day(1, 1), day(2, 1)).with_child(
            leaf("a1", day(1, 1), day(1, 10)).with_child(leaf("a1x", day(1, 2), day(1, 3))),
        ),
        leaf("b", day(2, 1), day(3, 31)).with_child(leaf("b1", day(2, 1), day(2, 10))),
    ])]
}
