//! Task forest data model.
//!
//! A forest is an ordered slice of independently rooted [`Task`] trees.
//! The core never mutates a forest once it has been handed over.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// A 24-bit display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = ChartError;

    /// Parse `#rrggbb` or the `#rgb` shorthand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChartError::InvalidColor {
            value: s.to_string(),
        };

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A node in the task forest.
///
/// A task with children is a group; one without is a leaf. The date
/// range is inclusive and day-granular.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique across the whole forest.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First day of the task.
    pub start: NaiveDate,
    /// Last day of the task. Expected to be on or after `start`.
    pub end: NaiveDate,
    /// Bar colour.
    pub color: Rgb,
    /// Child tasks, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Task>,
    /// Ids of tasks this one depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Create a new leaf task.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        color: Rgb,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            color,
            children: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Add a child task.
    pub fn with_child(mut self, child: Task) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Task>) -> Self {
        self.children.extend(children);
        self
    }

    /// Record a dependency on another task.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Check if this task has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// A group is a task with children.
    pub fn is_group(&self) -> bool {
        self.has_children()
    }

    /// A leaf is a task without children.
    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }
}

/// Parse a forest from its JSON form.
pub fn parse_forest(json: &str) -> ChartResult<Vec<Task>> {
    let forest: Vec<Task> = serde_json::from_str(json)?;
    debug!("Parsed forest with {} root tasks", forest.len());
    Ok(forest)
}

/// Load a forest from a JSON file.
///
/// # Errors
///
/// Returns `ChartError::ReadForest` if the file cannot be read and
/// `ChartError::Parse` if its contents are not a valid forest.
pub fn load_forest(path: &Path) -> ChartResult<Vec<Task>> {
    debug!("Loading forest from {}", path.display());
    let json = std::fs::read_to_string(path).map_err(|e| ChartError::ReadForest {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_forest(&json)
}

/// Fixed calendar date used by the sample data.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Two sample projects spanning the first four months of 2023.
pub fn sample_forest() -> Vec<Task> {
    let red = Rgb::new(0xff, 0x6b, 0x6b);
    let teal = Rgb::new(0x4e, 0xcd, 0xc4);
    let blue = Rgb::new(0x45, 0xb7, 0xd1);
    let yellow = Rgb::new(0xf9, 0xd5, 0x6e);
    let orange = Rgb::new(0xff, 0x8a, 0x5c);

    vec![
        Task::new("1", "Project A", ymd(2023, 1, 1), ymd(2023, 3, 31), red).with_children([
            Task::new("1.1", "Phase 1", ymd(2023, 1, 1), ymd(2023, 2, 15), teal).with_children([
                Task::new("1.1.1", "Task 1", ymd(2023, 1, 1), ymd(2023, 1, 15), blue),
                Task::new("1.1.2", "Task 2", ymd(2023, 1, 16), ymd(2023, 2, 15), yellow)
                    .with_dependency("1.1.1"),
            ]),
            Task::new("1.2", "Phase 2", ymd(2023, 2, 16), ymd(2023, 3, 31), orange)
                .with_dependency("1.1")
                .with_children([
                    Task::new("1.2.1", "Task 3", ymd(2023, 2, 16), ymd(2023, 3, 15), blue),
                    Task::new("1.2.2", "Task 4", ymd(2023, 3, 16), ymd(2023, 3, 31), yellow)
                        .with_dependency("1.2.1"),
                ]),
        ]),
        Task::new("2", "Project B", ymd(2023, 2, 1), ymd(2023, 4, 30), red).with_children([
            Task::new("2.1", "Task 5", ymd(2023, 2, 1), ymd(2023, 3, 15), teal),
            Task::new("2.2", "Task 6", ymd(2023, 3, 16), ymd(2023, 4, 30), blue)
                .with_dependency("2.1"),
        ]),
    ]
}
