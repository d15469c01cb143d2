//! Enumerations shared by task records.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Completion state of a task, derived from the character inside its checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// `[ ]`, `[>]` or `[<]`.
    Incomplete,
    /// `[x]` or `[X]`.
    Complete,
    /// `[-]`.
    Cancelled,
    /// `[/]`.
    InProgress,
    /// A checkbox holding any other character.
    NonTask,
}

impl TaskStatus {
    /// Maps a checkbox symbol to its status.
    ///
    /// The mapping is total: unrecognized symbols become [`TaskStatus::NonTask`]
    /// rather than being rejected.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'x' | 'X' => TaskStatus::Complete,
            '-' => TaskStatus::Cancelled,
            '/' => TaskStatus::InProgress,
            ' ' | '>' | '<' => TaskStatus::Incomplete,
            _ => TaskStatus::NonTask,
        }
    }

    /// Returns true for statuses that still need work (incomplete or in progress).
    pub fn is_open(self) -> bool {
        matches!(self, TaskStatus::Incomplete | TaskStatus::InProgress)
    }

    /// Returns the serialized name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "incomplete",
            TaskStatus::Complete => "complete",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::NonTask => "non_task",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority level flagged by one of the five priority marker glyphs.
///
/// `🔺` is accepted as an alias for the doubled `⏫⏫` highest marker.
///
/// A task without any marker has no priority at all (`Option::None`), which is
/// distinct from every variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// ⏫⏫ (or 🔺)
    Highest,
    /// ⏫
    High,
    /// 🔼
    Medium,
    /// 🔽
    Low,
    /// ⏬
    Lowest,
}

impl Priority {
    /// All levels, most severe first.
    pub const ALL: [Priority; 5] = [
        Priority::Highest,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Lowest,
    ];

    /// Returns the marker glyph for this level.
    pub fn marker(self) -> &'static str {
        match self {
            Priority::Highest => "⏫⏫",
            Priority::High => "⏫",
            Priority::Medium => "🔼",
            Priority::Low => "🔽",
            Priority::Lowest => "⏬",
        }
    }

    /// Maps a marker glyph back to its level.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "🔺" => Some(Priority::Highest),
            _ => Self::ALL.into_iter().find(|p| p.marker() == marker),
        }
    }

    /// Returns the lowercase name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Highest => "highest",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Lowest => "lowest",
        }
    }

    /// Ordinal used for sorting output: 0 for highest through 4 for lowest.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Highest => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Lowest => 4,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| ParseError::unknown_priority(s))
    }
}

/// The four date fields a task can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    /// 📅 or 🗓️
    Due,
    /// ⏳
    Scheduled,
    /// 🛫
    Start,
    /// ➕
    Created,
}

impl DateField {
    /// All date fields in display order.
    pub const ALL: [DateField; 4] = [
        DateField::Due,
        DateField::Scheduled,
        DateField::Start,
        DateField::Created,
    ];

    /// Returns the lowercase name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            DateField::Due => "due",
            DateField::Scheduled => "scheduled",
            DateField::Start => "start",
            DateField::Created => "created",
        }
    }
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
