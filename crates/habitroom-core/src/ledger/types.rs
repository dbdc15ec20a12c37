use serde::{Deserialize, Serialize};

/// Status of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayStatus {
    /// Counts toward the streak.
    Active,
    /// Habit was not kept; carries the recorded reason.
    Broken { reason: String },
    /// Never touched.
    Unmarked,
}

impl DayStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, DayStatus::Active)
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, DayStatus::Broken { .. })
    }

    /// Single-character marker used in calendar cells.
    pub fn marker(&self) -> &'static str {
        match self {
            DayStatus::Active => "✔",
            DayStatus::Broken { .. } => "✘",
            DayStatus::Unmarked => "",
        }
    }
}

/// Where an active day sits inside its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPosition {
    Start,
    Middle,
    End,
    Solo,
}

impl RunPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPosition::Start => "start",
            RunPosition::Middle => "middle",
            RunPosition::End => "end",
            RunPosition::Solo => "solo",
        }
    }
}

/// Adjacency of a single day to its neighbours in the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBoundary {
    pub is_active: bool,
    pub has_prev_active: bool,
    pub has_next_active: bool,
}

impl RunBoundary {
    /// Classify the day, or `None` when it is not part of any run.
    pub fn position(&self) -> Option<RunPosition> {
        if !self.is_active {
            return None;
        }
        Some(match (self.has_prev_active, self.has_next_active) {
            (false, true) => RunPosition::Start,
            (true, true) => RunPosition::Middle,
            (true, false) => RunPosition::End,
            (false, false) => RunPosition::Solo,
        })
    }
}

/// Day the current-streak walk starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakAnchor {
    /// Start at the day before the reference date. The reference date itself
    /// is treated as still in progress.
    #[default]
    PreviousDay,
    /// Start at the reference date.
    ReferenceDay,
}
