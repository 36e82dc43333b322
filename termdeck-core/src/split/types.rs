//! Direction enums shared by both layout trees

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis along which a split divides its space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children stacked top to bottom.
    Horizontal,
    /// Children arranged left to right.
    Vertical,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// Direction for cycling through tabs, groups or panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleDirection {
    /// Move forward, wrapping from the last element to the first.
    Next,
    /// Move backward, wrapping from the first element to the last.
    Previous,
}

impl CycleDirection {
    /// Returns the index reached by stepping once from `current` in a list
    /// of `len` elements, wrapping at both ends.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub const fn step(self, current: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match self {
            Self::Next => (current + 1) % len,
            Self::Previous => (current + len - 1) % len,
        })
    }
}

impl fmt::Display for CycleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "previous"),
        }
    }
}
