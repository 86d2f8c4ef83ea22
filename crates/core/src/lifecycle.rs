//! The project lifecycle state machine.
//!
//! A project's primary axis is [`ProgressStatus`] (draft, ongoing,
//! completed, cancelled). The open/closed [`ProjectStatus`] is a pure
//! function of it: `ongoing` is the only open state. Soft-delete is an
//! orthogonal boolean axis handled at the storage layer.

use serde::{Deserialize, Serialize};

/// A project's progress through its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Draft,
    Ongoing,
    Completed,
    Cancelled,
}

/// Whether freelancers can currently see and apply to a project.
///
/// Derived from [`ProgressStatus`]; never stored or written independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Open,
    Closed,
}

impl ProgressStatus {
    /// The value as stored in the `projects.progress_status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::Draft => "draft",
            ProgressStatus::Ongoing => "ongoing",
            ProgressStatus::Completed => "completed",
            ProgressStatus::Cancelled => "cancelled",
        }
    }

    /// Derive the open/closed status. Only `ongoing` projects are open.
    pub fn derived_status(self) -> ProjectStatus {
        match self {
            ProgressStatus::Ongoing => ProjectStatus::Open,
            _ => ProjectStatus::Closed,
        }
    }

    /// Whether a transition to `target` is permitted.
    ///
    /// `completed` is terminal: once a project is completed (and paid), its
    /// progress can never change again. Every other transition is allowed,
    /// including re-opening a cancelled project by approving a freelancer.
    pub fn can_transition_to(self, target: ProgressStatus) -> bool {
        let _ = target;
        !matches!(self, ProgressStatus::Completed)
    }
}

impl ProjectStatus {
    /// The value exposed in the `projects.status` generated column.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProgressStatus::Draft),
            "ongoing" => Ok(ProgressStatus::Ongoing),
            "completed" => Ok(ProgressStatus::Completed),
            "cancelled" => Ok(ProgressStatus::Cancelled),
            other => Err(format!(
                "Invalid progress status '{other}'. Must be one of: draft, ongoing, completed, cancelled"
            )),
        }
    }
}

impl TryFrom<String> for ProgressStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ProjectStatus::Open),
            "closed" => Ok(ProjectStatus::Closed),
            other => Err(format!(
                "Invalid project status '{other}'. Must be one of: open, closed"
            )),
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_only_ongoing_is_open() {
        assert_eq!(ProgressStatus::Ongoing.derived_status(), ProjectStatus::Open);
        for status in [
            ProgressStatus::Draft,
            ProgressStatus::Completed,
            ProgressStatus::Cancelled,
        ] {
            assert_eq!(status.derived_status(), ProjectStatus::Closed);
        }
    }

    #[test]
    fn test_completed_is_terminal() {
        for target in [
            ProgressStatus::Draft,
            ProgressStatus::Ongoing,
            ProgressStatus::Completed,
            ProgressStatus::Cancelled,
        ] {
            assert!(!ProgressStatus::Completed.can_transition_to(target));
        }
    }

    #[test]
    fn test_non_terminal_states_can_move_anywhere() {
        for from in [
            ProgressStatus::Draft,
            ProgressStatus::Ongoing,
            ProgressStatus::Cancelled,
        ] {
            for target in [
                ProgressStatus::Draft,
                ProgressStatus::Ongoing,
                ProgressStatus::Completed,
                ProgressStatus::Cancelled,
            ] {
                assert!(from.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [
            ProgressStatus::Draft,
            ProgressStatus::Ongoing,
            ProgressStatus::Completed,
            ProgressStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ProgressStatus>().unwrap(), status);
        }
        assert_matches!("paused".parse::<ProgressStatus>(), Err(_));
    }
}
