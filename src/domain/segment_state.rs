use std::fmt;
use std::str::FromStr;

/// Per-segment processing state. Terminal states are `Persisted` and
/// `Failed`; no automatic retries occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentState {
    Detected,
    Classified,
    StudentResolved,
    Sequenced,
    Superseded,
    Persisted,
    Failed,
}

impl SegmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentState::Detected => "DETECTED",
            SegmentState::Classified => "CLASSIFIED",
            SegmentState::StudentResolved => "STUDENT_RESOLVED",
            SegmentState::Sequenced => "SEQUENCED",
            SegmentState::Superseded => "SUPERSEDED",
            SegmentState::Persisted => "PERSISTED",
            SegmentState::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SegmentState::Persisted | SegmentState::Failed)
    }
}

impl FromStr for SegmentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DETECTED" => Ok(SegmentState::Detected),
            "CLASSIFIED" => Ok(SegmentState::Classified),
            "STUDENT_RESOLVED" => Ok(SegmentState::StudentResolved),
            "SEQUENCED" => Ok(SegmentState::Sequenced),
            "SUPERSEDED" => Ok(SegmentState::Superseded),
            "PERSISTED" => Ok(SegmentState::Persisted),
            "FAILED" => Ok(SegmentState::Failed),
            _ => Err(format!("Invalid segment state: {}", s)),
        }
    }
}

impl fmt::Display for SegmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
