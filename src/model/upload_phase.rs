//! Lifecycle of an upload sequence
//!
//! `Idle -> Checking -> Uploading(i of n) -> Complete | Failed -> Idle`

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadPhase {
    /// Nothing running, a new selection is accepted
    #[default]
    Idle,
    /// Waiting for the server to confirm free space
    Checking,
    /// Sending file `index` (one-based) of `count`
    Uploading { index: usize, count: usize },
    /// Every file was accepted by the server
    Complete,
    /// The sequence stopped at a failed file
    Failed(String),
}

impl UploadPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, UploadPhase::Idle)
    }

    /// True while a sequence holds the picker
    pub fn is_busy(&self) -> bool {
        matches!(self, UploadPhase::Checking | UploadPhase::Uploading { .. })
    }

    /// Alert text of a failed sequence
    pub fn error(&self) -> Option<&str> {
        match self {
            UploadPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadPhase::Idle => write!(f, "Idle"),
            UploadPhase::Checking => write!(f, "Checking storage"),
            UploadPhase::Uploading { index, count } => write!(f, "Uploading {}/{}", index, count),
            UploadPhase::Complete => write!(f, "Complete"),
            UploadPhase::Failed(msg) => write!(f, "Failed: {}", msg),
        }
    }
}
