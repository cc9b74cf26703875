//! Request and response bodies of the FlashVault endpoints

use serde::{Deserialize, Serialize};

/// Body of `POST /storage-check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCheckRequest {
    pub size: u64,
}

/// Reply of `POST /storage-check`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCheck {
    pub available: bool,
    /// Free bytes on the server, absent on older servers
    #[serde(default)]
    pub free: u64,
}

/// Raw outcome of `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl UploadReply {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// `error` field of a JSON body, if the body is JSON and carries one
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.is_empty())
    }
}

/// Reply of `POST /delete/<path>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
