//! Activity Types
//!
//! The five canonical activity kinds. Unknown keys are refused at ingestion.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Normal,
    FileDownload,
    LoginFromUnusualIp,
    AccessSensitiveFolder,
    DataCopyToUsb,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::Normal,
        ActivityKind::FileDownload,
        ActivityKind::LoginFromUnusualIp,
        ActivityKind::AccessSensitiveFolder,
        ActivityKind::DataCopyToUsb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Normal => "normal",
            ActivityKind::FileDownload => "file_download",
            ActivityKind::LoginFromUnusualIp => "login_from_unusual_ip",
            ActivityKind::AccessSensitiveFolder => "access_sensitive_folder",
            ActivityKind::DataCopyToUsb => "data_copy_to_usb",
        }
    }

    /// Human-readable text for the activity log
    pub fn description(&self) -> &'static str {
        match self {
            ActivityKind::Normal => "Normal Activity",
            ActivityKind::FileDownload => "File Download Detected",
            ActivityKind::LoginFromUnusualIp => "Login from Unusual IP Address",
            ActivityKind::AccessSensitiveFolder => "Access to Sensitive Folder",
            ActivityKind::DataCopyToUsb => "Data Copy to USB Device",
        }
    }
}

impl FromStr for ActivityKind {
    type Err = InvalidEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| InvalidEvent::UnknownActivity(s.to_string()))
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
