//! Activity Risk Rules
//!
//! Static risk values per activity kind.
//! Constants only, no logic.

use super::types::ActivityKind;

/// No risk - normal user activity
pub const NORMAL_RISK: i64 = 0;

/// Low risk - downloading files
pub const FILE_DOWNLOAD_RISK: i64 = 5;

/// Medium risk - unusual login location
pub const UNUSUAL_LOGIN_RISK: i64 = 8;

/// High risk - accessing sensitive data
pub const SENSITIVE_FOLDER_RISK: i64 = 10;

/// Very high risk - potential data exfiltration
pub const USB_COPY_RISK: i64 = 15;

pub const RISK_RULES: [(ActivityKind, i64); 5] = [
    (ActivityKind::Normal, NORMAL_RISK),
    (ActivityKind::FileDownload, FILE_DOWNLOAD_RISK),
    (ActivityKind::LoginFromUnusualIp, UNUSUAL_LOGIN_RISK),
    (ActivityKind::AccessSensitiveFolder, SENSITIVE_FOLDER_RISK),
    (ActivityKind::DataCopyToUsb, USB_COPY_RISK),
];
