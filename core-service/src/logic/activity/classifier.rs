//! Activity Classifier
//!
//! Input: ActivityKind (+ optional per-event override)
//! Output: risk delta

use super::rules::{
    FILE_DOWNLOAD_RISK, NORMAL_RISK, SENSITIVE_FOLDER_RISK, UNUSUAL_LOGIN_RISK, USB_COPY_RISK,
};
use super::types::ActivityKind;

/// Table lookup, always non-negative
pub fn risk_delta(kind: ActivityKind) -> i64 {
    match kind {
        ActivityKind::Normal => NORMAL_RISK,
        ActivityKind::FileDownload => FILE_DOWNLOAD_RISK,
        ActivityKind::LoginFromUnusualIp => UNUSUAL_LOGIN_RISK,
        ActivityKind::AccessSensitiveFolder => SENSITIVE_FOLDER_RISK,
        ActivityKind::DataCopyToUsb => USB_COPY_RISK,
    }
}

/// An event-supplied `risk_increase` wins over the table
pub fn resolve_delta(kind: ActivityKind, risk_override: Option<i64>) -> i64 {
    risk_override.unwrap_or_else(|| risk_delta(kind))
}
