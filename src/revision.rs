//! Render metadata: timestamp and current version-control revision.
//!
//! Lookups here never fail the run; anything unavailable becomes an empty string.

use crate::model::Revision;
use chrono::{DateTime, Local, Utc};
use std::path::Path;
use std::process::Command;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render timestamp, honouring `SOURCE_DATE_EPOCH` for reproducible output.
pub fn timestamp() -> String {
    let epoch = std::env::var("SOURCE_DATE_EPOCH").ok();
    timestamp_from(epoch.as_deref())
}

fn timestamp_from(source_date_epoch: Option<&str>) -> String {
    if let Some(raw) = source_date_epoch {
        let at = raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        match at {
            Some(at) => return at.format(DATE_FORMAT).to_string(),
            None => tracing::warn!(value = %raw, "ignoring invalid SOURCE_DATE_EPOCH"),
        }
    }
    Local::now().format(DATE_FORMAT).to_string()
}

/// Latest commit of the repository containing `dir`.
pub fn current(dir: &Path) -> Revision {
    Revision {
        hash: git_log_format(dir, "%H"),
        short_hash: git_log_format(dir, "%h"),
    }
}

fn git_log_format(dir: &Path, format: &str) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["log", "-1"])
        .arg(format!("--pretty=format:{}", format))
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let value = String::from_utf8_lossy(&out.stdout).trim().to_string();
            if value.is_empty() {
                tracing::warn!(dir = %dir.display(), "git log returned no revision");
            }
            value
        }
        Ok(out) => {
            tracing::warn!(
                dir = %dir.display(),
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "git log failed; revision left empty"
            );
            String::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to spawn git; revision left empty");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_date_epoch_is_utc() {
        assert_eq!(timestamp_from(Some("0")), "1970-01-01 00:00");
        assert_eq!(timestamp_from(Some("1296000000")), "2011-01-26 00:00");
    }

    #[test]
    fn invalid_epoch_falls_back_to_now() {
        let stamp = timestamp_from(Some("yesterday"));
        assert_eq!(stamp.len(), "2011-01-26 00:00".len());
    }

    #[test]
    fn outside_a_repository_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let rev = current(dir.path());
        assert_eq!(rev, Revision::default());
    }
}
