// src/detect.rs
use crate::repo::TargetStatus;

/// Decide the status of a check from the stored and freshly computed
/// fingerprints. The first check of a target establishes a baseline and
/// reports `Unchanged` rather than flagging a false update; this policy
/// applies to scheduled runs and single-target checks alike.
pub fn decide(previous: Option<&str>, current: &str) -> TargetStatus {
    match previous {
        None => TargetStatus::Unchanged,
        Some(prev) if prev != current => TargetStatus::Updated,
        Some(_) => TargetStatus::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_check_is_baseline() {
        assert_eq!(decide(None, "abc123"), TargetStatus::Unchanged);
    }

    #[test]
    fn test_differing_fingerprints_report_updated() {
        assert_eq!(decide(Some("abc123"), "def456"), TargetStatus::Updated);
    }

    #[test]
    fn test_identical_fingerprints_report_unchanged() {
        assert_eq!(decide(Some("abc123"), "abc123"), TargetStatus::Unchanged);
    }
}
