// src/services/verifier.rs

//! Cross-checks a matched title page against the metadata service.

use crate::models::{CanonicalRecord, VerificationOutcome};

/// Check that the canonical title and release year both appear in the
/// title shown on the matched page.
///
/// Both checks are always evaluated so the outcome lists every failure.
/// `year_hint` is the year parsed from the folder name; a disagreement with
/// the canonical year is recorded as a note only.
pub fn verify(
    href: &str,
    displayed_title: &str,
    year_hint: Option<&str>,
    record: &CanonicalRecord,
) -> VerificationOutcome {
    let mut failures = Vec::new();

    if let Err(reason) = check_year(displayed_title, record) {
        failures.push(reason);
    }
    if let Err(reason) = check_title(displayed_title, record) {
        failures.push(reason);
    }

    let mut outcome = VerificationOutcome::from_failures(failures);

    let release_year = record.release_year();
    if let Some(hint) = year_hint {
        if !release_year.is_empty() && hint != release_year {
            outcome.notes.push(format!(
                "Folder year {hint} differs from release year {release_year}"
            ));
        }
    }

    log::debug!("Verification of {}: {}", href, outcome);
    outcome
}

fn check_year(displayed_title: &str, record: &CanonicalRecord) -> Result<(), String> {
    let year = record.release_year();
    if year.is_empty() {
        return Err("Canonical record has no release date".to_string());
    }
    if displayed_title.contains(year) {
        Ok(())
    } else {
        Err(format!("Expected to find [{year}] in [{displayed_title}]."))
    }
}

fn check_title(displayed_title: &str, record: &CanonicalRecord) -> Result<(), String> {
    let title = record.title.trim();
    if title.is_empty() {
        return Err("Canonical record has no title".to_string());
    }
    if displayed_title.to_lowercase().contains(&title.to_lowercase()) {
        Ok(())
    } else {
        Err(format!("Expected to find [{title}] in [{displayed_title}]."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HREF: &str = "/title/tt6290798/";

    fn record(title: &str, release_date: &str) -> CanonicalRecord {
        CanonicalRecord {
            title: title.to_string(),
            release_date: release_date.to_string(),
            poster_path: None,
        }
    }

    #[test]
    fn test_pass() {
        let outcome = verify(
            HREF,
            "Daddy's Home 2 (2017)",
            Some("2017"),
            &record("Daddy's Home 2", "2017-11-09"),
        );
        assert!(outcome.passed);
        assert!(outcome.failures.is_empty());
        assert!(outcome.notes.is_empty());
        assert_eq!(outcome.reason(), "PASSED");
    }

    #[test]
    fn test_title_case_insensitive() {
        let outcome = verify(HREF, "WILSON (2017)", None, &record("Wilson", "2017-03-24"));
        assert!(outcome.passed);
    }

    #[test]
    fn test_year_mismatch_fails() {
        let outcome = verify(HREF, "Wilson (2017)", None, &record("Wilson", "2016-01-01"));
        assert!(!outcome.passed);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].contains("2016"));
    }

    #[test]
    fn test_both_checks_reported() {
        let outcome = verify(HREF, "Heat (1995)", None, &record("Wilson", "2017-03-24"));
        assert!(!outcome.passed);
        assert_eq!(outcome.failures.len(), 2);
    }

    #[test]
    fn test_empty_record_fields_fail() {
        let outcome = verify(HREF, "Heat (1995)", None, &record("", ""));
        assert!(!outcome.passed);
        assert_eq!(outcome.failures.len(), 2);
    }

    #[test]
    fn test_year_hint_note_does_not_fail() {
        let outcome = verify(
            HREF,
            "Labor Day (2013)",
            Some("2014"),
            &record("Labor Day", "2013-08-29"),
        );
        assert!(outcome.passed);
        assert_eq!(outcome.notes.len(), 1);
    }
}
