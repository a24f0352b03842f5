//! Schema checks for caller-supplied input.
//!
//! Every check is pure: it either produces a typed value or an
//! [`AppError::Validation`] listing all violated fields, and never touches
//! the database.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::db::BossId;
use crate::error::AppError;

lazy_static! {
    /// Completion times are fixed-width `MM:SS.mmm`, so lexicographic order
    /// equals numeric order.
    static ref COMPLETION_TIME_REGEX: Regex =
        Regex::new(r"^\d{2}:\d{2}\.\d{3}$").expect("valid regex");
}

/// A single violated constraint.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A record submission that passed every schema check.
#[derive(Debug, Clone)]
pub struct RecordSubmission {
    pub boss_id: BossId,
    pub completion_time: String,
    pub team_size: String,
    pub team_members: Vec<String>,
    pub screenshot_url: String,
}

impl RecordSubmission {
    pub fn parse(
        boss_id: &str,
        completion_time: &str,
        team_size: &str,
        team_members: Vec<String>,
        screenshot_url: &str,
    ) -> Result<Self, AppError> {
        let mut errors = vec![];

        let boss_id = match Uuid::parse_str(boss_id) {
            Ok(id) => Some(BossId(id)),
            Err(_) => {
                errors.push(FieldError::new("boss_id", "must be a valid boss ID"));
                None
            }
        };
        if !COMPLETION_TIME_REGEX.is_match(completion_time) {
            errors.push(FieldError::new(
                "completion_time",
                "must be in MM:SS.mmm format",
            ));
        }
        if team_size.is_empty() {
            errors.push(FieldError::new("team_size", "must not be empty"));
        }
        if Url::parse(screenshot_url).is_err() {
            errors.push(FieldError::new("screenshot_url", "must be a valid URL"));
        }

        match (boss_id, errors.is_empty()) {
            (Some(boss_id), true) => Ok(Self {
                boss_id,
                completion_time: completion_time.to_string(),
                team_size: team_size.to_string(),
                team_members,
                screenshot_url: screenshot_url.to_string(),
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// A boss that passed every schema check, ready to insert.
#[derive(Debug, Clone)]
pub struct NewBoss {
    pub name: String,
    pub image_url: String,
    pub allowed_team_sizes: Vec<String>,
}

impl NewBoss {
    pub fn parse(
        name: &str,
        image_url: &str,
        allowed_team_sizes: Vec<String>,
    ) -> Result<Self, AppError> {
        let mut errors = vec![];

        if name.chars().count() < 2 {
            errors.push(FieldError::new("name", "must be at least 2 characters"));
        }
        if Url::parse(image_url).is_err() {
            errors.push(FieldError::new("image_url", "must be a valid URL"));
        }
        if allowed_team_sizes.is_empty() {
            errors.push(FieldError::new(
                "allowed_team_sizes",
                "select at least one team size",
            ));
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        Ok(Self {
            name: name.to_string(),
            image_url: image_url.to_string(),
            allowed_team_sizes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(
        boss_id: &str,
        completion_time: &str,
        team_size: &str,
        screenshot_url: &str,
    ) -> Result<RecordSubmission, AppError> {
        RecordSubmission::parse(boss_id, completion_time, team_size, vec![], screenshot_url)
    }

    fn violated_fields(result: Result<impl Sized, AppError>) -> Vec<&'static str> {
        match result {
            Err(AppError::Validation(errors)) => errors.iter().map(|e| e.field).collect(),
            _ => panic!("expected a validation error"),
        }
    }

    #[test]
    fn valid_submission_passes() {
        let parsed = submission(
            "8a2b7a2e-6d09-4f8e-9f3e-0c1d2e3f4a5b",
            "02:45.300",
            "solo",
            "https://example.com/proof.png",
        )
        .unwrap();
        assert_eq!(parsed.completion_time, "02:45.300");
        assert!(parsed.team_members.is_empty());
    }

    #[test]
    fn bad_boss_id_is_rejected() {
        let result = submission("not-a-uuid", "02:45.300", "solo", "https://example.com/p.png");
        assert_eq!(violated_fields(result), ["boss_id"]);
    }

    #[test]
    fn bad_completion_time_is_rejected() {
        for time in ["2:45.300", "02:45.30", "02-45.300", "02:45", ""] {
            let result = submission(
                "8a2b7a2e-6d09-4f8e-9f3e-0c1d2e3f4a5b",
                time,
                "solo",
                "https://example.com/p.png",
            );
            assert_eq!(violated_fields(result), ["completion_time"], "{time:?}");
        }
    }

    #[test]
    fn bad_screenshot_url_is_rejected() {
        let result = submission(
            "8a2b7a2e-6d09-4f8e-9f3e-0c1d2e3f4a5b",
            "02:45.300",
            "solo",
            "not a url",
        );
        assert_eq!(violated_fields(result), ["screenshot_url"]);
    }

    #[test]
    fn all_violations_are_reported_at_once() {
        let result = submission("nope", "bad", "", "also bad");
        assert_eq!(
            violated_fields(result),
            ["boss_id", "completion_time", "team_size", "screenshot_url"]
        );
    }

    #[test]
    fn boss_with_short_name_is_rejected() {
        let result = NewBoss::parse("Z", "https://example.com/z.png", vec!["solo".to_string()]);
        assert_eq!(violated_fields(result), ["name"]);
    }

    #[test]
    fn boss_without_team_sizes_is_rejected() {
        let result = NewBoss::parse("Zulrah", "https://example.com/z.png", vec![]);
        let err = result.unwrap_err();
        assert!(err.message().contains("team size"));
    }

    #[test]
    fn valid_boss_passes() {
        let parsed = NewBoss::parse(
            "Zulrah",
            "https://example.com/z.png",
            vec!["solo".to_string(), "duo".to_string()],
        )
        .unwrap();
        assert_eq!(parsed.allowed_team_sizes.len(), 2);
    }
}
