//! Feedback entity and the validated submission payload.
//!
//! Validation happens exactly once, when a submission crosses the HTTP
//! boundary. Every [`Feedback`] handed out by a repository therefore already
//! satisfies the field bounds; nothing downstream re-checks them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Star rating constrained to the inclusive range 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

/// Error raised when a value falls outside the permitted rating range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between {} and {}", Rating::MIN, Rating::MAX)]
pub struct RatingOutOfRange;

impl Rating {
    /// Lowest permitted rating.
    pub const MIN: u8 = 1;
    /// Highest permitted rating.
    pub const MAX: u8 = 5;

    /// Return the rating as a plain integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "range check above bounds the value to 1..=5"
            )]
            let value = value as u8;
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange)
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored feedback record.
///
/// Records are created by the ingestion endpoint and never mutated or
/// deleted afterwards, so `updated_at` always equals `created_at` in
/// practice.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    /// System-generated identifier (UUID v4).
    pub id: Uuid,
    /// Submitter name, at least two characters.
    pub name: String,
    /// Optional contact address; `None` when the submitter left it blank.
    pub email: Option<String>,
    /// Free-text comment, at least ten characters.
    pub message: String,
    /// Star rating in 1..=5.
    pub rating: Rating,
    /// Set by the database at insert time.
    pub created_at: DateTime<Utc>,
    /// Equals `created_at`; no modification path exists.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    /// Submitter name.
    pub name: String,
    /// Normalized contact address; empty strings become `None`.
    pub email: Option<String>,
    /// Free-text comment.
    pub message: String,
    /// Star rating.
    pub rating: Rating,
}

/// Raw submission as received from the client, before validation.
///
/// The rating is kept as a JSON value so that coercion from either a number
/// or a numeric string stays explicit and total: anything that does not
/// parse to an integer in range is rejected with a field error rather than
/// silently accepted.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct FeedbackDraft {
    /// Submitter name.
    pub name: Option<String>,
    /// Contact address; an empty string counts as "not provided".
    pub email: Option<String>,
    /// Free-text comment.
    pub message: Option<String>,
    /// Star rating as a JSON number or numeric string.
    #[schema(value_type = Option<i64>)]
    pub rating: Option<Value>,
}

/// Field-indexed validation failures for one submission.
///
/// Serializes as a map from field name to the list of messages for that
/// field, matching the 422 response body of the ingestion endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationReport {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// True when no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded against a field, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Fields that failed validation, in lexical order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }
}

impl FeedbackDraft {
    /// Check every rule independently and either produce a normalized
    /// [`NewFeedback`] or a report naming each failed field.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`ValidationReport`] when any rule fails; the
    /// report carries at least one message per offending field.
    pub fn validate(self) -> Result<NewFeedback, ValidationReport> {
        let mut report = ValidationReport::default();

        let name = match self.name {
            Some(name) if name.chars().count() >= 2 => Some(name),
            Some(_) => {
                report.push("name", "name must be at least 2 characters");
                None
            }
            None => {
                report.push("name", "name is required");
                None
            }
        };

        let email = match self.email {
            None => None,
            Some(email) if email.is_empty() => None,
            Some(email) if is_valid_email(&email) => Some(email),
            Some(_) => {
                report.push("email", "email must be a valid address");
                None
            }
        };

        let message = match self.message {
            Some(message) if message.chars().count() >= 10 => Some(message),
            Some(_) => {
                report.push("message", "message must be at least 10 characters");
                None
            }
            None => {
                report.push("message", "message is required");
                None
            }
        };

        let rating = match self.rating {
            None => {
                report.push("rating", "rating is required");
                None
            }
            Some(value) => match coerce_rating(&value) {
                Ok(number) => match Rating::try_from(number) {
                    Ok(rating) => Some(rating),
                    Err(err) => {
                        report.push("rating", err.to_string());
                        None
                    }
                },
                Err(()) => {
                    report.push("rating", "rating must be a whole number");
                    None
                }
            },
        };

        match (name, message, rating) {
            (Some(name), Some(message), Some(rating)) if report.is_empty() => Ok(NewFeedback {
                name,
                email,
                message,
                rating,
            }),
            _ => Err(report),
        }
    }
}

/// Coerce a JSON value to an integer rating candidate.
///
/// Accepts integers, floats with no fractional part, and numeric strings.
fn coerce_rating(value: &Value) -> Result<i64, ()> {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                return Ok(integer);
            }
            match number.as_f64() {
                Some(float) if float.fract() == 0.0 && float.abs() < 1e15 => {
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "fract() == 0.0 and the magnitude check keep the cast exact"
                    )]
                    let integer = float as i64;
                    Ok(integer)
                }
                _ => Err(()),
            }
        }
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| ()),
        _ => Err(()),
    }
}

/// Minimal syntactic email check: one `@`, a non-empty local part, and a
/// dotted domain without leading or trailing dots or any whitespace.
fn is_valid_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = candidate.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
        && domain.len() >= 3
}

/// Dashboard aggregates over the stored record set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackStats {
    /// Total number of stored records.
    pub total: u64,
    /// Mean rating, 0.0 when no records exist.
    pub average_rating: f64,
    /// Records created within the last seven days of `now`.
    pub recent: u64,
}

impl FeedbackStats {
    /// Fold the full record set into dashboard aggregates.
    ///
    /// Single bounded pass; `now` is injected so callers and tests agree on
    /// what "recent" means.
    #[must_use]
    pub fn from_records(records: &[Feedback], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(7);
        let total = records.len() as u64;
        let recent = records.iter().filter(|r| r.created_at >= cutoff).count() as u64;
        let average_rating = if records.is_empty() {
            0.0
        } else {
            let sum: u64 = records.iter().map(|r| u64::from(r.rating.get())).sum();
            #[expect(
                clippy::cast_precision_loss,
                reason = "rating sums stay far below f64's integer precision limit"
            )]
            let (sum, count) = (sum as f64, total as f64);
            sum / count
        };
        Self {
            total,
            average_rating,
            recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn draft(name: &str, email: Option<&str>, message: &str, rating: Value) -> FeedbackDraft {
        FeedbackDraft {
            name: Some(name.to_owned()),
            email: email.map(str::to_owned),
            message: Some(message.to_owned()),
            rating: Some(rating),
        }
    }

    #[rstest]
    fn valid_submission_normalizes_fields() {
        let new = draft("Al", None, "Great service overall", json!(5))
            .validate()
            .expect("valid draft");

        assert_eq!(new.name, "Al");
        assert_eq!(new.email, None);
        assert_eq!(new.message, "Great service overall");
        assert_eq!(new.rating.get(), 5);
    }

    #[rstest]
    fn empty_email_is_treated_as_absent() {
        let new = draft("Ada", Some(""), "Lovely experience", json!(4))
            .validate()
            .expect("empty email is not an error");
        assert_eq!(new.email, None);
    }

    #[rstest]
    fn well_formed_email_is_kept() {
        let new = draft("Ada", Some("ada@example.com"), "Lovely experience", json!(4))
            .validate()
            .expect("valid email");
        assert_eq!(new.email.as_deref(), Some("ada@example.com"));
    }

    #[rstest]
    #[case::short_name(draft("A", None, "long enough message", json!(3)), "name")]
    #[case::short_message(draft("Ada", None, "too short", json!(3)), "message")]
    #[case::bad_email(draft("Ada", Some("not-an-email"), "long enough message", json!(3)), "email")]
    #[case::rating_too_low(draft("Ada", None, "long enough message", json!(0)), "rating")]
    #[case::rating_too_high(draft("Ada", None, "long enough message", json!(6)), "rating")]
    #[case::rating_not_numeric(draft("Ada", None, "long enough message", json!("five")), "rating")]
    #[case::rating_fractional(draft("Ada", None, "long enough message", json!(4.5)), "rating")]
    fn single_rule_failures_name_the_field(#[case] draft: FeedbackDraft, #[case] field: &str) {
        let report = draft.validate().expect_err("invalid draft");
        assert_eq!(report.fields().collect::<Vec<_>>(), vec![field]);
        assert!(report.field(field).is_some_and(|msgs| !msgs.is_empty()));
    }

    #[rstest]
    fn missing_everything_reports_all_required_fields() {
        let report = FeedbackDraft::default().validate().expect_err("empty draft");
        assert_eq!(
            report.fields().collect::<Vec<_>>(),
            vec!["message", "name", "rating"]
        );
    }

    #[rstest]
    #[case(json!(4), 4)]
    #[case(json!(4.0), 4)]
    #[case(json!("4"), 4)]
    #[case(json!(" 2 "), 2)]
    fn rating_coercion_accepts_numbers_and_numeric_strings(
        #[case] value: Value,
        #[case] expected: u8,
    ) {
        let new = draft("Ada", None, "long enough message", value)
            .validate()
            .expect("coercible rating");
        assert_eq!(new.rating.get(), expected);
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("a@b.co", true)]
    #[case("ada@example", false)]
    #[case("@example.com", false)]
    #[case("ada example@x.com", false)]
    #[case("ada@.com", false)]
    #[case("ada@example..com", false)]
    fn email_syntax_check(#[case] candidate: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(candidate), valid);
    }

    #[rstest]
    fn rating_rejects_out_of_range_values() {
        assert!(Rating::try_from(0).is_err());
        assert!(Rating::try_from(6).is_err());
        assert_eq!(Rating::try_from(1).map(Rating::get), Ok(1));
        assert_eq!(Rating::try_from(5).map(Rating::get), Ok(5));
    }

    fn record(rating: u8, created_at: DateTime<Utc>) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            email: None,
            message: "long enough message".to_owned(),
            rating: Rating::try_from(i64::from(rating)).expect("test rating in range"),
            created_at,
            updated_at: created_at,
        }
    }

    #[rstest]
    fn stats_over_empty_set_are_zero() {
        let stats = FeedbackStats::from_records(&[], Utc::now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.recent, 0);
        assert!((stats.average_rating - 0.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn stats_count_recent_and_average() {
        let now = Utc::now();
        let records = vec![
            record(5, now - Duration::days(1)),
            record(3, now - Duration::days(3)),
            record(1, now - Duration::days(30)),
        ];

        let stats = FeedbackStats::from_records(&records, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent, 2);
        assert!((stats.average_rating - 3.0).abs() < f64::EPSILON);
    }
}
