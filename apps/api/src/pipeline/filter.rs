//! Filter builder
//!
//! Turns the optional client filter (creation date range, name substring)
//! into a match predicate. Every predicate is seeded with `status = active`
//! so soft-deleted rows never leak into list queries.

use bson::{doc, Document};
use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::{ApiError, ApiResult};
use crate::models::Status;

/// Characters with special meaning in a store regular expression
const REGEX_META: &[char] = &[
    '\\', '^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}', '-', '/',
];

/// How a name filter is normalized before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRule {
    /// Strip surrounding whitespace before matching
    pub trim: bool,
    /// Fail when the (trimmed) name is empty
    pub reject_empty: bool,
}

/// Raw creation date range as supplied by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeArgs {
    pub from: String,
    pub to: String,
}

/// Raw filter as supplied by the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    pub created_at: Option<DateRangeArgs>,
    pub name: Option<String>,
}

/// Half-open creation time interval `[from, until)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl DateRange {
    /// Build the interval covering every instant from `from` through the whole `to` day
    pub fn parse(args: &DateRangeArgs) -> ApiResult<Self> {
        let from = parse_date(&args.from).ok_or_else(|| {
            ApiError::InvalidFilter(format!("createdAt.from is not a valid date: {}", args.from))
        })?;
        let to = parse_date(&args.to).ok_or_else(|| {
            ApiError::InvalidFilter(format!("createdAt.to is not a valid date: {}", args.to))
        })?;

        if to < from {
            return Err(ApiError::InvalidFilter(format!(
                "createdAt.to ({}) is before createdAt.from ({})",
                args.to, args.from
            )));
        }

        let until = to.checked_add_days(Days::new(1)).ok_or_else(|| {
            ApiError::InvalidFilter(format!("createdAt.to is out of range: {}", args.to))
        })?;

        Ok(Self { from, until })
    }

    /// Whether `instant` falls inside the interval
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.until
    }
}

/// Validated match predicate for list queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    pub created_at: Option<DateRange>,
    pub name: Option<String>,
}

impl MatchFilter {
    /// Validate the client filter under the entity's name rule
    pub fn build(args: Option<&FilterArgs>, rule: NameRule) -> ApiResult<Self> {
        let Some(args) = args else {
            return Ok(Self::default());
        };

        let created_at = args.created_at.as_ref().map(DateRange::parse).transpose()?;

        let name = match &args.name {
            Some(raw) => {
                let name = if rule.trim { raw.trim() } else { raw.as_str() };
                if rule.reject_empty && name.is_empty() {
                    return Err(ApiError::InvalidFilter(
                        "name must not be empty".to_string(),
                    ));
                }
                Some(name.to_string())
            }
            None => None,
        };

        Ok(Self { created_at, name })
    }

    /// Render as a `$match` predicate
    pub fn to_document(&self) -> Document {
        let mut predicate = doc! { "status": Status::Active.as_str() };

        if let Some(range) = &self.created_at {
            predicate.insert(
                "createdAt",
                doc! {
                    "$gte": bson::DateTime::from_chrono(range.from),
                    "$lt": bson::DateTime::from_chrono(range.until),
                },
            );
        }

        if let Some(name) = &self.name {
            predicate.insert(
                "name",
                doc! { "$regex": escape_regex(name), "$options": "i" },
            );
        }

        predicate
    }

    /// Evaluate the predicate against a stored document
    pub fn matches(&self, document: &Document) -> bool {
        if document.get_str("status").ok() != Some(Status::Active.as_str()) {
            return false;
        }

        if let Some(range) = &self.created_at {
            match document.get_datetime("createdAt") {
                Ok(created_at) if range.contains(created_at.to_chrono()) => {}
                _ => return false,
            }
        }

        if let Some(name) = &self.name {
            match document.get_str("name") {
                Ok(value) if value.to_lowercase().contains(&name.to_lowercase()) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Escape regular expression metacharacters so user input matches literally.
///
/// # Example
/// ```
/// use academia_api::pipeline::escape_regex;
///
/// assert_eq!(escape_regex("C++ (evening)"), r"C\+\+ \(evening\)");
/// ```
pub fn escape_regex(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if REGEX_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
