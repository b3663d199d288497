//! Sort builder
//!
//! Validates a client-supplied field to direction mapping. Directions are
//! the store's native `1` (ascending) and `-1` (descending).

use std::cmp::Ordering;

use bson::{Bson, Document};

use crate::error::{ApiError, ApiResult};

/// Ascending sort direction
pub const ASCENDING: i32 = 1;

/// Descending sort direction
pub const DESCENDING: i32 = -1;

/// Field used when the client does not ask for an order
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Validated, ordered sort predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    fields: Vec<(String, i32)>,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            fields: vec![(DEFAULT_SORT_FIELD.to_string(), DESCENDING)],
        }
    }
}

impl SortSpec {
    /// Validate a requested ordering against the fields the entity exposes
    ///
    /// An absent or empty mapping yields the default `createdAt` descending.
    pub fn build(requested: Option<&[(String, i32)]>, allowed: &[&str]) -> ApiResult<Self> {
        let requested = match requested {
            Some(fields) if !fields.is_empty() => fields,
            _ => return Ok(Self::default()),
        };

        let mut fields: Vec<(String, i32)> = Vec::with_capacity(requested.len());
        for (field, direction) in requested {
            if *direction != ASCENDING && *direction != DESCENDING {
                return Err(ApiError::InvalidSort(format!(
                    "direction for '{}' must be 1 or -1, got {}",
                    field, direction
                )));
            }
            if !allowed.contains(&field.as_str()) {
                return Err(ApiError::InvalidSort(format!(
                    "cannot sort by '{}'",
                    field
                )));
            }
            if fields.iter().any(|(seen, _)| seen == field) {
                return Err(ApiError::InvalidSort(format!(
                    "'{}' appears more than once",
                    field
                )));
            }
            fields.push((field.clone(), *direction));
        }

        Ok(Self { fields })
    }

    /// Sort keys in priority order
    pub fn fields(&self) -> &[(String, i32)] {
        &self.fields
    }

    /// Render as a `$sort` specification
    pub fn to_document(&self) -> Document {
        self.fields
            .iter()
            .map(|(field, direction)| (field.clone(), Bson::Int32(*direction)))
            .collect()
    }

    /// Order two stored documents the way the store would
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        for (field, direction) in &self.fields {
            let ordering = compare_values(a.get(field), b.get(field));
            let ordering = if *direction == DESCENDING {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Cross-type rank following the store's comparison order
fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) => 0,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_)) => 1,
        Some(Bson::String(_)) => 2,
        Some(Bson::Document(_)) => 3,
        Some(Bson::Array(_)) => 4,
        Some(Bson::ObjectId(_)) => 5,
        Some(Bson::Boolean(_)) => 6,
        Some(Bson::DateTime(_)) => 7,
        Some(_) => 8,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }

    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.cmp(y),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(x), Some(y)) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}
