//! Stored shape shared by the simple named entities

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row lifecycle status; rows are never physically removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Deleted,
}

impl Status {
    /// Stored string value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }
}

/// Speciality, sector, level, campus, school or scholar season document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRecord {
    /// Identifier generated by the store
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Display name
    pub name: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: Status,

    /// Creation timestamp
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    #[serde(
        rename = "updatedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub updated_at: DateTime<Utc>,

    /// Total rows matching the list filter, present on paginated results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_document: Option<i64>,
}
