//! Program model with publish status and references to other entities

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::record::Status;

/// Whether a program is visible to students
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    Published,
    #[default]
    NotPublished,
}

impl PublishStatus {
    /// Stored string value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::NotPublished => "not_published",
        }
    }
}

/// A program field that references another entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramReference {
    /// Stored field name
    pub field: &'static str,
    /// Entity the field points to
    pub kind: EntityKind,
}

/// Reference fields checked against active rows on every program write
pub static PROGRAM_REFERENCES: [ProgramReference; 6] = [
    ProgramReference {
        field: "speciality_id",
        kind: EntityKind::Speciality,
    },
    ProgramReference {
        field: "sector_id",
        kind: EntityKind::Sector,
    },
    ProgramReference {
        field: "level_id",
        kind: EntityKind::Level,
    },
    ProgramReference {
        field: "campus_id",
        kind: EntityKind::Campus,
    },
    ProgramReference {
        field: "school_id",
        kind: EntityKind::School,
    },
    ProgramReference {
        field: "scholar_season_id",
        kind: EntityKind::ScholarSeason,
    },
];

/// Program document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRecord {
    /// Identifier generated by the store
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Program name, unique case-insensitively
    pub name: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: Status,

    /// Publication state
    #[serde(default)]
    pub publish_status: PublishStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speciality_id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholar_season_id: Option<ObjectId>,

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
