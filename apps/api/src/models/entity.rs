//! Entity kinds and their per-entity configuration
//!
//! Every entity shares the same list/get/create/update/delete behavior.
//! What differs between them is captured here and handed to the generic
//! pipeline builders and repositories.

use std::fmt;

use crate::pipeline::NameRule;

/// Fields every entity can be sorted by
const COMMON_SORT_FIELDS: &[&str] = &["name", "status", "createdAt", "updatedAt"];

/// Fields a program can be sorted by
const PROGRAM_SORT_FIELDS: &[&str] = &["name", "status", "publish_status", "createdAt", "updatedAt"];

/// The academic entities exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Speciality,
    Sector,
    Level,
    Campus,
    School,
    ScholarSeason,
    Program,
}

impl EntityKind {
    /// All entity kinds, in schema order
    pub const ALL: [EntityKind; 7] = [
        Self::Speciality,
        Self::Sector,
        Self::Level,
        Self::Campus,
        Self::School,
        Self::ScholarSeason,
        Self::Program,
    ];

    /// Collection holding this entity's documents
    pub fn collection(self) -> &'static str {
        match self {
            Self::Speciality => "specialities",
            Self::Sector => "sectors",
            Self::Level => "levels",
            Self::Campus => "campuses",
            Self::School => "schools",
            Self::ScholarSeason => "scholar_seasons",
            Self::Program => "programs",
        }
    }

    /// Human-readable entity name used in error messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Speciality => "Speciality",
            Self::Sector => "Sector",
            Self::Level => "Level",
            Self::Campus => "Campus",
            Self::School => "School",
            Self::ScholarSeason => "Scholar season",
            Self::Program => "Program",
        }
    }

    /// Whether names must be unique (case-insensitive) within this entity
    pub fn unique_name(self) -> bool {
        matches!(
            self,
            Self::Speciality | Self::School | Self::ScholarSeason | Self::Program
        )
    }

    /// How a name filter is normalized and validated for this entity
    pub fn name_rule(self) -> NameRule {
        match self {
            Self::Level => NameRule {
                trim: true,
                reject_empty: true,
            },
            Self::Campus | Self::Sector => NameRule {
                trim: false,
                reject_empty: false,
            },
            Self::Speciality | Self::School | Self::ScholarSeason | Self::Program => NameRule {
                trim: true,
                reject_empty: false,
            },
        }
    }

    /// Fields accepted by the sort builder
    pub fn sort_fields(self) -> &'static [&'static str] {
        match self {
            Self::Program => PROGRAM_SORT_FIELDS,
            _ => COMMON_SORT_FIELDS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
