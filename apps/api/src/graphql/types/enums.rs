//! Shared GraphQL enums

use async_graphql::Enum;

use crate::models::PublishStatus as DbPublishStatus;
use crate::models::Status as DbStatus;

/// Row lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(rename_items = "snake_case")]
pub enum Status {
    /// Visible in list and get queries
    Active,
    /// Soft-deleted, kept for history
    Deleted,
}

impl From<DbStatus> for Status {
    fn from(status: DbStatus) -> Self {
        match status {
            DbStatus::Active => Self::Active,
            DbStatus::Deleted => Self::Deleted,
        }
    }
}

/// Program publication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(rename_items = "snake_case")]
pub enum PublishStatus {
    Published,
    NotPublished,
}

impl From<DbPublishStatus> for PublishStatus {
    fn from(status: DbPublishStatus) -> Self {
        match status {
            DbPublishStatus::Published => Self::Published,
            DbPublishStatus::NotPublished => Self::NotPublished,
        }
    }
}
