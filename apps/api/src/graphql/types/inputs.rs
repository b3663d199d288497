//! GraphQL input types shared by the list queries and mutations

use async_graphql::{InputObject, ID};
use bson::oid::ObjectId;

use crate::error::{ApiError, ApiResult};
use crate::pipeline::{DateRangeArgs, FilterArgs, ListArgs, PageArgs};

/// Creation date range; both ends are dates, `to` is inclusive of its whole day
#[derive(Debug, Clone, InputObject)]
pub struct DateRangeInput {
    pub from: String,
    pub to: String,
}

/// Optional list filter
#[derive(Debug, Clone, Default, InputObject)]
pub struct FilterInput {
    /// Only rows created inside this range
    pub created_at: Option<DateRangeInput>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
}

impl From<FilterInput> for FilterArgs {
    fn from(input: FilterInput) -> Self {
        Self {
            created_at: input.created_at.map(|range| DateRangeArgs {
                from: range.from,
                to: range.to,
            }),
            name: input.name,
        }
    }
}

/// Sort directions (1 ascending, -1 descending), applied in field order
#[derive(Debug, Clone, Default, InputObject)]
pub struct SortInput {
    pub name: Option<i32>,
    pub status: Option<i32>,
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

impl SortInput {
    /// Requested fields with their stored names
    pub fn into_pairs(self) -> Vec<(String, i32)> {
        [
            ("name", self.name),
            ("status", self.status),
            ("createdAt", self.created_at),
            ("updatedAt", self.updated_at),
        ]
        .into_iter()
        .filter_map(|(field, direction)| direction.map(|d| (field.to_string(), d)))
        .collect()
    }
}

/// Program sort directions, applied in field order
#[derive(Debug, Clone, Default, InputObject)]
pub struct ProgramSortInput {
    pub name: Option<i32>,
    pub status: Option<i32>,
    pub publish_status: Option<i32>,
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

impl ProgramSortInput {
    /// Requested fields with their stored names
    pub fn into_pairs(self) -> Vec<(String, i32)> {
        [
            ("name", self.name),
            ("status", self.status),
            ("publish_status", self.publish_status),
            ("createdAt", self.created_at),
            ("updatedAt", self.updated_at),
        ]
        .into_iter()
        .filter_map(|(field, direction)| direction.map(|d| (field.to_string(), d)))
        .collect()
    }
}

/// Zero-based page window
#[derive(Debug, Clone, Copy, InputObject)]
pub struct PaginationInput {
    pub page: i32,
    pub limit: i32,
}

impl From<PaginationInput> for PageArgs {
    fn from(input: PaginationInput) -> Self {
        Self {
            page: i64::from(input.page),
            limit: i64::from(input.limit),
        }
    }
}

/// Gather optional list arguments
pub fn list_args(
    filter: Option<FilterInput>,
    sort: Option<Vec<(String, i32)>>,
    pagination: Option<PaginationInput>,
) -> ListArgs {
    ListArgs {
        filter: filter.map(FilterArgs::from),
        sort,
        pagination: pagination.map(PageArgs::from),
    }
}

/// Parse a GraphQL id into a document id
pub fn parse_id(id: &ID) -> ApiResult<ObjectId> {
    ObjectId::parse_str(id.as_str()).map_err(|_| ApiError::InvalidId(id.to_string()))
}
