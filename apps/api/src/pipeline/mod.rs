//! Aggregation pipeline construction for list queries
//!
//! Every `GetAll*` query goes through the same three builders, configured
//! per entity by [`EntityKind`]:
//! - [`MatchFilter`]: status, creation date range and name predicate
//! - [`SortSpec`]: validated ordering, default newest first
//! - [`Page`]: skip/limit window plus the total match count
//!
//! [`Pipeline`] composes them in the fixed order match, sort, paginate.

mod filter;
mod pagination;
mod sort;

pub use filter::{
    escape_regex, parse_date, DateRange, DateRangeArgs, FilterArgs, MatchFilter, NameRule,
};
pub use pagination::{Page, PageArgs, COUNT_FIELD};
pub use sort::{SortSpec, ASCENDING, DEFAULT_SORT_FIELD, DESCENDING};

use bson::{doc, Document};

use crate::error::ApiResult;
use crate::models::EntityKind;

/// Raw list query arguments, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    pub filter: Option<FilterArgs>,
    pub sort: Option<Vec<(String, i32)>>,
    pub pagination: Option<PageArgs>,
}

/// Validated list query: match, then sort, then paginate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub filter: MatchFilter,
    pub sort: SortSpec,
    pub page: Option<Page>,
}

impl Pipeline {
    /// Compose already validated parts
    pub fn assemble(filter: MatchFilter, sort: SortSpec, page: Option<Page>) -> Self {
        Self { filter, sort, page }
    }

    /// Validate raw arguments under the entity's configuration
    pub fn build(kind: EntityKind, args: &ListArgs) -> ApiResult<Self> {
        let filter = MatchFilter::build(args.filter.as_ref(), kind.name_rule())?;
        let sort = SortSpec::build(args.sort.as_deref(), kind.sort_fields())?;
        let page = Page::build(args.pagination)?;
        Ok(Self::assemble(filter, sort, page))
    }

    /// Render the stage documents sent to the store
    pub fn stages(&self) -> Vec<Document> {
        let mut stages = vec![
            doc! { "$match": self.filter.to_document() },
            doc! { "$sort": self.sort.to_document() },
        ];
        if let Some(page) = &self.page {
            stages.extend(page.stages());
        }
        stages
    }
}
