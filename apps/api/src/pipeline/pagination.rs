//! Pagination builder
//!
//! Turns a zero-based `{page, limit}` into skip/limit stages. A paginated
//! pipeline also reports the total number of matching rows on every
//! returned row as `count_document`.

use bson::{doc, Document};

use crate::error::{ApiError, ApiResult};

/// Field carrying the total match count on paginated rows
pub const COUNT_FIELD: &str = "count_document";

/// Raw pagination as supplied by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    pub page: i64,
    pub limit: i64,
}

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// Validate the requested page; absent pagination means no paging at all
    pub fn build(args: Option<PageArgs>) -> ApiResult<Option<Self>> {
        let Some(PageArgs { page, limit }) = args else {
            return Ok(None);
        };

        if page < 0 {
            return Err(ApiError::InvalidPagination(format!(
                "page must be zero or greater, got {}",
                page
            )));
        }
        if limit <= 0 {
            return Err(ApiError::InvalidPagination(format!(
                "limit must be greater than zero, got {}",
                limit
            )));
        }

        let skip = page.checked_mul(limit).ok_or_else(|| {
            ApiError::InvalidPagination(format!("page {} with limit {} is out of range", page, limit))
        })?;

        Ok(Some(Self { skip, limit }))
    }

    /// Stages applied after match and sort
    ///
    /// The rows and the total count are computed side by side from the same
    /// sorted input, then the count is merged into each row.
    pub fn stages(&self) -> Vec<Document> {
        vec![
            doc! {
                "$facet": {
                    "rows": [ { "$skip": self.skip }, { "$limit": self.limit } ],
                    "total": [ { "$count": "count" } ],
                }
            },
            doc! { "$unwind": "$rows" },
            doc! {
                "$replaceRoot": {
                    "newRoot": {
                        "$mergeObjects": [
                            "$rows",
                            { COUNT_FIELD: { "$arrayElemAt": [ "$total.count", 0 ] } },
                        ]
                    }
                }
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[test]
    fn test_absent_pagination_has_no_stages() {
        assert_eq!(Page::build(None).unwrap(), None);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 10)]
    #[case(3, 7, 21)]
    fn test_skip_is_page_times_limit(#[case] page: i64, #[case] limit: i64, #[case] skip: i64) {
        let built = Page::build(Some(PageArgs { page, limit })).unwrap().unwrap();
        assert_eq!(built, Page { skip, limit });
    }

    #[rstest]
    #[case(-1, 10)]
    #[case(0, 0)]
    #[case(2, -5)]
    #[case(i64::MAX, 2)]
    fn test_invalid_pagination_fails(#[case] page: i64, #[case] limit: i64) {
        assert_matches!(
            Page::build(Some(PageArgs { page, limit })),
            Err(ApiError::InvalidPagination(_))
        );
    }

    #[test]
    fn test_stages_skip_limit_and_count() {
        let stages = Page { skip: 20, limit: 10 }.stages();
        assert_eq!(stages.len(), 3);

        let facet = stages[0].get_document("$facet").unwrap();
        let rows = facet.get_array("rows").unwrap();
        assert_eq!(rows[0], bson::Bson::Document(doc! { "$skip": 20_i64 }));
        assert_eq!(rows[1], bson::Bson::Document(doc! { "$limit": 10_i64 }));
        assert_eq!(
            facet.get_array("total").unwrap()[0],
            bson::Bson::Document(doc! { "$count": "count" })
        );

        let merged = stages[2]
            .get_document("$replaceRoot")
            .and_then(|r| r.get_document("newRoot"))
            .and_then(|r| r.get_array("$mergeObjects"))
            .unwrap();
        let count = merged[1].as_document().unwrap();
        assert!(count.contains_key(COUNT_FIELD));
    }
}
