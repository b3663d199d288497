//! GraphQL objects for the name-only academic entities
//!
//! Speciality, sector, level, campus, school and scholar season share one
//! document shape, so each object is a thin wrapper over [`NamedRecord`].

use async_graphql::{Object, ID};
use chrono::{DateTime, Utc};

use crate::models::NamedRecord;

use super::enums::Status;

macro_rules! named_object {
    ($(#[$meta:meta])* $object:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $object {
            inner: NamedRecord,
        }

        impl From<NamedRecord> for $object {
            fn from(record: NamedRecord) -> Self {
                Self { inner: record }
            }
        }

        $(#[$meta])*
        #[Object]
        impl $object {
            /// Unique identifier
            #[graphql(name = "_id")]
            async fn id(&self) -> ID {
                ID(self.inner.id.to_hex())
            }

            /// Display name
            async fn name(&self) -> &str {
                &self.inner.name
            }

            /// Lifecycle status
            async fn status(&self) -> Status {
                self.inner.status.into()
            }

            /// Creation timestamp
            async fn created_at(&self) -> DateTime<Utc> {
                self.inner.created_at
            }

            /// Last update timestamp
            async fn updated_at(&self) -> DateTime<Utc> {
                self.inner.updated_at
            }

            /// Total rows matching the list filter, set on paginated lists
            #[graphql(name = "count_document")]
            async fn count_document(&self) -> Option<i64> {
                self.inner.count_document
            }
        }
    };
}

named_object!(
    /// Field of study
    Speciality
);
named_object!(
    /// Professional sector a program prepares for
    Sector
);
named_object!(
    /// Degree level
    Level
);
named_object!(
    /// Physical campus
    Campus
);
named_object!(
    /// School offering programs
    School
);
named_object!(
    /// Academic year
    ScholarSeason
);
