//! GraphQL types for the Academia API
//!
//! Output objects wrap the stored records; input objects carry the list
//! and mutation arguments.

pub mod enums;
pub mod inputs;
pub mod named;
pub mod program;

pub use enums::{PublishStatus, Status};
pub use inputs::{
    list_args, parse_id, DateRangeInput, FilterInput, PaginationInput, ProgramSortInput, SortInput,
};
pub use named::{Campus, Level, ScholarSeason, School, Sector, Speciality};
pub use program::Program;
