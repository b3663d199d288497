//! Document models for Academia
//!
//! This module contains the stored shapes of the academic entities:
//! - `EntityKind`: per-entity configuration (collection, naming rules)
//! - `NamedRecord`: speciality, sector, level, campus, school, scholar season
//! - `ProgramRecord`: program with its publish status and references

pub mod entity;
pub mod program;
pub mod record;

pub use entity::EntityKind;
pub use program::{ProgramRecord, ProgramReference, PublishStatus, PROGRAM_REFERENCES};
pub use record::{NamedRecord, Status};
