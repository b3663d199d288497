//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests:
//! a schema over the in-memory store and fixture helpers.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
