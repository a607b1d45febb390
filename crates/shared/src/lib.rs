//! Roster domain types shared by storage, controller and binary crates.

pub mod domain;
pub mod error;
pub mod sort;
pub mod validation;
