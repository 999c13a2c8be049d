//! Core types and the formulation engine for the suds system.
//!
//! Everything in this crate is pure and synchronous: recipes and oil
//! catalogs come in as values, calculation results go out as values.

pub mod calc;
pub mod data;
pub mod enums;
pub mod idgen;
pub mod oil;
pub mod recipe;
pub mod snapshot;
pub mod validation;
