#![doc = include_str!("../README.md")]

//! Symbolic term model and DDL expression printing.
//!
//! This crate holds the closed set of expression node kinds produced by the
//! grammar-discovery pipeline, the printer that renders them as DDL
//! expressions, simultaneous substitution over terms, and the allocator for
//! fresh index variables.

pub mod index_vars;
pub mod printer;
pub mod substitute;
pub mod terms;
