//! # Repository Module
//!
//! Database repository for the catalog.
//!
//! ## Repository Pattern
//! The repository abstracts database access behind a clean API:
//! SQL stays in one place and handlers never see a connection.
//!
//! - [`product::ProductRepository`] - Product CRUD and listing

pub mod product;
