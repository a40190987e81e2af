//! # Quill Core
//!
//! The domain layer of the quill blog engine.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post entity, the query/filter/sort/paginate types, the repository ports,
//! the use-case layer and the year/month archive aggregator.

pub mod archive;
pub mod domain;
pub mod error;
pub mod ports;
pub mod usecase;

pub use error::DomainError;
