//! Storage adapters for the blog's repository ports.

mod connections;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryPostRepository;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
