//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryPostRepository;
pub use postgres::PgPostRepository;
