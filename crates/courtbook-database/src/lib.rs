//! # courtbook-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all CourtBook entities.
//!
//! Repository methods that must participate in a caller-controlled
//! transaction are associated functions taking `&mut PgConnection`; the
//! pool-bound methods are for standalone reads and batch updates.

pub mod connection;
pub mod migration;
pub mod repositories;
