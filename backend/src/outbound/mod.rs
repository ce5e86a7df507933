//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern: adapters are thin
//! translators that convert between domain types and infrastructure-specific
//! representations. They contain no business logic.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM

pub mod persistence;
