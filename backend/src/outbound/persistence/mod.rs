//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to the port
//!   error types; the unique index on `users.email` surfaces as a
//!   duplicate-email error.
//!
//! # Example
//!
//! ```ignore
//! use backend::config::DatabaseSettings;
//! use backend::outbound::persistence::{DbPool, DieselUserRepository};
//!
//! let settings = DatabaseSettings::with_url("postgres://localhost/directory");
//! let pool = DbPool::connect(&settings).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_referral_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_referral_repository::DieselReferralRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolError};
