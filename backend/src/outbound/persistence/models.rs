//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{referrals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub dob: String,
    pub password_hash: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub role: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
///
/// Timestamps come from the domain metadata rather than database defaults so
/// the in-memory entity and the stored row never disagree.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub title: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: Option<i32>,
    pub dob: &'a str,
    pub password_hash: Option<&'a str>,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub role: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing user records.
///
/// `id` and `created_at` are immutable and never appear in an update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub title: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: Option<Option<i32>>,
    pub dob: &'a str,
    pub password_hash: Option<Option<&'a str>>,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub role: i16,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the referrals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = referrals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReferralRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub dob: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new referral records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = referrals)]
pub(crate) struct NewReferralRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: i32,
    pub dob: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
