//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed database schema exactly. They
//! are used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Directory users table.
    ///
    /// Stores registered users keyed by a normalized email address. The
    /// `id` column is the primary key (UUID v4); `email` carries a unique
    /// index because it serves as the login identifier.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Normalized login email (unique, indexed).
        email -> Varchar,
        /// Job title.
        title -> Varchar,
        /// Given name; may be empty.
        first_name -> Varchar,
        /// Family name; may be empty.
        last_name -> Varchar,
        /// Age in years, when known.
        age -> Nullable<Int4>,
        /// Date of birth as free text.
        dob -> Varchar,
        /// Argon2id hash in PHC string format; NULL marks an unusable
        /// password.
        password_hash -> Nullable<Varchar>,
        /// Administrative-site access flag.
        is_staff -> Bool,
        /// Soft-delete flag.
        is_active -> Bool,
        /// Unrestricted-permission flag.
        is_superuser -> Bool,
        /// Permission tier code: 1 = head, 2 = employee.
        role -> Int2,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Signup referrals table.
    ///
    /// Free-standing candidate records; no foreign key links a referral to
    /// the referring user.
    referrals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Candidate contact email.
        email -> Varchar,
        /// Candidate given name.
        first_name -> Varchar,
        /// Candidate family name.
        last_name -> Varchar,
        /// Candidate age in years.
        age -> Int4,
        /// Candidate date of birth as free text.
        dob -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
