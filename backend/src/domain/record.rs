//! Shared record metadata: surrogate identity and audit timestamps.
//!
//! Every persisted entity embeds [`RecordMetadata`] by value rather than
//! inheriting from a base type. The metadata owns the surrogate key and the
//! audit timestamps; entities never mutate these fields directly.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Surrogate identity plus audit timestamps shared by every persisted entity.
///
/// ## Invariants
/// - `id` is assigned at creation and never changes.
/// - `created_at` is assigned at creation and never changes.
/// - `created_at <= updated_at`; both are equal until the first [`touch`].
///
/// [`touch`]: RecordMetadata::touch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecordMetadata {
    /// Mint metadata for a brand-new record at the given instant.
    ///
    /// Both timestamps start equal; [`touch`](Self::touch) advances
    /// `updated_at` on later mutations.
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mint metadata for a brand-new record using the system clock.
    pub fn new() -> Self {
        Self::new_at(Utc::now())
    }

    /// Rebuild metadata from stored column values.
    ///
    /// The backing store is authoritative for rehydrated records, so this
    /// constructor performs no validation.
    pub fn from_parts(id: Uuid, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            updated_at,
        }
    }

    /// Surrogate identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Instant the record was first persisted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Instant of the most recent mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a mutation at the given instant.
    ///
    /// `updated_at` advances strictly even when the supplied clock reading
    /// has not moved since the previous write.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let bumped = self.updated_at + TimeDelta::nanoseconds(1);
        self.updated_at = now.max(bumped);
    }
}

impl Default for RecordMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn creation_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid instant")
    }

    #[rstest]
    fn new_records_start_with_equal_timestamps(creation_instant: DateTime<Utc>) {
        let meta = RecordMetadata::new_at(creation_instant);
        assert!(!meta.id().is_nil());
        assert_eq!(meta.created_at(), meta.updated_at());
        assert_eq!(meta.created_at(), creation_instant);
    }

    #[rstest]
    fn each_record_gets_a_distinct_id(creation_instant: DateTime<Utc>) {
        let a = RecordMetadata::new_at(creation_instant);
        let b = RecordMetadata::new_at(creation_instant);
        assert_ne!(a.id(), b.id());
    }

    #[rstest]
    fn touch_advances_updated_at_only(creation_instant: DateTime<Utc>) {
        let mut meta = RecordMetadata::new_at(creation_instant);
        let later = creation_instant + TimeDelta::seconds(5);

        meta.touch(later);

        assert_eq!(meta.created_at(), creation_instant);
        assert_eq!(meta.updated_at(), later);
        assert!(meta.updated_at() > meta.created_at());
    }

    #[rstest]
    fn touch_is_strictly_monotonic_even_with_a_stalled_clock(creation_instant: DateTime<Utc>) {
        let mut meta = RecordMetadata::new_at(creation_instant);

        meta.touch(creation_instant);
        let first = meta.updated_at();
        assert!(first > meta.created_at());

        meta.touch(creation_instant);
        assert!(meta.updated_at() > first);
    }

    #[rstest]
    fn from_parts_round_trips_stored_values(creation_instant: DateTime<Utc>) {
        let id = Uuid::new_v4();
        let updated = creation_instant + TimeDelta::minutes(10);
        let meta = RecordMetadata::from_parts(id, creation_instant, updated);

        assert_eq!(meta.id(), id);
        assert_eq!(meta.created_at(), creation_instant);
        assert_eq!(meta.updated_at(), updated);
    }
}
