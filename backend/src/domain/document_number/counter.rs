//! Counter identity, state, and the mutations a store may apply to it.

use std::fmt;

use chrono::{DateTime, Utc};

use super::prefix::DocumentPrefix;
use super::serial_date::SerialDate;
use crate::domain::UserId;

/// Identifies one counter: an owner's prefix on one calendar day.
///
/// ## Invariants
/// - `Display` renders `{owner}_{prefix}_{YYMMDD}`. Prefixes are
///   alphanumeric and owner ids are hyphenated UUIDs, so the rendering is
///   unambiguous.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use docket::domain::{CounterKey, DocumentPrefix, SerialDate, UserId};
///
/// let owner = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("owner");
/// let date = SerialDate::from_naive(NaiveDate::from_ymd_opt(2025, 10, 10).expect("date"));
/// let key = CounterKey::new(owner, DocumentPrefix::new("DN").expect("prefix"), date);
/// assert_eq!(key.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6_DN_251010");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey {
    owner: UserId,
    prefix: DocumentPrefix,
    date: SerialDate,
}

impl CounterKey {
    /// Build a key from its components.
    pub fn new(owner: UserId, prefix: DocumentPrefix, date: SerialDate) -> Self {
        Self {
            owner,
            prefix,
            date,
        }
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Document prefix.
    pub fn prefix(&self) -> &DocumentPrefix {
        &self.prefix
    }

    /// Calendar day.
    pub fn date(&self) -> SerialDate {
        self.date
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.owner, self.prefix, self.date)
    }
}

/// Persisted counter state for one [`CounterKey`].
///
/// `last_number` is the highest sequence issued so far; `0` means nothing has
/// been issued since the counter was created or last reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNumberCounter {
    pub key: CounterKey,
    pub last_number: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentNumberCounter {
    /// A counter that has never issued a number.
    pub fn fresh(key: CounterKey, now: DateTime<Utc>) -> Self {
        Self {
            key,
            last_number: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply `mutation` in place, refreshing `updated_at`, and return the
    /// `last_number` it replaced.
    ///
    /// Returns `None` and leaves the counter untouched when the sequence
    /// cannot advance any further.
    pub fn apply(&mut self, mutation: CounterMutation, now: DateTime<Utc>) -> Option<u64> {
        let previous = self.last_number;
        self.last_number = mutation.next_value(previous)?;
        self.updated_at = now;
        Some(previous)
    }
}

/// Committed result of one atomic counter mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterTransition {
    /// `last_number` before the mutation; `0` when the mutation created the
    /// counter.
    pub previous_number: u64,
    /// State after the mutation.
    pub counter: DocumentNumberCounter,
}

/// Read-modify-write step a counter store applies atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMutation {
    /// Advance `last_number` by one.
    Increment,
    /// Overwrite `last_number` with zero.
    Reset,
}

impl CounterMutation {
    /// Compute the value that follows `current`.
    ///
    /// # Examples
    /// ```
    /// use docket::domain::CounterMutation;
    ///
    /// assert_eq!(CounterMutation::Increment.next_value(4), Some(5));
    /// assert_eq!(CounterMutation::Reset.next_value(4), Some(0));
    /// assert_eq!(CounterMutation::Increment.next_value(i64::MAX as u64), None);
    /// ```
    pub fn next_value(self, current: u64) -> Option<u64> {
        match self {
            Self::Increment => current
                .checked_add(1)
                .filter(|next| *next <= MAX_SEQUENCE),
            Self::Reset => Some(0),
        }
    }
}

/// Largest sequence any store can persist (`BIGINT` upper bound).
pub const MAX_SEQUENCE: u64 = i64::MAX as u64;
