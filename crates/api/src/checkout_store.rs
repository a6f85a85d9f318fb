//! Process-local storage for checkout sessions.
//!
//! Each checkout is addressed by an opaque token. An entry moves through
//! three states and never back:
//!
//! ```text
//! InProgress --begin_payment--> Processing --complete_payment--> Confirmed
//! ```
//!
//! The draft is dropped when payment completes; only the confirmation record
//! remains. Nothing here survives a restart.
//!
//! The store holds at most `capacity` entries. When it is full, entries idle
//! for longer than the TTL are swept before a new checkout is admitted.
//! Entries whose payment is processing are never swept.

use std::collections::HashMap;

use chrono::Duration;
use cleanpro_core::checkout::{BookingSummary, CheckoutSession};
use cleanpro_core::error::CoreError;
use cleanpro_core::payment::{self, ConfirmationRecord};
use cleanpro_core::types::Timestamp;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum CheckoutEntry {
    InProgress(CheckoutSession),
    /// Payment accepted and the simulated processing delay is running.
    Processing(CheckoutSession),
    Confirmed(ConfirmationRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    InProgress,
    Processing,
    Confirmed,
}

impl CheckoutEntry {
    pub fn status(&self) -> EntryStatus {
        match self {
            Self::InProgress(_) => EntryStatus::InProgress,
            Self::Processing(_) => EntryStatus::Processing,
            Self::Confirmed(_) => EntryStatus::Confirmed,
        }
    }

    /// When the entry was last written.
    fn last_activity(&self) -> Timestamp {
        match self {
            Self::InProgress(session) | Self::Processing(session) => session.updated_at,
            Self::Confirmed(record) => record.booking_date,
        }
    }
}

pub const DEFAULT_CHECKOUT_CAPACITY: usize = 10_000;
pub const DEFAULT_CHECKOUT_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug)]
pub struct CheckoutStore {
    entries: RwLock<HashMap<String, CheckoutEntry>>,
    capacity: usize,
    ttl: Duration,
}

impl Default for CheckoutStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_CHECKOUT_CAPACITY, DEFAULT_CHECKOUT_TTL_SECS)
    }
}

fn not_found(token: &str) -> CoreError {
    CoreError::not_found("Checkout", token)
}

/// Why an entry that is not in progress cannot be edited.
fn locked(entry: &CheckoutEntry) -> CoreError {
    match entry {
        CheckoutEntry::Processing(_) => {
            CoreError::Conflict("Payment for this booking is being processed".into())
        }
        _ => CoreError::Conflict("This booking has already been paid".into()),
    }
}

impl CheckoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(capacity: usize, ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            entries: RwLock::default(),
            capacity: capacity.max(1),
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
        }
    }

    /// Start a new checkout and return its token.
    ///
    /// A full store first sweeps idle entries; if nothing can be evicted
    /// the checkout is refused.
    pub async fn create(&self, now: Timestamp) -> Result<(String, CheckoutSession), CoreError> {
        let mut entries = self.entries.write().await;
        if entries.len() >= self.capacity {
            let evicted = sweep(&mut entries, now, self.ttl);
            tracing::info!(evicted, remaining = entries.len(), "Swept idle checkouts");
            if entries.len() >= self.capacity {
                tracing::warn!(capacity = self.capacity, "Checkout store is full");
                return Err(CoreError::Conflict(
                    "Too many checkouts are open; please try again later".into(),
                ));
            }
        }

        let token = Uuid::new_v4().to_string();
        let session = CheckoutSession::new(now);
        entries.insert(token.clone(), CheckoutEntry::InProgress(session.clone()));
        Ok((token, session))
    }

    /// Drop every entry idle for longer than the TTL. Returns how many went.
    pub async fn sweep_idle(&self, now: Timestamp) -> usize {
        sweep(&mut *self.entries.write().await, now, self.ttl)
    }

    pub async fn get(&self, token: &str) -> Result<CheckoutEntry, CoreError> {
        self.entries
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or_else(|| not_found(token))
    }

    /// Apply `f` to an in-progress session.
    ///
    /// `f` runs against a copy that replaces the stored session only when
    /// `f` succeeds, so a rejected edit leaves no trace.
    pub async fn update<T, F>(&self, token: &str, f: F) -> Result<(T, CheckoutSession), CoreError>
    where
        F: FnOnce(&mut CheckoutSession) -> Result<T, CoreError>,
    {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(token).ok_or_else(|| not_found(token))?;
        let CheckoutEntry::InProgress(session) = entry else {
            return Err(locked(entry));
        };

        let mut draft = session.clone();
        let out = f(&mut draft)?;
        *session = draft.clone();
        Ok((out, draft))
    }

    /// Lock a session that is waiting on payment and hand back what is being
    /// paid for. A second call while processing is refused.
    pub async fn begin_payment(&self, token: &str) -> Result<BookingSummary, CoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(token).ok_or_else(|| not_found(token))?;
        let CheckoutEntry::InProgress(session) = entry else {
            return Err(locked(entry));
        };

        let summary = payment::pending_summary(session)?.clone();
        let processing = CheckoutEntry::Processing(session.clone());
        *entry = processing;
        Ok(summary)
    }

    /// Replace a processing session with its confirmation record.
    pub async fn complete_payment(
        &self,
        token: &str,
        record: ConfirmationRecord,
    ) -> Result<(), CoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(token).ok_or_else(|| not_found(token))?;
        if !matches!(entry, CheckoutEntry::Processing(_)) {
            return Err(CoreError::Internal(format!(
                "Checkout {token} completed payment while {:?}",
                entry.status()
            )));
        }
        *entry = CheckoutEntry::Confirmed(record);
        Ok(())
    }

    /// The confirmation for a paid checkout, if there is one.
    pub async fn confirmation(&self, token: &str) -> Option<ConfirmationRecord> {
        match self.entries.read().await.get(token) {
            Some(CheckoutEntry::Confirmed(record)) => Some(record.clone()),
            _ => None,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn sweep(entries: &mut HashMap<String, CheckoutEntry>, now: Timestamp, ttl: Duration) -> usize {
    let before = entries.len();
    let Some(cutoff) = now.checked_sub_signed(ttl) else {
        return 0;
    };
    entries.retain(|_, entry| {
        matches!(entry, CheckoutEntry::Processing(_)) || entry.last_activity() > cutoff
    });
    before - entries.len()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{NaiveDate, TimeZone, Utc};
    use cleanpro_core::checkout::{CheckoutStep, ContactDetails};
    use cleanpro_core::payment::PaymentMethod;

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2030, 5, 1, 9, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
    }

    async fn store_at_payment() -> (CheckoutStore, String) {
        let store = CheckoutStore::new();
        let (token, _) = store.create(now()).await.unwrap();
        store
            .update(&token, |s| {
                s.select_service("residential".into(), Some("basic".into()), None, now())?;
                s.advance(today(), now())?;
                let visit = today().succ_opt().unwrap_or(today());
                s.set_schedule(visit, "9:00 AM".into(), today(), now())?;
                s.advance(today(), now())?;
                s.advance(today(), now())?;
                s.set_contact(
                    ContactDetails {
                        first_name: "John".into(),
                        last_name: "Doe".into(),
                        email: "john.doe@email.com".into(),
                        phone: "+65 9123 4567".into(),
                        address: "123 Orchard Road".into(),
                        unit: String::new(),
                        postal_code: "238863".into(),
                    },
                    now(),
                )?;
                s.advance(today(), now())
            })
            .await
            .unwrap();
        (store, token)
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = CheckoutStore::new();
        let (token, _) = store.create(now()).await.unwrap();
        assert_eq!(token.len(), 36);
        assert_eq!(store.get(&token).await.unwrap().status(), EntryStatus::InProgress);
        assert_matches!(store.get("nope").await, Err(CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn failed_update_leaves_session_untouched() {
        let store = CheckoutStore::new();
        let (token, _) = store.create(now()).await.unwrap();
        let err = store
            .update(&token, |s| {
                s.select_service("residential".into(), Some("deep".into()), None, now())?;
                s.advance(today(), now())?;
                // Step 2 is incomplete.
                s.advance(today(), now())
            })
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));

        let CheckoutEntry::InProgress(session) = store.get(&token).await.unwrap() else {
            panic!("expected an in-progress session");
        };
        assert_eq!(session.step, CheckoutStep::ServiceSelection);
        assert!(session.draft.service_id.is_none());
    }

    #[tokio::test]
    async fn payment_locks_then_confirms() {
        let (store, token) = store_at_payment().await;
        let summary = store.begin_payment(&token).await.unwrap();

        assert_matches!(store.begin_payment(&token).await, Err(CoreError::Conflict(_)));
        assert_matches!(
            store.update(&token, |s| s.go_back(now())).await,
            Err(CoreError::Conflict(_))
        );
        assert!(store.confirmation(&token).await.is_none());

        let record = payment::confirm(summary, PaymentMethod::Card, now());
        store.complete_payment(&token, record).await.unwrap();

        let confirmed = store.confirmation(&token).await.unwrap();
        assert!(confirmed.booking_id.starts_with("CP"));
        assert_matches!(store.begin_payment(&token).await, Err(CoreError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn payment_before_payment_step_is_rejected() {
        let store = CheckoutStore::new();
        let (token, _) = store.create(now()).await.unwrap();
        assert_matches!(store.begin_payment(&token).await, Err(CoreError::Validation(_)));
        assert_eq!(store.get(&token).await.unwrap().status(), EntryStatus::InProgress);
    }

    #[tokio::test]
    async fn full_store_evicts_idle_checkouts_only() {
        let store = CheckoutStore::with_limits(2, 3600);
        let (stale, _) = store.create(now()).await.unwrap();
        let (fresh, _) = store.create(now() + Duration::minutes(90)).await.unwrap();

        // Two hours in: the first checkout has been idle past the TTL.
        let later = now() + Duration::hours(2);
        let (third, _) = store.create(later).await.unwrap();
        assert_eq!(store.len().await, 2);
        assert_matches!(store.get(&stale).await, Err(CoreError::NotFound { .. }));
        assert!(store.get(&fresh).await.is_ok());
        assert!(store.get(&third).await.is_ok());

        // Nothing idle long enough: refuse rather than grow.
        assert_matches!(store.create(later).await, Err(CoreError::Conflict(_)));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn processing_payments_survive_a_sweep() {
        let (store, token) = store_at_payment().await;
        store.begin_payment(&token).await.unwrap();

        let (idle, _) = store.create(now()).await.unwrap();
        let evicted = store.sweep_idle(now() + Duration::days(30)).await;

        assert_eq!(evicted, 1);
        assert_matches!(store.get(&idle).await, Err(CoreError::NotFound { .. }));
        assert_eq!(store.get(&token).await.unwrap().status(), EntryStatus::Processing);
    }
}
