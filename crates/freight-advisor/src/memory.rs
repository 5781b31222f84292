//! Quote & Customer Memory
//!
//! Append-only quote log plus per-customer preferences. The store is an
//! injected trait object so callers never touch module-level state; the
//! in-memory implementation guards both maps with a single `RwLock`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::error::{AdvisorError, Result};
use crate::model::TransportMode;

/// Days a saved quote stays valid
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

static QUOTE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// `Q{YYYYMMDDHHMMSS}-{seq}`; the process-wide sequence keeps ids unique
/// within one clock second
pub fn next_quote_id(now: DateTime<Utc>) -> String {
    let seq = QUOTE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("Q{}-{:04}", now.format("%Y%m%d%H%M%S"), seq)
}

/// Fields supplied when saving a quote
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewQuote {
    pub customer_id: String,
    pub origin: String,
    pub destination: String,
    pub cargo_description: String,
    pub total_cost: Decimal,
    pub mode: TransportMode,
}

impl NewQuote {
    fn validate(&self) -> Result<()> {
        if self.customer_id.trim().is_empty() {
            return Err(AdvisorError::invalid("customer_id must not be empty"));
        }
        if self.total_cost.is_sign_negative() && !self.total_cost.is_zero() {
            return Err(AdvisorError::invalid("total_cost must not be negative"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub quote_id: String,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub origin: String,
    pub destination: String,
    pub cargo_description: String,
    pub total_cost: Decimal,
    pub mode: TransportMode,
    pub valid_until: NaiveDate,
}

impl QuoteRecord {
    pub fn from_new(quote: NewQuote, now: DateTime<Utc>) -> Self {
        Self {
            quote_id: next_quote_id(now),
            customer_id: quote.customer_id,
            created_at: now,
            origin: quote.origin,
            destination: quote.destination,
            cargo_description: quote.cargo_description,
            total_cost: quote.total_cost,
            mode: quote.mode,
            valid_until: (now + Duration::days(QUOTE_VALIDITY_DAYS)).date_naive(),
        }
    }
}

/// A page of history
#[derive(Clone, Debug, Serialize)]
pub struct QuoteHistory {
    /// Matching quotes in the whole log
    pub total: usize,

    /// The most recent matches, oldest first
    pub quotes: Vec<QuoteRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub value: String,
    pub saved_at: DateTime<Utc>,
}

/// Storage seam for quotes and customer preferences
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Append a quote and return the stored record
    async fn append(&self, quote: NewQuote) -> Result<QuoteRecord>;

    /// Most recent `limit` quotes, optionally for one customer
    async fn history(&self, customer_id: Option<&str>, limit: usize) -> QuoteHistory;

    /// Find a quote by id
    async fn get(&self, quote_id: &str) -> Option<QuoteRecord>;

    /// Set one preference; last write wins
    async fn upsert_preference(&self, customer_id: &str, key: &str, value: &str) -> Result<PreferenceRecord>;

    /// All preferences of a customer, `None` when nothing is stored
    async fn preferences(&self, customer_id: &str) -> Option<BTreeMap<String, PreferenceRecord>>;
}

#[derive(Default)]
struct MemoryState {
    quotes: Vec<QuoteRecord>,
    customers: HashMap<String, BTreeMap<String, PreferenceRecord>>,
}

/// Process-lifetime store; nothing is ever evicted
#[derive(Default)]
pub struct MemoryQuoteStore {
    state: RwLock<MemoryState>,
}

impl MemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn quote_count(&self) -> usize {
        self.state.read().await.quotes.len()
    }
}

#[async_trait]
impl QuoteStore for MemoryQuoteStore {
    async fn append(&self, quote: NewQuote) -> Result<QuoteRecord> {
        quote.validate()?;

        let mut state = self.state.write().await;
        let record = QuoteRecord::from_new(quote, Utc::now());
        state.quotes.push(record.clone());

        tracing::info!(
            quote_id = %record.quote_id,
            customer_id = %record.customer_id,
            total_cost = %record.total_cost,
            "Quote saved"
        );
        Ok(record)
    }

    async fn history(&self, customer_id: Option<&str>, limit: usize) -> QuoteHistory {
        let state = self.state.read().await;

        let matching: Vec<&QuoteRecord> = state
            .quotes
            .iter()
            .filter(|q| customer_id.is_none_or(|id| q.customer_id == id))
            .collect();

        let skip = matching.len().saturating_sub(limit);
        QuoteHistory {
            total: matching.len(),
            quotes: matching.into_iter().skip(skip).cloned().collect(),
        }
    }

    async fn get(&self, quote_id: &str) -> Option<QuoteRecord> {
        let state = self.state.read().await;
        state.quotes.iter().find(|q| q.quote_id == quote_id).cloned()
    }

    async fn upsert_preference(&self, customer_id: &str, key: &str, value: &str) -> Result<PreferenceRecord> {
        if customer_id.trim().is_empty() || key.trim().is_empty() {
            return Err(AdvisorError::invalid("customer_id and info_type must not be empty"));
        }

        let record = PreferenceRecord {
            value: value.to_string(),
            saved_at: Utc::now(),
        };

        let mut state = self.state.write().await;
        state
            .customers
            .entry(customer_id.to_string())
            .or_default()
            .insert(key.to_string(), record.clone());

        tracing::info!(customer_id = %customer_id, key = %key, "Customer preference saved");
        Ok(record)
    }

    async fn preferences(&self, customer_id: &str) -> Option<BTreeMap<String, PreferenceRecord>> {
        let state = self.state.read().await;
        state.customers.get(customer_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn quote(customer: &str, cost: Decimal) -> NewQuote {
        NewQuote {
            customer_id: customer.into(),
            origin: "Tokyo, Japan".into(),
            destination: "Shanghai, China".into(),
            cargo_description: "500kg 2CBM machinery".into(),
            total_cost: cost,
            mode: TransportMode::Sea,
        }
    }

    #[test]
    fn test_quote_id_format_and_validity() {
        let now = DateTime::parse_from_rfc3339("2025-01-31T09:08:07Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = QuoteRecord::from_new(quote("001", dec!(488)), now);

        assert!(record.quote_id.starts_with("Q20250131090807-"));
        assert!(record.quote_id.len() >= "Q20250131090807-0000".len());
        assert_eq!(record.valid_until, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn test_ids_unique_within_one_second() {
        let now = Utc::now();
        let ids: HashSet<_> = (0..1000).map(|_| next_quote_id(now)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[tokio::test]
    async fn test_history_returns_last_n_in_insertion_order() {
        let store = MemoryQuoteStore::new();
        for i in 0..15 {
            let customer = if i % 3 == 0 { "A" } else { "B" };
            store.append(quote(customer, Decimal::from(i))).await.unwrap();
        }

        let all = store.history(None, 10).await;
        assert_eq!(all.total, 15);
        let costs: Vec<_> = all.quotes.iter().map(|q| q.total_cost).collect();
        assert_eq!(costs, (5..15).map(Decimal::from).collect::<Vec<_>>());

        let a = store.history(Some("A"), 10).await;
        assert_eq!(a.total, 5);
        assert!(a.quotes.iter().all(|q| q.customer_id == "A"));
        let costs: Vec<_> = a.quotes.iter().map(|q| q.total_cost).collect();
        assert_eq!(costs, vec![dec!(0), dec!(3), dec!(6), dec!(9), dec!(12)]);

        assert!(store.history(Some("nobody"), 10).await.quotes.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = MemoryQuoteStore::new();
        let saved = store.append(quote("001", dec!(488))).await.unwrap();

        assert_eq!(store.get(&saved.quote_id).await, Some(saved));
        assert!(store.get("Q0").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_quotes_rejected() {
        let store = MemoryQuoteStore::new();
        assert!(store.append(quote(" ", dec!(1))).await.is_err());
        assert!(store.append(quote("001", dec!(-1))).await.is_err());
        assert_eq!(store.quote_count().await, 0);
    }

    #[tokio::test]
    async fn test_preferences_last_write_wins() {
        let store = MemoryQuoteStore::new();
        assert!(store.preferences("001").await.is_none());

        store.upsert_preference("001", "preferred_mode", "sea").await.unwrap();
        store.upsert_preference("001", "company", "Acme").await.unwrap();
        store.upsert_preference("001", "preferred_mode", "air").await.unwrap();

        let prefs = store.preferences("001").await.unwrap();
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs["preferred_mode"].value, "air");
        assert!(store.upsert_preference("", "k", "v").await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(MemoryQuoteStore::new());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append(quote("C", Decimal::from(i))).await.unwrap() })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().quote_id);
        }

        assert_eq!(ids.len(), 50);
        assert_eq!(store.quote_count().await, 50);
    }
}
