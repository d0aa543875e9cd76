//! In-process query cache
//!
//! Keyed cache of accessor results with:
//! - Request deduplication: one underlying fetch per key, no matter how
//!   many concurrent callers
//! - Stale-while-revalidate: invalidation marks slots stale instead of
//!   dropping them, so callers may keep rendering the old value while
//!   the refetch runs
//! - Prefix invalidation: mutations target a root key and every slot
//!   under it goes stale
//!
//! The cache is an owned component with an explicit lifecycle: one
//! instance per process in production, one per test case in tests. Only
//! this module writes slot state; accessors and views never do.

mod key;

pub use key::{Entity, QueryKey};

use serde::de::DeserializeOwned;
use serde::Serialize;
use srma_common::config::CacheSettings;
use srma_common::{ApiError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::debug;

/// Outcome of one underlying fetch, shared with every waiter on the key.
type FetchOutcome = std::result::Result<serde_json::Value, Arc<ApiError>>;

type OutcomeSender = watch::Sender<Option<FetchOutcome>>;
type OutcomeReceiver = watch::Receiver<Option<FetchOutcome>>;

#[derive(Debug, Clone)]
enum SlotState {
    Value(serde_json::Value),
    /// The most recent fetch for this key failed.
    Error(Arc<ApiError>),
}

#[derive(Debug)]
struct Slot {
    state: SlotState,
    stale: bool,
    stored_at: Instant,
}

#[derive(Default)]
struct CacheInner {
    slots: HashMap<QueryKey, Slot>,
    inflight: HashMap<QueryKey, OutcomeReceiver>,
    /// Monotonic invalidation sequence and the sequence at which each
    /// root was last invalidated. A fetch that started before a later
    /// invalidation of its root lands stale, so a superseded response
    /// can never surface as fresh.
    seq: u64,
    invalidated: HashMap<QueryKey, u64>,
}

/// What a read should do, decided under the lock.
enum Plan {
    Hit(serde_json::Value),
    Wait(OutcomeReceiver),
    Load { tx: OutcomeSender, start_seq: u64 },
}

pub struct QueryCache {
    inner: Mutex<CacheInner>,
    stale_after: Duration,
}

impl QueryCache {
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            stale_after: Duration::from_secs(settings.stale_after_secs),
        }
    }

    /// Cached read.
    ///
    /// A fresh slot returns without invoking the loader. Absent or stale
    /// slots run exactly one loader per key even under concurrent
    /// callers; everyone else awaits that fetch and resolves from its
    /// outcome. A failed fetch marks the slot errored, and the error is
    /// observed by every caller of that fetch rather than being dressed
    /// up as stale data.
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        // Waiters loop back if the fetch they were awaiting was dropped
        // before settling (its owner was cancelled).
        let (tx, start_seq) = loop {
            match self.plan(key) {
                Plan::Hit(value) => {
                    debug!(key = %key, "cache hit");
                    return decode_cached(&value);
                }
                Plan::Wait(rx) => {
                    debug!(key = %key, "awaiting in-flight fetch");
                    if let Some(outcome) = await_outcome(rx).await {
                        return match outcome {
                            Ok(value) => decode_cached(&value),
                            Err(err) => Err(ApiError::Shared(err)),
                        };
                    }
                }
                Plan::Load { tx, start_seq } => break (tx, start_seq),
            }
        };

        debug!(key = %key, "cache miss, fetching");
        let (outcome, ret) = match loader().await {
            Ok(value) => match serde_json::to_value(&value) {
                Ok(json) => (Ok(json), Ok(value)),
                Err(e) => {
                    let err = Arc::new(ApiError::from(e));
                    (Err(err.clone()), Err(ApiError::Shared(err)))
                }
            },
            Err(e) => {
                let err = Arc::new(e);
                (Err(err.clone()), Err(ApiError::Shared(err)))
            }
        };

        self.settle(key, start_seq, &outcome);
        // Waiters read the outcome from the channel, not the slot.
        let _ = tx.send(Some(outcome));
        ret
    }

    /// Last stored value for a key, fresh or stale. This is the
    /// stale-while-revalidate surface: callers may render it while a
    /// refetch is in flight.
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.inner.lock().expect("cache lock poisoned");
        match &inner.slots.get(key)?.state {
            SlotState::Value(value) => serde_json::from_value(value.clone()).ok(),
            SlotState::Error(_) => None,
        }
    }

    /// Store a fresh value directly, bypassing any fetch. Used for
    /// optimistic writes of mutation responses.
    pub fn put<T: Serialize>(&self, key: &QueryKey, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.slots.insert(
            key.clone(),
            Slot {
                state: SlotState::Value(json),
                stale: false,
                stored_at: Instant::now(),
            },
        );
        debug!(key = %key, "cache put");
        Ok(())
    }

    /// Mark every slot whose key is prefixed by `root` as stale. The
    /// next read against any such slot refetches; in-flight fetches for
    /// those keys land stale as well.
    pub fn invalidate(&self, root: &QueryKey) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.seq += 1;
        let seq = inner.seq;
        inner.invalidated.insert(root.clone(), seq);

        let mut marked = 0usize;
        for (key, slot) in inner.slots.iter_mut() {
            if key.starts_with(root) {
                slot.stale = true;
                marked += 1;
            }
        }
        debug!(root = %root, marked, "cache invalidated");
    }

    fn plan(&self, key: &QueryKey) -> Plan {
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        if let Some(slot) = inner.slots.get(key) {
            if let SlotState::Value(value) = &slot.state {
                if !slot.stale && slot.stored_at.elapsed() < self.stale_after {
                    return Plan::Hit(value.clone());
                }
            }
        }

        if let Some(rx) = inner.inflight.get(key) {
            if rx.has_changed().is_ok() || rx.borrow().is_some() {
                return Plan::Wait(rx.clone());
            }
            // The fetch that owned this entry was dropped without
            // settling; the insert below takes the key over.
        }

        let (tx, rx) = watch::channel(None);
        inner.inflight.insert(key.clone(), rx);
        Plan::Load {
            tx,
            start_seq: inner.seq,
        }
    }

    fn settle(&self, key: &QueryKey, start_seq: u64, outcome: &FetchOutcome) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.inflight.remove(key);

        let invalidated_midflight = inner
            .invalidated
            .iter()
            .any(|(root, seq)| *seq > start_seq && key.starts_with(root));

        let slot = match outcome {
            Ok(json) => Slot {
                state: SlotState::Value(json.clone()),
                stale: invalidated_midflight,
                stored_at: Instant::now(),
            },
            Err(err) => Slot {
                state: SlotState::Error(err.clone()),
                stale: true,
                stored_at: Instant::now(),
            },
        };
        inner.slots.insert(key.clone(), slot);
    }
}

async fn await_outcome(mut rx: OutcomeReceiver) -> Option<FetchOutcome> {
    match rx.wait_for(|v| v.is_some()).await {
        Ok(value) => value.clone(),
        // Sender dropped without settling.
        Err(_) => None,
    }
}

fn decode_cached<T: DeserializeOwned>(value: &serde_json::Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| ApiError::contract(format!("cached value failed to decode: {}", e)))
}
