// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-flight TTL cache.
//!
//! [`CoalescingCache::get`] returns a fresh cached value, joins the
//! computation already in flight for the key, or publishes a new one. The
//! check and the publish happen under the map's shard lock with no await in
//! between, so concurrent callers for the same key share one producer run.
//!
//! Producers run as detached tasks and complete even if every caller goes
//! away. A failed run is reported to every attached caller and the entry is
//! cleared so the next `get` retries.
//!
//! Entries are never evicted: memory grows with the number of distinct keys.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use atrium_core::{AtriumError, panic_message};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Error shared by every caller attached to a failed computation.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The producer returned an error.
    #[error(transparent)]
    Producer(Arc<AtriumError>),

    /// The producer panicked.
    #[error("cache producer panicked: {0}")]
    Panicked(String),

    /// The producer task was cancelled before finishing (runtime shutdown).
    #[error("cache producer task was cancelled")]
    Cancelled,
}

impl From<AtriumError> for CacheError {
    fn from(err: AtriumError) -> Self {
        Self::Producer(Arc::new(err))
    }
}

type Flight<V> = Shared<BoxFuture<'static, Result<V, CacheError>>>;

enum Slot<V> {
    InFlight { generation: u64, flight: Flight<V> },
    Ready { value: V, expires_at: Instant },
}

impl<V> Slot<V> {
    fn is_flight(&self, id: u64) -> bool {
        matches!(self, Slot::InFlight { generation, .. } if *generation == id)
    }
}

struct Inner<V> {
    entries: DashMap<String, Slot<V>>,
    ttl: Duration,
    generations: AtomicU64,
}

/// Keyed cache with single-flight execution and a fixed TTL.
pub struct CoalescingCache<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for CoalescingCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> std::fmt::Debug for CoalescingCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoalescingCache")
            .field("ttl", &self.inner.ttl)
            .field("entries", &self.inner.entries.len())
            .finish()
    }
}

impl<V> CoalescingCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: DashMap::new(),
                ttl,
                generations: AtomicU64::new(0),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Number of keys that have ever been requested and not cleared by a
    /// failure.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Return the value for `key`, running `producer` only when there is
    /// neither a fresh value nor a computation in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn get<F, Fut>(&self, key: &str, producer: F) -> Result<V, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AtriumError>> + Send + 'static,
    {
        let flight = {
            let now = Instant::now();
            match self.inner.entries.entry(key.to_string()) {
                Entry::Occupied(mut occupied) => {
                    let joined = match occupied.get() {
                        Slot::Ready { value, expires_at } if *expires_at > now => {
                            debug!(key, "cache hit");
                            return Ok(value.clone());
                        }
                        Slot::InFlight { flight, .. } => Some(flight.clone()),
                        Slot::Ready { .. } => None,
                    };
                    match joined {
                        Some(flight) => {
                            debug!(key, "joining in-flight computation");
                            flight
                        }
                        None => {
                            debug!(key, "cache entry expired, recomputing");
                            let (generation, flight) = self.launch(key, producer());
                            occupied.insert(Slot::InFlight {
                                generation,
                                flight: flight.clone(),
                            });
                            flight
                        }
                    }
                }
                Entry::Vacant(vacant) => {
                    debug!(key, "cache miss");
                    let (generation, flight) = self.launch(key, producer());
                    vacant.insert(Slot::InFlight {
                        generation,
                        flight: flight.clone(),
                    });
                    flight
                }
            }
        };
        flight.await
    }

    /// Spawn the producer and return its generation and shareable result.
    fn launch<Fut>(&self, key: &str, work: Fut) -> (u64, Flight<V>)
    where
        Fut: Future<Output = Result<V, AtriumError>> + Send + 'static,
    {
        let generation = self.inner.generations.fetch_add(1, Ordering::Relaxed);
        let inner = Arc::clone(&self.inner);
        let task_key = key.to_string();

        let task = tokio::spawn(async move {
            let result = match AssertUnwindSafe(work).catch_unwind().await {
                Ok(result) => result.map_err(CacheError::from),
                Err(payload) => Err(CacheError::Panicked(panic_message(payload.as_ref()))),
            };
            inner.settle(&task_key, generation, &result);
            result
        });

        let inner = Arc::clone(&self.inner);
        let flight_key = key.to_string();
        let flight = async move {
            match task.await {
                Ok(result) => result,
                Err(join_err) => {
                    warn!(key = %flight_key, error = %join_err, "cache producer task did not complete");
                    inner.clear_flight(&flight_key, generation);
                    Err(CacheError::Cancelled)
                }
            }
        }
        .boxed()
        .shared();

        (generation, flight)
    }
}

impl<V: Clone> Inner<V> {
    /// Publish the outcome of flight `generation` unless a newer flight has
    /// replaced it.
    fn settle(&self, key: &str, generation: u64, result: &Result<V, CacheError>) {
        match result {
            Ok(value) => {
                if let Some(mut slot) = self.entries.get_mut(key) {
                    if slot.is_flight(generation) {
                        *slot = Slot::Ready {
                            value: value.clone(),
                            expires_at: Instant::now() + self.ttl,
                        };
                    }
                }
            }
            Err(e) => {
                warn!(key, error = %e, "cache producer failed, clearing entry");
                self.clear_flight(key, generation);
            }
        }
    }

    fn clear_flight(&self, key: &str, generation: u64) {
        self.entries
            .remove_if(key, |_, slot| slot.is_flight(generation));
    }
}
