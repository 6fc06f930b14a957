//! Deduplicating execution coordinator
//!
//! Guarantees at-most-once execution per order identity: the first caller for
//! a key becomes the leader and runs the executor; concurrent callers for the
//! same key attach to the leader's in-flight slot and share its outcome;
//! later callers are served from the completed cache. Distinct keys never
//! wait on each other, and no lock is held across the executor call.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{Order, OrderKey, Trade};
use crate::error::ExecuteError;
use crate::execution::executor::OrderExecutor;

type Outcome = Result<Trade, ExecuteError>;

/// Per-identity cache slot.
///
/// Lifecycle: absent -> InFlight -> Completed on success, or
/// absent -> InFlight -> absent on failure/cancellation (failures are never
/// cached, so the next submission starts a fresh attempt).
enum Slot {
    /// Execution in progress; followers await the channel.
    InFlight(watch::Receiver<Option<Outcome>>),
    /// Terminal for the process lifetime.
    Completed(Trade),
}

/// What the atomic claim on a slot decided for the current caller.
enum Claim {
    Hit(Trade),
    Follow(watch::Receiver<Option<Outcome>>),
    Lead(watch::Sender<Option<Outcome>>),
}

/// Coordinates order execution through a single-flight, per-identity cache.
pub struct ExecutionCoordinator {
    executor: Arc<dyn OrderExecutor>,
    slots: DashMap<OrderKey, Slot>,
}

impl ExecutionCoordinator {
    pub fn new(executor: Arc<dyn OrderExecutor>) -> Self {
        Self {
            executor,
            slots: DashMap::new(),
        }
    }

    /// Execute an order, deduplicating by identity.
    ///
    /// Safe to call concurrently and repeatedly with logically identical
    /// orders: the executor runs at most once per identity, every caller for
    /// that identity observes the same trade (or the same failure), and a
    /// failed identity is retryable. Dropping the returned future cancels
    /// only this caller's participation; a cancelled leader releases the
    /// slot on the way out.
    pub async fn execute_order(&self, order: &Order) -> Result<Trade, ExecuteError> {
        order.validate()?;
        let key = OrderKey::for_order(order);

        // Single atomic claim: hit, follow, or lead. The entry lock guards
        // O(1) bookkeeping only and is released before any await.
        let claim = match self.slots.entry(key.clone()) {
            Entry::Occupied(entry) => match entry.get() {
                Slot::Completed(trade) => Claim::Hit(trade.clone()),
                Slot::InFlight(rx) => Claim::Follow(rx.clone()),
            },
            Entry::Vacant(entry) => {
                let (tx, rx) = watch::channel(None);
                entry.insert(Slot::InFlight(rx));
                Claim::Lead(tx)
            }
        };

        match claim {
            Claim::Hit(trade) => {
                debug!(key = %key, "cache hit, returning stored trade");
                Ok(trade)
            }
            Claim::Follow(rx) => {
                debug!(key = %key, "attaching to in-flight execution");
                Self::await_outcome(rx).await
            }
            Claim::Lead(tx) => self.lead(order, key, tx).await,
        }
    }

    /// Run the executor as the owning caller for this identity.
    async fn lead(
        &self,
        order: &Order,
        key: OrderKey,
        tx: watch::Sender<Option<Outcome>>,
    ) -> Result<Trade, ExecuteError> {
        info!(key = %key, instrument = %order.instrument, "execution started");

        // Releases the slot and notifies followers if this future is dropped
        // before the executor resolves.
        let guard = SlotGuard {
            slots: &self.slots,
            key: &key,
            tx: Some(tx),
        };

        match self.executor.execute(order).await {
            Ok(trade) => {
                info!(key = %key, "execution completed");
                guard.complete(trade.clone());
                Ok(trade)
            }
            Err(err) => {
                warn!(key = %key, error = %err, "execution failed, slot released");
                guard.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Wait for the leader's outcome on a shared in-flight slot.
    async fn await_outcome(mut rx: watch::Receiver<Option<Outcome>>) -> Result<Trade, ExecuteError> {
        match rx.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.clone().unwrap_or(Err(ExecuteError::Cancelled)),
            // Sender dropped without publishing; the slot was already
            // released, so the caller may retry.
            Err(_) => Err(ExecuteError::Cancelled),
        }
    }
}

/// Owns the in-flight slot on behalf of the leader.
///
/// Exactly one of `complete`, `fail` or `Drop` runs. Map mutation always
/// happens before the outcome is published, so a caller arriving in between
/// sees either the completed trade or a vacant (retryable) slot, never a
/// stale in-flight marker.
struct SlotGuard<'a> {
    slots: &'a DashMap<OrderKey, Slot>,
    key: &'a OrderKey,
    tx: Option<watch::Sender<Option<Outcome>>>,
}

impl SlotGuard<'_> {
    fn complete(mut self, trade: Trade) {
        if let Some(tx) = self.tx.take() {
            self.slots
                .insert(self.key.clone(), Slot::Completed(trade.clone()));
            let _ = tx.send(Some(Ok(trade)));
        }
    }

    fn fail(mut self, err: ExecuteError) {
        if let Some(tx) = self.tx.take() {
            self.slots.remove(self.key);
            let _ = tx.send(Some(Err(err)));
        }
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            self.slots.remove(self.key);
            let _ = tx.send(Some(Err(ExecuteError::Cancelled)));
        }
    }
}
