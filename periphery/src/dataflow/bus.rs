//! Proposal bus connecting every track of a view
//!
//! Tracks publish domain-change proposals and every subscribed track receives
//! them through its own unbounded channel. Publishing never blocks and never
//! fails; the subscriber applies what it received on its next drain.

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use shared::{TrackId, TrackProposal};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Fan-out channel for [`TrackProposal`]s.
///
/// # Ordering
///
/// Each subscriber has its own FIFO channel and `publish` pushes into every one
/// of them before returning, so proposals from one publisher arrive in publish
/// order at every subscriber. Nothing orders proposals from different
/// publishers against each other; consumers compare ids per publisher instead.
///
/// # Examples
///
/// ```rust
/// use futures::{FutureExt, StreamExt};
/// use periphery::dataflow::ProposalBus;
/// use shared::{DomainChange, DomainProposal, TrackId, TrackProposal};
///
/// let bus = ProposalBus::new();
/// let mut inbox = bus.subscribe(TrackId(1));
///
/// bus.publish(TrackProposal {
///     track: TrackId(0),
///     proposal: DomainProposal { id: 1, change: DomainChange::Pan { shift: 4.0 } },
/// });
///
/// let received = inbox.next().now_or_never().flatten().unwrap();
/// assert_eq!(received.proposal.id, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProposalBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

#[derive(Debug)]
struct Subscriber {
    track: TrackId,
    sender: UnboundedSender<TrackProposal>,
}

impl ProposalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `track` and return the stream its proposals arrive on.
    ///
    /// Dropping the returned receiver is the teardown: the subscriber is
    /// pruned on the next publish.
    pub fn subscribe(&self, track: TrackId) -> UnboundedReceiver<TrackProposal> {
        let (sender, receiver) = unbounded();
        self.lock().push(Subscriber { track, sender });
        log::debug!("{track} subscribed to proposal bus");
        receiver
    }

    /// Fire-and-forget delivery to every live subscriber.
    pub fn publish(&self, proposal: TrackProposal) {
        let mut subscribers = self.lock();
        subscribers.retain(|subscriber| {
            match subscriber.sender.unbounded_send(proposal) {
                Ok(()) => true,
                Err(_) => {
                    log::debug!("pruning closed subscriber {}", subscriber.track);
                    false
                }
            }
        });
        log::debug!(
            "{} published proposal #{} to {} subscriber(s)",
            proposal.track,
            proposal.proposal.id,
            subscribers.len()
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|subscriber| !subscriber.sender.is_closed())
            .count()
    }

    // A panic while holding the lock cannot leave the list half-updated, so a
    // poisoned mutex is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
