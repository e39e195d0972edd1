//! Process-local fan-out bus backing customer notifications.

use std::convert::Infallible;
use std::sync::{Mutex, MutexGuard, PoisonError, mpsc};

use tracing::debug;

use crate::bus::{EventBus, Subscription};

/// Broadcasts each published message to every live subscription.
///
/// Subscriptions whose receiving side was dropped are removed on the next
/// publish. A panic while the lock was held leaves the sender list intact, so
/// a poisoned lock is recovered rather than reported.
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    senders: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }

    /// Live subscriptions as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.senders().len()
    }

    fn senders(&self) -> MutexGuard<'_, Vec<mpsc::Sender<M>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = Infallible;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut senders = self.senders();
        let before = senders.len();
        senders.retain(|tx| tx.send(message.clone()).is_ok());

        let pruned = before - senders.len();
        if pruned > 0 {
            debug!(pruned, live = senders.len(), "dropped closed subscriptions");
        }
        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        self.senders().push(tx);
        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn every_subscriber_gets_a_copy() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(7).unwrap();

        assert_eq!(a.try_recv().unwrap(), 7);
        assert_eq!(b.try_recv().unwrap(), 7);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(1).unwrap();

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_recv().unwrap(), 1);
    }

    #[test]
    fn publishing_without_subscribers_succeeds() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::default();
        assert!(bus.publish(3).is_ok());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn keeps_delivering_after_a_panicking_holder() {
        let bus: Arc<InMemoryEventBus<u32>> = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe();

        let poisoner = bus.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.senders.lock().unwrap();
            panic!("holder panicked");
        })
        .join();

        bus.publish(9).unwrap();
        assert_eq!(sub.try_recv().unwrap(), 9);
        assert_eq!(bus.subscriber_count(), 1);
    }
}
