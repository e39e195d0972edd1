use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use glowcart_events::{EventBus, EventEnvelope, Subscription};

use crate::notifications::{CustomerNotifier, OrderNotification};

/// Handle to control and join a background worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Delivers published order notifications to a `CustomerNotifier`.
///
/// - Subscribes to the notification bus at spawn time
/// - A failed delivery is logged and dropped (no retry)
/// - Supports graceful shutdown
#[derive(Debug)]
pub struct NotificationWorker;

impl NotificationWorker {
    /// Spawn the worker thread.
    ///
    /// Messages published before `spawn` returns a subscription are not seen.
    pub fn spawn<B, N>(name: &'static str, bus: B, notifier: N) -> std::io::Result<WorkerHandle>
    where
        B: EventBus<EventEnvelope<OrderNotification>>,
        N: CustomerNotifier + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let sub = bus.subscribe();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker_loop(name, sub, shutdown_rx, &notifier))?;

        Ok(WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        })
    }
}

fn worker_loop<N>(
    name: &'static str,
    sub: Subscription<EventEnvelope<OrderNotification>>,
    shutdown_rx: mpsc::Receiver<()>,
    notifier: &N,
) where
    N: CustomerNotifier,
{
    let tick = Duration::from_millis(250);

    loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }

        match sub.recv_timeout(tick) {
            Ok(envelope) => {
                let notification = envelope.payload();
                match notifier.notify(notification) {
                    Ok(()) => debug!(
                        worker = name,
                        event_id = %envelope.event_id(),
                        order_id = %notification.order_id,
                        "notification delivered"
                    ),
                    Err(err) => warn!(
                        worker = name,
                        order_id = %notification.order_id,
                        error = %err,
                        "notification delivery failed"
                    ),
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
}
