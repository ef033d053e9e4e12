use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::stream::RawFrame;
use crate::CaptureError;

/// Bridges push-delivered frames into one pull-based "next frame or timeout".
///
/// A single slot holds the pending waiter. Delivery and timeout race for it:
/// whichever takes the sender out of the slot first wins, the loser's effect
/// is a no-op. Frames arriving with no waiter registered are dropped; nothing
/// is queued because a run only ever wants one frame.
#[derive(Default)]
pub struct FrameGate {
    slot: Mutex<Option<oneshot::Sender<RawFrame>>>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called from the backend's delivery context. Resolves the pending wait
    /// if there is one; otherwise the frame is silently dropped.
    pub fn deliver(&self, frame: RawFrame) {
        let waiter = self
            .slot
            .lock()
            .expect("frame gate lock poisoned")
            .take();
        match waiter {
            // send only fails if the waiter already timed out and dropped
            // its receiver; the late frame is discarded either way.
            Some(tx) => {
                let _ = tx.send(frame);
            }
            None => tracing::trace!("frame dropped, no waiter registered"),
        }
    }

    /// Wait for the next delivered frame, or `NoFrame` once `timeout`
    /// elapses. At most one waiter is outstanding; registering a new one
    /// resolves a stale predecessor with `NoFrame`.
    pub async fn next_frame(&self, timeout: Duration) -> Result<RawFrame, CaptureError> {
        let (tx, rx) = oneshot::channel();
        {
            let mut slot = self.slot.lock().expect("frame gate lock poisoned");
            if slot.replace(tx).is_some() {
                tracing::warn!("replaced a stale frame waiter");
            }
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(frame)) => Ok(frame),
            // Sender dropped without a frame; treat like a timeout.
            Ok(Err(_)) => Err(CaptureError::NoFrame),
            Err(_) => {
                // Clear the slot so a frame arriving after the deadline
                // cannot resume a completed wait.
                self.slot
                    .lock()
                    .expect("frame gate lock poisoned")
                    .take();
                Err(CaptureError::NoFrame)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn frame(tag: u8) -> RawFrame {
        RawFrame {
            data: vec![tag; 4],
            width: 1,
            height: 1,
        }
    }

    #[tokio::test]
    async fn delivered_frame_resolves_the_wait() {
        let gate = Arc::new(FrameGate::new());

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.next_frame(Duration::from_secs(1)).await })
        };
        tokio::task::yield_now().await;
        gate.deliver(frame(7));

        let got = waiter.await.unwrap().unwrap();
        assert_eq!(got.data, vec![7; 4]);
    }

    #[tokio::test]
    async fn timeout_yields_no_frame() {
        let gate = FrameGate::new();
        let err = gate.next_frame(Duration::from_millis(100)).await;
        assert!(matches!(err, Err(CaptureError::NoFrame)));
    }

    #[tokio::test]
    async fn late_frame_after_timeout_is_dropped() {
        let gate = Arc::new(FrameGate::new());

        let err = gate.next_frame(Duration::from_millis(50)).await;
        assert!(matches!(err, Err(CaptureError::NoFrame)));

        // The slot was cleared on timeout, so this must be a no-op rather
        // than resuming anything.
        gate.deliver(frame(1));

        // A fresh wait still behaves normally.
        let gate2 = gate.clone();
        let waiter = tokio::spawn(async move { gate2.next_frame(Duration::from_secs(1)).await });
        tokio::task::yield_now().await;
        gate.deliver(frame(2));
        assert_eq!(waiter.await.unwrap().unwrap().data, vec![2; 4]);
    }

    #[tokio::test]
    async fn new_waiter_evicts_a_stale_predecessor_with_no_frame() {
        let gate = Arc::new(FrameGate::new());

        let stale = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.next_frame(Duration::from_secs(5)).await })
        };
        tokio::task::yield_now().await;

        // Registering a second wait drops the first waiter's sender, so the
        // stale wait resolves with NoFrame well before its own deadline.
        let fresh = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.next_frame(Duration::from_secs(1)).await })
        };
        tokio::task::yield_now().await;

        let err = stale.await.unwrap();
        assert!(matches!(err, Err(CaptureError::NoFrame)));

        // The replacement waiter owns the slot and still receives frames.
        gate.deliver(frame(4));
        assert_eq!(fresh.await.unwrap().unwrap().data, vec![4; 4]);
    }

    #[tokio::test]
    async fn delivery_without_waiter_is_a_noop() {
        let gate = FrameGate::new();
        gate.deliver(frame(9));
        // Nothing queued: the next wait must time out rather than observe
        // the earlier frame.
        let err = gate.next_frame(Duration::from_millis(20)).await;
        assert!(matches!(err, Err(CaptureError::NoFrame)));
    }

    #[tokio::test]
    async fn racing_delivery_and_timeout_resolve_exactly_once() {
        // Run the race many times with the deadline right on top of the
        // delivery instant; the waiter must observe exactly one of
        // {frame, NoFrame} every time.
        for _ in 0..100 {
            let gate = Arc::new(FrameGate::new());
            let waiter = {
                let gate = gate.clone();
                tokio::spawn(async move { gate.next_frame(Duration::from_millis(1)).await })
            };
            let producer = {
                let gate = gate.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    gate.deliver(frame(3));
                })
            };

            let outcome = waiter.await.unwrap();
            producer.await.unwrap();
            match outcome {
                Ok(f) => assert_eq!(f.data, vec![3; 4]),
                Err(e) => assert!(matches!(e, CaptureError::NoFrame)),
            }
        }
    }
}
