//! tests/poll_tests.rs
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mcstatus_bot::Error;
use mcstatus_bot::minecraft::{ServerStatus, StatusProbe};
use mcstatus_bot::presence::PresenceSink;
use mcstatus_bot::tasks::spawn_status_poll_task;

// ---------- Mock probe ----------
struct FixedProbe(ServerStatus);

#[async_trait]
impl StatusProbe for FixedProbe {
    async fn probe(&self) -> ServerStatus {
        self.0
    }
}

// ---------- Mock sink ----------
#[derive(Default)]
struct RecordingSink {
    published: Mutex<Vec<ServerStatus>>,
}

impl PresenceSink for RecordingSink {
    fn publish(&self, status: &ServerStatus) -> Result<(), Error> {
        self.published.lock().unwrap().push(*status);
        Ok(())
    }
}

#[tokio::test]
async fn poll_task_publishes_each_cycle() {
    let status = ServerStatus::Online { online: 3, max: 20 };
    let probe = Arc::new(FixedProbe(status));
    let sink = Arc::new(RecordingSink::default());

    let handle = spawn_status_poll_task(probe, sink.clone(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(90)).await;
    handle.stop();

    let seen = sink.published.lock().unwrap();
    assert!(seen.len() >= 2, "expected at least two cycles, saw {}", seen.len());
    assert!(seen.iter().all(|s| *s == status));
}

#[tokio::test]
async fn first_cycle_runs_immediately() {
    let probe = Arc::new(FixedProbe(ServerStatus::Offline));
    let sink = Arc::new(RecordingSink::default());

    // Period far longer than the wait: only the immediate first cycle fits.
    let handle = spawn_status_poll_task(probe, sink.clone(), Duration::from_secs(60));
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.stop();

    assert_eq!(sink.published.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn stopped_task_publishes_nothing_further() {
    let probe = Arc::new(FixedProbe(ServerStatus::Offline));
    let sink = Arc::new(RecordingSink::default());

    let handle = spawn_status_poll_task(probe, sink.clone(), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(45)).await;
    handle.stop();

    let count = sink.published.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(45)).await;
    assert_eq!(sink.published.lock().unwrap().len(), count);
}

#[tokio::test]
async fn publish_errors_do_not_stop_the_loop() {
    struct FailingSink {
        calls: Mutex<u32>,
    }

    impl PresenceSink for FailingSink {
        fn publish(&self, _status: &ServerStatus) -> Result<(), Error> {
            *self.calls.lock().unwrap() += 1;
            Err(Error::Platform("send failed".into()))
        }
    }

    let probe = Arc::new(FixedProbe(ServerStatus::Offline));
    let sink = Arc::new(FailingSink { calls: Mutex::new(0) });

    let handle = spawn_status_poll_task(probe, sink.clone(), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(55)).await;
    handle.stop();

    assert!(*sink.calls.lock().unwrap() >= 2);
}
