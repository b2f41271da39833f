//! # Concurrent Hand-off Stress
//!
//! One script thread appends while the host thread drains in a loop.
//! Every record carries a unique sequence number in its payload; the host
//! must see each number exactly once, in increasing order.
//!
//! Run with: cargo test --release --test concurrent_stress -- --nocapture

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use uibridge_core::{
    BackoffConfig, CommandKind, CommandSink, CommandSource, NativeRef, QueueConfig,
    UiCommandQueue,
};

const RECORDS: usize = 10_000;

fn run_stress(config: &QueueConfig) -> Vec<usize> {
    let queue = UiCommandQueue::new(config);
    let (mut producer, mut consumer) = queue.into_split().unwrap();

    let handle = thread::spawn(move || {
        for seq in 0..RECORDS {
            producer.add_command(
                CommandKind::SetProperty,
                Some(seq.to_string().into()),
                NativeRef::from_addr(seq + 1),
                NativeRef::NULL,
                seq % 100 == 0,
            );
        }
        producer.stats()
    });

    let mut observed = Vec::with_capacity(RECORDS);
    let mut drain_into = |consumer: &mut uibridge_core::CommandConsumer| {
        let session = consumer.drain();
        for record in session.iter() {
            let seq: usize = record.payload_str().unwrap().parse().unwrap();
            assert_eq!(record.target().addr(), seq + 1);
            observed.push(seq);
        }
    };

    while !handle.is_finished() {
        drain_into(&mut consumer);
    }
    let producer_stats = handle.join().unwrap();
    // Final drain after the producer is done.
    drain_into(&mut consumer);

    assert!(consumer.is_empty());
    assert_eq!(producer_stats.commands_enqueued, RECORDS as u64);
    observed
}

fn assert_exactly_once_in_order(observed: &[usize]) {
    assert_eq!(observed.len(), RECORDS);

    let unique: HashSet<_> = observed.iter().copied().collect();
    assert_eq!(unique.len(), RECORDS, "duplicate records observed");

    for pair in observed.windows(2) {
        assert!(pair[0] < pair[1], "order violated: {} before {}", pair[0], pair[1]);
    }
}

#[test]
fn stress_ten_thousand_records() {
    let observed = run_stress(&QueueConfig::dedicated());
    assert_exactly_once_in_order(&observed);
}

#[test]
fn stress_with_tiny_buffers_and_eager_sleep() {
    let config = QueueConfig {
        dedicated_thread: true,
        initial_capacity: 1,
        backoff: BackoffConfig {
            spin_limit: 0,
            yield_limit: 1,
            sleep_micros: 1,
        },
    };
    let observed = run_stress(&config);
    assert_exactly_once_in_order(&observed);
}

#[test]
fn host_wakes_on_update_requests() {
    let queue = UiCommandQueue::new(&QueueConfig::dedicated());
    let (mut producer, mut consumer) = queue.into_split().unwrap();

    let handle = thread::spawn(move || {
        for frame in 0..10 {
            producer.add_command(
                CommandKind::CreateNode,
                Some(format!("frame-{frame}").into()),
                NativeRef::NULL,
                NativeRef::NULL,
                false,
            );
            producer.add_command(
                CommandKind::SetStyle,
                Some("opacity: 1".into()),
                NativeRef::NULL,
                NativeRef::NULL,
                true,
            );
            thread::sleep(Duration::from_millis(1));
        }
    });

    let mut total = 0;
    while total < 20 {
        if consumer.wait_for_update(Duration::from_secs(5)) {
            total += consumer.drain().len();
        } else {
            panic!("host never woke up");
        }
    }
    handle.join().unwrap();

    total += consumer.drain().len();
    assert_eq!(total, 20);
}
