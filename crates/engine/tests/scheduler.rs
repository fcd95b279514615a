mod support;

use std::sync::Arc;
use std::time::Duration;

use engine::{CycleRunner, Pacing, Scheduler};

use support::{issue, offset, repo, FakeSource, Initial, MemoryStore, RecordingSender};

#[tokio::test(start_paused = true)]
async fn runs_immediately_then_on_every_interval() {
    let source = Arc::new(FakeSource::default());
    let store = Arc::new(MemoryStore::new(Initial::Missing));
    let runner = CycleRunner::new(vec![repo("o/r")], source.clone(), store.clone())
        .with_pacing(Pacing::none());
    let scheduler = Scheduler::new(runner, Duration::from_millis(1_000));

    scheduler
        .run_until(tokio::time::sleep(Duration::from_millis(2_500)))
        .await;

    // t = 0, 1000, 2000
    assert_eq!(store.loads(), 3);
    assert_eq!(store.save_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn shutdown_abandons_in_flight_cycle_without_persisting() {
    let t0 = offset(domain::Timestamp::now(), -600);
    let mut source = FakeSource::default();
    source
        .issues
        .insert(repo("o/r"), vec![issue(1, offset(t0, 1)), issue(2, offset(t0, 2))]);
    let source = Arc::new(source);
    let store = Arc::new(MemoryStore::new(Initial::Missing));
    let slow = Arc::new(RecordingSender::new("slow").with_delay(Duration::from_secs(10)));
    let runner = CycleRunner::new(vec![repo("o/r")], source, store.clone())
        .with_sender(slow.clone())
        .with_pacing(Pacing::none());
    let scheduler = Scheduler::new(runner, Duration::from_secs(300));

    scheduler
        .run_until(tokio::time::sleep(Duration::from_secs(1)))
        .await;

    assert_eq!(store.loads(), 1);
    assert_eq!(store.save_count(), 0);
    assert_eq!(slow.attempted().len(), 1);
    assert!(slow.delivered().is_empty());
}

#[tokio::test(start_paused = true)]
async fn pacing_delays_are_applied_between_sends_and_repositories() {
    let t0 = offset(domain::Timestamp::now(), -600);
    let mut source = FakeSource::default();
    source
        .issues
        .insert(repo("o/a"), vec![issue(1, offset(t0, 1)), issue(2, offset(t0, 2))]);
    let source = Arc::new(source);
    let store = Arc::new(MemoryStore::new(Initial::Missing));
    let sender = Arc::new(RecordingSender::new("rich"));
    let runner = CycleRunner::new(vec![repo("o/a"), repo("o/b")], source, store.clone())
        .with_sender(sender.clone())
        .with_pacing(Pacing::standard());

    let started = tokio::time::Instant::now();
    runner.run_cycle().await;

    // Two sends at 1s each, plus two repositories at 2s each.
    assert_eq!(started.elapsed(), Duration::from_secs(6));
    assert_eq!(sender.delivered().len(), 2);
}
