//! Race Engine Integration Test
//!
//! Drives full races through the public API:
//! - Deterministic finish with certain/never movers
//! - Tie on the line
//! - Fallen horses and the all-fallen stall
//! - Reuse across races and stream adaptation

use derby_core::Horse;
use derby_engine::{EngineConfig, RaceEngine, RaceError, RaceEvent};
use futures_util::StreamExt;
use rust_decimal_macros::dec;
use std::time::Duration;

fn deterministic() -> EngineConfig {
    EngineConfig::headless()
        .with_seed(42)
        .with_fall_base_rate(0.0)
}

/// Test the certain mover beats the never mover in exactly race_length ticks
#[tokio::test]
async fn test_deterministic_race_end_to_end() {
    let _ = env_logger::try_init();

    let mut a = Horse::new("Arrow", 'A', dec!(1.0));
    let mut b = Horse::new("Boulder", 'B', dec!(0.0));

    {
        let mut engine = RaceEngine::with_config(2, 5, deterministic()).unwrap();
        engine.assign_lane(&mut a, 1).unwrap();
        engine.assign_lane(&mut b, 2).unwrap();

        let mut run = engine.run().unwrap();
        let mut snapshots = Vec::new();
        let mut result = None;

        while let Some(event) = run.next_event().await {
            match event {
                RaceEvent::Tick(snapshot) => snapshots.push(snapshot),
                RaceEvent::Finished(r) => result = Some(r),
            }
        }

        assert!(run.is_finished());
        assert_eq!(snapshots.len(), 5);
        for (i, snapshot) in snapshots.iter().enumerate() {
            assert_eq!(snapshot.tick, i as u64 + 1);
            assert_eq!(snapshot.lanes[0].distance_travelled, i as u32 + 1);
            assert_eq!(snapshot.lanes[1].distance_travelled, 0);
        }

        let result = result.expect("race should finish");
        assert_eq!(result.winner_name, "Arrow");
        assert_eq!(result.winner_lane, 1);
        assert_eq!(result.ticks, 5);
    }

    // Confidence changes stay on the horses
    assert_eq!(a.confidence(), dec!(1.0));
    assert_eq!(b.confidence(), dec!(0.1));
    assert_eq!(a.distance_travelled(), 5);
}

/// Test simultaneous finishers resolve to the lower lane
#[tokio::test]
async fn test_tie_goes_to_lower_lane() {
    let mut a = Horse::new("Twin A", 'A', dec!(1.0));
    let mut b = Horse::new("Twin B", 'B', dec!(1.0));
    let mut c = Horse::new("Twin C", 'C', dec!(1.0));

    let mut engine = RaceEngine::with_config(3, 50, deterministic()).unwrap();
    // Assign out of order on purpose
    engine.assign_lane(&mut c, 3).unwrap();
    engine.assign_lane(&mut b, 2).unwrap();
    engine.assign_lane(&mut a, 1).unwrap();

    let result = engine.run().unwrap().finish().await.unwrap();

    assert_eq!(result.winner_name, "Twin A");
    assert_eq!(result.ticks, 50);
    assert_eq!(engine.horse(1).unwrap().confidence(), dec!(1.0));
    assert_eq!(engine.horse(2).unwrap().confidence(), dec!(0.9));
    assert_eq!(engine.horse(3).unwrap().confidence(), dec!(0.9));
}

/// Test a race cannot start with an empty lane and nothing is emitted
#[tokio::test]
async fn test_incomplete_roster() {
    let mut a = Horse::new("Lonely", 'L', dec!(0.5));
    let mut engine = RaceEngine::with_config(2, 10, deterministic()).unwrap();
    engine.assign_lane(&mut a, 2).unwrap();

    let err = engine.run().err();
    assert_eq!(err, Some(RaceError::IncompleteRoster { lane: 1 }));
    assert_eq!(engine.races_run(), 0);
}

/// Test assigning outside 1..=lane_count is rejected
#[test]
fn test_invalid_lanes() {
    let mut a = Horse::new("A", 'A', dec!(0.5));
    let mut b = Horse::new("B", 'B', dec!(0.5));
    let mut engine = RaceEngine::new(4, 10).unwrap();

    assert!(matches!(
        engine.assign_lane(&mut a, 0),
        Err(RaceError::InvalidLane { lane: 0, .. })
    ));
    assert!(matches!(
        engine.assign_lane(&mut b, 5),
        Err(RaceError::InvalidLane { lane: 5, .. })
    ));
}

/// Test horses that fall stop moving and, if all fall, the race stalls
#[tokio::test]
async fn test_all_fallen_race_never_finishes() {
    let mut a = Horse::new("Clumsy", 'C', dec!(1.0));
    let mut b = Horse::new("Klutz", 'K', dec!(1.0));

    // Fall chance is 1.0 * 1.0^2: both move once then fall on the first tick
    let config = EngineConfig::headless().with_seed(7).with_fall_base_rate(1.0);
    let mut engine = RaceEngine::with_config(2, 5, config).unwrap();
    engine.assign_lane(&mut a, 1).unwrap();
    engine.assign_lane(&mut b, 2).unwrap();

    let mut run = engine.run().unwrap();
    for _ in 0..100 {
        match run.next_event().await {
            Some(RaceEvent::Tick(snapshot)) => {
                assert!(snapshot.all_fallen());
                assert!(snapshot.lanes.iter().all(|l| l.distance_travelled == 1));
            }
            other => panic!("expected a tick, got {:?}", other),
        }
    }
    assert!(!run.is_finished());
    assert_eq!(run.ticks(), 100);
    drop(run);

    // Abandoned race: no confidence adjustment
    assert_eq!(engine.horse(1).unwrap().confidence(), dec!(1.0));
}

/// Test a headless stalled race can still be cancelled by the host
#[tokio::test]
async fn test_headless_stall_can_be_cancelled() {
    let mut a = Horse::new("Clumsy", 'C', dec!(1.0));
    let mut b = Horse::new("Klutz", 'K', dec!(1.0));

    let config = EngineConfig::headless().with_seed(7).with_fall_base_rate(1.0);
    let mut engine = RaceEngine::with_config(2, 5, config).unwrap();
    engine.assign_lane(&mut a, 1).unwrap();
    engine.assign_lane(&mut b, 2).unwrap();

    let mut run = engine.run().unwrap();
    let drive = async {
        while let Some(event) = run.next_event().await {
            if let RaceEvent::Finished(result) = event {
                return result;
            }
        }
        unreachable!("run ended without a result");
    };

    let outcome = tokio::time::timeout(Duration::from_millis(50), drive).await;
    assert!(outcome.is_err(), "stalled race should still be running");
    assert!(run.ticks() > 1);
    assert!(!run.is_finished());
}

/// Test the engine resets horses and can be raced again
#[tokio::test]
async fn test_engine_is_reusable() {
    let mut a = Horse::new("Again", 'A', dec!(0.8));
    let mut b = Horse::new("Never", 'N', dec!(0.0));

    let config = EngineConfig::headless().with_seed(11).with_fall_base_rate(0.0);
    let mut engine = RaceEngine::with_config(2, 10, config).unwrap();
    engine.assign_lane(&mut a, 1).unwrap();
    engine.assign_lane(&mut b, 2).unwrap();

    let first = engine.run().unwrap().finish().await.unwrap();
    assert_eq!(first.winner_name, "Again");
    assert_eq!(engine.horse(1).unwrap().confidence(), dec!(0.9));

    let second = engine.run().unwrap().finish().await.unwrap();
    assert_eq!(second.winner_name, "Again");
    assert_eq!(engine.horse(1).unwrap().confidence(), dec!(1.0));
    assert_eq!(engine.horse(2).unwrap().confidence(), dec!(0.1));
    assert_eq!(engine.horse(1).unwrap().distance_travelled(), 10);
    assert_eq!(engine.races_run(), 2);
}

/// Test the stream adapter yields ticks then exactly one result
#[tokio::test]
async fn test_stream_adapter() {
    let mut a = Horse::new("Streamer", 'S', dec!(1.0));
    let mut b = Horse::new("Still", 'T', dec!(0.0));

    let mut engine = RaceEngine::with_config(2, 3, deterministic()).unwrap();
    engine.assign_lane(&mut a, 1).unwrap();
    engine.assign_lane(&mut b, 2).unwrap();

    let events: Vec<RaceEvent> = engine.run().unwrap().into_stream().collect().await;

    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], RaceEvent::Tick(_)));
    assert!(matches!(events[2], RaceEvent::Tick(_)));
    match &events[3] {
        RaceEvent::Finished(result) => assert_eq!(result.winner_name, "Streamer"),
        other => panic!("expected result, got {:?}", other),
    }
}

/// Test pacing waits between ticks but not before the first one
#[tokio::test(start_paused = true)]
async fn test_tick_interval_paces_the_race() {
    let mut a = Horse::new("Paced", 'P', dec!(1.0));
    let mut b = Horse::new("Parked", 'Q', dec!(0.0));

    let config = EngineConfig {
        tick_interval: Duration::from_millis(100),
        ..deterministic()
    };
    let mut engine = RaceEngine::with_config(2, 4, config).unwrap();
    engine.assign_lane(&mut a, 1).unwrap();
    engine.assign_lane(&mut b, 2).unwrap();

    let start = tokio::time::Instant::now();
    let result = engine.run().unwrap().finish().await.unwrap();

    assert_eq!(result.ticks, 4);
    // Three pauses between four ticks
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(300), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(400), "elapsed {:?}", elapsed);
}

/// Test the same seed reproduces the same race
#[tokio::test]
async fn test_seeded_races_are_reproducible() {
    async fn race(seed: u64) -> (String, u64) {
        let mut horses = vec![
            Horse::new("One", '1', dec!(0.6)),
            Horse::new("Two", '2', dec!(0.7)),
            Horse::new("Three", '3', dec!(0.5)),
        ];
        let config = EngineConfig::headless().with_seed(seed).with_fall_base_rate(0.0);
        let mut engine = RaceEngine::with_config(3, 20, config).unwrap();
        for (idx, horse) in horses.iter_mut().enumerate() {
            engine.assign_lane(horse, idx + 1).unwrap();
        }
        let result = engine.run().unwrap().finish().await.unwrap();
        (result.winner_name, result.ticks)
    }

    assert_eq!(race(2024).await, race(2024).await);
}
