//! Race engine
//!
//! Owns the lane roster (borrowed horses), the random source and the tick
//! logic. A race is started with [`RaceEngine::run`], which hands back a
//! [`RaceRun`] that drives the ticks.

use derby_core::{Distance, Horse, LaneNumber, LaneSnapshot, RaceResult, RaceSnapshot};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::error::{RaceError, Result};
use crate::model;
use crate::run::RaceRun;

/// Fixed-size lane roster plus the tick loop that races it
///
/// Horses are borrowed for the engine's lifetime `'h`. Confidence changes
/// made after a race stay on the horses once the engine is dropped.
pub struct RaceEngine<'h, R = StdRng> {
    race_length: Distance,
    lanes: Vec<Option<&'h mut Horse>>,
    config: EngineConfig,
    rng: R,
    races_run: u64,
}

impl<'h> RaceEngine<'h, StdRng> {
    /// Create an engine with default configuration
    pub fn new(lane_count: usize, race_length: Distance) -> Result<Self> {
        Self::with_config(lane_count, race_length, EngineConfig::default())
    }

    /// Create an engine, seeding the random source from `config.seed` if set
    pub fn with_config(
        lane_count: usize,
        race_length: Distance,
        config: EngineConfig,
    ) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(lane_count, race_length, config, rng)
    }
}

impl<'h, R: Rng> RaceEngine<'h, R> {
    /// Create an engine driven by a caller-supplied random source
    pub fn with_rng(
        lane_count: usize,
        race_length: Distance,
        config: EngineConfig,
        rng: R,
    ) -> Result<Self> {
        if lane_count == 0 {
            return Err(RaceError::InvalidConfig(
                "lane count must be positive".to_string(),
            ));
        }
        if race_length == 0 {
            return Err(RaceError::InvalidConfig(
                "race length must be positive".to_string(),
            ));
        }
        config.validate()?;

        Ok(Self {
            race_length,
            lanes: (0..lane_count).map(|_| None).collect(),
            config,
            rng,
            races_run: 0,
        })
    }

    pub fn race_length(&self) -> Distance {
        self.race_length
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of races started on this engine
    pub fn races_run(&self) -> u64 {
        self.races_run
    }

    /// Put a horse in a 1-based lane
    ///
    /// An occupied lane is silently overwritten.
    pub fn assign_lane(&mut self, horse: &'h mut Horse, lane: LaneNumber) -> Result<()> {
        let lane_count = self.lanes.len();
        let slot = lane
            .checked_sub(1)
            .and_then(|idx| self.lanes.get_mut(idx))
            .ok_or(RaceError::InvalidLane { lane, lane_count })?;

        debug!("Lane {} assigned to {}", lane, horse.name());
        *slot = Some(horse);
        Ok(())
    }

    /// Horse currently in a 1-based lane
    pub fn horse(&self, lane: LaneNumber) -> Option<&Horse> {
        lane.checked_sub(1)
            .and_then(|idx| self.lanes.get(idx))
            .and_then(|slot| slot.as_deref())
    }

    /// Iterate assigned horses in lane order
    pub fn horses(&self) -> impl Iterator<Item = (LaneNumber, &Horse)> {
        self.lanes
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_deref().map(|horse| (idx + 1, horse)))
    }

    /// Start a race
    ///
    /// Fails without touching any horse if a lane is empty. Otherwise every
    /// horse goes back to the start line and the returned [`RaceRun`]
    /// yields one snapshot per tick followed by the result.
    pub fn run(&mut self) -> Result<RaceRun<'_, 'h, R>> {
        if let Some(idx) = self.lanes.iter().position(Option::is_none) {
            return Err(RaceError::IncompleteRoster { lane: idx + 1 });
        }

        for horse in self.lanes.iter_mut().flatten() {
            horse.reset_for_race();
        }
        self.races_run += 1;

        info!(
            "Race {} started: {} lanes, length {}",
            self.races_run,
            self.lanes.len(),
            self.race_length
        );

        Ok(RaceRun::new(self))
    }

    /// First lane (ascending) whose horse has reached the finish line
    pub fn winning_lane(&self) -> Option<LaneNumber> {
        self.horses()
            .find(|(_, horse)| horse.distance_travelled() >= self.race_length)
            .map(|(lane, _)| lane)
    }

    /// Advance every standing horse once, then capture the whole field
    pub(crate) fn tick(&mut self, tick: u64) -> RaceSnapshot {
        let fall_base_rate = self.config.fall_base_rate;
        let rng = &mut self.rng;

        for (idx, slot) in self.lanes.iter_mut().enumerate() {
            if let Some(horse) = slot {
                let stride = model::advance_horse(horse, rng, fall_base_rate);
                if stride.fell {
                    debug!("Tick {}: {} (lane {}) fell", tick, horse.name(), idx + 1);
                }
            }
        }

        self.snapshot(tick)
    }

    /// Current state of every assigned lane
    pub fn snapshot(&self, tick: u64) -> RaceSnapshot {
        let lanes = self
            .horses()
            .map(|(lane, horse)| LaneSnapshot::capture(lane, horse))
            .collect();
        RaceSnapshot::new(tick, lanes)
    }

    /// Apply the confidence adjustment and build the result
    pub(crate) fn settle(&mut self, winner_lane: LaneNumber, ticks: u64) -> RaceResult {
        let winner_name = self
            .horse(winner_lane)
            .map(|horse| horse.name().to_string())
            .unwrap_or_default();

        for (idx, slot) in self.lanes.iter_mut().enumerate() {
            if let Some(horse) = slot {
                model::adjust_confidence(horse, idx + 1 == winner_lane);
            }
        }

        info!(
            "And the winner is {} (lane {}) after {} ticks",
            winner_name, winner_lane, ticks
        );

        RaceResult::new(winner_name, winner_lane, ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn headless(fall_base_rate: f64) -> EngineConfig {
        EngineConfig::headless()
            .with_seed(42)
            .with_fall_base_rate(fall_base_rate)
    }

    #[test]
    fn test_rejects_empty_track_or_roster() {
        assert!(matches!(
            RaceEngine::new(0, 10),
            Err(RaceError::InvalidConfig(_))
        ));
        assert!(matches!(
            RaceEngine::new(3, 0),
            Err(RaceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_assign_lane_bounds() {
        let mut a = Horse::new("A", 'A', dec!(0.5));
        let mut b = Horse::new("B", 'B', dec!(0.5));
        let mut c = Horse::new("C", 'C', dec!(0.5));
        let mut engine = RaceEngine::new(2, 10).unwrap();

        assert_eq!(
            engine.assign_lane(&mut a, 0),
            Err(RaceError::InvalidLane {
                lane: 0,
                lane_count: 2
            })
        );
        assert_eq!(
            engine.assign_lane(&mut b, 3),
            Err(RaceError::InvalidLane {
                lane: 3,
                lane_count: 2
            })
        );
        assert!(engine.assign_lane(&mut c, 2).is_ok());
        assert_eq!(engine.horse(2).map(Horse::name), Some("C"));
        assert!(engine.horse(1).is_none());
    }

    #[test]
    fn test_assign_lane_last_write_wins() {
        let mut a = Horse::new("A", 'A', dec!(0.5));
        let mut b = Horse::new("B", 'B', dec!(0.5));
        let mut engine = RaceEngine::new(1, 10).unwrap();

        engine.assign_lane(&mut a, 1).unwrap();
        engine.assign_lane(&mut b, 1).unwrap();

        assert_eq!(engine.horse(1).map(Horse::name), Some("B"));
    }

    #[test]
    fn test_run_with_gap_fails_and_leaves_horses_alone() {
        let mut a = Horse::new("A", 'A', dec!(0.5));
        a.move_forward();
        a.fall();

        let mut engine = RaceEngine::with_config(3, 10, headless(0.0)).unwrap();
        engine.assign_lane(&mut a, 1).unwrap();

        match engine.run() {
            Err(err) => assert_eq!(err, RaceError::IncompleteRoster { lane: 2 }),
            Ok(_) => panic!("race should not start with an empty lane"),
        }
        assert_eq!(engine.races_run(), 0);

        let a = engine.horse(1).unwrap();
        assert_eq!(a.distance_travelled(), 1);
        assert!(a.has_fallen());
    }

    #[test]
    fn test_winning_lane_breaks_ties_by_lane_order() {
        let mut a = Horse::new("A", 'A', dec!(0.5));
        let mut b = Horse::new("B", 'B', dec!(0.5));
        for _ in 0..50 {
            a.move_forward();
            b.move_forward();
        }

        let mut engine = RaceEngine::new(2, 50).unwrap();
        engine.assign_lane(&mut a, 1).unwrap();
        engine.assign_lane(&mut b, 2).unwrap();

        assert_eq!(engine.winning_lane(), Some(1));
    }

    #[test]
    fn test_winning_lane_requires_reaching_line() {
        let mut a = Horse::new("A", 'A', dec!(0.5));
        let mut b = Horse::new("B", 'B', dec!(0.5));
        for _ in 0..9 {
            a.move_forward();
        }
        for _ in 0..12 {
            b.move_forward();
        }

        let mut engine = RaceEngine::new(2, 10).unwrap();
        engine.assign_lane(&mut a, 1).unwrap();
        engine.assign_lane(&mut b, 2).unwrap();

        assert_eq!(engine.winning_lane(), Some(2));
    }

    #[test]
    fn test_tick_snapshot_covers_every_lane() {
        let mut a = Horse::new("A", 'A', dec!(1.0));
        let mut b = Horse::new("B", 'B', dec!(0.0));
        let mut engine = RaceEngine::with_config(2, 10, headless(0.0)).unwrap();
        engine.assign_lane(&mut a, 1).unwrap();
        engine.assign_lane(&mut b, 2).unwrap();

        let snapshot = engine.tick(1);

        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.lanes.len(), 2);
        assert_eq!(snapshot.lanes[0].distance_travelled, 1);
        assert_eq!(snapshot.lanes[1].distance_travelled, 0);
        assert_eq!(snapshot.lanes[1].name, "B");
    }

    #[test]
    fn test_settle_adjusts_every_lane() {
        let mut a = Horse::new("A", 'A', dec!(0.5));
        let mut b = Horse::new("B", 'B', dec!(0.55));
        let mut c = Horse::new("C", 'C', dec!(0.15));
        let mut engine = RaceEngine::new(3, 10).unwrap();
        engine.assign_lane(&mut a, 1).unwrap();
        engine.assign_lane(&mut b, 2).unwrap();
        engine.assign_lane(&mut c, 3).unwrap();

        let result = engine.settle(1, 12);

        assert_eq!(result, RaceResult::new("A", 1, 12));
        assert_eq!(engine.horse(1).unwrap().confidence(), dec!(0.6));
        assert_eq!(engine.horse(2).unwrap().confidence(), dec!(0.5));
        assert_eq!(engine.horse(3).unwrap().confidence(), dec!(0.1));
    }
}
