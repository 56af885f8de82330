use derby_core::{RaceResult, RaceSnapshot};
use futures_util::Stream;
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use crate::engine::RaceEngine;

/// Something observable during a race
#[derive(Debug, Clone, PartialEq)]
pub enum RaceEvent {
    /// State of the field after a tick
    Tick(RaceSnapshot),
    /// The race is over and confidence has been adjusted
    Finished(RaceResult),
}

#[derive(Debug)]
enum Phase {
    Running,
    Settled(RaceResult),
    Done,
}

/// A race in progress
///
/// Pull-based: each call to [`RaceRun::next_event`] computes exactly one
/// tick, so dropping the run abandons the race with nothing left running in
/// the background. The only suspension point is the pause before the next
/// tick, or a plain yield when headless; a tick itself never awaits.
///
/// If no standing horse can move, no one can reach the line and the run
/// keeps producing ticks forever. Hosts that care can watch
/// [`RaceSnapshot::is_stalled`] and drop the run.
pub struct RaceRun<'e, 'h, R = StdRng> {
    engine: &'e mut RaceEngine<'h, R>,
    ticks: u64,
    phase: Phase,
}

impl<'e, 'h, R: Rng> RaceRun<'e, 'h, R> {
    pub(crate) fn new(engine: &'e mut RaceEngine<'h, R>) -> Self {
        Self {
            engine,
            ticks: 0,
            phase: Phase::Running,
        }
    }

    /// Ticks computed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once the result has been handed out
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Compute the next tick, or hand out the result once someone has won
    ///
    /// Returns `None` after the `Finished` event.
    pub async fn next_event(&mut self) -> Option<RaceEvent> {
        if !matches!(self.phase, Phase::Running) {
            return match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Settled(result) => Some(RaceEvent::Finished(result)),
                _ => None,
            };
        }

        let interval = self.engine.config().tick_interval;
        if self.ticks > 0 {
            if interval.is_zero() {
                // Headless runs still give the host a chance to cancel
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(interval).await;
            }
        }

        self.ticks += 1;
        let snapshot = self.engine.tick(self.ticks);
        debug!(
            "Tick {}: leader at {}/{}",
            self.ticks,
            snapshot.leading_distance(),
            self.engine.race_length()
        );

        if let Some(lane) = self.engine.winning_lane() {
            let result = self.engine.settle(lane, self.ticks);
            self.phase = Phase::Settled(result);
        }

        Some(RaceEvent::Tick(snapshot))
    }

    /// Drive the race to the end, handing each snapshot to `on_tick`
    ///
    /// Returns `None` only if the result was already consumed through
    /// [`RaceRun::next_event`].
    pub async fn finish_with<F>(mut self, mut on_tick: F) -> Option<RaceResult>
    where
        F: FnMut(&RaceSnapshot),
    {
        while let Some(event) = self.next_event().await {
            match event {
                RaceEvent::Tick(snapshot) => on_tick(&snapshot),
                RaceEvent::Finished(result) => return Some(result),
            }
        }
        None
    }

    /// Drive the race to the end, discarding snapshots
    pub async fn finish(self) -> Option<RaceResult> {
        self.finish_with(|_| {}).await
    }

    /// Adapt the run into a `Stream` of events
    pub fn into_stream(self) -> impl Stream<Item = RaceEvent> {
        futures_util::stream::unfold(self, |mut run| async move {
            let event = run.next_event().await?;
            Some((event, run))
        })
    }
}
