//! Continuous training driver.
//!
//! Wraps a [`QLearningScheduler`] and keeps per-episode history: makespan,
//! schedule anomalies, and the best schedule observed so far. Training can
//! be run for a fixed number of episodes or until a [`StopHandle`] is
//! triggered from another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::Rng;

use super::QLearningScheduler;
use crate::models::{ScheduleSnapshot, Time};
use crate::validation::{audit_schedule, AnomalyCounts};

/// Cooperative stop signal for [`Trainer::run_until_stopped`].
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop; observed before the next episode begins.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What one training episode produced.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// 1-based episode number.
    pub episode: usize,
    /// Cumulative reward of the episode.
    pub total_reward: f64,
    /// Operations placed.
    pub steps: usize,
    /// Makespan of the final snapshot.
    pub makespan: Time,
    /// Whether every product completed.
    pub completed: bool,
    /// Constraint violations found in the final snapshot.
    pub anomalies: AnomalyCounts,
    /// Whether this episode replaced the best schedule.
    pub improved: bool,
}

#[derive(Debug, Clone)]
struct BestSchedule {
    snapshot: ScheduleSnapshot,
    makespan: Time,
    completed: bool,
}

/// Runs training episodes and records their history.
#[derive(Debug)]
pub struct Trainer<R = SmallRng> {
    scheduler: QLearningScheduler<R>,
    episode: usize,
    last_reward: f64,
    makespan_history: Vec<(usize, Time)>,
    anomaly_history: Vec<(usize, AnomalyCounts)>,
    best: Option<BestSchedule>,
}

impl<R: Rng> Trainer<R> {
    pub fn new(scheduler: QLearningScheduler<R>) -> Self {
        Self {
            scheduler,
            episode: 0,
            last_reward: 0.0,
            makespan_history: Vec::new(),
            anomaly_history: Vec::new(),
            best: None,
        }
    }

    /// Runs one episode and records it.
    pub fn step(&mut self) -> EpisodeSummary {
        let result = self.scheduler.train_episode();
        self.episode += 1;

        let makespan = result.makespan();
        let completed = result.is_complete();
        let anomalies = AnomalyCounts::from_violations(&audit_schedule(
            &result.final_snapshot,
            self.scheduler.problem(),
        ));

        let improved = match &self.best {
            None => true,
            Some(best) => completed && (!best.completed || makespan < best.makespan),
        };
        if improved {
            info!(
                "episode {}: new best schedule, makespan {}",
                self.episode, makespan
            );
            self.best = Some(BestSchedule {
                snapshot: result.final_snapshot,
                makespan,
                completed,
            });
        }

        self.last_reward = result.total_reward;
        self.makespan_history.push((self.episode, makespan));
        self.anomaly_history.push((self.episode, anomalies));

        debug!(
            "episode {}: reward {:.2}, steps {}, makespan {}, anomalies {}",
            self.episode,
            result.total_reward,
            result.steps,
            makespan,
            anomalies.total()
        );

        EpisodeSummary {
            episode: self.episode,
            total_reward: result.total_reward,
            steps: result.steps,
            makespan,
            completed,
            anomalies,
            improved,
        }
    }

    /// Runs `n` episodes back to back.
    pub fn run_episodes(&mut self, n: usize) -> Vec<EpisodeSummary> {
        (0..n).map(|_| self.step()).collect()
    }

    /// Runs episodes until `stop` is triggered. Returns the number run.
    ///
    /// The flag is checked between episodes only; an episode in progress
    /// always finishes.
    pub fn run_until_stopped(&mut self, stop: &StopHandle) -> usize {
        let mut ran = 0;
        while !stop.is_stopped() {
            self.step();
            ran += 1;
        }
        info!("training stopped after {} episodes ({} total)", ran, self.episode);
        ran
    }

    /// Mean makespan over the last `window` episodes.
    ///
    /// `None` if no episode has run or `window` is 0.
    pub fn trailing_mean_makespan(&self, window: usize) -> Option<f64> {
        if window == 0 || self.makespan_history.is_empty() {
            return None;
        }
        let start = self.makespan_history.len().saturating_sub(window);
        let tail = &self.makespan_history[start..];
        let sum: Time = tail.iter().map(|&(_, m)| m).sum();
        Some(sum as f64 / tail.len() as f64)
    }

    /// Discards the table, counters, histories and best schedule.
    pub fn reset(&mut self) {
        self.scheduler.reset();
        self.episode = 0;
        self.last_reward = 0.0;
        self.makespan_history.clear();
        self.anomaly_history.clear();
        self.best = None;
        info!("training reset");
    }

    /// Episodes run since creation or the last reset.
    pub fn episode(&self) -> usize {
        self.episode
    }

    /// Cumulative reward of the most recent episode.
    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    /// `(episode, makespan)` for every episode run.
    pub fn makespan_history(&self) -> &[(usize, Time)] {
        &self.makespan_history
    }

    /// `(episode, anomalies)` for every episode run.
    pub fn anomaly_history(&self) -> &[(usize, AnomalyCounts)] {
        &self.anomaly_history
    }

    /// Lowest-makespan completed schedule seen so far.
    pub fn best_schedule(&self) -> Option<&ScheduleSnapshot> {
        self.best.as_ref().map(|b| &b.snapshot)
    }

    pub fn best_makespan(&self) -> Option<Time> {
        self.best.as_ref().map(|b| b.makespan)
    }

    pub fn scheduler(&self) -> &QLearningScheduler<R> {
        &self.scheduler
    }

    /// Mutable access, e.g. to change hyperparameters between episodes.
    pub fn scheduler_mut(&mut self) -> &mut QLearningScheduler<R> {
        &mut self.scheduler
    }
}
