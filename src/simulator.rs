//! Repeated self-play with aggregate statistics.

use crate::config::AppConfig;
use crate::orchestrator::{MatchRecord, Orchestrator};
use crate::players;
use anyhow::{Context, Result};
use derive_getters::Getters;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use tracing::{info, instrument};
use ultimate_engine::{Engine, Outcome, Sign};

/// Count, total and extremes of a set of durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize)]
pub struct DurationStats {
    /// Number of samples.
    count: usize,
    /// Sum of all samples.
    #[serde(serialize_with = "millis")]
    total: Duration,
    /// Shortest sample.
    #[serde(serialize_with = "millis_opt")]
    shortest: Option<Duration>,
    /// Longest sample.
    #[serde(serialize_with = "millis_opt")]
    longest: Option<Duration>,
}

impl DurationStats {
    /// Adds a sample.
    pub fn record(&mut self, sample: Duration) {
        self.count += 1;
        self.total += sample;
        self.shortest = Some(self.shortest.map_or(sample, |s| s.min(sample)));
        self.longest = Some(self.longest.map_or(sample, |l| l.max(sample)));
    }

    /// Mean sample, zero when empty.
    pub fn average(&self) -> Duration {
        match u32::try_from(self.count) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(count) => self.total / count,
        }
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        write!(
            f,
            "total {:.1} ms, average {:.2} ms, shortest {:.2} ms, longest {:.2} ms",
            ms(self.total),
            ms(self.average()),
            ms(self.shortest.unwrap_or_default()),
            ms(self.longest.unwrap_or_default()),
        )
    }
}

fn millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

fn millis_opt<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match d {
        Some(d) => millis(d, s),
        None => s.serialize_none(),
    }
}

/// Aggregate results of a simulation run.
#[derive(Debug, Clone, Default, Getters, Serialize)]
pub struct SimulationReport {
    /// Games played.
    games: usize,
    /// Games tied.
    ties: usize,
    /// Games won by X.
    x_wins: usize,
    /// Games won by O.
    o_wins: usize,
    /// Length of each game.
    game_time: DurationStats,
    /// X's time per move.
    thinking_x: DurationStats,
    /// O's time per move.
    thinking_o: DurationStats,
}

impl SimulationReport {
    /// Folds one finished game into the report.
    pub fn record(&mut self, record: &MatchRecord) {
        self.games += 1;
        match record.outcome() {
            Outcome::Won(Sign::X) => self.x_wins += 1,
            Outcome::Won(Sign::O) => self.o_wins += 1,
            Outcome::Tied | Outcome::InProgress => self.ties += 1,
        }
        self.game_time.record(*record.duration());
        for &t in record.thinking(Sign::X) {
            self.thinking_x.record(t);
        }
        for &t in record.thinking(Sign::O) {
            self.thinking_o.record(t);
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played: {}", self.games)?;
        writeln!(f, "Games tied:   {}", self.ties)?;
        writeln!(f, "Won by X:     {}", self.x_wins)?;
        writeln!(f, "Won by O:     {}", self.o_wins)?;
        writeln!(f)?;
        writeln!(f, "Game time:    {}", self.game_time)?;
        writeln!(f, "X thinking:   {}", self.thinking_x)?;
        write!(f, "O thinking:   {}", self.thinking_o)
    }
}

/// Runs many games between the two configured players.
#[derive(Debug, Clone, Getters)]
pub struct Simulator {
    config: AppConfig,
    seed: Option<u64>,
}

impl Simulator {
    /// Creates a simulator. With a seed, game `i` uses seed `seed + i`.
    pub fn new(config: AppConfig, seed: Option<u64>) -> Self {
        Self { config, seed }
    }

    /// Plays `games` games, each on a fresh engine.
    #[instrument(skip(self))]
    pub fn run(&self, games: usize) -> Result<SimulationReport> {
        let mut report = SimulationReport::default();
        for index in 0..games {
            let record = self
                .play_one(index as u64)
                .with_context(|| format!("Game {} failed", index + 1))?;
            report.record(&record);
        }
        info!(
            games,
            x_wins = report.x_wins,
            o_wins = report.o_wins,
            ties = report.ties,
            "Simulation finished"
        );
        Ok(report)
    }

    /// Plays game number `index`.
    pub fn play_one(&self, index: u64) -> Result<MatchRecord> {
        let seed = self.seed.map(|s| s.wrapping_add(index));
        let weights = *self.config.heuristic();
        let engine = match seed {
            Some(seed) => Engine::with_seed(weights, seed),
            None => Engine::new(weights),
        };
        let player_x = players::build(self.config.player_x(), seed);
        let player_o = players::build(self.config.player_o(), seed.map(|s| s.wrapping_add(1)));
        Orchestrator::new(engine, player_x, player_o).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_stats() {
        let mut stats = DurationStats::default();
        assert_eq!(stats.average(), Duration::ZERO);
        for ms in [4, 1, 7] {
            stats.record(Duration::from_millis(ms));
        }
        assert_eq!(*stats.count(), 3);
        assert_eq!(*stats.total(), Duration::from_millis(12));
        assert_eq!(stats.average(), Duration::from_millis(4));
        assert_eq!(*stats.shortest(), Some(Duration::from_millis(1)));
        assert_eq!(*stats.longest(), Some(Duration::from_millis(7)));
    }

    #[test]
    fn test_report_counts_outcomes() {
        let config = AppConfig::from_toml("[player_x]\nkind = \"first\"\n[player_o]\nkind = \"random\"\n")
            .expect("valid config");
        let report = Simulator::new(config, Some(4)).run(5).expect("games run");
        assert_eq!(*report.games(), 5);
        assert_eq!(report.ties() + report.x_wins() + report.o_wins(), 5);
        assert_eq!(*report.game_time().count(), 5);
        assert!(*report.thinking_x().count() >= 5);

        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["games"].as_u64(), Some(5));
        assert!(json["thinking_o"]["total"].is_number());
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = AppConfig::from_toml("[player_x]\nkind = \"random\"\n[player_o]\nkind = \"random\"\n")
            .expect("valid config");
        let simulator = Simulator::new(config, Some(11));
        let a = simulator.play_one(0).expect("game runs");
        let b = simulator.play_one(0).expect("game runs");
        assert_eq!(a.moves(), b.moves());
        assert_eq!(a.outcome(), b.outcome());
    }
}
