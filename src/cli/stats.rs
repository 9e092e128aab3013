use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::board::Node;
use crate::game::GameOutcome;

/// Running mean and spread of a sample, Welford style.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct Spread {
    pub count: u64,
    pub mean: f64,
    #[serde(skip)]
    m2: f64,
}

impl Spread {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn merge(&mut self, other: &Spread) {
        if other.count == 0 {
            return;
        }
        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        self.mean += delta * other.count as f64 / count as f64;
        self.m2 += other.m2 + delta * delta * (self.count * other.count) as f64 / count as f64;
        self.count = count;
    }

    /// Sample standard deviation; zero below two values.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct LocationStats {
    pub turns: Spread,
    pub horseshoe_wins: u32,
    pub wins: BTreeMap<String, u32>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct GameStats {
    pub games: u32,
    pub unfinished: u32,
    pub wins: BTreeMap<String, u32>,
    pub horseshoe_wins: u32,
    pub turns: Spread,
    /// Keyed by where the Star was hidden.
    pub by_star_location: BTreeMap<Node, LocationStats>,
    #[serde(skip)]
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, outcome: &GameOutcome, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        let Some(name) = &outcome.winner_name else {
            self.unfinished += 1;
            return;
        };

        self.turns.push(f64::from(outcome.turns));
        *self.wins.entry(name.clone()).or_insert(0) += 1;
        self.horseshoe_wins += u32::from(outcome.horseshoe_win);

        if let Some(star) = outcome.star_location {
            let location = self.by_star_location.entry(star).or_default();
            location.turns.push(f64::from(outcome.turns));
            location.horseshoe_wins += u32::from(outcome.horseshoe_win);
            *location.wins.entry(name.clone()).or_insert(0) += 1;
        }
    }

    pub fn merge(&mut self, other: GameStats) {
        self.games += other.games;
        self.unfinished += other.unfinished;
        self.horseshoe_wins += other.horseshoe_wins;
        self.total_duration += other.total_duration;
        self.turns.merge(&other.turns);
        for (name, wins) in other.wins {
            *self.wins.entry(name).or_insert(0) += wins;
        }
        for (star, theirs) in other.by_star_location {
            let ours = self.by_star_location.entry(star).or_default();
            ours.turns.merge(&theirs.turns);
            ours.horseshoe_wins += theirs.horseshoe_wins;
            for (name, wins) in theirs.wins {
                *ours.wins.entry(name).or_insert(0) += wins;
            }
        }
    }

    pub fn finished(&self) -> u32 {
        self.games - self.unfinished
    }

    pub fn win_rate(&self, name: &str) -> f64 {
        let wins = self.wins.get(name).copied().unwrap_or(0);
        ratio(wins, self.games)
    }

    pub fn horseshoe_rate(&self) -> f64 {
        ratio(self.horseshoe_wins, self.finished())
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}

#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(&mut self, outcome: &GameOutcome, duration: Duration) {
        self.stats.record_game(outcome, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn outcome(winner: Option<&str>, turns: u32, horseshoe: bool, star: Node) -> GameOutcome {
        GameOutcome {
            id: Uuid::nil(),
            seed: 0,
            winner: winner.map(|_| 0),
            winner_name: winner.map(str::to_string),
            horseshoe_win: horseshoe,
            turns,
            star_location: Some(star),
        }
    }

    #[test]
    fn spread_matches_the_textbook_formula() {
        let mut spread = Spread::default();
        for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            spread.push(value);
        }
        assert!((spread.mean - 5.0).abs() < 1e-12);
        assert!((spread.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn merged_stats_equal_sequential_ones() {
        let games = [
            outcome(Some("Amy"), 20, false, Node::Egypt),
            outcome(Some("Brook"), 31, true, Node::Egypt),
            outcome(None, 1000, false, Node::Congo),
            outcome(Some("Amy"), 25, false, Node::Congo),
        ];
        let mut whole = GameStats::new();
        let (mut left, mut right) = (GameStats::new(), GameStats::new());
        for (index, game) in games.iter().enumerate() {
            whole.record_game(game, Duration::from_millis(2));
            let half = if index < 2 { &mut left } else { &mut right };
            half.record_game(game, Duration::from_millis(2));
        }
        left.merge(right);

        assert_eq!(left.games, 4);
        assert_eq!(left.unfinished, 1);
        assert_eq!(left.wins, whole.wins);
        assert_eq!(left.wins["Amy"], 2);
        assert!((left.turns.mean - whole.turns.mean).abs() < 1e-9);
        assert!((left.turns.std_dev() - whole.turns.std_dev()).abs() < 1e-9);
        assert!((left.horseshoe_rate() - 1.0 / 3.0).abs() < 1e-12);
        assert!((left.win_rate("Amy") - 0.5).abs() < 1e-12);
        assert_eq!(left.by_star_location[&Node::Egypt].horseshoe_wins, 1);
        assert_eq!(left.by_star_location[&Node::Congo].turns.count, 1);
    }
}
