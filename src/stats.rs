//! Statistics aggregation over game outcomes.

use std::fmt;

use serde::Serialize;

use crate::game::{GameOutcome, GameStatus};

/// A histogram bucket: won in `k` guesses, or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Guesses(usize),
    Loss,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Guesses(k) => write!(f, "{k}"),
            Bucket::Loss => f.write_str("X"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub bucket: Bucket,
    pub count: usize,
}

/// Summary of a batch of games.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramReport {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    /// Games aborted by an agent contract violation; not part of `total_games`.
    pub aborted_games: usize,
    /// NaN when there are no games.
    pub win_rate: f64,
    /// Mean guesses over won games only.
    pub mean_guesses: Option<f64>,
    /// Median guesses over won games only.
    pub median_guesses: Option<f64>,
    pub max_attempts: usize,
    /// `Guesses(1..=max_attempts)` in order, then `Loss`.
    pub histogram: Vec<HistogramBin>,
}

impl HistogramReport {
    pub fn count(&self, bucket: Bucket) -> usize {
        self.histogram
            .iter()
            .find(|bin| bin.bucket == bucket)
            .map_or(0, |bin| bin.count)
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.histogram
    }

    /// The largest bin count, for scaling bars.
    pub fn peak(&self) -> usize {
        self.histogram.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

/// Summarize a batch of outcomes.
///
/// Bucket counts always sum to `outcomes.len()`. Guess statistics cover won
/// games only and are `None` when nothing was won.
pub fn summarize(outcomes: &[GameOutcome]) -> HistogramReport {
    let max_attempts = outcomes.iter().map(GameOutcome::max_attempts).max().unwrap_or(0);

    let mut guess_counts = vec![0usize; max_attempts + 1];
    let mut losses = 0;
    let mut win_lengths: Vec<usize> = Vec::new();
    for outcome in outcomes {
        match outcome.status() {
            GameStatus::Won => {
                guess_counts[outcome.attempts_used()] += 1;
                win_lengths.push(outcome.attempts_used());
            }
            // Outcomes are only taken from finished games.
            GameStatus::Lost | GameStatus::InProgress => losses += 1,
        }
    }

    let mut histogram: Vec<HistogramBin> = (1..=max_attempts)
        .map(|k| HistogramBin {
            bucket: Bucket::Guesses(k),
            count: guess_counts[k],
        })
        .collect();
    histogram.push(HistogramBin {
        bucket: Bucket::Loss,
        count: losses,
    });

    let wins = win_lengths.len();
    HistogramReport {
        total_games: outcomes.len(),
        wins,
        losses,
        aborted_games: 0,
        win_rate: wins as f64 / outcomes.len() as f64,
        mean_guesses: mean(&win_lengths),
        median_guesses: median(&mut win_lengths),
        max_attempts,
        histogram,
    }
}

fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
}

fn median(values: &mut [usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) as f64 / 2.0)
    } else {
        Some(values[mid] as f64)
    }
}
