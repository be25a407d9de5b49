//! Session stats for the header line. Kept in memory only.

use std::time::{Duration, Instant};

pub struct GameMetrics {
    started_at: Instant,
    /// Play time of the current game, frozen once it ends
    pub elapsed_time: Duration,
    /// Best score since the program started
    pub high_score: u32,
    pub games_played: u32,
    finished: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        if !self.finished {
            self.elapsed_time = self.started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        *self = Self {
            high_score: self.high_score,
            games_played: self.games_played,
            ..Self::new()
        };
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.finished = true;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// `MM:SS`; minutes are not wrapped into hours
    pub fn format_time(&self) -> String {
        let secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        for (secs, expected) in [(0, "00:00"), (59, "00:59"), (125, "02:05"), (3661, "61:01")] {
            metrics.elapsed_time = Duration::from_secs(secs);
            assert_eq!(metrics.format_time(), expected);
        }
    }

    #[test]
    fn test_best_score_survives_restarts() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        metrics.on_game_start();
        metrics.on_game_over(4);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_start();
        metrics.on_game_over(12);
        assert_eq!(metrics.high_score, 12);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_restart_clears_play_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(90);
        metrics.on_game_over(1);

        metrics.on_game_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
        metrics.update();
        assert!(metrics.elapsed_time < Duration::from_secs(1));
    }

    #[test]
    fn test_time_frozen_after_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(3);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }
}
