use std::time::{Duration, Instant};

/// Per-session statistics kept in memory for the header bar
pub struct GameMetrics {
    /// Set while the clock is running
    running_since: Option<Instant>,
    /// Play time banked from earlier running stretches of the current game
    banked: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh `elapsed_time` from the clock
    pub fn update(&mut self) {
        self.elapsed_time = self.banked
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or(Duration::ZERO);
    }

    /// Start or resume the play clock
    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Stop the play clock, keeping the time played so far
    pub fn on_pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
        self.update();
    }

    /// Clear the clock for a fresh board
    pub fn on_reset(&mut self) {
        self.running_since = None;
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
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
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(30);
        assert_eq!(metrics.high_score, 30);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_clock_stands_still_while_paused() {
        let mut metrics = GameMetrics::new();
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(30));
        metrics.on_pause();
        let played = metrics.elapsed_time;
        assert!(played >= Duration::from_millis(30));

        std::thread::sleep(Duration::from_millis(30));
        metrics.update();
        assert_eq!(metrics.elapsed_time, played);

        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(10));
        metrics.update();
        assert!(metrics.elapsed_time >= played + Duration::from_millis(10));
    }

    #[test]
    fn test_reset_clears_clock_but_keeps_records() {
        let mut metrics = GameMetrics::new();
        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(10));
        metrics.on_game_over(20);

        metrics.on_reset();
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
        assert_eq!(metrics.high_score, 20);
        assert_eq!(metrics.games_played, 1);
    }
}
