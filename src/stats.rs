use serde::Serialize;

/// Counters accumulated over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub total_rounds: u32,
    pub caught: u32,
    pub missed: u32,
    pub false_alarms: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_catch(&mut self) {
        self.caught += 1;
    }

    pub fn record_miss(&mut self) {
        self.missed += 1;
    }

    pub fn record_false_alarm(&mut self) {
        self.false_alarms += 1;
    }

    pub fn finish_round(&mut self) {
        self.total_rounds += 1;
    }

    /// Rounds in which a star was shown and either caught or missed
    pub fn stars_seen(&self) -> u32 {
        self.caught + self.missed
    }

    /// Share of seen stars that were caught, as a percentage
    pub fn catch_rate(&self) -> Option<f64> {
        match self.stars_seen() {
            0 => None,
            seen => Some((self.caught as f64 / seen as f64 * 100.0).round()),
        }
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("total: {}", self.total_rounds),
            format!("caught stars: {}", self.caught),
            format!("missed stars: {}", self.missed),
            format!("false alarms: {}", self.false_alarms),
        ]
    }
}
