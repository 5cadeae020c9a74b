// src/session/backoff.rs
//! Экспоненциальная задержка переподключения.

use std::time::Duration;

use super::SessionRules;

/// `min(ceiling, base * 2^attempts)` в миллисекундах, без переполнений.
pub fn reconnect_delay(base_ms: u64, ceiling_ms: u64, attempts: u32) -> Duration {
    let factor = 1u64.checked_shl(attempts).unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor).min(ceiling_ms))
}

/// Счётчик неудачных попыток подряд.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Backoff {
    attempts: u32,
}

impl Backoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Задержка для текущей попытки; счётчик увеличивается.
    pub fn next_delay(&mut self, rules: &SessionRules) -> Duration {
        let delay = rules.reconnect_delay(self.attempts);
        self.attempts = self.attempts.saturating_add(1);
        delay
    }
}
