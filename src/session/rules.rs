// src/session/rules.rs
//! Конфигурация сессии: тайминги переподключения и опроса лобби.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному соединению.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::backoff::reconnect_delay;

/// Правила сессии клиента.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionRules {
    /// Базовая задержка переподключения (мс); удваивается с каждой неудачей.
    pub reconnect_base_ms: u64,
    /// Потолок задержки переподключения (мс).
    pub reconnect_ceiling_ms: u64,
    /// Период опроса списка комнат, пока соединение открыто (мс).
    pub poll_interval_ms: u64,
    /// Сколько подсказок ходов показывать.
    pub max_recommendations: usize,
}

impl SessionRules {
    /// Строгий конструктор.
    pub const fn new(
        reconnect_base_ms: u64,
        reconnect_ceiling_ms: u64,
        poll_interval_ms: u64,
        max_recommendations: usize,
    ) -> Self {
        Self {
            reconnect_base_ms,
            reconnect_ceiling_ms,
            poll_interval_ms,
            max_recommendations,
        }
    }

    /// Стандартный профиль: 1.5 сек базовой задержки, потолок 12 сек,
    /// опрос лобби раз в 500 мс, 5 подсказок.
    pub const fn standard() -> Self {
        Self {
            reconnect_base_ms: 1_500,
            reconnect_ceiling_ms: 12_000,
            poll_interval_ms: 500,
            max_recommendations: 5,
        }
    }

    /// Прочитать правила из JSON. Отсутствующие поля берутся из `standard()`.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Задержка перед переподключением после `attempts` неудач подряд.
    pub fn reconnect_delay(&self, attempts: u32) -> Duration {
        reconnect_delay(self.reconnect_base_ms, self.reconnect_ceiling_ms, attempts)
    }
}

impl Default for SessionRules {
    fn default() -> Self {
        Self::standard()
    }
}
