// src/session/transport.rs
//! Что сессия знает о транспорте: идентификатор канала, статус, эффекты для хоста.

use core::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::timer::TimerHandle;
use crate::api::commands::ClientCommand;

/// Номер канала. Растёт монотонно: события старого канала узнаются по номеру.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Статус соединения.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Действие, которое должен выполнить хост (event loop) по решению сессии.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEffect {
    /// Открыть новый канал к серверу.
    Open {
        connection: ConnectionId,
        address: String,
    },

    /// Закрыть канал. Для сессии он уже мёртв: его события будут проигнорированы.
    Close { connection: ConnectionId },

    /// Запланировать таймер (периодический, если `repeat`).
    ScheduleTimer {
        handle: TimerHandle,
        delay: Duration,
        repeat: bool,
    },

    /// Отменить таймер.
    CancelTimer { handle: TimerHandle },

    /// Отправить команду в открытый канал.
    Send {
        connection: ConnectionId,
        command: ClientCommand,
    },
}
