use serde::{Deserialize, Serialize};

use crate::domain::combo::PlayRecord;
use crate::domain::{PlayerId, RoomId};

/// Максимум мест в комнате.
pub const SEATS_PER_ROOM: usize = 3;

/// Игрок в комнате, как его видит клиент.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomPlayer {
    pub id: PlayerId,
    pub name: String,
    pub hand_count: usize,
    pub is_landlord: bool,
}

/// Авторитетный снапшот комнаты (уже переведённый в доменные типы).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub players: Vec<RoomPlayer>,
    pub turn: Option<PlayerId>,
    pub last_play: Option<PlayRecord>,
    /// Рука локального игрока (идентификаторы как прислал сервер).
    pub hand: Vec<String>,
}

impl RoomSnapshot {
    /// Есть ли игрок, сбросивший все карты (т.е. раунд уже решён).
    pub fn someone_out(&self) -> bool {
        self.players.iter().any(|p| p.hand_count == 0)
    }
}

/// Итог раунда, привязанный к конкретной комнате.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminalState {
    pub room_id: RoomId,
    pub winner_id: Option<PlayerId>,
}

/// Строка списка комнат в лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub player_count: usize,
    pub started: bool,
    pub can_join: bool,
}

/// Статус комнаты в лобби.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomAvailability {
    InProgress,
    Full,
    Open,
}

impl RoomSummary {
    pub fn availability(&self) -> RoomAvailability {
        if self.started {
            RoomAvailability::InProgress
        } else if self.player_count >= SEATS_PER_ROOM {
            RoomAvailability::Full
        } else {
            RoomAvailability::Open
        }
    }
}

/// Рассадка относительно локального игрока: справа ходит следующий, слева — после него.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeatLayout {
    pub me: Option<RoomPlayer>,
    pub right: Option<RoomPlayer>,
    pub left: Option<RoomPlayer>,
}

impl SeatLayout {
    /// Если себя в списке нет — считаем "собой" первое место.
    pub fn arrange(players: &[RoomPlayer], self_id: Option<PlayerId>) -> Self {
        if players.is_empty() {
            return Self::default();
        }
        let n = players.len();
        let base = self_id
            .and_then(|id| players.iter().position(|p| p.id == id))
            .unwrap_or(0);

        Self {
            me: players.get(base).cloned(),
            right: if n > 1 { players.get((base + 1) % n).cloned() } else { None },
            left: if n > 2 { players.get((base + 2) % n).cloned() } else { None },
        }
    }
}
