use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, RoomId};

/// Что сейчас показывает строка статуса над столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnStatus {
    /// Первое подключение.
    Connecting,
    /// Связь потеряна, идут попытки переподключения.
    Reconnecting { attempts: u32 },
    /// Подключены, но не в комнате.
    Lobby,
    GameOver {
        winner_id: Option<PlayerId>,
        winner_name: String,
    },
    /// Сидим в комнате, раунд не начат.
    WaitingForPlayers { room_id: RoomId, player_count: usize },
    YourTurn,
    WaitingFor { player_id: PlayerId, name: String },
    /// Раунд идёт, но сервер ещё не назвал, чей ход.
    AwaitingTurn,
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnStatus::Connecting => write!(f, "Подключение к серверу..."),
            TurnStatus::Reconnecting { attempts } => {
                write!(f, "Связь потеряна, переподключение (попытка {})...", attempts)
            }
            TurnStatus::Lobby => write!(f, "Подключено: выберите комнату или создайте новую"),
            TurnStatus::GameOver { winner_name, .. } => {
                write!(f, "Раунд окончен, победитель: {}", winner_name)
            }
            TurnStatus::WaitingForPlayers {
                room_id,
                player_count,
            } => write!(f, "Комната {} ждёт игроков ({}/3)", room_id, player_count),
            TurnStatus::YourTurn => write!(f, "Ваш ход"),
            TurnStatus::WaitingFor { name, .. } => write!(f, "Ходит {}", name),
            TurnStatus::AwaitingTurn => write!(f, "Ожидание хода"),
        }
    }
}

/// Какие действия сейчас доступны (какие кнопки активны).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionAvailability {
    pub can_reconnect: bool,
    pub can_create_room: bool,
    pub can_join_room: bool,
    pub can_refresh_rooms: bool,
    pub can_play: bool,
    pub can_pass: bool,
    pub can_clear_selection: bool,
    pub can_restart: bool,
}
