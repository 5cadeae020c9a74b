use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, RoomId};

/// DTO игрока в снапшоте комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerInfoDto {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub hand_count: usize,
    #[serde(default)]
    pub is_landlord: bool,
}

/// DTO строки списка комнат.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSummaryDto {
    pub room_id: RoomId,
    pub player_count: usize,
    pub started: bool,
    pub can_join: bool,
}

/// Описание последнего хода, как его формирует сервер:
/// `kind` — имя типа (`"Pair"`), `main_rank` — имя ранга (`"Three"`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayViewDto {
    pub kind: String,
    pub main_rank: String,
    pub size: usize,
}

/// DTO снапшота комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSnapshotDto {
    pub room_id: RoomId,
    #[serde(default)]
    pub players: Vec<PlayerInfoDto>,
    /// Чей ход.
    pub turn: Option<PlayerId>,
    pub last_player: Option<PlayerId>,
    pub last_play: Option<PlayViewDto>,
    /// Рука получателя снапшота.
    #[serde(default)]
    pub your_hand: Vec<String>,
}
