use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::dto::{RoomSnapshotDto, RoomSummaryDto};
use crate::api::errors::ProtocolError;
use crate::domain::{PlayerId, RoomId};

/// Сообщение сервера клиенту.
///
/// Формат кадра: `{"type": "<Kind>", "data": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Сервер назначил нам id.
    Welcome {
        user_id: PlayerId,
        #[serde(default)]
        user_name: String,
    },

    RoomsList { rooms: Vec<RoomSummaryDto> },

    RoomCreated { room_id: RoomId },

    /// Мы сели в комнату.
    Joined {
        room_id: RoomId,
        you: PlayerId,
        #[serde(default)]
        you_name: String,
        player_count: usize,
        started: bool,
    },

    /// Авторитетный снапшот комнаты.
    RoomState(RoomSnapshotDto),

    PlayRejected { reason: String },

    GameOver {
        room_id: RoomId,
        winner_id: Option<PlayerId>,
    },

    /// Кто-то вышел посреди раунда.
    RoomInterrupted {
        room_id: RoomId,
        leaver_id: PlayerId,
        player_count: usize,
    },

    GameRestarted { room_id: RoomId },

    Error { message: String },

    Pong,
}

impl ServerMessage {
    /// Все типы, которые клиент понимает.
    pub const KINDS: [&'static str; 11] = [
        "Welcome",
        "RoomsList",
        "RoomCreated",
        "Joined",
        "RoomState",
        "PlayRejected",
        "GameOver",
        "RoomInterrupted",
        "GameRestarted",
        "Error",
        "Pong",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Welcome { .. } => "Welcome",
            ServerMessage::RoomsList { .. } => "RoomsList",
            ServerMessage::RoomCreated { .. } => "RoomCreated",
            ServerMessage::Joined { .. } => "Joined",
            ServerMessage::RoomState(_) => "RoomState",
            ServerMessage::PlayRejected { .. } => "PlayRejected",
            ServerMessage::GameOver { .. } => "GameOver",
            ServerMessage::RoomInterrupted { .. } => "RoomInterrupted",
            ServerMessage::GameRestarted { .. } => "GameRestarted",
            ServerMessage::Error { .. } => "Error",
            ServerMessage::Pong => "Pong",
        }
    }

    /// Разобрать текстовый кадр.
    ///
    /// Сначала смотрим только на `type`: неизвестный тип — `UnknownKind`,
    /// известный тип с кривым payload — `Malformed`.
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(raw)?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingKind)?;
        if !Self::KINDS.contains(&kind) {
            return Err(ProtocolError::UnknownKind(kind.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Собрать кадр (нужно тестам и реплею).
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}
