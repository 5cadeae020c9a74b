use serde::{Deserialize, Serialize};

use crate::api::errors::ProtocolError;
use crate::domain::RoomId;

/// Команда клиента серверу.
///
/// Формат кадра: `{"type": "JoinRoom", "data": {"room_id": "..."}}`,
/// у команд без полей `data` нет.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum ClientCommand {
    /// Обновить список комнат (лобби).
    ListRooms,

    /// Создать новую комнату.
    CreateRoom,

    /// Сесть в комнату.
    JoinRoom { room_id: RoomId },

    /// Сыграть карты (идентификаторы).
    Play { cards: Vec<String> },

    /// Пас.
    Pass,

    /// Ещё один раунд в той же комнате.
    RestartGame,

    /// Keep-alive; сервер отвечает `Pong`.
    Ping,
}

impl ClientCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientCommand::ListRooms => "ListRooms",
            ClientCommand::CreateRoom => "CreateRoom",
            ClientCommand::JoinRoom { .. } => "JoinRoom",
            ClientCommand::Play { .. } => "Play",
            ClientCommand::Pass => "Pass",
            ClientCommand::RestartGame => "RestartGame",
            ClientCommand::Ping => "Ping",
        }
    }

    /// Собрать текстовый кадр.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}
