use crate::domain::{PlayerId, RoomId};
use crate::room::DiscardReason;
use crate::session::ConnectionStatus;

/// Уведомления для слоя представления. Ядро их только копит,
/// представление забирает через `ClientState::drain_events`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    StatusChanged(ConnectionStatus),

    Welcome {
        user_id: PlayerId,
        user_name: String,
    },

    RoomsUpdated {
        count: usize,
    },

    RoomCreated {
        room_id: RoomId,
    },

    Joined {
        room_id: RoomId,
    },

    /// Пришёл снапшот комнаты.
    RoomUpdated {
        room_id: RoomId,
    },

    PlayRejected {
        reason: String,
    },

    GameOver {
        room_id: RoomId,
        winner_id: Option<PlayerId>,
        winner_name: String,
    },

    RoomInterrupted {
        room_id: RoomId,
        leaver_id: PlayerId,
        leaver_name: String,
        remaining: usize,
    },

    GameRestarted {
        room_id: RoomId,
    },

    ServerError {
        message: String,
    },

    /// Событие комнаты проигнорировано.
    Discarded {
        kind: &'static str,
        reason: DiscardReason,
    },

    /// Кадр не разобран, состояние не менялось.
    Malformed {
        error: String,
    },
}
