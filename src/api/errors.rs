use thiserror::Error;

use crate::session::SessionError;

/// Ошибки протокола: то, что не удалось разобрать или собрать.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Битый JSON или payload не той формы.
    #[error("Некорректное сообщение: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("В сообщении нет поля type")]
    MissingKind,

    /// Тип сообщения нам неизвестен — такие просто игнорируем.
    #[error("Неизвестный тип сообщения: {0}")]
    UnknownKind(String),

    #[error("Некорректное описание хода: kind={kind:?}, main_rank={main_rank:?}")]
    InvalidPlayView { kind: String, main_rank: String },

    #[error("Не удалось сериализовать команду: {0}")]
    Encode(serde_json::Error),
}

impl ProtocolError {
    /// Неизвестный тип — не ошибка формата, а просто "не наше".
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, ProtocolError::UnknownKind(_))
    }
}

/// Ошибки пользовательских действий на клиенте.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Нет соединения с сервером")]
    NotConnected,

    #[error("Вы не находитесь в комнате")]
    NoRoom,

    #[error("Раунд ещё не окончен")]
    NotGameOver,

    #[error("Адрес сервера ещё не задан")]
    NoServerAddress,

    #[error("Комната не выбрана")]
    NoRoomSelected,

    #[error("Сейчас не ваш ход")]
    NotYourTurn,

    #[error("Не выбрано ни одной карты")]
    EmptySelection,

    #[error("Карты {0} нет в руке")]
    CardNotInHand(String),

    #[error("Нет подсказки с номером {0}")]
    NoSuchRecommendation(usize),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
