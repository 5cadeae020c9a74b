use serde::{Deserialize, Serialize};

/// Фаза комнаты с точки зрения клиента.
///
/// `Idle -> Started -> (Terminal | Interrupted) -> Started`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomPhase {
    /// Ждём игроков (или ещё не в комнате).
    #[default]
    Idle,
    /// Раунд идёт.
    Started,
    /// Раунд завершён, известен победитель.
    Terminal,
    /// Раунд сорван: кто-то вышел.
    Interrupted,
}

impl RoomPhase {
    /// Карты розданы (раунд идёт или только что закончился).
    pub fn is_dealt(self) -> bool {
        matches!(self, RoomPhase::Started | RoomPhase::Terminal)
    }
}
