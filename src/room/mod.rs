//! Состояние текущей комнаты на клиенте.
//!
//! - `phase` — фазы комнаты;
//! - `selection` — выбранные игроком карты;
//! - `reconciler` — сведение снапшотов и событий сервера в одно состояние.

pub mod phase;
pub mod reconciler;
pub mod selection;

pub use phase::RoomPhase;
pub use reconciler::{DiscardReason, RoomStateReconciler};
pub use selection::Selection;
