//! Доменная модель: карты, комбинации, комнаты.

pub mod card;
pub mod combo;
pub mod deck;
pub mod room;

// Идентификаторы так, как их выдаёт сервер.
pub type PlayerId = u64;
pub type RoomId = String;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use combo::*;
pub use deck::*;
pub use room::*;
