//! Протокол общения с сервером игры.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что клиент отправляет серверу;
//! - сообщения (messages.rs) — всё, что приходит от сервера;
//! - DTO (dto.rs) — payload сообщений в "сыром" виде, как на проводе;
//! - ошибки (errors.rs) — ошибки протокола и пользовательских действий.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod messages;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use messages::*;
