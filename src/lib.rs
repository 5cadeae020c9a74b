//! Клиентское ядро "Dou Dizhu" (斗地主).
//!
//! Здесь нет ни сокетов, ни UI: только состояние клиента и решения,
//! которые хост (event loop) исполняет сам.
//!
//! - `domain` — карты, комбинации, комнаты;
//! - `engine` — подсказки ходов (что из руки бьёт последний ход);
//! - `session` — жизненный цикл соединения и переподключение;
//! - `room` — сведение снапшотов и событий сервера;
//! - `api` — протокол (команды, сообщения, ошибки);
//! - `infra` — маппинги протокол <-> domain;
//! - `state` — `ClientState`, точка входа для всех событий.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod room;
pub mod session;
pub mod state;

pub use state::ClientState;
