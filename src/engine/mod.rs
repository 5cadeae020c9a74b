//! Движок подсказок: какие комбинации из руки легально бьют последний ход.
//!
//! Высокоуровневая операция: `recommend`
//! Вспомогательные:
//!   - `can_beat` – сравнение двух ходов
//!   - `classify` – определить тип хода по набору карт
//!
//! Всё здесь — чистые функции без состояния, ошибок не бывает:
//! невалидные идентификаторы просто не участвуют в генерации.

pub mod beat;
pub mod candidates;
pub mod classify;
pub mod groups;
pub mod recommend;

pub use beat::can_beat;
pub use classify::{classify, classify_codes};
pub use groups::RankGroups;
pub use recommend::{recommend, recommend_with_limit, MAX_RECOMMENDATIONS};
