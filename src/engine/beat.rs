use crate::domain::combo::{ComboKind, Play};

/// Бьёт ли `next` предыдущий ход `prev`.
///
/// Правила:
/// - ракету не бьёт ничто, ракета бьёт всё остальное;
/// - бомба бьёт любой обычный ход, старшая бомба бьёт младшую;
/// - обычные ходы сравниваются только внутри одного типа: размер должен
///   совпадать, главный ранг — быть строго выше.
pub fn can_beat(prev: &Play, next: &Play) -> bool {
    match (prev.kind, next.kind) {
        (ComboKind::Rocket, _) => false,
        (_, ComboKind::Rocket) => true,
        (ComboKind::Bomb, ComboKind::Bomb) => next.main_rank > prev.main_rank,
        (_, ComboKind::Bomb) => true,
        (ComboKind::Bomb, _) => false,
        (p, n) if p == n => prev.size == next.size && next.main_rank > prev.main_rank,
        _ => false,
    }
}
