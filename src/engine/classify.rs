use std::collections::{BTreeMap, HashSet};

use crate::domain::card::{self, Card, Rank};
use crate::domain::combo::{ComboKind, Play};
use crate::engine::candidates::is_consecutive;

fn counts_by_rank(cards: &[Card]) -> BTreeMap<Rank, usize> {
    let mut counts = BTreeMap::new();
    for card in cards {
        *counts.entry(card.rank).or_insert(0) += 1;
    }
    counts
}

/// Ранг, которого ровно `n` штук.
fn rank_with_count(counts: &BTreeMap<Rank, usize>, n: usize) -> Option<Rank> {
    counts
        .iter()
        .find(|(_, count)| **count == n)
        .map(|(rank, _)| *rank)
}

/// Цепочка из рангов, у каждого ровно `width` карт.
fn chain_of(counts: &BTreeMap<Rank, usize>, width: usize) -> Option<(Rank, usize)> {
    if !counts.values().all(|count| *count == width) {
        return None;
    }
    let ranks: Vec<Rank> = counts.keys().copied().collect();
    if !ranks.iter().all(|r| r.is_chainable()) || !is_consecutive(&ranks) {
        return None;
    }
    ranks.last().map(|top| (*top, ranks.len()))
}

/// Классифицировать набор карт как ход. `None` — такого хода в игре нет.
///
/// Нужен клиенту, чтобы подсказать игроку, является ли выделенное
/// легальной комбинацией, до отправки на сервер.
pub fn classify(cards: &[Card]) -> Option<Play> {
    if cards.is_empty() {
        return None;
    }
    let counts = counts_by_rank(cards);
    let unique = counts.len();
    let len = cards.len();

    if len == 2 && counts.contains_key(&Rank::BlackJoker) && counts.contains_key(&Rank::RedJoker) {
        return Some(Play::new(ComboKind::Rocket, Rank::RedJoker, 2));
    }

    if unique == 1 {
        let rank = *counts.keys().next()?;
        let kind = match len {
            1 => ComboKind::Single,
            2 => ComboKind::Pair,
            3 => ComboKind::Triple,
            4 => ComboKind::Bomb,
            _ => return None,
        };
        return Some(Play::new(kind, rank, len));
    }

    match (len, unique) {
        (4, 2) => {
            if let Some(rank) = rank_with_count(&counts, 3) {
                return Some(Play::new(ComboKind::TripleSingle, rank, 4));
            }
        }
        (5, 2) => {
            if let Some(rank) = rank_with_count(&counts, 3) {
                return Some(Play::new(ComboKind::TriplePair, rank, 5));
            }
        }
        (6, 3) => {
            if let Some(rank) = rank_with_count(&counts, 4) {
                return Some(Play::new(ComboKind::FourTwoSingle, rank, 6));
            }
        }
        (8, 3) => {
            if let Some(rank) = rank_with_count(&counts, 4) {
                let pairs = counts.values().filter(|count| **count == 2).count();
                if pairs == 2 {
                    return Some(Play::new(ComboKind::FourTwoPair, rank, 8));
                }
            }
        }
        _ => {}
    }

    if len >= 5 {
        if let Some((top, _)) = chain_of(&counts, 1) {
            return Some(Play::new(ComboKind::Straight, top, len));
        }
    }
    if len >= 6 && len % 2 == 0 {
        if let Some((top, length)) = chain_of(&counts, 2) {
            return Some(Play::new(ComboKind::DoubleStraight, top, length));
        }
    }
    if len >= 6 && len % 3 == 0 {
        if let Some((top, length)) = chain_of(&counts, 3) {
            return Some(Play::new(ComboKind::Airplane, top, length));
        }
    }

    None
}

/// То же по идентификаторам. Невалидный или повторённый код — не ход.
pub fn classify_codes<S: AsRef<str>>(codes: &[S]) -> Option<Play> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cards = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.as_ref();
        if !seen.insert(code) {
            return None;
        }
        cards.push(card::parse(code).ok()?);
    }
    classify(&cards)
}
