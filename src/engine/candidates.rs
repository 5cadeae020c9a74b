//! Генерация кандидатов из руки, разложенной по рангам.
//!
//! Все генераторы идут по рангам снизу вверх, так что результат
//! детерминирован и уже упорядочен по главному рангу.

use crate::domain::card::Rank;
use crate::domain::combo::{Combo, ComboKind};
use crate::engine::groups::RankGroups;

/// `n` одинаковых карт каждого ранга, где их хватает.
fn same_rank(groups: &RankGroups, kind: ComboKind, n: usize) -> Vec<Combo> {
    groups
        .ranks_with_at_least(n)
        .filter_map(|rank| {
            groups
                .take(rank, n)
                .map(|cards| Combo::new(kind, rank, n, cards))
        })
        .collect()
}

pub fn singles(groups: &RankGroups) -> Vec<Combo> {
    same_rank(groups, ComboKind::Single, 1)
}

pub fn pairs(groups: &RankGroups) -> Vec<Combo> {
    same_rank(groups, ComboKind::Pair, 2)
}

pub fn triples(groups: &RankGroups) -> Vec<Combo> {
    same_rank(groups, ComboKind::Triple, 3)
}

/// Бомба — ровно четыре карты ранга.
pub fn bombs(groups: &RankGroups) -> Vec<Combo> {
    groups
        .ranks()
        .filter(|rank| groups.count(*rank) == 4)
        .filter_map(|rank| {
            groups
                .take(rank, 4)
                .map(|cards| Combo::new(ComboKind::Bomb, rank, 4, cards))
        })
        .collect()
}

/// Ракета — оба джокера.
pub fn rocket(groups: &RankGroups) -> Option<Combo> {
    let mut cards = groups.take(Rank::BlackJoker, 1)?;
    cards.extend(groups.take(Rank::RedJoker, 1)?);
    Some(Combo::new(ComboKind::Rocket, Rank::RedJoker, 2, cards))
}

/// Младшие "кикеры": по `width` карт из `count` разных рангов, кроме `main`.
fn lowest_kickers(groups: &RankGroups, main: Rank, width: usize, count: usize) -> Option<Vec<String>> {
    let ranks: Vec<Rank> = groups
        .ranks_with_at_least(width)
        .filter(|rank| *rank != main)
        .take(count)
        .collect();
    if ranks.len() < count {
        return None;
    }

    let mut cards = Vec::with_capacity(width * count);
    for rank in ranks {
        cards.extend(groups.take(rank, width)?);
    }
    Some(cards)
}

/// Тройка/четвёрка с прицепом. Главный ранг — ранг "тела".
fn with_kickers(
    groups: &RankGroups,
    kind: ComboKind,
    body: usize,
    kicker_width: usize,
    kicker_count: usize,
) -> Vec<Combo> {
    let size = body + kicker_width * kicker_count;
    groups
        .ranks_with_at_least(body)
        .filter_map(|rank| {
            let mut cards = groups.take(rank, body)?;
            cards.extend(lowest_kickers(groups, rank, kicker_width, kicker_count)?);
            Some(Combo::new(kind, rank, size, cards))
        })
        .collect()
}

pub fn triples_with_single(groups: &RankGroups) -> Vec<Combo> {
    with_kickers(groups, ComboKind::TripleSingle, 3, 1, 1)
}

pub fn triples_with_pair(groups: &RankGroups) -> Vec<Combo> {
    with_kickers(groups, ComboKind::TriplePair, 3, 2, 1)
}

pub fn fours_with_two_singles(groups: &RankGroups) -> Vec<Combo> {
    with_kickers(groups, ComboKind::FourTwoSingle, 4, 1, 2)
}

pub fn fours_with_two_pairs(groups: &RankGroups) -> Vec<Combo> {
    with_kickers(groups, ComboKind::FourTwoPair, 4, 2, 2)
}

/// Все окна из `length` рангов подряд (только 3..A), где у каждого ранга
/// есть не меньше карт, чем требует цепочка. Главный ранг — верх окна.
pub fn chains(groups: &RankGroups, kind: ComboKind, length: usize) -> Vec<Combo> {
    let Some(width) = kind.chain_width() else {
        return Vec::new();
    };
    if length == 0 {
        return Vec::new();
    }

    let eligible: Vec<Rank> = groups
        .ranks_with_at_least(width)
        .filter(|rank| rank.is_chainable())
        .collect();

    eligible
        .windows(length)
        .filter(|window| is_consecutive(window))
        .filter_map(|window| {
            let mut cards = Vec::with_capacity(width * length);
            for rank in window {
                cards.extend(groups.take(*rank, width)?);
            }
            let top = *window.last()?;
            Some(Combo::new(kind, top, length, cards))
        })
        .collect()
}

/// Ранги идут подряд (по числовому значению).
pub(crate) fn is_consecutive(ranks: &[Rank]) -> bool {
    ranks
        .windows(2)
        .all(|pair| pair[1].value() == pair[0].value() + 1)
}
