use std::collections::HashSet;

use crate::domain::combo::{Combo, ComboKind, Play, PlayRecord};
use crate::domain::PlayerId;
use crate::engine::beat::can_beat;
use crate::engine::candidates::{
    bombs, chains, fours_with_two_pairs, fours_with_two_singles, pairs, rocket, singles,
    triples, triples_with_pair, triples_with_single,
};
use crate::engine::groups::RankGroups;

/// Сколько подсказок отдаём по умолчанию.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Набор кандидатов без повторов (по точному набору карт), в порядке добавления.
#[derive(Default)]
struct CandidateSet {
    combos: Vec<Combo>,
    keys: HashSet<Vec<String>>,
}

impl CandidateSet {
    fn push(&mut self, combo: Combo) {
        let key: Vec<String> = combo.card_key().into_iter().map(str::to_string).collect();
        if self.keys.insert(key) {
            self.combos.push(combo);
        }
    }

    fn extend<I: IntoIterator<Item = Combo>>(&mut self, combos: I) {
        for combo in combos {
            self.push(combo);
        }
    }

    fn into_vec(self) -> Vec<Combo> {
        self.combos
    }
}

/// Подсказки ходов: до `MAX_RECOMMENDATIONS` комбинаций, бьющих последний ход.
///
/// Чистая функция: одинаковые входы всегда дают одинаковый упорядоченный результат.
pub fn recommend<S: AsRef<str>>(
    hand: &[S],
    last_play: Option<&PlayRecord>,
    self_id: Option<PlayerId>,
    is_game_over: bool,
) -> Vec<Combo> {
    recommend_with_limit(hand, last_play, self_id, is_game_over, MAX_RECOMMENDATIONS)
}

/// То же, с явным лимитом длины списка.
pub fn recommend_with_limit<S: AsRef<str>>(
    hand: &[S],
    last_play: Option<&PlayRecord>,
    self_id: Option<PlayerId>,
    is_game_over: bool,
    limit: usize,
) -> Vec<Combo> {
    if is_game_over || hand.is_empty() || limit == 0 {
        return Vec::new();
    }

    let groups = RankGroups::from_hand(hand);
    if groups.is_empty() {
        return Vec::new();
    }

    match last_play {
        Some(record) if !record.is_owned_by(self_id) => respond(&groups, &record.play, limit),
        _ => lead(&groups, limit),
    }
}

/// Мы ведём: одиночки, потом пары, потом тройки, каждая группа снизу вверх.
fn lead(groups: &RankGroups, limit: usize) -> Vec<Combo> {
    let mut set = CandidateSet::default();
    set.extend(singles(groups));
    set.extend(pairs(groups));
    set.extend(triples(groups));

    let mut combos = set.into_vec();
    combos.truncate(limit);
    combos
}

/// Кандидаты того же типа, что и предыдущий ход.
fn same_kind(groups: &RankGroups, prev: &Play) -> Vec<Combo> {
    match prev.kind {
        ComboKind::Single => singles(groups),
        ComboKind::Pair => pairs(groups),
        ComboKind::Triple => triples(groups),
        ComboKind::TripleSingle => triples_with_single(groups),
        ComboKind::TriplePair => triples_with_pair(groups),
        ComboKind::FourTwoSingle => fours_with_two_singles(groups),
        ComboKind::FourTwoPair => fours_with_two_pairs(groups),
        ComboKind::Straight | ComboKind::DoubleStraight | ComboKind::Airplane => {
            chains(groups, prev.kind, prev.size)
        }
        ComboKind::Bomb => bombs(groups),
        ComboKind::Rocket => Vec::new(),
    }
}

/// Порядок показа: тот же тип, потом бомбы, потом ракета, потом остальное.
fn kind_priority(kind: ComboKind, prev: ComboKind) -> u8 {
    if kind == prev {
        0
    } else if kind == ComboKind::Bomb {
        1
    } else if kind == ComboKind::Rocket {
        2
    } else {
        3
    }
}

fn respond(groups: &RankGroups, prev: &Play, limit: usize) -> Vec<Combo> {
    let mut set = CandidateSet::default();
    set.extend(same_kind(groups, prev));
    if prev.kind != ComboKind::Rocket {
        set.extend(bombs(groups));
        set.extend(rocket(groups));
    }

    let mut survivors: Vec<Combo> = set
        .into_vec()
        .into_iter()
        .filter(|combo| can_beat(prev, &combo.play))
        .collect();

    survivors.sort_by(|a, b| {
        kind_priority(a.kind(), prev.kind)
            .cmp(&kind_priority(b.kind(), prev.kind))
            .then_with(|| a.main_rank().cmp(&b.main_rank()))
    });
    survivors.truncate(limit);
    survivors
}
