use std::collections::{BTreeMap, HashSet};

use crate::domain::card::{self, canonical_cmp, Card, Rank};

/// Рука, разложенная по рангам.
///
/// Невалидные идентификаторы молча отбрасываются, дубликаты схлопываются.
/// Внутри ранга карты лежат в каноническом порядке (старшая масть первой),
/// поэтому выбор конкретных карт не зависит от порядка руки.
#[derive(Clone, Debug, Default)]
pub struct RankGroups {
    groups: BTreeMap<Rank, Vec<String>>,
}

impl RankGroups {
    pub fn from_hand<S: AsRef<str>>(hand: &[S]) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut cards: Vec<(Card, &str)> = hand
            .iter()
            .map(|code| code.as_ref())
            .filter(|code| seen.insert(*code))
            .filter_map(|code| card::parse(code).ok().map(|c| (c, code)))
            .collect();
        cards.sort_by(|(a, _), (b, _)| canonical_cmp(a, b));

        let mut groups: BTreeMap<Rank, Vec<String>> = BTreeMap::new();
        for (card, code) in cards {
            groups.entry(card.rank).or_default().push(code.to_string());
        }
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Ранги по возрастанию.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.groups.keys().copied()
    }

    pub fn count(&self, rank: Rank) -> usize {
        self.groups.get(&rank).map_or(0, Vec::len)
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.count(rank) > 0
    }

    /// Первые `n` карт ранга, если их хватает.
    pub fn take(&self, rank: Rank, n: usize) -> Option<Vec<String>> {
        let group = self.groups.get(&rank)?;
        if n == 0 || group.len() < n {
            return None;
        }
        Some(group[..n].to_vec())
    }

    /// Ранги (по возрастанию), где есть хотя бы `min` карт.
    pub fn ranks_with_at_least(&self, min: usize) -> impl Iterator<Item = Rank> + '_ {
        self.groups
            .iter()
            .filter(move |(_, codes)| codes.len() >= min)
            .map(|(rank, _)| *rank)
    }
}
