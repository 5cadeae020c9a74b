use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::PlayerId;

/// Тип комбинации (легального хода).
///
/// Имена вариантов совпадают со строками, которые сервер присылает в описании хода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComboKind {
    Single,
    Pair,
    Triple,
    /// Три + одна.
    TripleSingle,
    /// Три + пара.
    TriplePair,
    /// Стрит: 5+ рангов подряд по одной карте.
    Straight,
    /// Пары подряд: 3+ ранга по две карты.
    DoubleStraight,
    /// Самолёт: 2+ ранга по три карты.
    Airplane,
    /// Четыре + две одиночные.
    FourTwoSingle,
    /// Четыре + две пары.
    FourTwoPair,
    Bomb,
    Rocket,
}

impl ComboKind {
    pub const ALL: [ComboKind; 12] = [
        ComboKind::Single,
        ComboKind::Pair,
        ComboKind::Triple,
        ComboKind::TripleSingle,
        ComboKind::TriplePair,
        ComboKind::Straight,
        ComboKind::DoubleStraight,
        ComboKind::Airplane,
        ComboKind::FourTwoSingle,
        ComboKind::FourTwoPair,
        ComboKind::Bomb,
        ComboKind::Rocket,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ComboKind::Single => "Single",
            ComboKind::Pair => "Pair",
            ComboKind::Triple => "Triple",
            ComboKind::TripleSingle => "TripleSingle",
            ComboKind::TriplePair => "TriplePair",
            ComboKind::Straight => "Straight",
            ComboKind::DoubleStraight => "DoubleStraight",
            ComboKind::Airplane => "Airplane",
            ComboKind::FourTwoSingle => "FourTwoSingle",
            ComboKind::FourTwoPair => "FourTwoPair",
            ComboKind::Bomb => "Bomb",
            ComboKind::Rocket => "Rocket",
        }
    }

    /// Бомба и ракета — "особые" типы, бьющие обычные комбинации.
    pub const fn is_ordinary(self) -> bool {
        !matches!(self, ComboKind::Bomb | ComboKind::Rocket)
    }

    /// Сколько карт каждого ранга требует цепочка (None — не цепочка).
    pub const fn chain_width(self) -> Option<usize> {
        match self {
            ComboKind::Straight => Some(1),
            ComboKind::DoubleStraight => Some(2),
            ComboKind::Airplane => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for ComboKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComboKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComboKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown combo kind: {s}"))
    }
}

/// Классификация хода без конкретных карт: тип, главный ранг, размер.
///
/// `size` — число карт, кроме пар подряд и самолёта: для них это длина
/// цепочки в рангах (так её считает сервер).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Play {
    pub kind: ComboKind,
    pub main_rank: Rank,
    pub size: usize,
}

impl Play {
    pub const fn new(kind: ComboKind, main_rank: Rank, size: usize) -> Self {
        Self {
            kind,
            main_rank,
            size,
        }
    }
}

/// Конкретная комбинация из руки: классификация + идентификаторы карт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Combo {
    pub play: Play,
    pub cards: Vec<String>,
}

impl Combo {
    pub fn new(kind: ComboKind, main_rank: Rank, size: usize, cards: Vec<String>) -> Self {
        Self {
            play: Play::new(kind, main_rank, size),
            cards,
        }
    }

    pub fn kind(&self) -> ComboKind {
        self.play.kind
    }

    pub fn main_rank(&self) -> Rank {
        self.play.main_rank
    }

    pub fn size(&self) -> usize {
        self.play.size
    }

    /// Ключ дедупликации: отсортированный набор идентификаторов.
    pub fn card_key(&self) -> Vec<&str> {
        let mut key: Vec<&str> = self.cards.iter().map(String::as_str).collect();
        key.sort_unstable();
        key
    }
}

/// Последний принятый ход и его автор.
///
/// Автор может отсутствовать в снапшоте — тогда ход считается чужим.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayRecord {
    pub play: Play,
    pub player_id: Option<PlayerId>,
}

impl PlayRecord {
    pub fn new(play: Play, player_id: Option<PlayerId>) -> Self {
        Self { play, player_id }
    }

    /// Сделан ли ход игроком `self_id` (тогда он снова "ведёт").
    pub fn is_owned_by(&self, self_id: Option<PlayerId>) -> bool {
        match (self.player_id, self_id) {
            (Some(author), Some(me)) => author == me,
            _ => false,
        }
    }
}
