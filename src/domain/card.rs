use core::fmt;
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Масть карты. Джокеры живут в отдельной "масти".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
    Joker,
}

impl Suit {
    /// Старшинство масти — только для стабильного отображения, на легальность не влияет.
    pub const fn precedence(self) -> u8 {
        match self {
            Suit::Clubs => 1,
            Suit::Diamonds => 2,
            Suit::Hearts => 3,
            Suit::Spades => 4,
            Suit::Joker => 5,
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Joker => 'J',
        }
    }
}

/// Ранг карты. Числовое значение и есть игровая сила:
/// 3..10, J=11, Q=12, K=13, A=14, "двойка"=16, малый джокер=17, большой=18.
///
/// Значение 15 пропущено намеренно: двойка не продолжает цепочку после туза.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 16,
    BlackJoker = 17,
    RedJoker = 18,
}

impl Rank {
    /// Все ранги по возрастанию.
    pub const ALL: [Rank; 15] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::BlackJoker,
        Rank::RedJoker,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::BlackJoker | Rank::RedJoker)
    }

    /// Может ли ранг участвовать в цепочках (стрит, пары подряд, самолёт): только 3..A.
    pub const fn is_chainable(self) -> bool {
        !matches!(self, Rank::Two | Rank::BlackJoker | Rank::RedJoker)
    }

    /// Короткий токен ранга, как он пишется в идентификаторе карты.
    pub const fn token(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::BlackJoker => "BJ",
            Rank::RedJoker => "RJ",
        }
    }

    /// Длинное имя ранга, как его пишет сервер в описании хода.
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::BlackJoker => "BlackJoker",
            Rank::RedJoker => "RedJoker",
        }
    }

    /// Ранг внутри кода обычной карты (без джокеров).
    fn from_card_token(token: &str) -> Option<Self> {
        match token {
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            "2" => Some(Rank::Two),
            _ => None,
        }
    }

    /// Разбор ранга из описания хода.
    ///
    /// Сервер присылает длинные имена (`"Three"`, `"BlackJoker"`), но короткие
    /// токены (`"3"`, `"BJ"`) тоже принимаем.
    pub fn from_token(token: &str) -> Option<Self> {
        if let Some(rank) = Self::from_card_token(token) {
            return Some(rank);
        }
        match token {
            "BJ" => Some(Rank::BlackJoker),
            "RJ" => Some(Rank::RedJoker),
            _ => Self::ALL.iter().copied().find(|rank| rank.name() == token),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Карта колоды на 54 листа.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const BLACK_JOKER: Card = Card::new(Rank::BlackJoker, Suit::Joker);
    pub const RED_JOKER: Card = Card::new(Rank::RedJoker, Suit::Joker);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_joker(&self) -> bool {
        self.rank.is_joker()
    }

    /// Идентификатор карты в протоколе: `S10`, `HA`, `C3`, `BJ`, `RJ`.
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            return f.write_str(self.rank.token());
        }
        write!(f, "{}{}", self.suit.to_char(), self.rank.token())
    }
}

/// Ошибка разбора идентификатора карты.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Пустой идентификатор карты")]
    Empty,

    #[error("Неизвестная масть: {0}")]
    UnknownSuit(char),

    #[error("Неизвестный ранг: {0:?}")]
    UnknownRank(String),
}

/// Разбор идентификатора карты. Неизвестные токены отвергаются, а не подменяются.
pub fn parse(code: &str) -> Result<Card, CardParseError> {
    match code {
        "" => return Err(CardParseError::Empty),
        "BJ" => return Ok(Card::BLACK_JOKER),
        "RJ" => return Ok(Card::RED_JOKER),
        _ => {}
    }

    let mut chars = code.chars();
    let suit_ch = chars.next().ok_or(CardParseError::Empty)?;
    let suit = Suit::from_char(suit_ch).ok_or(CardParseError::UnknownSuit(suit_ch))?;
    let token = chars.as_str();
    let rank = Rank::from_card_token(token)
        .ok_or_else(|| CardParseError::UnknownRank(token.to_string()))?;

    Ok(Card::new(rank, suit))
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Канонический порядок для показа: по убыванию ранга, затем по старшинству масти.
pub fn canonical_cmp(a: &Card, b: &Card) -> Ordering {
    b.rank
        .cmp(&a.rank)
        .then_with(|| b.suit.precedence().cmp(&a.suit.precedence()))
}

/// Отсортировать идентификаторы в каноническом порядке.
///
/// Нераспознанные коды уходят в конец (лексикографически).
pub fn canonical_order<S: AsRef<str>>(codes: &[S]) -> Vec<String> {
    let mut valid: Vec<(Card, String)> = Vec::with_capacity(codes.len());
    let mut invalid: Vec<String> = Vec::new();

    for code in codes {
        let code = code.as_ref();
        match parse(code) {
            Ok(card) => valid.push((card, code.to_string())),
            Err(_) => invalid.push(code.to_string()),
        }
    }

    valid.sort_by(|(a, _), (b, _)| canonical_cmp(a, b));
    invalid.sort();

    valid
        .into_iter()
        .map(|(_, code)| code)
        .chain(invalid)
        .collect()
}
