use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт. В домене — просто упорядоченный список карт.
/// Клиент ничего не раздаёт; колода нужна для проверок и тестовых раскладов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Полная колода на 54 карты в порядке:
    /// Clubs 3..2, Diamonds 3..2, Hearts 3..2, Spades 3..2, затем малый и большой джокер.
    pub fn standard_54() -> Self {
        let mut cards = Vec::with_capacity(54);
        for suit in [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades] {
            for rank in Rank::ALL.iter().copied().filter(|r| !r.is_joker()) {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.push(Card::BLACK_JOKER);
        cards.push(Card::RED_JOKER);
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Идентификаторы всех карт колоды.
    pub fn codes(&self) -> Vec<String> {
        self.cards.iter().map(Card::code).collect()
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(card) = self.cards.pop() {
                taken.push(card);
            } else {
                break;
            }
        }
        taken
    }
}
