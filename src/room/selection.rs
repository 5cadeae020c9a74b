use std::collections::BTreeSet;

/// Выбранные игроком карты (идентификаторы из текущей руки).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    cards: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.cards.contains(code)
    }

    /// Переключить карту. Возвращает `true`, если карта теперь выбрана.
    pub fn toggle(&mut self, code: &str) -> bool {
        if self.cards.remove(code) {
            false
        } else {
            self.cards.insert(code.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Заменить выбор целиком (применение подсказки).
    pub fn replace<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cards = codes.into_iter().map(Into::into).collect();
    }

    /// Оставить только карты, которые ещё есть в руке.
    pub fn retain_in(&mut self, hand: &[String]) {
        self.cards.retain(|code| hand.iter().any(|h| h == code));
    }

    /// Выбранные карты в порядке руки.
    pub fn in_hand_order(&self, hand: &[String]) -> Vec<String> {
        hand.iter()
            .filter(|code| self.cards.contains(code.as_str()))
            .cloned()
            .collect()
    }
}
