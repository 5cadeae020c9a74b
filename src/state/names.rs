use std::collections::HashMap;

use crate::domain::PlayerId;
use crate::infra::mapping::{default_player_name, PlayerNameResolver};

/// Справочник имён игроков, накопленный из Welcome/Joined/снапшотов.
#[derive(Clone, Debug, Default)]
pub struct NameDirectory {
    names: HashMap<PlayerId, String>,
}

impl NameDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запомнить имя; пустое заменяется на имя по умолчанию.
    pub fn save(&mut self, player_id: PlayerId, name: &str) -> String {
        let name = if name.trim().is_empty() {
            default_player_name(player_id)
        } else {
            name.to_string()
        };
        self.names.insert(player_id, name.clone());
        name
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&str> {
        self.names.get(&player_id).map(String::as_str)
    }
}

impl PlayerNameResolver for NameDirectory {
    fn resolve_name(&self, player_id: PlayerId) -> String {
        self.get(player_id)
            .map(str::to_string)
            .unwrap_or_else(|| default_player_name(player_id))
    }
}
