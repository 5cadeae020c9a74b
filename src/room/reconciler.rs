// src/room/reconciler.rs

use log::{debug, info};
use thiserror::Error;

use crate::domain::card::canonical_order;
use crate::domain::combo::{Combo, Play, PlayRecord};
use crate::domain::room::{RoomPlayer, RoomSnapshot, SeatLayout, TerminalState};
use crate::domain::{PlayerId, RoomId};
use crate::engine::{can_beat, classify_codes, recommend_with_limit, MAX_RECOMMENDATIONS};
use crate::room::phase::RoomPhase;
use crate::room::selection::Selection;

/// Почему событие комнаты было отброшено.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DiscardReason {
    #[error("Событие для комнаты {got}, текущая комната {expected:?}")]
    ForeignRoom { expected: Option<RoomId>, got: RoomId },

    #[error("Раунд в комнате {0} не идёт")]
    RoundNotStarted(RoomId),
}

/// Локальная копия состояния комнаты, которую сводим с событиями сервера.
///
/// Снапшот — единственный источник правды: он целиком заменяет комнату.
/// События завершения/прерывания/рестарта принимаются только для текущей комнаты.
#[derive(Clone, Debug)]
pub struct RoomStateReconciler {
    self_id: Option<PlayerId>,
    max_recommendations: usize,

    room_id: Option<RoomId>,
    phase: RoomPhase,
    player_count: usize,
    players: Vec<RoomPlayer>,
    turn: Option<PlayerId>,
    last_play: Option<PlayRecord>,
    hand: Vec<String>,
    someone_out: bool,
    terminal: Option<TerminalState>,

    selection: Selection,
    recommendations: Vec<Combo>,
}

impl RoomStateReconciler {
    pub fn new(max_recommendations: usize) -> Self {
        Self {
            self_id: None,
            max_recommendations,
            room_id: None,
            phase: RoomPhase::Idle,
            player_count: 0,
            players: Vec::new(),
            turn: None,
            last_play: None,
            hand: Vec::new(),
            someone_out: false,
            terminal: None,
            selection: Selection::new(),
            recommendations: Vec::new(),
        }
    }

    // ---------- чтение ----------

    pub fn self_id(&self) -> Option<PlayerId> {
        self.self_id
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn players(&self) -> &[RoomPlayer] {
        &self.players
    }

    pub fn turn(&self) -> Option<PlayerId> {
        self.turn
    }

    pub fn last_play(&self) -> Option<&PlayRecord> {
        self.last_play.as_ref()
    }

    /// Рука в каноническом порядке.
    pub fn hand(&self) -> &[String] {
        &self.hand
    }

    pub fn someone_out(&self) -> bool {
        self.someone_out
    }

    pub fn terminal(&self) -> Option<&TerminalState> {
        self.terminal.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn recommendations(&self) -> &[Combo] {
        &self.recommendations
    }

    /// Наш ход в идущем раунде.
    pub fn is_my_turn(&self) -> bool {
        self.phase == RoomPhase::Started
            && !self.is_game_over()
            && self.self_id.is_some()
            && self.turn == self.self_id
    }

    pub fn seats(&self) -> SeatLayout {
        SeatLayout::arrange(&self.players, self.self_id)
    }

    /// Классификация текущего выбора (карты в порядке руки).
    pub fn selection_play(&self) -> Option<Play> {
        classify_codes(&self.selection.in_hand_order(&self.hand))
    }

    /// Можно ли сыграть текущий выбор поверх последнего хода.
    pub fn selection_beats_last(&self) -> bool {
        let Some(play) = self.selection_play() else {
            return false;
        };
        match &self.last_play {
            Some(record) if !record.is_owned_by(self.self_id) => can_beat(&record.play, &play),
            _ => true,
        }
    }

    // ---------- изменения ----------

    /// Сервер сообщил наш id: от него зависит, ведём мы или отвечаем.
    pub fn set_self_id(&mut self, self_id: Option<PlayerId>) {
        self.self_id = self_id;
        self.refresh_recommendations();
    }

    /// Мы сели в комнату. Смена комнаты сбрасывает всё, что относилось к старой.
    pub fn apply_joined(&mut self, room_id: &str, player_count: usize, started: bool) {
        if self.room_id.as_deref() != Some(room_id) {
            self.clear_round();
            self.players.clear();
        }
        self.room_id = Some(room_id.to_string());
        self.player_count = player_count;
        self.terminal = None;
        self.phase = if started {
            RoomPhase::Started
        } else {
            RoomPhase::Idle
        };
        info!(
            "[ROOM] Joined {} ({} players, started={})",
            room_id, player_count, started
        );
        self.refresh_recommendations();
    }

    /// Применить авторитетный снапшот: полная замена, без слияния.
    pub fn apply_snapshot(&mut self, snapshot: RoomSnapshot) {
        let someone_out = snapshot.someone_out();
        let RoomSnapshot {
            room_id,
            players,
            turn,
            last_play,
            hand,
        } = snapshot;

        match &self.terminal {
            Some(terminal) if terminal.room_id != room_id => {
                debug!(
                    "[ROOM] Dropping terminal state of foreign room {}",
                    terminal.room_id
                );
                self.terminal = None;
            }
            Some(_) if !someone_out => {
                debug!("[ROOM] Nobody is out in {}, clearing stale terminal state", room_id);
                self.terminal = None;
            }
            _ => {}
        }

        self.player_count = players.len();
        self.players = players;
        self.turn = turn;
        self.last_play = last_play;
        self.hand = canonical_order(&hand);
        self.someone_out = someone_out;
        self.room_id = Some(room_id);
        self.phase = if self.terminal.is_some() {
            RoomPhase::Terminal
        } else {
            RoomPhase::Started
        };

        self.selection.retain_in(&self.hand);
        self.refresh_recommendations();
    }

    /// Раунд закончился.
    pub fn apply_terminal_event(
        &mut self,
        room_id: &str,
        winner_id: Option<PlayerId>,
    ) -> Result<(), DiscardReason> {
        self.ensure_current(room_id)?;
        if !self.phase.is_dealt() {
            debug!("[ROOM] Game over for {} ignored: round not started", room_id);
            return Err(DiscardReason::RoundNotStarted(room_id.to_string()));
        }

        self.terminal = Some(TerminalState {
            room_id: room_id.to_string(),
            winner_id,
        });
        self.phase = RoomPhase::Terminal;
        info!("[ROOM] Game over in {}, winner={:?}", room_id, winner_id);
        self.refresh_recommendations();
        Ok(())
    }

    /// Кто-то вышел посреди раунда. Повторное событие ничего не меняет.
    pub fn apply_interruption(
        &mut self,
        room_id: &str,
        leaver_id: PlayerId,
        remaining: usize,
    ) -> Result<(), DiscardReason> {
        self.ensure_current(room_id)?;

        self.phase = RoomPhase::Interrupted;
        self.player_count = remaining;
        self.clear_round();
        info!(
            "[ROOM] {} interrupted: player {} left, {} remaining",
            room_id, leaver_id, remaining
        );
        Ok(())
    }

    /// Новый раунд в той же комнате.
    pub fn apply_restart(&mut self, room_id: &str) -> Result<(), DiscardReason> {
        self.ensure_current(room_id)?;

        self.terminal = None;
        self.selection.clear();
        if self.phase == RoomPhase::Terminal {
            self.phase = RoomPhase::Started;
        }
        info!("[ROOM] {} restarted", room_id);
        self.refresh_recommendations();
        Ok(())
    }

    /// Забыть комнату целиком.
    pub fn reset(&mut self) {
        self.room_id = None;
        self.phase = RoomPhase::Idle;
        self.player_count = 0;
        self.players.clear();
        self.clear_round();
    }

    // ---------- выбор карт ----------

    /// `None` — такой карты в руке нет.
    pub fn toggle_card(&mut self, code: &str) -> Option<bool> {
        if !self.hand.iter().any(|c| c == code) {
            return None;
        }
        Some(self.selection.toggle(code))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Выбрать карты подсказки под номером `index`.
    pub fn apply_recommendation(&mut self, index: usize) -> Option<&Combo> {
        let combo = self.recommendations.get(index)?;
        self.selection.replace(combo.cards.iter().cloned());
        Some(combo)
    }

    /// Выбранные карты в порядке руки.
    pub fn selected_cards(&self) -> Vec<String> {
        self.selection.in_hand_order(&self.hand)
    }

    // ---------- внутреннее ----------

    fn ensure_current(&self, room_id: &str) -> Result<(), DiscardReason> {
        if self.room_id.as_deref() == Some(room_id) {
            return Ok(());
        }
        debug!(
            "[ROOM] Event for {} ignored, current room {:?}",
            room_id, self.room_id
        );
        Err(DiscardReason::ForeignRoom {
            expected: self.room_id.clone(),
            got: room_id.to_string(),
        })
    }

    fn clear_round(&mut self) {
        self.turn = None;
        self.last_play = None;
        self.hand.clear();
        self.someone_out = false;
        self.terminal = None;
        self.selection.clear();
        self.recommendations.clear();
    }

    fn refresh_recommendations(&mut self) {
        self.recommendations = recommend_with_limit(
            &self.hand,
            self.last_play.as_ref(),
            self.self_id,
            self.is_game_over(),
            self.max_recommendations,
        );
    }
}

impl Default for RoomStateReconciler {
    fn default() -> Self {
        Self::new(MAX_RECOMMENDATIONS)
    }
}
