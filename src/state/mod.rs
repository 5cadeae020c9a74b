// src/state/mod.rs
//! Контекст клиента: единственная точка входа для событий хоста.
//!
//! `ClientState` владеет сессией, комнатой и данными лобби. Хост
//! (event loop) сообщает о событиях канала, таймеров и действиях игрока,
//! а потом забирает эффекты (`drain_effects`) и уведомления (`drain_events`).

pub mod events;
pub mod names;
pub mod status;

pub use events::ClientEvent;
pub use names::NameDirectory;
pub use status::{ActionAvailability, TurnStatus};

use log::{debug, info, warn};

use crate::api::commands::ClientCommand;
use crate::api::dto::RoomSnapshotDto;
use crate::api::errors::ClientError;
use crate::api::messages::ServerMessage;
use crate::domain::combo::Play;
use crate::domain::room::{RoomSummary, SeatLayout};
use crate::domain::{PlayerId, RoomId};
use crate::infra::mapping::{snapshot_from_dto, summary_from_dto, PlayerNameResolver};
use crate::room::{RoomPhase, RoomStateReconciler};
use crate::session::{
    ConnectOptions, ConnectionId, ConnectionStatus, SessionEffect, SessionManager, SessionRules,
    TimerFired, TimerHandle,
};

/// Состояние клиента целиком.
#[derive(Clone, Debug)]
pub struct ClientState {
    session: SessionManager,
    room: RoomStateReconciler,

    user_id: Option<PlayerId>,
    user_name: Option<String>,
    rooms: Vec<RoomSummary>,
    selected_room: Option<RoomId>,
    names: NameDirectory,

    events: Vec<ClientEvent>,
}

impl ClientState {
    pub fn new(rules: SessionRules) -> Self {
        let max_recommendations = rules.max_recommendations;
        Self {
            session: SessionManager::new(rules),
            room: RoomStateReconciler::new(max_recommendations),
            user_id: None,
            user_name: None,
            rooms: Vec::new(),
            selected_room: None,
            names: NameDirectory::new(),
            events: Vec::new(),
        }
    }

    // ---------- чтение ----------

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn room(&self) -> &RoomStateReconciler {
        &self.room
    }

    pub fn user_id(&self) -> Option<PlayerId> {
        self.user_id
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn rooms(&self) -> &[RoomSummary] {
        &self.rooms
    }

    pub fn selected_room(&self) -> Option<&str> {
        self.selected_room.as_deref()
    }

    pub fn room_phase(&self) -> RoomPhase {
        self.room.phase()
    }

    pub fn player_name(&self, player_id: PlayerId) -> String {
        self.names.resolve_name(player_id)
    }

    pub fn drain_effects(&mut self) -> Vec<SessionEffect> {
        self.session.drain_effects()
    }

    pub fn drain_events(&mut self) -> Vec<ClientEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------- запросы для представления ----------

    pub fn turn_status(&self) -> TurnStatus {
        if !self.session.is_connected() {
            let attempts = self.session.attempts();
            return if attempts > 0 {
                TurnStatus::Reconnecting { attempts }
            } else {
                TurnStatus::Connecting
            };
        }

        let Some(room_id) = self.room.room_id() else {
            return TurnStatus::Lobby;
        };

        if let Some(terminal) = self.room.terminal() {
            return TurnStatus::GameOver {
                winner_id: terminal.winner_id,
                winner_name: self.winner_name(terminal.winner_id),
            };
        }

        if !self.room.phase().is_dealt() {
            return TurnStatus::WaitingForPlayers {
                room_id: room_id.to_string(),
                player_count: self.room.player_count(),
            };
        }

        match self.room.turn() {
            Some(turn) if Some(turn) == self.user_id => TurnStatus::YourTurn,
            Some(turn) => TurnStatus::WaitingFor {
                player_id: turn,
                name: self.player_name(turn),
            },
            None => TurnStatus::AwaitingTurn,
        }
    }

    pub fn actions(&self) -> ActionAvailability {
        let connected = self.session.is_connected();
        let in_room = self.room.room_id().is_some();
        let game_over = self.room.is_game_over();
        let my_turn = connected && self.room.is_my_turn();

        let can_join_room = connected
            && self.selected_summary().is_some_and(|summary| {
                summary.can_join && Some(summary.room_id.as_str()) != self.room.room_id()
            });

        ActionAvailability {
            can_reconnect: self.session.address().is_some(),
            can_create_room: connected,
            can_join_room,
            can_refresh_rooms: connected,
            can_play: my_turn,
            can_pass: my_turn,
            can_clear_selection: !self.room.hand().is_empty() && !game_over,
            can_restart: game_over && connected && in_room,
        }
    }

    pub fn seats(&self) -> SeatLayout {
        self.room.seats()
    }

    /// Классификация выбранных карт (`None` — это не комбинация).
    pub fn selection_play(&self) -> Option<Play> {
        self.room.selection_play()
    }

    // ---------- события канала ----------

    pub fn on_transport_open(&mut self, connection: ConnectionId) {
        if !self.session.on_open(connection) {
            return;
        }
        // Новый канал: комната начинается с чистого листа.
        self.room.reset();
        self.selected_room = None;
        self.events
            .push(ClientEvent::StatusChanged(ConnectionStatus::Connected));
        self.request_rooms_quietly();
    }

    pub fn on_transport_close(&mut self, connection: ConnectionId) {
        if self.session.on_close(connection) {
            self.events
                .push(ClientEvent::StatusChanged(ConnectionStatus::Disconnected));
        }
    }

    pub fn on_transport_error(&mut self, connection: ConnectionId) {
        if self.session.on_error(connection) {
            warn!("[CLIENT] Transport error on {}, reconnect scheduled", connection);
            self.events
                .push(ClientEvent::StatusChanged(ConnectionStatus::Disconnected));
        }
    }

    /// Текстовый кадр от сервера.
    pub fn on_transport_message(&mut self, connection: ConnectionId, raw: &str) {
        if self.session.open_connection() != Some(connection) {
            debug!("[CLIENT] Frame from stale connection {} ignored", connection);
            return;
        }

        match ServerMessage::decode(raw) {
            Ok(message) => self.dispatch(message),
            Err(err) if err.is_unknown_kind() => {
                debug!("[PROTOCOL] {}, ignored", err);
            }
            Err(err) => {
                warn!("[PROTOCOL] Dropping malformed frame: {}", err);
                self.events.push(ClientEvent::Malformed {
                    error: err.to_string(),
                });
            }
        }
    }

    pub fn on_timer(&mut self, handle: TimerHandle) {
        match self.session.on_timer(handle) {
            TimerFired::Stale => {}
            TimerFired::Reconnecting(_) => {
                self.events
                    .push(ClientEvent::StatusChanged(ConnectionStatus::Connecting));
            }
            TimerFired::Poll => self.request_rooms_quietly(),
        }
    }

    /// Применить уже разобранное сообщение сервера.
    pub fn dispatch(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Welcome { user_id, user_name } => {
                let user_name = self.names.save(user_id, &user_name);
                info!("[CLIENT] Welcome, {} (id={})", user_name, user_id);
                self.user_id = Some(user_id);
                self.user_name = Some(user_name.clone());
                self.room.set_self_id(Some(user_id));
                self.events.push(ClientEvent::Welcome { user_id, user_name });
            }

            ServerMessage::RoomsList { rooms } => {
                self.rooms = rooms.iter().map(summary_from_dto).collect();
                self.fallback_selected_room();
                self.events.push(ClientEvent::RoomsUpdated {
                    count: self.rooms.len(),
                });
            }

            ServerMessage::RoomCreated { room_id } => {
                info!("[CLIENT] Room {} created", room_id);
                self.events.push(ClientEvent::RoomCreated { room_id });
                self.request_rooms_quietly();
            }

            ServerMessage::Joined {
                room_id,
                you,
                you_name,
                player_count,
                started,
            } => {
                self.names.save(you, &you_name);
                self.room.apply_joined(&room_id, player_count, started);
                self.selected_room = Some(room_id.clone());
                self.events.push(ClientEvent::Joined { room_id });
                self.request_rooms_quietly();
            }

            ServerMessage::RoomState(dto) => self.apply_room_state(&dto),

            ServerMessage::PlayRejected { reason } => {
                info!("[CLIENT] Play rejected: {}", reason);
                self.events.push(ClientEvent::PlayRejected { reason });
            }

            ServerMessage::GameOver { room_id, winner_id } => {
                match self.room.apply_terminal_event(&room_id, winner_id) {
                    Ok(()) => {
                        let winner_name = self.winner_name(winner_id);
                        self.events.push(ClientEvent::GameOver {
                            room_id,
                            winner_id,
                            winner_name,
                        });
                    }
                    Err(reason) => self.events.push(ClientEvent::Discarded {
                        kind: "GameOver",
                        reason,
                    }),
                }
            }

            ServerMessage::RoomInterrupted {
                room_id,
                leaver_id,
                player_count,
            } => match self.room.apply_interruption(&room_id, leaver_id, player_count) {
                Ok(()) => {
                    let leaver_name = self.player_name(leaver_id);
                    self.events.push(ClientEvent::RoomInterrupted {
                        room_id,
                        leaver_id,
                        leaver_name,
                        remaining: player_count,
                    });
                    self.request_rooms_quietly();
                }
                Err(reason) => self.events.push(ClientEvent::Discarded {
                    kind: "RoomInterrupted",
                    reason,
                }),
            },

            ServerMessage::GameRestarted { room_id } => match self.room.apply_restart(&room_id) {
                Ok(()) => self.events.push(ClientEvent::GameRestarted { room_id }),
                Err(reason) => self.events.push(ClientEvent::Discarded {
                    kind: "GameRestarted",
                    reason,
                }),
            },

            ServerMessage::Error { message } => {
                warn!("[CLIENT] Server error: {}", message);
                self.events.push(ClientEvent::ServerError { message });
            }

            ServerMessage::Pong => {}
        }
    }

    // ---------- действия игрока ----------

    pub fn connect(&mut self, address: &str) -> Result<ConnectionId, ClientError> {
        let connection = self.session.connect(address, ConnectOptions::default())?;
        self.events
            .push(ClientEvent::StatusChanged(ConnectionStatus::Connecting));
        Ok(connection)
    }

    /// Переподключиться к последнему адресу.
    pub fn reconnect(&mut self) -> Result<ConnectionId, ClientError> {
        let address = self
            .session
            .address()
            .map(str::to_string)
            .ok_or(ClientError::NoServerAddress)?;
        self.connect(&address)
    }

    pub fn disconnect(&mut self) {
        self.session.disconnect();
        self.events
            .push(ClientEvent::StatusChanged(ConnectionStatus::Disconnected));
    }

    pub fn create_room(&mut self) -> Result<(), ClientError> {
        self.send(ClientCommand::CreateRoom)
    }

    /// Выбрать комнату в списке лобби.
    pub fn select_room(&mut self, room_id: &str) {
        self.selected_room = Some(room_id.to_string());
    }

    pub fn join_room(&mut self, room_id: &str) -> Result<(), ClientError> {
        self.select_room(room_id);
        self.send(ClientCommand::JoinRoom {
            room_id: room_id.to_string(),
        })
    }

    pub fn join_selected_room(&mut self) -> Result<(), ClientError> {
        let room_id = self
            .selected_room
            .clone()
            .ok_or(ClientError::NoRoomSelected)?;
        self.join_room(&room_id)
    }

    pub fn request_room_list(&mut self) -> Result<(), ClientError> {
        self.send(ClientCommand::ListRooms)
    }

    /// Сыграть выбранные карты. Выбор после отправки очищается.
    pub fn play_selected(&mut self) -> Result<(), ClientError> {
        let cards = self.room.selected_cards();
        self.play(cards)?;
        self.room.clear_selection();
        Ok(())
    }

    pub fn play(&mut self, cards: Vec<String>) -> Result<(), ClientError> {
        self.ensure_my_turn()?;
        if cards.is_empty() {
            return Err(ClientError::EmptySelection);
        }
        if let Some(missing) = cards.iter().find(|c| !self.room.hand().contains(c)) {
            return Err(ClientError::CardNotInHand(missing.clone()));
        }
        self.send(ClientCommand::Play { cards })
    }

    pub fn pass(&mut self) -> Result<(), ClientError> {
        self.ensure_my_turn()?;
        self.send(ClientCommand::Pass)
    }

    pub fn restart_game(&mut self) -> Result<(), ClientError> {
        self.ensure_connected()?;
        if self.room.room_id().is_none() {
            return Err(ClientError::NoRoom);
        }
        if !self.room.is_game_over() {
            return Err(ClientError::NotGameOver);
        }
        self.send(ClientCommand::RestartGame)
    }

    /// Переключить карту в выборе. `Ok(true)` — карта теперь выбрана.
    pub fn toggle_card(&mut self, code: &str) -> Result<bool, ClientError> {
        self.room
            .toggle_card(code)
            .ok_or_else(|| ClientError::CardNotInHand(code.to_string()))
    }

    /// Выбрать карты подсказки. Возвращает выбранные карты.
    pub fn apply_recommendation(&mut self, index: usize) -> Result<Vec<String>, ClientError> {
        self.room
            .apply_recommendation(index)
            .map(|combo| combo.cards.clone())
            .ok_or(ClientError::NoSuchRecommendation(index))
    }

    pub fn clear_selection(&mut self) {
        self.room.clear_selection();
    }

    // ---------- внутреннее ----------

    fn send(&mut self, command: ClientCommand) -> Result<(), ClientError> {
        if self.session.send(command) {
            Ok(())
        } else {
            Err(ClientError::NotConnected)
        }
    }

    /// Опрос лобби: без соединения просто ничего не делаем.
    fn request_rooms_quietly(&mut self) {
        let _ = self.session.send(ClientCommand::ListRooms);
    }

    fn ensure_connected(&self) -> Result<(), ClientError> {
        if self.session.is_connected() {
            Ok(())
        } else {
            Err(ClientError::NotConnected)
        }
    }

    fn ensure_my_turn(&self) -> Result<(), ClientError> {
        self.ensure_connected()?;
        if self.room.room_id().is_none() {
            return Err(ClientError::NoRoom);
        }
        if !self.room.is_my_turn() {
            return Err(ClientError::NotYourTurn);
        }
        Ok(())
    }

    fn apply_room_state(&mut self, dto: &RoomSnapshotDto) {
        let snapshot = match snapshot_from_dto(dto, &self.names) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("[PROTOCOL] Dropping snapshot of {}: {}", dto.room_id, err);
                self.events.push(ClientEvent::Malformed {
                    error: err.to_string(),
                });
                return;
            }
        };

        for player in &snapshot.players {
            self.names.save(player.id, &player.name);
        }
        let room_id = snapshot.room_id.clone();
        self.room.apply_snapshot(snapshot);
        self.selected_room = Some(room_id.clone());
        debug!(
            "[CLIENT] Snapshot of {} applied, phase={:?}",
            room_id,
            self.room.phase()
        );
        self.events.push(ClientEvent::RoomUpdated { room_id });
    }

    /// Выбранная комната пропала из списка — откатываемся на текущую,
    /// а если ничего не выбрано — на первую в списке.
    fn fallback_selected_room(&mut self) {
        if let Some(selected) = &self.selected_room {
            if !self.rooms.iter().any(|r| &r.room_id == selected) {
                self.selected_room = self.room.room_id().map(str::to_string);
            }
        }
        if self.selected_room.is_none() {
            self.selected_room = self.rooms.first().map(|r| r.room_id.clone());
        }
    }

    fn selected_summary(&self) -> Option<&RoomSummary> {
        let selected = self.selected_room.as_deref()?;
        self.rooms.iter().find(|r| r.room_id == selected)
    }

    fn winner_name(&self, winner_id: Option<PlayerId>) -> String {
        match winner_id {
            Some(id) => self.player_name(id),
            None => "-".to_string(),
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(SessionRules::standard())
    }
}
