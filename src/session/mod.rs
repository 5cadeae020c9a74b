// src/session/mod.rs
//! Жизненный цикл соединения с сервером.
//!
//! Здесь собираем:
//! - правила (`SessionRules`);
//! - счётчик неудач и экспоненциальную задержку (`Backoff`);
//! - хэндлы таймеров с поколениями (`TimerSlot`);
//! - фасад `SessionManager` — конечный автомат
//!   `Disconnected → Connecting → Connected → Disconnected`.
//!
//! Сессия не владеет ни сокетами, ни часами: она копит `SessionEffect`,
//! а хост их исполняет и сообщает обратно о событиях канала и таймеров.

pub mod backoff;
pub mod rules;
pub mod timer;
pub mod transport;

pub use backoff::Backoff;
pub use rules::SessionRules;
pub use timer::{TimerHandle, TimerKind, TimerSlot};
pub use transport::{ConnectionId, ConnectionStatus, SessionEffect};

use log::{debug, info};
use thiserror::Error;

use crate::api::commands::ClientCommand;

/// Ошибки уровня сессии.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Адрес сервера не задан")]
    EmptyAddress,
}

/// Параметры `connect`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Попытка из таймера переподключения: счётчик неудач не сбрасываем.
    pub retry: bool,
}

impl ConnectOptions {
    pub const fn retry() -> Self {
        Self { retry: true }
    }
}

/// Что означало срабатывание таймера.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerFired {
    /// Хэндл устарел (таймер отменён или перевзведён) — ничего не делаем.
    Stale,
    /// Начата новая попытка подключения.
    Reconnecting(ConnectionId),
    /// Пора опросить лобби.
    Poll,
}

/// Менеджер сессии.
#[derive(Clone, Debug)]
pub struct SessionManager {
    rules: SessionRules,
    status: ConnectionStatus,
    address: Option<String>,
    backoff: Backoff,
    /// Текущий канал. Канал, снятый явно или заменённый новым, сюда не попадает.
    connection: Option<ConnectionId>,
    last_connection: u64,
    reconnect: TimerSlot,
    poll: TimerSlot,
    effects: Vec<SessionEffect>,
}

impl SessionManager {
    pub fn new(rules: SessionRules) -> Self {
        Self {
            rules,
            status: ConnectionStatus::Disconnected,
            address: None,
            backoff: Backoff::new(),
            connection: None,
            last_connection: 0,
            reconnect: TimerSlot::new(TimerKind::Reconnect),
            poll: TimerSlot::new(TimerKind::Poll),
            effects: Vec::new(),
        }
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Неудачных попыток подряд.
    pub fn attempts(&self) -> u32 {
        self.backoff.attempts()
    }

    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    /// Открытый канал, если соединение установлено.
    pub fn open_connection(&self) -> Option<ConnectionId> {
        if self.is_connected() {
            self.connection
        } else {
            None
        }
    }

    pub fn reconnect_pending(&self) -> Option<TimerHandle> {
        self.reconnect.active()
    }

    pub fn polling(&self) -> Option<TimerHandle> {
        self.poll.active()
    }

    /// Забрать накопленные эффекты для хоста.
    pub fn drain_effects(&mut self) -> Vec<SessionEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Начать подключение к `address`.
    ///
    /// Старый канал снимается явно (переподключения для него не будет),
    /// ожидающие таймеры отменяются.
    pub fn connect(
        &mut self,
        address: &str,
        options: ConnectOptions,
    ) -> Result<ConnectionId, SessionError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(SessionError::EmptyAddress);
        }

        if !options.retry {
            self.backoff.reset();
        }
        self.cancel_reconnect();
        self.stop_polling();
        self.teardown_current();

        self.last_connection += 1;
        let connection = ConnectionId(self.last_connection);
        self.connection = Some(connection);
        self.address = Some(address.to_string());
        self.status = ConnectionStatus::Connecting;

        info!(
            "[SESSION] Connecting {} to {} (retry={}, attempts={})",
            connection,
            address,
            options.retry,
            self.backoff.attempts()
        );
        self.effects.push(SessionEffect::Open {
            connection,
            address: address.to_string(),
        });

        Ok(connection)
    }

    /// Явное отключение: канал закрывается, переподключения не будет.
    pub fn disconnect(&mut self) {
        self.cancel_reconnect();
        self.stop_polling();
        self.teardown_current();
        self.backoff.reset();
        self.status = ConnectionStatus::Disconnected;
        info!("[SESSION] Disconnected by user");
    }

    /// Поставить команду в очередь на отправку.
    /// Принимается только при установленном соединении.
    pub fn send(&mut self, command: ClientCommand) -> bool {
        let Some(connection) = self.open_connection() else {
            debug!("[SESSION] Dropping {} while not connected", command.kind());
            return false;
        };
        self.effects.push(SessionEffect::Send {
            connection,
            command,
        });
        true
    }

    /// Канал открылся. `false` — событие от чужого/старого канала.
    pub fn on_open(&mut self, connection: ConnectionId) -> bool {
        if self.connection != Some(connection) || self.status != ConnectionStatus::Connecting {
            debug!("[SESSION] Ignoring open of stale connection {}", connection);
            return false;
        }

        self.status = ConnectionStatus::Connected;
        self.backoff.reset();
        self.start_polling();
        info!("[SESSION] Connected {}", connection);
        true
    }

    /// Канал закрылся сам. `false` — канал уже снят явно или заменён.
    pub fn on_close(&mut self, connection: ConnectionId) -> bool {
        if self.connection != Some(connection) {
            debug!("[SESSION] Ignoring close of stale connection {}", connection);
            return false;
        }
        self.connection = None;
        self.fail();
        true
    }

    /// Ошибка канала: закрываем его сами и уходим в переподключение.
    pub fn on_error(&mut self, connection: ConnectionId) -> bool {
        if self.connection != Some(connection) {
            debug!("[SESSION] Ignoring error of stale connection {}", connection);
            return false;
        }
        self.connection = None;
        self.effects.push(SessionEffect::Close { connection });
        self.fail();
        true
    }

    /// Хост сообщает о срабатывании таймера.
    pub fn on_timer(&mut self, handle: TimerHandle) -> TimerFired {
        match handle.kind {
            TimerKind::Reconnect => {
                if !self.reconnect.fire_once(handle) {
                    debug!("[SESSION] Stale reconnect timer gen={}", handle.generation);
                    return TimerFired::Stale;
                }
                let Some(address) = self.address.clone() else {
                    return TimerFired::Stale;
                };
                match self.connect(&address, ConnectOptions::retry()) {
                    Ok(connection) => TimerFired::Reconnecting(connection),
                    Err(_) => TimerFired::Stale,
                }
            }
            TimerKind::Poll => {
                if !self.poll.is_current(handle) || !self.is_connected() {
                    debug!("[SESSION] Stale poll timer gen={}", handle.generation);
                    return TimerFired::Stale;
                }
                TimerFired::Poll
            }
        }
    }

    fn fail(&mut self) {
        self.status = ConnectionStatus::Disconnected;
        self.stop_polling();
        self.schedule_reconnect();
    }

    fn teardown_current(&mut self) {
        if let Some(connection) = self.connection.take() {
            debug!("[SESSION] Tearing down {}", connection);
            self.effects.push(SessionEffect::Close { connection });
        }
    }

    fn schedule_reconnect(&mut self) {
        if self.address.is_none() {
            return;
        }
        let Some(handle) = self.reconnect.arm() else {
            debug!("[SESSION] Reconnect already pending");
            return;
        };
        let delay = self.backoff.next_delay(&self.rules);
        info!(
            "[SESSION] Connection lost, reconnecting in {} ms (attempt {})",
            delay.as_millis(),
            self.backoff.attempts()
        );
        self.effects.push(SessionEffect::ScheduleTimer {
            handle,
            delay,
            repeat: false,
        });
    }

    fn cancel_reconnect(&mut self) {
        if let Some(handle) = self.reconnect.cancel() {
            self.effects.push(SessionEffect::CancelTimer { handle });
        }
    }

    fn start_polling(&mut self) {
        if let Some(handle) = self.poll.arm() {
            self.effects.push(SessionEffect::ScheduleTimer {
                handle,
                delay: self.rules.poll_interval(),
                repeat: true,
            });
        }
    }

    fn stop_polling(&mut self) {
        if let Some(handle) = self.poll.cancel() {
            self.effects.push(SessionEffect::CancelTimer { handle });
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SessionRules::standard())
    }
}
