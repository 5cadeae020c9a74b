// src/session/timer.rs
//! Хэндлы таймеров с поколениями.
//!
//! Реальные таймеры живут у хоста (event loop). Сессия выдаёт хэндл и
//! помнит его поколение; когда хост сообщает о срабатывании, хэндл с
//! устаревшим поколением игнорируется — поздний "бродячий" колбэк безвреден.

use serde::{Deserialize, Serialize};

/// Назначение таймера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Одноразовый таймер переподключения.
    Reconnect,
    /// Периодический опрос списка комнат.
    Poll,
}

/// Хэндл конкретного запланированного таймера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Слот под не более чем один активный таймер своего вида.
#[derive(Clone, Debug)]
pub struct TimerSlot {
    kind: TimerKind,
    generation: u64,
    active: Option<TimerHandle>,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            generation: 0,
            active: None,
        }
    }

    pub fn active(&self) -> Option<TimerHandle> {
        self.active
    }

    /// Взвести таймер. Если он уже взведён — `None` (повторно не планируем).
    pub fn arm(&mut self) -> Option<TimerHandle> {
        if self.active.is_some() {
            return None;
        }
        self.generation += 1;
        let handle = TimerHandle {
            kind: self.kind,
            generation: self.generation,
        };
        self.active = Some(handle);
        Some(handle)
    }

    /// Снять таймер; возвращает хэндл, который хосту нужно отменить.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.active.take()
    }

    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.active == Some(handle)
    }

    /// Срабатывание одноразового таймера: слот освобождается, если хэндл актуален.
    pub fn fire_once(&mut self, handle: TimerHandle) -> bool {
        if self.is_current(handle) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
