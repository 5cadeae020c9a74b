use std::str::FromStr;

use crate::api::dto::{PlayViewDto, PlayerInfoDto, RoomSnapshotDto, RoomSummaryDto};
use crate::api::errors::ProtocolError;
use crate::domain::card::Rank;
use crate::domain::combo::{ComboKind, Play, PlayRecord};
use crate::domain::room::{RoomPlayer, RoomSnapshot, RoomSummary};
use crate::domain::PlayerId;

/// Описание хода с провода -> доменный `Play`.
///
/// Неизвестный тип или ранг — ошибка: такой снапшот целиком отбрасывается.
pub fn play_from_view(view: &PlayViewDto) -> Result<Play, ProtocolError> {
    let invalid = || ProtocolError::InvalidPlayView {
        kind: view.kind.clone(),
        main_rank: view.main_rank.clone(),
    };

    let kind = ComboKind::from_str(&view.kind).map_err(|_| invalid())?;
    let main_rank = Rank::from_token(&view.main_rank).ok_or_else(invalid)?;

    Ok(Play::new(kind, main_rank, view.size))
}

/// Обратное преобразование: так сервер описал бы ход.
pub fn play_to_view(play: &Play) -> PlayViewDto {
    PlayViewDto {
        kind: play.kind.as_str().to_string(),
        main_rank: play.main_rank.name().to_string(),
        size: play.size,
    }
}

/// Утилита: получить отображаемое имя игрока.
///
/// Сервер может прислать пустое имя — тогда имя придумывает клиент.
pub trait PlayerNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String;
}

/// Простая реализация: `Player_<последние 4 цифры id>`.
pub struct DefaultNameResolver;

impl PlayerNameResolver for DefaultNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String {
        default_player_name(player_id)
    }
}

pub fn default_player_name(player_id: PlayerId) -> String {
    let digits = player_id.to_string();
    let tail = &digits[digits.len().saturating_sub(4)..];
    format!("Player_{}", tail)
}

pub fn player_from_dto(dto: &PlayerInfoDto, names: &impl PlayerNameResolver) -> RoomPlayer {
    let name = if dto.name.trim().is_empty() {
        names.resolve_name(dto.id)
    } else {
        dto.name.clone()
    };

    RoomPlayer {
        id: dto.id,
        name,
        hand_count: dto.hand_count,
        is_landlord: dto.is_landlord,
    }
}

/// Маппинг RoomSnapshotDto -> RoomSnapshot.
pub fn snapshot_from_dto(
    dto: &RoomSnapshotDto,
    names: &impl PlayerNameResolver,
) -> Result<RoomSnapshot, ProtocolError> {
    let last_play = match &dto.last_play {
        Some(view) => Some(PlayRecord::new(play_from_view(view)?, dto.last_player)),
        None => None,
    };

    Ok(RoomSnapshot {
        room_id: dto.room_id.clone(),
        players: dto
            .players
            .iter()
            .map(|p| player_from_dto(p, names))
            .collect(),
        turn: dto.turn,
        last_play,
        hand: dto.your_hand.clone(),
    })
}

pub fn summary_from_dto(dto: &RoomSummaryDto) -> RoomSummary {
    RoomSummary {
        room_id: dto.room_id.clone(),
        player_count: dto.player_count,
        started: dto.started,
        can_join: dto.can_join,
    }
}
