//! Маппинги протокол -> domain (crate::infra::mapping).

use ddz_client::api::{PlayViewDto, PlayerInfoDto, ProtocolError, RoomSnapshotDto, RoomSummaryDto};
use ddz_client::domain::{ComboKind, Play, Rank, RoomAvailability};
use ddz_client::infra::{
    default_player_name, play_from_view, play_to_view, snapshot_from_dto, summary_from_dto,
    DefaultNameResolver, PlayerNameResolver,
};
use ddz_client::state::NameDirectory;

fn view(kind: &str, rank: &str, size: usize) -> PlayViewDto {
    PlayViewDto {
        kind: kind.into(),
        main_rank: rank.into(),
        size,
    }
}

fn info(id: u64, name: &str, hand_count: usize) -> PlayerInfoDto {
    PlayerInfoDto {
        id,
        name: name.into(),
        hand_count,
        is_landlord: false,
    }
}

#[test]
fn play_views_map_to_domain_plays() {
    assert_eq!(
        play_from_view(&view("Pair", "Three", 2)).unwrap(),
        Play::new(ComboKind::Pair, Rank::Three, 2)
    );
    assert_eq!(
        play_from_view(&view("DoubleStraight", "Ace", 4)).unwrap(),
        Play::new(ComboKind::DoubleStraight, Rank::Ace, 4)
    );
    assert_eq!(
        play_from_view(&view("Rocket", "RedJoker", 2)).unwrap(),
        Play::new(ComboKind::Rocket, Rank::RedJoker, 2)
    );
    // короткий токен ранга тоже понимаем
    assert_eq!(
        play_from_view(&view("Single", "10", 1)).unwrap(),
        Play::new(ComboKind::Single, Rank::Ten, 1)
    );
}

#[test]
fn unknown_play_view_is_rejected() {
    assert!(matches!(
        play_from_view(&view("Quad", "Three", 4)),
        Err(ProtocolError::InvalidPlayView { .. })
    ));
    assert!(matches!(
        play_from_view(&view("Pair", "Fifteen", 2)),
        Err(ProtocolError::InvalidPlayView { .. })
    ));
}

#[test]
fn play_view_roundtrip_uses_long_rank_names() {
    let play = Play::new(ComboKind::Airplane, Rank::BlackJoker, 2);
    let v = play_to_view(&play);
    assert_eq!(v.kind, "Airplane");
    assert_eq!(v.main_rank, "BlackJoker");
    assert_eq!(play_from_view(&v).unwrap(), play);

    let ten = play_to_view(&Play::new(ComboKind::Straight, Rank::Ten, 5));
    assert_eq!(ten.main_rank, "Ten");
    let two = play_to_view(&Play::new(ComboKind::Single, Rank::Two, 1));
    assert_eq!(two.main_rank, "Two");
}

#[test]
fn default_names_use_last_four_digits() {
    assert_eq!(default_player_name(1234567), "Player_4567");
    assert_eq!(default_player_name(42), "Player_42");
    assert_eq!(DefaultNameResolver.resolve_name(90001), "Player_0001");
}

#[test]
fn snapshot_mapping_fills_names_and_last_play_author() {
    let dto = RoomSnapshotDto {
        room_id: "R-1".into(),
        players: vec![info(11, "Calm_Tiger", 17), info(12345, "  ", 20)],
        turn: Some(11),
        last_player: Some(12345),
        last_play: Some(view("Triple", "King", 3)),
        your_hand: vec!["C3".into(), "RJ".into()],
    };

    let snapshot = snapshot_from_dto(&dto, &DefaultNameResolver).unwrap();
    assert_eq!(snapshot.room_id, "R-1");
    assert_eq!(snapshot.players[0].name, "Calm_Tiger");
    assert_eq!(snapshot.players[1].name, "Player_2345");
    assert_eq!(snapshot.turn, Some(11));
    let last = snapshot.last_play.unwrap();
    assert_eq!(last.play, Play::new(ComboKind::Triple, Rank::King, 3));
    assert_eq!(last.player_id, Some(12345));
    // рука не пересортировывается при маппинге
    assert_eq!(snapshot.hand, vec!["C3", "RJ"]);
}

#[test]
fn snapshot_with_bad_last_play_is_malformed() {
    let dto = RoomSnapshotDto {
        room_id: "R-1".into(),
        players: vec![],
        turn: None,
        last_player: Some(1),
        last_play: Some(view("Pair", "Joker", 2)),
        your_hand: vec![],
    };
    assert!(snapshot_from_dto(&dto, &DefaultNameResolver).is_err());
}

#[test]
fn name_directory_remembers_and_falls_back() {
    let mut names = NameDirectory::new();
    assert_eq!(names.save(7, "Bold_Fox"), "Bold_Fox");
    assert_eq!(names.save(123456, ""), "Player_3456");

    assert_eq!(names.resolve_name(7), "Bold_Fox");
    assert_eq!(names.resolve_name(123456), "Player_3456");
    assert_eq!(names.resolve_name(99), "Player_99");
    assert_eq!(names.get(99), None);
}

#[test]
fn summaries_map_one_to_one() {
    let summary = summary_from_dto(&RoomSummaryDto {
        room_id: "R-3".into(),
        player_count: 3,
        started: false,
        can_join: false,
    });
    assert_eq!(summary.room_id, "R-3");
    assert_eq!(summary.availability(), RoomAvailability::Full);
}
