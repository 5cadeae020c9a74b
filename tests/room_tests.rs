//! Сведение снапшотов и событий комнаты (`RoomStateReconciler`).

use ddz_client::domain::{
    ComboKind, Play, PlayRecord, PlayerId, Rank, RoomPlayer, RoomSnapshot, TerminalState,
};
use ddz_client::room::{DiscardReason, RoomPhase, RoomStateReconciler};

const ME: PlayerId = 1;
const ROOM_A: &str = "ROOM_A";
const ROOM_B: &str = "ROOM_B";

fn player(id: PlayerId, hand_count: usize) -> RoomPlayer {
    RoomPlayer {
        id,
        name: format!("Player_{}", id),
        hand_count,
        is_landlord: id == 1,
    }
}

fn snapshot(room_id: &str, counts: [usize; 3], hand: &[&str]) -> RoomSnapshot {
    RoomSnapshot {
        room_id: room_id.to_string(),
        players: vec![player(1, counts[0]), player(2, counts[1]), player(3, counts[2])],
        turn: Some(ME),
        last_play: None,
        hand: hand.iter().map(|c| c.to_string()).collect(),
    }
}

/// Реконсилер, который сидит в идущем раунде комнаты `room_id`.
fn in_round(room_id: &str) -> RoomStateReconciler {
    let mut room = RoomStateReconciler::default();
    room.set_self_id(Some(ME));
    room.apply_joined(room_id, 3, true);
    room.apply_snapshot(snapshot(room_id, [17, 17, 20], &["C3", "S3", "HK"]));
    room
}

#[test]
fn snapshot_replaces_room_and_sorts_hand() {
    let mut room = RoomStateReconciler::default();
    room.set_self_id(Some(ME));
    room.apply_snapshot(snapshot(ROOM_A, [3, 5, 7], &["C3", "RJ", "S10", "H3"]));

    assert_eq!(room.room_id(), Some(ROOM_A));
    assert_eq!(room.phase(), RoomPhase::Started);
    assert_eq!(room.player_count(), 3);
    assert_eq!(room.hand(), ["RJ", "S10", "H3", "C3"]);
    assert_eq!(room.turn(), Some(ME));
    assert!(room.is_my_turn());
    assert!(!room.someone_out());

    // следующий снапшот полностью заменяет предыдущий
    let mut next = snapshot(ROOM_A, [2, 5, 7], &["S10"]);
    next.turn = Some(2);
    next.last_play = Some(PlayRecord::new(
        Play::new(ComboKind::Pair, Rank::Three, 2),
        Some(ME),
    ));
    room.apply_snapshot(next);
    assert_eq!(room.hand(), ["S10"]);
    assert_eq!(room.turn(), Some(2));
    assert!(!room.is_my_turn());
    assert_eq!(room.last_play().unwrap().player_id, Some(ME));
}

#[test]
fn snapshot_recomputes_recommendations() {
    let room = in_round(ROOM_A);
    let kinds: Vec<(ComboKind, Rank)> = room
        .recommendations()
        .iter()
        .map(|c| (c.kind(), c.main_rank()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ComboKind::Single, Rank::Three),
            (ComboKind::Single, Rank::King),
            (ComboKind::Pair, Rank::Three),
        ]
    );
}

#[test]
fn terminal_event_for_another_room_is_discarded() {
    let mut room = RoomStateReconciler::default();
    room.set_self_id(Some(ME));
    room.apply_joined(ROOM_A, 3, true);

    let result = room.apply_terminal_event(ROOM_B, Some(2));
    assert_eq!(
        result,
        Err(DiscardReason::ForeignRoom {
            expected: Some(ROOM_A.to_string()),
            got: ROOM_B.to_string(),
        })
    );
    assert!(room.terminal().is_none());
    assert_eq!(room.phase(), RoomPhase::Started);
}

#[test]
fn terminal_event_needs_a_started_round() {
    let mut room = RoomStateReconciler::default();
    room.apply_joined(ROOM_A, 2, false);

    assert_eq!(
        room.apply_terminal_event(ROOM_A, Some(2)),
        Err(DiscardReason::RoundNotStarted(ROOM_A.to_string()))
    );
    assert!(!room.is_game_over());

    // вне комнаты — тоже чужое событие
    let mut lobby = RoomStateReconciler::default();
    assert!(matches!(
        lobby.apply_terminal_event(ROOM_A, Some(2)),
        Err(DiscardReason::ForeignRoom { expected: None, .. })
    ));
}

#[test]
fn terminal_event_ends_the_round() {
    let mut room = in_round(ROOM_A);
    room.apply_snapshot(snapshot(ROOM_A, [5, 0, 7], &["C3"]));

    room.apply_terminal_event(ROOM_A, Some(2)).unwrap();
    assert_eq!(room.phase(), RoomPhase::Terminal);
    assert_eq!(
        room.terminal(),
        Some(&TerminalState {
            room_id: ROOM_A.to_string(),
            winner_id: Some(2),
        })
    );
    assert!(room.recommendations().is_empty());
    assert!(!room.is_my_turn());
    assert!(room.selection_play().is_none());
}

#[test]
fn snapshot_with_someone_out_keeps_terminal_state() {
    let mut room = in_round(ROOM_A);
    room.apply_snapshot(snapshot(ROOM_A, [5, 0, 7], &["C3"]));
    room.apply_terminal_event(ROOM_A, Some(2)).unwrap();

    room.apply_snapshot(snapshot(ROOM_A, [5, 0, 7], &["C3"]));
    assert!(room.is_game_over());
    assert_eq!(room.phase(), RoomPhase::Terminal);
}

#[test]
fn fresh_snapshot_without_zero_cards_clears_terminal_state() {
    let mut room = in_round(ROOM_A);
    room.apply_snapshot(snapshot(ROOM_A, [5, 0, 7], &["C3"]));
    room.apply_terminal_event(ROOM_A, Some(2)).unwrap();

    room.apply_snapshot(snapshot(ROOM_A, [17, 17, 20], &["C3", "D4"]));
    assert!(room.terminal().is_none());
    assert_eq!(room.phase(), RoomPhase::Started);
    assert!(!room.recommendations().is_empty());
}

#[test]
fn snapshot_of_another_room_drops_foreign_terminal_state() {
    let mut room = in_round(ROOM_A);
    room.apply_snapshot(snapshot(ROOM_A, [5, 0, 7], &["C3"]));
    room.apply_terminal_event(ROOM_A, Some(2)).unwrap();

    // даже если в новой комнате кто-то без карт, чужой итог не переносится
    room.apply_snapshot(snapshot(ROOM_B, [0, 3, 3], &[]));
    assert_eq!(room.room_id(), Some(ROOM_B));
    assert!(room.terminal().is_none());
    assert_eq!(room.phase(), RoomPhase::Started);
}

#[test]
fn interruption_clears_the_round_and_is_idempotent() {
    let mut room = in_round(ROOM_A);
    room.toggle_card("S3");

    room.apply_interruption(ROOM_A, 3, 2).unwrap();
    assert_eq!(room.phase(), RoomPhase::Interrupted);
    assert_eq!(room.player_count(), 2);
    assert!(room.turn().is_none());
    assert!(room.last_play().is_none());
    assert!(room.hand().is_empty());
    assert!(room.selection().is_empty());
    assert!(room.recommendations().is_empty());
    assert!(room.terminal().is_none());

    let after_first = room.clone();
    room.apply_interruption(ROOM_A, 3, 2).unwrap();
    assert_eq!(room.phase(), after_first.phase());
    assert_eq!(room.player_count(), after_first.player_count());
    assert_eq!(room.hand(), after_first.hand());
    assert_eq!(room.turn(), after_first.turn());

    assert!(room.apply_interruption(ROOM_B, 3, 2).is_err());
    assert_eq!(room.room_id(), Some(ROOM_A));
}

#[test]
fn restart_returns_terminal_room_to_started() {
    let mut room = in_round(ROOM_A);
    room.apply_snapshot(snapshot(ROOM_A, [5, 0, 7], &["C3", "S3"]));
    room.toggle_card("C3");
    room.apply_terminal_event(ROOM_A, None).unwrap();

    assert!(room.apply_restart(ROOM_B).is_err());
    assert!(room.is_game_over());

    room.apply_restart(ROOM_A).unwrap();
    assert!(!room.is_game_over());
    assert_eq!(room.phase(), RoomPhase::Started);
    assert!(room.selection().is_empty());
}

#[test]
fn restart_after_interruption_keeps_waiting() {
    let mut room = in_round(ROOM_A);
    room.apply_interruption(ROOM_A, 3, 2).unwrap();
    room.apply_restart(ROOM_A).unwrap();
    assert_eq!(room.phase(), RoomPhase::Interrupted);
}

#[test]
fn joining_another_room_forgets_the_old_one() {
    let mut room = in_round(ROOM_A);
    room.toggle_card("HK");

    room.apply_joined(ROOM_B, 1, false);
    assert_eq!(room.room_id(), Some(ROOM_B));
    assert_eq!(room.phase(), RoomPhase::Idle);
    assert_eq!(room.player_count(), 1);
    assert!(room.hand().is_empty());
    assert!(room.players().is_empty());
    assert!(room.selection().is_empty());

    room.reset();
    assert_eq!(room.room_id(), None);
    assert_eq!(room.phase(), RoomPhase::Idle);
}

#[test]
fn selection_follows_the_hand() {
    let mut room = in_round(ROOM_A);

    assert_eq!(room.toggle_card("ZZ"), None);
    assert_eq!(room.toggle_card("S3"), Some(true));
    assert_eq!(room.toggle_card("C3"), Some(true));
    assert_eq!(
        room.selection_play(),
        Some(Play::new(ComboKind::Pair, Rank::Three, 2))
    );
    assert!(room.selection_beats_last());
    assert_eq!(room.toggle_card("C3"), Some(false));
    assert_eq!(room.selected_cards(), vec!["S3"]);

    // снапшот без S3 — из выбора она пропадает
    room.apply_snapshot(snapshot(ROOM_A, [16, 17, 20], &["C3", "HK"]));
    assert!(room.selection().is_empty());

    let cards = room.apply_recommendation(1).unwrap().cards.clone();
    assert_eq!(cards, vec!["HK"]);
    assert_eq!(room.selected_cards(), vec!["HK"]);
    assert!(room.apply_recommendation(10).is_none());

    room.clear_selection();
    assert!(room.selection().is_empty());
}

#[test]
fn selection_must_beat_a_foreign_play() {
    let mut room = RoomStateReconciler::default();
    room.set_self_id(Some(ME));
    let mut snap = snapshot(ROOM_A, [17, 17, 20], &["C3", "HK"]);
    snap.last_play = Some(PlayRecord::new(
        Play::new(ComboKind::Single, Rank::Ten, 1),
        Some(3),
    ));
    room.apply_snapshot(snap);

    room.toggle_card("C3");
    assert!(!room.selection_beats_last());
    room.toggle_card("C3");
    room.toggle_card("HK");
    assert!(room.selection_beats_last());

    assert_eq!(room.recommendations().len(), 1);
    assert_eq!(room.recommendations()[0].cards, vec!["HK"]);
}
