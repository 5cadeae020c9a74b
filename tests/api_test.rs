use ddz_client::api::{
    ClientCommand, PlayViewDto, PlayerInfoDto, ProtocolError, RoomSnapshotDto, RoomSummaryDto,
    ServerMessage,
};

/// Утилита: снапшот комнаты, как его шлёт сервер.
fn room_state_frame() -> &'static str {
    r#"{
        "type": "RoomState",
        "data": {
            "room_id": "R-1",
            "players": [
                {"id": 11, "name": "Calm_Tiger", "hand_count": 17, "is_landlord": false},
                {"id": 12, "name": "", "hand_count": 20, "is_landlord": true},
                {"id": 13, "name": "Bold_Fox", "hand_count": 17, "is_landlord": false}
            ],
            "turn": 12,
            "last_player": 13,
            "last_play": {"kind": "Pair", "main_rank": "Three", "size": 2},
            "your_hand": ["C3", "S2", "RJ"]
        }
    }"#
}

#[test]
fn commands_encode_as_tagged_frames() {
    assert_eq!(
        ClientCommand::ListRooms.encode().unwrap(),
        r#"{"type":"ListRooms"}"#
    );
    assert_eq!(
        ClientCommand::JoinRoom {
            room_id: "R-1".into()
        }
        .encode()
        .unwrap(),
        r#"{"type":"JoinRoom","data":{"room_id":"R-1"}}"#
    );
    assert_eq!(
        ClientCommand::Play {
            cards: vec!["S3".into(), "H3".into()]
        }
        .encode()
        .unwrap(),
        r#"{"type":"Play","data":{"cards":["S3","H3"]}}"#
    );
    assert_eq!(ClientCommand::Pass.kind(), "Pass");
}

#[test]
fn welcome_and_rooms_list_decode() {
    let msg = ServerMessage::decode(
        r#"{"type":"Welcome","data":{"user_id":4242,"user_name":"Calm_Tiger"}}"#,
    )
    .unwrap();
    assert_eq!(
        msg,
        ServerMessage::Welcome {
            user_id: 4242,
            user_name: "Calm_Tiger".into(),
        }
    );

    // имя может не прийти вовсе
    let msg = ServerMessage::decode(r#"{"type":"Welcome","data":{"user_id":7}}"#).unwrap();
    assert_eq!(
        msg,
        ServerMessage::Welcome {
            user_id: 7,
            user_name: String::new(),
        }
    );

    let msg = ServerMessage::decode(
        r#"{"type":"RoomsList","data":{"rooms":[
            {"room_id":"R-1","player_count":2,"started":false,"can_join":true}
        ]}}"#,
    )
    .unwrap();
    assert_eq!(
        msg,
        ServerMessage::RoomsList {
            rooms: vec![RoomSummaryDto {
                room_id: "R-1".into(),
                player_count: 2,
                started: false,
                can_join: true,
            }]
        }
    );
}

#[test]
fn room_state_decodes_into_snapshot_dto() {
    let msg = ServerMessage::decode(room_state_frame()).unwrap();
    let ServerMessage::RoomState(dto) = msg else {
        panic!("expected RoomState");
    };

    assert_eq!(dto.room_id, "R-1");
    assert_eq!(dto.players.len(), 3);
    assert_eq!(
        dto.players[1],
        PlayerInfoDto {
            id: 12,
            name: String::new(),
            hand_count: 20,
            is_landlord: true,
        }
    );
    assert_eq!(dto.turn, Some(12));
    assert_eq!(dto.last_player, Some(13));
    assert_eq!(
        dto.last_play,
        Some(PlayViewDto {
            kind: "Pair".into(),
            main_rank: "Three".into(),
            size: 2,
        })
    );
    assert_eq!(dto.your_hand, vec!["C3", "S2", "RJ"]);
}

#[test]
fn snapshot_without_last_play_uses_nulls() {
    let msg = ServerMessage::decode(
        r#"{"type":"RoomState","data":{"room_id":"R-2","players":[],"turn":1,
            "last_player":null,"last_play":null,"your_hand":[]}}"#,
    )
    .unwrap();
    assert_eq!(
        msg,
        ServerMessage::RoomState(RoomSnapshotDto {
            room_id: "R-2".into(),
            players: vec![],
            turn: Some(1),
            last_player: None,
            last_play: None,
            your_hand: vec![],
        })
    );
}

#[test]
fn room_events_decode() {
    assert_eq!(
        ServerMessage::decode(r#"{"type":"GameOver","data":{"room_id":"R-1","winner_id":2}}"#)
            .unwrap(),
        ServerMessage::GameOver {
            room_id: "R-1".into(),
            winner_id: Some(2),
        }
    );
    assert_eq!(
        ServerMessage::decode(
            r#"{"type":"RoomInterrupted","data":{"room_id":"R-1","leaver_id":3,"player_count":2}}"#
        )
        .unwrap(),
        ServerMessage::RoomInterrupted {
            room_id: "R-1".into(),
            leaver_id: 3,
            player_count: 2,
        }
    );
    assert_eq!(
        ServerMessage::decode(r#"{"type":"Pong"}"#).unwrap(),
        ServerMessage::Pong
    );
    assert_eq!(
        ServerMessage::decode(r#"{"type":"Error","data":{"message":"room full"}}"#)
            .unwrap()
            .kind(),
        "Error"
    );
}

#[test]
fn unknown_kind_is_not_malformed() {
    let err = ServerMessage::decode(r#"{"type":"Chat","data":{"text":"hi"}}"#).unwrap_err();
    assert!(err.is_unknown_kind());
    assert!(matches!(err, ProtocolError::UnknownKind(ref kind) if kind == "Chat"));
}

#[test]
fn malformed_frames_are_reported() {
    assert!(matches!(
        ServerMessage::decode("not json"),
        Err(ProtocolError::Malformed(_))
    ));
    assert!(matches!(
        ServerMessage::decode(r#"{"data":{}}"#),
        Err(ProtocolError::MissingKind)
    ));
    assert!(matches!(
        ServerMessage::decode(r#"{"type":42}"#),
        Err(ProtocolError::MissingKind)
    ));
    // известный тип, но без обязательного room_id
    assert!(matches!(
        ServerMessage::decode(r#"{"type":"GameOver","data":{"winner_id":2}}"#),
        Err(ProtocolError::Malformed(_))
    ));
    assert!(matches!(
        ServerMessage::decode(r#"{"type":"Welcome","data":{"user_id":"abc"}}"#),
        Err(ProtocolError::Malformed(_))
    ));
}

#[test]
fn server_messages_survive_encode_decode() {
    let msg = ServerMessage::Joined {
        room_id: "R-9".into(),
        you: 5,
        you_name: "Me".into(),
        player_count: 1,
        started: false,
    };
    let frame = msg.encode().unwrap();
    assert_eq!(ServerMessage::decode(&frame).unwrap(), msg);
}
