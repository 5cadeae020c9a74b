// src/bin/ddz_replay_cli.rs
//
// Прогоняет запись сообщений сервера (JSON lines) через ClientState
// и после каждого кадра печатает статус и подсказки.
//
//   ddz_replay_cli transcript.jsonl [rules.json]
//   cat transcript.jsonl | ddz_replay_cli

use std::env;
use std::fs;
use std::io::{self, BufRead};

use ddz_client::session::{SessionEffect, SessionRules};
use ddz_client::ClientState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();

    let rules = match args.get(1) {
        Some(path) => match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| SessionRules::from_json(&raw).map_err(|e| e.to_string()))
        {
            Ok(rules) => rules,
            Err(err) => {
                eprintln!("Не удалось прочитать правила {}: {}", path, err);
                std::process::exit(2);
            }
        },
        None => SessionRules::standard(),
    };

    let lines: Vec<String> = match args.first() {
        Some(path) => match fs::read_to_string(path) {
            Ok(raw) => raw.lines().map(str::to_string).collect(),
            Err(err) => {
                eprintln!("Не удалось открыть {}: {}", path, err);
                std::process::exit(2);
            }
        },
        None => io::stdin().lock().lines().map_while(Result::ok).collect(),
    };

    println!("ddz_replay_cli: {} кадров", lines.len());

    let mut client = ClientState::new(rules);
    let connection = match client.connect("replay://local") {
        Ok(connection) => connection,
        Err(err) => {
            eprintln!("connect: {}", err);
            std::process::exit(1);
        }
    };
    client.on_transport_open(connection);
    print_effects(&mut client);

    for (n, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        println!();
        println!("================ FRAME {} =================", n + 1);
        client.on_transport_message(connection, line);

        for event in client.drain_events() {
            println!("  event: {:?}", event);
        }
        print_effects(&mut client);

        println!("  status: {}", client.turn_status());
        let room = client.room();
        if let Some(room_id) = room.room_id() {
            println!("  room:   {} ({:?})", room_id, room.phase());
            println!("  hand:   {}", room.hand().join(" "));
            match room.last_play() {
                Some(record) => println!(
                    "  last:   {} main={} size={} by {:?}",
                    record.play.kind, record.play.main_rank, record.play.size, record.player_id
                ),
                None => println!("  last:   -"),
            }
        }

        let recs = client.room().recommendations();
        if recs.is_empty() {
            println!("  hints:  нет");
        }
        for (i, combo) in recs.iter().enumerate() {
            println!(
                "  hint {}: {} [{}]",
                i,
                combo.kind(),
                combo.cards.join(" ")
            );
        }
    }
}

fn print_effects(client: &mut ClientState) {
    for effect in client.drain_effects() {
        match effect {
            SessionEffect::Send { command, .. } => match command.encode() {
                Ok(frame) => println!("  -> {}", frame),
                Err(err) => println!("  -> <{}>", err),
            },
            other => println!("  effect: {:?}", other),
        }
    }
}
