//! Packet sequences produced by board operations.

mod common;

use common::board;
use sidebar_core::{BoardError, ErrorKind, KeyedLine, SlotMode};
use sidebar_wire::{DisplayObjectivePacket, ObjectivePacket, Packet, ScorePacket, TeamPacket};

fn display() -> Packet {
    DisplayObjectivePacket::sidebar("board").into()
}

#[test]
fn title_creates_then_updates_objective() {
    let (mut board, transport) = board();

    board.set_title("My Board").unwrap();
    assert!(board.has_objective());
    assert_eq!(
        transport.take(),
        vec![ObjectivePacket::create("board", "My Board").into(), display()]
    );

    board.set_title("Updated").unwrap();
    assert_eq!(
        transport.take(),
        vec![ObjectivePacket::update("board", "Updated").into(), display()]
    );
}

#[test]
fn title_over_limit_is_rejected() {
    let (mut board, transport) = board();
    let err = board.set_title(&"t".repeat(33)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(transport.take().is_empty());
    assert!(!board.has_objective());
}

#[test]
fn first_draw_commits_score_then_team() {
    let (mut board, transport) = board();

    board.set_line(0, "Hello").unwrap();
    assert_eq!(
        transport.take(),
        vec![
            ScorePacket::change("§0", "board", 0).into(),
            TeamPacket::create("0", "Hello", "", "§0").into(),
        ]
    );
    assert_eq!(board.slot_mode(0), Some(SlotMode::Plain));
    assert_eq!(board.line(0).unwrap().raw_text(), Some("Hello"));

    board.set_line(0, "World").unwrap();
    assert_eq!(
        transport.take(),
        vec![TeamPacket::update("0", "World", "", "§0").into()]
    );
}

#[test]
fn long_line_carries_color_into_suffix() {
    let (mut board, transport) = board();

    board.set_line(3, "§aOnline players: 12").unwrap();
    assert_eq!(
        transport.take(),
        vec![
            ScorePacket::change("§3", "board", 3).into(),
            TeamPacket::create("3", "§aOnline players", "§a: 12", "§3").into(),
        ]
    );
}

#[test]
fn marker_at_boundary_moves_the_cut() {
    let (mut board, transport) = board();
    let line = format!("{}§a{}", "A".repeat(15), "B".repeat(14));
    assert_eq!(line.chars().count(), 31);

    board.set_line(1, &line).unwrap();
    let packets = transport.take();
    assert_eq!(
        packets[1],
        TeamPacket::create(
            "1",
            "A".repeat(15),
            format!("§a{}", "B".repeat(14)),
            "§1"
        )
        .into()
    );
}

#[test]
fn marker_at_boundary_costs_one_character() {
    let (mut board, transport) = board();
    let line = format!("{}§a{}", "A".repeat(15), "B".repeat(15));
    assert_eq!(line.chars().count(), 32);

    let err = board.set_line(1, &line).unwrap_err();
    assert!(matches!(err, BoardError::LineTooLong { index: 1, max: 31 }));
    assert!(transport.take().is_empty());
}

#[test]
fn carried_color_shortens_the_line() {
    let (mut board, transport) = board();
    let line = format!("§c{}{}", "x".repeat(14), "y".repeat(16));
    assert_eq!(line.chars().count(), 32);

    let err = board.set_line(9, &line).unwrap_err();
    assert!(matches!(err, BoardError::LineTooLong { index: 9, max: 30 }));
    assert_eq!(err.kind(), ErrorKind::LineTooLong);
    assert!(transport.take().is_empty());
    assert_eq!(board.slot_mode(9), Some(SlotMode::Empty));
}

#[test]
fn invalid_arguments_send_nothing() {
    let (mut board, transport) = board();

    assert!(matches!(
        board.set_line(15, "x"),
        Err(BoardError::InvalidIndex { index: 15 })
    ));
    assert!(matches!(
        board.set_line(0, &"x".repeat(33)),
        Err(BoardError::TextTooLong { limit: 32, .. })
    ));
    let err = board.set_line(0, "§xbad").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEscapeCode);
    assert!(matches!(
        board.remove_line(20),
        Err(BoardError::InvalidIndex { index: 20 })
    ));
    assert!(transport.take().is_empty());
}

#[test]
fn remove_line_twice() {
    let (mut board, transport) = board();
    board.set_line(4, "x").unwrap();
    transport.take();

    board.remove_line(4).unwrap();
    assert_eq!(
        transport.take(),
        vec![
            TeamPacket::remove("4").into(),
            ScorePacket::remove("§4").into(),
        ]
    );

    let err = board.remove_line(4).unwrap_err();
    assert!(matches!(err, BoardError::UnknownLine { index: 4 }));
    assert_eq!(err.kind(), ErrorKind::UnknownLine);
    assert!(transport.take().is_empty());
    assert_eq!(board.slot_mode(4), Some(SlotMode::Empty));
}

#[test]
fn keyed_line_value_keeps_prefix() {
    let (mut board, transport) = board();
    let key = "Players online right now total:";
    assert_eq!(key.chars().count(), 31);

    board.create_line(&KeyedLine::new(5, key)).unwrap();
    assert_eq!(
        transport.take(),
        vec![
            ScorePacket::change(key, "board", 5).into(),
            TeamPacket::create("5", "", "", key).into(),
        ]
    );
    assert_eq!(board.slot_mode(5), Some(SlotMode::Keyed));
    assert_eq!(board.line(5).unwrap().static_key(), Some(""));

    board.set_value(5, "42").unwrap();
    assert_eq!(
        transport.take(),
        vec![TeamPacket::update("5", "", "42", key).into()]
    );
}

#[test]
fn long_key_pins_first_field_as_prefix() {
    let (mut board, transport) = board();
    let head = format!("§b{}", "K".repeat(14));
    let key = format!("{head}{}", "V".repeat(30));
    let entry = format!("§b{}", "V".repeat(30));

    board.create_line(&KeyedLine::new(7, key.as_str())).unwrap();
    assert_eq!(
        transport.take(),
        vec![
            ScorePacket::change(entry.as_str(), "board", 7).into(),
            TeamPacket::create("7", head.as_str(), "", entry.as_str()).into(),
        ]
    );

    board
        .set_value_with(7, &99, |value: &i32| value.to_string())
        .unwrap();
    assert_eq!(
        transport.take(),
        vec![TeamPacket::update("7", head.as_str(), "99", entry.as_str()).into()]
    );
}

#[test]
fn key_limits() {
    let (mut board, transport) = board();

    let err = board
        .create_line(&KeyedLine::new(0, "k".repeat(57)))
        .unwrap_err();
    assert!(matches!(err, BoardError::TextTooLong { limit: 56, .. }));

    let err = board
        .create_line(&KeyedLine::new(0, format!("§b{}", "k".repeat(54))))
        .unwrap_err();
    assert!(matches!(err, BoardError::LineTooLong { index: 0, max: 54 }));

    assert!(transport.take().is_empty());
}

#[test]
fn value_requires_static_key() {
    let (mut board, transport) = board();

    let err = board.set_value(2, "1").unwrap_err();
    assert!(matches!(err, BoardError::MissingStaticKey { index: 2 }));
    assert_eq!(err.kind(), ErrorKind::MissingStaticKey);

    board.set_line(2, "plain").unwrap();
    transport.take();
    assert!(matches!(
        board.set_value(2, "1"),
        Err(BoardError::MissingStaticKey { index: 2 })
    ));
    assert!(transport.take().is_empty());
}

#[test]
fn value_over_limit_is_rejected() {
    let (mut board, transport) = board();
    board.create_line(&KeyedLine::new(1, "Coins: ")).unwrap();
    transport.take();

    let err = board.set_value(1, &"9".repeat(17)).unwrap_err();
    assert!(matches!(err, BoardError::TextTooLong { limit: 16, .. }));
    assert!(transport.take().is_empty());
}

#[test]
fn plain_text_on_keyed_slot_is_rejected() {
    let (mut board, transport) = board();
    board.create_line(&KeyedLine::new(8, "Kills: ")).unwrap();
    transport.take();

    let err = board.set_line(8, "plain").unwrap_err();
    assert!(matches!(err, BoardError::KeyedLine { index: 8 }));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(transport.take().is_empty());
    assert_eq!(board.slot_mode(8), Some(SlotMode::Keyed));
}

#[test]
fn keyed_line_replaces_occupied_slot() {
    let (mut board, transport) = board();
    board.set_line(1, "old").unwrap();
    transport.take();

    board.create_line(&KeyedLine::new(1, "Kills: ")).unwrap();
    assert_eq!(
        transport.take(),
        vec![
            TeamPacket::remove("1").into(),
            ScorePacket::remove("§1").into(),
            ScorePacket::change("Kills: ", "board", 1).into(),
            TeamPacket::create("1", "", "", "Kills: ").into(),
        ]
    );
}

#[test]
fn duplicate_keyed_entries_are_rejected() {
    let (mut board, transport) = board();
    board.create_line(&KeyedLine::new(1, "Kills")).unwrap();
    transport.take();

    let err = board
        .create_line(&KeyedLine::new(2, "Kills"))
        .unwrap_err();
    assert!(matches!(err, BoardError::DuplicateEntry { other: 1, .. }));
    assert!(transport.take().is_empty());

    // Re-creating the same slot with its own key is fine.
    board.create_line(&KeyedLine::new(1, "Kills")).unwrap();
}

#[test]
fn destroy_removes_lines_then_objective() {
    let (mut board, transport) = board();
    board.set_title("Title").unwrap();
    board.set_line(0, "a").unwrap();
    board.set_line(2, "b").unwrap();
    transport.take();

    board.destroy().unwrap();
    assert_eq!(
        transport.take(),
        vec![
            TeamPacket::remove("0").into(),
            ScorePacket::remove("§0").into(),
            TeamPacket::remove("2").into(),
            ScorePacket::remove("§2").into(),
            ObjectivePacket::delete("board").into(),
            display(),
        ]
    );
    assert!(!board.has_objective());
    assert_eq!(board.occupied().count(), 0);

    board.destroy().unwrap();
    assert!(transport.take().is_empty());
}

#[test]
fn destroy_without_title_only_removes_lines() {
    let (mut board, transport) = board();
    board.set_line(6, "a").unwrap();
    transport.take();

    board.destroy().unwrap();
    assert_eq!(
        transport.take(),
        vec![
            TeamPacket::remove("6").into(),
            ScorePacket::remove("§6").into(),
        ]
    );
}

#[test]
fn failed_team_create_is_retried_as_create() {
    let (mut board, transport) = board();

    transport.fail_teams(true);
    let err = board.set_line(6, "hi").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PacketBuildFailure);
    assert_eq!(
        transport.take(),
        vec![ScorePacket::change("§6", "board", 6).into()]
    );
    let slot = board.line(6).unwrap();
    assert_eq!(slot.entry(), Some("§6"));
    assert!(!slot.has_been_created());

    transport.fail_teams(false);
    board.set_line(6, "hi").unwrap();
    assert_eq!(
        transport.take(),
        vec![TeamPacket::create("6", "hi", "", "§6").into()]
    );
}

#[test]
fn failed_objective_create_is_retried_as_create() {
    let (mut board, transport) = board();

    transport.fail_all(true);
    assert!(board.set_title("T").is_err());
    assert!(!board.has_objective());

    transport.fail_all(false);
    board.set_title("T").unwrap();
    assert_eq!(
        transport.take(),
        vec![ObjectivePacket::create("board", "T").into(), display()]
    );
}

#[test]
fn truncate_keeps_keyed_lines() {
    let (mut board, transport) = board();
    for index in [0, 1, 2, 4] {
        board.set_line(index, "x").unwrap();
    }
    board.create_line(&KeyedLine::new(3, "Key")).unwrap();
    transport.take();

    board.truncate_lines(2).unwrap();
    assert_eq!(
        transport.take(),
        vec![
            TeamPacket::remove("2").into(),
            ScorePacket::remove("§2").into(),
            TeamPacket::remove("4").into(),
            ScorePacket::remove("§4").into(),
        ]
    );
    assert_eq!(board.occupied().collect::<Vec<_>>(), vec![0, 1, 3]);
}
