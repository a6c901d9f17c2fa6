use std::time::Instant;

use ddexplorer::dataset::record::RawDive;
use ddexplorer::dataset::{Board, Event, RecordStore};
use ddexplorer::filter::{visible_records, FilterState};

fn dive(board: Board, group: u8, number: u32, slots: [&str; 4]) -> RawDive {
    RawDive {
        event: board.event(),
        board,
        group,
        dive_number: number,
        dive_description: format!("dive {number}"),
        a: slots[0].to_string(),
        b: slots[1].to_string(),
        c: slots[2].to_string(),
        d: slots[3].to_string(),
    }
}

fn numbers(store: &RecordStore, filters: &FilterState) -> Vec<u32> {
    visible_records(store, filters)
        .iter()
        .map(|record| record.dive_number())
        .collect()
}

fn commit_dd_limit(filters: &mut FilterState, text: &str) {
    filters.set_dd_limit_input(text, Instant::now());
    filters.apply_dd_limit();
}

#[test]
fn dd_limit_and_ignore_a_scenario() {
    let store = RecordStore::from_raw(vec![dive(
        Board::OneMetre,
        1,
        101,
        ["1.2", "-", "x", "1.5"],
    )]);
    let mut filters = FilterState::default();
    assert_eq!(numbers(&store, &filters), vec![101]);

    commit_dd_limit(&mut filters, "1.3");
    assert_eq!(numbers(&store, &filters), vec![101]);

    commit_dd_limit(&mut filters, "1.0");
    assert!(numbers(&store, &filters).is_empty());

    commit_dd_limit(&mut filters, "1.3");
    filters.toggle_ignore_a_dives();
    assert!(numbers(&store, &filters).is_empty());
}

#[test]
fn group_toggle_collapses_to_single_group() {
    let store = RecordStore::from_raw(
        (1..=6)
            .map(|group| dive(Board::ThreeMetre, group, u32::from(group) * 100 + 1, ["2.0"; 4]))
            .collect(),
    );
    let mut filters = FilterState::default();
    assert_eq!(numbers(&store, &filters).len(), 6);

    filters.toggle_group(4);
    assert_eq!(numbers(&store, &filters), vec![401]);

    filters.toggle_group(4);
    assert!(numbers(&store, &filters).is_empty());
}

#[test]
fn selecting_springboard_prunes_platform_boards() {
    let mut filters = FilterState::default();
    filters.toggle_board(Board::ThreeMetre);
    filters.toggle_board(Board::FiveMetre);
    filters.toggle_board(Board::TenMetre);

    filters.select_event(Event::Springboard);
    assert_eq!(
        filters.boards().iter().copied().collect::<Vec<_>>(),
        vec![Board::ThreeMetre]
    );
    assert_eq!(
        filters.available_boards(),
        vec![Board::OneMetre, Board::ThreeMetre]
    );
}

#[test]
fn sort_is_board_then_group_then_number() {
    let store = RecordStore::from_raw(vec![
        dive(Board::TenMetre, 1, 101, ["1.4"; 4]),
        dive(Board::ThreeMetre, 2, 203, ["2.0"; 4]),
        dive(Board::ThreeMetre, 1, 105, ["2.4"; 4]),
        dive(Board::OneMetre, 4, 401, ["1.5"; 4]),
        dive(Board::ThreeMetre, 1, 101, ["1.6"; 4]),
    ]);
    let boards: Vec<(Board, u32)> = visible_records(&store, &FilterState::default())
        .iter()
        .map(|r| (r.board(), r.dive_number()))
        .collect();
    assert_eq!(
        boards,
        vec![
            (Board::OneMetre, 401),
            (Board::ThreeMetre, 101),
            (Board::ThreeMetre, 105),
            (Board::ThreeMetre, 203),
            (Board::TenMetre, 101),
        ]
    );
}

#[test]
fn pipeline_is_idempotent() {
    let store = RecordStore::from_json(ddexplorer::dataset::BUNDLED_DATA).unwrap();
    let mut filters = FilterState::default();
    filters.select_event(Event::Platform);
    filters.toggle_hide_impossible();

    let first = numbers(&store, &filters);
    let second = numbers(&store, &filters);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn head_first_and_hide_impossible() {
    let store = RecordStore::from_raw(vec![
        dive(Board::OneMetre, 5, 5412, ["x", "x", "x", "x"]),
        dive(Board::OneMetre, 1, 101, ["1.4", "1.3", "1.2", "-"]),
        dive(Board::OneMetre, 1, 102, ["1.6", "1.5", "1.4", "-"]),
    ]);
    let mut filters = FilterState::default();
    filters.toggle_hide_impossible();
    assert_eq!(numbers(&store, &filters), vec![101, 102]);

    filters.toggle_head_first_only();
    assert_eq!(numbers(&store, &filters), vec![101]);
}

#[test]
fn dd_min_window() {
    let store = RecordStore::from_raw(vec![
        dive(Board::ThreeMetre, 1, 101, ["1.6", "1.5", "1.4", "-"]),
        dive(Board::ThreeMetre, 1, 107, ["-", "3.1", "2.8", "-"]),
    ]);
    let mut filters = FilterState::default();
    filters.set_dd_min_input("3.0", Instant::now());
    filters.apply_dd_min();
    assert_eq!(numbers(&store, &filters), vec![107]);

    commit_dd_limit(&mut filters, "2.9");
    // 107 has 3.1 >= 3.0 and 2.8 <= 2.9; the bounds need not hold on the same slot.
    assert_eq!(numbers(&store, &filters), vec![107]);
}

#[test]
fn unparseable_dive_number_means_no_filter() {
    let store = RecordStore::from_raw(vec![
        dive(Board::OneMetre, 1, 101, ["1.4"; 4]),
        dive(Board::OneMetre, 1, 103, ["2.0"; 4]),
    ]);
    let mut filters = FilterState::default();
    filters.set_dive_number_input("12.5", Instant::now());
    filters.apply_dive_number();
    assert_eq!(filters.dive_number(), None);
    assert_eq!(numbers(&store, &filters), vec![101, 103]);
}
