//! Integration tests for roster intake: text/CSV import, duplicates, dedupe.

use lucky_draw_web::{
    add_from_rows, add_from_text, dedupe_by_name, detect_duplicates, DrawSession, Participant,
};

fn session_with_names(names: &[&str]) -> DrawSession {
    let roster: Vec<Participant> = names.iter().map(|n| Participant::new(*n)).collect();
    DrawSession::with_roster(roster, false)
}

#[test]
fn add_from_text_splits_on_newlines_and_commas() {
    let mut s = DrawSession::new(false);
    let added = add_from_text(&mut s, "  Alice \nBob ,  , Carol\n\n王小明");
    let names: Vec<&str> = added.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol", "王小明"]);
    assert_eq!(s.roster.len(), 4);
}

#[test]
fn add_from_text_never_produces_empty_or_untrimmed_names() {
    let mut s = DrawSession::new(false);
    add_from_text(&mut s, " , ,\n\t\n  Dave  ,,");
    for p in &s.roster {
        assert!(!p.name.is_empty());
        assert_eq!(p.name, p.name.trim());
    }
    assert_eq!(s.roster.len(), 1);
}

#[test]
fn add_from_text_all_empty_input_adds_nothing() {
    let mut s = DrawSession::new(false);
    let added = add_from_text(&mut s, "  \n , \n");
    assert!(added.is_empty());
    assert!(s.roster.is_empty());
}

#[test]
fn add_from_text_is_not_idempotent() {
    let mut s = DrawSession::new(false);
    add_from_text(&mut s, "Alice\nBob");
    add_from_text(&mut s, "Alice\nBob");
    assert_eq!(s.roster.len(), 4);
}

#[test]
fn add_from_text_assigns_fresh_unique_ids() {
    let mut s = DrawSession::new(false);
    add_from_text(&mut s, "Alice\nAlice\nAlice");
    let ids: std::collections::HashSet<_> = s.roster.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn add_from_rows_flattens_cells_in_order() {
    let mut s = DrawSession::new(false);
    let rows = vec![
        vec!["Alice".to_string(), " Bob ".to_string()],
        vec![String::new()],
        vec!["Carol".to_string()],
    ];
    let added = add_from_rows(&mut s, &rows);
    let names: Vec<&str> = added.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);
}

#[test]
fn detect_duplicates_empty_iff_names_distinct() {
    let s = session_with_names(&["Alice", "Bob", "Carol"]);
    assert!(detect_duplicates(&s).is_empty());

    let s = session_with_names(&["Alice", "Bob", "Alice"]);
    let dupes = detect_duplicates(&s);
    assert_eq!(dupes.len(), 1);
    assert!(dupes.contains("Alice"));
}

#[test]
fn detect_duplicates_reports_names_not_ids() {
    // Three copies of one name, two of another.
    let s = session_with_names(&["A", "A", "A", "B", "B", "C"]);
    let dupes = detect_duplicates(&s);
    assert_eq!(dupes.len(), 2);
    assert!(dupes.contains("A"));
    assert!(dupes.contains("B"));
}

#[test]
fn dedupe_keeps_first_occurrence_in_order() {
    let mut s = session_with_names(&["A", "B", "A", "C", "B"]);
    let first_a = s.roster[0].id;
    let first_b = s.roster[1].id;

    dedupe_by_name(&mut s);

    let names: Vec<&str> = s.roster.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(s.roster[0].id, first_a);
    assert_eq!(s.roster[1].id, first_b);
    assert!(detect_duplicates(&s).is_empty());
}

#[test]
fn dedupe_is_idempotent() {
    let mut s = session_with_names(&["A", "A", "B"]);
    dedupe_by_name(&mut s);
    let after_once = s.roster.clone();
    dedupe_by_name(&mut s);
    assert_eq!(s.roster, after_once);
}

#[test]
fn dedupe_prunes_dropped_winner_and_clears_groups() {
    let mut s = session_with_names(&["A", "A", "B"]);
    // The second "A" won earlier; dedupe drops that participant.
    let second_a = s.roster[1].clone();
    s.winners.push(second_a);
    s.groups = vec![s.roster.clone()];

    dedupe_by_name(&mut s);

    assert!(s.winners.is_empty());
    assert!(s.groups.is_empty());
}

#[test]
fn remove_unknown_id_is_a_noop() {
    let mut s = session_with_names(&["Alice", "Bob"]);
    s.remove_participant(uuid::Uuid::new_v4());
    assert_eq!(s.roster.len(), 2);
}

#[test]
fn remove_by_id_drops_only_that_participant() {
    let mut s = session_with_names(&["Alice", "Bob", "Carol"]);
    let bob = s.roster[1].id;
    s.remove_participant(bob);
    let names: Vec<&str> = s.roster.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Carol"]);
}

#[test]
fn remove_prunes_winner_record() {
    let mut s = session_with_names(&["Alice", "Bob"]);
    let alice = s.roster[0].clone();
    s.winners.push(alice.clone());
    s.remove_participant(alice.id);
    assert!(s.winners.is_empty());
}

#[test]
fn clear_all_empties_everything() {
    let mut s = session_with_names(&["Alice", "Bob"]);
    s.winners.push(s.roster[0].clone());
    s.groups = vec![s.roster.clone()];
    s.clear_all();
    assert!(s.roster.is_empty());
    assert!(s.winners.is_empty());
    assert!(s.groups.is_empty());
}
