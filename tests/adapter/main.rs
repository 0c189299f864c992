//! Integration tests for EntityAdapter mutation and selector behavior.


use std::collections::HashSet;

use entity_adapter::{
    AdapterConfig, AddManyMode, EntityAdapter, EntityState, Patch, PatchFn, StateSnapshot, Update,
};
use records::{Page, Row, RowPatch, Todo, TodoPatch};

fn rows() -> EntityAdapter<String, Row> {
    EntityAdapter::for_entity()
}

fn sorted_rows() -> EntityAdapter<String, Row> {
    EntityAdapter::new(
        AdapterConfig::new(|row: &Row| row.id.clone())
            .with_sort_by(|a: &Row, b: &Row| a.x.cmp(&b.x)),
    )
}

fn key_sets_match(state: &EntityState<String, Row>) -> bool {
    let ids: HashSet<&String> = state.ids.iter().collect();
    let keys: HashSet<&String> = state.entities.keys().collect();
    ids == keys
}

#[test]
fn invariant_holds_without_add_many() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();

    adapter.add_one(&mut state, Row::new("a", 1, 1));
    adapter.add_one(&mut state, Row::new("b", 2, 2));
    assert!(key_sets_match(&state));

    adapter.set_one(&mut state, Row::new("c", 3, 3));
    assert!(key_sets_match(&state));

    adapter.update_one(&mut state, Update::new("a".to_string(), PatchFn(|r: &mut Row| r.x = 10)));
    assert!(key_sets_match(&state));

    adapter.remove_one(&mut state, "b");
    assert!(key_sets_match(&state));

    adapter.add_one(&mut state, Row::new("d", 4, 4));
    adapter.remove_all(&mut state, &["a".to_string(), "zz".to_string()]);
    assert!(key_sets_match(&state));
    assert!(state.is_consistent());
    assert_eq!(adapter.get_selector(&state).get_ids(), vec!["d".to_string()]);
}

#[test]
fn add_one_is_idempotent() {
    let adapter = rows();
    let mut once = adapter.get_empty_state();
    let mut twice = adapter.get_empty_state();
    let row = Row::new("a", 1, 2);

    adapter.add_one(&mut once, row.clone());
    adapter.add_one(&mut twice, row.clone());
    adapter.add_one(&mut twice, row);

    assert_eq!(once, twice);
    assert_eq!(twice.ids.len(), 1);
}

#[test]
fn update_one_is_a_shallow_partial_merge() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 2));

    adapter.update_one(
        &mut state,
        Update::new(
            "a".to_string(),
            RowPatch {
                x: Some(5),
                ..Default::default()
            },
        ),
    );

    let selector = adapter.get_selector(&state);
    assert_eq!(selector.select_one("a"), Some(&Row::new("a", 5, 2)));
}

#[test]
fn update_replaces_nested_values_wholesale() {
    let adapter: EntityAdapter<u32, Todo> = EntityAdapter::for_entity();
    let mut state = adapter.get_empty_state();
    let mut todo = Todo::new(1, "write tests");
    todo.tags = vec!["work".into(), "rust".into()];
    adapter.add_one(&mut state, todo);

    adapter.update_one(
        &mut state,
        Update::new(
            1,
            TodoPatch {
                tags: Some(vec!["home".into()]),
                done: Some(true),
                ..Default::default()
            },
        ),
    );

    let stored = &state.entities[&1u32];
    assert_eq!(stored.tags, vec!["home".to_string()]);
    assert!(stored.done);
    assert_eq!(stored.title, "write tests");
    assert_eq!(stored.created_by, "alice");
}

#[test]
fn update_many_applies_each_payload_independently() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 1));
    adapter.add_one(&mut state, Row::new("b", 2, 2));

    adapter.update_many(
        &mut state,
        vec![
            Update::new("a".to_string(), RowPatch { y: Some(9), ..Default::default() }),
            Update::new("nope".to_string(), RowPatch { y: Some(9), ..Default::default() }),
            Update::new("b".to_string(), RowPatch { x: Some(7), ..Default::default() }),
        ],
    );

    assert_eq!(state.entities["a"], Row::new("a", 1, 9));
    assert_eq!(state.entities["b"], Row::new("b", 7, 2));
    assert_eq!(state.len(), 2);
}

#[test]
fn set_one_with_unknown_id_changes_nothing() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 1));
    let before = state.clone();

    adapter.set_one(&mut state, Row::new("ghost", 0, 0));

    assert_eq!(state, before);
    assert_eq!(state.ids.len(), 1);
    assert_eq!(state.entities.len(), 1);
}

#[test]
fn set_many_is_partial() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 1));

    adapter.set_many(&mut state, vec![Row::new("a", 2, 2), Row::new("b", 3, 3)]);

    assert_eq!(state.entities["a"], Row::new("a", 2, 2));
    assert!(adapter.get_selector(&state).select_one("b").is_none());
}

#[test]
fn select_all_sorts_on_read_and_ids_keep_insertion_order() {
    let adapter = sorted_rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("three", 3, 0));
    adapter.add_one(&mut state, Row::new("one", 1, 0));
    adapter.add_one(&mut state, Row::new("two", 2, 0));

    let selector = adapter.get_selector(&state);
    let xs: Vec<i32> = selector.select_all().iter().map(|row| row.x).collect();
    assert_eq!(xs, vec![1, 2, 3]);
    assert_eq!(selector.get_ids(), vec!["three", "one", "two"]);

    // Stored order never changes.
    assert_eq!(state.entities.keys().collect::<Vec<_>>(), vec!["three", "one", "two"]);
}

#[test]
fn select_all_returns_a_fresh_sequence() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 1));
    adapter.add_one(&mut state, Row::new("b", 2, 2));

    let selector = adapter.get_selector(&state);
    let mut first = selector.select_all();
    first.clear();

    assert_eq!(selector.select_all().len(), 2);
}

#[test]
fn add_many_replace_mode_leaves_stale_ids() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 1));
    adapter.add_one(&mut state, Row::new("b", 2, 2));

    adapter.add_many(&mut state, vec![Row::new("c", 3, 3)]);

    let selector = adapter.get_selector(&state);
    assert_eq!(selector.get_ids(), vec!["a", "b"]);
    assert_eq!(selector.select_all(), vec![&Row::new("c", 3, 3)]);
    assert!(selector.select_one("a").is_none());
    assert!(!state.is_consistent());
}

#[test]
fn add_many_unify_mode_keeps_ids_in_sync() {
    let adapter = EntityAdapter::new(
        AdapterConfig::new(|row: &Row| row.id.clone()).with_add_many_mode(AddManyMode::Unify),
    );
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 1));
    adapter.add_one(&mut state, Row::new("b", 2, 2));

    adapter.add_many(&mut state, vec![Row::new("c", 3, 3)]);

    let selector = adapter.get_selector(&state);
    assert_eq!(selector.get_ids(), vec!["c"]);
    assert_eq!(selector.select_all(), vec![&Row::new("c", 3, 3)]);
    assert!(state.is_consistent());
}

#[test]
fn remove_all_ignores_missing_ids() {
    let adapter = rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("a", 1, 1));
    adapter.add_one(&mut state, Row::new("b", 2, 2));

    adapter.remove_all(&mut state, &["a".to_string(), "x".to_string()]);

    assert_eq!(adapter.get_selector(&state).get_ids(), vec!["b"]);
    assert!(!state.entities.contains_key("a"));
    assert!(state.is_consistent());
}

#[test]
fn one_adapter_serves_many_stores() {
    let adapter = rows();
    let mut left = adapter.get_empty_state();
    let mut right = adapter.get_empty_state();

    adapter.add_one(&mut left, Row::new("a", 1, 1));
    adapter.add_one(&mut right, Row::new("b", 2, 2));

    assert_eq!(adapter.get_selector(&left).get_ids(), vec!["a"]);
    assert_eq!(adapter.get_selector(&right).get_ids(), vec!["b"]);
}

#[test]
fn initial_state_embeds_host_fields() {
    let adapter = rows();
    let mut state = adapter.get_initial_state(Page {
        loading: true,
        error: None,
    });

    adapter.add_one(&mut state, Row::new("a", 1, 2));
    state.extra.loading = false;

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["loading"], serde_json::json!(false));
    assert_eq!(json["ids"], serde_json::json!(["a"]));
    assert_eq!(json["entities"]["a"]["x"], serde_json::json!(1));

    let (page, inner) = state.into_parts();
    assert_eq!(page, Page::default());
    assert_eq!(inner.len(), 1);
}

#[test]
fn derived_entity_uses_marked_field() {
    let adapter: EntityAdapter<u32, Todo> = EntityAdapter::for_entity();
    assert_eq!(adapter.select_id(&Todo::new(42, "answer")), 42);
}

#[test]
fn snapshot_survives_json_transport() {
    let adapter = sorted_rows();
    let mut state = adapter.get_empty_state();
    adapter.add_one(&mut state, Row::new("b", 2, 0));
    adapter.add_one(&mut state, Row::new("a", 1, 0));

    let json = adapter.snapshot(&state).unwrap().to_json().unwrap();
    let snapshot = StateSnapshot::from_json(&json).unwrap();
    let restored = adapter.restore(&snapshot).unwrap();

    assert_eq!(restored, state);
    assert_eq!(adapter.get_selector(&restored).get_ids(), vec!["b", "a"]);
}

#[test]
fn patch_trait_is_usable_directly() {
    let mut row = Row::new("a", 1, 1);
    RowPatch {
        y: Some(3),
        ..Default::default()
    }
    .apply(&mut row);
    assert_eq!(row, Row::new("a", 1, 3));
}
