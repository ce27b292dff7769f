use std::collections::HashSet;

use wise_mole_core::{Cell, CellCoord, Direction, Event, FieldSize};
use wise_mole_world::{query, World};

fn box_set(world: &World) -> HashSet<CellCoord> {
    query::boxes(world).iter().copied().collect()
}

fn pushing_level() -> World {
    World::from_level_text(&["WWWWWWW", "WMBFFFW", "WFFFFFW", "WWWWWWW"]).expect("level decodes")
}

#[test]
fn load_seeds_history_with_initial_state() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(!world.can_undo());
    assert!(!world.can_redo());
    assert!(!world.undo(&mut events));
    assert!(!world.redo(&mut events));
    assert!(events.is_empty());
}

#[test]
fn undo_after_push_restores_boxes_and_counters() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    let initial_boxes = box_set(&world);

    assert!(world.try_move(Direction::Right, &mut events));
    assert_eq!(query::step_with_load_count(&world), 1);

    assert!(world.undo(&mut events));

    assert_eq!(box_set(&world), initial_boxes);
    assert_eq!(query::mole_position(&world), Some(CellCoord::new(1, 1)));
    assert_eq!(query::step_count(&world), 0);
    assert_eq!(query::step_with_load_count(&world), 0);
    assert!(!world.can_undo());
    assert!(world.can_redo());
}

#[test]
fn undo_of_plain_walk_keeps_push_counter() {
    let mut world = pushing_level();
    let mut events = Vec::new();

    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.try_move(Direction::Down, &mut events));
    assert_eq!(query::step_count(&world), 2);

    assert!(world.undo(&mut events));
    assert_eq!(query::step_count(&world), 1);
    assert_eq!(query::step_with_load_count(&world), 1);
}

#[test]
fn undo_then_redo_round_trips_state() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.try_move(Direction::Right, &mut events));
    let mole = query::mole_position(&world);
    let boxes = box_set(&world);

    assert!(world.undo(&mut events));
    assert!(world.redo(&mut events));

    assert_eq!(query::mole_position(&world), mole);
    assert_eq!(box_set(&world), boxes);
    assert_eq!(query::step_count(&world), 2);
    assert_eq!(query::step_with_load_count(&world), 2);
}

#[test]
fn new_move_after_undo_discards_redo() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.undo(&mut events));
    assert!(world.can_redo());

    assert!(world.try_move(Direction::Down, &mut events));

    assert!(!world.can_redo());
    assert!(!world.redo(&mut events));
}

#[test]
fn undo_and_redo_notify_mole_moves() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Right, &mut events));
    events.clear();

    assert!(world.undo(&mut events));
    assert!(world.redo(&mut events));

    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        Event::MoleMoved {
            from: Some(_),
            to: Some(_),
            pushed_box: Some(_),
        }
    ));
    assert!(matches!(events[1], Event::MoleMoved { .. }));
}

#[test]
fn undo_never_erases_the_loaded_configuration() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    let initial = world.to_level_bytes();
    for _ in 0..3 {
        assert!(world.try_move(Direction::Right, &mut events));
    }
    while world.undo(&mut events) {}

    assert_eq!(world.to_level_bytes(), initial);
}

#[test]
fn resize_keeps_undo_from_restoring_the_mole_outside_the_field() {
    let mut world = World::from_level_text(&["FFFFM"]).expect("level decodes");
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Left, &mut events));

    world.set_field_size(FieldSize::new(4, 1), &mut events);

    assert!(!world.can_undo());
    assert!(!world.undo(&mut events));
    assert_eq!(query::mole_position(&world), Some(CellCoord::new(3, 0)));
    assert_eq!(world.to_level_bytes(), b"FFFM\n".to_vec());
    assert!(!world.try_move(Direction::Right, &mut events));
}

#[test]
fn resize_keeps_undo_from_restoring_dropped_boxes() {
    let mut world = World::from_level_text(&["FMFB"]).expect("level decodes");
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Left, &mut events));

    world.set_field_size(FieldSize::new(3, 1), &mut events);
    assert!(query::boxes(&world).is_empty());

    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.undo(&mut events));
    assert!(world.undo(&mut events));
    assert!(!world.undo(&mut events));

    assert_eq!(query::mole_position(&world), Some(CellCoord::new(0, 0)));
    assert!(query::boxes(&world).is_empty());
}

#[test]
fn resize_to_the_same_size_keeps_history() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Down, &mut events));

    world.set_field_size(FieldSize::new(7, 4), &mut events);

    assert!(world.undo(&mut events));
    assert_eq!(query::mole_position(&world), Some(CellCoord::new(1, 1)));
}

#[test]
fn undo_does_not_revert_editor_changes() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Right, &mut events));

    world.set_box_point(CellCoord::new(5, 2), true);
    assert!(!world.can_undo());

    assert!(world.try_move(Direction::Down, &mut events));
    assert!(world.undo(&mut events));
    assert!(!world.undo(&mut events));

    assert_eq!(query::mole_position(&world), Some(CellCoord::new(2, 1)));
    let expected: HashSet<CellCoord> = [CellCoord::new(3, 1), CellCoord::new(5, 2)]
        .into_iter()
        .collect();
    assert_eq!(box_set(&world), expected);
}

#[test]
fn painting_terrain_restarts_history() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Down, &mut events));

    world.set_cell(CellCoord::new(1, 1), Cell::Wall);

    assert!(!world.undo(&mut events));
    assert_eq!(query::mole_position(&world), Some(CellCoord::new(1, 2)));
}

#[test]
fn target_edits_keep_history() {
    let mut world = pushing_level();
    let mut events = Vec::new();
    assert!(world.try_move(Direction::Right, &mut events));

    world.set_target_point(CellCoord::new(4, 1), true);

    assert!(world.undo(&mut events));
    assert_eq!(query::target_points(&world), &[CellCoord::new(4, 1)]);
}
