use wise_mole_core::{BoxPush, CellCoord, Command, Direction, Event, FieldSize};
use wise_mole_world::{self as world, query, World};

fn load(lines: &[&str]) -> World {
    World::from_level_text(lines).expect("level decodes")
}

fn snapshot(world: &World) -> Vec<u8> {
    world.to_level_bytes()
}

#[test]
fn walls_and_field_edges_reject_moves_without_side_effects() {
    let mut world = load(&["MW", "WE"]);
    let before = snapshot(&world);
    let mut events = Vec::new();

    for direction in Direction::ALL {
        assert!(
            !world.try_move(direction, &mut events),
            "{direction:?} should be blocked"
        );
    }

    assert_eq!(snapshot(&world), before);
    assert_eq!(query::step_count(&world), 0);
    assert!(!world.can_undo());
    assert!(events.is_empty(), "rejected moves must not notify");
}

#[test]
fn outside_area_is_not_walkable() {
    let mut world = load(&["WWWW", "WMEW", "WWWW"]);
    let mut events = Vec::new();
    assert!(!world.try_move(Direction::Right, &mut events));
}

#[test]
fn box_cannot_be_pushed_into_wall_box_or_off_field() {
    let mut into_wall = load(&["WWWWW", "WMBWW", "WWWWW"]);
    let mut into_box = load(&["WWWWWW", "WMBBFW", "WWWWWW"]);
    let mut off_field = load(&["MB"]);
    let mut events = Vec::new();

    assert!(!into_wall.try_move(Direction::Right, &mut events));
    assert!(!into_box.try_move(Direction::Right, &mut events));
    assert!(!off_field.try_move(Direction::Right, &mut events));
    assert_eq!(query::boxes(&into_box), &[CellCoord::new(2, 1), CellCoord::new(3, 1)]);
    assert!(events.is_empty());
}

#[test]
fn push_relocates_box_and_reports_it() {
    let mut world = load(&["WWWWWW", "WMBFFW", "WWWWWW"]);
    let mut events = Vec::new();

    assert!(world.try_move(Direction::Right, &mut events));

    assert_eq!(query::mole_position(&world), Some(CellCoord::new(2, 1)));
    assert_eq!(query::boxes(&world), &[CellCoord::new(3, 1)]);
    assert_eq!(query::step_with_load_count(&world), 1);
    assert_eq!(
        events,
        vec![Event::MoleMoved {
            from: Some(CellCoord::new(1, 1)),
            to: Some(CellCoord::new(2, 1)),
            pushed_box: Some(BoxPush {
                from: CellCoord::new(2, 1),
                to: CellCoord::new(3, 1),
            }),
        }]
    );
}

#[test]
fn step_count_matches_successful_moves() {
    let mut world = load(&["WWWWWWW", "WFFMFFW", "WFFFFFW", "WWWWWWW"]);
    let mut events = Vec::new();
    let script = [
        Direction::Left,
        Direction::Down,
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Up,
    ];

    let successes = script
        .into_iter()
        .filter(|direction| world.try_move(*direction, &mut events))
        .count();

    assert_eq!(successes, 5, "second Down hits the wall");
    assert_eq!(query::step_count(&world), 5);
    assert_eq!(query::step_with_load_count(&world), 0);
}

#[test]
fn missing_mole_blocks_every_move() {
    let mut world = load(&["WWW", "WFW", "WWW"]);
    let mut events = Vec::new();

    assert_eq!(query::field_size(&world), FieldSize::new(3, 3));
    assert_eq!(query::mole_position(&world), None);
    assert!(query::boxes(&world).is_empty());
    for direction in Direction::ALL {
        assert!(!world.try_move(direction, &mut events));
    }
}

#[test]
fn win_requires_every_target_covered() {
    // Targets at (1,1) and (2,2); the spare box at (4,4) is irrelevant.
    let mut world = load(&[
        "WWWWWW", "WTBMFW", "WFTFFW", "WFBFFW", "WFFFBW", "WWWWWW",
    ]);
    let mut events = Vec::new();
    assert_eq!(
        query::target_points(&world),
        &[CellCoord::new(1, 1), CellCoord::new(2, 2)]
    );

    let script = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Down,
        Direction::Left,
    ];
    for direction in script {
        assert!(world.try_move(direction, &mut events), "{direction:?}");
    }
    assert!(!world.check_if_user_won());

    assert!(world.try_move(Direction::Up, &mut events));
    assert!(world.check_if_user_won());
    assert!(query::is_won(&world));
    let wins: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::UserWon { .. }))
        .collect();
    assert_eq!(wins, vec![&Event::UserWon { steps: 7 }]);
}

#[test]
fn moving_a_box_off_its_target_clears_the_win() {
    let mut world = load(&["WWWWWW", "WMBTFW", "WWWWWW"]);
    let mut events = Vec::new();

    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.check_if_user_won());
    assert_eq!(events.last(), Some(&Event::UserWon { steps: 1 }));

    assert!(world.try_move(Direction::Right, &mut events));
    assert!(!world.check_if_user_won());
    assert!(!query::is_won(&world));
}

#[test]
fn win_notification_fires_once_per_transition() {
    let mut world = load(&["WWWWWWW", "WMBTFFW", "WWWWWWW"]);
    let mut events = Vec::new();

    assert!(world.try_move(Direction::Right, &mut events));
    assert!(world.try_move(Direction::Left, &mut events));
    assert!(world.undo(&mut events));
    assert!(world.undo(&mut events));
    assert!(world.redo(&mut events));

    let wins: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::UserWon { .. }))
        .collect();
    assert_eq!(wins, vec![&Event::UserWon { steps: 1 }, &Event::UserWon { steps: 1 }]);
}

#[test]
fn resize_drops_only_out_of_bounds_actors() {
    let mut world = load(&["WWWWWW", "WFBFTW", "WFFFMW", "WWWWWW"]);
    let mut events = Vec::new();

    world.set_field_size(FieldSize::new(4, 3), &mut events);

    assert_eq!(query::field_size(&world), FieldSize::new(4, 3));
    assert_eq!(query::mole_position(&world), None);
    assert_eq!(query::boxes(&world), &[CellCoord::new(2, 1)]);
    assert!(query::target_points(&world).is_empty());
    assert_eq!(
        events,
        vec![Event::FieldResized {
            from: FieldSize::new(6, 4),
            to: FieldSize::new(4, 3),
        }]
    );
}

#[test]
fn resize_to_same_size_is_silent() {
    let mut world = load(&["WWW", "WMW", "WWW"]);
    let mut events = Vec::new();
    world.set_field_size(FieldSize::new(3, 3), &mut events);
    world.set_field_size(FieldSize::new(0, 3), &mut events);
    assert!(events.is_empty());
    assert_eq!(query::mole_position(&world), Some(CellCoord::new(1, 1)));
}

#[test]
fn editor_mutators_bypass_history() {
    let mut world = load(&["WWWWW", "WMFFW", "WWWWW"]);
    let mut events = Vec::new();

    for command in [
        Command::SetBox {
            cell: CellCoord::new(2, 1),
            enabled: true,
        },
        Command::SetBox {
            cell: CellCoord::new(2, 1),
            enabled: true,
        },
        Command::SetTarget {
            cell: CellCoord::new(3, 1),
            enabled: true,
        },
        Command::SetTarget {
            cell: CellCoord::new(1, 1),
            enabled: false,
        },
        Command::SetMolePosition {
            cell: Some(CellCoord::new(3, 1)),
        },
    ] {
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(query::boxes(&world), &[CellCoord::new(2, 1)]);
    assert_eq!(query::target_points(&world), &[CellCoord::new(3, 1)]);
    assert_eq!(query::mole_position(&world), Some(CellCoord::new(3, 1)));
    assert!(!world.can_undo());
    assert_eq!(query::step_count(&world), 0);
    assert!(events.is_empty());
}

#[test]
fn level_without_targets_is_solved_from_the_start() {
    let mut world = load(&["WWWW", "WMFW", "WWWW"]);
    let mut events = Vec::new();

    assert!(query::target_points(&world).is_empty());
    assert!(query::is_won(&world));
    assert!(world.try_move(Direction::Right, &mut events));

    assert!(world.check_if_user_won());
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::UserWon { .. })));
}
