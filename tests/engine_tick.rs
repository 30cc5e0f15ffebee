use voxel_world::{
    config::WorldConfig,
    engine_state::{
        player::movement::MovementKeys,
        rendering::{RecordingSink, SinkEvent},
        voxels::block::block_type::BlockType,
        BlockEdit, EngineState, PlayerAction,
    },
};

fn engine(render_distance: i32, eviction_margin: i32) -> EngineState {
    let config = WorldConfig {
        seed: Some(1234),
        render_distance,
        eviction_margin,
        ..WorldConfig::default()
    };
    let mut engine = EngineState::new(config);
    let rows = engine.load_world().count();
    assert_eq!(rows, (2 * render_distance + 1) as usize);
    engine
}

fn look_down() -> PlayerAction {
    PlayerAction {
        rotate_view: Some((0.0, 1.0e4)),
        ..PlayerAction::default()
    }
}

#[test]
fn meshes_are_disposed_exactly_once_while_travelling() {
    let mut engine = engine(1, 0);
    let mut sink = RecordingSink::new();

    engine.tick(
        &PlayerAction {
            toggle_fly: true,
            ..PlayerAction::default()
        },
        &mut sink,
    );
    let fly_forward = PlayerAction {
        keys: MovementKeys {
            forward: true,
            ..MovementKeys::default()
        },
        ..PlayerAction::default()
    };

    let mut evicted = 0;
    for _ in 0..200 {
        evicted += engine.tick(&fly_forward, &mut sink).evicted;
    }

    assert!(evicted > 0);
    assert_eq!(sink.violations(), 0);
    assert_eq!(sink.submitted(), sink.disposed() + sink.live_meshes());
    assert_eq!(engine.world.len(), 9);

    // Every live mesh belongs to a loaded chunk
    let live: Vec<_> = sink
        .events()
        .iter()
        .filter_map(|event| match event {
            SinkEvent::Submitted { position, .. } => Some(*position),
            _ => None,
        })
        .filter(|&position| sink.has_mesh(position))
        .collect();
    assert!(live.iter().all(|&position| engine.world.contains_chunk(position)));
}

#[test]
fn breaking_remeshes_the_chunk() {
    let mut engine = engine(1, 1);
    let mut sink = RecordingSink::new();
    engine.tick(&PlayerAction::default(), &mut sink);
    sink.clear_events();

    let feet = engine.player.position;
    let below = (feet.x.floor() as i32, feet.y as i32 - 1, feet.z.floor() as i32);
    let report = engine.tick(
        &PlayerAction {
            primary: true,
            ..look_down()
        },
        &mut sink,
    );

    assert_eq!(
        report.edit,
        Some(BlockEdit::Broke(cgmath::Point3::new(below.0, below.1, below.2)))
    );
    assert!(engine.world.get_block(below.0, below.1, below.2).is_air());
    assert!(report.mesh.rebuilt >= 1);
    assert!(sink.disposed() >= 1);
    assert_eq!(sink.violations(), 0);
}

#[test]
fn placing_stacks_the_selected_blocks() {
    let mut engine = engine(1, 1);
    let mut sink = RecordingSink::new();

    engine.tick(
        &PlayerAction {
            toggle_fly: true,
            ..look_down()
        },
        &mut sink,
    );
    let rise = PlayerAction {
        keys: MovementKeys {
            jump: true,
            ..MovementKeys::default()
        },
        ..PlayerAction::default()
    };
    for _ in 0..6 {
        engine.tick(&rise, &mut sink);
    }

    let column = (
        engine.player.position.x.floor() as i32,
        engine.player.position.z.floor() as i32,
    );
    let top = engine.world.surface_height(column.0, column.1).unwrap();

    let first = engine.tick(
        &PlayerAction {
            secondary: true,
            ..PlayerAction::default()
        },
        &mut sink,
    );
    assert_eq!(
        first.edit,
        Some(BlockEdit::Placed(
            cgmath::Point3::new(column.0, top + 1, column.1),
            BlockType::STONE
        ))
    );

    let second = engine.tick(
        &PlayerAction {
            secondary: true,
            hotbar_slot: Some(8),
            ..PlayerAction::default()
        },
        &mut sink,
    );
    assert_eq!(
        second.edit,
        Some(BlockEdit::Placed(
            cgmath::Point3::new(column.0, top + 2, column.1),
            BlockType::BRICKS
        ))
    );
    assert_eq!(engine.world.surface_height(column.0, column.1), Some(top + 2));
}
