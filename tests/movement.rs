use approx::assert_relative_eq;
use cgmath::{Point3, Vector3};
use voxel_world::{
    config::MovementConfig,
    engine_state::{
        player::{
            movement::{MovementController, MovementKeys},
            MovementState, Player,
        },
        voxels::{block::block_type::BlockType, chunk::WORLD_HEIGHT, world::World},
    },
};

/// A world with an open room over a stone floor at y = 9 spanning x and z in `-2..6`.
fn room() -> World {
    let mut world = World::with_seed(12);
    for z in -2..6 {
        for x in -2..6 {
            world.set_block(x, 9, z, BlockType::STONE);
            for y in 10..WORLD_HEIGHT {
                world.set_block(x, y, z, BlockType::AIR);
            }
        }
    }
    world
}

fn forward() -> MovementKeys {
    MovementKeys {
        forward: true,
        ..MovementKeys::default()
    }
}

fn tick(controller: &MovementController, player: &mut Player, world: &World, keys: &MovementKeys) {
    controller.tick(player, world, keys, Vector3::unit_x(), Vector3::unit_z());
}

#[test]
fn first_grounded_tick_reaches_the_acceleration_step() {
    let world = room();
    let controller = MovementController::default();
    let mut player = Player::new(Point3::new(0.5, 10.0, 0.5), &controller.config);
    player.on_ground = true;

    tick(&controller, &mut player, &world, &forward());

    assert_relative_eq!(player.velocity.x, 0.06, epsilon = 1e-6);
    assert_relative_eq!(player.velocity.y, 0.0);
    assert_relative_eq!(player.position.x, 0.56, epsilon = 1e-6);
    assert_relative_eq!(player.position.y, 10.0);
    assert_eq!(player.state(), MovementState::Grounded);
}

#[test]
fn falling_player_lands_on_top_of_the_floor() {
    let world = room();
    let controller = MovementController::default();
    let mut player = Player::new(Point3::new(1.5, 14.0, 1.5), &controller.config);

    let mut ticks = 0;
    while !player.on_ground {
        tick(&controller, &mut player, &world, &MovementKeys::default());
        ticks += 1;
        assert!(ticks < 200, "never landed");
    }

    assert_eq!(player.position.y, 10.0);
    assert_eq!(player.velocity.y, 0.0);

    // Grounded is recomputed every tick and stays set while standing
    tick(&controller, &mut player, &world, &MovementKeys::default());
    assert!(player.on_ground);
    assert_eq!(player.position.y, 10.0);
}

#[test]
fn walking_speed_converges_to_the_ground_cap() {
    let world = room();
    let controller = MovementController::default();
    let mut player = Player::new(Point3::new(-1.5, 10.0, 0.5), &controller.config);
    player.on_ground = true;

    let mut speeds = Vec::new();
    for _ in 0..8 {
        tick(&controller, &mut player, &world, &forward());
        speeds.push(player.velocity.x);
    }

    assert!(speeds.windows(2).all(|pair| pair[1] >= pair[0]));
    assert!(speeds.iter().all(|&speed| speed <= controller.config.ground_max_speed + 1e-6));
}

#[test]
fn walls_stop_horizontal_motion() {
    let mut world = room();
    world.set_block(2, 10, 0, BlockType::BRICKS);
    let controller = MovementController::default();
    let mut player = Player::new(Point3::new(1.5, 10.0, 0.5), &controller.config);
    player.on_ground = true;
    player.velocity = Vector3::new(0.3, 0.0, 0.0);

    tick(&controller, &mut player, &world, &forward());

    assert_eq!(player.velocity.x, 0.0);
    assert_eq!(player.position.x, 1.5);
}

#[test]
fn head_height_blocks_also_stop_the_player() {
    let mut world = room();
    world.set_block(2, 11, 0, BlockType::GLASS);
    let controller = MovementController::default();
    let mut player = Player::new(Point3::new(1.5, 10.0, 0.5), &controller.config);
    player.on_ground = true;
    player.velocity = Vector3::new(0.3, 0.0, 0.0);

    tick(&controller, &mut player, &world, &forward());

    assert_eq!(player.velocity.x, 0.0);
}

#[test]
fn block_just_above_a_whole_block_tall_player_is_clear() {
    let mut world = room();
    world.set_block(2, 12, 0, BlockType::GLASS);
    let controller = MovementController::new(MovementConfig {
        player_height: 2.0,
        ..MovementConfig::default()
    });
    let mut player = Player::new(Point3::new(1.5, 10.0, 0.5), &controller.config);
    player.on_ground = true;
    player.velocity = Vector3::new(0.3, 0.0, 0.0);

    tick(&controller, &mut player, &world, &forward());

    assert!(player.velocity.x > 0.0);
    assert!(player.position.x > 1.5);

    world.set_block(2, 11, 0, BlockType::GLASS);
    let mut blocked = Player::new(Point3::new(1.5, 10.0, 0.5), &controller.config);
    blocked.on_ground = true;
    blocked.velocity = Vector3::new(0.3, 0.0, 0.0);

    tick(&controller, &mut blocked, &world, &forward());

    assert_eq!(blocked.velocity.x, 0.0);
}

#[test]
fn diagonal_moves_only_probe_the_leading_column() {
    let mut world = room();
    world.set_block(1, 10, 1, BlockType::STONE);
    world.set_block(1, 11, 1, BlockType::STONE);
    let controller = MovementController::default();
    let mut player = Player::new(Point3::new(0.5, 10.0, 0.5), &controller.config);
    player.velocity = Vector3::new(0.3, 0.0, 0.3);

    tick(&controller, &mut player, &world, &MovementKeys::default());

    // Both axes are checked at the old perpendicular coordinate, so the corner
    // block is never probed and the box ends up overlapping it.
    assert_relative_eq!(player.position.x, 0.8, epsilon = 1e-6);
    assert_relative_eq!(player.position.z, 0.8, epsilon = 1e-6);
    assert!(player.intersects_block(Point3::new(1, 10, 1)));
}

#[test]
fn jumping_leaves_the_ground_and_comes_back() {
    let world = room();
    let controller = MovementController::new(MovementConfig::default());
    let mut player = Player::new(Point3::new(0.5, 10.0, 0.5), &controller.config);
    player.on_ground = true;

    let jump = MovementKeys {
        jump: true,
        ..MovementKeys::default()
    };
    tick(&controller, &mut player, &world, &jump);
    assert_eq!(player.state(), MovementState::Airborne);
    assert!(player.position.y > 10.0);

    let mut ticks = 0;
    while !player.on_ground {
        tick(&controller, &mut player, &world, &MovementKeys::default());
        ticks += 1;
        assert!(ticks < 200, "never landed");
    }
    assert_eq!(player.position.y, 10.0);
}
