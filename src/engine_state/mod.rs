//! # Engine State Module
//!
//! The tick context that ties the voxel world, the player and the renderer together.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera orientation, projection and frustum culling
//! * `player` - Player body, movement physics and block picking
//! * `rendering` - Greedy meshing and the render sink interface
//! * `voxels` - Blocks, chunks, terrain generation and the world store
//!
//! ## Tick Order
//!
//! Each call to [`EngineState::tick`] runs, in order: mouse look, fly toggle,
//! movement, camera follow, active region update (generation and eviction),
//! hotbar selection, block break/place, and finally remeshing of dirty visible
//! chunks together with visibility updates. Everything runs on the caller's
//! thread; the only place that yields is the initial [`WorldLoader`].

use cgmath::Point3;
use log::{debug, info};
use winit::{event::MouseButton, keyboard::KeyCode};

use camera_state::{CameraState, ViewSource};
use player::{
    movement::{MovementController, MovementKeys},
    raycast::{pick, PickResult},
    Player,
};
use rendering::{MeshManager, MeshUpdate, RenderSink};
use voxels::{
    block::block_type::BlockType,
    chunk::WORLD_HEIGHT,
    coords::ChunkCoord,
    loader::WorldLoader,
    world::World,
};

use crate::{application_state::input_state::ProcessedInputState, config::WorldConfig};

pub mod camera_state;
pub mod player;
pub mod rendering;
pub mod voxels;

/// Default render distance in chunks (Chebyshev radius around the player).
pub const RENDER_DISTANCE: i32 = 8;
/// Default extra chunks kept past the render distance before eviction.
pub const EVICTION_MARGIN: i32 = 2;

const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

/// Hotbar keys, in slot order.
const HOTBAR_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Represents player actions derived from input
///
/// Movement keys are level-triggered (held), everything else fires on the
/// frame the key or button goes down.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerAction {
    /// Movement keys held this tick
    pub keys: MovementKeys,
    /// View rotation in pixels, only while the pointer is locked
    pub rotate_view: Option<(f64, f64)>,
    /// Toggle fly mode
    pub toggle_fly: bool,
    /// Zero-based hotbar slot selected this tick
    pub hotbar_slot: Option<usize>,
    /// Break the picked block
    pub primary: bool,
    /// Place the selected block against the picked face
    pub secondary: bool,
}

impl PlayerAction {
    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    pub fn from_processed_input(input: &ProcessedInputState) -> Self {
        let keys = MovementKeys {
            forward: input.get_key_state(KeyCode::KeyW).is_active(),
            back: input.get_key_state(KeyCode::KeyS).is_active(),
            left: input.get_key_state(KeyCode::KeyA).is_active(),
            right: input.get_key_state(KeyCode::KeyD).is_active(),
            jump: input.get_key_state(KeyCode::Space).is_active(),
            down: input.get_key_state(KeyCode::ShiftLeft).is_active(),
        };

        // Digit keys pressed together pick the lowest slot
        let hotbar_slot = HOTBAR_KEYS
            .iter()
            .position(|&key| input.get_key_state(key).is_just_pressed());

        PlayerAction {
            keys,
            rotate_view: input.get_mouse_delta().filter(|_| input.pointer_locked),
            toggle_fly: input.get_key_state(KeyCode::KeyF).is_just_pressed(),
            hotbar_slot,
            primary: input.get_mouse_button_state(MouseButton::Left).is_just_pressed(),
            secondary: input.get_mouse_button_state(MouseButton::Right).is_just_pressed(),
        }
    }
}

/// A block change made by the player during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEdit {
    /// The block at this position was replaced by air
    Broke(Point3<i32>),
    /// A block of this type was placed at this position
    Placed(Point3<i32>, BlockType),
}

/// What a single tick did.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Chunks evicted this tick
    pub evicted: usize,
    /// The break or place performed this tick
    pub edit: Option<BlockEdit>,
    /// Remeshing work
    pub mesh: MeshUpdate,
}

/// The main state container for the voxel engine
///
/// Owns the world and the player and advances both one fixed step per call to
/// [`EngineState::tick`].
///
/// # Examples
///
/// ```
/// use voxel_world::{
///     config::WorldConfig,
///     engine_state::{rendering::NullSink, EngineState, PlayerAction},
/// };
///
/// let config = WorldConfig { seed: Some(3), render_distance: 1, ..WorldConfig::default() };
/// let mut engine = EngineState::new(config);
/// engine.load_world().for_each(drop);
///
/// let mut sink = NullSink;
/// engine.tick(&PlayerAction::default(), &mut sink);
/// assert_eq!(engine.world.len(), 9);
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    pub world: World,
    /// The player's body
    pub player: Player,
    /// Camera state managing orientation and culling
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    movement: MovementController,
    mesh_manager: MeshManager,
    config: WorldConfig,
    selected_block: BlockType,
}

impl EngineState {
    /// Creates the world for the configured seed and spawns the player.
    ///
    /// Only the spawn chunk is generated here; the rest of the active region
    /// comes from [`EngineState::load_world`] or the first tick.
    pub fn new(config: WorldConfig) -> Self {
        let seed = config.resolved_seed();
        info!("Creating world with seed {}", seed);

        let world = World::with_seed(seed);
        let player = Player::new(Point3::new(0.0, 0.0, 0.0), &config.movement);
        let camera_state = CameraState::new(
            player.eye_position(),
            DEFAULT_VIEWPORT.0,
            DEFAULT_VIEWPORT.1,
        );

        let mut engine_state = Self {
            world,
            player,
            camera_state,
            player_actions: PlayerAction::default(),
            movement: MovementController::new(config.movement),
            mesh_manager: MeshManager::new(),
            config,
            selected_block: BlockType::PLACEABLE[0],
        };
        engine_state.spawn_player();
        engine_state
    }

    /// The configuration the engine was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The block type the secondary action places.
    pub fn selected_block(&self) -> BlockType {
        self.selected_block
    }

    /// Total meshes built so far.
    pub fn meshes_built(&self) -> usize {
        self.mesh_manager.total_rebuilt()
    }

    /// Generates the active region around the player one row at a time.
    pub fn load_world(&mut self) -> WorldLoader<'_> {
        let center = self.player.chunk();
        WorldLoader::new(&mut self.world, center, self.config.render_distance)
    }

    /// Places the player on top of the spawn column, at rest.
    ///
    /// The player stands one block above the highest solid block, or at the
    /// top of the world when the column is empty.
    pub fn spawn_player(&mut self) {
        let [spawn_x, spawn_z] = self.config.spawn;
        let column_x = spawn_x.floor() as i32;
        let column_z = spawn_z.floor() as i32;

        self.world.add_chunk_at(ChunkCoord::containing(column_x, column_z));
        let feet_y = self
            .world
            .surface_height(column_x, column_z)
            .map_or(WORLD_HEIGHT, |top| top + 1);

        self.player = Player::new(
            Point3::new(column_x as f32 + 0.5, feet_y as f32, column_z as f32 + 0.5),
            &self.config.movement,
        );
        self.camera_state.update(self.player.eye_position());
        info!("Spawned player at ({}, {}, {})", column_x, feet_y, column_z);
    }

    /// Updates the viewport size used for culling.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera_state.resize(width, height);
    }

    /// Sets the input commands for the next call to [`EngineState::process_input`].
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = PlayerAction::from_processed_input(&input);
    }

    /// Runs one tick with the stored input commands, consuming them.
    pub fn process_input(&mut self, sink: &mut dyn RenderSink) -> TickReport {
        let actions = std::mem::take(&mut self.player_actions);
        self.tick(&actions, sink)
    }

    /// Advances the simulation by one fixed step.
    ///
    /// # Arguments
    /// * `actions` - Player input for this tick
    /// * `sink` - Receives mesh submissions, visibility changes and disposals
    pub fn tick(&mut self, actions: &PlayerAction, sink: &mut dyn RenderSink) -> TickReport {
        let mut report = TickReport::default();

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.camera_state.camera.apply_look(
                delta_x as f32,
                delta_y as f32,
                self.config.look_sensitivity,
            );
        }

        if actions.toggle_fly {
            self.player.toggle_flying();
            info!("Fly mode {}", if self.player.flying { "on" } else { "off" });
        }

        let view: &dyn ViewSource = &self.camera_state;
        self.movement.tick(
            &mut self.player,
            &self.world,
            &actions.keys,
            view.forward(),
            view.right(),
        );
        self.camera_state.update(self.player.eye_position());

        let to_evict = self.world.update_active_region(
            self.player.chunk(),
            self.config.render_distance,
            self.config.eviction_margin,
        );
        for position in to_evict {
            if let Some(chunk) = self.world.evict(position) {
                self.mesh_manager.release(chunk, sink);
                report.evicted += 1;
            }
        }

        if let Some(slot) = actions.hotbar_slot {
            if let Some(&block_type) = BlockType::PLACEABLE.get(slot) {
                self.selected_block = block_type;
                debug!("Selected {}", block_type.name());
            }
        }

        if actions.primary || actions.secondary {
            let target = pick(
                &self.world,
                self.player.eye_position(),
                ViewSource::forward(&self.camera_state),
                &self.config.pick,
            );
            if let Some(target) = target {
                report.edit = if actions.primary {
                    self.break_block(target)
                } else {
                    self.place_block(target)
                };
            }
        }

        report.mesh = self
            .mesh_manager
            .update(&mut self.world, &self.camera_state, sink);
        report
    }

    fn break_block(&mut self, target: PickResult) -> Option<BlockEdit> {
        let broken = self.world.get_block_at(target.block);
        self.world.set_block_at(target.block, BlockType::AIR);
        debug!(
            "Broke {} at ({}, {}, {})",
            broken.name(),
            target.block.x,
            target.block.y,
            target.block.z
        );
        Some(BlockEdit::Broke(target.block))
    }

    fn place_block(&mut self, target: PickResult) -> Option<BlockEdit> {
        let position = target.placement();
        if !(0..WORLD_HEIGHT).contains(&position.y)
            || self.player.intersects_block(position)
            || !self.world.get_block_at(position).is_air()
        {
            debug!(
                "Rejected placement at ({}, {}, {})",
                position.x, position.y, position.z
            );
            return None;
        }

        self.world.set_block_at(position, self.selected_block);
        debug!(
            "Placed {} at ({}, {}, {})",
            self.selected_block.name(),
            position.x,
            position.y,
            position.z
        );
        Some(BlockEdit::Placed(position, self.selected_block))
    }
}
