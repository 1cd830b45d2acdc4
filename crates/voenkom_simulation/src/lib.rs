//! Voenkom Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: военком за дверью, игрок в квартире.
//!
//! Ядро владеет правилами и состоянием (FSM военкома, бой, инвентарь, пули,
//! сессия). Presentation (рендер, звук, UI) только читает компоненты/ресурсы
//! и обменивается с ядром events:
//! - ядро → presentation: `SpeechRequest`, `CueRequest`, `UiEvent`
//! - presentation → ядро: `SessionCommand`, `PlayerInput`

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod equipment;
pub mod item_system;
pub mod logger;
pub mod physics;
pub mod player;
pub mod presentation;
pub mod session;
pub mod shooting;
pub mod world;

// Re-export основных типов для удобства
pub use ai::{AIPlugin, Kid, Voenkom, VoenkomConfig, VoenkomState};
pub use combat::{CombatPlugin, DamageSource, PlayerDamaged, VoenkomDamaged, WeaponStats};
pub use equipment::{Inventory, INVENTORY_SLOTS};
pub use item_system::{WeaponKind, WorldItem};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel, LogPrinter};
pub use physics::{KinematicBody, PhysicsPlugin};
pub use player::{Player, PlayerAction, PlayerConfig, PlayerInput, PlayerPlugin};
pub use presentation::{AudioCue, CueRequest, PresentationPlugin, SessionCommand, SpeechRequest, SpeechStatus, UiEvent};
pub use session::{GameOutcome, SessionPlugin, SessionState};
pub use shooting::{Bullet, ShootingPlugin};
pub use world::RoomGeometry;

/// Порядок фаз внутри одного FixedUpdate тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Команды UI, session clock
    Session,
    /// FSM военкома, ребёнок
    Antagonist,
    /// Hint, действия, взгляд/движение игрока
    PlayerInput,
    /// Шаг пуль
    Projectiles,
    /// Весь урон тика
    Damage,
    /// Velocity → позиции
    Physics,
    /// Публикация строк для UI
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed мог выставить create_headless_app, не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<RoomGeometry>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Session,
                    SimulationSet::Antagonist,
                    SimulationSet::PlayerInput,
                    SimulationSet::Projectiles,
                    SimulationSet::Damage,
                    SimulationSet::Physics,
                    SimulationSet::Presentation,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((
                PresentationPlugin,
                SessionPlugin,
                AIPlugin,
                PlayerPlugin,
                ShootingPlugin,
                CombatPlugin,
                PhysicsPlugin,
            ))
            .add_systems(Startup, spawn_actors);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Startup: игрок в квартире, военком на посту, ребёнок у окна
pub fn spawn_actors(mut commands: Commands, config: Res<VoenkomConfig>, mut rng: ResMut<DeterministicRng>) {
    commands.spawn((Player::default(), Transform::from_translation(world::PLAYER_SPAWN)));
    commands.spawn((
        Voenkom::new(&config, &mut rng.rng),
        Transform::from_translation(world::VOENKOM_POST),
        KinematicBody::with_radius(0.6),
    ));
    commands.spawn((Kid::new(&mut rng.rng), Transform::from_translation(world::KID_POSITION)));

    log("Actors spawned: player, voenkom, kid");
}

/// Создаёт minimal Bevy App для headless симуляции (со всеми подсистемами)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Ручной шаг симуляции: двигает `Time<Fixed>` и прогоняет один FixedUpdate.
///
/// Для тестов и headless прогона (не зависит от wall clock).
pub fn step_simulation(world: &mut World, delta: Duration) {
    world.resource_mut::<Time<Fixed>>().advance_by(delta);
    world.run_schedule(FixedUpdate);
}

/// Шаг длиной в один fixed timestep (1/60 сек)
pub fn step_fixed(world: &mut World) {
    let timestep = world.resource::<Time<Fixed>>().timestep();
    step_simulation(world, timestep);
}

/// Snapshot партии для сравнения детерминизма
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub clock: f32,
    pub voenkom_state: VoenkomState,
    pub player_hp: u32,
    pub voenkom_hp: u32,
    pub ammo: u32,
    pub door_open: bool,
    pub outcome: Option<GameOutcome>,
    pub message: String,
    pub world_items: Vec<(String, Vec3)>,
    pub bullets: Vec<(u64, Vec3)>,
    pub voenkom_position: Option<Vec3>,
    pub player_position: Option<Vec3>,
}

pub fn session_snapshot(world: &mut World) -> SessionSnapshot {
    let voenkom_position = world
        .query_filtered::<&Transform, With<Voenkom>>()
        .iter(world)
        .next()
        .map(|transform| transform.translation);
    let player_position = world
        .query_filtered::<&Transform, With<Player>>()
        .iter(world)
        .next()
        .map(|transform| transform.translation);

    let session = world.resource::<SessionState>();
    SessionSnapshot {
        clock: session.clock,
        voenkom_state: session.voenkom_state,
        player_hp: session.player_hp,
        voenkom_hp: session.voenkom_hp,
        ammo: session.ammo,
        door_open: session.door_open,
        outcome: session.outcome,
        message: session.message.clone(),
        world_items: session
            .world_items
            .iter()
            .map(|item| (item.id.clone(), item.position))
            .collect(),
        bullets: session
            .bullets
            .iter()
            .map(|bullet| (bullet.id, bullet.position))
            .collect(),
        voenkom_position,
        player_position,
    }
}
