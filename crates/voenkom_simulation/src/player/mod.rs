//! Player domain: ввод, взгляд, движение и взаимодействия игрока
//!
//! Архитектура:
//! - `PlayerInput` (Resource) заполняет presentation: оси движения, мышь, очередь действий
//! - `Player` (Component): состояние камеры и боевых таймеров
//! - Системы в `SimulationSet::PlayerInput`:
//!   1. `update_interaction_target`: hint + цель под прицелом
//!   2. `process_player_actions`: атака / подбор / использование / слоты
//!   3. `peephole_taunts`: реакция военкома на ёрзание у глазка
//!   4. `apply_player_movement`: мышь + WASD → KinematicBody::velocity

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod interaction;
pub mod movement;
pub mod peephole;

pub use interaction::{
    find_interaction_target, interaction_hint, pickup_or_drop, process_player_actions, resolve_attack,
    update_interaction_target, use_interaction, AttackOutcome, PickupOutcome, UseOutcome,
};
pub use movement::{apply_look, apply_player_movement, movement_velocity};
pub use peephole::{peephole_taunts, update_agitation};

use crate::physics::KinematicBody;
use crate::world::HotSpot;
use crate::SimulationSet;

/// Действия игрока (одно нажатие = одно действие)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum PlayerAction {
    /// ЛКМ
    Attack,
    /// G: подобрать предмет под прицелом или выбросить оружие из рук
    PickupOrDrop,
    /// F: глазок / дверь / выйти из глазка
    Use,
    /// 1-9 (индекс слота 0..8)
    SelectSlot(usize),
}

/// Resource: ввод игрока за кадр
///
/// Оси и кнопки: состояние (держатся между тиками),
/// `look_delta` и `actions`: накопленные, потребляются симуляцией.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// x: вправо, y: вперёд (каждая в [-1, 1])
    pub move_axis: Vec2,
    pub sprint: bool,
    pub crouch: bool,
    /// Смещение мыши в пикселях
    pub look_delta: Vec2,
    pub actions: Vec<PlayerAction>,
}

impl PlayerInput {
    pub fn push(&mut self, action: PlayerAction) {
        self.actions.push(action);
    }
}

/// Параметры игрока
#[derive(Resource, Debug, Clone, Reflect, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed_multiplier: f32,

    /// Высота глаз над ногами
    pub stand_eye_height: f32,
    pub crouch_eye_height: f32,

    /// Радиан на пиксель мыши
    pub look_sensitivity: f32,
    pub pitch_limit: f32,

    /// Подбор: дальность и минимальный dot(взгляд, направление на предмет)
    pub pickup_reach: f32,
    pub pickup_alignment: f32,
    /// Дальность луча до глазка / ручки
    pub use_reach: f32,

    /// Глазок: порог накопленного движения мыши, затухание за тик, пауза между репликами
    pub peephole_agitation_threshold: f32,
    pub peephole_agitation_decay: f32,
    pub peephole_taunt_interval: f32,

    /// Дуло пистолета ниже глаз (по up-вектору камеры)
    pub muzzle_drop: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.5,
            sprint_speed: 10.5,
            crouch_speed_multiplier: 0.5,
            stand_eye_height: 1.65,
            crouch_eye_height: 1.2,
            look_sensitivity: 0.002,
            pitch_limit: 1.5,
            pickup_reach: 3.0,
            pickup_alignment: 0.99,
            use_reach: 2.5,
            peephole_agitation_threshold: 500.0,
            peephole_agitation_decay: 0.9,
            peephole_taunt_interval: 3.0,
            muzzle_drop: 0.2,
        }
    }
}

/// Что сейчас под прицелом
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum InteractionTarget {
    Item { id: String, name: String },
    HotSpot(HotSpot),
}

/// Луч взгляда игрока
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub eye: Vec3,
    pub look: Vec3,
    /// Откуда вылетает пуля
    pub muzzle: Vec3,
}

/// Игрок (first-person камера + боевые таймеры)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, KinematicBody)]
pub struct Player {
    /// Поворот вокруг Y (0 = смотрит в -z, к двери)
    pub yaw: f32,
    pub pitch: f32,
    pub crouching: bool,

    /// Последняя успешная атака (session clock)
    pub last_attack_at: Option<f32>,

    /// Накопленное движение мыши у глазка
    pub peephole_agitation: f32,
    pub last_peephole_taunt_at: Option<f32>,

    pub interaction_target: Option<InteractionTarget>,
}

impl Player {
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn look_direction(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn eye_height(&self, config: &PlayerConfig) -> f32 {
        if self.crouching {
            config.crouch_eye_height
        } else {
            config.stand_eye_height
        }
    }

    pub fn eye_position(&self, feet: Vec3, config: &PlayerConfig) -> Vec3 {
        feet + Vec3::Y * self.eye_height(config)
    }

    pub fn view(&self, feet: Vec3, config: &PlayerConfig) -> PlayerView {
        let orientation = self.orientation();
        let eye = self.eye_position(feet, config);
        PlayerView {
            eye,
            look: orientation * Vec3::NEG_Z,
            muzzle: eye - orientation * Vec3::Y * config.muzzle_drop,
        }
    }
}

/// Player Plugin
///
/// Все системы в `SimulationSet::PlayerInput`, последовательно.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<PlayerConfig>();

        app.add_systems(
            FixedUpdate,
            (
                update_interaction_target,
                process_player_actions,
                peephole_taunts,
                apply_player_movement,
            )
                .chain()
                .in_set(SimulationSet::PlayerInput),
        );
    }
}
