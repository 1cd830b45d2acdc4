//! Physics simulation module
//!
//! Kinematic движение без физ. движка: velocity integration + стены уровня.
//! Ray queries (melee, hot-spots): в `world::RoomGeometry`.

use bevy::prelude::*;

pub mod movement;

// Re-export основных типов
pub use movement::{integrate_kinematic_bodies, integrate_position, KinematicBody};

use crate::SimulationSet;

/// Physics Plugin: интеграция velocity в `SimulationSet::Physics`
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            integrate_kinematic_bodies.in_set(SimulationSet::Physics),
        );
    }
}
