//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by arena slot)
//! - No rendering or platform dependencies

pub mod arena;
pub mod cascade;
pub mod collision;
pub mod entity;
pub mod field;
pub mod loot;
pub mod projectile;
pub mod ship;
pub mod spawner;
pub mod state;
pub mod text;
pub mod tick;

pub use arena::{Arena, EntityId};
pub use entity::{Behavior, EdgePolicy, Entity, EntityKind};
pub use field::{AreaEffect, Band, FieldVariant, ForceBands};
pub use loot::LootKind;
pub use projectile::Projectile;
pub use ship::{Ship, ShipIntent};
pub use spawner::{Interval, Spawner, SpawnerKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use text::{FloatingText, TextStyle};
pub use tick::{TickInput, tick};
