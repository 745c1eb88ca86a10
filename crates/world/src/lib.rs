//! Island simulation: terrain, wildlife, harvesting, crafting and the tick loop.

mod armor;
mod collision;
mod crafting;
mod entity;
mod heightmap;
mod interaction;
mod inventory;
mod log;
mod npc;
mod player;
mod settings;
mod simulation;
mod state;
mod time;
mod weather;
mod worldgen;

pub use armor::*;
pub use collision::*;
pub use crafting::*;
pub use entity::*;
pub use heightmap::*;
pub use interaction::*;
pub use inventory::*;
pub use log::*;
pub use npc::*;
pub use player::*;
pub use settings::*;
pub use simulation::*;
pub use state::*;
pub use time::*;
pub use weather::*;
pub use worldgen::*;
