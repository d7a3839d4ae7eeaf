//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep driven by the game thread
//! - Seeded RNG only, so a seed replays a session
//! - Items kept in draw order (ascending y)
//! - No rendering or platform dependencies; side effects leave as `GameEvent`s

pub mod category;
pub mod collision;
pub mod input;
pub mod rules;
pub mod spawner;
pub mod state;
pub mod tick;

pub use category::{Category, CategoryInfo, Impact};
pub use collision::{Rect, find_receptacle};
pub use input::{PointerEvent, handle_pointer};
pub use rules::Outcome;
pub use state::{
    Drag, GameEvent, GamePhase, GameState, Item, Layout, Message, Particle, Receptacle,
    ScreenShake, SessionReport, SessionStats,
};
pub use tick::tick;
