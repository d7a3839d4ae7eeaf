//! Game state and core simulation types
//!
//! Everything the simulation reads or writes lives in `GameState`, owned by
//! the game thread. Presenters only ever see snapshots of it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::category::{Category, Impact};
use super::collision::Rect;
use super::spawner;
use crate::Tuning;
use crate::audio::SoundCue;
use crate::consts::*;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet
    Inactive,
    /// Session running
    Active,
    /// Balance went negative
    GameOver,
}

/// An item travelling on the belt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length (items are square)
    pub size: f32,
    pub category: Category,
    /// Visual variant index within the category
    pub variant: u8,
    /// Held by the pointer; excluded from belt motion and collisions
    pub dragging: bool,
}

impl Item {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.bounds().contains_point(p)
    }

    /// Move along the belt (no-op while dragged)
    pub fn advance(&mut self, belt_speed: f32, dt: f32) {
        if !self.dragging {
            self.pos.x += belt_speed * dt;
        }
    }
}

/// A receptacle accepting one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Receptacle {
    pub category: Category,
    pub pos: Vec2,
    pub size: Vec2,
    /// Only categories unlocked at the current level are shown
    pub visible: bool,
    /// Successful deposits this session
    pub deposits: u32,
}

impl Receptacle {
    pub fn new(category: Category, pos: Vec2, size: Vec2) -> Self {
        Self {
            category,
            pos,
            size,
            visible: false,
            deposits: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn accepts(&self, item: &Item) -> bool {
        self.visible && item.category == self.category
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per 1/60 s
    pub vel: Vec2,
    /// ARGB
    pub color: u32,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: u32, life: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size: PARTICLE_BASE_SIZE,
        }
    }

    pub fn update(&mut self, dt: f32) {
        let steps = dt * PARTICLE_TIME_SCALE;
        self.pos += self.vel * steps;
        self.vel.y += PARTICLE_GRAVITY * steps;
        self.life -= dt;
        self.size = PARTICLE_BASE_SIZE * self.life_fraction();
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Remaining life in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }

    /// Color with alpha faded by remaining life
    pub fn faded_color(&self) -> u32 {
        crate::colors::with_alpha(self.color, self.life_fraction())
    }
}

/// Floating text feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: u32,
    pub pos: Vec2,
    pub life: f32,
}

impl Message {
    pub fn new(text: impl Into<String>, color: u32, pos: Vec2) -> Self {
        Self {
            text: text.into(),
            color,
            pos,
            life: MESSAGE_LIFETIME,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.life -= dt;
        self.pos.y -= MESSAGE_DRIFT_SPEED * dt;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Time-limited screen shake with linearly decaying intensity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub time: f32,
    pub intensity: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, time: f32, intensity: f32) {
        self.time = time;
        self.intensity = intensity;
    }

    pub fn update(&mut self, dt: f32) {
        if self.time > 0.0 {
            self.time -= dt;
            self.intensity = (self.time * SHAKE_DECAY).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.time > 0.0
    }

    /// Random render offset for this frame
    pub fn offset(&self, rng: &mut impl Rng) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let x = (rng.random::<f32>() - 0.5) * 2.0 * self.intensity;
        let y = (rng.random::<f32>() - 0.5) * 2.0 * self.intensity;
        Vec2::new(x, y)
    }
}

/// Cumulative per-session statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub items_sorted: u32,
    pub impact: Impact,
    pub per_category: [u32; Category::COUNT],
}

impl SessionStats {
    pub fn record(&mut self, category: Category) {
        self.items_sorted += 1;
        self.impact += category.impact();
        self.per_category[category.index()] += 1;
    }

    pub fn sorted(&self, category: Category) -> u32 {
        self.per_category[category.index()]
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            items_sorted: self.items_sorted,
            impact: self.impact,
        }
    }
}

/// Final stats handed to the end-of-session callback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub items_sorted: u32,
    pub impact: Impact,
}

/// Side effects produced by the simulation, drained by the game loop
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    LevelUp(u32),
    GameOver(SessionReport),
}

/// Play field geometry, fixed for the lifetime of a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Header (HUD) zone height
    pub header_height: f32,
    /// Conveyor zone height
    pub conveyor_height: f32,
    /// Receptacle zone height
    pub receptacle_zone_height: f32,
    /// Top of the belt band
    pub belt_y: f32,
    pub belt_height: f32,
    pub item_size: f32,
    pub receptacle_size: Vec2,
    pub receptacle_y: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        let header_height = height * HEADER_ZONE_FRACTION;
        let conveyor_height = height * CONVEYOR_ZONE_FRACTION;
        let receptacle_zone_height = height - header_height - conveyor_height;

        // Frame + belt + frame, centred in the conveyor zone
        let assembly = tuning.belt_frame_height * 2.0 + tuning.belt_height;
        let assembly_top = header_height + (conveyor_height - assembly) / 2.0;
        let belt_y = assembly_top + tuning.belt_frame_height;

        let receptacle_h = receptacle_zone_height + 40.0;
        let receptacle_size = Vec2::new(receptacle_h * tuning.receptacle_aspect, receptacle_h);

        Self {
            width,
            height,
            header_height,
            conveyor_height,
            receptacle_zone_height,
            belt_y,
            belt_height: tuning.belt_height,
            item_size: Self::item_size_for_width(width),
            receptacle_size,
            receptacle_y: header_height + conveyor_height - 50.0,
        }
    }

    /// Larger screens get larger items
    pub fn item_size_for_width(width: f32) -> f32 {
        if width < 1000.0 {
            140.0
        } else if width < 1500.0 {
            160.0
        } else {
            180.0
        }
    }

    pub fn belt_band(&self) -> Rect {
        Rect::new(Vec2::new(0.0, self.belt_y), Vec2::new(self.width, self.belt_height))
    }

    pub fn on_belt(&self, p: Vec2) -> bool {
        self.belt_band().contains_point(p)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An item currently held by the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub item_id: u32,
    /// Pointer position minus item position at pick-up
    pub offset: Vec2,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub layout: Layout,
    pub phase: GamePhase,
    /// Currency; negative ends the session
    pub balance: i32,
    /// Seconds of active play this session
    pub elapsed: f32,
    /// Difficulty level (1-based)
    pub level: u32,
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    pub belt_speed: f32,
    /// Belt texture scroll offset, wrapped by the tile width
    pub belt_scroll: f32,
    pub stats: SessionStats,
    /// Live items, sorted by y for drawing
    pub items: Vec<Item>,
    /// One per category, in creation order
    pub receptacles: Vec<Receptacle>,
    pub particles: Vec<Particle>,
    pub messages: Vec<Message>,
    pub shake: ScreenShake,
    pub drag: Option<Drag>,
    events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an inactive game on the given play field
    pub fn new(tuning: Tuning, layout: Layout, seed: u64) -> Self {
        let receptacles = Category::ALL
            .iter()
            .map(|&category| {
                Receptacle::new(
                    category,
                    Vec2::new(0.0, layout.receptacle_y),
                    layout.receptacle_size,
                )
            })
            .collect();

        let mut state = Self {
            balance: tuning.starting_balance,
            spawn_interval: tuning.spawn_interval,
            belt_speed: tuning.belt_speed,
            tuning,
            layout,
            phase: GamePhase::Inactive,
            elapsed: 0.0,
            level: 1,
            spawn_timer: 0.0,
            belt_scroll: 0.0,
            stats: SessionStats::default(),
            items: Vec::new(),
            receptacles,
            particles: Vec::new(),
            messages: Vec::new(),
            shake: ScreenShake::default(),
            drag: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        spawner::arrange_receptacles(&mut state);
        state
    }

    /// Start (or restart) a session from scratch
    pub fn restart(&mut self) {
        self.balance = self.tuning.starting_balance;
        self.elapsed = 0.0;
        self.level = 1;
        self.phase = GamePhase::Active;
        self.stats = SessionStats::default();

        self.spawn_timer = 0.0;
        self.spawn_interval = self.tuning.spawn_interval;
        self.belt_speed = self.tuning.belt_speed;

        self.items.clear();
        self.particles.clear();
        self.messages.clear();
        self.drag = None;

        for receptacle in &mut self.receptacles {
            receptacle.deposits = 0;
        }
        spawner::arrange_receptacles(self);

        self.push_event(GameEvent::Sound(SoundCue::Click));
        log::info!("New session started (balance {})", self.balance);
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Insert keeping draw order (ascending y, stable for equal y)
    pub fn insert_item(&mut self, item: Item) {
        let at = self.items.partition_point(|other| other.pos.y <= item.pos.y);
        self.items.insert(at, item);
    }

    pub fn item_index(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn remove_item(&mut self, id: u32) -> Option<Item> {
        let index = self.item_index(id)?;
        Some(self.items.remove(index))
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.push_event(GameEvent::Sound(cue));
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn add_message(&mut self, text: impl Into<String>, color: u32, pos: Vec2) {
        self.messages.push(Message::new(text, color, pos));
    }

    /// Radial particle burst
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32, count: usize, speed: f32) {
        for _ in 0..count {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let velocity = speed * (0.5 + self.rng.random::<f32>());
            let vel = Vec2::new(angle.cos(), angle.sin()) * velocity;
            let life = 0.5 + self.rng.random::<f32>() * 0.5;
            self.particles.push(Particle::new(pos, vel, color, life));
        }

        let cap = self.tuning.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
        }
    }
}
