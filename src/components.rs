use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position component - continuous world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }
}

/// Velocity component - units per second
#[derive(Debug, Clone, Copy)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Health component
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }
}

/// Horizontal facing, mirrors the sprite flip the renderer applies.
/// Source art faces left, so `flipped = true` means facing right.
#[derive(Debug, Clone, Copy)]
pub struct Facing {
    pub flipped: bool,
}

impl Facing {
    pub fn new() -> Self {
        Self { flipped: false }
    }
}

impl Default for Facing {
    fn default() -> Self {
        Self::new()
    }
}

/// Contact-damage cooldown gate.
///
/// On mobs it gates static attack damage; on the player it gates mob contact
/// damage. `ready = false` means the entity is inside its cooldown window and
/// further hits of that category are no-ops until the revert timer fires.
#[derive(Debug, Clone, Copy)]
pub struct Attackable {
    pub ready: bool,
}

impl Attackable {
    pub fn new() -> Self {
        Self { ready: true }
    }
}

impl Default for Attackable {
    fn default() -> Self {
        Self::new()
    }
}

/// Mob kinds, in rough difficulty order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobKind {
    Mob1,
    Mob2,
    Mob3,
    Mob4,
    Lion,
}

impl MobKind {
    /// Killing a boss kind ends the session in victory
    pub fn is_boss(&self) -> bool {
        matches!(self, MobKind::Lion)
    }

    /// Animation key the renderer uses for this kind
    pub fn animation_key(&self) -> &'static str {
        match self {
            MobKind::Mob1 => "mob1_anim",
            MobKind::Mob2 => "mob2_anim",
            MobKind::Mob3 => "mob3_anim",
            MobKind::Mob4 => "mob4_anim",
            MobKind::Lion => "lion_anim",
        }
    }
}

/// Mob component - per-instance combat data
#[derive(Debug, Clone, Copy)]
pub struct Mob {
    pub kind: MobKind,
    /// Movement speed in units per second
    pub speed: f32,
    /// Probability in [0,1] of dropping a pickup on death
    pub drop_rate: f32,
}

impl Mob {
    pub fn new(kind: MobKind, speed: f32, drop_rate: f32) -> Self {
        Self {
            kind,
            speed,
            drop_rate,
        }
    }
}

/// Attack kinds. Beam is the dynamic projectile; claw and catnip are static
/// attacks that follow the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Beam,
    Claw,
    Catnip,
}

impl AttackKind {
    /// Dynamic attacks are one-shot projectiles; static attacks persist and
    /// deal cooldown-gated contact damage.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, AttackKind::Beam)
    }

    pub fn sound_key(&self) -> &'static str {
        match self {
            AttackKind::Beam => "beam",
            AttackKind::Claw => "scratch",
            AttackKind::Catnip => "growl",
        }
    }
}

/// Dynamic attack component - a projectile consumed on first hit
#[derive(Debug, Clone, Copy)]
pub struct DynamicAttack {
    pub damage: i32,
    /// Collision radius, already scaled by the attack config
    pub radius: f32,
}

/// Static attack component - follows the player, damages on contact
#[derive(Debug, Clone, Copy)]
pub struct StaticAttack {
    pub kind: AttackKind,
    pub damage: i32,
    /// Collision radius, already scaled by the attack config
    pub radius: f32,
    /// Offset from the player position, maintained each tick
    pub offset: Vec2,
}

/// Experience pickup component
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub exp: u32,
}
