//! Game objects stored in the world
//!
//! Every non-player entity (collectibles, power-ups, enemies, platforms) is
//! a [`GameObject`]: a position, a collider shape, and a kind payload.
//! Objects live in a slotmap keyed by [`ObjectKey`], so stale keys after
//! removal are detectable rather than dangling.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use starfall_math::Vec3;
use starfall_physics::{Aabb3, Collider, CollisionFilter, Sphere3};

new_key_type! {
    /// Generational key for a game object in the world
    pub struct ObjectKey;
}

/// Collision shape of an object, relative to its position
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

impl ColliderShape {
    /// Materialize the shape at a world position
    pub fn at(&self, position: Vec3) -> Collider {
        match *self {
            ColliderShape::Sphere { radius } => Collider::Sphere(Sphere3::new(position, radius)),
            ColliderShape::Box { half_extents } => {
                Collider::Aabb(Aabb3::from_center_half_extents(position, half_extents))
            }
        }
    }

    /// Vertical half-extent of the shape
    pub fn half_height(&self) -> f32 {
        match *self {
            ColliderShape::Sphere { radius } => radius,
            ColliderShape::Box { half_extents } => half_extents.y,
        }
    }
}

/// What a collectible is worth when picked up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Currency; accumulating enough grants an extra life
    Coin,
    /// Progress marker; collected once, then inert
    Star,
}

/// A timed effect granted by a power-up pickup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Gravity suppressed, direct vertical control
    Flight,
}

/// Patrol brain: walks a cardinal heading, turns on a timer or at bounds
#[derive(Clone, Copy, Debug)]
pub struct Patroller {
    /// Walk speed (units/sec)
    pub speed: f32,
    /// Current cardinal heading (unit vector on XZ)
    pub heading: Vec3,
    /// Seconds until the next heading change
    pub until_turn: f32,
}

impl Patroller {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            heading: Vec3::X,
            until_turn: 0.0,
        }
    }
}

/// Fuse state of an explosive enemy
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FuseState {
    /// Waiting for the player (or a blast) to come close
    Dormant,
    /// Counting down to detonation
    Fused { remaining: f32 },
    /// Spent; the object is inert and removed after the blast resolves
    Detonated,
}

/// Explosive brain: ignites on proximity, detonates after a fixed fuse
#[derive(Clone, Copy, Debug)]
pub struct Explosive {
    pub fuse: FuseState,
    /// Distance at which the player's presence lights the fuse
    pub ignition_radius: f32,
    /// Fuse length once lit (seconds)
    pub fuse_time: f32,
    /// Damage radius of the detonation
    pub blast_radius: f32,
}

impl Explosive {
    pub fn new(ignition_radius: f32, fuse_time: f32, blast_radius: f32) -> Self {
        Self {
            fuse: FuseState::Dormant,
            ignition_radius,
            fuse_time,
            blast_radius,
        }
    }

    /// Burn progress in [0, 1] for display purposes (0 = dormant or fresh)
    pub fn intensity(&self) -> f32 {
        match self.fuse {
            FuseState::Fused { remaining } => 1.0 - (remaining / self.fuse_time).clamp(0.0, 1.0),
            FuseState::Dormant => 0.0,
            FuseState::Detonated => 1.0,
        }
    }
}

/// Display spin shared by rotating collectibles; one behaviour, rate per object
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Spinner {
    /// Rotation rate (radians/sec)
    pub rate: f32,
    /// Current angle (radians)
    pub angle: f32,
}

impl Spinner {
    pub fn new(rate: f32) -> Self {
        Self { rate, angle: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.rate * dt) % std::f32::consts::TAU;
    }
}

/// Enemy behaviour payload
#[derive(Clone, Copy, Debug)]
pub enum EnemyBrain {
    Patroller(Patroller),
    Explosive(Explosive),
}

/// Motion program for a platform
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum PlatformMotion {
    Static,
    /// Sinusoidal oscillation around the home position
    Oscillating {
        /// Direction of travel (unit vector)
        axis: Vec3,
        /// Peak displacement from home (units)
        amplitude: f32,
        /// Full cycle time (seconds)
        period: f32,
    },
}

/// Kind payload of a game object
#[derive(Clone, Copy, Debug)]
pub enum ObjectKind {
    Collectible(CollectibleKind),
    PowerUp {
        effect: EffectKind,
        /// How long the effect lasts before reverting (seconds)
        duration: f32,
    },
    Enemy(EnemyBrain),
    Platform {
        /// Center of the motion program
        home: Vec3,
        motion: PlatformMotion,
    },
}

/// A non-player entity in the world
#[derive(Clone, Copy, Debug)]
pub struct GameObject {
    pub position: Vec3,
    pub shape: ColliderShape,
    pub kind: ObjectKind,
    /// Display rotation, if the object spins in place
    pub spin: Option<Spinner>,
    /// Inactive objects are skipped by every system but keep their key valid
    pub active: bool,
}

impl GameObject {
    pub fn new(position: Vec3, shape: ColliderShape, kind: ObjectKind) -> Self {
        Self {
            position,
            shape,
            kind,
            spin: None,
            active: true,
        }
    }

    /// Attach a display spin at the given rate
    pub fn with_spin(mut self, rate: f32) -> Self {
        self.spin = Some(Spinner::new(rate));
        self
    }

    /// A coin collectible with the standard pickup sphere
    pub fn coin(position: Vec3) -> Self {
        Self::new(
            position,
            ColliderShape::Sphere { radius: 0.5 },
            ObjectKind::Collectible(CollectibleKind::Coin),
        )
        .with_spin(2.0)
    }

    /// A star collectible
    pub fn star(position: Vec3) -> Self {
        Self::new(
            position,
            ColliderShape::Sphere { radius: 0.8 },
            ObjectKind::Collectible(CollectibleKind::Star),
        )
        .with_spin(1.0)
    }

    /// A timed power-up pickup
    pub fn power_up(position: Vec3, effect: EffectKind, duration: f32) -> Self {
        Self::new(
            position,
            ColliderShape::Sphere { radius: 0.6 },
            ObjectKind::PowerUp { effect, duration },
        )
    }

    /// A patrolling enemy
    pub fn patroller(position: Vec3, speed: f32) -> Self {
        Self::new(
            position,
            ColliderShape::Box {
                half_extents: Vec3::new(0.4, 0.4, 0.4),
            },
            ObjectKind::Enemy(EnemyBrain::Patroller(Patroller::new(speed))),
        )
    }

    /// An explosive enemy, dormant until approached
    pub fn explosive(position: Vec3, ignition_radius: f32, fuse_time: f32, blast_radius: f32) -> Self {
        Self::new(
            position,
            ColliderShape::Box {
                half_extents: Vec3::new(0.5, 0.5, 0.5),
            },
            ObjectKind::Enemy(EnemyBrain::Explosive(Explosive::new(
                ignition_radius,
                fuse_time,
                blast_radius,
            ))),
        )
    }

    /// A platform with the given motion program
    pub fn platform(home: Vec3, half_extents: Vec3, motion: PlatformMotion) -> Self {
        Self::new(
            home,
            ColliderShape::Box { half_extents },
            ObjectKind::Platform { home, motion },
        )
    }

    /// The object's collider at its current position
    pub fn collider(&self) -> Collider {
        self.shape.at(self.position)
    }

    /// Layer/mask filter for this object's kind
    pub fn filter(&self) -> CollisionFilter {
        match self.kind {
            ObjectKind::Collectible(_) | ObjectKind::PowerUp { .. } => CollisionFilter::pickup(),
            ObjectKind::Enemy(_) => CollisionFilter::enemy(),
            ObjectKind::Platform { .. } => CollisionFilter::static_world(),
        }
    }

    /// Top surface height of the object
    pub fn top(&self) -> f32 {
        self.position.y + self.shape.half_height()
    }
}
