//! Player avatar locomotion
//!
//! Implements the avatar's per-frame movement: facing-relative input, the
//! grounded/airborne/swimming/flying state machine, gravity and Euler
//! integration, the downward ground probe, and the jump chain with its
//! long-jump variant.

use serde::{Deserialize, Serialize};
use starfall_math::Vec3;

use crate::query::SpatialQuery;
use crate::shapes::Aabb3;

/// Locomotion state of the avatar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locomotion {
    /// Standing or running on a surface
    Grounded,
    /// In the air under gravity
    Airborne,
    /// Inside a water volume
    Swimming,
    /// Flight power-up active: gravity suppressed
    Flying,
}

/// Frame-sampled input consumed by the controller
///
/// Raw device handling happens outside the simulation; one snapshot is
/// taken per tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputSnapshot {
    /// Forward/back axis in [-1, 1]
    pub move_forward: f32,
    /// Strafe axis in [-1, 1]
    pub move_strafe: f32,
    /// Turn axis in [-1, 1] (positive turns right)
    pub turn: f32,
    /// Vertical axis in [-1, 1], used while swimming or flying
    pub vertical: f32,
    /// Jump was pressed this frame (edge, not level)
    pub jump_pressed: bool,
    /// Run modifier is held
    pub run_held: bool,
    /// Long-jump modifier is held
    pub long_jump_held: bool,
}

/// Tunables for avatar locomotion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Horizontal speed while walking (units/sec)
    pub walk_speed: f32,
    /// Horizontal speed while the run modifier is held (units/sec)
    pub run_speed: f32,
    /// Turn rate in degrees per second
    pub turn_rate: f32,
    /// Downward acceleration (positive, units/sec^2)
    pub gravity: f32,
    /// Upward velocity of a grounded jump (units/sec)
    pub jump_force: f32,
    /// Jump-force multipliers indexed by the chain count at the jump
    /// instant. The table length is the maximum chain; index 0 is the
    /// grounded jump and should normally be 1.0.
    pub chain_multiplier: Vec<f32>,
    /// Fraction of full movement authority while airborne
    pub air_control: f32,
    /// Vertical nudge rate while swimming (units/sec)
    pub swim_rate: f32,
    /// Symmetric clamp on vertical velocity while swimming (units/sec)
    pub swim_vertical_cap: f32,
    /// Vertical nudge rate while flying (units/sec)
    pub flight_rate: f32,
    /// Minimum horizontal speed for a long jump (units/sec)
    pub long_jump_min_speed: f32,
    /// Forward speed factor applied at the long-jump instant
    pub long_jump_speed_factor: f32,
    /// Vertical impulse of a long jump, as a fraction of jump_force
    pub long_jump_lift: f32,
    /// Half the avatar's height (probe length and collider extent)
    pub half_height: f32,
    /// Half the avatar's width (collider extent)
    pub half_width: f32,
    /// Extra probe reach below the feet for stable ground contact
    pub probe_epsilon: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            run_speed: 8.0,
            turn_rate: 150.0,
            gravity: 20.0,
            jump_force: 8.0,
            chain_multiplier: vec![1.0, 0.8, 1.2],
            air_control: 0.8,
            swim_rate: 2.0,
            swim_vertical_cap: 0.5,
            flight_rate: 6.0,
            long_jump_min_speed: 3.0,
            long_jump_speed_factor: 1.2,
            long_jump_lift: 0.8,
            half_height: 1.0,
            half_width: 0.5,
            probe_epsilon: 0.1,
        }
    }
}

/// The player avatar's physics state and locomotion state machine
#[derive(Clone, Debug)]
pub struct PlayerController {
    /// Current position (center of the avatar)
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Facing angle in radians around the Y axis
    pub facing_yaw: f32,
    /// Ground contact from the last probe
    pub grounded: bool,
    config: PlayerConfig,
    state: Locomotion,
    /// State to restore when leaving the water (meaningless otherwise)
    swim_return: Locomotion,
    jump_chain: u8,
    flight_enabled: bool,
}

impl PlayerController {
    /// Create a new avatar at the given position
    pub fn new(position: Vec3, config: PlayerConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            facing_yaw: 0.0,
            grounded: false,
            config,
            state: Locomotion::Airborne,
            swim_return: Locomotion::Airborne,
            jump_chain: 0,
            flight_enabled: false,
        }
    }

    /// Current locomotion state
    pub fn state(&self) -> Locomotion {
        self.state
    }

    /// Consecutive airborne jumps performed without a full grounded frame
    pub fn jump_chain(&self) -> u8 {
        self.jump_chain
    }

    /// Whether the flight power-up is active
    pub fn is_flying(&self) -> bool {
        self.flight_enabled
    }

    /// Locomotion tunables
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The avatar's collision box at the current position
    pub fn collider(&self) -> Aabb3 {
        Aabb3::from_center_half_extents(
            self.position,
            Vec3::new(
                self.config.half_width,
                self.config.half_height,
                self.config.half_width,
            ),
        )
    }

    /// Unit vector the avatar is facing, on the XZ plane
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.facing_yaw.sin(), 0.0, self.facing_yaw.cos())
    }

    /// Enable or disable flight; called only by the power-up layer
    ///
    /// Idempotent: enabling while flying or disabling while not flying is
    /// a no-op. While swimming, the flag is recorded and takes effect when
    /// the avatar leaves the water.
    pub fn set_flight(&mut self, enabled: bool) {
        if self.flight_enabled == enabled {
            return;
        }
        self.flight_enabled = enabled;
        match self.state {
            Locomotion::Swimming => {
                if !enabled && self.swim_return == Locomotion::Flying {
                    self.swim_return = Locomotion::Airborne;
                }
            }
            Locomotion::Flying if !enabled => {
                self.state = Locomotion::Airborne;
            }
            _ if enabled => {
                self.state = Locomotion::Flying;
                self.grounded = false;
            }
            _ => {}
        }
    }

    /// Teleport to a safe spawn point, clearing all motion
    pub fn respawn(&mut self, at: Vec3) {
        self.position = at;
        self.velocity = Vec3::ZERO;
        self.jump_chain = 0;
        self.grounded = false;
        if self.state != Locomotion::Flying {
            self.state = Locomotion::Airborne;
        }
    }

    /// Apply an upward impulse without touching the jump chain
    /// (used for the stomp rebound)
    pub fn bounce(&mut self, impulse: f32) {
        self.velocity.y = impulse;
        self.grounded = false;
        if self.state == Locomotion::Grounded {
            self.state = Locomotion::Airborne;
        }
    }

    /// Advance the avatar by one frame
    pub fn update(&mut self, input: &InputSnapshot, dt: f32, query: &SpatialQuery<'_>) {
        let was_grounded = self.grounded;

        self.update_water_state(query);

        // Facing and desired horizontal direction
        self.facing_yaw += self.config.turn_rate.to_radians() * input.turn * dt;
        let forward = self.facing();
        let right = Vec3::new(self.facing_yaw.cos(), 0.0, -self.facing_yaw.sin());
        let dir =
            (forward * input.move_forward + right * input.move_strafe).flattened().normalized();
        let speed = if input.run_held {
            self.config.run_speed
        } else {
            self.config.walk_speed
        };

        match self.state {
            Locomotion::Grounded | Locomotion::Swimming | Locomotion::Flying => {
                // Instantaneous horizontal control, no inertia
                self.velocity.x = dir.x * speed;
                self.velocity.z = dir.z * speed;
            }
            Locomotion::Airborne => {
                // Reduced authority in the air
                let accel = dir * (speed * self.config.air_control * dt);
                self.velocity.x += accel.x;
                self.velocity.z += accel.z;
            }
        }

        match self.state {
            Locomotion::Flying => {
                self.velocity.y = 0.0;
                self.position.y += input.vertical * self.config.flight_rate * dt;
            }
            Locomotion::Swimming => {
                self.velocity.y -= self.config.gravity * dt;
                self.velocity.y = self
                    .velocity
                    .y
                    .clamp(-self.config.swim_vertical_cap, self.config.swim_vertical_cap);
                self.position.y += input.vertical * self.config.swim_rate * dt;
            }
            _ => {
                self.velocity.y -= self.config.gravity * dt;
            }
        }

        self.position += self.velocity * dt;

        self.probe_ground(query, was_grounded);

        if input.jump_pressed {
            self.handle_jump(input, speed);
        }
    }

    fn update_water_state(&mut self, query: &SpatialQuery<'_>) {
        let submerged = query.in_water(self.position);
        match self.state {
            Locomotion::Swimming if !submerged => {
                self.state = if self.flight_enabled {
                    Locomotion::Flying
                } else if self.swim_return == Locomotion::Grounded {
                    Locomotion::Grounded
                } else {
                    Locomotion::Airborne
                };
            }
            Locomotion::Swimming => {}
            state if submerged => {
                self.swim_return = state;
                self.state = Locomotion::Swimming;
                self.grounded = false;
            }
            _ => {}
        }
    }

    fn probe_ground(&mut self, query: &SpatialQuery<'_>, was_grounded: bool) {
        let reach = self.config.half_height + self.config.probe_epsilon;
        let hit = query.ground_probe(self.position, reach);

        let contact = hit.is_some() && self.velocity.y <= 0.0;
        self.grounded = contact;

        match self.state {
            Locomotion::Airborne if contact => {
                // Snap to the surface and kill downward velocity
                if let Some(hit) = hit {
                    self.position.y = hit.surface_y + self.config.half_height;
                }
                if self.velocity.y < 0.0 {
                    self.velocity.y = 0.0;
                }
                self.state = Locomotion::Grounded;
            }
            Locomotion::Grounded if contact => {
                if let Some(hit) = hit {
                    self.position.y = hit.surface_y + self.config.half_height;
                }
                if self.velocity.y < 0.0 {
                    self.velocity.y = 0.0;
                }
            }
            Locomotion::Grounded => {
                self.state = Locomotion::Airborne;
            }
            _ => {}
        }

        // The chain survives a landing frame so the state is observable,
        // then clears once the avatar has been grounded for a full frame.
        if self.state == Locomotion::Grounded && was_grounded {
            self.jump_chain = 0;
        }
    }

    fn handle_jump(&mut self, input: &InputSnapshot, speed: f32) {
        let max_chain = self.config.chain_multiplier.len() as u8;

        match self.state {
            // Swimming and flying have their own vertical controls
            Locomotion::Swimming | Locomotion::Flying => {}
            Locomotion::Grounded => {
                let fast_enough =
                    self.velocity.horizontal_length() > self.config.long_jump_min_speed;
                if input.long_jump_held && input.run_held && fast_enough {
                    // Long jump: combined forward + vertical impulse
                    let forward = self.facing() * (speed * self.config.long_jump_speed_factor);
                    self.velocity = Vec3::new(
                        forward.x,
                        self.config.jump_force * self.config.long_jump_lift,
                        forward.z,
                    );
                } else {
                    self.velocity.y = self.config.jump_force * self.config.chain_multiplier[0];
                }
                self.grounded = false;
                self.state = Locomotion::Airborne;
                self.jump_chain = 1;
            }
            Locomotion::Airborne => {
                if self.jump_chain < max_chain {
                    let multiplier = self.config.chain_multiplier[self.jump_chain as usize];
                    self.velocity.y = self.config.jump_force * multiplier;
                    self.jump_chain += 1;
                }
            }
        }
    }
}
