use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::WorldConfig;
use crate::input::Intents;
use crate::obstacle::{Aabb, ObstacleSet};
use crate::terrain::HeightSampler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundState {
    Grounded,
    Airborne,
}

/// Player position (capsule center) and heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about +Y in radians. Zero faces -Z.
    pub yaw: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub vertical_velocity: f32,
    pub ground: GroundState,
}

/// Movement tuning, copied out of the world config.
#[derive(Debug, Clone, Copy)]
pub struct PlayerParams {
    pub move_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub radius: f32,
    /// Center-to-feet distance.
    pub half_height: f32,
}

impl PlayerParams {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            jump_impulse: config.jump_impulse,
            gravity: config.gravity,
            radius: config.player_radius,
            half_height: config.player_half_height(),
        }
    }

    fn half_extents(&self) -> Vec3 {
        Vec3::new(self.radius, self.half_height, self.radius)
    }
}

/// What happened during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepMotion {
    /// A non-zero horizontal move was rejected by an obstacle.
    pub blocked: bool,
    pub jumped: bool,
    /// Airborne at the start of the step, grounded at the end.
    pub landed: bool,
}

pub struct PlayerController {
    transform: Transform,
    kinematics: KinematicState,
    params: PlayerParams,
}

impl PlayerController {
    /// Stand the player on the terrain at (x, z), facing -Z.
    pub fn spawn(params: PlayerParams, x: f32, z: f32, terrain: &impl HeightSampler) -> Self {
        let y = terrain.height_at(x, z) + params.half_height;
        Self {
            transform: Transform {
                position: Vec3::new(x, y, z),
                yaw: 0.0,
            },
            kinematics: KinematicState {
                vertical_velocity: 0.0,
                ground: GroundState::Grounded,
            },
            params,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[cfg(test)]
    pub fn kinematics(&self) -> KinematicState {
        self.kinematics
    }

    pub fn is_grounded(&self) -> bool {
        self.kinematics.ground == GroundState::Grounded
    }

    /// Horizontal facing direction derived from yaw alone.
    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.transform.yaw.sin_cos();
        Vec3::new(-sin, 0.0, -cos)
    }

    /// `forward × up`.
    pub fn right(&self) -> Vec3 {
        let (sin, cos) = self.transform.yaw.sin_cos();
        Vec3::new(cos, 0.0, -sin)
    }

    /// Box around the capsule at its current position.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.transform.position, self.params.half_extents())
    }

    /// Advance one frame. Horizontal motion is resolved first, then vertical,
    /// and the ground is sampled at the already-moved position.
    pub fn update(
        &mut self,
        dt: f32,
        intents: &Intents,
        obstacles: &ObstacleSet,
        terrain: &impl HeightSampler,
    ) -> StepMotion {
        let mut motion = StepMotion::default();
        let was_airborne = !self.is_grounded();

        if intents.turn != 0.0 {
            self.transform.yaw = (self.transform.yaw + intents.turn).rem_euclid(TAU);
        }

        // Directions add up unnormalized, so diagonals are faster.
        let forward = self.forward();
        let right = self.right();
        let step = self.params.move_speed * dt;
        let mut displacement = Vec3::ZERO;
        if intents.forward {
            displacement += forward * step;
        }
        if intents.back {
            displacement -= forward * step;
        }
        if intents.left {
            displacement -= right * step;
        }
        if intents.right {
            displacement += right * step;
        }

        // All or nothing: any overlap rejects the whole move.
        let candidate = self.bounds().translated(displacement);
        if obstacles.blocks(&candidate) {
            motion.blocked = displacement != Vec3::ZERO;
        } else {
            self.transform.position += displacement;
        }

        let k = &mut self.kinematics;
        if intents.jump && k.ground == GroundState::Grounded {
            k.vertical_velocity = self.params.jump_impulse;
            k.ground = GroundState::Airborne;
            motion.jumped = true;
        }

        if k.ground == GroundState::Airborne || k.vertical_velocity > 0.0 {
            k.vertical_velocity -= self.params.gravity * dt;
        } else {
            k.vertical_velocity = 0.0;
        }

        self.transform.position.y += k.vertical_velocity * dt;

        let pos = self.transform.position;
        let rest_y = terrain.height_at(pos.x, pos.z) + self.params.half_height;
        if pos.y <= rest_y {
            self.transform.position.y = rest_y;
            k.vertical_velocity = 0.0;
            k.ground = GroundState::Grounded;
            motion.landed = was_airborne;
        } else {
            k.ground = GroundState::Airborne;
        }

        motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::ObstacleDef;
    use crate::terrain::HeightField;

    fn params() -> PlayerParams {
        PlayerParams::from_config(&WorldConfig::default())
    }

    fn flat() -> HeightField {
        HeightField::flat(100.0, 10)
    }

    fn held(f: impl FnOnce(&mut Intents)) -> Intents {
        let mut intents = Intents::default();
        f(&mut intents);
        intents
    }

    #[test]
    fn spawns_standing_on_terrain() {
        let terrain = HeightField::from_fn(100.0, 10, |_, _| 2.0);
        let player = PlayerController::spawn(params(), 0.0, 0.0, &terrain);
        assert!((player.position().y - 3.0).abs() < 1e-4);
        assert!(player.is_grounded());
    }

    #[test]
    fn basis_follows_yaw() {
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &flat());
        assert!(player.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(player.right().abs_diff_eq(Vec3::X, 1e-6));

        let turn = held(|i| i.turn = std::f32::consts::FRAC_PI_2);
        player.update(0.0, &turn, &ObstacleSet::default(), &flat());
        assert!(player.forward().abs_diff_eq(Vec3::NEG_X, 1e-6));
        assert!(player.right().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn forward_moves_at_move_speed() {
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &flat());
        let motion = player.update(0.1, &held(|i| i.forward = true), &ObstacleSet::default(), &flat());
        assert!(!motion.blocked);
        assert!((player.position().z + 0.5).abs() < 1e-5);
        assert!(player.position().x.abs() < 1e-6);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &flat());
        let start = player.position();
        let diag = held(|i| {
            i.forward = true;
            i.right = true;
        });
        player.update(0.1, &diag, &ObstacleSet::default(), &flat());
        let moved = (player.position() - start).length();
        assert!((moved - 0.5 * std::f32::consts::SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn opposite_intents_cancel() {
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &flat());
        let start = player.position();
        let both = held(|i| {
            i.left = true;
            i.right = true;
        });
        player.update(0.1, &both, &ObstacleSet::default(), &flat());
        assert!(player.position().abs_diff_eq(start, 1e-6));
    }

    #[test]
    fn obstacle_rejects_whole_displacement() {
        // Box spanning x in [4, 6], tall enough to overlap the player vertically.
        let obstacles = ObstacleSet::build(&[ObstacleDef::new(
            Vec3::new(2.0, 4.0, 2.0),
            Vec3::new(5.0, 1.0, 0.0),
        )]);
        let terrain = flat();
        let mut player = PlayerController::spawn(params(), 3.0, 0.0, &terrain);
        let right = held(|i| i.right = true);

        // 0.05s * 5 = 0.25 per step: 3.0 -> 3.25 clears, 3.5 would touch x = 4.
        assert!(!player.update(0.05, &right, &obstacles, &terrain).blocked);
        assert!((player.position().x - 3.25).abs() < 1e-5);
        for _ in 0..10 {
            assert!(player.update(0.05, &right, &obstacles, &terrain).blocked);
        }
        assert!((player.position().x - 3.25).abs() < 1e-5);
        assert!(player.position().x <= 3.5);
        assert!(player.bounds().max.x < 4.0);
    }

    #[test]
    fn blocked_diagonal_does_not_slide() {
        let obstacles = ObstacleSet::build(&[ObstacleDef::new(
            Vec3::new(2.0, 4.0, 20.0),
            Vec3::new(5.0, 1.0, 0.0),
        )]);
        let terrain = flat();
        let mut player = PlayerController::spawn(params(), 3.4, 0.0, &terrain);
        let start = player.position();
        let diag = held(|i| {
            i.forward = true;
            i.right = true;
        });
        let motion = player.update(0.1, &diag, &obstacles, &terrain);
        assert!(motion.blocked);
        assert!(player.position().abs_diff_eq(start, 1e-6));
    }

    #[test]
    fn clear_move_is_fully_applied() {
        let obstacles = ObstacleSet::build(&[ObstacleDef::new(
            Vec3::splat(2.0),
            Vec3::new(5.0, 1.0, 0.0),
        )]);
        let terrain = flat();
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &terrain);
        let start = player.position();
        player.update(0.1, &held(|i| i.back = true), &obstacles, &terrain);
        assert!((player.position() - start).abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5));
    }

    #[test]
    fn jump_reaches_apex_and_lands() {
        let terrain = flat();
        let obstacles = ObstacleSet::default();
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &terrain);
        let dt = 1.0 / 120.0;

        let motion = player.update(dt, &held(|i| i.jump = true), &obstacles, &terrain);
        assert!(motion.jumped);
        assert_eq!(player.kinematics().ground, GroundState::Airborne);

        let idle = Intents::default();
        let mut t = dt;
        while player.kinematics().vertical_velocity > 0.0 {
            player.update(dt, &idle, &obstacles, &terrain);
            t += dt;
            assert!(t < 1.0, "never reached apex");
        }
        // 8 / 25 = 0.32
        assert!((t - 0.32).abs() <= 2.0 * dt, "apex at {t}");
        let apex = player.position().y;
        assert!(apex > 2.0);

        let mut landed = false;
        for _ in 0..240 {
            if player.update(dt, &idle, &obstacles, &terrain).landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(player.kinematics().ground, GroundState::Grounded);
        assert_eq!(player.kinematics().vertical_velocity, 0.0);
        assert_eq!(player.position().y, 1.0);
    }

    #[test]
    fn jump_ignored_while_airborne() {
        let terrain = flat();
        let obstacles = ObstacleSet::default();
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &terrain);
        let jump = held(|i| i.jump = true);
        player.update(0.05, &jump, &obstacles, &terrain);
        let vy = player.kinematics().vertical_velocity;
        let motion = player.update(0.05, &jump, &obstacles, &terrain);
        assert!(!motion.jumped);
        assert!(player.kinematics().vertical_velocity < vy);
    }

    #[test]
    fn grounded_rest_is_idempotent() {
        let terrain = HeightField::generate(100.0, 50, 20.0, 5.0, &mut fastrand::Rng::with_seed(5));
        let obstacles = ObstacleSet::default();
        let mut player = PlayerController::spawn(params(), 7.3, -12.9, &terrain);
        let idle = Intents::default();
        player.update(1.0 / 60.0, &idle, &obstacles, &terrain);
        let y = player.position().y;
        for _ in 0..100 {
            player.update(1.0 / 60.0, &idle, &obstacles, &terrain);
            assert_eq!(player.position().y, y);
            assert!(player.is_grounded());
            assert_eq!(player.kinematics().vertical_velocity, 0.0);
        }
    }

    #[test]
    fn walking_uphill_snaps_to_surface() {
        let terrain = HeightField::from_fn(100.0, 20, |_, z| -0.5 * z);
        let obstacles = ObstacleSet::default();
        let mut player = PlayerController::spawn(params(), 0.0, 0.0, &terrain);
        let forward = held(|i| i.forward = true);
        for _ in 0..10 {
            player.update(0.1, &forward, &obstacles, &terrain);
        }
        let pos = player.position();
        assert!((pos.z + 5.0).abs() < 1e-3);
        assert!((pos.y - (terrain.height_at(pos.x, pos.z) + 1.0)).abs() < 1e-4);
        assert!(player.is_grounded());
    }
}
