use std::collections::HashSet;

use glam::Vec3;
use thiserror::Error;

use crate::obstacle::ObstacleDef;
use crate::resource::{ResourceKind, DEFAULT_KINDS};

/// Errors raised when validating world parameters before the loop starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("play area size must be positive, got {0}")]
    PlayAreaSize(f32),
    #[error("cell size must be positive, got {0}")]
    CellSize(f32),
    #[error("pickup radius {radius} must be positive and smaller than cell size {cell_size}")]
    PickupRadius { radius: f32, cell_size: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("spawn margin {margin} leaves no room inside play area {size}")]
    SpawnMargin { margin: f32, size: f32 },
    #[error("terrain needs at least one segment per side")]
    TerrainSegments,
    #[error("no resource kinds configured")]
    NoResourceKinds,
    #[error("resource count per kind must be at least 1")]
    ZeroResourceCount,
    #[error("resource kind `{0}` listed more than once")]
    DuplicateKind(&'static str),
    #[error("resource kind `{0}` has a negative half-height")]
    KindHalfHeight(&'static str),
    #[error("obstacle {index} has a degenerate size {size:?}")]
    ObstacleSize { index: usize, size: Vec3 },
}

/// Static world parameters, supplied once at startup.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Side length of the square play area, centered on the origin.
    pub play_area_size: f32,
    /// Spatial grid cell edge length.
    pub cell_size: f32,
    /// Horizontal speed in units/second, per active direction.
    pub move_speed: f32,
    /// Initial upward velocity of a jump.
    pub jump_impulse: f32,
    /// Downward acceleration in units/second².
    pub gravity: f32,
    /// Resources strictly closer than this (3D) are collected on interact.
    pub pickup_radius: f32,
    pub player_radius: f32,
    /// Height of the capsule's cylindrical section.
    pub player_height: f32,
    pub resource_kinds: Vec<ResourceKind>,
    pub resource_count_per_kind: usize,
    /// Keeps spawns this far inside the play area edge.
    pub spawn_margin: f32,
    pub obstacles: Vec<ObstacleDef>,
    /// Quads per terrain side.
    pub terrain_segments: usize,
    pub noise_scale: f32,
    pub elevation_scale: f32,
    /// Upper bound on a single step's elapsed time (seconds).
    pub max_frame_dt: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            play_area_size: 100.0,
            cell_size: 10.0,
            move_speed: 5.0,
            jump_impulse: 8.0,
            gravity: 25.0,
            pickup_radius: 2.5,
            player_radius: 0.5,
            player_height: 1.0,
            resource_kinds: DEFAULT_KINDS.to_vec(),
            resource_count_per_kind: 15,
            spawn_margin: 2.0,
            obstacles: vec![
                ObstacleDef::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(5.0, 1.0, 0.0)),
                ObstacleDef::new(Vec3::new(1.0, 3.0, 1.0), Vec3::new(-3.0, 1.5, 2.0)),
                ObstacleDef::new(Vec3::new(4.0, 1.0, 2.0), Vec3::new(0.0, 0.5, -4.0)),
            ],
            terrain_segments: 50,
            noise_scale: 20.0,
            elevation_scale: 5.0,
            max_frame_dt: 0.1,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Distance from the player's center down to its feet.
    pub fn player_half_height(&self) -> f32 {
        self.player_height * 0.5 + self.player_radius
    }

    /// Half-extent of the square spawn region.
    pub fn spawn_extent(&self) -> f32 {
        self.play_area_size * 0.5 - self.spawn_margin
    }

    /// Reject parameters the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.play_area_size > 0.0) {
            return Err(ConfigError::PlayAreaSize(self.play_area_size));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        // The 3x3 neighborhood only covers the pickup sphere when it fits in one cell.
        if !(self.pickup_radius > 0.0 && self.pickup_radius < self.cell_size) {
            return Err(ConfigError::PickupRadius {
                radius: self.pickup_radius,
                cell_size: self.cell_size,
            });
        }
        for (name, value) in [
            ("move speed", self.move_speed),
            ("jump impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("player radius", self.player_radius),
            ("player height", self.player_height),
            ("noise scale", self.noise_scale),
            ("max frame dt", self.max_frame_dt),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.spawn_margin >= 0.0 && self.spawn_extent() > 0.0) {
            return Err(ConfigError::SpawnMargin {
                margin: self.spawn_margin,
                size: self.play_area_size,
            });
        }
        if self.terrain_segments == 0 {
            return Err(ConfigError::TerrainSegments);
        }
        if self.resource_kinds.is_empty() {
            return Err(ConfigError::NoResourceKinds);
        }
        if self.resource_count_per_kind == 0 {
            return Err(ConfigError::ZeroResourceCount);
        }
        let mut seen = HashSet::new();
        for kind in &self.resource_kinds {
            if !seen.insert(kind.id) {
                return Err(ConfigError::DuplicateKind(kind.id.0));
            }
            if kind.half_height < 0.0 {
                return Err(ConfigError::KindHalfHeight(kind.id.0));
            }
        }
        for (index, def) in self.obstacles.iter().enumerate() {
            if !def.size.cmpgt(Vec3::ZERO).all() {
                return Err(ConfigError::ObstacleSize {
                    index,
                    size: def.size,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.player_half_height(), 1.0);
        assert_eq!(config.spawn_extent(), 48.0);
    }

    #[test]
    fn rejects_bad_cell_size() {
        let config = WorldConfig {
            cell_size: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::CellSize(-1.0)));
    }

    #[test]
    fn rejects_zero_counts_and_empty_kinds() {
        let zero = WorldConfig {
            resource_count_per_kind: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroResourceCount));

        let empty = WorldConfig {
            resource_kinds: Vec::new(),
            ..Default::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::NoResourceKinds));
    }

    #[test]
    fn pickup_radius_must_fit_in_a_cell() {
        let config = WorldConfig {
            pickup_radius: 12.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PickupRadius { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_kinds() {
        let mut config = WorldConfig::default();
        config.resource_kinds.push(DEFAULT_KINDS[0]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateKind("pastelFlower"))
        );
    }

    #[test]
    fn rejects_flat_obstacles() {
        let mut config = WorldConfig::default();
        config
            .obstacles
            .push(ObstacleDef::new(Vec3::new(1.0, 0.0, 1.0), Vec3::ZERO));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ObstacleSize { index: 3, .. })
        ));
    }

    #[test]
    fn rejects_nan_gravity() {
        let config = WorldConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "gravity", .. })
        ));
    }
}
