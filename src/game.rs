use glam::Vec2;

use crate::config::{ConfigError, WorldConfig};
use crate::debug::timer::SystemTimers;
use crate::ecs::systems;
use crate::ecs::systems::collect::CollectBuffers;
use crate::input::Intents;
use crate::inventory::Inventory;
use crate::obstacle::ObstacleSet;
use crate::player::{PlayerController, PlayerParams, StepMotion};
use crate::present::Presenter;
use crate::resource::{ResourceCatalog, ResourceField};
use crate::terrain::HeightField;

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Elapsed time actually integrated, after clamping.
    pub dt: f32,
    pub motion: StepMotion,
    pub collected: usize,
}

/// All simulation state, created at world build and dropped at shutdown.
pub struct Game {
    config: WorldConfig,
    catalog: ResourceCatalog,
    terrain: HeightField,
    obstacles: ObstacleSet,
    player: PlayerController,
    field: ResourceField,
    inventory: Inventory,
    collect_bufs: CollectBuffers,
    timers: SystemTimers,
    /// One-shot intents and turn received on steps that integrated no time.
    deferred: Intents,
    steps: u64,
}

impl Game {
    /// Validate the config, raise the terrain and populate the world.
    pub fn build(config: WorldConfig, presenter: &mut dyn Presenter) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let terrain = HeightField::generate(
            config.play_area_size,
            config.terrain_segments,
            config.noise_scale,
            config.elevation_scale,
            &mut rng,
        );
        Self::on_terrain(config, terrain, &mut rng, presenter)
    }

    /// Build the world on a caller-supplied surface.
    pub fn on_terrain(
        config: WorldConfig,
        terrain: HeightField,
        rng: &mut fastrand::Rng,
        presenter: &mut dyn Presenter,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let catalog = ResourceCatalog::new(config.resource_kinds.clone());
        let obstacles = ObstacleSet::build(&config.obstacles);
        let player = PlayerController::spawn(PlayerParams::from_config(&config), 0.0, 0.0, &terrain);

        let half = config.play_area_size * 0.5;
        let mut field = ResourceField::new(Vec2::splat(-half), config.cell_size);
        field.populate(
            &catalog,
            config.resource_count_per_kind,
            config.spawn_extent(),
            &terrain,
            rng,
            presenter,
        );

        log::info!(
            "World built: {} resources over {} kinds, {} obstacles, {} grid cells in use",
            field.len(),
            catalog.len(),
            obstacles.len(),
            field.grid().bucket_count(),
        );
        log::info!("Player spawned at {:.2}", player.position());

        let collect_bufs = CollectBuffers::new(field.len());
        Ok(Self {
            config,
            catalog,
            terrain,
            obstacles,
            player,
            field,
            inventory: Inventory::new(),
            collect_bufs,
            timers: SystemTimers::new(),
            deferred: Intents::default(),
            steps: 0,
        })
    }

    /// Advance the simulation by `elapsed` seconds, clamped to `max_frame_dt`.
    /// Movement fully resolves before collection reads the player position.
    ///
    /// A step that integrates no time is skipped entirely. Its jump, interact
    /// and turn are held and applied on the next step that does.
    pub fn step(
        &mut self,
        elapsed: f32,
        intents: &Intents,
        presenter: &mut dyn Presenter,
    ) -> StepReport {
        let dt = self.clamp_dt(elapsed);
        if dt == 0.0 {
            self.deferred.jump |= intents.jump;
            self.deferred.interact |= intents.interact;
            self.deferred.turn += intents.turn;
            return StepReport {
                dt,
                motion: StepMotion::default(),
                collected: 0,
            };
        }

        let mut intents = *intents;
        let deferred = std::mem::take(&mut self.deferred);
        intents.jump |= deferred.jump;
        intents.interact |= deferred.interact;
        intents.turn += deferred.turn;

        let (motion, collected) = systems::tick(
            dt,
            &intents,
            &mut self.player,
            &self.obstacles,
            &self.terrain,
            &mut self.field,
            &mut self.inventory,
            self.config.pickup_radius,
            &mut self.collect_bufs,
            presenter,
            &mut self.timers,
        );
        self.steps += 1;
        StepReport {
            dt,
            motion,
            collected,
        }
    }

    fn clamp_dt(&self, elapsed: f32) -> f32 {
        if !(elapsed > 0.0) {
            return 0.0;
        }
        if elapsed > self.config.max_frame_dt {
            log::warn!(
                "Clamping frame delta {:.3}s to {:.3}s",
                elapsed,
                self.config.max_frame_dt
            );
            return self.config.max_frame_dt;
        }
        elapsed
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn resources(&self) -> &ResourceField {
        &self.field
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    #[cfg(test)]
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn timers(&self) -> &SystemTimers {
        &self.timers
    }

    /// Steps that integrated time; skipped zero-length steps are not counted.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[cfg(test)]
    fn resources_mut(&mut self) -> &mut ResourceField {
        &mut self.field
    }
}
