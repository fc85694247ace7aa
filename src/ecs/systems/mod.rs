pub mod collect;

use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::input::Intents;
use crate::inventory::Inventory;
use crate::obstacle::ObstacleSet;
use crate::player::{PlayerController, StepMotion};
use crate::present::Presenter;
use crate::resource::ResourceField;
use crate::terrain::HeightSampler;
use collect::CollectBuffers;

/// Run all simulation systems for one step, in order.
pub fn tick(
    dt: f32,
    intents: &Intents,
    player: &mut PlayerController,
    obstacles: &ObstacleSet,
    terrain: &impl HeightSampler,
    field: &mut ResourceField,
    inventory: &mut Inventory,
    pickup_radius: f32,
    collect_bufs: &mut CollectBuffers,
    presenter: &mut dyn Presenter,
    timers: &mut SystemTimers,
) -> (StepMotion, usize) {
    // 1. Player kinematics, including the ground snap
    timers.begin();
    let motion = player.update(dt, intents, obstacles, terrain);
    timers.end(SystemPhase::Movement);

    // 2. Collection, from the post-movement position
    timers.begin();
    let collected = if intents.interact {
        collect::update(
            field,
            inventory,
            player.position(),
            pickup_radius,
            collect_bufs,
            presenter,
        )
    } else {
        0
    };
    timers.end(SystemPhase::Collection);

    (motion, collected)
}
