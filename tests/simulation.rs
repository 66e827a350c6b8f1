use approx::assert_relative_eq;
use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use gravity_assist::engine::world_bounds::BoundsViolation;
use gravity_assist::orbit::{Command, Craft, Removal, SimConfig, SimContext, Simulation};

fn simulation() -> Simulation {
    Simulation::new(SimContext::default())
}

fn drop_craft(sim: &mut Simulation, position: Vec2, velocity: Vec2) {
    let craft = Craft::from_config(position, velocity, sim.config());
    sim.add_craft(craft);
}

#[test]
fn craft_past_the_margin_is_removed() {
    let mut sim = simulation();
    drop_craft(&mut sim, Vec2::new(800.0 + 51.0, 300.0), Vec2::ZERO);
    assert_eq!(
        sim.removal(&sim.crafts()[0]),
        Some(Removal::OutOfBounds(BoundsViolation::Right(1.0)))
    );

    sim.prune();
    assert!(sim.crafts().is_empty());
}

#[test]
fn craft_touching_the_planet_is_removed() {
    let mut sim = simulation();
    let planet = sim.planet().position();
    let reach = sim.planet().radius() + sim.config().craft_collision_radius();

    drop_craft(&mut sim, planet + Vec2::new(reach - 1.0, 0.0), Vec2::ZERO);
    sim.prune();
    assert!(sim.crafts().is_empty());
}

#[test]
fn far_craft_is_kept() {
    let mut sim = simulation();
    drop_craft(&mut sim, Vec2::new(100.0, 100.0), Vec2::ZERO);
    sim.prune();
    assert_eq!(sim.crafts().len(), 1);
}

#[test]
fn resting_craft_falls_faster_and_faster_until_it_hits() {
    let mut sim = simulation();
    let planet = sim.planet().position();
    drop_craft(&mut sim, planet - Vec2::new(0.0, 150.0), Vec2::ZERO);

    let mut previous_vy = 0.0;
    let mut ticks = 0;
    while let Some(before) = sim.crafts().first().cloned() {
        assert!(ticks < 1000, "craft never reached the planet");
        sim.tick();
        ticks += 1;

        if let Some(craft) = sim.crafts().first() {
            assert!(craft.velocity.y > previous_vy);
            assert!(craft.position.y < planet.y);
            previous_vy = craft.velocity.y;
        } else {
            // Removed on the tick it came within reach of the surface
            let reach = sim.planet().radius() + sim.config().craft_collision_radius();
            assert!(craft_position_after_tick(&before, &sim).distance(planet) <= reach);
        }
    }
    assert!(ticks > 1);
}

fn craft_position_after_tick(before: &Craft, sim: &Simulation) -> Vec2 {
    let mut craft = before.clone();
    craft.update(sim.planet());
    craft.position
}

#[test]
fn reset_empties_the_sky() {
    let mut sim = simulation();
    for i in 0..5 {
        sim.apply(Command::Press(Vec2::new(100.0 + i as f32 * 10.0, 100.0)));
        sim.apply(Command::Release(Vec2::new(150.0, 150.0)));
    }
    assert_eq!(sim.crafts().len(), 5);

    sim.apply(Command::Reset);
    assert!(sim.crafts().is_empty());
    assert!(sim.is_running());
}

#[test]
fn drag_sets_launch_velocity() {
    let mut sim = simulation();
    sim.apply(Command::Press(Vec2::new(120.0, 80.0)));
    sim.apply(Command::Release(Vec2::new(320.0, 30.0)));

    let craft = &sim.crafts()[0];
    assert_eq!(craft.position, Vec2::new(120.0, 80.0));
    assert_relative_eq!(craft.velocity.x, 2.0);
    assert_relative_eq!(craft.velocity.y, -0.5);
}

#[test]
fn trails_stay_bounded_and_aligned() {
    let config = SimConfig::default().with_max_trail_length(20);
    let mut sim = Simulation::new(SimContext {
        config,
        ..SimContext::default()
    });

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..12 {
        let position = Vec2::new(rng.random_range(0.0..200.0), rng.random_range(0.0..600.0));
        let velocity = Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
        drop_craft(&mut sim, position, velocity);
    }

    for _ in 0..300 {
        sim.tick();
        for craft in sim.crafts() {
            let trail = craft.trail();
            assert!(trail.len() <= 20);
            assert_eq!(trail.points().count(), trail.speeds().count());
            assert!(sim.removal(craft).is_none());
        }
    }
}
