use glam::Vec2;
use satbox::*;

fn lcg(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}

struct PrintOutlines;

impl DebugDraw for PrintOutlines {
    fn outline(&mut self, center: Vec2, points: &[Vec2]) {
        let corners: Vec<String> = points
            .iter()
            .map(|p| format!("({:.2},{:.2})", center.x + p.x, center.y + p.y))
            .collect();
        println!("  outline: {}", corners.join(" "));
    }
}

fn main() -> Result<(), PhysicsError> {
    let mut colliders = ColliderRegistry::new();
    colliders.register(
        "wedge",
        vec![
            Vec2::new(0.0, 0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(-0.5, -0.5),
        ],
    )?;

    let mut engine = PhysicsEngine::new(EngineConfig {
        gravity: Vec2::new(0.0, -9.8),
        enable_timing: true,
        ..EngineConfig::default()
    });

    engine.add_body(
        Body::new_box(&mut colliders, 0.0, -0.5, 20.0, 1.0)?
            .with_static()
            .with_friction(0.6)?
            .with_tag("ground"),
    );
    let zone = engine.add_body(
        Body::new_box(&mut colliders, 0.0, 1.0, 4.0, 2.0)?
            .with_static()
            .with_trigger(true)
            .with_tag("zone"),
    );

    let mut seed = 7u32;
    let mut crates = Vec::new();
    for i in 0..6 {
        let x = (lcg(&mut seed) as f32 / u32::MAX as f32) * 8.0 - 4.0;
        let y = 3.0 + i as f32 * 1.5;
        let shape = if i % 3 == 0 { "wedge" } else { "box" };
        let body = Body::from_registry(&mut colliders, shape, Transform::new(x, y), 1.0, 1.0)?
            .with_mass(1.0 + i as f32)?
            .with_restitution(0.2)?
            .with_friction(0.4)?
            .with_tag("crate");
        crates.push(engine.add_body(body));
    }

    let dt = 1.0 / 60.0;
    for frame in 0..240 {
        engine.update(dt)?;
        if frame % 60 == 59 {
            let stats = engine.debug_stats();
            println!(
                "frame {}: contacts={} solved={}/{}",
                frame + 1,
                stats.contacts,
                stats.collisions_solved,
                stats.collisions_queued
            );
            if let Some(t) = engine.timing() {
                println!(
                    "  timing: step={:.3}ms detect={:.3}ms solve={:.3}ms integrate={:.3}ms",
                    t.step_ms, t.detect_ms, t.solve_ms, t.integrate_ms
                );
            }
        }
    }

    for &h in &crates {
        let body = engine.try_body(h)?;
        println!(
            "crate {:?}: pos=({:.2},{:.2}) grounded={} in_zone={}",
            h,
            body.pos().x,
            body.pos().y,
            engine.is_colliding_with(h, "ground"),
            engine.is_colliding_with(h, "zone"),
        );
    }
    if let Some(report) = engine.contacts(zone) {
        println!("zone touched by {} tag(s)", report.tags().len());
    }

    engine.debug_draw(&mut PrintOutlines);
    Ok(())
}
