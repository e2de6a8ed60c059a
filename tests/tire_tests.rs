use pneu::{build_soft_contacts, Aabb, Tire, TireConfig, Vec2, World, WorldConfig};

fn quiet_world() -> World<f32> {
    World::new(
        WorldConfig::new()
            .with_gravity(0.0)
            .with_damping(1.0)
            .with_iterations(8),
    )
    .unwrap()
}

fn eight_segment_config() -> TireConfig<f32> {
    TireConfig { segments: 8, ..TireConfig::default() }
}

#[test]
fn dropped_tire_settles_on_padded_ground() {
    // Gravity 900, dt 1/60, 18 iterations, damping 0.985 — the defaults.
    let mut world = World::new(WorldConfig::new()).unwrap();
    let tire = Tire::new(&mut world, Vec2::new(200.0, 200.0), &eight_segment_config()).unwrap();
    tire.add_ground_contacts(&mut world, 380.0, 12.0);

    let lowest = |world: &World<f32>| -> f32 {
        let outer = tire.outer_positions(world);
        let inner = tire.inner_positions(world);
        outer.iter().chain(inner.iter()).map(|p| p.y).fold(f32::MIN, f32::max)
    };

    for _ in 0..500 {
        world.step();
    }
    let settled = lowest(&world);

    for _ in 0..100 {
        world.step();
    }
    let final_lowest = lowest(&world);

    // Resting exactly on the padded line at 380 - 12 = 368, never below it.
    assert!(final_lowest <= 368.0 + 1e-3, "penetrated: lowest = {}", final_lowest);
    assert!(final_lowest >= 366.0, "hovering: lowest = {}", final_lowest);
    assert!(
        (final_lowest - settled).abs() < 0.5,
        "still moving: {} -> {}",
        settled,
        final_lowest
    );
}

#[test]
fn steer_kicks_outer_particles_along_tangent() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    tire.steer(&mut world, 40.0);

    // outer[0] sits at angle 0: radial (1, 0), tangent (0, 1).
    let v = world.particle(tire.outer_indices()[0]).vel;
    assert!(v.x.abs() < 1e-4, "vel.x = {}", v.x);
    assert!((v.y - 0.07 * 40.0).abs() < 1e-4, "vel.y = {}", v.y);

    // Every kick is perpendicular to its radial.
    let hub = tire.hub_position(&world);
    for &i in tire.outer_indices() {
        let p = world.particle(i);
        let radial = p.pos - hub;
        assert!(radial.dot(p.vel).abs() < 1e-3);
    }
}

#[test]
fn steer_zero_direction_is_a_no_op() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    tire.steer(&mut world, 0.0);

    for &i in tire.outer_indices() {
        assert_eq!(world.particle(i).vel, Vec2::zero());
    }
}

#[test]
fn inflate_pushes_outward_along_radials() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    tire.inflate(&mut world);

    // outer[0] sits at angle 0: radial (1, 0).
    let v = world.particle(tire.outer_indices()[0]).vel;
    assert!((v.x - 0.002).abs() < 1e-6, "vel.x = {}", v.x);
    assert!(v.y.abs() < 1e-6);

    let hub = tire.hub_position(&world);
    for &i in tire.outer_indices() {
        let p = world.particle(i);
        let radial = p.pos - hub;
        assert!(radial.dot(p.vel) > 0.0, "impulse must point outward");
    }
}

#[test]
fn impulse_hits_rings_uniformly_but_not_the_hub() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    tire.apply_impulse(&mut world, Vec2::new(3.0, -4.0));

    for &i in tire.outer_indices().iter().chain(tire.inner_indices().iter()) {
        assert_eq!(world.particle(i).vel, Vec2::new(3.0, -4.0));
    }
    assert_eq!(world.particle(tire.hub_index()).vel, Vec2::zero());
}

#[test]
fn stiffness_edits_apply_live() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    tire.set_stiffness(&mut world, 0.5, 0.6, 0.7);

    let mut seen = [0usize; 3];
    for i in 0..world.constraint_count() {
        if let pneu::Constraint::Distance(c) = world.constraint(i) {
            if c.stiffness == 0.5 {
                seen[0] += 1;
            } else if c.stiffness == 0.6 {
                seen[1] += 1;
            } else if c.stiffness == 0.7 {
                seen[2] += 1;
            }
        }
    }
    assert_eq!(seen, [8, 8, 8]);
}

#[test]
fn mass_scale_adjusts_inverse_masses() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    tire.set_mass_scale(&mut world, 2.0);

    for &i in tire.outer_indices() {
        assert!((world.particle(i).inv_mass - 0.5).abs() < 1e-6);
    }
    for &i in tire.inner_indices() {
        assert!((world.particle(i).inv_mass - 1.0 / 2.8).abs() < 1e-6);
    }
    // Hub keeps its own mass.
    assert!((world.particle(tire.hub_index()).inv_mass - 0.2).abs() < 1e-6);
}

#[test]
fn mass_scale_ignores_degenerate_values() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    let before = world.particle(tire.outer_indices()[0]).inv_mass;
    tire.set_mass_scale(&mut world, 0.0);
    tire.set_mass_scale(&mut world, f32::NAN);

    assert_eq!(world.particle(tire.outer_indices()[0]).inv_mass, before);
}

#[test]
fn rest_area_calibrates_on_first_step() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    assert_eq!(tire.rest_area(&world), None);
    let area_before = tire.area(&world);
    assert!(area_before > 0.0);

    world.step();

    let rest = tire.rest_area(&world).unwrap();
    assert!((rest - area_before).abs() < 1e-2, "rest = {}, built = {}", rest, area_before);
}

#[test]
fn unperturbed_ring_does_not_drift() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(100.0, 100.0), &eight_segment_config()).unwrap();

    let before = tire.outer_positions(&world);
    for _ in 0..50 {
        world.step();
    }
    let after = tire.outer_positions(&world);

    for (a, b) in before.iter().zip(after.iter()) {
        assert!(a.distance(*b) < 1e-3, "drift: {:?} -> {:?}", a, b);
    }
}

#[test]
fn is_grounded_on_floor_line() {
    let mut world = quiet_world();
    // Lowest outer particle sits at 330 + 50 = 380.
    let tire = Tire::new(&mut world, Vec2::new(200.0, 330.0), &eight_segment_config()).unwrap();

    assert!(tire.is_grounded(&world, 380.0, &[], 0.1));
    assert!(!tire.is_grounded(&world, 500.0, &[], 0.1));
}

#[test]
fn is_grounded_on_box_top() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(200.0, 330.0), &eight_segment_config()).unwrap();
    let rect = Aabb::from_origin_size(Vec2::new(150.0, 380.0), Vec2::new(100.0, 40.0));

    // Far from the floor line, but one particle rests on the box top.
    assert!(tire.is_grounded(&world, 1000.0, &[rect], 0.1));

    let elsewhere = Aabb::from_origin_size(Vec2::new(500.0, 380.0), Vec2::new(100.0, 40.0));
    assert!(!tire.is_grounded(&world, 1000.0, &[elsewhere], 0.1));
}

#[test]
fn horizontal_speed_limit_clamps_both_signs() {
    let mut world = quiet_world();
    let tire = Tire::new(&mut world, Vec2::new(0.0, 0.0), &eight_segment_config()).unwrap();

    tire.apply_impulse(&mut world, Vec2::new(500.0, 0.0));
    tire.limit_horizontal_speed(&mut world, 250.0);
    for &i in tire.outer_indices() {
        assert_eq!(world.particle(i).vel.x, 250.0);
    }

    tire.apply_impulse(&mut world, Vec2::new(-900.0, 0.0));
    tire.limit_horizontal_speed(&mut world, 250.0);
    for &i in tire.outer_indices() {
        assert_eq!(world.particle(i).vel.x, -250.0);
    }
}

#[test]
fn overlapping_tires_build_contacts_and_separate() {
    let mut world = quiet_world();
    let a = Tire::new(&mut world, Vec2::new(100.0, 100.0), &eight_segment_config()).unwrap();
    let b = Tire::new(&mut world, Vec2::new(192.0, 100.0), &eight_segment_config()).unwrap();

    let nearest = |world: &World<f32>| -> f32 {
        let mut best = f32::MAX;
        for pa in a.outer_positions(world) {
            for pb in b.outer_positions(world) {
                best = best.min(pa.distance(pb));
            }
        }
        best
    };

    let before = nearest(&world);
    assert!(before < 10.0, "setup should overlap, nearest = {}", before);

    world.clear_contacts();
    build_soft_contacts(&mut world, &[&a, &b], 10.0, 0.2);
    assert!(world.contact_count() > 0);
    world.step();

    for _ in 0..19 {
        world.clear_contacts();
        build_soft_contacts(&mut world, &[&a, &b], 10.0, 0.2);
        world.step();
    }

    let after = nearest(&world);
    assert!(after > before, "contacts should push apart: {} -> {}", before, after);

    world.clear_contacts();
    assert_eq!(world.contact_count(), 0);
}
