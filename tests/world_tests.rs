//! World Builder Tests
//!
//! Tests for:
//! - Spawned hierarchy (props, lights, houses, robot)
//! - Instance batches seeded and kept in sync with house nodes
//! - Robot clip loading from a clip directory
//! - Settings-driven grid size

use std::fs;

use glam::Vec3;
use scenery::animation::{ClipLibrary, Keyframe};
use scenery::scene::{LightKind, Material, ShaderProgram};
use scenery::settings::ViewerSettings;
use scenery::world::{self, World};

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn build() -> World {
    World::build(&ViewerSettings::default()).unwrap()
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn default_world_has_four_houses_in_two_rows() {
    let world = build();
    let scene = &world.scene;

    assert_eq!(world.town.rows.len(), 2);
    assert_eq!(world.town.house_count(scene), 4);
    assert!(scene.find("Rows 1").is_some());
    assert!(scene.find("House 3").is_some());
    assert!(scene.find("House 4").is_none());

    let house = scene.find("House 0").unwrap();
    let children: Vec<_> = scene
        .get_node(house)
        .unwrap()
        .children()
        .iter()
        .map(|&h| scene.get_node(h).unwrap().label().to_string())
        .collect();
    assert_eq!(children, ["Body", "Roof"]);
}

#[test]
fn houses_are_laid_out_on_the_grid() {
    let world = build();
    let scene = &world.scene;

    // Grid spans x, z in {-10, 0}, lifted by the houses group
    let house = scene.find("House 0").unwrap();
    let pos = scene.get_node(house).unwrap().transform.world_position();
    assert!(vec3_approx(pos, Vec3::new(-10.0, 2.0, -10.0)), "got {pos}");

    let roof = scene.find_from(house, "Roof").unwrap();
    let roof_pos = scene.get_node(roof).unwrap().transform.world_position();
    // Roof offset is scaled by the house
    assert!(vec3_approx(roof_pos, Vec3::new(-10.0, 6.0, -10.0)), "got {roof_pos}");
}

#[test]
fn instance_slots_match_house_parts() {
    let world = build();
    let scene = &world.scene;

    let bodies = world.instances.get(world.town.body_batch).unwrap();
    let roofs = world.instances.get(world.town.roof_batch).unwrap();
    assert_eq!(bodies.len(), 4);
    assert_eq!(roofs.len(), 4);
    assert_eq!(bodies.as_bytes().len(), 4 * 16 * 4);

    for id in 0..4 {
        let house = scene.find(&format!("House {id}")).unwrap();
        let body = scene.find_from(house, "Body").unwrap();
        let node = scene.get_node(body).unwrap();
        let binding = node.instance.unwrap();
        assert_eq!(binding.batch, world.town.body_batch);
        assert!(bodies.matrices()[binding.slot].abs_diff_eq(*node.world_matrix(), EPSILON));
    }
}

#[test]
fn moving_a_row_rewrites_its_instance_slots() {
    let mut world = build();
    for batch in [world.town.body_batch, world.town.roof_batch] {
        world.instances.get_mut(batch).unwrap().clear_dirty();
    }

    let row = world.town.rows[0];
    world
        .scene
        .get_node_mut(row)
        .unwrap()
        .transform
        .translate_local(Vec3::new(0.0, 5.0, 0.0));
    world.update(0.0);

    let house = world.scene.find("House 0").unwrap();
    let body = world.scene.find_from(house, "Body").unwrap();
    let node = world.scene.get_node(body).unwrap();
    let slot = node.instance.unwrap().slot;

    let bodies = world.instances.get(world.town.body_batch).unwrap();
    assert!(bodies.is_dirty());
    assert!(bodies.matrices()[slot].abs_diff_eq(*node.world_matrix(), EPSILON));
    assert!(vec3_approx(node.transform.world_position(), Vec3::new(-10.0, 7.0, -10.0)));
}

#[test]
fn removed_row_frees_its_instance_slots() {
    let mut world = build();
    let removed = world.scene.remove_children_by_label(world.town.houses, "Rows 0");
    assert_eq!(removed, 1);

    world.update(0.016);

    let scene = &world.scene;
    let live_bodies: Vec<_> = scene
        .walk_from(scene.root())
        .filter(|&h| scene.get_node(h).unwrap().label() == "Body")
        .collect();
    assert_eq!(live_bodies.len(), 2);

    for (batch, part) in [(world.town.body_batch, "Body"), (world.town.roof_batch, "Roof")] {
        let instances = world.instances.get(batch).unwrap();
        assert_eq!(instances.len(), 2, "{part}");
        assert!(instances.is_dirty());

        let mut slots = Vec::new();
        for handle in scene.walk_from(scene.root()) {
            let node = scene.get_node(handle).unwrap();
            if node.label() != part {
                continue;
            }
            let binding = node.instance.unwrap();
            assert_eq!(binding.batch, batch);
            assert!(instances.matrices()[binding.slot].abs_diff_eq(*node.world_matrix(), EPSILON));
            slots.push(binding.slot);
        }
        slots.sort_unstable();
        assert_eq!(slots, [0, 1]);
    }

    // Nothing left to release on later frames
    assert_eq!(world.scene.release_instances(&mut world.instances), 0);
}

#[test]
fn robot_rig_is_assembled() {
    let world = build();
    let scene = &world.scene;
    let rig = &world.robot;

    let torso = scene.get_node(rig.torso).unwrap();
    assert_eq!(torso.label(), "Torso");
    assert!(vec3_approx(torso.transform.world_position(), Vec3::new(0.0, 9.0, 30.0)));

    assert_eq!(scene.get_node(rig.visor).unwrap().parent(), Some(rig.head));
    assert_eq!(scene.get_node(rig.left_leg).unwrap().parent(), Some(rig.left_thigh));
    assert_eq!(scene.get_node(rig.right_forearm).unwrap().parent(), Some(rig.right_arm));
    assert_eq!(scene.get_node(rig.visor).unwrap().material, Material::Reflective);
    assert_eq!(scene.get_node(rig.screen).unwrap().material, Material::Refractive);

    let handle = scene.get_node(rig.camera_handle).unwrap();
    assert!(vec3_approx(handle.transform.world_position(), Vec3::new(0.0, 19.0, 13.0)));

    for bone in world::ROBOT_BONES {
        assert_eq!(scene.find(bone), rig.bone(bone), "{bone}");
    }

    let bindings = rig.bindings();
    assert_eq!(bindings.walk.len(), world::WALK_BONES.len());
    assert_eq!(bindings.walk[0], ("robot/Head".to_string(), rig.head));
}

// ============================================================================
// Lights
// ============================================================================

#[test]
fn light_rig_is_published() {
    let world = build();
    let store = &world.light_uniforms;

    assert_eq!(world.scene.lights.len(), 4);
    assert_eq!(store.len(), 4);

    let flashlight = store.get(LightKind::Spot, 0).unwrap();
    assert!(!flashlight.is_on);
    let overhead = store.get(LightKind::Spot, 1).unwrap();
    assert!(vec3_approx(overhead.direction, Vec3::NEG_Y));
    let bulb = store.get(LightKind::Point, 0).unwrap();
    assert!(vec3_approx(bulb.diffuse, Vec3::new(0.0, 0.0, 1.0)));
}

#[test]
fn moving_point_light_orbits_its_handle() {
    let mut world = build();
    let start = world
        .scene
        .get_node(world.lights.moving_point)
        .unwrap()
        .transform
        .world_position();

    world.update(1.0);
    world.update(0.0);

    let moved = world
        .scene
        .get_node(world.lights.moving_point)
        .unwrap()
        .transform
        .world_position();
    assert!((moved - start).length() > 1.0);
    // Radius around the pivot at (0, 10, 0) is preserved
    assert!(((moved - Vec3::new(0.0, 10.0, 0.0)).length() - 15.0).abs() < 1e-3);

    let pushed = world.light_uniforms.get(LightKind::Point, 0).unwrap().position;
    assert!(vec3_approx(pushed, moved));
}

#[test]
fn draw_list_uses_emission_for_light_gizmos() {
    let world = build();
    let draws = world.scene.draw_list();

    let bulb = draws.iter().find(|d| d.label == "Moving Point Light").unwrap();
    assert_eq!(bulb.shader(), ShaderProgram::Emission);
    assert!(draws.iter().all(|d| d.instance.is_none()));
    assert!(!bulb.samples_skybox());
    let backpack = draws.iter().find(|d| d.label == "Backpack reflective").unwrap();
    assert!(backpack.samples_skybox());
    // Houses only come through their batches
    assert!(!draws.iter().any(|d| d.label == "Body"));
}

// ============================================================================
// Settings & Clips
// ============================================================================

#[test]
fn town_size_follows_settings() {
    let mut settings = ViewerSettings::default();
    settings.town.width = 4;
    settings.town.height = 6;
    settings.town.tilt_houses = true;

    let world = World::build(&settings).unwrap();
    assert_eq!(world.town.rows.len(), 4);
    assert_eq!(world.town.house_count(&world.scene), 24);
    assert_eq!(world.instances.get(world.town.roof_batch).unwrap().len(), 24);

    let house = world.scene.find("House 0").unwrap();
    let tilt = world.scene.get_node(house).unwrap().transform.rotation();
    assert!(tilt.x.abs() <= 5.0 && tilt.z.abs() <= 5.0);
}

#[test]
fn load_robot_clips_skips_missing_files() {
    let dir = std::env::temp_dir().join(format!("scenery-clips-{}", uuid::Uuid::new_v4()));
    let mut library = ClipLibrary::new(&dir);
    let step = Keyframe::new(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0), Vec3::ONE, 4.0);
    library.record_keyframe(&world::clip_name("LeftLeg"), &step).unwrap();
    library.record_keyframe(&world::clip_name("Head"), &step).unwrap();

    let loaded = world::load_robot_clips(&mut library).unwrap();
    assert_eq!(loaded, 2);
    assert!(library.contains("robot/LeftLeg"));
    assert!(!library.contains("robot/Torso"));

    fs::write(library.clip_path("robot/Visor"), "not a clip\n").unwrap();
    assert!(world::load_robot_clips(&mut library).is_err());

    let _ = fs::remove_dir_all(&dir);
}
