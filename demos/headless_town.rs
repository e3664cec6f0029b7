use glam::Vec3;
use scenery::animation::{AnimationClip, Animator, ClipLibrary, Keyframe};
use scenery::controller::{FollowCamera, InputState, Key, RobotController};
use scenery::settings::ViewerSettings;
use scenery::world::{self, World};

const FRAMES: u32 = 240;
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Raw frame delta, with one simulated stall.
fn raw_frame_time(frame: u32) -> f32 {
    if frame == 100 { 0.75 } else { FRAME_TIME }
}

/// Keys held down on a given frame of the scripted run.
fn scripted_keys(frame: u32, key: Key) -> bool {
    match key {
        Key::R => frame == 1,
        Key::W => (10..120).contains(&frame),
        Key::A => (60..90).contains(&frame),
        Key::Z => (130..150).contains(&frame),
        Key::X => frame == 200,
        Key::Escape => frame == FRAMES - 1,
        _ => false,
    }
}

/// Simple two-pose swing used when no recorded clips are on disk.
fn swing_clip(bone: &str, amplitude: f32) -> AnimationClip {
    let pose = |angle: f32| Keyframe::new(Vec3::ZERO, Vec3::new(angle, 0.0, 0.0), Vec3::ONE, 8.0);
    AnimationClip::new(world::clip_name(bone), vec![pose(amplitude), pose(-amplitude)])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => ViewerSettings::load(path)?,
        None => ViewerSettings::default(),
    };

    // 1. Scene
    let mut world = World::build(&settings)?;

    // 2. Clips
    let mut library = ClipLibrary::new(&settings.clip_dir);
    if world::load_robot_clips(&mut library)? == 0 {
        log::warn!("No recorded clips found, using generated swings");
        for bone in world::WALK_BONES {
            library.insert(swing_clip(bone, 25.0));
        }
    }
    let mut animator = Animator::new(library);

    // 3. Controllers
    let mut input = InputState::with_all_keys();
    let mut controller = RobotController::new(world.robot.bindings(), settings.robot.clone());
    let mut camera = FollowCamera::from_settings(&settings.camera);

    for frame in 0..FRAMES {
        let dt = settings.clamp_dt(raw_frame_time(frame));
        input.process(|key| scripted_keys(frame, key));

        let output = controller.handle_input(&input, dt, &mut world.scene, &mut animator);
        if let Some(locked) = output.cursor_locked {
            log::info!("Cursor {}", if locked { "locked" } else { "released" });
        }
        if output.quit {
            log::info!("Quit requested on frame {frame}");
            break;
        }

        if frame == 180 {
            let removed = world.scene.remove_children_by_label(world.town.houses, "Rows 0");
            log::info!("Demolished {removed} row(s) of houses");
        }

        world.update(dt);
        camera.sync_flashlight(&mut world.scene, world.lights.flashlight, &mut world.light_uniforms);
        animator.update(dt, &mut world.scene);

        if controller.is_controlling() {
            camera.follow(&world.scene, world.robot.camera_handle, world.robot.torso, dt);
        }

        let draws = world.scene.draw_list();
        let skybox_draws = draws.iter().filter(|d| d.samples_skybox()).count();
        let mut uploaded = 0;
        for batch in [world.town.body_batch, world.town.roof_batch] {
            if let Some(batch) = world.instances.get_mut(batch)
                && batch.is_dirty()
            {
                uploaded += batch.as_bytes().len();
                batch.clear_dirty();
            }
        }

        if frame % 30 == 0 {
            let torso = world
                .scene
                .get_node(world.robot.torso)
                .map(|n| n.transform.world_position())
                .unwrap_or_default();
            log::info!(
                "frame {frame}: {} draws ({skybox_draws} with skybox), {uploaded} instance bytes, torso at {torso:.2}, camera at {:.2}",
                draws.len(),
                camera.position,
            );
        }
    }

    for (name, value) in world.light_uniforms.uniform_writes().iter().take(6) {
        log::debug!("{name} = {value:?}");
    }

    Ok(())
}
