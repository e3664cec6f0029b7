use glam::Vec3;

use crate::errors::Result;
use crate::scene::{Light, ModelRef, Node, NodeHandle, Scene};

pub const BULB_MODEL: &str = "res/models/sun/sun.obj";
pub const SPOTLIGHT_MODEL: &str = "res/models/flashlight/flashlight.obj";
pub const ARROW_MODEL: &str = "res/models/arrow/arrow.obj";

/// Handles of the light nodes in the demo world.
#[derive(Debug, Clone, Copy)]
pub struct LightRig {
    pub directional: NodeHandle,
    /// Spinning pivot carrying the moving point light.
    pub moving_handle: NodeHandle,
    pub moving_point: NodeHandle,
    /// Camera-attached spot light, off by default.
    pub flashlight: NodeHandle,
    pub overhead_spot: NodeHandle,
}

pub fn spawn_lights(scene: &mut Scene) -> Result<LightRig> {
    let root = scene.root();

    // Directional light, pointing where its node is rotated to
    let dir_rotation = Vec3::new(45.0, -90.0, 0.0);
    let mut sun = Light::new_directional();
    sun.direction = Light::direction_from_euler(dir_rotation);
    sun.ambient = Vec3::splat(0.05);
    sun.diffuse = Vec3::splat(0.4);
    sun.specular = Vec3::splat(0.5);
    sun.intensity = 1.5;
    let directional = scene.add_light(
        root,
        Node::with_model("Dir Light", ModelRef::new(ARROW_MODEL))
            .at(Vec3::new(20.0, 40.0, 0.0))
            .rotated(dir_rotation),
        sun,
    )?;

    // Moving point light: a spinning pivot with the bulb offset along X
    let moving_handle = scene.add_to_root(
        Node::new("Moving Light Handle")
            .at(Vec3::new(0.0, 10.0, 0.0))
            .moving(),
    );
    let mut bulb = Light::new_point(0);
    bulb.ambient = Vec3::splat(0.55);
    bulb.diffuse = Vec3::new(0.0, 0.0, 1.0);
    bulb.specular = Vec3::ONE;
    bulb.intensity = 10.0;
    let moving_point = scene.add_light(
        moving_handle,
        Node::with_model("Moving Point Light", ModelRef::new(BULB_MODEL))
            .at(Vec3::new(15.0, 0.0, 0.0))
            .scaled(Vec3::splat(2.0)),
        bulb,
    )?;

    let mut torch = Light::new_spot(0);
    torch.ambient = Vec3::ZERO;
    torch.diffuse = Vec3::new(1.0, 0.0, 0.0);
    torch.specular = Vec3::ONE;
    torch.intensity = 20.0;
    torch.active = false;
    let flashlight = scene.add_light(root, Node::new("Spot Light Flashlight"), torch)?;

    let mut overhead = Light::new_spot(1);
    overhead.ambient = Vec3::ZERO;
    overhead.diffuse = Vec3::new(0.0, 1.0, 0.0);
    overhead.specular = Vec3::ONE;
    overhead.direction = Vec3::NEG_Y;
    overhead.intensity = 25.0;
    let overhead_spot = scene.add_light(
        root,
        Node::with_model("Spot Light 2", ModelRef::new(SPOTLIGHT_MODEL))
            .at(Vec3::new(-10.0, 30.0, 0.0))
            .rotated(Vec3::new(90.0, 0.0, 0.0)),
        overhead,
    )?;

    log::debug!("Spawned {} lights", scene.lights.len());

    Ok(LightRig {
        directional,
        moving_handle,
        moving_point,
        flashlight,
        overhead_spot,
    })
}
