//! Demo world
//!
//! Procedural construction of the viewer's scene: ground and mirror cubes,
//! the light rig, a grid of instanced houses and the walking robot.

pub mod lights;
pub mod props;
pub mod robot;
pub mod town;

pub use lights::{LightRig, spawn_lights};
pub use props::{Props, spawn_props};
pub use robot::{ROBOT_BONES, RobotRig, WALK_BONES, clip_name, load_robot_clips, spawn_robot};
pub use town::{Town, spawn_town};

use crate::errors::Result;
use crate::scene::{InstanceBatches, LightUniforms, Scene, UpdateContext};
use crate::settings::ViewerSettings;

/// Everything the viewer spawns, with handles to the parts it drives.
pub struct World {
    pub scene: Scene,
    pub instances: InstanceBatches,
    pub light_uniforms: LightUniforms,
    pub props: Props,
    pub lights: LightRig,
    pub town: Town,
    pub robot: RobotRig,
}

impl World {
    /// Spawns the full scene, publishes the light payloads and runs one forced
    /// pass so every world matrix and instance slot is valid before the first
    /// frame.
    pub fn build(settings: &ViewerSettings) -> Result<Self> {
        let mut scene = Scene::new();
        let mut instances = InstanceBatches::new();
        let mut light_uniforms = LightUniforms::new();

        let props = spawn_props(&mut scene);
        let lights = spawn_lights(&mut scene)?;
        let town = spawn_town(&mut scene, &mut instances, &settings.town)?;
        let robot = spawn_robot(&mut scene)?;

        scene.publish_lights(&mut light_uniforms);
        scene.force_update(0.0, &mut UpdateContext::new(&mut light_uniforms, &mut instances));

        log::info!("World ready: {} nodes, {} lights", scene.len(), scene.lights.len());

        Ok(Self {
            scene,
            instances,
            light_uniforms,
            props,
            lights,
            town,
            robot,
        })
    }

    /// Per-frame scene pass.
    pub fn update(&mut self, dt: f32) {
        let mut ctx = UpdateContext::new(&mut self.light_uniforms, &mut self.instances);
        self.scene.update(dt, &mut ctx);
    }
}
