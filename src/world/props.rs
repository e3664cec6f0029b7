use glam::Vec3;

use crate::scene::{Material, ModelRef, Node, NodeHandle, Scene};

pub const GROUND_MODEL: &str = "res/models/ground/ground.obj";
pub const CUBE_MODEL: &str = "res/models/cube/cube.obj";

/// Static set dressing.
#[derive(Debug, Clone, Copy)]
pub struct Props {
    pub ground: NodeHandle,
    pub reflective_cube: NodeHandle,
    pub refractive_cube: NodeHandle,
}

/// Ground plane plus one reflective and one refractive cube, all under the root.
pub fn spawn_props(scene: &mut Scene) -> Props {
    let ground = scene.add_to_root(
        Node::with_model("Ground", ModelRef::new(GROUND_MODEL)).scaled(Vec3::new(200.0, 1.0, 200.0)),
    );

    let reflective_cube = scene.add_to_root(
        Node::with_model("Backpack reflective", ModelRef::new(CUBE_MODEL))
            .with_material(Material::Reflective)
            .at(Vec3::new(0.0, 10.0, 0.0))
            .scaled(Vec3::splat(5.0)),
    );

    let refractive_cube = scene.add_to_root(
        Node::with_model("Backpack refractive", ModelRef::new(CUBE_MODEL))
            .with_material(Material::Refractive)
            .at(Vec3::new(30.0, 10.0, 0.0))
            .scaled(Vec3::splat(5.0)),
    );

    Props {
        ground,
        reflective_cube,
        refractive_cube,
    }
}
