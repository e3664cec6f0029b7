use glam::Vec3;

use crate::animation::ClipLibrary;
use crate::controller::RobotBindings;
use crate::errors::Result;
use crate::scene::{Material, ModelRef, Node, NodeHandle, Scene};

/// Every animatable robot part. Each may have a clip named `robot/<bone>`.
pub const ROBOT_BONES: [&str; 12] = [
    "Head",
    "Torso",
    "LeftArm",
    "RightArm",
    "LeftForearm",
    "RightForearm",
    "LeftLeg",
    "RightLeg",
    "LeftThigh",
    "RightThigh",
    "Screen",
    "Visor",
];

/// Bones animated by the walk cycle, in start order.
pub const WALK_BONES: [&str; 7] = [
    "Head",
    "LeftLeg",
    "LeftThigh",
    "RightThigh",
    "RightLeg",
    "RightArm",
    "LeftArm",
];

/// Name of the clip animating `bone`.
#[must_use]
pub fn clip_name(bone: &str) -> String {
    format!("robot/{bone}")
}

fn bone_model(file: &str) -> ModelRef {
    ModelRef::new(&format!("res/models/robot/{file}.obj"))
}

/// Handles of the robot's nodes.
#[derive(Debug, Clone, Copy)]
pub struct RobotRig {
    pub torso: NodeHandle,
    pub head: NodeHandle,
    pub visor: NodeHandle,
    pub screen: NodeHandle,
    pub left_arm: NodeHandle,
    pub left_forearm: NodeHandle,
    pub right_arm: NodeHandle,
    pub right_forearm: NodeHandle,
    pub left_thigh: NodeHandle,
    pub left_leg: NodeHandle,
    pub right_thigh: NodeHandle,
    pub right_leg: NodeHandle,
    /// Point behind and above the torso the follow camera trails.
    pub camera_handle: NodeHandle,
}

impl RobotRig {
    /// Handle of the bone labelled `bone`.
    #[must_use]
    pub fn bone(&self, bone: &str) -> Option<NodeHandle> {
        let handle = match bone {
            "Torso" => self.torso,
            "Head" => self.head,
            "Visor" => self.visor,
            "Screen" => self.screen,
            "LeftArm" => self.left_arm,
            "LeftForearm" => self.left_forearm,
            "RightArm" => self.right_arm,
            "RightForearm" => self.right_forearm,
            "LeftThigh" => self.left_thigh,
            "LeftLeg" => self.left_leg,
            "RightThigh" => self.right_thigh,
            "RightLeg" => self.right_leg,
            _ => return None,
        };
        Some(handle)
    }

    /// Controller bindings with the walk cycle wired to this rig.
    #[must_use]
    pub fn bindings(&self) -> RobotBindings {
        RobotBindings {
            torso: self.torso,
            head: self.head,
            walk: WALK_BONES
                .iter()
                .filter_map(|&bone| Some((clip_name(bone), self.bone(bone)?)))
                .collect(),
        }
    }
}

/// Builds the robot under the root with its torso at `(0, 9, 30)`.
pub fn spawn_robot(scene: &mut Scene) -> Result<RobotRig> {
    let torso = scene.add_to_root(
        Node::with_model("Torso", bone_model("torso")).at(Vec3::new(0.0, 9.0, 30.0)),
    );

    let head = scene.add_child(torso, Node::with_model("Head", bone_model("head")))?;
    let left_arm = scene.add_child(torso, Node::with_model("LeftArm", bone_model("left_arm")))?;
    let right_arm = scene.add_child(torso, Node::with_model("RightArm", bone_model("right_arm")))?;
    let left_thigh = scene.add_child(torso, Node::with_model("LeftThigh", bone_model("left_thigh")))?;
    let right_thigh =
        scene.add_child(torso, Node::with_model("RightThigh", bone_model("right_thigh")))?;
    let screen = scene.add_child(
        torso,
        Node::with_model("Screen", bone_model("screen")).with_material(Material::Refractive),
    )?;
    let camera_handle = scene.add_child(
        torso,
        Node::new("CameraHandleForRobot").at(Vec3::new(0.0, 10.0, -17.0)),
    )?;

    let visor = scene.add_child(
        head,
        Node::with_model("Visor", bone_model("visor")).with_material(Material::Reflective),
    )?;

    let left_forearm =
        scene.add_child(left_arm, Node::with_model("LeftForearm", bone_model("left_forearm")))?;
    let right_forearm =
        scene.add_child(right_arm, Node::with_model("RightForearm", bone_model("right_forearm")))?;

    let left_leg = scene.add_child(left_thigh, Node::with_model("LeftLeg", bone_model("left_leg")))?;
    let right_leg =
        scene.add_child(right_thigh, Node::with_model("RightLeg", bone_model("right_leg")))?;

    Ok(RobotRig {
        torso,
        head,
        visor,
        screen,
        left_arm,
        left_forearm,
        right_arm,
        right_forearm,
        left_thigh,
        left_leg,
        right_thigh,
        right_leg,
        camera_handle,
    })
}

/// Loads `robot/<bone>` for every bone that has a clip file.
///
/// Missing files are skipped; a malformed file is an error. Returns how many
/// clips were loaded.
pub fn load_robot_clips(library: &mut ClipLibrary) -> Result<usize> {
    let mut loaded = 0;
    for bone in ROBOT_BONES {
        let name = clip_name(bone);
        if !library.clip_path(&name).is_file() {
            log::debug!("No clip for bone '{bone}'");
            continue;
        }
        library.load_clip(&name)?;
        loaded += 1;
    }
    log::info!("Loaded {loaded} robot clips from {}", library.dir().display());
    Ok(loaded)
}
