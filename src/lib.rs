#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod controller;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod world;

pub use animation::{AnimationClip, Animator, ChannelState, ClipLibrary, Keyframe, PlayDirection};
pub use controller::{FollowCamera, InputState, Key, RobotController};
pub use errors::{Result, SceneryError};
pub use scene::{
    InstanceBatches, Light, LightKind, LightUniforms, Material, Node, NodeHandle, Scene, Transform,
    UpdateContext,
};
pub use settings::ViewerSettings;
pub use world::World;
