//! Input handling
//!
//! Keyboard state with edge detection, the robot / free-camera key mapping and
//! the follow camera used while driving the robot.

pub mod camera;
pub mod input;
pub mod robot;

pub use camera::{CameraCommand, CameraMovement, FollowCamera};
pub use input::{InputState, Key};
pub use robot::{ControllerOutput, RobotBindings, RobotController};
