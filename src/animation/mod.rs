//! Keyframe animation
//!
//! - [`clip`]: keyframes and clips
//! - [`format`]: the four-line-per-keyframe text format
//! - [`library`]: clip registry backed by a directory, plus keyframe recording
//! - [`animator`]: per-channel playback that eases nodes through a clip

pub mod animator;
pub mod clip;
pub mod format;
pub mod library;

pub use animator::{Animator, ChannelState, SNAP_TOLERANCE};
pub use clip::{AnimationClip, Keyframe, PlayDirection};
pub use format::{parse_clip, write_clip, write_keyframe};
pub use library::ClipLibrary;
