use std::collections::BTreeMap;
use std::sync::Arc;

use crate::animation::clip::{AnimationClip, PlayDirection};
use crate::animation::library::ClipLibrary;
use crate::errors::{Result, SceneryError};
use crate::scene::{NodeHandle, Scene};

/// Per-axis distance under which a bound node snaps onto its target keyframe.
pub const SNAP_TOLERANCE: f32 = 0.1;

/// A clip currently driving a node.
#[derive(Debug, Clone)]
struct Playback {
    clip: Arc<AnimationClip>,
    node: NodeHandle,
    /// Signed so the transient `-1` of backward playback is representable.
    frame: isize,
    direction: PlayDirection,
}

/// Observable state of one animation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Idle,
    Playing {
        node: NodeHandle,
        frame: isize,
        direction: PlayDirection,
    },
}

/// Keyframe animator.
///
/// Each channel is named after the clip it plays and drives at most one node.
/// Every update eases the bound node's local TRS toward the current keyframe;
/// once all components are within [`SNAP_TOLERANCE`] the node snaps onto it
/// and the channel steps to the next keyframe, wrapping at either end.
#[derive(Debug)]
pub struct Animator {
    library: ClipLibrary,
    channels: BTreeMap<String, Playback>,
    clock: f32,
}

impl Animator {
    #[must_use]
    pub fn new(library: ClipLibrary) -> Self {
        Self {
            library,
            channels: BTreeMap::new(),
            clock: 0.0,
        }
    }

    #[must_use]
    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut ClipLibrary {
        &mut self.library
    }

    /// Loads `<clip_dir>/<name>.txt` into the library.
    pub fn load_clip(&mut self, name: &str) -> Result<Arc<AnimationClip>> {
        self.library.load_clip(name)
    }

    /// Binds clip `name` to `node` and starts it from its first keyframe, or
    /// from its last one when `backwards`. Replaces any earlier binding of the
    /// same clip and resets the clock.
    pub fn play(&mut self, name: &str, node: NodeHandle, backwards: bool) -> Result<()> {
        let clip = self
            .library
            .get(name)
            .cloned()
            .ok_or_else(|| SceneryError::ClipNotFound(name.to_string()))?;

        let direction = if backwards {
            PlayDirection::Backward
        } else {
            PlayDirection::Forward
        };
        let frame = clip.first_frame(direction);

        self.channels.insert(
            name.to_string(),
            Playback {
                clip,
                node,
                frame,
                direction,
            },
        );
        self.clock = 0.0;
        Ok(())
    }

    /// Stops every channel and puts each bound node back to the identity pose.
    pub fn stop_all(&mut self, scene: &mut Scene) {
        for (name, playback) in std::mem::take(&mut self.channels) {
            match scene.get_node_mut(playback.node) {
                Some(node) => node.transform.reset_local(),
                None => log::warn!("Channel '{name}' was bound to a removed node"),
            }
        }
    }

    /// Advances every playing channel by `dt` seconds.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        self.clock += dt;

        for (name, playback) in &mut self.channels {
            let len = playback.clip.len() as isize;
            if playback.frame >= len {
                playback.frame = 0;
            }
            if playback.frame < 0 && playback.direction == PlayDirection::Backward {
                playback.frame = len - 1;
            }
            if playback.clip.is_empty() {
                continue;
            }

            let Some(node) = scene.get_node_mut(playback.node) else {
                log::warn!("Skipping channel '{name}': bound node no longer exists");
                continue;
            };

            let Ok(index) = usize::try_from(playback.frame) else {
                continue;
            };
            let target = playback.clip.keyframes[index];
            let t = target.lerp_rate * dt;

            let transform = &mut node.transform;
            let position = transform.position().lerp(target.position, t);
            let rotation = transform.rotation().lerp(target.rotation, t);
            let scale = transform.scale().lerp(target.scale, t);

            if target.reached_by(position, rotation, scale, SNAP_TOLERANCE) {
                transform.set_local_position(target.position);
                transform.set_local_rotation(target.rotation);
                transform.set_local_scale(target.scale);
                playback.frame += playback.direction.step();
            } else {
                transform.set_local_position(position);
                transform.set_local_rotation(rotation);
                transform.set_local_scale(scale);
            }
        }
    }

    /// Whether any channel is bound.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.channels.is_empty()
    }

    #[must_use]
    pub fn channel_state(&self, name: &str) -> ChannelState {
        self.channels
            .get(name)
            .map_or(ChannelState::Idle, |p| ChannelState::Playing {
                node: p.node,
                frame: p.frame,
                direction: p.direction,
            })
    }

    /// Current keyframe index of channel `name`, if it is playing.
    #[must_use]
    pub fn current_frame(&self, name: &str) -> Option<isize> {
        self.channels.get(name).map(|p| p.frame)
    }

    /// Seconds since the last [`play`](Self::play).
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn playing_channels(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }
}

