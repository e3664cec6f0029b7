use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::clip::{AnimationClip, Keyframe};
use crate::animation::format;
use crate::errors::Result;

/// Extension of persisted clip files.
pub const CLIP_EXTENSION: &str = "txt";

/// Registry of loaded clips, backed by a directory of clip files.
///
/// Clip names map to `<dir>/<name>.txt`; names may contain `/` to address
/// subdirectories (e.g. `robot/Head`).
#[derive(Debug, Clone)]
pub struct ClipLibrary {
    dir: PathBuf,
    clips: FxHashMap<String, Arc<AnimationClip>>,
}

impl ClipLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            clips: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing the clip `name`.
    #[must_use]
    pub fn clip_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{CLIP_EXTENSION}"))
    }

    /// Reads and parses `<dir>/<name>.txt`, replacing any clip already loaded
    /// under that name. On error the registry is left untouched.
    pub fn load_clip(&mut self, name: &str) -> Result<Arc<AnimationClip>> {
        let path = self.clip_path(name);
        let text = fs::read_to_string(&path)?;
        let clip = self.load_from_str(name, &text)?;
        log::debug!(
            "Loaded clip '{}' ({} keyframes) from {}",
            name,
            clip.len(),
            path.display()
        );
        Ok(clip)
    }

    /// Parses `text` as the clip `name` and installs it.
    pub fn load_from_str(&mut self, name: &str, text: &str) -> Result<Arc<AnimationClip>> {
        let clip = format::parse_clip(name, text)?;
        Ok(self.insert(clip))
    }

    /// Installs an already built clip, replacing any clip of the same name.
    pub fn insert(&mut self, clip: AnimationClip) -> Arc<AnimationClip> {
        let clip = Arc::new(clip);
        if self.clips.insert(clip.name.clone(), clip.clone()).is_some() {
            log::debug!("Replaced clip '{}'", clip.name);
        }
        clip
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<AnimationClip>> {
        self.clips.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Appends `keyframe` to the file of clip `label`, creating the file and
    /// its directories as needed. Loaded clips are not affected until the clip
    /// is loaded again.
    pub fn record_keyframe(&self, label: &str, keyframe: &Keyframe) -> Result<()> {
        let path = self.clip_path(label);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(format::write_keyframe(keyframe).as_bytes())?;
        log::info!("Recorded keyframe for '{label}'");
        Ok(())
    }
}
