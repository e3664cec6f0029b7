//! Plain-text clip format.
//!
//! A clip is a sequence of four-line records, one per keyframe:
//!
//! ```text
//! px py pz
//! rx ry rz
//! sx sy sz
//! lerp_rate
//! ```
//!
//! Values are whitespace separated floats. There is no header and blank lines
//! are ignored.

use std::fmt::Write as _;

use glam::Vec3;

use crate::animation::clip::{AnimationClip, Keyframe};
use crate::errors::{Result, SceneryError};

/// Lines per keyframe record.
pub const LINES_PER_KEYFRAME: usize = 4;

/// Parses the text of a whole clip.
///
/// Fails on the first malformed line, reporting its 1-based line number. A
/// trailing record with fewer than four lines is reported at the line it
/// started on.
pub fn parse_clip(name: &str, text: &str) -> Result<AnimationClip> {
    let err = |line: usize, message: String| SceneryError::ClipParse {
        clip: name.to_string(),
        line,
        message,
    };

    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let mut keyframes = Vec::with_capacity(lines.len() / LINES_PER_KEYFRAME);
    for record in lines.chunks(LINES_PER_KEYFRAME) {
        let &[(p_line, p), (r_line, r), (s_line, s), (t_line, t)] = record else {
            return Err(err(
                record[0].0,
                format!(
                    "truncated keyframe: expected {LINES_PER_KEYFRAME} lines, found {}",
                    record.len()
                ),
            ));
        };

        let position = parse_vec3(p).map_err(|m| err(p_line, m))?;
        let rotation = parse_vec3(r).map_err(|m| err(r_line, m))?;
        let scale = parse_vec3(s).map_err(|m| err(s_line, m))?;
        let lerp_rate = parse_scalar(t).map_err(|m| err(t_line, m))?;

        keyframes.push(Keyframe::new(position, rotation, scale, lerp_rate));
    }

    Ok(AnimationClip::new(name, keyframes))
}

/// Serializes one keyframe as a four-line record, newline terminated.
#[must_use]
pub fn write_keyframe(keyframe: &Keyframe) -> String {
    let mut out = String::new();
    for v in [keyframe.position, keyframe.rotation, keyframe.scale] {
        let _ = writeln!(out, "{} {} {}", v.x, v.y, v.z);
    }
    let _ = writeln!(out, "{}", keyframe.lerp_rate);
    out
}

/// Serializes a whole clip.
#[must_use]
pub fn write_clip(clip: &AnimationClip) -> String {
    clip.keyframes.iter().map(write_keyframe).collect()
}

fn parse_vec3(line: &str) -> std::result::Result<Vec3, String> {
    let fields = parse_fields(line)?;
    match fields.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        other => Err(format!("expected 3 values, found {}", other.len())),
    }
}

fn parse_scalar(line: &str) -> std::result::Result<f32, String> {
    let fields = parse_fields(line)?;
    match fields.as_slice() {
        &[v] => Ok(v),
        other => Err(format!("expected a single lerp rate, found {} values", other.len())),
    }
}

fn parse_fields(line: &str) -> std::result::Result<Vec<f32>, String> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|e| format!("invalid number '{token}': {e}"))
        })
        .collect()
}
