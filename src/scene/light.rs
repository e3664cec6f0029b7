use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

/// Light category. Together with a slot index it identifies one uniform block
/// in the forward shaders (`dirLight`, `pointLights[i]`, `spotLights[i]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

impl LightKind {
    /// Uniform block prefix for the given slot.
    #[must_use]
    pub fn uniform_base(self, slot: u32) -> String {
        match self {
            Self::Directional => "dirLight".to_string(),
            Self::Point => format!("pointLights[{slot}]"),
            Self::Spot => format!("spotLights[{slot}]"),
        }
    }
}

// High-level abstraction: light component attached to a scene node
#[derive(Debug, Clone)]
pub struct Light {
    pub kind: LightKind,
    /// Index within the uniform array of this kind.
    pub slot: u32,
    pub active: bool,

    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,

    // Attenuation
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,

    // Spot cone, stored as cosines
    pub cut_off: f32,
    pub outer_cut_off: f32,

    pub intensity: f32,
}

impl Light {
    #[must_use]
    pub fn new(kind: LightKind, slot: u32) -> Self {
        Self {
            kind,
            slot,
            active: true,
            direction: Vec3::NEG_Y,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            cut_off: 12.92_f32.to_radians().cos(),
            outer_cut_off: 17.29_f32.to_radians().cos(),
            intensity: 1.0,
        }
    }

    #[must_use]
    pub fn new_directional() -> Self {
        Self::new(LightKind::Directional, 0)
    }

    #[must_use]
    pub fn new_point(slot: u32) -> Self {
        Self::new(LightKind::Point, slot)
    }

    #[must_use]
    pub fn new_spot(slot: u32) -> Self {
        Self::new(LightKind::Spot, slot)
    }

    /// Forward direction (`-Z`) rotated by Euler angles in degrees, composed
    /// yaw · pitch · roll like node transforms.
    #[must_use]
    pub fn direction_from_euler(euler_degrees: Vec3) -> Vec3 {
        let rotation = Quat::from_rotation_y(euler_degrees.y.to_radians())
            * Quat::from_rotation_x(euler_degrees.x.to_radians())
            * Quat::from_rotation_z(euler_degrees.z.to_radians());
        rotation * Vec3::NEG_Z
    }

    /// Key of this light's uniform block.
    #[inline]
    #[must_use]
    pub fn target(&self) -> (LightKind, u32) {
        (self.kind, self.slot)
    }
}

/// Everything the shaders read for one light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniform {
    pub is_on: bool,
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub cut_off: f32,
    pub outer_cut_off: f32,
    pub intensity: f32,
}

impl Default for LightUniform {
    fn default() -> Self {
        let light = Light::new_directional();
        Self::from_light(&light, Vec3::ZERO)
    }
}

impl LightUniform {
    fn from_light(light: &Light, position: Vec3) -> Self {
        Self {
            is_on: light.active,
            position,
            direction: light.direction,
            ambient: light.ambient,
            diffuse: light.diffuse,
            specular: light.specular,
            constant: light.constant,
            linear: light.linear,
            quadratic: light.quadratic,
            cut_off: light.cut_off,
            outer_cut_off: light.outer_cut_off,
            intensity: light.intensity,
        }
    }
}

/// A single shader uniform write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Vec3(Vec3),
    Float(f32),
    Bool(bool),
}

/// Light-uniform store shared with the renderer.
///
/// The scene graph writes into it during traversal; the renderer reads it after
/// the update pass and forwards the values to every lit shader program.
#[derive(Debug, Default, Clone)]
pub struct LightUniforms {
    entries: FxHashMap<(LightKind, u32), LightUniform>,
}

impl LightUniforms {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the full payload of `light`, keeping the last pushed position.
    pub fn publish(&mut self, light: &Light) {
        let position = self
            .entries
            .get(&light.target())
            .map_or(Vec3::ZERO, |entry| entry.position);
        self.entries
            .insert(light.target(), LightUniform::from_light(light, position));
    }

    /// Updates only the position of a light's uniform block.
    pub fn set_position(&mut self, kind: LightKind, slot: u32, position: Vec3) {
        self.entries.entry((kind, slot)).or_default().position = position;
    }

    /// Overrides the direction (e.g. a flashlight following the camera).
    pub fn set_direction(&mut self, kind: LightKind, slot: u32, direction: Vec3) {
        self.entries.entry((kind, slot)).or_default().direction = direction;
    }

    #[must_use]
    pub fn get(&self, kind: LightKind, slot: u32) -> Option<&LightUniform> {
        self.entries.get(&(kind, slot))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens the store into named uniform writes, sorted by light key.
    ///
    /// Names follow the forward shader layout, e.g. `pointLights[0].position`.
    #[must_use]
    pub fn uniform_writes(&self) -> Vec<(String, UniformValue)> {
        let mut keys: Vec<_> = self.entries.keys().copied().collect();
        keys.sort_unstable();

        let mut writes = Vec::with_capacity(keys.len() * 12);
        for (kind, slot) in keys {
            let u = &self.entries[&(kind, slot)];
            let base = kind.uniform_base(slot);
            let mut push = |property: &str, value: UniformValue| {
                writes.push((format!("{base}.{property}"), value));
            };

            push("isOn", UniformValue::Bool(u.is_on));
            push("direction", UniformValue::Vec3(u.direction));
            push("ambient", UniformValue::Vec3(u.ambient));
            push("diffuse", UniformValue::Vec3(u.diffuse));
            push("specular", UniformValue::Vec3(u.specular));
            push("intensity", UniformValue::Float(u.intensity));

            if kind != LightKind::Directional {
                push("position", UniformValue::Vec3(u.position));
                push("constant", UniformValue::Float(u.constant));
                push("linear", UniformValue::Float(u.linear));
                push("quadratic", UniformValue::Float(u.quadratic));
            }
            if kind == LightKind::Spot {
                push("cutOff", UniformValue::Float(u.cut_off));
                push("outerCutOff", UniformValue::Float(u.outer_cut_off));
            }
        }
        writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_keeps_pushed_position() {
        let mut store = LightUniforms::new();
        store.set_position(LightKind::Point, 0, Vec3::new(1.0, 2.0, 3.0));

        let mut light = Light::new_point(0);
        light.intensity = 10.0;
        store.publish(&light);

        let u = store.get(LightKind::Point, 0).unwrap();
        assert_eq!(u.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((u.intensity - 10.0).abs() < 1e-6);
    }

    #[test]
    fn uniform_names_follow_shader_layout() {
        let mut store = LightUniforms::new();
        store.publish(&Light::new_spot(1));
        store.publish(&Light::new_directional());

        let names: Vec<String> = store.uniform_writes().into_iter().map(|(n, _)| n).collect();
        assert!(names.contains(&"dirLight.direction".to_string()));
        assert!(!names.contains(&"dirLight.position".to_string()));
        assert!(names.contains(&"spotLights[1].outerCutOff".to_string()));
        assert!(names.contains(&"spotLights[1].position".to_string()));
    }
}
