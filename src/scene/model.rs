use crate::{
    foundation::core::{Quat, Rgba, Vec3, quat_from_euler_deg, quat_to_euler_deg},
    subject::{AudioSubject, ColorGrading, EmitterSubject, SpatialSubject},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "SceneNodeDesc", into = "SceneNodeDesc")]
/// In-memory scene-graph node.
pub struct SceneNode {
    /// Position in the node's own coordinate space.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Number of writes through any setter; lets hosts and tests observe mutations.
    pub writes: u64,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            writes: 0,
        }
    }
}

impl SceneNode {
    /// Node at `position` with identity rotation and unit scale.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

// Authoring form: rotation as Euler degrees, write counter omitted.
#[derive(serde::Serialize, serde::Deserialize)]
struct SceneNodeDesc {
    #[serde(default)]
    position: Vec3,
    #[serde(default)]
    rotation_deg: Vec3,
    #[serde(default = "unit_scale")]
    scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl From<SceneNodeDesc> for SceneNode {
    fn from(d: SceneNodeDesc) -> Self {
        Self {
            position: d.position,
            rotation: quat_from_euler_deg(d.rotation_deg),
            scale: d.scale,
            writes: 0,
        }
    }
}

impl From<SceneNode> for SceneNodeDesc {
    fn from(n: SceneNode) -> Self {
        Self {
            position: n.position,
            rotation_deg: quat_to_euler_deg(n.rotation),
            scale: n.scale,
        }
    }
}

impl SpatialSubject for SceneNode {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.writes += 1;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.writes += 1;
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.writes += 1;
    }

    fn set_position_and_rotation(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
        self.writes += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Live emission parameters of a particle system.
pub struct ParticleEmitter {
    /// Start-speed multiplier.
    #[serde(default = "one")]
    pub speed_multiplier: f32,
    /// Gravity multiplier.
    #[serde(default)]
    pub gravity_multiplier: f32,
}

fn one() -> f32 {
    1.0
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            gravity_multiplier: 0.0,
        }
    }
}

impl EmitterSubject for ParticleEmitter {
    fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    fn set_speed_multiplier(&mut self, value: f32) {
        self.speed_multiplier = value;
    }

    fn gravity_multiplier(&self) -> f32 {
        self.gravity_multiplier
    }

    fn set_gravity_multiplier(&mut self, value: f32) {
        self.gravity_multiplier = value;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Global color-grading settings.
pub struct ColorGradingVolume {
    /// White-balance temperature; 0 is neutral.
    #[serde(default)]
    pub temperature: f32,
    /// Multiplicative color filter; white is neutral.
    #[serde(default)]
    pub color_filter: Rgba,
}

impl ColorGrading for ColorGradingVolume {
    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn set_temperature(&mut self, value: f32) {
        self.temperature = value;
    }

    fn color_filter(&self) -> Rgba {
        self.color_filter
    }

    fn set_color_filter(&mut self, value: Rgba) {
        self.color_filter = value;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An audio output with a volume control.
pub struct AudioSource {
    /// Output volume.
    #[serde(default = "one")]
    pub volume: f32,
}

impl Default for AudioSource {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

impl AudioSubject for AudioSource {
    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, value: f32) {
        self.volume = value;
    }
}
