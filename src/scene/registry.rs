use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    foundation::error::{CalamityError, CalamityResult},
    scene::model::{AudioSource, ColorGradingVolume, ParticleEmitter, SceneNode},
    subject::{self, AudioHandle, ColorGradingHandle, EmitterHandle, SpatialHandle},
};

const COLOR_GRADING_LABEL: &str = "color_grading";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Plain-data description of a [`Scene`]; what is loaded from and written to JSON.
pub struct SceneSnapshot {
    /// Named scene-graph nodes.
    #[serde(default)]
    pub nodes: BTreeMap<String, SceneNode>,
    /// Named particle emitters.
    #[serde(default)]
    pub emitters: BTreeMap<String, ParticleEmitter>,
    /// Named audio outputs.
    #[serde(default)]
    pub audio: BTreeMap<String, AudioSource>,
    /// The active color-grading settings, if the scene has any.
    #[serde(default)]
    pub color_grading: Option<ColorGradingVolume>,
}

/// Host-side owner of every subject a calamity can touch.
///
/// Subjects are stored as `Rc<RefCell<_>>`; channels only ever see weak handles, so
/// dropping the scene (or removing an entry) detaches the subject from any timeline.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: BTreeMap<String, Rc<RefCell<SceneNode>>>,
    emitters: BTreeMap<String, Rc<RefCell<ParticleEmitter>>>,
    audio: BTreeMap<String, Rc<RefCell<AudioSource>>>,
    color_grading: Option<Rc<RefCell<ColorGradingVolume>>>,
}

impl Scene {
    /// Empty scene with no color-grading settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate live subjects from a snapshot.
    pub fn from_snapshot(snapshot: SceneSnapshot) -> Self {
        let mut scene = Self::new();
        for (name, node) in snapshot.nodes {
            scene.insert_node(name, node);
        }
        for (name, emitter) in snapshot.emitters {
            scene.insert_emitter(name, emitter);
        }
        for (name, source) in snapshot.audio {
            scene.insert_audio(name, source);
        }
        if let Some(volume) = snapshot.color_grading {
            scene.set_color_grading(volume);
        }
        scene
    }

    /// Copy the current state of every subject.
    pub fn snapshot(&self) -> CalamityResult<SceneSnapshot> {
        Ok(SceneSnapshot {
            nodes: copy_all(&self.nodes)?,
            emitters: copy_all(&self.emitters)?,
            audio: copy_all(&self.audio)?,
            color_grading: self
                .color_grading
                .as_ref()
                .map(|v| subject::borrow(COLOR_GRADING_LABEL, v).map(|g| *g))
                .transpose()?,
        })
    }

    /// Add or replace a node.
    pub fn insert_node(
        &mut self,
        name: impl Into<String>,
        node: SceneNode,
    ) -> Rc<RefCell<SceneNode>> {
        let rc = Rc::new(RefCell::new(node));
        self.nodes.insert(name.into(), Rc::clone(&rc));
        rc
    }

    /// Add or replace an emitter.
    pub fn insert_emitter(
        &mut self,
        name: impl Into<String>,
        emitter: ParticleEmitter,
    ) -> Rc<RefCell<ParticleEmitter>> {
        let rc = Rc::new(RefCell::new(emitter));
        self.emitters.insert(name.into(), Rc::clone(&rc));
        rc
    }

    /// Add or replace an audio output.
    pub fn insert_audio(
        &mut self,
        name: impl Into<String>,
        source: AudioSource,
    ) -> Rc<RefCell<AudioSource>> {
        let rc = Rc::new(RefCell::new(source));
        self.audio.insert(name.into(), Rc::clone(&rc));
        rc
    }

    /// Install the scene's active color-grading settings.
    pub fn set_color_grading(
        &mut self,
        volume: ColorGradingVolume,
    ) -> Rc<RefCell<ColorGradingVolume>> {
        let rc = Rc::new(RefCell::new(volume));
        self.color_grading = Some(Rc::clone(&rc));
        rc
    }

    /// Remove a node, detaching it from any timeline that targets it.
    pub fn remove_node(&mut self, name: &str) -> Option<Rc<RefCell<SceneNode>>> {
        self.nodes.remove(name)
    }

    /// Look up a node.
    pub fn node(&self, name: &str) -> Option<&Rc<RefCell<SceneNode>>> {
        self.nodes.get(name)
    }

    /// Look up an emitter.
    pub fn emitter(&self, name: &str) -> Option<&Rc<RefCell<ParticleEmitter>>> {
        self.emitters.get(name)
    }

    /// Look up an audio output.
    pub fn audio(&self, name: &str) -> Option<&Rc<RefCell<AudioSource>>> {
        self.audio.get(name)
    }

    /// The active color-grading settings.
    ///
    /// A scene without any is a configuration error for every calamity that grades color.
    pub fn color_grading(&self) -> CalamityResult<&Rc<RefCell<ColorGradingVolume>>> {
        self.color_grading.as_ref().ok_or_else(|| {
            CalamityError::configuration("scene has no active color-grading settings")
        })
    }

    /// Weak handle to a named node.
    pub fn spatial_handle(&self, name: &str) -> CalamityResult<SpatialHandle> {
        let rc = self
            .node(name)
            .ok_or_else(|| unknown_subject("node", name))?;
        Ok(subject::spatial(name, rc))
    }

    /// Weak handle to a named emitter.
    pub fn emitter_handle(&self, name: &str) -> CalamityResult<EmitterHandle> {
        let rc = self
            .emitter(name)
            .ok_or_else(|| unknown_subject("emitter", name))?;
        Ok(subject::emitter(name, rc))
    }

    /// Weak handle to a named audio output.
    pub fn audio_handle(&self, name: &str) -> CalamityResult<AudioHandle> {
        let rc = self
            .audio(name)
            .ok_or_else(|| unknown_subject("audio source", name))?;
        Ok(subject::audio(name, rc))
    }

    /// Weak handle to the active color-grading settings.
    pub fn color_grading_handle(&self) -> CalamityResult<ColorGradingHandle> {
        let rc = self.color_grading()?;
        Ok(subject::color_grading(COLOR_GRADING_LABEL, rc))
    }
}

fn unknown_subject(kind: &str, name: &str) -> CalamityError {
    CalamityError::configuration(format!("unknown {kind} '{name}'"))
}

fn copy_all<T: Copy>(
    map: &BTreeMap<String, Rc<RefCell<T>>>,
) -> CalamityResult<BTreeMap<String, T>> {
    map.iter()
        .map(|(name, v)| Ok((name.clone(), *subject::borrow(name, v)?)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
