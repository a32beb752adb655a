use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{
    config::{
        compression::update_exr_compression,
        settings::{ColorDepth, ExrCodec, RenderConfiguration},
    },
    foundation::core::{EngineKind, HostGeneration, HostVersion},
    foundation::error::{RenderManagerError, RenderManagerResult},
    graph::{node::NodeGroupKind, tree::NodeTree},
    scene::view_layer::ViewLayer,
};

/// Scene render settings the manager reads.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// Host render engine identifier (e.g. `CYCLES`, `BLENDER_EEVEE_NEXT`).
    pub engine: String,
    /// Host application version.
    #[serde(default)]
    pub host_version: HostVersion,
    /// Render output bit depth.
    #[serde(default)]
    pub color_depth: ColorDepth,
    /// Render-time denoiser; makes the host expose `Noisy Image`.
    #[serde(default)]
    pub use_denoising: bool,
}

impl RenderSettings {
    /// Settings for `engine` on the default host version.
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            host_version: HostVersion::default(),
            color_depth: ColorDepth::default(),
            use_denoising: false,
        }
    }

    /// Recognized engine, or `None` for engines without pass support.
    pub fn engine_kind(&self) -> Option<EngineKind> {
        EngineKind::from_engine_id(&self.engine)
    }

    /// API generation of the host.
    pub fn generation(&self) -> HostGeneration {
        self.host_version.generation()
    }
}

/// A scene: ordered view layers, render settings and its compositor tree.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Scene name, unique within the document.
    pub name: String,
    /// Render settings.
    pub render: RenderSettings,
    /// View layers in configured order.
    pub view_layers: Vec<ViewLayer>,
    /// Index of the layer shown by the host.
    #[serde(default)]
    pub active_layer: usize,
    /// Render manager options.
    #[serde(default)]
    pub render_manager: RenderConfiguration,
    /// Compositor enabled.
    #[serde(default)]
    pub use_nodes: bool,
    /// Compositor tree, created by the first build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_tree: Option<NodeTree>,
}

impl Scene {
    /// A scene with a single `ViewLayer`.
    pub fn new(name: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            render: RenderSettings::new(engine),
            view_layers: vec![ViewLayer::new("ViewLayer")],
            active_layer: 0,
            render_manager: RenderConfiguration::default(),
            use_nodes: false,
            node_tree: None,
        }
    }

    /// Layer at `index`.
    pub fn layer(&self, index: usize) -> RenderManagerResult<&ViewLayer> {
        self.view_layers.get(index).ok_or_else(|| {
            RenderManagerError::validation(format!(
                "scene '{}' has no view layer at index {index}",
                self.name
            ))
        })
    }

    /// Mutable layer at `index`.
    pub fn layer_mut(&mut self, index: usize) -> RenderManagerResult<&mut ViewLayer> {
        let name = &self.name;
        self.view_layers.get_mut(index).ok_or_else(|| {
            RenderManagerError::validation(format!(
                "scene '{name}' has no view layer at index {index}"
            ))
        })
    }

    /// Index of the layer named `name`.
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.view_layers.iter().position(|vl| vl.name == name)
    }

    /// The active layer.
    pub fn active_view_layer(&self) -> Option<&ViewLayer> {
        self.view_layers.get(self.active_layer)
    }

    /// Render-enabled layers in order.
    pub fn enabled_layers(&self) -> impl Iterator<Item = &ViewLayer> {
        self.view_layers.iter().filter(|vl| vl.use_for_render)
    }
}

/// Library entry of a node group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeGroupEntry {
    /// Kept alive even without users.
    #[serde(default)]
    pub fake_user: bool,
}

/// Document root: scenes plus shared data blocks.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    /// Location the document was saved to; `None` while unsaved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<PathBuf>,
    /// Scenes.
    pub scenes: Vec<Scene>,
    /// Node group library keyed by group name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_groups: BTreeMap<String, NodeGroupEntry>,
}

impl Document {
    /// Unsaved document holding `scenes`.
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            filepath: None,
            scenes,
            node_groups: BTreeMap::new(),
        }
    }

    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RenderManagerResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RenderManagerError::serde(format!("parse document JSON: {e}")))
    }

    /// Parse a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RenderManagerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| RenderManagerError::io(path, e))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write the document as pretty JSON.
    pub fn write_path(&self, path: impl AsRef<Path>) -> RenderManagerResult<()> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| RenderManagerError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(f), self)
            .map_err(|e| RenderManagerError::serde(format!("write document JSON: {e}")))
    }

    /// Whether the document has been saved.
    pub fn is_saved(&self) -> bool {
        self.filepath.is_some()
    }

    /// Resolve a host path; `//` prefixes are relative to the document directory.
    pub fn abspath(&self, path: &str) -> RenderManagerResult<PathBuf> {
        let Some(rest) = path.strip_prefix("//") else {
            return Ok(PathBuf::from(path));
        };
        let file = self.filepath.as_ref().ok_or_else(|| {
            RenderManagerError::not_persisted(format!("cannot resolve relative path '{path}'"))
        })?;
        let dir = file.parent().unwrap_or_else(|| Path::new(""));
        Ok(dir.join(rest))
    }

    /// Scene named `name`.
    pub fn scene(&self, name: &str) -> RenderManagerResult<&Scene> {
        self.scenes
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RenderManagerError::validation(format!("unknown scene '{name}'")))
    }

    /// Mutable scene named `name`.
    pub fn scene_mut(&mut self, name: &str) -> RenderManagerResult<&mut Scene> {
        self.scenes
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| RenderManagerError::validation(format!("unknown scene '{name}'")))
    }

    /// Make sure every node group the builder references exists and is kept alive.
    pub fn ensure_node_groups(&mut self) {
        for kind in NodeGroupKind::ALL {
            self.node_groups
                .entry(kind.library_name().to_string())
                .or_default()
                .fake_user = true;
        }
    }

    /// Set the beauty codec of `scene` and push it to existing sinks.
    pub fn set_beauty_compression(
        &mut self,
        scene: &str,
        codec: ExrCodec,
    ) -> RenderManagerResult<usize> {
        self.scene_mut(scene)?.render_manager.beauty_compression = codec;
        Ok(self.propagate_compression())
    }

    /// Set the data codec of `scene` and push it to existing sinks.
    pub fn set_data_compression(
        &mut self,
        scene: &str,
        codec: ExrCodec,
    ) -> RenderManagerResult<usize> {
        self.scene_mut(scene)?.render_manager.data_compression = codec;
        Ok(self.propagate_compression())
    }

    /// Set the lossy compression level of `scene` and push it to existing sinks.
    pub fn set_compression_level(&mut self, scene: &str, level: u32) -> RenderManagerResult<usize> {
        if level > 100 {
            return Err(RenderManagerError::validation(format!(
                "compression level must be within 0..=100, got {level}"
            )));
        }
        self.scene_mut(scene)?.render_manager.compression_level = level;
        Ok(self.propagate_compression())
    }

    /// Re-apply every scene's codecs to the sinks of its compositor tree.
    ///
    /// Scenes with the compositor disabled are left alone. Returns the number of sinks touched.
    pub fn propagate_compression(&mut self) -> usize {
        self.scenes
            .iter_mut()
            .filter(|s| s.use_nodes)
            .map(|s| match s.node_tree.as_mut() {
                Some(tree) => update_exr_compression(tree, &s.render_manager),
                None => 0,
            })
            .sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
