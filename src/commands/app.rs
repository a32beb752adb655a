use crate::{
    build::builder::build_node_graph,
    clipboard::snapshot::Clipboard,
    config::settings::ExrCodec,
    foundation::error::{RenderManagerError, RenderManagerResult},
    host::outputs::{HostRenderLayerOutputs, RenderLayerOutputs},
    scene::{lifecycle::MoveDirection, model::Document},
};

/// Outcome class of a user command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandStatus {
    /// The command ran.
    Finished,
    /// The command was refused or failed; nothing changed.
    Cancelled,
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Finished => "FINISHED",
            Self::Cancelled => "CANCELLED",
        })
    }
}

/// Status and user-facing message of a command.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CommandReport {
    /// Outcome.
    pub status: CommandStatus,
    /// Message shown to the user.
    pub message: String,
}

impl CommandReport {
    fn finished(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Finished,
            message: message.into(),
        }
    }

    fn cancelled(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Cancelled,
            message: message.into(),
        }
    }

    /// Whether the command ran.
    pub fn is_finished(&self) -> bool {
        self.status == CommandStatus::Finished
    }
}

impl From<RenderManagerResult<String>> for CommandReport {
    fn from(r: RenderManagerResult<String>) -> Self {
        match r {
            Ok(message) => Self::finished(message),
            Err(e) => {
                tracing::warn!(error = %e, "command cancelled");
                Self::cancelled(e.to_string())
            }
        }
    }
}

/// Application state: the open document, the layer-settings clipboard and the host outputs model.
///
/// Every command returns a [`CommandReport`]; failures never escape as errors.
pub struct RenderManager {
    document: Document,
    clipboard: Clipboard,
    outputs: Box<dyn RenderLayerOutputs>,
}

impl std::fmt::Debug for RenderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderManager")
            .field("document", &self.document)
            .field("clipboard", &self.clipboard)
            .finish_non_exhaustive()
    }
}

impl RenderManager {
    /// Manage `document` with the built-in Cycles/Eevee outputs model.
    pub fn new(document: Document) -> Self {
        Self::with_outputs(document, Box::new(HostRenderLayerOutputs))
    }

    /// Manage `document` with a custom render-layer outputs model.
    pub fn with_outputs(document: Document, outputs: Box<dyn RenderLayerOutputs>) -> Self {
        Self {
            document,
            clipboard: Clipboard::new(),
            outputs,
        }
    }

    /// The managed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the managed document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Release the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// The layer-settings clipboard.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Rebuild the compositor tree of `scene`.
    pub fn create_render_nodes(&mut self, scene: &str) -> CommandReport {
        match build_node_graph(&mut self.document, scene, self.outputs.as_ref()) {
            Ok(report) => CommandReport::finished(report.summary()),
            Err(RenderManagerError::DocumentNotPersisted(_)) => {
                tracing::warn!("render nodes requested for an unsaved document");
                CommandReport::cancelled("Please save the file first.")
            }
            Err(e) => Err::<String, _>(e).into(),
        }
    }

    /// Copy the pass settings of layer `index` into the clipboard.
    pub fn copy_layer_settings(&mut self, scene: &str, index: usize) -> CommandReport {
        let result = (|| -> RenderManagerResult<String> {
            let scene = self.document.scene(scene)?;
            let layer = scene.layer(index)?;
            self.clipboard.copy(layer, scene.render.engine_kind());
            Ok(format!("Copied settings from layer '{}'.", layer.name))
        })();
        result.into()
    }

    /// Paste the clipboard onto layer `index`.
    pub fn paste_layer_settings(&mut self, scene: &str, index: usize) -> CommandReport {
        let result = (|| -> RenderManagerResult<String> {
            let scene = self.document.scene_mut(scene)?;
            let engine = scene.render.engine_kind();
            let layer = scene.layer_mut(index)?;
            self.clipboard.paste(layer, engine)?;
            Ok(format!("Pasted settings onto layer '{}'.", layer.name))
        })();
        result.into()
    }

    /// Append a new layer and make it active.
    pub fn add_render_layer(&mut self, scene: &str) -> CommandReport {
        let result = self.document.scene_mut(scene).map(|scene| {
            let index = scene.add_layer();
            format!("Created new render layer: {}", scene.view_layers[index].name)
        });
        result.into()
    }

    /// Remove the active layer; refused when it is the last one.
    pub fn remove_render_layer(&mut self, scene: &str) -> CommandReport {
        let result = (|| -> RenderManagerResult<String> {
            let removed = self.document.scene_mut(scene)?.remove_active_layer()?;
            Ok(format!("Removed render layer: {}", removed.name))
        })();
        result.into()
    }

    /// Move the active layer one step.
    pub fn reorder_view_layer(&mut self, scene: &str, direction: MoveDirection) -> CommandReport {
        let result = (|| -> RenderManagerResult<String> {
            let scene = self.document.scene_mut(scene)?;
            let moved = scene.move_layer(scene.active_layer, direction)?;
            Ok(if moved {
                format!("Moved layer to position {}", scene.active_layer)
            } else {
                "Layer is already at the edge".to_string()
            })
        })();
        result.into()
    }

    /// Make layer `index` active.
    pub fn switch_layer(&mut self, scene: &str, index: usize) -> CommandReport {
        let result = (|| -> RenderManagerResult<String> {
            let scene = self.document.scene_mut(scene)?;
            scene.switch_active_layer(index)?;
            Ok(format!("Switched to layer '{}'", scene.view_layers[index].name))
        })();
        result.into()
    }

    /// Toggle whether layer `index` renders.
    pub fn set_layer_use(&mut self, scene: &str, index: usize, value: bool) -> CommandReport {
        let result = (|| -> RenderManagerResult<String> {
            let scene = self.document.scene_mut(scene)?;
            scene.set_layer_use(index, value)?;
            let state = if value { "enabled" } else { "disabled" };
            Ok(format!("Layer '{}' {state} for rendering", scene.view_layers[index].name))
        })();
        result.into()
    }

    /// Set the beauty codec of `scene` and update existing sinks.
    pub fn set_beauty_compression(&mut self, scene: &str, codec: ExrCodec) -> CommandReport {
        self.document
            .set_beauty_compression(scene, codec)
            .map(|n| format!("Beauty compression set to {}, {n} output(s) updated", codec.as_str()))
            .into()
    }

    /// Set the data codec of `scene` and update existing sinks.
    pub fn set_data_compression(&mut self, scene: &str, codec: ExrCodec) -> CommandReport {
        self.document
            .set_data_compression(scene, codec)
            .map(|n| format!("Data compression set to {}, {n} output(s) updated", codec.as_str()))
            .into()
    }

    /// Set the lossy compression level of `scene` and update existing sinks.
    pub fn set_compression_level(&mut self, scene: &str, level: u32) -> CommandReport {
        self.document
            .set_compression_level(scene, level)
            .map(|n| format!("Compression level set to {level}, {n} output(s) updated"))
            .into()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/commands/app.rs"]
mod tests;
