use crate::{
    foundation::error::{RenderManagerError, RenderManagerResult},
    scene::{model::Scene, view_layer::ViewLayer},
};

const NEW_LAYER_NAME: &str = "New Layer";

/// Direction of a layer reorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveDirection {
    /// Towards index 0.
    Up,
    /// Towards the end.
    Down,
}

impl Scene {
    /// Name not yet used by any layer, suffixed `.001`, `.002`, ... as the host does.
    pub fn unique_layer_name(&self, base: &str) -> String {
        let taken = |name: &str| self.view_layers.iter().any(|vl| vl.name == name);
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|name| !taken(name))
            .unwrap_or_else(|| base.to_string())
    }

    /// Append a `New Layer` and make it active. Returns its index.
    #[tracing::instrument(skip(self), fields(scene = %self.name))]
    pub fn add_layer(&mut self) -> usize {
        let name = self.unique_layer_name(NEW_LAYER_NAME);
        tracing::debug!(%name, "adding view layer");
        self.view_layers.push(ViewLayer::new(name));
        self.active_layer = self.view_layers.len() - 1;
        self.active_layer
    }

    /// Whether the active layer may be removed; a scene keeps at least one layer.
    pub fn can_remove_layer(&self) -> bool {
        self.view_layers.len() > 1
    }

    /// Remove the active layer and return it.
    #[tracing::instrument(skip(self), fields(scene = %self.name))]
    pub fn remove_active_layer(&mut self) -> RenderManagerResult<ViewLayer> {
        if !self.can_remove_layer() {
            return Err(RenderManagerError::lifecycle(format!(
                "scene '{}' must keep at least one view layer",
                self.name
            )));
        }
        let index = self.active_layer.min(self.view_layers.len() - 1);
        let removed = self.view_layers.remove(index);
        self.active_layer = index.min(self.view_layers.len() - 1);
        tracing::debug!(name = %removed.name, "removed view layer");
        Ok(removed)
    }

    /// Swap the layer at `index` with its neighbour; no-op at either end.
    ///
    /// The active layer follows the layer it points at. Returns whether anything moved.
    #[tracing::instrument(skip(self), fields(scene = %self.name))]
    pub fn move_layer(&mut self, index: usize, direction: MoveDirection) -> RenderManagerResult<bool> {
        self.layer(index)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&t| t < self.view_layers.len()),
        };
        let Some(target) = target else {
            return Ok(false);
        };
        self.view_layers.swap(index, target);
        if self.active_layer == index {
            self.active_layer = target;
        } else if self.active_layer == target {
            self.active_layer = index;
        }
        Ok(true)
    }

    /// Make the layer at `index` active. The compositor tree is not touched.
    pub fn switch_active_layer(&mut self, index: usize) -> RenderManagerResult<()> {
        self.layer(index)?;
        self.active_layer = index;
        Ok(())
    }

    /// Set the render-enable flag of the layer at `index`.
    pub fn set_layer_use(&mut self, index: usize, value: bool) -> RenderManagerResult<()> {
        self.layer_mut(index)?.use_for_render = value;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/lifecycle.rs"]
mod tests;
