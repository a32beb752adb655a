use std::collections::BTreeMap;

use crate::{
    foundation::core::EngineKind,
    passes::registry::{PassId, PassProperty, PassValue, engine_supports},
};

/// A named render configuration within a scene.
///
/// Pass settings are stored the way the host addresses them: layer-level properties in
/// [`ViewLayer::passes`], engine-specific ones in [`ViewLayer::engine_settings`] keyed by the
/// settings block name (`cycles`, `eevee`). Unset properties read as their registry default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewLayer {
    /// Name, unique within its scene.
    pub name: String,
    /// Render-enable flag; disabled layers contribute no nodes.
    #[serde(rename = "use", default = "default_use")]
    pub use_for_render: bool,
    /// Layer-level pass properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub passes: BTreeMap<String, PassValue>,
    /// Engine settings blocks.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub engine_settings: BTreeMap<String, BTreeMap<String, PassValue>>,
    /// Light groups defined on this layer (Cycles).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub light_groups: Vec<String>,
}

fn default_use() -> bool {
    true
}

impl ViewLayer {
    /// A render-enabled layer with default pass settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_for_render: true,
            passes: BTreeMap::new(),
            engine_settings: BTreeMap::new(),
            light_groups: Vec::new(),
        }
    }

    fn slot(&self, prop: PassProperty) -> Option<&PassValue> {
        match prop.scope.settings_key() {
            None => self.passes.get(prop.name),
            Some(block) => self.engine_settings.get(block)?.get(prop.name),
        }
    }

    /// Current value of a pass setting, regardless of engine.
    pub fn value(&self, pass: PassId) -> PassValue {
        self.slot(pass.property())
            .copied()
            .unwrap_or_else(|| pass.default_value())
    }

    /// Whether a pass setting is on, regardless of engine.
    pub fn is_enabled(&self, pass: PassId) -> bool {
        self.value(pass).as_bool()
    }

    /// Write a pass setting, regardless of engine.
    pub fn set(&mut self, pass: PassId, value: PassValue) {
        let prop = pass.property();
        let map = match prop.scope.settings_key() {
            None => &mut self.passes,
            Some(block) => self.engine_settings.entry(block.to_string()).or_default(),
        };
        map.insert(prop.name.to_string(), value);
    }

    /// Value of a pass setting if `engine` defines it.
    pub fn value_for(&self, engine: EngineKind, pass: PassId) -> Option<PassValue> {
        engine_supports(engine, pass).then(|| self.value(pass))
    }

    /// Write a pass setting if `engine` defines it; returns whether it was written.
    pub fn set_for(&mut self, engine: EngineKind, pass: PassId, value: PassValue) -> bool {
        if !engine_supports(engine, pass) {
            return false;
        }
        self.set(pass, value);
        true
    }

    /// Enable every pass in `passes` that `engine` defines.
    pub fn enable_all_for(&mut self, engine: EngineKind, passes: &[PassId]) {
        for &pass in passes {
            self.set_for(engine, pass, PassValue::Bool(true));
        }
    }

    /// Layer name with a `layers_` prefix (and everything up to its first `_`) dropped.
    pub fn clean_name(&self) -> &str {
        if self.name.starts_with("layers_") {
            self.name
                .split_once('_')
                .map_or(self.name.as_str(), |(_, rest)| rest)
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/view_layer.rs"]
mod tests;
