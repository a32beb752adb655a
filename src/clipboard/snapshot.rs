use std::collections::BTreeMap;

use crate::{
    foundation::core::EngineKind,
    foundation::error::{RenderManagerError, RenderManagerResult},
    passes::registry::{PassId, PassProperty, PassValue, PropertyScope, engine_supports},
    scene::view_layer::ViewLayer,
};

/// Whether a pass setting exists on layers rendered with `engine`.
///
/// Unknown engines still carry the layer-level settings.
fn defined(engine: Option<EngineKind>, pass: PassId) -> bool {
    match engine {
        Some(engine) => engine_supports(engine, pass),
        None => pass.property().scope == PropertyScope::Layer,
    }
}

/// Pass settings captured from one view layer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerSnapshot {
    /// Name of the layer the settings came from.
    pub source_layer: String,
    values: BTreeMap<PassId, PassValue>,
}

impl LayerSnapshot {
    /// Capture every setting `engine` defines on `layer`.
    pub fn capture(layer: &ViewLayer, engine: Option<EngineKind>) -> Self {
        let values = PassId::ALL
            .into_iter()
            .filter(|&pass| defined(engine, pass))
            .map(|pass| (pass, layer.value(pass)))
            .collect();
        Self {
            source_layer: layer.name.clone(),
            values,
        }
    }

    /// Captured `(property, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (PassProperty, PassValue)> + '_ {
        self.values.iter().map(|(pass, v)| (pass.property(), *v))
    }

    /// Captured value of `pass`.
    pub fn get(&self, pass: PassId) -> Option<PassValue> {
        self.values.get(&pass).copied()
    }

    /// Number of captured settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write the captured settings `engine` defines onto `layer`.
    pub fn apply(&self, layer: &mut ViewLayer, engine: Option<EngineKind>) -> PasteOutcome {
        let mut outcome = PasteOutcome::default();
        for (&pass, &value) in &self.values {
            if defined(engine, pass) {
                layer.set(pass, value);
                outcome.applied += 1;
            } else {
                outcome.skipped += 1;
            }
        }
        outcome
    }
}

/// Result of a paste.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Settings written.
    pub applied: usize,
    /// Settings the target does not define.
    pub skipped: usize,
}

/// Single-slot store for copied layer settings.
///
/// Each copy overwrites the slot; paste reads it without consuming.
#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    slot: Option<LayerSnapshot>,
}

impl Clipboard {
    /// Empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `layer` into the slot.
    #[tracing::instrument(skip(self, layer), fields(layer = %layer.name))]
    pub fn copy(&mut self, layer: &ViewLayer, engine: Option<EngineKind>) -> &LayerSnapshot {
        let snapshot = LayerSnapshot::capture(layer, engine);
        tracing::debug!(settings = snapshot.len(), "copied layer settings");
        self.slot.insert(snapshot)
    }

    /// Apply the slot to `layer`.
    #[tracing::instrument(skip(self, layer), fields(layer = %layer.name))]
    pub fn paste(
        &self,
        layer: &mut ViewLayer,
        engine: Option<EngineKind>,
    ) -> RenderManagerResult<PasteOutcome> {
        let snapshot = self.slot.as_ref().ok_or_else(|| {
            RenderManagerError::empty_clipboard("no copied settings found, copy a layer first")
        })?;
        let outcome = snapshot.apply(layer, engine);
        tracing::debug!(
            applied = outcome.applied,
            skipped = outcome.skipped,
            "pasted layer settings"
        );
        Ok(outcome)
    }

    /// Current snapshot, if anything was copied.
    pub fn snapshot(&self) -> Option<&LayerSnapshot> {
        self.slot.as_ref()
    }

    /// Layer the current snapshot came from.
    pub fn source_layer(&self) -> Option<&str> {
        self.slot.as_ref().map(|s| s.source_layer.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clipboard/snapshot.rs"]
mod tests;
