use crate::{
    build::pipeline::{LIGHT_FAMILIES, PASS_DENOISE_RULES},
    config::settings::RenderConfiguration,
    foundation::core::EngineKind,
    passes::registry::{PassId, engine_supports},
    scene::view_layer::ViewLayer,
};

/// Pass settings the active combine and denoise options depend on, deduplicated in order.
pub(crate) fn required_passes(cfg: &RenderConfiguration, engine: EngineKind) -> Vec<PassId> {
    let mut out: Vec<PassId> = Vec::new();
    let mut need = |passes: &[PassId]| {
        for &p in passes {
            if !out.contains(&p) {
                out.push(p);
            }
        }
    };

    let combine = cfg.combine_for(engine);
    if combine {
        for family in &LIGHT_FAMILIES {
            need(family.passes);
        }
    }

    let d = &cfg.denoise;
    if d.enabled {
        if d.image {
            need(&[PassId::DiffuseColor, PassId::Normal]);
        }
        for family in &LIGHT_FAMILIES {
            if (family.denoise)(d) {
                need(family.passes);
                need(if combine {
                    &[PassId::Normal]
                } else {
                    &[PassId::DenoisingData]
                });
            }
        }
        for rule in &PASS_DENOISE_RULES {
            if (rule.enabled)(d) {
                need(&[rule.pass]);
                need(rule.extra);
                need(&[PassId::DenoisingData]);
            }
        }
        if d.alpha {
            need(&[PassId::DiffuseColor, PassId::Normal, PassId::DenoisingData]);
        }
        if d.light_groups {
            need(&[PassId::DenoisingData]);
        }
    }
    out
}

/// Enable on `layer` every pass the options need that `engine` defines.
///
/// Returns the settings that were switched on by this call.
pub(crate) fn enable_required_passes(
    layer: &mut ViewLayer,
    cfg: &RenderConfiguration,
    engine: EngineKind,
) -> Vec<PassId> {
    let enabled: Vec<PassId> = required_passes(cfg, engine)
        .into_iter()
        .filter(|&p| engine_supports(engine, p) && !layer.is_enabled(p))
        .collect();
    layer.enable_all_for(engine, &enabled);
    if !enabled.is_empty() {
        tracing::debug!(layer = %layer.name, ?enabled, "enabled passes required by options");
    }
    enabled
}

#[cfg(test)]
#[path = "../../tests/unit/build/prepass.rs"]
mod tests;
