use super::*;
use crate::config::settings::DenoiseOptions;

fn quiet() -> RenderConfiguration {
    RenderConfiguration {
        combine_cycles: false,
        combine_eevee: false,
        denoise: DenoiseOptions {
            enabled: false,
            ..DenoiseOptions::default()
        },
        ..RenderConfiguration::default()
    }
}

#[test]
fn nothing_required_with_options_off() {
    assert!(required_passes(&quiet(), EngineKind::Cycles).is_empty());
}

#[test]
fn glossy_denoise_without_combine_needs_denoising_data() {
    let mut cfg = quiet();
    cfg.denoise = DenoiseOptions {
        enabled: true,
        image: false,
        diffuse: false,
        glossy: true,
        transmission: false,
        ..DenoiseOptions::default()
    };
    assert_eq!(
        required_passes(&cfg, EngineKind::Cycles),
        [
            PassId::GlossyDirect,
            PassId::GlossyIndirect,
            PassId::GlossyColor,
            PassId::DenoisingData
        ]
    );
}

#[test]
fn glossy_denoise_with_combine_needs_normal() {
    let mut cfg = quiet();
    cfg.combine_cycles = true;
    cfg.denoise = DenoiseOptions {
        enabled: true,
        image: false,
        diffuse: false,
        glossy: true,
        transmission: false,
        ..DenoiseOptions::default()
    };
    let req = required_passes(&cfg, EngineKind::Cycles);
    assert!(req.contains(&PassId::GlossyIndirect));
    assert!(req.contains(&PassId::Normal));
    assert!(!req.contains(&PassId::DenoisingData));
}

#[test]
fn master_switch_gates_family_toggles() {
    let mut cfg = quiet();
    cfg.denoise.glossy = true;
    assert!(required_passes(&cfg, EngineKind::Cycles).is_empty());
}

#[test]
fn enabling_mutates_the_layer_within_engine_capabilities() {
    let cfg = RenderConfiguration::default();
    let mut layer = ViewLayer::new("A");
    let enabled = enable_required_passes(&mut layer, &cfg, EngineKind::Eevee);
    assert!(layer.is_enabled(PassId::DiffuseDirect));
    assert!(layer.is_enabled(PassId::Transparent));
    assert!(layer.is_enabled(PassId::Normal));
    assert!(!layer.is_enabled(PassId::DiffuseIndirect));
    assert!(!layer.is_enabled(PassId::DenoisingData));
    assert!(enabled.contains(&PassId::GlossyColor));

    // Second run has nothing left to switch on.
    assert!(enable_required_passes(&mut layer, &cfg, EngineKind::Eevee).is_empty());
}
