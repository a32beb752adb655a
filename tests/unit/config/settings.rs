use super::*;

#[test]
fn defaults_match_the_panel() {
    let cfg = RenderConfiguration::default();
    assert_eq!(cfg.beauty_compression, ExrCodec::Dwaa);
    assert_eq!(cfg.data_compression, ExrCodec::Zip);
    assert!(cfg.combine_cycles);
    assert!(cfg.denoise.enabled && cfg.denoise.image && cfg.denoise.diffuse);
    assert!(!cfg.denoise.alpha && !cfg.denoise.shadow_catcher);
    assert!(!cfg.noisy.embed && !cfg.noisy.separate);
    assert_eq!(cfg.color_depth_override, ColorDepthOverride::Half);
    assert_eq!(cfg.file_output_basepath, "//RenderOutputs");
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: RenderConfiguration =
        serde_json::from_str(r#"{ "backup_passes": true, "denoise": { "alpha": true } }"#)
            .unwrap();
    assert!(cfg.backup_passes);
    assert!(cfg.denoise.alpha);
    assert!(cfg.denoise.enabled);
    assert_eq!(cfg.compression_level, 45);
}

#[test]
fn codecs_and_depths_use_host_identifiers() {
    assert_eq!(serde_json::to_string(&ExrCodec::B44a).unwrap(), "\"B44A\"");
    assert_eq!("dwab".parse::<ExrCodec>().unwrap(), ExrCodec::Dwab);
    assert!("LZMA".parse::<ExrCodec>().is_err());
    assert_eq!(serde_json::to_string(&ColorDepth::Full).unwrap(), "\"32\"");
    let o: ColorDepthOverride = serde_json::from_str("\"0\"").unwrap();
    assert_eq!(o, ColorDepthOverride::Inherit);
}

#[test]
fn lossy_codecs_are_flagged() {
    assert!(ExrCodec::Dwaa.is_lossy());
    assert!(ExrCodec::B44.is_lossy());
    assert!(!ExrCodec::Zip.is_lossy());
    assert!(!ExrCodec::Piz.is_lossy());
}

#[test]
fn depth_override_resolves_against_scene() {
    assert_eq!(
        ColorDepthOverride::Inherit.resolve(ColorDepth::Full),
        ColorDepth::Full
    );
    assert_eq!(
        ColorDepthOverride::Half.resolve(ColorDepth::Full),
        ColorDepth::Half
    );
}

#[test]
fn noisy_sink_needs_an_active_denoise_family() {
    let mut cfg = RenderConfiguration::default();
    cfg.noisy.separate = true;
    assert!(cfg.writes_noisy_sink());

    cfg.denoise.enabled = false;
    assert!(!cfg.writes_noisy_sink());

    cfg.denoise = DenoiseOptions {
        enabled: true,
        image: false,
        diffuse: false,
        glossy: false,
        transmission: false,
        ..DenoiseOptions::default()
    };
    assert!(!cfg.denoise.any_checked());
    assert!(!cfg.writes_noisy_sink());
}

#[test]
fn combine_is_per_engine_family() {
    let cfg = RenderConfiguration {
        combine_cycles: false,
        ..RenderConfiguration::default()
    };
    assert!(!cfg.combine_for(EngineKind::Cycles));
    assert!(cfg.combine_for(EngineKind::Eevee));
}
