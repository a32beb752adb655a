use super::*;

#[test]
fn unset_passes_read_registry_defaults() {
    let vl = ViewLayer::new("A");
    assert!(vl.is_enabled(PassId::Combined));
    assert!(vl.is_enabled(PassId::Z));
    assert!(!vl.is_enabled(PassId::Mist));
    assert_eq!(vl.value(PassId::CryptoDepth), PassValue::Int(6));
}

#[test]
fn engine_properties_land_in_their_settings_block() {
    let mut vl = ViewLayer::new("A");
    vl.set(PassId::ShadowCatcher, PassValue::Bool(true));
    vl.set(PassId::Mist, PassValue::Bool(true));
    assert_eq!(
        vl.engine_settings["cycles"]["use_pass_shadow_catcher"],
        PassValue::Bool(true)
    );
    assert_eq!(vl.passes["use_pass_mist"], PassValue::Bool(true));
}

#[test]
fn engine_gated_access_skips_undefined_properties() {
    let mut vl = ViewLayer::new("A");
    assert!(!vl.set_for(EngineKind::Eevee, PassId::DenoisingData, PassValue::Bool(true)));
    assert!(!vl.is_enabled(PassId::DenoisingData));
    assert_eq!(vl.value_for(EngineKind::Eevee, PassId::DiffuseIndirect), None);
    assert!(vl.set_for(EngineKind::Eevee, PassId::Transparent, PassValue::Bool(true)));
    assert_eq!(
        vl.value_for(EngineKind::Eevee, PassId::Transparent),
        Some(PassValue::Bool(true))
    );
}

#[test]
fn enable_all_respects_capabilities() {
    let mut vl = ViewLayer::new("A");
    vl.enable_all_for(
        EngineKind::Eevee,
        &[PassId::GlossyDirect, PassId::GlossyIndirect, PassId::GlossyColor],
    );
    assert!(vl.is_enabled(PassId::GlossyDirect));
    assert!(!vl.is_enabled(PassId::GlossyIndirect));
    assert!(vl.is_enabled(PassId::GlossyColor));
}

#[test]
fn clean_name_strips_layers_prefix() {
    assert_eq!(ViewLayer::new("layers_fg").clean_name(), "fg");
    assert_eq!(ViewLayer::new("layers_fg_hero").clean_name(), "fg_hero");
    assert_eq!(ViewLayer::new("bg_layers").clean_name(), "bg_layers");
}

#[test]
fn json_uses_host_field_names() {
    let vl: ViewLayer = serde_json::from_str(
        r#"{ "name": "A", "use": false, "passes": { "use_pass_mist": true },
             "engine_settings": { "cycles": { "denoising_store_passes": true } } }"#,
    )
    .unwrap();
    assert!(!vl.use_for_render);
    assert!(vl.is_enabled(PassId::Mist));
    assert!(vl.is_enabled(PassId::DenoisingData));

    let vl: ViewLayer = serde_json::from_str(r#"{ "name": "B" }"#).unwrap();
    assert!(vl.use_for_render);
}
