use super::*;
use crate::{foundation::core::HostVersion, passes::registry::PassValue};

fn names(sockets: &[OutputSocket]) -> Vec<&str> {
    sockets.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn default_cycles_layer_exposes_image_alpha_depth() {
    let render = RenderSettings::new("CYCLES");
    let out = HostRenderLayerOutputs.outputs(&render, &ViewLayer::new("A"));
    assert_eq!(names(&out), ["Image", "Alpha", "Depth"]);
    assert!(out.iter().all(|s| s.available));
}

#[test]
fn socket_names_follow_host_generation() {
    let mut layer = ViewLayer::new("A");
    layer.set(PassId::DiffuseDirect, PassValue::Bool(true));
    layer.set(PassId::ObjectIndex, PassValue::Bool(true));

    let mut render = RenderSettings::new("CYCLES");
    let legacy = HostRenderLayerOutputs.outputs(&render, &layer);
    assert!(names(&legacy).contains(&"DiffDir"));
    assert!(names(&legacy).contains(&"IndexOB"));

    render.host_version = HostVersion::new(5, 0);
    let current = HostRenderLayerOutputs.outputs(&render, &layer);
    assert!(names(&current).contains(&"Diffuse Direct"));
    assert!(names(&current).contains(&"Object Index"));
}

#[test]
fn cryptomatte_sockets_scale_with_levels() {
    let mut layer = ViewLayer::new("A");
    layer.set(PassId::CryptoObject, PassValue::Bool(true));
    layer.set(PassId::CryptoDepth, PassValue::Int(5));
    let out = HostRenderLayerOutputs.outputs(&RenderSettings::new("CYCLES"), &layer);
    let crypto: Vec<_> = names(&out)
        .into_iter()
        .filter(|n| n.starts_with("Crypto"))
        .collect();
    assert_eq!(crypto, ["CryptoObject00", "CryptoObject01", "CryptoObject02"]);
}

#[test]
fn render_denoiser_adds_noisy_outputs() {
    let mut layer = ViewLayer::new("A");
    layer.set(PassId::ShadowCatcher, PassValue::Bool(true));
    let mut render = RenderSettings::new("CYCLES");
    render.use_denoising = true;
    let out = HostRenderLayerOutputs.outputs(&render, &layer);
    assert!(names(&out).contains(&"Noisy Image"));
    assert!(names(&out).contains(&"Noisy Shadow Catcher"));
}

#[test]
fn eevee_ignores_cycles_only_settings() {
    let mut layer = ViewLayer::new("A");
    layer.set(PassId::DenoisingData, PassValue::Bool(true));
    layer.set(PassId::DiffuseIndirect, PassValue::Bool(true));
    layer.set(PassId::Transparent, PassValue::Bool(true));
    layer.light_groups.push("key".to_string());
    let mut render = RenderSettings::new("BLENDER_EEVEE_NEXT");
    render.use_denoising = true;
    let out = HostRenderLayerOutputs.outputs(&render, &layer);
    assert_eq!(names(&out), ["Image", "Alpha", "Depth", "Transp"]);
}

#[test]
fn light_groups_expose_combined_sockets() {
    let mut layer = ViewLayer::new("A");
    layer.light_groups = vec!["key".to_string(), "rim".to_string()];
    let out = HostRenderLayerOutputs.outputs(&RenderSettings::new("CYCLES"), &layer);
    assert!(names(&out).ends_with(&["Combined_key", "Combined_rim"]));
}

#[test]
fn unknown_engine_exposes_only_image_and_alpha() {
    let mut layer = ViewLayer::new("A");
    layer.set(PassId::Mist, PassValue::Bool(true));
    let out = HostRenderLayerOutputs.outputs(&RenderSettings::new("BLENDER_WORKBENCH"), &layer);
    assert_eq!(names(&out), ["Image", "Alpha"]);
}
