use super::*;

#[test]
fn unsaved_document_cannot_resolve_relative_paths() {
    let doc = Document::new(vec![Scene::new("Scene", "CYCLES")]);
    assert!(!doc.is_saved());
    let err = doc.abspath("//RenderOutputs").unwrap_err();
    assert!(err.to_string().starts_with("document not persisted:"));
    assert_eq!(doc.abspath("/tmp/out").unwrap(), PathBuf::from("/tmp/out"));
}

#[test]
fn relative_paths_resolve_against_document_directory() {
    let mut doc = Document::new(vec![]);
    doc.filepath = Some(PathBuf::from("/projects/shot/shot.blend"));
    assert_eq!(
        doc.abspath("//RenderOutputs").unwrap(),
        PathBuf::from("/projects/shot/RenderOutputs")
    );
}

#[test]
fn scene_lookup_reports_unknown_names() {
    let doc = Document::new(vec![Scene::new("Main", "CYCLES")]);
    assert_eq!(doc.scene("Main").unwrap().view_layers.len(), 1);
    assert!(doc.scene("Other").unwrap_err().to_string().contains("unknown scene"));
}

#[test]
fn node_groups_are_ensured_with_fake_user() {
    let mut doc = Document::default();
    doc.node_groups
        .insert("Y-Up".to_string(), NodeGroupEntry { fake_user: false });
    doc.ensure_node_groups();
    assert_eq!(doc.node_groups.len(), 3);
    assert!(doc.node_groups.values().all(|g| g.fake_user));
    assert!(doc.node_groups.contains_key("Combine_Passes"));
}

#[test]
fn render_settings_derive_engine_and_generation() {
    let mut rs = RenderSettings::new("BLENDER_EEVEE_NEXT");
    assert_eq!(rs.engine_kind(), Some(EngineKind::Eevee));
    assert_eq!(rs.generation(), HostGeneration::Legacy);
    rs.host_version = HostVersion::new(5, 0);
    assert_eq!(rs.generation(), HostGeneration::Current);
    assert_eq!(RenderSettings::new("BLENDER_WORKBENCH").engine_kind(), None);
}

#[test]
fn compression_level_is_bounded() {
    let mut doc = Document::new(vec![Scene::new("Scene", "CYCLES")]);
    assert!(doc.set_compression_level("Scene", 101).is_err());
    assert_eq!(doc.set_compression_level("Scene", 80).unwrap(), 0);
    assert_eq!(doc.scenes[0].render_manager.compression_level, 80);
}

#[test]
fn minimal_json_fills_defaults() {
    let doc = Document::from_reader(
        r#"{ "scenes": [ { "name": "S", "render": { "engine": "CYCLES" },
             "view_layers": [ { "name": "A" } ] } ] }"#
            .as_bytes(),
    )
    .unwrap();
    let scene = &doc.scenes[0];
    assert_eq!(scene.render.host_version, HostVersion::default());
    assert_eq!(scene.render_manager, RenderConfiguration::default());
    assert!(scene.node_tree.is_none());
    assert!(doc.filepath.is_none());
}
