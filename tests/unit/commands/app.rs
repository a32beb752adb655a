use super::*;
use crate::{
    passes::registry::{PassId, PassValue},
    scene::model::Scene,
};

fn manager() -> RenderManager {
    let mut scene = Scene::new("Scene", "CYCLES");
    scene.render_manager.denoise.enabled = false;
    RenderManager::new(Document::new(vec![scene]))
}

#[test]
fn build_on_unsaved_document_is_cancelled() {
    let mut app = manager();
    let report = app.create_render_nodes("Scene");
    assert_eq!(report.status, CommandStatus::Cancelled);
    assert_eq!(report.message, "Please save the file first.");
    assert!(app.document().scenes[0].node_tree.is_none());
}

#[test]
fn build_on_saved_document_finishes() {
    let mut app = manager();
    app.document_mut().filepath = Some("target/unit_commands_build/scene.json".into());
    let report = app.create_render_nodes("Scene");
    assert!(report.is_finished(), "{}", report.message);
    assert!(app.document().scenes[0].node_tree.is_some());
}

#[test]
fn paste_before_copy_is_cancelled() {
    let mut app = manager();
    let report = app.paste_layer_settings("Scene", 0);
    assert_eq!(report.status, CommandStatus::Cancelled);
}

#[test]
fn copy_then_paste_transfers_settings() {
    let mut app = manager();
    assert!(app.add_render_layer("Scene").is_finished());
    app.document_mut().scenes[0].view_layers[0].set(PassId::Mist, PassValue::Bool(true));

    assert!(app.copy_layer_settings("Scene", 0).is_finished());
    assert_eq!(app.clipboard().source_layer(), Some("ViewLayer"));
    assert!(app.paste_layer_settings("Scene", 1).is_finished());
    assert!(app.document().scenes[0].view_layers[1].is_enabled(PassId::Mist));
}

#[test]
fn removing_the_last_layer_is_cancelled() {
    let mut app = manager();
    let report = app.remove_render_layer("Scene");
    assert_eq!(report.status, CommandStatus::Cancelled);
    assert_eq!(app.document().scenes[0].view_layers.len(), 1);

    app.add_render_layer("Scene");
    let report = app.remove_render_layer("Scene");
    assert!(report.is_finished());
    assert_eq!(report.message, "Removed render layer: New Layer");
}

#[test]
fn reorder_moves_the_active_layer() {
    let mut app = manager();
    app.add_render_layer("Scene");
    let report = app.reorder_view_layer("Scene", MoveDirection::Up);
    assert!(report.is_finished());
    let scene = &app.document().scenes[0];
    assert_eq!(scene.view_layers[0].name, "New Layer");
    assert_eq!(scene.active_layer, 0);

    let report = app.reorder_view_layer("Scene", MoveDirection::Up);
    assert_eq!(report.message, "Layer is already at the edge");
}

#[test]
fn unknown_scene_and_index_are_cancelled() {
    let mut app = manager();
    assert_eq!(
        app.add_render_layer("Nope").status,
        CommandStatus::Cancelled
    );
    assert_eq!(app.switch_layer("Scene", 3).status, CommandStatus::Cancelled);
    assert_eq!(
        app.set_layer_use("Scene", 3, false).status,
        CommandStatus::Cancelled
    );
}

#[test]
fn compression_commands_report_and_validate() {
    let mut app = manager();
    assert!(app.set_beauty_compression("Scene", ExrCodec::Piz).is_finished());
    assert!(app.set_data_compression("Scene", ExrCodec::Zips).is_finished());
    assert_eq!(
        app.set_compression_level("Scene", 101).status,
        CommandStatus::Cancelled
    );
    let cfg = &app.document().scenes[0].render_manager;
    assert_eq!(cfg.beauty_compression, ExrCodec::Piz);
    assert_eq!(cfg.data_compression, ExrCodec::Zips);
    assert_eq!(cfg.compression_level, 45);
}

#[test]
fn status_displays_uppercase() {
    assert_eq!(CommandStatus::Finished.to_string(), "FINISHED");
    assert_eq!(CommandStatus::Cancelled.to_string(), "CANCELLED");
}
