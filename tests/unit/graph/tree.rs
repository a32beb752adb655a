use super::*;
use crate::{
    config::settings::{ColorDepth, ExrCodec},
    graph::node::{FileFormat, FileOutputNode, ImageFormat, NodeGroupKind},
};

fn sink() -> NodeKind {
    NodeKind::OutputFile(FileOutputNode {
        base_path: "out/A.####.exr".to_string(),
        format: ImageFormat {
            file_format: FileFormat::OpenExrMultilayer,
            exr_codec: ExrCodec::Zip,
            color_depth: ColorDepth::Full,
            quality: 45,
        },
        slot_api: "layer_slots".to_string(),
    })
}

#[test]
fn link_replaces_existing_input_link() {
    let mut tree = NodeTree::new(HostGeneration::Legacy);
    let a = tree.add_node(NodeKind::Denoise, "a", Point::ORIGIN);
    let b = tree.add_node(NodeKind::Denoise, "b", Point::ORIGIN);
    let out = tree.add_node(sink(), "out", Point::ORIGIN);
    tree.ensure_slot(out, "Image").unwrap();

    tree.link(a, "Image", out, "Image").unwrap();
    tree.link(b, "Image", out, "Image").unwrap();

    assert_eq!(tree.links().len(), 1);
    assert_eq!(tree.link_into(out, "Image").unwrap().from_node, b);
    assert!(!tree.is_output_linked(a, "Image"));
}

#[test]
fn link_rejects_unknown_sockets() {
    let mut tree = NodeTree::new(HostGeneration::Legacy);
    let a = tree.add_node(NodeKind::Denoise, "a", Point::ORIGIN);
    let c = tree.add_node(NodeKind::Composite, "c", Point::ORIGIN);
    assert!(tree.link(a, "Nope", c, "Image").is_err());
    assert!(tree.link(a, "Image", c, "Nope").is_err());
    assert!(tree.links().is_empty());
}

#[test]
fn slots_are_reused_and_pruned_with_their_links() {
    let mut tree = NodeTree::new(HostGeneration::Legacy);
    let src = tree.add_node(NodeKind::Group(NodeGroupKind::YUp), "y", Point::ORIGIN);
    let out = tree.add_node(sink(), "out", Point::ORIGIN);
    tree.ensure_slot(out, "Normal").unwrap();
    tree.ensure_slot(out, "Normal").unwrap();
    assert_eq!(tree.node(out).unwrap().inputs, vec!["Normal".to_string()]);

    tree.link(src, "Vector", out, "Normal").unwrap();
    tree.remove_slot(out, "Normal").unwrap();
    assert!(tree.node(out).unwrap().inputs.is_empty());
    assert!(tree.links().is_empty());
}

#[test]
fn slots_only_exist_on_file_outputs() {
    let mut tree = NodeTree::new(HostGeneration::Legacy);
    let d = tree.add_node(NodeKind::Denoise, "d", Point::ORIGIN);
    assert!(tree.ensure_slot(d, "X").is_err());
}

#[test]
fn alpha_over_inputs_follow_generation() {
    let mut legacy = NodeTree::new(HostGeneration::Legacy);
    let id = legacy.add_node(NodeKind::AlphaOver, "", Point::ORIGIN);
    assert!(legacy.node(id).unwrap().has_input("Image_001"));

    let mut current = NodeTree::new(HostGeneration::Current);
    let id = current.add_node(NodeKind::AlphaOver, "", Point::ORIGIN);
    assert!(current.node(id).unwrap().has_input("Foreground"));
}

#[test]
fn clear_drops_everything_but_keeps_ids_fresh() {
    let mut tree = NodeTree::new(HostGeneration::Legacy);
    let first = tree.add_node(NodeKind::Composite, "c", Point::ORIGIN);
    tree.clear();
    assert!(tree.nodes().is_empty());
    let second = tree.add_node(NodeKind::Composite, "c", Point::ORIGIN);
    assert_ne!(first, second);
}

#[test]
fn set_outputs_drops_links_from_vanished_sockets() {
    let mut tree = NodeTree::new(HostGeneration::Legacy);
    let rl = tree.add_node(
        NodeKind::RenderLayers {
            scene: "Scene".to_string(),
            layer: "A".to_string(),
        },
        "A",
        Point::ORIGIN,
    );
    tree.set_outputs(
        rl,
        vec![OutputSocket::available("Image"), OutputSocket::available("Mist")],
    )
    .unwrap();
    let c = tree.add_node(NodeKind::Composite, "c", Point::ORIGIN);
    tree.link(rl, "Mist", c, "Image").unwrap();

    tree.set_outputs(rl, vec![OutputSocket::available("Image")])
        .unwrap();
    assert!(tree.links().is_empty());
}

#[test]
fn tree_serializes_to_json() {
    let mut tree = NodeTree::new(HostGeneration::Current);
    let out = tree.add_node(sink(), "A Color Output", Point::new(1200.0, 0.0));
    tree.ensure_slot(out, "Image").unwrap();
    let s = serde_json::to_string(&tree).unwrap();
    let de: NodeTree = serde_json::from_str(&s).unwrap();
    assert_eq!(de, tree);
}
