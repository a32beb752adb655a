use super::*;
use crate::{
    config::settings::{ColorDepth, ExrCodec},
    foundation::core::{HostGeneration, Point},
    graph::node::{FileFormat, FileOutputNode, ImageFormat, OutputSocket},
};

fn sink_kind() -> NodeKind {
    NodeKind::OutputFile(FileOutputNode {
        base_path: "/out/A/A.####.exr".to_string(),
        format: ImageFormat {
            file_format: FileFormat::OpenExrMultilayer,
            exr_codec: ExrCodec::Zip,
            color_depth: ColorDepth::Half,
            quality: 0,
        },
        slot_api: "layer_slots".to_string(),
    })
}

/// Source -> Denoise -> sink, plus a direct `Alpha` link; `pad` shifts node ids.
fn tree(pad: usize) -> NodeTree {
    let mut t = NodeTree::new(HostGeneration::Legacy);
    for _ in 0..pad {
        t.add_node(NodeKind::Multiply, "pad", Point::ORIGIN);
    }
    let src = t.add_node(
        NodeKind::RenderLayers {
            scene: "Scene".to_string(),
            layer: "A".to_string(),
        },
        "A",
        Point::ORIGIN,
    );
    t.set_outputs(
        src,
        vec![OutputSocket::available("Image"), OutputSocket::available("Alpha")],
    )
    .unwrap();
    let dn = t.add_node(NodeKind::Denoise, "Denoise Image", Point::ORIGIN);
    let sink = t.add_node(sink_kind(), "A Color Output", Point::new(900.0, 0.0));
    t.ensure_slot(sink, "Image").unwrap();
    t.ensure_slot(sink, "Alpha").unwrap();
    t.link(src, "Image", dn, "Image").unwrap();
    t.link(dn, "Image", sink, "Image").unwrap();
    t.link(src, "Alpha", sink, "Alpha").unwrap();
    t
}

#[test]
fn connections_trace_back_to_the_source_layer() {
    let conns: Vec<_> = sink_connections(&tree(0)).into_iter().collect();
    assert_eq!(conns.len(), 2);
    assert_eq!(conns[0].slot, "Alpha");
    assert!(conns[0].chain.is_empty());
    assert_eq!(conns[1].slot, "Image");
    assert_eq!(conns[1].chain, ["Denoise"]);
    assert!(conns.iter().all(|c| c.layer == "A" && c.sink == "A Color Output"));
}

#[test]
fn fingerprint_ignores_ids_and_locations() {
    assert_eq!(wiring_fingerprint(&tree(0)), wiring_fingerprint(&tree(3)));
}

#[test]
fn fingerprint_changes_with_wiring() {
    let mut t = tree(0);
    let sink = t.node_by_label("A Color Output").unwrap().id;
    t.remove_slot(sink, "Alpha").unwrap();
    assert_ne!(wiring_fingerprint(&t), wiring_fingerprint(&tree(0)));
}
