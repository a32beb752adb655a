use super::*;
use crate::{
    config::settings::ColorDepth,
    foundation::core::{HostGeneration, NodeId, Point},
    graph::node::{FileFormat, FileOutputNode, ImageFormat, NodeKind},
};

fn sink(tree: &mut NodeTree, label: &str) -> NodeId {
    tree.add_node(
        NodeKind::OutputFile(FileOutputNode {
            base_path: String::new(),
            format: ImageFormat {
                file_format: FileFormat::OpenExrMultilayer,
                exr_codec: ExrCodec::None,
                color_depth: ColorDepth::Full,
                quality: 0,
            },
            slot_api: "file_output_items".to_string(),
        }),
        label,
        Point::ORIGIN,
    )
}

fn codec(tree: &NodeTree, id: NodeId) -> (ExrCodec, u32) {
    let f = tree.node(id).unwrap().file_output().unwrap();
    (f.format.exr_codec, f.format.quality)
}

#[test]
fn roles_parse_from_labels() {
    assert_eq!(SinkRole::from_label("A Color Output"), Some(SinkRole::Color));
    assert_eq!(SinkRole::from_label("fg Backup Output"), Some(SinkRole::Backup));
    assert_eq!(SinkRole::from_label("Composite"), None);
    assert_eq!(SinkRole::Noisy.label("bg"), "bg Noisy Output");
}

#[test]
fn data_codec_change_leaves_color_sinks_alone() {
    let mut tree = NodeTree::new(HostGeneration::Current);
    let color = sink(&mut tree, "A Color Output");
    let data = sink(&mut tree, "A Data Output");
    let backup = sink(&mut tree, "A Backup Output");
    let other = sink(&mut tree, "Custom");

    let cfg = RenderConfiguration {
        beauty_compression: ExrCodec::Dwaa,
        data_compression: ExrCodec::Piz,
        compression_level: 60,
        ..RenderConfiguration::default()
    };
    assert_eq!(update_exr_compression(&mut tree, &cfg), 3);

    assert_eq!(codec(&tree, color), (ExrCodec::Dwaa, 60));
    // Lossless codecs keep their previous quality.
    assert_eq!(codec(&tree, data), (ExrCodec::Piz, 0));
    assert_eq!(codec(&tree, backup), (ExrCodec::Piz, 0));
    assert_eq!(codec(&tree, other), (ExrCodec::None, 0));
}
