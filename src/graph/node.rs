use crate::{
    config::settings::{ColorDepth, ExrCodec},
    foundation::core::{NodeId, Point},
    passes::sockets::NodeSocketNames,
};

/// Node groups the builder instantiates from the document's group library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NodeGroupKind {
    /// Converts Z-up position/normal data to Y-up.
    YUp,
    /// Converts Z-up motion vectors to Y-up.
    Vector,
    /// `(direct + indirect) * color`.
    CombinePasses,
}

impl NodeGroupKind {
    /// Every group the builder may reference.
    pub const ALL: [NodeGroupKind; 3] = [Self::YUp, Self::Vector, Self::CombinePasses];

    /// Library name of the group.
    pub fn library_name(self) -> &'static str {
        match self {
            Self::YUp => "Y-Up",
            Self::Vector => "Vector",
            Self::CombinePasses => "Combine_Passes",
        }
    }
}

/// Container format written by file-output sinks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FileFormat {
    /// Multi-layer OpenEXR.
    #[default]
    #[serde(rename = "OPEN_EXR_MULTILAYER")]
    OpenExrMultilayer,
}

/// Image settings of a file-output sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageFormat {
    /// Container format.
    pub file_format: FileFormat,
    /// EXR compression codec.
    pub exr_codec: ExrCodec,
    /// Bit depth.
    pub color_depth: ColorDepth,
    /// Lossy compression level; only meaningful with lossy codecs.
    pub quality: u32,
}

/// File-output sink properties.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FileOutputNode {
    /// Output path template with a `####` frame placeholder.
    pub base_path: String,
    /// Image settings.
    pub format: ImageFormat,
    /// Host API the slots were provisioned with.
    pub slot_api: String,
}

/// Kind-specific node payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum NodeKind {
    /// Render-layer source bound to a view layer.
    RenderLayers {
        /// Scene owning the layer.
        scene: String,
        /// View-layer name.
        layer: String,
    },
    /// Instance of a library node group.
    Group(NodeGroupKind),
    /// Two-input multiply.
    Multiply,
    /// Denoiser consuming image, normal and albedo.
    Denoise,
    /// Multi-layer file-output sink.
    OutputFile(FileOutputNode),
    /// Alpha-over compositing.
    AlphaOver,
    /// Terminal composite output.
    Composite,
}

impl NodeKind {
    /// Short stable identifier used in logs and fingerprints.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RenderLayers { .. } => "RenderLayers",
            Self::Group(NodeGroupKind::YUp) => "Group:Y-Up",
            Self::Group(NodeGroupKind::Vector) => "Group:Vector",
            Self::Group(NodeGroupKind::CombinePasses) => "Group:Combine_Passes",
            Self::Multiply => "Multiply",
            Self::Denoise => "Denoise",
            Self::OutputFile(_) => "OutputFile",
            Self::AlphaOver => "AlphaOver",
            Self::Composite => "Composite",
        }
    }

    /// Fixed `(inputs, outputs)` of this kind; render layers and file outputs start empty.
    pub(crate) fn default_sockets(
        &self,
        names: &NodeSocketNames,
    ) -> (Vec<&'static str>, Vec<&'static str>) {
        match self {
            Self::RenderLayers { .. } | Self::OutputFile(_) => (vec![], vec![]),
            Self::Group(NodeGroupKind::YUp | NodeGroupKind::Vector) => {
                (vec!["Vector"], vec!["Vector"])
            }
            Self::Group(NodeGroupKind::CombinePasses) => {
                (vec!["Direct", "Indirect", "Color"], vec!["Combined"])
            }
            Self::Multiply => (vec!["Light", "Color"], vec!["Image"]),
            Self::Denoise => (vec!["Image", "Normal", "Albedo"], vec!["Image"]),
            Self::AlphaOver => (
                vec![
                    "Fac",
                    names.alpha_over_background,
                    names.alpha_over_foreground,
                ],
                vec!["Image"],
            ),
            Self::Composite => (vec!["Image"], vec![]),
        }
    }
}

/// Output socket as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputSocket {
    /// Socket name.
    pub name: String,
    /// `false` when the socket exists but the host flags it unavailable.
    pub available: bool,
}

impl OutputSocket {
    /// An available socket.
    pub fn available(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
        }
    }

    /// A socket that exists but is flagged unavailable.
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: false,
        }
    }
}

/// A compositor node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Identifier within its tree.
    pub id: NodeId,
    /// Kind payload.
    pub kind: NodeKind,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Editor position; cosmetic only.
    pub location: Point,
    /// Collapsed in the editor.
    #[serde(default)]
    pub hide: bool,
    /// Input socket names in order.
    pub inputs: Vec<String>,
    /// Output sockets in order.
    pub outputs: Vec<OutputSocket>,
}

impl Node {
    /// Whether an output socket with `name` exists.
    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|o| o.name == name)
    }

    /// The output socket named `name`, if present and available.
    pub fn available_output(&self, name: &str) -> Option<&OutputSocket> {
        self.outputs.iter().find(|o| o.name == name && o.available)
    }

    /// Whether an input socket with `name` exists.
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|i| i == name)
    }

    /// File-output payload, if this is a sink.
    pub fn file_output(&self) -> Option<&FileOutputNode> {
        match &self.kind {
            NodeKind::OutputFile(f) => Some(f),
            _ => None,
        }
    }

    /// Mutable file-output payload, if this is a sink.
    pub fn file_output_mut(&mut self) -> Option<&mut FileOutputNode> {
        match &mut self.kind {
            NodeKind::OutputFile(f) => Some(f),
            _ => None,
        }
    }
}

/// Directed edge from an output socket to an input socket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Link {
    /// Upstream node.
    pub from_node: NodeId,
    /// Upstream output socket name.
    pub from_socket: String,
    /// Downstream node.
    pub to_node: NodeId,
    /// Downstream input socket name.
    pub to_socket: String,
}
