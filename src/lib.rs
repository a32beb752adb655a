//! Render manager: view-layer pass management and compositor node-graph synthesis.
//!
//! The crate models a host document (scenes, view layers, render settings) and operates on it:
//!
//! - Browse and toggle render passes per engine through the pass registry
//! - Copy pass settings between view layers with a [`Clipboard`]
//! - Add, remove, reorder and switch view layers
//! - Rebuild a scene's compositor tree so every enabled pass lands in multi-layer EXR outputs,
//!   with optional denoising, light-component recombination and Y-up conversion
//!
//! [`RenderManager`] wraps these as user commands that report a status instead of failing.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod build;
pub(crate) mod clipboard;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod graph;
pub(crate) mod host;
pub(crate) mod passes;
pub(crate) mod scene;

pub use crate::foundation::core::{
    EngineKind, HostGeneration, HostVersion, NodeId, Point, Vec2,
};
pub use crate::foundation::error::{RenderManagerError, RenderManagerResult};

pub use crate::build::builder::{build_node_graph, output_base};
pub use crate::build::paths::LayerOutputPaths;
pub use crate::build::report::{BuildReport, BuildStep, BuildWarning};
pub use crate::clipboard::snapshot::{Clipboard, LayerSnapshot, PasteOutcome};
pub use crate::commands::app::{CommandReport, CommandStatus, RenderManager};
pub use crate::config::compression::SinkRole;
pub use crate::config::settings::{
    ColorDepth, ColorDepthOverride, DenoiseOptions, ExrCodec, NoisyRetention, RenderConfiguration,
};
pub use crate::graph::fingerprint::{
    SinkConnection, WiringFingerprint, sink_connections, wiring_fingerprint,
};
pub use crate::graph::node::{
    FileFormat, FileOutputNode, ImageFormat, Link, Node, NodeGroupKind, NodeKind, OutputSocket,
};
pub use crate::graph::tree::NodeTree;
pub use crate::host::outputs::{HostRenderLayerOutputs, RenderLayerOutputs};
pub use crate::passes::registry::{
    NODE_OPERATION_LABELS, PassCategory, PassDescriptor, PassGroup, PassId, PassProperty,
    PassValue, PropertyScope, descriptor, engine_supports, pass_groups, pass_groups_for_engine,
};
pub use crate::passes::sockets::{
    CryptoKind, MAX_CRYPTO_SOCKETS, Socket, crypto_socket_count, engine_exposes,
    light_group_socket_name, pass_sockets, resolve_socket_name,
};
pub use crate::scene::lifecycle::MoveDirection;
pub use crate::scene::model::{Document, NodeGroupEntry, RenderSettings, Scene};
pub use crate::scene::view_layer::ViewLayer;
