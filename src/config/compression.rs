use crate::{
    config::settings::{ExrCodec, RenderConfiguration},
    graph::tree::NodeTree,
};

/// Codec family a file-output sink belongs to, derived from its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkRole {
    /// Primary color sink (`<layer> Color Output`).
    Color,
    /// Data-pass sink (`<layer> Data Output`).
    Data,
    /// Separate noisy sink (`<layer> Noisy Output`).
    Noisy,
    /// Raw backup sink (`<layer> Backup Output`).
    Backup,
}

impl SinkRole {
    /// Every role in build order.
    pub const ALL: [SinkRole; 4] = [Self::Color, Self::Data, Self::Noisy, Self::Backup];

    /// Label suffix identifying the role.
    pub fn label_suffix(self) -> &'static str {
        match self {
            Self::Color => "Color Output",
            Self::Data => "Data Output",
            Self::Noisy => "Noisy Output",
            Self::Backup => "Backup Output",
        }
    }

    /// Node label for a sink of this role on layer `clean_name`.
    pub fn label(self, clean_name: &str) -> String {
        format!("{clean_name} {}", self.label_suffix())
    }

    /// Role of a sink label, if it carries one.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| label.contains(role.label_suffix()))
    }

    /// Codec configured for this role.
    pub fn codec(self, cfg: &RenderConfiguration) -> ExrCodec {
        match self {
            Self::Color | Self::Noisy => cfg.beauty_compression,
            Self::Data | Self::Backup => cfg.data_compression,
        }
    }
}

/// Apply the configured codecs to every labeled file-output sink in `tree`.
///
/// Lossy codecs also receive the configured compression level. Returns the number of sinks
/// touched.
pub(crate) fn update_exr_compression(tree: &mut NodeTree, cfg: &RenderConfiguration) -> usize {
    let mut touched = 0;
    for node in tree.nodes_mut() {
        let Some(role) = SinkRole::from_label(&node.label) else {
            continue;
        };
        let Some(out) = node.file_output_mut() else {
            continue;
        };
        let codec = role.codec(cfg);
        out.format.exr_codec = codec;
        if codec.is_lossy() {
            out.format.quality = cfg.compression_level;
        }
        touched += 1;
    }
    tracing::debug!(touched, "updated EXR compression on file outputs");
    touched
}

#[cfg(test)]
#[path = "../../tests/unit/config/compression.rs"]
mod tests;
