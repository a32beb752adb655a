use crate::foundation::core::EngineKind;

/// OpenEXR compression codecs.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum ExrCodec {
    None,
    Rle,
    Zips,
    #[default]
    Zip,
    Piz,
    Pxr24,
    B44,
    B44a,
    Dwaa,
    Dwab,
}

impl ExrCodec {
    /// Whether the codec discards information and honors a compression level.
    pub fn is_lossy(self) -> bool {
        matches!(
            self,
            Self::Pxr24 | Self::B44 | Self::B44a | Self::Dwaa | Self::Dwab
        )
    }

    /// Host enum identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Rle => "RLE",
            Self::Zips => "ZIPS",
            Self::Zip => "ZIP",
            Self::Piz => "PIZ",
            Self::Pxr24 => "PXR24",
            Self::B44 => "B44",
            Self::B44a => "B44A",
            Self::Dwaa => "DWAA",
            Self::Dwab => "DWAB",
        }
    }
}

impl std::str::FromStr for ExrCodec {
    type Err = crate::RenderManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let codec = match s.to_ascii_uppercase().as_str() {
            "NONE" => Self::None,
            "RLE" => Self::Rle,
            "ZIPS" => Self::Zips,
            "ZIP" => Self::Zip,
            "PIZ" => Self::Piz,
            "PXR24" => Self::Pxr24,
            "B44" => Self::B44,
            "B44A" => Self::B44a,
            "DWAA" => Self::Dwaa,
            "DWAB" => Self::Dwab,
            _ => {
                return Err(crate::RenderManagerError::validation(format!(
                    "unknown EXR codec '{s}'"
                )));
            }
        };
        Ok(codec)
    }
}

/// Bit depth of a file-output sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ColorDepth {
    /// 16-bit half float.
    #[default]
    #[serde(rename = "16")]
    Half,
    /// 32-bit float.
    #[serde(rename = "32")]
    Full,
}

/// Color-sink depth selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ColorDepthOverride {
    /// Use the scene's render output depth.
    #[serde(rename = "0")]
    Inherit,
    /// Force 16-bit.
    #[default]
    #[serde(rename = "16")]
    Half,
    /// Force 32-bit.
    #[serde(rename = "32")]
    Full,
}

impl ColorDepthOverride {
    /// Resolve against the scene's render output depth.
    pub fn resolve(self, scene_depth: ColorDepth) -> ColorDepth {
        match self {
            Self::Inherit => scene_depth,
            Self::Half => ColorDepth::Half,
            Self::Full => ColorDepth::Full,
        }
    }
}

/// Per-pass-family denoise toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DenoiseOptions {
    /// Master switch; when off no family is denoised.
    pub enabled: bool,
    /// Beauty image.
    pub image: bool,
    /// Diffuse light.
    pub diffuse: bool,
    /// Glossy light.
    pub glossy: bool,
    /// Transmission light.
    pub transmission: bool,
    /// Alpha channel.
    pub alpha: bool,
    /// Direct volumetrics.
    pub volume_direct: bool,
    /// Indirect volumetrics.
    pub volume_indirect: bool,
    /// Shadow catcher.
    pub shadow_catcher: bool,
    /// Emission.
    pub emission: bool,
    /// Environment.
    pub environment: bool,
    /// Shadow.
    pub shadow: bool,
    /// Ambient occlusion.
    pub ambient_occlusion: bool,
    /// Light-group combined outputs.
    pub light_groups: bool,
}

impl Default for DenoiseOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            image: true,
            diffuse: true,
            glossy: true,
            transmission: true,
            alpha: false,
            volume_direct: false,
            volume_indirect: false,
            shadow_catcher: false,
            emission: false,
            environment: false,
            shadow: false,
            ambient_occlusion: false,
            light_groups: false,
        }
    }
}

impl DenoiseOptions {
    /// Whether any family toggle is checked, regardless of the master switch.
    pub fn any_checked(&self) -> bool {
        self.image
            || self.diffuse
            || self.glossy
            || self.transmission
            || self.alpha
            || self.volume_direct
            || self.volume_indirect
            || self.shadow_catcher
            || self.emission
            || self.environment
            || self.shadow
            || self.ambient_occlusion
            || self.light_groups
    }

    /// Whether a family toggle is effective (checked and master switch on).
    pub fn active(&self, family: bool) -> bool {
        self.enabled && family
    }
}

/// Where pre-denoise values are retained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoisyRetention {
    /// Embed `Noisy <name>` slots in the color sink.
    pub embed: bool,
    /// Write a separate noisy sink.
    pub separate: bool,
}

/// Scene-scoped options that drive node-graph synthesis.
///
/// Fields are plain data; writes are visible to the next build. The EXR compression fields have a
/// cross-cutting side effect on existing sinks and must be changed through
/// [`crate::Document::set_beauty_compression`], [`crate::Document::set_data_compression`] or
/// [`crate::Document::set_compression_level`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfiguration {
    /// Insert Y-up correction for position, normal and vector passes.
    pub fixed_for_y_up: bool,
    /// Recombine direct/indirect/color light passes under Cycles.
    pub combine_cycles: bool,
    /// Recombine light/color passes under Eevee.
    pub combine_eevee: bool,
    /// Per-pass denoising.
    pub denoise: DenoiseOptions,
    /// Noisy value retention.
    pub noisy: NoisyRetention,
    /// Write an unmodified copy of every pass to a backup sink.
    pub backup_passes: bool,
    /// Color sink depth.
    pub color_depth_override: ColorDepthOverride,
    /// Codec for color and noisy sinks.
    pub beauty_compression: ExrCodec,
    /// Codec for data and backup sinks.
    pub data_compression: ExrCodec,
    /// Quality level applied with lossy codecs.
    pub compression_level: u32,
    /// Output base directory; `//` prefixes resolve against the document directory.
    pub file_output_basepath: String,
}

impl Default for RenderConfiguration {
    fn default() -> Self {
        Self {
            fixed_for_y_up: false,
            combine_cycles: true,
            combine_eevee: true,
            denoise: DenoiseOptions::default(),
            noisy: NoisyRetention::default(),
            backup_passes: false,
            color_depth_override: ColorDepthOverride::default(),
            beauty_compression: ExrCodec::Dwaa,
            data_compression: ExrCodec::Zip,
            compression_level: 45,
            file_output_basepath: "//RenderOutputs".to_string(),
        }
    }
}

impl RenderConfiguration {
    /// Whether pass combination is active for `engine`.
    pub fn combine_for(&self, engine: EngineKind) -> bool {
        match engine {
            EngineKind::Cycles => self.combine_cycles,
            EngineKind::Eevee => self.combine_eevee,
        }
    }

    /// Whether any denoise family is effectively active.
    pub fn denoising_active(&self) -> bool {
        self.denoise.enabled && self.denoise.any_checked()
    }

    /// Whether a separate noisy sink is written.
    pub fn writes_noisy_sink(&self) -> bool {
        self.noisy.separate && self.denoising_active()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
