use crate::foundation::core::EngineKind;

/// Where a pass property lives on a view layer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PropertyScope {
    /// Directly on the view layer.
    Layer,
    /// On the layer's `cycles` settings block.
    Cycles,
    /// On the layer's `eevee` settings block.
    Eevee,
}

impl PropertyScope {
    /// Settings block key, or `None` for layer-level properties.
    pub fn settings_key(self) -> Option<&'static str> {
        match self {
            Self::Layer => None,
            Self::Cycles => Some("cycles"),
            Self::Eevee => Some("eevee"),
        }
    }
}

/// A `(sub-object path, property name)` pair addressing one pass setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassProperty {
    /// Sub-object holding the property.
    pub scope: PropertyScope,
    /// Host property name.
    pub name: &'static str,
}

impl PassProperty {
    const fn layer(name: &'static str) -> Self {
        Self {
            scope: PropertyScope::Layer,
            name,
        }
    }

    const fn cycles(name: &'static str) -> Self {
        Self {
            scope: PropertyScope::Cycles,
            name,
        }
    }

    const fn eevee(name: &'static str) -> Self {
        Self {
            scope: PropertyScope::Eevee,
            name,
        }
    }
}

/// Value of a pass setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PassValue {
    /// Enable toggle.
    Bool(bool),
    /// Numeric setting (cryptomatte levels).
    Int(i64),
}

impl PassValue {
    /// Interpret as an enable flag; numeric values are enabled when non-zero.
    pub fn as_bool(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Int(v) => v != 0,
        }
    }

    /// Interpret as an integer; flags map to `0`/`1`.
    pub fn as_int(self) -> i64 {
        match self {
            Self::Bool(b) => i64::from(b),
            Self::Int(v) => v,
        }
    }
}

/// Logical pass-setting identifier, independent of engine and host generation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum PassId {
    Combined,
    Z,
    Mist,
    Normal,
    Position,
    Uv,
    Vector,
    ObjectIndex,
    MaterialIndex,
    DenoisingData,
    Shadow,
    AmbientOcclusion,
    Emission,
    Environment,
    DiffuseDirect,
    DiffuseIndirect,
    DiffuseColor,
    GlossyDirect,
    GlossyIndirect,
    GlossyColor,
    TransmissionDirect,
    TransmissionIndirect,
    TransmissionColor,
    VolumeDirect,
    VolumeIndirect,
    ShadowCatcher,
    Transparent,
    CryptoObject,
    CryptoMaterial,
    CryptoAsset,
    CryptoDepth,
    CryptoAccurate,
}

impl PassId {
    /// Every pass setting, in clipboard/display order.
    pub const ALL: [PassId; 32] = [
        Self::Combined,
        Self::Z,
        Self::Mist,
        Self::Normal,
        Self::Position,
        Self::Uv,
        Self::Vector,
        Self::ObjectIndex,
        Self::MaterialIndex,
        Self::DenoisingData,
        Self::Shadow,
        Self::AmbientOcclusion,
        Self::Emission,
        Self::Environment,
        Self::DiffuseDirect,
        Self::DiffuseIndirect,
        Self::DiffuseColor,
        Self::GlossyDirect,
        Self::GlossyIndirect,
        Self::GlossyColor,
        Self::TransmissionDirect,
        Self::TransmissionIndirect,
        Self::TransmissionColor,
        Self::VolumeDirect,
        Self::VolumeIndirect,
        Self::ShadowCatcher,
        Self::Transparent,
        Self::CryptoObject,
        Self::CryptoMaterial,
        Self::CryptoAsset,
        Self::CryptoDepth,
        Self::CryptoAccurate,
    ];

    /// Host property backing this pass setting.
    pub fn property(self) -> PassProperty {
        match self {
            Self::Combined => PassProperty::layer("use_pass_combined"),
            Self::Z => PassProperty::layer("use_pass_z"),
            Self::Mist => PassProperty::layer("use_pass_mist"),
            Self::Normal => PassProperty::layer("use_pass_normal"),
            Self::Position => PassProperty::layer("use_pass_position"),
            Self::Uv => PassProperty::layer("use_pass_uv"),
            Self::Vector => PassProperty::layer("use_pass_vector"),
            Self::ObjectIndex => PassProperty::layer("use_pass_object_index"),
            Self::MaterialIndex => PassProperty::layer("use_pass_material_index"),
            Self::DenoisingData => PassProperty::cycles("denoising_store_passes"),
            Self::Shadow => PassProperty::layer("use_pass_shadow"),
            Self::AmbientOcclusion => PassProperty::layer("use_pass_ambient_occlusion"),
            Self::Emission => PassProperty::layer("use_pass_emit"),
            Self::Environment => PassProperty::layer("use_pass_environment"),
            Self::DiffuseDirect => PassProperty::layer("use_pass_diffuse_direct"),
            Self::DiffuseIndirect => PassProperty::layer("use_pass_diffuse_indirect"),
            Self::DiffuseColor => PassProperty::layer("use_pass_diffuse_color"),
            Self::GlossyDirect => PassProperty::layer("use_pass_glossy_direct"),
            Self::GlossyIndirect => PassProperty::layer("use_pass_glossy_indirect"),
            Self::GlossyColor => PassProperty::layer("use_pass_glossy_color"),
            Self::TransmissionDirect => PassProperty::layer("use_pass_transmission_direct"),
            Self::TransmissionIndirect => PassProperty::layer("use_pass_transmission_indirect"),
            Self::TransmissionColor => PassProperty::layer("use_pass_transmission_color"),
            Self::VolumeDirect => PassProperty::cycles("use_pass_volume_direct"),
            Self::VolumeIndirect => PassProperty::cycles("use_pass_volume_indirect"),
            Self::ShadowCatcher => PassProperty::cycles("use_pass_shadow_catcher"),
            Self::Transparent => PassProperty::eevee("use_pass_transparent"),
            Self::CryptoObject => PassProperty::layer("use_pass_cryptomatte_object"),
            Self::CryptoMaterial => PassProperty::layer("use_pass_cryptomatte_material"),
            Self::CryptoAsset => PassProperty::layer("use_pass_cryptomatte_asset"),
            Self::CryptoDepth => PassProperty::layer("pass_cryptomatte_depth"),
            Self::CryptoAccurate => PassProperty::layer("pass_cryptomatte_accurate"),
        }
    }

    /// Value a freshly created view layer carries.
    pub fn default_value(self) -> PassValue {
        match self {
            Self::Combined | Self::Z | Self::CryptoAccurate => PassValue::Bool(true),
            Self::CryptoDepth => PassValue::Int(6),
            _ => PassValue::Bool(false),
        }
    }

    /// Look up the pass backed by a host property.
    pub fn from_property(scope: PropertyScope, name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| {
            let prop = p.property();
            prop.scope == scope && prop.name == name
        })
    }
}

/// UI grouping of passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassCategory {
    /// The beauty pass.
    Main,
    /// Geometric/data passes written to the data sink.
    Data,
    /// Light-transport passes written to the color sink.
    Light,
    /// Cryptomatte mattes and their settings.
    Cryptomatte,
}

impl PassCategory {
    /// Group heading shown in the pass table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Main Pass",
            Self::Data => "Data Passes",
            Self::Light => "Light Passes",
            Self::Cryptomatte => "Cryptomatte",
        }
    }
}

/// Immutable description of one pass as shown for a specific engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassDescriptor {
    /// Logical pass id.
    pub id: PassId,
    /// UI label.
    pub label: &'static str,
}

/// An ordered, labelled list of passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassGroup {
    /// Group category (its label is the heading).
    pub category: PassCategory,
    /// Passes in display order.
    pub passes: &'static [PassDescriptor],
}

impl PassGroup {
    /// Group heading.
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

const fn d(id: PassId, label: &'static str) -> PassDescriptor {
    PassDescriptor { id, label }
}

static CYCLES_PASS_GROUPS: [PassGroup; 4] = [
    PassGroup {
        category: PassCategory::Main,
        passes: &[d(PassId::Combined, "Combined")],
    },
    PassGroup {
        category: PassCategory::Data,
        passes: &[
            d(PassId::Z, "Z"),
            d(PassId::Mist, "Mist"),
            d(PassId::Normal, "Normal"),
            d(PassId::Position, "Position"),
            d(PassId::Uv, "UV"),
            d(PassId::Vector, "Vector"),
            d(PassId::ObjectIndex, "Object Index"),
            d(PassId::MaterialIndex, "Material Index"),
            d(PassId::DenoisingData, "Denoising Data"),
        ],
    },
    PassGroup {
        category: PassCategory::Light,
        passes: &[
            d(PassId::Shadow, "Shadow"),
            d(PassId::AmbientOcclusion, "Ambient Occlusion"),
            d(PassId::Emission, "Emission"),
            d(PassId::Environment, "Environment"),
            d(PassId::DiffuseDirect, "Diffuse Direct"),
            d(PassId::DiffuseIndirect, "Diffuse Indirect"),
            d(PassId::DiffuseColor, "Diffuse Color"),
            d(PassId::GlossyDirect, "Glossy Direct"),
            d(PassId::GlossyIndirect, "Glossy Indirect"),
            d(PassId::GlossyColor, "Glossy Color"),
            d(PassId::TransmissionDirect, "Transmission Direct"),
            d(PassId::TransmissionIndirect, "Transmission Indirect"),
            d(PassId::TransmissionColor, "Transmission Color"),
            d(PassId::VolumeDirect, "Volume Direct"),
            d(PassId::VolumeIndirect, "Volume Indirect"),
            d(PassId::ShadowCatcher, "Shadow Catcher"),
        ],
    },
    PassGroup {
        category: PassCategory::Cryptomatte,
        passes: &[
            d(PassId::CryptoObject, "Crypto Object"),
            d(PassId::CryptoMaterial, "Crypto Material"),
            d(PassId::CryptoAsset, "Crypto Asset"),
            d(PassId::CryptoDepth, "Levels (Depth)"),
            d(PassId::CryptoAccurate, "Accurate"),
        ],
    },
];

static EEVEE_PASS_GROUPS: [PassGroup; 4] = [
    PassGroup {
        category: PassCategory::Main,
        passes: &[d(PassId::Combined, "Combined")],
    },
    PassGroup {
        category: PassCategory::Data,
        passes: &[
            d(PassId::Z, "Z"),
            d(PassId::Mist, "Mist"),
            d(PassId::Normal, "Normal"),
            d(PassId::Position, "Position"),
            d(PassId::Vector, "Vector"),
        ],
    },
    PassGroup {
        category: PassCategory::Light,
        passes: &[
            d(PassId::DiffuseDirect, "Diffuse Light"),
            d(PassId::DiffuseColor, "Diffuse Color"),
            d(PassId::GlossyDirect, "Specular Light"),
            d(PassId::GlossyColor, "Specular Color"),
            d(PassId::Emission, "Emission"),
            d(PassId::Environment, "Environment"),
            d(PassId::Shadow, "Shadow"),
            d(PassId::AmbientOcclusion, "Ambient Occlusion"),
            d(PassId::Transparent, "Transparent"),
        ],
    },
    PassGroup {
        category: PassCategory::Cryptomatte,
        passes: &[
            d(PassId::CryptoObject, "Crypto Object"),
            d(PassId::CryptoMaterial, "Crypto Material"),
            d(PassId::CryptoAsset, "Crypto Asset"),
            d(PassId::CryptoDepth, "Levels (Depth)"),
            d(PassId::CryptoAccurate, "Accurate"),
        ],
    },
];

/// Pass groups for a known engine.
pub fn pass_groups(engine: EngineKind) -> &'static [PassGroup] {
    match engine {
        EngineKind::Cycles => &CYCLES_PASS_GROUPS,
        EngineKind::Eevee => &EEVEE_PASS_GROUPS,
    }
}

/// Pass groups for a host engine identifier.
///
/// Unknown engines (Workbench, third-party) yield an empty list.
pub fn pass_groups_for_engine(engine_id: &str) -> &'static [PassGroup] {
    match EngineKind::from_engine_id(engine_id) {
        Some(engine) => pass_groups(engine),
        None => &[],
    }
}

/// Whether `engine` defines the pass setting `pass`.
///
/// This is the single capability check consulted before any view-layer pass access.
pub fn engine_supports(engine: EngineKind, pass: PassId) -> bool {
    pass_groups(engine)
        .iter()
        .any(|g| g.passes.iter().any(|p| p.id == pass))
}

/// Descriptor of `pass` as shown for `engine`.
pub fn descriptor(engine: EngineKind, pass: PassId) -> Option<&'static PassDescriptor> {
    pass_groups(engine)
        .iter()
        .flat_map(|g| g.passes.iter())
        .find(|p| p.id == pass)
}

/// UI labels of the node-operation options, in panel order.
pub static NODE_OPERATION_LABELS: [(&str, &str); 22] = [
    ("fixed_for_y_up", "Make Y Up"),
    ("combine_cycles", "Combine Diff/Glossy/Trans"),
    ("combine_eevee", "Combine Light/Color"),
    ("denoise", "Enable Per Pass Denoising"),
    ("denoise_image", "Image Pass"),
    ("denoise_diffuse", "Diffuse Pass"),
    ("denoise_glossy", "Glossy Pass"),
    ("denoise_transmission", "Transmission Pass"),
    ("denoise_alpha", "Alpha Pass"),
    ("denoise_volume_direct", "Volume Direct"),
    ("denoise_volume_indirect", "Volume Indirect"),
    ("denoise_shadow_catcher", "Shadow Catcher"),
    ("denoise_emission", "Emission"),
    ("denoise_environment", "Environment"),
    ("denoise_shadow", "Shadow"),
    ("denoise_ambient_occlusion", "Ambient Occlusion"),
    ("denoise_light_groups", "Light Groups"),
    ("save_noisy_in_file", "Embed Noisy Passes"),
    ("save_noisy_separately", "Save Noisy Passes Separately"),
    ("backup_passes", "Backup Original Passes"),
    ("color_depth_override", "Color Depth"),
    ("file_output_basepath", "File Output Path"),
];

#[cfg(test)]
#[path = "../../tests/unit/passes/registry.rs"]
mod tests;
