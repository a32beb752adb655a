use crate::{
    foundation::core::{EngineKind, HostGeneration},
    passes::registry::PassId,
};

/// Cryptomatte matte families.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CryptoKind {
    /// Per-object IDs.
    Object,
    /// Per-material IDs.
    Material,
    /// Per-asset IDs.
    Asset,
}

/// Highest number of cryptomatte sockets per kind (16 levels, two per socket).
pub const MAX_CRYPTO_SOCKETS: u8 = 8;

/// Logical render-layer output socket.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[allow(missing_docs)]
pub enum Socket {
    Image,
    Alpha,
    NoisyImage,
    NoisyShadowCatcher,
    Depth,
    Mist,
    Normal,
    Position,
    Uv,
    Vector,
    ObjectIndex,
    MaterialIndex,
    DenoisingNormal,
    DenoisingAlbedo,
    DenoisingDepth,
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
    /// Cryptomatte socket `index` (`00`, `01`, ...).
    Crypto(CryptoKind, u8),
}

/// Socket names per host generation: `(legacy, current)`.
fn names(socket: Socket) -> (&'static str, &'static str) {
    match socket {
        Socket::Image => ("Image", "Image"),
        Socket::Alpha => ("Alpha", "Alpha"),
        Socket::NoisyImage => ("Noisy Image", "Noisy Image"),
        Socket::NoisyShadowCatcher => ("Noisy Shadow Catcher", "Noisy Shadow Catcher"),
        Socket::Depth => ("Depth", "Depth"),
        Socket::Mist => ("Mist", "Mist"),
        Socket::Normal => ("Normal", "Normal"),
        Socket::Position => ("Position", "Position"),
        Socket::Uv => ("UV", "UV"),
        Socket::Vector => ("Vector", "Vector"),
        Socket::ObjectIndex => ("IndexOB", "Object Index"),
        Socket::MaterialIndex => ("IndexMA", "Material Index"),
        Socket::DenoisingNormal => ("Denoising Normal", "Denoising Normal"),
        Socket::DenoisingAlbedo => ("Denoising Albedo", "Denoising Albedo"),
        Socket::DenoisingDepth => ("Denoising Depth", "Denoising Depth"),
        Socket::Shadow => ("Shadow", "Shadow"),
        Socket::AmbientOcclusion => ("AO", "Ambient Occlusion"),
        Socket::Emission => ("Emit", "Emission"),
        Socket::Environment => ("Env", "Environment"),
        Socket::DiffuseDirect => ("DiffDir", "Diffuse Direct"),
        Socket::DiffuseIndirect => ("DiffInd", "Diffuse Indirect"),
        Socket::DiffuseColor => ("DiffCol", "Diffuse Color"),
        Socket::GlossyDirect => ("GlossDir", "Glossy Direct"),
        Socket::GlossyIndirect => ("GlossInd", "Glossy Indirect"),
        Socket::GlossyColor => ("GlossCol", "Glossy Color"),
        Socket::TransmissionDirect => ("TransDir", "Transmission Direct"),
        Socket::TransmissionIndirect => ("TransInd", "Transmission Indirect"),
        Socket::TransmissionColor => ("TransCol", "Transmission Color"),
        Socket::VolumeDirect => ("VolumeDir", "Volume Direct"),
        Socket::VolumeIndirect => ("VolumeInd", "Volume Indirect"),
        Socket::ShadowCatcher => ("Shadow Catcher", "Shadow Catcher"),
        Socket::Transparent => ("Transp", "Transparent"),
        Socket::Crypto(kind, index) => {
            let name = crypto_name(kind, index);
            (name, name)
        }
    }
}

static CRYPTO_OBJECT: [&str; MAX_CRYPTO_SOCKETS as usize] = [
    "CryptoObject00",
    "CryptoObject01",
    "CryptoObject02",
    "CryptoObject03",
    "CryptoObject04",
    "CryptoObject05",
    "CryptoObject06",
    "CryptoObject07",
];

static CRYPTO_MATERIAL: [&str; MAX_CRYPTO_SOCKETS as usize] = [
    "CryptoMaterial00",
    "CryptoMaterial01",
    "CryptoMaterial02",
    "CryptoMaterial03",
    "CryptoMaterial04",
    "CryptoMaterial05",
    "CryptoMaterial06",
    "CryptoMaterial07",
];

static CRYPTO_ASSET: [&str; MAX_CRYPTO_SOCKETS as usize] = [
    "CryptoAsset00",
    "CryptoAsset01",
    "CryptoAsset02",
    "CryptoAsset03",
    "CryptoAsset04",
    "CryptoAsset05",
    "CryptoAsset06",
    "CryptoAsset07",
];

fn crypto_name(kind: CryptoKind, index: u8) -> &'static str {
    let table = match kind {
        CryptoKind::Object => &CRYPTO_OBJECT,
        CryptoKind::Material => &CRYPTO_MATERIAL,
        CryptoKind::Asset => &CRYPTO_ASSET,
    };
    table[usize::from(index.min(MAX_CRYPTO_SOCKETS - 1))]
}

/// Whether `engine` can ever expose `socket`.
pub fn engine_exposes(engine: EngineKind, socket: Socket) -> bool {
    match engine {
        EngineKind::Cycles => !matches!(socket, Socket::Transparent),
        EngineKind::Eevee => !matches!(
            socket,
            Socket::NoisyImage
                | Socket::NoisyShadowCatcher
                | Socket::Uv
                | Socket::ObjectIndex
                | Socket::MaterialIndex
                | Socket::DenoisingNormal
                | Socket::DenoisingAlbedo
                | Socket::DenoisingDepth
                | Socket::DiffuseIndirect
                | Socket::GlossyIndirect
                | Socket::TransmissionDirect
                | Socket::TransmissionIndirect
                | Socket::TransmissionColor
                | Socket::VolumeDirect
                | Socket::VolumeIndirect
                | Socket::ShadowCatcher
        ),
    }
}

/// Resolve the host socket name of a logical output.
///
/// Returns `None` when the engine never produces that output.
pub fn resolve_socket_name(
    socket: Socket,
    engine: EngineKind,
    generation: HostGeneration,
) -> Option<&'static str> {
    if !engine_exposes(engine, socket) {
        return None;
    }
    let (legacy, current) = names(socket);
    Some(match generation {
        HostGeneration::Legacy => legacy,
        HostGeneration::Current => current,
    })
}

/// Number of cryptomatte sockets exposed for a given levels setting.
pub fn crypto_socket_count(depth: i64) -> u8 {
    let depth = depth.clamp(0, i64::from(MAX_CRYPTO_SOCKETS) * 2);
    // Each socket carries two levels.
    u8::try_from((depth + 1) / 2).unwrap_or(MAX_CRYPTO_SOCKETS)
}

/// Output sockets an enabled pass setting contributes, before cryptomatte expansion.
///
/// Cryptomatte kinds return their first socket only; settings without sockets (levels,
/// accuracy) return nothing.
pub fn pass_sockets(pass: PassId) -> &'static [Socket] {
    match pass {
        PassId::Combined => &[Socket::Image, Socket::Alpha],
        PassId::Z => &[Socket::Depth],
        PassId::Mist => &[Socket::Mist],
        PassId::Normal => &[Socket::Normal],
        PassId::Position => &[Socket::Position],
        PassId::Uv => &[Socket::Uv],
        PassId::Vector => &[Socket::Vector],
        PassId::ObjectIndex => &[Socket::ObjectIndex],
        PassId::MaterialIndex => &[Socket::MaterialIndex],
        PassId::DenoisingData => &[
            Socket::DenoisingNormal,
            Socket::DenoisingAlbedo,
            Socket::DenoisingDepth,
        ],
        PassId::Shadow => &[Socket::Shadow],
        PassId::AmbientOcclusion => &[Socket::AmbientOcclusion],
        PassId::Emission => &[Socket::Emission],
        PassId::Environment => &[Socket::Environment],
        PassId::DiffuseDirect => &[Socket::DiffuseDirect],
        PassId::DiffuseIndirect => &[Socket::DiffuseIndirect],
        PassId::DiffuseColor => &[Socket::DiffuseColor],
        PassId::GlossyDirect => &[Socket::GlossyDirect],
        PassId::GlossyIndirect => &[Socket::GlossyIndirect],
        PassId::GlossyColor => &[Socket::GlossyColor],
        PassId::TransmissionDirect => &[Socket::TransmissionDirect],
        PassId::TransmissionIndirect => &[Socket::TransmissionIndirect],
        PassId::TransmissionColor => &[Socket::TransmissionColor],
        PassId::VolumeDirect => &[Socket::VolumeDirect],
        PassId::VolumeIndirect => &[Socket::VolumeIndirect],
        PassId::ShadowCatcher => &[Socket::ShadowCatcher],
        PassId::Transparent => &[Socket::Transparent],
        PassId::CryptoObject => &[Socket::Crypto(CryptoKind::Object, 0)],
        PassId::CryptoMaterial => &[Socket::Crypto(CryptoKind::Material, 0)],
        PassId::CryptoAsset => &[Socket::Crypto(CryptoKind::Asset, 0)],
        PassId::CryptoDepth | PassId::CryptoAccurate => &[],
    }
}

/// Sockets routed to the data sink, in slot order.
pub fn data_sockets(crypto_count: u8) -> Vec<Socket> {
    let mut out = vec![
        Socket::Depth,
        Socket::Mist,
        Socket::Position,
        Socket::Normal,
        Socket::Uv,
        Socket::Vector,
        Socket::ObjectIndex,
        Socket::MaterialIndex,
    ];
    for kind in [CryptoKind::Object, CryptoKind::Material, CryptoKind::Asset] {
        out.extend((0..crypto_count).map(|i| Socket::Crypto(kind, i)));
    }
    out.extend([
        Socket::DenoisingNormal,
        Socket::DenoisingAlbedo,
        Socket::DenoisingDepth,
    ]);
    out
}

/// Sockets that only the backup sink may receive.
pub const BACKUP_ONLY: [Socket; 2] = [Socket::NoisyImage, Socket::NoisyShadowCatcher];

/// Name of the output socket for a light group.
pub fn light_group_socket_name(group: &str) -> String {
    format!("Combined_{group}")
}

/// Generation-dependent input names on compositor nodes the builder creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeSocketNames {
    /// Alpha-over input receiving the running image.
    pub alpha_over_background: &'static str,
    /// Alpha-over input receiving the layer composited on top.
    pub alpha_over_foreground: &'static str,
    /// Host API used to provision file-output slots.
    pub file_output_slot_api: &'static str,
}

static LEGACY_NODE_SOCKETS: NodeSocketNames = NodeSocketNames {
    alpha_over_background: "Image",
    alpha_over_foreground: "Image_001",
    file_output_slot_api: "layer_slots",
};

static CURRENT_NODE_SOCKETS: NodeSocketNames = NodeSocketNames {
    alpha_over_background: "Background",
    alpha_over_foreground: "Foreground",
    file_output_slot_api: "file_output_items",
};

/// Node socket names for a host generation.
pub fn node_socket_names(generation: HostGeneration) -> &'static NodeSocketNames {
    match generation {
        HostGeneration::Legacy => &LEGACY_NODE_SOCKETS,
        HostGeneration::Current => &CURRENT_NODE_SOCKETS,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/passes/sockets.rs"]
mod tests;
