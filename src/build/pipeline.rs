//! Declarative rule tables driving the per-layer build.

use crate::{
    config::settings::DenoiseOptions,
    foundation::core::EngineKind,
    passes::{registry::PassId, sockets::Socket},
};

/// Auxiliary inputs of a denoise node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DenoiseAux {
    pub(crate) normal: Socket,
    pub(crate) albedo: Socket,
}

/// Auxiliaries for raw passes: the render's denoising data.
pub(crate) const DENOISING_DATA_AUX: DenoiseAux = DenoiseAux {
    normal: Socket::DenoisingNormal,
    albedo: Socket::DenoisingAlbedo,
};

/// Auxiliaries for the beauty image.
pub(crate) const IMAGE_AUX: DenoiseAux = DenoiseAux {
    normal: Socket::Normal,
    albedo: Socket::DiffuseColor,
};

/// A light-transport family built from direct, indirect and color components.
#[derive(Debug)]
pub(crate) struct LightFamily {
    /// Color sink slot of the combined value.
    pub(crate) slot: &'static str,
    pub(crate) direct: Socket,
    /// Stand-in for `direct` under Eevee.
    pub(crate) eevee_direct: Socket,
    pub(crate) indirect: Socket,
    pub(crate) color: Socket,
    /// Pass settings the family needs.
    pub(crate) passes: &'static [PassId],
    pub(crate) denoise: fn(&DenoiseOptions) -> bool,
}

impl LightFamily {
    pub(crate) fn direct_for(&self, engine: EngineKind) -> Socket {
        match engine {
            EngineKind::Cycles => self.direct,
            EngineKind::Eevee => self.eevee_direct,
        }
    }

    /// Auxiliaries when denoising the combined value.
    pub(crate) fn combined_aux(&self) -> DenoiseAux {
        DenoiseAux {
            normal: Socket::Normal,
            albedo: self.color,
        }
    }
}

pub(crate) static LIGHT_FAMILIES: [LightFamily; 3] = [
    LightFamily {
        slot: "Diffuse",
        direct: Socket::DiffuseDirect,
        eevee_direct: Socket::DiffuseDirect,
        indirect: Socket::DiffuseIndirect,
        color: Socket::DiffuseColor,
        passes: &[PassId::DiffuseDirect, PassId::DiffuseIndirect, PassId::DiffuseColor],
        denoise: |d| d.diffuse,
    },
    LightFamily {
        slot: "Glossy",
        direct: Socket::GlossyDirect,
        eevee_direct: Socket::GlossyDirect,
        indirect: Socket::GlossyIndirect,
        color: Socket::GlossyColor,
        passes: &[PassId::GlossyDirect, PassId::GlossyIndirect, PassId::GlossyColor],
        denoise: |d| d.glossy,
    },
    LightFamily {
        slot: "Transmission",
        direct: Socket::TransmissionDirect,
        eevee_direct: Socket::Transparent,
        indirect: Socket::TransmissionIndirect,
        color: Socket::TransmissionColor,
        passes: &[
            PassId::TransmissionDirect,
            PassId::TransmissionIndirect,
            PassId::TransmissionColor,
            PassId::Transparent,
        ],
        denoise: |d| d.transmission,
    },
];

/// A raw pass denoised with the render's denoising data.
#[derive(Debug)]
pub(crate) struct PassDenoise {
    pub(crate) socket: Socket,
    pub(crate) pass: PassId,
    /// Extra pass settings beyond `pass` and denoising data.
    pub(crate) extra: &'static [PassId],
    pub(crate) enabled: fn(&DenoiseOptions) -> bool,
}

pub(crate) static PASS_DENOISE_RULES: [PassDenoise; 7] = [
    PassDenoise {
        socket: Socket::VolumeDirect,
        pass: PassId::VolumeDirect,
        extra: &[],
        enabled: |d| d.volume_direct,
    },
    PassDenoise {
        socket: Socket::VolumeIndirect,
        pass: PassId::VolumeIndirect,
        extra: &[],
        enabled: |d| d.volume_indirect,
    },
    PassDenoise {
        socket: Socket::ShadowCatcher,
        pass: PassId::ShadowCatcher,
        extra: &[PassId::Normal],
        enabled: |d| d.shadow_catcher,
    },
    PassDenoise {
        socket: Socket::Emission,
        pass: PassId::Emission,
        extra: &[],
        enabled: |d| d.emission,
    },
    PassDenoise {
        socket: Socket::Environment,
        pass: PassId::Environment,
        extra: &[],
        enabled: |d| d.environment,
    },
    PassDenoise {
        socket: Socket::Shadow,
        pass: PassId::Shadow,
        extra: &[],
        enabled: |d| d.shadow,
    },
    PassDenoise {
        socket: Socket::AmbientOcclusion,
        pass: PassId::AmbientOcclusion,
        extra: &[],
        enabled: |d| d.ambient_occlusion,
    },
];

/// Y-up correction targets: `(socket, uses the vector group, node label)`.
pub(crate) static Y_UP_TARGETS: [(Socket, bool, &str); 3] = [
    (Socket::Position, false, "Y-Up Position"),
    (Socket::Normal, false, "Y-Up Normal"),
    (Socket::Vector, true, "Y-Up Vector"),
];
