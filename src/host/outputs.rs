use crate::{
    foundation::core::{EngineKind, HostGeneration},
    graph::node::OutputSocket,
    passes::{
        registry::{PassId, engine_supports},
        sockets::{Socket, crypto_socket_count, light_group_socket_name, pass_sockets, resolve_socket_name},
    },
    scene::{model::RenderSettings, view_layer::ViewLayer},
};

/// Reports the output sockets a render-layer source exposes for a view layer.
///
/// The builder queries this after enabling the passes its options require, so implementations
/// must reflect the layer's current pass settings.
pub trait RenderLayerOutputs {
    /// Output sockets in host order.
    fn outputs(&self, render: &RenderSettings, layer: &ViewLayer) -> Vec<OutputSocket>;
}

/// Socket model of the Cycles and Eevee render-layer nodes.
///
/// Unknown engines expose only `Image` and `Alpha`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostRenderLayerOutputs;

impl HostRenderLayerOutputs {
    fn push(out: &mut Vec<OutputSocket>, socket: Socket, engine: EngineKind, generation: HostGeneration) {
        if let Some(name) = resolve_socket_name(socket, engine, generation) {
            out.push(OutputSocket::available(name));
        }
    }
}

impl RenderLayerOutputs for HostRenderLayerOutputs {
    fn outputs(&self, render: &RenderSettings, layer: &ViewLayer) -> Vec<OutputSocket> {
        let Some(engine) = render.engine_kind() else {
            return vec![OutputSocket::available("Image"), OutputSocket::available("Alpha")];
        };
        let generation = render.generation();
        let render_denoiser = engine == EngineKind::Cycles && render.use_denoising;
        let crypto_count = crypto_socket_count(layer.value(PassId::CryptoDepth).as_int());

        let mut out = Vec::new();
        Self::push(&mut out, Socket::Image, engine, generation);
        Self::push(&mut out, Socket::Alpha, engine, generation);
        if render_denoiser {
            Self::push(&mut out, Socket::NoisyImage, engine, generation);
        }

        for pass in PassId::ALL {
            if pass == PassId::Combined || !engine_supports(engine, pass) || !layer.is_enabled(pass) {
                continue;
            }
            for &socket in pass_sockets(pass) {
                match socket {
                    Socket::Crypto(kind, _) => {
                        for i in 0..crypto_count {
                            Self::push(&mut out, Socket::Crypto(kind, i), engine, generation);
                        }
                    }
                    _ => Self::push(&mut out, socket, engine, generation),
                }
            }
            if pass == PassId::ShadowCatcher && render_denoiser {
                Self::push(&mut out, Socket::NoisyShadowCatcher, engine, generation);
            }
        }

        if engine == EngineKind::Cycles {
            out.extend(
                layer
                    .light_groups
                    .iter()
                    .map(|g| OutputSocket::available(light_group_socket_name(g))),
            );
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/outputs.rs"]
mod tests;
