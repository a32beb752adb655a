use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    build::{
        paths::LayerOutputPaths,
        pipeline::{
            DENOISING_DATA_AUX, DenoiseAux, IMAGE_AUX, LIGHT_FAMILIES, LightFamily,
            PASS_DENOISE_RULES, Y_UP_TARGETS,
        },
        prepass::enable_required_passes,
        report::{BuildReport, BuildStep, BuildWarning},
    },
    config::{
        compression::SinkRole,
        settings::{ColorDepth, RenderConfiguration},
    },
    foundation::core::{EngineKind, HostGeneration, NodeId, Point, Vec2},
    foundation::error::{RenderManagerError, RenderManagerResult},
    graph::{
        node::{FileFormat, FileOutputNode, ImageFormat, NodeGroupKind, NodeKind, OutputSocket},
        tree::NodeTree,
    },
    host::outputs::RenderLayerOutputs,
    passes::sockets::{
        BACKUP_ONLY, MAX_CRYPTO_SOCKETS, Socket, data_sockets, light_group_socket_name,
        node_socket_names, resolve_socket_name,
    },
    scene::{
        model::{Document, RenderSettings, Scene},
        view_layer::ViewLayer,
    },
};

const COLUMN: f64 = 300.0;
const ROW: f64 = -600.0;

/// Rebuild the compositor tree of `scene` from its view layers and render manager options.
///
/// The tree is cleared and regenerated from scratch. Every render-enabled layer gets a source,
/// a color sink and a data sink, plus noisy/backup sinks when configured; layer images are folded
/// through alpha-over nodes into the composite. Steps that need sockets the host does not expose
/// are skipped and reported in the returned [`BuildReport`].
///
/// Fails with [`RenderManagerError::DocumentNotPersisted`] when the document has never been
/// saved; the document is left untouched in that case.
#[tracing::instrument(skip(doc, outputs))]
pub fn build_node_graph(
    doc: &mut Document,
    scene: &str,
    outputs: &dyn RenderLayerOutputs,
) -> RenderManagerResult<BuildReport> {
    if !doc.is_saved() {
        return Err(RenderManagerError::not_persisted(
            "save the document before creating render nodes",
        ));
    }
    let base = output_base(doc, scene)?;
    doc.ensure_node_groups();

    let scene = doc.scene_mut(scene)?;
    scene.use_nodes = true;
    let generation = scene.render.generation();
    let mut tree = scene
        .node_tree
        .take()
        .unwrap_or_else(|| NodeTree::new(generation));
    tree.generation = generation;
    tree.clear();

    let mut report = BuildReport::default();
    let built = build_scene(scene, &mut tree, &base, outputs, &mut report);
    report.node_count = tree.nodes().len();
    report.link_count = tree.links().len();
    scene.node_tree = Some(tree);
    built?;

    tracing::debug!(
        layers = report.layers.len(),
        nodes = report.node_count,
        links = report.link_count,
        "built compositor tree"
    );
    Ok(report)
}

fn build_scene(
    scene: &mut Scene,
    tree: &mut NodeTree,
    base: &Path,
    outputs: &dyn RenderLayerOutputs,
    report: &mut BuildReport,
) -> RenderManagerResult<()> {
    let engine = scene.render.engine_kind();
    if engine.is_none() {
        report.warn(BuildWarning::UnsupportedEngine {
            engine: scene.render.engine.clone(),
        });
    }
    let cfg = scene.render_manager.clone();
    let composite = tree.add_node(NodeKind::Composite, "Composite", Point::new(7.0 * COLUMN, 0.0));

    let mut running: Option<NodeId> = None;
    for row in 0..scene.view_layers.len() {
        if !scene.view_layers[row].use_for_render {
            continue;
        }
        if let Some(engine) = engine {
            enable_required_passes(&mut scene.view_layers[row], &cfg, engine);
        }
        let layer = &scene.view_layers[row];
        let origin = Point::new(0.0, row as f64 * ROW);
        let source = LayerBuild::new(
            tree,
            report,
            &cfg,
            &scene.render,
            engine,
            &scene.name,
            layer,
            origin,
        )
        .run(outputs.outputs(&scene.render, layer), base)?;

        running = fold_layer(tree, report, running, source, layer, origin)?;
        report.layers.push(layer.name.clone());
    }

    if let Some(last) = running {
        tree.link(last, "Image", composite, "Image")?;
    }
    Ok(())
}

/// Composite `source` over the running image; the first layer starts the fold.
fn fold_layer(
    tree: &mut NodeTree,
    report: &mut BuildReport,
    running: Option<NodeId>,
    source: NodeId,
    layer: &ViewLayer,
    origin: Point,
) -> RenderManagerResult<Option<NodeId>> {
    if tree.node(source)?.available_output("Image").is_none() {
        report.warn(BuildWarning::MissingSocket {
            layer: layer.name.clone(),
            step: BuildStep::Composite,
            target: "Alpha Over".to_string(),
            socket: "Image".to_string(),
        });
        return Ok(running);
    }
    let Some(prev) = running else {
        return Ok(Some(source));
    };
    let names = node_socket_names(tree.generation);
    let alpha = tree.add_node(
        NodeKind::AlphaOver,
        format!("{} Alpha Over", layer.clean_name()),
        origin + Vec2::new(6.0 * COLUMN, 0.0),
    );
    tree.link(prev, "Image", alpha, names.alpha_over_background)?;
    tree.link(source, "Image", alpha, names.alpha_over_foreground)?;
    Ok(Some(alpha))
}

/// An output socket of a node in the tree being built.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Endpoint {
    node: NodeId,
    socket: String,
}

impl Endpoint {
    fn new(node: NodeId, socket: impl Into<String>) -> Self {
        Self {
            node,
            socket: socket.into(),
        }
    }
}

struct Sinks {
    color: NodeId,
    data: NodeId,
    noisy: Option<NodeId>,
    backup: Option<NodeId>,
}

/// Per-layer build state.
struct LayerBuild<'a> {
    tree: &'a mut NodeTree,
    report: &'a mut BuildReport,
    cfg: &'a RenderConfiguration,
    render: &'a RenderSettings,
    engine: Option<EngineKind>,
    generation: HostGeneration,
    scene: &'a str,
    layer: &'a ViewLayer,
    origin: Point,
    source: NodeId,
    /// Source sockets routed by a specific rule; the sweep leaves them alone.
    consumed: HashSet<String>,
    /// Color sink slots that received a link.
    used: HashSet<String>,
    /// Y-up replacements keyed by source socket name.
    corrected: Vec<(String, NodeId)>,
    /// Pre-denoise values and their retention names.
    noisy_values: Vec<(Endpoint, String)>,
}

impl<'a> LayerBuild<'a> {
    #[allow(clippy::too_many_arguments)]
    fn new(
        tree: &'a mut NodeTree,
        report: &'a mut BuildReport,
        cfg: &'a RenderConfiguration,
        render: &'a RenderSettings,
        engine: Option<EngineKind>,
        scene: &'a str,
        layer: &'a ViewLayer,
        origin: Point,
    ) -> Self {
        Self {
            generation: tree.generation,
            tree,
            report,
            cfg,
            render,
            engine,
            scene,
            layer,
            origin,
            source: NodeId(0),
            consumed: HashSet::new(),
            used: HashSet::new(),
            corrected: Vec::new(),
            noisy_values: Vec::new(),
        }
    }

    fn at(&self, column: f64, dy: f64) -> Point {
        self.origin + Vec2::new(column * COLUMN, dy)
    }

    /// Build every node of the layer and return its source node.
    fn run(
        mut self,
        sockets: Vec<OutputSocket>,
        base: &Path,
    ) -> RenderManagerResult<NodeId> {
        self.source = self.tree.add_node(
            NodeKind::RenderLayers {
                scene: self.scene.to_string(),
                layer: self.layer.name.clone(),
            },
            self.layer.name.clone(),
            self.origin,
        );
        self.tree.set_outputs(self.source, sockets)?;

        let sinks = self.add_sinks(base);
        if let Some(backup) = sinks.backup {
            self.route_backup(backup)?;
        }
        if self.cfg.fixed_for_y_up {
            self.add_y_up();
        }
        self.route_image(sinks.color)?;
        for family in &LIGHT_FAMILIES {
            self.route_family(family, sinks.color)?;
        }
        self.denoise_raw_passes(sinks.color)?;
        self.retain_noisy(sinks.color, sinks.noisy)?;
        self.route_data(sinks.data)?;
        self.sweep(sinks.color)?;
        self.prune(sinks.color)?;
        Ok(self.source)
    }

    fn add_sinks(&mut self, base: &Path) -> Sinks {
        let clean = self.layer.clean_name();
        let paths = LayerOutputPaths::new(base, clean);
        if let Err(e) = paths.create_dir() {
            self.report.warn(BuildWarning::OutputDirectory {
                path: paths.dir.clone(),
                message: e.to_string(),
            });
        }
        let color_depth = self.cfg.color_depth_override.resolve(self.render.color_depth);

        let color = self.add_sink(SinkRole::Color, &paths.color, color_depth, 4.0);
        let data = self.add_sink(SinkRole::Data, &paths.data, ColorDepth::Full, 5.0);
        let noisy = self
            .cfg
            .writes_noisy_sink()
            .then(|| self.add_sink(SinkRole::Noisy, &paths.noisy, color_depth, 6.0));
        let backup = self
            .cfg
            .backup_passes
            .then(|| self.add_sink(SinkRole::Backup, &paths.backup, ColorDepth::Full, -1.0));
        Sinks {
            color,
            data,
            noisy,
            backup,
        }
    }

    fn add_sink(&mut self, role: SinkRole, path: &str, depth: ColorDepth, column: f64) -> NodeId {
        let codec = role.codec(self.cfg);
        let node = FileOutputNode {
            base_path: path.to_string(),
            format: ImageFormat {
                file_format: FileFormat::OpenExrMultilayer,
                exr_codec: codec,
                color_depth: depth,
                quality: if codec.is_lossy() {
                    self.cfg.compression_level
                } else {
                    0
                },
            },
            slot_api: node_socket_names(self.generation)
                .file_output_slot_api
                .to_string(),
        };
        let at = self.at(column, 0.0);
        self.tree.add_node(
            NodeKind::OutputFile(node),
            role.label(self.layer.clean_name()),
            at,
        )
    }

    fn name(&self, socket: Socket) -> Option<&'static str> {
        match self.engine {
            Some(engine) => resolve_socket_name(socket, engine, self.generation),
            None => matches!(socket, Socket::Image | Socket::Alpha)
                .then(|| resolve_socket_name(socket, EngineKind::Cycles, self.generation))
                .flatten(),
        }
    }

    /// Source output for `socket` if it exists and is available.
    fn available(&self, socket: Socket) -> Option<Endpoint> {
        let name = self.name(socket)?;
        self.available_named(name)
    }

    fn available_named(&self, name: &str) -> Option<Endpoint> {
        let node = self.tree.node(self.source).ok()?;
        node.available_output(name)
            .map(|o| Endpoint::new(self.source, o.name.clone()))
    }

    /// The Y-up corrected replacement of a source output, if any.
    fn preferred(&self, ep: Endpoint) -> Endpoint {
        self.corrected
            .iter()
            .find(|(socket, _)| ep.node == self.source && *socket == ep.socket)
            .map_or(ep, |(_, node)| Endpoint::new(*node, "Vector"))
    }

    fn link(&mut self, from: &Endpoint, to: NodeId, input: &str) -> RenderManagerResult<()> {
        self.tree.link(from.node, &from.socket, to, input)
    }

    fn to_slot(&mut self, from: &Endpoint, sink: NodeId, slot: &str) -> RenderManagerResult<()> {
        self.tree.ensure_slot(sink, slot)?;
        self.link(from, sink, slot)
    }

    fn to_color(&mut self, from: &Endpoint, color: NodeId, slot: &str) -> RenderManagerResult<()> {
        self.to_slot(from, color, slot)?;
        self.used.insert(slot.to_string());
        Ok(())
    }

    fn missing(&mut self, step: BuildStep, target: &str, socket: &str) {
        self.report.warn(BuildWarning::MissingSocket {
            layer: self.layer.name.clone(),
            step,
            target: target.to_string(),
            socket: socket.to_string(),
        });
    }

    /// Denoise `value` into `slot` of the color sink.
    ///
    /// Returns `false` without touching the tree when an auxiliary is missing.
    fn denoise(
        &mut self,
        color: NodeId,
        value: &Endpoint,
        aux: DenoiseAux,
        slot: &str,
        noisy_name: &str,
    ) -> RenderManagerResult<bool> {
        let normal = self.available(aux.normal).map(|ep| self.preferred(ep));
        let albedo = self.available(aux.albedo);
        let (normal, albedo) = match (normal, albedo) {
            (Some(n), Some(a)) => (n, a),
            (n, _) => {
                let socket = if n.is_none() { aux.normal } else { aux.albedo };
                let name = self.name(socket).unwrap_or("<unsupported>");
                self.missing(BuildStep::Denoise, slot, name);
                return Ok(false);
            }
        };

        let dy = -40.0 * (self.used.len() as f64 + 1.0);
        let at = self.at(2.0, dy);
        let node = self.tree.add_node(NodeKind::Denoise, format!("Denoise {slot}"), at);
        self.tree.node_mut(node)?.hide = true;
        self.link(value, node, "Image")?;
        self.link(&normal, node, "Normal")?;
        self.link(&albedo, node, "Albedo")?;
        self.to_color(&Endpoint::new(node, "Image"), color, slot)?;
        self.noisy_values.push((value.clone(), noisy_name.to_string()));
        Ok(true)
    }

    /// Copy every available source output, unmodified, to the backup sink.
    fn route_backup(&mut self, backup: NodeId) -> RenderManagerResult<()> {
        let names: Vec<String> = self
            .tree
            .node(self.source)?
            .outputs
            .iter()
            .filter(|o| o.available)
            .map(|o| o.name.clone())
            .collect();
        for name in names {
            self.to_slot(&Endpoint::new(self.source, name.clone()), backup, &name)?;
        }
        Ok(())
    }

    fn add_y_up(&mut self) {
        for (row, (socket, vector, label)) in Y_UP_TARGETS.iter().enumerate() {
            let Some(ep) = self.available(*socket) else {
                continue;
            };
            let group = if *vector {
                NodeGroupKind::Vector
            } else {
                NodeGroupKind::YUp
            };
            let at = self.at(1.0, 40.0 - 30.0 * row as f64);
            let node = self.tree.add_node(NodeKind::Group(group), *label, at);
            if let Ok(n) = self.tree.node_mut(node) {
                n.hide = true;
            }
            if self.link(&ep, node, "Vector").is_ok() {
                self.corrected.push((ep.socket, node));
            }
        }
    }

    fn route_image(&mut self, color: NodeId) -> RenderManagerResult<()> {
        let image_slot = if self.cfg.fixed_for_y_up {
            "rgba"
        } else {
            "Image"
        };
        // Image and alpha lead the slot list.
        self.tree.ensure_slot(color, image_slot)?;
        self.tree.ensure_slot(color, "Alpha")?;

        let denoise = &self.cfg.denoise;
        let denoise_image = denoise.active(denoise.image);
        let denoise_alpha = denoise.active(denoise.alpha);

        if let Some(image) = self.available(Socket::Image) {
            self.consumed.insert(image.socket.clone());
            match (denoise_image, self.available(Socket::NoisyImage)) {
                (true, Some(noisy)) => {
                    self.to_color(&image, color, image_slot)?;
                    let slot = format!("{image_slot} (Compositor Denoised)");
                    self.denoise(color, &noisy, IMAGE_AUX, &slot, "Image")?;
                }
                (true, None) => {
                    if !self.denoise(color, &image, IMAGE_AUX, image_slot, image_slot)? {
                        self.to_color(&image, color, image_slot)?;
                    }
                }
                (false, _) => self.to_color(&image, color, image_slot)?,
            }
        }

        if let Some(alpha) = self.available(Socket::Alpha) {
            self.consumed.insert(alpha.socket.clone());
            let denoised =
                denoise_alpha && self.denoise(color, &alpha, DENOISING_DATA_AUX, "Alpha", "Alpha")?;
            if !denoised {
                self.to_color(&alpha, color, "Alpha")?;
            }
        }
        Ok(())
    }

    fn route_family(&mut self, family: &LightFamily, color: NodeId) -> RenderManagerResult<()> {
        let denoise = self.cfg.denoise.active((family.denoise)(&self.cfg.denoise));
        let engine = self.engine;
        match engine {
            Some(engine) if self.cfg.combine_for(engine) => {
                self.combine_family(family, engine, color, denoise)
            }
            Some(engine) if denoise => {
                let components = [family.direct_for(engine), family.indirect, family.color];
                for socket in components {
                    let Some(value) = self.available(socket) else {
                        continue;
                    };
                    let slot = value.socket.clone();
                    if self.denoise(color, &value, DENOISING_DATA_AUX, &slot, &slot)? {
                        self.consumed.insert(slot);
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn combine_family(
        &mut self,
        family: &LightFamily,
        engine: EngineKind,
        color: NodeId,
        denoise: bool,
    ) -> RenderManagerResult<()> {
        // Provisioned up front; pruned when no component exists.
        self.tree.ensure_slot(color, family.slot)?;

        let direct_socket = family.direct_for(engine);
        let direct = self.available(direct_socket);
        let indirect = self.available(family.indirect);
        let color_pass = self.available(family.color);

        let (direct, color_pass) = match (direct, color_pass) {
            (Some(d), Some(c)) => (d, c),
            (None, None) => return Ok(()),
            (Some(present), None) => {
                return self.combine_fallback(family, color, present, family.color);
            }
            (None, Some(present)) => {
                return self.combine_fallback(family, color, present, direct_socket);
            }
        };

        let at = self.at(1.5, -120.0);
        let label = format!("Combine {}", family.slot);
        let value = match engine {
            EngineKind::Cycles => {
                let node = self.tree.add_node(
                    NodeKind::Group(NodeGroupKind::CombinePasses),
                    label,
                    at,
                );
                self.link(&direct, node, "Direct")?;
                if let Some(indirect) = &indirect {
                    self.link(indirect, node, "Indirect")?;
                }
                self.link(&color_pass, node, "Color")?;
                Endpoint::new(node, "Combined")
            }
            EngineKind::Eevee => {
                let node = self.tree.add_node(NodeKind::Multiply, label, at);
                self.link(&direct, node, "Light")?;
                self.link(&color_pass, node, "Color")?;
                Endpoint::new(node, "Image")
            }
        };
        self.tree.node_mut(value.node)?.hide = true;
        for ep in [Some(&direct), indirect.as_ref(), Some(&color_pass)].into_iter().flatten() {
            self.consumed.insert(ep.socket.clone());
        }

        let denoised = denoise
            && self.denoise(color, &value, family.combined_aux(), family.slot, family.slot)?;
        if !denoised {
            self.to_color(&value, color, family.slot)?;
        }
        Ok(())
    }

    /// Route the only available component of a family to its combined slot.
    fn combine_fallback(
        &mut self,
        family: &LightFamily,
        color: NodeId,
        present: Endpoint,
        missing: Socket,
    ) -> RenderManagerResult<()> {
        if let Some(name) = self.name(missing) {
            self.missing(BuildStep::Combine, family.slot, name);
        }
        self.consumed.insert(present.socket.clone());
        self.to_color(&present, color, family.slot)
    }

    fn denoise_raw_passes(&mut self, color: NodeId) -> RenderManagerResult<()> {
        if !self.cfg.denoise.enabled {
            return Ok(());
        }
        for rule in &PASS_DENOISE_RULES {
            if !(rule.enabled)(&self.cfg.denoise) {
                continue;
            }
            let Some(name) = self.name(rule.socket) else {
                continue;
            };
            match self.available_named(name) {
                Some(value) => {
                    if self.denoise(color, &value, DENOISING_DATA_AUX, name, name)? {
                        self.consumed.insert(name.to_string());
                    }
                }
                None => self.missing(BuildStep::Denoise, name, name),
            }
        }
        if self.cfg.denoise.light_groups && self.engine == Some(EngineKind::Cycles) {
            let layer = self.layer;
            for group in &layer.light_groups {
                let name = light_group_socket_name(group);
                match self.available_named(&name) {
                    Some(value) => {
                        if self.denoise(color, &value, DENOISING_DATA_AUX, &name, &name)? {
                            self.consumed.insert(name);
                        }
                    }
                    None => self.missing(BuildStep::Denoise, &name, &name),
                }
            }
        }
        Ok(())
    }

    fn retain_noisy(&mut self, color: NodeId, noisy: Option<NodeId>) -> RenderManagerResult<()> {
        let values = std::mem::take(&mut self.noisy_values);
        for (value, name) in &values {
            let slot = format!("Noisy {name}");
            if self.cfg.noisy.embed {
                self.to_color(value, color, &slot)?;
            }
            if let Some(sink) = noisy {
                self.to_slot(value, sink, &slot)?;
            }
        }
        Ok(())
    }

    fn route_data(&mut self, data: NodeId) -> RenderManagerResult<()> {
        for socket in data_sockets(MAX_CRYPTO_SOCKETS) {
            let Some(ep) = self.available(socket) else {
                continue;
            };
            self.consumed.insert(ep.socket.clone());
            let slot = ep.socket.clone();
            let from = self.preferred(ep);
            self.to_slot(&from, data, &slot)?;
        }
        Ok(())
    }

    /// Route every remaining available source output to a same-named color slot.
    fn sweep(&mut self, color: NodeId) -> RenderManagerResult<()> {
        let excluded: Vec<&str> = BACKUP_ONLY.iter().filter_map(|s| self.name(*s)).collect();
        let remaining: Vec<String> = self
            .tree
            .node(self.source)?
            .outputs
            .iter()
            .filter(|o| o.available)
            .map(|o| o.name.clone())
            .filter(|n| !self.consumed.contains(n) && !excluded.contains(&n.as_str()))
            .collect();
        for name in remaining {
            self.to_color(&Endpoint::new(self.source, name.clone()), color, &name)?;
        }
        Ok(())
    }

    /// Drop color slots that received no link in this build.
    fn prune(&mut self, color: NodeId) -> RenderManagerResult<()> {
        let stale: Vec<String> = self
            .tree
            .node(color)?
            .inputs
            .iter()
            .filter(|slot| !self.used.contains(*slot))
            .cloned()
            .collect();
        for slot in stale {
            tracing::debug!(layer = %self.layer.name, %slot, "pruning unused color slot");
            self.tree.remove_slot(color, &slot)?;
        }
        Ok(())
    }
}

/// Output directory a build of `scene` writes to.
pub fn output_base(doc: &Document, scene: &str) -> RenderManagerResult<PathBuf> {
    doc.abspath(&doc.scene(scene)?.render_manager.file_output_basepath)
}

#[cfg(test)]
#[path = "../../tests/unit/build/builder.rs"]
mod tests;
