use std::collections::BTreeSet;

use xxhash_rust::xxh3::Xxh3;

use crate::{
    foundation::core::NodeId,
    graph::{node::NodeKind, tree::NodeTree},
};

const XXH3_SEED: u64 = 0x52e4_d1a7_903c_6b15;

/// A link into a terminal node (file output or composite), described without node ids.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct SinkConnection {
    /// View layer of the render-layer source reached upstream; empty when none is reached.
    pub layer: String,
    /// Terminal node label.
    pub sink: String,
    /// Input slot on the terminal node.
    pub slot: String,
    /// Kinds of the intermediate nodes, nearest to the sink first.
    pub chain: Vec<&'static str>,
}

/// Stable 128-bit digest of a tree's logical wiring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WiringFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Every connection into a terminal node, sorted.
///
/// Upstream chains follow the first linked input of each intermediate node.
pub fn sink_connections(tree: &NodeTree) -> BTreeSet<SinkConnection> {
    let terminals = tree.nodes_where(|k| matches!(k, NodeKind::OutputFile(_) | NodeKind::Composite));
    let mut out = BTreeSet::new();
    for sink in terminals {
        for input in &sink.inputs {
            let Some(link) = tree.link_into(sink.id, input) else {
                continue;
            };
            let (layer, chain) = trace_upstream(tree, link.from_node);
            out.insert(SinkConnection {
                layer,
                sink: sink.label.clone(),
                slot: input.clone(),
                chain,
            });
        }
    }
    out
}

fn trace_upstream(tree: &NodeTree, start: NodeId) -> (String, Vec<&'static str>) {
    let mut chain = Vec::new();
    let mut current = Some(start);
    // Trees are acyclic; the bound only guards malformed documents.
    for _ in 0..=tree.nodes().len() {
        let Some(node) = current.and_then(|id| tree.node(id).ok()) else {
            break;
        };
        if let NodeKind::RenderLayers { layer, .. } = &node.kind {
            return (layer.clone(), chain);
        }
        chain.push(node.kind.type_name());
        current = node
            .inputs
            .iter()
            .find_map(|input| tree.link_into(node.id, input))
            .map(|l| l.from_node);
    }
    (String::new(), chain)
}

/// Fingerprint of [`sink_connections`]; equal for trees with the same logical wiring.
pub fn wiring_fingerprint(tree: &NodeTree) -> WiringFingerprint {
    let connections = sink_connections(tree);
    let mut h = Xxh3::with_seed(XXH3_SEED);
    h.update(&(connections.len() as u64).to_le_bytes());
    for c in &connections {
        write_str(&mut h, &c.layer);
        write_str(&mut h, &c.sink);
        write_str(&mut h, &c.slot);
        h.update(&(c.chain.len() as u32).to_le_bytes());
        for kind in &c.chain {
            write_str(&mut h, kind);
        }
    }
    let v = h.digest128();
    WiringFingerprint {
        hi: (v >> 64) as u64,
        lo: v as u64,
    }
}

fn write_str(h: &mut Xxh3, s: &str) {
    h.update(&(s.len() as u32).to_le_bytes());
    h.update(s.as_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/graph/fingerprint.rs"]
mod tests;
