use crate::{
    foundation::core::{HostGeneration, NodeId, Point},
    foundation::error::{RenderManagerError, RenderManagerResult},
    graph::node::{Link, Node, NodeKind, OutputSocket},
    passes::sockets::node_socket_names,
};

/// Compositor node tree of a scene.
///
/// Each input socket accepts at most one link; linking into an occupied input replaces the
/// previous link, as the host does.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeTree {
    /// Host generation the socket names follow.
    pub generation: HostGeneration,
    nodes: Vec<Node>,
    links: Vec<Link>,
    next_id: u32,
}

impl NodeTree {
    /// Empty tree for a host generation.
    pub fn new(generation: HostGeneration) -> Self {
        Self {
            generation,
            nodes: Vec::new(),
            links: Vec::new(),
            next_id: 0,
        }
    }

    /// Remove every node and link.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable nodes in creation order.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Links in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Create a node with the kind's fixed sockets.
    pub fn add_node(&mut self, kind: NodeKind, label: impl Into<String>, location: Point) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let (inputs, outputs) = kind.default_sockets(node_socket_names(self.generation));
        self.nodes.push(Node {
            id,
            kind,
            label: label.into(),
            location,
            hide: false,
            inputs: inputs.into_iter().map(str::to_string).collect(),
            outputs: outputs.into_iter().map(OutputSocket::available).collect(),
        });
        id
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> RenderManagerResult<&Node> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| RenderManagerError::validation(format!("unknown node {}", id.0)))
    }

    /// Mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> RenderManagerResult<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| RenderManagerError::validation(format!("unknown node {}", id.0)))
    }

    /// Connect `from.out` to `to.input`, replacing any link already feeding `to.input`.
    pub fn link(
        &mut self,
        from: NodeId,
        out: &str,
        to: NodeId,
        input: &str,
    ) -> RenderManagerResult<()> {
        let src = self.node(from)?;
        if !src.has_output(out) {
            return Err(RenderManagerError::validation(format!(
                "node '{}' has no output '{out}'",
                src.label
            )));
        }
        let dst = self.node(to)?;
        if !dst.has_input(input) {
            return Err(RenderManagerError::validation(format!(
                "node '{}' has no input '{input}'",
                dst.label
            )));
        }
        self.links
            .retain(|l| !(l.to_node == to && l.to_socket == input));
        self.links.push(Link {
            from_node: from,
            from_socket: out.to_string(),
            to_node: to,
            to_socket: input.to_string(),
        });
        Ok(())
    }

    /// Whether any link leaves `node.out`.
    pub fn is_output_linked(&self, node: NodeId, out: &str) -> bool {
        self.links
            .iter()
            .any(|l| l.from_node == node && l.from_socket == out)
    }

    /// The link feeding `node.input`, if any.
    pub fn link_into(&self, node: NodeId, input: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.to_node == node && l.to_socket == input)
    }

    /// Links leaving `node`.
    pub fn links_from(&self, node: NodeId) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.from_node == node)
    }

    /// Replace the output sockets of a node (render-layer sources).
    pub fn set_outputs(&mut self, node: NodeId, outputs: Vec<OutputSocket>) -> RenderManagerResult<()> {
        let live: Vec<String> = outputs.iter().map(|o| o.name.clone()).collect();
        self.node_mut(node)?.outputs = outputs;
        self.links
            .retain(|l| l.from_node != node || live.contains(&l.from_socket));
        Ok(())
    }

    /// Return the input slot `name` on a sink, creating it when absent.
    pub fn ensure_slot(&mut self, node: NodeId, name: &str) -> RenderManagerResult<()> {
        let n = self.node_mut(node)?;
        if n.file_output().is_none() {
            return Err(RenderManagerError::validation(format!(
                "node '{}' is not a file output",
                n.label
            )));
        }
        if !n.has_input(name) {
            n.inputs.push(name.to_string());
        }
        Ok(())
    }

    /// Remove input slot `name` and any link into it.
    pub fn remove_slot(&mut self, node: NodeId, name: &str) -> RenderManagerResult<()> {
        self.node_mut(node)?.inputs.retain(|i| i != name);
        self.links
            .retain(|l| !(l.to_node == node && l.to_socket == name));
        Ok(())
    }

    /// Remove every input slot of a sink.
    pub fn clear_slots(&mut self, node: NodeId) -> RenderManagerResult<()> {
        self.node_mut(node)?.inputs.clear();
        self.links.retain(|l| l.to_node != node);
        Ok(())
    }

    /// Nodes whose kind satisfies `pred`.
    pub fn nodes_where<'a>(
        &'a self,
        pred: impl Fn(&NodeKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| pred(&n.kind))
    }

    /// First node carrying `label`.
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/tree.rs"]
mod tests;
