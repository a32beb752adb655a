use std::path::PathBuf;

/// Build step a [`BuildWarning::MissingSocket`] was raised from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStep {
    /// Pass combination.
    Combine,
    /// Per-pass denoising.
    Denoise,
    /// Alpha-over fold into the composite.
    Composite,
}

impl std::fmt::Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Combine => "combine",
            Self::Denoise => "denoise",
            Self::Composite => "composite",
        })
    }
}

/// Recoverable condition met while building; the affected step was skipped.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A socket a step needs is absent or unavailable on the source.
    MissingSocket {
        /// View layer being built.
        layer: String,
        /// Step that was skipped.
        step: BuildStep,
        /// Destination the step would have written.
        target: String,
        /// Missing socket.
        socket: String,
    },
    /// The scene's render engine has no pass taxonomy.
    UnsupportedEngine {
        /// Host engine identifier.
        engine: String,
    },
    /// An output directory could not be created.
    OutputDirectory {
        /// Directory path.
        path: PathBuf,
        /// OS error text.
        message: String,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSocket {
                layer,
                step,
                target,
                socket,
            } => write!(
                f,
                "layer '{layer}': skipped {step} of '{target}', socket '{socket}' is missing"
            ),
            Self::UnsupportedEngine { engine } => {
                write!(f, "engine '{engine}' has no pass support; building image outputs only")
            }
            Self::OutputDirectory { path, message } => {
                write!(f, "could not create '{}': {message}", path.display())
            }
        }
    }
}

/// Summary of one node-graph build.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BuildReport {
    /// Layers that received nodes, in fold order.
    pub layers: Vec<String>,
    /// Nodes in the finished tree.
    pub node_count: usize,
    /// Links in the finished tree.
    pub link_count: usize,
    /// Skipped steps.
    pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
    pub(crate) fn warn(&mut self, warning: BuildWarning) {
        tracing::warn!(%warning, "build step skipped");
        self.warnings.push(warning);
    }

    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "Created node setup for {} render layer(s): {} nodes, {} links",
            self.layers.len(),
            self.node_count,
            self.link_count
        );
        if !self.warnings.is_empty() {
            s.push_str(&format!(", {} step(s) skipped", self.warnings.len()));
        }
        s
    }
}
