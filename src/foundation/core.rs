use crate::foundation::error::{RenderManagerError, RenderManagerResult};

pub use kurbo::{Point, Vec2};

/// Render engines whose pass taxonomies are known.
///
/// Host engine identifiers are matched by substring, so `BLENDER_EEVEE_NEXT` and `BLENDER_EEVEE`
/// both resolve to [`EngineKind::Eevee`]. Anything else (Workbench, third-party engines) has no
/// pass taxonomy and resolves to `None`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum EngineKind {
    /// Path tracer with separated direct/indirect/color light components.
    Cycles,
    /// Rasterizer with a reduced pass set.
    Eevee,
}

impl EngineKind {
    /// Resolve a host engine identifier.
    pub fn from_engine_id(id: &str) -> Option<Self> {
        let upper = id.to_ascii_uppercase();
        if upper.contains("CYCLES") {
            Some(Self::Cycles)
        } else if upper.contains("EEVEE") {
            Some(Self::Eevee)
        } else {
            None
        }
    }

    /// Name of the engine-specific settings block on a view layer.
    pub fn settings_key(self) -> &'static str {
        match self {
            Self::Cycles => "cycles",
            Self::Eevee => "eevee",
        }
    }
}

/// Host API generations with diverging socket names and output-slot APIs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum HostGeneration {
    /// Short pass socket names (`DiffDir`, `IndexOB`), file outputs use `layer_slots`.
    Legacy,
    /// Long pass socket names (`Diffuse Direct`, `Object Index`), file outputs use
    /// `file_output_items`.
    Current,
}

/// Host application version as `major.minor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostVersion {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
}

impl HostVersion {
    /// Build a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// API generation this version belongs to.
    pub fn generation(self) -> HostGeneration {
        if self.major >= 5 {
            HostGeneration::Current
        } else {
            HostGeneration::Legacy
        }
    }

    /// Parse `"4.2"` or `"5.0.1"`; the patch component is ignored.
    pub fn parse(s: &str) -> RenderManagerResult<Self> {
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| RenderManagerError::validation(format!("invalid host version '{s}'")))?;
        let minor = match parts.next() {
            Some(p) => p.parse::<u32>().map_err(|_| {
                RenderManagerError::validation(format!("invalid host version '{s}'"))
            })?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

impl Default for HostVersion {
    fn default() -> Self {
        Self::new(4, 2)
    }
}

impl std::fmt::Display for HostVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl std::str::FromStr for HostVersion {
    type Err = RenderManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for HostVersion {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HostVersion {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a node inside a [`crate::NodeTree`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
