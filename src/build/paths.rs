use std::path::{Path, PathBuf};

/// Output locations of one view layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerOutputPaths {
    /// `{base}/{clean}`.
    pub dir: PathBuf,
    /// Color sink template.
    pub color: String,
    /// Data sink template.
    pub data: String,
    /// Noisy sink template.
    pub noisy: String,
    /// Backup sink template.
    pub backup: String,
}

impl LayerOutputPaths {
    /// Paths for layer `clean_name` under `base`.
    pub fn new(base: &Path, clean_name: &str) -> Self {
        let dir = base.join(clean_name);
        let template = |suffix: &str| {
            dir.join(format!("{clean_name}{suffix}.####.exr"))
                .to_string_lossy()
                .into_owned()
        };
        Self {
            color: template(""),
            data: template("_data"),
            noisy: template("_noisy"),
            backup: template("_backup"),
            dir,
        }
    }

    /// Create the layer directory if absent.
    pub(crate) fn create_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/build/paths.rs"]
mod tests;
