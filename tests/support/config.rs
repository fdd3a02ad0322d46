use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Config that serves demo listings and never calls a text model.
pub fn offline_toml(output_dir: &Path) -> String {
    format!(
        concat!(
            "output_dir = {:?}\n",
            "\n",
            "[logging]\n",
            "level = \"warn\"\n",
            "\n",
            "[matching]\n",
            "semantic = false\n",
            "\n",
            "[sources]\n",
            "demo = true\n",
        ),
        output_dir.display().to_string()
    )
}

/// A temp directory holding `config.toml` and an `out/` output directory.
pub struct Workspace {
    pub dir: TempDir,
    pub config: PathBuf,
    pub output_dir: PathBuf,
}

impl Workspace {
    pub fn offline() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let output_dir = dir.path().join("out");
        let config = dir.path().join("config.toml");
        fs::write(&config, offline_toml(&output_dir)).expect("write config");
        Self {
            dir,
            config,
            output_dir,
        }
    }

    pub fn with_config(contents: &str) -> Self {
        let workspace = Self::offline();
        fs::write(&workspace.config, contents).expect("write config");
        workspace
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}
