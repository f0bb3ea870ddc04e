use anyhow::{Context, Result, bail};
use argot::Spec;
use argot_schema::SpecFile;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct LoadedSpec {
    pub path: PathBuf,
    pub file: SpecFile,
    pub spec: Spec,
}

impl LoadedSpec {
    /// Command name for usage text: the file's `name`, else the file stem.
    pub fn command_name(&self) -> String {
        if !self.file.name.trim().is_empty() {
            return self.file.name.trim().to_string();
        }
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("command")
            .to_string()
    }
}

pub fn load_spec_file(spec_path: &Path) -> Result<LoadedSpec> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = resolve_against(&cwd, spec_path);

    if !path.exists() {
        bail!("spec file not found: {}", path.display());
    }

    let file = SpecFile::load(&path)?;
    let spec = file
        .to_spec()
        .with_context(|| format!("invalid spec file: {}", path.display()))?;

    Ok(LoadedSpec { path, file, spec })
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
