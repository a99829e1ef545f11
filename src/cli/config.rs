//! `config` command

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;

use crate::settings::{Settings, DEFAULT_CONFIG_FILE};

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Write a default settings file instead of printing the effective settings
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

pub fn run(args: ConfigArgs, settings: Settings, path: Option<&Path>) -> anyhow::Result<()> {
    if !args.init {
        print!("{}", settings.to_toml().context("Failed to serialize settings")?);
        return Ok(());
    }

    let path = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let written = init(&path, args.force)?;
    println!("Wrote default settings to {}", written.display());
    Ok(())
}

/// Write the default settings to `path`, refusing to clobber unless `force`
pub fn init(path: &Path, force: bool) -> anyhow::Result<PathBuf> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents = Settings::default()
        .to_toml()
        .context("Failed to serialize settings")?;
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created settings file {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Design/assets.toml");

        init(&path, false).unwrap();

        let mut expected = Settings::default();
        expected.appicon.source = dir.path().join("Design/AppIcon.svg");
        expected.appicon.output = dir.path().join("Design/AppIcon.appiconset");
        expected.imageset.sets[0].source = dir.path().join("Design/CoffeeBean.svg");
        expected.imageset.sets[0].output = dir.path().join("Design/CoffeeBean.imageset");
        assert_eq!(Settings::from_file(&path).unwrap(), expected);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(init(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        init(&path, true).unwrap();
        assert!(Settings::from_file(&path).is_ok());
    }
}
