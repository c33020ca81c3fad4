//! Implementation of the `clipforge config` subcommands.

use super::{GlobalOptions, load_config};
use crate::cli::ConfigAction;
use crate::config::Config;
use crate::error::Result;

/// Execute a `clipforge config` action.
pub fn cmd_config(globals: &GlobalOptions, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = Config::resolve_path(globals.config_path.as_deref())?;
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = load_config(globals)?;
            print!("{}", config.to_yaml()?);
        }
        ConfigAction::Init(args) => {
            let path = Config::resolve_path(globals.config_path.as_deref())?;
            Config::default().write_to(&path, args.force)?;
            tracing::info!(path = %path.display(), "wrote default config");
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConfigInitArgs;
    use tempfile::TempDir;

    fn globals_for(path: std::path::PathBuf) -> GlobalOptions {
        GlobalOptions {
            config_path: Some(path),
            ..Default::default()
        }
    }

    #[test]
    fn init_writes_loadable_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.yaml");
        let globals = globals_for(path.clone());

        cmd_config(&globals, ConfigAction::Init(ConfigInitArgs { force: false })).unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "preview_result: true\n").unwrap();
        let globals = globals_for(path.clone());

        let err = cmd_config(&globals, ConfigAction::Init(ConfigInitArgs { force: false }))
            .unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(Config::load(&path).unwrap().preview_result);

        cmd_config(&globals, ConfigAction::Init(ConfigInitArgs { force: true })).unwrap();
        assert!(!Config::load(&path).unwrap().preview_result);
    }

    #[test]
    fn show_rejects_invalid_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "collaborator:\n  timeout_seconds: 0\n").unwrap();

        assert!(cmd_config(&globals_for(path), ConfigAction::Show).is_err());
    }
}
