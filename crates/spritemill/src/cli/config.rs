//! The `spritemill config` command for configuration management.

use clap::{Args, Subcommand};
use spritemill_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            let toml = config.to_toml()?;
            println!("{}", toml);
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let config = Config::default();
            let toml = config.to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
            println!("{}", init_hint(&config));
        }
    }

    Ok(())
}

/// First-run pointer: the settings most installs have to change before the
/// pipeline can reach the engine.
fn init_hint(config: &Config) -> String {
    format!(
        "Next: point engine.binary (currently `{}`) at your Aseprite executable \
         if it is not on PATH, and place the engine-side scripts under `{}`.",
        config.engine.binary.display(),
        config.engine.script_dir.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_hint_points_at_engine_settings() {
        let hint = init_hint(&Config::default());
        assert!(hint.contains("engine.binary"));
        assert!(hint.contains("aseprite"));
        assert!(hint.contains(".spritemill/scripts"));
    }
}
