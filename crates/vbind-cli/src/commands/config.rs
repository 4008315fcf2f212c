use crate::GlobalOpts;
use clap::Subcommand;
use colored::Colorize;
use vbind_config::{Config, KEYS};
use vbind_logger as logger;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print every configured key
    Show,
    /// Set a configuration key
    Set { key: String, value: String },
    /// Get or set the path to the config file.
    /// If `new_path` is provided, the CLI will set the config path to that value.
    /// If omitted, the CLI will print the current configuration file path.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> anyhow::Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            if let Err(e) = config.set(&key, &value) {
                logger::debug(&format!("Supported keys: {}", KEYS.join(", ")));
                return Err(e.into());
            }
            config.save()?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Path { new_path } => match new_path {
            Some(path) => {
                let pointer = Config::set_path(&path)?;
                logger::debug(&format!("Wrote config pointer {}", pointer.display()));
                logger::success(&format!("Config path set to {}", path));
            }
            None => {
                let config_path = Config::path();
                logger::debug(&format!("Reading config from: {}", config_path.display()));
                println!("{}", config_path.display());
                if let Some(pointed) = Config::path_override() {
                    println!("{} {}", "overridden-by".cyan(), pointed.display());
                }
            }
        },
    }
    Ok(())
}
