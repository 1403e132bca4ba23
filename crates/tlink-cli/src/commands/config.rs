//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a key
    Get {
        /// Config key name
        key: String,
    },
    /// Store a value
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// Remove a value, restoring the default
    Unset {
        /// Config key name
        key: String,
    },
    /// Print every key with its value
    List,
    /// Print the config file location
    Path,
    /// Write an empty config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            ensure_known(key)?;
            let value = Config::load().get(key);
            println!("{}", value.unwrap_or_else(|| "(not set)".to_string()));
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load();
            config.set(key, value)?;
            config.save()?;
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::Unset { key } => {
            ensure_known(key)?;
            let mut config = Config::load();
            config.unset(key);
            config.save()?;
            println!("Unset {}", key);
        }
        ConfigCommands::List => {
            let config = Config::load();
            println!("# {}", config_file_path().display());
            for key in Config::keys() {
                let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
                println!("{} = {}", key, value);
            }
        }
        ConfigCommands::Path => println!("{}", config_file_path().display()),
        ConfigCommands::Init { force } => {
            let path = config_file_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save()?;
            println!("Created config file at {}", path.display());
        }
    }
    Ok(())
}

fn ensure_known(key: &str) -> anyhow::Result<()> {
    if Config::keys().contains(&key) {
        Ok(())
    } else {
        anyhow::bail!(
            "Unknown config key: {}. Available keys: {}",
            key,
            Config::keys().join(", ")
        )
    }
}
