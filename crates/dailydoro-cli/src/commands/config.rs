use clap::Subcommand;
use dailydoro_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting (empty when unset)
    Get {
        /// Dotted key, e.g. "schedule.focus_duration" or "export.directory"
        key: String,
    },
    /// Change one setting and save config.toml
    Set {
        /// Dotted key; durations are minutes and must be positive
        key: String,
        /// New value
        value: String,
    },
    /// Show the whole config as stored in config.toml
    List {
        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Restore the 25/5/20 minute defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            Config::load()?.set(&key, &value)?;
            tracing::info!(%key, %value, "config updated");
            println!("{key} = {value}");
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", config.to_toml()?);
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
