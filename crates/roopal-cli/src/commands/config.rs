//! Config command - inspect and edit the settings file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;

use roopal_core::RoopalConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default settings
    Init(InitArgs),

    /// Print one setting
    Get {
        /// Setting key (e.g., "export.utc_offset_minutes")
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },

    /// Show which configuration file is used
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path; defaults to --config or the user config directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

/// Every setting the file can carry, addressed by dotted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    MinTextLength,
    RollOvernightShifts,
    Anonymise,
    UtcOffsetMinutes,
    Delimiter,
}

impl Setting {
    const ALL: [Setting; 5] = [
        Setting::MinTextLength,
        Setting::RollOvernightShifts,
        Setting::Anonymise,
        Setting::UtcOffsetMinutes,
        Setting::Delimiter,
    ];

    fn key(self) -> &'static str {
        match self {
            Setting::MinTextLength => "pdf.min_text_length",
            Setting::RollOvernightShifts => "extraction.roll_overnight_shifts",
            Setting::Anonymise => "export.anonymise",
            Setting::UtcOffsetMinutes => "export.utc_offset_minutes",
            Setting::Delimiter => "export.delimiter",
        }
    }

    fn from_key(key: &str) -> anyhow::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|setting| setting.key() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|s| s.key()).collect();
                anyhow::anyhow!(
                    "Unknown configuration key: {} (known keys: {})",
                    key,
                    known.join(", ")
                )
            })
    }

    fn get(self, config: &RoopalConfig) -> String {
        match self {
            Setting::MinTextLength => config.pdf.min_text_length.to_string(),
            Setting::RollOvernightShifts => config.extraction.roll_overnight_shifts.to_string(),
            Setting::Anonymise => config.export.anonymise.to_string(),
            Setting::UtcOffsetMinutes => config.export.utc_offset_minutes.to_string(),
            Setting::Delimiter => config.export.delimiter.to_string(),
        }
    }

    fn set(self, config: &mut RoopalConfig, value: &str) -> anyhow::Result<()> {
        let invalid = || format!("Invalid value for {}: {:?}", self.key(), value);
        match self {
            Setting::MinTextLength => {
                config.pdf.min_text_length = value.parse().with_context(invalid)?;
            }
            Setting::RollOvernightShifts => {
                config.extraction.roll_overnight_shifts = value.parse().with_context(invalid)?;
            }
            Setting::Anonymise => {
                config.export.anonymise = value.parse().with_context(invalid)?;
            }
            Setting::UtcOffsetMinutes => {
                config.export.utc_offset_minutes = value.parse().with_context(invalid)?;
            }
            Setting::Delimiter => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => config.export.delimiter = c,
                    _ => anyhow::bail!("{}: expected a single character", invalid()),
                }
            }
        }
        Ok(())
    }
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path, config_path.is_some()),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roopal")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<RoopalConfig> {
    if path.exists() {
        RoopalConfig::from_file(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))
    } else {
        Ok(RoopalConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            path.display()
        );
    }
    let config = load_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    if let Err(e) = config.validate() {
        eprintln!("{} {}", style("⚠").yellow(), e);
    }

    Ok(())
}

fn init_config(args: InitArgs, path: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    RoopalConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let setting = Setting::from_key(key)?;
    let config = load_or_default(path)?;

    println!("{}", setting.get(&config));

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let setting = Setting::from_key(key)?;
    let mut config = load_or_default(path)?;

    setting.set(&mut config, value)?;
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        setting.get(&config)
    );

    Ok(())
}

fn show_path(path: &Path, explicit: bool) -> anyhow::Result<()> {
    let source = if explicit { "--config" } else { "default" };
    println!("Configuration file: {} ({})", path.display(), source);

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'roopal config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_keys_round_trip() {
        for setting in Setting::ALL {
            assert_eq!(Setting::from_key(setting.key()).unwrap(), setting);
        }
        assert!(Setting::from_key("export.colour").is_err());
    }

    #[test]
    fn test_set_parses_typed_values() {
        let mut config = RoopalConfig::default();

        Setting::UtcOffsetMinutes.set(&mut config, "-300").unwrap();
        Setting::Anonymise.set(&mut config, "true").unwrap();
        Setting::Delimiter.set(&mut config, ";").unwrap();

        assert_eq!(config.export.utc_offset_minutes, -300);
        assert!(config.export.anonymise);
        assert_eq!(Setting::Delimiter.get(&config), ";");
    }

    #[test]
    fn test_set_rejects_malformed_values() {
        let mut config = RoopalConfig::default();

        assert!(Setting::RollOvernightShifts.set(&mut config, "yes").is_err());
        assert!(Setting::MinTextLength.set(&mut config, "-1").is_err());
        assert!(Setting::Delimiter.set(&mut config, ";;").is_err());
        assert_eq!(config, RoopalConfig::default());
    }
}
