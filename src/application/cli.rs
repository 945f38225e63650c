use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::configuration::API_KEY_ENV;
use crate::domain::models::ListingStyle;
use crate::domain::services::actions::help_text;
use crate::domain::services::model_discovery;
use crate::infrastructure::gateways::GatewayManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

/// Directory holding `debug.log` when running with `RUST_LOG=listgenie`.
pub fn debug_log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("LISTGENIE_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("listgenie");
}

fn parse_listing_style(text: &str) -> Result<String, String> {
    if ListingStyle::parse(text).is_none() {
        return Err(
            "expected researched, quick, or a comma separated column list such as 'Item, Title, Price'"
                .to_string(),
        );
    }

    return Ok(text.to_string());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.display()
    );
    return Ok(());
}

async fn print_models() -> Result<()> {
    let api_key = Config::get(ConfigKey::ApiKey);
    if api_key.is_empty() {
        bail!(format!(
            "No API key loaded. Pass --api-key or set {API_KEY_ENV}."
        ));
    }

    let gateway = GatewayManager::get(&Config::get(ConfigKey::ApiUrl), &api_key);
    match gateway.list_models().await {
        Ok(models) => {
            println!("Groq API connection successful. Models:");
            println!("{}", model_discovery::format_model_list(&models));
        }
        Err(err) => {
            eprintln!("{}", format!("Groq API connection failed: {err}").red());
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for ListGenie")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running ListGenie with environment variable RUST_LOG=listgenie")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn arg_image() -> Arg {
    return Arg::new(ConfigKey::Image.to_string())
        .short('i')
        .long(ConfigKey::Image.to_string())
        .num_args(1)
        .help("A JPG or PNG photo to analyze as soon as the session starts.");
}

fn subcommand_start() -> Command {
    return Command::new("start")
        .about("Start a new listing session.")
        .arg(arg_image());
}

fn subcommand_models() -> Command {
    return Command::new("models")
        .about("Checks the API key by listing the models it can use. Vision capable models are marked.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return format!("SESSION {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("listgenie")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_start())
        .subcommand(subcommand_models())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_image())
        .arg(
            Arg::new(ConfigKey::ApiKey.to_string())
                .short('k')
                .long(ConfigKey::ApiKey.to_string())
                .env(API_KEY_ENV)
                .hide_env_values(true)
                .num_args(1)
                .help("Groq API key. It is only held in memory and never written to the config file.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ApiUrl.to_string())
                .long(ConfigKey::ApiUrl.to_string())
                .env("LISTGENIE_API_URL")
                .num_args(1)
                .help(format!("OpenAI compatible API URL serving the Groq models. [default: {}]", Config::default(ConfigKey::ApiUrl)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("LISTGENIE_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ExportDir.to_string())
                .short('o')
                .long(ConfigKey::ExportDir.to_string())
                .env("LISTGENIE_EXPORT_DIR")
                .num_args(1)
                .help(format!("Directory /export writes listing.csv to when no path is given. [default: {}]", Config::default(ConfigKey::ExportDir)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ListingModel.to_string())
                .short('l')
                .long(ConfigKey::ListingModel.to_string())
                .env("LISTGENIE_LISTING_MODEL")
                .num_args(1)
                .help("Model drafting listings, posts and chat replies. Defaults to the first compound-beta model available, then mixtral-8x7b-32768.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ListingStyle.to_string())
                .long(ConfigKey::ListingStyle.to_string())
                .env("LISTGENIE_LISTING_STYLE")
                .num_args(1)
                .help(format!("Listing style: researched, quick, or a comma separated column list. [default: {}]", Config::default(ConfigKey::ListingStyle)))
                .value_parser(parse_listing_style)
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::VisionModel.to_string())
                .short('v')
                .long(ConfigKey::VisionModel.to_string())
                .env("LISTGENIE_VISION_MODEL")
                .num_args(1)
                .help("Model analyzing photos. Defaults to the first vision capable model available.")
                .global(true),
        );
}

/// Returns true when an interactive session should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = debug_log_dir().join("debug.log");
                    println!("{}", log_path.display());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("start", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("models", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            print_models().await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
