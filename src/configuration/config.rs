#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::ListingStyle;
use crate::domain::models::Session;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiKey,
    ApiUrl,
    ConfigFile,
    ExportDir,
    Image,
    ListingModel,
    ListingStyle,
    Username,
    VisionModel,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("listgenie/config.toml");

        let res = match key {
            ConfigKey::ApiUrl => "https://api.groq.com/openai".to_string(),
            ConfigKey::ExportDir => ".".to_string(),
            ConfigKey::ListingModel => "".to_string(),
            ConfigKey::ListingStyle => "researched".to_string(),
            ConfigKey::VisionModel => "".to_string(),

            // Special
            ConfigKey::ApiKey => "".to_string(),
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::Image => "".to_string(),
            ConfigKey::Username => "".to_string(),
        };

        return res;
    }

    /// Keys that can be written to the config file.
    fn is_file_key(key: ConfigKey) -> bool {
        return !matches!(
            key,
            ConfigKey::ApiKey | ConfigKey::ConfigFile | ConfigKey::Image
        );
    }

    /// Reads the values a config file sets. A missing file sets nothing.
    async fn read_file(config_path: &path::Path) -> Result<Vec<(ConfigKey, String)>> {
        if !config_path.exists() {
            return Ok(vec![]);
        }

        let toml_str = fs::read_to_string(config_path).await?;
        let doc = toml_str.parse::<toml_edit::Document>()?;

        if doc.get(&ConfigKey::ApiKey.to_string()).is_some() {
            tracing::warn!(path = ?config_path, "ignoring api-key in config file");
        }

        let mut values = vec![];
        for key in ConfigKey::iter().filter(|e| return Config::is_file_key(*e)) {
            if let Some(val) = doc.get(&key.to_string()) {
                let val_str = match val.as_str() {
                    Some(val_str) => val_str,
                    None => {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}': expected a string"
                        ));
                    }
                };

                if val_str.is_empty() {
                    continue;
                }
                if key == ConfigKey::ListingStyle && ListingStyle::parse(val_str).is_none() {
                    bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: researched, quick, or a comma separated column list"));
                }

                values.push((key, val_str.to_string()));
            }
        }

        return Ok(values);
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        for (key, val) in Config::read_file(&path::PathBuf::from(config_file)).await? {
            Config::set(key, &val);
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            api_url = Config::get(ConfigKey::ApiUrl),
            api_key_set = !Config::get(ConfigKey::ApiKey).is_empty(),
            vision_model = Config::get(ConfigKey::VisionModel),
            listing_model = Config::get(ConfigKey::ListingModel),
            listing_style = Config::get(ConfigKey::ListingStyle),
            export_dir = Config::get(ConfigKey::ExportDir),
            "config"
        );

        return Ok(());
    }

    /// Seeds a new session. The session owns these values from here on.
    pub fn session() -> Session {
        let vision_model = Config::get(ConfigKey::VisionModel);
        let listing_model = Config::get(ConfigKey::ListingModel);

        let mut session = Session::new(
            &Config::get(ConfigKey::ApiKey),
            Some(vision_model.as_str()).filter(|e| return !e.is_empty()),
            Some(listing_model.as_str()).filter(|e| return !e.is_empty()),
        );
        session.listing_style =
            ListingStyle::parse(&Config::get(ConfigKey::ListingStyle)).unwrap_or_default();

        return session;
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter(|key| return Config::is_file_key(*key))
            .filter_map(|key| {
                if key == ConfigKey::Username {
                    return Some(
                        "# Your user name displayed next to your chat messages.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
