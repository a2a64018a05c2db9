use anyhow::Context;
use std::path::Path;

const CONFIG_FILE: &str = "./app-config.toml";

#[derive(serde::Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub database: brgy_db::Config,
    #[serde(default)]
    pub admin: brgy_registry::navigation::AdminConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TracingConfig {
    pub filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    let mut config = if Path::new(CONFIG_FILE).exists() {
        let configuration = std::fs::read_to_string(CONFIG_FILE)
            .with_context(|| format!("unable to read configuration file {CONFIG_FILE}"))?;
        parse(&configuration)
            .with_context(|| format!("unable to parse configuration file {CONFIG_FILE}"))?
    } else {
        Config::default()
    };
    if let Ok(path) = std::env::var("BRGY_DATABASE_PATH") {
        config.database.path = path.into();
    }
    if let Ok(pass_phrase) = std::env::var("BRGY_ADMIN_PASS_PHRASE") {
        config.admin.pass_phrase = pass_phrase;
    }
    Ok(config)
}

fn parse(configuration: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(configuration)
}
