use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub security: SecuritySettings,
    pub notify: NotifySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone)]
pub struct SecuritySettings {
    // 入站写操作的静态口令
    pub api_token: String,
}

#[derive(Deserialize, Clone)]
pub struct NotifySettings {
    pub webhook_url: String,
    // 与入站口令相互独立，各自可覆盖
    pub token: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/msgboard.db")?
            .set_default("security.api_token", "change_me_please")?
            .set_default("notify.webhook_url", "https://notify.example.com/push")?
            .set_default("notify.token", "notify_token_unset")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("MSGBOARD_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("MSGBOARD_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
