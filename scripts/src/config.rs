use envconfig::Envconfig;
use std::sync::OnceLock;

/// Same variables the web app reads for its database
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    #[envconfig(default = "local")]
    pub env: String,
    pub db_host: String,
    pub db_pass_encrypt: String,
}

impl AppConfig {
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}

pub static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn init_config() -> anyhow::Result<()> {
    let _ = APP_CONFIG.set(AppConfig::init_from_env()?);

    Ok(())
}
