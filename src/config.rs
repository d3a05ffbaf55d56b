use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL connection URL. The in-memory catalog is used when unset.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL. Observation caching is disabled when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// OpenWeatherMap API key
    pub weather_api_key: String,

    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// How long a weather observation stays cached, in seconds
    #[serde(default = "default_observation_cache_ttl")]
    pub observation_cache_ttl: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_observation_cache_ttl() -> u64 {
    600
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
