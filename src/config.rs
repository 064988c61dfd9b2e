use dotenvy::dotenv;
use log::error;
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    pub rapidapi_key: String,
    pub zillow_host: String,
    pub zillow_endpoint: String,
    pub zillow_key: Option<String>,
    pub redfin_host: String,
    pub redfin_endpoint: String,
    pub redfin_key: Option<String>,
    pub realty_host: Option<String>,
    pub realty_endpoint: Option<String>,
    pub realty_key: Option<String>,
    pub request_timeout_seconds: u32,
    pub records_per_page: u32,
}

pub fn create_test_config() -> Config {
    Config {
        rapidapi_key: "xxx".to_string(),
        zillow_host: "real-time-zillow-data.p.rapidapi.com".to_string(),
        zillow_endpoint: "/search".to_string(),
        zillow_key: None,
        redfin_host: "redfin-canada.p.rapidapi.com".to_string(),
        redfin_endpoint: "/properties/search-sale".to_string(),
        redfin_key: None,
        realty_host: None,
        realty_endpoint: None,
        realty_key: None,
        request_timeout_seconds: 20,
        records_per_page: 25,
    }
}

pub fn read_config() -> Config {
    dotenv().ok();
    env::var(CONFIG_PATH_ENV)
        .map_err(|_| format!("{CONFIG_PATH_ENV} .env not set"))
        .and_then(|config_path| std::fs::read(config_path).map_err(|e| e.to_string()))
        .and_then(|bytes| toml::from_slice(&bytes).map_err(|e| e.to_string()))
        .unwrap_or_else(|err| {
            error!("failed to read config: {err}");
            std::process::exit(1);
        })
}
