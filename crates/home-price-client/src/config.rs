use std::{env, fmt, path::PathBuf};

use form_core::Theme;
use reqwest::Url;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_STORE_PATH: &str = ".home-price/store.json";
const MEMORY_STORE: &str = ":memory:";

const ENV_BACKEND_URL: &str = "HOME_PRICE_BACKEND_URL";
const ENV_STORE_PATH: &str = "HOME_PRICE_STORE_PATH";
const ENV_SYSTEM_THEME: &str = "HOME_PRICE_SYSTEM_THEME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Url,
    pub store: StoreLocation,
    pub system_theme: Option<Theme>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBackendUrl(String),
    UnsupportedBackendScheme,
    InvalidStorePath,
    InvalidSystemTheme,
    NonUnicodeBackendUrl,
    NonUnicodeStorePath,
    NonUnicodeSystemTheme,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBackendUrl(err) => {
                write!(f, "HOME_PRICE_BACKEND_URL is not a valid URL: {err}")
            }
            Self::UnsupportedBackendScheme => {
                write!(f, "HOME_PRICE_BACKEND_URL must use http or https")
            }
            Self::InvalidStorePath => {
                write!(f, "HOME_PRICE_STORE_PATH must not be empty or whitespace")
            }
            Self::InvalidSystemTheme => {
                write!(f, "HOME_PRICE_SYSTEM_THEME must be one of: dark, light")
            }
            Self::NonUnicodeBackendUrl => {
                write!(f, "HOME_PRICE_BACKEND_URL contains non-unicode data")
            }
            Self::NonUnicodeStorePath => {
                write!(f, "HOME_PRICE_STORE_PATH contains non-unicode data")
            }
            Self::NonUnicodeSystemTheme => {
                write!(f, "HOME_PRICE_SYSTEM_THEME contains non-unicode data")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = match env::var(ENV_BACKEND_URL) {
            Ok(value) => parse_backend_url(value.trim())?,
            Err(env::VarError::NotPresent) => parse_backend_url(DEFAULT_BACKEND_URL)?,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeBackendUrl);
            }
        };

        let store = match env::var(ENV_STORE_PATH) {
            Ok(value) => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ConfigError::InvalidStorePath);
                }
                if value == MEMORY_STORE {
                    StoreLocation::Memory
                } else {
                    StoreLocation::File(PathBuf::from(value))
                }
            }
            Err(env::VarError::NotPresent) => {
                StoreLocation::File(PathBuf::from(DEFAULT_STORE_PATH))
            }
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeStorePath);
            }
        };

        let system_theme = match env::var(ENV_SYSTEM_THEME) {
            Ok(value) => Some(
                Theme::parse(value.trim().to_ascii_lowercase().as_str())
                    .ok_or(ConfigError::InvalidSystemTheme)?,
            ),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeSystemTheme);
            }
        };

        Ok(Self {
            backend_url,
            store,
            system_theme,
        })
    }
}

fn parse_backend_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|err| ConfigError::InvalidBackendUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedBackendScheme),
    }
}
