use secrecy::Secret;
use std::env;

use crate::error::ApiError;

/// Process configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub sheet: SheetSettings,
}

/// Identity of the spreadsheet and the service account used to reach it.
#[derive(Debug, Clone)]
pub struct SheetSettings {
    pub sheet_id: String,
    pub service_email: String,
    /// PEM private key. Literal `\n` sequences are unescaped before parsing.
    pub service_key: Secret<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ApiError> {
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(Settings {
            port: get_env("PORT", Some("3000"), is_prod)?
                .parse()
                .unwrap_or(3000),
            sheet: SheetSettings {
                sheet_id: get_env("GOOGLE_SHEET_ID", None, is_prod)?,
                service_email: get_env("GOOGLE_SERVICE_EMAIL", None, is_prod)?,
                service_key: Secret::new(get_env("GOOGLE_SERVICE_KEY", None, is_prod)?),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, ApiError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(ApiError::Config(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(ApiError::Config(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
