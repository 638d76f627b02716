//! Google Sheets v4 client.
//!
//! Every `connect` performs the full service-account token exchange and
//! metadata load. That keeps each request on fresh remote state at the cost
//! of auth latency, which is the intended trade-off for this service.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Row, SheetClient, SheetError, Worksheet};
use crate::config::SheetSettings;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct GoogleSheetClient {
    http: Client,
    settings: SheetSettings,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

impl GoogleSheetClient {
    pub fn new(settings: SheetSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    /// Exchange a signed service-account assertion for a bearer token.
    async fn access_token(&self) -> Result<String, SheetError> {
        // Keys handed over through env vars carry literal \n sequences.
        let key_pem = self
            .settings
            .service_key
            .expose_secret()
            .replace("\\n", "\n");
        let key = EncodingKey::from_rsa_pem(key_pem.as_bytes())
            .map_err(|e| SheetError::Credentials(format!("invalid service key: {}", e)))?;

        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.settings.service_email,
            scope: SHEETS_SCOPE,
            aud: TOKEN_URL,
            iat: now,
            exp: now + 3600,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| SheetError::Credentials(format!("failed to sign assertion: {}", e)))?;

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;
        let response = check(response).await?;

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl SheetClient for GoogleSheetClient {
    async fn connect(&self) -> Result<Box<dyn Worksheet>, SheetError> {
        let token = self.access_token().await?;

        let url = format!(
            "{}/{}?fields=sheets.properties",
            API_BASE, self.settings.sheet_id
        );
        let response = self.http.get(&url).bearer_auth(&token).send().await?;
        let meta: SpreadsheetMeta = check(response).await?.json().await?;

        let first = meta.sheets.into_iter().next().ok_or(SheetError::NoWorksheet)?;

        Ok(Box::new(GoogleWorksheet {
            http: self.http.clone(),
            token,
            spreadsheet_id: self.settings.sheet_id.clone(),
            sheet_id: first.properties.sheet_id,
            title: first.properties.title,
        }))
    }
}

/// Live handle to one worksheet, valid for the bearer token it carries.
struct GoogleWorksheet {
    http: Client,
    token: String,
    spreadsheet_id: String,
    sheet_id: i64,
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[async_trait]
impl Worksheet for GoogleWorksheet {
    async fn rows(&self) -> Result<Vec<Row>, SheetError> {
        let url = format!(
            "{}/{}/values/'{}'!A2:B",
            API_BASE, self.spreadsheet_id, self.title
        );
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let range: ValueRange = check(response).await?.json().await?;

        Ok(range
            .values
            .into_iter()
            .enumerate()
            .map(|(i, cells)| Row {
                row_number: i as u32 + 2,
                key: cells.first().cloned().unwrap_or_default(),
                value: cells.get(1).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn update_value(&self, row: &Row, value: &str) -> Result<(), SheetError> {
        let url = format!(
            "{}/{}/values/'{}'!B{}",
            API_BASE, self.spreadsheet_id, self.title, row.row_number
        );
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [[value]] }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn append(&self, key: &str, value: &str) -> Result<(), SheetError> {
        let url = format!(
            "{}/{}/values/'{}'!A1:B1:append",
            API_BASE, self.spreadsheet_id, self.title
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [[key, value]] }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, row: &Row) -> Result<(), SheetError> {
        let url = format!("{}/{}:batchUpdate", API_BASE, self.spreadsheet_id);
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row.row_number - 1,
                        "endIndex": row.row_number
                    }
                }
            }]
        });
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, SheetError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(SheetError::Api {
            status: response.status().as_u16(),
            message: response.text().await.unwrap_or_default(),
        })
    }
}
