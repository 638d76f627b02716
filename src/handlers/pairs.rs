//! The three pair operations: list, upsert, delete.
//!
//! Each handler follows the same pipeline: connect to the worksheet, fetch
//! every row, scan for the key, mutate, respond. The sheet is the single
//! source of truth, so every operation starts from a fresh fetch.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::Pair;
use crate::startup::AppState;

/// Success envelope for list requests.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub result: u16,
    pub data: HashMap<String, String>,
}

/// Success envelope for mutations.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub result: u16,
    pub description: &'static str,
}

#[tracing::instrument(skip(state))]
pub async fn list_pairs(State(state): State<AppState>) -> Result<Json<DataResponse>, ApiError> {
    let sheet = state.sheets.connect().await.map_err(|e| {
        tracing::error!("Spreadsheet connection failed: {}", e);
        ApiError::Connection(e)
    })?;

    let rows = sheet.rows().await.map_err(|e| {
        tracing::error!("Row fetch failed: {}", e);
        ApiError::Fetch {
            message: "Problem getting data",
            source: e,
        }
    })?;

    // Later duplicates overwrite earlier ones, matching sheet scan order.
    let data: HashMap<String, String> = rows
        .into_iter()
        .map(|row| (row.key, row.value))
        .collect();

    Ok(Json(DataResponse { result: 200, data }))
}

#[tracing::instrument(skip(state, body))]
pub async fn upsert_pair(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let pair = Pair::from_body(&body)?;

    let sheet = state.sheets.connect().await.map_err(|e| {
        tracing::error!("Spreadsheet connection failed: {}", e);
        ApiError::Connection(e)
    })?;

    let rows = sheet.rows().await.map_err(|e| {
        tracing::error!("Row fetch failed: {}", e);
        ApiError::Fetch {
            message: "Problem updating existing key",
            source: e,
        }
    })?;

    // First match wins; duplicate keys are assumed not to exist.
    if let Some(row) = rows.iter().find(|row| row.key == pair.key) {
        sheet.update_value(row, &pair.value).await.map_err(|e| {
            tracing::error!(key = %pair.key, "Row update failed: {}", e);
            ApiError::Mutation {
                message: "Problem updating existing key",
                source: e,
            }
        })?;

        tracing::info!(key = %pair.key, "Updated existing pair");
        return Ok((
            StatusCode::OK,
            Json(StatusResponse {
                result: 200,
                description: "Value has been updated",
            }),
        ));
    }

    sheet.append(&pair.key, &pair.value).await.map_err(|e| {
        tracing::error!(key = %pair.key, "Row append failed: {}", e);
        ApiError::Mutation {
            message: "Problem adding new key",
            source: e,
        }
    })?;

    tracing::info!(key = %pair.key, "Added new pair");
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            result: 201,
            description: "Paired Value added",
        }),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn delete_pair(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let sheet = state.sheets.connect().await.map_err(|e| {
        tracing::error!("Spreadsheet connection failed: {}", e);
        ApiError::Connection(e)
    })?;

    let rows = sheet.rows().await.map_err(|e| {
        tracing::error!("Row fetch failed: {}", e);
        ApiError::Fetch {
            message: "Problem deleting key-value pair",
            source: e,
        }
    })?;

    let matches: Vec<_> = rows.iter().filter(|row| row.key == key).collect();
    if matches.is_empty() {
        return Err(ApiError::KeyNotFound);
    }

    // Duplicate keys are a tolerated legacy state and every match goes.
    // Bottom-up, so earlier deletions don't shift the rows still pending.
    for row in matches.into_iter().rev() {
        sheet.delete(row).await.map_err(|e| {
            tracing::error!(key = %key, "Row delete failed: {}", e);
            ApiError::Mutation {
                message: "Problem deleting key-value pair",
                source: e,
            }
        })?;
    }

    tracing::info!(key = %key, "Deleted pair");
    Ok(Json(StatusResponse {
        result: 200,
        description: "Paired value deleted",
    }))
}
