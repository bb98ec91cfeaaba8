//! Design-tool variables API client.
//!
//! The design tool is an external collaborator reached over HTTP: named
//! variables grouped into collections, each collection carrying modes
//! (light/dark). This module only moves documents across the wire;
//! deciding what to create or delete happens in [`crate::tokens`].
//!
//! Requests are sequential and never retried. A failed call surfaces the
//! HTTP status and response body and aborts the run — partial remote state
//! is handled by the purge-then-recreate sync plan, not by resuming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use swatchbook_style::Rgba;

/// Header carrying the API token.
const AUTH_HEADER: &str = "X-Design-Token";

/// Errors from talking to the design tool.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The API answered with a non-success status.
    #[error("design tool API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never completed or the body could not be decoded.
    #[error("design tool API transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An RGBA color on the wire, components in 0–1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemoteColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl From<Rgba> for RemoteColor {
    fn from(color: Rgba) -> Self {
        RemoteColor {
            r: f64::from(color.r) / 255.0,
            g: f64::from(color.g) / 255.0,
            b: f64::from(color.b) / 255.0,
            a: f64::from(color.a) / 255.0,
        }
    }
}

impl RemoteColor {
    /// Quantizes back to 8-bit channels, for value comparisons.
    pub fn to_rgba(self) -> Rgba {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: channel(self.a),
        }
    }
}

/// One mode of a remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMode {
    pub mode_id: String,
    pub name: String,
}

/// A remote variable collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCollection {
    pub id: String,
    pub name: String,
    pub modes: Vec<RemoteMode>,
    pub default_mode_id: String,
}

/// A remote variable and its per-mode values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVariable {
    pub id: String,
    pub name: String,
    pub variable_collection_id: String,
    pub resolved_type: String,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, RemoteColor>,
}

/// The remote variables document, as fetched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVariablesDoc {
    #[serde(default)]
    pub variable_collections: BTreeMap<String, RemoteCollection>,
    #[serde(default)]
    pub variables: BTreeMap<String, RemoteVariable>,
}

/// What a batched operation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpAction {
    Create,
    Update,
    Delete,
}

/// Collection create/delete operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOp {
    pub action: OpAction,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_mode_id: Option<String>,
}

/// Mode create/rename operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeOp {
    pub action: OpAction,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub variable_collection_id: String,
}

/// Variable create/delete operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableOp {
    pub action: OpAction,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub variable_collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_type: Option<String>,
}

/// Per-mode value assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeValueOp {
    pub variable_id: String,
    pub mode_id: String,
    pub value: RemoteColor,
}

/// One batched POST body of variable operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesPayload {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub variable_collections: Vec<CollectionOp>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub variable_modes: Vec<ModeOp>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub variables: Vec<VariableOp>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub variable_mode_values: Vec<ModeValueOp>,
}

/// Blocking HTTP client for the variables API.
#[derive(Debug)]
pub struct DesignToolClient {
    http: reqwest::blocking::Client,
    base_url: String,
    file_key: String,
    token: String,
}

impl DesignToolClient {
    pub fn new(
        base_url: impl Into<String>,
        file_key: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        DesignToolClient {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            file_key: file_key.into(),
            token: token.into(),
        }
    }

    fn url(&self, tail: &str) -> String {
        format!(
            "{}/v1/files/{}/{tail}",
            self.base_url.trim_end_matches('/'),
            self.file_key
        )
    }

    /// Fetches the current remote variables document.
    pub fn fetch_variables(&self) -> Result<RemoteVariablesDoc, RemoteError> {
        tracing::debug!(file_key = %self.file_key, "fetching remote variables");
        let response = self
            .http
            .get(self.url("variables/local"))
            .header(AUTH_HEADER, &self.token)
            .send()?;
        Ok(Self::checked(response)?.json()?)
    }

    /// Posts one batch of variable operations.
    pub fn push_variables(&self, payload: &VariablesPayload) -> Result<(), RemoteError> {
        tracing::debug!(
            collections = payload.variable_collections.len(),
            variables = payload.variables.len(),
            "pushing variable operations"
        );
        let response = self
            .http
            .post(self.url("variables"))
            .header(AUTH_HEADER, &self.token)
            .json(payload)
            .send()?;
        Self::checked(response)?;
        Ok(())
    }

    fn checked(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            })
        }
    }
}
