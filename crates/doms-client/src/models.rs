//! Data models for the DOMS client

use serde::{Deserialize, Serialize};

/// Checksum algorithm applied to a datastream by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecksumType {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "DISABLED")]
    Disabled,
}

/// Lifecycle state of a repository object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectState {
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "I")]
    Inactive,
    #[serde(rename = "D")]
    Deleted,
}

impl ObjectState {
    /// The single-letter state code used by the repository
    pub fn code(&self) -> &'static str {
        match self {
            ObjectState::Active => "A",
            ObjectState::Inactive => "I",
            ObjectState::Deleted => "D",
        }
    }
}

/// Response from the PID generator service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PidResponse {
    pub pid: String,
}

/// Request to clone a template object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneTemplateRequest {
    /// PID allocated for the new object
    pub pid: String,
    /// Identifiers the new object is known by in the source system
    #[serde(default)]
    pub old_identifiers: Vec<String>,
    pub log_message: String,
}

/// Request to change an object's display label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyLabelRequest {
    pub label: String,
    pub log_message: String,
}

/// Request to replace a datastream's content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyDatastreamRequest {
    pub mime_type: String,
    pub checksum_type: ChecksumType,
    /// Precomputed checksum; the repository computes one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// Datastream content, base64-encoded for transport
    pub content: String,
    #[serde(default)]
    pub alt_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_uri: Option<String>,
    pub log_message: String,
}

/// Request to add a relation to an object's RELS-EXT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRelationRequest {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Whether `object` is a literal value rather than a resource URI
    #[serde(default)]
    pub literal: bool,
    pub log_message: String,
}

/// Request to change an object's lifecycle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyStateRequest {
    pub state: ObjectState,
    pub log_message: String,
}
