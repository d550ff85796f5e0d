use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::services::usage_service::UsageService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub usage: UsageService,
}

/// Whether a usage row came from a primary term-match query or a
/// relation-match query (term used as the predicate itself).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Primary,
    Relation,
}

/// One normalized usage of a term, as reported by a remote endpoint.
///
/// Curators mostly need the subject uri and label, but the extra context
/// fields are kept when the endpoint supplies them. Only `uri`,
/// `query_kind` and `source_endpoint` are guaranteed to be populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermUsage {
    pub uri: String,
    pub label: Option<String>,
    pub category: Option<String>,
    pub predicate: Option<String>,
    pub graph: Option<String>,
    pub notes: Option<String>,
    pub axiom_type: Option<String>,
    pub query_kind: QueryKind,
    pub source_endpoint: String,
}

/// Aggregated usages for one term, broken down by service name.
///
/// A service key mapping to an empty vec means "queried, zero matches";
/// an absent key means that service was not queried at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub term: String,
    pub limit: u32,
    pub usages: IndexMap<String, Vec<TermUsage>>,
}

/// Discovery view of one catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceMetadata {
    pub endpoint: String,
    pub query_template: String,
    pub relation_query_templates: Vec<String>,
    pub category: String,
    pub description: String,
}

/// Discovery view of the whole catalog, returned by `/metadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceMetadataCollection {
    pub services: IndexMap<String, ServiceMetadata>,
}
