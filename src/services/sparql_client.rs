use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::ServiceDescriptor;
use crate::errors::{UsageError, UsageResult};
use crate::models::{QueryKind, TermUsage};

/// SPARQL 1.1 JSON results, `{"results": {"bindings": [...]}}`.
/// Anything else coming back from an endpoint is a decode failure.
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Client for issuing rendered queries against remote SPARQL endpoints.
#[derive(Clone)]
pub struct SparqlClient {
    client: Client,
}

impl SparqlClient {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");
        Self { client }
    }

    /// Run one query against one endpoint and normalize every result row.
    ///
    /// Row order from the endpoint is preserved. Failures carry the
    /// service name so the caller can report which dependency broke.
    pub async fn execute(
        &self,
        service: &ServiceDescriptor,
        query_text: &str,
        query_kind: QueryKind,
    ) -> UsageResult<Vec<TermUsage>> {
        debug!("🔍 [{}] SPARQL query:\n{}", service.name, query_text);

        let response = self
            .client
            .get(&service.endpoint)
            .query(&[("query", query_text), ("format", "json")])
            .header("Accept", "application/sparql-results+json")
            .send()
            .await
            .map_err(|e| UsageError::RemoteQuery {
                service: service.name.clone(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UsageError::RemoteQuery {
                service: service.name.clone(),
                cause: format!("endpoint returned {}: {}", status, body),
            });
        }

        let decoded: SparqlResponse =
            response
                .json()
                .await
                .map_err(|e| UsageError::RemoteQuery {
                    service: service.name.clone(),
                    cause: format!("malformed SPARQL JSON response: {}", e),
                })?;

        let usages = decoded
            .results
            .bindings
            .into_iter()
            .map(|row| row_to_usage(row, service, query_kind))
            .collect::<UsageResult<Vec<_>>>()?;

        info!(
            "📥 [{}] {} {:?} usage rows",
            service.name,
            usages.len(),
            query_kind
        );
        Ok(usages)
    }
}

/// Map one decoded binding row onto a usage record.
///
/// Recognized columns go to their fields, unrecognized ones are ignored,
/// missing ones stay unset. A row without a `uri` binding is malformed.
fn row_to_usage(
    mut row: HashMap<String, SparqlTerm>,
    service: &ServiceDescriptor,
    query_kind: QueryKind,
) -> UsageResult<TermUsage> {
    let uri = row
        .remove("uri")
        .ok_or_else(|| UsageError::RemoteQuery {
            service: service.name.clone(),
            cause: "result row is missing the 'uri' binding".to_string(),
        })?
        .value;

    Ok(TermUsage {
        uri,
        label: row.remove("label").map(|t| t.value),
        category: Some(service.category.clone()),
        predicate: row.remove("predicate").map(|t| t.value),
        graph: row.remove("graph").map(|t| t.value),
        notes: row.remove("notes").map(|t| t.value),
        axiom_type: row.remove("axiom_type").map(|t| t.value),
        query_kind,
        source_endpoint: service.endpoint.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor {
            name: "ubergraph".to_string(),
            endpoint: "https://stars-app.renci.org/ubergraph/sparql".to_string(),
            query_template: "SELECT ?uri WHERE { ?uri ?p <{term_uri}> }".to_string(),
            relation_query_templates: Vec::new(),
            category: "ontology".to_string(),
            description: "test".to_string(),
        }
    }

    fn term(value: &str) -> SparqlTerm {
        SparqlTerm {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_row_maps_recognized_columns() {
        let mut row = HashMap::new();
        row.insert("uri".to_string(), term("http://purl.obolibrary.org/obo/GO_0043065"));
        row.insert("label".to_string(), term("positive regulation of apoptotic process"));
        row.insert("predicate".to_string(), term("http://purl.obolibrary.org/obo/RO_0002213"));
        row.insert("graph".to_string(), term("http://reasoner.renci.org/nonredundant"));

        let usage = row_to_usage(row, &descriptor(), QueryKind::Primary).unwrap();
        assert_eq!(usage.uri, "http://purl.obolibrary.org/obo/GO_0043065");
        assert_eq!(
            usage.label.as_deref(),
            Some("positive regulation of apoptotic process")
        );
        assert_eq!(usage.predicate.as_deref(), Some("http://purl.obolibrary.org/obo/RO_0002213"));
        assert_eq!(usage.graph.as_deref(), Some("http://reasoner.renci.org/nonredundant"));
        assert_eq!(usage.query_kind, QueryKind::Primary);
        assert_eq!(usage.source_endpoint, descriptor().endpoint);
        assert_eq!(usage.category.as_deref(), Some("ontology"));
    }

    #[test]
    fn test_row_with_only_uri_is_valid() {
        let mut row = HashMap::new();
        row.insert("uri".to_string(), term("http://example.org/x"));

        let usage = row_to_usage(row, &descriptor(), QueryKind::Relation).unwrap();
        assert!(usage.label.is_none());
        assert!(usage.axiom_type.is_none());
        assert_eq!(usage.query_kind, QueryKind::Relation);
    }

    #[test]
    fn test_unrecognized_columns_are_ignored() {
        let mut row = HashMap::new();
        row.insert("uri".to_string(), term("http://example.org/x"));
        row.insert("score".to_string(), term("0.92"));

        let usage = row_to_usage(row, &descriptor(), QueryKind::Primary).unwrap();
        assert_eq!(usage.uri, "http://example.org/x");
        assert!(usage.notes.is_none());
    }

    #[test]
    fn test_row_without_uri_is_malformed() {
        let mut row = HashMap::new();
        row.insert("label".to_string(), term("orphan label"));

        let result = row_to_usage(row, &descriptor(), QueryKind::Primary);
        assert!(matches!(
            result,
            Err(UsageError::RemoteQuery { service, .. }) if service == "ubergraph"
        ));
    }

    #[test]
    fn test_sparql_json_shape_decodes() {
        let body = serde_json::json!({
            "head": { "vars": ["uri", "label"] },
            "results": {
                "bindings": [
                    { "uri": { "type": "uri", "value": "http://example.org/a" },
                      "label": { "type": "literal", "value": "a" } },
                    { "uri": { "type": "uri", "value": "http://example.org/b" } }
                ]
            }
        });

        let decoded: SparqlResponse = serde_json::from_value(body).unwrap();
        assert_eq!(decoded.results.bindings.len(), 2);
        assert_eq!(decoded.results.bindings[0]["uri"].value, "http://example.org/a");
    }

    #[test]
    fn test_other_shapes_fail_to_decode() {
        let body = serde_json::json!({ "rows": [] });
        assert!(serde_json::from_value::<SparqlResponse>(body).is_err());
    }
}
