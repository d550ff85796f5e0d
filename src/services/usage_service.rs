use std::sync::Arc;

use futures::future::try_join_all;
use indexmap::IndexMap;
use tracing::info;

use crate::catalog::{ServiceCatalog, ServiceDescriptor};
use crate::errors::UsageResult;
use crate::models::{QueryKind, ResultSet, TermUsage};
use crate::query;
use crate::services::sparql_client::SparqlClient;
use crate::term::term_to_uri;

/// Orchestration facade: fans a term lookup out over the catalog and
/// folds the per-service answers into one ResultSet.
#[derive(Clone)]
pub struct UsageService {
    catalog: Arc<ServiceCatalog>,
    sparql: SparqlClient,
    default_limit: u32,
}

impl UsageService {
    pub fn new(catalog: Arc<ServiceCatalog>, sparql: SparqlClient, default_limit: u32) -> Self {
        Self {
            catalog,
            sparql,
            default_limit,
        }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Find all usages of a term across the selected services.
    ///
    /// `services` narrows the catalog (an unknown name fails the whole
    /// call), `limit` caps rows per query (default 30). Services are
    /// queried concurrently but the result keeps catalog order, and one
    /// failing endpoint fails the whole request.
    pub async fn term_usage(
        &self,
        term: &str,
        services: Option<&[String]>,
        limit: Option<u32>,
    ) -> UsageResult<ResultSet> {
        let term_uri = term_to_uri(term)?;
        let limit = limit.unwrap_or(self.default_limit);

        let names: Vec<String> = match services {
            Some(subset) => subset.to_vec(),
            None => self.catalog.names(),
        };

        // Resolve every descriptor up front so an unknown service name
        // aborts before any remote query is issued.
        let descriptors: Vec<&ServiceDescriptor> = names
            .iter()
            .map(|name| self.catalog.get(name))
            .collect::<UsageResult<_>>()?;

        info!(
            "🌐 Federating usage lookup for {} across {} services (limit={})",
            term_uri,
            descriptors.len(),
            limit
        );

        let per_service = descriptors
            .iter()
            .map(|service| self.query_service(service, &term_uri, limit));
        let results = try_join_all(per_service).await?;

        let usages: IndexMap<String, Vec<TermUsage>> =
            names.into_iter().zip(results).collect();

        Ok(ResultSet {
            term: term_uri,
            limit,
            usages,
        })
    }

    /// Usages from a single named service.
    pub async fn term_usage_for(
        &self,
        service_name: &str,
        term: &str,
        limit: Option<u32>,
    ) -> UsageResult<Vec<TermUsage>> {
        let mut result_set = self
            .term_usage(term, Some(&[service_name.to_string()]), limit)
            .await?;
        Ok(result_set
            .usages
            .shift_remove(service_name)
            .unwrap_or_default())
    }

    /// Primary query first, then each relation query in template order;
    /// records are concatenated in execution order.
    async fn query_service(
        &self,
        service: &ServiceDescriptor,
        term_uri: &str,
        limit: u32,
    ) -> UsageResult<Vec<TermUsage>> {
        let primary = query::render(&service.query_template, term_uri, limit)?;
        let mut usages = self
            .sparql
            .execute(service, &primary, QueryKind::Primary)
            .await?;

        for template in &service.relation_query_templates {
            let relation = query::render(template, term_uri, limit)?;
            let rows = self
                .sparql
                .execute(service, &relation, QueryKind::Relation)
                .await?;
            usages.extend(rows);
        }

        Ok(usages)
    }
}
