use indexmap::IndexMap;

use crate::errors::{UsageError, UsageResult};
use crate::models::{ServiceMetadata, ServiceMetadataCollection};

/// Ontobee stores imported ontologies with relaxed logical definitions,
/// so term usage shows up as `X subClassOf (R some TERM)` restrictions.
const ONTOBEE_USAGE_QUERY: &str = "\
SELECT ?uri ?label ?predicate WHERE {
  ?uri <http://www.w3.org/2000/01/rdf-schema#subClassOf> ?restr .
  ?uri rdfs:label ?label .
  ?restr <http://www.w3.org/2002/07/owl#onProperty> ?predicate .
  ?restr <http://www.w3.org/2002/07/owl#someValuesFrom> <{term_uri}>
}";

/// Relation usage on ontobee: the term is the property inside the
/// restriction rather than its filler.
const ONTOBEE_RELATION_QUERY: &str = "\
SELECT ?uri ?label WHERE {
  ?uri <http://www.w3.org/2000/01/rdf-schema#subClassOf> ?restr .
  ?uri rdfs:label ?label .
  ?restr <http://www.w3.org/2002/07/owl#onProperty> <{term_uri}>
}";

/// Ubergraph queries are pinned to the nonredundant named graph; the full
/// closure includes inferred edges that read as false-positive usages.
const UBERGRAPH_USAGE_QUERY: &str = "\
SELECT ?uri ?label ?predicate ?graph WHERE {
  GRAPH ?graph {
    ?uri ?predicate <{term_uri}>
  }
  ?uri rdfs:label ?label .
  FILTER(?graph = <http://reasoner.renci.org/nonredundant>)
}";

const UBERGRAPH_RELATION_QUERY: &str = "\
SELECT ?uri ?label ?graph WHERE {
  GRAPH ?graph {
    ?uri <{term_uri}> ?filler
  }
  ?uri rdfs:label ?label .
  FILTER(?graph = <http://reasoner.renci.org/nonredundant>)
}";

const UNIPROT_USAGE_QUERY: &str = "\
PREFIX up: <http://purl.uniprot.org/core/>
SELECT ?uri ?label WHERE {
  ?uri a up:Protein .
  ?uri up:classifiedWith <{term_uri}> .
  OPTIONAL { ?uri up:mnemonic ?label }
}";

const GOCAM_USAGE_QUERY: &str = "\
SELECT ?uri ?label ?predicate ?graph WHERE {
  GRAPH ?graph {
    ?uri ?predicate <{term_uri}>
  }
  OPTIONAL { ?uri rdfs:label ?label }
}";

/// One remote SPARQL endpoint and the query templates used against it.
///
/// `relation_query_templates` may be empty, meaning the service only
/// supports primary term lookups.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub name: String,
    pub endpoint: String,
    pub query_template: String,
    pub relation_query_templates: Vec<String>,
    pub category: String,
    pub description: String,
}

/// Static registry of the remote endpoints this service federates over.
///
/// Built once at startup and shared read-only by every request; iteration
/// order is the fixed catalog order.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: IndexMap<String, ServiceDescriptor>,
}

impl ServiceCatalog {
    pub fn new(descriptors: Vec<ServiceDescriptor>) -> Self {
        let services = descriptors
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self { services }
    }

    /// The hand-curated production catalog.
    pub fn default_catalog() -> Self {
        Self::new(vec![
            ServiceDescriptor {
                name: "ontobee".to_string(),
                endpoint: "http://sparql.hegroup.org/sparql".to_string(),
                query_template: ONTOBEE_USAGE_QUERY.to_string(),
                relation_query_templates: vec![ONTOBEE_RELATION_QUERY.to_string()],
                category: "ontology".to_string(),
                description: "Usage in logical definitions across OBO ontologies, \
                              assuming the relaxation pattern (X subClassOf R some TERM)"
                    .to_string(),
            },
            ServiceDescriptor {
                name: "ubergraph".to_string(),
                endpoint: "https://stars-app.renci.org/ubergraph/sparql".to_string(),
                query_template: UBERGRAPH_USAGE_QUERY.to_string(),
                relation_query_templates: vec![UBERGRAPH_RELATION_QUERY.to_string()],
                category: "ontology".to_string(),
                description: "Usage in the ubergraph subsumption graph, restricted to \
                              the nonredundant subgraph to exclude inferred edges"
                    .to_string(),
            },
            ServiceDescriptor {
                name: "uniprot".to_string(),
                endpoint: "https://sparql.uniprot.org/sparql".to_string(),
                query_template: UNIPROT_USAGE_QUERY.to_string(),
                relation_query_templates: Vec::new(),
                category: "protein_annotation".to_string(),
                description: "Proteins annotated with the term in UniProt".to_string(),
            },
            ServiceDescriptor {
                name: "gocam".to_string(),
                endpoint: "http://rdf.geneontology.org/blazegraph/sparql".to_string(),
                query_template: GOCAM_USAGE_QUERY.to_string(),
                relation_query_templates: Vec::new(),
                category: "model".to_string(),
                description: "Usage in GO-CAM model instances".to_string(),
            },
        ])
    }

    pub fn get(&self, name: &str) -> UsageResult<&ServiceDescriptor> {
        self.services
            .get(name)
            .ok_or_else(|| UsageError::UnknownService(name.to_string()))
    }

    /// Service names in fixed catalog order.
    pub fn names(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Read-only projection for the discovery endpoint.
    pub fn metadata(&self) -> ServiceMetadataCollection {
        let services = self
            .services
            .values()
            .map(|d| {
                (
                    d.name.clone(),
                    ServiceMetadata {
                        endpoint: d.endpoint.clone(),
                        query_template: d.query_template.clone(),
                        relation_query_templates: d.relation_query_templates.clone(),
                        category: d.category.clone(),
                        description: d.description.clone(),
                    },
                )
            })
            .collect();
        ServiceMetadataCollection { services }
    }
}
