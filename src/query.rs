use crate::errors::{UsageError, UsageResult};

/// Placeholder every catalog template must contain exactly where the
/// queried term's URI is substituted.
pub const TERM_URI_PLACEHOLDER: &str = "{term_uri}";

/// Render a catalog query template for one term, capping the result size.
///
/// Templates are static catalog data, not user input; a template without
/// the substitution point is a catalog defect.
pub fn render(template: &str, term_uri: &str, limit: u32) -> UsageResult<String> {
    if !template.contains(TERM_URI_PLACEHOLDER) {
        return Err(UsageError::TemplateRender(format!(
            "template is missing the {} substitution point",
            TERM_URI_PLACEHOLDER
        )));
    }

    let query = template.replace(TERM_URI_PLACEHOLDER, term_uri);
    Ok(format!("{}\nLIMIT {}", query.trim_end(), limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_term_uri() {
        let q = render(
            "SELECT ?uri WHERE { ?uri ?p <{term_uri}> }",
            "http://purl.obolibrary.org/obo/GO_0006915",
            30,
        )
        .unwrap();
        assert!(q.contains("<http://purl.obolibrary.org/obo/GO_0006915>"));
        assert!(!q.contains(TERM_URI_PLACEHOLDER));
    }

    #[test]
    fn test_appends_limit_clause() {
        let q = render("SELECT ?uri WHERE { ?uri ?p <{term_uri}> }", "http://x/y", 5).unwrap();
        assert!(q.ends_with("LIMIT 5"));
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let result = render("SELECT ?uri WHERE { ?uri ?p ?o }", "http://x/y", 30);
        assert!(matches!(result, Err(UsageError::TemplateRender(_))));
    }
}
