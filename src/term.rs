use crate::errors::{UsageError, UsageResult};

/// Convert a term reference into a canonical URI.
///
/// A reference that already carries a scheme marker (`:/`) is returned
/// unchanged, so the function is idempotent. Anything else must be a
/// compact `PREFIX:LOCAL` pair, rewritten onto the OBO PURL namespace.
pub fn term_to_uri(term: &str) -> UsageResult<String> {
    if term.contains(":/") {
        return Ok(term.to_string());
    }

    let mut parts = term.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(local_id), None) if !prefix.is_empty() && !local_id.is_empty() => {
            Ok(format!("http://purl.obolibrary.org/obo/{}_{}", prefix, local_id))
        }
        _ => Err(UsageError::MalformedTerm(term.to_string())),
    }
}
