//! Field allow-list validation.

use strsim::levenshtein;

use crate::filter::{FilterClause, FilterError, FilterResult};

/// Maximum Levenshtein distance to consider a field name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Checks every clause field against the resource's allow-list.
///
/// The first clause whose field is not allowed aborts validation; disallowed
/// clauses are never dropped silently.
///
/// # Errors
///
/// Returns `FilterError::DisallowedField` naming the rejected field, with the
/// closest allowed name as a suggestion when one is near enough.
///
/// # Example
///
/// ```
/// use aphfilter::{validate, Dialect, FilterError, FilterParser};
///
/// let clauses = FilterParser::parse("nmae==bob", Dialect::postgres()).unwrap();
/// let err = validate(&clauses, &["name", "age"]).unwrap_err();
/// assert_eq!(err, FilterError::disallowed_field("nmae", Some("name".to_string())));
/// ```
pub fn validate<S: AsRef<str>>(clauses: &[FilterClause], allowed: &[S]) -> FilterResult<()> {
    for clause in clauses {
        if !allowed.iter().any(|f| f.as_ref() == clause.field) {
            let suggestion = find_similar_name(&clause.field, allowed.iter().map(AsRef::as_ref));
            return Err(FilterError::disallowed_field(&clause.field, suggestion));
        }
    }
    Ok(())
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    // Field names are case-sensitive, so a case-only difference is still worth suggesting.
    if best_match != query && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Operator;

    fn clause(field: &str) -> FilterClause {
        FilterClause::new(field, Operator::Equal, "1")
    }

    #[test]
    fn test_all_allowed() {
        let clauses = vec![clause("name"), clause("age")];
        assert!(validate(&clauses, &["age", "name"]).is_ok());
    }

    #[test]
    fn test_empty_clauses_always_valid() {
        let allowed: [&str; 0] = [];
        assert!(validate(&[], &allowed).is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        let clauses = vec![clause("name"), clause("password"), clause("token")];
        let err = validate(&clauses, &["name"]).unwrap_err();
        assert_eq!(err, FilterError::disallowed_field("password", None));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let clauses = vec![clause("name"), clause("secret")];
        let allowed = vec!["name".to_string()];
        assert_eq!(validate(&clauses, &allowed), validate(&clauses, &allowed));
    }

    #[test]
    fn test_suggestion_within_distance() {
        let err = validate(&[clause("agee")], &["age", "name"]).unwrap_err();
        assert_eq!(err, FilterError::disallowed_field("agee", Some("age".to_string())));
    }

    #[test]
    fn test_case_only_difference_suggested() {
        let err = validate(&[clause("Name")], &["name"]).unwrap_err();
        assert_eq!(err, FilterError::disallowed_field("Name", Some("name".to_string())));
    }

    #[test]
    fn test_no_suggestion_when_far() {
        assert_eq!(find_similar_name("description", ["age", "name"].into_iter()), None);
        assert_eq!(find_similar_name("x", std::iter::empty()), None);
    }
}
