//! Relationship vocabulary recognised in search queries.
//!
//! Matching is plain lower-case substring containment. Table order decides
//! which type wins when terms for several types appear, so a query
//! containing "grandfather" also contains "father" and resolves to
//! `parent`.

use famface_core::RelationshipType;

/// Phrases that name specific people rather than relationship terms.
/// They are resolved by exact (case-insensitive) name match.
pub const NAMED_RELATIVES: &[&str] = &["bade papa", "bade mummy"];

/// Relationship types with the words that refer to them, in resolution
/// order.
pub const RELATION_TERMS: &[(RelationshipType, &[&str])] = &[
    (
        RelationshipType::Parent,
        &["father", "mother", "dad", "mom", "parent"],
    ),
    (RelationshipType::Child, &["son", "daughter", "child"]),
    (RelationshipType::Sibling, &["brother", "sister", "sibling"]),
    (RelationshipType::Spouse, &["husband", "wife", "spouse"]),
    (
        RelationshipType::Grandparent,
        &[
            "grandfather",
            "grandmother",
            "grandparent",
            "bade papa",
            "bade mummy",
        ],
    ),
    (
        RelationshipType::Grandchild,
        &["grandson", "granddaughter", "grandchild"],
    ),
    (RelationshipType::UncleAunt, &["uncle", "aunt"]),
    (RelationshipType::NephewNiece, &["nephew", "niece"]),
    (RelationshipType::Cousin, &["cousin"]),
];

/// Every vocabulary term contained in the lower-cased query, in table
/// order and without duplicates.
pub fn contained_terms(query_lower: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();
    for (_, terms) in RELATION_TERMS {
        for term in terms.iter() {
            if query_lower.contains(term) && !found.contains(term) {
                found.push(*term);
            }
        }
    }
    found
}

/// The first relationship type, in table order, with a term among `found`.
pub fn resolve_type(found: &[&str]) -> Option<RelationshipType> {
    RELATION_TERMS
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| found.contains(term)))
        .map(|(relationship_type, _)| *relationship_type)
}

/// The named-relative phrase contained in the query, if any.
pub fn named_relative(query_lower: &str) -> Option<&'static str> {
    NAMED_RELATIVES
        .iter()
        .copied()
        .find(|phrase| query_lower.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contained_terms_substring() {
        let terms = contained_terms("anjali's grandfather");
        assert!(terms.contains(&"father"));
        assert!(terms.contains(&"grandfather"));
    }

    #[test]
    fn test_resolve_type_prefers_table_order() {
        let terms = contained_terms("anjali's grandfather");
        assert_eq!(resolve_type(&terms), Some(RelationshipType::Parent));
    }

    #[test]
    fn test_resolve_type_cousin() {
        let terms = contained_terms("maya cousin photos");
        assert_eq!(resolve_type(&terms), Some(RelationshipType::Cousin));
    }

    #[test]
    fn test_resolve_type_none() {
        assert_eq!(resolve_type(&contained_terms("beach trip")), None);
    }

    #[test]
    fn test_named_relative() {
        assert_eq!(named_relative("anjali with bade papa"), Some("bade papa"));
        assert_eq!(named_relative("bade mummy"), Some("bade mummy"));
        assert_eq!(named_relative("papa"), None);
    }

    #[test]
    fn test_every_type_with_terms_has_distinct_entry() {
        let mut seen = Vec::new();
        for (t, terms) in RELATION_TERMS {
            assert!(!terms.is_empty());
            assert!(!seen.contains(t));
            seen.push(*t);
        }
    }
}
