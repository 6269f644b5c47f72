//! Caller-supplied practitioner identifier sets.

use std::collections::HashSet;

/// A deduplicated set of practitioner identifiers, in first-seen order.
///
/// Identifiers are taken as given; nothing here checks that a practitioner exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PractitionerIds(Vec<String>);

impl PractitionerIds {
    pub fn new(ids: Vec<String>) -> Self {
        let mut seen = HashSet::with_capacity(ids.len());
        let unique = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self(unique)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for PractitionerIds {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_collapsed_in_order() {
        let ids = PractitionerIds::new(vec!["a".into(), "a".into(), "b".into()]);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.as_slice(), ["a", "b"]);
    }

    #[test]
    fn test_empty_set() {
        let ids = PractitionerIds::new(Vec::new());
        assert!(ids.is_empty());
        assert_eq!(ids.len(), 0);
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let ids = PractitionerIds::from(vec!["PR1".to_string(), "pr1".to_string()]);
        assert_eq!(ids.len(), 2);
    }
}
