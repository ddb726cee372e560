use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Caller-chosen column header for each procedure parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnAssignment {
    columns: BTreeMap<String, String>,
}

impl ColumnAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, parameter: impl Into<String>, column: impl Into<String>) {
        self.columns.insert(parameter.into(), column.into());
    }

    #[must_use]
    pub fn with(mut self, parameter: impl Into<String>, column: impl Into<String>) -> Self {
        self.assign(parameter, column);
        self
    }

    pub fn column_for(&self, parameter: &str) -> Option<&str> {
        self.columns.get(parameter).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(parameter, column)| (parameter.as_str(), column.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for ColumnAssignment {
    fn from_iter<T: IntoIterator<Item = (P, C)>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for (parameter, column) in iter {
            assignment.assign(parameter, column);
        }
        assignment
    }
}

/// Parameter name to column position, resolved once per run.
///
/// Entries keep the procedure's parameter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, usize)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parameter: impl Into<String>, index: usize) {
        let parameter = parameter.into();
        match self.entries.iter_mut().find(|(name, _)| *name == parameter) {
            Some(entry) => entry.1 = index,
            None => self.entries.push((parameter, index)),
        }
    }

    pub fn index_of(&self, parameter: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == parameter)
            .map(|(_, index)| *index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(parameter, index)| (parameter.as_str(), *index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_keeps_insertion_order() {
        let mut mapping = ColumnMapping::new();
        mapping.insert("item", 3);
        mapping.insert("qty", 0);
        mapping.insert("item", 1);
        assert_eq!(mapping.iter().collect::<Vec<_>>(), [("item", 1), ("qty", 0)]);
        assert_eq!(mapping.index_of("qty"), Some(0));
        assert_eq!(mapping.index_of("cost"), None);
    }

    #[test]
    fn assignment_collects_pairs() {
        let assignment: ColumnAssignment = [("item", "Item Number"), ("qty", "Qty")]
            .into_iter()
            .collect();
        assert_eq!(assignment.column_for("item"), Some("Item Number"));
        assert_eq!(assignment.len(), 2);
    }
}
