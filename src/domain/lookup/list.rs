//! Ordered lookup list with sequential local ids.

use super::filter::filter_options;
use super::option::{LookupOption, OptionValue};
use crate::domain::foundation::OptionId;

/// Ordered sequence of options for one field.
///
/// Entries are only ever appended or replaced wholesale; nothing is removed,
/// so selections holding a cloned option stay valid across appends.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupList<T> {
    entries: Vec<LookupOption<T>>,
}

impl<T> Default for LookupList<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: OptionValue> LookupList<T> {
    /// Numbers `values` 1, 2, 3, ... in order.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| LookupOption::new(OptionId::next_for_len(i), value))
            .collect();
        Self { entries }
    }

    /// Keeps the ids already carried by `options`.
    pub fn from_options(options: Vec<LookupOption<T>>) -> Self {
        Self { entries: options }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[LookupOption<T>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LookupOption<T>> {
        self.entries.iter()
    }

    pub fn find_by_id(&self, id: OptionId) -> Option<&LookupOption<T>> {
        self.entries.iter().find(|option| option.id == id)
    }

    pub fn find_by_value(&self, value: &T) -> Option<&LookupOption<T>> {
        self.entries.iter().find(|option| &option.value == value)
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&LookupOption<T>> {
        self.entries.iter().find(|option| predicate(&option.value))
    }

    /// Option for `value` with the next free id, not inserted.
    pub fn placeholder(&self, value: T) -> LookupOption<T> {
        LookupOption::new(OptionId::next_for_len(self.entries.len()), value)
    }

    /// Appends `value` under the next free id and returns the new entry.
    pub fn append(&mut self, value: T) -> LookupOption<T> {
        let option = self.placeholder(value);
        self.entries.push(option.clone());
        option
    }

    /// Replaces the whole list, e.g. when a fetch completes.
    pub fn replace(&mut self, other: LookupList<T>) {
        self.entries = other.entries;
    }

    /// Entries matching `query`, in order.
    pub fn filter(&self, query: &str) -> Vec<&LookupOption<T>> {
        filter_options(&self.entries, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_numbers_from_one() {
        let list = LookupList::from_values(vec!["a".to_string(), "b".to_string()]);
        let ids: Vec<_> = list.iter().map(|o| o.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn append_assigns_length_plus_one() {
        let mut list = LookupList::from_values(vec!["a".to_string(), "b".to_string()]);
        let added = list.append("c".to_string());
        assert_eq!(added.id, OptionId::new(3));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn placeholder_does_not_insert() {
        let list = LookupList::from_values(vec!["a".to_string()]);
        let placeholder = list.placeholder("z".to_string());
        assert_eq!(placeholder.id, OptionId::new(2));
        assert_eq!(list.len(), 1);
        assert!(list.find_by_value(&"z".to_string()).is_none());
    }

    #[test]
    fn from_options_keeps_remote_ids() {
        let list = LookupList::from_options(vec![LookupOption::new(OptionId::new(17), "Tea".to_string())]);
        assert!(list.find_by_id(OptionId::new(17)).is_some());
        assert!(list.find_by_id(OptionId::new(1)).is_none());
    }
}
