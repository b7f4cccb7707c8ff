use indexmap::IndexMap;
use serde::Serialize;

use super::error::FormError;

/// One submitted entry: field name to entered value.
pub type Record = IndexMap<String, String>;

/// Submitted records per form type. Types keep the position of their first
/// submission even after their list is emptied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionStore {
    entries: IndexMap<String, Vec<Record>>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` and returns its index.
    pub fn append(&mut self, form_type: &str, record: Record) -> usize {
        let records = self.entries.entry(form_type.to_string()).or_default();
        records.push(record);
        records.len() - 1
    }

    /// Overwrites the record at `index`, returning the previous one.
    pub fn replace(
        &mut self,
        form_type: &str,
        index: usize,
        record: Record,
    ) -> Result<Record, FormError> {
        let slot = self
            .entries
            .get_mut(form_type)
            .and_then(|records| records.get_mut(index))
            .ok_or_else(|| not_found(form_type, index))?;
        Ok(std::mem::replace(slot, record))
    }

    /// Removes the record at `index`; later records shift down by one.
    pub fn remove(&mut self, form_type: &str, index: usize) -> Result<Record, FormError> {
        match self.entries.get_mut(form_type) {
            Some(records) if index < records.len() => Ok(records.remove(index)),
            _ => Err(not_found(form_type, index)),
        }
    }

    pub fn get(&self, form_type: &str, index: usize) -> Option<&Record> {
        self.entries.get(form_type)?.get(index)
    }

    pub fn records(&self, form_type: &str) -> &[Record] {
        self.entries
            .get(form_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains_type(&self, form_type: &str) -> bool {
        self.entries.contains_key(form_type)
    }

    /// Types with at least one record, in first-submission order.
    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.entries
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn not_found(form_type: &str, index: usize) -> FormError {
    FormError::RecordNotFound {
        form_type: form_type.to_string(),
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn remove_shifts_later_records_down() {
        let mut store = SubmissionStore::new();
        for name in ["a", "b", "c"] {
            store.append("T", record(&[("name", name)]));
        }
        let removed = store.remove("T", 1).expect("remove b");
        assert_eq!(removed["name"], "b");
        let names: Vec<_> = store
            .records("T")
            .iter()
            .map(|record| record["name"].as_str())
            .collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn emptied_type_keeps_position_but_is_not_listed() {
        let mut store = SubmissionStore::new();
        store.append("First", record(&[("x", "1")]));
        store.append("Second", record(&[("y", "2")]));
        store.remove("First", 0).expect("remove");
        assert!(store.contains_type("First"));
        let listed: Vec<_> = store.non_empty().map(|(name, _)| name).collect();
        assert_eq!(listed, ["Second"]);

        store.append("First", record(&[("x", "3")]));
        let listed: Vec<_> = store.non_empty().map(|(name, _)| name).collect();
        assert_eq!(listed, ["First", "Second"]);
    }

    #[test]
    fn replace_out_of_range_is_an_error() {
        let mut store = SubmissionStore::new();
        store.append("T", record(&[("x", "1")]));
        let err = store
            .replace("T", 3, record(&[("x", "2")]))
            .expect_err("index 3 does not exist");
        assert_eq!(
            err,
            FormError::RecordNotFound {
                form_type: "T".into(),
                index: 3
            }
        );
        assert_eq!(store.records("T"), [record(&[("x", "1")])]);
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let mut store = SubmissionStore::new();
        store.append("T", record(&[("x", "1")]));
        let value = serde_json::to_value(&store).expect("serialize");
        assert_eq!(value, serde_json::json!({"T": [{"x": "1"}]}));
    }
}
