//! Insertion-ordered metadata attached to barcodes and attributes.

/// A metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetadataValue {
    Text(String),
    /// Ordered (AI, value) pairs.
    Fields(Vec<(String, String)>),
}

impl MetadataValue {
    /// Returns the text value, if this is a text entry.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            MetadataValue::Fields(_) => None,
        }
    }

    /// Returns the pairs, if this is a field list.
    pub fn as_fields(&self) -> Option<&[(String, String)]> {
        match self {
            MetadataValue::Fields(fields) => Some(fields),
            MetadataValue::Text(_) => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Text(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Text(s)
    }
}

/// Key-value metadata that keeps keys in insertion order.
///
/// Re-inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    entries: Vec<(String, MetadataValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Shortcut for text entries.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetadataValue::as_text)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
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
    fn test_insertion_order_and_replace() {
        let mut meta = Metadata::new();
        meta.insert("raw", "]C110A");
        meta.insert("standard", "GS1");
        let previous = meta.insert("raw", "]C110B");

        assert_eq!(previous, Some(MetadataValue::Text("]C110A".to_string())));
        let keys: Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["raw", "standard"]);
        assert_eq!(meta.get_text("raw"), Some("]C110B"));
    }

    #[test]
    fn test_remove() {
        let mut meta = Metadata::new();
        meta.insert("format", "png");
        assert!(meta.contains_key("format"));
        assert!(meta.remove("format").is_some());
        assert!(meta.remove("format").is_none());
        assert!(meta.is_empty());
    }
}
