//! Ordered query parameters
//!
//! List values are flattened with the bracket convention the exchange expects
//! for arrays: `key[]=a&key[]=b`.

/// A single query value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

/// Query parameters in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar value; re-setting a key keeps its original position
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.set(key.into(), QueryValue::Scalar(value.to_string()));
    }

    /// Set a list value
    pub fn insert_list<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.set(key.into(), QueryValue::List(values));
    }

    fn set(&mut self, key: String, value: QueryValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Flatten into wire pairs, expanding lists to repeated `key[]` entries
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                QueryValue::Scalar(v) => pairs.push((key.clone(), v.clone())),
                QueryValue::List(values) => {
                    let key = if key.ends_with("[]") {
                        key.clone()
                    } else {
                        format!("{key}[]")
                    };
                    pairs.extend(values.iter().map(|v| (key.clone(), v.clone())));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_kept() {
        let mut q = QueryParams::new();
        q.insert("pair", "B-BTC_USDT");
        q.insert("limit", 30);
        q.insert("pair", "B-ETH_USDT");

        assert_eq!(
            q.to_pairs(),
            vec![
                ("pair".to_string(), "B-ETH_USDT".to_string()),
                ("limit".to_string(), "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_lists_use_bracket_suffix() {
        let mut q = QueryParams::new();
        q.insert_list("margin_currency_short_name", ["USDT", "INR"]);
        assert_eq!(
            q.to_pairs(),
            vec![
                ("margin_currency_short_name[]".to_string(), "USDT".to_string()),
                ("margin_currency_short_name[]".to_string(), "INR".to_string()),
            ]
        );
    }

    #[test]
    fn test_existing_bracket_suffix_not_doubled() {
        let mut q = QueryParams::new();
        q.insert_list("ids[]", ["1"]);
        assert_eq!(q.to_pairs(), vec![("ids[]".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_empty_list_emits_nothing() {
        let mut q = QueryParams::new();
        q.insert_list("ids", Vec::<String>::new());
        assert_eq!(q.len(), 1);
        assert!(q.to_pairs().is_empty());
    }
}
