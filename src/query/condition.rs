//! Attribute conditions: "attribute equals one of these values".

use indexmap::IndexMap;

/// Value side of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    Absent,
    One(String),
    Many(Vec<String>),
}

/// A string is blank when it is empty or only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ConditionValue {
    /// Absent, a blank string, or a list with no non-blank entry.
    pub fn is_blank(&self) -> bool {
        self.values().is_empty()
    }

    /// Non-blank values in the order they were supplied.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ConditionValue::Absent => Vec::new(),
            ConditionValue::One(value) => {
                if is_blank(value) {
                    Vec::new()
                } else {
                    vec![value.as_str()]
                }
            }
            ConditionValue::Many(values) => {
                values.iter().map(String::as_str).filter(|v| !is_blank(v)).collect()
            }
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::One(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::One(value)
    }
}

impl From<Vec<String>> for ConditionValue {
    fn from(values: Vec<String>) -> Self {
        ConditionValue::Many(values)
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(values: Vec<&str>) -> Self {
        ConditionValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ConditionValue {
    fn from(values: [&str; N]) -> Self {
        ConditionValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<T: Into<ConditionValue>> From<Option<T>> for ConditionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConditionValue::Absent, Into::into)
    }
}

/// Ordered set of conditions; rendering follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    entries: IndexMap<String, ConditionValue>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Conditions::insert`].
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Set the condition for `attribute`, replacing any previous one in place.
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<ConditionValue>) {
        self.entries.insert(attribute.into(), value.into());
    }

    /// Add one more accepted value for `attribute`, turning it into a list if needed.
    pub fn push_value(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let entry = self.entries.entry(attribute.into()).or_insert(ConditionValue::Absent);
        *entry = match std::mem::replace(entry, ConditionValue::Absent) {
            ConditionValue::Absent => ConditionValue::One(value),
            ConditionValue::One(existing) => ConditionValue::Many(vec![existing, value]),
            ConditionValue::Many(mut values) => {
                values.push(value);
                ConditionValue::Many(values)
            }
        };
    }

    pub fn get(&self, attribute: &str) -> Option<&ConditionValue> {
        self.entries.get(attribute)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Conditions that still constrain something once blank values are dropped.
    pub fn present(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.iter().filter_map(|(attribute, value)| {
            let values = value.values();
            if values.is_empty() {
                None
            } else {
                Some((attribute, values))
            }
        })
    }
}

impl<K: Into<String>, V: Into<ConditionValue>> FromIterator<(K, V)> for Conditions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut conditions = Conditions::new();
        for (attribute, value) in iter {
            conditions.insert(attribute, value);
        }
        conditions
    }
}
