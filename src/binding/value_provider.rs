//! Raw request values, looked up by form key.
//!
//! Keys follow the usual form naming: `prefix.Property` for properties and
//! `prefix[index]` for collection elements. Lookups are ASCII
//! case-insensitive.

/// Source of submitted string values for the binders.
pub trait ValueProvider {
    /// True if any key equals `prefix` or continues it with `.` or `[`.
    /// The empty prefix matches as soon as there is any value at all.
    fn contains_prefix(&self, prefix: &str) -> bool;

    /// Every value submitted under `key`, in submission order.
    fn get_values(&self, key: &str) -> Vec<&str>;

    /// The first value submitted under `key`. `None` means "not set";
    /// `Some("")` is a set, empty value.
    fn get_value(&self, key: &str) -> Option<&str> {
        self.get_values(key).into_iter().next()
    }

    /// Distinct non-empty bracketed segments directly under `prefix`:
    /// `d[x].Value` and `d[y]` under `d` give `["x", "y"]`. Keys differing
    /// only in ASCII case count once, under their first spelling.
    fn child_keys(&self, prefix: &str) -> Vec<String>;
}

/// Values decoded from an `application/x-www-form-urlencoded` body or query string.
#[derive(Debug, Clone, Default)]
pub struct FormValueProvider {
    pairs: Vec<(String, String)>,
}

impl FormValueProvider {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn from_urlencoded(input: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input)?;
        Ok(Self::new(pairs))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl ValueProvider for FormValueProvider {
    fn contains_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return !self.pairs.is_empty();
        }
        self.pairs.iter().any(|(k, _)| matches_prefix(k, prefix))
    }

    fn get_values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn child_keys(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for child in self.pairs.iter().filter_map(|(k, _)| bracketed_child(k, prefix)) {
            push_distinct(&mut keys, child);
        }
        keys
    }
}

/// Several providers consulted in order; the first one holding a key wins.
#[derive(Default)]
pub struct CompositeValueProvider {
    providers: Vec<Box<dyn ValueProvider>>,
}

impl CompositeValueProvider {
    pub fn new(providers: Vec<Box<dyn ValueProvider>>) -> Self {
        Self { providers }
    }
}

impl ValueProvider for CompositeValueProvider {
    fn contains_prefix(&self, prefix: &str) -> bool {
        self.providers.iter().any(|p| p.contains_prefix(prefix))
    }

    fn get_values(&self, key: &str) -> Vec<&str> {
        self.providers
            .iter()
            .map(|p| p.get_values(key))
            .find(|values| !values.is_empty())
            .unwrap_or_default()
    }

    fn child_keys(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for key in self.providers.iter().flat_map(|p| p.child_keys(prefix)) {
            push_distinct(&mut keys, &key);
        }
        keys
    }
}

fn strip_prefix_ignore_case<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    let head = key.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        key.get(prefix.len()..)
    } else {
        None
    }
}

fn matches_prefix(key: &str, prefix: &str) -> bool {
    match strip_prefix_ignore_case(key, prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

fn bracketed_child<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    let rest = strip_prefix_ignore_case(key, prefix)?.strip_prefix('[')?;
    let end = rest.find(']')?;
    let child = &rest[..end];
    (!child.is_empty()).then_some(child)
}

fn push_distinct(keys: &mut Vec<String>, key: &str) {
    if !keys.iter().any(|seen| seen.eq_ignore_ascii_case(key)) {
        keys.push(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormValueProvider {
        FormValueProvider::new(
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        )
    }

    #[test]
    fn empty_value_is_set() {
        let values = form(&[("[1].Value", "")]);
        assert_eq!(values.get_value("[1].Value"), Some(""));
        assert_eq!(values.get_value("[2].Value"), None);
    }

    #[test]
    fn lookup_ignores_ascii_case_and_keeps_first_value() {
        let values = form(&[("list[0].value", "a"), ("LIST[0].Value", "b")]);
        assert_eq!(values.get_value("list[0].Value"), Some("a"));
        assert_eq!(values.get_values("list[0].Value"), vec!["a", "b"]);
    }

    #[test]
    fn prefix_requires_separator() {
        let values = form(&[("listing", "x"), ("list[0].Value", "a")]);
        assert!(values.contains_prefix("list"));
        assert!(values.contains_prefix("list[0]"));
        assert!(!values.contains_prefix("list[1]"));
        assert!(!values.contains_prefix("lis"));
        assert!(values.contains_prefix(""));
        assert!(!FormValueProvider::default().contains_prefix(""));
    }

    #[test]
    fn child_keys_are_distinct_and_ordered() {
        let values = form(&[
            ("[y].Value", "2"),
            ("[x].Value", "1"),
            ("[y].Other", "3"),
            ("csrf", "t"),
        ]);
        assert_eq!(values.child_keys(""), vec!["y", "x"]);
        assert!(values.child_keys("dictionary").is_empty());
    }

    #[test]
    fn child_keys_skip_empty_brackets() {
        let values = form(&[("[].Value", "v"), ("d[].Value", "w"), ("[a].Value", "1")]);
        assert_eq!(values.child_keys(""), vec!["a"]);
        assert!(values.child_keys("d").is_empty());
    }

    #[test]
    fn child_keys_fold_ascii_case_like_lookups() {
        let values = form(&[("[x].Value", "lower"), ("[X].Value", "upper"), ("[y].Value", "2")]);
        assert_eq!(values.child_keys(""), vec!["x", "y"]);

        let composite = CompositeValueProvider::new(vec![
            Box::new(form(&[("[Key].Value", "form")])),
            Box::new(form(&[("[KEY].Value", "query"), ("[other].Value", "q")])),
        ]);
        assert_eq!(composite.child_keys(""), vec!["Key", "other"]);
    }

    #[test]
    fn decodes_urlencoded_input() {
        let values = FormValueProvider::from_urlencoded("%5B0%5D.Value=a+b&%5B1%5D.Value=").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get_value("[0].Value"), Some("a b"));
        assert_eq!(values.get_value("[1].Value"), Some(""));
    }

    #[test]
    fn composite_prefers_earlier_providers() {
        let composite = CompositeValueProvider::new(vec![
            Box::new(form(&[("[0].Value", "form")])),
            Box::new(form(&[("[0].Value", "query"), ("[1].Value", "only-query")])),
        ]);
        assert_eq!(composite.get_value("[0].Value"), Some("form"));
        assert_eq!(composite.get_value("[1].Value"), Some("only-query"));
        assert_eq!(composite.child_keys(""), vec!["0", "1"]);
    }
}
