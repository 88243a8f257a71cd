use std::fmt::{self, Display};

/// Ordered `key value` pairs for one multigraph section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<K: Into<String>, V: Display>(&mut self, key: K, value: V) {
        self.entries.push((key.into(), value.to_string()));
    }

    /// Per-device field, `<metric_key>.<field>`
    pub fn push_field<V: Display>(&mut self, metric_key: &str, field: &str, value: V) {
        self.push(format!("{}.{}", metric_key, field), value);
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One rendered multigraph section
pub struct Section<'a> {
    pub multigraph: &'a str,
    pub fields: &'a Fields,
}

impl Display for Section<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "multigraph {}", self.multigraph)?;
        for (key, value) in &self.fields.entries {
            writeln!(f, "{} {}", key, value)?;
        }
        Ok(())
    }
}

/// Render `fields` under a `multigraph` header, one `key value` per line.
pub fn render(multigraph: &str, fields: &Fields) -> String {
    Section { multigraph, fields }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_insertion_order() {
        let mut fields = Fields::new();
        fields.push("graph_title", "Zeta");
        fields.push("graph_args", "--base 1000");
        fields.push_field("_dev_nvme0n1", "label", "nvme0n1");
        fields.push_field("_dev_nvme0n1", "min", 0);

        assert_eq!(
            render("nvme_test", &fields),
            "multigraph nvme_test\n\
             graph_title Zeta\n\
             graph_args --base 1000\n\
             _dev_nvme0n1.label nvme0n1\n\
             _dev_nvme0n1.min 0\n"
        );
    }

    #[test]
    fn test_render_empty_section() {
        assert_eq!(render("nvme_temp", &Fields::new()), "multigraph nvme_temp\n");
    }

    #[test]
    fn test_fields_lookup() {
        let mut fields = Fields::new();
        fields.push_field("a", "value", -3);
        assert_eq!(fields.get("a.value"), Some("-3"));
        assert_eq!(fields.get("b.value"), None);
        assert_eq!(fields.len(), 1);
        assert!(!fields.is_empty());
    }
}
