//! Field Selector: `cat_fields=a,b,c` → projection of a property map.

use crate::model::PropertyMap;

/// Parsed comma-separated field list.
///
/// Entries are trimmed, empty entries are dropped, order is kept, and
/// duplicates are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelector {
    fields: Vec<String>,
}

impl FieldSelector {
    pub fn parse(raw: Option<&str>) -> Self {
        let fields = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_owned)
            .collect();
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Keep only the selected keys. An empty selection yields an empty
    /// map, not the input; selected keys missing from `props` are skipped.
    pub fn project(&self, props: &PropertyMap) -> PropertyMap {
        self.fields
            .iter()
            .filter_map(|f| props.get_key_value(f))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
