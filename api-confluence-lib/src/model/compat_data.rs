use crate::store::{FieldKind, FieldRef, FieldType, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generated support matrix for one web interface across releases.
///
/// `support` maps a release id to whether that release exposes the interface. Releases
/// absent from the map are treated as not supporting it. The map itself cannot be queried
/// through predicates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatData {
    pub id: String,
    pub interface_name: String,
    pub api_name: String,
    #[serde(default)]
    pub support: BTreeMap<String, bool>,
}

impl CompatData {
    #[must_use]
    pub fn new(interface_name: &str, api_name: &str) -> Self {
        Self {
            id: format!("{interface_name}#{api_name}"),
            interface_name: interface_name.to_string(),
            api_name: api_name.to_string(),
            support: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_support(mut self, release_id: &str, supported: bool) -> Self {
        let _ = self.support.insert(release_id.to_string(), supported);
        self
    }

    #[must_use]
    pub fn is_supported_by(&self, release_id: &str) -> bool {
        self.support.get(release_id).copied().unwrap_or(false)
    }
}

impl Record for CompatData {
    const KIND: &'static str = "CompatData";

    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("id", FieldKind::Str),
        ("interface_name", FieldKind::Str),
        ("api_name", FieldKind::Str),
    ];

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "id" => Some(self.id.as_field()),
            "interface_name" => Some(self.interface_name.as_field()),
            "api_name" => Some(self.api_name.as_field()),
            _ => None,
        }
    }
}
