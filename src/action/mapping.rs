use super::descriptor::HandlerIdentity;
use super::inventory::{fold_name, ActionInventory};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only `name → handler identities` view of an inventory.
///
/// Documentation and alternate dispatchers only need to know which handlers
/// answer to which name, so the descriptor type stays private to selection.
/// Lookups are case-insensitive; iteration follows declaration order.
#[derive(Debug, Clone, Default)]
pub struct ActionMapping {
    entries: Vec<(Arc<str>, Vec<HandlerIdentity>)>,
    index: HashMap<Box<str>, usize>,
}

impl ActionMapping {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handler identities registered under `name`; empty when unknown.
    #[must_use]
    pub fn get(&self, name: &str) -> &[HandlerIdentity] {
        self.index
            .get(&*fold_name(name))
            .map(|&idx| self.entries[idx].1.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&*fold_name(name))
    }

    /// Action names with their handlers, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HandlerIdentity])> {
        self.entries
            .iter()
            .map(|(name, handlers)| (&**name, handlers.as_slice()))
    }
}

impl Serialize for ActionMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, handlers) in &self.entries {
            let signatures: Vec<&str> = handlers.iter().map(|h| &**h).collect();
            map.serialize_entry(&**name, &signatures)?;
        }
        map.end()
    }
}

/// Project an inventory's name index into an [`ActionMapping`].
///
/// Each name is reported with the spelling of its first declared handler.
#[must_use]
pub fn export_mapping(inventory: &ActionInventory) -> ActionMapping {
    let groups = inventory.name_groups();
    let mut entries = Vec::with_capacity(groups.len());
    let mut index: HashMap<Box<str>, usize> = HashMap::with_capacity(groups.len());

    for group in groups {
        let Some(first) = group.descriptors.first() else {
            continue;
        };
        let name: Arc<str> = Arc::from(first.name());
        index.insert(fold_name(&name).into(), entries.len());
        entries.push((
            name,
            group.descriptors.iter().map(|d| d.identity()).collect(),
        ));
    }

    ActionMapping { entries, index }
}
