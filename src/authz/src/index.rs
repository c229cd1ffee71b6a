//! O(1) permission index built once per session

use std::collections::{BTreeMap, HashMap};
use taskboard_core::Permission;

/// Permissions of a session, indexed by key
#[derive(Debug, Clone, Default)]
pub struct PermissionIndex {
    by_key: HashMap<String, Permission>,
}

impl PermissionIndex {
    /// Build the index in one pass; records with an empty key are skipped
    pub fn build<I>(permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        let by_key = permissions
            .into_iter()
            .filter(|permission| !permission.key.is_empty())
            .map(|permission| (permission.key.clone(), permission))
            .collect();

        Self { by_key }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Permission> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.by_key.values()
    }

    /// Permissions grouped by `key_group`, ungrouped records omitted
    ///
    /// Groups and their members are ordered by key so listings are stable.
    pub fn by_group(&self) -> BTreeMap<String, Vec<Permission>> {
        let mut groups: BTreeMap<String, Vec<Permission>> = BTreeMap::new();
        for permission in self.by_key.values() {
            if permission.key_group.is_empty() {
                continue;
            }
            groups
                .entry(permission.key_group.clone())
                .or_default()
                .push(permission.clone());
        }

        for members in groups.values_mut() {
            members.sort_by(|a, b| a.key.cmp(&b.key));
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::PermissionKey;

    #[test]
    fn test_build_skips_empty_keys() {
        let index = PermissionIndex::build(vec![
            Permission::from_key(PermissionKey::TasksList),
            Permission::new("", "TASKS", "broken"),
        ]);

        assert_eq!(index.len(), 1);
        assert!(index.contains("TASKS_LIST"));
        assert!(!index.contains(""));
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let index = PermissionIndex::build(vec![
            Permission::from_key(PermissionKey::UsersList),
            Permission::from_key(PermissionKey::UsersList),
        ]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_by_group() {
        let index = PermissionIndex::build(vec![
            Permission::from_key(PermissionKey::TasksUpdate),
            Permission::from_key(PermissionKey::TasksList),
            Permission::from_key(PermissionKey::MetricsView),
            Permission::new("REPORTS_EXPORT", "", "Export reports"),
        ]);

        let groups = index.by_group();
        assert_eq!(groups.len(), 2);

        let tasks: Vec<_> = groups["TASKS"].iter().map(|p| p.key.as_str()).collect();
        assert_eq!(tasks, vec!["TASKS_LIST", "TASKS_UPDATE"]);
        assert_eq!(groups["METRICS"].len(), 1);
    }
}
