//! Notification types exchanged with the host runtime.

use crate::config::schema::HostConfig;

/// Outcome a handler reports back to the host's notification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Keep delivering this notification to other modules.
    Continue,
    /// The notification was fully consumed here.
    Handled,
}

/// Payload of a host-level configuration change.
///
/// `config` carries the freshly loaded configuration when the change could
/// be reloaded, `path` the narrowest application path affected by the edit.
/// `path` is `None` when only module or observability settings changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationChange {
    pub config: Option<HostConfig>,
    pub path: Option<String>,
}

impl ConfigurationChange {
    /// Build the change delivered for a reload from `old` to `new`.
    ///
    /// An application counts as changed when it appears on only one side or
    /// when any of its fields differ between the sides.
    pub fn between(old: &HostConfig, new: &HostConfig) -> Self {
        let mut changed: Vec<&str> = Vec::new();

        for app in &new.applications {
            match old.applications.iter().find(|o| o.path == app.path) {
                Some(existing) if existing == app => {}
                _ => changed.push(&app.path),
            }
        }
        for app in &old.applications {
            if !new.applications.iter().any(|n| n.path == app.path) {
                changed.push(&app.path);
            }
        }

        Self {
            config: Some(new.clone()),
            path: narrowest_common_path(&changed),
        }
    }
}

/// Narrowest configuration path covering every entry in `paths`.
///
/// Segment-wise: the common prefix of `/store/a` and `/store/b` is
/// `/store`, not `/store/`. Disjoint paths collapse to `/`.
fn narrowest_common_path(paths: &[&str]) -> Option<String> {
    let (first, rest) = paths.split_first()?;

    let mut shared: Vec<&str> = first.split('/').filter(|s| !s.is_empty()).collect();
    for path in rest {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let common = shared
            .iter()
            .zip(segments.iter())
            .take_while(|(a, b)| a == b)
            .count();
        shared.truncate(common);
    }

    if shared.is_empty() {
        Some("/".to_string())
    } else {
        Some(format!("/{}", shared.join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ApplicationConfig;

    fn config_with(apps: &[(&str, &str)]) -> HostConfig {
        HostConfig {
            applications: apps
                .iter()
                .map(|(name, path)| ApplicationConfig {
                    name: name.to_string(),
                    path: path.to_string(),
                })
                .collect(),
            ..HostConfig::default()
        }
    }

    #[test]
    fn test_module_only_change_has_no_path() {
        let old = config_with(&[("site1", "/site1")]);
        let mut new = old.clone();
        new.module.shutdown_delay_ms = 0;

        let change = ConfigurationChange::between(&old, &new);
        assert_eq!(change.path, None);
        assert_eq!(change.config, Some(new));
    }

    #[test]
    fn test_single_changed_application_targets_its_path() {
        let old = config_with(&[("site1", "/site1"), ("site2", "/site2")]);
        let new = config_with(&[("site1-renamed", "/site1"), ("site2", "/site2")]);

        let change = ConfigurationChange::between(&old, &new);
        assert_eq!(change.path.as_deref(), Some("/site1"));
    }

    #[test]
    fn test_removed_application_targets_its_path() {
        let old = config_with(&[("site1", "/site1"), ("site2", "/site2")]);
        let new = config_with(&[("site1", "/site1")]);

        let change = ConfigurationChange::between(&old, &new);
        assert_eq!(change.path.as_deref(), Some("/site2"));
    }

    #[test]
    fn test_sibling_changes_collapse_to_parent() {
        let old = config_with(&[("a", "/store/a"), ("b", "/store/b")]);
        let new = config_with(&[("a2", "/store/a"), ("b2", "/store/b")]);

        let change = ConfigurationChange::between(&old, &new);
        assert_eq!(change.path.as_deref(), Some("/store"));
    }

    #[test]
    fn test_disjoint_changes_collapse_to_root() {
        let old = config_with(&[("a", "/a"), ("b", "/b")]);
        let new = config_with(&[]);

        let change = ConfigurationChange::between(&old, &new);
        assert_eq!(change.path.as_deref(), Some("/"));
    }

    #[test]
    fn test_narrowest_common_path_of_nothing() {
        assert_eq!(narrowest_common_path(&[]), None);
    }

    #[test]
    fn test_narrowest_common_path_single() {
        assert_eq!(
            narrowest_common_path(&["/site1/app"]),
            Some("/site1/app".to_string())
        );
    }
}
