/// Returns true when the module should activate on `path`.
///
/// The active surface is the Miniflux list views plus the settings
/// page: `/unread*`, `/settings`, `/starred*`, `/history*`,
/// `/feed/*/entries*`, and `/category/*/entries*`.
pub fn is_activation_path(path: &str) -> bool {
    path.starts_with("/unread")
        || path == "/settings"
        || path.starts_with("/starred")
        || path.starts_with("/history")
        || matches_entries_path(path, "/feed/")
        || matches_entries_path(path, "/category/")
}

/// Returns true when the settings panel should be injected on `path`.
pub fn is_settings_path(path: &str) -> bool {
    path == "/settings"
}

// Matches "<prefix><one segment>/entries*".
fn matches_entries_path(path: &str, prefix: &str) -> bool {
    let Some(remainder) = path.strip_prefix(prefix) else {
        return false;
    };
    let Some((segment, rest)) = remainder.split_once('/') else {
        return false;
    };
    !segment.is_empty() && rest.starts_with("entries")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_views_activate() {
        assert!(is_activation_path("/unread"));
        assert!(is_activation_path("/unread?page=2"));
        assert!(is_activation_path("/starred"));
        assert!(is_activation_path("/history"));
    }

    #[test]
    fn settings_page_activates_exactly() {
        assert!(is_activation_path("/settings"));
        assert!(is_settings_path("/settings"));
        assert!(!is_activation_path("/settings/integrations"));
        assert!(!is_settings_path("/unread"));
    }

    #[test]
    fn feed_and_category_entry_views_activate() {
        assert!(is_activation_path("/feed/12/entries"));
        assert!(is_activation_path("/feed/12/entries/all"));
        assert!(is_activation_path("/category/3/entries?page=4"));
    }

    #[test]
    fn other_paths_stay_inert() {
        assert!(!is_activation_path("/"));
        assert!(!is_activation_path("/feeds"));
        assert!(!is_activation_path("/feed/12"));
        assert!(!is_activation_path("/feed//entries"));
        assert!(!is_activation_path("/entry/99"));
        assert!(!is_activation_path("/keys"));
    }
}
