//! Path-to-view routing.
//!
//! A static table maps application paths to the top-level views. Every
//! navigation updates the current title from the matched route's metadata,
//! falling back to [`APP_NAME`]. There are no guards and nothing async.

/// Title used when a route carries none (or nothing matched).
pub const APP_NAME: &str = "GPJ Input Brief Assistant";

/// A top-level view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Dashboard,
    /// `/brief/new`
    NewBrief,
    /// `/brief/:id`
    EditBrief { id: String },
}

impl Route {
    /// Title from the route's metadata.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Route::Dashboard => Some("Dashboard - GPJ Input Brief Assistant"),
            Route::NewBrief => Some("New Brief"),
            Route::EditBrief { .. } => Some("Edit Brief"),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::NewBrief => "/brief/new".to_string(),
            Route::EditBrief { id } => format!("/brief/{}", id),
        }
    }
}

/// Match `path` against the route table.
///
/// Query strings and fragments are ignored, as is a single trailing slash.
/// `/brief/new` is tried before `/brief/:id`.
pub fn resolve(path: &str) -> Option<Route> {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        return Some(Route::Dashboard);
    }

    let mut segments = trimmed.strip_prefix('/')?.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("brief"), Some("new"), None) => Some(Route::NewBrief),
        (Some("brief"), Some(id), None) if !id.is_empty() => Some(Route::EditBrief {
            id: id.to_string(),
        }),
        _ => None,
    }
}

/// Tracks the current route and title across navigations.
#[derive(Debug, Clone)]
pub struct Router {
    current: Option<Route>,
    title: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: None,
            title: APP_NAME.to_string(),
        }
    }

    /// Navigate to `path`, updating the title. Returns the matched route.
    pub fn navigate(&mut self, path: &str) -> Option<&Route> {
        self.current = resolve(path);
        self.title = self
            .current
            .as_ref()
            .and_then(Route::title)
            .unwrap_or(APP_NAME)
            .to_string();
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_dashboard() {
        assert_eq!(resolve("/"), Some(Route::Dashboard));
        assert_eq!(resolve(""), Some(Route::Dashboard));
        assert_eq!(resolve("/?status=draft"), Some(Route::Dashboard));
    }

    #[test]
    fn new_wins_over_id() {
        assert_eq!(resolve("/brief/new"), Some(Route::NewBrief));
        assert_eq!(resolve("/brief/new/"), Some(Route::NewBrief));
    }

    #[test]
    fn brief_id_is_captured() {
        assert_eq!(
            resolve("/brief/3f2c#sections"),
            Some(Route::EditBrief { id: "3f2c".into() })
        );
    }

    #[test]
    fn unknown_paths_do_not_match() {
        assert_eq!(resolve("/brief"), None);
        assert_eq!(resolve("/brief/a/b"), None);
        assert_eq!(resolve("/settings"), None);
        assert_eq!(resolve("brief/new"), None);
    }

    #[test]
    fn navigation_sets_title() {
        let mut router = Router::new();
        assert_eq!(router.title(), APP_NAME);

        router.navigate("/brief/new");
        assert_eq!(router.title(), "New Brief");
        assert_eq!(router.current(), Some(&Route::NewBrief));

        router.navigate("/brief/b1");
        assert_eq!(router.title(), "Edit Brief");

        router.navigate("/");
        assert_eq!(router.title(), "Dashboard - GPJ Input Brief Assistant");
    }

    #[test]
    fn unknown_path_falls_back_to_app_name() {
        let mut router = Router::new();
        router.navigate("/brief/new");
        assert!(router.navigate("/nowhere").is_none());
        assert_eq!(router.title(), APP_NAME);
        assert!(router.current().is_none());
    }

    #[test]
    fn path_round_trips_through_resolve() {
        let route = Route::EditBrief { id: "b9".into() };
        assert_eq!(resolve(&route.path()), Some(route));
    }
}
