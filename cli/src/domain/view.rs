//! Application view state.
//!
//! One explicit state value owned by the caller. Transitions take the state
//! by value and hand back the next one; nothing here is global or mutable
//! from the outside.

use dockyard_common::AppRecord;

use crate::domain::container::ENGINE_APP_NAMES;
use crate::domain::package::{CURATED_CATALOG, CatalogEntry};

/// Which list the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Installed,
    Available,
    Containers,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub installed: Vec<AppRecord>,
    pub available: Vec<CatalogEntry>,
    pub query: String,
    pub engine_installed: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Installed,
            installed: Vec::new(),
            available: CURATED_CATALOG.to_vec(),
            query: String::new(),
            engine_installed: false,
        }
    }
}

/// Move to `view`. The search query does not carry over between views.
#[must_use]
pub fn switch_view(state: AppState, view: View) -> AppState {
    AppState {
        view,
        query: String::new(),
        ..state
    }
}

/// Replace the installed list and recompute whether an engine is present.
#[must_use]
pub fn with_installed(state: AppState, installed: Vec<AppRecord>) -> AppState {
    let engine_installed = installed.iter().any(|app| {
        ENGINE_APP_NAMES
            .iter()
            .any(|engine| app.name.eq_ignore_ascii_case(engine))
    });
    AppState {
        installed,
        engine_installed,
        ..state
    }
}

/// Set the search query (trimmed, case preserved for display).
#[must_use]
pub fn with_query(state: AppState, query: &str) -> AppState {
    AppState {
        query: query.trim().to_string(),
        ..state
    }
}

fn matches(query: &str, name: &str, description: Option<&str>) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    name.to_lowercase().contains(&q)
        || description.is_some_and(|d| d.to_lowercase().contains(&q))
}

impl AppState {
    /// Installed apps matching the current query.
    #[must_use]
    pub fn visible_installed(&self) -> Vec<&AppRecord> {
        self.installed
            .iter()
            .filter(|app| matches(&self.query, &app.name, app.description.as_deref()))
            .collect()
    }

    /// Catalog entries matching the current query.
    #[must_use]
    pub fn visible_available(&self) -> Vec<&CatalogEntry> {
        self.available
            .iter()
            .filter(|app| matches(&self.query, app.name, Some(app.description)))
            .collect()
    }
}
