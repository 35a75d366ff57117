use std::sync::Arc;

use services::ProgressService;

use crate::navigation::NavEntry;

pub trait UiApp: Send + Sync {
    fn progress(&self) -> Arc<ProgressService>;

    /// Entry shown when the window opens.
    fn initial_entry(&self) -> NavEntry {
        NavEntry::Home
    }
}

#[derive(Clone)]
pub struct AppContext {
    progress: Arc<ProgressService>,
    initial_entry: NavEntry,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            progress: app.progress(),
            initial_entry: app.initial_entry(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn initial_entry(&self) -> NavEntry {
        self.initial_entry.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
