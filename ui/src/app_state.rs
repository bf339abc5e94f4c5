use api::Endpoints;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct AppStateData {
    pub endpoints: Endpoints,
}

/// Stable, non-reactive state provided as a context to the whole app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(endpoints: Endpoints) -> Self {
        Self(Arc::new(AppStateData { endpoints }))
    }
}
