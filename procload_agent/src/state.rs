//! Shared agent state: where the pseudo-files live.

use procload::SourcePaths;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppState {
    pub sources: Arc<SourcePaths>,
}

impl AppState {
    pub fn new(sources: SourcePaths) -> Self {
        AppState {
            sources: Arc::new(sources),
        }
    }
}
