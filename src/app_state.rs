use std::sync::Arc;

use crate::verification::Verifier;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<Verifier>,
}

impl AppState {
    pub fn new(verifier: Verifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }
}
