//! Shared application state.

use std::sync::Arc;

use crate::studio::Studio;

/// State handed to every handler.
pub struct AppState<F, R> {
    /// The studio running submissions.
    pub studio: Arc<Studio<F, R>>,
}

impl<F, R> AppState<F, R> {
    /// Wrap a studio.
    pub fn new(studio: Studio<F, R>) -> Self {
        Self {
            studio: Arc::new(studio),
        }
    }
}

impl<F, R> Clone for AppState<F, R> {
    fn clone(&self) -> Self {
        Self {
            studio: Arc::clone(&self.studio),
        }
    }
}
