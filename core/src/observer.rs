//! Hooks notified when a legacy book view is produced.

use std::sync::Arc;

use crate::types::LegacyBookView;

pub trait BookObserver: Send + Sync {
    fn legacy_book_viewed(&self, view: &LegacyBookView);
}

impl<O: BookObserver + ?Sized> BookObserver for Arc<O> {
    fn legacy_book_viewed(&self, view: &LegacyBookView) {
        (**self).legacy_book_viewed(view)
    }
}

/// Emits each view as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BookObserver for TracingObserver {
    fn legacy_book_viewed(&self, view: &LegacyBookView) {
        tracing::info!(book_title = %view.book_title, year = view.year, "legacy book view");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BookObserver for NoopObserver {
    fn legacy_book_viewed(&self, _view: &LegacyBookView) {}
}
