// src/render/mod.rs
mod terminal;

pub use terminal::TerminalTarget;

use crate::model::StatusViewModel;
use std::sync::Arc;

/// Where the widget draws. The original page looked elements up in the
/// document; here the target is an explicit collaborator handed to the
/// widget at construction time.
///
/// `render` is deterministic for a given view model and has no side effect
/// beyond writing to the target.
pub trait RenderTarget: Send + Sync {
    fn render(&self, vm: &StatusViewModel);
}

impl<T: RenderTarget + ?Sized> RenderTarget for Arc<T> {
    fn render(&self, vm: &StatusViewModel) {
        (**self).render(vm)
    }
}
