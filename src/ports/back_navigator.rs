//! Back navigation out of the editor.

/// The enclosing application's "go back" action.
pub trait BackNavigator: Send + Sync {
    fn navigate_back(&self);
}

impl<F> BackNavigator for F
where
    F: Fn() + Send + Sync,
{
    fn navigate_back(&self) {
        self()
    }
}
