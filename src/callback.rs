//! Optional host listeners.

use std::fmt;

/// A listener the host may or may not have registered.
///
/// Listeners only observe; they never feed values back into the editor.
pub struct Callback<T> {
    f: Option<Box<dyn FnMut(T)>>,
}

impl<T> Callback<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(T) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// No listener registered.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the listener, if there is one.
    pub fn emit(&mut self, value: T) {
        if let Some(f) = self.f.as_mut() {
            f(value);
        }
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}
