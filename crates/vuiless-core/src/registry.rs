#![forbid(unsafe_code)]

//! The keyed store of field registrations a form controller owns.
//!
//! # Invariants
//!
//! - At most one registration per [`FieldId`]. Registering an id again
//!   replaces the previous callbacks in place, keeping the field's position.
//! - Unregistering an unknown id is a no-op.
//! - Only `register`, `unregister` and `clear` change the set of entries.
//!   Dispatching `validate`/`clear_errors`/`reset` never adds or removes one,
//!   and the borrow checker rules out registering from inside a dispatch.
//! - Iteration follows registration order.

use std::fmt;

use crate::field::{FieldCallbacks, FieldId};
use crate::result::ValidationResult;
use crate::value::{FormContext, FormData};

type Entry<D, C> = (FieldId, Box<dyn FieldCallbacks<D, C>>);

/// Field registrations keyed by identity.
pub struct FieldRegistry<D = FormData, C = FormContext> {
    entries: Vec<Entry<D, C>>,
}

impl<D, C> Default for FieldRegistry<D, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, C> FieldRegistry<D, C> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.as_str() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Box<dyn FieldCallbacks<D, C>>> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, callbacks)| callbacks)
    }

    /// Store `callbacks` under `id`, replacing any earlier registration.
    pub fn register(
        &mut self,
        id: impl Into<FieldId>,
        callbacks: impl FieldCallbacks<D, C> + 'static,
    ) {
        let id = id.into();
        let callbacks: Box<dyn FieldCallbacks<D, C>> = Box::new(callbacks);
        match self.position(id.as_str()) {
            Some(index) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(field = %id, "field registration replaced");
                self.entries[index].1 = callbacks;
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(field = %id, "field registered");
                self.entries.push((id, callbacks));
            }
        }
    }

    /// Remove the registration for `id`.
    ///
    /// Returns whether anything was removed; an unknown id is not an error.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(field = id, "unregister of unknown field ignored");
            return false;
        };
        self.entries.remove(index);
        #[cfg(feature = "tracing")]
        tracing::debug!(field = id, "field unregistered");
        true
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &FieldId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Validate one field. `None` if `id` is not registered.
    pub fn validate(&mut self, id: &str, data: &D, context: Option<&C>) -> Option<ValidationResult> {
        let result = self.get_mut(id)?.validate(data, context);
        #[cfg(feature = "tracing")]
        tracing::trace!(field = id, valid = result.is_valid(), "field validated");
        Some(result)
    }

    /// Validate every field in registration order.
    ///
    /// Each field is validated; a failing field does not stop the others.
    pub fn validate_all(&mut self, data: &D, context: Option<&C>) -> Vec<(FieldId, ValidationResult)> {
        self.entries
            .iter_mut()
            .map(|(id, callbacks)| {
                let result = callbacks.validate(data, context);
                #[cfg(feature = "tracing")]
                tracing::trace!(field = %id, valid = result.is_valid(), "field validated");
                (id.clone(), result)
            })
            .collect()
    }

    /// Clear one field's errors. Returns whether `id` was registered.
    pub fn clear_errors(&mut self, id: &str) -> bool {
        self.get_mut(id).map(|c| c.clear_errors()).is_some()
    }

    /// Clear every field's errors.
    pub fn clear_all_errors(&mut self) {
        for (_, callbacks) in &mut self.entries {
            callbacks.clear_errors();
        }
    }

    /// Reset one field. Returns whether `id` was registered.
    pub fn reset(&mut self, id: &str) -> bool {
        self.get_mut(id).map(|c| c.reset()).is_some()
    }

    /// Mark one field as touched. Returns whether `id` was registered.
    pub fn touch(&mut self, id: &str) -> bool {
        self.get_mut(id).map(|c| c.touch()).is_some()
    }

    /// Reset every field.
    pub fn reset_all(&mut self) {
        for (_, callbacks) in &mut self.entries {
            callbacks.reset();
        }
    }
}

impl<D, C> fmt::Debug for FieldRegistry<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("fields", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}
