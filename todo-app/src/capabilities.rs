//! Mutating controls the front-end renders but does not implement yet.
//!
//! The new-todo form, the clear-completed button and the toggle-all control
//! all route through [`TodoCommands`]. The only implementation today is
//! [`Unwired`], which reports every call as not implemented.

use thiserror::Error;

/// Why a control could not be carried out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// No backend is wired for this control
    #[error("{capability} is not implemented")]
    NotImplemented {
        /// Name of the control
        capability: &'static str,
    },

    /// The new-todo title was blank after trimming
    #[error("todo title must not be empty")]
    EmptyTitle,
}

/// Mutating operations on the todo collection
///
/// Implementations must not block: they are called from inside the reducer.
pub trait TodoCommands: Send + Sync {
    /// Create a todo titled `title` (already trimmed, non-empty)
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] if the todo could not be created.
    fn add_todo(&self, title: &str) -> Result<(), CapabilityError>;

    /// Remove every completed todo
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] if the todos could not be removed.
    fn clear_completed(&self) -> Result<(), CapabilityError>;

    /// Flip the completion flag of every todo
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] if the todos could not be updated.
    fn toggle_all(&self) -> Result<(), CapabilityError>;
}

/// [`TodoCommands`] with nothing behind it
#[derive(Debug, Clone, Copy, Default)]
pub struct Unwired;

impl TodoCommands for Unwired {
    fn add_todo(&self, _title: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::NotImplemented {
            capability: "add-todo",
        })
    }

    fn clear_completed(&self) -> Result<(), CapabilityError> {
        Err(CapabilityError::NotImplemented {
            capability: "clear-completed",
        })
    }

    fn toggle_all(&self) -> Result<(), CapabilityError> {
        Err(CapabilityError::NotImplemented {
            capability: "toggle-all",
        })
    }
}

/// Trims `raw` and rejects blank titles
///
/// # Errors
///
/// Returns [`CapabilityError::EmptyTitle`] when nothing but whitespace is left.
pub fn normalize_title(raw: &str) -> Result<&str, CapabilityError> {
    let title = raw.trim();
    if title.is_empty() {
        Err(CapabilityError::EmptyTitle)
    } else {
        Ok(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwired_reports_every_control_as_not_implemented() {
        assert_eq!(
            Unwired.add_todo("Buy milk"),
            Err(CapabilityError::NotImplemented {
                capability: "add-todo"
            })
        );
        assert_eq!(
            Unwired.clear_completed().map_err(|e| e.to_string()),
            Err("clear-completed is not implemented".to_string())
        );
        assert!(matches!(
            Unwired.toggle_all(),
            Err(CapabilityError::NotImplemented { .. })
        ));
    }

    #[test]
    fn titles_are_trimmed_and_blank_ones_rejected() {
        assert_eq!(normalize_title("  Buy milk \n"), Ok("Buy milk"));
        assert_eq!(normalize_title("   "), Err(CapabilityError::EmptyTitle));
        assert_eq!(normalize_title(""), Err(CapabilityError::EmptyTitle));
    }
}
