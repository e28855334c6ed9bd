//! Error types for the domain labeler.
//!
//! This module defines the errors that can occur while labeling a grid:
//! missing inputs, classifier failures, and defensive internal invariant
//! violations. It also provides utility constructors for creating these
//! errors with appropriate context.
//!
//! # Usage
//!
//! ```rust
//! use connected_domain::core::errors::DomainError;
//!
//! // Create an invalid-input error
//! let error = DomainError::invalid_input("a grid must be provided");
//!
//! // Wrap a classifier failure with the cell it occurred at
//! let failure = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad cell");
//! let error = DomainError::classification(3, 1, failure);
//! ```

use thiserror::Error;

/// Enum representing the errors that can occur during domain labeling.
///
/// There is no recoverable-error path: any of these aborts the whole
/// labeling operation and no partial domain table is returned.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A required input was not provided.
    ///
    /// Raised before any processing begins.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the missing or invalid input.
        message: String,
    },

    /// The classifier failed on a cell.
    ///
    /// The labeling aborts immediately; no partial result is kept.
    #[error("classification failed at ({x}, {y})")]
    Classification {
        /// Column of the cell the classifier failed on.
        x: usize,
        /// Row of the cell the classifier failed on.
        y: usize,
        /// The underlying classifier error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An internal invariant of the scan was violated.
    ///
    /// These conditions must never occur by construction; surfacing one
    /// indicates a defect in the labeler itself.
    #[error("internal invariant violated: {message}")]
    Invariant {
        /// A message describing the violated invariant.
        message: String,
    },
}

/// Utility constructors for [`DomainError`].
impl DomainError {
    /// Creates a [`DomainError`] for a missing or invalid input.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the missing or invalid input.
    ///
    /// # Returns
    ///
    /// A `DomainError::InvalidInput` instance.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a [`DomainError`] for a classifier failure at a cell.
    ///
    /// # Arguments
    ///
    /// * `x` - Column of the cell the classifier failed on.
    /// * `y` - Row of the cell the classifier failed on.
    /// * `error` - The underlying error returned by the classifier.
    ///
    /// # Returns
    ///
    /// A `DomainError::Classification` instance.
    pub fn classification(
        x: usize,
        y: usize,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Classification {
            x,
            y,
            source: Box::new(error),
        }
    }

    /// Creates a [`DomainError`] for a violated internal invariant.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}

/// Convenient result alias for labeling operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let error = DomainError::invalid_input("a grid must be provided");
        assert_eq!(error.to_string(), "invalid input: a grid must be provided");
    }

    #[test]
    fn test_classification_carries_source() {
        use std::error::Error;

        let inner = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad cell");
        let error = DomainError::classification(3, 1, inner);
        assert_eq!(error.to_string(), "classification failed at (3, 1)");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_invariant_display() {
        let error = DomainError::invariant("merge source missing");
        assert_eq!(
            error.to_string(),
            "internal invariant violated: merge source missing"
        );
    }
}
