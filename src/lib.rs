//! # connected-domain
//!
//! A Rust library that computes the connected domains of a two-dimensional
//! grid: maximal groups of cells that touch under 8-neighbor adjacency and
//! that a caller-supplied classifier maps to the same label.
//!
//! The computation is a single top-to-bottom, left-to-right scan. Each cell
//! consults only its three already-visited neighbors (top, left, top-left),
//! so provisional domains are created eagerly and merged when a later cell
//! proves two of them connected. Bounding boxes are aggregated in a final
//! pass once membership is settled.
//!
//! ## Features
//!
//! - Works on any cell type; cells are borrowed, never copied or mutated
//! - Caller-defined classification via closure or [`labeler::Classifier`]
//! - Absent cells (`None`) are skipped and split connectivity
//! - Ragged rows and empty rows are fine
//! - Domain table keyed by stable, ascending domain ids
//! - Serializable output (`serde`)
//!
//! ## Modules
//!
//! * [`core`] - Error handling: [`DomainError`](core::DomainError) and the
//!   [`DomainResult`](core::DomainResult) alias
//! * [`domain`] - Output data model: domains, points, bounding boxes, the
//!   domain table
//! * [`labeler`] - The labeling engine: classifier seam, builder, and the
//!   [`find_domains`](labeler::find_domains) entry point
//!
//! ## Quick Start
//!
//! ```rust
//! use connected_domain::prelude::*;
//!
//! let grid = vec![
//!     vec![Some('a'), Some('a')],
//!     vec![Some('a'), Some('b')],
//! ];
//!
//! let table = find_domains(&grid, |cell: &char, _x: usize, _y: usize| *cell)?;
//!
//! assert_eq!(table.len(), 2);
//! let a = table.with_label(&'a').next().unwrap();
//! assert_eq!(a.point_count(), 3);
//! assert_eq!(a.bounding, Bounding::new(0, 0, 1, 1));
//! # Ok::<(), connected_domain::core::DomainError>(())
//! ```
//!
//! ### Builder form
//!
//! ```rust
//! use connected_domain::prelude::*;
//!
//! let grid = vec![vec![Some(3), Some(4), Some(6)]];
//!
//! let table = DomainLabeler::new()
//!     .grid(&grid)
//!     .classifier(|value: &u32, _x: usize, _y: usize| value % 2)
//!     .run()?;
//!
//! assert_eq!(table.len(), 2);
//! # Ok::<(), connected_domain::core::DomainError>(())
//! ```

pub mod core;
pub mod domain;
pub mod labeler;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use connected_domain::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - Labeling entry points ([`find_domains`], [`DomainLabeler`])
/// - Classification ([`Classifier`], [`FallibleFn`])
/// - Results ([`DomainTable`], [`Domain`], [`DomainPoint`], [`DomainId`],
///   [`Bounding`])
/// - Essential error and result types ([`DomainError`], [`DomainResult`])
pub mod prelude {
    pub use crate::core::{DomainError, DomainResult};
    pub use crate::domain::{Bounding, Domain, DomainId, DomainPoint, DomainTable};
    pub use crate::labeler::{Classifier, DomainLabeler, FallibleFn, find_domains};
}
