//! Output data model for connected-domain labeling.
//!
//! This module provides the types a finished labeling run is made of:
//! domain identifiers, axis-aligned bounding boxes, per-cell points, the
//! domains themselves, and the table mapping live domain ids to domains.
//!
//! All types borrow the cell values of the grid they were computed from,
//! so the grid outlives the table and is never copied or mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Identifier of a domain.
///
/// Ids are unique within one labeling run, start at 1, and increase
/// monotonically in the order domains were first discovered. An id that was
/// merged away is never reused and never reappears in the table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DomainId(u32);

impl DomainId {
    /// The id assigned to the first domain of a run.
    pub(crate) const FIRST: DomainId = DomainId(1);

    /// Returns the numeric value of the id (always >= 1).
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the id following this one.
    pub(crate) fn next(self) -> DomainId {
        DomainId(self.0 + 1)
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned bounding box of a domain's points.
///
/// `w` and `h` are zero-based extents (max - min), not cell counts: a
/// single-point domain has `w == 0` and `h == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounding {
    /// Minimum column over the domain's points.
    pub x: usize,
    /// Minimum row over the domain's points.
    pub y: usize,
    /// Maximum column minus minimum column.
    pub w: usize,
    /// Maximum row minus minimum row.
    pub h: usize,
}

impl Bounding {
    /// Creates a new bounding box.
    ///
    /// # Arguments
    ///
    /// * `x` - The minimum column.
    /// * `y` - The minimum row.
    /// * `w` - The column extent (max - min).
    /// * `h` - The row extent (max - min).
    ///
    /// # Returns
    ///
    /// A new `Bounding` instance.
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Gets the maximum column covered by the bounding box.
    pub fn x_max(&self) -> usize {
        self.x + self.w
    }

    /// Gets the maximum row covered by the bounding box.
    pub fn y_max(&self) -> usize {
        self.y + self.h
    }

    /// Checks whether a cell position falls inside the bounding box.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x <= self.x_max() && y >= self.y && y <= self.y_max()
    }
}

/// A single cell of a domain.
///
/// Carries the cell position, a borrow of the original cell value, the
/// label the classifier produced for it, and the id of the domain that
/// finally owns it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPoint<'g, T, L> {
    /// Column of the cell.
    pub x: usize,
    /// Row of the cell.
    pub y: usize,
    /// The original cell value.
    pub value: &'g T,
    /// The classifier's label for the cell.
    pub label: L,
    /// Id of the domain owning the cell.
    pub domain_id: DomainId,
}

/// A connected domain: a maximal group of same-label cells connected under
/// the scan's backward-neighbor adjacency (top, left, top-left).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain<'g, T, L> {
    /// Identifier of the domain.
    pub domain_id: DomainId,
    /// The label shared by every point of the domain.
    pub label: L,
    /// Bounding box over the final point set, computed after the scan.
    pub bounding: Bounding,
    /// The member cells, in the order they were discovered and absorbed.
    pub points: Vec<DomainPoint<'g, T, L>>,
}

impl<'g, T, L> Domain<'g, T, L> {
    /// Returns the number of cells in the domain (always >= 1).
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Iterates over the `(x, y)` positions of the domain's cells.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.points.iter().map(|point| (point.x, point.y))
    }
}

/// The result of a labeling run: live domains keyed by [`DomainId`].
///
/// Iteration visits domains in ascending id order; ids that were merged
/// away during the scan are absent.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DomainTable<'g, T, L> {
    domains: BTreeMap<DomainId, Domain<'g, T, L>>,
}

impl<'g, T, L> DomainTable<'g, T, L> {
    pub(crate) fn from_domains(domains: BTreeMap<DomainId, Domain<'g, T, L>>) -> Self {
        Self { domains }
    }

    /// Looks up a domain by id.
    ///
    /// Returns `None` for ids that were never allocated or were merged away.
    pub fn get(&self, id: DomainId) -> Option<&Domain<'g, T, L>> {
        self.domains.get(&id)
    }

    /// Returns the number of live domains.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Checks whether the table holds no domains at all.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Iterates over the live domain ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.domains.keys().copied()
    }

    /// Iterates over the live domains in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Domain<'g, T, L>> {
        self.domains.values()
    }

    /// Iterates over the domains carrying a given label.
    pub fn with_label<'a>(&'a self, label: &'a L) -> impl Iterator<Item = &'a Domain<'g, T, L>>
    where
        L: PartialEq,
    {
        self.iter().filter(move |domain| domain.label == *label)
    }
}

impl<'g, T, L> IntoIterator for DomainTable<'g, T, L> {
    type Item = Domain<'g, T, L>;
    type IntoIter = btree_map::IntoValues<DomainId, Domain<'g, T, L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.into_values()
    }
}

impl<'a, 'g, T, L> IntoIterator for &'a DomainTable<'g, T, L> {
    type Item = &'a Domain<'g, T, L>;
    type IntoIter = btree_map::Values<'a, DomainId, Domain<'g, T, L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_id_ordering_and_display() {
        let first = DomainId::FIRST;
        let second = first.next();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert!(first < second);
        assert_eq!(second.to_string(), "2");
    }

    #[test]
    fn test_bounding_extents() {
        let bounding = Bounding::new(2, 1, 3, 0);
        assert_eq!(bounding.x_max(), 5);
        assert_eq!(bounding.y_max(), 1);
    }

    #[test]
    fn test_bounding_contains() {
        let bounding = Bounding::new(1, 1, 2, 2);
        assert!(bounding.contains(1, 1));
        assert!(bounding.contains(3, 3));
        assert!(bounding.contains(2, 2));
        assert!(!bounding.contains(0, 2));
        assert!(!bounding.contains(4, 2));
    }

    #[test]
    fn test_singleton_bounding_is_zero_sized() {
        let bounding = Bounding::new(4, 7, 0, 0);
        assert_eq!(bounding.x_max(), 4);
        assert_eq!(bounding.y_max(), 7);
        assert!(bounding.contains(4, 7));
        assert!(!bounding.contains(5, 7));
    }

    #[test]
    fn test_bounding_serde_round_trip() {
        let bounding = Bounding::new(0, 2, 5, 1);
        let json = serde_json::to_string(&bounding).unwrap();
        let back: Bounding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bounding);
    }
}
