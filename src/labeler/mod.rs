//! The domain labeler: single-pass connected-domain computation.
//!
//! The labeler walks the grid once, top to bottom and left to right. For
//! each non-absent cell it consults the three neighbors the scan has
//! already finished (top, left, top-left, in that priority order) through
//! a position index. A cell with no same-label backward neighbor opens a
//! new provisional domain; otherwise it joins the first matching neighbor's
//! domain, and any other matching neighbor whose domain differs is merged
//! into that one. Visiting only backward neighbors means every consulted
//! cell already carries an assignment, so no forward references are needed:
//! rightward, downward and down-right adjacency all surface through some
//! later cell's backward triangle.
//!
//! Merges may chain: a component discovered as several provisional domains
//! early in the scan can be stitched together many rows later. Domain ids
//! are therefore always re-resolved through the position index at use time,
//! never cached across merges.
//!
//! Bounding boxes are computed in a finalize pass once the scan is done,
//! since a merge can change a domain's membership until the very last cell.

pub mod classifier;

pub use classifier::{Classifier, FallibleFn};

use crate::core::{DomainError, DomainResult};
use crate::domain::{Bounding, Domain, DomainId, DomainPoint, DomainTable};
use itertools::{Itertools, MinMaxResult};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// One entry of the position index: the label and current domain of a
/// visited cell. Created exactly once per non-absent cell; the domain id is
/// rewritten when the owning domain is merged away, the entry itself is
/// never removed.
#[derive(Debug, Clone)]
struct CellEntry<L> {
    label: L,
    domain_id: DomainId,
}

/// A domain under construction. The bounding box is deliberately absent:
/// membership can still change through merges until the scan completes.
#[derive(Debug)]
struct Provisional<'g, T, L> {
    label: L,
    points: Vec<DomainPoint<'g, T, L>>,
}

/// Mutable state of one in-flight labeling run.
///
/// Owned exclusively by the run; nothing persists across calls.
struct ScanState<'g, T, L> {
    /// Position index: `(x, y)` of every visited cell to its entry.
    index: HashMap<(usize, usize), CellEntry<L>>,
    /// Provisional domains keyed by id. Keys ascend in discovery order.
    domains: BTreeMap<DomainId, Provisional<'g, T, L>>,
    next_id: DomainId,
    cells: usize,
    merges: usize,
}

/// The three already-visited neighbors of `(x, y)`, in match priority
/// order: top, left, top-left. Edge cells have fewer.
fn backward_neighbors(x: usize, y: usize) -> [Option<(usize, usize)>; 3] {
    [
        y.checked_sub(1).map(|top| (x, top)),
        x.checked_sub(1).map(|left| (left, y)),
        x.checked_sub(1).zip(y.checked_sub(1)),
    ]
}

impl<'g, T, L> ScanState<'g, T, L>
where
    L: Clone + PartialEq,
{
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            domains: BTreeMap::new(),
            next_id: DomainId::FIRST,
            cells: 0,
            merges: 0,
        }
    }

    /// Processes one non-absent cell that has already been classified.
    fn visit(&mut self, x: usize, y: usize, value: &'g T, label: L) -> DomainResult<()> {
        self.cells += 1;

        let neighbors = backward_neighbors(x, y);
        let anchor = neighbors.into_iter().flatten().find(|position| {
            self.index
                .get(position)
                .is_some_and(|entry| entry.label == label)
        });

        let Some(anchor) = anchor else {
            self.new_domain(x, y, value, label);
            return Ok(());
        };

        let target = self.resolve(anchor)?;
        self.assign(x, y, value, &label, target)?;

        // Any other matching neighbor may belong to a different provisional
        // domain; fold those into the target. The id is re-resolved through
        // the index here because an earlier merge in this very loop can have
        // rewritten it.
        for position in neighbors.into_iter().flatten() {
            if position == anchor {
                continue;
            }
            let Some(entry) = self.index.get(&position) else {
                continue;
            };
            if entry.label != label {
                continue;
            }
            let current = entry.domain_id;
            if current != target {
                self.merge(target, current)?;
            }
        }

        Ok(())
    }

    /// Opens a new provisional domain containing only `(x, y)`.
    fn new_domain(&mut self, x: usize, y: usize, value: &'g T, label: L) {
        let id = self.next_id;
        self.next_id = id.next();
        trace!("new domain {} at ({}, {})", id, x, y);

        self.index.insert(
            (x, y),
            CellEntry {
                label: label.clone(),
                domain_id: id,
            },
        );
        let point = DomainPoint {
            x,
            y,
            value,
            label: label.clone(),
            domain_id: id,
        };
        self.domains.insert(
            id,
            Provisional {
                label,
                points: vec![point],
            },
        );
    }

    /// Adds the cell `(x, y)` to an existing domain and indexes it.
    fn assign(
        &mut self,
        x: usize,
        y: usize,
        value: &'g T,
        label: &L,
        target: DomainId,
    ) -> DomainResult<()> {
        let Some(domain) = self.domains.get_mut(&target) else {
            return Err(DomainError::invariant(format!(
                "domain {} reachable from the position index but missing from the table",
                target
            )));
        };
        self.index.insert(
            (x, y),
            CellEntry {
                label: label.clone(),
                domain_id: target,
            },
        );
        domain.points.push(DomainPoint {
            x,
            y,
            value,
            label: label.clone(),
            domain_id: target,
        });
        Ok(())
    }

    /// Looks up the current domain id of a visited cell.
    fn resolve(&self, position: (usize, usize)) -> DomainResult<DomainId> {
        self.index
            .get(&position)
            .map(|entry| entry.domain_id)
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "cell ({}, {}) consulted as a neighbor but missing from the position index",
                    position.0, position.1
                ))
            })
    }

    /// Merges the domain `source` into `target`: every point of `source`
    /// moves to `target` (index entries rewritten along the way) and the
    /// `source` entry is deleted outright, so no alias to it survives.
    fn merge(&mut self, target_id: DomainId, source_id: DomainId) -> DomainResult<()> {
        let Some(source) = self.domains.remove(&source_id) else {
            return Err(DomainError::invariant(format!(
                "merge source {} not present in the domain table",
                source_id
            )));
        };
        let Some(target) = self.domains.get_mut(&target_id) else {
            return Err(DomainError::invariant(format!(
                "merge target {} not present in the domain table",
                target_id
            )));
        };
        if target.label != source.label {
            return Err(DomainError::invariant(format!(
                "merge of {} into {} would mix labels",
                source_id, target_id
            )));
        }
        trace!(
            "merging domain {} into {} ({} points)",
            source_id,
            target_id,
            source.points.len()
        );

        let mut points = source.points;
        for point in &mut points {
            point.domain_id = target_id;
            match self.index.get_mut(&(point.x, point.y)) {
                Some(entry) => entry.domain_id = target_id,
                None => {
                    return Err(DomainError::invariant(format!(
                        "cell ({}, {}) of merged domain {} missing from the position index",
                        point.x, point.y, source_id
                    )));
                }
            }
        }
        target.points.append(&mut points);
        self.merges += 1;
        Ok(())
    }

    /// Computes bounding boxes over the final point sets and produces the
    /// domain table.
    fn finish(self) -> DomainResult<DomainTable<'g, T, L>> {
        let mut finished = BTreeMap::new();
        for (id, provisional) in self.domains {
            let bounding = bounding_of(&provisional.points)?;
            finished.insert(
                id,
                Domain {
                    domain_id: id,
                    label: provisional.label,
                    bounding,
                    points: provisional.points,
                },
            );
        }
        debug!(
            "labeled {} cells into {} domains ({} merges)",
            self.cells,
            finished.len(),
            self.merges
        );
        Ok(DomainTable::from_domains(finished))
    }
}

/// Bounding box over a non-empty point set; extents are max - min.
fn bounding_of<T, L>(points: &[DomainPoint<'_, T, L>]) -> DomainResult<Bounding> {
    let (x_min, x_max) = min_max(points.iter().map(|point| point.x))?;
    let (y_min, y_max) = min_max(points.iter().map(|point| point.y))?;
    Ok(Bounding::new(x_min, y_min, x_max - x_min, y_max - y_min))
}

fn min_max(values: impl Iterator<Item = usize>) -> DomainResult<(usize, usize)> {
    match values.minmax() {
        MinMaxResult::NoElements => Err(DomainError::invariant(
            "bounding box requested for a domain with no points",
        )),
        MinMaxResult::OneElement(only) => Ok((only, only)),
        MinMaxResult::MinMax(min, max) => Ok((min, max)),
    }
}

/// Runs the scan over a grid with a ready classifier.
fn scan<'g, T, C>(
    grid: &'g [Vec<Option<T>>],
    mut classifier: C,
) -> DomainResult<DomainTable<'g, T, C::Label>>
where
    C: Classifier<T>,
{
    debug!("scanning grid of {} rows", grid.len());
    let mut state = ScanState::new();
    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let Some(value) = cell else {
                continue;
            };
            let label = classifier.classify(value, x, y)?;
            state.visit(x, y, value, label)?;
        }
    }
    state.finish()
}

/// Builder for a labeling run.
///
/// Collects the grid and the classifier, then [`run`](DomainLabeler::run)s
/// the scan. `run` fails with [`DomainError::InvalidInput`], before any
/// processing, if either input was not provided.
///
/// # Usage
///
/// ```rust
/// use connected_domain::labeler::DomainLabeler;
///
/// let grid = vec![
///     vec![Some('a'), Some('a')],
///     vec![Some('a'), Some('b')],
/// ];
/// let table = DomainLabeler::new()
///     .grid(&grid)
///     .classifier(|cell: &char, _x: usize, _y: usize| *cell)
///     .run()?;
/// assert_eq!(table.len(), 2);
/// # Ok::<(), connected_domain::core::DomainError>(())
/// ```
pub struct DomainLabeler<'g, T, C> {
    grid: Option<&'g [Vec<Option<T>>]>,
    classifier: Option<C>,
}

impl<'g, T, C> DomainLabeler<'g, T, C>
where
    C: Classifier<T>,
{
    /// Creates a labeler with neither input set.
    pub fn new() -> Self {
        Self {
            grid: None,
            classifier: None,
        }
    }

    /// Sets the grid to label.
    ///
    /// Rows may have different lengths and may be empty; `None` cells are
    /// absent and take no part in labeling.
    pub fn grid(mut self, grid: &'g [Vec<Option<T>>]) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Sets the classifier deciding which label each cell carries.
    pub fn classifier(mut self, classifier: C) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Runs the scan and returns the domain table.
    ///
    /// # Returns
    ///
    /// The table of live domains, or `InvalidInput` if the grid or the
    /// classifier is missing, or the first error a fallible classifier
    /// produced.
    pub fn run(self) -> DomainResult<DomainTable<'g, T, C::Label>> {
        let grid = self
            .grid
            .ok_or_else(|| DomainError::invalid_input("a grid must be provided"))?;
        let classifier = self
            .classifier
            .ok_or_else(|| DomainError::invalid_input("a classifier must be provided"))?;
        scan(grid, classifier)
    }
}

impl<'g, T, C> Default for DomainLabeler<'g, T, C>
where
    C: Classifier<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the connected domains of a grid in one call.
///
/// Convenience entry point for when both inputs are already in hand; see
/// [`DomainLabeler`] for the builder form.
///
/// # Arguments
///
/// * `grid` - Rows of cells; `None` marks an absent cell.
/// * `classifier` - Maps each cell to its label; see [`Classifier`].
///
/// # Returns
///
/// The table of connected domains, keyed by domain id.
pub fn find_domains<'g, T, C>(
    grid: &'g [Vec<Option<T>>],
    classifier: C,
) -> DomainResult<DomainTable<'g, T, C::Label>>
where
    C: Classifier<T>,
{
    scan(grid, classifier)
}
