//! Arrangement of linked map panels into a grid, similar to R's
//! `layout`.
//!
//! [`plan`] only computes which panel goes where.  Building the
//! nested containers and the view linker over
//! [`LayoutPlan::slots`] is left to the UI layer.

use tracing::trace;
use crate::error::{Error, Result};

/// Number of panels when none is given.
pub const DEFAULT_PANELS: usize = 2;

/// A panel placeholder, identified by its 0-based index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Slot(pub usize);

impl Slot {
    /// The index of the slot in `0 .. n`.
    pub fn index(self) -> usize { self.0 }
}

/// Direction in which a container lays out its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Flow {
    Horizontal,
    Vertical,
}

/// Parameters of a grid layout.
///
/// # Example
///
/// ```
/// use map_brewery::{Grid, Slot};
/// let plan = Grid::new(5).ncol(2).by_row(false).plan();
/// let groups: Vec<&[Slot]> = plan.groups().collect();
/// assert_eq!(groups, [&[Slot(0), Slot(1), Slot(2)][..],
///                     &[Slot(3), Slot(4)]]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    n: usize,
    nrow: Option<usize>,
    ncol: Option<usize>,
    by_row: bool,
}

impl Default for Grid {
    fn default() -> Self { Grid::new(DEFAULT_PANELS) }
}

impl Grid {
    /// A grid of `n` panels filled row by row, with default
    /// dimensions.
    pub fn new(n: usize) -> Self {
        Grid { n, nrow: None, ncol: None, by_row: true }
    }

    /// Build a grid from signed counts, as received from loosely
    /// typed callers.  `None` or `Some(0)` dimensions take their
    /// default; `n` defaults to [`DEFAULT_PANELS`].  Negative values
    /// are rejected.
    pub fn from_signed(n: Option<i64>, nrow: Option<i64>, ncol: Option<i64>,
                       by_row: bool) -> Result<Self> {
        fn count(name: &'static str, v: Option<i64>) -> Result<Option<usize>> {
            v.map(|v| usize::try_from(v)
                  .map_err(|_| Error::invalid(name, v, "must not be negative")))
                .transpose()
        }
        let n = count("n", n)?.unwrap_or(DEFAULT_PANELS);
        let grid = Grid { n, nrow: count("nrow", nrow)?,
                          ncol: count("ncol", ncol)?, by_row };
        Ok(grid)
    }

    /// Number of rows.  Zero means the default, `⌈n / ncol⌉`.
    pub fn nrow(mut self, nrow: usize) -> Self {
        self.nrow = Some(nrow);
        self
    }

    /// Number of columns.  Zero means the default, `⌈√n⌉`.
    pub fn ncol(mut self, ncol: usize) -> Self {
        self.ncol = Some(ncol);
        self
    }

    /// Fill the grid row by row (`true`, the default) or column by
    /// column.
    pub fn by_row(mut self, by_row: bool) -> Self {
        self.by_row = by_row;
        self
    }

    /// Compute the arrangement.  Nothing proportional to the grid
    /// dimensions is allocated, so any counts are accepted.
    pub fn plan(&self) -> LayoutPlan {
        let n = self.n;
        let (outer, inner) = if n == 0 { (0, 0) } else {
            let ncol = self.ncol.filter(|&c| c > 0)
                .unwrap_or_else(|| ceil_sqrt(n));
            let nrow = self.nrow.filter(|&r| r > 0)
                .unwrap_or_else(|| n.div_ceil(ncol));
            // The swap happens after defaulting: for non-square `n` this
            // gives a different grid than defaulting swapped inputs.
            if self.by_row { (nrow, ncol) } else { (ncol, nrow) }
        };
        trace!(n, outer, inner, by_row = self.by_row, "grid layout planned");
        LayoutPlan { outer, inner, by_row: self.by_row,
                     slots: (0 .. n).map(Slot).collect() }
    }
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: usize) -> usize {
    let sq_lt = |c: usize| c.checked_mul(c).map_or(false, |s| s < n);
    let mut c = (n as f64).sqrt() as usize;
    while sq_lt(c) { c += 1 }
    while c > 0 && !sq_lt(c - 1) { c -= 1 }
    c
}

/// Plan a layout of `n` panels (default [`DEFAULT_PANELS`]) on
/// `nrow × ncol` cells.  See [`Grid`] for the defaults.
///
/// # Example
///
/// ```
/// use map_brewery::{layout, Slot};
/// let plan = layout::plan(Some(5), None, Some(2), true);
/// let groups: Vec<&[Slot]> = plan.groups().collect();
/// assert_eq!(groups, [&[Slot(0), Slot(1)][..],
///                     &[Slot(2), Slot(3)],
///                     &[Slot(4)]]);
/// ```
pub fn plan(n: Option<usize>, nrow: Option<usize>, ncol: Option<usize>,
            by_row: bool) -> LayoutPlan {
    Grid { n: n.unwrap_or(DEFAULT_PANELS), nrow, ncol, by_row }.plan()
}

/// The result of planning a grid layout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde",
           serde(into = "PlanData", try_from = "PlanData"))]
pub struct LayoutPlan {
    outer: usize,
    inner: usize,
    by_row: bool,
    slots: Vec<Slot>,
}

impl LayoutPlan {
    /// The outer groups: rows when filled by row, columns otherwise.
    /// There are always [`outer_len`](Self::outer_len) of them.
    /// Groups are never padded: the last non-empty one may be short
    /// and groups past the last slot are empty.
    pub fn groups(&self)
                  -> impl ExactSizeIterator<Item = &[Slot]>
                     + DoubleEndedIterator + '_ {
        (0 .. self.outer).map(move |i| self.group_slots(i))
    }

    /// The `i`th outer group, or `None` if `i >= outer_len()`.
    pub fn group(&self, i: usize) -> Option<&[Slot]> {
        if i < self.outer { Some(self.group_slots(i)) } else { None }
    }

    fn group_slots(&self, i: usize) -> &[Slot] {
        let placed = self.slots.len().min(self.outer.saturating_mul(self.inner));
        let start = i.saturating_mul(self.inner).min(placed);
        let end = start.saturating_add(self.inner).min(placed);
        &self.slots[start .. end]
    }

    /// All slots in index order, including any that do not fit in
    /// the grid.  This is the list to link views over.
    pub fn slots(&self) -> &[Slot] { &self.slots }

    /// Number of rows of the grid as drawn.  When filled by column
    /// this is [`inner_len`](Self::inner_len), not the swapped `nrow`
    /// the grid was planned with: `plan(Some(5), None, Some(2), false)`
    /// has 3 rows, 2 outer groups of 3 slots.
    pub fn nrow(&self) -> usize {
        if self.by_row { self.outer } else { self.inner }
    }

    /// Number of columns of the grid as drawn.  When filled by column
    /// this is [`outer_len`](Self::outer_len).
    pub fn ncol(&self) -> usize {
        if self.by_row { self.inner } else { self.outer }
    }

    /// Number of outer groups (rows when filled by row, columns
    /// otherwise).
    pub fn outer_len(&self) -> usize { self.outer }

    /// Maximum number of slots per group.
    pub fn inner_len(&self) -> usize { self.inner }

    /// Whether slots fill rows first.
    pub fn by_row(&self) -> bool { self.by_row }

    /// How panels are laid out inside a group.
    pub fn inner_flow(&self) -> Flow {
        if self.by_row { Flow::Horizontal } else { Flow::Vertical }
    }

    /// How groups are laid out in the root container.
    pub fn outer_flow(&self) -> Flow {
        if self.by_row { Flow::Vertical } else { Flow::Horizontal }
    }

    /// The `(row, column)` of `slot`, or `None` if it is not placed.
    pub fn cell(&self, slot: Slot) -> Option<(usize, usize)> {
        if self.inner == 0 { return None }
        let (i, j) = (slot.0 / self.inner, slot.0 % self.inner);
        if slot.0 >= self.slots.len() || i >= self.outer { return None }
        Some(if self.by_row { (i, j) } else { (j, i) })
    }

    /// Whether there is no panel to lay out.
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }
}

/// Serialized form of a [`LayoutPlan`], with the groups spelled out.
#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct PlanData {
    outer: usize,
    inner: usize,
    by_row: bool,
    groups: Vec<Vec<Slot>>,
    slots: Vec<Slot>,
}

#[cfg(feature = "serde")]
impl From<LayoutPlan> for PlanData {
    fn from(p: LayoutPlan) -> Self {
        let groups = p.groups().map(|g| g.to_vec()).collect();
        PlanData { outer: p.outer, inner: p.inner, by_row: p.by_row, groups,
                   slots: p.slots }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PlanData> for LayoutPlan {
    type Error = Error;

    fn try_from(d: PlanData) -> Result<Self> {
        if d.slots.iter().enumerate().any(|(i, s)| s.0 != i) {
            return Err(Error::invalid("slots", d.slots.len(),
                                      "slots must be 0 .. n in order"))
        }
        let plan = LayoutPlan { outer: d.outer, inner: d.inner,
                                by_row: d.by_row, slots: d.slots };
        if !plan.groups().eq(d.groups.iter().map(|g| &g[..])) {
            return Err(Error::invalid("groups", d.groups.len(),
                                      "do not match the dimensions"))
        }
        Ok(plan)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn groups(p: &LayoutPlan) -> Vec<Vec<usize>> {
        p.groups().map(|g| g.iter().map(|s| s.index()).collect()).collect()
    }

    #[test]
    fn square_default() {
        let p = plan(Some(4), None, None, true);
        assert_eq!((p.nrow(), p.ncol()), (2, 2));
        assert_eq!(groups(&p), [vec![0, 1], vec![2, 3]]);
        assert_eq!(p.inner_flow(), Flow::Horizontal);
        assert_eq!(p.outer_flow(), Flow::Vertical);
    }

    #[test]
    fn default_count() {
        let p = plan(None, None, None, true);
        assert_eq!(p.slots().len(), 2);
        assert_eq!(groups(&p), [vec![0, 1]]);
        assert_eq!(Grid::default().plan(), p);
    }

    #[test]
    fn short_last_row() {
        let p = plan(Some(5), None, Some(2), true);
        assert_eq!((p.nrow(), p.ncol()), (3, 2));
        assert_eq!(groups(&p), [vec![0, 1], vec![2, 3], vec![4]]);
    }

    #[test]
    fn swap_after_defaulting() {
        let p = plan(Some(5), None, Some(2), false);
        // ncol = 2, nrow = 3, then swapped: 2 columns of 3.
        assert_eq!((p.outer_len(), p.inner_len()), (2, 3));
        assert_eq!((p.nrow(), p.ncol()), (3, 2));
        assert_eq!(groups(&p), [vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(p.inner_flow(), Flow::Vertical);
        assert_eq!(p.outer_flow(), Flow::Horizontal);
        assert_eq!(p.cell(Slot(4)), Some((1, 1)));
        assert_eq!(p.cell(Slot(2)), Some((2, 0)));
    }

    #[test]
    fn empty() {
        let p = plan(Some(0), None, None, true);
        assert_eq!(p.groups().len(), 0);
        assert!(p.is_empty());
        assert_eq!(p.cell(Slot(0)), None);
        let p = plan(Some(0), Some(3), Some(2), false);
        assert_eq!((p.groups().len(), p.nrow(), p.ncol()), (0, 0, 0));
    }

    #[test]
    fn zero_dimension_is_default() {
        assert_eq!(plan(Some(7), Some(0), Some(0), true),
                   plan(Some(7), None, None, true));
    }

    #[test]
    fn too_small_grid_keeps_all_slots() {
        let p = Grid::new(7).nrow(2).ncol(2).plan();
        assert_eq!(groups(&p), [vec![0, 1], vec![2, 3]]);
        assert_eq!(p.slots().len(), 7);
        assert_eq!(p.cell(Slot(5)), None);
    }

    #[test]
    fn empty_groups_are_kept() {
        let p = Grid::new(3).nrow(3).ncol(3).plan();
        assert_eq!(p.groups().len(), p.nrow());
        assert_eq!(groups(&p), [vec![0, 1, 2], vec![], vec![]]);
        assert_eq!(p.group(1), Some(&[][..]));
        assert_eq!(p.group(3), None);
        let p = Grid::new(2).nrow(2).ncol(3).by_row(false).plan();
        assert_eq!(groups(&p), [vec![0, 1], vec![], vec![]]);
    }

    #[test]
    fn huge_dimensions() {
        let p = Grid::new(1).nrow(3).ncol(usize::MAX).plan();
        assert_eq!((p.outer_len(), p.inner_len()), (3, usize::MAX));
        assert_eq!(groups(&p), [vec![0], vec![], vec![]]);
        assert_eq!(p.cell(Slot(0)), Some((0, 0)));

        let p = Grid::new(1).nrow(usize::MAX).ncol(1).plan();
        assert_eq!(p.groups().len(), usize::MAX);
        assert_eq!(p.groups().next(), Some(&[Slot(0)][..]));
        assert_eq!(p.groups().next_back(), Some(&[][..]));
        assert_eq!(p.group(usize::MAX - 1), Some(&[][..]));

        let p = Grid::new(5).nrow(usize::MAX).ncol(usize::MAX).by_row(false)
            .plan();
        assert_eq!(p.groups().next().map(<[Slot]>::len), Some(5));
        assert_eq!(p.cell(Slot(4)), Some((4, 0)));
        assert_eq!(ceil_sqrt(usize::MAX), 1 << (usize::BITS / 2));
    }

    #[test]
    fn idempotent() {
        let g = Grid::new(11).nrow(4).by_row(false);
        assert_eq!(g.plan(), g.plan());
    }

    #[test]
    fn signed_counts() {
        assert_eq!(Grid::from_signed(Some(5), None, Some(2), false).unwrap(),
                   Grid::new(5).ncol(2).by_row(false));
        assert_eq!(Grid::from_signed(None, None, None, true).unwrap(),
                   Grid::default());
        for (n, r, c) in [(Some(-1), None, None), (Some(3), Some(-2), None),
                          (Some(3), None, Some(-1))] {
            assert!(matches!(Grid::from_signed(n, r, c, true),
                             Err(Error::InvalidArgument { .. })));
        }
    }

    #[test]
    fn ceil_sqrt_exact() {
        let expected = [0, 1, 2, 2, 2, 3, 3, 3, 3, 3, 4];
        for (n, &c) in expected.iter().enumerate() {
            assert_eq!(ceil_sqrt(n), c, "n = {n}");
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn defaults_place_every_slot_once(n in 0usize .. 200,
                                              by_row in any::<bool>()) {
                let p = plan(Some(n), None, None, by_row);
                let flat: Vec<usize> = p.groups().flatten()
                    .map(|s| s.index()).collect();
                prop_assert_eq!(flat, (0 .. n).collect::<Vec<_>>());
                prop_assert!(p.nrow() * p.ncol() >= n);
            }

            #[test]
            fn groups_are_bounded(n in 0usize .. 100, r in 0usize .. 12,
                                  c in 0usize .. 12, by_row in any::<bool>()) {
                let p = Grid::new(n).nrow(r).ncol(c).by_row(by_row).plan();
                let width = if by_row { p.ncol() } else { p.nrow() };
                prop_assert_eq!(p.groups().len(), p.outer_len());
                for g in p.groups() {
                    prop_assert!(g.len() <= width);
                }
                for s in p.groups().flatten() {
                    let (row, col) = p.cell(*s).unwrap();
                    prop_assert!(row < p.nrow() && col < p.ncol());
                }
                prop_assert_eq!(p.slots().len(), n);
            }
        }
    }
}
