//! Multi-resolution coverage maps (MOC) over the NESTED quad-tree.
//!
//! A [`CoverageMap`] holds the sky area it covers at a single working order,
//! as ranges of NESTED pixel ids. Cells of coarser orders are expanded into
//! their descendants when a map is built, so union and complement never see
//! overlapping cells. A minimal mixed-order cell list is only produced on
//! request by [`CoverageMap::normalized`].

use std::fmt;

use crate::constants::HEALPIX_MAX_ORDER;
use crate::errors::{PixelizationError, PixelizationResult};
use crate::pixel::PixelRangeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[inline]
fn npix(order: u8) -> u64 {
    12 << (2 * order as u32)
}

/// A node of the NESTED quad-tree: pixel `pixel` at order `order`.
///
/// Cells order by order first, then by pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverageCell {
    order: u8,
    pixel: u64,
}

impl CoverageCell {
    pub fn new(order: u8, pixel: u64) -> PixelizationResult<Self> {
        if order > HEALPIX_MAX_ORDER {
            return Err(PixelizationError::OrderOutOfRange {
                order,
                max: HEALPIX_MAX_ORDER,
            });
        }
        let npix = npix(order);
        if pixel >= npix {
            return Err(PixelizationError::PixelOutOfRange { order, pixel, npix });
        }
        Ok(Self { order, pixel })
    }

    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn pixel(&self) -> u64 {
        self.pixel
    }

    pub fn parent(&self) -> Option<Self> {
        (self.order > 0).then(|| Self {
            order: self.order - 1,
            pixel: self.pixel >> 2,
        })
    }

    pub fn children(&self) -> Option<[Self; 4]> {
        if self.order >= HEALPIX_MAX_ORDER {
            return None;
        }
        let order = self.order + 1;
        let first = self.pixel << 2;
        Some([0, 1, 2, 3].map(|i| Self {
            order,
            pixel: first + i,
        }))
    }

    /// The pixels this cell spans at the finer (or equal) `order`, as a
    /// half-open range.
    pub fn range_at(&self, order: u8) -> Option<(u64, u64)> {
        if order < self.order {
            return None;
        }
        let shift = 2 * (order - self.order) as u32;
        Some((self.pixel << shift, (self.pixel + 1) << shift))
    }
}

impl fmt::Display for CoverageCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.order, self.pixel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverageMap {
    order: u8,
    ranges: PixelRangeSet,
}

impl CoverageMap {
    pub fn empty(order: u8) -> Self {
        Self {
            order,
            ranges: PixelRangeSet::new(),
        }
    }

    /// Every cell of `order`.
    pub fn full_sky(order: u8) -> Self {
        Self {
            order,
            ranges: PixelRangeSet::full(npix(order)),
        }
    }

    /// Wraps NESTED pixel ranges at `order`.
    pub fn from_ranges(order: u8, ranges: PixelRangeSet) -> PixelizationResult<Self> {
        if order > HEALPIX_MAX_ORDER {
            return Err(PixelizationError::OrderOutOfRange {
                order,
                max: HEALPIX_MAX_ORDER,
            });
        }
        let npix = npix(order);
        if let Some(&(_, end)) = ranges.ranges().last() {
            if end > npix {
                return Err(PixelizationError::PixelOutOfRange {
                    order,
                    pixel: end - 1,
                    npix,
                });
            }
        }
        Ok(Self { order, ranges })
    }

    /// Builds a map from cells of any orders. The working order is the
    /// finest order present; coarser cells are expanded to it.
    pub fn from_cells(cells: impl IntoIterator<Item = CoverageCell>) -> Self {
        let cells: Vec<CoverageCell> = cells.into_iter().collect();
        let order = cells.iter().map(CoverageCell::order).max().unwrap_or(0);
        let ranges = PixelRangeSet::from_ranges(cells.iter().filter_map(|c| c.range_at(order)));
        Self { order, ranges }
    }

    /// The working order every cell of the map lives at.
    pub fn order(&self) -> u8 {
        self.order
    }

    /// Covered NESTED pixels at the working order.
    pub fn ranges(&self) -> &PixelRangeSet {
        &self.ranges
    }

    pub fn into_ranges(self) -> PixelRangeSet {
        self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of cells at the working order.
    pub fn cell_count(&self) -> u64 {
        self.ranges.pixel_count()
    }

    /// Cells at the working order, in increasing pixel order.
    pub fn cells(&self) -> impl Iterator<Item = CoverageCell> + '_ {
        let order = self.order;
        self.ranges.pixels().map(move |pixel| CoverageCell { order, pixel })
    }

    /// The same area at another working order.
    ///
    /// Refining is exact. Coarsening keeps every parent with at least one
    /// covered child, so the result may grow. `None` above the maximum order.
    pub fn at_order(&self, order: u8) -> Option<Self> {
        if order > HEALPIX_MAX_ORDER {
            return None;
        }
        let ranges = if order >= self.order {
            let shift = 2 * (order - self.order) as u32;
            PixelRangeSet::from_ranges(
                self.ranges
                    .ranges()
                    .iter()
                    .map(|&(s, e)| (s << shift, e << shift)),
            )
        } else {
            let shift = 2 * (self.order - order) as u32;
            let mask = (1u64 << shift) - 1;
            PixelRangeSet::from_ranges(
                self.ranges
                    .ranges()
                    .iter()
                    .map(|&(s, e)| (s >> shift, (e + mask) >> shift)),
            )
        };
        Some(Self { order, ranges })
    }

    /// Whether the whole area of `cell` is covered.
    ///
    /// A cell finer than the working order is covered when its ancestor at
    /// the working order is.
    pub fn contains(&self, cell: &CoverageCell) -> bool {
        if cell.order >= self.order {
            let shift = 2 * (cell.order - self.order) as u32;
            return self.ranges.contains(cell.pixel >> shift);
        }
        match cell.range_at(self.order) {
            Some((start, end)) => {
                let span = PixelRangeSet::from_ranges([(start, end)]);
                self.ranges.intersection(&span).pixel_count() == end - start
            }
            None => false,
        }
    }

    /// Cells covered by either map, at the finer of the two working orders.
    pub fn union(&self, other: &Self) -> Self {
        let order = self.order.max(other.order);
        let (a, b) = (self.expanded(order), other.expanded(order));
        Self {
            order,
            ranges: a.union(&b),
        }
    }

    /// Cells covered by both maps, at the finer of the two working orders.
    pub fn intersection(&self, other: &Self) -> Self {
        let order = self.order.max(other.order);
        let (a, b) = (self.expanded(order), other.expanded(order));
        Self {
            order,
            ranges: a.intersection(&b),
        }
    }

    /// The rest of the sky at the working order.
    pub fn complement(&self) -> Self {
        Self {
            order: self.order,
            ranges: self.ranges.complement(npix(self.order)),
        }
    }

    fn expanded(&self, order: u8) -> PixelRangeSet {
        match self.at_order(order) {
            Some(map) => map.ranges,
            None => self.ranges.clone(),
        }
    }

    /// The smallest set of mixed-order cells covering the same area:
    /// every complete group of four siblings is replaced by its parent,
    /// recursively. Sorted by order, then pixel.
    pub fn normalized(&self) -> Vec<CoverageCell> {
        let mut cells = Vec::new();
        for &(start, end) in self.ranges.ranges() {
            let mut pixel = start;
            while pixel < end {
                let aligned = if pixel == 0 {
                    self.order as u32
                } else {
                    (pixel.trailing_zeros() / 2).min(self.order as u32)
                };
                let fits = ((end - pixel).ilog2() / 2).min(self.order as u32);
                let levels = aligned.min(fits);
                cells.push(CoverageCell {
                    order: self.order - levels as u8,
                    pixel: pixel >> (2 * levels),
                });
                pixel += 1u64 << (2 * levels);
            }
        }
        cells.sort_unstable();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(order: u8, pixel: u64) -> CoverageCell {
        CoverageCell::new(order, pixel).unwrap()
    }

    #[test]
    fn test_cell_validation() {
        assert!(CoverageCell::new(0, 11).is_ok());
        assert!(matches!(
            CoverageCell::new(0, 12),
            Err(PixelizationError::PixelOutOfRange { .. })
        ));
        assert!(matches!(
            CoverageCell::new(30, 0),
            Err(PixelizationError::OrderOutOfRange { .. })
        ));
    }

    #[test]
    fn test_cell_navigation() {
        let c = cell(3, 77);
        assert_eq!(c.parent(), Some(cell(2, 19)));
        let children = c.children().unwrap();
        assert_eq!(children[0], cell(4, 308));
        assert_eq!(children[3], cell(4, 311));
        assert!(children.iter().all(|k| k.parent() == Some(c)));
        assert_eq!(cell(0, 5).parent(), None);
        assert_eq!(c.range_at(5), Some((77 * 16, 78 * 16)));
        assert_eq!(c.range_at(2), None);
        assert_eq!(c.to_string(), "3/77");
    }

    #[test]
    fn test_cell_ordering() {
        let mut cells = vec![cell(2, 1), cell(1, 40), cell(1, 3), cell(0, 11)];
        cells.sort();
        assert_eq!(cells, vec![cell(0, 11), cell(1, 3), cell(1, 40), cell(2, 1)]);
    }

    #[test]
    fn test_from_cells_expands_to_finest_order() {
        let map = CoverageMap::from_cells([cell(0, 0), cell(1, 4), cell(1, 9)]);
        assert_eq!(map.order(), 1);
        assert_eq!(map.ranges().ranges(), &[(0, 5), (9, 10)]);
        assert_eq!(map.cell_count(), 6);
        assert!(CoverageMap::from_cells(Vec::new()).is_empty());
    }

    #[test]
    fn test_from_ranges_rejects_overflow() {
        let ranges = PixelRangeSet::from_ranges([(40, 49)]);
        assert!(CoverageMap::from_ranges(1, ranges.clone()).is_err());
        assert!(CoverageMap::from_ranges(2, ranges).is_ok());
    }

    #[test]
    fn test_complement_partitions_sky() {
        let map = CoverageMap::from_cells([cell(2, 5), cell(2, 6), cell(2, 100)]);
        let rest = map.complement();
        assert_eq!(map.cell_count() + rest.cell_count(), 192);
        assert!(map.intersection(&rest).is_empty());
        assert_eq!(map.union(&rest), CoverageMap::full_sky(2));
        assert_eq!(rest.complement(), map);
    }

    #[test]
    fn test_union_uses_finer_order() {
        let coarse = CoverageMap::from_cells([cell(0, 1)]);
        let fine = CoverageMap::from_cells([cell(2, 0)]);
        let union = coarse.union(&fine);
        assert_eq!(union.order(), 2);
        assert_eq!(union.cell_count(), 16 + 1);
        assert!(union.contains(&cell(0, 1)));
        assert!(!union.contains(&cell(0, 0)));
        assert!(union.contains(&cell(2, 0)));
        assert!(union.contains(&cell(5, 0)));
    }

    #[test]
    fn test_contains_coarser_cell_requires_full_span() {
        let map = CoverageMap::from_cells([cell(1, 4), cell(1, 5), cell(1, 6)]);
        assert!(!map.contains(&cell(0, 1)));
        let map = map.union(&CoverageMap::from_cells([cell(1, 7)]));
        assert!(map.contains(&cell(0, 1)));
    }

    #[test]
    fn test_normalized_merges_siblings() {
        let map = CoverageMap::from_cells((4..8).map(|p| cell(1, p)).chain([cell(1, 9)]));
        assert_eq!(map.normalized(), vec![cell(0, 1), cell(1, 9)]);
        // Normalization is a view; the map itself keeps its working order.
        assert_eq!(map.order(), 1);
        assert_eq!(map.cell_count(), 5);
        assert_eq!(CoverageMap::from_cells(map.normalized()), map);
    }

    #[test]
    fn test_normalized_full_sky() {
        let expected: Vec<CoverageCell> = (0..12).map(|p| cell(0, p)).collect();
        assert_eq!(CoverageMap::full_sky(6).normalized(), expected);
    }

    #[test]
    fn test_at_order() {
        let map = CoverageMap::from_cells([cell(1, 3)]);
        let finer = map.at_order(3).unwrap();
        assert_eq!(finer.ranges().ranges(), &[(48, 64)]);
        assert_eq!(finer.at_order(1).unwrap(), map);
        assert!(map.at_order(30).is_none());
    }

    #[test]
    fn test_at_order_coarsens_partial_parents() {
        let map = CoverageMap::from_cells([cell(1, 3), cell(2, 17), cell(3, 200)]);
        let coarse = map.at_order(0).unwrap();
        assert_eq!(coarse.order(), 0);
        assert_eq!(coarse.ranges().ranges(), &[(0, 2), (3, 4)]);
        assert!(coarse.contains(&cell(0, 1)));
        assert!(!coarse.contains(&cell(0, 2)));

        let parent = map.at_order(1).unwrap();
        assert_eq!(parent.ranges().ranges(), &[(3, 5), (12, 13)]);
    }
}
