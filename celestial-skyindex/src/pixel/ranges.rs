use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of pixel ids stored as sorted, disjoint, non-adjacent half-open
/// ranges `[start, end)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelRangeSet {
    ranges: Vec<(u64, u64)>,
}

impl PixelRangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pixel in `[0, npix)`.
    pub fn full(npix: u64) -> Self {
        Self::from_ranges([(0, npix)])
    }

    /// Builds a set from arbitrary half-open ranges, in any order, possibly
    /// overlapping. Empty ranges are ignored.
    pub fn from_ranges(ranges: impl IntoIterator<Item = (u64, u64)>) -> Self {
        let mut input: Vec<(u64, u64)> = ranges.into_iter().filter(|(s, e)| s < e).collect();
        input.sort_unstable();
        let mut merged: Vec<(u64, u64)> = Vec::with_capacity(input.len());
        for (start, end) in input {
            match merged.last_mut() {
                Some(last) if start <= last.1 => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }
        Self { ranges: merged }
    }

    pub fn from_pixels(pixels: impl IntoIterator<Item = u64>) -> Self {
        let mut pixels: Vec<u64> = pixels.into_iter().collect();
        pixels.sort_unstable();
        pixels.dedup();
        let mut ranges: Vec<(u64, u64)> = Vec::new();
        for p in pixels {
            match ranges.last_mut() {
                Some(last) if last.1 == p => last.1 = p + 1,
                _ => ranges.push((p, p + 1)),
            }
        }
        Self { ranges }
    }

    pub fn ranges(&self) -> &[(u64, u64)] {
        &self.ranges
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn pixel_count(&self) -> u64 {
        self.ranges.iter().map(|(s, e)| e - s).sum()
    }

    pub fn contains(&self, pixel: u64) -> bool {
        let idx = self.ranges.partition_point(|&(_, end)| end <= pixel);
        self.ranges
            .get(idx)
            .is_some_and(|&(start, _)| start <= pixel)
    }

    /// Iterates over individual pixel ids in increasing order.
    pub fn pixels(&self) -> impl Iterator<Item = u64> + '_ {
        self.ranges.iter().flat_map(|&(s, e)| s..e)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_ranges(self.ranges.iter().chain(other.ranges.iter()).copied())
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let (a0, a1) = self.ranges[i];
            let (b0, b1) = other.ranges[j];
            let start = a0.max(b0);
            let end = a1.min(b1);
            if start < end {
                out.push((start, end));
            }
            if a1 < b1 {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self { ranges: out }
    }

    /// Pixels of `[0, npix)` not in this set.
    pub fn complement(&self, npix: u64) -> Self {
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        let mut cursor = 0;
        for &(start, end) in &self.ranges {
            if start >= npix {
                break;
            }
            if start > cursor {
                out.push((cursor, start));
            }
            cursor = end;
        }
        if cursor < npix {
            out.push((cursor, npix));
        }
        Self { ranges: out }
    }
}

impl FromIterator<u64> for PixelRangeSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::from_pixels(iter)
    }
}

impl fmt::Display for PixelRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (s, e)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if e - s == 1 {
                write!(f, "{s}")?;
            } else {
                write!(f, "{s}..{e}")?;
            }
        }
        f.write_str("]")
    }
}
