//! Stable ordering of cores with explicit index maps.
//!
//! Every reorder produces `old_to_new`/`new_to_old` bijections so callers can
//! carry "which core is selected" across the reorder instead of the raw index.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::Rect;

/// Key a sort orders cores by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAxis {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    Area,
    /// Keep the current order.
    None,
}

impl SortAxis {
    /// Key of a core along this axis. `None` has no key.
    pub fn key(&self, rect: &Rect) -> Option<f64> {
        match self {
            SortAxis::Top => Some(rect.y1),
            SortAxis::Bottom => Some(rect.y2),
            SortAxis::Left => Some(rect.x1),
            SortAxis::Right => Some(rect.x2),
            SortAxis::Area => Some(rect.area()),
            SortAxis::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Caller-supplied ordering of two cores.
///
/// Must be consistent with a total order; it is not checked at runtime.
pub type SortComparator = Rc<dyn Fn(&Rect, &Rect) -> Ordering>;

/// How cores are ordered.
#[derive(Clone, Default)]
pub struct SortOptions {
    pub axis: SortAxis,
    pub direction: SortDirection,
    /// Replaces the axis key when set. Direction still applies.
    pub comparator: Option<SortComparator>,
}

impl SortOptions {
    pub fn new(axis: SortAxis, direction: SortDirection) -> Self {
        Self {
            axis,
            direction,
            comparator: None,
        }
    }

    pub fn with_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Rect, &Rect) -> Ordering + 'static,
    {
        self.comparator = Some(Rc::new(comparator));
        self
    }

    /// Same options with the direction flipped.
    pub fn toggled(&self) -> Self {
        Self {
            direction: self.direction.toggled(),
            ..self.clone()
        }
    }

    /// Whether sorting with these options can change the order at all.
    pub fn reorders(&self) -> bool {
        self.comparator.is_some() || self.axis != SortAxis::None
    }

    pub fn top_to_bottom() -> Self {
        Self::new(SortAxis::Top, SortDirection::Asc)
    }

    pub fn bottom_to_top() -> Self {
        Self::new(SortAxis::Bottom, SortDirection::Desc)
    }

    pub fn left_to_right() -> Self {
        Self::new(SortAxis::Left, SortDirection::Asc)
    }

    pub fn right_to_left() -> Self {
        Self::new(SortAxis::Right, SortDirection::Desc)
    }
}

impl fmt::Debug for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortOptions")
            .field("axis", &self.axis)
            .field("direction", &self.direction)
            .field("comparator", &self.comparator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Outcome of [`stable_sort`].
#[derive(Debug, Clone, PartialEq)]
pub struct SortResult {
    pub rects: Vec<Rect>,
    /// `old_to_new[original_index] = new_index`
    pub old_to_new: Vec<usize>,
    /// `new_to_old[new_index] = original_index`
    pub new_to_old: Vec<usize>,
}

impl SortResult {
    /// Whether the sort left every core in place.
    pub fn is_identity(&self) -> bool {
        self.old_to_new.iter().enumerate().all(|(i, &n)| i == n)
    }

    pub fn remap(&self) -> IndexRemap {
        IndexRemap::from_old_to_new(&self.old_to_new)
    }
}

/// Compare two keys, NaN last regardless of direction.
fn compare_keys(a: f64, b: f64, direction: SortDirection) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.partial_cmp(&b).unwrap_or(Ordering::Equal)),
    }
}

/// Sort cores deterministically and report where each one went.
///
/// Ties, including exactly equal keys, keep their original relative order, so
/// sorting an already sorted list yields identity maps.
pub fn stable_sort(rects: &[Rect], options: &SortOptions) -> SortResult {
    let mut new_to_old: Vec<usize> = (0..rects.len()).collect();

    if let Some(comparator) = &options.comparator {
        new_to_old.sort_by(|&a, &b| {
            options
                .direction
                .apply(comparator(&rects[a], &rects[b]))
                .then(a.cmp(&b))
        });
    } else if options.axis != SortAxis::None {
        let keys: Vec<f64> = rects
            .iter()
            .map(|rect| options.axis.key(rect).unwrap_or(0.0))
            .collect();
        new_to_old.sort_by(|&a, &b| {
            compare_keys(keys[a], keys[b], options.direction).then(a.cmp(&b))
        });
    }

    let mut old_to_new = vec![0; rects.len()];
    for (new_index, &old_index) in new_to_old.iter().enumerate() {
        old_to_new[old_index] = new_index;
    }

    SortResult {
        rects: new_to_old.iter().map(|&i| rects[i]).collect(),
        old_to_new,
        new_to_old,
    }
}

/// Where each index of a list ends up after a structural change.
///
/// `None` marks an index whose element no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRemap {
    map: Vec<Option<usize>>,
}

impl IndexRemap {
    /// Nothing moves.
    pub fn identity(len: usize) -> Self {
        Self {
            map: (0..len).map(Some).collect(),
        }
    }

    pub fn from_old_to_new(old_to_new: &[usize]) -> Self {
        Self {
            map: old_to_new.iter().copied().map(Some).collect(),
        }
    }

    /// Removing `index` from a list of `len`: later elements shift down by one.
    pub fn removal(len: usize, index: usize) -> Self {
        Self {
            map: (0..len)
                .map(|i| match i.cmp(&index) {
                    Ordering::Less => Some(i),
                    Ordering::Equal => None,
                    Ordering::Greater => Some(i - 1),
                })
                .collect(),
        }
    }

    /// Where `index` ends up. Unknown indices map to `None`.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.map.get(index).copied().flatten()
    }

    /// Remap an optional selection/hover index.
    pub fn apply(&self, index: Option<usize>) -> Option<usize> {
        index.and_then(|i| self.get(i))
    }

    /// This remap followed by `next`.
    pub fn then(&self, next: &IndexRemap) -> Self {
        Self {
            map: self.map.iter().map(|i| i.and_then(|i| next.get(i))).collect(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, m)| *m == Some(i))
    }
}
