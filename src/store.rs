//! Canonical list of cores.
//!
//! The store owns the only copy of the list. Reads hand out copies, and every
//! write goes through [`RectStore::sanitize`], so the `0 <= x1 <= x2 <= 1`,
//! `0 <= y1 <= y2 <= 1` invariant cannot be broken from outside.

use crate::constants::{FIRST_RECT, NEXT_RECT_FALLBACK_HEIGHT, NEXT_RECT_GAP};
use crate::geometry::ensure_min_size;
use crate::model::{MinSize, Rect};
use crate::sort::{IndexRemap, SortOptions, SortResult, stable_sort};

/// Storage for the cores of one image.
#[derive(Debug, Clone)]
pub struct RectStore {
    rects: Vec<Rect>,
    min_size: MinSize,
    /// The list as last reported to the host, for change detection.
    last_reported: Vec<Rect>,
}

impl RectStore {
    pub fn new(min_size: MinSize) -> Self {
        Self {
            rects: Vec::new(),
            min_size,
            last_reported: Vec::new(),
        }
    }

    /// A store seeded with host-supplied cores. The seed counts as reported.
    pub fn with_rects(min_size: MinSize, rects: &[Rect]) -> Self {
        let mut store = Self::new(min_size);
        store.replace_all(rects);
        store
    }

    pub fn min_size(&self) -> MinSize {
        self.min_size
    }

    /// Update the minimum size, e.g. after the canvas size changed.
    /// Existing cores are left untouched until they are next written.
    pub fn set_min_size(&mut self, min_size: MinSize) {
        self.min_size = min_size;
    }

    /// Bring an arbitrary rectangle into store shape: ordered, inside
    /// `[0, 1]`, at least the minimum size. NaN coordinates count as `0`.
    pub fn sanitize(&self, rect: &Rect) -> Rect {
        if rect.is_malformed() {
            log::warn!("Store: NaN coordinate in {:?}, treating it as 0", rect);
        }
        ensure_min_size(rect, self.min_size)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Copy of the core at `index`.
    pub fn get(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied()
    }

    /// Copy of the whole list.
    pub fn rects(&self) -> Vec<Rect> {
        self.rects.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    /// Append a core and return its index.
    pub fn add(&mut self, rect: Rect) -> usize {
        let rect = self.sanitize(&rect);
        self.rects.push(rect);
        log::debug!("Store: added core #{} {:?}", self.rects.len() - 1, rect);
        self.rects.len() - 1
    }

    /// Remove the core at `index`.
    ///
    /// Returns the remap for selection/hover, or `None` when `index` is out of
    /// range (nothing changes).
    pub fn remove_at(&mut self, index: usize) -> Option<IndexRemap> {
        if index >= self.rects.len() {
            log::warn!("Store: remove_at({}) out of range (len {})", index, self.rects.len());
            return None;
        }
        let remap = IndexRemap::removal(self.rects.len(), index);
        let removed = self.rects.remove(index);
        log::debug!("Store: removed core #{} {:?}", index, removed);
        Some(remap)
    }

    /// Overwrite the core at `index` in place. Returns `false` when out of range.
    pub fn replace_at(&mut self, index: usize, rect: Rect) -> bool {
        let rect = self.sanitize(&rect);
        match self.rects.get_mut(index) {
            Some(slot) => {
                *slot = rect;
                true
            }
            None => {
                log::warn!("Store: replace_at({}) out of range (len {})", index, self.rects.len());
                false
            }
        }
    }

    /// Replace the whole list with host-supplied cores.
    ///
    /// The new list becomes the reported baseline, so it is not echoed back to
    /// the host. Returns `false` when the list is unchanged.
    pub fn replace_all(&mut self, rects: &[Rect]) -> bool {
        let next: Vec<Rect> = rects.iter().map(|r| self.sanitize(r)).collect();
        if next == self.rects {
            return false;
        }
        log::debug!("Store: replaced all cores ({} -> {})", self.rects.len(), next.len());
        self.last_reported = next.clone();
        self.rects = next;
        true
    }

    /// Give every core the mean height of all cores, keeping each top edge.
    /// Returns `false` on an empty store.
    pub fn normalize_heights(&mut self) -> bool {
        if self.rects.is_empty() {
            return false;
        }

        let mean = self.rects.iter().map(Rect::height).sum::<f64>() / self.rects.len() as f64;
        log::debug!("Store: normalizing {} heights to {:.6}", self.rects.len(), mean);

        let normalized: Vec<Rect> = self
            .rects
            .iter()
            .map(|r| Rect::new(r.x1, r.y1, r.x2, (r.y1 + mean).min(1.0)))
            .collect();
        self.rects = normalized.iter().map(|r| self.sanitize(r)).collect();
        true
    }

    /// Reorder the list. The returned result carries the index maps.
    pub fn apply_sort(&mut self, options: &SortOptions) -> SortResult {
        let result = stable_sort(&self.rects, options);
        if !result.is_identity() {
            log::debug!("Store: sorted by {:?} {:?}", options.axis, options.direction);
            self.rects = result.rects.clone();
        }
        result
    }

    /// The core "add" creates when no explicit one is given: directly below
    /// the last core with the same horizontal extent and height.
    pub fn next_rect(&self) -> Rect {
        let Some(last) = self.rects.last() else {
            return self.sanitize(&Rect::from(FIRST_RECT));
        };

        let height = last.height();
        let height = if height > 0.0 {
            height
        } else {
            NEXT_RECT_FALLBACK_HEIGHT
        };
        let top = last.y2 + NEXT_RECT_GAP;
        self.sanitize(&Rect::new(last.x1, top, last.x2, top + height))
    }

    /// The list if it differs from what the host last saw, marking it seen.
    pub fn take_change(&mut self) -> Option<Vec<Rect>> {
        if self.rects == self.last_reported {
            return None;
        }
        self.last_reported = self.rects.clone();
        Some(self.rects.clone())
    }
}

impl Default for RectStore {
    fn default() -> Self {
        Self::new(MinSize::uniform(0.0))
    }
}
