//! Pointer-driven drawing, moving and resizing of cores.
//!
//! [`InteractionController`] owns the gesture state, selection and hover. It
//! receives pointer positions already converted to normalized, unrotated
//! space and writes drag results straight into the [`RectStore`]. Anything
//! that needs the host (re-sorting, notifications) is left to the caller via
//! the returned [`GestureEnd`].

use crate::geometry::{clamp_rect, ensure_min_size, hit_test_handle, round_rect, to_pixels};
use crate::model::{CanvasSize, Handle, MinSize, Point, Rect};
use crate::sort::IndexRemap;
use crate::store::RectStore;

/// The single active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture; pointer moves update hover.
    #[default]
    Idle,
    /// Drawing a new core from `origin` to `current`.
    Drawing { origin: Point, current: Point },
    /// Dragging one edge of core `index`.
    Resizing {
        index: usize,
        handle: Handle,
        start: Point,
        initial: Rect,
    },
    /// Dragging core `index` as a whole.
    Moving {
        index: usize,
        start: Point,
        initial: Rect,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, InteractionState::Drawing { .. })
    }

    /// Index of the core being dragged, if any.
    pub fn drag_index(&self) -> Option<usize> {
        match self {
            InteractionState::Resizing { index, .. } | InteractionState::Moving { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }

    /// The handle being dragged: an edge, `Inside` while moving, else `None`.
    pub fn drag_handle(&self) -> Handle {
        match self {
            InteractionState::Resizing { handle, .. } => *handle,
            InteractionState::Moving { .. } => Handle::Inside,
            _ => Handle::None,
        }
    }
}

/// Per-event parameters that depend on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub canvas: CanvasSize,
    /// Handle grab radius in canvas pixels.
    pub hit_radius: f64,
    pub min_size: MinSize,
}

/// How a gesture finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// No gesture was in progress.
    None,
    /// A draw produced a core large enough to keep. It is not in the store yet.
    Drawn(Rect),
    /// A draw was too small or aborted.
    Discarded,
    /// A move/resize ended. The store already holds the result.
    Edited { index: usize },
}

/// Indices in hit-test order: the selected core first, then the rest from
/// top-most (last drawn) down.
pub fn hit_order(len: usize, selected: Option<usize>) -> Vec<usize> {
    let selected = selected.filter(|&s| s < len);
    selected
        .into_iter()
        .chain((0..len).rev().filter(|&i| Some(i) != selected))
        .collect()
}

/// Find the core and handle under a normalized point.
pub fn find_hit(
    store: &RectStore,
    point: Point,
    ctx: &GestureContext,
    selected: Option<usize>,
) -> Option<(usize, Handle)> {
    let point_px = ctx.canvas.denormalize_point(point);
    hit_order(store.len(), selected).into_iter().find_map(|index| {
        let rect = store.get(index)?;
        let handle = hit_test_handle(&point_px, &to_pixels(&rect, ctx.canvas), ctx.hit_radius);
        handle.is_hit().then_some((index, handle))
    })
}

/// Live preview of a draw: the box between both points, kept on the canvas
/// and grown to the minimum size.
pub fn draft_rect(origin: Point, current: Point, min: MinSize) -> Rect {
    ensure_min_size(&raw_draft(origin, current), min)
}

fn raw_draft(origin: Point, current: Point) -> Rect {
    clamp_rect(&Rect::from_corners(origin, current))
}

/// Drag one edge of `initial` by `delta`. The opposite edge stays fixed and
/// the dragged edge stops `min` short of it.
pub fn resize_rect(initial: &Rect, handle: Handle, delta: Point, min: MinSize) -> Rect {
    let mut rect = *initial;
    match handle {
        Handle::Top => rect.y1 = (initial.y1 + delta.y).min(initial.y2 - min.height).max(0.0),
        Handle::Bottom => rect.y2 = (initial.y2 + delta.y).max(initial.y1 + min.height).min(1.0),
        Handle::Left => rect.x1 = (initial.x1 + delta.x).min(initial.x2 - min.width).max(0.0),
        Handle::Right => rect.x2 = (initial.x2 + delta.x).max(initial.x1 + min.width).min(1.0),
        Handle::Inside | Handle::None => {}
    }
    clamp_rect(&rect)
}

/// Translate `initial` by `delta`. The delta itself is limited so the core
/// stays on the canvas with its size unchanged.
pub fn move_rect(initial: &Rect, delta: Point) -> Rect {
    let dx = delta.x.max(-initial.x1).min(1.0 - initial.x2);
    let dy = delta.y.max(-initial.y1).min(1.0 - initial.y2);
    Rect::new(
        initial.x1 + dx,
        initial.y1 + dy,
        initial.x2 + dx,
        initial.y2 + dy,
    )
}

/// Gesture state machine plus selection and hover.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    selected: Option<usize>,
    hovered: Option<usize>,
    hovered_handle: Handle,
    preview: Option<Rect>,
    /// Last pointer position in canvas pixels, unrotated.
    pointer: Option<Point>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_handle(&self) -> Handle {
        self.hovered_handle
    }

    pub fn drag_handle(&self) -> Handle {
        self.state.drag_handle()
    }

    /// Draw preview, only while drawing.
    pub fn preview(&self) -> Option<Rect> {
        self.preview
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Select a core; indices at or past `len` clear the selection.
    pub fn set_selected(&mut self, index: Option<usize>, len: usize) {
        self.selected = index.filter(|&i| i < len);
    }

    /// Hover a core; indices at or past `len` clear the hover.
    pub fn set_hovered(&mut self, index: Option<usize>, len: usize) {
        self.hovered = index.filter(|&i| i < len);
        if self.hovered.is_none() {
            self.hovered_handle = Handle::None;
        }
    }

    /// Carry selection, hover and an active drag across a structural change.
    pub fn remap(&mut self, remap: &IndexRemap) {
        self.selected = remap.apply(self.selected);
        self.hovered = remap.apply(self.hovered);
        if self.hovered.is_none() {
            self.hovered_handle = Handle::None;
        }

        match &mut self.state {
            InteractionState::Resizing { index, .. } | InteractionState::Moving { index, .. } => {
                match remap.get(*index) {
                    Some(new_index) => *index = new_index,
                    None => {
                        log::debug!("Interaction: dragged core was removed, ending drag");
                        self.state = InteractionState::Idle;
                    }
                }
            }
            InteractionState::Idle | InteractionState::Drawing { .. } => {}
        }
    }

    /// Drop indices that no longer exist after the list shrank to `len`.
    pub fn clamp_to_len(&mut self, len: usize) {
        self.set_selected(self.selected, len);
        self.set_hovered(self.hovered, len);
        if self.state.drag_index().is_some_and(|i| i >= len) {
            self.state = InteractionState::Idle;
        }
    }

    /// Start a gesture at a normalized point.
    ///
    /// Grabs a handle of the first hit core (selected first, then top-most),
    /// otherwise starts drawing and clears the selection.
    pub fn pointer_down(&mut self, point: Point, store: &RectStore, ctx: &GestureContext) {
        if !self.state.is_idle() {
            log::warn!(
                "Interaction: pointer down while {:?} still active - forcing idle",
                self.state
            );
            self.reset();
        }
        self.pointer = Some(ctx.canvas.denormalize_point(point));

        match find_hit(store, point, ctx, self.selected) {
            Some((index, handle)) => {
                let Some(initial) = store.get(index) else {
                    return;
                };
                self.selected = Some(index);
                self.hovered = Some(index);
                self.hovered_handle = handle;
                self.state = if handle == Handle::Inside {
                    InteractionState::Moving {
                        index,
                        start: point,
                        initial,
                    }
                } else {
                    InteractionState::Resizing {
                        index,
                        handle,
                        start: point,
                        initial,
                    }
                };
                log::debug!("Interaction: grabbed core #{} at {:?}", index, handle);
            }
            None => {
                self.selected = None;
                self.hovered = None;
                self.hovered_handle = Handle::None;
                self.preview = None;
                self.state = InteractionState::Drawing {
                    origin: point,
                    current: point,
                };
                log::debug!("Interaction: drawing from ({:.4}, {:.4})", point.x, point.y);
            }
        }
    }

    /// Advance the gesture to a normalized point. Returns `true` when the
    /// store was written.
    pub fn pointer_move(&mut self, point: Point, store: &mut RectStore, ctx: &GestureContext) -> bool {
        self.pointer = Some(ctx.canvas.denormalize_point(point));

        match &mut self.state {
            InteractionState::Idle => {
                let hit = find_hit(store, point, ctx, self.selected);
                self.hovered = hit.map(|(index, _)| index);
                self.hovered_handle = hit.map_or(Handle::None, |(_, handle)| handle);
                false
            }
            InteractionState::Drawing { origin, current } => {
                *current = point;
                self.preview = Some(draft_rect(*origin, point, ctx.min_size));
                false
            }
            InteractionState::Resizing {
                index,
                handle,
                start,
                initial,
            } => {
                let delta = Point::new(point.x - start.x, point.y - start.y);
                let next = resize_rect(initial, *handle, delta, ctx.min_size);
                store.replace_at(*index, next)
            }
            InteractionState::Moving {
                index,
                start,
                initial,
            } => {
                let delta = Point::new(point.x - start.x, point.y - start.y);
                store.replace_at(*index, move_rect(initial, delta))
            }
        }
    }

    /// Finish the gesture, optionally at a final pointer position.
    pub fn pointer_up(
        &mut self,
        point: Option<Point>,
        store: &mut RectStore,
        ctx: &GestureContext,
    ) -> GestureEnd {
        if let Some(point) = point {
            if !self.state.is_idle() {
                self.pointer_move(point, store, ctx);
            }
        }

        let end = match self.state {
            InteractionState::Idle => GestureEnd::None,
            InteractionState::Drawing { origin, current } => {
                let raw = raw_draft(origin, current);
                if raw.width() > ctx.min_size.width && raw.height() > ctx.min_size.height {
                    let rect = round_rect(&draft_rect(origin, current, ctx.min_size));
                    log::debug!("Interaction: draw finished {:?}", rect);
                    GestureEnd::Drawn(rect)
                } else {
                    log::debug!("Interaction: draw too small, discarded");
                    GestureEnd::Discarded
                }
            }
            InteractionState::Resizing { index, .. } | InteractionState::Moving { index, .. } => {
                log::debug!("Interaction: finished editing core #{}", index);
                GestureEnd::Edited { index }
            }
        };

        self.reset();
        end
    }

    /// Pointer left the canvas. Aborts a draw; a move/resize ends but keeps
    /// what was already applied.
    pub fn pointer_leave(&mut self) -> GestureEnd {
        let end = match self.state {
            InteractionState::Idle => GestureEnd::None,
            InteractionState::Drawing { .. } => {
                log::debug!("Interaction: draw aborted");
                GestureEnd::Discarded
            }
            InteractionState::Resizing { index, .. } | InteractionState::Moving { index, .. } => {
                log::debug!("Interaction: drag on core #{} ended early", index);
                GestureEnd::Edited { index }
            }
        };

        self.reset();
        self.hovered = None;
        self.hovered_handle = Handle::None;
        self.pointer = None;
        end
    }

    /// Focus lost. Same as leaving the canvas.
    pub fn blur(&mut self) -> GestureEnd {
        self.pointer_leave()
    }

    fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.preview = None;
    }
}
