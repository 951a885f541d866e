//! The command surface hosts talk to.
//!
//! [`Editor`] owns the store, the interaction controller and every piece of
//! view state. Each public command validates its input, mutates, and then
//! runs a single sync step that reports changed cores, selection and hover
//! to the registered listeners.

use serde::Serialize;

use crate::callback::Callback;
use crate::config::EditorConfig;
use crate::context_menu::{ContextMenu, MenuAction, MenuItem};
use crate::event::{CanvasBounds, Key, PointerEvent};
use crate::geometry::rotate_around_center;
use crate::interaction::{GestureContext, GestureEnd, InteractionController, find_hit};
use crate::keybindings::KeyAction;
use crate::model::{CanvasSize, Point, Rect};
use crate::render::{Cursor, DrawCommand, EditorSnapshot, render};
use crate::scale::ScaleHelpers;
use crate::sort::{IndexRemap, SortOptions};
use crate::store::RectStore;
use crate::throttle::MoveThrottle;

/// What [`Editor::get_rectangles`] hands to the host: the outer box (always
/// the whole image) and the cores inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rectangles {
    pub boxes: Vec<Rect>,
    pub cores: Vec<Rect>,
}

pub struct Editor {
    config: EditorConfig,
    store: RectStore,
    controller: InteractionController,
    sort_options: SortOptions,
    canvas: CanvasSize,
    /// Natural width of the loaded image, if any.
    image_width: Option<f64>,
    /// Accumulated image rotation in degrees, `[0, 360)`.
    rotation: f64,
    menu: ContextMenu,
    moves: MoveThrottle<Point>,

    on_change: Callback<Vec<Rect>>,
    on_select: Callback<Option<usize>>,
    on_hover: Callback<Option<usize>>,
    reported_selected: Option<usize>,
    reported_hovered: Option<usize>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let canvas = CanvasSize::default();
        let sort_options = config.sort.to_options();
        Self {
            store: RectStore::new(canvas.min_size(config.min_rect_size_px)),
            controller: InteractionController::new(),
            sort_options,
            canvas,
            image_width: None,
            rotation: 0.0,
            menu: ContextMenu::new(),
            moves: MoveThrottle::new(),
            on_change: Callback::none(),
            on_select: Callback::none(),
            on_hover: Callback::none(),
            reported_selected: None,
            reported_hovered: None,
            config,
        }
    }

    /// Editor seeded with host-supplied cores.
    pub fn with_rects(config: EditorConfig, rects: &[Rect]) -> Self {
        let mut editor = Self::new(config);
        editor.set_rects(rects);
        editor
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Called with the full list whenever it differs from the last one reported.
    pub fn set_on_change<F>(&mut self, f: F)
    where
        F: FnMut(Vec<Rect>) + 'static,
    {
        self.on_change = Callback::new(f);
    }

    pub fn set_on_select<F>(&mut self, f: F)
    where
        F: FnMut(Option<usize>) + 'static,
    {
        self.on_select = Callback::new(f);
    }

    pub fn set_on_hover<F>(&mut self, f: F)
    where
        F: FnMut(Option<usize>) + 'static,
    {
        self.on_hover = Callback::new(f);
    }

    // =========================================================================
    // Inputs from the host
    // =========================================================================

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Swap settings. Resets the sort options to the configured default.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.sort_options = config.sort.to_options();
        self.store
            .set_min_size(self.canvas.min_size(config.min_rect_size_px));
        self.config = config;
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// New logical canvas size. Stored cores are not rescaled.
    pub fn set_canvas_size(&mut self, size: CanvasSize) {
        if !size.is_valid() {
            log::warn!("Editor: ignoring invalid canvas size {:?}", size);
            return;
        }
        if size != self.canvas {
            log::debug!("Editor: canvas size {:?} -> {:?}", self.canvas, size);
        }
        self.canvas = size;
        self.store
            .set_min_size(size.min_size(self.config.min_rect_size_px));
    }

    /// Natural width of the image, or `None` when no image is loaded.
    pub fn set_image_width(&mut self, width: Option<f64>) {
        self.image_width = width.filter(|w| w.is_finite() && *w > 0.0);
    }

    /// Width that stroke and handle sizes scale with.
    pub fn reference_width(&self) -> f64 {
        self.image_width.unwrap_or(self.canvas.width)
    }

    pub fn scale(&self) -> ScaleHelpers {
        ScaleHelpers::new(self.reference_width())
    }

    /// Replace the list with host-supplied cores. The new list is not
    /// reported back and is not re-sorted.
    pub fn set_rects(&mut self, rects: &[Rect]) {
        if self.store.replace_all(rects) {
            let len = self.store.len();
            self.controller.clamp_to_len(len);
            if self.menu.target().is_some_and(|t| t >= len) {
                self.menu.close();
            }
        }
        self.sync();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn rects(&self) -> Vec<Rect> {
        self.store.rects()
    }

    pub fn get_rectangles(&self) -> Rectangles {
        Rectangles {
            boxes: vec![Rect::new(0.0, 0.0, 1.0, 1.0)],
            cores: self.store.rects(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.controller.selected()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.controller.hovered()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn context_menu(&self) -> &ContextMenu {
        &self.menu
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.menu.items()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            rects: self.store.rects(),
            selected: self.controller.selected(),
            hovered: self.controller.hovered(),
            hovered_handle: self.controller.hovered_handle(),
            drag_handle: self.controller.drag_handle(),
            preview: self.controller.preview(),
            pointer: self.controller.pointer(),
            canvas: self.canvas,
            reference_width: self.reference_width(),
            rotation: self.rotation,
        }
    }

    /// Draw commands for the current frame.
    pub fn render(&self) -> Vec<DrawCommand> {
        render(
            &self.snapshot(),
            &self.config.palette,
            self.config.magnifier_zoom,
        )
    }

    pub fn cursor(&self) -> Cursor {
        Cursor::for_state(
            self.controller.drag_handle(),
            self.controller.hovered_handle(),
        )
    }

    // =========================================================================
    // Selection and hover
    // =========================================================================

    /// Select a core, or clear with `None`. Out-of-range indices are ignored.
    pub fn set_selected(&mut self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.store.len()) {
            log::warn!("Editor: set_selected({:?}) out of range", index);
            return false;
        }
        self.controller.set_selected(index, self.store.len());
        self.sync();
        true
    }

    /// Hover a core, or clear with `None`. Out-of-range indices are ignored.
    pub fn set_hovered(&mut self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.store.len()) {
            log::warn!("Editor: set_hovered({:?}) out of range", index);
            return false;
        }
        self.controller.set_hovered(index, self.store.len());
        self.sync();
        true
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Append a core (the next one below the last when `rect` is `None`),
    /// select it and return its final index.
    pub fn add_rect(&mut self, rect: Option<Rect>) -> usize {
        let rect = rect.unwrap_or_else(|| self.store.next_rect());
        let index = self.store.add(rect);
        log::info!("Editor: added core #{}", index + 1);

        let len = self.store.len();
        self.controller.set_selected(Some(index), len);
        self.controller.set_hovered(Some(index), len);
        if self.config.auto_sort.after_edit {
            self.resort();
        }
        self.sync();
        self.controller.selected().unwrap_or(index)
    }

    /// Append the default next core.
    pub fn add_next_rect(&mut self) -> usize {
        self.add_rect(None)
    }

    /// Delete the core at `index`. Out-of-range indices are a no-op.
    pub fn delete_rect(&mut self, index: usize) -> bool {
        let Some(remap) = self.store.remove_at(index) else {
            return false;
        };
        log::info!("Editor: deleted core #{}", index + 1);

        self.apply_remap(&remap);
        if self.config.auto_sort.after_edit {
            self.resort();
        }
        self.sync();
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.controller.selected() {
            Some(index) => self.delete_rect(index),
            None => false,
        }
    }

    /// Give every core the mean height.
    pub fn normalize_heights(&mut self) -> bool {
        if !self.store.normalize_heights() {
            return false;
        }
        if self.config.auto_sort.after_edit {
            self.resort();
        }
        self.sync();
        true
    }

    /// Rotate the displayed image by `angle` degrees, accumulating.
    pub fn rotate_image(&mut self, angle: f64) {
        if !angle.is_finite() {
            log::warn!("Editor: ignoring rotation by {}", angle);
            return;
        }
        self.rotation = (self.rotation + angle).rem_euclid(360.0);
        log::debug!("Editor: rotation is now {}", self.rotation);
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    pub fn sort_options(&self) -> &SortOptions {
        &self.sort_options
    }

    /// Re-sort now. Options given here become the current ones.
    pub fn sort(&mut self, options: Option<SortOptions>) {
        if let Some(options) = options {
            self.sort_options = options;
        }
        self.resort();
        self.sync();
    }

    /// Store new options and re-sort with them.
    pub fn set_sort_options(&mut self, options: SortOptions) {
        self.sort(Some(options));
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort(Some(self.sort_options.toggled()));
    }

    pub fn sort_top_to_bottom(&mut self) {
        self.sort(Some(SortOptions::top_to_bottom()));
    }

    pub fn sort_bottom_to_top(&mut self) {
        self.sort(Some(SortOptions::bottom_to_top()));
    }

    pub fn sort_left_to_right(&mut self) {
        self.sort(Some(SortOptions::left_to_right()));
    }

    pub fn sort_right_to_left(&mut self) {
        self.sort(Some(SortOptions::right_to_left()));
    }

    // =========================================================================
    // Pointer input (canvas pixels)
    // =========================================================================

    pub fn pointer_down(&mut self, position: Point) {
        let Some(point) = self.to_image_space(position) else {
            return;
        };
        log::trace!("Editor: pointer down at {:?}", position);

        if !self.controller.state().is_idle() {
            log::warn!("Editor: pointer down while a gesture is still active - forcing end");
            let ctx = self.gesture_context();
            let end = self.controller.pointer_up(None, &mut self.store, &ctx);
            self.finish_gesture(end);
        }

        self.menu.close();
        let ctx = self.gesture_context();
        self.controller.pointer_down(point, &self.store, &ctx);
        self.sync();
    }

    pub fn pointer_move(&mut self, position: Point) {
        let Some(point) = self.to_image_space(position) else {
            return;
        };
        log::trace!("Editor: pointer move to {:?}", position);

        let ctx = self.gesture_context();
        self.controller.pointer_move(point, &mut self.store, &ctx);
        self.sync();
    }

    pub fn pointer_up(&mut self, position: Option<Point>) {
        let point = position.and_then(|p| self.to_image_space(p));
        log::trace!("Editor: pointer up at {:?}", position);

        let ctx = self.gesture_context();
        let end = self.controller.pointer_up(point, &mut self.store, &ctx);
        self.finish_gesture(end);
        self.sync();
    }

    pub fn pointer_leave(&mut self) {
        let end = self.controller.pointer_leave();
        self.finish_gesture(end);
        self.sync();
    }

    pub fn blur(&mut self) {
        let end = self.controller.blur();
        self.finish_gesture(end);
        self.sync();
    }

    /// Feed a raw client-space event. Moves are coalesced; call
    /// [`Editor::tick`] once per frame to apply the latest pending one.
    pub fn handle_pointer(&mut self, event: PointerEvent, bounds: &CanvasBounds) {
        let position = event.position().and_then(|p| bounds.to_canvas(p));

        match event {
            PointerEvent::Down { .. } => {
                self.moves.clear();
                if let Some(position) = position {
                    self.pointer_down(position);
                }
            }
            PointerEvent::Move { .. } => {
                if let Some(position) = position.and_then(|p| self.moves.submit(p)) {
                    self.pointer_move(position);
                }
            }
            PointerEvent::Up { .. } => {
                self.moves.clear();
                self.pointer_up(position);
            }
            PointerEvent::Leave => {
                self.tick();
                self.pointer_leave();
            }
            PointerEvent::Blur => {
                self.tick();
                self.blur();
            }
        }
    }

    /// Frame tick: apply a coalesced pointer move, if one is pending.
    pub fn tick(&mut self) {
        if let Some(position) = self.moves.flush() {
            self.pointer_move(position);
        }
    }

    // =========================================================================
    // Keyboard and context menu
    // =========================================================================

    /// Returns `true` when the key did something.
    pub fn key_down(&mut self, key: Key) -> bool {
        if key == Key::Escape && self.menu.is_open() {
            self.menu.close();
            return true;
        }

        match self.config.keybindings.action_for(key) {
            Some(KeyAction::DeleteSelected) => self.delete_selected(),
            None => false,
        }
    }

    /// Open the menu at a canvas position, targeting the core under it.
    pub fn open_context_menu(&mut self, position: Point) {
        let target = self.to_image_space(position).and_then(|point| {
            let ctx = self.gesture_context();
            find_hit(&self.store, point, &ctx, self.controller.selected()).map(|(index, _)| index)
        });
        self.menu.open(position, target);
    }

    pub fn close_context_menu(&mut self) {
        self.menu.close();
    }

    /// Run a menu entry and close the menu.
    pub fn activate_menu_item(&mut self, action: MenuAction) -> bool {
        self.menu.close();
        match action {
            MenuAction::Add => {
                self.add_rect(None);
                true
            }
            MenuAction::Delete(index) => self.delete_rect(index),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn gesture_context(&self) -> GestureContext {
        GestureContext {
            canvas: self.canvas,
            hit_radius: self.scale().handle_hit_radius(),
            min_size: self.store.min_size(),
        }
    }

    /// Canvas pixels to normalized, unrotated image space.
    fn to_image_space(&self, position: Point) -> Option<Point> {
        if !self.canvas.is_valid() {
            log::warn!("Editor: pointer input without a valid canvas size");
            return None;
        }
        Some(rotate_around_center(
            self.canvas.normalize_point(position),
            self.rotation,
        ))
    }

    fn finish_gesture(&mut self, end: GestureEnd) {
        match end {
            GestureEnd::Drawn(rect) => {
                let index = self.store.add(rect);
                log::info!("Editor: drew core #{}", index + 1);
                let len = self.store.len();
                self.controller.set_selected(Some(index), len);
                self.controller.set_hovered(Some(index), len);
                if self.config.auto_sort.after_edit {
                    self.resort();
                }
            }
            GestureEnd::Edited { index } => {
                log::debug!("Editor: core #{} edited", index + 1);
                if self.config.auto_sort.after_interaction {
                    self.resort();
                }
            }
            GestureEnd::Discarded | GestureEnd::None => {}
        }
    }

    fn resort(&mut self) {
        if self.store.len() <= 1 || !self.sort_options.reorders() {
            return;
        }
        let result = self.store.apply_sort(&self.sort_options);
        if !result.is_identity() {
            self.apply_remap(&result.remap());
        }
    }

    fn apply_remap(&mut self, remap: &IndexRemap) {
        self.controller.remap(remap);
        let target = remap.apply(self.menu.target());
        self.menu.retarget(target);
    }

    /// Report whatever changed since the last sync.
    fn sync(&mut self) {
        if let Some(rects) = self.store.take_change() {
            log::debug!("Editor: reporting {} cores", rects.len());
            self.on_change.emit(rects);
        }

        let selected = self.controller.selected();
        if selected != self.reported_selected {
            self.reported_selected = selected;
            self.on_select.emit(selected);
        }

        let hovered = self.controller.hovered();
        if hovered != self.reported_hovered {
            self.reported_hovered = hovered;
            self.on_hover.emit(hovered);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("rects", &self.store.len())
            .field("state", self.controller.state())
            .field("selected", &self.controller.selected())
            .field("sort", &self.sort_options)
            .field("canvas", &self.canvas)
            .field("rotation", &self.rotation)
            .finish()
    }
}
