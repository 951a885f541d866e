//! Pointer gestures through the editor.

use std::cell::Cell;
use std::rc::Rc;

use super::{EPS, approx_rect};
use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::event::{CanvasBounds, PointerEvent};
use crate::model::{CanvasSize, Handle, Point, Rect};
use crate::render::{Cursor, DrawCommand};

fn single(rect: Rect) -> Editor {
    Editor::with_rects(EditorConfig::default(), &[rect])
}

#[test]
fn test_move_core() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));

    editor.pointer_down(Point::new(300.0, 200.0));
    assert_eq!(editor.cursor(), Cursor::Grabbing);
    editor.pointer_move(Point::new(380.0, 260.0));
    editor.pointer_up(None);

    assert!(approx_rect(&editor.rects()[0], [0.35, 0.35, 0.6, 0.6]));
    assert_eq!(editor.selected(), Some(0));
    assert!(editor.controller().state().is_idle());
}

#[test]
fn test_move_stops_at_canvas_edge() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));

    editor.pointer_down(Point::new(300.0, 200.0));
    editor.pointer_move(Point::new(2000.0, -900.0));
    editor.pointer_up(None);

    let rect = editor.rects()[0];
    assert!((rect.x2 - 1.0).abs() < EPS);
    assert!(rect.y1.abs() < EPS);
    assert!((rect.width() - 0.25).abs() < EPS);
    assert!((rect.height() - 0.25).abs() < EPS);
}

#[test]
fn test_resize_right_edge_past_left_stops_at_min_width() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));
    let min_width = 5.0 / 800.0;

    // Right edge midpoint sits at (400, 225)
    editor.pointer_down(Point::new(400.0, 225.0));
    assert_eq!(editor.controller().drag_handle(), Handle::Right);
    assert_eq!(editor.cursor(), Cursor::EwResize);

    editor.pointer_move(Point::new(50.0, 225.0));
    let rect = editor.rects()[0];
    assert!((rect.width() - min_width).abs() < 1e-9);
    assert!((rect.x1 - 0.25).abs() < 1e-9);

    editor.pointer_up(None);
    assert!((editor.rects()[0].width() - min_width).abs() < 1e-9);
}

#[test]
fn test_resize_shows_magnifier() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));
    editor.pointer_down(Point::new(300.0, 150.0));
    assert_eq!(editor.controller().drag_handle(), Handle::Top);

    editor.pointer_move(Point::new(300.0, 120.0));
    assert!(
        editor
            .render()
            .iter()
            .any(|c| matches!(c, DrawCommand::Magnifier { .. }))
    );

    editor.pointer_up(None);
    assert!(
        !editor
            .render()
            .iter()
            .any(|c| matches!(c, DrawCommand::Magnifier { .. }))
    );
}

#[test]
fn test_tiny_draw_is_discarded() {
    let mut editor = Editor::default();
    editor.pointer_down(Point::new(100.0, 100.0));
    editor.pointer_move(Point::new(103.0, 200.0));
    assert!(editor.controller().preview().is_some());
    editor.pointer_up(None);

    assert!(editor.rects().is_empty());
    assert_eq!(editor.selected(), None);
    assert!(editor.controller().preview().is_none());
}

#[test]
fn test_draw_outside_canvas_is_clamped() {
    let mut editor = Editor::default();
    editor.pointer_down(Point::new(700.0, 500.0));
    editor.pointer_up(Some(Point::new(1200.0, 900.0)));

    assert!(approx_rect(&editor.rects()[0], [0.875, 0.833333, 1.0, 1.0]));
}

#[test]
fn test_leave_aborts_draw() {
    let mut editor = Editor::default();
    editor.pointer_down(Point::new(100.0, 100.0));
    editor.pointer_move(Point::new(400.0, 400.0));
    editor.pointer_leave();

    assert!(editor.rects().is_empty());
    assert!(editor.controller().preview().is_none());
    assert!(editor.controller().state().is_idle());

    // The following up has nothing to finish
    editor.pointer_up(Some(Point::new(400.0, 400.0)));
    assert!(editor.rects().is_empty());
}

#[test]
fn test_blur_keeps_applied_move() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));
    editor.pointer_down(Point::new(300.0, 200.0));
    editor.pointer_move(Point::new(340.0, 200.0));
    editor.blur();

    assert!(approx_rect(&editor.rects()[0], [0.3, 0.25, 0.55, 0.5]));
    assert!(editor.controller().state().is_idle());
    assert_eq!(editor.hovered(), None);
}

#[test]
fn test_second_down_finishes_previous_draw() {
    let mut editor = Editor::default();
    editor.pointer_down(Point::new(100.0, 100.0));
    editor.pointer_move(Point::new(300.0, 250.0));
    editor.pointer_down(Point::new(700.0, 550.0));

    assert_eq!(editor.rects().len(), 1);
    assert!(editor.controller().state().is_drawing());
    assert_eq!(editor.selected(), None);
}

#[test]
fn test_hover_updates_only_when_idle() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));
    let hover_events = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hover_events);
    editor.set_on_hover(move |_| counter.set(counter.get() + 1));

    editor.pointer_move(Point::new(300.0, 200.0));
    assert_eq!(editor.hovered(), Some(0));
    assert_eq!(editor.cursor(), Cursor::Move);
    editor.pointer_move(Point::new(310.0, 210.0));
    assert_eq!(hover_events.get(), 1, "same core, no new event");

    // Drawing elsewhere clears hover and does not recompute it mid-gesture
    editor.pointer_down(Point::new(700.0, 550.0));
    editor.pointer_move(Point::new(300.0, 200.0));
    assert_eq!(editor.hovered(), None);
    assert_eq!(editor.cursor(), Cursor::Crosshair);
}

#[test]
fn test_selected_core_wins_over_core_drawn_on_top() {
    let rects = [Rect::new(0.1, 0.1, 0.6, 0.6), Rect::new(0.2, 0.2, 0.7, 0.7)];
    let mut config = EditorConfig::default();
    config.auto_sort.after_interaction = false;
    let mut editor = Editor::with_rects(config, &rects);

    editor.pointer_down(Point::new(300.0, 200.0));
    editor.pointer_up(None);
    assert_eq!(editor.selected(), Some(1), "top-most core wins without a selection");

    editor.set_selected(Some(0));
    editor.pointer_down(Point::new(300.0, 200.0));
    editor.pointer_up(None);
    assert_eq!(editor.selected(), Some(0));
}

#[test]
fn test_pointer_is_inverse_rotated() {
    let rect = Rect::new(0.4, 0.05, 0.6, 0.2);

    let mut plain = single(rect);
    plain.pointer_down(Point::new(700.0, 300.0));
    assert!(plain.controller().state().is_drawing());
    plain.pointer_leave();

    let mut rotated = single(rect);
    rotated.rotate_image(90.0);
    rotated.pointer_down(Point::new(700.0, 300.0));
    assert_eq!(rotated.controller().drag_handle(), Handle::Inside);
    assert_eq!(rotated.selected(), Some(0));
}

#[test]
fn test_client_events_map_through_bounds() {
    let mut editor = Editor::default();
    let bounds = CanvasBounds {
        left: 10.0,
        top: 10.0,
        width: 400.0,
        height: 300.0,
        pixel_width: 800.0,
        pixel_height: 600.0,
    };

    editor.handle_pointer(PointerEvent::Down { x: 60.0, y: 60.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Move { x: 160.0, y: 135.0 }, &bounds);
    editor.tick();
    editor.handle_pointer(PointerEvent::Up { x: 160.0, y: 135.0 }, &bounds);

    assert!(approx_rect(&editor.rects()[0], [0.125, 0.166667, 0.375, 0.416667]));
}

#[test]
fn test_coalesced_moves_apply_latest_on_tick() {
    let mut editor = Editor::default();
    let bounds = CanvasBounds::unscaled(800.0, 600.0);

    editor.handle_pointer(PointerEvent::Down { x: 100.0, y: 100.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Move { x: 200.0, y: 200.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Move { x: 300.0, y: 250.0 }, &bounds);
    editor.tick();

    let preview = editor.controller().preview().expect("drawing preview");
    assert!(approx_rect(&preview, [0.125, 0.166667, 0.375, 0.416667]));

    editor.handle_pointer(PointerEvent::Blur, &bounds);
    assert!(editor.rects().is_empty());
}

#[test]
fn test_leave_applies_pending_move_before_ending_drag() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));
    let bounds = CanvasBounds::unscaled(800.0, 600.0);

    editor.handle_pointer(PointerEvent::Down { x: 300.0, y: 200.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Move { x: 310.0, y: 200.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Move { x: 380.0, y: 200.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Leave, &bounds);

    assert!(approx_rect(&editor.rects()[0], [0.35, 0.25, 0.6, 0.5]));
    assert!(editor.controller().state().is_idle());
}

#[test]
fn test_blur_applies_pending_resize() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));
    let bounds = CanvasBounds::unscaled(800.0, 600.0);

    // Right edge midpoint
    editor.handle_pointer(PointerEvent::Down { x: 400.0, y: 225.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Move { x: 420.0, y: 225.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Move { x: 480.0, y: 225.0 }, &bounds);
    editor.handle_pointer(PointerEvent::Blur, &bounds);

    assert!(approx_rect(&editor.rects()[0], [0.25, 0.25, 0.6, 0.5]));
    assert!(editor.controller().state().is_idle());
}

#[test]
fn test_canvas_resize_reprojects_without_rescaling() {
    let mut editor = single(Rect::new(0.25, 0.25, 0.5, 0.5));
    editor.set_canvas_size(CanvasSize::new(1600.0, 1200.0));
    assert_eq!(editor.rects()[0], Rect::new(0.25, 0.25, 0.5, 0.5));

    // The same core is now under a different pixel position
    editor.pointer_down(Point::new(600.0, 400.0));
    assert_eq!(editor.controller().drag_handle(), Handle::Inside);

    editor.set_canvas_size(CanvasSize::new(0.0, 100.0));
    assert_eq!(editor.canvas_size(), CanvasSize::new(1600.0, 1200.0));
}
