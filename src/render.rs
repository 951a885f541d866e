//! Read-only projection of editor state into draw commands.
//!
//! [`render`] never touches the editor. The host calls it once per frame with
//! a snapshot and replays the commands on whatever surface it draws to. All
//! positions are canvas pixels in the unrotated image frame; the host applies
//! the [`DrawCommand::Background`] rotation to the whole frame.

use serde::{Deserialize, Serialize};

use crate::constants::MAGNIFIER_EDGE_GAP;
use crate::geometry::{handle_points, to_pixels};
use crate::model::{CanvasSize, Handle, PixelRect, Point, Rect};
use crate::scale::ScaleHelpers;

/// Colors used for drawing, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    /// Dimming laid over the image outside the cores.
    pub shadow: String,
    pub base_stroke: String,
    pub hover_stroke: String,
    pub selected_stroke: String,
    pub selected_fill: String,
    pub handle: String,
    pub handle_hovered: String,
    pub handle_dragging: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#e0e0e0".to_string(),
            shadow: "rgba(0, 0, 0, 0.5)".to_string(),
            base_stroke: "#ffffff".to_string(),
            hover_stroke: "#0d99ff".to_string(),
            selected_stroke: "#007bff".to_string(),
            selected_fill: "rgba(0, 123, 255, 0.12)".to_string(),
            handle: "#007bff".to_string(),
            handle_hovered: "#ffa500".to_string(),
            handle_dragging: "#ff0000".to_string(),
        }
    }
}

/// Everything a frame needs, copied out of the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorSnapshot {
    pub rects: Vec<Rect>,
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    pub hovered_handle: Handle,
    pub drag_handle: Handle,
    /// Draw preview in normalized space.
    pub preview: Option<Rect>,
    /// Pointer in canvas pixels.
    pub pointer: Option<Point>,
    pub canvas: CanvasSize,
    /// Width the scale metrics derive from.
    pub reference_width: f64,
    /// Image rotation in degrees.
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the canvas, draw the image rotated by `rotation` degrees around
    /// the canvas center and dim it with `shadow`.
    Background {
        width: f64,
        height: f64,
        rotation: f64,
        fill: String,
        shadow: String,
    },
    /// Undimmed image inside a core, then its outline and label.
    Core {
        index: usize,
        rect: PixelRect,
        stroke: String,
        line_width: f64,
        fill: Option<String>,
        label: String,
        label_at: Point,
        label_color: String,
        font_size: f64,
    },
    /// Dashed outline of the core being drawn.
    Preview {
        rect: PixelRect,
        stroke: String,
        line_width: f64,
        dash: [f64; 2],
    },
    /// Filled circle on an edge midpoint of the selected core.
    Handle {
        handle: Handle,
        center: Point,
        radius: f64,
        fill: String,
        stroke: String,
    },
    /// Zoomed copy of `source` shown in a circle next to the dragged edge.
    Magnifier {
        center: Point,
        radius: f64,
        source: PixelRect,
        stroke: String,
        line_width: f64,
    },
}

const PREVIEW_DASH: [f64; 2] = [8.0, 4.0];

/// Project a snapshot into draw commands, back to front.
pub fn render(snapshot: &EditorSnapshot, palette: &Palette, magnifier_zoom: f64) -> Vec<DrawCommand> {
    let canvas = snapshot.canvas;
    let scale = ScaleHelpers::new(snapshot.reference_width);
    let font_size = scale.font_size();

    let mut commands = vec![DrawCommand::Background {
        width: canvas.width,
        height: canvas.height,
        rotation: snapshot.rotation,
        fill: palette.background.clone(),
        shadow: palette.shadow.clone(),
    }];

    for (index, rect) in snapshot.rects.iter().enumerate() {
        let pixel = to_pixels(rect, canvas);
        if !(pixel.width > 0.0 && pixel.height > 0.0) {
            continue;
        }

        let selected = snapshot.selected == Some(index);
        let stroke = if selected {
            &palette.selected_stroke
        } else if snapshot.hovered == Some(index) {
            &palette.hover_stroke
        } else {
            &palette.base_stroke
        };

        commands.push(DrawCommand::Core {
            index,
            rect: pixel,
            stroke: stroke.clone(),
            line_width: if selected {
                scale.selected_line_width()
            } else {
                scale.line_width()
            },
            fill: selected.then(|| palette.selected_fill.clone()),
            label: (index + 1).to_string(),
            label_at: Point::new(pixel.x + font_size * 0.6, pixel.y + font_size * 0.4),
            label_color: if selected {
                palette.selected_stroke.clone()
            } else {
                palette.base_stroke.clone()
            },
            font_size,
        });
    }

    if let Some(preview) = snapshot.preview {
        commands.push(DrawCommand::Preview {
            rect: to_pixels(&preview, canvas),
            stroke: palette.hover_stroke.clone(),
            line_width: scale.line_width(),
            dash: PREVIEW_DASH,
        });
    }

    let selected = snapshot
        .selected
        .and_then(|index| snapshot.rects.get(index))
        .map(|rect| to_pixels(rect, canvas));

    if let Some(pixel) = selected {
        let radius = scale.handle_size() / 2.0;
        for (handle, center) in handle_points(&pixel) {
            let fill = if snapshot.drag_handle == handle {
                &palette.handle_dragging
            } else if snapshot.hovered_handle == handle {
                &palette.handle_hovered
            } else {
                &palette.handle
            };
            commands.push(DrawCommand::Handle {
                handle,
                center,
                radius,
                fill: fill.clone(),
                stroke: palette.base_stroke.clone(),
            });
        }

        if snapshot.drag_handle.is_edge() {
            commands.push(magnifier(&pixel, snapshot.drag_handle, &scale, magnifier_zoom, palette));
        }
    }

    commands
}

fn magnifier(
    pixel: &PixelRect,
    handle: Handle,
    scale: &ScaleHelpers,
    zoom: f64,
    palette: &Palette,
) -> DrawCommand {
    let radius = scale.magnifier_size() / 2.0;
    let offset = radius + MAGNIFIER_EDGE_GAP;
    let zoom = if zoom > 0.0 { zoom } else { 1.0 };

    let anchor = handle_points(pixel)
        .into_iter()
        .find_map(|(h, point)| (h == handle).then_some(point))
        .unwrap_or_else(|| pixel.center());

    let center = match handle {
        Handle::Top => Point::new(anchor.x, anchor.y - offset),
        Handle::Bottom => Point::new(anchor.x, anchor.y + offset),
        Handle::Left => Point::new(anchor.x - offset, anchor.y),
        Handle::Right => Point::new(anchor.x + offset, anchor.y),
        Handle::Inside | Handle::None => anchor,
    };

    let side = radius / zoom;
    DrawCommand::Magnifier {
        center,
        radius,
        source: PixelRect::new(anchor.x - side / 2.0, anchor.y - side / 2.0, side, side),
        stroke: palette.base_stroke.clone(),
        line_width: scale.line_width(),
    }
}

/// Pointer cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    Crosshair,
    Move,
    Grabbing,
    NsResize,
    EwResize,
}

impl Cursor {
    /// Cursor for the current drag, or for the hovered handle when idle.
    pub fn for_state(drag_handle: Handle, hovered_handle: Handle) -> Self {
        match drag_handle {
            Handle::Inside => Cursor::Grabbing,
            Handle::None => Self::for_handle(hovered_handle),
            edge => Self::for_handle(edge),
        }
    }

    fn for_handle(handle: Handle) -> Self {
        match handle {
            Handle::None => Cursor::Crosshair,
            Handle::Inside => Cursor::Move,
            Handle::Top | Handle::Bottom => Cursor::NsResize,
            Handle::Left | Handle::Right => Cursor::EwResize,
        }
    }

    /// CSS cursor name.
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Crosshair => "crosshair",
            Cursor::Move => "move",
            Cursor::Grabbing => "grabbing",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
        }
    }
}
