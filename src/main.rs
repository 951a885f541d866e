//! Headless gesture replay.
//!
//! Usage: `highlighter-replay <script.json>`
//!
//! The script sets up a canvas and initial cores, then lists pointer, key and
//! command steps. The resulting cores and selection are printed as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod replay {
    use std::cell::Cell;
    use std::path::Path;
    use std::rc::Rc;

    use serde::{Deserialize, Serialize};

    use highlighter::context_menu::MenuAction;
    use highlighter::{
        CanvasBounds, CanvasSize, ConfigError, Editor, EditorConfig, Key, Point, PointerEvent,
        Rect, SortAxis, SortDirection, SortOptions,
    };

    #[derive(Debug, Deserialize)]
    pub struct Script {
        pub canvas: CanvasSize,
        #[serde(default)]
        pub image_width: Option<f64>,
        #[serde(default)]
        pub config: Option<EditorConfig>,
        #[serde(default)]
        pub cores: Vec<Rect>,
        #[serde(default)]
        pub steps: Vec<Step>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Step {
        /// Client coordinates; the canvas is assumed unscaled at the origin.
        Pointer(PointerEvent),
        Key(Key),
        Add(Option<Rect>),
        Delete(usize),
        Select(Option<usize>),
        NormalizeHeights,
        Sort {
            axis: SortAxis,
            #[serde(default)]
            direction: SortDirection,
        },
        ToggleSortDirection,
        Rotate(f64),
        ContextMenu(Point),
        MenuAdd,
        MenuDelete,
    }

    #[derive(Debug, Serialize)]
    pub struct Outcome {
        pub cores: Vec<Rect>,
        pub selected: Option<usize>,
        pub hovered: Option<usize>,
        pub rotation: f64,
        /// How many times the change listener fired.
        pub notifications: usize,
    }

    pub fn load(path: &Path) -> Result<Script, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let script: Script = serde_json::from_str(&json)?;
        if let Some(config) = &script.config {
            config.validate()?;
        }
        if !script.canvas.is_valid() {
            return Err(ConfigError::invalid_value(
                "canvas",
                format!("{} x {} is not a usable size", script.canvas.width, script.canvas.height),
            ));
        }
        Ok(script)
    }

    pub fn run(script: Script) -> Outcome {
        let mut editor = Editor::new(script.config.unwrap_or_default());
        editor.set_canvas_size(script.canvas);
        editor.set_image_width(script.image_width);
        editor.set_rects(&script.cores);

        let notifications = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&notifications);
        editor.set_on_change(move |_| counter.set(counter.get() + 1));

        let bounds = CanvasBounds::unscaled(script.canvas.width, script.canvas.height);
        for (i, step) in script.steps.into_iter().enumerate() {
            log::debug!("Replay: step {} {:?}", i, step);
            match step {
                Step::Pointer(event) => {
                    editor.handle_pointer(event, &bounds);
                    editor.tick();
                }
                Step::Key(key) => {
                    editor.key_down(key);
                }
                Step::Add(rect) => {
                    editor.add_rect(rect);
                }
                Step::Delete(index) => {
                    editor.delete_rect(index);
                }
                Step::Select(index) => {
                    editor.set_selected(index);
                }
                Step::NormalizeHeights => {
                    editor.normalize_heights();
                }
                Step::Sort { axis, direction } => {
                    editor.sort(Some(SortOptions::new(axis, direction)));
                }
                Step::ToggleSortDirection => editor.toggle_sort_direction(),
                Step::Rotate(angle) => editor.rotate_image(angle),
                Step::ContextMenu(position) => editor.open_context_menu(position),
                Step::MenuAdd => {
                    editor.activate_menu_item(MenuAction::Add);
                }
                Step::MenuDelete => match editor.context_menu().target() {
                    Some(index) => {
                        editor.activate_menu_item(MenuAction::Delete(index));
                    }
                    None => log::warn!("Replay: menu delete without a targeted core"),
                },
            }
        }

        Outcome {
            cores: editor.rects(),
            selected: editor.selected(),
            hovered: editor.hovered(),
            rotation: editor.rotation(),
            notifications: notifications.get(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: highlighter-replay <script.json>");
        std::process::exit(2);
    };

    let script = match replay::load(std::path::Path::new(&path)) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Failed to load script {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let level = script
        .config
        .as_ref()
        .map(|c| c.log_level)
        .unwrap_or_default();
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
    log::info!("Replaying {} steps from {}", script.steps.len(), path);

    let outcome = replay::run(script);
    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize result: {}", e);
            std::process::exit(1);
        }
    }
}

// WASM builds use the library directly
#[cfg(target_arch = "wasm32")]
fn main() {}
