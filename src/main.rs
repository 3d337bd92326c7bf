//! Headless frame driver: loads a layout, replays a short input script and
//! logs what the tree drew and emitted.
//!
//! Usage: `panekit [layout.kdl]` (defaults to `data/layouts/demo.kdl`).
//! Set `RUST_LOG=debug` to see focus and tree changes.

use panekit::config::load_ui_config;
use panekit::loading::load_layout;
use panekit::ui::{DrawCommand, DrawList, Key, PaneKind, Theme, UiEvent, Window};

const CONFIG_PATH: &str = "data/ui.ron";
const DEFAULT_LAYOUT: &str = "data/layouts/demo.kdl";

/// One scripted input per frame.
enum Input {
    Click(i32, i32),
    Type(&'static str),
    Key(Key),
    ToggleDebug,
}

fn main() {
    env_logger::init();

    let config = load_ui_config(CONFIG_PATH);
    let (width, height) = config.logical_size();
    let layout_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LAYOUT.to_string());

    let mut window = match load_layout(&layout_path) {
        Some(params) => match Window::from_params(params, width, height, Theme::default()) {
            Ok(window) => window,
            Err(e) => {
                log::error!("invalid layout {}: {}", layout_path, e);
                std::process::exit(1);
            }
        },
        None => {
            log::error!("could not load {}", layout_path);
            std::process::exit(1);
        }
    };
    window.set_debugging(config.debug_overlay);

    let script = build_script(&window);
    let mut renderer = DrawList::new(config.gui_scale, config.display_height);
    let mut mouse = (0, 0);

    for (frame, input) in script.iter().enumerate() {
        match input {
            Input::Click(x, y) => {
                mouse = (*x, *y);
                window.click(*x, *y);
            }
            Input::Type(text) => {
                for ch in text.chars() {
                    window.on_key_typed(ch, Key::Other(ch as u32));
                }
            }
            Input::Key(key) => {
                window.on_key_typed('\0', *key);
            }
            Input::ToggleDebug => {
                let debugging = window.is_debugging();
                window.set_debugging(!debugging);
            }
        }
        window.on_update();

        renderer.clear();
        window.draw(&mut renderer, mouse.0, mouse.1);
        report_frame(frame, &renderer);

        for event in window.drain_events() {
            log::info!("frame {}: {:?}", frame, event);
            if event == UiEvent::Closed {
                log::info!("window closed after {} frame(s)", frame + 1);
                return;
            }
        }
    }
}

/// Click the first text field and the first button, type into the field,
/// submit, toggle the overlay and close.
fn build_script(window: &Window) -> Vec<Input> {
    let mut script = Vec::new();
    let centre = |kind: PaneKind| {
        let tree = window.tree();
        let mut stack = vec![window.root()];
        while let Some(id) = stack.pop() {
            if tree.widget(id).is_some_and(|w| w.kind() == kind)
                && let Some(rect) = tree.screen_rect(id)
            {
                return Some((rect.x + rect.width / 2, rect.y + rect.height / 2));
            }
            stack.extend(tree.children(id).iter().rev());
        }
        None
    };

    if let Some((x, y)) = centre(PaneKind::TextField) {
        script.push(Input::Click(x, y));
        script.push(Input::Type("hello"));
        script.push(Input::Key(Key::Backspace));
        script.push(Input::Key(Key::Enter));
    }
    if let Some((x, y)) = centre(PaneKind::Button) {
        script.push(Input::Click(x, y));
    }
    script.push(Input::ToggleDebug);
    script.push(Input::Key(Key::Escape));
    script
}

fn report_frame(frame: usize, renderer: &DrawList) {
    let scissors = renderer
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Scissor(Some(_))))
        .count();
    log::info!(
        "frame {}: {} command(s), {} clip region(s), {} outline(s)",
        frame,
        renderer.commands.len(),
        scissors,
        renderer.outlines().count()
    );
    for text in renderer.texts() {
        log::debug!("  text {:?} at ({}, {})", text.text, text.x, text.y);
    }
}
