mod adventure;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use adventure::AdventureGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn js_error(err: JsValue) -> io::Error {
    io::Error::other(format!("{err:?}"))
}

/// ratzilla only reports keydown, so key releases and focus loss are
/// listened for on the window directly.
fn register_window_listeners(game: &Rc<RefCell<AdventureGame>>) -> io::Result<()> {
    let window = web_sys::window().ok_or_else(|| io::Error::other("no window"))?;

    let on_key_up = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new({
        let game = game.clone();
        move |event: web_sys::KeyboardEvent| {
            if let Some(key) = single_char(&event.key()) {
                game.borrow_mut().handle_input(&InputEvent::KeyUp(key));
            }
        }
    });
    window
        .add_event_listener_with_callback("keyup", on_key_up.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_key_up.forget();

    let on_blur = Closure::<dyn FnMut()>::new({
        let game = game.clone();
        move || {
            game.borrow_mut().handle_input(&InputEvent::FocusLost);
        }
    });
    window
        .add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_blur.forget();

    Ok(())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = AdventureGame::new().map_err(|e| {
        web_sys::console::error_1(&format!("adventure: cannot start: {e}").into());
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;
    let game = Rc::new(RefCell::new(game));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    register_window_listeners(&game)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let key = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(key) = key {
                game.borrow_mut().handle_input(&InputEvent::Click(key));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::KeyDown(c));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
