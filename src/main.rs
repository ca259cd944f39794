mod components;
mod config;
mod controller;
mod error;
mod model;
mod state;

use components::App;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }
    yew::Renderer::<App>::new().render();
}
