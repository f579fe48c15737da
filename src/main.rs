//! Wedding Console Frontend Entry Point

mod actions;
mod api;
mod app;
mod components;
mod config;
mod context;
mod countdown;
mod export;
mod filter;
mod guest_rows;
mod logger;
mod models;
mod session;
mod store;
mod text;
mod vcard;
mod view_config;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(config::app_config().log_level);
    log::info!("[APP] API at {}", config::app_config().api_base_url);
    mount_to_body(App);
}
