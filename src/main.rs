//! Realty CRM Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    let _ = console_log::init_with_level(config.log_level);
    log::info!("starting realty CRM ({})", if config.is_demo() { "demo" } else { "live" });
    mount_to_body(move || view! { <App config=config /> });
}
