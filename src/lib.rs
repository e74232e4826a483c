//! # teamflow-client
//!
//! Leptos + WASM frontend for the TeamFlow role-based task tracker.
//!
//! Administrators create and assign tasks; employees view and update the
//! status of tasks assigned to them. The interesting part of this crate is
//! the session core: `state::session` owns the authentication state machine,
//! `net::request` is the single authenticated request path, and
//! `util::guard` decides what a protected route renders.
//!
//! Browser glue (`gloo-net`, `localStorage`) is gated behind the `hydrate`
//! feature. The session core itself only talks to the `Transport` and
//! `CredentialStore` traits, so it runs natively in tests.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
