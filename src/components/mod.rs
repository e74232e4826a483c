//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render route gating and task chrome while reading session
//! state from Leptos context providers.

pub mod app_header;
pub mod protected_route;
pub mod task_card;
