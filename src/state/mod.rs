//! Client application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns who is signed in; `tasks` holds the role rules and
//! summaries the dashboards derive from task lists.

pub mod session;
pub mod tasks;
