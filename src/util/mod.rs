//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (durable storage) and pure
//! routing policy from page and component logic.

pub mod events;
pub mod guard;
pub mod storage;
