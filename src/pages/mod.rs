//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages behind `ProtectedRoute` can assume a signed-in user.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod register;
