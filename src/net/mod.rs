//! Networking: wire types, the transport seam, the authenticated request
//! helper, and typed endpoints built on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` is the only module that reads the credential for outbound
//! calls; `api` wraps it per endpoint; `transport` is the browser/test seam.

pub mod api;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
