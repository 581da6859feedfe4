//! Kotsell application services.
//!
//! Everything between the pure domain in `kotsell` and the outside world:
//! the REST API client, the product cache, cart backends, the checkout flow,
//! accounts and the session gate, plus the CLI shell.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod session;

#[cfg(test)]
mod test;
