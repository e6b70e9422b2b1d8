//! Reverse proxy reconciliation
//!
//! Renders the `app_proxy` site, installs it, relinks it and reloads nginx
//! only after the configuration test passes.

mod use_case;


pub use use_case::{ProxyReport, ProxyUseCase};
