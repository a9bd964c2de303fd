//! Configuration loading and resolution.
//!
//! `load` layers default files, `--config` files and `MEALDEX__*` variables,
//! applies CLI overrides and returns a validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;

pub use loader::load;
pub use resolved::{DataSettings, ResolvedConfig};
