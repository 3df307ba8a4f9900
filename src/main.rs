//! Zellij plugin entry point.
//!
//! The plugin itself lives in [`plugin`] and only exists on the WASM target.
//! Native builds get a stub `main` so the library and its tests compile and
//! run on the host.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin;

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("newsdesk is a Zellij plugin; build it for wasm32-wasip1 and load it from a layout");
}
