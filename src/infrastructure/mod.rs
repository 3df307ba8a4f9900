//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`; everything Newsdesk
//! persists goes below [`data_dir`].

pub mod paths;

pub use paths::data_dir;
