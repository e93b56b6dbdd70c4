//! Integration tests for the layout engine's public API.

mod helpers;
mod properties;
mod scenarios;
