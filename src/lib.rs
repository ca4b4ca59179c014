//! Library crate for hazard-map, exposing the color maps, UI state machine and
//! service clients to the binaries.

pub mod color_map;
pub mod config;
pub mod dto;
pub mod error;
pub mod services;
pub mod state;
