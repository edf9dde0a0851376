pub mod core {
	pub mod engine;
	pub mod game;
	pub mod timer;
}

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod games;
pub mod geo;
pub mod quiz;

// Re-export for convenience
pub use crate::core::game::{Context, Game};
