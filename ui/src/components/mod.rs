//! Shared building blocks for the dashboard screen.
pub mod block_row;
pub mod empty_state;
pub mod pico;
pub mod stat_tile;
