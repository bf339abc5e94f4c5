//! This crate contains everything the explorer dashboard does that is not UI:
//! endpoint configuration, the HTTP clients for the node and the staking
//! API, the per-cycle fetcher, the view model, and the refresh lifetime.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod node_rpc;
pub mod refresh;
pub mod source;
pub mod staking;
pub mod view_model;

pub use config::Endpoints;
pub use error::FetchError;
pub use refresh::CycleOutcome;
pub use refresh::ViewLifetime;
pub use refresh::REFRESH_PERIOD;
pub use source::ChainSource;
pub use source::HttpSource;
pub use view_model::DashboardState;
pub use view_model::DashboardView;
