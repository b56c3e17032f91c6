//! Access to the tracker server

pub mod http;
pub mod source;
pub mod wire;

#[cfg(test)]
pub(crate) mod fake;

pub use http::{HttpTrackerSource, DEFAULT_SERVER_URL};
pub use source::TrackerSource;
pub use wire::{
    CategoryPoint, RemoteBudgetStatus, RemoteCategoryAmount, RemoteInsights, RemoteMonthAmount,
    TrendPoint,
};
