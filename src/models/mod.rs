// Data models for profiles, tracking, and recommendations

pub mod activity;
pub mod exercise;
pub mod metrics;
pub mod nutrition;
pub mod profile;
pub mod progress;
pub mod recommendation;

pub use activity::*;
pub use exercise::*;
pub use metrics::*;
pub use nutrition::*;
pub use profile::*;
pub use progress::*;
pub use recommendation::*;
