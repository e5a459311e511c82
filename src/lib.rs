mod clock;
mod error;
mod floor_recovery;
mod pacer;
mod panda_settings;
mod quality_level_set;
mod quality_selector;
mod quantizer;
mod series;
mod share_estimator;
mod smoother;
mod throughput_forecaster;
mod timing_tracker;

pub use clock::*;
pub use error::*;
pub use floor_recovery::*;
pub use pacer::*;
pub use panda_settings::*;
pub use quality_level_set::*;
pub use quality_selector::*;
pub use quantizer::*;
pub use series::*;
pub use share_estimator::*;
pub use smoother::*;
pub use throughput_forecaster::*;
pub use timing_tracker::*;

pub mod api;
