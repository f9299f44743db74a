pub mod filter;
pub mod model;
pub mod normalize;
pub mod stats;

pub use filter::filter;
pub use model::{CanonicalApplicant, Status};
pub use normalize::normalize;
pub use stats::Stats;
