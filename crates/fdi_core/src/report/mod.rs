//! Coordinators that combine several analytics components
//!
//! These are the only callers that reach across component boundaries. They
//! accept sector codes (`MIN`, `ICT`) as well as sector names.

mod allocation;
mod impact;
mod matching;
mod patterns;
mod roi;
mod trend;

pub use allocation::SectorAllocator;
pub use impact::ImpactReporter;
pub use matching::MatchCoordinator;
pub use patterns::PatternDetector;
pub use roi::{internal_rate_of_return, net_present_value};
pub use trend::TrendReporter;
