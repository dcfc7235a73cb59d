pub mod clock;
pub mod engine;
pub mod recommendation;
mod rules;
mod text;
pub mod vocabulary;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{EngineOptions, RecommendationEngine, generate, is_valid_date_format};
pub use recommendation::{Priority, Recommendation, RecommendationType};
