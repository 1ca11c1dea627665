pub mod pool;
pub mod repos;

// Re-export commonly used items
pub use pool::{create_pool, run_migrations};
pub use repos::chat_log::ChatLogRepo;
pub use repos::landmark::{LandmarkRepo, LandmarkRow, NewLandmark};
pub use repos::route::{NewRoute, RouteRepo, RouteRow};
pub use repos::search_log::SearchLogRepo;
pub use repos::suggestion::{SuggestionRepo, SuggestionRow, SuggestionWithSubmitterRow};
pub use repos::user::{UserRepo, UserRow};
