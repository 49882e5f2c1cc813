// Game engine modules

pub mod matchmaking;
pub mod registry;
pub mod results;
pub mod session;
pub mod win;

pub use matchmaking::MatchmakingQueue;
pub use registry::GameRegistry;
pub use results::{Created, GameEvent, GameView, MoveResult, Notification, Pairing, RegistryStats};
pub use session::{GameSession, MoveOutcome};
pub use win::WinDetector;
