pub mod chart;
pub mod dispatcher;
pub mod handlers;
pub mod state;

pub use dispatcher::Dispatcher;
pub use handlers::BotHandlers;
pub use state::{new_shared_store, ConversationState, InMemoryStore, SharedStore};
