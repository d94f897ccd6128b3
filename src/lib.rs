//! Conviva - rule-based intent resolution for a conversational assistant

pub mod command;
pub mod core;
pub mod handlers;
pub mod intent;
pub mod session;

pub use command::{
    Dispatcher, Handler, HandlerCall, HandlerError, HandlerRegistry, ResolutionResult, SideChannel,
};
pub use intent::{CatalogueHandle, IntentCatalogue, IntentRule};
pub use session::{Assistant, Conversation, SessionWorker};
