//! Resolution and dispatch pipeline
//!
//! Score vector -> decide -> Outcome -> Dispatcher -> ResolutionResult

pub mod dispatcher;
pub mod resolver;

pub use dispatcher::{
    Dispatcher, Handler, HandlerCall, HandlerError, HandlerRegistry, SideChannel, APOLOGY_PREFIX,
};
pub use resolver::{
    clash_question, decide, plan, Decision, Outcome, ResolutionResult, CLASH_TAG, EMPTY_TAG,
    UNKNOWN_TAG,
};
