//! kgbot dispatch — picks the configured knowledge graph provider and serves
//! knowledge graph requests through it.
//!
//! - [`dispatcher::Dispatcher`] — one spoken answer per request, never fails
//! - [`handler::KnowledgeGraphHandler`] — request in, `NoResultCommand` out

pub mod dispatcher;
pub mod handler;

pub use dispatcher::{DispatchDeps, Dispatcher};
pub use handler::{KnowledgeGraphHandler, ResponseSink};
