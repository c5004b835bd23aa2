//! Messaging between background pipeline tasks and the dashboard

pub mod messages;

pub use messages::PipelineCompletion;
