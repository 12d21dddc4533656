//! Feedback Module
//! Mission: Feedback records, their status workflow, and the service on top

pub mod api;
pub mod models;
pub mod service;
pub mod stats;
pub mod store;

pub use service::FeedbackService;
pub use store::FeedbackStore;
