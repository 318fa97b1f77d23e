/// State management module
///
/// This module handles all application state, including:
/// - The session driving selection and batches (session.rs)
/// - Shared data structures (data.rs)
/// - The in-memory history of produced files (history.rs)
/// - User settings loaded at startup (settings.rs)

pub mod data;
pub mod history;
pub mod session;
pub mod settings;
