/// User interface helpers
///
/// - Native dialogs (dialogs.rs)
/// - Preview surface scaling (preview.rs)
/// - History list view (history.rs)

pub mod dialogs;
pub mod history;
pub mod preview;
