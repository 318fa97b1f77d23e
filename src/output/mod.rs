/// Output module
///
/// This module writes batch results to disk:
/// - Individual `Result_<n>.<ext>` files (writer.rs)
/// - A merged `Results.pdf` document (document.rs)

pub mod document;
pub mod writer;
