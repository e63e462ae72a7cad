//! External service collaborators

pub mod pdf;

pub use pdf::{BillDocument, PdfService};
