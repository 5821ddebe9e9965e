//! Proposal PDF options configurator
//!
//! Simplified MVVM pattern implementation:
//! - model.rs: API functions (proposal fetch, image upload, PDF generation)
//! - storage.rs: localStorage-backed key-value store for the options session
//! - view_model.rs: ViewModel owning the options session and commands
//! - view.rs: page component, template switch and generate button
//! - images.rs, fields.rs, custom_sections.rs: per-template selection panels

mod custom_sections;
mod fields;
mod images;
mod model;
mod storage;
mod view;
mod view_model;

pub use storage::LocalStorage;
pub use view::{PdfOptionsConfigurator, ProposalPdfPage};
pub use view_model::PdfOptionsVm;
