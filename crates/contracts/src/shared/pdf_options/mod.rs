//! Модель настроек PDF для предложения.
//!
//! One [`ProposalPdfOptions`] exists per (proposal, template) pair. It is
//! mutated only through [`reduce`], persisted through [`PdfOptionsStore`] and
//! kept in step with incoming proposal data by [`reconcile`].
//! [`PdfOptionsSession`] ties these together for the UI.

pub mod catalog;
pub mod constants;
pub mod options;
pub mod projection;
pub mod reconcile;
pub mod request;
pub mod rules;
pub mod session;
pub mod storage;
pub mod template;

pub use catalog::{catalog_for, FieldDef, FieldSection};
pub use options::{
    defaults_for, CustomDescriptions, CustomSection, DescriptionCategory, DescriptionKey,
    ImageSetKind, ImageSize, ImageSlots, ProductImageMode, ProposalPdfOptions, SectionImage,
    SectionVisibility,
};
pub use reconcile::reconcile;
pub use request::PdfGenerationRequest;
pub use rules::{reduce, reduce_observed, LogObserver, PdfOptionsIntent, Rejection, RuleObserver};
pub use session::PdfOptionsSession;
pub use storage::{storage_key, KeyValueStore, MemoryStore, PdfOptionsStore, StoreError};
pub use template::PdfTemplate;
