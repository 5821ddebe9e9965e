use serde::{Deserialize, Serialize};

/// PDF layout variant. Each template reads its own subset of the options.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfTemplate {
    /// Template A: all item images, unbounded multi-select, image size switch.
    CleanProposal,
    /// Template B: one image per item plus free-text additional information.
    ProductSummary,
    /// Template C: primary/secondary product images, field sets, custom sections.
    PrettyProposal,
}

impl PdfTemplate {
    /// Identifier used in storage keys and in the generation request.
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfTemplate::CleanProposal => "clean_proposal",
            PdfTemplate::ProductSummary => "product_summary",
            PdfTemplate::PrettyProposal => "pretty_proposal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PdfTemplate::CleanProposal => "Clean proposal",
            PdfTemplate::ProductSummary => "Product summary",
            PdfTemplate::PrettyProposal => "Pretty proposal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "clean_proposal" => Some(PdfTemplate::CleanProposal),
            "product_summary" => Some(PdfTemplate::ProductSummary),
            "pretty_proposal" => Some(PdfTemplate::PrettyProposal),
            _ => None,
        }
    }

    pub fn all() -> [PdfTemplate; 3] {
        [
            PdfTemplate::CleanProposal,
            PdfTemplate::ProductSummary,
            PdfTemplate::PrettyProposal,
        ]
    }
}
