use super::options::ProposalPdfOptions;
use super::template::PdfTemplate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Тело запроса на генерацию PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfGenerationRequest {
    pub proposal_id: i64,
    pub template: PdfTemplate,
    pub options: ProposalPdfOptions,
    /// Per item: primary image first, then the secondary images
    pub ordered_product_images: BTreeMap<i64, Vec<String>>,
}

impl PdfGenerationRequest {
    pub fn new(proposal_id: i64, template: PdfTemplate, options: &ProposalPdfOptions) -> Self {
        let ordered_product_images = options
            .product_image_slots
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(item_id, slots)| (*item_id, slots.ordered()))
            .collect();

        Self {
            proposal_id,
            template,
            options: options.clone(),
            ordered_product_images,
        }
    }

    /// Download name, e.g. `proposal_7_pretty_proposal_2026-10-18.pdf`
    pub fn file_name(&self, date: chrono::NaiveDate) -> String {
        format!(
            "proposal_{}_{}_{}.pdf",
            self.proposal_id,
            self.template.as_str(),
            date.format("%Y-%m-%d")
        )
    }
}
