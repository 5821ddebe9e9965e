//! Инициализация выбора для новых позиций предложения.
//!
//! Proposal data arrives asynchronously and may grow (uploads, refetches).
//! [`reconcile`] adds entries only for ids that have none yet, so it can run
//! on every render without touching the user's choices.

use super::options::{ImageSlots, ProposalPdfOptions};
use super::template::PdfTemplate;
use crate::domain::a001_proposal::aggregate::{Proposal, ProposalImage};

pub fn reconcile(
    options: &ProposalPdfOptions,
    template: PdfTemplate,
    proposal: &Proposal,
) -> ProposalPdfOptions {
    let mut next = options.clone();

    match template {
        PdfTemplate::CleanProposal => {
            for item in &proposal.items {
                next.selected_images
                    .entry(item.proposal_item_id)
                    .or_insert_with(|| image_ids(&item.all_images));
            }
        }

        PdfTemplate::ProductSummary => {
            for item in &proposal.items {
                if next
                    .selected_product_summary_images
                    .contains_key(&item.proposal_item_id)
                {
                    continue;
                }
                if let Some(first) = item.all_images.first() {
                    next.selected_product_summary_images
                        .insert(item.proposal_item_id, first.image_id.clone());
                }
            }
        }

        PdfTemplate::PrettyProposal => {
            for item in &proposal.items {
                next.selected_product_images
                    .entry(item.proposal_item_id)
                    .or_default();
                if !next.product_image_slots.contains_key(&item.proposal_item_id) {
                    if let Some(primary) = default_primary(&item.all_images) {
                        next.product_image_slots.insert(
                            item.proposal_item_id,
                            ImageSlots {
                                primary: Some(primary),
                                secondary: Vec::new(),
                            },
                        );
                    }
                }
            }
            for piece in proposal.pieces() {
                next.selected_piece_images.entry(piece.piece_id).or_default();
            }
            for material in proposal.materials() {
                next.selected_material_images
                    .entry(material.material_id)
                    .or_default();
            }
        }
    }

    if next != *options {
        log::debug!(
            "Initialized PDF selections for proposal {} ({})",
            proposal.proposal_id,
            template.as_str()
        );
    }
    next
}

fn image_ids(images: &[ProposalImage]) -> Vec<String> {
    images.iter().map(|i| i.image_id.clone()).collect()
}

/// Image flagged as primary by the catalog, else the first one
fn default_primary(images: &[ProposalImage]) -> Option<String> {
    images
        .iter()
        .find(|i| i.is_primary)
        .or_else(|| images.first())
        .map(|i| i.image_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_proposal::aggregate::{Material, Piece, ProposalItem};
    use crate::shared::pdf_options::options::defaults_for;
    use crate::shared::pdf_options::rules::{reduce, PdfOptionsIntent};

    fn image(id: &str, is_primary: bool) -> ProposalImage {
        ProposalImage {
            image_id: id.to_string(),
            image_url: format!("/media/{}.jpg", id),
            is_primary,
            ..Default::default()
        }
    }

    fn proposal() -> Proposal {
        Proposal {
            proposal_id: 7,
            items: vec![
                ProposalItem {
                    proposal_item_id: 1,
                    all_images: vec![image("a", false), image("b", true)],
                    pieces: vec![Piece {
                        piece_id: 10,
                        materials: vec![Material {
                            material_id: 100,
                            images: vec![image("m", false)],
                            ..Default::default()
                        }],
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                ProposalItem {
                    proposal_item_id: 2,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_proposal_selects_all_images() {
        let options = reconcile(
            &defaults_for(PdfTemplate::CleanProposal),
            PdfTemplate::CleanProposal,
            &proposal(),
        );
        assert_eq!(options.selected_images[&1], vec!["a", "b"]);
        assert!(options.selected_images[&2].is_empty());
    }

    #[test]
    fn test_summary_defaults_to_first_image() {
        let options = reconcile(
            &defaults_for(PdfTemplate::ProductSummary),
            PdfTemplate::ProductSummary,
            &proposal(),
        );
        assert_eq!(options.selected_product_summary_images[&1], "a");
        assert!(!options.selected_product_summary_images.contains_key(&2));
    }

    #[test]
    fn test_pretty_initializes_empty_sets_and_primary() {
        let options = reconcile(
            &defaults_for(PdfTemplate::PrettyProposal),
            PdfTemplate::PrettyProposal,
            &proposal(),
        );
        assert!(options.selected_product_images[&1].is_empty());
        assert!(options.selected_piece_images[&10].is_empty());
        assert!(options.selected_material_images[&100].is_empty());
        assert_eq!(
            options.product_image_slots[&1].primary.as_deref(),
            Some("b")
        );
        assert!(!options.product_image_slots.contains_key(&2));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        for template in PdfTemplate::all() {
            let once = reconcile(&defaults_for(template), template, &proposal());
            let twice = reconcile(&once, template, &proposal());
            assert_eq!(once, twice, "{:?}", template);
        }
    }

    #[test]
    fn test_existing_choices_are_preserved() {
        let template = PdfTemplate::PrettyProposal;
        let options = reconcile(&defaults_for(template), template, &proposal());
        let options = reduce(
            &options,
            PdfOptionsIntent::SetPrimaryImage {
                item_id: 1,
                image_id: "a".into(),
            },
        );

        let mut grown = proposal();
        grown.items[0].all_images.push(image("c", true));
        grown.items.push(ProposalItem {
            proposal_item_id: 3,
            all_images: vec![image("x", false)],
            ..Default::default()
        });

        let next = reconcile(&options, template, &grown);
        assert_eq!(next.product_image_slots[&1], options.product_image_slots[&1]);
        assert_eq!(next.product_image_slots[&3].primary.as_deref(), Some("x"));
    }
}
