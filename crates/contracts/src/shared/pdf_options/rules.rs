//! Правила выбора: единственное место, где меняются настройки PDF.
//!
//! Every change is a [`PdfOptionsIntent`] applied by [`reduce`]. The reducer
//! is total: bad indices, unknown ids and requests that would break an
//! invariant leave the options unchanged and are reported to a
//! [`RuleObserver`] instead of failing.

use super::catalog::FieldSection;
use super::constants::{MAX_CUSTOM_SECTION_IMAGES, MAX_SECONDARY_IMAGES};
use super::options::{
    CustomSection, DescriptionKey, ImageSetKind, ImageSize, ProductImageMode, ProposalPdfOptions,
    SectionImage, SectionVisibility,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PdfOptionsIntent {
    ToggleField {
        section: FieldSection,
        key: String,
    },
    ToggleImageInSet {
        set: ImageSetKind,
        owner_id: i64,
        image_id: String,
        included: bool,
    },
    SelectSummaryImage {
        item_id: i64,
        image_id: String,
    },
    SetPrimaryImage {
        item_id: i64,
        image_id: String,
    },
    ToggleSecondaryImage {
        item_id: i64,
        image_id: String,
        included: bool,
    },
    MoveSecondaryImage {
        item_id: i64,
        from: usize,
        to: usize,
    },
    SetCustomDescription {
        key: DescriptionKey,
        text: String,
    },
    AddCustomSection {
        id: String,
    },
    UpdateCustomSectionTitle {
        index: usize,
        title: String,
    },
    RemoveCustomSection {
        index: usize,
    },
    MoveCustomSection {
        from: usize,
        to: usize,
    },
    AddCustomSectionImage {
        index: usize,
        image: SectionImage,
    },
    RemoveCustomSectionImage {
        index: usize,
        image_index: usize,
    },
    SetImageSize {
        size: ImageSize,
    },
    SetShowCustomerInfo {
        show: bool,
    },
    SetSectionVisibility {
        section: SectionVisibility,
        visible: bool,
    },
    SetAdditionalInformation {
        text: String,
    },
    SetProductImageMode {
        mode: ProductImageMode,
    },
}

impl PdfOptionsIntent {
    /// New empty custom section with a fresh id
    pub fn add_custom_section() -> Self {
        PdfOptionsIntent::AddCustomSection {
            id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Why an intent left the options unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("image {0} is the primary image and cannot be secondary")]
    PrimaryAsSecondary(String),
    #[error("item {0} already has {max} secondary images", max = MAX_SECONDARY_IMAGES)]
    SecondaryFull(i64),
    #[error("custom section {0} already has {max} images", max = MAX_CUSTOM_SECTION_IMAGES)]
    SectionImagesFull(usize),
    #[error("no custom section at index {0}")]
    NoSuchSection(usize),
    #[error("no image at index {image_index} in custom section {index}")]
    NoSuchSectionImage { index: usize, image_index: usize },
    #[error("item {0} has no image slots")]
    NoSuchItem(i64),
    #[error("index {0} is out of range")]
    IndexOutOfRange(usize),
    #[error("custom section id {0} is already in use")]
    DuplicateSectionId(String),
}

/// Diagnostic hook for rejected intents. Does not affect the result.
pub trait RuleObserver {
    fn rejected(&self, intent: &PdfOptionsIntent, reason: &Rejection);
}

/// Observer that writes rejections to the `log` facade
pub struct LogObserver;

impl RuleObserver for LogObserver {
    fn rejected(&self, intent: &PdfOptionsIntent, reason: &Rejection) {
        log::debug!("pdf options intent ignored: {} ({:?})", reason, intent);
    }
}

/// Apply `intent` to `options` and return the next options value.
pub fn reduce(options: &ProposalPdfOptions, intent: PdfOptionsIntent) -> ProposalPdfOptions {
    reduce_observed(options, intent, &LogObserver)
}

pub fn reduce_observed(
    options: &ProposalPdfOptions,
    intent: PdfOptionsIntent,
    observer: &dyn RuleObserver,
) -> ProposalPdfOptions {
    let mut next = options.clone();
    match apply(&mut next, &intent) {
        Ok(()) => next,
        Err(reason) => {
            observer.rejected(&intent, &reason);
            options.clone()
        }
    }
}

fn apply(options: &mut ProposalPdfOptions, intent: &PdfOptionsIntent) -> Result<(), Rejection> {
    match intent {
        PdfOptionsIntent::ToggleField { section, key } => {
            let fields = options.selected_fields_mut(*section);
            match fields.iter().position(|k| k == key) {
                Some(pos) => {
                    fields.remove(pos);
                }
                None => fields.push(key.clone()),
            }
        }

        PdfOptionsIntent::ToggleImageInSet {
            set,
            owner_id,
            image_id,
            included,
        } => {
            let sets = options.image_set_mut(*set);
            if *included {
                let images = sets.entry(*owner_id).or_default();
                if !images.contains(image_id) {
                    images.push(image_id.clone());
                }
            } else if let Some(images) = sets.get_mut(owner_id) {
                images.retain(|id| id != image_id);
            }
        }

        PdfOptionsIntent::SelectSummaryImage { item_id, image_id } => {
            options
                .selected_product_summary_images
                .insert(*item_id, image_id.clone());
        }

        PdfOptionsIntent::SetPrimaryImage { item_id, image_id } => {
            set_primary(options, *item_id, image_id);
        }

        PdfOptionsIntent::ToggleSecondaryImage {
            item_id,
            image_id,
            included,
        } => {
            if !*included {
                if let Some(slots) = options.product_image_slots.get_mut(item_id) {
                    slots.secondary.retain(|id| id != image_id);
                }
                return Ok(());
            }

            let slots = options.product_image_slots.entry(*item_id).or_default();
            if slots.primary.as_deref() == Some(image_id.as_str()) {
                return Err(Rejection::PrimaryAsSecondary(image_id.clone()));
            }
            if slots.secondary.contains(image_id) {
                return Ok(());
            }
            if slots.secondary.len() >= MAX_SECONDARY_IMAGES {
                return Err(Rejection::SecondaryFull(*item_id));
            }
            slots.secondary.push(image_id.clone());
        }

        PdfOptionsIntent::MoveSecondaryImage { item_id, from, to } => {
            let slots = options
                .product_image_slots
                .get_mut(item_id)
                .ok_or(Rejection::NoSuchItem(*item_id))?;
            move_within(&mut slots.secondary, *from, *to)?;
        }

        PdfOptionsIntent::SetCustomDescription { key, text } => {
            options
                .custom_descriptions
                .category_mut(key.category)
                .insert(key.id.clone(), text.clone());
        }

        PdfOptionsIntent::AddCustomSection { id } => {
            if options.custom_sections.iter().any(|s| &s.id == id) {
                return Err(Rejection::DuplicateSectionId(id.clone()));
            }
            options.custom_sections.push(CustomSection {
                id: id.clone(),
                title: String::new(),
                images: Vec::new(),
            });
        }

        PdfOptionsIntent::UpdateCustomSectionTitle { index, title } => {
            section_mut(options, *index)?.title = title.clone();
        }

        PdfOptionsIntent::RemoveCustomSection { index } => {
            section_mut(options, *index)?;
            options.custom_sections.remove(*index);
        }

        PdfOptionsIntent::MoveCustomSection { from, to } => {
            move_within(&mut options.custom_sections, *from, *to)?;
        }

        PdfOptionsIntent::AddCustomSectionImage { index, image } => {
            let section = section_mut(options, *index)?;
            if section.images.len() >= MAX_CUSTOM_SECTION_IMAGES {
                return Err(Rejection::SectionImagesFull(*index));
            }
            section.images.push(image.clone());
        }

        PdfOptionsIntent::RemoveCustomSectionImage { index, image_index } => {
            let section = section_mut(options, *index)?;
            if *image_index >= section.images.len() {
                return Err(Rejection::NoSuchSectionImage {
                    index: *index,
                    image_index: *image_index,
                });
            }
            section.images.remove(*image_index);
        }

        PdfOptionsIntent::SetImageSize { size } => options.image_size = *size,
        PdfOptionsIntent::SetShowCustomerInfo { show } => options.show_customer_info = *show,
        PdfOptionsIntent::SetSectionVisibility { section, visible } => {
            options.set_visible(*section, *visible)
        }
        PdfOptionsIntent::SetAdditionalInformation { text } => {
            options.additional_information = text.clone()
        }
        PdfOptionsIntent::SetProductImageMode { mode } => options.product_image_mode = *mode,
    }
    Ok(())
}

fn set_primary(options: &mut ProposalPdfOptions, item_id: i64, image_id: &str) {
    let slots = options.product_image_slots.entry(item_id).or_default();
    if slots.primary.as_deref() == Some(image_id) {
        return;
    }

    slots.secondary.retain(|id| id != image_id);
    if let Some(previous) = slots.primary.replace(image_id.to_string()) {
        // Старое основное уходит во вторичные, только если есть место
        if slots.secondary.len() < MAX_SECONDARY_IMAGES {
            slots.secondary.push(previous);
        }
    }
}

fn section_mut(
    options: &mut ProposalPdfOptions,
    index: usize,
) -> Result<&mut CustomSection, Rejection> {
    options
        .custom_sections
        .get_mut(index)
        .ok_or(Rejection::NoSuchSection(index))
}

fn move_within<T>(list: &mut Vec<T>, from: usize, to: usize) -> Result<(), Rejection> {
    if from >= list.len() {
        return Err(Rejection::IndexOutOfRange(from));
    }
    if to >= list.len() {
        return Err(Rejection::IndexOutOfRange(to));
    }
    let value = list.remove(from);
    list.insert(to, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pdf_options::options::{defaults_for, DescriptionCategory, ImageSlots};
    use crate::shared::pdf_options::template::PdfTemplate;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        reasons: RefCell<Vec<Rejection>>,
    }

    impl RuleObserver for Recorder {
        fn rejected(&self, _intent: &PdfOptionsIntent, reason: &Rejection) {
            self.reasons.borrow_mut().push(reason.clone());
        }
    }

    fn primary(item_id: i64, image_id: &str) -> PdfOptionsIntent {
        PdfOptionsIntent::SetPrimaryImage {
            item_id,
            image_id: image_id.into(),
        }
    }

    fn secondary(item_id: i64, image_id: &str, included: bool) -> PdfOptionsIntent {
        PdfOptionsIntent::ToggleSecondaryImage {
            item_id,
            image_id: image_id.into(),
            included,
        }
    }

    fn section_image(name: &str) -> SectionImage {
        SectionImage {
            url: format!("/uploads/{}", name),
            description: String::new(),
            filename: name.to_string(),
        }
    }

    fn run(intents: Vec<PdfOptionsIntent>) -> ProposalPdfOptions {
        intents
            .into_iter()
            .fold(ProposalPdfOptions::default(), |options, intent| {
                reduce(&options, intent)
            })
    }

    fn assert_slots_invariants(options: &ProposalPdfOptions) {
        for slots in options.product_image_slots.values() {
            assert!(slots.secondary.len() <= MAX_SECONDARY_IMAGES);
            if let Some(p) = &slots.primary {
                assert!(!slots.secondary.contains(p), "{:?}", slots);
            }
        }
    }

    #[test]
    fn test_primary_secondary_scenario() {
        let options = run(vec![primary(42, "imgA")]);
        assert_eq!(options.product_image_slots[&42].ordered(), vec!["imgA"]);

        let options = reduce(&options, primary(42, "imgB"));
        assert_eq!(
            options.product_image_slots[&42].ordered(),
            vec!["imgB", "imgA"]
        );

        let options = reduce(&options, secondary(42, "imgC", true));
        let options = reduce(&options, secondary(42, "imgD", true));
        let options = reduce(&options, secondary(42, "imgE", true));
        assert_eq!(
            options.product_image_slots[&42].ordered(),
            vec!["imgB", "imgA", "imgC", "imgD"]
        );
    }

    #[test]
    fn test_set_primary_same_image_is_noop() {
        let before = run(vec![primary(1, "a"), secondary(1, "b", true)]);
        let after = reduce(&before, primary(1, "a"));
        assert_eq!(before, after);
    }

    #[test]
    fn test_promoting_secondary_moves_it_out_of_secondary() {
        let options = run(vec![
            primary(1, "a"),
            secondary(1, "b", true),
            secondary(1, "c", true),
            primary(1, "c"),
        ]);
        let slots = &options.product_image_slots[&1];
        assert_eq!(slots.primary.as_deref(), Some("c"));
        assert_eq!(slots.secondary, vec!["b", "a"]);
    }

    #[test]
    fn test_old_primary_dropped_when_secondary_full() {
        let options = run(vec![
            primary(1, "p"),
            secondary(1, "a", true),
            secondary(1, "b", true),
            secondary(1, "c", true),
            primary(1, "x"),
        ]);
        let slots = &options.product_image_slots[&1];
        assert_eq!(slots.primary.as_deref(), Some("x"));
        assert_eq!(slots.secondary, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_promoting_from_full_secondary_keeps_old_primary() {
        // Removing the promoted image frees a slot for the demoted one
        let options = run(vec![
            primary(1, "p"),
            secondary(1, "a", true),
            secondary(1, "b", true),
            secondary(1, "c", true),
            primary(1, "b"),
        ]);
        let slots = &options.product_image_slots[&1];
        assert_eq!(slots.primary.as_deref(), Some("b"));
        assert_eq!(slots.secondary, vec!["a", "c", "p"]);
    }

    #[test]
    fn test_secondary_rejections_are_reported() {
        let recorder = Recorder::default();
        let options = run(vec![primary(1, "p")]);
        let same = reduce_observed(&options, secondary(1, "p", true), &recorder);
        assert_eq!(same, options);

        let full = run(vec![
            secondary(1, "a", true),
            secondary(1, "b", true),
            secondary(1, "c", true),
        ]);
        let same = reduce_observed(&full, secondary(1, "d", true), &recorder);
        assert_eq!(same, full);

        assert_eq!(
            *recorder.reasons.borrow(),
            vec![
                Rejection::PrimaryAsSecondary("p".into()),
                Rejection::SecondaryFull(1)
            ]
        );
    }

    #[test]
    fn test_secondary_exclude_preserves_order() {
        let options = run(vec![
            secondary(1, "a", true),
            secondary(1, "b", true),
            secondary(1, "c", true),
            secondary(1, "b", false),
            secondary(1, "zzz", false),
        ]);
        assert_eq!(options.product_image_slots[&1].secondary, vec!["a", "c"]);
    }

    #[test]
    fn test_random_sequences_keep_image_invariants() {
        // Small deterministic LCG so the sequence is reproducible
        let mut seed: u64 = 0x5eed;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };
        let images = ["a", "b", "c", "d", "e", "f"];
        let mut options = ProposalPdfOptions::default();
        for _ in 0..500 {
            let image = images[next() % images.len()];
            let intent = match next() % 3 {
                0 => primary(7, image),
                1 => secondary(7, image, true),
                _ => secondary(7, image, false),
            };
            options = reduce(&options, intent);
            assert_slots_invariants(&options);
        }
    }

    #[test]
    fn test_toggle_field_flips_membership() {
        let options = defaults_for(PdfTemplate::PrettyProposal);
        let toggle = |key: &str| PdfOptionsIntent::ToggleField {
            section: FieldSection::ProductInfo,
            key: key.into(),
        };
        let added = reduce(&options, toggle("unit_price"));
        assert!(added.selected_product_info_fields.contains(&"unit_price".to_string()));
        let removed = reduce(&added, toggle("unit_price"));
        assert_eq!(removed, options);
    }

    #[test]
    fn test_toggle_image_in_set_is_a_set() {
        let toggle = |image: &str, included| PdfOptionsIntent::ToggleImageInSet {
            set: ImageSetKind::Piece,
            owner_id: 3,
            image_id: image.into(),
            included,
        };
        let options = run(vec![
            toggle("a", true),
            toggle("b", true),
            toggle("a", true),
            toggle("c", true),
            toggle("a", false),
        ]);
        assert_eq!(options.selected_piece_images[&3], vec!["b", "c"]);
        assert!(options.selected_images.is_empty());
    }

    #[test]
    fn test_product_image_modes_keep_both_selections() {
        let options = run(vec![
            PdfOptionsIntent::SetPrimaryImage {
                item_id: 42,
                image_id: "imgA".into(),
            },
            PdfOptionsIntent::SetProductImageMode {
                mode: ProductImageMode::MultiSelect,
            },
            PdfOptionsIntent::ToggleImageInSet {
                set: ImageSetKind::Product,
                owner_id: 42,
                image_id: "imgB".into(),
                included: true,
            },
            PdfOptionsIntent::SetProductImageMode {
                mode: ProductImageMode::PrimarySecondary,
            },
        ]);
        assert_eq!(options.product_image_mode, ProductImageMode::PrimarySecondary);
        assert_eq!(options.selected_product_images[&42], vec!["imgB"]);
        assert_eq!(options.product_image_slots[&42].primary.as_deref(), Some("imgA"));
    }

    #[test]
    fn test_custom_sections() {
        let options = run(vec![
            PdfOptionsIntent::add_custom_section(),
            PdfOptionsIntent::add_custom_section(),
        ]);
        assert_eq!(options.custom_sections.len(), 2);
        assert_ne!(options.custom_sections[0].id, options.custom_sections[1].id);
        assert!(options.custom_sections.iter().all(|s| s.images.is_empty()));

        let add = |name: &str| PdfOptionsIntent::AddCustomSectionImage {
            index: 0,
            image: section_image(name),
        };
        let options = [add("img1"), add("img2"), add("img3")]
            .into_iter()
            .fold(options, |o, i| reduce(&o, i));
        let images = &options.custom_sections[0].images;
        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|i| i.filename != "img3"));
    }

    #[test]
    fn test_custom_section_edits_and_removal() {
        let options = run(vec![
            PdfOptionsIntent::AddCustomSection { id: "s1".into() },
            PdfOptionsIntent::AddCustomSection { id: "s2".into() },
            PdfOptionsIntent::AddCustomSection { id: "s3".into() },
            PdfOptionsIntent::UpdateCustomSectionTitle {
                index: 2,
                title: "Finishes".into(),
            },
            PdfOptionsIntent::RemoveCustomSection { index: 0 },
            PdfOptionsIntent::MoveCustomSection { from: 1, to: 0 },
        ]);
        let ids: Vec<_> = options.custom_sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s3", "s2"]);
        assert_eq!(options.custom_sections[0].title, "Finishes");
    }

    #[test]
    fn test_bad_indices_are_noops() {
        let recorder = Recorder::default();
        let options = run(vec![
            PdfOptionsIntent::AddCustomSection { id: "s1".into() },
            PdfOptionsIntent::AddCustomSectionImage {
                index: 0,
                image: section_image("a"),
            },
        ]);
        let intents = vec![
            PdfOptionsIntent::RemoveCustomSection { index: 4 },
            PdfOptionsIntent::UpdateCustomSectionTitle {
                index: 1,
                title: "x".into(),
            },
            PdfOptionsIntent::RemoveCustomSectionImage {
                index: 0,
                image_index: 1,
            },
            PdfOptionsIntent::MoveCustomSection { from: 0, to: 3 },
            PdfOptionsIntent::MoveSecondaryImage {
                item_id: 99,
                from: 0,
                to: 1,
            },
            PdfOptionsIntent::AddCustomSection { id: "s1".into() },
        ];
        for intent in intents {
            assert_eq!(reduce_observed(&options, intent, &recorder), options);
        }
        assert_eq!(recorder.reasons.borrow().len(), 6);
    }

    #[test]
    fn test_remove_custom_section_image_splices() {
        let options = run(vec![
            PdfOptionsIntent::AddCustomSection { id: "s1".into() },
            PdfOptionsIntent::AddCustomSectionImage {
                index: 0,
                image: section_image("a"),
            },
            PdfOptionsIntent::AddCustomSectionImage {
                index: 0,
                image: section_image("b"),
            },
            PdfOptionsIntent::RemoveCustomSectionImage {
                index: 0,
                image_index: 0,
            },
        ]);
        assert_eq!(options.custom_sections[0].images, vec![section_image("b")]);
    }

    #[test]
    fn test_move_secondary_image() {
        let options = run(vec![
            secondary(1, "a", true),
            secondary(1, "b", true),
            secondary(1, "c", true),
            PdfOptionsIntent::MoveSecondaryImage {
                item_id: 1,
                from: 2,
                to: 0,
            },
        ]);
        assert_eq!(
            options.product_image_slots[&1],
            ImageSlots {
                primary: None,
                secondary: vec!["c".into(), "a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn test_custom_description_upsert() {
        let key = DescriptionKey::image(DescriptionCategory::Material, "m-1");
        let options = run(vec![
            PdfOptionsIntent::SetCustomDescription {
                key: key.clone(),
                text: "Oak".into(),
            },
            PdfOptionsIntent::SetCustomDescription {
                key: key.clone(),
                text: "White oak".into(),
            },
            PdfOptionsIntent::SetCustomDescription {
                key: DescriptionKey::item(42),
                text: "Lobby".into(),
            },
        ]);
        assert_eq!(options.custom_descriptions.get(&key), Some("White oak"));
        assert_eq!(
            options.custom_descriptions.get(&DescriptionKey::item(42)),
            Some("Lobby")
        );
        // Same id in another category does not collide
        assert_eq!(
            options
                .custom_descriptions
                .get(&DescriptionKey::image(DescriptionCategory::Piece, "m-1")),
            None
        );
    }

    #[test]
    fn test_scalar_intents() {
        let options = run(vec![
            PdfOptionsIntent::SetImageSize {
                size: ImageSize::Small,
            },
            PdfOptionsIntent::SetShowCustomerInfo { show: true },
            PdfOptionsIntent::SetSectionVisibility {
                section: SectionVisibility::PieceImages,
                visible: true,
            },
            PdfOptionsIntent::SetAdditionalInformation {
                text: "Delivery in May".into(),
            },
            PdfOptionsIntent::SelectSummaryImage {
                item_id: 5,
                image_id: "s".into(),
            },
            PdfOptionsIntent::SetProductImageMode {
                mode: ProductImageMode::MultiSelect,
            },
        ]);
        assert_eq!(options.image_size, ImageSize::Small);
        assert!(options.show_customer_info);
        assert!(options.show_piece_images);
        assert!(!options.show_pieces);
        assert_eq!(options.additional_information, "Delivery in May");
        assert_eq!(options.selected_product_summary_images[&5], "s");
        assert_eq!(options.product_image_mode, ProductImageMode::MultiSelect);
    }

    #[test]
    fn test_intent_json_shape() {
        let intent: PdfOptionsIntent = serde_json::from_str(
            r#"{"type":"toggle_secondary_image","item_id":42,"image_id":"imgC","included":true}"#,
        )
        .unwrap();
        assert_eq!(intent, secondary(42, "imgC", true));
    }
}
