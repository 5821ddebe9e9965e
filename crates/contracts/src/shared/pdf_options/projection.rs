//! Read-only views over the options used to render the selection controls.

use super::constants::MAX_SECONDARY_IMAGES;
use super::options::{ImageSetKind, ProposalPdfOptions};

pub fn is_primary(options: &ProposalPdfOptions, item_id: i64, image_id: &str) -> bool {
    options
        .product_image_slots
        .get(&item_id)
        .and_then(|s| s.primary.as_deref())
        == Some(image_id)
}

pub fn is_secondary(options: &ProposalPdfOptions, item_id: i64, image_id: &str) -> bool {
    secondary_index_of(options, item_id, image_id).is_some()
}

/// Zero-based position in the secondary list
pub fn secondary_index_of(
    options: &ProposalPdfOptions,
    item_id: i64,
    image_id: &str,
) -> Option<usize> {
    options
        .product_image_slots
        .get(&item_id)?
        .secondary
        .iter()
        .position(|id| id == image_id)
}

pub fn secondary_slots_remaining(options: &ProposalPdfOptions, item_id: i64) -> usize {
    let used = options
        .product_image_slots
        .get(&item_id)
        .map(|s| s.secondary.len())
        .unwrap_or(0);
    MAX_SECONDARY_IMAGES.saturating_sub(used)
}

/// "Secondary 1".."Secondary 3" for images in the secondary list
pub fn secondary_label(
    options: &ProposalPdfOptions,
    item_id: i64,
    image_id: &str,
) -> Option<String> {
    secondary_index_of(options, item_id, image_id).map(|i| format!("Secondary {}", i + 1))
}

/// Whether the secondary checkbox of `image_id` is enabled
pub fn can_toggle_secondary(options: &ProposalPdfOptions, item_id: i64, image_id: &str) -> bool {
    if is_primary(options, item_id, image_id) {
        return false;
    }
    is_secondary(options, item_id, image_id) || secondary_slots_remaining(options, item_id) > 0
}

pub fn is_image_selected(
    options: &ProposalPdfOptions,
    set: ImageSetKind,
    owner_id: i64,
    image_id: &str,
) -> bool {
    options
        .image_set(set)
        .get(&owner_id)
        .is_some_and(|ids| ids.iter().any(|id| id == image_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pdf_options::options::ImageSlots;

    fn options() -> ProposalPdfOptions {
        let mut options = ProposalPdfOptions::default();
        options.product_image_slots.insert(
            42,
            ImageSlots {
                primary: Some("p".into()),
                secondary: vec!["a".into(), "b".into()],
            },
        );
        options.selected_images.insert(42, vec!["a".into()]);
        options
    }

    #[test]
    fn test_primary_and_secondary_flags() {
        let options = options();
        assert!(is_primary(&options, 42, "p"));
        assert!(!is_primary(&options, 42, "a"));
        assert!(!is_primary(&options, 7, "p"));
        assert!(is_secondary(&options, 42, "b"));
        assert_eq!(secondary_index_of(&options, 42, "b"), Some(1));
        assert_eq!(secondary_label(&options, 42, "a").as_deref(), Some("Secondary 1"));
        assert_eq!(secondary_label(&options, 42, "p"), None);
    }

    #[test]
    fn test_slots_remaining_and_enabled_state() {
        let mut options = options();
        assert_eq!(secondary_slots_remaining(&options, 42), 1);
        assert_eq!(secondary_slots_remaining(&options, 99), 3);
        assert!(can_toggle_secondary(&options, 42, "c"));
        assert!(!can_toggle_secondary(&options, 42, "p"));

        options
            .product_image_slots
            .get_mut(&42)
            .unwrap()
            .secondary
            .push("c".into());
        assert_eq!(secondary_slots_remaining(&options, 42), 0);
        assert!(!can_toggle_secondary(&options, 42, "d"));
        assert!(can_toggle_secondary(&options, 42, "c"));
    }

    #[test]
    fn test_image_set_membership() {
        let options = options();
        assert!(is_image_selected(&options, ImageSetKind::Item, 42, "a"));
        assert!(!is_image_selected(&options, ImageSetKind::Item, 42, "b"));
        assert!(!is_image_selected(&options, ImageSetKind::Product, 42, "a"));
    }
}
