/// Максимум вторичных изображений у позиции (шаблон pretty_proposal)
pub const MAX_SECONDARY_IMAGES: usize = 3;

/// Максимум изображений в пользовательской секции
pub const MAX_CUSTOM_SECTION_IMAGES: usize = 2;

/// Префикс ключа в localStorage: `pdfOptions_{proposalId}_{templateId}`
pub const STORAGE_KEY_PREFIX: &str = "pdfOptions";
