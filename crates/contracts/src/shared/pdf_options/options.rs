use super::catalog::{self, FieldSection};
use super::template::PdfTemplate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Large,
}

/// How product images of the pretty proposal are chosen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductImageMode {
    /// `productImageSlots`: one primary plus up to three secondary images
    #[default]
    PrimarySecondary,
    /// `selectedProductImages`: any number of images per item
    MultiSelect,
}

/// Unbounded multi-select image sets
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSetKind {
    /// `selectedImages` of the clean proposal, keyed by proposal item id
    Item,
    Product,
    Piece,
    Material,
}

/// Флаги видимости секций шаблона pretty_proposal
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionVisibility {
    ProductImages,
    ProductInfo,
    Pieces,
    PieceImages,
    PieceInfo,
    Materials,
    MaterialImages,
    MaterialInfo,
}

impl SectionVisibility {
    pub fn all() -> [SectionVisibility; 8] {
        [
            SectionVisibility::ProductImages,
            SectionVisibility::ProductInfo,
            SectionVisibility::Pieces,
            SectionVisibility::PieceImages,
            SectionVisibility::PieceInfo,
            SectionVisibility::Materials,
            SectionVisibility::MaterialImages,
            SectionVisibility::MaterialInfo,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionVisibility::ProductImages => "Product images",
            SectionVisibility::ProductInfo => "Product information",
            SectionVisibility::Pieces => "Pieces",
            SectionVisibility::PieceImages => "Piece images",
            SectionVisibility::PieceInfo => "Piece information",
            SectionVisibility::Materials => "Materials",
            SectionVisibility::MaterialImages => "Material images",
            SectionVisibility::MaterialInfo => "Material information",
        }
    }
}

/// Primary image plus up to three secondary images of one proposal item.
///
/// Invariants: `primary` is never in `secondary`; `secondary.len() <= 3`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSlots {
    pub primary: Option<String>,
    pub secondary: Vec<String>,
}

impl ImageSlots {
    /// Flat list with the primary first, as the PDF renderer expects it
    pub fn ordered(&self) -> Vec<String> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_empty()
    }
}

/// Owner of a custom description
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionCategory {
    Product,
    Piece,
    Material,
    /// Whole proposal item rather than a single image
    Item,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DescriptionKey {
    pub category: DescriptionCategory,
    pub id: String,
}

impl DescriptionKey {
    pub fn image(category: DescriptionCategory, image_id: impl Into<String>) -> Self {
        Self {
            category,
            id: image_id.into(),
        }
    }

    pub fn item(item_id: i64) -> Self {
        Self {
            category: DescriptionCategory::Item,
            id: item_id.to_string(),
        }
    }
}

/// Пользовательские описания: категория -> id -> текст
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomDescriptions {
    pub product: BTreeMap<String, String>,
    pub piece: BTreeMap<String, String>,
    pub material: BTreeMap<String, String>,
    pub item: BTreeMap<String, String>,
}

impl CustomDescriptions {
    fn category(&self, category: DescriptionCategory) -> &BTreeMap<String, String> {
        match category {
            DescriptionCategory::Product => &self.product,
            DescriptionCategory::Piece => &self.piece,
            DescriptionCategory::Material => &self.material,
            DescriptionCategory::Item => &self.item,
        }
    }

    pub(crate) fn category_mut(
        &mut self,
        category: DescriptionCategory,
    ) -> &mut BTreeMap<String, String> {
        match category {
            DescriptionCategory::Product => &mut self.product,
            DescriptionCategory::Piece => &mut self.piece,
            DescriptionCategory::Material => &mut self.material,
            DescriptionCategory::Item => &mut self.item,
        }
    }

    pub fn get(&self, key: &DescriptionKey) -> Option<&str> {
        self.category(key.category).get(&key.id).map(String::as_str)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionImage {
    pub url: String,
    pub description: String,
    pub filename: String,
}

/// Пользовательская секция PDF (заголовок + до двух изображений)
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub images: Vec<SectionImage>,
}

/// Настройки PDF для пары (предложение, шаблон).
///
/// Holds the union of every template's options; each template reads only
/// its own subset. Persisted as camelCase JSON.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProposalPdfOptions {
    pub image_size: ImageSize,
    pub show_customer_info: bool,

    // Template A
    pub selected_images: BTreeMap<i64, Vec<String>>,

    // Template B
    pub selected_product_summary_images: BTreeMap<i64, String>,
    pub additional_information: String,

    // Template C
    pub product_image_mode: ProductImageMode,
    pub product_image_slots: BTreeMap<i64, ImageSlots>,
    pub selected_product_images: BTreeMap<i64, Vec<String>>,
    pub selected_piece_images: BTreeMap<i64, Vec<String>>,
    pub selected_material_images: BTreeMap<i64, Vec<String>>,
    pub selected_product_info_fields: Vec<String>,
    pub selected_piece_info_fields: Vec<String>,
    pub selected_material_info_fields: Vec<String>,
    pub show_product_images: bool,
    pub show_product_info: bool,
    pub show_pieces: bool,
    pub show_piece_images: bool,
    pub show_piece_info: bool,
    pub show_materials: bool,
    pub show_material_images: bool,
    pub show_material_info: bool,

    pub custom_descriptions: CustomDescriptions,
    pub custom_sections: Vec<CustomSection>,
}

/// Default options for `template`. Same template, same value.
pub fn defaults_for(template: PdfTemplate) -> ProposalPdfOptions {
    let mut options = ProposalPdfOptions {
        show_customer_info: true,
        ..Default::default()
    };

    match template {
        PdfTemplate::CleanProposal => {
            options.image_size = ImageSize::Large;
        }
        PdfTemplate::ProductSummary => {}
        PdfTemplate::PrettyProposal => {
            for section in FieldSection::all() {
                *options.selected_fields_mut(section) = catalog::default_keys(section);
            }
            for flag in SectionVisibility::all() {
                options.set_visible(flag, true);
            }
        }
    }

    options
}

impl ProposalPdfOptions {
    pub fn selected_fields(&self, section: FieldSection) -> &Vec<String> {
        match section {
            FieldSection::ProductInfo => &self.selected_product_info_fields,
            FieldSection::PieceInfo => &self.selected_piece_info_fields,
            FieldSection::MaterialInfo => &self.selected_material_info_fields,
        }
    }

    pub(crate) fn selected_fields_mut(&mut self, section: FieldSection) -> &mut Vec<String> {
        match section {
            FieldSection::ProductInfo => &mut self.selected_product_info_fields,
            FieldSection::PieceInfo => &mut self.selected_piece_info_fields,
            FieldSection::MaterialInfo => &mut self.selected_material_info_fields,
        }
    }

    pub fn image_set(&self, set: ImageSetKind) -> &BTreeMap<i64, Vec<String>> {
        match set {
            ImageSetKind::Item => &self.selected_images,
            ImageSetKind::Product => &self.selected_product_images,
            ImageSetKind::Piece => &self.selected_piece_images,
            ImageSetKind::Material => &self.selected_material_images,
        }
    }

    pub(crate) fn image_set_mut(&mut self, set: ImageSetKind) -> &mut BTreeMap<i64, Vec<String>> {
        match set {
            ImageSetKind::Item => &mut self.selected_images,
            ImageSetKind::Product => &mut self.selected_product_images,
            ImageSetKind::Piece => &mut self.selected_piece_images,
            ImageSetKind::Material => &mut self.selected_material_images,
        }
    }

    pub fn is_visible(&self, flag: SectionVisibility) -> bool {
        match flag {
            SectionVisibility::ProductImages => self.show_product_images,
            SectionVisibility::ProductInfo => self.show_product_info,
            SectionVisibility::Pieces => self.show_pieces,
            SectionVisibility::PieceImages => self.show_piece_images,
            SectionVisibility::PieceInfo => self.show_piece_info,
            SectionVisibility::Materials => self.show_materials,
            SectionVisibility::MaterialImages => self.show_material_images,
            SectionVisibility::MaterialInfo => self.show_material_info,
        }
    }

    pub(crate) fn set_visible(&mut self, flag: SectionVisibility, visible: bool) {
        let slot = match flag {
            SectionVisibility::ProductImages => &mut self.show_product_images,
            SectionVisibility::ProductInfo => &mut self.show_product_info,
            SectionVisibility::Pieces => &mut self.show_pieces,
            SectionVisibility::PieceImages => &mut self.show_piece_images,
            SectionVisibility::PieceInfo => &mut self.show_piece_info,
            SectionVisibility::Materials => &mut self.show_materials,
            SectionVisibility::MaterialImages => &mut self.show_material_images,
            SectionVisibility::MaterialInfo => &mut self.show_material_info,
        };
        *slot = visible;
    }

    /// Whether the info fields of `section` end up in the PDF. Piece and
    /// material info also need their parent section switched on.
    pub fn is_field_section_shown(&self, section: FieldSection) -> bool {
        match section {
            FieldSection::ProductInfo => self.show_product_info,
            FieldSection::PieceInfo => self.show_pieces && self.show_piece_info,
            FieldSection::MaterialInfo => self.show_materials && self.show_material_info,
        }
    }

    /// Selected field keys missing from their section's catalog.
    ///
    /// Stale keys are kept as-is; this only reports them.
    pub fn unknown_field_keys(&self) -> Vec<(FieldSection, String)> {
        FieldSection::all()
            .into_iter()
            .flat_map(|section| {
                self.selected_fields(section)
                    .iter()
                    .filter(move |key| !catalog::is_known_key(section, key))
                    .map(move |key| (section, key.clone()))
            })
            .collect()
    }
}
