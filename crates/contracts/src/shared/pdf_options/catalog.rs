//! Каталоги полей, которые можно вывести в PDF.

use serde::{Deserialize, Serialize};

/// Group of info fields with its own selection set
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSection {
    ProductInfo,
    PieceInfo,
    MaterialInfo,
}

impl FieldSection {
    pub fn all() -> [FieldSection; 3] {
        [
            FieldSection::ProductInfo,
            FieldSection::PieceInfo,
            FieldSection::MaterialInfo,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FieldSection::ProductInfo => "Product information",
            FieldSection::PieceInfo => "Piece information",
            FieldSection::MaterialInfo => "Material information",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub included_by_default: bool,
}

const fn field(key: &'static str, label: &'static str, included_by_default: bool) -> FieldDef {
    FieldDef {
        key,
        label,
        included_by_default,
    }
}

const PRODUCT_INFO_FIELDS: &[FieldDef] = &[
    field("name", "Product name", true),
    field("manufacturer", "Manufacturer", true),
    field("model_number", "Model number", true),
    field("description", "Description", true),
    field("dimensions", "Dimensions", true),
    field("quantity", "Quantity", true),
    field("unit_price", "Unit price", false),
    field("total_price", "Total price", false),
    field("lead_time", "Lead time", false),
    field("notes", "Notes", false),
];

const PIECE_INFO_FIELDS: &[FieldDef] = &[
    field("name", "Piece name", true),
    field("description", "Description", true),
    field("dimensions", "Dimensions", true),
    field("quantity", "Quantity", false),
    field("notes", "Notes", false),
];

const MATERIAL_INFO_FIELDS: &[FieldDef] = &[
    field("name", "Material name", true),
    field("manufacturer", "Manufacturer", true),
    field("color", "Color", true),
    field("finish", "Finish", true),
    field("grade", "Grade", false),
    field("sku", "SKU", false),
];

/// Fixed, ordered catalog of the fields available in `section`
pub fn catalog_for(section: FieldSection) -> &'static [FieldDef] {
    match section {
        FieldSection::ProductInfo => PRODUCT_INFO_FIELDS,
        FieldSection::PieceInfo => PIECE_INFO_FIELDS,
        FieldSection::MaterialInfo => MATERIAL_INFO_FIELDS,
    }
}

/// Keys seeded into a fresh selection set
pub fn default_keys(section: FieldSection) -> Vec<String> {
    catalog_for(section)
        .iter()
        .filter(|f| f.included_by_default)
        .map(|f| f.key.to_string())
        .collect()
}

pub fn is_known_key(section: FieldSection, key: &str) -> bool {
    catalog_for(section).iter().any(|f| f.key == key)
}
