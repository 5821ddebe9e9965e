use serde::{Deserialize, Deserializer, Serialize};

/// Снимок предложения (proposal), как его отдаёт backend для конфигуратора PDF.
///
/// Read-only: the configurator never edits proposal data, it only reads item,
/// piece and material ids and their image collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Proposal {
    pub proposal_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<ProposalItem>,
}

/// Строка предложения
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProposalItem {
    pub proposal_item_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub all_images: Vec<ProposalImage>,
    #[serde(default)]
    pub pieces: Vec<Piece>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Piece {
    pub piece_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<ProposalImage>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Material {
    pub material_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<ProposalImage>,
}

/// Изображение товара, детали или материала
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProposalImage {
    /// Backend sends numeric ids for catalog images and string ids for uploads
    #[serde(deserialize_with = "string_or_number")]
    pub image_id: String,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_uploaded: bool,
}

/// Куда прикрепить загруженное изображение
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ImageTarget {
    Item(i64),
    Piece(i64),
    Material(i64),
}

impl ImageTarget {
    /// Path segment used by the upload endpoint
    pub fn as_path(&self) -> String {
        match self {
            ImageTarget::Item(id) => format!("items/{}", id),
            ImageTarget::Piece(id) => format!("pieces/{}", id),
            ImageTarget::Material(id) => format!("materials/{}", id),
        }
    }
}

impl Proposal {
    pub fn item(&self, item_id: i64) -> Option<&ProposalItem> {
        self.items.iter().find(|i| i.proposal_item_id == item_id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.items.iter().flat_map(|i| i.pieces.iter())
    }

    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.pieces().flat_map(|p| p.materials.iter())
    }

    /// Merge an uploaded image descriptor into the collection of `target`.
    ///
    /// An image whose id is already present is replaced in place. Returns
    /// `false` when the target does not exist in this snapshot.
    pub fn attach_image(&mut self, target: ImageTarget, image: ProposalImage) -> bool {
        let images = match target {
            ImageTarget::Item(id) => self
                .items
                .iter_mut()
                .find(|i| i.proposal_item_id == id)
                .map(|i| &mut i.all_images),
            ImageTarget::Piece(id) => self
                .items
                .iter_mut()
                .flat_map(|i| i.pieces.iter_mut())
                .find(|p| p.piece_id == id)
                .map(|p| &mut p.images),
            ImageTarget::Material(id) => self
                .items
                .iter_mut()
                .flat_map(|i| i.pieces.iter_mut())
                .flat_map(|p| p.materials.iter_mut())
                .find(|m| m.material_id == id)
                .map(|m| &mut m.images),
        };

        let Some(images) = images else {
            return false;
        };
        match images.iter_mut().find(|i| i.image_id == image.image_id) {
            Some(existing) => *existing = image,
            None => images.push(image),
        }
        true
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}
