//! Crop definitions and the immutable catalog they are looked up in.

use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Number of growth stages a crop passes through; the last one is ripe.
pub const STAGE_COUNT: usize = 4;

/// Index of the ripe stage.
pub const RIPE_STAGE: u8 = (STAGE_COUNT - 1) as u8;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropId(String);

impl CropId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CropId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    pub id: CropId,
    pub name: String,
    pub stage_labels: [String; STAGE_COUNT],
    pub grow_time_secs: f64,
    pub seed_cost: u32,
    pub reward: u32,
}

impl CropDefinition {
    fn standard(
        id: &str,
        name: &str,
        labels: [&str; STAGE_COUNT],
        grow_time_secs: f64,
        seed_cost: u32,
        reward: u32,
    ) -> Self {
        Self {
            id: CropId::new(id),
            name: name.to_string(),
            stage_labels: labels.map(str::to_string),
            grow_time_secs,
            seed_cost,
            reward,
        }
    }

    pub fn stage_label(&self, stage: u8) -> &str {
        let index = usize::from(stage).min(STAGE_COUNT - 1);
        &self.stage_labels[index]
    }
}

/// Read-only crop table. Entries keep their declaration order.
#[derive(Debug, Clone)]
pub struct CropCatalog {
    crops: Vec<Arc<CropDefinition>>,
    index: HashMap<CropId, usize>,
}

impl CropCatalog {
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = CropDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut crops = Vec::new();
        let mut index = HashMap::new();
        for definition in definitions {
            if !definition.grow_time_secs.is_finite() || definition.grow_time_secs <= 0.0 {
                return Err(CatalogError::InvalidGrowTime {
                    id: definition.id.to_string(),
                    grow_time_secs: definition.grow_time_secs,
                });
            }
            if index.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateId(definition.id.to_string()));
            }
            index.insert(definition.id.clone(), crops.len());
            crops.push(Arc::new(definition));
        }
        if crops.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { crops, index })
    }

    /// Corn, potato, tomato, bean, cabbage and broccoli.
    pub fn standard() -> Self {
        let definitions = [
            CropDefinition::standard("corn", "Corn", ["🫘", "🌱", "🌾", "🌽"], 240.0, 5, 12),
            CropDefinition::standard("potato", "Potato", ["🥔", "🌱", "🌿", "🥔"], 210.0, 4, 10),
            CropDefinition::standard("tomato", "Tomato", ["🍅", "🌱", "🌿", "🍅"], 180.0, 4, 10),
            CropDefinition::standard("bean", "Bean", ["🫘", "🌱", "🌿", "🫘"], 150.0, 3, 8),
            CropDefinition::standard("cabbage", "Cabbage", ["🥬", "🌱", "🌿", "🥬"], 270.0, 6, 15),
            CropDefinition::standard("broccoli", "Broccoli", ["🥦", "🌱", "🌿", "🥦"], 300.0, 7, 18),
        ];
        let crops: Vec<Arc<CropDefinition>> = definitions.into_iter().map(Arc::new).collect();
        let index = crops
            .iter()
            .enumerate()
            .map(|(position, crop)| (crop.id.clone(), position))
            .collect();
        Self { crops, index }
    }

    pub fn get(&self, id: &CropId) -> Option<&Arc<CropDefinition>> {
        self.index.get(id).map(|position| &self.crops[*position])
    }

    pub fn require(&self, id: &CropId) -> Result<&Arc<CropDefinition>, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownCrop(id.to_string()))
    }

    pub fn contains(&self, id: &CropId) -> bool {
        self.index.contains_key(id)
    }

    /// First declared crop; the initial seed selection.
    pub fn first(&self) -> &Arc<CropDefinition> {
        &self.crops[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CropDefinition>> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}
