use serde::{Deserialize, Serialize};

/// Body for creating a family, genus or sector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectorQuery {
    pub sector_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchDeleteRequest {
    pub plant_ids: Vec<i64>,
}
