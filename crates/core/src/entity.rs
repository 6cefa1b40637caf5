//! The closed set of entity types that participate in approval workflows.

use serde::{Deserialize, Serialize};

/// Business entity kinds the workflow engine can drive.
///
/// Serialized in kebab-case (`leave`, `per-diem`, `payroll`, `promotion`),
/// matching both the URL path segments and the `entity_type` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Leave,
    PerDiem,
    Payroll,
    Promotion,
}

impl EntityType {
    pub const ALL: &'static [EntityType] = &[
        EntityType::Leave,
        EntityType::PerDiem,
        EntityType::Payroll,
        EntityType::Promotion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Leave => "leave",
            EntityType::PerDiem => "per-diem",
            EntityType::Payroll => "payroll",
            EntityType::Promotion => "promotion",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leave" => Ok(EntityType::Leave),
            "per-diem" => Ok(EntityType::PerDiem),
            "payroll" => Ok(EntityType::Payroll),
            "promotion" => Ok(EntityType::Promotion),
            other => Err(format!(
                "Invalid entity type '{other}'. Must be one of: leave, per-diem, payroll, promotion"
            )),
        }
    }
}
