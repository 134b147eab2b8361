//! Metadata information regarding the database and the resources mapped onto it.

pub mod database;

// re-export without modules
pub use database::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub resources: ResourcesInfo,
    #[serde(default)]
    pub enum_types: EnumTypes,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            resources: ResourcesInfo::empty(),
            enum_types: EnumTypes::empty(),
        }
    }
}
