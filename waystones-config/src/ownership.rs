use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct OwnershipConfig {
    /// Creative mode players count as the owner of every waystone.
    pub creative_bypass: bool,
    /// Only the owner may rename an owned waystone.
    pub restrict_rename_to_owner: bool,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            creative_bypass: true,
            restrict_rename_to_owner: true,
        }
    }
}
