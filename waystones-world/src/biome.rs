use serde::{Deserialize, Serialize};

/// Broad grouping of biomes, used to flavour generated waystone names.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BiomeCategory {
    Plains,
    Forest,
    Taiga,
    Icy,
    Desert,
    Savanna,
    Jungle,
    Swamp,
    Badlands,
    Beach,
    Ocean,
    River,
    Mountain,
    Mushroom,
    Nether,
    TheEnd,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    #[default]
    Plains,
    SunflowerPlains,
    Meadow,
    Forest,
    FlowerForest,
    BirchForest,
    DarkForest,
    CherryGrove,
    Taiga,
    OldGrowthPineTaiga,
    SnowyTaiga,
    SnowyPlains,
    IceSpikes,
    FrozenPeaks,
    Desert,
    Savanna,
    SavannaPlateau,
    Jungle,
    BambooJungle,
    Swamp,
    MangroveSwamp,
    Badlands,
    ErodedBadlands,
    Beach,
    StonyShore,
    Ocean,
    DeepOcean,
    WarmOcean,
    River,
    FrozenRiver,
    WindsweptHills,
    StonyPeaks,
    JaggedPeaks,
    MushroomFields,
    NetherWastes,
    CrimsonForest,
    WarpedForest,
    SoulSandValley,
    BasaltDeltas,
    TheEnd,
    EndHighlands,
}

impl Biome {
    pub fn category(&self) -> BiomeCategory {
        match self {
            Self::Plains | Self::SunflowerPlains | Self::Meadow => BiomeCategory::Plains,
            Self::Forest
            | Self::FlowerForest
            | Self::BirchForest
            | Self::DarkForest
            | Self::CherryGrove => BiomeCategory::Forest,
            Self::Taiga | Self::OldGrowthPineTaiga | Self::SnowyTaiga => BiomeCategory::Taiga,
            Self::SnowyPlains | Self::IceSpikes | Self::FrozenPeaks => BiomeCategory::Icy,
            Self::Desert => BiomeCategory::Desert,
            Self::Savanna | Self::SavannaPlateau => BiomeCategory::Savanna,
            Self::Jungle | Self::BambooJungle => BiomeCategory::Jungle,
            Self::Swamp | Self::MangroveSwamp => BiomeCategory::Swamp,
            Self::Badlands | Self::ErodedBadlands => BiomeCategory::Badlands,
            Self::Beach | Self::StonyShore => BiomeCategory::Beach,
            Self::Ocean | Self::DeepOcean | Self::WarmOcean => BiomeCategory::Ocean,
            Self::River | Self::FrozenRiver => BiomeCategory::River,
            Self::WindsweptHills | Self::StonyPeaks | Self::JaggedPeaks => BiomeCategory::Mountain,
            Self::MushroomFields => BiomeCategory::Mushroom,
            Self::NetherWastes
            | Self::CrimsonForest
            | Self::WarpedForest
            | Self::SoulSandValley
            | Self::BasaltDeltas => BiomeCategory::Nether,
            Self::TheEnd | Self::EndHighlands => BiomeCategory::TheEnd,
        }
    }
}
