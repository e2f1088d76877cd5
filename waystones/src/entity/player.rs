use crossbeam::atomic::AtomicCell;
use uuid::Uuid;
use waystones_config::ownership::OwnershipConfig;
use waystones_util::GameMode;

#[derive(Clone, Debug)]
pub struct GameProfile {
    pub id: Uuid,
    pub name: String,
}

pub struct Player {
    pub gameprofile: GameProfile,
    pub gamemode: AtomicCell<GameMode>,
}

impl Player {
    pub fn new(gameprofile: GameProfile, gamemode: GameMode) -> Self {
        Self {
            gameprofile,
            gamemode: AtomicCell::new(gamemode),
        }
    }

    pub fn id(&self) -> Uuid {
        self.gameprofile.id
    }

    pub fn name(&self) -> &str {
        &self.gameprofile.name
    }

    /// Whether this player is treated as the owner of every waystone.
    pub fn bypasses_ownership(&self, ownership: &OwnershipConfig) -> bool {
        ownership.creative_bypass && self.gamemode.load().bypasses_ownership()
    }
}
