use std::sync::Arc;

use async_trait::async_trait;
use waystones_nbt::to_bytes_unnamed;
use waystones_util::math::position::BlockPos;

use crate::{biome::Biome, block::entities::BlockEntity, dimension::Dimension};

/// Spatial lookup of block entities.
#[async_trait]
pub trait BlockEntityAccessor: Send + Sync {
    async fn get_block_entity(&self, position: &BlockPos) -> Option<Arc<dyn BlockEntity>>;
}

#[async_trait]
pub trait SimpleWorld: BlockEntityAccessor + Send + Sync {
    fn dimension(&self) -> Dimension;

    async fn get_biome(&self, position: &BlockPos) -> Biome;

    async fn add_block_entity(&self, block_entity: Arc<dyn BlockEntity>);

    async fn remove_block_entity(&self, position: &BlockPos);

    /// Re-sends a changed block entity to clients.
    async fn update_block_entity(&self, block_entity: &Arc<dyn BlockEntity>);
}

/// Content of a block entity data message.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntityUpdate {
    pub location: BlockPos,
    pub r#type: u32,
    pub nbt_data: Box<[u8]>,
}

impl BlockEntityUpdate {
    /// Returns `None` for block entities that have nothing to tell clients.
    pub async fn from_block_entity(block_entity: &dyn BlockEntity) -> Option<Self> {
        let nbt = block_entity.chunk_data_nbt().await?;
        let Some(r#type) = block_entity.get_id() else {
            log::warn!(
                "Block entity {} has no registered type id",
                block_entity.resource_location()
            );
            return None;
        };

        let mut bytes = Vec::new();
        if let Err(err) = to_bytes_unnamed(&nbt, &mut bytes) {
            log::error!(
                "Failed to encode {} at {}: {err}",
                block_entity.resource_location(),
                block_entity.get_position()
            );
            return None;
        }

        Some(Self {
            location: block_entity.get_position(),
            r#type,
            nbt_data: bytes.into_boxed_slice(),
        })
    }
}
