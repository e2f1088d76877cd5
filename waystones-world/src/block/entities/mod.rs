use std::{any::Any, sync::Arc};

use async_trait::async_trait;
use waystones_nbt::compound::NbtCompound;
use waystones_util::math::position::BlockPos;
use waystone::WaystoneBlockEntity;

pub mod waystone;

/// Network ids of block entity types, indexed by id.
pub const BLOCK_ENTITY_TYPES: &[&str] = &[WaystoneBlockEntity::ID];

#[async_trait]
pub trait BlockEntity: Send + Sync {
    async fn write_nbt(&self, nbt: &mut NbtCompound);
    fn from_nbt(nbt: &NbtCompound, position: BlockPos) -> Self
    where
        Self: Sized;
    fn resource_location(&self) -> &'static str;
    fn get_position(&self) -> BlockPos;
    async fn write_internal(&self, nbt: &mut NbtCompound) {
        nbt.put_string("id", self.resource_location().to_string());
        let position = self.get_position();
        nbt.put_int("x", position.0.x);
        nbt.put_int("y", position.0.y);
        nbt.put_int("z", position.0.z);
        self.write_nbt(nbt).await;
    }
    fn get_id(&self) -> Option<u32> {
        BLOCK_ENTITY_TYPES
            .iter()
            .position(|block_entity_name| *block_entity_name == self.resource_location())
            .map(|id| id as u32)
    }
    /// Data clients need to render the block entity.
    async fn chunk_data_nbt(&self) -> Option<NbtCompound> {
        None
    }
    fn is_dirty(&self) -> bool {
        false
    }
    fn clear_dirty(&self) {}
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

pub fn block_entity_from_generic<T: BlockEntity>(nbt: &NbtCompound) -> Option<T> {
    let x = nbt.get_int("x")?;
    let y = nbt.get_int("y")?;
    let z = nbt.get_int("z")?;
    Some(T::from_nbt(nbt, BlockPos::new(x, y, z)))
}

pub fn block_entity_from_nbt(nbt: &NbtCompound) -> Option<Arc<dyn BlockEntity>> {
    let id = nbt.get_string("id")?;
    match id {
        WaystoneBlockEntity::ID => Some(Arc::new(block_entity_from_generic::<
            WaystoneBlockEntity,
        >(nbt)?)),
        _ => {
            log::warn!("Unknown block entity type {id}");
            None
        }
    }
}
