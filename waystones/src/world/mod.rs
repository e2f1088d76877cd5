use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use rand::rngs::StdRng;
use tokio::sync::{Mutex, RwLock, broadcast};
use waystones_nbt::compound::NbtCompound;
use waystones_util::math::position::BlockPos;
use waystones_world::{
    biome::Biome,
    block::entities::{
        BlockEntity, block_entity_from_nbt,
        waystone::{ResolveNameArgs, WaystoneBlockEntity},
    },
    dimension::Dimension,
    name_generator::NameGenerator,
    waystone::Waystone,
    world::{BlockEntityAccessor, BlockEntityUpdate, SimpleWorld},
};

const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// An in-memory world holding block entities. Every block entity that is added
/// or updated is sent to subscribers as a [`BlockEntityUpdate`].
pub struct World {
    dimension: Dimension,
    default_biome: Biome,
    biomes: RwLock<HashMap<BlockPos, Biome>>,
    block_entities: RwLock<HashMap<BlockPos, Arc<dyn BlockEntity>>>,
    name_generator: Arc<NameGenerator>,
    random: Mutex<StdRng>,
    block_entity_updates: broadcast::Sender<BlockEntityUpdate>,
}

impl World {
    pub fn new(
        dimension: Dimension,
        default_biome: Biome,
        name_generator: Arc<NameGenerator>,
        random: StdRng,
    ) -> Self {
        let (block_entity_updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            dimension,
            default_biome,
            biomes: RwLock::new(HashMap::new()),
            block_entities: RwLock::new(HashMap::new()),
            name_generator,
            random: Mutex::new(random),
            block_entity_updates,
        }
    }

    pub async fn set_biome(&self, position: BlockPos, biome: Biome) {
        self.biomes.write().await.insert(position, biome);
    }

    pub fn name_generator(&self) -> &NameGenerator {
        &self.name_generator
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BlockEntityUpdate> {
        self.block_entity_updates.subscribe()
    }

    fn place_in_world(&self, block_entity: &dyn BlockEntity) {
        if let Some(waystone) = block_entity.as_any().downcast_ref::<WaystoneBlockEntity>() {
            waystone.set_dimension(self.dimension);
        }
    }

    /// Names a waystone that has no name yet, so clients never see an unnamed one.
    async fn resolve_name(&self, block_entity: &dyn BlockEntity) {
        let Some(waystone) = block_entity.as_any().downcast_ref::<WaystoneBlockEntity>() else {
            return;
        };
        let mut random = self.random.lock().await;
        waystone
            .resolve_name(ResolveNameArgs {
                world: self,
                name_generator: &self.name_generator,
                random: &mut *random,
            })
            .await;
    }

    async fn broadcast_block_entity(&self, block_entity: &dyn BlockEntity) {
        if let Some(update) = BlockEntityUpdate::from_block_entity(block_entity).await {
            // Nobody listening is fine.
            let _ = self.block_entity_updates.send(update);
        }
    }

    /// Restores a block entity from its saved tag without notifying clients.
    pub async fn load_block_entity(&self, nbt: &NbtCompound) -> Option<Arc<dyn BlockEntity>> {
        let block_entity = block_entity_from_nbt(nbt)?;
        self.place_in_world(&*block_entity);
        if let Some(waystone) = block_entity.as_any().downcast_ref::<WaystoneBlockEntity>() {
            self.name_generator.mark_used(&waystone.name().await);
        }
        self.block_entities
            .write()
            .await
            .insert(block_entity.get_position(), block_entity.clone());
        Some(block_entity)
    }

    /// Saved tags of every block entity changed since the last call.
    pub async fn take_dirty(&self) -> Vec<NbtCompound> {
        let dirty: Vec<_> = self
            .block_entities
            .read()
            .await
            .values()
            .filter(|block_entity| block_entity.is_dirty())
            .cloned()
            .collect();

        let mut saved = Vec::with_capacity(dirty.len());
        for block_entity in dirty {
            block_entity.clear_dirty();
            let mut nbt = NbtCompound::new();
            block_entity.write_internal(&mut nbt).await;
            saved.push(nbt);
        }
        saved
    }

    /// Primary waystones in this world; dummies are left out.
    pub async fn waystones(&self) -> Vec<Arc<WaystoneBlockEntity>> {
        let block_entities: Vec<_> = self.block_entities.read().await.values().cloned().collect();
        block_entities
            .into_iter()
            .filter_map(|block_entity| block_entity.into_any().downcast::<WaystoneBlockEntity>().ok())
            .filter(|waystone| !waystone.is_dummy())
            .collect()
    }

    pub async fn global_waystones(&self) -> Vec<Arc<dyn Waystone>> {
        self.waystones()
            .await
            .into_iter()
            .filter(|waystone| waystone.is_global())
            .map(|waystone| waystone as Arc<dyn Waystone>)
            .collect()
    }
}

#[async_trait]
impl BlockEntityAccessor for World {
    async fn get_block_entity(&self, position: &BlockPos) -> Option<Arc<dyn BlockEntity>> {
        self.block_entities.read().await.get(position).cloned()
    }
}

#[async_trait]
impl SimpleWorld for World {
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    async fn get_biome(&self, position: &BlockPos) -> Biome {
        self.biomes
            .read()
            .await
            .get(position)
            .copied()
            .unwrap_or(self.default_biome)
    }

    async fn add_block_entity(&self, block_entity: Arc<dyn BlockEntity>) {
        self.place_in_world(&*block_entity);
        self.resolve_name(&*block_entity).await;
        self.block_entities
            .write()
            .await
            .insert(block_entity.get_position(), block_entity.clone());
        self.broadcast_block_entity(&*block_entity).await;
    }

    async fn remove_block_entity(&self, position: &BlockPos) {
        self.block_entities.write().await.remove(position);
    }

    async fn update_block_entity(&self, block_entity: &Arc<dyn BlockEntity>) {
        self.resolve_name(&**block_entity).await;
        self.broadcast_block_entity(&**block_entity).await;
    }
}
