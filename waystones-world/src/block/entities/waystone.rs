use std::{
    any::Any,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use crossbeam::atomic::AtomicCell;
use rand::RngCore;
use tokio::sync::Mutex;
use uuid::Uuid;
use waystones_config::RANDOM_NAME_SENTINEL;
use waystones_nbt::compound::NbtCompound;
use waystones_util::math::position::BlockPos;

use super::BlockEntity;
use crate::{
    dimension::Dimension,
    name_generator::NameGenerator,
    waystone::Waystone,
    world::{BlockEntityAccessor, SimpleWorld},
};

const UUID: &str = "UUID";
// Older releases wrote `UUID` but read `UUId`, so identities never survived a reload.
// Still accepted on read so such saves keep whatever they have.
const LEGACY_UUID: &str = "UUId";
const IS_DUMMY: &str = "IsDummy";
const WAYSTONE_NAME: &str = "WaystoneName";
const WAS_GENERATED: &str = "WasGenerated";
const OWNER: &str = "Owner";
const IS_GLOBAL: &str = "IsGlobal";
const IS_MOSSY: &str = "IsMossy";

/// Everything needed to give a waystone its name.
pub struct ResolveNameArgs<'a> {
    pub world: &'a dyn SimpleWorld,
    pub name_generator: &'a NameGenerator,
    pub random: &'a mut (dyn RngCore + Send),
}

/// A waystone occupies two blocks. The lower one holds the state, the upper
/// one is a dummy that defers everything to the block below it.
pub struct WaystoneBlockEntity {
    pub position: BlockPos,
    // Not saved; the world holding the waystone assigns it.
    dimension: AtomicCell<Dimension>,
    waystone_uid: Uuid,
    is_dummy: bool,
    // Empty until generated, or `RANDOM_NAME_SENTINEL` for a name picked on every load.
    name: Mutex<String>,
    owner: Mutex<Option<Uuid>>,
    was_generated: AtomicBool,
    is_global: AtomicBool,
    is_mossy: AtomicBool,
    removed: AtomicBool,
    dirty: AtomicBool,
}

impl WaystoneBlockEntity {
    pub const ID: &'static str = "waystones:waystone";

    pub fn new(position: BlockPos) -> Self {
        Self::with_uid(position, Uuid::new_v4(), false)
    }

    pub fn new_dummy(position: BlockPos) -> Self {
        Self::with_uid(position, Uuid::new_v4(), true)
    }

    /// A waystone for structure templates: it gets a fresh name each time it is loaded.
    pub fn with_random_name(position: BlockPos) -> Self {
        Self {
            name: Mutex::new(RANDOM_NAME_SENTINEL.to_string()),
            ..Self::new(position)
        }
    }

    fn with_uid(position: BlockPos, waystone_uid: Uuid, is_dummy: bool) -> Self {
        Self {
            position,
            dimension: AtomicCell::new(Dimension::default()),
            waystone_uid,
            is_dummy,
            name: Mutex::new(String::new()),
            owner: Mutex::new(None),
            was_generated: AtomicBool::new(true),
            is_global: AtomicBool::new(false),
            is_mossy: AtomicBool::new(false),
            removed: AtomicBool::new(false),
            dirty: AtomicBool::new(false),
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.is_dummy
    }

    pub async fn owner(&self) -> Option<Uuid> {
        *self.owner.lock().await
    }

    pub fn is_mossy(&self) -> bool {
        self.is_mossy.load(Ordering::Relaxed)
    }

    pub fn set_dimension(&self, dimension: Dimension) {
        self.dimension.store(dimension);
    }

    pub fn mark_removed(&self) {
        self.removed.store(true, Ordering::Relaxed);
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Generates a name if this waystone has none yet and returns the current one.
    /// Must run before the waystone is sent to clients.
    pub async fn resolve_name(&self, args: ResolveNameArgs<'_>) -> String {
        if self.is_dummy {
            return String::new();
        }
        // Held across generation so two callers can't both generate.
        let mut name = self.name.lock().await;
        if name.is_empty() {
            let biome = args.world.get_biome(&self.position).await;
            *name = args.name_generator.get_name(biome, args.random);
            self.mark_dirty();
            log::debug!(
                "Named waystone {} at {} in {}: {}",
                self.waystone_uid,
                self.position,
                args.world.dimension(),
                *name
            );
        }
        name.clone()
    }

    /// The waystone that holds the state for this block: the one directly below
    /// for a dummy, otherwise `self`. Only looks one block down.
    pub async fn get_parent(self: &Arc<Self>, world: &dyn BlockEntityAccessor) -> Arc<Self> {
        if self.is_dummy {
            if let Some(below) = world.get_block_entity(&self.position.down()).await {
                if let Ok(parent) = below.into_any().downcast::<WaystoneBlockEntity>() {
                    return parent;
                }
            }
            log::debug!("Dummy waystone at {} has no waystone below it", self.position);
        }
        self.clone()
    }

    pub async fn set_name(self: &Arc<Self>, world: &dyn SimpleWorld, name: String) {
        *self.name.lock().await = name;
        self.mark_dirty();
        let block_entity: Arc<dyn BlockEntity> = self.clone();
        world.update_block_entity(&block_entity).await;
    }

    pub async fn set_owner(&self, owner: Uuid) {
        *self.owner.lock().await = Some(owner);
        self.mark_dirty();
    }

    pub fn set_global(&self, is_global: bool) {
        self.is_global.store(is_global, Ordering::Relaxed);
        self.mark_dirty();
    }

    pub fn set_mossy(&self, is_mossy: bool) {
        self.is_mossy.store(is_mossy, Ordering::Relaxed);
        self.mark_dirty();
    }

    /// A player placed this waystone: they own it and its name is their choice.
    pub async fn initialize_placed_by(&self, placer: Uuid) {
        self.set_owner(placer).await;
        self.was_generated.store(false, Ordering::Relaxed);
    }

    /// Names the waystone if needed and returns the tag sent to clients, which is
    /// the same tag that gets saved.
    pub async fn update_tag(&self, args: ResolveNameArgs<'_>) -> NbtCompound {
        self.resolve_name(args).await;
        let mut nbt = NbtCompound::new();
        self.write_nbt(&mut nbt).await;
        nbt
    }
}

#[async_trait]
impl BlockEntity for WaystoneBlockEntity {
    fn resource_location(&self) -> &'static str {
        Self::ID
    }

    fn get_position(&self) -> BlockPos {
        self.position
    }

    fn from_nbt(nbt: &NbtCompound, position: BlockPos) -> Self
    where
        Self: Sized,
    {
        let waystone_uid = nbt
            .get_uuid(UUID)
            .or_else(|| {
                let legacy = nbt.get_uuid(LEGACY_UUID);
                if legacy.is_some() {
                    log::warn!("Waystone at {position} stores its identity under {LEGACY_UUID}");
                }
                legacy
            })
            .unwrap_or_else(|| {
                log::warn!("Waystone at {position} has no stored identity, assigning a new one");
                Uuid::new_v4()
            });
        let is_dummy = nbt.get_bool(IS_DUMMY).unwrap_or(false);
        let waystone = Self::with_uid(position, waystone_uid, is_dummy);
        if is_dummy {
            return waystone;
        }

        let name = nbt.get_string(WAYSTONE_NAME).unwrap_or_default().to_string();
        let owner = nbt.get_uuid(OWNER);
        Self {
            name: Mutex::new(name),
            owner: Mutex::new(owner),
            was_generated: AtomicBool::new(nbt.get_bool(WAS_GENERATED).unwrap_or(true)),
            is_global: AtomicBool::new(nbt.get_bool(IS_GLOBAL).unwrap_or(false)),
            is_mossy: AtomicBool::new(nbt.get_bool(IS_MOSSY).unwrap_or(false)),
            ..waystone
        }
    }

    async fn write_nbt(&self, nbt: &mut NbtCompound) {
        nbt.put_uuid(UUID, &self.waystone_uid);
        nbt.put_bool(IS_DUMMY, self.is_dummy);
        if self.is_dummy {
            return;
        }

        {
            let name = self.name.lock().await;
            if *name == RANDOM_NAME_SENTINEL {
                nbt.put_bool(WAS_GENERATED, true);
            } else {
                nbt.put_string(WAYSTONE_NAME, name.clone());
                nbt.put_bool(WAS_GENERATED, self.was_generated());
            }
        }

        if let Some(owner) = self.owner().await {
            nbt.put_uuid(OWNER, &owner);
        }

        nbt.put_bool(IS_GLOBAL, self.is_global());
        nbt.put_bool(IS_MOSSY, self.is_mossy());
    }

    async fn chunk_data_nbt(&self) -> Option<NbtCompound> {
        let mut nbt = NbtCompound::new();
        self.write_nbt(&mut nbt).await;
        Some(nbt)
    }

    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::Relaxed);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[async_trait]
impl Waystone for WaystoneBlockEntity {
    fn waystone_uid(&self) -> Uuid {
        self.waystone_uid
    }

    async fn name(&self) -> String {
        self.name.lock().await.clone()
    }

    fn position(&self) -> BlockPos {
        self.position
    }

    fn dimension(&self) -> Dimension {
        self.dimension.load()
    }

    fn is_valid(&self) -> bool {
        !self.removed.load(Ordering::Relaxed)
    }

    fn is_global(&self) -> bool {
        self.is_global.load(Ordering::Relaxed)
    }

    fn was_generated(&self) -> bool {
        self.was_generated.load(Ordering::Relaxed)
    }

    async fn is_owner(&self, player_id: &Uuid, bypass: bool) -> bool {
        bypass || self.owner().await.is_none_or(|owner| owner == *player_id)
    }
}

#[cfg(test)]
mod test {
    use std::{collections::HashMap, sync::Arc};

    use async_trait::async_trait;
    use rand::{SeedableRng, rngs::StdRng};
    use tokio::sync::Mutex;
    use uuid::Uuid;
    use waystones_config::{
        NameGenerationMode, RANDOM_NAME_SENTINEL, naming::NameGenerationConfig,
    };
    use waystones_nbt::compound::NbtCompound;
    use waystones_util::math::position::BlockPos;

    use super::{ResolveNameArgs, WaystoneBlockEntity};
    use crate::{
        biome::Biome,
        block::entities::{BlockEntity, block_entity_from_nbt},
        dimension::Dimension,
        name_generator::NameGenerator,
        waystone::Waystone,
        world::{BlockEntityAccessor, SimpleWorld},
    };

    const POS: BlockPos = BlockPos::new(12, 70, -40);

    #[derive(Default)]
    struct TestWorld {
        block_entities: Mutex<HashMap<BlockPos, Arc<dyn BlockEntity>>>,
        updates: Mutex<Vec<BlockPos>>,
    }

    #[async_trait]
    impl BlockEntityAccessor for TestWorld {
        async fn get_block_entity(&self, position: &BlockPos) -> Option<Arc<dyn BlockEntity>> {
            self.block_entities.lock().await.get(position).cloned()
        }
    }

    #[async_trait]
    impl SimpleWorld for TestWorld {
        fn dimension(&self) -> Dimension {
            Dimension::Overworld
        }

        async fn get_biome(&self, _position: &BlockPos) -> Biome {
            Biome::Forest
        }

        async fn add_block_entity(&self, block_entity: Arc<dyn BlockEntity>) {
            self.block_entities
                .lock()
                .await
                .insert(block_entity.get_position(), block_entity);
        }

        async fn remove_block_entity(&self, position: &BlockPos) {
            self.block_entities.lock().await.remove(position);
        }

        async fn update_block_entity(&self, block_entity: &Arc<dyn BlockEntity>) {
            self.updates.lock().await.push(block_entity.get_position());
        }
    }

    fn name_generator() -> NameGenerator {
        NameGenerator::new(&NameGenerationConfig {
            mode: NameGenerationMode::RandomOnly,
            custom_names: Vec::new(),
        })
    }

    async fn written(waystone: &WaystoneBlockEntity) -> NbtCompound {
        let mut nbt = NbtCompound::new();
        waystone.write_nbt(&mut nbt).await;
        nbt
    }

    #[tokio::test]
    async fn six_key_record() {
        let u1 = Uuid::new_v4();
        let mut nbt = NbtCompound::new();
        nbt.put_uuid("UUID", &u1);
        nbt.put_bool("IsDummy", false);
        nbt.put_string("WaystoneName", "Oakshade".to_string());
        nbt.put_bool("WasGenerated", false);
        nbt.put_bool("IsGlobal", true);
        nbt.put_bool("IsMossy", false);

        let waystone = WaystoneBlockEntity::from_nbt(&nbt, POS);
        assert_eq!(waystone.waystone_uid(), u1);
        assert!(!waystone.is_dummy());
        assert_eq!(waystone.name().await, "Oakshade");
        assert!(!waystone.was_generated());
        assert!(waystone.is_global());
        assert!(!waystone.is_mossy());
        assert_eq!(waystone.owner().await, None);

        let written = written(&waystone).await;
        assert_eq!(written.len(), 6);
        assert!(!written.contains_key("Owner"));
        assert_eq!(written, nbt);
    }

    #[tokio::test]
    async fn round_trip_with_owner() {
        let world = TestWorld::default();
        let owner = Uuid::new_v4();
        let waystone = Arc::new(WaystoneBlockEntity::new(POS));
        waystone.set_name(&world, "Old Mill".to_string()).await;
        waystone.initialize_placed_by(owner).await;
        waystone.set_global(true);
        waystone.set_mossy(true);

        let nbt = written(&waystone).await;
        assert_eq!(nbt.get_uuid("Owner"), Some(owner));

        let restored = WaystoneBlockEntity::from_nbt(&nbt, POS);
        assert_eq!(restored.waystone_uid(), waystone.waystone_uid());
        assert_eq!(restored.name().await, "Old Mill");
        assert!(!restored.was_generated());
        assert_eq!(restored.owner().await, Some(owner));
        assert!(restored.is_global());
        assert!(restored.is_mossy());
        assert!(!restored.is_dirty());
    }

    #[tokio::test]
    async fn random_name_is_never_saved() {
        let world = TestWorld::default();
        let generator = name_generator();
        let mut random = StdRng::seed_from_u64(0);

        let waystone = WaystoneBlockEntity::with_random_name(POS);
        waystone.initialize_placed_by(Uuid::new_v4()).await;
        // The placeholder counts as a name, so nothing is generated before saving.
        let name = waystone
            .resolve_name(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random,
            })
            .await;
        assert_eq!(name, RANDOM_NAME_SENTINEL);

        let nbt = written(&waystone).await;
        assert!(!nbt.contains_key("WaystoneName"));
        assert_eq!(nbt.get_bool("WasGenerated"), Some(true));

        let restored = WaystoneBlockEntity::from_nbt(&nbt, POS);
        assert_eq!(restored.name().await, "");
        assert!(restored.was_generated());

        let name = restored
            .resolve_name(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random,
            })
            .await;
        assert!(!name.is_empty());
        assert_ne!(name, RANDOM_NAME_SENTINEL);
        assert_eq!(restored.name().await, name);
        assert!(restored.is_dirty());
    }

    #[tokio::test]
    async fn resolve_name_is_idempotent() {
        let world = TestWorld::default();
        let generator = name_generator();
        let mut random = StdRng::seed_from_u64(9);
        let waystone = WaystoneBlockEntity::new(POS);
        assert_eq!(waystone.name().await, "");

        let first = waystone
            .resolve_name(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random,
            })
            .await;
        let second = waystone
            .resolve_name(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random,
            })
            .await;
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert!(generator.is_used(&first));
    }

    #[tokio::test]
    async fn concurrent_resolution_generates_once() {
        let world = TestWorld::default();
        let generator = name_generator();
        let mut random_a = StdRng::seed_from_u64(1);
        let mut random_b = StdRng::seed_from_u64(2);
        let waystone = WaystoneBlockEntity::new(POS);

        let (a, b) = tokio::join!(
            waystone.resolve_name(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random_a,
            }),
            waystone.resolve_name(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random_b,
            })
        );
        assert_eq!(a, b);
        assert_eq!(waystone.name().await, a);
    }

    #[tokio::test]
    async fn dummies_are_not_named() {
        let world = TestWorld::default();
        let generator = name_generator();
        let mut random = StdRng::seed_from_u64(4);
        let dummy = WaystoneBlockEntity::new_dummy(POS.up());
        let name = dummy
            .resolve_name(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random,
            })
            .await;
        assert_eq!(name, "");
    }

    #[tokio::test]
    async fn ownership() {
        let waystone = WaystoneBlockEntity::new(POS);
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(waystone.is_owner(&stranger, false).await);

        waystone.set_owner(owner).await;
        assert!(waystone.is_owner(&owner, false).await);
        assert!(!waystone.is_owner(&stranger, false).await);
        assert!(waystone.is_owner(&stranger, true).await);
    }

    #[tokio::test]
    async fn placed_by_player() {
        let placer = Uuid::new_v4();
        let waystone = WaystoneBlockEntity::new(POS);
        assert!(waystone.was_generated());

        waystone.initialize_placed_by(placer).await;
        assert_eq!(waystone.owner().await, Some(placer));
        assert!(!waystone.was_generated());
        assert!(waystone.is_dirty());

        let nbt = written(&waystone).await;
        assert_eq!(nbt.get_bool("WasGenerated"), Some(false));
        assert_eq!(nbt.get_uuid("Owner"), Some(placer));
    }

    #[tokio::test]
    async fn parent_of_primary_is_itself() {
        let world = TestWorld::default();
        let primary = Arc::new(WaystoneBlockEntity::new(POS));
        world.add_block_entity(primary.clone()).await;
        assert!(Arc::ptr_eq(&primary.get_parent(&world).await, &primary));
    }

    #[tokio::test]
    async fn parent_of_dummy() {
        let world = TestWorld::default();
        let primary = Arc::new(WaystoneBlockEntity::new(POS));
        let dummy = Arc::new(WaystoneBlockEntity::new_dummy(POS.up()));

        // Nothing below yet.
        assert!(Arc::ptr_eq(&dummy.get_parent(&world).await, &dummy));

        world.add_block_entity(primary.clone()).await;
        world.add_block_entity(dummy.clone()).await;
        assert!(Arc::ptr_eq(&dummy.get_parent(&world).await, &primary));

        world.remove_block_entity(&POS).await;
        assert!(Arc::ptr_eq(&dummy.get_parent(&world).await, &dummy));
    }

    #[tokio::test]
    async fn parent_lookup_is_a_single_hop() {
        let world = TestWorld::default();
        let bottom = Arc::new(WaystoneBlockEntity::new(POS));
        let middle = Arc::new(WaystoneBlockEntity::new_dummy(POS.up()));
        let top = Arc::new(WaystoneBlockEntity::new_dummy(POS.up_height(2)));
        world.add_block_entity(bottom).await;
        world.add_block_entity(middle.clone()).await;
        world.add_block_entity(top.clone()).await;

        assert!(Arc::ptr_eq(&top.get_parent(&world).await, &middle));
    }

    #[tokio::test]
    async fn dummy_only_saves_its_role() {
        let dummy = WaystoneBlockEntity::new_dummy(POS.up());
        dummy.set_global(true);
        let nbt = written(&dummy).await;
        assert_eq!(nbt.len(), 2);
        assert_eq!(nbt.get_uuid("UUID"), Some(dummy.waystone_uid()));
        assert_eq!(nbt.get_bool("IsDummy"), Some(true));

        let mut nbt = nbt;
        nbt.put_string("WaystoneName", "Ignored".to_string());
        nbt.put_bool("IsGlobal", true);
        let restored = WaystoneBlockEntity::from_nbt(&nbt, POS.up());
        assert!(restored.is_dummy());
        assert_eq!(restored.name().await, "");
        assert!(!restored.is_global());
    }

    #[tokio::test]
    async fn missing_or_mistyped_keys_keep_defaults() {
        let restored = WaystoneBlockEntity::from_nbt(&NbtCompound::new(), POS);
        assert!(!restored.is_dummy());
        assert_eq!(restored.name().await, "");
        assert!(restored.was_generated());
        assert_eq!(restored.owner().await, None);
        assert!(!restored.is_global());
        assert!(!restored.is_mossy());
        assert!(restored.is_valid());

        let mut nbt = NbtCompound::new();
        nbt.put_string("IsGlobal", "yes".to_string());
        nbt.put_int("WaystoneName", 3);
        nbt.put_string("Owner", "nobody".to_string());
        let restored = WaystoneBlockEntity::from_nbt(&nbt, POS);
        assert!(!restored.is_global());
        assert_eq!(restored.name().await, "");
        assert_eq!(restored.owner().await, None);
    }

    #[test]
    fn identity_is_fresh_when_absent() {
        let a = WaystoneBlockEntity::from_nbt(&NbtCompound::new(), POS);
        let b = WaystoneBlockEntity::from_nbt(&NbtCompound::new(), POS);
        assert_ne!(a.waystone_uid(), b.waystone_uid());
    }

    // Compatibility: identities are written under `UUID`. Earlier readers looked
    // for `UUId` instead, so both keys are accepted when loading.
    #[tokio::test]
    async fn identity_is_written_under_uuid() {
        let waystone = WaystoneBlockEntity::new(POS);
        let nbt = written(&waystone).await;
        assert!(nbt.contains_key("UUID"));
        assert!(!nbt.contains_key("UUId"));
        let restored = WaystoneBlockEntity::from_nbt(&nbt, POS);
        assert_eq!(restored.waystone_uid(), waystone.waystone_uid());
    }

    #[test]
    fn legacy_uuid_key_is_read() {
        let _ = env_logger::builder().is_test(true).try_init();
        let uid = Uuid::new_v4();
        let mut nbt = NbtCompound::new();
        nbt.put_uuid("UUId", &uid);
        nbt.put_bool("IsDummy", false);
        assert_eq!(WaystoneBlockEntity::from_nbt(&nbt, POS).waystone_uid(), uid);

        let current = Uuid::new_v4();
        nbt.put_uuid("UUID", &current);
        assert_eq!(
            WaystoneBlockEntity::from_nbt(&nbt, POS).waystone_uid(),
            current
        );
    }

    #[tokio::test]
    async fn set_name_notifies_world() {
        let world = TestWorld::default();
        let waystone = Arc::new(WaystoneBlockEntity::new(POS));
        assert!(!waystone.is_dirty());

        waystone.set_name(&world, "Spawn".to_string()).await;
        assert!(waystone.is_dirty());
        assert_eq!(waystone.name().await, "Spawn");
        assert_eq!(*world.updates.lock().await, [POS]);

        waystone.clear_dirty();
        waystone.set_global(true);
        assert!(waystone.is_dirty());
        // Only renames are pushed to clients right away.
        assert_eq!(world.updates.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn update_tag_matches_saved_tag() {
        let world = TestWorld::default();
        let generator = name_generator();
        let mut random = StdRng::seed_from_u64(21);
        let waystone = WaystoneBlockEntity::new(POS);

        let tag = waystone
            .update_tag(ResolveNameArgs {
                world: &world,
                name_generator: &generator,
                random: &mut random,
            })
            .await;
        assert!(
            tag.get_string("WaystoneName")
                .is_some_and(|name| !name.is_empty())
        );
        assert_eq!(tag, written(&waystone).await);
        assert_eq!(waystone.chunk_data_nbt().await, Some(tag));
    }

    #[tokio::test]
    async fn removal_invalidates() {
        let waystone = WaystoneBlockEntity::new(POS);
        assert!(waystone.is_valid());
        waystone.mark_removed();
        assert!(!waystone.is_valid());
    }

    #[tokio::test]
    async fn dispatch_from_saved_block_entity() {
        let waystone = WaystoneBlockEntity::new(POS);
        waystone.set_mossy(true);
        let mut nbt = NbtCompound::new();
        waystone.write_internal(&mut nbt).await;
        assert_eq!(nbt.get_string("id"), Some(WaystoneBlockEntity::ID));

        let restored = block_entity_from_nbt(&nbt).unwrap();
        assert_eq!(restored.get_position(), POS);
        assert_eq!(restored.get_id(), Some(0));
        let restored = restored
            .into_any()
            .downcast::<WaystoneBlockEntity>()
            .unwrap();
        assert_eq!(restored.waystone_uid(), waystone.waystone_uid());
        assert!(restored.is_mossy());

        nbt.remove("x");
        assert!(block_entity_from_nbt(&nbt).is_none());

        let mut unknown = NbtCompound::new();
        unknown.put_string("id", "minecraft:chest".to_string());
        assert!(block_entity_from_nbt(&unknown).is_none());
    }
}
