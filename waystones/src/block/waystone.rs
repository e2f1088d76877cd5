use std::sync::Arc;

use waystones_config::{RANDOM_NAME_SENTINEL, ownership::OwnershipConfig};
use waystones_nbt::fits_nbt_string;
use waystones_util::math::position::BlockPos;
use waystones_world::{
    block::entities::waystone::WaystoneBlockEntity,
    waystone::Waystone,
    world::{BlockEntityAccessor, SimpleWorld},
};

use super::{BrokenArgs, NormalUseArgs, PlacedArgs, WaystoneError};
use crate::world::World;

/// Handles a two block tall waystone: the state lives in the lower block,
/// the upper block holds a dummy.
pub struct WaystoneBlock {
    ownership: OwnershipConfig,
}

impl WaystoneBlock {
    pub fn new(ownership: OwnershipConfig) -> Self {
        Self { ownership }
    }

    pub async fn placed(
        &self,
        args: PlacedArgs<'_>,
    ) -> Result<Arc<WaystoneBlockEntity>, WaystoneError> {
        for position in [*args.location, args.location.up()] {
            if args.world.get_block_entity(&position).await.is_some() {
                return Err(WaystoneError::Occupied(position));
            }
        }

        let waystone = Arc::new(WaystoneBlockEntity::new(*args.location));
        if let Some(player) = args.player {
            waystone.initialize_placed_by(player.id()).await;
        }
        args.world.add_block_entity(waystone.clone()).await;

        let dummy = WaystoneBlockEntity::new_dummy(args.location.up());
        args.world.add_block_entity(Arc::new(dummy)).await;

        log::debug!(
            "Placed waystone {} ({}) at {}",
            waystone.waystone_uid(),
            waystone.name().await,
            args.location
        );
        Ok(waystone)
    }

    pub async fn broken(&self, args: BrokenArgs<'_>) -> Result<(), WaystoneError> {
        let waystone = waystone_at(args.world, args.location)
            .await?
            .get_parent(&**args.world)
            .await;

        // Only take the upper block with us if it is our own dummy.
        let mut own_dummy = None;
        if !waystone.is_dummy() {
            if let Ok(upper) = waystone_at(args.world, &waystone.position.up()).await {
                if upper.is_dummy()
                    && Arc::ptr_eq(&upper.get_parent(&**args.world).await, &waystone)
                {
                    own_dummy = Some(upper);
                }
            }
        }

        for part in std::iter::once(waystone.clone()).chain(own_dummy) {
            part.mark_removed();
            args.world.remove_block_entity(&part.position).await;
        }

        log::debug!(
            "{} broke waystone {} at {}",
            args.player.name(),
            waystone.waystone_uid(),
            waystone.position
        );
        Ok(())
    }

    /// The waystone the player is interacting with, if they may manage it.
    pub async fn normal_use(
        &self,
        args: NormalUseArgs<'_>,
    ) -> Result<Arc<WaystoneBlockEntity>, WaystoneError> {
        let waystone = self.parent_waystone(args.world, args.location).await?;
        let bypass = args.player.bypasses_ownership(&self.ownership);
        if !waystone.is_owner(&args.player.id(), bypass).await {
            return Err(WaystoneError::NotOwner);
        }
        Ok(waystone)
    }

    pub async fn rename(&self, args: NormalUseArgs<'_>, name: &str) -> Result<(), WaystoneError> {
        let name = name.trim();
        if name.is_empty() || name == RANDOM_NAME_SENTINEL || !fits_nbt_string(name) {
            return Err(WaystoneError::InvalidName(name.to_string()));
        }

        let waystone = self.parent_waystone(args.world, args.location).await?;
        if self.ownership.restrict_rename_to_owner {
            let bypass = args.player.bypasses_ownership(&self.ownership);
            if !waystone.is_owner(&args.player.id(), bypass).await {
                return Err(WaystoneError::NotOwner);
            }
        }

        args.world.name_generator().mark_used(name);
        waystone
            .set_name(&**args.world, name.to_string())
            .await;
        log::info!(
            "{} renamed waystone at {} to {name}",
            args.player.name(),
            waystone.position
        );
        Ok(())
    }

    async fn parent_waystone(
        &self,
        world: &Arc<World>,
        location: &BlockPos,
    ) -> Result<Arc<WaystoneBlockEntity>, WaystoneError> {
        let waystone = waystone_at(world, location)
            .await?
            .get_parent(&**world)
            .await;
        if waystone.is_dummy() {
            return Err(WaystoneError::NoWaystone(*location));
        }
        Ok(waystone)
    }
}

async fn waystone_at(
    world: &World,
    location: &BlockPos,
) -> Result<Arc<WaystoneBlockEntity>, WaystoneError> {
    world
        .get_block_entity(location)
        .await
        .and_then(|block_entity| block_entity.into_any().downcast::<WaystoneBlockEntity>().ok())
        .ok_or(WaystoneError::NoWaystone(*location))
}
