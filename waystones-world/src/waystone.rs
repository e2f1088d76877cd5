use async_trait::async_trait;
use uuid::Uuid;
use waystones_util::math::position::BlockPos;

use crate::dimension::Dimension;

/// What the rest of the server needs to know about a waystone, regardless of
/// how it is stored.
#[async_trait]
pub trait Waystone: Send + Sync {
    fn waystone_uid(&self) -> Uuid;

    async fn name(&self) -> String;

    fn position(&self) -> BlockPos;

    fn dimension(&self) -> Dimension;

    /// False once the block has been removed from the world.
    fn is_valid(&self) -> bool;

    fn is_global(&self) -> bool;

    fn was_generated(&self) -> bool;

    /// Unowned waystones belong to everyone; `bypass` grants access regardless.
    async fn is_owner(&self, player_id: &Uuid, bypass: bool) -> bool;
}
