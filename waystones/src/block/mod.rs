use std::sync::Arc;

use thiserror::Error;
use waystones_util::math::position::BlockPos;

use crate::{entity::player::Player, world::World};

pub mod waystone;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WaystoneError {
    #[error("There is no waystone at {0}")]
    NoWaystone(BlockPos),
    #[error("A block entity already occupies {0}")]
    Occupied(BlockPos),
    #[error("Only the owner of this waystone may do that")]
    NotOwner,
    #[error("{0:?} is not a valid waystone name")]
    InvalidName(String),
}

pub struct PlacedArgs<'a> {
    pub world: &'a Arc<World>,
    pub location: &'a BlockPos,
    /// `None` when the waystone was placed by world generation.
    pub player: Option<&'a Player>,
}

pub struct BrokenArgs<'a> {
    pub world: &'a Arc<World>,
    pub location: &'a BlockPos,
    pub player: &'a Player,
}

pub struct NormalUseArgs<'a> {
    pub world: &'a Arc<World>,
    pub location: &'a BlockPos,
    pub player: &'a Player,
}
