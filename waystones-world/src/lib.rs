pub mod biome;
pub mod block;
pub mod dimension;
pub mod name_generator;
pub mod waystone;
pub mod world;
