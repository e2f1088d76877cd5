use std::{env, path::Path, process::ExitCode};

use waystones::inspect::read_block_entity;
use waystones_config::{LoadConfiguration, WaystonesConfig};
use waystones_world::{block::entities::waystone::WaystoneBlockEntity, waystone::Waystone};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match WaystonesConfig::load(Path::new("config")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    waystones::init_log(&config.logging);

    let Some(path) = env::args_os().nth(1) else {
        log::error!("Usage: waystones <block entity file>");
        return ExitCode::FAILURE;
    };

    let (nbt, block_entity) = match read_block_entity(Path::new(&path)) {
        Ok(read) => read,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{} at {}: {nbt}",
        block_entity.resource_location(),
        block_entity.get_position()
    );

    if let Some(waystone) = block_entity.as_any().downcast_ref::<WaystoneBlockEntity>() {
        if waystone.is_dummy() {
            log::info!("Upper half of the waystone at {}", waystone.position.down());
        } else {
            let owner = waystone
                .owner()
                .await
                .map_or_else(|| "nobody".to_string(), |owner| owner.to_string());
            log::info!(
                "Waystone {} named {:?}, owned by {owner}, global: {}, mossy: {}, generated: {}",
                waystone.waystone_uid(),
                waystone.name().await,
                waystone.is_global(),
                waystone.is_mossy(),
                waystone.was_generated()
            );
        }
    }
    ExitCode::SUCCESS
}
