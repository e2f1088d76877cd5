use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use flate2::read::GzDecoder;
use thiserror::Error;
use waystones_nbt::{compound::NbtCompound, from_bytes};
use waystones_world::block::entities::{BlockEntity, block_entity_from_nbt};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Couldn't read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Couldn't decompress block entity: {0}")]
    Decompress(#[source] io::Error),
    #[error("Invalid block entity tag: {0}")]
    Nbt(#[from] waystones_nbt::Error),
    #[error("Tag does not describe a known block entity")]
    UnknownBlockEntity,
}

/// Decodes a stored block entity tag. Gzip compressed tags are detected by their header.
pub fn decode_tag(bytes: &[u8]) -> Result<NbtCompound, InspectError> {
    let (_, nbt) = if bytes.starts_with(&GZIP_MAGIC) {
        let mut buf = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut buf)
            .map_err(InspectError::Decompress)?;
        from_bytes(&mut &buf[..])?
    } else {
        from_bytes(&mut &bytes[..])?
    };
    Ok(nbt)
}

pub fn read_block_entity(
    path: &Path,
) -> Result<(NbtCompound, Arc<dyn BlockEntity>), InspectError> {
    let bytes = fs::read(path).map_err(|source| InspectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let nbt = decode_tag(&bytes)?;
    let block_entity = block_entity_from_nbt(&nbt).ok_or(InspectError::UnknownBlockEntity)?;
    Ok((nbt, block_entity))
}
