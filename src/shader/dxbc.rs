//! Minimal reader for the DXBC shader container.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! "DXBC" | checksum[16] | version u32 | total size u32 | chunk count u32 | offsets u32[count]
//! chunk: fourcc[4] | size u32 | data[size]
//! ```
//!
//! Only what debug-info recovery needs is read: chunk enumeration, whether a
//! debug chunk is present, and the external debug-file path recorded in a
//! tagged private-data chunk. Malformed containers simply yield nothing.

pub type FourCC = [u8; 4];

pub const DXBC_MAGIC: FourCC = *b"DXBC";
pub const CHUNK_SDBG: FourCC = *b"SDBG";
pub const CHUNK_SPDB: FourCC = *b"SPDB";
pub const CHUNK_PRIV: FourCC = *b"PRIV";

const HEADER_LEN: usize = 4 + 16 + 4 + 4 + 4;
const CHUNK_HEADER_LEN: usize = 8;

/// GUID `{EAB25520-6670-4865-8429-6C08-5100FFFE}` in its in-memory layout.
/// A private-data chunk starting with it carries the debug-file path.
pub const SHADER_DEBUG_MAGIC: [u8; 16] = [
    0x20, 0x55, 0xb2, 0xea, // data1
    0x70, 0x66, // data2
    0x65, 0x48, // data3
    0x84, 0x29, 0x6c, 0x08, 0x51, 0x00, 0xff, 0xfe,
];

#[inline]
fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

/// A parsed view over container bytes.
#[derive(Debug, Clone, Copy)]
pub struct DxbcContainer<'a> {
    data: &'a [u8],
    chunk_count: usize,
}

impl<'a> DxbcContainer<'a> {
    #[must_use]
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        if data.len() < HEADER_LEN || data[..4] != DXBC_MAGIC {
            return None;
        }
        let chunk_count = read_u32(data, 28)? as usize;
        let table_end = HEADER_LEN.checked_add(chunk_count.checked_mul(4)?)?;
        if table_end > data.len() {
            return None;
        }
        Some(Self { data, chunk_count })
    }

    /// Every well-formed chunk, in table order. Chunks whose offset or size
    /// runs past the end of the container are skipped.
    pub fn chunks(&self) -> impl Iterator<Item = (FourCC, &'a [u8])> + '_ {
        let data = self.data;
        (0..self.chunk_count).filter_map(move |i| {
            let offset = read_u32(data, HEADER_LEN + i * 4)? as usize;
            let fourcc: FourCC = data.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
            let size = read_u32(data, offset + 4)? as usize;
            let start = offset.checked_add(CHUNK_HEADER_LEN)?;
            let body = data.get(start..start.checked_add(size)?)?;
            Some((fourcc, body))
        })
    }

    #[must_use]
    pub fn find_chunk(&self, fourcc: FourCC) -> Option<&'a [u8]> {
        self.chunks().find(|(cc, _)| *cc == fourcc).map(|(_, body)| body)
    }
}

/// Whether the blob already embeds debug information.
#[must_use]
pub fn has_debug_info(bytecode: &[u8]) -> bool {
    DxbcContainer::parse(bytecode).is_some_and(|container| {
        container
            .chunks()
            .any(|(cc, _)| cc == CHUNK_SDBG || cc == CHUNK_SPDB)
    })
}

/// Path of the external debug file recorded in the blob, if any.
#[must_use]
pub fn debug_binary_path(bytecode: &[u8]) -> Option<String> {
    let container = DxbcContainer::parse(bytecode)?;
    container.chunks().find_map(|(cc, body)| {
        if cc != CHUNK_PRIV || !body.starts_with(&SHADER_DEBUG_MAGIC) {
            return None;
        }
        let text = &body[SHADER_DEBUG_MAGIC.len()..];
        let end = text.iter().position(|b| *b == 0).unwrap_or(text.len());
        let path = String::from_utf8_lossy(&text[..end]).into_owned();
        (!path.is_empty()).then_some(path)
    })
}

/// Lays out a container holding `chunks`. The checksum is left zeroed.
#[must_use]
pub fn assemble(chunks: &[(FourCC, &[u8])]) -> Vec<u8> {
    let table_end = HEADER_LEN + chunks.len() * 4;
    let total = table_end
        + chunks
            .iter()
            .map(|(_, body)| CHUNK_HEADER_LEN + body.len())
            .sum::<usize>();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&DXBC_MAGIC);
    out.extend_from_slice(&[0; 16]);
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(chunks.len() as u32).to_le_bytes());

    let mut offset = table_end;
    for (_, body) in chunks {
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += CHUNK_HEADER_LEN + body.len();
    }
    for (fourcc, body) in chunks {
        out.extend_from_slice(fourcc);
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(body);
    }
    out
}

/// Body of a private-data chunk pointing at an external debug file.
#[must_use]
pub fn debug_path_chunk(path: &str) -> Vec<u8> {
    let mut body = SHADER_DEBUG_MAGIC.to_vec();
    body.extend_from_slice(path.as_bytes());
    body.push(0);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_containers() {
        assert!(DxbcContainer::parse(b"not a shader").is_none());
        assert!(!has_debug_info(&[]));
        assert_eq!(debug_binary_path(b"DXBC"), None);
    }

    #[test]
    fn finds_debug_chunks() {
        let stripped = assemble(&[(*b"SHEX", &[1, 2, 3, 4][..])]);
        assert!(!has_debug_info(&stripped));

        let full = assemble(&[(*b"SHEX", &[1, 2, 3, 4][..]), (CHUNK_SPDB, &[0; 32][..])]);
        assert!(has_debug_info(&full));
        assert_eq!(DxbcContainer::parse(&full).unwrap().chunks().count(), 2);
    }

    #[test]
    fn reads_tagged_debug_path() {
        let priv_body = debug_path_chunk("lz4#shaders/blur.pdb");
        let blob = assemble(&[(*b"SHEX", &[0; 8][..]), (CHUNK_PRIV, priv_body.as_slice())]);
        assert_eq!(debug_binary_path(&blob).as_deref(), Some("lz4#shaders/blur.pdb"));
    }

    #[test]
    fn untagged_private_data_is_ignored() {
        let blob = assemble(&[(CHUNK_PRIV, &b"some other private data\0"[..])]);
        assert_eq!(debug_binary_path(&blob), None);
    }

    #[test]
    fn truncated_chunk_is_skipped() {
        let mut blob = assemble(&[(CHUNK_SDBG, &[0; 16][..])]);
        blob.truncate(blob.len() - 4);
        assert!(!has_debug_info(&blob));
    }
}
