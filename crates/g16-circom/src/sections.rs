//! Section table handling shared by the iden3 binary formats.
//!
//! Both `.r1cs` and `.zkey` files start with a four-byte magic, a version
//! word and a section directory: `(id: u32, size: u64, payload)` repeated,
//! all little-endian. Sections are addressed by id and may appear in any
//! order, so parsing is seek-based.

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{malformed, ArtifactError};

/// `(position, size)` of a section payload.
pub(crate) type SectionTable = HashMap<u32, (u64, u64)>;

/// Check magic and version, then index every section of the file.
pub(crate) fn read_preamble<R: Read + Seek>(
    reader: &mut R,
    magic: &[u8; 4],
    expected_version: u32,
    what: &str,
) -> Result<SectionTable, ArtifactError> {
    let mut found = [0u8; 4];
    reader.read_exact(&mut found)?;
    if &found != magic {
        return Err(malformed(format!("not a {what} file")));
    }
    let version = reader.read_u32::<LittleEndian>()?;
    if version != expected_version {
        return Err(malformed(format!("unsupported {what} version {version}")));
    }

    let n_sections = reader.read_u32::<LittleEndian>()?;
    let mut sections = SectionTable::new();
    for _ in 0..n_sections {
        let id = reader.read_u32::<LittleEndian>()?;
        let size = reader.read_u64::<LittleEndian>()?;
        let position = reader.stream_position()?;
        if sections.insert(id, (position, size)).is_some() {
            return Err(malformed(format!("duplicate {what} section {id}")));
        }
        reader.seek(SeekFrom::Current(size as i64))?;
    }
    Ok(sections)
}

/// Seek to the start of a required section, returning its size.
pub(crate) fn enter_section<R: Read + Seek>(
    reader: &mut R,
    sections: &SectionTable,
    id: u32,
    what: &str,
) -> Result<u64, ArtifactError> {
    let (position, size) = sections
        .get(&id)
        .copied()
        .ok_or_else(|| malformed(format!("missing {what} section {id}")))?;
    reader.seek(SeekFrom::Start(position))?;
    Ok(size)
}
