//! Atomic report writes with automatic parent creation.

use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub fn atomic_write(dest: impl AsRef<Path>, bytes: impl AsRef<[u8]>) -> io::Result<()> {
    let dest = dest.as_ref();
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes.as_ref())?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

/// Pretty JSON of `value`, written atomically to `dest`.
pub fn write_json(dest: impl AsRef<Path>, value: &impl Serialize) -> anyhow::Result<()> {
    let dest = dest.as_ref();
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    atomic_write(dest, text)
        .map_err(|e| anyhow::anyhow!("write {}: {e}", dest.display()))
}
