//! Write-then-rename file output.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::IoResult;

/// Run `write` against a temporary file next to `path`, then move it into
/// place. On any error the temporary file is removed and `path` is left
/// untouched.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> IoResult<()>
where
    F: FnOnce(&mut dyn Write) -> IoResult<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
