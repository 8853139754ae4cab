//! Metadata preservation for copied files.
//! - Timestamps (atime, mtime) via `filetime`.
//! - Unix permission bits; the read-only attribute on Windows.
//! - Extended attributes when built with the `xattrs` feature.
//!
//! Failures are logged at WARN and swallowed: the bytes already landed, and a
//! filesystem that rejects `utimes`/`chmod` should not turn every copy into an error.

use anyhow::Result;
use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Apply `src_meta`'s timestamps and permissions to `dest`.
pub fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) -> Result<()> {
    let at = FileTime::from_last_access_time(src_meta);
    let mt = FileTime::from_last_modification_time(src_meta);
    match set_file_times(dest, at, mt) {
        Ok(()) => trace!(path = %dest.display(), "set atime/mtime on destination"),
        Err(e) => {
            warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination")
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", mode), error = %e, "failed to set permissions on destination");
        }
    }

    #[cfg(windows)]
    {
        let ro = src_meta.permissions().readonly();
        match fs::metadata(dest) {
            Ok(meta) => {
                let mut perms = meta.permissions();
                perms.set_readonly(ro);
                if let Err(e) = fs::set_permissions(dest, perms) {
                    warn!(path = %dest.display(), readonly = ro, error = %e, "failed to set readonly attribute on destination");
                }
            }
            Err(e) => {
                warn!(path = %dest.display(), error = %e, "failed to stat destination for readonly preservation");
            }
        }
    }

    Ok(())
}

/// Copy extended attributes from `src` to `dest` (no-op without the `xattrs` feature).
pub fn preserve_xattrs(src: &Path, dest: &Path) -> Result<()> {
    #[cfg(feature = "xattrs")]
    {
        let names = match xattr::list(src) {
            Ok(names) => names,
            Err(e) => {
                warn!(src = %src.display(), error = %e, "failed to list xattrs; continuing");
                return Ok(());
            }
        };
        for name in names {
            let name_disp = name.to_string_lossy().into_owned();
            match xattr::get(src, &name) {
                Ok(value) => {
                    let value = value.unwrap_or_default();
                    if let Err(e) = xattr::set(dest, &name, &value) {
                        warn!(dest = %dest.display(), xattr = %name_disp, error = %e, "failed to set xattr on destination");
                    } else {
                        trace!(dest = %dest.display(), xattr = %name_disp, size = value.len(), "preserved xattr");
                    }
                }
                Err(e) => {
                    warn!(src = %src.display(), xattr = %name_disp, error = %e, "failed to read xattr value from source");
                }
            }
        }
        Ok(())
    }
    #[cfg(not(feature = "xattrs"))]
    {
        let _ = (src, dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mtime_is_carried_over() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dst = td.path().join("dst");
        fs::write(&src, b"a").unwrap();
        fs::write(&dst, b"a").unwrap();

        let old = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&src, old).unwrap();

        preserve_metadata(&dst, &fs::metadata(&src).unwrap()).unwrap();
        let got = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(got.unix_seconds(), 1_000_000_000);
    }

    #[cfg(unix)]
    #[test]
    fn mode_bits_are_carried_over() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dst = td.path().join("dst");
        fs::write(&src, b"a").unwrap();
        fs::write(&dst, b"a").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o640)).unwrap();

        preserve_metadata(&dst, &fs::metadata(&src).unwrap()).unwrap();
        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
