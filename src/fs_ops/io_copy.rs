//! Streaming byte copy into a freshly created file.
//!
//! - The destination is created with `create_new` so a temp name collision is an
//!   error rather than a silent clobber.
//! - Linux tries `copy_file_range` first (in-kernel copy), then falls back to
//!   buffered `io::copy` with 1 MiB buffers.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently after EOF is reached are not included.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst` and return the number of bytes written.
/// `dst` must not exist yet.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    #[cfg(target_os = "linux")]
    {
        if let Some(bytes) = copy_in_kernel(&src_f, &dst_f)? {
            return Ok(bytes);
        }
    }

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

/// `copy_file_range` loop. Returns `Ok(None)` when the kernel refuses before any
/// byte moved (cross-device on old kernels, unsupported filesystem), so the
/// caller can stream instead.
#[cfg(target_os = "linux")]
fn copy_in_kernel(src_f: &File, dst_f: &File) -> io::Result<Option<u64>> {
    use std::os::unix::io::AsRawFd;

    const CHUNK: usize = 16 * 1024 * 1024;
    let mut total: u64 = 0;
    loop {
        // SAFETY: both descriptors are open for the duration of the call and
        // null offsets make the kernel use (and advance) the file positions.
        let rc = unsafe {
            libc::copy_file_range(
                src_f.as_raw_fd(),
                std::ptr::null_mut(),
                dst_f.as_raw_fd(),
                std::ptr::null_mut(),
                CHUNK,
                0,
            )
        };
        if rc > 0 {
            total += rc as u64;
            continue;
        }
        if rc == 0 {
            return Ok(Some(total));
        }
        let err = io::Error::last_os_error();
        let unsupported = matches!(
            err.raw_os_error(),
            Some(libc::EXDEV) | Some(libc::ENOSYS) | Some(libc::EINVAL) | Some(libc::EPERM)
                | Some(libc::EOPNOTSUPP)
        );
        if total == 0 && unsupported {
            return Ok(None);
        }
        return Err(err);
    }
}
