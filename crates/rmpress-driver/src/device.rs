// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The `remarkable://` virtual device scheme.
//
// A real printer driver moves job bytes through device I/O. This one never
// does: the hosting framework spools every job to a local file first, and
// the hand-off core uploads that file out-of-band. The device exists only
// so the framework has a URI scheme to validate and a status to poll, so
// every I/O operation here is a deliberate no-op.

use std::io;

use tracing::debug;

use rmpress_core::types::DEVICE_URI_PREFIX;

/// Reported state of the virtual device. It has no hardware to be busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Idle,
}

/// Handle for one opened `remarkable://` device URI.
#[derive(Debug)]
pub struct VirtualDevice {
    uri: String,
}

impl VirtualDevice {
    /// Open the device behind a URI.
    ///
    /// Accepts any URI within our scheme; the folder path inside it is
    /// interpreted later, at job hand-off time.
    pub fn open(uri: &str) -> io::Result<Self> {
        if !uri.starts_with(DEVICE_URI_PREFIX) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a remarkable:// URI: {uri}"),
            ));
        }
        debug!(uri, "virtual device opened");
        Ok(Self { uri: uri.to_string() })
    }

    /// The URI this handle was opened with.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Device read: there is never anything to read back.
    pub fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }

    /// Device write: report the bytes as consumed and discard them.
    /// Job payloads travel via the spool file, not device I/O.
    pub fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    /// Device status poll.
    pub fn status(&self) -> DeviceStatus {
        DeviceStatus::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_accepts_scheme_uris() {
        let dev = VirtualDevice::open("remarkable://acct/Notes").expect("open");
        assert_eq!(dev.uri(), "remarkable://acct/Notes");
    }

    #[test]
    fn open_rejects_foreign_uris() {
        assert!(VirtualDevice::open("usb://Canon/MF240").is_err());
    }

    #[test]
    fn read_returns_nothing() {
        let mut dev = VirtualDevice::open("remarkable://acct").expect("open");
        let mut buf = [0u8; 64];
        assert_eq!(dev.read(&mut buf).expect("read"), 0);
    }

    #[test]
    fn write_discards_but_reports_consumed() {
        let mut dev = VirtualDevice::open("remarkable://acct").expect("open");
        assert_eq!(dev.write(b"%PDF-1.7").expect("write"), 8);
    }

    #[test]
    fn status_is_always_idle() {
        let dev = VirtualDevice::open("remarkable://acct").expect("open");
        assert_eq!(dev.status(), DeviceStatus::Idle);
    }
}
