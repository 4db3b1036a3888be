// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Static driver-capability record for the virtual reMarkable printer.
//
// The hosting print framework registers drivers from a fixed record of
// named fields. The tablet is an e-ink device: grayscale, single-sided,
// and it only ever receives finished PDFs -- page rasterisation is never
// performed here, so raster submissions are rejected outright.

use tracing::warn;

use rmpress_core::error::{Result, RmpressError};

/// Media sizes the virtual printer advertises.
///
/// The tablet renders any page size, but advertising the common office
/// sizes keeps client print dialogs sane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSize {
    A4,
    A5,
    Letter,
}

impl MediaSize {
    /// IPP `media` keyword (RFC 8011 §5.2.13) for this size.
    pub fn ipp_media_keyword(&self) -> &'static str {
        match self {
            Self::A4 => "iso_a4_210x297mm",
            Self::A5 => "iso_a5_148x210mm",
            Self::Letter => "na_letter_8.5x11in",
        }
    }
}

/// Fixed capability record registered with the hosting framework.
#[derive(Debug, Clone)]
pub struct DriverCapabilities {
    /// Short driver name used in registration.
    pub name: &'static str,
    /// Human-readable make and model shown in client print dialogs.
    pub make_and_model: &'static str,
    /// MIME types accepted for job submission.
    pub formats: &'static [&'static str],
    /// Format assumed when the client does not declare one.
    pub default_format: &'static str,
    /// Advertised media sizes.
    pub media: &'static [MediaSize],
    /// Default media size.
    pub default_media: MediaSize,
    /// Whether colour output is produced. The tablet is e-ink: never.
    pub color: bool,
    /// Whether duplex is meaningful. There is no paper: never.
    pub duplex: bool,
    /// Whether the raster imaging path is wired up. It is not -- jobs pass
    /// through as spooled PDFs.
    pub raster_supported: bool,
}

/// The single driver this application registers.
pub fn remarkable_driver() -> DriverCapabilities {
    DriverCapabilities {
        name: "remarkable",
        make_and_model: "reMarkable Paper Tablet",
        formats: &["application/pdf"],
        default_format: "application/pdf",
        media: &[MediaSize::A4, MediaSize::A5, MediaSize::Letter],
        default_media: MediaSize::A4,
        color: false,
        duplex: false,
        raster_supported: false,
    }
}

impl DriverCapabilities {
    /// Whether a client-declared MIME type is accepted for submission.
    pub fn accepts_format(&self, mime: &str) -> bool {
        self.formats.contains(&mime)
    }

    /// Callback for the framework's raster pipeline.
    ///
    /// Always fails: this driver uploads the spooled PDF as-is and has no
    /// page renderer behind it.
    pub fn reject_raster(&self, mime: &str) -> Result<()> {
        warn!(format = mime, "raster submission rejected -- PDF pass-through only");
        Err(RmpressError::UnsupportedFormat(format!(
            "{mime}: raster printing is not supported by the {} driver",
            self.name
        )))
    }
}
