// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// rmpress Driver -- the static capability record and the `remarkable://`
// virtual device scheme registered with the hosting print framework.

pub mod capabilities;
pub mod device;

pub use capabilities::{remarkable_driver, DriverCapabilities, MediaSize};
pub use device::{DeviceStatus, VirtualDevice};
