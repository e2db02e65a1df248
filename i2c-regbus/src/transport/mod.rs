//! Physical transport layer for I2C target devices.
//!
//! This module owns the connection to a Linux i2c-dev character device and
//! exposes raw byte access to one bound target, with no register or
//! protocol knowledge. See <https://docs.kernel.org/i2c/dev-interface.html>.

pub mod abi;
pub mod i2c_dev;

pub use i2c_dev::BusHandle;
