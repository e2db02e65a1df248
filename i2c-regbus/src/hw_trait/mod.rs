//! Hardware abstraction layer traits.
//!
//! [`I2cBus`] is the narrow contract register-level code is written
//! against. The Linux i2c-dev backend in [`crate::transport`] implements it;
//! other backends can be substituted without touching the register layer.

pub mod i2c;

#[cfg(test)]
pub(crate) mod mock;

pub use i2c::I2cBus;
