//! Device registration module
//!
//! Stores push tokens so mobile clients can receive notifications.
//!
//! # Overview
//!
//! The device module provides:
//! - `DeviceRegistry` - Trait for token registration backends
//! - `MemoryDeviceRegistry` - Process-local registry for dev and tests
//! - `HttpDeviceRegistry` - Forwards registrations to the notification worker

mod http;
mod registry;

pub use http::{HttpDeviceRegistry, DEFAULT_WORKER_TIMEOUT_SECS};
pub use registry::{DeviceRegistry, MemoryDeviceRegistry};
