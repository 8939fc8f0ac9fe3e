//! Service registry module.
//!
//! This module maps service names to the way a service is constructed:
//! - `ServiceEntry` - tagged constructor/callback variant
//! - `ServiceRegistry` - name lookup, registration and override of entries

mod entry;
mod service_registry;

pub use entry::{ServiceCallback, ServiceConstructor, ServiceEntry};
pub use service_registry::ServiceRegistry;
