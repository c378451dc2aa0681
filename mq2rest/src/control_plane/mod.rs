//! Control-plane layer.
//!
//! Owns the startup-time routing state: the route registry and the correlation
//! table. Both are assembled once from configuration and then shared read-only
//! by every data-plane worker, so neither needs a lock.
//!
//! ```
//! use mq2rest::{CorrelationEntry, CorrelationTable, Route, RouteRegistry, Template};
//!
//! let mut registry = RouteRegistry::new();
//! registry
//!     .register(Route::subscribe("cmd/set", "devices/<CMD>/value", Template::passthrough()))
//!     .unwrap();
//! assert!(registry.register(Route::subscribe("", "devices", Template::passthrough())).is_err());
//! assert!(registry.lookup_subscribe("unknown/topic").is_none());
//!
//! let table = CorrelationTable::from_entries([CorrelationEntry::new("GainCommand", "gain")]).unwrap();
//! assert_eq!(table.resolve("GainCommand"), Some("gain"));
//! ```

pub(crate) mod correlation_table;
pub(crate) mod route_registry;
