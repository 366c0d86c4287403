//! Herblore Core Library
//!
//! Deterministic aspect allocation for catalog items:
//! - Aspect definitions classified by tier and type, weighted by repetition
//! - Catalog entry keys with variant wildcards
//! - Seeded, pool-depleting allocator with fallback and merge-by-identity
//! - Built-in content tables (RON)
//! - Structured logging
//!
//! The registry is the entry point: register definitions and slot rules, call
//! `load(seed)`, then read merged aspects per item. Results are reproducible
//! for a given seed and registration order.

pub mod allocator;
pub mod aspect;
pub mod catalog;
pub mod content;
pub mod logging;
pub mod registry;

pub use aspect::{AspectDefinition, AspectId, AspectTier, AspectType, ComputedAspect};
pub use catalog::{AspectSlotRule, ItemId, ItemKey};
pub use registry::{AspectRegistry, RegistryError};
