//! # Storage Module
//!
//! Local persistence tier: a durable key to ordered-list-of-records map backed
//! by one JSON file per collection, with an in-memory cache in front to avoid
//! re-reading files on every access.
//!
//! This tier is best-effort durability. When a remote endpoint is configured
//! the remote side is the authority and the local files act as an offline
//! fallback and cache.

pub mod json_store;

pub use json_store::JsonStore;
