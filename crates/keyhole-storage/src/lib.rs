//! Persistent record store backends for keyhole.
//!
//! The in-memory backend backs tests and single-process deployments; the
//! Redis backend treats a Redis server as the durable key-value collection
//! holding one record per fingerprint.

pub mod memory;
pub mod redis;

pub use memory::InMemoryRecordStore;
pub use redis::RedisRecordStore;
