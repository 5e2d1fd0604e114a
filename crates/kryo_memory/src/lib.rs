//! Kryo memory substrate
//!
//! Two allocators underpin the IR: a fixed-block [`Pool`] for tree nodes
//! (`kryo_core::Component` lives here) and a bump [`Arena`] for parser-owned
//! AST nodes and strings (`kryo_parser`). Neither allocator ever moves a
//! live allocation, which is what lets handles into them stay cheap (a
//! generation-checked index rather than a pointer).

pub mod arena;
pub mod pool;

pub use arena::Arena;
pub use pool::{Pool, PoolKey, PoolStats, BLOCK_SIZE};
