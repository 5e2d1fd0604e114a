//! Multi-instance runtime: ambient thread-local context, per-instance
//! asset registry and frame tick, and hot-reload with scope-matched
//! state migration (§4.8, §5).

pub mod ambient;
pub mod assets;
pub mod callbacks;
pub mod compile;
pub mod error;
pub mod instance;
pub mod migrate;
pub mod registry;
pub mod reload;

pub use ambient::{current_instance, pop_context, push_context};
pub use assets::AssetRegistry;
pub use callbacks::InstanceCallbacks;
pub use compile::compile_source;
pub use error::{RuntimeError, RuntimeResult};
pub use instance::Instance;
pub use migrate::migrate_scoped_state;
pub use registry::{InstanceRegistry, IR_MAX_INSTANCES};
pub use reload::{PollResult, ReloadWatcher, DEBOUNCE};
