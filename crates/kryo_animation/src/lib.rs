//! Keyframe animation and CSS-style transition engine (§4.6).

pub mod keyframe;
pub mod transition;
pub mod tree;

pub use keyframe::AnimationPhase;
pub use transition::{TransitionRegistry, TransitionValue, MAX_ACTIVE_TRANSITIONS};
pub use tree::{animation_tree_update, propagate_flags};
