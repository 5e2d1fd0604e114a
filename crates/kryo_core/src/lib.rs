//! Kryo IR core
//!
//! The component tree data model for the Kryo UI intermediate
//! representation: pooled allocation, hashed id lookup, dirty-flag
//! propagation, and the builder/hit-test operations layered on top.

pub mod animation_data;
pub mod builder;
pub mod color_parse;
pub mod component;
pub mod easing;
pub mod error;
pub mod event;
pub mod hittest;
pub mod ids;
pub mod layout;
pub mod style;
pub mod tabgroup;
pub mod tree;
pub mod value;

pub use animation_data::{Animation, AnimationProperty, Keyframe, KeyframeProperty, Transition};
pub use component::{Component, ComponentVariant, CustomData, DirtyFlags, RenderedBounds, TableRole, TabGroupRole};
pub use easing::Easing;
pub use error::{IrError, IrResult};
pub use event::{Event, EventType, Logic, SourceLanguage};
pub use hittest::{find_component_at_point, is_point_in_component};
pub use ids::{ComponentId, IdAllocator, InstanceId, LogicId, NodeHandle};
pub use layout::{FlexLayout, GridLayout, Layout, LayoutMode};
pub use style::{Font, Style};
pub use tabgroup::{DragPhase, TabGroupState, TabVisuals};
pub use tree::{ComponentCallbacks, ContextMetadata, IRContext, ReactiveManifest, Stylesheet};
pub use value::{Color, Dimension, Gradient};
