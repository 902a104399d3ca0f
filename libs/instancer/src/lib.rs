//! # Instancer
//!
//! Places copies of a template object into a host scene graph: evenly along a
//! line, along a chain of waypoints (optionally filling the gaps between
//! their bounding boxes), or around a pivot.
//!
//! ## Architecture
//!
//! ```text
//! selection → request → snapshot (read scene) → plan (pure) → apply (NodeScope) → SceneGraph
//! ```
//!
//! Every placer first captures [`TransformSnapshot`]s of its inputs, computes
//! a plan without touching the scene, then issues the plan through a
//! [`NodeScope`] so that a rejected scene command removes everything the run
//! created.
//!
//! ## Example
//!
//! ```rust
//! use instancer::{place_radial, MemoryScene, RadialRequest};
//! use instancer_kernel::Vec3;
//!
//! let mut scene = MemoryScene::new();
//! let base = scene.add_node("base", Vec3::ZERO);
//! let petal = scene.add_node("petal", Vec3::new(2.0, 0.0, 0.0));
//!
//! let outcome = place_radial(&mut scene, &RadialRequest::new(base, petal, 6)).unwrap();
//! assert_eq!(outcome.len(), 6);
//! ```

mod apply;
pub mod chain;
pub mod diagnostic;
pub mod error;
pub mod linear;
pub mod params;
pub mod preferences;
pub mod radial;
pub mod scene;
pub mod selection;
pub mod snapshot;
pub mod steps;

// Re-export public API
pub use apply::Pose;
pub use chain::{place_chain, plan_chain, ChainItem, ChainPlan, ChainRequest, ChainSource, FillOptions};
pub use diagnostic::{Diagnostic, PlacementOutcome, Severity};
pub use error::{PlacementError, PlacementResult};
pub use linear::{place_linear, plan_linear, LinearArrayRequest, LinearPlan};
pub use params::{ChainParent, OrientationMode, PlacementSpec};
pub use preferences::Preferences;
pub use radial::{place_radial, plan_radial, RadialPlan, RadialRequest, RadialStep};
pub use scene::{MemoryScene, NodeId, NodeScope, SceneError, SceneGraph};
pub use selection::{resolve_chain, resolve_linear, resolve_radial};
pub use snapshot::TransformSnapshot;
