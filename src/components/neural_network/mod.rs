//! Neural network particle animation.
//!
//! Renders drifting points on an HTML canvas with:
//! - Layered placement, like the columns of a network diagram
//! - Pointer repulsion, ambient drift and a per-layer speed cap
//! - Proximity links whose reach depends on layer distance
//! - Pulsing glow on links and points, and a halo under the pointer
//!
//! The engine ([`NetworkState`], [`update_points`], [`build_lines`]) is plain
//! Rust with no browser dependency; [`AnimationDriver`] runs it against any
//! [`FrameHost`], and [`NeuralNetworkCanvas`] wires it to a real canvas.
//!
//! # Example
//!
//! ```ignore
//! use neural_canvas::{NeuralNetworkCanvas, Variant};
//!
//! view! {
//!     <div class="hero">
//!         <NeuralNetworkCanvas variant=Variant::Hero />
//!     </div>
//! }
//! ```

mod component;
pub mod config;
pub mod connections;
pub mod driver;
mod host;
pub mod physics;
pub mod points;
mod render;
pub mod state;
pub mod theme;

pub use component::NeuralNetworkCanvas;
pub use config::{BoundaryPolicy, NetworkConfig, Variant, load_config};
pub use connections::{Line, build_lines};
pub use driver::{AnimationDriver, FrameHost, FrameId, HostError, Phase};
pub use physics::{Bounds, update_points};
pub use points::{Layer, Point, initialize_points};
pub use state::{NetworkState, PointerState};
pub use theme::{Theme, ThemeName};
