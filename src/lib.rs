//! Core modules for the globe viewer.
//!
//! The crate keeps the numeric building blocks (sphere generation, the
//! fly camera, input snapshots) free of windowing concerns so they can
//! be exercised headlessly; the wgpu renderer and the event loop glue
//! live behind the `render` module and the binary respectively.

pub mod camera;
pub mod input;
pub mod mesh;
pub mod render;
pub mod texture;

pub use camera::FlyCamera;
pub use input::{InputState, KeyCode};
pub use mesh::{generate_uv_sphere, SphereMesh, Vertex};
pub use render::{DirectionalLight, Renderer};
pub use texture::{TextureError, TextureImage};
