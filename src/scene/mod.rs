//! Scene data and per-frame simulation.
//!
//! - Source: parsed model data (attribute streams, shapes, materials)
//! - Deindex: face-vertex expansion into interleaved vertices
//! - Mesh: validated meshes and the backend-agnostic registry
//! - Material: read-only material table
//! - Light / Lighting: light animation and lighting-model selection
//! - Camera: the fixed view

pub mod camera;
pub mod deindex;
pub mod light;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod source;
pub mod state;

pub use camera::{Camera, SHADING_VIEW_POS};
pub use deindex::{DeindexedMesh, Vertex, deindex};
pub use light::{Light, LightAnimator, NUM_LIGHTS};
pub use lighting::{LightingModel, LightingSelector};
pub use material::{Material, MaterialTable};
pub use mesh::{Mesh, MeshAllocator, MeshRegistry, PreparedMesh, prepare_meshes};
pub use source::{FaceVertex, MaterialDesc, MaterialId, ParsedScene, ShapeDesc};
pub use state::SimulationState;
