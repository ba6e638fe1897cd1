// Engine module - scene ECS, meshes and the render-side glue

pub mod camera;
pub mod components;
pub mod draw;
pub mod mesh;
pub mod model;
pub mod overlay;
pub mod scene;
pub mod systems;

// Re-export commonly used items
pub use camera::SceneCamera;
pub use components::*;
pub use draw::{DrawList, InstanceData, collect};
pub use mesh::{GpuVertex, PointVertex};
pub use model::MeshKind;
pub use overlay::UiOverlay;
pub use scene::{mount_scene, spawn_scene};
pub use systems::{SceneClock, animation_schedule};
