// Fixed backdrop camera.
//
// The scene is pure decoration behind the panels, so the camera never moves:
// it sits on +Z looking down -Z with a wide field of view.

use glam::{Mat4, Vec3};

pub struct SceneCamera {
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    /// Far enough to include the star shell.
    pub far: f32,
}

impl SceneCamera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix ready to upload to the GPU.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_objects_land_inside_the_frustum() {
        let camera = SceneCamera::new();
        let vp = camera.view_projection(16.0 / 9.0);
        // Nearest ship and farthest planet from the default layout.
        for point in [Vec3::new(-5.0, 3.0, -10.0), Vec3::new(25.0, -15.0, -70.0)] {
            let clip = vp * point.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(clip.w > 0.0);
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{point:?} → {ndc:?}");
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }

    #[test]
    fn stars_fit_before_the_far_plane() {
        let camera = SceneCamera::new();
        let vp = camera.view_projection(1.0);
        let clip = vp * Vec3::new(0.0, 0.0, -360.0).extend(1.0);
        assert!(clip.z / clip.w < 1.0);
    }
}
