use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Pitch is kept just short of straight up/down so the view basis stays defined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Perspective first-person camera.
///
/// Orientation is stored as yaw/pitch in radians. Yaw 0 looks down -Z,
/// positive yaw turns left (counter-clockwise seen from above), positive
/// pitch looks up.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Linear fog start distance, forwarded to the renderer.
    pub fog_near: f32,
    /// Linear fog end distance.
    pub fog_far: f32,
    /// Radians of turn per pixel of mouse movement.
    pub look_sensitivity: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// xyz = eye position, w unused.
    pub position: [f32; 4],
    /// fov (degrees), aspect, fog near, fog far.
    pub params: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 24;
}

impl Camera3D {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 20000.0,
            fog_near: 10000.0,
            fog_far: 20000.0,
            look_sensitivity: 0.002,
        }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Unit right vector on the horizontal plane.
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, -sy)
    }

    /// Move along the horizontal projection of the view direction.
    pub fn move_forward(&mut self, distance: f32) {
        let (sy, cy) = self.yaw.sin_cos();
        self.position += Vec3::new(-sy, 0.0, -cy) * distance;
    }

    /// Strafe along the horizontal right vector.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Apply a mouse-look delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.look_sensitivity;
        self.pitch = (self.pitch - dy * self.look_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Orient toward a world point. No-op when the target is the eye position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        let len = dir.length();
        if len < 1e-6 {
            return;
        }
        let dir = dir / len;
        self.yaw = (-dir.x).atan2(-dir.z);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Resize the viewport.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_height > 0.0 {
            self.aspect = viewport_width / viewport_height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            position: [self.position.x, self.position.y, self.position.z, 1.0],
            params: [self.fov, self.aspect, self.fog_near, self.fog_far],
        }
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_down_negative_z() {
        let cam = Camera3D::default();
        assert!((cam.forward() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        assert!((cam.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn move_forward_ignores_pitch() {
        let mut cam = Camera3D::default();
        cam.pitch = 0.8;
        cam.move_forward(2.0);
        assert!((cam.position - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn move_right_follows_yaw() {
        let mut cam = Camera3D::default();
        cam.yaw = std::f32::consts::FRAC_PI_2; // facing -X
        cam.move_right(1.0);
        // right of -X facing is -Z
        assert!((cam.position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut cam = Camera3D::new(Vec3::new(0.0, 100.0, 120.0));
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn look_at_self_is_noop() {
        let mut cam = Camera3D::new(Vec3::ONE);
        cam.yaw = 0.3;
        cam.look_at(Vec3::ONE);
        assert_eq!(cam.yaw, 0.3);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera3D::default();
        cam.look(0.0, -1.0e6);
        assert!(cam.pitch <= PITCH_LIMIT);
        cam.look(0.0, 1.0e6);
        assert!(cam.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn uniform_carries_fog_and_fov() {
        let mut cam = Camera3D::default();
        cam.fog_near = 50.0;
        cam.fog_far = 1000.0;
        let u = cam.uniform();
        assert_eq!(u.params, [75.0, 16.0 / 9.0, 50.0, 1000.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
