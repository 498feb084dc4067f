use glam::{Mat4, Vec3, Vec4};

use crate::options::CameraOptions;

/// Initial heading: looking down `-Z`.
pub const DEFAULT_YAW: f32 = -90.0;
/// Initial pitch: level with the horizon.
pub const DEFAULT_PITCH: f32 = 0.0;
/// Movement speed in world units per second.
pub const DEFAULT_SPEED: f32 = 5.0;
/// Vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 45.0;
/// Degrees of rotation per pixel of mouse travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.5;
/// Pitch is held inside `[-PITCH_LIMIT, PITCH_LIMIT]` when clamping is on.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view reachable by zooming.
pub const MIN_FOV: f32 = 1.0;
/// Widest field of view reachable by zooming.
pub const MAX_FOV: f32 = 45.0;

/// Vectors shorter than this are treated as degenerate when normalizing.
const DEGENERATE_LENGTH: f32 = 1e-6;

/// Discrete movement directions driven by held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along the ground-projected front vector.
    Forward,
    /// Against the ground-projected front vector.
    Backward,
    /// Against the right vector.
    Left,
    /// Along the right vector.
    Right,
    /// Along world up.
    Up,
    /// Against world up.
    Down,
}

impl CameraMovement {
    /// Every direction, in a fixed order.
    pub const ALL: [Self; 6] = [
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
    ];
}

/// First-person fly camera driven by yaw/pitch angles in degrees.
///
/// The orientation basis (`front`, `right`, `up`) and the horizontal
/// `ground_front` are private and only ever recomputed from `yaw`, `pitch`
/// and `world_up`, so they stay orthonormal. Movement along
/// [`CameraMovement::Forward`] uses `ground_front`, which keeps altitude
/// constant no matter how far up or down the camera is looking.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    ground_front: Vec3,
    right: Vec3,
    up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Degrees of yaw/pitch per unit of look offset.
    pub mouse_sensitivity: f32,
    /// Lower bound for [`zoom`](Self::zoom).
    pub min_fov: f32,
    /// Upper bound for [`zoom`](Self::zoom).
    pub max_fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y)
    }
}

impl Camera {
    /// Camera at `position` with the default heading (yaw -90, pitch 0).
    #[must_use]
    pub fn new(position: Vec3, world_up: Vec3) -> Self {
        Self::with_orientation(position, world_up, DEFAULT_PITCH, DEFAULT_YAW)
    }

    /// Camera with an explicit starting orientation (degrees).
    ///
    /// `world_up` is normalized; a zero vector falls back to `+Y`.
    #[must_use]
    pub fn with_orientation(
        position: Vec3,
        world_up: Vec3,
        pitch: f32,
        yaw: f32,
    ) -> Self {
        let world_up = normalize_or(world_up, Vec3::Y);
        // Seed basis for degenerate headings; for +Y this is (+X, -Z).
        let (seed_right, seed_ground) = world_up.any_orthonormal_pair();
        let mut camera = Self {
            position,
            world_up,
            yaw,
            pitch,
            front: seed_ground,
            ground_front: seed_ground,
            right: seed_right,
            up: world_up,
            fov: DEFAULT_FOV,
            move_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            min_fov: MIN_FOV,
            max_fov: MAX_FOV,
        };
        camera.update_vectors();
        camera
    }

    /// Build a camera from the `[camera]` options section.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let mut camera = Self::with_orientation(
            Vec3::from_array(options.position),
            Vec3::from_array(options.world_up),
            options.pitch,
            options.yaw,
        );
        camera.fov = options.fov;
        camera.move_speed = options.move_speed;
        camera.mouse_sensitivity = options.mouse_sensitivity;
        camera.min_fov = options.min_fov;
        camera.max_fov = options.max_fov;
        camera
    }

    /// Move along one direction for `elapsed_seconds` of frame time.
    ///
    /// Negative elapsed time is treated as zero.
    pub fn apply_movement(
        &mut self,
        direction: CameraMovement,
        elapsed_seconds: f32,
    ) {
        let velocity = self.move_speed * elapsed_seconds.max(0.0);
        let axis = match direction {
            CameraMovement::Forward => self.ground_front,
            CameraMovement::Backward => -self.ground_front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.world_up,
            CameraMovement::Down => -self.world_up,
        };
        self.position += axis * velocity;
    }

    /// Turn by a mouse offset. Positive `x_offset` turns right, positive
    /// `y_offset` looks up.
    pub fn apply_look(&mut self, x_offset: f32, y_offset: f32, clamp_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if clamp_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Narrow (positive `delta`) or widen the field of view.
    pub fn zoom(&mut self, delta: f32) {
        self.fov = (self.fov - delta).clamp(self.min_fov, self.max_fov);
    }

    /// World-to-camera transform.
    ///
    /// Built as `R * T`: `T` translates by `-position`, and `R` has the
    /// camera basis as its rows (`right`, `up`, `-front`). The basis is
    /// orthonormal, so `R` is the inverse of the camera's world rotation.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        let (r, u, f) = (self.right, self.up, self.front);
        let rotation = Mat4::from_cols(
            Vec4::new(r.x, u.x, -f.x, 0.0),
            Vec4::new(r.y, u.y, -f.y, 0.0),
            Vec4::new(r.z, u.z, -f.z, 0.0),
            Vec4::W,
        );
        rotation * Mat4::from_translation(-self.position)
    }

    /// Right-handed perspective projection with `[0, 1]` depth (wgpu
    /// convention).
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, znear, zfar)
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the camera without touching its orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Global up reference (unit length).
    #[must_use]
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Heading in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Full 3D look direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Look direction with the world-up component removed.
    #[must_use]
    pub fn ground_front(&self) -> Vec3 {
        self.ground_front
    }

    /// Camera-local right axis.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Camera-local up axis.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        let front =
            Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos);
        self.front = normalize_or(front, self.front);

        // Straight up or down has no horizontal heading; keep the last one,
        // flattened onto the ground plane.
        let horizontal = self.flatten(self.front);
        let previous = normalize_or(
            self.flatten(self.ground_front),
            self.world_up.any_orthonormal_vector(),
        );
        self.ground_front = normalize_or(horizontal, previous);

        let right = self.front.cross(self.world_up);
        self.right = if right.length() > DEGENERATE_LENGTH {
            right.normalize()
        } else {
            let previous = self.right - self.front * self.right.dot(self.front);
            normalize_or(previous, self.front.any_orthonormal_vector())
        };

        self.up = self.right.cross(self.front).normalize();
    }

    /// `v` with its `world_up` component removed.
    fn flatten(&self, v: Vec3) -> Vec3 {
        v - self.world_up * v.dot(self.world_up)
    }
}

/// Normalize `v`, or return `fallback` when `v` is too short to normalize
/// reliably.
fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let length = v.length();
    if length > DEGENERATE_LENGTH && length.is_finite() {
        v / length
    } else {
        fallback
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding camera matrices and the eye position.
pub struct CameraUniform {
    /// Combined projection * view matrix.
    pub view_proj: [[f32; 4]; 4],
    /// World-to-camera matrix.
    pub view: [[f32; 4]; 4],
    /// Camera-to-clip matrix.
    pub projection: [[f32; 4]; 4],
    /// Camera world-space position (for specular lighting).
    pub position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Uniform with identity matrices.
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            fov: DEFAULT_FOV,
        }
    }

    /// Refresh every field from the camera and its projection.
    pub fn update(&mut self, camera: &Camera, projection: Mat4) {
        let view = camera.view_matrix();
        self.view_proj = (projection * view).to_cols_array_2d();
        self.view = view.to_cols_array_2d();
        self.projection = projection.to_cols_array_2d();
        self.position = camera.position().to_array();
        self.fov = camera.fov;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        assert!(approx(f.length(), 1.0), "front not unit: {f}");
        assert!(approx(r.length(), 1.0), "right not unit: {r}");
        assert!(approx(u.length(), 1.0), "up not unit: {u}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    fn start_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y)
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = start_camera();
        assert!(approx_vec(camera.front(), Vec3::NEG_Z));
        assert!(approx_vec(camera.right(), Vec3::X));
        assert!(approx_vec(camera.up(), Vec3::Y));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn basis_is_orthonormal_across_angles() {
        let mut yaw = -360.0;
        while yaw <= 360.0 {
            let mut pitch = -89.0;
            while pitch <= 89.0 {
                let camera =
                    Camera::with_orientation(Vec3::ZERO, Vec3::Y, pitch, yaw);
                assert_orthonormal(&camera);
                assert!(camera.ground_front().y.abs() < EPS);
                assert!(approx(camera.ground_front().length(), 1.0));
                pitch += 8.9;
            }
            yaw += 15.0;
        }
    }

    #[test]
    fn pitch_clamps_exactly_at_limit() {
        let mut camera = start_camera();
        camera.apply_look(0.0, 1000.0, true);
        assert_eq!(camera.pitch(), 89.0);
        camera.apply_look(0.0, -5000.0, true);
        assert_eq!(camera.pitch(), -89.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn unclamped_vertical_look_stays_finite() {
        let mut camera = start_camera();
        camera.apply_look(0.0, 180.0, false);
        assert_eq!(camera.pitch(), 90.0);
        assert!(camera.front().is_finite());
        assert!(camera.right().is_finite());
        assert!(camera.up().is_finite());
        assert!(camera.ground_front().is_finite());
        assert!(camera.view_matrix().is_finite());
        assert_orthonormal(&camera);
    }

    #[test]
    fn look_scales_by_sensitivity() {
        let mut camera = start_camera();
        camera.apply_look(100.0, 0.0, true);
        assert_eq!(camera.yaw(), -40.0);
        assert_eq!(camera.pitch(), 0.0);
        let expected = Vec3::new(
            (-40.0f32).to_radians().cos(),
            0.0,
            (-40.0f32).to_radians().sin(),
        );
        assert!(approx_vec(camera.front(), expected));
    }

    #[test]
    fn zero_time_movement_is_noop() {
        let mut camera = start_camera();
        let before = camera.position();
        for direction in CameraMovement::ALL {
            camera.apply_movement(direction, 0.0);
        }
        assert_eq!(camera.position(), before);
    }

    #[test]
    fn negative_time_is_ignored() {
        let mut camera = start_camera();
        let before = camera.position();
        camera.apply_movement(CameraMovement::Forward, -1.0);
        assert_eq!(camera.position(), before);
    }

    #[test]
    fn forward_then_backward_returns_home() {
        let mut camera = start_camera();
        camera.apply_look(37.0, 21.0, true);
        let before = camera.position();
        camera.apply_movement(CameraMovement::Forward, 0.75);
        camera.apply_movement(CameraMovement::Backward, 0.75);
        assert!(approx_vec(camera.position(), before));
    }

    #[test]
    fn forward_movement_keeps_altitude() {
        let mut camera = start_camera();
        camera.apply_look(0.0, 60.0, true);
        camera.apply_movement(CameraMovement::Forward, 1.0);
        assert!(approx(camera.position().y, 0.0));
        let travelled = camera.position() - Vec3::new(0.0, 0.0, 3.0);
        assert!(approx(travelled.length(), DEFAULT_SPEED));
    }

    #[test]
    fn left_moves_against_right_vector() {
        let mut camera = start_camera();
        let right = camera.right();
        camera.apply_movement(CameraMovement::Left, 1.0);
        let moved = camera.position() - Vec3::new(0.0, 0.0, 3.0);
        assert!(approx_vec(moved, -right * 5.0));
        assert!(approx_vec(moved, Vec3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn up_and_down_follow_world_up() {
        let mut camera = start_camera();
        camera.apply_look(0.0, -45.0, true);
        camera.apply_movement(CameraMovement::Up, 2.0);
        assert!(approx_vec(camera.position(), Vec3::new(0.0, 10.0, 3.0)));
        camera.apply_movement(CameraMovement::Down, 2.0);
        assert!(approx_vec(camera.position(), Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn view_maps_eye_to_origin() {
        let camera = start_camera();
        let eye = camera.view_matrix().transform_point3(Vec3::new(0.0, 0.0, 3.0));
        assert!(approx_vec(eye, Vec3::ZERO));

        // A point straight ahead lands on the negative camera-space z axis.
        let ahead = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(approx_vec(ahead, Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn view_matches_glam_look_at() {
        let mut camera = Camera::new(Vec3::new(1.0, -2.0, 4.0), Vec3::Y);
        camera.apply_look(-73.0, 31.0, true);
        let expected = Mat4::look_at_rh(
            camera.position(),
            camera.position() + camera.front(),
            camera.up(),
        );
        assert!(camera.view_matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn view_rotation_is_orthonormal() {
        let mut camera = start_camera();
        for step in 0..24 {
            camera.apply_look(23.0, if step % 2 == 0 { 17.0 } else { -29.0 }, true);
            let rotation = glam::Mat3::from_mat4(camera.view_matrix());
            let product = rotation * rotation.transpose();
            assert!(product.abs_diff_eq(glam::Mat3::IDENTITY, 1e-5));
            assert!(approx(rotation.determinant(), 1.0));
        }
    }

    #[test]
    fn zero_world_up_falls_back_to_y() {
        let camera = Camera::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(camera.world_up(), Vec3::Y);
        assert_orthonormal(&camera);
    }

    #[test]
    fn z_up_forward_stays_on_ground_plane() {
        // Default yaw looks straight down -Z, which is "down" for a +Z world.
        let mut camera = Camera::new(Vec3::ZERO, Vec3::Z);
        assert!(camera.ground_front().dot(Vec3::Z).abs() < EPS);
        assert!(approx(camera.ground_front().length(), 1.0));
        assert_orthonormal(&camera);

        camera.apply_movement(CameraMovement::Forward, 1.0);
        assert!(approx(camera.position().z, 0.0));
        assert!(approx(camera.position().length(), DEFAULT_SPEED));
    }

    #[test]
    fn tilted_world_up_keeps_altitude() {
        let world_up = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mut camera =
            Camera::with_orientation(Vec3::ZERO, world_up, 30.0, 10.0);
        assert_orthonormal(&camera);
        for (yaw, pitch) in [(40.0, -20.0), (-75.0, 35.0), (190.0, 0.0)] {
            camera.apply_look(yaw, pitch, true);
            let start = camera.position();
            camera.apply_movement(CameraMovement::Forward, 0.5);
            camera.apply_movement(CameraMovement::Right, 0.25);
            let moved = camera.position() - start;
            assert!(moved.dot(world_up).abs() < 1e-4);
            assert!(camera.ground_front().dot(world_up).abs() < EPS);
        }
    }

    #[test]
    fn world_up_is_normalized() {
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0));
        assert!(approx_vec(camera.world_up(), Vec3::Y));
    }

    #[test]
    fn zoom_clamps_field_of_view() {
        let mut camera = start_camera();
        camera.zoom(10.0);
        assert_eq!(camera.fov, 35.0);
        camera.zoom(100.0);
        assert_eq!(camera.fov, MIN_FOV);
        camera.zoom(-100.0);
        assert_eq!(camera.fov, MAX_FOV);
    }

    #[test]
    fn uniform_tracks_camera() {
        let camera = start_camera();
        let projection = camera.projection_matrix(800.0 / 600.0, 0.1, 100.0);
        let mut uniform = CameraUniform::new();
        uniform.update(&camera, projection);
        assert_eq!(uniform.position, [0.0, 0.0, 3.0]);
        let view_proj = Mat4::from_cols_array_2d(&uniform.view_proj);
        assert!(view_proj.abs_diff_eq(projection * camera.view_matrix(), 1e-6));
    }
}
