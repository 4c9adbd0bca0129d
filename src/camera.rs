use glam::{Mat4, Vec3};

/// Free-flying camera driven by incremental yaw/pitch deltas and
/// directional movement.
///
/// `look` applies the composed yaw/pitch rotation to `location` as well
/// as to the facing vectors, so looking around also revolves the camera
/// about the world origin. That coupling is preserved behavior, not an
/// orbit camera by intent.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub location: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    pub speed: f32,
    pub sensitivity: f32,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            location: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            speed: 10.0,
            sensitivity: 1.0,
            fov: 45f32.to_radians(),
            aspect_ratio: 800.0 / 600.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl FlyCamera {
    /// Rotates the camera by yaw/pitch deltas given in degrees.
    ///
    /// Yaw rotates about the current `up` axis, pitch about the current
    /// right axis; `up` receives only the pitch rotation while
    /// `direction` and `location` receive the composed rotation. The
    /// facing vectors are re-normalized afterwards so repeated small
    /// deltas cannot drift away from unit length. Zero deltas leave the
    /// state untouched.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let yaw = (yaw_delta * self.sensitivity).to_radians();
        let pitch = (pitch_delta * self.sensitivity).to_radians();

        let right = self.direction.cross(self.up);
        if right.length_squared() <= f32::EPSILON {
            return;
        }
        let right = right.normalize();

        let yaw_rotation = Mat4::from_axis_angle(self.up.normalize(), yaw);
        let pitch_rotation = Mat4::from_axis_angle(right, pitch);
        let composed = yaw_rotation * pitch_rotation;

        self.direction = (composed * self.direction.extend(0.0))
            .truncate()
            .normalize();
        self.up = (pitch_rotation * self.up.extend(0.0)).truncate().normalize();
        self.location = (composed * self.location.extend(1.0)).truncate();
    }

    /// Moves along the facing direction, scaled by the movement speed.
    pub fn move_forward(&mut self, amount: f32) {
        self.location += self.direction * amount * self.speed;
    }

    /// Strafes along the camera's right axis, scaled by the movement
    /// speed.
    pub fn move_right(&mut self, amount: f32) {
        let right = self.direction.cross(self.up);
        if right.length_squared() <= f32::EPSILON {
            return;
        }
        self.location += right.normalize() * amount * self.speed;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio.max(0.01);
    }

    /// Look-at transform for the current position and facing.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.location, self.location + self.direction, self.up)
    }

    /// Perspective transform for the current lens parameters.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn assert_vec3_near(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn default_view_matches_look_at() {
        let camera = FlyCamera::default();
        let expected = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 9.0),
            Vec3::Y,
        );
        assert!(camera.view().abs_diff_eq(expected, TOLERANCE));
    }

    #[test]
    fn view_projection_composes_projection_and_view() {
        let camera = FlyCamera::default();
        let expected =
            Mat4::perspective_rh_gl(camera.fov, camera.aspect_ratio, camera.near, camera.far)
                * camera.view();
        assert!(camera.view_projection().abs_diff_eq(expected, TOLERANCE));
    }

    #[test]
    fn forward_movement_round_trips() {
        let mut camera = FlyCamera::default();
        let original = camera.location;
        camera.move_forward(3.0);
        assert_vec3_near(camera.location, Vec3::new(0.0, 0.0, -20.0));
        camera.move_forward(-3.0);
        assert_vec3_near(camera.location, original);
    }

    #[test]
    fn strafe_moves_along_right_axis() {
        let mut camera = FlyCamera::default();
        camera.move_right(0.5);
        assert_vec3_near(camera.location, Vec3::new(5.0, 0.0, 10.0));
    }

    #[test]
    fn zero_look_is_a_no_op() {
        let mut camera = FlyCamera::default();
        let before = camera.clone();
        camera.look(0.0, 0.0);
        assert_vec3_near(camera.location, before.location);
        assert_vec3_near(camera.direction, before.direction);
        assert_vec3_near(camera.up, before.up);
    }

    #[test]
    fn yaw_revolves_location_around_origin() {
        let mut camera = FlyCamera::default();
        camera.look(90.0, 0.0);
        assert_vec3_near(camera.direction, Vec3::new(-1.0, 0.0, 0.0));
        assert_vec3_near(camera.up, Vec3::Y);
        assert_vec3_near(camera.location, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn pitch_rotates_up_and_direction_together() {
        let mut camera = FlyCamera::default();
        camera.look(0.0, 90.0);
        assert_vec3_near(camera.direction, Vec3::Y);
        assert_vec3_near(camera.up, Vec3::Z);
        assert_vec3_near(camera.location, Vec3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn sensitivity_scales_look_deltas() {
        let mut camera = FlyCamera {
            sensitivity: 0.5,
            ..FlyCamera::default()
        };
        camera.look(180.0, 0.0);
        assert_vec3_near(camera.direction, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn degenerate_axes_leave_state_unchanged() {
        let mut camera = FlyCamera {
            up: Vec3::new(0.0, 0.0, -1.0),
            ..FlyCamera::default()
        };
        let before = camera.clone();
        camera.look(15.0, 5.0);
        camera.move_right(1.0);
        assert_eq!(camera, before);
    }
}
