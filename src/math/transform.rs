use glam::{Mat3, Mat4, Quat, Vec3};

/// Position, orientation and uniform scale of a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: 1.0,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Turn the node so its local +Z axis points at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.rotation = look_at_rotation(self.position, target, Vec3::Y);
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rotation whose +Z axis points from `eye` to `target`, keeping `up` as close to +Y as possible.
///
/// Coincident points keep +Z; an `up` parallel to the view direction is
/// nudged off-axis so the basis stays well defined.
pub fn look_at_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let mut z = target - eye;
    if z.length_squared() == 0.0 {
        z = Vec3::Z;
    }
    z = z.normalize();

    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        if up.z.abs() == 1.0 {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Matrix that carries normals through `m` (inverse transpose of its linear part)
pub fn normal_matrix(m: Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(m).inverse().transpose())
}
