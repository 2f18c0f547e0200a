use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Transform 组件
///
/// 封装了对象的位置、旋转、缩放（TRS）。
/// Actor 上存储的是根变换，Component 上存储的是相对父对象的局部变换。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub fn from_trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    // ========================================================================
    // Matrix conversion
    // ========================================================================

    #[must_use]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// 矩阵分解
    ///
    /// 警告：如果矩阵包含切变，分解过程会丢失切变信息
    #[must_use]
    pub fn from_affine(mat: Affine3A) -> Self {
        let (scale, rotation, position) = mat.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    // ========================================================================
    // Euler helpers
    // ========================================================================

    /// Helper：设置欧拉角旋转 (XYZ, 弧度)
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// 获取当前的欧拉角 (XYZ 顺序, 角度)
    #[must_use]
    pub fn rotation_euler_degrees(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    // ========================================================================
    // Blending
    // ========================================================================

    /// Blends toward `target`: translation and scale linearly, rotation by
    /// shortest-path slerp.
    ///
    /// `alpha <= 0` returns `self` and `alpha >= 1` returns `target` unchanged,
    /// so the endpoints are exact.
    #[must_use]
    pub fn blend(&self, target: &Self, alpha: f32) -> Self {
        if alpha >= 1.0 {
            return *target;
        }
        if alpha <= 0.0 {
            return *self;
        }
        Self {
            position: self.position.lerp(target.position, alpha),
            rotation: self.rotation.slerp(target.rotation, alpha).normalize(),
            scale: self.scale.lerp(target.scale, alpha),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
