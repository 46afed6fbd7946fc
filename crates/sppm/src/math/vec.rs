pub use glam::Vec3;

pub trait ReflectVecExt {
    /// Mirror `self` about `normal`. Both the argument and the result point
    /// away from the surface.
    fn reflect_about(self, normal: Vec3) -> Vec3;
}

impl ReflectVecExt for Vec3 {
    fn reflect_about(self, normal: Vec3) -> Vec3 {
        (2.0 * normal.dot(self) * normal - self).normalize()
    }
}

pub trait OrthonormalBasisExt {
    /// Complete `self` (assumed unit length) into an orthonormal basis
    /// `(u, v, self)`.
    fn orthonormal_basis(self) -> (Vec3, Vec3);
}

impl OrthonormalBasisExt for Vec3 {
    fn orthonormal_basis(self) -> (Vec3, Vec3) {
        // Cross with an axis that cannot be parallel to self.
        let helper = if self.z.abs() < 0.999 { Vec3::Z } else { Vec3::Y };
        let u = self.cross(helper).normalize();
        let v = self.cross(u);
        (u, v)
    }
}
