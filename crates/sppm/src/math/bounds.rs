use glam::Vec3;

/// Axis aligned bounding box, grown point by point.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }
}

impl Bounds {
    pub fn fit(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Extent along each axis. Zero for an empty box.
    pub fn diagonal(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_grows_the_box() {
        let mut bounds = Bounds::default();
        assert!(bounds.is_empty());

        bounds.fit(Vec3::new(1., -2., 3.));
        bounds.fit(Vec3::new(-1., 4., 0.));
        assert_eq!(bounds.min, Vec3::new(-1., -2., 0.));
        assert_eq!(bounds.max, Vec3::new(1., 4., 3.));
        assert_eq!(bounds.diagonal(), Vec3::new(2., 6., 3.));
    }
}
