//! Uniform spatial hash grid over the iteration's hit points.
//!
//! Rebuilt from scratch after every eye pass; its lifetime matches one
//! iteration exactly. A photon interaction looks up the single cell its
//! position falls in and gets every hit point whose search radius can reach
//! it, since points are inserted into all cells their radius overlaps.

use glam::Vec3;

use crate::hitpoint::{HitPointStore, StatsTable};

pub struct HashGrid {
    cells: Vec<Vec<u32>>,
    min: Vec3,
    /// `1 / (2 * max search radius)`, the inverse cell size.
    scale: f32,
    initial_radius: f32,
}

fn hash(ix: u32, iy: u32, iz: u32, buckets: usize) -> usize {
    let h = ix.wrapping_mul(73856093) ^ iy.wrapping_mul(19349663) ^ iz.wrapping_mul(83492791);
    h as usize % buckets
}

impl HashGrid {
    /// Rebuild the grid for the current hit points.
    ///
    /// Establishes the initial search radius (average bounding box extent
    /// over average image resolution, scaled by `radius_scale`) on every
    /// pixel slot that does not have one yet; slots that were shrunk in
    /// earlier iterations keep their radius.
    ///
    /// Returns `None` when the eye pass found no diffuse point at all.
    pub fn build(
        store: &HitPointStore,
        stats: &StatsTable,
        width: u32,
        height: u32,
        radius_scale: f32,
    ) -> Option<Self> {
        if store.is_empty() {
            return None;
        }

        let bounds = store.bounds();
        let extent = bounds.diagonal();
        let average_extent = (extent.x + extent.y + extent.z) / 3.0;
        let average_resolution = (width + height) as f32 / 2.0;
        let mut initial_radius = average_extent / average_resolution * radius_scale;
        if !(initial_radius > 0.0) {
            // Degenerate case: every hit point at the same position.
            initial_radius = 1e-3;
        }

        for point in &store.points {
            stats
                .slot(point.pixel)
                .establish_radius(initial_radius * initial_radius);
        }

        let max_radius = store
            .points
            .iter()
            .map(|p| stats.slot(p.pixel).snapshot().radius_squared)
            .fold(0.0f32, f32::max)
            .sqrt();

        let min = bounds.min - Vec3::splat(max_radius);
        let scale = 1.0 / (2.0 * max_radius);

        let buckets = store.points.len();
        let mut cells = vec![Vec::new(); buckets];
        for (index, point) in store.points.iter().enumerate() {
            let radius = stats.slot(point.pixel).snapshot().radius_squared.sqrt();
            let lo = (point.position - Vec3::splat(radius) - min) * scale;
            let hi = (point.position + Vec3::splat(radius) - min) * scale;
            for iz in lo.z as u32..=hi.z as u32 {
                for iy in lo.y as u32..=hi.y as u32 {
                    for ix in lo.x as u32..=hi.x as u32 {
                        cells[hash(ix, iy, iz, buckets)].push(index as u32);
                    }
                }
            }
        }

        Some(Self {
            cells,
            min,
            scale,
            initial_radius,
        })
    }

    pub fn initial_radius(&self) -> f32 {
        self.initial_radius
    }

    /// Hit point indices whose cell contains `position`.
    pub fn lookup(&self, position: Vec3) -> &[u32] {
        let h = (position - self.min) * self.scale;
        if h.min_element() < 0.0 {
            return &[];
        }
        &self.cells[hash(h.x as u32, h.y as u32, h.z as u32, self.cells.len())]
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::{
        hitpoint::{HitPoint, HitPointStore, StatsTable},
        material::Material,
    };

    use super::*;

    fn hit_point(position: Vec3, pixel: usize) -> HitPoint {
        HitPoint {
            position,
            normal: Vec3::Y,
            wo: Vec3::Y,
            material: Material::diffuse(Vec3::splat(0.5)),
            attenuation: Vec3::ONE,
            pixel,
            weight: 1.0,
        }
    }

    fn store(points: Vec<HitPoint>) -> HitPointStore {
        let mut store = HitPointStore::default();
        store.replace(points);
        store
    }

    #[test]
    fn empty_store_builds_no_grid() {
        let stats = StatsTable::new(4);
        assert!(HashGrid::build(&store(vec![]), &stats, 2, 2, 8.0).is_none());
    }

    #[test]
    fn initial_radius_follows_the_resolution_heuristic() {
        let stats = StatsTable::new(2);
        let points = vec![
            hit_point(Vec3::ZERO, 0),
            hit_point(Vec3::new(30.0, 30.0, 30.0), 1),
        ];
        let grid = HashGrid::build(&store(points), &stats, 20, 10, 8.0).unwrap();

        // avg extent 30, avg resolution 15, scale 8.
        assert!((grid.initial_radius() - 16.0).abs() < 1e-4);
        let expected = 16.0f32 * 16.0;
        assert!((stats.slot(0).snapshot().radius_squared - expected).abs() < 1e-3);
    }

    #[test]
    fn lookup_finds_points_within_reach() {
        let stats = StatsTable::new(2);
        let a = Vec3::ZERO;
        let b = Vec3::new(100.0, 0.0, 0.0);
        let points = vec![hit_point(a, 0), hit_point(b, 1)];
        let grid = HashGrid::build(&store(points), &stats, 100, 100, 8.0).unwrap();

        let radius = stats.slot(0).snapshot().radius_squared.sqrt();

        // Anywhere inside a point's radius must report it, even across a
        // cell boundary.
        for offset in [Vec3::ZERO, Vec3::splat(0.5 * radius)] {
            let found = grid.lookup(a + offset);
            assert!(found.contains(&0), "missing point at offset {offset:?}");
        }

        let found = grid.lookup(b);
        assert!(found.contains(&1));
    }
}
