use glam::Vec3;

/// Elevation reported for points outside the generated surface.
pub const DEFAULT_ELEVATION: f32 = 0.0;
/// Height the downward probe starts from.
const PROBE_HEIGHT: f32 = 200.0;
const EPSILON: f32 = 1e-6;

/// Anything that can answer "how high is the ground at (x, z)".
pub trait HeightSampler {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// A square, uniformly subdivided height-field mesh centered on the origin.
///
/// Vertices sit on a `(segments + 1)²` lattice. Each quad is split into two
/// triangles along its anti-diagonal, and sampling intersects a vertical ray
/// with the two triangles of the quad under the query point, so lookup is
/// O(1) regardless of resolution.
#[derive(Debug, Clone)]
pub struct HeightField {
    size: f32,
    segments: usize,
    segment_len: f32,
    /// Row-major by z, then x.
    heights: Vec<f32>,
}

impl HeightField {
    /// Build a surface whose vertex elevations come from `elevation(x, z)`.
    pub fn from_fn(size: f32, segments: usize, elevation: impl Fn(f32, f32) -> f32) -> Self {
        let segments = segments.max(1);
        let segment_len = size / segments as f32;
        let half = size * 0.5;
        let stride = segments + 1;
        let mut heights = Vec::with_capacity(stride * stride);
        for iz in 0..stride {
            let z = iz as f32 * segment_len - half;
            for ix in 0..stride {
                let x = ix as f32 * segment_len - half;
                heights.push(elevation(x, z));
            }
        }
        Self {
            size,
            segments,
            segment_len,
            heights,
        }
    }

    /// Level ground at elevation zero.
    #[cfg(test)]
    pub fn flat(size: f32, segments: usize) -> Self {
        Self::from_fn(size, segments, |_, _| 0.0)
    }

    /// Rolling island surface from a product of sinusoids with random phase.
    ///
    /// The waves run over the horizontal plane before it is laid flat, whose
    /// second axis points along world -z.
    pub fn generate(
        size: f32,
        segments: usize,
        noise_scale: f32,
        elevation_scale: f32,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let offset_x = rng.f32() * 1000.0;
        let offset_y = rng.f32() * 1000.0;
        log::debug!("Terrain phase offsets: ({offset_x:.1}, {offset_y:.1})");
        Self::from_fn(size, segments, |x, z| {
            let plane_y = -z;
            ((x + offset_x) / noise_scale).sin()
                * ((plane_y + offset_y) / noise_scale).cos()
                * elevation_scale
        })
    }

    fn vertex(&self, ix: usize, iz: usize) -> Vec3 {
        let half = self.size * 0.5;
        Vec3::new(
            ix as f32 * self.segment_len - half,
            self.heights[iz * (self.segments + 1) + ix],
            iz as f32 * self.segment_len - half,
        )
    }

    /// Quad containing (x, z), or `None` outside the footprint.
    fn quad_at(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        let half = self.size * 0.5;
        let fx = (x + half) / self.segment_len;
        let fz = (z + half) / self.segment_len;
        let max = self.segments as f32;
        // Written so NaN falls through to `None`.
        if !(fx >= 0.0 && fx <= max && fz >= 0.0 && fz <= max) {
            return None;
        }
        let ix = (fx.floor() as usize).min(self.segments - 1);
        let iz = (fz.floor() as usize).min(self.segments - 1);
        Some((ix, iz))
    }
}

impl HeightSampler for HeightField {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let Some((ix, iz)) = self.quad_at(x, z) else {
            return DEFAULT_ELEVATION;
        };
        let a = self.vertex(ix, iz);
        let b = self.vertex(ix, iz + 1);
        let c = self.vertex(ix + 1, iz + 1);
        let d = self.vertex(ix + 1, iz);

        let origin = Vec3::new(x, PROBE_HEIGHT, z);
        let down = Vec3::NEG_Y;
        [(a, b, d), (b, c, d)]
            .into_iter()
            .filter_map(|(v0, v1, v2)| {
                let hit = ray_triangle(origin, down, v0, v1, v2)?;
                // Barycentric height, exact on level ground.
                let y = (1.0 - hit.u - hit.v) * v0.y + hit.u * v1.y + hit.v * v2.y;
                Some((hit.t, y))
            })
            .min_by(|l, r| l.0.total_cmp(&r.0))
            .map(|(_, y)| y)
            .unwrap_or(DEFAULT_ELEVATION)
    }
}

/// Ray hit with distance along the ray and barycentric weights of `v1`, `v2`.
struct Hit {
    t: f32,
    u: f32,
    v: f32,
}

/// Möller–Trumbore ray/triangle test.
/// Edges are inclusive so points on a shared edge hit at least one triangle.
fn ray_triangle(origin: Vec3, dir: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Hit> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - v0;
    let u = s.dot(p) * inv_det;
    if !(-EPSILON..=1.0 + EPSILON).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < -EPSILON || u + v > 1.0 + EPSILON {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(Hit { t, u, v })
}
