use std::f32::consts::{PI, TAU};

use super::{Indices, MeshData, MeshError, MeshVertex, Submesh};

/// Parameters of a procedurally generated UV sphere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereParams {
    /// Size of the bounding box along x, y and z. Radius per axis is half of it.
    pub extent: [f32; 3],

    /// `[radial, vertical]` subdivisions: slices around the y axis, stacks pole to pole.
    pub segments: [u32; 2],

    /// Point normals towards the center instead of away from it.
    pub inward_normals: bool,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            extent: [0.75, 0.75, 0.75],
            segments: [100, 100],
            inward_normals: false,
        }
    }
}

impl MeshData {
    /// Generates a UV sphere with one triangle-list submesh.
    ///
    /// Rows run from the +y pole (`v = 0`) to the -y pole; each row repeats its
    /// first vertex at `u = 1` so the texture seam has its own coordinates.
    /// Triangles are counter-clockwise seen from the side the normals face.
    /// The degenerate triangles touching the poles are not emitted.
    pub fn uv_sphere(params: &SphereParams) -> Result<MeshData, MeshError> {
        let [radial, vertical] = params.segments;
        if radial < 3 || vertical < 2 {
            return Err(MeshError::TooFewSegments { radial, vertical });
        }
        if params.extent.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(MeshError::InvalidExtent(params.extent));
        }

        let r = params.extent.map(|e| e * 0.5);
        let cols = radial as usize + 1;
        let rows = vertical as usize + 1;
        let vertex_count = cols * rows;
        if vertex_count > u32::MAX as usize {
            return Err(MeshError::TooManyVertices(vertex_count));
        }

        let flip = if params.inward_normals { -1.0 } else { 1.0 };
        let mut vertices = Vec::with_capacity(vertex_count);

        for v in 0..rows {
            let tv = v as f32 / vertical as f32;
            let (sin_t, cos_t) = (tv * PI).sin_cos();
            for u in 0..cols {
                let tu = u as f32 / radial as f32;
                let (sin_p, cos_p) = (tu * TAU).sin_cos();

                let dir = [sin_t * sin_p, cos_t, sin_t * cos_p];
                let position = [dir[0] * r[0], dir[1] * r[1], dir[2] * r[2]];
                // Ellipsoid normal: gradient of the implicit surface.
                let n = [dir[0] / r[0], dir[1] / r[1], dir[2] / r[2]];
                let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
                let normal = n.map(|c| flip * c / len);

                vertices.push(MeshVertex {
                    position,
                    normal,
                    uv: [tu, tv],
                });
            }
        }

        let mut indices: Vec<u32> = Vec::with_capacity(radial as usize * vertical as usize * 6);
        let mut push_tri = |a: u32, b: u32, c: u32| {
            if params.inward_normals {
                indices.extend_from_slice(&[a, c, b]);
            } else {
                indices.extend_from_slice(&[a, b, c]);
            }
        };

        for v in 0..vertical as usize {
            for u in 0..radial as usize {
                let a = (v * cols + u) as u32;
                let b = a + cols as u32;
                if v != 0 {
                    push_tri(a, b, a + 1);
                }
                if v != vertical as usize - 1 {
                    push_tri(a + 1, b, b + 1);
                }
            }
        }

        log::debug!(
            "uv sphere {}x{}: {} vertices, {} indices",
            radial,
            vertical,
            vertices.len(),
            indices.len()
        );

        Ok(MeshData {
            submeshes: vec![Submesh {
                indices: Indices::for_vertex_count(vertices.len(), indices),
                topology: wgpu::PrimitiveTopology::TriangleList,
            }],
            vertices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn default_sphere_has_one_triangle_submesh() {
        let mesh = MeshData::uv_sphere(&SphereParams::default()).unwrap();
        assert_eq!(mesh.submeshes.len(), 1);

        let sub = &mesh.submeshes[0];
        assert_eq!(sub.topology, wgpu::PrimitiveTopology::TriangleList);
        assert!(sub.index_count() > 0);
        assert_eq!(sub.index_count() % 3, 0);
        // 100 * 100 quads, two triangles each, minus one degenerate per pole quad.
        assert_eq!(sub.index_count(), (100 * 100 * 2 - 200) * 3);
        assert_eq!(mesh.vertex_count(), 101 * 101);
        assert_eq!(sub.indices.format(), wgpu::IndexFormat::Uint16);
    }

    #[test]
    fn vertices_stay_inside_the_extent() {
        let mesh = MeshData::uv_sphere(&SphereParams::default()).unwrap();
        for v in &mesh.vertices {
            for c in v.position {
                assert!(c.abs() <= 0.375 + 1e-6);
            }
            let r = dot(v.position, v.position).sqrt();
            assert!((r - 0.375).abs() < 1e-5);
        }
        let top = mesh.vertices.first().unwrap().position;
        assert!((top[1] - 0.375).abs() < 1e-6);
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let mesh = MeshData::uv_sphere(&SphereParams::default()).unwrap();
        for v in &mesh.vertices {
            assert!((dot(v.normal, v.normal) - 1.0).abs() < 1e-4);
            assert!(dot(v.normal, v.position) > 0.0);
        }
    }

    #[test]
    fn inward_normals_point_at_the_center() {
        let params = SphereParams {
            inward_normals: true,
            ..SphereParams::default()
        };
        let mesh = MeshData::uv_sphere(&params).unwrap();
        assert!(mesh.vertices.iter().all(|v| dot(v.normal, v.position) < 0.0));
    }

    #[test]
    fn triangles_wind_towards_the_normals() {
        let params = SphereParams {
            segments: [12, 8],
            ..SphereParams::default()
        };
        let mesh = MeshData::uv_sphere(&params).unwrap();
        let idx: Vec<u32> = mesh.submeshes[0].indices.iter().collect();
        for t in idx.chunks_exact(3) {
            let [a, b, c] = [t[0], t[1], t[2]].map(|i| mesh.vertices[i as usize].position);
            let face = cross(sub(b, a), sub(c, a));
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            assert!(dot(face, face) > 0.0, "degenerate triangle {t:?}");
            assert!(dot(face, centroid) > 0.0, "inward-facing triangle {t:?}");
        }
    }

    #[test]
    fn indices_address_existing_vertices() {
        let mesh = MeshData::uv_sphere(&SphereParams::default()).unwrap();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.submeshes[0].indices.iter().all(|i| i < n));
    }

    #[test]
    fn ellipsoid_extent_is_per_axis() {
        let params = SphereParams {
            extent: [2.0, 1.0, 0.5],
            segments: [16, 16],
            inward_normals: false,
        };
        let mesh = MeshData::uv_sphere(&params).unwrap();
        let max = |axis: usize| {
            mesh.vertices
                .iter()
                .map(|v| v.position[axis].abs())
                .fold(0.0f32, f32::max)
        };
        assert!((max(0) - 1.0).abs() < 1e-5);
        assert!((max(1) - 0.5).abs() < 1e-5);
        assert!((max(2) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let few = SphereParams {
            segments: [2, 10],
            ..SphereParams::default()
        };
        assert_eq!(
            MeshData::uv_sphere(&few).unwrap_err(),
            MeshError::TooFewSegments { radial: 2, vertical: 10 }
        );

        let flat = SphereParams {
            extent: [1.0, 0.0, 1.0],
            ..SphereParams::default()
        };
        assert!(matches!(
            MeshData::uv_sphere(&flat),
            Err(MeshError::InvalidExtent(_))
        ));
    }

    #[test]
    fn wireframe_keeps_vertices_and_switches_topology() {
        let mesh = MeshData::uv_sphere(&SphereParams {
            segments: [8, 4],
            ..SphereParams::default()
        })
        .unwrap();
        let wire = mesh.to_wireframe();
        assert_eq!(wire.vertices, mesh.vertices);
        assert_eq!(wire.submeshes.len(), 1);
        assert_eq!(wire.submeshes[0].topology, wgpu::PrimitiveTopology::LineList);
        assert_eq!(wire.submeshes[0].index_count() % 2, 0);
    }
}
