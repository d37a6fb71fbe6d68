// src/mesh.rs

use std::collections::HashMap;

use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// Linear RGBA.
pub type Color = [f32; 4];

/// Axis-aligned bounds of a mesh's vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

/// Triangle mesh with per-vertex attributes. All attribute buffers have the
/// same length; `indices` is a triangle list into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Vector2<f32>>,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
    pub bounds: Option<Aabb>,
}

impl Mesh {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            bounds: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Recomputes `bounds` from every vertex, referenced or not.
    pub fn recalculate_bounds(&mut self) {
        let mut iter = self.vertices.iter();
        self.bounds = iter.next().map(|first| {
            iter.fold(Aabb { min: *first, max: *first }, |acc, v| Aabb {
                min: acc.min.inf(v),
                max: acc.max.sup(v),
            })
        });
    }

    /// Merges vertices that match in every attribute and remaps the index
    /// buffer onto the survivors. Vertex order is otherwise preserved, and
    /// vertices no triangle references are kept.
    pub fn optimize(&mut self) {
        let count = self.vertices.len();
        let mut seen: HashMap<[u32; 12], u32> = HashMap::with_capacity(count);
        let mut remap: Vec<u32> = Vec::with_capacity(count);
        let mut keep: Vec<usize> = Vec::with_capacity(count);

        for i in 0..count {
            let key = self.vertex_key(i);
            let next = keep.len() as u32;
            let target = *seen.entry(key).or_insert_with(|| {
                keep.push(i);
                next
            });
            remap.push(target);
        }

        if keep.len() == count {
            return;
        }

        self.vertices = keep.iter().map(|&i| self.vertices[i]).collect();
        self.normals = keep.iter().map(|&i| self.normals[i]).collect();
        self.uvs = keep.iter().map(|&i| self.uvs[i]).collect();
        self.colors = keep.iter().map(|&i| self.colors[i]).collect();
        for index in self.indices.iter_mut() {
            *index = remap[*index as usize];
        }
    }

    /// Appends `other` with its vertices and normals transformed by `transform`.
    pub fn append_transformed(&mut self, other: &Mesh, transform: &Matrix4<f32>) {
        let base = self.vertices.len() as u32;

        self.vertices
            .extend(other.vertices.iter().map(|v| transform.transform_point(v)));
        self.normals.extend(
            other
                .normals
                .iter()
                .map(|n| transform.transform_vector(n).normalize()),
        );
        self.uvs.extend_from_slice(&other.uvs);
        self.colors.extend_from_slice(&other.colors);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    // bit patterns so -0.0 and 0.0 stay distinct, like a byte compare would
    fn vertex_key(&self, i: usize) -> [u32; 12] {
        let v = &self.vertices[i];
        let n = &self.normals[i];
        let uv = &self.uvs[i];
        let c = &self.colors[i];
        [
            v.x.to_bits(),
            v.y.to_bits(),
            v.z.to_bits(),
            n.x.to_bits(),
            n.y.to_bits(),
            n.z.to_bits(),
            uv.x.to_bits(),
            uv.y.to_bits(),
            c[0].to_bits(),
            c[1].to_bits(),
            c[2].to_bits(),
            c[3].to_bits(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad(offset: f32) -> Mesh {
        let mut mesh = Mesh::with_capacity(4, 6);
        for (x, z) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            mesh.vertices.push(Point3::new(x + offset, 0.0, z));
            mesh.normals.push(Vector3::y());
            mesh.uvs.push(Vector2::new(x, z));
            mesh.colors.push([1.0, 1.0, 1.0, 1.0]);
        }
        mesh.indices.extend([0, 1, 2, 0, 2, 3]);
        mesh
    }

    #[test]
    fn test_bounds() {
        let mut mesh = quad(2.0);
        mesh.recalculate_bounds();
        let bounds = mesh.bounds.expect("quad has vertices");
        assert_eq!(bounds.min, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(3.0, 0.0, 1.0));
        assert_relative_eq!(bounds.center(), Point3::new(2.5, 0.0, 0.5));
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        let mut mesh = Mesh::default();
        mesh.recalculate_bounds();
        assert!(mesh.bounds.is_none());
    }

    #[test]
    fn test_optimize_merges_duplicates() {
        let mut mesh = quad(0.0);
        // duplicate vertex 2 and route one triangle through the copy
        mesh.vertices.push(mesh.vertices[2]);
        mesh.normals.push(mesh.normals[2]);
        mesh.uvs.push(mesh.uvs[2]);
        mesh.colors.push(mesh.colors[2]);
        mesh.indices[4] = 4;

        mesh.optimize();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_optimize_keeps_distinct_attributes() {
        let mut mesh = quad(0.0);
        mesh.vertices.push(mesh.vertices[0]);
        mesh.normals.push(-Vector3::y());
        mesh.uvs.push(mesh.uvs[0]);
        mesh.colors.push(mesh.colors[0]);

        mesh.optimize();

        assert_eq!(mesh.vertex_count(), 5);
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut combined = quad(0.0);
        combined.append_transformed(&quad(5.0), &Matrix4::identity());
        assert_eq!(combined.vertex_count(), 8);
        assert_eq!(&combined.indices[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(combined.vertices[4], Point3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_append_applies_transform() {
        let mut combined = Mesh::default();
        let shift = Matrix4::new_translation(&Vector3::new(0.0, 10.0, 0.0));
        combined.append_transformed(&quad(0.0), &shift);
        assert_eq!(combined.vertices[0], Point3::new(0.0, 10.0, 0.0));
        assert_relative_eq!(combined.normals[0], Vector3::y());
    }
}
