use nalgebra::{Point3, Vector2, Vector3};

use crate::terrain::mesh::{Color, Mesh};

pub const VERTICES_PER_CUBE: usize = 24;
/// Five rendered faces, two triangles each.
pub const INDICES_PER_CUBE: usize = 30;

/// Top-face vertex color.
pub const TOP_COLOR: Color = [0.0, 1.0, 0.0, 1.0];
/// Color of every other face.
pub const SIDE_COLOR: Color = [1.0, 0.92, 0.016, 1.0];

/// Faces in vertex-buffer order. Each face owns four consecutive vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    Bottom,
    Left,
    Front,
    Back,
    Right,
    Top,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Bottom,
        CubeFace::Left,
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Right,
        CubeFace::Top,
    ];

    pub fn normal(self) -> Vector3<f32> {
        match self {
            CubeFace::Bottom => -Vector3::y(),
            CubeFace::Left => -Vector3::x(),
            CubeFace::Front => Vector3::z(),
            CubeFace::Back => -Vector3::z(),
            CubeFace::Right => Vector3::x(),
            CubeFace::Top => Vector3::y(),
        }
    }

    /// The bottom face is never seen: columns rest on other columns.
    pub fn is_rendered(self) -> bool {
        self != CubeFace::Bottom
    }

    /// Indices into the cube's eight corners, in face winding order.
    fn corners(self) -> [usize; 4] {
        match self {
            CubeFace::Bottom => [0, 1, 2, 3],
            CubeFace::Left => [7, 4, 0, 3],
            CubeFace::Front => [4, 5, 1, 0],
            CubeFace::Back => [6, 7, 3, 2],
            CubeFace::Right => [5, 6, 2, 1],
            CubeFace::Top => [7, 6, 5, 4],
        }
    }

    fn base(self) -> u32 {
        self as u32 * 4
    }
}

const FACE_UVS: [[f32; 2]; 4] = [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]];
const FACE_TRIANGLES: [u32; 6] = [3, 1, 0, 3, 2, 1];

/// Unit cube centered on `(x, y, z)`.
///
/// 24 vertices, four per face in `CubeFace::ALL` order, but triangles only
/// for the five rendered faces. Bounds are filled in and the mesh has been
/// through `Mesh::optimize`.
pub fn cube_mesh(x: f32, y: f32, z: f32) -> Mesh {
    let h = 0.5;
    let corners = [
        Point3::new(x - h, y - h, z + h),
        Point3::new(x + h, y - h, z + h),
        Point3::new(x + h, y - h, z - h),
        Point3::new(x - h, y - h, z - h),
        Point3::new(x - h, y + h, z + h),
        Point3::new(x + h, y + h, z + h),
        Point3::new(x + h, y + h, z - h),
        Point3::new(x - h, y + h, z - h),
    ];

    let mut mesh = Mesh::with_capacity(VERTICES_PER_CUBE, INDICES_PER_CUBE);

    for face in CubeFace::ALL {
        let normal = face.normal();
        for (corner, uv) in face.corners().iter().zip(FACE_UVS) {
            mesh.vertices.push(corners[*corner]);
            mesh.normals.push(normal);
            mesh.uvs.push(Vector2::new(uv[0], uv[1]));
        }
        if face.is_rendered() {
            mesh.indices
                .extend(FACE_TRIANGLES.iter().map(|i| face.base() + i));
        }
    }

    let top_start = mesh.vertices.len() - 4;
    mesh.colors.extend((0..mesh.vertices.len()).map(|i| {
        if i >= top_start {
            TOP_COLOR
        } else {
            SIDE_COLOR
        }
    }));

    mesh.recalculate_bounds();
    mesh.optimize();
    mesh
}
