use glam::Vec3;

/// Corners of an axis-aligned box of `size` centred on `offset`
pub fn box_vertices(size: Vec3, offset: Vec3) -> Vec<Vec3> {
    let h = size * 0.5;
    let mut corners = Vec::with_capacity(8);
    for &x in &[-h.x, h.x] {
        for &y in &[-h.y, h.y] {
            for &z in &[-h.z, h.z] {
                corners.push(Vec3::new(x, y, z) + offset);
            }
        }
    }
    corners
}

/// Triangle list for [`box_vertices`], two triangles per face
pub fn box_indices() -> Vec<u32> {
    // Corner index is xi * 4 + yi * 2 + zi; each face lists p, q, r, s with
    // s opposite p
    const FACES: [[u32; 4]; 6] = [
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [0, 1, 4, 5],
        [2, 3, 6, 7],
        [0, 2, 4, 6],
        [1, 3, 5, 7],
    ];
    FACES
        .iter()
        .flat_map(|&[p, q, r, s]| [p, q, s, p, s, r])
        .collect()
}

/// Area of triangle `abc`
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).cross(c - a).length() * 0.5
}

/// Point on a circle of `radius` in the XY plane
pub fn polar_xy(angle: f32, radius: f32) -> (f32, f32) {
    let (sin, cos) = angle.sin_cos();
    (cos * radius, sin * radius)
}
