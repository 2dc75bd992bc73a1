use crate::color::Rgba;
use bytemuck::{Pod, Zeroable};

/// A vertex position, tightly packed for upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Position {
    pub xyz: [f32; 3],
}

const fn pos(x: f32, y: f32, z: f32) -> Position {
    Position { xyz: [x, y, z] }
}

const RED: Rgba = Rgba::opaque(1.0, 0.0, 0.0);
const GREEN: Rgba = Rgba::opaque(0.0, 1.0, 0.0);
const BLUE: Rgba = Rgba::opaque(0.0, 0.0, 1.0);

/// The cube: 8 corner positions, one color per corner, and 12 triangles.
///
/// Positions and indices never change. Colors are replaced wholesale when
/// the user picks a new palette color.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeMesh {
    pub positions: [Position; 8],
    pub colors: [Rgba; 8],
}

impl CubeMesh {
    /// Triangle-list indices covering all 6 faces, 2 triangles per face.
    #[rustfmt::skip]
    pub const INDICES: [u16; 36] = [
        0, 1, 2,  0, 2, 3, // front
        4, 5, 6,  4, 6, 7, // back
        3, 2, 6,  3, 6, 7, // top
        0, 1, 5,  0, 5, 4, // bottom
        1, 2, 6,  1, 6, 5, // right
        0, 3, 7,  0, 7, 4, // left
    ];

    /// Unit cube with the startup palette: red/green/blue/red around the
    /// front face, mirrored on the back face.
    pub fn new() -> Self {
        #[rustfmt::skip]
        let positions = [
            pos(-1.0, -1.0,  1.0),
            pos( 1.0, -1.0,  1.0),
            pos( 1.0,  1.0,  1.0),
            pos(-1.0,  1.0,  1.0),
            pos(-1.0, -1.0, -1.0),
            pos( 1.0, -1.0, -1.0),
            pos( 1.0,  1.0, -1.0),
            pos(-1.0,  1.0, -1.0),
        ];
        let colors = [RED, GREEN, BLUE, RED, RED, GREEN, BLUE, RED];
        Self { positions, colors }
    }

    /// Overwrites every vertex color with the same opaque color.
    ///
    /// Alpha is forced to 1.0 regardless of the input's alpha; no per-face
    /// distinction survives this.
    pub fn set_uniform_color(&mut self, color: Rgba) {
        let flat = Rgba::opaque(color.r, color.g, color.b);
        self.colors = [flat; 8];
    }
}

impl Default for CubeMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_within_vertex_count() {
        let mesh = CubeMesh::new();
        for &i in CubeMesh::INDICES.iter() {
            assert!((i as usize) < mesh.positions.len());
        }
    }

    #[test]
    fn twelve_triangles_cover_the_cube() {
        assert_eq!(CubeMesh::INDICES.len(), 36);
    }

    #[test]
    fn one_color_per_vertex() {
        let mesh = CubeMesh::new();
        assert_eq!(mesh.colors.len(), mesh.positions.len());
    }

    #[test]
    fn uniform_color_flattens_the_palette() {
        let mut mesh = CubeMesh::new();
        assert_ne!(mesh.colors[0], mesh.colors[1]);

        mesh.set_uniform_color(Rgba::new(0.2, 0.4, 0.6, 0.0));
        for c in &mesh.colors {
            assert_eq!(*c, Rgba::opaque(0.2, 0.4, 0.6));
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn picked_hex_color_reaches_every_vertex() {
        let mut mesh = CubeMesh::new();
        mesh.set_uniform_color(Rgba::from_hex("#FF8000").unwrap());
        for c in &mesh.colors {
            assert!((c.r - 1.0).abs() < 1e-6);
            assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
            assert_eq!(c.b, 0.0);
            assert_eq!(c.a, 1.0);
        }
    }
}
