//! Frame renderer.
//!
//! Every sprite shares one unit quad; what differs per draw is the UV
//! buffer, the texture and the model matrix, bundled as a [`DrawRecord`].
//! Attribute setup stays inside [`Renderer::render`].

use backend::glutils::*;
use backend::{ShaderProgram, System, Texture};
use cgmath::Matrix4;

/// Two triangles covering (-0.5..0.5)², as (x, y) pairs.
pub const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, // triangle 1
    -0.5, -0.5, 0.5, 0.5, -0.5, 0.5, // triangle 2
];
pub const QUAD_VERTEX_COUNT: i32 = 6;

const FLOATS_PER_VERTEX: u32 = 2;

/// One cell of a sprite sheet laid out as a `columns` x `rows` grid.
/// Row 0 is the top of the image. The cell always lies inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSlice {
    columns: u32,
    rows: u32,
    column: u32,
    row: u32,
}

impl SpriteSlice {
    /// Panics if the cell falls outside the grid (which includes an empty grid).
    pub const fn new(columns: u32, rows: u32, column: u32, row: u32) -> Self {
        assert!(column < columns && row < rows, "sprite cell outside the sheet");
        Self {
            columns,
            rows,
            column,
            row,
        }
    }

    /// `(u0, v0, u1, v1)` of the cell.
    pub fn uv_rect(&self) -> (f32, f32, f32, f32) {
        let (columns, rows) = (self.columns as f32, self.rows as f32);
        (
            self.column as f32 / columns,
            self.row as f32 / rows,
            (self.column + 1) as f32 / columns,
            (self.row + 1) as f32 / rows,
        )
    }

    /// Tex coords lined up with [`QUAD_VERTICES`]; the quad's bottom edge
    /// samples the bottom of the cell.
    pub fn tex_coords(&self) -> [f32; 12] {
        let (u0, v0, u1, v1) = self.uv_rect();
        [
            u0, v1, u1, v1, u1, v0, // triangle 1
            u0, v1, u1, v0, u0, v0, // triangle 2
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    pub texture: Texture,
    pub uv_buffer: u32,
    pub model_matrix: Matrix4<f32>,
}

pub struct Renderer {
    vao: u32,
    position_buffer: u32,
}

impl Renderer {
    pub fn new() -> Self {
        let vao = gl_gen_vertex_array();
        unsafe { gl::BindVertexArray(vao) };
        let position_buffer = gl_gen_array_buffer_stat(&QUAD_VERTICES);
        unsafe { gl::BindVertexArray(0) };
        Self {
            vao,
            position_buffer,
        }
    }

    pub fn upload_tex_coords(&self, slice: &SpriteSlice) -> u32 {
        gl_gen_array_buffer_stat(&slice.tex_coords())
    }

    /// Clears, draws `batch` front to back in order, and presents.
    pub fn render(&self, system: &mut System, shader: &ShaderProgram, batch: &[DrawRecord]) {
        system.clear_screen();

        let position = shader.position_attribute();
        let tex_coord = shader.tex_coordinate_attribute();

        unsafe {
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.position_buffer);
        }
        gl_vertex_attrib_ptr_enab(position, FLOATS_PER_VERTEX, 0, 0);

        for record in batch {
            unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, record.uv_buffer) };
            gl_vertex_attrib_ptr_enab(tex_coord, FLOATS_PER_VERTEX, 0, 0);

            shader.set_model_matrix(&record.model_matrix);
            record.texture.bind();
            unsafe { gl::DrawArrays(gl::TRIANGLES, 0, QUAD_VERTEX_COUNT) };
        }

        gl_vertex_attrib_disable(position);
        gl_vertex_attrib_disable(tex_coord);
        unsafe { gl::BindVertexArray(0) };

        system.draw_to_screen();
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
