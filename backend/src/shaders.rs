use super::glutils::*;
use anyhow::{anyhow, bail, Context, Result};
use cgmath::{Matrix, Matrix4};
use gl::{types::*, *};
use std::ffi::CString;
use std::fs;
use std::path::Path;

const PROJECTION_MATRIX_UNIFORM: &str = "projectionMatrix";
const VIEW_MATRIX_UNIFORM: &str = "viewMatrix";
const MODEL_MATRIX_UNIFORM: &str = "modelMatrix";
const POSITION_ATTRIBUTE: &str = "position";
const TEX_COORD_ATTRIBUTE: &str = "texCoord";

const INFO_LOG_CAPACITY: usize = 1024;

/// Deletes a GL object when dropped, unless it was released first.
struct GlObject {
    id: u32,
    delete: fn(u32),
}

impl GlObject {
    fn new(id: u32, delete: fn(u32)) -> Self {
        Self { id, delete }
    }

    fn release(self) -> u32 {
        let id = self.id;
        std::mem::forget(self);
        id
    }
}

impl Drop for GlObject {
    fn drop(&mut self) {
        (self.delete)(self.id);
    }
}

fn delete_shader(id: u32) {
    unsafe { gl::DeleteShader(id) };
}

fn delete_program(id: u32) {
    unsafe { gl::DeleteProgram(id) };
}

/// A linked vertex + fragment program with the matrix uniforms and vertex
/// attributes of the textured sprite shaders resolved up front.
#[derive(Debug, Clone, Copy)]
pub struct ShaderProgram {
    program_id: u32,
    projection_matrix_uniform: GLint,
    view_matrix_uniform: GLint,
    model_matrix_uniform: GLint,
    position_attribute: GLuint,
    tex_coordinate_attribute: GLuint,
}

impl ShaderProgram {
    pub fn load<P: AsRef<Path>>(vertex_file: P, fragment_file: P) -> Result<ShaderProgram> {
        let (vertex_file, fragment_file) = (vertex_file.as_ref(), fragment_file.as_ref());
        let vertex_code = fs::read_to_string(vertex_file)
            .with_context(|| format!("error reading {}", vertex_file.display()))?;
        let fragment_code = fs::read_to_string(fragment_file)
            .with_context(|| format!("error reading {}", fragment_file.display()))?;

        let program = Self::from_source(&vertex_code, &fragment_code).with_context(|| {
            format!(
                "building program from {} and {}",
                vertex_file.display(),
                fragment_file.display()
            )
        })?;
        log::info!(
            "shader program {} linked from {} and {}",
            program.program_id,
            vertex_file.display(),
            fragment_file.display()
        );
        Ok(program)
    }

    pub fn from_source(vertex_code: &str, fragment_code: &str) -> Result<ShaderProgram> {
        // create vertex shader
        let vertex_shader = unsafe { gl::CreateShader(VERTEX_SHADER) };
        if vertex_shader == 0 {
            bail!("gl::createShader(VERTEX_SHADER) failed");
        }
        let vertex_shader = GlObject::new(vertex_shader, delete_shader);

        Self::compile(vertex_shader.id, vertex_code).context("vertex shader compilation error")?;

        // create fragment shader
        let fragment_shader = unsafe { gl::CreateShader(FRAGMENT_SHADER) };
        if fragment_shader == 0 {
            bail!("gl::createShader(FRAGMENT_SHADER) failed");
        }
        let fragment_shader = GlObject::new(fragment_shader, delete_shader);

        Self::compile(fragment_shader.id, fragment_code)
            .context("fragment shader compilation error")?;

        // create program and link shaders
        let program_id = unsafe { gl::CreateProgram() };
        if program_id == 0 {
            bail!("gl::CreateProgram() failed");
        }
        let program = GlObject::new(program_id, delete_program);
        unsafe { gl::AttachShader(program_id, vertex_shader.id) };
        unsafe { gl::AttachShader(program_id, fragment_shader.id) };
        unsafe { gl::LinkProgram(program_id) };

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program_id, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_CAPACITY);
            let mut log_len = 0_i32;
            unsafe {
                gl::GetProgramInfoLog(
                    program_id,
                    INFO_LOG_CAPACITY as i32,
                    &mut log_len,
                    v.as_mut_ptr().cast(),
                );
                v.set_len(log_len.max(0) as usize);
            }
            bail!("program link error: {}", String::from_utf8_lossy(&v));
        }

        let shader = ShaderProgram {
            program_id,
            projection_matrix_uniform: Self::uniform_location(program_id, PROJECTION_MATRIX_UNIFORM)?,
            view_matrix_uniform: Self::uniform_location(program_id, VIEW_MATRIX_UNIFORM)?,
            model_matrix_uniform: Self::uniform_location(program_id, MODEL_MATRIX_UNIFORM)?,
            position_attribute: Self::attribute_location(program_id, POSITION_ATTRIBUTE)?,
            tex_coordinate_attribute: Self::attribute_location(program_id, TEX_COORD_ATTRIBUTE)?,
        };
        // the shaders still drop here; GL frees them along with the program
        program.release();
        Ok(shader)
    }

    fn compile(shader_id: u32, shader_code: &str) -> Result<()> {
        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &(shader_code.len() as GLint),
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_CAPACITY);
            let mut log_len = 0_i32;
            unsafe {
                gl::GetShaderInfoLog(
                    shader_id,
                    INFO_LOG_CAPACITY as i32,
                    &mut log_len,
                    v.as_mut_ptr().cast(),
                );
                v.set_len(log_len.max(0) as usize);
            }

            bail!("{}", String::from_utf8_lossy(&v));
        }
        Ok(())
    }

    fn uniform_location(program_id: u32, name: &str) -> Result<GLint> {
        let c_name = CString::new(name)?;
        let location = unsafe { gl::GetUniformLocation(program_id, c_name.as_ptr().cast()) };
        check_gl_err()?;
        if location == -1 {
            return Err(anyhow!(
                "program({}): location '{}' does not correspond to an active uniform variable in program",
                program_id,
                name
            ));
        }
        Ok(location)
    }

    fn attribute_location(program_id: u32, name: &str) -> Result<GLuint> {
        let c_name = CString::new(name)?;
        let location = unsafe { gl::GetAttribLocation(program_id, c_name.as_ptr().cast()) };
        check_gl_err()?;
        if location < 0 {
            bail!(
                "program({}): '{}' is not an active vertex attribute",
                program_id,
                name
            );
        }
        Ok(location as GLuint)
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    pub fn set_projection_matrix(&self, mat: &Matrix4<f32>) {
        self.use_program();
        Self::set_mat4fv(self.projection_matrix_uniform, mat);
    }

    pub fn set_view_matrix(&self, mat: &Matrix4<f32>) {
        self.use_program();
        Self::set_mat4fv(self.view_matrix_uniform, mat);
    }

    /// Per-draw; expects the program to be in use already.
    pub fn set_model_matrix(&self, mat: &Matrix4<f32>) {
        Self::set_mat4fv(self.model_matrix_uniform, mat);
    }

    pub fn position_attribute(&self) -> GLuint {
        self.position_attribute
    }

    pub fn tex_coordinate_attribute(&self) -> GLuint {
        self.tex_coordinate_attribute
    }

    fn set_mat4fv(location: GLint, mat: &Matrix4<f32>) {
        // cgmath is column-major, same as GL
        unsafe { gl::UniformMatrix4fv(location, 1, FALSE, mat.as_ptr()) };
    }
}
