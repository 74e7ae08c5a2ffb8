use anyhow::{bail, Result};
use gl::*;

pub fn check_gl_err() -> Result<()> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    bail!("OpenGL error: 0x{:04x}", err)
}

pub fn print_opengl_info() {
    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_IMAGE_UNITS, &mut mtu) };
    log::info!("MAX_TEXTURE_IMAGE_UNITS = {}", mtu);

    unsafe { gl::GetIntegerv(MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut mtu) };
    log::info!("MAX_COMBINED_TEXTURE_IMAGE_UNITS = {}", mtu);

    let mut max_size: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_SIZE, &mut max_size) };
    log::info!("MAX_TEXTURE_SIZE = {}", max_size);
}

pub fn gl_gen_vertex_array() -> u32 {
    let mut vao = 0;
    unsafe { gl::GenVertexArrays(1, &mut vao) };
    vao
}

/// Allocates an `ARRAY_BUFFER`, leaves it bound and fills it with `buffer`.
pub fn gl_gen_array_buffer_stat<T: Sized>(buffer: &[T]) -> u32 {
    let mut vbo = 0;
    unsafe {
        gl::GenBuffers(1, &mut vbo);
        gl::BindBuffer(ARRAY_BUFFER, vbo);
    }
    gl_buffer_data_arr_stat(buffer);
    vbo
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// Points attribute `index` at the currently bound `ARRAY_BUFFER` and enables it.
/// `stride` and `pointer` are counted in floats.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

pub fn gl_vertex_attrib_disable(index: u32) {
    unsafe { gl::DisableVertexAttribArray(index) };
}
