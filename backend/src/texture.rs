use super::glutils::check_gl_err;
use anyhow::{anyhow, bail, Result};
use gl::{types::*, *};
use std::path::Path;

/// Nearest-neighbour sampling, no mipmaps. Wrapping stays at the GL default.
pub const SPRITE_TEXTURE_PARAMS: [(GLenum, GLenum, GLenum); 2] = [
    (TEXTURE_2D, TEXTURE_MIN_FILTER, NEAREST),
    (TEXTURE_2D, TEXTURE_MAG_FILTER, NEAREST),
];

const RGBA_CHANNELS: usize = 4;

/// A 2D texture living on the GPU for the rest of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn bind(&self) {
        unsafe { gl::BindTexture(TEXTURE_2D, self.id) };
    }
}

/// Host-side RGBA8 pixels, rows top to bottom.
#[derive(Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

pub fn decode_rgba<P: AsRef<Path>>(filename: P) -> Result<DecodedImage> {
    let filename = filename.as_ref();
    unsafe {
        stb_image::stb_image::stbi_set_flip_vertically_on_load(0);
    }
    let img = match stb_image::image::load_with_depth(filename, RGBA_CHANNELS, false) {
        stb_image::image::LoadResult::ImageF32(_) => {
            bail!("loading image {}: 32-bit images not supported here", filename.display());
        }
        stb_image::image::LoadResult::ImageU8(img) => img,
        stb_image::image::LoadResult::Error(e) => {
            return Err(anyhow!("loading image {} error: {}", filename.display(), e));
        }
    };

    if img.data.len() != img.width * img.height * RGBA_CHANNELS {
        bail!(
            "loading image {}: expected {}x{} RGBA pixels, got {} bytes",
            filename.display(),
            img.width,
            img.height,
            img.data.len()
        );
    }

    Ok(DecodedImage {
        width: img.width as u32,
        height: img.height as u32,
        data: img.data,
    })
}

pub fn load_texture<P: AsRef<Path>>(filename: P) -> Result<Texture> {
    load_texture_params(filename, &SPRITE_TEXTURE_PARAMS)
}

pub fn load_texture_params<P: AsRef<Path>>(
    filename: P,
    params: &[(GLenum, GLenum, GLenum)],
) -> Result<Texture> {
    let filename = filename.as_ref();
    let img = match decode_rgba(filename) {
        Ok(img) => img,
        Err(e) => {
            log::error!("Unable to load image. Make sure the path is correct.");
            return Err(e);
        }
    };

    let mut texture = 0;
    unsafe { gl::GenTextures(1, &mut texture) };
    unsafe { gl::BindTexture(TEXTURE_2D, texture) };

    unsafe {
        gl::TexImage2D(
            TEXTURE_2D,
            0,
            RGBA as i32,
            img.width as i32,
            img.height as i32,
            0,
            RGBA,
            UNSIGNED_BYTE,
            img.data.as_ptr().cast(),
        )
    };

    for (t, n, p) in params {
        unsafe { gl::TexParameteri(*t, *n, *p as i32) };
    }
    check_gl_err()?;

    log::info!(
        "loaded texture {} ({}x{}) as id {}",
        filename.display(),
        img.width,
        img.height,
        texture
    );

    Ok(Texture {
        id: texture,
        width: img.width,
        height: img.height,
    })
}
