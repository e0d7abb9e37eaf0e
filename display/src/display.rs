use std::error::Error;

use sdl2::pixels::PixelFormatEnum;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{FrameBuffer, Screen};

/// # Display
/// An SDL2 window showing the 64x32 monochrome frame buffer, each Chip-8 pixel
/// drawn as a `scale` x `scale` square. Lit pixels are white, unlit ones black.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Opens a centred window on the video subsystem of `sdl`
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, Box<dyn Error>> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), Box<dyn Error>> {
        self.canvas.window_mut().set_title(title)?;
        Ok(())
    }

    /// Row-major RGB24 bytes for a frame, three per pixel
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| std::iter::repeat(pixel.min(1) * 255).take(3))
            .collect()
    }
}

impl Screen for Display {
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), Box<dyn Error>> {
        let textures = self.canvas.texture_creator();
        let mut texture = textures.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.width as u32,
            self.height as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_len = self.width * 3;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // rows may be padded out to `pitch` bytes
            for (row, line) in pixels.chunks_exact(row_len).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
