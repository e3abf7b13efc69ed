//! Rendering contract.
//!
//! The engine never rasterizes. During a draw pass it asks a [`Painter`] to
//! fill boxes and blit decoded images; a backend implements the trait.
//! [`DrawList`] records the requests in paint order.

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::types::{Rect, Rgba};

/// Sink for the draw requests of a paint pass.
pub trait Painter {
    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw `image` scaled into `rect`.
    fn blit(&mut self, rect: Rect, image: &ImageData);
}

// =============================================================================
// Image content
// =============================================================================

/// Decoded image pixels, row-major from the bottom row up.
///
/// Cloning shares the pixel buffer.
#[derive(Clone, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Rc<[Rgba]>,
}

impl ImageData {
    /// Wrap a decoded pixel buffer. Fails if the buffer length is not
    /// `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(Error::ImageSize {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// An image of one solid color.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize].into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageData({}x{})", self.width, self.height)
    }
}

// =============================================================================
// Fill geometry
// =============================================================================

/// A colored box, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub rect: Rect,
    pub color: Rgba,
}

/// Fill shapes of a pane: the allocated box first, then the active box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fills {
    pub alloc: Option<Fill>,
    pub active: Option<Fill>,
}

// =============================================================================
// Draw list
// =============================================================================

/// One recorded paint request.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { rect: Rect, color: Rgba },
    Blit { rect: Rect, image: ImageData },
}

/// A painter that records requests for a backend to replay.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Painter for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn blit(&mut self, rect: Rect, image: &ImageData) {
        self.commands.push(DrawCommand::Blit {
            rect,
            image: image.clone(),
        });
    }
}
