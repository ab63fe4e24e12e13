/// An opaque colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A 2D paintable rectangle.
///
/// Dimensions may change between frames (resizes happen outside the core),
/// so callers re-read them every frame.
pub trait DisplaySurface {
    /// Current width in surface units.
    fn width(&self) -> u32;

    /// Current height in surface units.
    fn height(&self) -> u32;

    /// Erases the whole surface.
    fn clear(&mut self);

    /// Fills an axis-aligned rectangle. Origin is the top-left corner;
    /// parts outside the surface are clipped.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);

    /// Commits the frame painted since the last `clear`.
    fn present(&mut self) {}
}
