//! Draw primitives the engine issues while rendering.

use crate::geom::Rect;

/// Whatever the host draws with. `Image` is the host's decoded image handle.
pub trait Surface {
    type Image;

    /// Outline (no fill) of the play area.
    fn stroke_rect(&mut self, rect: Rect);

    /// Blit `image` scaled to exactly `dest`.
    fn draw_image(&mut self, image: &Self::Image, dest: Rect);
}
