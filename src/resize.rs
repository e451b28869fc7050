use crate::camera::PerspectiveCamera;

/// Something frames are presented to; resized together with the viewport
pub trait OutputSurface {
    fn set_size(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);
}

/// Keep camera aspect and output size in step with the viewport.
///
/// Zero-sized viewports (a minimised window) are ignored. Returns true when
/// the new size was applied.
pub fn handle_resize(
    camera: &mut PerspectiveCamera,
    surface: &mut impl OutputSurface,
    width: u32,
    height: u32,
) -> bool {
    if width == 0 || height == 0 {
        log::debug!("Ignoring resize to {}x{}", width, height);
        return false;
    }

    camera.aspect = width as f32 / height as f32;
    camera.update_projection_matrix();
    surface.set_size(width, height);
    true
}
