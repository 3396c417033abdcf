use super::scene::Selection;

/// Side-effect sink for the information panels shown while orbiting.
///
/// The camera director never touches overlay content; it only asks for show
/// and hide, then polls [`is_hidden`](OverlayCoordinator::is_hidden) to learn
/// when the hide animation has finished.
pub trait OverlayCoordinator {
    /// Present the panel for `selection`
    fn show_for(&mut self, selection: &Selection);

    /// Start hiding every visible panel
    fn hide_all(&mut self);

    /// True when no panel is visible or fading
    fn is_hidden(&self) -> bool;

    /// Advance any show/hide animation by `delta` seconds
    fn update(&mut self, _delta: f32) {}
}
