use crate::config::UiConfig;
use crate::core::timer::Countdown;
use crate::traits::{BodyId, OverlayCoordinator, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

/// Timed info panel: fades in on show, out on hide.
///
/// Only one panel is visible at a time. Hiding an already hidden overlay
/// completes immediately.
#[derive(Debug, Clone)]
pub struct FadeOverlay {
    fade_in: f32,
    fade_out: f32,
    panel: Option<BodyId>,
    state: PanelState,
    timer: Countdown,
    /// Opacity when the current fade started
    fade_from: f32,
    opacity: f32,
}

impl FadeOverlay {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            fade_in: config.overlay_fade_in,
            fade_out: config.overlay_fade_out,
            panel: None,
            state: PanelState::Hidden,
            timer: Countdown::new(0.0),
            fade_from: 0.0,
            opacity: 0.0,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Body whose panel is showing or fading
    pub fn panel(&self) -> Option<&BodyId> {
        self.panel.as_ref()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    fn advance(&mut self, delta: f32) {
        let finished = self.timer.tick(delta);
        let t = self.timer.progress();

        match self.state {
            PanelState::FadingIn => {
                self.opacity = self.fade_from + (1.0 - self.fade_from) * t;
                if finished {
                    self.opacity = 1.0;
                    self.state = PanelState::Visible;
                }
            }
            PanelState::FadingOut => {
                self.opacity = self.fade_from * (1.0 - t);
                if finished {
                    self.opacity = 0.0;
                    self.state = PanelState::Hidden;
                    if let Some(id) = self.panel.take() {
                        log::debug!("panel {} hidden", id);
                    }
                }
            }
            PanelState::Hidden | PanelState::Visible => {}
        }
    }
}

impl OverlayCoordinator for FadeOverlay {
    fn show_for(&mut self, selection: &Selection) {
        log::debug!("showing panel {}", selection.id);
        self.panel = Some(selection.id.clone());
        self.state = PanelState::FadingIn;
        self.fade_from = self.opacity;
        self.timer = Countdown::started(self.fade_in);
    }

    fn hide_all(&mut self) {
        if self.state == PanelState::Hidden {
            return;
        }
        self.state = PanelState::FadingOut;
        self.fade_from = self.opacity;
        self.timer = Countdown::started(self.fade_out);
    }

    fn is_hidden(&self) -> bool {
        self.state == PanelState::Hidden
    }

    fn update(&mut self, delta: f32) {
        self.advance(delta);
    }
}
