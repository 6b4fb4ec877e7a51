use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Delay between activating the map and flying to the managed area.
pub const FOCUS_DELAY: Duration = Duration::from_millis(2_000);

/// How the map engine should animate towards a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    FlyTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub duration_ms: u32,
    pub easing: Easing,
}

/// Camera parameters handed to the map engine. Never mutated in place: every
/// change produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl Viewport {
    pub const fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            longitude: center.lon,
            latitude: center.lat,
            zoom,
            pitch: 0.0,
            bearing: 0.0,
            transition: None,
        }
    }

    /// Whole-world view shown while the map loads.
    pub const fn world() -> Self {
        Self::new(GeoPoint::new(0.0, 20.0), 1.0)
    }

    /// Dwarka, New Delhi: the ward whose lights the dashboard manages.
    pub const fn managed_area() -> Self {
        Self {
            longitude: 77.057919,
            latitude: 28.598051,
            zoom: 15.0,
            pitch: 45.0,
            bearing: 0.0,
            transition: Some(Transition {
                duration_ms: 3_000,
                easing: Easing::FlyTo,
            }),
        }
    }

    pub fn without_transition(self) -> Self {
        Self {
            transition: None,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportState {
    /// Default view, scripted focus still pending.
    Initial(Viewport),
    /// Scripted focus applied, transition metadata attached.
    Focused(Viewport),
    /// The user moved the camera; the script no longer drives it.
    Interactive(Viewport),
}

impl ViewportState {
    pub fn viewport(&self) -> &Viewport {
        match self {
            Self::Initial(v) | Self::Focused(v) | Self::Interactive(v) => v,
        }
    }
}

/// One-shot Initial -> Focused sequencer.
///
/// The sequencer only decides what to show; the caller owns the timer and
/// calls [`ViewportSequencer::fire`] once [`ViewportSequencer::delay`] has
/// elapsed. Dropping the timer is how a torn-down view cancels the focus.
#[derive(Debug, Clone)]
pub struct ViewportSequencer {
    target: Viewport,
    delay: Duration,
    state: ViewportState,
}

impl Default for ViewportSequencer {
    fn default() -> Self {
        Self::new(Viewport::world(), Viewport::managed_area(), FOCUS_DELAY)
    }
}

impl ViewportSequencer {
    pub fn new(initial: Viewport, target: Viewport, delay: Duration) -> Self {
        Self {
            target,
            delay,
            state: ViewportState::Initial(initial),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn current(&self) -> &Viewport {
        self.state.viewport()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ViewportState::Initial(_))
    }

    /// Applies the scripted focus. Returns the new viewport the first time,
    /// `None` afterwards or once the user has taken over.
    pub fn fire(&mut self) -> Option<Viewport> {
        match self.state {
            ViewportState::Initial(_) => {
                self.state = ViewportState::Focused(self.target);
                Some(self.target)
            }
            ViewportState::Focused(_) | ViewportState::Interactive(_) => None,
        }
    }

    /// Records a pan/zoom coming from the map engine. Any pending focus is
    /// dropped and the transition metadata is not carried over.
    pub fn user_moved(&mut self, viewport: Viewport) {
        self.state = ViewportState::Interactive(viewport.without_transition());
    }
}
