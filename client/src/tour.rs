use shared::{ViewportSequencer, ViewportState};
use tokio::sync::watch;

use crate::scope::ViewScope;

/// Runs the scripted Initial -> Focused camera move inside `scope`.
///
/// The receiver starts on the initial viewport and sees the focused one once
/// the sequencer's delay has elapsed, unless the scope is dropped first.
pub fn start_tour(
    scope: &mut ViewScope,
    mut sequencer: ViewportSequencer,
) -> watch::Receiver<ViewportState> {
    let (tx, rx) = watch::channel(*sequencer.state());
    let delay = sequencer.delay();

    // The tour is observed through the watch channel only.
    let _ = scope.spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(viewport) = sequencer.fire() {
            tracing::info!(
                lon = viewport.longitude,
                lat = viewport.latitude,
                zoom = viewport.zoom,
                "focusing managed area"
            );
            let _ = tx.send(*sequencer.state());
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shared::Viewport;
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tour_focuses_after_delay() {
        let mut scope = ViewScope::new("map");
        let started = Instant::now();
        let mut rx = start_tour(&mut scope, ViewportSequencer::default());
        assert_eq!(*rx.borrow(), ViewportState::Initial(Viewport::world()));

        rx.changed().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2_000));
        let state = *rx.borrow();
        assert_eq!(state, ViewportState::Focused(Viewport::managed_area()));
        assert!(state.viewport().transition.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_torn_down_tour_never_focuses() {
        let mut scope = ViewScope::new("map");
        let mut rx = start_tour(&mut scope, ViewportSequencer::default());
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(scope);

        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), ViewportState::Initial(Viewport::world()));
    }
}
