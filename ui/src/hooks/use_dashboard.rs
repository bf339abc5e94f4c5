use std::rc::Rc;

use api::CycleOutcome;
use api::DashboardState;
use api::HttpSource;
use api::ViewLifetime;
use api::REFRESH_PERIOD;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::compat;

/// Owns the dashboard's display state and keeps it fresh.
///
/// The first cycle starts on mount; after that a cycle is spawned every
/// [`REFRESH_PERIOD`] regardless of how long the previous one took. The
/// [`ViewLifetime`] skips a tick while a cycle is still in flight and drops
/// any result that arrives after the component unmounts.
pub fn use_dashboard() -> Signal<DashboardState> {
    let app_state = use_context::<AppState>();
    let state = use_signal(|| DashboardState::Loading);
    let lifetime = use_hook(ViewLifetime::new);

    {
        let lifetime = lifetime.clone();
        use_drop(move || lifetime.teardown());
    }

    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let source = Rc::new(HttpSource::new(&app_state.endpoints));
        let lifetime = lifetime.clone();

        async move {
            while lifetime.is_alive() {
                spawn(refresh_cycle(source.clone(), lifetime.clone(), state));
                compat::sleep(REFRESH_PERIOD).await;
            }
        }
    });

    state
}

async fn refresh_cycle(
    source: Rc<HttpSource>,
    lifetime: ViewLifetime,
    mut state: Signal<DashboardState>,
) {
    let outcome = lifetime
        .run_cycle(source.as_ref(), |view| {
            state.set(DashboardState::Loaded(view));
        })
        .await;

    match outcome {
        CycleOutcome::Applied(num_blocks) => {
            dioxus_logger::tracing::debug!("dashboard refreshed with {} blocks", num_blocks);
        }
        CycleOutcome::SkippedOverlap => {
            dioxus_logger::tracing::info!("refresh skipped: previous cycle still running");
        }
        // already logged by the cycle itself
        CycleOutcome::Failed(_)
        | CycleOutcome::Discarded
        | CycleOutcome::Superseded
        | CycleOutcome::SkippedTornDown => {}
    }
}
