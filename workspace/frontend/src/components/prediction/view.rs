use super::form::FeatureForm;
use super::map_view::TrafficMap;
use super::result_panel::{ErrorPanel, ResultPanel};
use crate::api_client::HttpCongestionApi;
use crate::controller::{lookup_at, reject_submit, submit_features, RequestKind, RequestTracker};
use crate::session::{Field, Phase, SessionAction, SessionState};
use crate::settings;
use common::GeoPoint;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(TrafficPrediction)]
pub fn traffic_prediction() -> Html {
    log::trace!("TrafficPrediction component rendering");
    let state = use_reducer(SessionState::default);
    let api = use_memo((), |_| HttpCongestionApi::from_settings());
    let tracker = use_memo((), |_| RequestTracker::new());
    let map_options = use_memo((), |_| settings::get_settings().map_options());

    log::debug!("Session state: lookup={:?}, submit={:?}", state.lookup, state.submit);

    let on_map_click = {
        let dispatcher = state.dispatcher();
        let api = api.clone();
        let tracker = tracker.clone();
        Callback::from(move |point: GeoPoint| {
            log::info!("Fetching traffic for {:.5}, {:.5}", point.lat, point.lon);
            let ticket = tracker.issue(RequestKind::Lookup);
            dispatcher.dispatch(SessionAction::LookupStarted);

            let dispatcher = dispatcher.clone();
            let api = api.clone();
            let tracker = tracker.clone();
            spawn_local(async move {
                if let Some(action) = lookup_at(&*api, &tracker, ticket, point).await {
                    dispatcher.dispatch(action);
                }
            });
        })
    };

    let on_edit = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(field, value): (Field, String)| {
            dispatcher.dispatch(SessionAction::Edit(field, value));
        })
    };

    let on_submit = {
        let dispatcher = state.dispatcher();
        let form = state.form.clone();
        let api = api.clone();
        let tracker = tracker.clone();
        Callback::from(move |_: ()| {
            let features = match form.to_features() {
                Ok(features) => features,
                Err(e) => {
                    dispatcher.dispatch(reject_submit(&tracker, e));
                    return;
                }
            };

            let ticket = tracker.issue(RequestKind::Submit);
            dispatcher.dispatch(SessionAction::SubmitStarted);

            let dispatcher = dispatcher.clone();
            let api = api.clone();
            let tracker = tracker.clone();
            spawn_local(async move {
                if let Some(action) = submit_features(&*api, &tracker, ticket, features).await {
                    dispatcher.dispatch(action);
                }
            });
        })
    };

    html! {
        <div class="max-w-3xl mx-auto p-5">
            <h2 class="text-2xl font-bold mb-2">{"Traffic Congestion Predictor"}</h2>
            <p class="text-sm text-base-content/60 mb-4">
                {"Click on the map to load real-time traffic, or enter the values yourself."}
            </p>

            <TrafficMap options={(*map_options).clone()} on_click={on_map_click} />

            if state.lookup == Phase::Pending {
                <div class="flex items-center gap-2 mb-3 text-sm">
                    <span class="loading loading-spinner loading-sm"></span>
                    {"Loading traffic data..."}
                </div>
            }

            <FeatureForm
                form={state.form.clone()}
                {on_edit}
                {on_submit}
            />

            if let Some(result) = &state.result {
                <ResultPanel result={result.clone()} />
            }

            if let Some(message) = &state.error {
                <ErrorPanel message={message.clone()} />
            }
        </div>
    }
}
