use yew::prelude::*;

mod components;
mod leaflet;
pub mod api_client;
pub mod controller;
pub mod map;
pub mod session;
pub mod settings;

use components::prediction::TrafficPrediction;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen bg-base-100">
            <h1 class="text-3xl font-bold text-center pt-6">
                {"Welcome to the Traffic Congestion Prediction App"}
            </h1>
            <TrafficPrediction />
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Traffic Congestion Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Backend base URL: {}", settings.api_base_url());

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
