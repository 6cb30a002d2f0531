use crate::session::PredictionResult;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub result: PredictionResult,
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let result = &props.result;
    log::trace!("Rendering prediction {:?}", result);

    html! {
        <div class="card bg-base-200 mt-4">
            <div class="card-body">
                <h3 class="font-semibold">{"Predicted Congestion Level:"}</h3>
                <p>{result.level_display()}</p>
                <h3 class="font-semibold">{"Congestion Class:"}</h3>
                <p>{&result.class}</p>
                <h3 class="font-semibold">{"Congestion Label:"}</h3>
                <p>{&result.label}</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    pub message: String,
}

#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    log::warn!("Displaying error to user: {}", props.message);

    html! {
        <div class="alert alert-error mt-4">
            <i class="fas fa-exclamation-circle text-2xl"></i>
            <div class="flex flex-col gap-2">
                <span class="font-semibold">{"Error:"}</span>
                <span class="text-sm">{&props.message}</span>
            </div>
        </div>
    }
}
