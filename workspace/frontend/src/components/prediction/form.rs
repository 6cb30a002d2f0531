use crate::session::{Field, PredictionForm};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FeatureFormProps {
    pub form: PredictionForm,
    pub on_edit: Callback<(Field, String)>,
    pub on_submit: Callback<()>,
}

#[function_component(FeatureForm)]
pub fn feature_form(props: &FeatureFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            log::debug!("Prediction form submitted");
            on_submit.emit(());
        })
    };

    html! {
        <form class="flex flex-col gap-3" {onsubmit}>
            { for Field::ALL.iter().map(|&field| {
                let on_edit = props.on_edit.clone();
                let oninput = Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_edit.emit((field, input.value()));
                });
                html! {
                    <div class="form-control" key={field.name()}>
                        <label class="label" for={field.name()}>
                            <span class="label-text">{field.label()}</span>
                        </label>
                        <input
                            id={field.name()}
                            name={field.name()}
                            type="number"
                            step="any"
                            required={true}
                            class="input input-bordered w-full"
                            value={props.form.get(field).to_string()}
                            {oninput}
                        />
                    </div>
                }
            })}
            <button type="submit" class="btn btn-primary">
                {"Predict"}
            </button>
        </form>
    }
}
