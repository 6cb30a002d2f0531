use crate::leaflet::LeafletWidget;
use crate::map::{ClickHandler, MapOptions, MapSlot};
use web_sys::HtmlElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TrafficMapProps {
    pub options: MapOptions,
    /// Captured when the map is created.
    pub on_click: ClickHandler,
}

/// The clickable map. It is created once per mount and removed on unmount.
#[function_component(TrafficMap)]
pub fn traffic_map(props: &TrafficMapProps) -> Html {
    let container = use_node_ref();
    let slot = use_mut_ref(MapSlot::<LeafletWidget>::new);

    {
        let container = container.clone();
        let slot = slot.clone();
        let options = props.options.clone();
        let on_click = props.on_click.clone();
        use_effect_with((), move |_| {
            match container.cast::<HtmlElement>() {
                Some(element) => {
                    let mounted = slot
                        .borrow_mut()
                        .mount_with(|| LeafletWidget::mount(&element, &options, on_click));
                    match mounted {
                        Ok(true) => log::info!("Map initialised"),
                        Ok(false) => log::debug!("Map already initialised"),
                        Err(e) => log::error!("Failed to initialise map: {:?}", e),
                    }
                }
                None => log::warn!("Map container not found"),
            }

            move || slot.borrow_mut().release()
        });
    }

    html! {
        <div ref={container} id="map" class="rounded-box mb-5" style="height: 400px;"></div>
    }
}
