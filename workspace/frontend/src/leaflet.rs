//! Bindings to the Leaflet global `L` loaded by `index.html`.

use crate::map::{ClickHandler, MapOptions, MapWidget};
use common::GeoPoint;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    type LeafletMap;
    type TileLayer;
    type LeafletMouseEvent;
    type LatLng;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container: &HtmlElement) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: u8);

    #[wasm_bindgen(method)]
    fn on(this: &LeafletMap, event: &str, handler: &Closure<dyn FnMut(LeafletMouseEvent)>);

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &Object) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &LeafletMap);

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &LeafletMouseEvent) -> LatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LatLng) -> f64;
}

/// A Leaflet map with a tile layer and a click listener.
pub struct LeafletWidget {
    map: LeafletMap,
    // Leaflet holds a reference to this closure until `remove` is called.
    _on_click: Closure<dyn FnMut(LeafletMouseEvent)>,
}

impl LeafletWidget {
    pub fn mount(container: &HtmlElement, options: &MapOptions, on_click: ClickHandler) -> Result<Self, JsValue> {
        log::debug!(
            "Creating map at {:.5}, {:.5} zoom {}",
            options.center.lat,
            options.center.lon,
            options.zoom
        );
        let map = create_map(container)?;

        let center = Array::of2(&options.center.lat.into(), &options.center.lon.into());
        map.set_view(&center, options.zoom);

        let tile_options = Object::new();
        Reflect::set(&tile_options, &"attribution".into(), &options.attribution.as_str().into())?;
        tile_layer(&options.tile_url, &tile_options).add_to(&map);

        let handler = Closure::wrap(Box::new(move |event: LeafletMouseEvent| {
            let latlng = event.latlng();
            let point = GeoPoint::new(latlng.lat(), latlng.lng()).wrapped();
            log::trace!("Map clicked at {:.5}, {:.5}", point.lat, point.lon);
            on_click.emit(point);
        }) as Box<dyn FnMut(LeafletMouseEvent)>);
        map.on("click", &handler);

        Ok(Self {
            map,
            _on_click: handler,
        })
    }
}

impl MapWidget for LeafletWidget {
    fn remove(self) {
        log::debug!("Removing map");
        self.map.remove();
    }
}
