mod form;
mod map_view;
mod result_panel;
mod view;

pub use view::TrafficPrediction;
