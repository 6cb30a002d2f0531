//! State of the prediction page.
//!
//! Everything the interactive component renders lives in [`SessionState`] and
//! only changes through [`SessionAction`]s, which makes every transition of
//! the traffic lookup and the prediction submit testable without a browser.

use common::{TrafficFeatures, TrafficSample};
use serde_json::Value;
use std::rc::Rc;
use yew::functional::Reducible;

pub const TRAFFIC_FETCH_FAILED: &str = "Failed to fetch real-time traffic data.";
pub const PREDICTION_FETCH_FAILED: &str = "Failed to fetch prediction. Please try again.";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the server.";

/// One of the three inputs of the prediction form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TrafficSpeed,
    Density,
    Temperature,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::TrafficSpeed, Field::Density, Field::Temperature];

    pub fn label(self) -> &'static str {
        match self {
            Field::TrafficSpeed => "Traffic Speed (km/h): ",
            Field::Density => "Density: ",
            Field::Temperature => "Temperature (°C): ",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::TrafficSpeed => "traffic_speed",
            Field::Density => "density",
            Field::Temperature => "temperature",
        }
    }
}

/// Raw text of the form inputs, exactly as typed or filled in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictionForm {
    pub traffic_speed: String,
    pub density: String,
    pub temperature: String,
}

impl PredictionForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::TrafficSpeed => &self.traffic_speed,
            Field::Density => &self.density,
            Field::Temperature => &self.temperature,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::TrafficSpeed => self.traffic_speed = value,
            Field::Density => self.density = value,
            Field::Temperature => self.temperature = value,
        }
    }

    /// Overwrites all three inputs with a traffic sample.
    pub fn fill_from(&mut self, sample: &TrafficSample) {
        self.traffic_speed = sample.speed.to_string();
        self.density = sample.density.to_string();
        self.temperature = sample.temperature.to_string();
    }

    /// Parses the inputs into the prediction request body.
    pub fn to_features(&self) -> Result<TrafficFeatures, String> {
        Ok(TrafficFeatures {
            traffic_speed: parse_field(self, Field::TrafficSpeed)?,
            density: parse_field(self, Field::Density)?,
            temperature: parse_field(self, Field::Temperature)?,
        })
    }
}

fn parse_field(form: &PredictionForm, field: Field) -> Result<f64, String> {
    let raw = form.get(field).trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("{} is not a number: '{}'", field.name(), raw)),
    }
}

/// A prediction ready to be displayed.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionResult {
    pub level: f64,
    pub class: String,
    pub label: String,
}

impl PredictionResult {
    /// Reads a prediction out of a response body.
    ///
    /// Returns `None` unless `predicted_congestion_level` is a number. Class
    /// and label are shown verbatim, whether the server sent them as numbers
    /// or strings.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let level = payload.get("predicted_congestion_level")?.as_f64()?;
        Some(Self {
            level,
            class: display_value(payload.get("predicted_class")),
            label: display_value(payload.get("congestion_label")),
        })
    }

    pub fn level_display(&self) -> String {
        format!("{:.2}", self.level)
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Progress of one kind of request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    /// The user typed into an input.
    Edit(Field, String),
    /// A map click started a traffic lookup.
    LookupStarted,
    /// The latest traffic lookup finished.
    LookupFinished(Result<TrafficSample, String>),
    /// The form was submitted and a prediction request is on its way.
    SubmitStarted,
    /// The latest prediction request finished with this response body.
    SubmitFinished(Result<Value, String>),
    /// The form was submitted with a value that is not a number.
    SubmitRejected(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub form: PredictionForm,
    pub result: Option<PredictionResult>,
    pub error: Option<String>,
    pub lookup: Phase,
    pub submit: Phase,
}

impl SessionState {
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Edit(field, value) => self.form.set(field, value),
            SessionAction::LookupStarted => {
                self.error = None;
                self.lookup = Phase::Pending;
            }
            SessionAction::LookupFinished(Ok(sample)) => {
                self.form.fill_from(&sample);
                self.lookup = Phase::Succeeded;
            }
            SessionAction::LookupFinished(Err(e)) => {
                log::error!("Error fetching traffic data: {}", e);
                self.error = Some(TRAFFIC_FETCH_FAILED.to_string());
                self.lookup = Phase::Failed;
            }
            SessionAction::SubmitStarted => {
                self.error = None;
                self.result = None;
                self.submit = Phase::Pending;
            }
            SessionAction::SubmitFinished(Ok(payload)) => match PredictionResult::from_payload(&payload) {
                Some(result) => {
                    self.result = Some(result);
                    self.error = None;
                    self.submit = Phase::Succeeded;
                }
                None => {
                    log::warn!("Prediction response without a congestion level: {}", payload);
                    self.error = Some(UNEXPECTED_RESPONSE.to_string());
                    self.submit = Phase::Failed;
                }
            },
            SessionAction::SubmitFinished(Err(e)) => {
                log::error!("Error fetching prediction: {}", e);
                self.error = Some(PREDICTION_FETCH_FAILED.to_string());
                self.submit = Phase::Failed;
            }
            SessionAction::SubmitRejected(e) => {
                log::warn!("Prediction not sent: {}", e);
                self.result = None;
                self.error = Some(PREDICTION_FETCH_FAILED.to_string());
                self.submit = Phase::Failed;
            }
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}
