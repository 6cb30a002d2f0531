//! Ownership of the interactive map.
//!
//! A [`MapSlot`] belongs to the component that renders the map container.
//! It holds at most one widget, so mounting twice never stacks maps and
//! dropping the slot always tears the widget down.

use common::GeoPoint;
use yew::Callback;

/// Initial view and tiles of a new map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    pub center: GeoPoint,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

/// A map attached to a DOM element.
pub trait MapWidget {
    /// Detaches the map from the page and frees its handlers.
    fn remove(self);
}

#[derive(Debug)]
pub struct MapSlot<W: MapWidget> {
    widget: Option<W>,
}

impl<W: MapWidget> Default for MapSlot<W> {
    fn default() -> Self {
        Self { widget: None }
    }
}

impl<W: MapWidget> MapSlot<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.widget.is_some()
    }

    /// Builds a widget if the slot is empty.
    ///
    /// Returns `Ok(true)` when a new widget was created and `Ok(false)` when
    /// one already existed. A failing `build` leaves the slot empty.
    pub fn mount_with<E, F>(&mut self, build: F) -> Result<bool, E>
    where
        F: FnOnce() -> Result<W, E>,
    {
        if self.widget.is_some() {
            return Ok(false);
        }
        self.widget = Some(build()?);
        Ok(true)
    }

    /// Removes the current widget, if any.
    pub fn release(&mut self) {
        if let Some(widget) = self.widget.take() {
            widget.remove();
        }
    }
}

impl<W: MapWidget> Drop for MapSlot<W> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Callback invoked with the wrapped coordinates of every map click.
pub type ClickHandler = Callback<GeoPoint>;
