//! View state for the animated display.
//!
//! One owned object holds the cached full catalog, the displayed subset with
//! its per-body angles, and the caption. Replacing the displayed subset is a
//! single operation, so there is never more than one animation state alive:
//! the old subset's angles are consulted once and dropped with it.

use std::collections::HashMap;

use crate::api::CelestialBody;
use crate::layout::{self, PlacedBody};

pub const DEFAULT_TITLE: &str = "Solar System";
pub const DEFAULT_DESCRIPTION: &str = "Our Solar System consists of our star, the Sun, and everything bound to it by gravity - the planets Mercury, Venus, Earth, Mars, Jupiter, Saturn, Uranus, and Neptune; dwarf planets such as Pluto; dozens of moons; and millions of asteroids, comets, and meteoroids.";

/// Fixed input-validation messages shown in the message box.
pub const RANGE_INPUTS_REQUIRED_MESSAGE: &str =
    "Please enter both start and end numbers (0-8 for start, 1-9 for end).";
pub const RANGE_INVALID_MESSAGE: &str =
    "Invalid range. Start must be non-negative, and End must be greater than Start.";
pub const SEARCH_INPUT_REQUIRED_MESSAGE: &str = "Please enter a planet name to search.";

/// A body on screen: layout output plus its animation angle.
#[derive(Debug, Clone)]
pub struct DisplayBody {
    pub body: CelestialBody,
    pub scaled_orbit_px: f64,
    /// Radians, grows monotonically; persists across subset changes for
    /// bodies that stay displayed and starts at 0 otherwise.
    pub angle: f64,
}

/// Caption above the display: a title and a descriptive line.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub title: String,
    pub description: String,
}

impl Caption {
    fn default_caption() -> Self {
        Caption {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// Owned state of the animated view.
pub struct ViewState {
    catalog: Vec<CelestialBody>,
    displayed: Vec<DisplayBody>,
    caption: Caption,
    viewport: (f64, f64),
}

impl ViewState {
    /// Start out displaying the full catalog with the default caption.
    pub fn new(catalog: Vec<CelestialBody>, viewport_w: f64, viewport_h: f64) -> Self {
        let mut state = ViewState {
            catalog,
            displayed: Vec::new(),
            caption: Caption::default_caption(),
            viewport: (viewport_w, viewport_h),
        };
        state.show_all();
        state
    }

    pub fn catalog(&self) -> &[CelestialBody] {
        &self.catalog
    }

    pub fn displayed(&self) -> &[DisplayBody] {
        &self.displayed
    }

    pub fn caption(&self) -> &Caption {
        &self.caption
    }

    /// Display the whole catalog with the default caption.
    pub fn show_all(&mut self) {
        self.replace_displayed(self.catalog.clone());
        self.caption = Caption::default_caption();
    }

    /// Handle the "view range" action on raw input text.
    ///
    /// Validation mirrors the server's range rules; the slice itself runs
    /// against the cached catalog, not the network.
    pub fn show_range_input(&mut self, start_text: &str, end_text: &str) -> Result<(), String> {
        let start_text = start_text.trim();
        let end_text = end_text.trim();
        if start_text.is_empty() || end_text.is_empty() {
            return Err(RANGE_INPUTS_REQUIRED_MESSAGE.to_string());
        }

        let (start, end) = match (start_text.parse::<i64>(), end_text.parse::<i64>()) {
            (Ok(start), Ok(end)) if start >= 0 && end > start => (start as usize, end as usize),
            _ => return Err(RANGE_INVALID_MESSAGE.to_string()),
        };

        let subset: Vec<CelestialBody> = self
            .catalog
            .iter()
            .skip(start)
            .take(end - start)
            .cloned()
            .collect();
        self.replace_displayed(subset);
        self.caption = Caption {
            title: DEFAULT_TITLE.to_string(),
            description: format!("Displaying planets from index {} to {}.", start, end - 1),
        };
        Ok(())
    }

    /// Handle the search action on raw input text.
    ///
    /// Case-insensitive, unanchored substring match against the cached
    /// catalog. Zero matches fall back to the full catalog with a "no match"
    /// caption; the returned notice is shown in the message box.
    ///
    /// # Returns
    /// * `Ok(None)` - Matches found and displayed
    /// * `Ok(Some(notice))` - No match; full catalog displayed instead
    /// * `Err(message)` - Empty input
    pub fn search(&mut self, text: &str) -> Result<Option<String>, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SEARCH_INPUT_REQUIRED_MESSAGE.to_string());
        }

        let needle = text.to_lowercase();
        let matches: Vec<CelestialBody> = self
            .catalog
            .iter()
            .filter(|b| b.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if matches.is_empty() {
            self.replace_displayed(self.catalog.clone());
            self.caption = Caption {
                title: DEFAULT_TITLE.to_string(),
                description: format!(
                    "No planet found with the name \"{}\". Showing all planets.",
                    text
                ),
            };
            return Ok(Some(format!("No planet found with the name \"{}\".", text)));
        }

        // Exact case-insensitive match wins the caption; otherwise the first
        // matching record does.
        let featured = matches
            .iter()
            .find(|b| b.name.to_lowercase() == needle)
            .unwrap_or(&matches[0])
            .clone();
        self.replace_displayed(matches);
        self.caption = Caption {
            title: featured.name,
            description: featured.description,
        };
        Ok(None)
    }

    /// Track the canvas size, re-running layout when it changes.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if self.viewport == (width, height) {
            return;
        }
        self.viewport = (width, height);
        let current: Vec<CelestialBody> =
            self.displayed.iter().map(|d| d.body.clone()).collect();
        self.replace_displayed(current);
    }

    /// Advance every orbiting body by one frame.
    pub fn tick(&mut self) {
        for display in &mut self.displayed {
            if !display.body.is_central() {
                display.angle = layout::advance_angle(display.angle, display.body.orbital_speed);
            }
        }
    }

    /// Swap in a new displayed subset.
    ///
    /// Angles persist for bodies that remain in view and reset to 0 for
    /// bodies not previously displayed.
    fn replace_displayed(&mut self, subset: Vec<CelestialBody>) {
        let previous_angles: HashMap<String, f64> = self
            .displayed
            .iter()
            .map(|d| (d.body.name.clone(), d.angle))
            .collect();

        let (width, height) = self.viewport;
        let placed = layout::plan_layout(subset, &self.catalog, width, height);
        self.displayed = placed
            .into_iter()
            .map(|PlacedBody { body, scaled_orbit_px }| {
                let angle = previous_angles.get(&body.name).copied().unwrap_or(0.0);
                DisplayBody {
                    body,
                    scaled_orbit_px,
                    angle,
                }
            })
            .collect();
    }
}
