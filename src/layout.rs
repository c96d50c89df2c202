//! Orbital layout computations for the viewer.
//!
//! Pure functions mapping catalog orbital attributes and a viewport size to
//! draw-space radii and positions. Everything here is deterministic given
//! its inputs; the animation state (per-body angles) lives with the caller.
//!
//! The scale factor is derived from the **full catalog**, not the displayed
//! subset, so switching between filtered views never rescales the orbits
//! that stay on screen: scale is a property of the whole universe, not of
//! the current view.

use crate::api::CelestialBody;

/// Distance kept between the outermost orbit and the viewport edge,
/// in display units.
pub const ORBIT_PADDING: f64 = 50.0;

/// A displayed body with its orbit radius resolved to display units.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBody {
    pub body: CelestialBody,
    /// Orbit radius in display units; 0 for the central body.
    pub scaled_orbit_px: f64,
}

impl PlacedBody {
    pub fn is_central(&self) -> bool {
        self.body.is_central()
    }
}

/// Largest orbital radius among the catalog's orbiting bodies.
///
/// Returns 0.0 when the catalog holds no orbiting bodies.
pub fn max_orbital_radius(catalog: &[CelestialBody]) -> f64 {
    catalog
        .iter()
        .filter(|b| !b.is_central())
        .map(|b| b.orbital_radius)
        .fold(0.0, f64::max)
}

/// Ratio mapping catalog orbital-distance units to display units.
///
/// The outermost catalog orbit lands `ORBIT_PADDING` units inside the
/// smaller viewport dimension. Degenerates to 1.0 when there is nothing
/// orbiting, so a Sun-only catalog never divides by zero.
pub fn scale_factor(catalog: &[CelestialBody], viewport_w: f64, viewport_h: f64) -> f64 {
    let max_radius = max_orbital_radius(catalog);
    if max_radius <= 0.0 {
        return 1.0;
    }
    let available_radius = viewport_w.min(viewport_h) / 2.0 - ORBIT_PADDING;
    available_radius / max_radius
}

/// Resolve a displayed subset into draw order with scaled orbit radii.
///
/// The central body is force-included (prepended from the catalog when the
/// subset lacks it), then the set is stable-sorted ascending by original
/// orbital radius. The central body therefore always draws first and
/// occlusion runs innermost to outermost.
pub fn plan_layout(
    displayed: Vec<CelestialBody>,
    catalog: &[CelestialBody],
    viewport_w: f64,
    viewport_h: f64,
) -> Vec<PlacedBody> {
    let scale = scale_factor(catalog, viewport_w, viewport_h);

    let mut bodies = displayed;
    if !bodies.iter().any(|b| b.is_central()) {
        if let Some(central) = catalog.iter().find(|b| b.is_central()) {
            bodies.insert(0, central.clone());
        }
    }

    bodies.sort_by(|a, b| {
        a.orbital_radius
            .partial_cmp(&b.orbital_radius)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    bodies
        .into_iter()
        .map(|body| {
            let scaled_orbit_px = if body.is_central() {
                0.0
            } else {
                body.orbital_radius * scale
            };
            PlacedBody {
                body,
                scaled_orbit_px,
            }
        })
        .collect()
}

/// Advance an orbit angle by one frame.
///
/// Angles grow without bound; the trigonometry below wraps them implicitly.
pub fn advance_angle(angle: f64, orbital_speed: f64) -> f64 {
    angle + orbital_speed
}

/// Position on an orbit circle around `(cx, cy)`.
pub fn orbit_position(cx: f64, cy: f64, scaled_orbit_px: f64, angle: f64) -> (f64, f64) {
    (
        cx + scaled_orbit_px * angle.cos(),
        cy + scaled_orbit_px * angle.sin(),
    )
}
