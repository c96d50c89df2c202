//! Catalog fetch and image loading for the viewer.
//!
//! Runs on a background thread so the UI thread never blocks on the network.
//! The fetch is single-shot: no timeouts beyond the transport defaults, no
//! retries. A failed catalog fetch is fatal to the view (surfaced as an
//! error screen); a failed image load is not, that body just falls back to
//! its fallback circle.

use std::io::Read;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui;

use crate::api::{CelestialBody, PodNameResponse, POD_NAME_SENTINEL};

/// A catalog record with its decoded image, ready for texture upload.
pub struct FetchedBody {
    pub body: CelestialBody,
    /// Decoded bitmap; `None` when the record has no image or decoding failed.
    pub image: Option<egui::ColorImage>,
}

/// Everything the viewer needs before the first frame.
pub struct FetchedCatalog {
    pub bodies: Vec<FetchedBody>,
    /// Identity line shown in the controls bar.
    pub identity: String,
}

/// Spawn the startup fetch on a background thread.
///
/// The receiver yields exactly one message: the loaded catalog (with all
/// image loads resolved, success or failure) or an error string for the
/// error screen.
pub fn spawn_fetch(api_base: String) -> Receiver<Result<FetchedCatalog, String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(fetch_catalog(&api_base));
    });
    rx
}

fn fetch_catalog(api_base: &str) -> Result<FetchedCatalog, String> {
    let url = format!("{}/api/planets", api_base.trim_end_matches('/'));
    let body = ureq::get(&url)
        .call()
        .map_err(|e| format!("Failed to load initial solar system data: {e}"))?
        .into_string()
        .map_err(|e| format!("Failed to read catalog response: {e}"))?;
    let catalog: Vec<CelestialBody> =
        serde_json::from_str(&body).map_err(|e| format!("Malformed catalog response: {e}"))?;

    // Resolve every image before the first render; later filtered views
    // reuse these decodes with no further waiting.
    let bodies = catalog
        .into_iter()
        .map(|body| {
            let image = body
                .image_src
                .as_deref()
                .and_then(|src| load_image(api_base, src));
            FetchedBody { body, image }
        })
        .collect();

    Ok(FetchedCatalog {
        bodies,
        identity: fetch_identity(api_base),
    })
}

/// Fetch and decode one body image; failures are logged and recovered.
fn load_image(api_base: &str, src: &str) -> Option<egui::ColorImage> {
    let url = if src.starts_with("http://") || src.starts_with("https://") {
        src.to_string()
    } else {
        format!(
            "{}/{}",
            api_base.trim_end_matches('/'),
            src.trim_start_matches('/')
        )
    };

    let result = ureq::get(&url).call().map_err(|e| e.to_string()).and_then(|resp| {
        let mut bytes = Vec::new();
        resp.into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| e.to_string())?;
        decode_image(&bytes)
    });

    match result {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Failed to load image {url}: {e}");
            None
        }
    }
}

fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("decode error: {e}"))?
        .to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
}

/// Host/pod identity line; never an error.
fn fetch_identity(api_base: &str) -> String {
    let url = format!("{}/api/podname", api_base.trim_end_matches('/'));
    let pod_name = ureq::get(&url)
        .call()
        .ok()
        .and_then(|resp| resp.into_string().ok())
        .and_then(|body| serde_json::from_str::<PodNameResponse>(&body).ok())
        .map(|resp| resp.pod_name);

    match pod_name {
        Some(name) if name != POD_NAME_SENTINEL => format!("Pod - {name}"),
        _ => format!("Host: {}", host_of(api_base)),
    }
}

/// Display host from an API base URL, for the identity fallback.
fn host_of(api_base: &str) -> String {
    let stripped = api_base
        .trim_start_matches("http://")
        .trim_start_matches("https://");
    let authority = stripped.split('/').next().unwrap_or(stripped);
    authority
        .split(':')
        .next()
        .filter(|host| !host.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of_strips_scheme_port_and_path() {
        assert_eq!(host_of("http://localhost:3000"), "localhost");
        assert_eq!(host_of("https://orrery.example.com/base"), "orrery.example.com");
        assert_eq!(host_of("localhost:3000"), "localhost");
        assert_eq!(host_of(""), "unknown");
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn test_decode_image_round_trips_png() {
        let mut bytes = Vec::new();
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255]));
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.size, [2, 3]);
    }
}
