//! The eframe application: controls, canvas painting, animation.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, TryRecvError};

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions,
};

use super::fetch::{spawn_fetch, FetchedBody, FetchedCatalog};
use super::state::ViewState;
use crate::layout;

/// Dash pattern of the orbit paths, in pixels.
const ORBIT_DASH: f32 = 3.0;
const ORBIT_GAP: f32 = 3.0;

pub struct ViewerApp {
    phase: AppPhase,
}

enum AppPhase {
    Loading {
        rx: Receiver<Result<FetchedCatalog, String>>,
    },
    Ready(Box<ViewModel>),
    Failed(String),
}

struct ViewModel {
    view: ViewState,
    /// Uploaded body textures, keyed by body name. Bodies without an entry
    /// draw as filled circles of their fallback color.
    textures: HashMap<String, TextureHandle>,
    identity: String,
    start_input: String,
    end_input: String,
    search_input: String,
    message: Option<String>,
}

impl ViewerApp {
    /// Kick off the startup fetch and enter the loading phase.
    pub fn new(_cc: &eframe::CreationContext<'_>, api_url: String) -> Self {
        ViewerApp {
            phase: AppPhase::Loading {
                rx: spawn_fetch(api_url),
            },
        }
    }
}

impl ViewModel {
    fn from_fetched(ctx: &egui::Context, fetched: FetchedCatalog) -> Self {
        let mut textures = HashMap::new();
        let mut catalog = Vec::with_capacity(fetched.bodies.len());
        for FetchedBody { body, image } in fetched.bodies {
            if let Some(image) = image {
                let handle =
                    ctx.load_texture(format!("body:{}", body.name), image, TextureOptions::LINEAR);
                textures.insert(body.name.clone(), handle);
            }
            catalog.push(body);
        }

        // The real viewport lands on the first painted frame.
        let view = ViewState::new(catalog, 1024.0, 768.0);

        ViewModel {
            view,
            textures,
            identity: fetched.identity,
            start_input: String::new(),
            end_input: String::new(),
            search_input: String::new(),
            message: None,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Start:");
            ui.add(egui::TextEdit::singleline(&mut self.start_input).desired_width(40.0));
            ui.label("End:");
            ui.add(egui::TextEdit::singleline(&mut self.end_input).desired_width(40.0));
            if ui.button("View Planets by Range").clicked() {
                if let Err(message) = self
                    .view
                    .show_range_input(&self.start_input, &self.end_input)
                {
                    self.message = Some(message);
                }
            }

            ui.separator();

            ui.add(egui::TextEdit::singleline(&mut self.search_input).desired_width(120.0));
            if ui.button("Search the Planet").clicked() {
                match self.view.search(&self.search_input) {
                    Ok(Some(notice)) => self.message = Some(notice),
                    Ok(None) => {}
                    Err(message) => self.message = Some(message),
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(&self.identity);
            });
        });

        let caption = self.view.caption().clone();
        ui.heading(caption.title);
        ui.label(caption.description);
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;
        self.view
            .set_viewport(rect.width() as f64, rect.height() as f64);
        let center = rect.center();

        painter.rect_filled(rect, 0.0, Color32::from_rgb(11, 14, 26));

        self.view.tick();

        // Orbit paths first so bodies draw over them.
        let orbit_stroke = Stroke::new(1.0, Color32::from_white_alpha(180));
        for display in self.view.displayed() {
            if !display.body.is_central() {
                dashed_circle(
                    &painter,
                    center,
                    display.scaled_orbit_px as f32,
                    orbit_stroke,
                );
            }
        }

        // Bodies in draw order: the central body comes first, then
        // innermost to outermost.
        for display in self.view.displayed() {
            let radius = display.body.radius as f32;
            let pos = if display.body.is_central() {
                center
            } else {
                let (x, y) = layout::orbit_position(
                    center.x as f64,
                    center.y as f64,
                    display.scaled_orbit_px,
                    display.angle,
                );
                Pos2::new(x as f32, y as f32)
            };

            if let Some(texture) = self.textures.get(&display.body.name) {
                let image_rect =
                    Rect::from_center_size(pos, egui::vec2(radius * 2.0, radius * 2.0));
                let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
                painter.image(texture.id(), image_rect, uv, Color32::WHITE);
            } else {
                painter.circle_filled(pos, radius, parse_color(&display.body.color));
            }

            painter.text(
                Pos2::new(pos.x, pos.y + radius + 4.0),
                Align2::CENTER_TOP,
                &display.body.name,
                FontId::proportional(10.0),
                Color32::WHITE,
            );
        }
    }

    fn message_box(&mut self, ctx: &egui::Context) {
        let Some(message) = self.message.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Message")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.message = None;
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let next = if let AppPhase::Loading { rx } = &self.phase {
            match rx.try_recv() {
                Ok(Ok(fetched)) => Some(AppPhase::Ready(Box::new(ViewModel::from_fetched(
                    ctx, fetched,
                )))),
                Ok(Err(message)) => Some(AppPhase::Failed(message)),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    Some(AppPhase::Failed("Catalog fetch was interrupted.".to_string()))
                }
            }
        } else {
            None
        };
        if let Some(next) = next {
            self.phase = next;
        }

        match &mut self.phase {
            AppPhase::Loading { .. } => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppPhase::Failed(message) => {
                // Error notice over an otherwise empty viewport; no retry.
                let message = message.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.colored_label(Color32::LIGHT_RED, message);
                    });
                });
            }
            AppPhase::Ready(model) => {
                egui::TopBottomPanel::top("controls").show(ctx, |ui| {
                    model.controls(ui);
                });
                egui::CentralPanel::default().show(ctx, |ui| {
                    model.canvas(ui);
                });
                model.message_box(ctx);
                // The animation never stops on its own; repaint every frame.
                ctx.request_repaint();
            }
        }
    }
}

/// Draw a dashed circle around `center`.
fn dashed_circle(painter: &egui::Painter, center: Pos2, radius: f32, stroke: Stroke) {
    if radius <= 0.0 {
        return;
    }
    let segments = 96;
    let points: Vec<Pos2> = (0..=segments)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / segments as f64;
            let (x, y) =
                layout::orbit_position(center.x as f64, center.y as f64, radius as f64, angle);
            Pos2::new(x as f32, y as f32)
        })
        .collect();
    painter.extend(egui::Shape::dashed_line(&points, stroke, ORBIT_DASH, ORBIT_GAP));
}

/// Parse a `#rrggbb` color spec, falling back to gray on anything else.
fn parse_color(spec: &str) -> Color32 {
    let hex = spec.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Color32::from_rgb(r, g, b);
        }
    }
    Color32::GRAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FFD700"), Color32::from_rgb(0xFF, 0xD7, 0x00));
        assert_eq!(parse_color("4169e1"), Color32::from_rgb(0x41, 0x69, 0xE1));
    }

    #[test]
    fn test_parse_color_fallback() {
        assert_eq!(parse_color("cornflowerblue"), Color32::GRAY);
        assert_eq!(parse_color("#12"), Color32::GRAY);
    }
}
