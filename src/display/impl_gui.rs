use crate::classify_app::preview::{image_mime, Preview};
use crate::classify_app::render::{ResultsPanel, Screen, StatisticsView, StatusLine};
use crate::display::interface::{Display, InputEvent};
use crate::result_view::{ResultView, NO_DETAILED_PREDICTIONS};
use eframe::egui;
use egui::{Color32, RichText};
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const CELEBRATION: Duration = Duration::from_millis(1500);
const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);
const FAILURE: Color32 = Color32::from_rgb(214, 51, 108);
const ACCENT: Color32 = Color32::from_rgb(67, 97, 238);

#[derive(Default)]
struct Shared {
    screen: Option<Screen>,
    celebrate_until: Option<Instant>,
    ctx: Option<egui::Context>,
}

/// Front end backed by an egui window. The window itself runs on the main
/// thread through [`run_window`]; this half lives inside the app.
pub struct DisplayGui {
    shared: Arc<Mutex<Shared>>,
    input_sender: Sender<InputEvent>,
    input_receiver: Mutex<Option<Receiver<InputEvent>>>,
}

impl DisplayGui {
    pub fn new() -> Self {
        let (input_sender, input_receiver) = channel();
        Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            input_sender,
            input_receiver: Mutex::new(Some(input_receiver)),
        }
    }

    pub fn window(&self) -> GuiWindow {
        GuiWindow {
            shared: Arc::clone(&self.shared),
            input_sender: self.input_sender.clone(),
            url_input: None,
            path_input: String::new(),
            texture: None,
        }
    }
}

impl Default for DisplayGui {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DisplayGui {
    fn present(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut shared = self.shared.lock().map_err(|_| "gui state lock poisoned")?;
        shared.screen = Some(screen.clone());
        if let Some(ctx) = &shared.ctx {
            ctx.request_repaint();
        }
        Ok(())
    }

    fn celebrate(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut shared = self.shared.lock().map_err(|_| "gui state lock poisoned")?;
        shared.celebrate_until = Some(Instant::now() + CELEBRATION);
        if let Some(ctx) = &shared.ctx {
            ctx.request_repaint();
        }
        Ok(())
    }

    fn events(&self) -> Receiver<InputEvent> {
        match self.input_receiver.lock().ok().and_then(|mut r| r.take()) {
            Some(receiver) => receiver,
            None => channel().1,
        }
    }
}

pub struct GuiWindow {
    shared: Arc<Mutex<Shared>>,
    input_sender: Sender<InputEvent>,
    url_input: Option<String>,
    path_input: String,
    texture: Option<(PathBuf, egui::TextureHandle)>,
}

impl GuiWindow {
    fn send(&self, event: InputEvent) {
        let _ = self.input_sender.send(event);
    }

    fn take_dropped_file(&self, ctx: &egui::Context) -> Option<PathBuf> {
        ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .find(|path| image_mime(path).is_some())
        })
    }

    fn thumbnail_texture(
        &mut self,
        ctx: &egui::Context,
        preview: &Preview,
    ) -> Option<egui::TextureHandle> {
        let thumbnail = preview.thumbnail.as_ref()?;
        let stale = match &self.texture {
            Some((path, _)) => path != &preview.path,
            None => true,
        };
        if stale {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [thumbnail.width, thumbnail.height],
                &thumbnail.rgba,
            );
            let handle =
                ctx.load_texture(preview.file.name.clone(), image, egui::TextureOptions::default());
            self.texture = Some((preview.path.clone(), handle));
        }
        self.texture.as_ref().map(|(_, handle)| handle.clone())
    }

    fn draw_api_bar(&mut self, ui: &mut egui::Ui, screen: &Screen) {
        let url_input = self
            .url_input
            .get_or_insert_with(|| screen.api_base_url.clone());
        let mut changed = None;
        let mut test = false;
        ui.horizontal(|ui| {
            ui.label("API URL:");
            if ui.text_edit_singleline(url_input).changed() {
                changed = Some(url_input.clone());
            }
            test = ui.button("Test connection").clicked();
        });
        if let Some(url) = changed {
            self.send(InputEvent::ApiUrlChanged(url));
        }
        if test {
            self.send(InputEvent::TestConnection);
        }
        status_label(ui, &screen.connection);
    }

    fn draw_upload(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, screen: &Screen) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let frame = egui::Frame::group(ui.style()).stroke(egui::Stroke::new(
            2.0,
            if hovering { ACCENT } else { Color32::GRAY },
        ));
        frame.show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Drop an image here").size(18.0));
            });
            ui.horizontal(|ui| {
                ui.label("or path:");
                ui.text_edit_singleline(&mut self.path_input);
                let classify = ui.add_enabled(
                    !screen.busy && !self.path_input.trim().is_empty(),
                    egui::Button::new("Classify"),
                );
                if classify.clicked() {
                    let path = PathBuf::from(self.path_input.trim());
                    let _ = self.input_sender.send(InputEvent::FileChosen(path));
                }
            });
        });

        if let Some(preview) = &screen.preview {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if let Some(texture) = self.thumbnail_texture(ctx, preview) {
                    ui.add(
                        egui::Image::new(egui::load::SizedTexture::from_handle(&texture))
                            .max_width(240.0),
                    );
                }
                ui.vertical(|ui| {
                    ui.label(preview.summary());
                    if ui
                        .add_enabled(!screen.busy, egui::Button::new("Remove"))
                        .clicked()
                    {
                        self.send(InputEvent::ClearImage);
                    }
                });
            });
        }

        status_label(ui, &screen.status);
        if let Some(notice) = &screen.notice {
            ui.label(RichText::new(notice).italics());
        }
    }
}

fn status_label(ui: &mut egui::Ui, status: &StatusLine) {
    match status {
        StatusLine::None => {}
        StatusLine::Loading(text) => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(text);
            });
        }
        StatusLine::Success(text) => {
            ui.label(RichText::new(format!("✔ {}", text)).color(SUCCESS));
        }
        StatusLine::Error(text) => {
            ui.label(RichText::new(format!("✘ {}", text)).color(FAILURE));
        }
    }
}

fn draw_result(ui: &mut egui::Ui, view: &ResultView, celebrating: bool) {
    let size = if celebrating { 34.0 } else { 26.0 };
    ui.label(
        RichText::new(format!("{} {}", view.icon.glyph(), view.label))
            .size(size)
            .strong(),
    );
    if celebrating {
        ui.label(RichText::new("🎉 Excellent confidence! 🎉").size(20.0).color(ACCENT));
    }
    let fraction = view.confidence_fraction.unwrap_or(0.0) as f32;
    ui.add(egui::ProgressBar::new(fraction).text(view.confidence_label()));

    ui.add_space(8.0);
    ui.heading("All Predictions:");
    if view.has_detailed_predictions() {
        egui::Grid::new("predictions").striped(true).show(ui, |ui| {
            for row in &view.predictions {
                let text = format!("{} {}", row.icon.glyph(), row.class);
                let percentage = format!("{}%", row.percentage);
                if row.highest {
                    ui.label(RichText::new(text).strong().color(ACCENT));
                    ui.label(RichText::new(percentage).strong().color(ACCENT));
                } else {
                    ui.label(text);
                    ui.label(percentage);
                }
                ui.end_row();
            }
        });
    } else {
        ui.label(NO_DETAILED_PREDICTIONS);
    }

    ui.add_space(8.0);
    ui.heading("♻ Recycling Recommendations");
    for recommendation in &view.recommendations {
        ui.label(format!("• {}", recommendation));
    }
}

fn draw_statistics(ui: &mut egui::Ui, statistics: &StatisticsView) {
    ui.horizontal(|ui| {
        for (title, value) in [
            ("Total classifications", &statistics.total),
            ("Average confidence", &statistics.average_confidence),
            ("Most common class", &statistics.most_common_class),
        ] {
            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(value).size(20.0).strong());
                    ui.small(title);
                });
            });
        }
    });
}

impl eframe::App for GuiWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (screen, celebrating) = {
            let Ok(mut shared) = self.shared.lock() else {
                return;
            };
            if shared.ctx.is_none() {
                shared.ctx = Some(ctx.clone());
            }
            let celebrating = shared
                .celebrate_until
                .is_some_and(|until| until > Instant::now());
            (shared.screen.clone(), celebrating)
        };
        let Some(screen) = screen else {
            ctx.request_repaint_after(Duration::from_millis(100));
            return;
        };

        if let Some(path) = self.take_dropped_file(ctx) {
            if !screen.busy {
                self.send(InputEvent::FileChosen(path));
            }
        }

        egui::TopBottomPanel::top("api").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Waste Classifier");
            self.draw_api_bar(ui, &screen);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("statistics").show(ctx, |ui| {
            ui.add_space(4.0);
            draw_statistics(ui, &screen.statistics);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.draw_upload(ui, ctx, &screen);
                ui.separator();
                match &screen.results {
                    ResultsPanel::Empty => {
                        ui.label("Upload an image to see results.");
                    }
                    ResultsPanel::Processing => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Processing...");
                        });
                    }
                    ResultsPanel::Result(view) => draw_result(ui, view, celebrating),
                    ResultsPanel::Failure { hints } => {
                        ui.label(
                            RichText::new("Failed to classify image. Please check:").color(FAILURE),
                        );
                        for hint in hints {
                            ui.label(format!("• {}", hint));
                        }
                    }
                }
            });
        });

        if celebrating || screen.busy {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

/// Blocks the calling thread (the main thread) until the window closes.
pub fn run_window(window: GuiWindow) -> Result<(), Box<dyn Error + Send + Sync>> {
    let input_sender = window.input_sender.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Waste Classifier")
            .with_inner_size([720.0, 780.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Waste Classifier",
        options,
        Box::new(|_cc| Box::new(window)),
    );
    let _ = input_sender.send(InputEvent::Quit);
    result.map_err(|e| e.to_string())?;
    Ok(())
}
