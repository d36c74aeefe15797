//! Stardust presentation layer: section navigation, hero effects, and the
//! project gallery, drawn with eframe/egui.

mod effects;
mod gallery_view;
mod hero;
mod images;
mod loader;
mod probe;

pub use loader::spawn_catalog_loader;
pub use probe::DesktopProbe;

use std::time::Instant;

use crossbeam_channel::Receiver;
use tracing::info;

use stardust_core::{AppConfig, Capabilities, HoverTarget, LifecycleGate};
use stardust_gallery::{FsProjectSource, GalleryState};

use crate::effects::EffectDriver;
use crate::gallery_view::GalleryView;
use crate::hero::{TypedHeadline, HEADLINES};
use crate::images::ImageCache;

const EMAIL_USER: &str = "hello";
const EMAIL_DOMAIN: &str = "stardust.dev";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Portfolio,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Portfolio,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Portfolio => "Portfolio",
            Section::Contact => "Contact",
        }
    }
}

pub fn run_app(config: AppConfig) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stardust")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Stardust",
        native_options,
        Box::new(move |creation_context| Ok(Box::new(StardustApp::new(creation_context, config)))),
    )
}

pub struct StardustApp {
    config: AppConfig,
    effects: Option<EffectDriver>,
    gallery: GalleryState,
    gallery_rx: Receiver<GalleryState>,
    gallery_view: GalleryView,
    images: ImageCache,
    headline: TypedHeadline,
    section: Section,
    cursor_enabled: bool,
    email_revealed: bool,
    start: Instant,
}

impl StardustApp {
    pub fn new(_creation_context: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let gallery_rx = spawn_catalog_loader(FsProjectSource {
            path: config.data_path.clone(),
        });
        Self {
            config,
            effects: None,
            gallery: GalleryState::Loading,
            gallery_rx,
            gallery_view: GalleryView::new(),
            images: ImageCache::new(),
            headline: TypedHeadline::new(HEADLINES.iter().copied()),
            section: Section::Home,
            cursor_enabled: true,
            email_revealed: false,
            start: Instant::now(),
        }
    }

    /// Gate evaluation needs a real viewport, so it waits for the first
    /// frame rather than running in the constructor.
    fn ensure_effects(&mut self, ctx: &egui::Context) {
        if self.effects.is_some() {
            return;
        }
        let probe = DesktopProbe::sample(ctx);
        let caps = Capabilities::from_probe(&probe);
        let context =
            LifecycleGate::new(caps).build_context(self.config.preset.clone(), self.config.follower.clone());
        self.effects = Some(EffectDriver::new(context));
    }

    fn show_home(
        &mut self,
        ui: &mut egui::Ui,
        now: f64,
        hover: &mut HoverTarget,
    ) -> egui::Rect {
        let hero_rect = ui.available_rect_before_wrap();
        ui.add_space(80.0);
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Hi, I build things.").size(36.0));
            ui.add_space(6.0);
            let typed = self.headline.tick(now);
            ui.label(
                egui::RichText::new(format!("{typed}|"))
                    .size(22.0)
                    .color(egui::Color32::from_rgb(0x06, 0xff, 0xa5)),
            );
            ui.add_space(16.0);
            let hire = ui.button("Hire Me");
            if hire.hovered() {
                *hover = HoverTarget::Button;
            }
            if hire.clicked() {
                self.section = Section::Contact;
            }
        });
        hero_rect
    }

    fn show_about(&mut self, ui: &mut egui::Ui) {
        ui.add_space(40.0);
        ui.heading("About");
        ui.add_space(8.0);
        ui.label("Portfolio showcase with decorative cursor effects: a bounded \
                  particle trail, a cursor follower, and a data-driven project \
                  gallery.");
        ui.add_space(8.0);
        ui.checkbox(&mut self.cursor_enabled, "Custom cursor");
    }

    fn show_contact(&mut self, ui: &mut egui::Ui, hover: &mut HoverTarget) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.heading("Get in touch");
            ui.add_space(8.0);
            if self.email_revealed {
                ui.monospace(format!("{EMAIL_USER}@{EMAIL_DOMAIN}"));
            } else {
                let reveal = ui.button("Reveal email");
                if reveal.hovered() {
                    *hover = HoverTarget::Button;
                }
                if reveal.clicked() {
                    self.email_revealed = true;
                }
            }
        });
    }
}

impl eframe::App for StardustApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.start.elapsed().as_secs_f64();
        self.ensure_effects(ctx);

        while let Ok(state) = self.gallery_rx.try_recv() {
            self.gallery = state;
        }

        let mut hover = HoverTarget::None;
        let mut hero_rect: Option<egui::Rect> = None;

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Stardust");
                ui.separator();
                for section in Section::ALL {
                    let response = ui.selectable_label(self.section == section, section.label());
                    if response.hovered() {
                        hover = HoverTarget::Button;
                    }
                    if response.clicked() {
                        info!("nav: switched to {:?}", section);
                        self.section = section;
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.section {
            Section::Home => hero_rect = Some(self.show_home(ui, now, &mut hover)),
            Section::About => self.show_about(ui),
            Section::Portfolio => {
                if self.gallery_view.show(ui, &self.gallery, &mut self.images) {
                    hover = HoverTarget::Portfolio;
                }
            }
            Section::Contact => self.show_contact(ui, &mut hover),
        });

        if let Some(driver) = self.effects.as_mut() {
            driver
                .context_mut()
                .on_region_visibility(self.section == Section::Home);
            if let Some(follower) = driver.context_mut().follower_mut() {
                if self.cursor_enabled {
                    follower.enable();
                } else {
                    follower.disable();
                }
            }
            driver.pump_input(ctx, now, hero_rect, hover);
            driver.paint(ctx, now);
        }
    }
}
