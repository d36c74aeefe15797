//! Gallery panels: loading, error, and the project grid.

use egui::{Color32, RichText};

use stardust_gallery::{GalleryState, Project, ProjectCatalog};

use crate::images::ImageCache;

const CARD_WIDTH: f32 = 260.0;
const IMAGE_WIDTH: f32 = 240.0;

pub struct GalleryView {
    filter: String,
    query: String,
}

impl GalleryView {
    pub fn new() -> Self {
        Self {
            filter: "all".into(),
            query: String::new(),
        }
    }

    /// Renders the current state; returns whether any card is hovered.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &GalleryState,
        images: &mut ImageCache,
    ) -> bool {
        match state {
            GalleryState::Loading => {
                show_loading(ui);
                false
            }
            GalleryState::Failed(message) => {
                show_error(ui, message);
                false
            }
            GalleryState::Ready(catalog) => self.show_grid(ui, catalog, images),
        }
    }

    fn show_grid(
        &mut self,
        ui: &mut egui::Ui,
        catalog: &ProjectCatalog,
        images: &mut ImageCache,
    ) -> bool {
        ui.horizontal(|ui| {
            for name in std::iter::once("all").chain(catalog.categories()) {
                if ui.selectable_label(self.filter == name, name).clicked() {
                    self.filter = name.to_owned();
                    self.query.clear();
                }
            }
            ui.separator();
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.query);
        });
        ui.add_space(8.0);

        let visible: Vec<&Project> = if self.query.trim().is_empty() {
            catalog.filter_by_category(&self.filter)
        } else {
            catalog.search(self.query.trim())
        };

        if visible.is_empty() {
            ui.weak("No projects match.");
            return false;
        }

        let mut hovered = false;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for project in visible {
                    if project_card(ui, project, images) {
                        hovered = true;
                    }
                }
            });
        });
        hovered
    }
}

fn show_loading(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.spinner();
        ui.label("Loading projects...");
    });
}

fn show_error(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading("Failed to load projects");
        ui.label("Unable to load project data. Check the data file and try again.");
        ui.weak(message);
    });
}

fn project_card(ui: &mut egui::Ui, project: &Project, images: &mut ImageCache) -> bool {
    let response = egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                match images.get(ui.ctx(), &project.image) {
                    Some(texture) => {
                        let size = texture.size_vec2();
                        let scale = IMAGE_WIDTH / size.x.max(1.0);
                        ui.image((texture.id(), size * scale));
                    }
                    None => {
                        let (rect, _) = ui
                            .allocate_exact_size(egui::vec2(IMAGE_WIDTH, 130.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, Color32::from_gray(45));
                    }
                }
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(&project.category_icon);
                    ui.label(RichText::new(&project.category).small());
                    if !project.badge.is_empty() {
                        let color = badge_color(project.badge_type.class());
                        ui.label(RichText::new(&project.badge).small().strong().color(color));
                    }
                    if project.featured {
                        ui.label(RichText::new("FEATURED").small().color(Color32::GOLD));
                    }
                });
                ui.strong(&project.title);
                ui.label(RichText::new(&project.description).weak());
                if !project.stats.is_empty() {
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        for stat in &project.stats {
                            ui.vertical(|ui| {
                                ui.strong(&stat.value);
                                ui.label(RichText::new(&stat.label).small().weak());
                            });
                        }
                    });
                }
                if !project.technologies.is_empty() {
                    ui.add_space(4.0);
                    ui.horizontal_wrapped(|ui| {
                        for tech in &project.technologies {
                            ui.label(RichText::new(&tech.name).small().color(tech_color(&tech.color)));
                        }
                    });
                }
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let (dot, _) =
                        ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                    ui.painter().circle_filled(
                        dot.center(),
                        4.0,
                        status_color(project.status.kind.class()),
                    );
                    ui.label(RichText::new(&project.status.label).small());
                    ui.hyperlink_to("Live", &project.links.live);
                    ui.hyperlink_to("Code", &project.links.github);
                });
            });
        })
        .response;
    response.contains_pointer()
}

fn badge_color(class: &str) -> Color32 {
    match class {
        "trending" => Color32::from_rgb(0xff, 0x9f, 0x1c),
        "new" => Color32::from_rgb(0x38, 0xb0, 0x00),
        "pro" => Color32::from_rgb(0x83, 0x38, 0xec),
        "latest" => Color32::from_rgb(0x3a, 0x86, 0xff),
        "innovative" => Color32::from_rgb(0x06, 0xff, 0xa5),
        _ => Color32::from_rgb(0xff, 0x00, 0x6e),
    }
}

fn status_color(class: &str) -> Color32 {
    match class {
        "pulse" => Color32::from_rgb(0x38, 0xb0, 0x00),
        "deployed" => Color32::from_rgb(0x3a, 0x86, 0xff),
        "beta" => Color32::from_rgb(0xff, 0xbe, 0x0b),
        "enterprise" => Color32::from_rgb(0x83, 0x38, 0xec),
        "completed" => Color32::from_gray(160),
        _ => Color32::from_gray(100),
    }
}

fn tech_color(name: &str) -> Color32 {
    match name {
        "orange" => Color32::from_rgb(0xff, 0x9f, 0x1c),
        "blue" => Color32::from_rgb(0x3a, 0x86, 0xff),
        "green" => Color32::from_rgb(0x38, 0xb0, 0x00),
        "purple" => Color32::from_rgb(0x83, 0x38, 0xec),
        "red" => Color32::from_rgb(0xe6, 0x39, 0x46),
        "yellow" => Color32::from_rgb(0xff, 0xd6, 0x0a),
        "pink" => Color32::from_rgb(0xff, 0x70, 0xa6),
        _ => Color32::LIGHT_GRAY,
    }
}
