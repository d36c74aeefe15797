//! Drives the effect context from egui input and paints its visuals.

use glam::Vec2;

use stardust_core::{EffectContext, HoverTarget, ParticleInstance};

pub struct EffectDriver {
    context: EffectContext,
    pointer_inside: bool,
}

impl EffectDriver {
    pub fn new(context: EffectContext) -> Self {
        Self {
            context,
            pointer_inside: false,
        }
    }

    pub fn context_mut(&mut self) -> &mut EffectContext {
        &mut self.context
    }

    /// Feeds one frame of egui input into the controllers and advances them.
    pub fn pump_input(
        &mut self,
        ctx: &egui::Context,
        now: f64,
        hero_rect: Option<egui::Rect>,
        hover: HoverTarget,
    ) {
        let (pointer_pos, pressed, released, clicked, focused, dt) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_clicked(),
                i.focused,
                i.stable_dt,
            )
        });

        self.context.on_page_visibility(focused);

        match pointer_pos {
            Some(pos) => {
                if !self.pointer_inside {
                    self.pointer_inside = true;
                    self.context.on_pointer_enter();
                }
                let point = Vec2::new(pos.x, pos.y);
                self.context.on_pointer_move(point, now);
                self.context
                    .set_region_hover(hero_rect.is_some_and(|rect| rect.contains(pos)));
                if clicked {
                    self.context.on_click(point, now);
                }
            }
            None => {
                if self.pointer_inside {
                    self.pointer_inside = false;
                    self.context.on_pointer_leave();
                }
            }
        }
        if pressed {
            self.context.on_press();
        }
        if released {
            self.context.on_release();
        }
        self.context.set_hover(hover);

        self.context.frame(now, dt);
        // stop asking for frames entirely while the page is hidden
        if self.context.is_running() {
            ctx.request_repaint();
        }
    }

    /// Paints on the foreground layer, above every panel.
    pub fn paint(&self, ctx: &egui::Context, now: f64) {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("stardust-effects"),
        ));
        if let Some(trail) = self.context.trail() {
            for instance in trail.instances(now) {
                paint_instance(&painter, &instance);
            }
        }
        if let Some(visuals) = self.context.follower().and_then(|f| f.visuals()) {
            let dot = egui::pos2(visuals.dot.x, visuals.dot.y);
            let halo = egui::pos2(visuals.halo.x, visuals.halo.y);
            painter.circle_filled(
                dot,
                visuals.dot_radius,
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 220),
            );
            painter.circle_stroke(
                halo,
                visuals.halo_radius,
                egui::Stroke::new(1.5, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 140)),
            );
        }
    }
}

fn paint_instance(painter: &egui::Painter, instance: &ParticleInstance) {
    let [r, g, b, a] = instance.color;
    let color = egui::Color32::from_rgba_unmultiplied(
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
        (a.clamp(0.0, 1.0) * 255.0) as u8,
    );
    painter.circle_filled(
        egui::pos2(instance.pos[0], instance.pos[1]),
        instance.radius.max(0.0),
        color,
    );
}
