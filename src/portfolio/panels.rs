// egui drawing for the navigation bar, gauge readout and the five content panels.
//
// Drawing never mutates view state: buttons push UiActions into the FrameReport
// and the caller applies them after the frame.

use egui::{Align2, Color32, FontId, Margin, RichText, Sense, Stroke, Ui};

use super::content::{self, Project};
use super::gauges::{Gauge, Gauges};
use super::images::ImageCache;
use super::links::ContactAction;
use super::section::Section;
use super::{FrameReport, UiAction};

/// Content column width.
const PANEL_WIDTH: f32 = 896.0;
const COVER_HEIGHT: f32 = 192.0;

const BLUE: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const BLUE_BRIGHT: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
const GREEN: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const GREEN_BRIGHT: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
const PURPLE: Color32 = Color32::from_rgb(0xa8, 0x55, 0xf7);
const PURPLE_SOFT: Color32 = Color32::from_rgb(0xd8, 0xb4, 0xfe);
const YELLOW: Color32 = Color32::from_rgb(0xea, 0xb3, 0x08);
const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const TRACK: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
const BODY_TEXT: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);

pub fn rgb(hex: u32) -> Color32 {
    Color32::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn translucent_black(alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 0, alpha)
}

/// 0.5..1.0 opacity pulse, one cycle every two seconds.
fn pulse(ctx: &egui::Context) -> f32 {
    let t = ctx.input(|i| i.time) as f32;
    0.75 + 0.25 * (t * std::f32::consts::PI).sin()
}

// ============================================================================
// NAVIGATION + HUD
// ============================================================================

pub fn nav_bar(ctx: &egui::Context, active: Section, report: &mut FrameReport) {
    egui::Area::new(egui::Id::new("nav_bar"))
        .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(translucent_black(180))
                .stroke(Stroke::new(1.0, BLUE.gamma_multiply(0.3)))
                .rounding(24.0)
                .inner_margin(Margin::same(8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for section in Section::ALL {
                            let selected = section == active;
                            let text = RichText::new(format!("{} {}", section.glyph(), section.label()))
                                .color(if selected { Color32::WHITE } else { BODY_TEXT });
                            let button = egui::Button::new(text)
                                .fill(if selected { BLUE } else { Color32::TRANSPARENT })
                                .rounding(16.0);
                            let response = ui.add(button);
                            if selected {
                                report.nav_active.push(section);
                            }
                            report.nav_buttons.push((section, response.rect));
                            if response.clicked() {
                                report.actions.push(UiAction::Navigate(section));
                            }
                        }
                    });
                });
        });
}

pub fn gauge_readout(ctx: &egui::Context, gauges: Gauges) {
    egui::Area::new(egui::Id::new("gauges"))
        .anchor(Align2::LEFT_BOTTOM, egui::vec2(16.0, -16.0))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(translucent_black(180))
                .stroke(Stroke::new(1.0, GREEN.gamma_multiply(0.3)))
                .rounding(8.0)
                .inner_margin(Margin::same(16.0))
                .show(ui, |ui| {
                    let online = GREEN_BRIGHT.gamma_multiply(pulse(ctx));
                    ui.horizontal(|ui| {
                        let (dot, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), Sense::hover());
                        ui.painter().circle_filled(dot.center(), 4.0, online);
                        ui.label(RichText::new("SYSTEM ONLINE").monospace().size(13.0).color(GREEN_BRIGHT));
                    });
                    gauge_row(ui, "HP:", gauges.health, RED);
                    gauge_row(ui, "EN:", gauges.energy, BLUE);
                });
        });
}

fn gauge_row(ui: &mut Ui, label: &str, gauge: Gauge, color: Color32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).size(11.0).color(color));
        bar(ui, 80.0, 8.0, gauge.fraction(), color);
        ui.label(RichText::new(gauge.rounded().to_string()).size(11.0).color(color));
    });
}

/// Horizontal fill bar; `fraction` is clamped to [0, 1].
fn bar(ui: &mut Ui, width: f32, height: f32, fraction: f32, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, height / 2.0, TRACK);
    let mut filled = rect;
    filled.set_width(rect.width() * fraction.clamp(0.0, 1.0));
    painter.rect_filled(filled, height / 2.0, color);
}

// ============================================================================
// CONTENT
// ============================================================================

/// Draw exactly one panel: the one for `active`.
pub fn content(
    ctx: &egui::Context,
    active: Section,
    covers: &mut ImageCache,
    report: &mut FrameReport,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        let top = if active == Section::Projects {
                            96.0
                        } else {
                            (ui.available_height() * 0.2).max(96.0)
                        };
                        ui.add_space(top);
                        ui.set_max_width(PANEL_WIDTH.min((ui.available_width() - 32.0).max(0.0)));

                        match active {
                            Section::Home => home(ui, report),
                            Section::About => about(ui),
                            Section::Skills => skills(ui),
                            Section::Projects => projects(ui, covers, report),
                            Section::Contact => contact(ui, report),
                        }
                        report.panels.push(active);
                        ui.add_space(32.0);
                    });
                });
        });
}

fn card(ui: &mut Ui, accent: Color32, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::none()
        .fill(translucent_black(204))
        .stroke(Stroke::new(1.0, accent))
        .rounding(12.0)
        .inner_margin(Margin::same(32.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(egui::Layout::top_down(egui::Align::Min), add_contents);
        });
}

fn heading(ui: &mut Ui, glyph: &str, text: &str, accent: Color32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(glyph).size(32.0).color(accent));
        ui.add_space(8.0);
        ui.label(RichText::new(text).size(28.0).strong().color(Color32::WHITE));
    });
    ui.add_space(16.0);
}

fn body(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(18.0).color(BODY_TEXT));
}

/// Add a panel button that raises `action` when clicked.
fn action_button(ui: &mut Ui, button: egui::Button<'_>, action: UiAction, report: &mut FrameReport) {
    let response = ui.add(button);
    report.action_buttons.push((action, response.rect));
    if response.clicked() {
        report.actions.push(action);
    }
}

fn home(ui: &mut Ui, report: &mut FrameReport) {
    let hero = &content::HERO;
    let alpha = pulse(ui.ctx());

    egui::Frame::none()
        .stroke(Stroke::new(2.0, BLUE.gamma_multiply(alpha)))
        .rounding(24.0)
        .inner_margin(Margin::symmetric(24.0, 10.0))
        .show(ui, |ui| {
            ui.label(RichText::new(hero.status).monospace().size(13.0).color(BLUE_BRIGHT.gamma_multiply(alpha)));
        });
    ui.add_space(24.0);

    ui.label(RichText::new(hero.title).size(64.0).strong().color(BLUE_BRIGHT));
    ui.add_space(16.0);
    ui.label(RichText::new(hero.tagline).size(22.0).color(BODY_TEXT));
    ui.add_space(32.0);

    let launch = egui::Button::new(
        RichText::new(format!("🚀 {}", hero.call_to_action)).size(18.0).strong().color(Color32::WHITE),
    )
    .fill(Color32::from_rgb(0x25, 0x63, 0xeb))
    .stroke(Stroke::new(1.0, BLUE_BRIGHT))
    .rounding(28.0)
    .min_size(egui::vec2(240.0, 56.0));
    action_button(ui, launch, UiAction::Navigate(Section::About), report);
}

fn about(ui: &mut Ui) {
    card(ui, BLUE, |ui| {
        heading(ui, Section::About.glyph(), content::ABOUT_HEADING, BLUE_BRIGHT);
        body(ui, content::ABOUT_TEXT);
        ui.add_space(24.0);

        ui.columns(content::ABOUT_STATS.len(), |columns| {
            for (ui, stat) in columns.iter_mut().zip(content::ABOUT_STATS.iter()) {
                egui::Frame::none()
                    .fill(Color32::from_rgba_unmultiplied(0x1e, 0x3a, 0x8a, 77))
                    .stroke(Stroke::new(1.0, Color32::from_rgb(0x1e, 0x40, 0xaf)))
                    .rounding(8.0)
                    .inner_margin(Margin::same(20.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(stat.label).size(16.0).strong().color(rgb(stat.color)));
                        ui.label(RichText::new(stat.value).monospace().size(28.0).color(rgb(stat.color)));
                    });
            }
        });
    });
}

fn skills(ui: &mut Ui) {
    card(ui, GREEN, |ui| {
        heading(ui, Section::Skills.glyph(), content::SKILLS_HEADING, GREEN_BRIGHT);
        for skill in &content::SKILLS {
            ui.horizontal(|ui| {
                ui.label(RichText::new(skill.name).size(18.0).color(Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(format!("{}%", skill.level)).monospace().color(Color32::WHITE));
                });
            });
            let width = ui.available_width();
            bar(ui, width, 12.0, f32::from(skill.level) / 100.0, rgb(skill.color));
            ui.add_space(12.0);
        }
    });
}

fn projects(ui: &mut Ui, covers: &mut ImageCache, report: &mut FrameReport) {
    card(ui, PURPLE, |ui| {
        heading(ui, Section::Projects.glyph(), content::PROJECTS_HEADING, PURPLE_SOFT);
        for project in &content::PROJECTS {
            project_card(ui, project, covers);
            report
                .badges
                .push((project.title, project.tech.to_vec()));
            ui.add_space(24.0);
        }
    });
}

fn project_card(ui: &mut Ui, project: &Project, covers: &mut ImageCache) {
    egui::Frame::none()
        .fill(translucent_black(128))
        .stroke(Stroke::new(1.0, rgb(project.color).gamma_multiply(0.6)))
        .rounding(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            let (cover, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), COVER_HEIGHT), Sense::hover());
            let painter = ui.painter_at(cover);
            match covers.cover(ui.ctx(), project.image) {
                Some(texture) => {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture, cover, uv, Color32::WHITE);
                }
                None => {
                    painter.rect_filled(cover, 0.0, rgb(project.color).gamma_multiply(0.25));
                    painter.text(
                        cover.center(),
                        Align2::CENTER_CENTER,
                        format!("Screenshot of {}", project.title),
                        FontId::proportional(16.0),
                        BODY_TEXT,
                    );
                }
            }
            let tag_pos = cover.right_top() + egui::vec2(-12.0, 12.0);
            let tag = painter.layout_no_wrap(
                content::PROJECT_ENGINE_TAG.to_owned(),
                FontId::monospace(11.0),
                PURPLE_SOFT,
            );
            let tag_rect = Align2::RIGHT_TOP
                .anchor_size(tag_pos, tag.size())
                .expand2(egui::vec2(10.0, 4.0));
            painter.rect(tag_rect, 10.0, translucent_black(180), Stroke::new(1.0, PURPLE));
            painter.galley(tag_rect.shrink2(egui::vec2(10.0, 4.0)).min, tag, PURPLE_SOFT);

            egui::Frame::none()
                .inner_margin(Margin::same(24.0))
                .show(ui, |ui| {
                    ui.label(RichText::new(project.title).size(20.0).strong().color(Color32::WHITE));
                    ui.label(RichText::new(project.description).color(BODY_TEXT));
                    ui.add_space(8.0);
                    ui.horizontal_wrapped(|ui| {
                        for tech in project.tech {
                            egui::Frame::none()
                                .stroke(Stroke::new(1.0, PURPLE_SOFT.gamma_multiply(0.7)))
                                .rounding(10.0)
                                .inner_margin(Margin::symmetric(8.0, 2.0))
                                .show(ui, |ui| {
                                    ui.label(RichText::new(*tech).size(12.0).color(PURPLE_SOFT));
                                });
                        }
                    });
                });
        });
}

fn contact(ui: &mut Ui, report: &mut FrameReport) {
    card(ui, YELLOW, |ui| {
        heading(ui, Section::Contact.glyph(), content::CONTACT_HEADING, YELLOW);
        body(ui, content::CONTACT_TEXT);
        ui.add_space(24.0);

        ui.columns(2, |columns| {
            for action in ContactAction::ALL {
                let button = egui::Button::new(
                    RichText::new(format!("{} {}", action.glyph(), action.label())).size(18.0).color(Color32::WHITE),
                )
                .fill(rgb(action.color()))
                .min_size(egui::vec2(columns[0].available_width(), 52.0));
                action_button(&mut columns[0], button, UiAction::Contact(action), report);
            }

            egui::Frame::none()
                .fill(Color32::from_rgba_unmultiplied(0x1e, 0x3a, 0x8a, 77))
                .stroke(Stroke::new(1.0, Color32::from_rgb(0x1e, 0x40, 0xaf)))
                .rounding(8.0)
                .inner_margin(Margin::same(20.0))
                .show(&mut columns[1], |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        let (dot, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                        ui.painter().circle_filled(dot.center(), 6.0, GREEN_BRIGHT.gamma_multiply(pulse(ui.ctx())));
                        ui.label(RichText::new(content::COMMS_STATUS).monospace().color(GREEN_BRIGHT));
                    });
                    ui.label(RichText::new(content::COMMS_TEXT).color(BODY_TEXT));
                    for line in content::COMMS_LINES {
                        ui.label(RichText::new(line).monospace().color(BLUE_BRIGHT));
                    }
                });
        });
    });
}
