/// Chat transcript rendering
use crate::core::sources::is_safe_url;
use crate::core::{Message, Role};
use eframe::egui;

pub const BUBBLE_ROUNDING: f32 = 10.0;
pub const MAX_SOURCE_LINKS: usize = 3;

const USER_FILL: egui::Color32 = egui::Color32::from_rgb(38, 52, 78);
const ASSISTANT_FILL: egui::Color32 = egui::Color32::from_rgb(30, 30, 30);
const ROLE_COLOR: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);

/// Draws every message, oldest first, plus the pending question while a
/// reply is in flight.
pub fn draw_messages(ui: &mut egui::Ui, messages: &[Message], pending: Option<&str>, app_name: &str) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                draw_bubble(ui, message, app_name);
                ui.add_space(8.0);
            }

            if let Some(question) = pending {
                draw_text_bubble(ui, Role::User, question, app_name);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Thinking...").color(ROLE_COLOR));
                });
            }
        });
}

fn draw_bubble(ui: &mut egui::Ui, message: &Message, app_name: &str) {
    let frame = bubble_frame(message.role);
    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        role_header(ui, message.role, app_name);
        ui.label(&message.content);

        if message.role == Role::Assistant {
            ui.horizontal_wrapped(|ui| {
                if ui.small_button("Copy").clicked() {
                    ui.ctx().copy_text(message.content.clone());
                }
                draw_sources(ui, &message.sources);
                ui.label(
                    egui::RichText::new(message.timestamp.format("%H:%M").to_string())
                        .small()
                        .color(ROLE_COLOR),
                );
            });
        }
    });
}

fn draw_text_bubble(ui: &mut egui::Ui, role: Role, text: &str, app_name: &str) {
    bubble_frame(role).show(ui, |ui| {
        ui.set_width(ui.available_width());
        role_header(ui, role, app_name);
        ui.label(text);
    });
}

fn bubble_frame(role: Role) -> egui::Frame {
    let fill = match role {
        Role::User => USER_FILL,
        Role::Assistant => ASSISTANT_FILL,
    };
    egui::Frame::NONE
        .fill(fill)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(egui::Margin::same(10))
}

fn role_header(ui: &mut egui::Ui, role: Role, app_name: &str) {
    let label = match role {
        Role::User => "👤 You",
        Role::Assistant => "🤖",
    };
    let text = match role {
        Role::User => label.to_string(),
        Role::Assistant => format!("{label} {app_name}"),
    };
    ui.label(egui::RichText::new(text).small().strong().color(ROLE_COLOR));
}

/// Up to three links, only for http(s) URLs. Anything else is not rendered.
fn draw_sources(ui: &mut egui::Ui, sources: &[String]) {
    let safe = renderable_sources(sources);
    if safe.is_empty() {
        return;
    }

    ui.label(egui::RichText::new("Sources:").small().strong());
    for (idx, url) in safe.into_iter().enumerate() {
        ui.hyperlink_to(format!("Link {}", idx + 1), url)
            .on_hover_text(url);
    }
}

pub fn renderable_sources(sources: &[String]) -> Vec<&str> {
    sources
        .iter()
        .map(String::as_str)
        .filter(|s| is_safe_url(s))
        .take(MAX_SOURCE_LINKS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_at_most_three_safe_links() {
        let sources: Vec<String> = [
            "javascript:alert(1)",
            "https://a.example",
            "https://b.example",
            "ftp://c.example",
            "https://d.example",
            "https://e.example",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(
            renderable_sources(&sources),
            vec!["https://a.example", "https://b.example", "https://d.example"]
        );
    }
}
