/// Main application structure and lifecycle management
use super::chat;
use crate::config::Config;
use crate::core::{Conversation, Responder};
use eframe::egui;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;

pub struct ChatApp {
    config: Config,
    responder: Arc<Responder>,
    conversation: Conversation,
    input_text: String,
    /// Question currently being answered, if any
    pending: Option<String>,
    response_receiver: std_mpsc::Receiver<Conversation>,
    response_sender: std_mpsc::Sender<Conversation>,
}

impl ChatApp {
    pub fn new(config: Config, responder: Arc<Responder>) -> Self {
        let (sender, receiver) = std_mpsc::channel();

        Self {
            config,
            responder,
            conversation: Conversation::new(),
            input_text: String::new(),
            pending: None,
            response_receiver: receiver,
            response_sender: sender,
        }
    }

    fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands the conversation to the responder on the tokio runtime; the
    /// updated conversation comes back through the channel.
    fn send_message(&mut self, ctx: &egui::Context) {
        let user_input = self.input_text.trim().to_string();
        if user_input.is_empty() || self.is_thinking() {
            return;
        }
        self.input_text.clear();
        self.pending = Some(user_input.clone());

        let responder = Arc::clone(&self.responder);
        let snapshot = self.conversation.clone();
        let sender = self.response_sender.clone();
        let ctx_clone = ctx.clone();

        tokio::spawn(async move {
            let updated = responder.process_turn(snapshot, &user_input).await;
            if let Err(e) = sender.send(updated) {
                log::error!("Could not deliver reply to the UI: {e}");
            }
            ctx_clone.request_repaint();
        });
    }

    fn poll_responses(&mut self) {
        while let Ok(updated) = self.response_receiver.try_recv() {
            self.conversation = updated;
            self.pending = None;
        }
    }

    fn clear(&mut self) {
        self.conversation.clear();
        self.input_text.clear();
        log::info!("🗑️ Conversation cleared");
    }

    fn draw_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(format!("🌏 {}", self.config.app_name));
                ui.label(
                    egui::RichText::new(format!("{} local answers", self.responder.seed_count()))
                        .small()
                        .weak(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let clear = ui.add_enabled(!self.is_thinking(), egui::Button::new("Clear"));
                    if clear.clicked() {
                        self.clear();
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn draw_input(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("input").show(ctx, |ui| {
            ui.add_space(6.0);
            let mut submit = false;
            ui.horizontal(|ui| {
                let send_width = 64.0;
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input_text)
                        .hint_text("Type your message here... I understand any language! 🌍")
                        .desired_width(ui.available_width() - send_width),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                    response.request_focus();
                }

                let can_send = !self.is_thinking() && !self.input_text.trim().is_empty();
                if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                    submit = true;
                }
            });
            if submit {
                self.send_message(ctx);
            }
            ui.add_space(6.0);
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_responses();

        self.draw_header(ctx);
        self.draw_input(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.conversation.is_empty() && !self.is_thinking() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(egui::RichText::new("Ask me about Bengal, its festivals, food and places.").weak());
                });
                return;
            }

            chat::draw_messages(
                ui,
                self.conversation.messages(),
                self.pending.as_deref(),
                &self.config.app_name,
            );
        });
    }
}
