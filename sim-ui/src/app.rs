//! The single-window form.
//!
//! Two states: Idle (inputs editable, trigger enabled) and Running
//! (trigger disabled). The pipeline runs on a worker thread owning its
//! own tokio runtime and posts progress lines over an mpsc channel that
//! `update` drains, so the window stays responsive for the whole run.
//! The terminal event always flips back to Idle, whichever stage failed.

use eframe::egui;
use sim_core::{Config, Pipeline, RunContext, RunOutput};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

enum UiEvent {
    Progress(String),
    Finished(Result<RunOutput, String>),
}

pub struct SimApp {
    config: Config,
    city: String,
    email: String,
    log: Vec<String>,
    running: bool,
    tx: Sender<UiEvent>,
    rx: Receiver<UiEvent>,
}

impl SimApp {
    pub fn new(config: Config) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            config,
            city: String::new(),
            email: String::new(),
            log: Vec::new(),
            running: false,
            tx,
            rx,
        }
    }

    fn trigger(&mut self) {
        let city = self.city.trim().to_string();
        let destino = self.email.trim().to_string();

        if !inputs_valid(&city, &destino) {
            self.log.push("❌ Error: Datos inválidos.".to_string());
            return;
        }

        self.running = true;
        self.log.clear();

        let tx = self.tx.clone();
        let config = self.config.clone();
        thread::spawn(move || {
            let result = run_pipeline(config, city, destino, &tx);
            let _ = tx.send(UiEvent::Finished(result));
        });
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                UiEvent::Progress(line) => self.log.push(line),
                UiEvent::Finished(Ok(output)) => {
                    self.running = false;
                    self.log.push(String::new());
                    self.log.push("✅ ¡SISTEMA FINALIZADO CON ÉXITO!".to_string());
                    if let Err(e) = open::that(&output.map_path) {
                        tracing::warn!("could not open map in browser: {e}");
                    }
                }
                UiEvent::Finished(Err(message)) => {
                    self.running = false;
                    self.log.push(format!("❌ Error Crítico: {message}"));
                }
            }
        }
    }
}

impl eframe::App for SimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(egui::RichText::new("SISTEMA DE MOVILIDAD INTELIGENTE").strong());
                ui.add_space(10.0);

                ui.add_enabled(
                    !self.running,
                    egui::TextEdit::singleline(&mut self.city)
                        .hint_text("📍 Ciudad (Ej: Bogota)")
                        .desired_width(450.0),
                );
                ui.add_space(10.0);
                ui.add_enabled(
                    !self.running,
                    egui::TextEdit::singleline(&mut self.email)
                        .hint_text("📧 Correo destino")
                        .desired_width(450.0),
                );
                ui.add_space(20.0);

                let button = egui::Button::new(
                    egui::RichText::new("EJECUTAR ANÁLISIS").strong(),
                )
                .min_size(egui::vec2(220.0, 45.0));
                if ui.add_enabled(!self.running, button).clicked() {
                    self.trigger();
                }
                ui.add_space(10.0);
            });

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink(false)
                .show(ui, |ui| {
                    for line in &self.log {
                        ui.monospace(line);
                    }
                });
        });

        if self.running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Pre-flight validation: a city and something that looks like an email.
/// Rejections never start the pipeline or touch the network.
fn inputs_valid(city: &str, destino: &str) -> bool {
    !city.is_empty() && destino.contains('@')
}

fn run_pipeline(
    config: Config,
    city: String,
    destino: String,
    tx: &Sender<UiEvent>,
) -> Result<RunOutput, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("runtime: {e}"))?;

    let ctx = RunContext::new(city, destino);
    let progress_tx = tx.clone();
    let progress = move |line: String| {
        let _ = progress_tx.send(UiEvent::Progress(line));
    };

    runtime
        .block_on(Pipeline::new(config).run(&ctx, &progress))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_city() {
        assert!(!inputs_valid("", "a@b.com"));
    }

    #[test]
    fn test_rejects_destination_without_at() {
        assert!(!inputs_valid("Bogota", "not-an-email"));
    }

    #[test]
    fn test_accepts_city_and_addressish_destination() {
        assert!(inputs_valid("Bogota", "a@b.com"));
    }
}
