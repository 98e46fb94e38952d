use crate::atelier::{AtelierSession, CreativeMode};
use crate::catalog::catalogue;
use crate::error::KioskError;
use crate::event::AppEvent;
use crate::guide::GuideClient;
use crate::session::store::{Completion, SessionStore};
use crate::theme::Theme;
use crate::ui::event::UiAction;
use crate::ui::response::NavigationResponse;
use crate::ui::router::{self, ScreenRenderer};
use crate::ui::screens::ScreenView;
use eframe::egui::{self, Color32, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{SystemTime, UNIX_EPOCH};

pub const FINISHED_MESSAGE: &str =
    "Mon œuvre est terminée. Propose-moi d'aller au mur de souvenirs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtelierSync {
    Keep,
    Create,
    Drop,
}

/// The atelier session exists exactly while the atelier screen is routed. A
/// reply explicitly naming the other creative mode starts a fresh canvas.
fn atelier_sync(
    renderer: ScreenRenderer,
    current: Option<CreativeMode>,
    response: &NavigationResponse,
) -> AtelierSync {
    let requested = CreativeMode::explicit(response.context.mode.as_deref());
    match (renderer, current) {
        (ScreenRenderer::Atelier, None) => AtelierSync::Create,
        (ScreenRenderer::Atelier, Some(mode)) if requested.is_some_and(|next| next != mode) => {
            AtelierSync::Create
        }
        (ScreenRenderer::Atelier, Some(_)) => AtelierSync::Keep,
        (_, Some(_)) => AtelierSync::Drop,
        (_, None) => AtelierSync::Keep,
    }
}

pub struct KioskApp {
    rx: Receiver<AppEvent>,
    guide: GuideClient,
    store: SessionStore,
    atelier: Option<AtelierSession>,
    chat_input: String,
    export_error: Option<String>,
    diagnostics_log: Vec<String>,
    theme: Theme,
}

impl KioskApp {
    pub fn new(rx: Receiver<AppEvent>, guide: GuideClient, store: SessionStore) -> Self {
        let mut app = Self {
            rx,
            guide,
            store,
            atelier: None,
            chat_input: String::new(),
            export_error: None,
            diagnostics_log: Vec::new(),
            theme: Theme::default(),
        };
        if !app.guide.is_configured() {
            app.log_diagnostic("no API key configured; offline replies only");
        }
        app
    }

    /// One-time context setup: kiosk visuals and the SVG image loader.
    pub fn install(&self, ctx: &egui::Context) {
        egui_extras::install_image_loaders(ctx);
        self.theme.apply_visuals(ctx);
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn guide_label(&self) -> (&'static str, Color32) {
        if self.store.is_loading() {
            ("Marcelle réfléchit…", self.theme.highlight)
        } else if self.guide.is_configured() {
            ("Guide en ligne", Color32::LIGHT_GREEN)
        } else {
            ("Mode hors ligne", Color32::GRAY)
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::GuideReplied {
                generation,
                message,
                result,
            } => {
                let failure = result.as_ref().err().map(|err| err.to_string());
                match self.store.complete(generation, result) {
                    Completion::Applied => self.log_diagnostic(format!(
                        "reply #{generation} -> {}",
                        self.store.screen()
                    )),
                    Completion::FellBack => self.log_diagnostic(format!(
                        "reply #{generation} failed ({}); offline reply for \"{message}\"",
                        failure.unwrap_or_default()
                    )),
                    Completion::Stale => {
                        self.log_diagnostic(format!("reply #{generation} discarded as stale"))
                    }
                }
            }
        }
    }

    fn submit(&mut self, message: &str, ctx: &egui::Context) {
        match self.store.send_message(message) {
            Some(request) => self.guide.send(request, ctx),
            None => tracing::debug!(loading = self.store.is_loading(), "message ignored"),
        }
    }

    fn handle_action(&mut self, action: UiAction, ctx: &egui::Context) {
        tracing::info!(action = %action.to_log_line(), "ui action");
        match action {
            UiAction::Submit(message) => self.submit(&message, ctx),
            UiAction::FinishCreation => self.finish_creation(ctx),
        }
    }

    fn finish_creation(&mut self, ctx: &egui::Context) {
        let Some(session) = self.atelier.as_mut() else {
            self.log_diagnostic("finish requested without an atelier session");
            return;
        };
        match session.finish() {
            Ok(data_uri) => {
                self.export_error = None;
                let index = self.store.save_creation(data_uri);
                self.log_diagnostic(format!("creation #{index} saved"));
                self.submit(FINISHED_MESSAGE, ctx);
            }
            Err(err) => {
                let err = KioskError::from(err);
                tracing::warn!(%err, "creation export failed");
                self.export_error =
                    Some("Impossible d'enregistrer la création. Réessaie.".to_string());
                self.log_diagnostic(err.to_string());
            }
        }
    }

    fn reset(&mut self) {
        self.store.reset();
        self.atelier = None;
        self.chat_input.clear();
        self.export_error = None;
        self.log_diagnostic("session reset");
    }

    fn sync_atelier(&mut self, renderer: ScreenRenderer) {
        let current = self.atelier.as_ref().map(AtelierSession::mode);
        match atelier_sync(renderer, current, self.store.response()) {
            AtelierSync::Keep => {}
            AtelierSync::Create => {
                self.atelier = Some(AtelierSession::from_response(
                    self.store.response(),
                    catalogue(),
                ));
                self.export_error = None;
            }
            AtelierSync::Drop => {
                tracing::debug!("atelier session discarded");
                self.atelier = None;
                self.export_error = None;
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let (status_label, status_color) = self.guide_label();
        let mut reset = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(RichText::new("Éclat").size(22.0));
                ui.separator();
                ui.label(RichText::new(status_label).color(status_color));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset = ui.button("Recommencer").clicked();
                });
            });
        });
        if reset {
            self.reset();
        }
    }

    fn render_diagnostics(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("diagnostics").show(ctx, |ui| {
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    if let Some(error) = self.store.last_error() {
                        ui.label(
                            RichText::new(format!("last guide error: {error}"))
                                .color(self.theme.danger),
                        );
                    }
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &self.diagnostics_log {
                                ui.label(entry);
                            }
                        });
                });
        });
    }

    fn render_center_panel(&mut self, ctx: &egui::Context) {
        let renderer = router::route(self.store.screen());
        self.sync_atelier(renderer);

        let mut actions = Vec::new();
        let frame = egui::Frame::central_panel(&ctx.style())
            .inner_margin(egui::Margin::same(self.theme.spacing_24 as i8));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let mut view = ScreenView {
                theme: &self.theme,
                response: self.store.response(),
                catalogue: catalogue(),
                creations: self.store.creations(),
                transcript: self.store.dialogue().collect(),
                atelier: self.atelier.as_mut(),
                chat_input: &mut self.chat_input,
                export_error: self.export_error.as_deref(),
                loading: self.store.is_loading(),
            };
            let mut emit = |action: UiAction| actions.push(action);
            router::render(renderer, ui, &mut view, &mut emit);
        });

        for action in actions {
            self.handle_action(action, ctx);
        }
    }
}

impl eframe::App for KioskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.render_top_bar(ctx);
        self.render_diagnostics(ctx);
        self.render_center_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::response::{ResponseContext, ScreenId};

    fn atelier_reply(mode: Option<&str>) -> NavigationResponse {
        NavigationResponse::new(ScreenId::Atelier, "", "", &[]).with_context(ResponseContext {
            mode: mode.map(str::to_string),
            ..ResponseContext::default()
        })
    }

    #[test]
    fn atelier_session_follows_the_routed_screen() {
        let reply = atelier_reply(Some("vitrail"));
        assert_eq!(
            atelier_sync(ScreenRenderer::Atelier, None, &reply),
            AtelierSync::Create
        );
        assert_eq!(
            atelier_sync(
                ScreenRenderer::Atelier,
                Some(CreativeMode::Geometric),
                &reply
            ),
            AtelierSync::Keep
        );
        assert_eq!(
            atelier_sync(
                ScreenRenderer::Souvenirs,
                Some(CreativeMode::Geometric),
                &reply
            ),
            AtelierSync::Drop
        );
        assert_eq!(
            atelier_sync(ScreenRenderer::Home, None, &reply),
            AtelierSync::Keep
        );
    }

    #[test]
    fn switching_creative_mode_starts_a_fresh_canvas() {
        assert_eq!(
            atelier_sync(
                ScreenRenderer::Atelier,
                Some(CreativeMode::Geometric),
                &atelier_reply(Some("peinture"))
            ),
            AtelierSync::Create
        );
        assert_eq!(
            atelier_sync(
                ScreenRenderer::Atelier,
                Some(CreativeMode::Freehand),
                &atelier_reply(None)
            ),
            AtelierSync::Keep
        );
    }

    #[test]
    fn non_mode_hints_keep_the_current_canvas() {
        for hint in ["libre", "parcours"] {
            assert_eq!(
                atelier_sync(
                    ScreenRenderer::Atelier,
                    Some(CreativeMode::Freehand),
                    &atelier_reply(Some(hint))
                ),
                AtelierSync::Keep,
                "hint {hint} should not replace a freehand canvas"
            );
        }
    }
}
