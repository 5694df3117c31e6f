mod logging;
mod native;
mod windows;

use std::ops::Range;
use std::time::Instant;

use eframe::{egui, App, Frame, NativeOptions};
use egui::text::CCursor;
use egui::text_edit::{CCursorRange, TextEditState};
use egui::{
    Align, Color32, FontFamily, FontId, Key, KeyboardShortcut, Layout, Modifiers, Stroke,
    ViewportCommand,
};
use once_cell::sync::Lazy;
use textpad_core::{
    AutoSaveOutcome, AutoSaveTimer, Command, CommandOutcome, MenuEntry, Session, APP_NAME,
    AUTO_SAVE_INTERVAL, MENU_BAR, SHORTCUTS,
};
use textpad_settings::{Color, EditorConfig, FontClass, FontSpec, ThemeKind};

use crate::logging::LoggingGuard;
use crate::native::NativeHost;
use crate::windows::{FindReplaceWindow, FontWindow};

static EDITOR_ID: Lazy<egui::Id> = Lazy::new(|| egui::Id::new("textpad_editor"));

struct TextPadApp {
    session: Session,
    host: NativeHost,
    auto_save: AutoSaveTimer,
    find_replace: FindReplaceWindow,
    font_window: FontWindow,
    /// Selection the editor widget should adopt on the next frame.
    pending_selection: Option<Range<usize>>,
    /// Transient message shown beside the counts in the status bar.
    notice: Option<String>,
    shown_title: String,
    shown_theme: Option<ThemeKind>,
    _logging: Option<LoggingGuard>,
}

impl TextPadApp {
    fn new(config: &EditorConfig, logging: Option<LoggingGuard>) -> Self {
        Self {
            session: Session::new(config),
            host: NativeHost::new(),
            auto_save: AutoSaveTimer::started(AUTO_SAVE_INTERVAL, Instant::now()),
            find_replace: FindReplaceWindow::default(),
            font_window: FontWindow::default(),
            pending_selection: None,
            notice: None,
            shown_title: String::new(),
            shown_theme: None,
            _logging: logging,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, command: Command) {
        let outcome = self.session.run(command, &mut self.host);
        match outcome {
            CommandOutcome::Quit => ctx.send_viewport_cmd(ViewportCommand::Close),
            CommandOutcome::ShowFindReplace => self.find_replace.open(),
            CommandOutcome::ShowFontPicker => self.font_window.open(self.session.font()),
            CommandOutcome::Done => {
                self.notice = None;
                if matches!(
                    command,
                    Command::Cut | Command::Paste | Command::SelectAll | Command::Undo | Command::Redo
                ) {
                    self.pending_selection = self.session.buffer().selection();
                }
            }
            CommandOutcome::Cancelled | CommandOutcome::Failed => {}
        }
    }

    fn take_shortcut(&self, ctx: &egui::Context) -> Option<Command> {
        ctx.input_mut(|input| {
            SHORTCUTS.iter().find_map(|(chord, command)| {
                let key = Key::from_name(&chord.key.to_string())?;
                let modifiers = if chord.shift {
                    Modifiers::COMMAND | Modifiers::SHIFT
                } else {
                    Modifiers::COMMAND
                };
                input
                    .consume_shortcut(&KeyboardShortcut::new(modifiers, key))
                    .then_some(*command)
            })
        })
    }

    fn poll_auto_save(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.auto_save.poll(now) {
            match self.session.auto_save_tick() {
                Ok(AutoSaveOutcome::Saved(_)) => self.notice = Some("Auto-saved".to_string()),
                Ok(AutoSaveOutcome::Disabled | AutoSaveOutcome::NoPath) => {}
                Err(err) => {
                    tracing::error!(error = %err, "auto-save failed");
                    self.notice = Some(format!("Auto-save failed: {err}"));
                }
            }
        }
        if let Some(remaining) = self.auto_save.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn sync_viewport(&mut self, ctx: &egui::Context) {
        let title = self.session.title();
        if title != self.shown_title {
            ctx.send_viewport_cmd(ViewportCommand::Title(title.clone()));
            self.shown_title = title;
        }

        let theme = self.session.theme();
        if self.shown_theme != Some(theme) {
            apply_theme(ctx, theme);
            self.shown_theme = Some(theme);
        }
    }

    fn show_menu_bar(&self, ctx: &egui::Context) -> Option<Command> {
        let mut clicked = None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                for section in MENU_BAR {
                    ui.menu_button(section.title, |ui| {
                        for entry in section.entries {
                            match entry {
                                MenuEntry::Separator => {
                                    ui.separator();
                                }
                                MenuEntry::Item(command) => {
                                    if self.menu_item(ui, *command) {
                                        clicked = Some(*command);
                                        ui.close_menu();
                                    }
                                }
                            }
                        }
                    });
                }
            });
        });
        clicked
    }

    fn menu_item(&self, ui: &mut egui::Ui, command: Command) -> bool {
        match command {
            Command::ToggleAutoSave => {
                let mut enabled = self.session.auto_save_enabled();
                ui.checkbox(&mut enabled, command.label()).clicked()
            }
            Command::SetTheme(kind) => ui
                .radio(self.session.theme() == kind, command.label())
                .clicked(),
            _ => {
                let mut button = egui::Button::new(command.label());
                if let Some(accelerator) = command.accelerator() {
                    button = button.shortcut_text(accelerator);
                }
                ui.add(button).clicked()
            }
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    ui.label(self.session.status_line());
                    if let Some(notice) = &self.notice {
                        ui.separator();
                        ui.label(notice.as_str());
                    }
                });
            });
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        let palette = self.session.theme().palette();
        let font = editor_font(self.session.font());

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(color32_from_color(palette.background)))
            .show(ctx, |ui| {
                if let Some(range) = self.pending_selection.take() {
                    let mut state = TextEditState::load(ui.ctx(), *EDITOR_ID).unwrap_or_default();
                    state.set_ccursor_range(Some(CCursorRange::two(
                        CCursor::new(range.start),
                        CCursor::new(range.end),
                    )));
                    state.store(ui.ctx(), *EDITOR_ID);
                    ui.ctx().memory_mut(|memory| memory.request_focus(*EDITOR_ID));
                }

                egui::ScrollArea::vertical().show(ui, |ui| {
                    let output = egui::TextEdit::multiline(self.session.buffer_mut().text_mut())
                        .id(*EDITOR_ID)
                        .font(font)
                        .text_color(color32_from_color(palette.foreground))
                        .frame(false)
                        .lock_focus(true)
                        .desired_width(f32::INFINITY)
                        .desired_rows(30)
                        .show(ui);

                    if output.response.changed() {
                        self.session.record_edit();
                    }
                    if let Some(cursor) = output.cursor_range {
                        self.session.buffer_mut().set_selection(Some(
                            cursor.primary.ccursor.index..cursor.secondary.ccursor.index,
                        ));
                    }
                });
            });
    }
}

impl App for TextPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if ctx.input(|input| input.viewport().close_requested()) {
            self.auto_save.cancel();
            tracing::info!("window closing");
        }

        if let Some(command) = self.take_shortcut(ctx) {
            self.dispatch(ctx, command);
        }
        if let Some(command) = self.show_menu_bar(ctx) {
            self.dispatch(ctx, command);
        }

        if self.find_replace.show(ctx, &mut self.session) {
            self.notice = None;
        }
        if self.font_window.show(ctx, &mut self.session) {
            self.notice = None;
        }

        self.poll_auto_save(ctx);
        self.sync_viewport(ctx);
        self.show_status_bar(ctx);
        self.show_editor(ctx);
    }
}

fn color32_from_color(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn editor_font(font: &FontSpec) -> FontId {
    let family = match font.class() {
        FontClass::Monospace => FontFamily::Monospace,
        FontClass::Proportional => FontFamily::Proportional,
    };
    FontId::new(font.size() as f32, family)
}

fn apply_theme(ctx: &egui::Context, theme: ThemeKind) {
    let palette = theme.palette();
    let mut visuals = match theme {
        ThemeKind::Dark => egui::Visuals::dark(),
        ThemeKind::Light => egui::Visuals::light(),
    };
    visuals.extreme_bg_color = color32_from_color(palette.background);
    visuals.text_cursor = Stroke::new(2.0, color32_from_color(palette.cursor));
    ctx.set_visuals(visuals);
    tracing::debug!(theme = theme.as_str(), "theme applied");
}

fn main() -> eframe::Result<()> {
    let logging = logging::init();

    let config = match EditorConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration, using defaults");
            EditorConfig::default()
        }
    };

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Untitled - {APP_NAME}"))
            .with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Box::new(TextPadApp::new(&config, logging))),
    )
}
