//! Non-modal tool windows for find & replace and font selection.

use eframe::egui;
use textpad_core::Session;
use textpad_search::{SearchMode, SearchOptions};
use textpad_settings::{FontSpec, MAX_FONT_SIZE, MIN_FONT_SIZE};

pub struct FindReplaceWindow {
    open: bool,
    find: String,
    replacement: String,
    match_case: bool,
    regex: bool,
    result: Option<String>,
}

impl Default for FindReplaceWindow {
    fn default() -> Self {
        Self {
            open: false,
            find: String::new(),
            replacement: String::new(),
            match_case: true,
            regex: false,
            result: None,
        }
    }
}

impl FindReplaceWindow {
    pub fn open(&mut self) {
        self.open = true;
        self.result = None;
    }

    fn options(&self) -> SearchOptions {
        let mode = if self.regex {
            SearchMode::Regex
        } else {
            SearchMode::Plain
        };
        SearchOptions::literal(self.find.clone())
            .with_mode(mode)
            .with_case_sensitive(self.match_case)
    }

    /// Returns `true` when the buffer was rewritten.
    pub fn show(&mut self, ctx: &egui::Context, session: &mut Session) -> bool {
        if !self.open {
            return false;
        }
        let mut open = self.open;
        let mut replaced = false;
        egui::Window::new("Find & Replace")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("find_replace_grid")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Find:");
                        ui.text_edit_singleline(&mut self.find);
                        ui.end_row();
                        ui.label("Replace:");
                        ui.text_edit_singleline(&mut self.replacement);
                        ui.end_row();
                    });
                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.match_case, "Match case");
                    ui.checkbox(&mut self.regex, "Regular expression");
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Replace").clicked() {
                        replaced = self.replace(session);
                    }
                    if let Some(result) = &self.result {
                        ui.label(result.as_str());
                    }
                });
            });
        self.open = open;
        replaced
    }

    fn replace(&mut self, session: &mut Session) -> bool {
        if self.find.is_empty() {
            self.result = None;
            return false;
        }
        match session.replace_with(&self.options(), &self.replacement) {
            Ok(0) => {
                self.result = Some("No matches".to_string());
                false
            }
            Ok(count) => {
                self.result = Some(format!("Replaced {count} occurrence(s)"));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "replace failed");
                self.result = Some(err.to_string());
                false
            }
        }
    }
}

pub struct FontWindow {
    open: bool,
    family: String,
    size: u32,
    error: Option<String>,
}

impl Default for FontWindow {
    fn default() -> Self {
        let font = FontSpec::default();
        Self {
            open: false,
            family: font.family().to_string(),
            size: font.size(),
            error: None,
        }
    }
}

impl FontWindow {
    /// Opens the window pre-filled with the current font.
    pub fn open(&mut self, current: &FontSpec) {
        self.open = true;
        self.family = current.family().to_string();
        self.size = current.size();
        self.error = None;
    }

    /// Returns `true` when a new font was applied.
    pub fn show(&mut self, ctx: &egui::Context, session: &mut Session) -> bool {
        if !self.open {
            return false;
        }
        let mut open = self.open;
        let mut applied = false;
        egui::Window::new("Font")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("font_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Font name:");
                    ui.text_edit_singleline(&mut self.family);
                    ui.end_row();
                    ui.label("Font size:");
                    ui.add(
                        egui::DragValue::new(&mut self.size)
                            .clamp_range(MIN_FONT_SIZE..=MAX_FONT_SIZE)
                            .speed(0.2),
                    );
                    ui.end_row();
                });
                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error.as_str());
                }
                ui.separator();
                if ui.button("Apply").clicked() {
                    match session.apply_font(&self.family, self.size) {
                        Ok(()) => {
                            applied = true;
                            self.error = None;
                        }
                        Err(err) => self.error = Some(err.to_string()),
                    }
                }
            });
        self.open = open && !applied;
        applied
    }
}
