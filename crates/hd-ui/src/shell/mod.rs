//! Frame around the dock area: menu bar, status bar, command sidebar and notices

use std::time::{Duration, Instant};
use egui::{Context, RichText, SidePanel, TopBottomPanel};

use crate::icons;
use crate::theme::{self, SIDEBAR_BG, SIDEBAR_TEXT, STATUS_BAR_BG, STATUS_TEXT};

/// How long a notice stays on screen
const NOTICE_LIFETIME: Duration = Duration::from_secs(10);

/// Commands the shell can request from the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    RefreshDatabase,
    OpenImage,
    OpenDatabase,
    OpenCsv,
    GenerateSampleDatabase,
    Exit,
}

/// Text shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine {
    Initializing,
    Loading(String),
    Connected { records: usize },
    Failed(String),
}

impl StatusLine {
    pub fn text(&self) -> String {
        match self {
            StatusLine::Initializing => "Initializing...".to_string(),
            StatusLine::Loading(source) => format!("{} Loading {}...", icons::DATABASE, source),
            StatusLine::Connected { records } => {
                format!("{} DATABASE CONNECTED: {} Records", icons::CHECK, records)
            }
            StatusLine::Failed(message) => format!("{} {}", icons::WARNING, message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// User-visible message recorded by a failed or notable action
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
    pub timestamp: Instant,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            timestamp: Instant::now(),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.timestamp) >= NOTICE_LIFETIME
    }
}

/// Render the main menu bar
pub fn menu_bar(ctx: &Context) -> Option<ShellAction> {
    let mut action = None;
    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open SQLite Database...").clicked() {
                    action = Some(ShellAction::OpenDatabase);
                    ui.close_menu();
                }
                if ui.button("Open CSV...").clicked() {
                    action = Some(ShellAction::OpenCsv);
                    ui.close_menu();
                }
                if ui.button("Open Medical Image...").clicked() {
                    action = Some(ShellAction::OpenImage);
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Generate Sample Database").clicked() {
                    action = Some(ShellAction::GenerateSampleDatabase);
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Exit").clicked() {
                    action = Some(ShellAction::Exit);
                    ui.close_menu();
                }
            });
        });
    });
    action
}

/// Render the top status bar
pub fn status_bar(ctx: &Context, status: &StatusLine) {
    let color = match status {
        StatusLine::Connected { .. } => theme::success_color(),
        StatusLine::Failed(_) => theme::error_color(),
        _ => STATUS_TEXT,
    };

    TopBottomPanel::top("status_bar")
        .exact_height(36.0)
        .frame(egui::Frame::none().fill(STATUS_BAR_BG).inner_margin(egui::Margin::symmetric(20.0, 8.0)))
        .show(ctx, |ui| {
            ui.label(RichText::new(status.text()).color(color));
        });
}

/// Render the left command sidebar
pub fn command_sidebar(ctx: &Context) -> Option<ShellAction> {
    let mut action = None;
    SidePanel::left("command_sidebar")
        .exact_width(220.0)
        .resizable(false)
        .frame(egui::Frame::none().fill(SIDEBAR_BG).inner_margin(12.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("COMMAND CENTER").strong().color(SIDEBAR_TEXT));
                ui.add_space(16.0);

                let button = |text: String| {
                    egui::Button::new(RichText::new(text).strong().color(egui::Color32::WHITE))
                        .fill(theme::accent_color())
                        .min_size(egui::vec2(190.0, 36.0))
                };

                if ui.add(button(format!("{} REFRESH DATABASE", icons::REFRESH))).clicked() {
                    action = Some(ShellAction::RefreshDatabase);
                }
                ui.add_space(8.0);
                if ui.add(button(format!("{} OPEN MEDICAL IMAGE", icons::FOLDER))).clicked() {
                    action = Some(ShellAction::OpenImage);
                }
            });
        });
    action
}

/// Show notices, dropping the expired ones
pub fn show_notices(ui: &mut egui::Ui, notices: &mut Vec<Notice>) {
    let now = Instant::now();
    notices.retain(|notice| !notice.is_expired(now));

    for notice in notices.iter() {
        let color = match notice.level {
            NoticeLevel::Info => theme::success_color(),
            NoticeLevel::Warning => theme::warning_color(),
            NoticeLevel::Error => theme::error_color(),
        };
        egui::Frame::none()
            .fill(color.linear_multiply(0.2))
            .stroke(egui::Stroke::new(1.0, color))
            .rounding(4.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(icons::WARNING).color(color));
                    ui.label(RichText::new(&notice.title).strong());
                    ui.separator();
                    ui.label(&notice.message);
                });
            });
    }
}
