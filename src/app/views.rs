//! Inbox rendering: folder sidebar, message banner, mail table, toast

use super::App;
use crate::mail;
use crate::theme;
use crate::types::FetchState;
use eframe::egui;

impl App {
    pub fn render_views(&mut self, ctx: &egui::Context) {
        self.render_folder_sidebar(ctx);
        self.render_main_panel(ctx);
        self.render_toast(ctx);
    }

    /// Left sidebar with the inbox folder list (must be added before the
    /// central panel).
    fn render_folder_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("folder_panel")
            .exact_width(180.0)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(8)),
            )
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("INBOX")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
                ui.add_space(8.0);

                let mut clicked = None;
                for (idx, folder) in mail::FOLDERS.iter().enumerate() {
                    let selected = idx == self.selected_folder;
                    let text = if selected {
                        egui::RichText::new(folder.label)
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_PRIMARY)
                    } else {
                        egui::RichText::new(folder.label)
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_SECONDARY)
                    };
                    if ui
                        .add_sized(
                            egui::vec2(ui.available_width(), 26.0),
                            egui::SelectableLabel::new(selected, text),
                        )
                        .clicked()
                    {
                        clicked = Some(idx);
                    }
                }
                if let Some(idx) = clicked {
                    self.select_folder(idx);
                }
            });
    }

    /// Central panel: fetched message banner above the mail table.
    fn render_main_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.render_message_banner(ui, ctx);
                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_MD);
                self.render_mail_table(ui);
            });
    }

    /// Fetch lifecycle banner: spinner while loading, the message once
    /// loaded, the failure reason with a retry control otherwise.
    fn render_message_banner(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let state = self.fetch_state();

        ui.horizontal(|ui| {
            match &state {
                FetchState::Loading => {
                    ui.add(egui::Spinner::new().size(16.0).color(theme::ACCENT));
                    ui.label(
                        egui::RichText::new(state.display_text())
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_DIM),
                    );
                }
                FetchState::Loaded(_) => {
                    ui.label(
                        egui::RichText::new(state.display_text())
                            .size(theme::FONT_HEADING)
                            .color(theme::TEXT_PRIMARY),
                    );
                }
                FetchState::Failed(_) => {
                    ui.label(
                        egui::RichText::new(state.display_text())
                            .size(theme::FONT_BODY)
                            .color(theme::STATUS_ERROR),
                    );
                    if ui.button("Retry").clicked() {
                        self.remount(ctx);
                    }
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(self.api_url.as_str())
                        .size(theme::FONT_CAPTION)
                        .color(theme::TEXT_DIM),
                );
            });
        });
    }

    /// Mail entries for the selected folder (fixture data).
    fn render_mail_table(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        let row_height = 26.0;
        let mut clicked = None;

        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .min_scrolled_height(0.0);

        for _ in 0..mail::COLUMN_TITLES.len() - 1 {
            table = table.column(Column::auto().clip(true));
        }
        table = table.column(Column::remainder().clip(true));

        table
            .header(24.0, |mut header| {
                for title in mail::COLUMN_TITLES {
                    header.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(title)
                                    .size(theme::FONT_SECTION)
                                    .strong()
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });
                }
            })
            .body(|mut body| {
                body.rows(row_height, mail::SAMPLE_ENTRIES.len(), |mut row| {
                    let idx = row.index();
                    let entry = &mail::SAMPLE_ENTRIES[idx];
                    row.set_selected(self.selected_entry == Some(idx));

                    for text in entry.columns() {
                        row.col(|ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(text).size(theme::FONT_LABEL),
                                )
                                .truncate()
                                .selectable(false),
                            );
                        });
                    }

                    if row.response().clicked() {
                        clicked = Some(idx);
                    }
                });
            });

        if let Some(idx) = clicked {
            self.select_entry(idx);
        }
    }

    /// Transient notification shown bottom-right for a few seconds.
    fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };

        let elapsed = self
            .toast_start
            .map(|t| t.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        if elapsed >= 3.0 {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::BG_SURFACE)
                    .stroke(egui::Stroke::new(
                        theme::STROKE_DEFAULT,
                        theme::BORDER_SUBTLE,
                    ))
                    .corner_radius(theme::RADIUS_DEFAULT)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(msg)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_PRIMARY),
                        );
                    });
            });
        ctx.request_repaint();
    }
}
