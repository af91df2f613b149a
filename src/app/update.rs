use eframe::egui;

use super::SlideApp;
use super::render::{draw_background, draw_objects};

/// Keyboard shortcuts pressed this frame.
///
/// Reading consumes the keys under egui's input lock; the matching actions
/// load textures and must run only after that lock is released.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Shortcuts {
    save: bool,
    open: bool,
    delete: bool,
}

impl Shortcuts {
    fn read(ctx: &egui::Context) -> Self {
        // Delete and Backspace belong to a focused text field when there is one.
        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| Self {
            save: i.consume_key(egui::Modifiers::COMMAND, egui::Key::S),
            open: i.consume_key(egui::Modifiers::COMMAND, egui::Key::O),
            delete: !wants_keyboard
                && (i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                    || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)),
        })
    }
}

impl eframe::App for SlideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let shortcuts = Shortcuts::read(ctx);
        if shortcuts.save {
            self.save_to_path();
        }
        if shortcuts.open {
            self.open_project_dialog();
        }
        if shortcuts.delete {
            self.remove_active();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open... (⌘O)").clicked() {
                        self.open_project_dialog();
                        ui.close();
                    }
                    if ui.button("Save (⌘S)").clicked() {
                        self.save_to_path();
                        ui.close();
                    }
                    if ui.button("Save As...").clicked() {
                        self.save_project_dialog();
                        ui.close();
                    }
                    ui.separator();
                    ui.small("Project path:");
                    if ui.text_edit_singleline(&mut self.project_path).lost_focus() {
                        self.persist_settings();
                    }
                });
                ui.separator();
                if ui.button("Add SVG").clicked() {
                    self.add_svg_dialog();
                }
                if ui
                    .add_enabled(self.canvas.active().is_some(), egui::Button::new("Remove"))
                    .clicked()
                {
                    self.remove_active();
                }
                let mut crop_mode = self.canvas.crop_mode();
                if ui.checkbox(&mut crop_mode, "Crop mode").changed() {
                    self.canvas.cancel_gesture();
                    self.canvas.set_crop_mode(crop_mode);
                }
            });
        });

        egui::SidePanel::left("slides")
            .resizable(false)
            .default_width(140.0)
            .show(ctx, |ui| {
                ui.heading("Slides");
                ui.separator();
                let current = self.project.current_index();
                let mut target = None;
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (index, slide) in self.project.slides().iter().enumerate() {
                        if ui.selectable_label(index == current, slide.title.as_str()).clicked() {
                            target = Some(index);
                        }
                    }
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("+").on_hover_text("Add slide").clicked() {
                        self.add_slide();
                    }
                    if ui.button("−").on_hover_text("Remove slide").clicked() {
                        self.remove_current_slide();
                    }
                });
                if let Some(index) = target {
                    self.switch_slide(index);
                }
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Objects: {}", self.canvas.len()));
                    ui.separator();
                    ui.label(format!(
                        "Slide {}/{}",
                        self.project.current_index() + 1,
                        self.project.slides().len()
                    ));
                    if self.canvas.crop_mode() {
                        ui.separator();
                        ui.label("Crop mode");
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (area, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let (slide, scale) = self.slide_screen_rect(area);
            let origin = slide.min;

            self.route_pointer(ctx, &response, origin, scale);
            self.update_cursor(ctx, origin, scale);

            let painter = ui.painter_at(area);
            draw_background(&painter, area, slide);
            draw_objects(&painter, origin, scale, &self.canvas, &self.textures);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::textures::SvgTextures;
    use crate::surface::VectorSurface;

    fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn frame_with(events: Vec<egui::Event>, mut body: impl FnMut(&egui::Context)) {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| body(ctx));
    }

    #[test]
    fn reads_each_shortcut_once() {
        let mut seen = Vec::new();
        frame_with(
            vec![
                key(egui::Key::S, egui::Modifiers::COMMAND),
                key(egui::Key::Delete, egui::Modifiers::NONE),
            ],
            |ctx| {
                seen.push(Shortcuts::read(ctx));
                seen.push(Shortcuts::read(ctx));
            },
        );
        assert_eq!(
            seen,
            [
                Shortcuts {
                    save: true,
                    open: false,
                    delete: true
                },
                Shortcuts::default(),
            ]
        );
    }

    #[test]
    fn unmodified_letters_are_not_shortcuts() {
        let mut seen = None;
        frame_with(
            vec![
                key(egui::Key::O, egui::Modifiers::NONE),
                key(egui::Key::S, egui::Modifiers::SHIFT),
            ],
            |ctx| seen = Some(Shortcuts::read(ctx)),
        );
        assert_eq!(seen, Some(Shortcuts::default()));
    }

    #[test]
    fn textures_load_after_open_shortcut() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.svg");
        std::fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30"><rect width="10" height="10"/></svg>"#,
        )
        .unwrap();

        let mut loaded = None;
        frame_with(vec![key(egui::Key::O, egui::Modifiers::COMMAND)], |ctx| {
            let shortcuts = Shortcuts::read(ctx);
            assert!(shortcuts.open);
            // the input lock is gone, so uploading a texture cannot block
            let mut textures = SvgTextures::new(ctx.clone());
            loaded = Some(textures.load(&path).map(|size| (size, textures.get(&path).is_some())));
        });
        let (size, cached) = loaded.unwrap().unwrap();
        assert_eq!((size.width, size.height), (40.0, 30.0));
        assert!(cached);
    }
}
