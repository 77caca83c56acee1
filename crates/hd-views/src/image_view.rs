//! Texture-backed image panel

use egui::{ColorImage, TextureHandle, TextureOptions, Ui};
use hd_imaging::{DisplayImage, ImageBuffer};

/// Shows one image buffer. The texture is (re)uploaded lazily on the next
/// frame after an update.
pub struct ImagePanel {
    title: String,
    image: Option<DisplayImage>,
    caption: String,
    texture: Option<TextureHandle>,
    dirty: bool,
}

impl ImagePanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image: None,
            caption: String::new(),
            texture: None,
            dirty: false,
        }
    }

    pub fn update(&mut self, buffer: &ImageBuffer) {
        self.caption = format!("{} ({}x{})", buffer.kind.label(), buffer.width(), buffer.height());
        self.image = Some(DisplayImage::from_buffer(buffer));
        self.dirty = true;
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| ui.heading(&self.title));

        let Some(image) = &self.image else {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(egui::RichText::new("No image loaded").weak());
            });
            return;
        };

        if self.dirty || self.texture.is_none() {
            let color_image = ColorImage::from_rgb(image.size(), &image.rgb);
            self.texture = Some(ui.ctx().load_texture(
                format!("image_panel_{}", self.title),
                color_image,
                TextureOptions::NEAREST,
            ));
            self.dirty = false;
        }

        if let Some(texture) = &self.texture {
            ui.add(egui::Image::new(texture).shrink_to_fit());
        }
        ui.vertical_centered(|ui| ui.label(&self.caption));
    }
}
