use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub surface_3: Color32,
    pub accent_primary: Color32,
    pub accent_muted: Color32,
    pub highlight: Color32,
    pub voice: Color32,
    pub danger: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub border_subtle: Color32,
    pub selection_outline: Color32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub spacing_24: f32,
    pub radius_12: u8,
    pub radius_16: u8,
    /// Touch targets are at least this tall.
    pub button_height: f32,
    pub footer_height: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0x11, 0x18, 0x27),
            surface_1: Color32::from_rgb(0x1F, 0x29, 0x37),
            surface_2: Color32::from_rgb(0x37, 0x41, 0x51),
            surface_3: Color32::from_rgb(0x4B, 0x55, 0x63),
            accent_primary: Color32::from_rgb(0xF5, 0x9E, 0x0B),
            accent_muted: Color32::from_rgb(0xD9, 0x77, 0x06),
            highlight: Color32::from_rgb(0xFA, 0xCC, 0x15),
            voice: Color32::from_rgb(0x67, 0xE8, 0xF9),
            danger: Color32::from_rgb(0xEF, 0x44, 0x44),
            text_primary: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            text_muted: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            text_on_accent: Color32::from_rgb(0x11, 0x18, 0x27),
            border_subtle: Color32::from_rgba_premultiplied(255, 255, 255, 20),
            selection_outline: Color32::from_rgb(0xFA, 0xCC, 0x15),
            spacing_8: 8.0,
            spacing_12: 12.0,
            spacing_16: 16.0,
            spacing_24: 24.0,
            radius_12: 12,
            radius_16: 16,
            button_height: 48.0,
            footer_height: 72.0,
        }
    }
}

impl Theme {
    /// Kiosk style: dark gallery surfaces, large text, finger-sized targets.
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.surface_0;
        visuals.window_fill = self.surface_1;
        visuals.window_stroke = Stroke::NONE;
        visuals.window_corner_radius = CornerRadius::same(self.radius_12);
        visuals.override_text_color = Some(self.text_primary);
        visuals.selection.bg_fill = self.accent_muted;

        let widgets = &mut visuals.widgets;
        for (state, fill) in [
            (&mut widgets.noninteractive, self.surface_1),
            (&mut widgets.inactive, self.surface_2),
            (&mut widgets.hovered, self.surface_3),
            (&mut widgets.active, self.accent_muted),
        ] {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.bg_stroke = Stroke::NONE;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(self.spacing_12, self.spacing_12);
        style.spacing.button_padding = egui::vec2(18.0, self.spacing_12);
        style.spacing.interact_size.y = self.button_height;
        for (text_style, size) in [
            (TextStyle::Heading, 32.0),
            (TextStyle::Body, 18.0),
            (TextStyle::Button, 18.0),
            (TextStyle::Small, 13.0),
        ] {
            style.text_styles.insert(text_style, FontId::proportional(size));
        }
        ctx.set_style(style);
    }

    pub fn panel_frame(&self, fill: Color32, inner_padding: i8) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(inner_padding))
            .corner_radius(CornerRadius::same(self.radius_16))
            .stroke(Stroke::NONE)
            .shadow(egui::epaint::Shadow {
                offset: [0, 4],
                blur: 18,
                spread: 0,
                color: Color32::from_rgba_premultiplied(0, 0, 0, 60),
            })
    }

    pub fn card_frame(&self) -> Frame {
        self.panel_frame(self.surface_1, self.spacing_16 as i8)
    }

    pub fn bubble_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_2)
            .inner_margin(Margin::symmetric(self.spacing_16 as i8, self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::NONE)
    }

    pub fn chip_button(&self, label: &str) -> egui::Button<'static> {
        egui::Button::new(egui::RichText::new(label.to_string()).color(self.text_primary))
            .fill(self.surface_2)
            .stroke(Stroke::new(1.0, self.border_subtle))
            .corner_radius(CornerRadius::same(self.radius_16 * 2))
            .min_size(egui::vec2(0.0, self.button_height))
    }

    pub fn primary_button(&self, label: &str) -> egui::Button<'static> {
        egui::Button::new(
            egui::RichText::new(label.to_string())
                .color(self.text_on_accent)
                .strong(),
        )
        .fill(self.accent_primary)
        .stroke(Stroke::NONE)
        .corner_radius(CornerRadius::same(self.radius_12))
        .min_size(egui::vec2(0.0, self.button_height))
    }
}

/// Parses `#RRGGBB` or `#RGB`. Anything else is `None`.
pub fn parse_hex_color(raw: &str) -> Option<Color32> {
    let hex = raw.trim().strip_prefix('#')?;
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let expand = |digit: &str| channel(digit).map(|value| value * 17);
            Some(Color32::from_rgb(
                expand(hex.get(0..1)?)?,
                expand(hex.get(1..2)?)?,
                expand(hex.get(2..3)?)?,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex_color("#EF4444"), Some(Color32::from_rgb(0xEF, 0x44, 0x44)));
        assert_eq!(parse_hex_color(" #fff "), Some(Color32::WHITE));
        assert_eq!(parse_hex_color("#000"), Some(Color32::BLACK));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(parse_hex_color("EF4444"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#éé"), None);
    }
}
