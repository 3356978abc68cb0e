use eframe::egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(124, 58, 237);
pub const ACCENT_SOFT: Color32 = Color32::from_rgb(237, 233, 254);
pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(100, 116, 139);

pub fn lighten_color(c: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}
