use ratatui::style::Color;

// Productivity palette, index = daily value. Its length bounds the largest
// value a profile may hold.
pub const PALETTE: [Color; 25] = [
    Color::Rgb(0, 0, 0),
    Color::Rgb(96, 0, 0),
    Color::Rgb(128, 0, 0),
    Color::Rgb(168, 0, 0),
    Color::Rgb(211, 0, 0),
    Color::Rgb(255, 0, 0),
    Color::Rgb(255, 100, 0),
    Color::Rgb(255, 148, 0),
    Color::Rgb(255, 200, 0),
    Color::Rgb(255, 255, 0),
    Color::Rgb(168, 255, 0),
    Color::Rgb(0, 255, 0),
    Color::Rgb(0, 223, 0),
    Color::Rgb(0, 191, 0),
    Color::Rgb(0, 151, 0),
    Color::Rgb(0, 112, 0),
    Color::Rgb(0, 90, 74),
    Color::Rgb(0, 64, 136),
    Color::Rgb(0, 32, 204),
    Color::Rgb(0, 0, 255),
    Color::Rgb(0, 100, 255),
    Color::Rgb(0, 148, 255),
    Color::Rgb(0, 204, 255),
    Color::Rgb(0, 255, 255),
    Color::Rgb(159, 255, 255),
];

pub const HIGHLIGHT: HighlightSettings = HighlightSettings {
    stroke: Color::Rgb(238, 51, 221),
};

pub const UI_SETTINGS: UiSettings = UiSettings {
    poll_ms: 50,
    pom_height: 5.0,
    pom_width: 30.0,
    max_pom: 20,
};

pub struct HighlightSettings {
    pub stroke: Color,
}

pub struct UiSettings {
    pub poll_ms: u64,
    pub pom_height: f64,
    pub pom_width: f64,
    pub max_pom: u32,
}
