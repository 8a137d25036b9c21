use crossterm::style::Color;

// Palette for the catalog page
pub fn title_bg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn title_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn muted_fg() -> Color {
    Color::AnsiValue(245)
} // Mid grey
pub fn accent_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
pub fn sport_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn selected_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn error_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
pub fn link_fg() -> Color {
    Color::AnsiValue(39)
} // Sky blue
pub fn dim_fg() -> Color {
    Color::AnsiValue(238)
} // Dark grey

/// ANSI 256 code of `color`, or `fallback` for colors outside the palette.
pub fn get_ansi_code(color: Color, fallback: u8) -> u8 {
    match color {
        Color::AnsiValue(val) => val,
        _ => fallback,
    }
}
