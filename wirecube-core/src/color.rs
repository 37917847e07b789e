/// RGBA colour passed through to the drawing primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const DARK_GRAY: Color = Color::rgb(80, 80, 80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Look up a named colour (lowercase, `_` or `-` separated).
    pub fn from_name(name: &str) -> Option<Color> {
        let color = match name {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "yellow" => Color::YELLOW,
            "cyan" => Color::CYAN,
            "magenta" => Color::MAGENTA,
            "gray" | "grey" => Color::GRAY,
            "dark_gray" | "dark-gray" | "dark_grey" | "dark-grey" => Color::DARK_GRAY,
            _ => return None,
        };
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn test_from_name() {
        assert_eq!(Color::from_name("red"), Some(Color::RED));
        assert_eq!(Color::from_name("grey"), Some(Color::GRAY));
        assert_eq!(Color::from_name("dark-gray"), Some(Color::DARK_GRAY));
        assert_eq!(Color::from_name("mauve"), None);
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
    }
}
