use ratatui::style::Color;

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Color scheme for the presentation layer. Passed down explicitly; the
/// engine never sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub fg: Color,
    pub untyped: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub cursor: Color,
    pub result_bg: Color,
    /// Streak tier colors, level 1 through 7.
    pub streak: [Color; 7],
}

pub const TOKYO_NIGHT: Theme = Theme {
    name: "tokyo_night",
    fg: rgb(0xa9b1d6),
    untyped: rgb(0x565f89),
    correct: rgb(0x9ece6a),
    incorrect: rgb(0xf7768e),
    cursor: rgb(0x7aa2f7),
    result_bg: rgb(0x292e42),
    streak: [
        rgb(0x2ac3de),
        rgb(0x9ece6a),
        rgb(0xe0af68),
        rgb(0xff9e64),
        rgb(0xf7768e),
        rgb(0xbb9af7),
        rgb(0xff007c),
    ],
};

pub const DRACULA: Theme = Theme {
    name: "dracula",
    fg: rgb(0xf8f8f2),
    untyped: rgb(0x6272a4),
    correct: rgb(0x50fa7b),
    incorrect: rgb(0xff5555),
    cursor: rgb(0x6272a4),
    result_bg: rgb(0x44475a),
    streak: [
        rgb(0x8be9fd),
        rgb(0x50fa7b),
        rgb(0xf1fa8c),
        rgb(0xffb86c),
        rgb(0xff5555),
        rgb(0xbd93f9),
        rgb(0xff79c6),
    ],
};

pub const MONOKAI: Theme = Theme {
    name: "monokai",
    fg: rgb(0xf8f8f2),
    untyped: rgb(0x75715e),
    correct: rgb(0xa6e22e),
    incorrect: rgb(0xf92672),
    cursor: rgb(0x66d9ef),
    result_bg: rgb(0x3e3d32),
    streak: [
        rgb(0x66d9ef),
        rgb(0xa6e22e),
        rgb(0xe6db74),
        rgb(0xfd971f),
        rgb(0xf92672),
        rgb(0xae81ff),
        rgb(0xf92672),
    ],
};

pub const NORD: Theme = Theme {
    name: "nord",
    fg: rgb(0xeceff4),
    untyped: rgb(0x4c566a),
    correct: rgb(0xa3be8c),
    incorrect: rgb(0xbf616a),
    cursor: rgb(0x88c0d0),
    result_bg: rgb(0x3b4252),
    streak: [
        rgb(0x81a1c1),
        rgb(0xa3be8c),
        rgb(0xebcb8b),
        rgb(0xd08770),
        rgb(0xbf616a),
        rgb(0xb48ead),
        rgb(0xbf616a),
    ],
};

pub const ALL_THEMES: [Theme; 4] = [TOKYO_NIGHT, DRACULA, MONOKAI, NORD];

impl Theme {
    pub fn by_name(name: &str) -> Option<Theme> {
        ALL_THEMES.iter().find(|t| t.name == name).copied()
    }

    /// Color for a streak tier; level 0 is the plain foreground.
    pub fn streak_color(&self, level: usize) -> Color {
        if level == 0 {
            self.fg
        } else {
            self.streak[level.min(self.streak.len()) - 1]
        }
    }
}
