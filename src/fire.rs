use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Four-color palette for one intensity tier of the flame.
#[derive(Debug, Clone, Copy)]
struct FirePalette {
    core: Color,
    body: Color,
    tips: Color,
    base: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Palettes for levels 1 through 7: cyan, green, yellow, orange, red,
/// purple, magenta.
const PALETTES: [FirePalette; 7] = [
    FirePalette {
        core: rgb(0xe0ffff),
        body: rgb(0x2ac3de),
        tips: rgb(0x0077be),
        base: rgb(0x004050),
    },
    FirePalette {
        core: rgb(0xf0fff0),
        body: rgb(0x9ece6a),
        tips: rgb(0x228b22),
        base: rgb(0x004000),
    },
    FirePalette {
        core: rgb(0xffffe0),
        body: rgb(0xe0af68),
        tips: rgb(0xdaa520),
        base: rgb(0x503000),
    },
    FirePalette {
        core: rgb(0xffff00),
        body: rgb(0xff9e64),
        tips: rgb(0xff4500),
        base: rgb(0x560000),
    },
    FirePalette {
        core: rgb(0xffdab9),
        body: rgb(0xf7768e),
        tips: rgb(0xdc143c),
        base: rgb(0x400000),
    },
    FirePalette {
        core: rgb(0xe6e6fa),
        body: rgb(0xbb9af7),
        tips: rgb(0x9370db),
        base: rgb(0x200040),
    },
    FirePalette {
        core: rgb(0xffe4e1),
        body: rgb(0xff007c),
        tips: rgb(0xc71585),
        base: rgb(0x300030),
    },
];

/// Animation frames. Role characters: Y = core, O = body, R = tips,
/// D = base, space = transparent.
const FRAMES: [[&str; 4]; 4] = [
    [" D  ", " R R", "RYYO", "OYYY"],
    [" R  ", "  R ", "ROYO", "OYYY"],
    ["  D ", " RY ", "RYYR", "OYYY"],
    ["    ", "DR R", " OYO", "OYYO"],
];

/// Width and rendered height of the flame, in terminal cells.
pub const FIRE_WIDTH: usize = 4;
pub const FIRE_HEIGHT: usize = 2;

/// Map a streak to a flame intensity: one tier per ten consecutive
/// correct keystrokes, capped at the hottest palette.
pub fn streak_level(streak: usize) -> usize {
    (streak / 10).min(7)
}

fn role_color(role: char, palette: &FirePalette) -> Option<Color> {
    match role {
        'Y' => Some(palette.core),
        'O' => Some(palette.body),
        'R' => Some(palette.tips),
        'D' => Some(palette.base),
        _ => None,
    }
}

/// Render one animation frame at the given intensity level.
///
/// Two text rows are folded into one line of half blocks, so the flame
/// occupies FIRE_HEIGHT lines. Level 0 yields a blank placeholder of
/// identical size, keeping the layout stable when the fire lights up.
pub fn render_fire(frame: usize, level: usize) -> Vec<Line<'static>> {
    if level == 0 {
        return vec![
            Line::from(" ".repeat(FIRE_WIDTH)),
            Line::from(" ".repeat(FIRE_WIDTH)),
        ];
    }

    let palette = &PALETTES[level.min(PALETTES.len()) - 1];
    let rows = &FRAMES[frame % FRAMES.len()];

    let mut lines = Vec::with_capacity(FIRE_HEIGHT);
    for pair in rows.chunks(2) {
        let top: Vec<char> = pair[0].chars().collect();
        let bottom: Vec<char> = pair.get(1).map_or(Vec::new(), |r| r.chars().collect());

        let mut spans = Vec::with_capacity(FIRE_WIDTH);
        for x in 0..FIRE_WIDTH {
            let top_color = top.get(x).and_then(|c| role_color(*c, palette));
            let bottom_color = bottom.get(x).and_then(|c| role_color(*c, palette));

            // The upper half block paints its foreground on top and its
            // background below; a lone lower half block avoids painting
            // a background over the terminal's own.
            let span = match (top_color, bottom_color) {
                (None, None) => Span::raw(" "),
                (Some(t), None) => Span::styled("▀", Style::default().fg(t)),
                (None, Some(b)) => Span::styled("▄", Style::default().fg(b)),
                (Some(t), Some(b)) => Span::styled("▀", Style::default().fg(t).bg(b)),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    lines
}
