use ratatui::style::{Color, Modifier, Style};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ERROR_RED: Color = Color::Rgb(232, 96, 96);

pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn title_style() -> Style {
    Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD)
}

pub fn type_color(type_name: &str) -> Color {
    match type_name {
        "normal" => Color::Rgb(168, 167, 122),
        "fire" => Color::Rgb(238, 129, 48),
        "water" => Color::Rgb(99, 144, 240),
        "electric" => Color::Rgb(247, 208, 44),
        "grass" => Color::Rgb(122, 199, 76),
        "ice" => Color::Rgb(150, 217, 214),
        "fighting" => Color::Rgb(194, 46, 40),
        "poison" => Color::Rgb(163, 62, 161),
        "ground" => Color::Rgb(226, 191, 101),
        "flying" => Color::Rgb(169, 143, 243),
        "psychic" => Color::Rgb(249, 85, 135),
        "bug" => Color::Rgb(166, 185, 26),
        "rock" => Color::Rgb(182, 161, 54),
        "ghost" => Color::Rgb(115, 87, 151),
        "dragon" => Color::Rgb(111, 53, 252),
        "dark" => Color::Rgb(112, 87, 70),
        "steel" => Color::Rgb(183, 183, 206),
        "fairy" => Color::Rgb(214, 133, 173),
        _ => TEXT_DIM,
    }
}

/// `mr-mime` -> `Mr Mime`
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_name_capitalizes_parts() {
        assert_eq!(format_name("mr-mime"), "Mr Mime");
        assert_eq!(format_name("pikachu"), "Pikachu");
    }

    #[test]
    fn unknown_type_falls_back_to_dim() {
        assert_eq!(type_color("stellar"), TEXT_DIM);
    }
}
