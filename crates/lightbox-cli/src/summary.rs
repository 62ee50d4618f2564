use console::Style;

pub struct Styles {
    pub title: Style,
    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub ok: Style,
    pub error: Style,
    pub path: Style,
}

impl Styles {
    pub fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            error: Style::new().red(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_field(s: &Styles, label: &str, value: impl std::fmt::Display) {
    println!("  {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
}
