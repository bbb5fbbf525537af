use ratatui::{style::Style, text::Span};

use crate::{app::Focus, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints for the panel that has the keyboard.
pub fn for_focus(focus: Focus) -> Vec<KeyHint> {
    match focus {
        Focus::Form => vec![
            KeyHint::new("Tab", "campo"),
            KeyHint::new("←→", "categoría"),
            KeyHint::new("Enter", "añadir"),
            KeyHint::new("Esc", "lista"),
        ],
        Focus::List => vec![
            KeyHint::new("↑↓", "elegir"),
            KeyHint::new("d", "borrar"),
            KeyHint::new("D", "borrar todo"),
            KeyHint::new("a", "formulario"),
            KeyHint::new("i", "rápido"),
            KeyHint::new("p", "PDF"),
            KeyHint::new("c", "CSV"),
            KeyHint::new("q", "salir"),
        ],
        Focus::QuickAdd => vec![
            KeyHint::new("Enter", "añadir"),
            KeyHint::new("Esc", "cancelar"),
        ],
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_hints_include_exports() {
        let keys: Vec<&str> = for_focus(Focus::List).iter().map(|h| h.key).collect();
        assert!(keys.contains(&"p"));
        assert!(keys.contains(&"c"));
        assert!(keys.contains(&"D"));
    }

    #[test]
    fn spans_alternate_key_and_action() {
        let theme = Theme::default();
        let spans = hints_to_spans(&for_focus(Focus::QuickAdd), &theme);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].content, "Enter");
        assert_eq!(spans[4].content, " cancelar");
    }
}
