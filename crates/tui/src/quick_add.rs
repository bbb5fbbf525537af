//! One-line expense entry: `15,50 #comidas menú del día`.
//!
//! The first token is the amount, an optional `#tag` picks the category and
//! everything else becomes the note.

use engine::{Category, MoneyCents};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAddParsed {
    pub amount: MoneyCents,
    pub category: Option<Category>,
    pub note: String,
}

pub fn parse(input: &str) -> Result<QuickAddParsed, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Introduce un monto.".to_string());
    }

    let mut parts = trimmed.splitn(2, ' ');
    let amount_raw = parts.next().unwrap_or("").trim();
    let note_raw = parts.next().unwrap_or("").trim();

    let amount: MoneyCents = amount_raw
        .parse()
        .map_err(|_| "Introduce un monto válido".to_string())?;
    if !amount.is_positive() {
        return Err("Introduce un monto válido".to_string());
    }

    let (category, note) = parse_tag(note_raw)?;

    Ok(QuickAddParsed {
        amount,
        category,
        note,
    })
}

fn parse_tag(note_raw: &str) -> Result<(Option<Category>, String), String> {
    let mut tag: Option<Category> = None;
    let mut kept: Vec<&str> = Vec::new();

    for token in note_raw.split_whitespace() {
        if let Some(rest) = token.strip_prefix('#') {
            if rest.is_empty() {
                kept.push(token);
                continue;
            }
            if tag.is_some() {
                return Err("Demasiadas categorías: máximo 1.".to_string());
            }
            let category = rest
                .parse::<Category>()
                .map_err(|_| format!("Categoría desconocida: {rest}"))?;
            tag = Some(category);
        } else {
            kept.push(token);
        }
    }

    Ok((tag, kept.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_tag_and_note() {
        let parsed = parse("15,50 #comidas menú del día").unwrap();
        assert_eq!(parsed.amount, MoneyCents::new(1550));
        assert_eq!(parsed.category, Some(Category::Comidas));
        assert_eq!(parsed.note, "menú del día");
    }

    #[test]
    fn tag_is_optional_and_accent_insensitive() {
        assert_eq!(parse("3").unwrap().category, None);
        assert_eq!(parse("2 #cafeteria").unwrap().category, Some(Category::Cafeteria));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("").is_err());
        assert!(parse("0 #varios").is_err());
        assert!(parse("-4").is_err());
        assert!(parse("abc").is_err());
        assert!(parse("4 #cine").is_err());
        assert!(parse("4 #gasoil #parking").is_err());
    }
}
