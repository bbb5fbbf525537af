use chrono::NaiveDate;
use engine::{Category, ExpenseCmd, ResultEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Category,
    Amount,
    Note,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Fecha",
            Self::Category => "Categoría",
            Self::Amount => "Monto",
            Self::Note => "Descripción",
        }
    }

    const ORDER: [FormField; 4] = [Self::Date, Self::Category, Self::Amount, Self::Note];

    fn position(self) -> usize {
        match self {
            Self::Date => 0,
            Self::Category => 1,
            Self::Amount => 2,
            Self::Note => 3,
        }
    }
}

/// The add-expense form.
#[derive(Debug, Clone)]
pub struct FormState {
    pub date: String,
    pub category: Category,
    pub amount: String,
    pub note: String,
    pub focus: FormField,
}

impl FormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            category: Category::default(),
            amount: String::new(),
            note: String::new(),
            focus: FormField::Amount,
        }
    }

    pub fn fields() -> [FormField; 4] {
        FormField::ORDER
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Category => self.category.label(),
            FormField::Amount => &self.amount,
            FormField::Note => &self.note,
        }
    }

    pub fn next_field(&mut self) {
        let next = (self.focus.position() + 1) % FormField::ORDER.len();
        self.focus = FormField::ORDER[next];
    }

    pub fn prev_field(&mut self) {
        let len = FormField::ORDER.len();
        let prev = (self.focus.position() + len - 1) % len;
        self.focus = FormField::ORDER[prev];
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Date => Some(&mut self.date),
            FormField::Category => None,
            FormField::Amount => Some(&mut self.amount),
            FormField::Note => Some(&mut self.note),
        }
    }

    pub fn input(&mut self, ch: char) {
        if let Some(field) = self.active_text_mut() {
            field.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active_text_mut() {
            field.pop();
        }
    }

    /// Changes category; the amount typed for the previous one is cleared.
    pub fn set_category(&mut self, category: Category) {
        if category != self.category {
            self.category = category;
            self.amount.clear();
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let next = if forward {
            self.category.next()
        } else {
            self.category.prev()
        };
        self.set_category(next);
    }

    pub fn command(&self) -> ResultEngine<ExpenseCmd> {
        Ok(ExpenseCmd::parse(&self.date, self.category.label(), &self.amount)?.note(&self.note))
    }

    /// Clears the form after a successful add. Category is kept.
    pub fn reset(&mut self, today: NaiveDate) {
        self.date = today.format("%Y-%m-%d").to_string();
        self.amount.clear();
        self.note.clear();
        self.focus = FormField::Amount;
    }
}

#[cfg(test)]
mod tests {
    use engine::MoneyCents;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()
    }

    #[test]
    fn typing_builds_a_command() {
        let mut form = FormState::new(today());
        form.set_category(Category::Comidas);
        for ch in "15,5".chars() {
            form.input(ch);
        }
        form.next_field();
        for ch in "lunch".chars() {
            form.input(ch);
        }
        let cmd = form.command().unwrap();
        assert_eq!(cmd.date, today());
        assert_eq!(cmd.category, Category::Comidas);
        assert_eq!(cmd.amount, MoneyCents::new(1550));
        assert_eq!(cmd.note, "lunch");
    }

    #[test]
    fn changing_category_clears_amount() {
        let mut form = FormState::new(today());
        form.input('9');
        form.cycle_category(true);
        assert_eq!(form.category, Category::Gasoil);
        assert!(form.amount.is_empty());
    }

    #[test]
    fn category_field_ignores_typing() {
        let mut form = FormState::new(today());
        form.focus = FormField::Category;
        form.input('x');
        form.backspace();
        assert_eq!(form.value(FormField::Category), "Hoteles");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = FormState::new(today());
        form.focus = FormField::Note;
        form.next_field();
        assert_eq!(form.focus, FormField::Date);
        form.prev_field();
        assert_eq!(form.focus, FormField::Note);
    }

    #[test]
    fn reset_keeps_category() {
        let mut form = FormState::new(today());
        form.set_category(Category::Parking);
        form.amount = "3".to_string();
        form.note = "centro".to_string();
        form.date = "2023-12-31".to_string();
        form.reset(today());
        assert_eq!(form.category, Category::Parking);
        assert!(form.amount.is_empty() && form.note.is_empty());
        assert_eq!(form.date, "2024-01-06");
    }
}
