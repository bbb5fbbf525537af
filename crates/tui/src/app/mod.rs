mod form;

use std::{path::PathBuf, time::Duration};

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};
use engine::{Dashboard, Engine, EngineError, ExpenseCmd, ExportFormat, ListView, Storage, Totals};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    quick_add,
    ui::{
        self,
        components::charts::ChartSlot,
        keymap::{AppAction, map_key},
    },
};

pub use form::{FormField, FormState};

/// Ticks a toast stays on screen (one tick is 200ms).
const TOAST_TICKS: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
    QuickAdd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    ttl: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    DeleteAll,
}

#[derive(Debug)]
pub struct AppState {
    pub focus: Focus,
    pub form: FormState,
    pub quick_add: String,
    pub selected: usize,
    pub rows: usize,
    pub confirm: Option<Confirm>,
    pub toast: Option<ToastState>,
    pub totals: Totals,
    pub charts: ChartSlot,
}

impl AppState {
    fn new(today: NaiveDate, dashboard: Dashboard<'_>) -> Self {
        let mut state = Self {
            focus: Focus::Form,
            form: FormState::new(today),
            quick_add: String::new(),
            selected: 0,
            rows: 0,
            confirm: None,
            toast: None,
            totals: Totals::from_expenses(&[]),
            charts: ChartSlot::default(),
        };
        state.apply(dashboard);
        state
    }

    /// Takes the views rebuilt after a mutation.
    pub fn apply(&mut self, dashboard: Dashboard<'_>) {
        self.rows = dashboard.list.len();
        self.selected = self.selected.min(self.rows.saturating_sub(1));
        self.totals = dashboard.totals;
        self.charts.replace(dashboard.charts);
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            ttl: TOAST_TICKS,
        });
    }

    fn tick(&mut self) {
        if let Some(toast) = self.toast.as_mut() {
            toast.ttl = toast.ttl.saturating_sub(1);
            if toast.ttl == 0 {
                self.toast = None;
            }
        }
    }

    fn select_next(&mut self) {
        if self.rows == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(self.rows - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

pub struct App<S: Storage> {
    engine: Engine<S>,
    tz: Tz,
    export_dir: PathBuf,
    pub state: AppState,
    should_quit: bool,
}

impl<S: Storage> App<S> {
    pub fn new(config: &AppConfig, engine: Engine<S>) -> Result<Self> {
        let tz = config.timezone()?;
        let today = Utc::now().with_timezone(&tz).date_naive();
        let state = AppState::new(today, engine.dashboard());

        Ok(Self {
            engine,
            tz,
            export_dir: PathBuf::from(&config.export_dir),
            state,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            {
                let list = ListView::build(self.engine.expenses());
                terminal
                    .draw(|frame| ui::render(frame, &self.state, &list))
                    .map_err(|err| AppError::Terminal(err.to_string()))?;
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            } else {
                self.state.tick();
            }
        }

        Ok(())
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_action(map_key(key));
    }

    fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        if self.state.confirm.is_some() {
            self.handle_confirm(action);
            return;
        }
        match self.state.focus {
            Focus::Form => self.handle_form(action),
            Focus::List => self.handle_list(action),
            Focus::QuickAdd => self.handle_quick_add(action),
        }
    }

    fn handle_confirm(&mut self, action: AppAction) {
        let confirmed = matches!(action, AppAction::Input('y' | 'Y'));
        self.state.confirm = None;
        if confirmed {
            self.delete_all();
        } else {
            self.state.toast(ToastLevel::Info, "Borrado cancelado");
        }
    }

    fn handle_form(&mut self, action: AppAction) {
        let on_category = self.state.form.focus == FormField::Category;
        match action {
            AppAction::Cancel => self.state.focus = Focus::List,
            AppAction::NextField => self.state.form.next_field(),
            AppAction::PrevField => self.state.form.prev_field(),
            AppAction::Left if on_category => self.state.form.cycle_category(false),
            AppAction::Right if on_category => self.state.form.cycle_category(true),
            AppAction::Backspace => self.state.form.backspace(),
            AppAction::Input(ch) => self.state.form.input(ch),
            AppAction::Submit => self.submit_form(),
            _ => {}
        }
    }

    fn handle_list(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.state.select_next(),
            AppAction::NextField | AppAction::Input('a') => self.state.focus = Focus::Form,
            AppAction::Input('i') => {
                self.state.quick_add.clear();
                self.state.focus = Focus::QuickAdd;
            }
            AppAction::Input('d') => self.delete_selected(),
            AppAction::Input('D') => self.state.confirm = Some(Confirm::DeleteAll),
            AppAction::Input('p') => self.export(ExportFormat::Pdf),
            AppAction::Input('c') => self.export(ExportFormat::Csv),
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_quick_add(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.focus = Focus::List,
            AppAction::Backspace => {
                self.state.quick_add.pop();
            }
            AppAction::Input(ch) => self.state.quick_add.push(ch),
            AppAction::Submit => self.submit_quick_add(),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let cmd = match self.state.form.command() {
            Ok(cmd) => cmd,
            Err(err) => {
                self.state.toast(ToastLevel::Error, validation_message(&err));
                return;
            }
        };
        if self.add(cmd) {
            let today = self.today();
            self.state.form.reset(today);
        }
    }

    fn submit_quick_add(&mut self) {
        let parsed = match quick_add::parse(&self.state.quick_add) {
            Ok(parsed) => parsed,
            Err(message) => {
                self.state.toast(ToastLevel::Error, message);
                return;
            }
        };
        let category = parsed.category.unwrap_or(self.state.form.category);
        let cmd = ExpenseCmd::new(self.today(), category, parsed.amount).note(parsed.note);
        if self.add(cmd) {
            self.state.quick_add.clear();
            self.state.focus = Focus::List;
        }
    }

    fn add(&mut self, cmd: ExpenseCmd) -> bool {
        match self.engine.add_expense(cmd) {
            Ok((id, dashboard)) => {
                tracing::debug!(%id, "expense added");
                self.state.apply(dashboard);
                self.state.toast(ToastLevel::Success, "Gasto añadido");
                true
            }
            Err(err) => {
                tracing::error!("add failed: {err}");
                self.state.toast(ToastLevel::Error, validation_message(&err));
                false
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = ListView::build(self.engine.expenses()).id_at(self.state.selected) else {
            return;
        };
        match self.engine.delete_expense(id) {
            Ok(dashboard) => {
                self.state.apply(dashboard);
                self.state.toast(ToastLevel::Success, "Gasto eliminado");
            }
            Err(err) => {
                tracing::error!("delete failed: {err}");
                self.state.toast(ToastLevel::Error, err.to_string());
            }
        }
    }

    fn delete_all(&mut self) {
        match self.engine.delete_all() {
            Ok(dashboard) => {
                self.state.apply(dashboard);
                self.state.selected = 0;
                self.state.toast(ToastLevel::Success, "Todos los gastos eliminados");
            }
            Err(err) => {
                tracing::error!("delete all failed: {err}");
                self.state.toast(ToastLevel::Error, err.to_string());
            }
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let today = self.today();
        match self.engine.export(format, &self.export_dir, today) {
            Ok(path) => {
                self.state
                    .toast(ToastLevel::Success, format!("Exportado: {}", path.display()));
            }
            Err(err) => {
                tracing::error!("export failed: {err}");
                self.state
                    .toast(ToastLevel::Error, format!("Error al exportar: {err}"));
            }
        }
    }
}

fn validation_message(err: &EngineError) -> String {
    match err {
        EngineError::InvalidAmount(_) => "Introduce un monto válido".to_string(),
        EngineError::InvalidDate(value) => format!("Fecha no válida: {value}"),
        EngineError::InvalidCategory(value) => format!("Categoría desconocida: {value}"),
        other => format!("No se pudo guardar: {other}"),
    }
}
