use std::{error::Error, io::Write, path::PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
};
use engine::{Engine, EngineError, ExpenseCmd, ExportFormat, FileStorage, ListView, Totals};
use uuid::Uuid;

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(name = "agenda")]
#[command(about = "Expense diary: add, list, total and export expenses")]
struct Cli {
    /// Expenses file (also read from `AGENDA_DATA_FILE`).
    #[arg(long, env = "AGENDA_DATA_FILE", default_value = "data/gastos.json")]
    data_file: String,

    /// Log level for stderr output.
    #[arg(long, default_value = "warn")]
    level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an expense.
    Add(AddArgs),
    /// Print the expenses, newest first.
    List,
    /// Print per-category totals and the grand total.
    Totals,
    /// Delete one expense by id or by `#position` in `list`.
    Delete(DeleteArgs),
    /// Delete every expense.
    Clear(ClearArgs),
    /// Write the PDF report or the CSV dump.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct AddArgs {
    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    category: String,
    #[arg(long)]
    amount: String,
    #[arg(long, default_value = "")]
    note: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    /// Expense id, or `#N` for the N-th row of `list`.
    target: String,
}

#[derive(Args, Debug)]
struct ClearArgs {
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long, default_value = "pdf")]
    format: String,
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
enum DeleteTarget {
    Id(Uuid),
    /// Zero-based position in the sorted list.
    Position(usize),
}

fn parse_target(raw: &str) -> Result<DeleteTarget, String> {
    let raw = raw.trim();
    if let Some(position) = raw.strip_prefix('#') {
        return match position.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(DeleteTarget::Position(n - 1)),
            _ => Err(format!("invalid position: {raw}")),
        };
    }
    Uuid::parse_str(raw)
        .map(DeleteTarget::Id)
        .map_err(|_| format!("invalid id: {raw}"))
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> CliResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Single-key yes/no prompt on stderr.
fn confirm(prompt: &str) -> CliResult<bool> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(out, Print(prompt))?;
    out.flush()?;

    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        let answer = match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char('y' | 'Y') => true,
            _ => false,
        };
        execute!(out, Print("\r\n"))?;
        out.flush()?;
        return Ok(answer);
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(format!("agenda_cli={level},engine={level}"))
        .with_writer(std::io::stderr)
        .init();
}

fn print_list(list: &ListView<'_>) {
    if let Some(placeholder) = list.placeholder() {
        println!("{placeholder}");
        return;
    }
    for (i, row) in list.iter().enumerate() {
        match row.note {
            Some(note) => println!("#{:<3} {}  {note}  [{}]", i + 1, row.headline(), row.id),
            None => println!("#{:<3} {}  [{}]", i + 1, row.headline(), row.id),
        }
    }
}

/// Categories with spending, then the grand total.
fn totals_lines(totals: &Totals) -> Vec<String> {
    totals
        .non_zero()
        .map(|(category, amount)| format!("{:<12} {:>12}", category.label(), amount.to_string()))
        .chain(std::iter::once(format!(
            "{:<12} {:>12}",
            "Gran Total",
            totals.grand_total().to_string()
        )))
        .collect()
}

fn add_command(args: AddArgs, today: NaiveDate) -> Result<ExpenseCmd, EngineError> {
    let date = args
        .date
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
    Ok(ExpenseCmd::parse(&date, &args.category, &args.amount)?.note(args.note))
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli.level);

    let mut engine = Engine::builder()
        .storage(FileStorage::new(&cli.data_file))
        .build()?;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Add(args) => {
            let cmd = match add_command(args, today) {
                Ok(cmd) => cmd,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };
            match engine.add_expense(cmd) {
                Ok((id, dashboard)) => {
                    println!("added expense: {id}");
                    println!("Gran Total: {}", dashboard.totals.grand_total());
                }
                Err(err @ EngineError::InvalidAmount(_)) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::List => {
            print_list(&engine.dashboard().list);
        }
        Command::Totals => {
            for line in totals_lines(&engine.dashboard().totals) {
                println!("{line}");
            }
        }
        Command::Delete(args) => {
            let target = match parse_target(&args.target) {
                Ok(target) => target,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };
            let result = match target {
                DeleteTarget::Id(id) => engine.delete_expense(id).map(|_| ()),
                DeleteTarget::Position(position) => {
                    engine.delete_expense_at(position).map(|_| ())
                }
            };
            match result {
                Ok(()) => println!("deleted: {}", args.target),
                Err(EngineError::KeyNotFound(key)) => {
                    eprintln!("expense not found: {key}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Clear(args) => {
            let count = engine.expenses().len();
            if !args.yes && !confirm(&format!("Delete all {count} expenses? [y/N] "))? {
                println!("nothing deleted");
                return Ok(());
            }
            engine.delete_all()?;
            println!("deleted {count} expenses");
        }
        Command::Export(args) => {
            let format = match ExportFormat::try_from(args.format.as_str()) {
                Ok(format) => format,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };
            let path = engine.export(format, &args.dir, today)?;
            println!("exported: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use engine::{Category, MoneyCents};

    use super::*;

    #[test]
    fn targets_are_ids_or_one_based_positions() {
        let id = Uuid::new_v4();
        assert_eq!(parse_target(&id.to_string()), Ok(DeleteTarget::Id(id)));
        assert_eq!(parse_target("#1"), Ok(DeleteTarget::Position(0)));
        assert!(parse_target("#0").is_err());
        assert!(parse_target("#x").is_err());
        assert!(parse_target("nope").is_err());
    }

    #[test]
    fn add_defaults_date_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let args = AddArgs {
            date: None,
            category: "cafeteria".to_string(),
            amount: "1,80".to_string(),
            note: "cortado".to_string(),
        };
        let cmd = add_command(args, today).unwrap();
        assert_eq!(cmd.date, today);
        assert_eq!(cmd.category, Category::Cafeteria);
        assert_eq!(cmd.amount, MoneyCents::new(180));
    }

    #[test]
    fn add_rejects_unknown_category() {
        let args = AddArgs {
            date: Some("2024-01-06".to_string()),
            category: "cine".to_string(),
            amount: "5".to_string(),
            note: String::new(),
        };
        assert!(matches!(
            add_command(args, Local::now().date_naive()),
            Err(EngineError::InvalidCategory(_))
        ));
    }

    #[test]
    fn add_rejects_non_iso_date() {
        let args = AddArgs {
            date: Some("06/01/2024".to_string()),
            category: "varios".to_string(),
            amount: "5".to_string(),
            note: String::new(),
        };
        assert_eq!(
            add_command(args, Local::now().date_naive()).unwrap_err(),
            EngineError::InvalidDate("06/01/2024".to_string())
        );
    }

    #[test]
    fn totals_skip_categories_without_spending() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let expenses = [
            engine::Expense::new(today, Category::Gasoil, MoneyCents::new(40_00), ""),
            engine::Expense::new(today, Category::Varios, MoneyCents::new(2_50), ""),
        ];
        let lines = totals_lines(&Totals::from_expenses(&expenses));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Gasoil"));
        assert!(lines[0].ends_with("40.00 €"));
        assert!(lines[1].starts_with("Varios"));
        assert!(lines[2].starts_with("Gran Total"));
        assert!(lines[2].ends_with("42.50 €"));
    }

    #[test]
    fn totals_of_nothing_is_only_the_grand_total() {
        let lines = totals_lines(&Totals::from_expenses(&[]));
        assert_eq!(lines, vec![format!("{:<12} {:>12}", "Gran Total", "0.00 €")]);
    }
}
