use chrono::NaiveDate;

use engine::{
    Category, Engine, EngineError, ExpenseCmd, ExportFormat, FileStorage, MemoryStorage,
    MoneyCents, Storage, load_expenses,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn engine_with_memory(slot: &MemoryStorage) -> Engine<&MemoryStorage> {
    Engine::builder().storage(slot).build().unwrap()
}

fn test_dir() -> std::path::PathBuf {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/test_data")
        .join(Uuid::new_v4().to_string());
    std::fs::create_dir_all(&root).unwrap();
    root
}

fn gasoil_and_lunch(engine: &mut Engine<&MemoryStorage>) {
    engine
        .add_expense(ExpenseCmd::new(
            date(2024, 1, 5),
            Category::Gasoil,
            MoneyCents::new(40_00),
        ))
        .unwrap();
    engine
        .add_expense(
            ExpenseCmd::new(date(2024, 1, 6), Category::Comidas, MoneyCents::new(15_50))
                .note("lunch"),
        )
        .unwrap();
}

#[test]
fn two_expenses_scenario() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    gasoil_and_lunch(&mut engine);

    let dashboard = engine.dashboard();
    assert_eq!(dashboard.totals.grand_total(), MoneyCents::new(55_50));

    let first = dashboard.list.iter().next().unwrap();
    assert_eq!(first.category, Category::Comidas);
    assert_eq!(first.note, Some("lunch"));

    assert_eq!(dashboard.charts.breakdown.slices.len(), 2);
    assert_eq!(dashboard.charts.ranking.bars[0].category, Category::Gasoil);

    let report = engine.report(date(2024, 1, 7));
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].category, "Gasoil");
    assert_eq!(report.category_lines.len(), 2);
    assert!(report.grand_total_line.contains("55.50"));
}

#[test]
fn zero_amount_is_rejected_without_writing() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    gasoil_and_lunch(&mut engine);
    let before = engine.expenses().to_vec();
    let writes = slot.writes();

    let err = engine
        .add_expense(ExpenseCmd::new(
            date(2024, 1, 8),
            Category::Varios,
            MoneyCents::ZERO,
        ))
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert_eq!(engine.expenses(), before.as_slice());
    assert_eq!(slot.writes(), writes);
}

#[test]
fn oversized_amount_is_rejected_without_writing() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    gasoil_and_lunch(&mut engine);
    let before = engine.expenses().to_vec();
    let writes = slot.writes();

    for _ in 0..2 {
        let err = engine
            .add_expense(ExpenseCmd::parse("2024-01-08", "varios", "50000000000000000").unwrap())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
    assert_eq!(engine.expenses(), before.as_slice());
    assert_eq!(slot.writes(), writes);

    let reopened = engine_with_memory(&slot);
    assert_eq!(reopened.expenses(), before.as_slice());
    assert_eq!(reopened.dashboard().totals.grand_total(), MoneyCents::new(55_50));
}

#[test]
fn largest_amount_round_trips_through_storage() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    for day in [5, 6] {
        engine
            .add_expense(ExpenseCmd::new(date(2024, 1, day), Category::Hoteles, MoneyCents::MAX))
            .unwrap();
    }
    let (_, dashboard) = engine
        .add_expense(ExpenseCmd::parse("2024-01-07", "varios", "999999999,99").unwrap())
        .unwrap();
    assert_eq!(
        dashboard.totals.grand_total(),
        MoneyCents::new(3 * MoneyCents::MAX.cents() - 1)
    );
    let totals = dashboard.totals;

    assert_eq!(load_expenses(&slot).unwrap(), engine.expenses());
    let reopened = engine_with_memory(&slot);
    assert_eq!(reopened.dashboard().totals, totals);
}

#[test]
fn stored_amount_over_limit_opens_empty() {
    for monto in ["1000000000.01", "500000000000000000"] {
        let slot = MemoryStorage::with_payload(format!(
            r#"[{{"fecha":"2024-01-05","categoria":"Gasoil","monto":40}},{{"fecha":"2024-01-06","categoria":"Varios","monto":{monto}}}]"#
        ));
        assert!(matches!(
            load_expenses(&slot),
            Err(EngineError::CorruptStorage(_))
        ));

        let engine = engine_with_memory(&slot);
        assert!(engine.expenses().is_empty());
        assert!(engine.dashboard().totals.is_empty());
        assert_eq!(slot.writes(), 0);
    }
}

#[test]
fn add_then_delete_newest_restores_collection() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    gasoil_and_lunch(&mut engine);
    let before = engine.expenses().to_vec();

    let (id, dashboard) = engine
        .add_expense(ExpenseCmd::new(
            date(2024, 2, 1),
            Category::Hoteles,
            MoneyCents::new(120_00),
        ))
        .unwrap();
    assert_eq!(dashboard.list.id_at(0), Some(id));

    engine.delete_expense_at(0).unwrap();
    assert_eq!(engine.expenses(), before.as_slice());
    assert_eq!(load_expenses(&slot).unwrap(), before);
}

#[test]
fn delete_by_id_ignores_display_order() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    gasoil_and_lunch(&mut engine);

    let gasoil = engine.expenses()[0].id;
    let dashboard = engine.delete_expense(gasoil).unwrap();
    assert_eq!(dashboard.list.len(), 1);
    assert_eq!(dashboard.totals.get(Category::Gasoil), MoneyCents::ZERO);
    assert!(matches!(
        engine.expense(gasoil),
        Err(EngineError::KeyNotFound(_))
    ));
}

#[test]
fn delete_all_empties_everything() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    gasoil_and_lunch(&mut engine);
    engine
        .add_expense(ExpenseCmd::new(
            date(2024, 1, 9),
            Category::Parking,
            MoneyCents::new(3_00),
        ))
        .unwrap();
    assert_eq!(engine.expenses().len(), 3);

    let dashboard = engine.delete_all().unwrap();
    assert!(dashboard.list.is_empty());
    assert_eq!(dashboard.charts.breakdown.slices.len(), 0);
    assert_eq!(dashboard.charts.ranking.bars.len(), 0);
    assert_eq!(slot.read().unwrap(), None);
    assert!(engine.expenses().is_empty());
}

#[test]
fn file_storage_survives_reopen() {
    let dir = test_dir();
    let path = dir.join("gastos.json");

    let id = {
        let mut engine = Engine::builder()
            .storage(FileStorage::new(&path))
            .build()
            .unwrap();
        let (id, _) = engine
            .add_expense(
                ExpenseCmd::parse("2024-01-06", "cafeteria", "2,5")
                    .unwrap()
                    .note("  cortado "),
            )
            .unwrap();
        id
    };

    let engine = Engine::builder()
        .storage(FileStorage::new(&path))
        .build()
        .unwrap();
    let expense = engine.expense(id).unwrap();
    assert_eq!(expense.category, Category::Cafeteria);
    assert_eq!(expense.amount, MoneyCents::new(250));
    assert_eq!(expense.note, "cortado");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"categoria\":\"Cafetería\""));
    assert!(raw.contains("\"monto\":2.5"));
}

#[test]
fn corrupt_file_opens_empty_and_is_kept_until_next_write() {
    let dir = test_dir();
    let path = dir.join("gastos.json");
    std::fs::write(&path, "[{\"fecha\": 12}]").unwrap();

    let mut engine = Engine::builder()
        .storage(FileStorage::new(&path))
        .build()
        .unwrap();
    assert!(engine.expenses().is_empty());
    assert!(std::fs::read_to_string(&path).unwrap().contains("12"));

    engine
        .add_expense(ExpenseCmd::new(
            date(2024, 1, 5),
            Category::Salones,
            MoneyCents::new(10_00),
        ))
        .unwrap();
    assert_eq!(load_expenses(engine.storage()).unwrap().len(), 1);
}

#[test]
fn exports_write_fixed_file_names() {
    let slot = MemoryStorage::new();
    let mut engine = engine_with_memory(&slot);
    gasoil_and_lunch(&mut engine);
    let dir = test_dir();

    let pdf = engine.export_pdf(&dir, date(2024, 1, 7)).unwrap();
    assert!(pdf.ends_with("agenda-gastos.pdf"));
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-"));

    let csv = engine.export_csv(&dir).unwrap();
    assert!(csv.ends_with("agenda-gastos.csv"));
    let text = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(text.lines().count(), 3);

    let again = engine
        .export(ExportFormat::Pdf, &dir, date(2024, 1, 7))
        .unwrap();
    assert_eq!(again, pdf);
}

#[test]
fn building_without_storage_fails() {
    let result = Engine::<MemoryStorage>::builder().build();
    assert!(result.is_err());
}
