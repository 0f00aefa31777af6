#![cfg(feature = "excel_test_writer")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use paralympics_prep::ingestion::excel::{ingest_excel_from_path, ingest_excel_inferred_from_path, sheet_names};
use paralympics_prep::ingestion::{ingest_from_path, IngestionOptions};
use paralympics_prep::types::{DataType, Field, Schema, Value};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("paralympics-prep-{name}-{nanos}.xlsx"))
}

fn write_all_raw_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();

    let events = wb.add_worksheet();
    events.set_name("games").unwrap();
    for (c, h) in ["type", "year", "host", "participants_f"].iter().enumerate() {
        events.write_string(0, c as u16, *h).unwrap();
    }
    events.write_string(1, 0, "summer").unwrap();
    events.write_number(1, 1, 1960).unwrap();
    events.write_string(1, 2, "Rome").unwrap();
    // participants_f left empty on the first row
    events.write_string(2, 0, "winter").unwrap();
    events.write_number(2, 1, 1976).unwrap();
    events.write_string(2, 2, "Örnsköldsvik").unwrap();
    events.write_number(2, 3, 37).unwrap();

    let medals = wb.add_worksheet();
    medals.set_name("medal_standings").unwrap();
    for (c, h) in ["Rank", "NPC", "Gold", "Silver", "Bronze"].iter().enumerate() {
        medals.write_string(0, c as u16, *h).unwrap();
    }
    medals.write_number(1, 0, 1).unwrap();
    medals.write_string(1, 1, "Italy").unwrap();
    medals.write_number(1, 2, 29).unwrap();
    medals.write_number(1, 3, 28).unwrap();
    medals.write_number(1, 4, 23).unwrap();

    wb.save(path).unwrap();
}

#[test]
fn inferred_first_sheet_by_default() {
    let path = tmp_file("all-raw");
    write_all_raw_xlsx(&path);

    let ds = ingest_excel_inferred_from_path(&path, None).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.schema.fields[1], Field::new("year", DataType::Int64));
    assert_eq!(ds.schema.fields[3], Field::new("participants_f", DataType::Float64));
    assert_eq!(ds.rows[0][3], Value::Null);
    assert_eq!(ds.rows[1][2], Value::Utf8("Örnsköldsvik".to_string()));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn named_sheet_through_unified_entrypoint() {
    let path = tmp_file("medals");
    write_all_raw_xlsx(&path);

    assert_eq!(sheet_names(&path).unwrap(), vec!["games", "medal_standings"]);

    let opts = IngestionOptions {
        sheet: Some("medal_standings".to_string()),
        ..Default::default()
    };
    let ds = ingest_from_path(&path, &opts).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0][1], Value::Utf8("Italy".to_string()));
    assert_eq!(ds.rows[0][2], Value::Int64(29));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn schema_first_sheet_reports_missing_column() {
    let path = tmp_file("missing");
    write_all_raw_xlsx(&path);

    let schema = Schema::new(vec![Field::new("NPC", DataType::Utf8)]);
    let err = ingest_excel_from_path(&path, Some("games"), &schema).unwrap_err();
    assert!(err.to_string().contains("sheet 'games': missing required column 'NPC'"));

    let ds = ingest_excel_from_path(&path, Some("medal_standings"), &schema).unwrap();
    assert_eq!(ds.rows[0][0], Value::Utf8("Italy".to_string()));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn date_formatted_cells_infer_as_dates() {
    use chrono::NaiveDate;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let path = tmp_file("dates");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    let day_first = Format::new().set_num_format("dd/mm/yyyy");
    ws.write_string(0, 0, "host").unwrap();
    ws.write_string(0, 1, "start").unwrap();
    ws.write_string(1, 0, "London").unwrap();
    ws.write_datetime_with_format(1, 1, &ExcelDateTime::from_ymd(2012, 8, 29).unwrap(), &day_first)
        .unwrap();
    ws.write_string(2, 0, "Rio de Janeiro").unwrap();
    ws.write_datetime_with_format(2, 1, &ExcelDateTime::from_ymd(2016, 9, 7).unwrap(), &day_first)
        .unwrap();
    wb.save(&path).unwrap();

    let ds = ingest_excel_inferred_from_path(&path, None).unwrap();
    assert_eq!(ds.schema.fields[1], Field::new("start", DataType::Date));
    assert_eq!(ds.rows[0][1], Value::Date(NaiveDate::from_ymd_opt(2012, 8, 29).unwrap()));
    assert_eq!(ds.rows[1][1], Value::Date(NaiveDate::from_ymd_opt(2016, 9, 7).unwrap()));

    let _ = std::fs::remove_file(&path);
}
