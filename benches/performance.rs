use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;
use trade_ledger::core::services::ReportService;
use trade_ledger::domain::{
    Bank, CashFlow, DateRange, ExpenseEntry, Ledger, Platform, TradeEntry, TradeKind,
    TransferEntry,
};
use trade_ledger::utils::persistence::{load_ledger_from_file, save_ledger_to_file};

fn build_sample_ledger(entry_count: usize) -> Ledger {
    let mut ledger = Ledger::new("Benchmark");
    ledger.add_bank(Bank::new("Maybank"));
    ledger.add_bank(Bank::new("CIMB"));
    ledger.add_platform(Platform::new("Binance"));
    ledger.add_platform(Platform::new("OKX"));

    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    for idx in 0..entry_count {
        let platform = if idx % 2 == 0 { "Binance" } else { "OKX" };
        let bank = if idx % 3 == 0 { "CIMB" } else { "Maybank" };
        let quantity = 50.0 + (idx % 100) as f64;
        let mut entry = TradeEntry::new(
            format!("ORD-{idx}"),
            bank,
            platform,
            "USDT",
            "MYR",
            quantity * 4.7,
            4.7,
            quantity,
            "counterparty",
            "bench",
        );
        entry.created_at = start + Duration::days((idx % 365) as i64);
        let kind = if idx % 4 == 0 {
            TradeKind::Sale
        } else {
            TradeKind::Purchase
        };
        ledger.add_trade(kind, entry);

        if idx % 25 == 0 {
            ledger.add_transfer(TransferEntry::new("Binance", "OKX", 5.0, "bench"));
        }
        if idx % 40 == 0 {
            ledger.add_expense(ExpenseEntry::new("Maybank", 3.0, CashFlow::Expense, "bench"));
        }
    }
    ledger
}

fn bench_ledger_io(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("ledger.json");

    c.bench_function("ledger_save_10k", |b| {
        b.iter(|| {
            save_ledger_to_file(&ledger, &file_path).expect("save ledger");
        })
    });

    save_ledger_to_file(&ledger, &file_path).expect("seed");

    c.bench_function("ledger_load_10k", |b| {
        b.iter(|| {
            let loaded = load_ledger_from_file(&file_path).expect("load ledger");
            black_box(loaded);
        })
    });
}

fn bench_dashboard(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));

    c.bench_function("dashboard_full_history", |b| {
        b.iter(|| {
            let summary = ReportService::dashboard(&ledger, None);
            black_box(summary);
        })
    });

    let range = DateRange::new(
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap().date_naive(),
        Utc.with_ymd_and_hms(2025, 5, 31, 0, 0, 0).unwrap().date_naive(),
    )
    .expect("valid range");

    c.bench_function("dashboard_date_window", |b| {
        b.iter(|| {
            let summary = ReportService::dashboard(&ledger, Some(range));
            black_box(summary);
        })
    });
}

criterion_group!(benches, bench_ledger_io, bench_dashboard);
criterion_main!(benches);
