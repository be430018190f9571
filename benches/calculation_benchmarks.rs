//! Performance benchmarks for the payroll engine.
//!
//! Covers a single pay slip calculated directly, a single request through
//! the HTTP router, and period summaries over growing staff lists.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{SeededTipDraw, calculate_payroll};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{
    AllowanceBases, DeductionBases, Employee, EmployeeStatus, PayPeriod, Religion, TipRole,
};
use payroll_engine::report::{PayrollEntry, summarize_period};

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/enjoy_dive").expect("Failed to load config")
}

/// Creates an employee; every third one is a dive master.
fn create_employee(index: usize) -> Employee {
    let religion = Religion::ALL[index % Religion::ALL.len()];
    let (position, tip_role) = if index % 3 == 0 {
        ("Dive Master", Some(TipRole::DiveMaster))
    } else {
        ("Accountant", None)
    };

    Employee {
        id: format!("EMP{:04}", index),
        name: format!("Bench Employee {}", index),
        position: position.to_string(),
        department: ["Diving", "Office", "Transport"][index % 3].to_string(),
        email: String::new(),
        phone: String::new(),
        bank_account: String::new(),
        join_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        status: EmployeeStatus::Active,
        base_salary: Decimal::from(5_000_000 + (index as i64 % 20) * 500_000),
        overtime_rate: Some(Decimal::from(100_000)),
        allowances: AllowanceBases {
            transport: Decimal::from(500_000),
            meal: Decimal::from(300_000),
            ..AllowanceBases::default()
        },
        deductions: DeductionBases {
            tax: Decimal::from(250_000),
            health_insurance: Decimal::from(80_000),
            ..DeductionBases::default()
        },
        religion,
        is_management: false,
        tip_role,
    }
}

fn create_request_body(index: usize, period: &str) -> String {
    serde_json::json!({
        "employee": create_employee(index),
        "period": period,
        "overtime_hours": "4"
    })
    .to_string()
}

/// Benchmark: one pay slip without the HTTP layer.
fn bench_single_pay_slip(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();
    let draw = SeededTipDraw::from_settings(&config.settings().tip_pool);
    let employee = create_employee(0);
    let period = PayPeriod::new(4, 2024).unwrap();

    c.bench_function("single_pay_slip", |b| {
        b.iter(|| {
            black_box(calculate_payroll(
                black_box(&employee),
                &period,
                Decimal::from(4),
                config,
                &draw,
            ))
        })
    });
}

/// Benchmark: one request through the router.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = create_request_body(0, "4/2024");

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: period summaries for growing staff lists.
fn bench_period_summary(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();
    let draw = SeededTipDraw::from_settings(&config.settings().tip_pool);
    let period = PayPeriod::new(4, 2024).unwrap();

    let mut group = c.benchmark_group("period_summary");

    for staff in [10usize, 100, 1000] {
        let entries: Vec<PayrollEntry> = (0..staff)
            .map(|i| PayrollEntry {
                employee: create_employee(i),
                overtime_hours: Decimal::from(i as i64 % 8),
            })
            .collect();

        group.throughput(Throughput::Elements(staff as u64));
        group.bench_with_input(BenchmarkId::new("employees", staff), &entries, |b, entries| {
            b.iter(|| black_box(summarize_period(entries, &period, config, &draw)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_pay_slip,
    bench_single_request,
    bench_period_summary,
);
criterion_main!(benches);
