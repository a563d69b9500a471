//! Criterion benchmarks for the Black kernel and the ISDA CDS method.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::IsdaCurve;
use pricer_core::types::{Date, HolidayCalendar, WeekendCalendar};
use pricer_models::analytical::{BlackFormula, BlackFunctionData, EuropeanOption};
use pricer_models::instruments::credit::{CdsDates, IsdaCdsDefinition, IsdaCdsMethod};

fn bench_black(c: &mut Criterion) {
    let mut group = c.benchmark_group("black");
    let option = EuropeanOption::new(0.03_f64, 5.0, true);
    let data = BlackFunctionData::new(0.032, 4.2, 0.25);

    group.bench_function("price", |b| {
        b.iter(|| BlackFormula.price(black_box(&option), black_box(&data)))
    });
    group.bench_function("price_adjoint", |b| {
        b.iter(|| BlackFormula.price_adjoint(black_box(&option), black_box(&data)))
    });
    group.bench_function("greeks", |b| {
        b.iter(|| {
            let f = black_box(0.032);
            let v = black_box(0.25);
            (
                BlackFormula.delta(&option, f, v),
                BlackFormula.gamma(&option, f, v),
                BlackFormula.vega(&option, f, v),
                BlackFormula.driftless_theta(&option, f, v),
            )
        })
    });

    group.finish();
}

fn discount_curve() -> IsdaCurve {
    IsdaCurve::new(
        "IR_CURVE",
        vec![0.08, 0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 30.0],
        vec![0.0019, 0.0027, 0.0041, 0.0060, 0.0049, 0.0074, 0.0141, 0.0196, 0.0254, 0.0330],
        5.0 / 365.0,
    )
    .unwrap()
}

fn bench_isda_cds(c: &mut Criterion) {
    let mut group = c.benchmark_group("isda_cds");
    let method = IsdaCdsMethod::default();
    let discount = discount_curve();
    let dates = CdsDates::standard(Date::from_ymd(2013, 6, 20).unwrap(), &WeekendCalendar);
    let calendar = HolidayCalendar::new("MondayToFriday", []);

    for years in [1, 5, 10] {
        let maturity = Date::from_ymd(2013 + years, 6, 20).unwrap();
        let start = IsdaCdsDefinition::default_start_date(maturity, &calendar).unwrap();
        let cds = IsdaCdsDefinition::builder(start, maturity)
            .notional(1.0e9)
            .coupon(0.01)
            .build()
            .unwrap();
        let hazard = IsdaCurve::flat("HAZARD", 0.02).unwrap();

        group.bench_with_input(BenchmarkId::new("upfront_charge", years), &cds, |b, cds| {
            b.iter(|| method.upfront_charge(black_box(cds), &discount, &hazard, &dates, false))
        });
        group.bench_with_input(
            BenchmarkId::new("upfront_from_spread", years),
            &cds,
            |b, cds| {
                b.iter(|| {
                    method.upfront_charge_from_spread(
                        black_box(cds),
                        &discount,
                        black_box(0.012),
                        &dates,
                        false,
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_black, bench_isda_cds);
criterion_main!(benches);
