use criterion::{Criterion, criterion_group, criterion_main};
use garmin_connect_client::export::render_csv;
use serde_json::{Value, json};

fn activity_year() -> Value {
    let records: Vec<Value> = (0..1000)
        .map(|i| {
            json!({
                "activityId": 3_000_000_000u64 + i,
                "activityName": format!("Run #{i}, easy"),
                "startTimeLocal": "2019-08-18 07:30:00",
                "distance": 5012.3 + i as f64,
                "duration": 1800.5,
                "averageHR": 142.0,
                "calories": null,
                "activityType": {"typeId": 1, "typeKey": "running"}
            })
        })
        .collect();
    Value::Array(records)
}

fn bench_render_csv(c: &mut Criterion) {
    let payload = activity_year();
    c.bench_function("render_csv_1000_activities", |b| {
        b.iter(|| render_csv(&payload).expect("csv"))
    });
}

criterion_group!(benches, bench_render_csv);
criterion_main!(benches);
