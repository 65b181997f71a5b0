use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seastate::{pick_index, SourceExtractor, CURRENT, WAVE};
use serde_json::json;

fn bench_alignment(c: &mut Criterion) {
    let times: Vec<String> = (0..24).map(|h| format!("2024-01-01T{h:02}:00")).collect();
    let target = Some(Utc.with_ymd_and_hms(2024, 1, 1, 17, 25, 0).unwrap());

    let waves = json!({
        "hourly": {
            "time": times,
            "wave_height": vec![1.2; 24],
            "wave_direction": vec![280; 24],
            "swell_wave_height": vec![0.9; 24],
            "swell_wave_direction": vec![290; 24],
            "wind_wave_height": vec![0.3; 24],
            "wind_wave_direction": vec![250; 24],
        }
    });
    let currents = json!({
        "hourly": { "time": times, "current_u": vec![0.3; 24], "current_v": vec![-0.1; 24] }
    });

    c.bench_function("pick_index", |b| b.iter(|| pick_index(black_box(&times), target)));
    c.bench_function("extract_wave", |b| {
        let extractor = SourceExtractor::new(WAVE);
        b.iter(|| extractor.extract(black_box(&waves), target))
    });
    c.bench_function("extract_current_uv", |b| {
        let extractor = SourceExtractor::new(CURRENT);
        b.iter(|| extractor.extract(black_box(&currents), target))
    });
}

criterion_group!(benches, bench_alignment);
criterion_main!(benches);
