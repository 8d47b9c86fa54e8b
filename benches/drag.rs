

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dashgrid::logging::{LogEvent, LogSink, LoggingResult};
use dashgrid::{CardView, DashboardEngine, DashboardItem, EngineConfig, GridPosition, Logger, Point};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

struct BenchCard(String);

impl CardView for BenchCard {
    fn title(&self) -> &str {
        &self.0
    }
}

const CARDS: [&str; 6] = ["dose", "count", "chart", "spectrum", "safety", "help"];

fn build_engine() -> DashboardEngine {
    let mut config = EngineConfig::default().with_logger(Logger::new(NullSink));
    config.enable_metrics();
    let mut engine = DashboardEngine::new(config);
    for id in CARDS {
        engine.register_card(id, Arc::new(BenchCard(id.to_string())));
    }
    engine.apply_layout(&[
        DashboardItem::left("dose", 0),
        DashboardItem::right("count", 0),
        DashboardItem::full("chart", 1),
        DashboardItem::full("spectrum", 2),
        DashboardItem::left("safety", 3),
        DashboardItem::right("help", 3),
    ]);
    engine.enter_edit_mode();
    engine
}

/// Pointer path sweeping down the whole dashboard and back.
fn pointer_path(steps: usize) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let y = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 } * 700.0;
            Point::new(40.0 + 280.0 * t, y)
        })
        .collect()
}

fn dense_drag_moves(c: &mut Criterion) {
    let path = pointer_path(2_000);
    c.bench_function("dense_drag_moves", |b| {
        b.iter(|| {
            let mut engine = build_engine();
            engine.press_handle(GridPosition::left(0), Point::new(40.0, 20.0));
            for point in &path {
                engine.pointer_move(black_box(*point));
            }
            engine.cancel_drag();
            engine
        });
    });
}

fn commit_cycle(c: &mut Criterion) {
    c.bench_function("commit_cycle", |b| {
        b.iter(|| {
            let mut engine = build_engine();
            engine.press_handle(GridPosition::left(0), Point::new(40.0, 20.0));
            engine.pointer_move(black_box(Point::new(40.0, 650.0)));
            engine.pointer_up();
            engine.snapshot()
        });
    });
}

criterion_group!(benches, dense_drag_moves, commit_cycle);
criterion_main!(benches);
