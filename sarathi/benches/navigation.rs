//! Benchmark obstacle scanning and full navigation ticks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sarathi::annotation::NullSink;
use sarathi::config::SarathiConfig;
use sarathi::core::Vec2;
use sarathi::grid::OccupancyGrid;
use sarathi::nav::{
    Motion, Navigator, NavigatorConfig, ScanParams, Surroundings, VehicleState, scan_for_obstacles,
};
use sarathi::sim::{MapDriveScenario, TerrainSettings, terrain};

/// Rocky 200 m world with a cleared center.
fn rocky_world() -> OccupancyGrid {
    let mut grid = OccupancyGrid::square(200.0, 201).unwrap();
    let settings = TerrainSettings::default();
    terrain::scatter_rock_clumps(&mut grid, &settings, &mut StdRng::seed_from_u64(1));
    terrain::clear_center(&mut grid);
    grid
}

fn bench_obstacle_scan(c: &mut Criterion) {
    let grid = rocky_world();
    let mut group = c.benchmark_group("obstacle_scan");

    for curved in [false, true] {
        let config = if curved {
            NavigatorConfig::curved()
        } else {
            NavigatorConfig::linear()
        };
        let vehicle = VehicleState::default()
            .at(Vec2::ZERO, Vec2::UNIT_X)
            .with_speed(15.0)
            .with_curvature(0.02);
        let motion = Motion::of(&vehicle);
        let relative_speed = motion.relative_speed();
        let params = ScanParams {
            horizon: config.obstacle_look_ahead_time(motion.speed, relative_speed),
            radius: config.safety_radius(relative_speed),
            wing_slope: config.wing_slope(relative_speed),
            curved,
        };
        let label = if curved { "curved" } else { "linear" };

        group.bench_with_input(BenchmarkId::from_parameter(label), &params, |b, params| {
            b.iter(|| {
                let scan = scan_for_obstacles(black_box(&grid), black_box(&motion), *params, &mut NullSink);
                black_box(scan)
            })
        });
    }

    group.finish();
}

fn bench_navigator_update(c: &mut Criterion) {
    let grid = rocky_world();
    let vehicle = VehicleState::default()
        .at(Vec2::ZERO, Vec2::UNIT_X)
        .with_speed(15.0);
    let mut navigator = Navigator::new(NavigatorConfig::curved(), vehicle);

    c.bench_function("navigator_update", |b| {
        b.iter(|| {
            let output = navigator.update(&Surroundings::new(&grid), 0.0, 0.0, &mut NullSink);
            black_box(output)
        })
    });
}

fn bench_scenario_tick(c: &mut Criterion) {
    let mut scenario = MapDriveScenario::new(&SarathiConfig::default()).unwrap();

    c.bench_function("scenario_tick", |b| {
        b.iter(|| {
            let output = scenario.tick(&mut NullSink);
            black_box(output)
        })
    });
}

criterion_group!(
    benches,
    bench_obstacle_scan,
    bench_navigator_update,
    bench_scenario_tick
);
criterion_main!(benches);
