use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geoscape::core::{decode_world_map, FileMap, GlobeRules};
use geoscape::term::{MapView, Surface, Window, WindowPopup};

fn world_map_bytes(records: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(records * 20);
    for i in 0..records {
        let base = (i % 2880) as i16;
        let sentinel = if i % 3 == 0 { -1 } else { base };
        for v in [base, 0, base + 8, 0, base + 8, 8, sentinel, 8, (i % 13) as i16, 0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    bytes
}

fn bench_decode(c: &mut Criterion) {
    let bytes = world_map_bytes(4000);
    c.bench_function("decode_world_map_4000", |b| {
        b.iter(|| decode_world_map(black_box(bytes.as_slice())).unwrap())
    });
}

fn bench_window_open(c: &mut Criterion) {
    let bg = Surface::new(320, 200, 0, 0);
    let mut screen = Surface::new(320, 200, 0, 0);

    c.bench_function("window_open_10_frames", |b| {
        b.iter(|| {
            let mut win = Window::new(256, 160, 32, 20, WindowPopup::Both);
            win.set_color(100);
            win.set_bg(Some(&bg));
            for _ in 0..10 {
                win.blit(&mut screen);
            }
        })
    });
}

fn bench_map_view(c: &mut Criterion) {
    let mut rules = GlobeRules::new();
    rules
        .load_json(
            r#"{ "polygons": [[1, 0, 0, 40, 0, 40, 40, 0, 40], [2, 300, -20, 20, -20, 350, 10]] }"#,
            &FileMap::new(),
        )
        .unwrap();
    let view = MapView::default();
    let mut surface = Surface::new(320, 200, 0, 0);

    c.bench_function("map_view_320x200", |b| {
        b.iter(|| view.render_into(black_box(&rules), &mut surface))
    });
}

criterion_group!(benches, bench_decode, bench_window_open, bench_map_view);
criterion_main!(benches);
