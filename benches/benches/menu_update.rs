// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_menu::clock::ManualClock;
use understory_menu::config::MenuConfig;
use understory_menu::context::MenuContext;
use understory_menu::display::{MenuContent, MenuElement, content};
use understory_menu::dropdown::{Dropdown, DropdownControl, DropdownOptions};
use understory_menu::item::{ItemSpec, MenuItem};
use understory_menu::submenu::{Submenu, SubmenuOptions};
use understory_menu::view::EditorView;

#[derive(Default)]
struct BenchView {
    state: Cell<u32>,
}

impl EditorView for BenchView {
    type State = u32;
    type Transaction = u32;

    fn state(&self) -> u32 {
        self.state.get()
    }

    fn dispatch(&self, tr: u32) {
        self.state.set(tr);
    }
}

fn gen_items(n: usize) -> Vec<MenuContent<BenchView>> {
    (0..n)
        .map(|i| {
            let bit = (i % 32) as u32;
            let spec = ItemSpec::<BenchView>::new(move |s: &u32, dispatch, _, _| {
                dispatch(*s ^ (1 << bit));
            })
            .label(format!("item {i}"))
            .select(move |s: &u32| i % 7 != 0 || *s & 1 == 0)
            .enable(move |s: &u32| i % 5 != 0 || *s & 2 == 0)
            .active(move |s: &u32| *s & (1 << bit) != 0);
            content(MenuItem::new(spec).unwrap())
        })
        .collect()
}

/// A dropdown of `n` items split across submenus of `per_sub`.
fn gen_menu(n: usize, per_sub: usize) -> Dropdown<BenchView> {
    let mut items = gen_items(n);
    let mut content_out = Vec::new();
    let mut k = 0;
    while !items.is_empty() {
        let rest = items.split_off(per_sub.min(items.len()));
        let sub = Submenu::new(items, SubmenuOptions::new(format!("sub {k}")));
        content_out.push(content(sub));
        items = rest;
        k += 1;
    }
    Dropdown::new(content_out, DropdownOptions::new("Menu"))
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for &n in &[16usize, 128, 1024] {
        let cx = MenuContext::new(ManualClock::new(0), MenuConfig::default());
        let view = Rc::new(BenchView::default());
        let mut rendered = gen_menu(n, 16).render(&cx, &view).unwrap();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("combined_update_n{n}"), |b| {
            let mut s = 0_u32;
            b.iter(|| {
                s = s.wrapping_add(0x9E37_79B9);
                black_box(rendered.update(black_box(&s)));
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &n in &[16usize, 128] {
        let menu = gen_menu(n, 16);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("render_n{n}"), |b| {
            b.iter_batched(
                || MenuContext::new(ManualClock::new(0), MenuConfig::default()),
                |cx| {
                    let view = Rc::new(BenchView::default());
                    black_box(menu.render(&cx, &view).unwrap().node);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn open_menus(
    n: usize,
) -> (
    MenuContext,
    ManualClock,
    Vec<DropdownControl>,
    Rc<BenchView>,
) {
    let clock = ManualClock::new(0);
    let cx = MenuContext::new(clock.clone(), MenuConfig::default());
    let view = Rc::new(BenchView::default());
    let controls = (0..n)
        .map(|_| {
            let (_, control) = gen_menu(8, 4).render_with_control(&cx, &view).unwrap();
            control
        })
        .collect();
    (cx, clock, controls, view)
}

fn bench_outside_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("outside_click");
    for &n in &[1usize, 16, 64] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("open_then_close_n{n}"), |b| {
            b.iter_batched(
                || open_menus(n),
                |(cx, clock, controls, _view)| {
                    for control in &controls {
                        cx.mouse_down(Some(control.label()));
                    }
                    clock.advance(1_000);
                    cx.mouse_down(None);
                    black_box(cx.window_listener_count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update, bench_render, bench_outside_click);
criterion_main!(benches);
