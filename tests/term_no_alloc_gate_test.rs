use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tetris_lite::core::GameState;
use tetris_lite::term::{encode_diff_into, FrameBuffer, GameView, Viewport};
use tetris_lite::types::GameAction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn render_and_diff_are_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut prev = FrameBuffer::new(viewport.width, viewport.height);
    let mut cur = FrameBuffer::new(viewport.width, viewport.height);
    let mut out = Vec::with_capacity(64 * 1024);

    let mut game = GameState::new(1);
    let mut snap = game.start_game();

    // Warm-up: first frames and one diff.
    view.render_into(&snap, viewport, &mut prev);
    game.apply_action(GameAction::MoveLeft);
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut cur);
    encode_diff_into(&prev, &cur, &mut out).unwrap();

    let allocs = with_alloc_counting(|| {
        for i in 0..100 {
            std::mem::swap(&mut prev, &mut cur);
            let action = if i % 2 == 0 {
                GameAction::MoveRight
            } else {
                GameAction::MoveLeft
            };
            game.apply_action(action);
            game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut cur);

            out.clear();
            encode_diff_into(&prev, &cur, &mut out).unwrap();
        }
    });

    assert_eq!(allocs, 0);
}
