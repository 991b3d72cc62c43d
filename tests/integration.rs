// Integration tests (native) for the `snap-puzzle` crate.
// These drive the board only through its public API with a recording surface,
// so they run under `cargo test` on the host without a browser.

use std::cell::Cell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use snap_puzzle::{Board, PuzzleConfig, Rect, Release, Surface, Vec2};

#[derive(Default)]
struct Frame {
    outlines: Vec<Rect>,
    blits: Vec<(&'static str, Rect)>,
}

impl Surface for Frame {
    type Image = &'static str;
    fn stroke_rect(&mut self, rect: Rect) {
        self.outlines.push(rect);
    }
    fn draw_image(&mut self, image: &&'static str, dest: Rect) {
        self.blits.push((*image, dest));
    }
}

const NAMES: [&str; 4] = ["top-left", "top-right", "bottom-left", "bottom-right"];

fn new_board(area: Rect, seed: u64) -> Board<&'static str, StdRng> {
    Board::new(area, NAMES.to_vec(), 2, StdRng::seed_from_u64(seed)).unwrap()
}

fn frame(board: &Board<&'static str, StdRng>) -> Frame {
    let mut f = Frame::default();
    board.render(&mut f);
    f
}

/// Grab `name` by its centre and drop its corner at `to`.
fn move_tile(board: &mut Board<&'static str, StdRng>, name: &str, to: Vec2) -> Release {
    let cell = board.cell_size();
    let half = Vec2::new(cell.x / 2.0, cell.y / 2.0);
    let pos = board
        .tiles()
        .iter()
        .find(|t| *t.image() == name)
        .unwrap()
        .position();
    let grab = pos + half;
    assert!(board.on_pointer_down(grab.x, grab.y));
    assert_eq!(*board.tiles().last().unwrap().image(), name);
    let target = to + half;
    board.on_pointer_drag(target.x, target.y);
    board.on_pointer_up()
}

/// Lift tiles topmost-first into a row far below the board, so none of
/// them overlaps another afterwards.
fn park_all(board: &mut Board<&'static str, StdRng>) {
    let n = board.tiles().len();
    for k in 0..n {
        let top = *board.tiles()[n - 1 - k].image();
        let r = move_tile(board, top, Vec2::new(2000.0 + 400.0 * k as f64, 2000.0));
        assert!(matches!(r, Release::Placed { .. }));
    }
}

fn solve(board: &mut Board<&'static str, StdRng>, slots: impl Fn(usize) -> Vec2) -> Vec<Release> {
    park_all(board);
    NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| move_tile(board, name, slots(i)))
        .collect()
}

#[test]
fn full_game_on_centered_board() {
    let cfg = PuzzleConfig::default();
    let area = cfg.play_area(1200.0, 900.0);
    assert_eq!(area, Rect::new(400.0, 250.0, 400.0, 400.0));
    let mut board = new_board(area, 42);

    let solved = Rc::new(Cell::new(0u32));
    let s = solved.clone();
    board.on_solved(move || s.set(s.get() + 1));

    // Drop each tile a few pixels off its slot; the snap pulls it in.
    let releases = solve(&mut board, |i| {
        Vec2::new(400.0 + (i % 2) as f64 * 200.0 + 6.0, 250.0 + (i / 2) as f64 * 200.0 + 9.0)
    });
    assert_eq!(releases.last(), Some(&Release::Solved));
    assert_eq!(
        releases.iter().filter(|r| **r == Release::Solved).count(),
        1
    );
    assert!(board.is_solved());
    assert_eq!(solved.get(), 1);

    let f = frame(&board);
    assert_eq!(f.outlines, vec![area]);
    for (name, dest) in &f.blits {
        let i = NAMES.iter().position(|n| n == name).unwrap();
        let expect = Rect::new(
            400.0 + (i % 2) as f64 * 200.0,
            250.0 + (i / 2) as f64 * 200.0,
            200.0,
            200.0,
        );
        assert_eq!(*dest, expect);
    }

    // Further interaction is locked out and never re-signals.
    assert!(!board.on_pointer_down(500.0, 350.0));
    assert_eq!(board.on_pointer_up(), Release::Idle);
    assert_eq!(solved.get(), 1);
}

#[test]
fn rendering_follows_grab_order() {
    let mut board = new_board(Rect::new(0.0, 0.0, 400.0, 400.0), 7);
    park_all(&mut board);
    let bottom = *board.tiles()[0].image();
    move_tile(&mut board, bottom, Vec2::new(900.0, 900.0));
    let f = frame(&board);
    assert_eq!(f.blits.len(), 4);
    assert_eq!(f.blits.last().unwrap().0, bottom);
    assert_eq!(f.blits.last().unwrap().1.origin, Vec2::new(900.0, 900.0));
}

#[test]
fn resize_reflows_but_keeps_solved_lock() {
    let cfg = PuzzleConfig::default();
    let mut board = new_board(cfg.play_area(400.0, 400.0), 3);
    solve(&mut board, |i| Vec2::new((i % 2) as f64 * 200.0, (i / 2) as f64 * 200.0));
    assert!(board.is_solved());

    let area = cfg.play_area(1000.0, 600.0);
    board.reposition(area).unwrap();
    assert_eq!(board.tiles().len(), 4);
    assert_eq!(board.cell_size(), Vec2::new(200.0, 200.0));
    assert_eq!(board.bounds(), area);
    for t in board.tiles() {
        let p = t.position();
        assert!(p.x >= 300.0 && p.x <= 500.0);
        assert!(p.y >= 100.0 && p.y <= 300.0);
    }
    assert!(board.is_solved());
    let p = board.tiles()[0].position();
    assert!(!board.on_pointer_down(p.x + 100.0, p.y + 100.0));
}

#[test]
fn resize_mid_game_keeps_playing() {
    let mut board = new_board(Rect::new(0.0, 0.0, 400.0, 400.0), 19);
    board.reposition(Rect::new(10.0, 20.0, 600.0, 300.0)).unwrap();
    assert_eq!(board.cell_size(), Vec2::new(300.0, 150.0));
    assert!(!board.is_solved());
    let releases = solve(&mut board, |i| {
        Vec2::new(10.0 + (i % 2) as f64 * 300.0, 20.0 + (i / 2) as f64 * 150.0)
    });
    assert_eq!(releases.last(), Some(&Release::Solved));
}

#[test]
fn seeded_layouts_are_reproducible() {
    let area = Rect::new(0.0, 0.0, 400.0, 400.0);
    let a = new_board(area, 1234);
    let b = new_board(area, 1234);
    let pa: Vec<Vec2> = a.tiles().iter().map(|t| t.position()).collect();
    let pb: Vec<Vec2> = b.tiles().iter().map(|t| t.position()).collect();
    assert_eq!(pa, pb);
}
