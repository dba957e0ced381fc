use std::cell::Cell;
use std::rc::Rc;

use listflip::{
    AffineTransform, AnimationDuration, CellAnimation, Completion, Flipper, ItemPosition, Size,
    TableAnimation,
};
use listflip_adapter::{FrameAnimator, SimulatedList, ViewId};

const FRAME_MS: u64 = 16;
const ROWS: usize = 8;

#[derive(Clone, Copy, Debug)]
enum Demo {
    Fade,
    Top,
    Left,
    Custom,
    EvenRows,
    ReloadFade,
}

fn main() {
    for demo in [
        Demo::Fade,
        Demo::Top,
        Demo::Left,
        Demo::Custom,
        Demo::EvenRows,
        Demo::ReloadFade,
    ] {
        run(demo);
    }
}

fn run(demo: Demo) {
    println!("== {demo:?}");

    // Rows "arrive" after a load, then the list is reloaded and animated in.
    let mut list = SimulatedList::new(Size::new(375.0, 667.0), 64.0);
    let mut flipper = Flipper::new(FrameAnimator::<ViewId>::new());
    list.set_data_len(ROWS);
    if !matches!(demo, Demo::ReloadFade) {
        flipper.reload(&mut list, false, None);
    }

    let finished = Rc::new(Cell::new(false));
    let flag = Rc::clone(&finished);
    let on_complete: Completion = Box::new(move || flag.set(true));

    let started = match demo {
        Demo::Fade => flipper.animate_cells(
            &list,
            CellAnimation::fade(0.5).unwrap(),
            None,
            Some(on_complete),
        ),
        Demo::Top => flipper.animate_table(
            &list,
            TableAnimation::top(0.8).unwrap(),
            Some(on_complete),
        ),
        Demo::Left => flipper.animate_cells(
            &list,
            CellAnimation::left(0.5).unwrap(),
            None,
            Some(on_complete),
        ),
        Demo::Custom => {
            let rotation = AffineTransform::rotation(90f32.to_radians().sin());
            let flip = AffineTransform::scale(-1.0, -1.0);
            flipper.animate_cells(
                &list,
                CellAnimation::custom(0.6, rotation.concat(&flip)).unwrap(),
                None,
                Some(on_complete),
            )
        }
        Demo::EvenRows => {
            let evens: Vec<ItemPosition> = (0..ROWS).step_by(2).map(ItemPosition::row).collect();
            flipper.animate_cells(
                &list,
                CellAnimation::right(0.5).unwrap(),
                Some(&evens),
                Some(on_complete),
            )
        }
        Demo::ReloadFade => {
            flipper.reload_with_fade(&mut list, AnimationDuration::RELOAD_FADE, Some(on_complete))
        }
    };
    if let Err(err) = started {
        println!("not started: {err}");
        return;
    }

    let mut now_ms = 0u64;
    while !finished.get() {
        now_ms += FRAME_MS;
        flipper.animator_mut().tick(now_ms);
        if now_ms % (FRAME_MS * 8) == 0 {
            print_frame(&flipper, now_ms);
        }
    }
    println!("done at t={now_ms}ms");
}

fn print_frame(flipper: &Flipper<FrameAnimator<ViewId>>, now_ms: u64) {
    let animator = flipper.animator();
    let container = animator.appearance(&ViewId::Container);
    let rows: Vec<String> = (0..ROWS)
        .map(|r| {
            let a = animator.appearance(&ViewId::Row(ItemPosition::row(r)));
            format!("{:>6.1}/{:.2}", a.transform.tx, a.opacity)
        })
        .collect();
    println!(
        "t={now_ms:>4} table.ty={:>7.1} table.alpha={:.2} rows(tx/alpha)=[{}]",
        container.transform.ty,
        container.opacity,
        rows.join(" ")
    );
}
