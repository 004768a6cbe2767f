//! End-to-end gesture scenarios through the public container API

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use ceiling_animation::{AnimationScheduler, FlingConfig};
use ceiling_core::events::{TouchEvent, TouchPhase};
use ceiling_layout::{
    CeilingConfig, CeilingLayout, ChildSpec, NestedScrollParent, TargetKind, TargetNode,
    TouchConfig, TouchState, VirtualListState,
};

fn layout_with_scheduler(
    header: i32,
    sticky: i32,
    trailing: i32,
    min_height: i32,
) -> (CeilingLayout, Arc<Mutex<AnimationScheduler>>) {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let mut layout = CeilingLayout::with_touch_config(
        CeilingConfig::new(1),
        TouchConfig::default(),
        FlingConfig::default(),
    );
    layout.set_scheduler(&scheduler);
    let children = [
        ChildSpec::new(header),
        ChildSpec::new(sticky),
        ChildSpec::new(trailing),
    ];
    layout.measure(&children, min_height).unwrap();
    (layout, scheduler)
}

fn settle(layout: &mut CeilingLayout, scheduler: &Arc<Mutex<AnimationScheduler>>) {
    for _ in 0..2000 {
        scheduler.lock().unwrap().tick(0.016);
        if !layout.tick() {
            return;
        }
    }
    panic!("animation never settled");
}

#[derive(Default)]
struct ForwardLog {
    post_scroll: Vec<(i32, i32)>,
    stopped: bool,
}

struct LoggingParent(Rc<RefCell<ForwardLog>>);

impl NestedScrollParent for LoggingParent {
    fn start_session(&mut self, _axes: u32) -> bool {
        true
    }

    fn pre_scroll(&mut self, _dx: i32, _dy: i32) -> (i32, i32) {
        (0, 0)
    }

    fn post_scroll(&mut self, _cdx: i32, cdy: i32, _udx: i32, udy: i32) {
        self.0.borrow_mut().post_scroll.push((cdy, udy));
    }

    fn pre_fling(&mut self, _vx: f32, _vy: f32) -> bool {
        false
    }

    fn post_fling(&mut self, _vx: f32, _vy: f32, _consumed: bool) -> bool {
        false
    }

    fn stop_session(&mut self) {
        self.0.borrow_mut().stopped = true;
    }
}

#[test]
fn offset_stays_clamped_through_an_erratic_drag() {
    let (mut layout, _scheduler) = layout_with_scheduler(300, 48, 600, 800);
    let offsets = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&offsets);
    layout.on_scroll(move |offset| sink.borrow_mut().push(offset));

    let mut y = 5000;
    let mut t = 0.0;
    layout.handle_touch(TouchEvent::new(TouchPhase::Down, 0, y, t));
    for delta in [250, -700, 1000, -50, 3, -900, 2000, -10] {
        y -= delta;
        t += 16.0;
        layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, y, t));
    }
    layout.handle_touch(TouchEvent::new(TouchPhase::Cancel, 0, y, t));

    for offset in offsets.borrow().iter() {
        assert!((0..=300).contains(offset), "offset {offset} out of bounds");
    }
    assert!((0..=300).contains(&layout.offset()));
}

#[test]
fn ceiling_scale_is_exact_at_both_ends() {
    let (mut layout, _scheduler) = layout_with_scheduler(300, 48, 600, 800);
    let samples = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&samples);
    layout.on_ceiling_scroll(move |ceiling, scale| sink.borrow_mut().push((ceiling, scale)));

    let target = TargetNode::new(1, TargetKind::NestedChild);
    layout.on_nested_pre_scroll(&target, 300);
    layout.on_nested_pre_scroll(&target, -300);

    let samples = samples.borrow();
    assert_eq!(samples.first(), Some(&(true, 1.0)));
    assert_eq!(samples.last(), Some(&(false, 0.0)));
}

#[test]
fn own_fling_moves_the_offset_monotonically() {
    let (mut layout, scheduler) = layout_with_scheduler(300, 48, 600, 800);
    let offsets = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&offsets);
    layout.on_scroll(move |offset| sink.borrow_mut().push(offset));

    let mut y = 3000;
    let mut t = 0.0;
    layout.handle_touch(TouchEvent::new(TouchPhase::Down, 0, y, t));
    for _ in 0..10 {
        y -= 12;
        t += 16.0;
        layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, y, t));
    }
    layout.handle_touch(TouchEvent::new(TouchPhase::Up, 0, y, t));
    assert_eq!(layout.state(), TouchState::Flinging);
    settle(&mut layout, &scheduler);

    let offsets = offsets.borrow();
    assert!(offsets.windows(2).all(|w| w[1] >= w[0]), "offset regressed");
    assert_eq!(layout.state(), TouchState::Idle);
}

#[test]
fn linked_fling_handoff_matches_the_two_region_model() {
    // scroll_range 100, container already at 40
    let (mut layout, scheduler) = layout_with_scheduler(100, 48, 600, 800);
    layout.set_offset_allowance(0);
    let children = [ChildSpec::new(100), ChildSpec::new(48), ChildSpec::new(600)];
    layout.measure(&children, 800).unwrap();
    let target = TargetNode::new(1, TargetKind::NestedChild);
    layout.on_nested_pre_scroll(&target, 40);
    assert_eq!(layout.offset(), 40);

    // Weak upward fling dies inside the container's range: fully consumed,
    // the child must not start its own momentum.
    assert!(layout.on_nested_pre_fling(&target, 300.0));
    settle(&mut layout, &scheduler);
    assert_eq!(layout.offset(), 70);

    // Strong upward fling overshoots the range: the ceiling locks and the
    // child keeps the residual momentum.
    assert!(!layout.on_nested_pre_fling(&target, 4000.0));
    settle(&mut layout, &scheduler);
    assert_eq!(layout.offset(), 100);
    assert_eq!(layout.ceiling_state(), (true, 1.0));
}

#[test]
fn downward_fling_spends_the_child_offset_first() {
    let (mut layout, scheduler) = layout_with_scheduler(100, 48, 600, 800);
    let target_at_top = TargetNode::new(1, TargetKind::NestedChild);
    layout.on_nested_pre_scroll(&target_at_top, 100);
    assert_eq!(layout.offset(), 100);

    // Child scrolled 60 px down; travel 1200²/3000 = 480 px crosses into the
    // container's range and bottoms out, revealing the whole header.
    let target = TargetNode::new(1, TargetKind::NestedChild).with_offset(60);
    assert!(!layout.on_nested_pre_fling(&target, -1200.0));
    settle(&mut layout, &scheduler);
    assert_eq!(layout.offset(), 0);
}

#[test]
fn wrapper_target_resolves_to_the_virtual_list() {
    let (mut layout, _scheduler) = layout_with_scheduler(300, 48, 600, 800);
    let target = TargetNode::new(1, TargetKind::RefreshWrapper)
        .with_content_index(0)
        .child(
            TargetNode::new(2, TargetKind::VirtualList).with_virtual_state(VirtualListState {
                items_above: 3,
                item_extent: 100,
                pixel_offset: 25,
            }),
        );
    layout.on_nested_pre_scroll(&target, 300);
    assert_eq!(layout.offset(), 300);

    // The list sits 325 px down, so a downward delta must not reveal the
    // header yet.
    assert_eq!(layout.on_nested_pre_scroll(&target, -50), 0);
    assert_eq!(layout.offset(), 300);
}

#[test]
fn long_drag_forwards_the_overflow_to_the_ancestor() {
    let (mut layout, _scheduler) = layout_with_scheduler(300, 48, 600, 800);
    let log = Rc::new(RefCell::new(ForwardLog::default()));
    layout.set_parent(Box::new(LoggingParent(Rc::clone(&log))));

    // One 300 px drag against a 300 px range: 8 px go to slop, the container
    // absorbs 292, nothing is left over yet.
    let mut t = 0.0;
    layout.handle_touch(TouchEvent::new(TouchPhase::Down, 0, 2000, t));
    t += 16.0;
    layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, 1700, t));
    assert_eq!(layout.offset(), 292);

    // The next 58 px: 8 fill the range, 50 overflow upward.
    t += 16.0;
    layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, 1642, t));
    assert_eq!(layout.offset(), 300);
    assert_eq!(log.borrow().post_scroll.last(), Some(&(8, 50)));

    // Finger rests before release, so no fling keeps the session open.
    layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, 1642, t + 700.0));
    layout.handle_touch(TouchEvent::new(TouchPhase::Up, 0, 1642, t + 716.0));
    assert!(log.borrow().stopped);
}

#[test]
fn reconfigured_container_remeasures_cleanly_mid_session() {
    let (mut layout, _scheduler) = layout_with_scheduler(300, 48, 600, 800);
    let target = TargetNode::new(1, TargetKind::NestedChild);
    layout.on_nested_pre_scroll(&target, 250);
    assert_eq!(layout.offset(), 250);

    // Shrinking the range clamps the live offset into it.
    layout.set_offset_allowance(200);
    let children = [ChildSpec::new(300), ChildSpec::new(48), ChildSpec::new(600)];
    layout.measure(&children, 800).unwrap();
    assert_eq!(layout.scroll_range(), 100);
    assert_eq!(layout.offset(), 100);
}
