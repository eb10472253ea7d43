mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{init_logger, RecordingUi};
use guido_animations::prelude::*;
use guido_animations::AnimationError;
use tokio::runtime::Handle;
use tokio::time::sleep;

fn context() -> Context {
    init_logger();
    Context::with_handle(Handle::current())
}

fn transition(ctx: &Context, ui: &RecordingUi) -> Animator<Transition> {
    Animator::new(ctx, Transition::new(ui.layout("first"), ui.layout("second")))
        .fps(60)
        .duration(Duration::from_secs(1))
}

#[tokio::test(start_paused = true)]
async fn transition_cross_fades_in_one_second() {
    let ctx = context();
    let mut ui = RecordingUi::new();

    let mut fade = transition(&ctx, &ui);
    fade.build(&mut ui);
    assert_eq!(ui.draws().len(), 1);

    fade.start(PlayMode::Forward);
    ui.clear();
    fade.build(&mut ui);
    assert!(fade.is_running());
    assert_eq!(fade.current_key_frame(), KeyFrame(0));
    assert_eq!(fade.current_progress(), 0.0);
    let draws = ui.draws();
    assert_eq!((draws[0].name, draws[0].alpha), ("first", 1.0));
    assert_eq!((draws[1].name, draws[1].alpha), ("second", 0.0));

    sleep(Duration::from_millis(505)).await;
    assert!(ctx.take_frame_request());
    ui.clear();
    fade.build(&mut ui);
    let progress = fade.current_progress();
    assert!((progress - 0.5).abs() <= 1.0 / 60.0, "progress {}", progress);
    for draw in ui.draws() {
        assert!(draw.alpha > 0.0 && draw.alpha < 1.0, "{:?}", draw);
    }
    assert!(ui.is_balanced());

    sleep(Duration::from_millis(600)).await;
    assert!(!fade.is_running());
    assert_eq!(fade.current_key_frame(), KeyFrame(1));
    ui.clear();
    fade.build(&mut ui);
    let draws = ui.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!((draws[0].name, draws[0].alpha), ("second", 1.0));
}

#[tokio::test(start_paused = true)]
async fn progress_is_monotonic_both_ways() {
    let ctx = context();
    let ui = RecordingUi::new();
    let mut fade = transition(&ctx, &ui).duration(Duration::from_millis(200));

    for mode in [PlayMode::Forward, PlayMode::Backward] {
        fade.start(mode);
        let mut last = fade.current_progress();
        while fade.is_running() {
            sleep(Duration::from_millis(10)).await;
            let progress = fade.current_progress();
            if !fade.is_running() {
                break;
            }
            assert!((0.0..=1.0).contains(&progress));
            match mode {
                PlayMode::Forward => assert!(progress >= last),
                PlayMode::Backward => assert!(progress <= last),
            }
            last = progress;
        }
    }
    assert_eq!(fade.current_key_frame(), KeyFrame(0));
}

#[tokio::test(start_paused = true)]
async fn animator_survives_rebuilding_every_frame() {
    let ctx = context();
    let mut ui = RecordingUi::new();

    let frame = |ui: &mut RecordingUi| {
        ctx.begin_frame();
        let mut fade = transition(&ctx, ui).duration(Duration::from_millis(100));
        fade.build(ui);
        fade
    };

    frame(&mut ui).start(PlayMode::Forward);
    sleep(Duration::from_millis(50)).await;
    assert!(frame(&mut ui).is_running());

    sleep(Duration::from_millis(100)).await;
    let fade = frame(&mut ui);
    assert!(!fade.is_running());
    assert_eq!(fade.current_key_frame(), KeyFrame(1));
}

#[tokio::test(start_paused = true)]
async fn resize_cycle_ends_on_last_size() {
    let ctx = context();
    let mut ui = RecordingUi::new();
    let sizes = Rc::new(std::cell::RefCell::new(Vec::new()));

    struct Rect {
        size: Size,
        sizes: Rc<std::cell::RefCell<Vec<Size>>>,
    }

    impl Widget for Rect {
        fn build(&mut self, _ui: &mut dyn Ui) {
            self.sizes.borrow_mut().push(self.size);
        }
    }

    impl Resizable for Rect {
        fn set_size(&mut self, size: Size) {
            self.size = size;
        }
    }

    let rect = Rect {
        size: Size::default(),
        sizes: sizes.clone(),
    };
    let resize = Resize::new(
        &ctx,
        rect,
        [Size::new(100.0, 50.0), Size::new(200.0, 100.0)],
    );
    let mut animator = Animator::new(&ctx, resize).duration(Duration::from_millis(100));
    animator.build(&mut ui);
    animator.start_cycle(1, PlayMode::Forward);

    sleep(Duration::from_millis(150)).await;
    assert!(animator.is_running());
    assert_eq!(animator.remaining_cycles(), 0);

    sleep(Duration::from_millis(500)).await;
    animator.build(&mut ui);
    assert!(!animator.is_running());
    assert_eq!(animator.remaining_cycles(), 0);
    assert_eq!(sizes.borrow().last(), Some(&Size::new(200.0, 100.0)));
}

#[tokio::test(start_paused = true)]
async fn restart_preempts_the_running_animation() {
    let ctx = context();
    let ui = RecordingUi::new();
    let mut fade = Animator::new(
        &ctx,
        Transition::new(ui.layout("a"), ui.layout("b")).layout(ui.layout("c")),
    )
    .duration(Duration::from_millis(500));

    fade.start_cycle(0, PlayMode::Forward);
    sleep(Duration::from_millis(300)).await;

    fade.start(PlayMode::Forward);
    assert_eq!(fade.current_key_frame(), KeyFrame(0));
    assert!(fade.current_progress() < 0.1);

    sleep(Duration::from_millis(600)).await;
    assert!(!fade.is_running());
    assert_eq!(fade.current_key_frame(), KeyFrame(1));

    // The preempted run would have gone on to the last key frame
    sleep(Duration::from_secs(1)).await;
    assert_eq!(fade.current_key_frame(), KeyFrame(1));
}

#[tokio::test(start_paused = true)]
async fn trigger_on_change_fires_on_flips() {
    let ctx = context();
    let mut ui = RecordingUi::new();
    let toggled = Rc::new(Cell::new(false));

    let frame = |ui: &mut RecordingUi| {
        ctx.begin_frame();
        let value = toggled.clone();
        let mut fade = transition(&ctx, ui)
            .duration(Duration::from_millis(100))
            .trigger(Trigger::on_change(PlayMode::Forward, move || value.get()));
        fade.build(ui);
        fade
    };

    assert!(!frame(&mut ui).is_running());
    assert!(!frame(&mut ui).is_running());

    toggled.set(true);
    assert!(frame(&mut ui).is_running());
    sleep(Duration::from_millis(200)).await;

    // Same value as last seen, no restart
    let fade = frame(&mut ui);
    assert!(!fade.is_running());
    assert_eq!(fade.current_key_frame(), KeyFrame(1));

    toggled.set(false);
    assert!(frame(&mut ui).is_running());
    sleep(Duration::from_millis(200)).await;
    assert_eq!(frame(&mut ui).current_key_frame(), KeyFrame(0));
}

#[tokio::test(start_paused = true)]
async fn trigger_on_true_restarts_while_held() {
    let ctx = context();
    let mut ui = RecordingUi::new();
    let mut fade = transition(&ctx, &ui)
        .duration(Duration::from_millis(100))
        .trigger(Trigger::on_true(PlayMode::Forward, || true));

    fade.build(&mut ui);
    assert!(fade.is_running());
    sleep(Duration::from_millis(150)).await;

    fade.build(&mut ui);
    assert!(fade.is_running());
    assert_eq!(fade.current_key_frame(), KeyFrame(1));
}

#[tokio::test(start_paused = true)]
async fn layouts_can_start_their_animator() {
    let ctx = context();
    let mut ui = RecordingUi::new();
    let clicked = Rc::new(Cell::new(false));

    let click = clicked.clone();
    let mut fade = Animator::new(
        &ctx,
        Transition::new(
            move |_ui: &mut dyn Ui, starter: &dyn Starter| {
                if click.take() {
                    starter.start(PlayMode::Forward);
                }
            },
            ui.layout("details"),
        ),
    );

    fade.build(&mut ui);
    assert!(!fade.is_running());

    clicked.set(true);
    fade.build(&mut ui);
    assert!(fade.is_running());
}

#[tokio::test(start_paused = true)]
async fn hover_color_follows_the_pointer() {
    let ctx = context();
    let mut ui = RecordingUi::new();
    let text = StyleColorId(0);

    let mut hover = Animator::new(
        &ctx,
        HoverColor::new(ui.widget("label"), Color::BLACK, Color::WHITE, [text]),
    )
    .duration(Duration::from_millis(100));

    hover.build(&mut ui);
    assert!(!hover.is_running());

    ui.hovered = true;
    hover.build(&mut ui);
    assert!(hover.is_running());

    sleep(Duration::from_millis(150)).await;
    ui.clear();
    hover.build(&mut ui);
    assert_eq!(hover.current_key_frame(), KeyFrame(1));
    assert_eq!(ui.draws()[0].colors, [(text, Color::WHITE)]);

    ui.hovered = false;
    hover.build(&mut ui);
    assert!(hover.is_running());
    sleep(Duration::from_millis(150)).await;
    assert_eq!(hover.current_key_frame(), KeyFrame(0));
}

#[tokio::test(start_paused = true)]
async fn move_follows_its_steps() {
    let ctx = context();
    let mut ui = RecordingUi::new();
    ui.cursor = Vec2::new(10.0, 20.0);

    let mover = Move::new(&ctx, ui.layout("w"), MoveStep::new(100.0, 0.0))
        .step(MoveStep::new(0.0, 0.0).absolute());
    let mut animator = Animator::new(&ctx, mover)
        .fps(10)
        .duration(Duration::from_millis(1000));
    animator.build(&mut ui);
    animator.start(PlayMode::Forward);

    sleep(Duration::from_millis(550)).await;
    ui.clear();
    animator.build(&mut ui);
    assert_eq!(ui.draws()[0].cursor, Vec2::new(60.0, 20.0));

    animator.start_key_frames(KeyFrame(1), KeyFrame(2), 0, PlayMode::Forward);
    sleep(Duration::from_millis(1100)).await;
    ui.clear();
    animator.build(&mut ui);
    assert_eq!(ui.draws()[0].cursor, Vec2::ZERO);
}

#[tokio::test(start_paused = true)]
async fn ticks_wake_the_host() {
    let ctx = context();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    ctx.frames().set_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let ui = RecordingUi::new();
    let mut fade = transition(&ctx, &ui).fps(10).duration(Duration::from_millis(300));
    fade.start(PlayMode::Forward);

    // The host takes every request, so every tick wakes it again
    sleep(Duration::from_millis(150)).await;
    for _ in 0..3 {
        ctx.take_frame_request();
        sleep(Duration::from_millis(100)).await;
    }
    assert!(wakes.load(Ordering::SeqCst) >= 3);
    assert!(!fade.is_running());
}

#[tokio::test(start_paused = true)]
async fn custom_data_is_typed() {
    let ctx = context();
    let ui = RecordingUi::new();
    let fade = transition(&ctx, &ui);

    fade.set_custom_data(String::from("expanded"));
    assert_eq!(
        fade.custom_data::<String>().unwrap().as_deref(),
        Some("expanded")
    );

    let err = fade.custom_data::<u64>().unwrap_err();
    assert!(matches!(err, AnimationError::InvalidDataType { expected: "u64", .. }));
    assert!(err.to_string().contains("alloc::string::String"));
}

#[tokio::test(start_paused = true)]
async fn discarding_the_identity_stops_playback() {
    let ctx = context();
    let ui = RecordingUi::new();
    let mut fade = transition(&ctx, &ui).id("gone");
    fade.start_cycle(usize::MAX, PlayMode::Forward);
    sleep(Duration::from_millis(105)).await;
    assert!(fade.is_running());

    drop(fade);
    assert!(ctx.discard("gone"));
    ctx.take_frame_request();

    sleep(Duration::from_secs(5)).await;
    assert!(!ctx.take_frame_request());
    assert!(!ctx.states().contains("gone"));
}
