use std::time::{Duration, Instant};

use prizewheel_lib::{
    audio::CountingSound,
    input::{InputEvent, ScriptedEvents},
    messages::{sample, FixedFraction, Message, MessageTable, RngSource},
    presenter::{DrawCall, Palette, RecordingPresenter, Region, Stage},
    runner::{FrameOutcome, WheelRunner},
    settings::WheelSettings,
    wheel::{RenderCommand, WheelConfig, WheelController, WheelStatus},
};

fn two_way_table() -> MessageTable {
    MessageTable::new(vec![Message::new("A", 1.0), Message::new("B", 1.0)]).unwrap()
}

#[test]
fn half_total_draw_lands_on_first_boundary() {
    let table = two_way_table();
    let mut rng = FixedFraction(0.5);
    for _ in 0..100 {
        assert_eq!(sample(&table, &mut rng).unwrap().text, "A");
    }
}

#[test]
fn seeded_frequencies_match_weights() {
    let table = MessageTable::new(vec![
        Message::new("common", 70.0),
        Message::new("uncommon", 25.0),
        Message::new("rare", 5.0),
    ])
    .unwrap();
    let mut rng = RngSource::seeded(2024);
    let draws = 10_000;

    let mut counts = [0usize; 3];
    for _ in 0..draws {
        match sample(&table, &mut rng).unwrap().text.as_str() {
            "common" => counts[0] += 1,
            "uncommon" => counts[1] += 1,
            "rare" => counts[2] += 1,
            other => panic!("unexpected message {}", other),
        }
    }

    for (i, expected) in [0.70, 0.25, 0.05].iter().enumerate() {
        let observed = counts[i] as f64 / draws as f64;
        assert!((observed - expected).abs() < 0.02, "{} vs {}", observed, expected);
    }
}

#[test]
fn full_cycle_with_expiry() {
    let sound = CountingSound::new();
    let config = WheelConfig::new(5.0, Duration::from_secs(3), two_way_table()).unwrap();
    let mut wheel = WheelController::new(
        config,
        Box::new(FixedFraction(0.5)),
        Some(Box::new(sound.clone())),
    )
    .unwrap();
    let start = Instant::now();

    assert_eq!(wheel.on_tick(start, true).unwrap(), RenderCommand::ShowWheelRotated(0.0));

    // 72 frames at 5 degrees lands back on 0
    let mut last = RenderCommand::ShowWheelStatic;
    for frame in 1..=72u64 {
        last = wheel
            .on_tick(start + Duration::from_millis(frame * 16), false)
            .unwrap();
    }
    assert_eq!(last, RenderCommand::ShowWheelRotated(0.0));
    assert_eq!(wheel.status(), WheelStatus::Spinning);

    let result = wheel.on_tick(start + Duration::from_secs(4), false).unwrap();
    assert_eq!(result, RenderCommand::ShowMessage("A".into()));
    assert_eq!(sound.plays(), 1);

    wheel.on_tick(start + Duration::from_secs(5), false).unwrap();
    assert_eq!(sound.plays(), 1);

    assert_eq!(
        wheel.on_tick(start + Duration::from_secs(6), true).unwrap(),
        RenderCommand::ShowWheelStatic
    );
    assert_eq!(wheel.status(), WheelStatus::Idle);
}

#[test]
fn headless_runner_from_settings() {
    let mut settings = WheelSettings::default();
    settings.messages = vec![Message::new("Jackpot", 1.0)];
    settings.spin_duration_ms = 20;
    let config = settings.to_config().unwrap();

    let sound = CountingSound::new();
    let controller =
        WheelController::new(config, Box::new(RngSource::seeded(5)), Some(Box::new(sound.clone())))
            .unwrap();
    let events = ScriptedEvents::new(vec![
        vec![InputEvent::Activate],
        vec![],
        vec![],
        vec![InputEvent::Activate],
        vec![InputEvent::Quit],
    ]);
    let mut runner = WheelRunner::new(
        controller,
        Box::new(events),
        RecordingPresenter::default(),
        Stage::new(Palette::default()),
    );

    let start = Instant::now();
    let mut outcomes = Vec::new();
    for i in 0..5u64 {
        outcomes.push(runner.run_frame(start + Duration::from_millis(i * 15)).unwrap());
    }

    assert_eq!(outcomes.last(), Some(&FrameOutcome::Quit));
    assert_eq!(runner.controller().status(), WheelStatus::Idle);
    assert_eq!(sound.plays(), 1);

    let calls = &runner.presenter().calls;
    let message_at = calls
        .iter()
        .position(|c| matches!(c, DrawCall::Text(text, _) if text == "Jackpot"))
        .unwrap();
    assert_eq!(calls[message_at + 1], DrawCall::Clear(Region::Message));
}
