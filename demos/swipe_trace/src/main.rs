// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted swipe session that exercises the tracing and diagnostics pipeline.
//!
//! Plays a handful of gestures through a
//! [`ReplayRig`](cardstack_harness::ReplayRig), mirroring stack lifecycle
//! events into both a
//! [`PrettyPrintSink`](cardstack_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](cardstack_debug::recorder::RecorderSink), then exports a
//! Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use kurbo::{Point, Size, Vec2};

use cardstack_core::backend::CardStage;
use cardstack_core::config::StackConfig;
use cardstack_core::controller::Dismissal;
use cardstack_core::geometry::StageMetrics;
use cardstack_core::trace::{
    CardPoseEvent, CommitEvent, DismissalSettledEvent, LayoutEvent, ReloadEvent, SnapBackEvent,
    SplitEvent, TraceSink, Tracer,
};
use cardstack_harness::{ReplayRig, SwipeScript};
use cardstack_motion::FADE_IN_SECONDS;

use cardstack_debug::pretty::PrettyPrintSink;
use cardstack_debug::recorder::RecorderSink;

const ITEM_COUNT: u32 = 8;

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- rig ---------------------------------------------------------------
    let metrics = StageMetrics::new(Size::new(320.0, 480.0), Size::new(280.0, 360.0));
    let mut rig = ReplayRig::new(StackConfig::DEFAULT, metrics, ITEM_COUNT);
    rig.reload();

    let reload_event = ReloadEvent {
        at_ms: rig.now_ms,
        total: rig.controller.model().total(),
        visible: rig.controller.config().visible_count(),
    };
    recorder.on_reload(&reload_event);
    // Route the pretty copy through the Tracer wrapper once, to prove it
    // dispatches.
    {
        let mut tracer = Tracer::new(&mut pretty);
        tracer.reload(&reload_event);
    }

    // -- scripted gestures -------------------------------------------------
    let grab = Point::new(140.0, 180.0);
    let start = Point::new(160.0, 240.0);
    let scripts = [
        SwipeScript::swipe(grab, start, Vec2::new(150.0, 8.0), 4),
        SwipeScript::swipe(grab, start, Vec2::new(24.0, -6.0), 2),
        SwipeScript::swipe(grab, start, Vec2::new(-150.0, 12.0), 4),
        SwipeScript::cancelled_swipe(grab, start, Vec2::new(-90.0, 0.0), 3),
        SwipeScript::press(grab, start),
        SwipeScript::swipe(grab, start, Vec2::new(120.0, -20.0), 4),
    ];

    let mut splits_seen = 0;
    for script in &scripts {
        rig.play(script);

        // New splits and queued outcomes from this gesture.
        for card in &rig.stage.splits[splits_seen..] {
            emit_split(&mut pretty, &mut recorder, rig.now_ms, card.index());
        }
        splits_seen = rig.stage.splits.len();

        for dismissal in &rig.stage.pending_dismissals {
            emit_commit(&mut pretty, &mut recorder, rig.now_ms, dismissal);
        }
        if let Some(card) = rig.stage.pending_snap_back {
            emit_snap_back(&mut pretty, &mut recorder, rig.now_ms, card.index());
        }

        // Settle flights and springs, then report how each dismissal landed.
        let pending: Vec<Dismissal> = rig.stage.pending_dismissals.clone();
        let created_before = rig.stage.created.len();
        rig.settle();

        for (i, dismissal) in pending.iter().enumerate() {
            let replacement = rig.stage.created.get(created_before + i).map(|c| c.index());
            emit_settled(
                &mut pretty,
                &mut recorder,
                rig.now_ms,
                dismissal.card.index(),
                replacement,
            );
            if replacement.is_some() {
                rig.now_ms += FADE_IN_SECONDS * 1000.0;
            }
        }

        emit_poses(&mut pretty, &mut recorder, &rig);
    }

    // -- rotate the stage --------------------------------------------------
    let rotated = StageMetrics::new(Size::new(480.0, 320.0), Size::new(280.0, 360.0));
    let changes = rig.controller.layout_changed(rotated);
    rig.stage.apply(rig.controller.model(), &changes);

    let layout_event = LayoutEvent {
        at_ms: rig.now_ms,
        width: rotated.container.width,
        height: rotated.container.height,
    };
    pretty.on_layout(&layout_event);
    recorder.on_layout(&layout_event);
    emit_poses(&mut pretty, &mut recorder, &rig);

    // -- export Chrome trace -----------------------------------------------
    let path = "swipe_trace.json";
    let file = File::create(path).expect("failed to create swipe_trace.json");
    let mut writer = BufWriter::new(file);
    cardstack_debug::chrome::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    let model = rig.controller.model();
    println!(
        "Wrote {path} ({} gestures, {} dismissed, {} remaining)",
        scripts.len(),
        model.dismissed(),
        model.remaining(),
    );
}

fn emit_split(pretty: &mut PrettyPrintSink, recorder: &mut RecorderSink, at_ms: f64, card: u32) {
    let e = SplitEvent { at_ms, card };
    pretty.on_split(&e);
    recorder.on_split(&e);
}

fn emit_commit(
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
    at_ms: f64,
    dismissal: &Dismissal,
) {
    let e = CommitEvent {
        at_ms,
        card: dismissal.card.index(),
        direction: dismissal.direction,
    };
    pretty.on_commit(&e);
    recorder.on_commit(&e);
}

fn emit_snap_back(
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
    at_ms: f64,
    card: u32,
) {
    let e = SnapBackEvent { at_ms, card };
    pretty.on_snap_back(&e);
    recorder.on_snap_back(&e);
}

fn emit_settled(
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
    at_ms: f64,
    card: u32,
    replacement: Option<u32>,
) {
    let e = DismissalSettledEvent {
        at_ms,
        card,
        replacement,
    };
    pretty.on_dismissal_settled(&e);
    recorder.on_dismissal_settled(&e);
}

fn emit_poses(pretty: &mut PrettyPrintSink, recorder: &mut RecorderSink, rig: &ReplayRig) {
    let model = rig.controller.model();
    let mut poses = Vec::new();
    for index in 0..model.len() {
        let card = model.card_at(index);
        let pose = model.pose(card);
        poses.push(CardPoseEvent {
            card: card.index(),
            index,
            x: pose.translation.x,
            y: pose.translation.y,
            scale: pose.scale,
            rotation: pose.rotation,
            animated: false,
        });
    }
    pretty.on_poses(rig.now_ms, &poses);
    recorder.on_poses(rig.now_ms, &poses);
}
