// SPDX-License-Identifier: MPL-2.0
//! End-to-end scheduling behavior over a recording presenter.
//!
//! All async tests run on a paused Tokio clock: sleeps complete as soon as
//! the runtime is idle, and recorded timestamps are exact.

use approx::assert_abs_diff_eq;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use toast_queue::diagnostics::{BufferCapacity, DiagnosticsCollector, ToastEvent};
use toast_queue::domain::{Frame, ToastLength, ToastRequest};
use toast_queue::presenter::{
    Presenter, Recorded, RecordedCall, RecordingHandle, RecordingPresenter,
};
use toast_queue::scheduler::{QueueStatus, ToastScheduler};
use toast_queue::style::StyleConfig;
use tokio::time::Instant;

/// Tolerance for timestamps, in seconds.
const TIME_EPSILON: f64 = 0.002;

/// Observed lifecycle of one toast.
#[derive(Debug)]
struct Timeline {
    message: String,
    attached: Instant,
    fade_in: (Instant, Duration),
    fade_out: (Instant, Duration),
    detached: Instant,
}

impl Timeline {
    fn hold(&self) -> Duration {
        self.fade_out
            .0
            .duration_since(self.fade_in.0 + self.fade_in.1)
    }
}

fn timelines(presenter: &RecordingPresenter) -> Vec<Timeline> {
    let mut by_serial: BTreeMap<u64, Vec<Recorded>> = BTreeMap::new();
    for recorded in presenter.calls() {
        let serial = match &recorded.call {
            RecordedCall::Attach { serial, .. }
            | RecordedCall::Animate { serial, .. }
            | RecordedCall::Detach { serial } => *serial,
        };
        by_serial.entry(serial).or_default().push(recorded);
    }

    by_serial
        .into_values()
        .map(|calls| {
            assert_eq!(calls.len(), 4, "incomplete lifecycle: {calls:?}");
            let RecordedCall::Attach { message, .. } = &calls[0].call else {
                panic!("expected attach first, got {:?}", calls[0].call);
            };
            let RecordedCall::Animate { duration: fade_in, .. } = calls[1].call else {
                panic!("expected fade-in, got {:?}", calls[1].call);
            };
            let RecordedCall::Animate { duration: fade_out, .. } = calls[2].call else {
                panic!("expected fade-out, got {:?}", calls[2].call);
            };
            assert!(matches!(calls[3].call, RecordedCall::Detach { .. }));
            Timeline {
                message: message.clone(),
                attached: calls[0].at,
                fade_in: (calls[1].at, fade_in),
                fade_out: (calls[2].at, fade_out),
                detached: calls[3].at,
            }
        })
        .collect()
}

fn assert_secs(actual: Duration, expected: f64) {
    assert_abs_diff_eq!(actual.as_secs_f64(), expected, epsilon = TIME_EPSILON);
}

fn scheduler() -> ToastScheduler<RecordingPresenter> {
    ToastScheduler::new(RecordingPresenter::new()).expect("tests run inside a runtime")
}

#[tokio::test(start_paused = true)]
async fn presentations_start_in_submission_order() {
    let toasts = scheduler();
    let messages: Vec<String> = (0..10).map(|i| format!("toast-{i}")).collect();

    for message in &messages {
        toasts.submit(message.as_str());
    }
    toasts.wait_idle().await;

    assert_eq!(toasts.presenter().attached_messages(), messages);
}

#[tokio::test(start_paused = true)]
async fn each_toast_is_detached_before_the_next_is_attached() {
    let toasts = scheduler();
    toasts.submit("A");
    toasts.submit("B");
    toasts.submit("C");
    toasts.wait_idle().await;

    let presenter = toasts.presenter();
    assert_eq!(presenter.max_concurrent(), 1);
    assert_eq!(presenter.active(), 0);

    let lines = timelines(presenter);
    let order: Vec<&str> = lines.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    for pair in lines.windows(2) {
        assert!(pair[0].detached <= pair[1].attached);
    }

    // Calls never interleave between toasts.
    let mut current = None;
    for recorded in presenter.calls() {
        match recorded.call {
            RecordedCall::Attach { serial, .. } => {
                assert!(current.is_none(), "attach while another toast is shown");
                current = Some(serial);
            }
            RecordedCall::Animate { serial, .. } => assert_eq!(current, Some(serial)),
            RecordedCall::Detach { serial } => {
                assert_eq!(current.take(), Some(serial));
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn long_toasts_are_chained_back_to_back() {
    let toasts = scheduler();
    let t0 = Instant::now();
    toasts.submit("A");
    toasts.submit("B");
    toasts.submit("C");
    toasts.wait_idle().await;

    let lines = timelines(toasts.presenter());
    assert_secs(lines[0].attached.duration_since(t0), 0.0);
    assert_secs(lines[1].attached.duration_since(t0), 3.5);
    assert_secs(lines[2].attached.duration_since(t0), 7.0);
    assert_secs(lines[2].detached.duration_since(t0), 10.5);
}

#[tokio::test(start_paused = true)]
async fn hold_delay_fills_the_toast_length() {
    let toasts = scheduler();
    toasts.submit(ToastRequest::new("short").short());
    toasts.submit(ToastRequest::new("long").long());
    toasts.wait_idle().await;

    let lines = timelines(toasts.presenter());
    assert_secs(lines[0].fade_in.1, 0.5);
    assert_secs(lines[0].hold(), 1.0);
    assert_secs(lines[0].fade_out.1, 0.5);
    assert_secs(lines[1].hold(), 2.5);
}

#[tokio::test(start_paused = true)]
async fn hold_delay_never_drops_below_one_second() {
    let toasts = scheduler();
    toasts.update_style(|style| style.fade_duration = 2.0);
    toasts.submit(ToastRequest::new("slow fades").short());
    toasts.wait_idle().await;

    let lines = timelines(toasts.presenter());
    assert_secs(lines[0].fade_in.1, 2.0);
    assert_secs(lines[0].hold(), 1.0);
    assert_secs(lines[0].detached.duration_since(lines[0].attached), 5.0);
}

#[tokio::test(start_paused = true)]
async fn style_change_affects_only_toasts_not_yet_started() {
    let toasts = scheduler();
    toasts.submit("A");
    // A has already started and holds its own style snapshot.
    toasts.update_style(|style| style.fade_duration = 2.0);
    toasts.submit("B");
    toasts.wait_idle().await;

    let lines = timelines(toasts.presenter());
    assert_secs(lines[0].fade_in.1, 0.5);
    assert_secs(lines[0].hold(), 2.5);
    assert_secs(lines[0].fade_out.1, 0.5);

    assert_secs(lines[1].fade_in.1, 2.0);
    assert_secs(lines[1].hold(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn toasts_slide_up_from_below_their_resting_line() {
    let toasts = scheduler();
    toasts.submit("A");
    toasts.wait_idle().await;

    let style = StyleConfig::default();
    let calls: Vec<RecordedCall> = toasts
        .presenter()
        .calls()
        .into_iter()
        .map(|r| r.call)
        .collect();
    let frames: Vec<Frame> = calls
        .iter()
        .filter_map(|call| match call {
            RecordedCall::Attach { frame, .. } => Some(*frame),
            RecordedCall::Animate { target, .. } => Some(*target),
            RecordedCall::Detach { .. } => None,
        })
        .collect();
    assert_eq!(
        frames,
        vec![style.start_frame(), style.rest_frame(), style.start_frame()]
    );
}

#[tokio::test(start_paused = true)]
async fn submissions_during_a_presentation_wait_their_turn() {
    let toasts = scheduler();
    let t0 = Instant::now();
    toasts.submit("A");

    tokio::time::sleep(Duration::from_secs(1)).await;
    toasts.submit("B");
    assert_eq!(
        toasts.status(),
        QueueStatus {
            queued: 1,
            presenting: true
        }
    );

    toasts.wait_idle().await;
    let lines = timelines(toasts.presenter());
    assert_secs(lines[1].attached.duration_since(t0), 3.5);
}

#[tokio::test(start_paused = true)]
async fn request_without_surface_is_dropped_and_queue_continues() {
    let toasts = ToastScheduler::new(RecordingPresenter::without_surfaces()).expect("runtime");

    toasts.submit("nowhere");
    assert!(toasts.is_idle());

    toasts.submit(ToastRequest::new("explicit").on("panel".to_string()));
    toasts.wait_idle().await;

    let presenter = toasts.presenter();
    assert_eq!(presenter.attached_messages(), vec!["explicit"]);
    assert_eq!(presenter.attached_surfaces(), vec!["panel"]);
}

#[tokio::test(start_paused = true)]
async fn surface_is_resolved_when_the_request_is_dequeued() {
    let toasts = scheduler();
    toasts.submit("A");
    toasts.submit("B");

    // B was queued while a key surface existed, but it is gone by the time
    // B is dequeued.
    toasts.presenter().set_key_surface(None);
    toasts.submit(ToastRequest::new("C").on("panel".to_string()));
    toasts.wait_idle().await;

    assert_eq!(toasts.presenter().attached_messages(), vec!["A", "C"]);
}

#[tokio::test(start_paused = true)]
async fn root_surface_is_used_without_key_surface() {
    let presenter = RecordingPresenter::without_surfaces();
    presenter.set_root_surface(Some("root".to_string()));
    let toasts = ToastScheduler::new(presenter).expect("runtime");

    toasts.submit("A");
    toasts.wait_idle().await;

    assert_eq!(toasts.presenter().attached_surfaces(), vec!["root"]);
}

#[tokio::test(start_paused = true)]
async fn empty_message_is_passed_through() {
    let toasts = scheduler();
    toasts.submit("");
    toasts.wait_idle().await;

    assert_eq!(toasts.presenter().attached_messages(), vec![""]);
}

#[tokio::test(start_paused = true)]
async fn concurrent_submitters_never_overlap() {
    let toasts = scheduler();

    let mut tasks = Vec::new();
    for worker in 0..5 {
        let toasts = toasts.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..2 {
                toasts.submit(ToastRequest::new(format!("{worker}-{i}")).short());
                tokio::task::yield_now().await;
            }
        }));
    }
    for task in tasks {
        task.await.expect("submitter task");
    }
    toasts.wait_idle().await;

    let presenter = toasts.presenter();
    assert_eq!(presenter.attached_messages().len(), 10);
    assert_eq!(presenter.max_concurrent(), 1);
    // Each worker's own toasts keep their relative order.
    let shown = presenter.attached_messages();
    for worker in 0..5 {
        let first = shown.iter().position(|m| *m == format!("{worker}-0"));
        let second = shown.iter().position(|m| *m == format!("{worker}-1"));
        assert!(first < second);
    }
}

#[tokio::test(start_paused = true)]
async fn separate_schedulers_are_independent() {
    let first = scheduler();
    let second = scheduler();
    let t0 = Instant::now();

    first.submit("one");
    second.submit("two");
    first.wait_idle().await;
    second.wait_idle().await;

    let a = timelines(first.presenter());
    let b = timelines(second.presenter());
    assert_secs(a[0].attached.duration_since(t0), 0.0);
    assert_secs(b[0].attached.duration_since(t0), 0.0);
    assert_eq!(first.presenter().attached_messages(), vec!["one"]);
    assert_eq!(second.presenter().attached_messages(), vec!["two"]);
}

#[test]
fn submitting_from_outside_the_runtime_uses_the_given_handle() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime");

    let toasts = ToastScheduler::builder(RecordingPresenter::new())
        .runtime(runtime.handle().clone())
        .build()
        .expect("explicit runtime");

    toasts.submit(("A", ToastLength::Short));
    toasts.submit("B");
    runtime.block_on(toasts.wait_idle());

    assert_eq!(toasts.presenter().attached_messages(), vec!["A", "B"]);
}

#[test]
fn shut_down_runtime_does_not_wedge_the_queue() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");
    let toasts = ToastScheduler::builder(RecordingPresenter::new())
        .runtime(runtime.handle().clone())
        .build()
        .expect("explicit runtime");
    drop(runtime);

    toasts.submit("A");
    toasts.submit("B");

    assert_eq!(toasts.status(), QueueStatus::default());
    assert!(toasts.presenter().attached_messages().is_empty());

    // Still accepting work afterwards.
    toasts.submit("C");
    assert!(toasts.is_idle());
}

#[test]
fn queued_is_logged_before_started_across_threads() {
    const THREADS: u64 = 4;
    const PER_THREAD: u64 = 50;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    // Every request is dropped during `submit`, so nothing needs the runtime
    // to make progress.
    let mut collector = DiagnosticsCollector::with_channel_capacity(
        BufferCapacity::default(),
        (THREADS * PER_THREAD * 3) as usize,
    );
    let toasts = ToastScheduler::builder(RecordingPresenter::without_surfaces())
        .diagnostics(collector.handle())
        .runtime(runtime.handle().clone())
        .build()
        .expect("explicit runtime");

    std::thread::scope(|scope| {
        for worker in 0..THREADS {
            let toasts = toasts.clone();
            scope.spawn(move || {
                for i in 0..PER_THREAD {
                    toasts.submit(format!("{worker}-{i}"));
                }
            });
        }
    });
    collector.process_pending();

    let mut first_seen: HashMap<u64, &ToastEvent> = HashMap::new();
    for event in collector.iter() {
        first_seen.entry(event.kind.toast_id()).or_insert(&event.kind);
    }
    assert_eq!(first_seen.len() as u64, THREADS * PER_THREAD);
    assert!(first_seen
        .values()
        .all(|event| matches!(event, ToastEvent::Queued { .. })));
    assert_eq!(collector.summary().dropped as u64, THREADS * PER_THREAD);
}

/// Presenter that panics when asked to attach a message of "boom".
struct FaultyPresenter(RecordingPresenter);

impl Presenter for FaultyPresenter {
    type Surface = String;
    type Handle = RecordingHandle;

    fn key_surface(&self) -> Option<String> {
        self.0.key_surface()
    }

    fn attach(
        &self,
        message: &str,
        style: &StyleConfig,
        surface: &String,
        initial: Frame,
    ) -> RecordingHandle {
        assert_ne!(message, "boom", "presenter failure");
        self.0.attach(message, style, surface, initial)
    }

    async fn animate(&self, handle: &mut RecordingHandle, target: Frame, duration: Duration) {
        self.0.animate(handle, target, duration).await;
    }

    fn detach(&self, handle: RecordingHandle) {
        self.0.detach(handle);
    }
}

#[tokio::test(start_paused = true)]
async fn failed_presentation_does_not_block_the_queue() {
    let recorder = RecordingPresenter::new();
    let toasts = ToastScheduler::new(FaultyPresenter(recorder.clone())).expect("runtime");

    toasts.submit("boom");
    toasts.submit("after");
    toasts.wait_idle().await;

    assert_eq!(recorder.attached_messages(), vec!["after"]);
}
