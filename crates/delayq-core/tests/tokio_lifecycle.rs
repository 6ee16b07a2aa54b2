//! LifecycleController driven by the tokio timer under a paused clock.

use std::sync::Arc;
use std::time::Duration;

use delayq_core::{CancelOutcome, ControllerBuilder, LifecycleController, TaskStatus};

fn controller() -> LifecycleController {
    ControllerBuilder::new().build().unwrap()
}

#[tokio::test(start_paused = true)]
async fn ping_with_zero_delay_completes_asynchronously() {
    let controller = controller();

    let task = controller.schedule_task("ping", 0);
    assert_eq!(
        controller.get_task_by_id(&task.id).unwrap().status,
        TaskStatus::Pending
    );

    tokio::time::sleep(Duration::from_millis(10)).await;

    let done = controller.get_task_by_id(&task.id).unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    assert!(done.completed_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn canceled_task_stays_canceled_past_its_delay() {
    let controller = controller();

    let task = controller.schedule_task("later", 100);
    let result = controller.cancel_task(&task.id).unwrap();
    assert_eq!(result.outcome, CancelOutcome::Canceled);

    tokio::time::sleep(Duration::from_secs(200)).await;

    let after = controller.get_task_by_id(&task.id).unwrap();
    assert_eq!(after.status, TaskStatus::Canceled);
    assert_eq!(after.completed_at, result.task.completed_at);
}

#[tokio::test(start_paused = true)]
async fn cancel_after_elapse_is_conflict() {
    let controller = controller();

    let task = controller.schedule_task("x", 5);
    tokio::time::sleep(Duration::from_secs(6)).await;
    let completed = controller.get_task_by_id(&task.id).unwrap();
    assert_eq!(completed.status, TaskStatus::Completed);

    let result = controller.cancel_task(&task.id).unwrap();

    assert_eq!(result.outcome, CancelOutcome::Conflict);
    assert_eq!(result.task, completed);
}

#[tokio::test(start_paused = true)]
async fn clear_all_prevents_pending_completions() {
    let controller = controller();
    for delay in [1, 2, 3] {
        controller.schedule_task(format!("t{delay}"), delay);
    }

    assert_eq!(controller.clear_all(), 3);
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert!(controller.get_all_tasks().is_empty());
    assert_eq!(controller.counts().total, 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_controller_stops_sleeping_timer_tasks() {
    let metrics = tokio::runtime::Handle::current().metrics();
    let baseline = metrics.num_alive_tasks();

    let controller = controller();
    for i in 0..5 {
        controller.schedule_task(format!("day-{i}"), 86_400);
    }
    assert_eq!(metrics.num_alive_tasks(), baseline + 5);

    drop(controller);
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(metrics.num_alive_tasks(), baseline);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_fire_and_cancel_apply_exactly_one_transition() {
    let controller = Arc::new(controller());

    let tasks: Vec<_> = (0..200)
        .map(|i| controller.schedule_task(format!("race-{i}"), 0))
        .collect();

    let cancels: Vec<_> = tasks
        .iter()
        .map(|task| {
            let controller = Arc::clone(&controller);
            let id = task.id;
            tokio::spawn(async move { controller.cancel_task(&id).unwrap() })
        })
        .collect();

    let mut outcomes = Vec::new();
    for cancel in cancels {
        outcomes.push(cancel.await.unwrap());
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    for result in outcomes {
        let now = controller.get_task_by_id(&result.task.id).unwrap();
        match result.outcome {
            CancelOutcome::Canceled => assert_eq!(now.status, TaskStatus::Canceled),
            CancelOutcome::Conflict => assert_eq!(now.status, TaskStatus::Completed),
            CancelOutcome::AlreadyCanceled => panic!("first cancel cannot be a re-cancel"),
        }
        assert!(now.completed_at.is_some());
        assert_eq!(now.completed_at, result.task.completed_at);
    }
    assert_eq!(controller.counts().pending, 0);
}
