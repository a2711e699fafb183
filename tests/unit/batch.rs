use super::*;
use crate::foundation::core::{ColorFormat, Rect};
use crate::task::{DrawDescriptor, DrawTask, FillDescriptor, Layer, TaskId};
use std::sync::Arc;

fn task(id: u64) -> TaskHandle {
    let layer = Arc::new(Layer::new(
        ColorFormat::Rgb565,
        Rect::new(0.0, 0.0, 8.0, 8.0),
    ));
    DrawTask::new(
        TaskId(id),
        DrawDescriptor::Fill(FillDescriptor::default()),
        Rect::new(0.0, 0.0, 4.0, 4.0),
        layer,
    )
    .into_handle()
}

#[test]
fn account_reports_exceeding_watermark() {
    let mut q = BatchQueue::new(10);
    assert!(!q.account(4));
    assert!(!q.account(6));
    assert_eq!(q.pending_ops(), 10);
    assert!(q.account(1));
    assert_eq!(q.pending_ops(), 11);
}

#[test]
fn account_saturates() {
    let mut q = BatchQueue::new(10);
    q.account(u32::MAX);
    assert!(q.account(5));
    assert_eq!(q.pending_ops(), u32::MAX);
}

#[test]
fn drain_confirms_in_order_and_resets_counter() {
    let mut q = BatchQueue::new(10);
    let a = task(1);
    let b = task(2);
    a.advance(TaskState::InProgress);
    b.advance(TaskState::InProgress);
    q.account(7);
    q.push(Arc::clone(&a));
    q.push(Arc::clone(&b));
    assert_eq!(q.len(), 2);

    assert_eq!(q.drain_finished(), (2, 0));
    assert!(q.is_empty());
    assert_eq!(q.pending_ops(), 0);
    assert_eq!(a.state(), TaskState::Finished);
    assert_eq!(b.state(), TaskState::Finished);
}

#[test]
fn drain_counts_already_finished_tasks_as_refused() {
    let mut q = BatchQueue::new(10);
    let a = task(1);
    a.mark_finished();
    q.push(a);
    q.push(task(2));
    assert_eq!(q.drain_finished(), (1, 1));
    assert!(q.is_empty());
}
