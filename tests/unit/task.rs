use super::*;

fn layer() -> Arc<Layer> {
    Arc::new(Layer::new(
        ColorFormat::Argb8888,
        Rect::new(0.0, 0.0, 100.0, 100.0),
    ))
}

fn fill_task() -> DrawTask {
    DrawTask::new(
        TaskId(1),
        DrawDescriptor::Fill(FillDescriptor::default()),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        layer(),
    )
}

#[test]
fn state_only_moves_forward() {
    let t = fill_task();
    assert_eq!(t.state(), TaskState::Queued);
    assert!(t.advance(TaskState::InProgress));
    assert!(!t.advance(TaskState::Queued));
    assert!(!t.advance(TaskState::InProgress));
    assert_eq!(t.state(), TaskState::InProgress);
    assert!(t.mark_finished());
    assert!(!t.mark_finished());
    assert_eq!(t.state(), TaskState::Finished);
}

#[test]
fn queued_task_can_be_finished_directly() {
    let t = fill_task();
    assert!(t.mark_finished());
    assert!(!t.advance(TaskState::InProgress));
}

#[test]
fn preference_records_latest_bid() {
    let t = fill_task();
    assert_eq!(t.preference(), Preference::default());
    assert!(!t.prefers(UnitId(4)));

    t.set_preference(UnitId(4), 0);
    assert!(t.prefers(UnitId(4)));
    t.set_preference(UnitId(2), -1);
    assert!(!t.prefers(UnitId(4)));
    assert_eq!(
        t.preference(),
        Preference {
            unit: Some(UnitId(2)),
            score: -1
        }
    );
}

#[test]
fn clip_defaults_to_area() {
    let t = fill_task();
    assert_eq!(t.clip_area(), t.area());
    let clip = Rect::new(2.0, 2.0, 5.0, 5.0);
    assert_eq!(fill_task().with_clip_area(clip).clip_area(), clip);
}

#[test]
fn claimed_by_is_set_by_the_unit() {
    let t = fill_task();
    assert_eq!(t.claimed_by(), None);
    t.set_claimed_by(UnitId(4));
    assert_eq!(t.claimed_by(), Some(UnitId(4)));
}

#[test]
fn gradient_solidity() {
    let red = Color::rgb(255, 0, 0);
    let blue = Color::rgb(0, 0, 255);

    assert!(Gradient::default().is_solid());
    assert!(
        Gradient::new(
            GradDir::None,
            [GradStop::new(red, 0), GradStop::new(blue, 255)]
        )
        .is_solid()
    );
    assert!(
        Gradient::new(
            GradDir::Vertical,
            [GradStop::new(red, 0), GradStop::new(red, 255)]
        )
        .is_solid()
    );
    assert!(
        !Gradient::new(
            GradDir::Horizontal,
            [GradStop::new(red, 0), GradStop::new(blue, 255)]
        )
        .is_solid()
    );
    assert!(!Gradient::new(GradDir::Radial, []).is_solid());
}

#[test]
fn layer_buffer_matches_area() {
    let l = Layer::new(ColorFormat::Rgb565, Rect::new(10.0, 20.0, 42.0, 36.0));
    assert_eq!(l.draw_buf.width, 32);
    assert_eq!(l.draw_buf.height, 16);
    assert_eq!(l.draw_buf.stride, 64);
}

#[test]
fn descriptor_kinds() {
    assert_eq!(DrawDescriptor::MaskBitmap.kind(), TaskKind::MaskBitmap);
    assert_eq!(DrawDescriptor::Other(99).kind(), TaskKind::Other);
    assert_eq!(fill_task().kind(), TaskKind::Fill);
}
