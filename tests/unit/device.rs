use super::*;
use crate::task::{
    ArcDescriptor, BorderDescriptor, DrawTask, FillDescriptor, ImageDescriptor, LabelDescriptor,
    LineDescriptor, TriangleDescriptor,
};
use crate::foundation::core::Rect;
use std::sync::Arc;
use parking_lot::Mutex;

#[derive(Default)]
struct Script {
    calls: Vec<&'static str>,
    fail_at: Option<&'static str>,
    closed: u32,
}

struct ScriptedDevice(Arc<Mutex<Script>>);

impl ScriptedDevice {
    fn step(&self, name: &'static str) -> DriverResult<()> {
        let mut s = self.0.lock();
        s.calls.push(name);
        if s.fail_at == Some(name) {
            return Err(DriverError::Status(-1));
        }
        Ok(())
    }
}

impl GpuDevice for ScriptedDevice {
    fn init_hw(&mut self) -> DriverResult<()> {
        self.step("init_hw")
    }
    fn set_blend_mode(&mut self, _: BlendFactor, _: BlendFactor) -> DriverResult<()> {
        self.step("set_blend_mode")
    }
    fn set_alpha_mode(&mut self, _: AlphaMode) -> DriverResult<()> {
        self.step("set_alpha_mode")
    }
    fn set_alpha(&mut self, _: u8) -> DriverResult<()> {
        self.step("set_alpha")
    }
    fn set_antialiasing(&mut self, _: bool) -> DriverResult<()> {
        self.step("set_antialiasing")
    }
    fn set_line_cap(&mut self, _: LineCap) -> DriverResult<()> {
        self.step("set_line_cap")
    }
    fn set_line_join(&mut self, _: LineJoin) -> DriverResult<()> {
        self.step("set_line_join")
    }
    fn set_dlist_block_size(&mut self, _: u32) -> DriverResult<()> {
        self.step("set_dlist_block_size")
    }
    fn new_render_buffer(&mut self, _: u32, _: u32) -> DriverResult<RenderBufferId> {
        self.step("new_render_buffer").map(|()| RenderBufferId(1))
    }
    fn select_render_buffer(&mut self, _: RenderBufferId) -> DriverResult<()> {
        self.step("select_render_buffer")
    }
    fn execute_render_buffer(&mut self, _: RenderBufferId) -> DriverResult<()> {
        self.step("execute_render_buffer")
    }
    fn flush_frame(&mut self) -> DriverResult<()> {
        self.step("flush_frame")
    }
    fn close(&mut self) {
        self.0.lock().closed += 1;
    }
}

struct NoopRenderer;

impl PrimitiveRenderer for NoopRenderer {
    fn fill(&mut self, _: &mut dyn GpuDevice, _: &DrawTask, _: &FillDescriptor, _: Rect) {}
    fn border(&mut self, _: &mut dyn GpuDevice, _: &DrawTask, _: &BorderDescriptor, _: Rect) {}
    fn image(&mut self, _: &mut dyn GpuDevice, _: &DrawTask, _: &ImageDescriptor, _: Rect) {}
    fn label(&mut self, _: &mut dyn GpuDevice, _: &DrawTask, _: &LabelDescriptor, _: Rect) {}
    fn line(&mut self, _: &mut dyn GpuDevice, _: &DrawTask, _: &LineDescriptor) {}
    fn arc(&mut self, _: &mut dyn GpuDevice, _: &DrawTask, _: &ArcDescriptor, _: Rect) {}
    fn triangle(&mut self, _: &mut dyn GpuDevice, _: &DrawTask, _: &TriangleDescriptor) {}
}

fn open_with(fail_at: Option<&'static str>) -> (Arc<Mutex<Script>>, Dave2dResult<GpuContext>) {
    let script = Arc::new(Mutex::new(Script {
        fail_at,
        ..Script::default()
    }));
    let ctx = GpuContext::open(
        &DeviceParams::default(),
        10,
        Box::new(ScriptedDevice(Arc::clone(&script))),
        Box::new(NoopRenderer),
    );
    (script, ctx)
}

#[test]
fn bring_up_runs_every_stage_in_order() {
    let (script, ctx) = open_with(None);
    let ctx = ctx.unwrap();
    assert_eq!(ctx.renderbuffer, RenderBufferId(1));
    assert!(ctx.batch.is_empty());
    assert_eq!(
        script.lock().calls,
        [
            "init_hw",
            "set_blend_mode",
            "set_alpha_mode",
            "set_alpha",
            "set_antialiasing",
            "set_line_cap",
            "set_line_join",
            "set_dlist_block_size",
            "new_render_buffer",
            "select_render_buffer",
        ]
    );
    assert_eq!(script.lock().closed, 0);
}

#[test]
fn failed_stage_closes_device_and_names_stage() {
    for stage in ["init_hw", "set_alpha", "new_render_buffer", "select_render_buffer"] {
        let (script, ctx) = open_with(Some(stage));
        let Err(err) = ctx else {
            panic!("expected bring-up failure at {stage}");
        };
        let Dave2dError::DeviceInit { stage: got, source } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(*got, stage);
        assert_eq!(*source, DriverError::Status(-1));
        assert!(err.is_fatal());

        let s = script.lock();
        assert_eq!(s.closed, 1);
        assert_eq!(s.calls.last().copied(), Some(stage));
    }
}

#[test]
fn flush_sequence_and_single_close() {
    let (script, ctx) = open_with(None);
    let mut ctx = ctx.unwrap();
    script.lock().calls.clear();

    let report = ctx.execute_and_flush();
    assert!(report.result.is_ok());
    assert_eq!(report.confirmed, 0);
    assert_eq!(
        script.lock().calls,
        ["execute_render_buffer", "flush_frame", "select_render_buffer"]
    );

    ctx.close();
    ctx.close();
    assert_eq!(script.lock().closed, 1);
}

#[test]
fn flush_failure_stops_sequence_but_reports_error() {
    let (script, ctx) = open_with(None);
    let mut ctx = ctx.unwrap();
    script.lock().calls.clear();
    script.lock().fail_at = Some("flush_frame");

    let report = ctx.execute_and_flush();
    assert_eq!(report.result, Err(DriverError::Status(-1)));
    assert_eq!(script.lock().calls, ["execute_render_buffer", "flush_frame"]);
}
