use crate::device::{AlphaMode, BlendFactor, LineCap, LineJoin};
use crate::foundation::core::UnitId;
use crate::foundation::error::{Dave2dError, Dave2dResult};

/// Default host routing id of the Dave2D unit.
pub const DEFAULT_UNIT_ID: UnitId = UnitId(4);

/// Default watermark of queued GPU operations before a forced flush.
pub const DEFAULT_WATERMARK: u32 = 10;

/// Where claimed tasks are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionModel {
    /// Synchronously on the thread that calls `dispatch`.
    Inline,
    /// On a dedicated render worker thread owned by the unit.
    #[default]
    Worker,
}

/// When GPU command lists are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// Accumulate tasks in the batch queue and flush on the watermark or when the unit runs dry.
    #[default]
    Batched,
    /// The renderers execute each operation themselves; tasks finish right after rendering.
    Immediate,
}

/// One-time GPU parameters applied during device bring-up.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeviceParams {
    /// Source blend factor.
    pub blend_src: BlendFactor,
    /// Destination blend factor.
    pub blend_dst: BlendFactor,
    /// How the global alpha is combined with primitive alpha.
    pub alpha_mode: AlphaMode,
    /// Global alpha.
    pub alpha: u8,
    /// Enable edge antialiasing.
    pub antialiasing: bool,
    /// Default line cap.
    pub line_cap: LineCap,
    /// Default line join.
    pub line_join: LineJoin,
    /// Display-list block size (entries per allocation block).
    pub dlist_block_size: u32,
    /// Initial render buffer size, in display-list blocks.
    pub renderbuffer_initial: u32,
    /// Render buffer growth stride, in display-list blocks.
    pub renderbuffer_stride: u32,
}

impl Default for DeviceParams {
    fn default() -> Self {
        Self {
            blend_src: BlendFactor::Alpha,
            blend_dst: BlendFactor::OneMinusAlpha,
            alpha_mode: AlphaMode::Constant,
            alpha: u8::MAX,
            antialiasing: true,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dlist_block_size: 25,
            renderbuffer_initial: 20,
            renderbuffer_stride: 20,
        }
    }
}

/// Options controlling a [`Dave2dUnit`](crate::Dave2dUnit).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Id the host uses to route tasks to this unit.
    pub unit_id: UnitId,
    /// Human-readable unit name for diagnostics.
    pub name: String,
    /// Index of the GPU device; at most one unit may own an index at a time.
    pub device_index: u32,
    /// Inline or worker-thread execution.
    pub execution: ExecutionModel,
    /// Batched or immediate command-list execution.
    pub flush: FlushPolicy,
    /// Pending-operation count above which a batched flush is forced. Must be non-zero.
    pub watermark: u32,
    /// Name of the render worker thread.
    pub worker_name: String,
    /// Stack size of the render worker thread. `None` uses the platform default.
    pub worker_stack_size: Option<usize>,
    /// GPU parameters applied once at init.
    pub device: DeviceParams,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            unit_id: DEFAULT_UNIT_ID,
            name: "DAVE2D".to_string(),
            device_index: 0,
            execution: ExecutionModel::Worker,
            flush: FlushPolicy::Batched,
            watermark: DEFAULT_WATERMARK,
            worker_name: "dave2d".to_string(),
            worker_stack_size: None,
            device: DeviceParams::default(),
        }
    }
}

impl UnitConfig {
    /// Return a copy with a different execution model.
    pub fn with_execution(mut self, execution: ExecutionModel) -> Self {
        self.execution = execution;
        self
    }

    /// Return a copy with a different flush policy.
    pub fn with_flush(mut self, flush: FlushPolicy) -> Self {
        self.flush = flush;
        self
    }

    /// Return a copy bound to another device index.
    pub fn with_device_index(mut self, device_index: u32) -> Self {
        self.device_index = device_index;
        self
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Dave2dResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| Dave2dError::config(format!("invalid unit config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Dave2dResult<()> {
        if self.watermark == 0 {
            return Err(Dave2dError::config("watermark must be > 0"));
        }
        if self.name.is_empty() {
            return Err(Dave2dError::config("unit name must be non-empty"));
        }
        if self.worker_name.contains('\0') {
            return Err(Dave2dError::config("worker name must not contain NUL"));
        }
        if self.worker_stack_size == Some(0) {
            return Err(Dave2dError::config("worker stack size must be > 0"));
        }
        if self.device.dlist_block_size == 0 {
            return Err(Dave2dError::config("display-list block size must be > 0"));
        }
        if self.device.renderbuffer_initial == 0 {
            return Err(Dave2dError::config("render buffer initial size must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
