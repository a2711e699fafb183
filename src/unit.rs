use crate::cache::CacheMaintenance;
use crate::config::{ExecutionModel, UnitConfig};
use crate::device::{GpuContext, GpuDevice};
use crate::dispatch::{DispatchOutcome, FlushTrigger, dispatch, run_flush};
use crate::evaluate::{Bid, evaluate};
use crate::foundation::core::UnitId;
use crate::foundation::error::{Dave2dError, Dave2dResult};
use crate::host::DrawHost;
use crate::render::PrimitiveRenderer;
use crate::stats::{StatsCounters, UnitStats, bump};
use crate::task::{DrawTask, Layer};
use crate::worker::{Strategy, TaskSlot, WorkerHandle};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// The interface a host uses to drive any pluggable draw unit.
pub trait DrawUnit: Send + Sync {
    /// Routing id.
    fn id(&self) -> UnitId;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Bid on `task`.
    fn evaluate(&self, task: &DrawTask) -> Bid;

    /// Try to start one task of `layer`.
    fn dispatch(&self, layer: &Layer) -> DispatchOutcome;
}

/// Collaborators a unit is built from.
pub struct UnitParts {
    /// Opened GPU device; bring-up happens in [`Dave2dUnit::init`].
    pub device: Box<dyn GpuDevice>,
    /// Per-primitive drawing routines.
    pub renderer: Box<dyn PrimitiveRenderer>,
    /// Host task source.
    pub host: Arc<dyn DrawHost>,
    /// Optional data-cache hook run before each task.
    pub cache: Option<Box<dyn CacheMaintenance>>,
}

/// State shared by the dispatching thread and the render worker.
pub(crate) struct UnitShared {
    pub(crate) config: UnitConfig,
    pub(crate) host: Arc<dyn DrawHost>,
    pub(crate) gpu: Mutex<GpuContext>,
    pub(crate) slot: TaskSlot,
    pub(crate) cache: Option<Box<dyn CacheMaintenance>>,
    pub(crate) stats: StatsCounters,
}

impl UnitShared {
    /// Move an executed task to finished, counting refused transitions.
    pub(crate) fn finish(&self, task: &DrawTask) {
        if task.mark_finished() {
            bump(&self.stats.finished);
        } else {
            tracing::warn!(task = ?task.id(), "task was already finished");
            bump(&self.stats.refused_finishes);
        }
    }
}

static CLAIMED_DEVICES: Mutex<BTreeSet<u32>> = parking_lot::const_mutex(BTreeSet::new());

/// Exclusive ownership of a device index for the lifetime of a unit.
#[derive(Debug)]
struct DeviceClaim(u32);

impl DeviceClaim {
    fn acquire(index: u32) -> Dave2dResult<Self> {
        if CLAIMED_DEVICES.lock().insert(index) {
            Ok(Self(index))
        } else {
            Err(Dave2dError::AlreadyInitialized(index))
        }
    }
}

impl Drop for DeviceClaim {
    fn drop(&mut self) {
        CLAIMED_DEVICES.lock().remove(&self.0);
    }
}

/// A Dave2D draw unit bound to one GPU device.
///
/// Created with [`Dave2dUnit::init`]; dropping it (or calling [`Dave2dUnit::shutdown`]) stops
/// the render worker, flushes outstanding batched work and closes the device.
pub struct Dave2dUnit {
    shared: Arc<UnitShared>,
    strategy: Option<Strategy>,
    _claim: DeviceClaim,
}

impl Dave2dUnit {
    /// Bring up the device and start the unit.
    ///
    /// Every error returned here is fatal ([`Dave2dError::is_fatal`]); the device is closed
    /// before returning.
    #[tracing::instrument(skip_all, fields(unit = %config.name, device = config.device_index))]
    pub fn init(config: UnitConfig, parts: UnitParts) -> Dave2dResult<Self> {
        config.validate()?;
        let claim = DeviceClaim::acquire(config.device_index)?;

        let UnitParts {
            device,
            renderer,
            host,
            cache,
        } = parts;
        let gpu = GpuContext::open(&config.device, config.watermark, device, renderer)?;

        let execution = config.execution;
        let shared = Arc::new(UnitShared {
            config,
            host,
            gpu: Mutex::new(gpu),
            slot: TaskSlot::default(),
            cache,
            stats: StatsCounters::default(),
        });

        let strategy = match execution {
            ExecutionModel::Inline => Strategy::Inline,
            ExecutionModel::Worker => match WorkerHandle::spawn(Arc::clone(&shared)) {
                Ok(worker) => Strategy::Worker(worker),
                Err(err) => {
                    shared.gpu.lock().close();
                    return Err(err);
                }
            },
        };

        tracing::info!(execution = ?execution, flush = ?shared.config.flush, "draw unit ready");
        Ok(Self {
            shared,
            strategy: Some(strategy),
            _claim: claim,
        })
    }

    /// Routing id.
    pub fn id(&self) -> UnitId {
        self.shared.config.unit_id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.shared.config.name
    }

    /// Configuration the unit was built with.
    pub fn config(&self) -> &UnitConfig {
        &self.shared.config
    }

    /// Bid on `task`; see [`Bid`].
    pub fn evaluate(&self, task: &DrawTask) -> Bid {
        evaluate(self.shared.host.as_ref(), self.id(), task)
    }

    /// Run one dispatch pass over `layer`.
    pub fn dispatch(&self, layer: &Layer) -> DispatchOutcome {
        match self.strategy.as_ref() {
            Some(strategy) => dispatch(&self.shared, strategy, layer),
            None => DispatchOutcome::Idle,
        }
    }

    /// Execute and confirm everything in the batch queue now. Returns the number of tasks
    /// confirmed.
    ///
    /// Confirms nothing (`Ok(0)`) while a task is active or a dispatch pass is running: the
    /// active task sits in the batch before its commands are recorded.
    pub fn flush(&self) -> Dave2dResult<usize> {
        let Some(_pass) = self.shared.slot.begin_pass() else {
            tracing::debug!("flush deferred, unit is busy");
            return Ok(0);
        };
        let mut gpu = self.shared.gpu.lock();
        if gpu.batch.is_empty() {
            return Ok(0);
        }
        run_flush(&self.shared, &mut gpu, FlushTrigger::Explicit)
    }

    /// Return `true` while a task occupies the active slot.
    pub fn is_busy(&self) -> bool {
        self.shared.slot.is_busy()
    }

    /// Operations accumulated since the last flush.
    pub fn pending_ops(&self) -> u32 {
        self.shared.gpu.lock().batch.pending_ops()
    }

    /// Tasks waiting in the batch queue.
    pub fn batched_len(&self) -> usize {
        self.shared.gpu.lock().batch.len()
    }

    /// Counter snapshot.
    pub fn stats(&self) -> UnitStats {
        self.shared.stats.snapshot()
    }

    /// Stop the unit. Equivalent to dropping it, but reports a failed final flush.
    pub fn shutdown(mut self) -> Dave2dResult<()> {
        self.teardown()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn teardown(&mut self) -> Dave2dResult<()> {
        let Some(strategy) = self.strategy.take() else {
            return Ok(());
        };
        if let Strategy::Worker(worker) = strategy {
            worker.shutdown(&self.shared);
        }

        let mut gpu = self.shared.gpu.lock();
        let flushed = if gpu.batch.is_empty() {
            Ok(0)
        } else {
            run_flush(&self.shared, &mut gpu, FlushTrigger::Explicit)
        };
        gpu.close();
        tracing::info!("draw unit stopped");
        flushed.map(|_| ())
    }
}

impl Drop for Dave2dUnit {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            tracing::error!(error = %err, "draw unit teardown failed");
        }
    }
}

impl DrawUnit for Dave2dUnit {
    fn id(&self) -> UnitId {
        Dave2dUnit::id(self)
    }

    fn name(&self) -> &str {
        Dave2dUnit::name(self)
    }

    fn evaluate(&self, task: &DrawTask) -> Bid {
        Dave2dUnit::evaluate(self, task)
    }

    fn dispatch(&self, layer: &Layer) -> DispatchOutcome {
        Dave2dUnit::dispatch(self, layer)
    }
}

impl std::fmt::Debug for Dave2dUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dave2dUnit")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("device_index", &self.shared.config.device_index)
            .finish_non_exhaustive()
    }
}
