//! Deterministic shell driver: reducer, effect execution, manual clock and scheduler, memory
//! host services and recording collaborators, wired the same way the Leptos provider wires them.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use futures::{
    executor::{LocalPool, LocalSpawner},
    task::LocalSpawnExt,
};
use poster_contract::{RecordingFilePicker, RecordingPanelToggle, RecordingPosterDisplay};
use poster_host::{
    HostCapabilities, HostServices, IncomingFile, LocationService, MemoryDialogService, MemoryLaunchQueue,
    MemoryLocationService, MemoryObjectUrlService,
};
use poster_store::PosterStore;

use crate::{
    bridge::StoreBridge,
    config::ShellConfig,
    host::{ShellDispatch, ShellHostContext, ShellScheduler, ShellTask},
    model::ShellState,
    reducer::{reduce_shell, ShellAction, ShellError},
    session::ShellSession,
};

struct Timer {
    due_ms: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Scheduler driven by an explicit clock.
pub(crate) struct ManualScheduler {
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl ManualScheduler {
    fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            now_ms: Cell::new(0),
            next_seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            pool: RefCell::new(pool),
            spawner,
        }
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    fn run_tasks(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    fn take_next_due(&self, until_ms: u64) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
            .map(|(index, _)| index)?;
        Some(timers.remove(index))
    }

    /// Moves the clock to `until_ms`, firing due timers in order.
    fn advance_to(&self, until_ms: u64) {
        self.run_tasks();
        while let Some(timer) = self.take_next_due(until_ms) {
            self.now_ms.set(self.now_ms.get().max(timer.due_ms));
            (timer.task)();
            self.run_tasks();
        }
        self.now_ms.set(self.now_ms.get().max(until_ms));
    }
}

impl ShellScheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due_ms: self.now_ms.get().saturating_add(delay_ms),
            seq,
            task,
        });
    }

    fn spawn(&self, task: ShellTask) {
        self.spawner.spawn_local(task).expect("spawn test task");
    }
}

pub(crate) struct DriverCore {
    pub config: ShellConfig,
    pub state: RefCell<ShellState>,
    pub errors: RefCell<Vec<ShellError>>,
    host: ShellHostContext,
    last_hash: RefCell<String>,
    myself: Weak<DriverCore>,
}

impl DriverCore {
    fn dispatcher(&self) -> ShellDispatch {
        let core = self.myself.clone();
        Rc::new(move |action| {
            if let Some(core) = core.upgrade() {
                core.dispatch(action);
            }
        })
    }

    pub(crate) fn dispatch(&self, action: ShellAction) {
        let result = {
            let mut state = self.state.borrow_mut();
            reduce_shell(&self.config, &mut state, action)
        };
        match result {
            Ok(effects) => {
                let dispatch = self.dispatcher();
                for effect in effects {
                    self.host.run_shell_effect(&dispatch, effect);
                }
            }
            Err(err) => self.errors.borrow_mut().push(err),
        }
        self.fire_hash_change();
    }

    /// Browsers fire `hashchange` after a fragment write; memory locations do not.
    fn fire_hash_change(&self) {
        if self.config.criminal.is_none() || !self.state.borrow().is_attached() {
            return;
        }
        let hash = self.host.location_hash();
        if *self.last_hash.borrow() == hash {
            return;
        }
        *self.last_hash.borrow_mut() = hash.clone();
        self.dispatch(ShellAction::HashChanged { hash });
    }
}

pub(crate) struct ShellDriver {
    pub core: Rc<DriverCore>,
    pub store: PosterStore,
    pub session: RefCell<ShellSession>,
    pub scheduler: Rc<ManualScheduler>,
    pub display: Rc<RecordingPosterDisplay>,
    pub edit_panel: Rc<RecordingPanelToggle>,
    pub tips_dialog: Rc<RecordingPanelToggle>,
    pub file_picker: Rc<RecordingFilePicker>,
    pub object_urls: Rc<MemoryObjectUrlService>,
    pub dialogs: Rc<MemoryDialogService>,
    pub location: Rc<MemoryLocationService>,
    pub launch_queue: Rc<MemoryLaunchQueue>,
}

impl ShellDriver {
    pub(crate) fn new(config: ShellConfig) -> Self {
        Self::with_capabilities(config, HostCapabilities::all())
    }

    /// Driver whose host reports `capabilities` while keeping the memory adapters behind them.
    pub(crate) fn with_capabilities(config: ShellConfig, capabilities: HostCapabilities) -> Self {
        let store = PosterStore::new();
        let scheduler = Rc::new(ManualScheduler::new());
        let object_urls = Rc::new(MemoryObjectUrlService::default());
        let dialogs = Rc::new(MemoryDialogService::default());
        let location = Rc::new(MemoryLocationService::default());
        let launch_queue = Rc::new(MemoryLaunchQueue::default());
        let services = HostServices {
            capabilities,
            ..HostServices::memory(
                object_urls.clone(),
                dialogs.clone(),
                location.clone(),
                launch_queue.clone(),
            )
        };
        let host = ShellHostContext::new(services, store.clone(), scheduler.clone());

        let display = Rc::new(RecordingPosterDisplay::default());
        let edit_panel = Rc::new(RecordingPanelToggle::default());
        let tips_dialog = Rc::new(RecordingPanelToggle::default());
        let file_picker = Rc::new(RecordingFilePicker::default());
        host.bind_display(display.clone());
        host.bind_edit_panel(edit_panel.clone());
        host.bind_tips_dialog(tips_dialog.clone());
        host.bind_file_picker(file_picker.clone());

        let core = Rc::new_cyclic(|myself| DriverCore {
            state: RefCell::new(ShellState::new(&config)),
            config,
            errors: RefCell::new(Vec::new()),
            host,
            last_hash: RefCell::new(String::new()),
            myself: myself.clone(),
        });

        Self {
            core,
            store,
            session: RefCell::new(ShellSession::new()),
            scheduler,
            display,
            edit_panel,
            tips_dialog,
            file_picker,
            object_urls,
            dialogs,
            location,
            launch_queue,
        }
    }

    /// Mount sequence: start the session, then dispatch `Attached` at the current clock.
    pub(crate) fn attach(&self) {
        let bridge = StoreBridge::new(self.core.config.photo_key, self.display.clone());
        self.session
            .borrow_mut()
            .start(&self.store, bridge)
            .expect("start session");
        let hash = self.location.hash();
        *self.core.last_hash.borrow_mut() = hash.clone();
        self.dispatch(ShellAction::Attached {
            now_ms: self.scheduler.now_ms(),
            hash,
        });
    }

    pub(crate) fn detach(&self) {
        self.session.borrow_mut().stop();
        self.dispatch(ShellAction::Detached);
    }

    pub(crate) fn dispatch(&self, action: ShellAction) {
        self.core.dispatch(action);
        self.scheduler.run_tasks();
    }

    pub(crate) fn advance_to(&self, until_ms: u64) {
        self.scheduler.advance_to(until_ms);
    }

    pub(crate) fn state(&self) -> ShellState {
        self.core.state.borrow().clone()
    }

    pub(crate) fn errors(&self) -> Vec<ShellError> {
        self.core.errors.borrow().clone()
    }

    pub(crate) fn png(name: &str) -> IncomingFile {
        IncomingFile::from_bytes(name, "image/png", vec![0x89_u8, b'P', b'N', b'G'])
    }
}
