//! Host-side execution of reducer effects.
//!
//! [`ShellHostContext`] bundles the injected host services, the shared store, the collaborator
//! adapters bound at mount, and a [`ShellScheduler`] for timers and async work. The reducer never
//! touches any of these directly.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc, time::Duration};

use leptos::logging;
use poster_contract::{
    FilePicker, NoopFilePicker, NoopPanelToggle, NoopPosterDisplay, PanelToggle, PosterDisplay,
};
use poster_host::{first_launched_file, HostServices, LaunchHandle};
use poster_store::PosterStore;

use crate::reducer::{ShellAction, ShellEffect};

/// Callback that feeds actions back into the reducer.
pub type ShellDispatch = Rc<dyn Fn(ShellAction)>;

/// Boxed task run by a [`ShellScheduler`].
pub type ShellTask = Pin<Box<dyn Future<Output = ()>>>;

/// Timer and task seam used by effect execution.
pub trait ShellScheduler {
    /// Runs `task` once, `delay_ms` from now.
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>);

    /// Drives `task` to completion on the current thread.
    fn spawn(&self, task: ShellTask);
}

#[derive(Debug, Clone, Copy, Default)]
/// Scheduler backed by Leptos browser timers and `spawn_local`.
pub struct LeptosScheduler;

impl ShellScheduler for LeptosScheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) {
        leptos::set_timeout(task, Duration::from_millis(delay_ms));
    }

    fn spawn(&self, task: ShellTask) {
        leptos::spawn_local(task);
    }
}

/// Message shown in the blocking alert when a caught export fails.
pub fn export_failure_message(message: &str) -> String {
    format!("Oops! something went wrong. 😢 \n {message}")
}

/// Collaborator adapters resolved from the mounted DOM.
#[derive(Clone)]
pub struct ShellCollaborators {
    pub display: Rc<dyn PosterDisplay>,
    pub edit_panel: Rc<dyn PanelToggle>,
    pub tips_dialog: Rc<dyn PanelToggle>,
    pub file_picker: Rc<dyn FilePicker>,
}

impl Default for ShellCollaborators {
    fn default() -> Self {
        Self {
            display: Rc::new(NoopPosterDisplay),
            edit_panel: Rc::new(NoopPanelToggle),
            tips_dialog: Rc::new(NoopPanelToggle),
            file_picker: Rc::new(NoopFilePicker),
        }
    }
}

#[derive(Clone)]
/// Host service bundle for shell side effects.
pub struct ShellHostContext {
    services: HostServices,
    store: PosterStore,
    collaborators: Rc<RefCell<ShellCollaborators>>,
    scheduler: Rc<dyn ShellScheduler>,
}

impl ShellHostContext {
    pub fn new(
        services: HostServices,
        store: PosterStore,
        scheduler: Rc<dyn ShellScheduler>,
    ) -> Self {
        Self {
            services,
            store,
            collaborators: Rc::new(RefCell::new(ShellCollaborators::default())),
            scheduler,
        }
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    pub fn store(&self) -> PosterStore {
        self.store.clone()
    }

    pub fn display(&self) -> Rc<dyn PosterDisplay> {
        self.collaborators.borrow().display.clone()
    }

    pub fn bind_display(&self, display: Rc<dyn PosterDisplay>) {
        self.collaborators.borrow_mut().display = display;
    }

    pub fn bind_edit_panel(&self, panel: Rc<dyn PanelToggle>) {
        self.collaborators.borrow_mut().edit_panel = panel;
    }

    pub fn bind_tips_dialog(&self, dialog: Rc<dyn PanelToggle>) {
        self.collaborators.borrow_mut().tips_dialog = dialog;
    }

    pub fn bind_file_picker(&self, picker: Rc<dyn FilePicker>) {
        self.collaborators.borrow_mut().file_picker = picker;
    }

    /// Current location fragment.
    pub fn location_hash(&self) -> String {
        self.services.location.hash()
    }

    /// Executes a single [`ShellEffect`] emitted by the reducer.
    pub fn run_shell_effect(&self, dispatch: &ShellDispatch, effect: ShellEffect) {
        match effect {
            ShellEffect::InstallLaunchConsumer => self.install_launch_consumer(dispatch),
            ShellEffect::IngestFile(file) => {
                if !self.services.capabilities.object_urls.is_available() {
                    logging::warn!("object urls unavailable; dropped {:?}", file.name);
                    return;
                }
                match self.services.object_urls.create_object_url(&file) {
                    Ok(url) => dispatch(ShellAction::ObjectUrlCreated { url }),
                    Err(err) => logging::warn!("object url creation failed: {err}"),
                }
            }
            ShellEffect::WriteStore { key, value } => self.store.set(key, value),
            ShellEffect::ResetStore(entries) => self.store.reset(entries),
            ShellEffect::RevokeObjectUrl(url) => self.services.object_urls.revoke_object_url(&url),
            ShellEffect::ScheduleOverlayFade { delay_ms } => {
                self.schedule_action(dispatch, delay_ms, ShellAction::OverlayFadeStarted)
            }
            ShellEffect::ScheduleOverlayRemoval { delay_ms } => {
                self.schedule_action(dispatch, delay_ms, ShellAction::OverlayRemoved)
            }
            ShellEffect::ScheduleCriminalReveal { delay_ms } => {
                self.schedule_action(dispatch, delay_ms, ShellAction::CriminalButtonRevealed)
            }
            ShellEffect::RunExport => {
                let display = self.display();
                let dispatch = dispatch.clone();
                self.scheduler.spawn(Box::pin(async move {
                    let result = display.export().await;
                    dispatch(ShellAction::ExportFinished { result });
                }));
            }
            ShellEffect::ReportExportError { message } => {
                logging::error!("export failed: {message}");
                if self.services.capabilities.dialogs.is_available() {
                    self.services
                        .dialogs
                        .alert(&export_failure_message(&message));
                }
            }
            ShellEffect::LogUnhandledExportFailure { message } => {
                logging::warn!("unhandled export failure: {message}");
            }
            ShellEffect::ToggleEditPanel => {
                let panel = self.collaborators.borrow().edit_panel.clone();
                panel.toggle(None);
            }
            ShellEffect::ToggleTips => {
                let dialog = self.collaborators.borrow().tips_dialog.clone();
                dialog.toggle(None);
            }
            ShellEffect::ChangePoster => self.display().change_poster(),
            ShellEffect::OpenFilePicker => {
                let picker = self.collaborators.borrow().file_picker.clone();
                picker.reset_and_open();
            }
            ShellEffect::SetLocationHash(hash) => self.services.location.set_hash(&hash),
        }
    }

    fn schedule_action(&self, dispatch: &ShellDispatch, delay_ms: u64, action: ShellAction) {
        let dispatch = dispatch.clone();
        self.scheduler
            .schedule(delay_ms, Box::new(move || dispatch(action)));
    }

    fn install_launch_consumer(&self, dispatch: &ShellDispatch) {
        if !self.services.capabilities.launch_queue.is_available() {
            logging::log!(
                "file launch queue unavailable on {} host",
                self.services.strategy.as_str()
            );
            return;
        }
        let dispatch = dispatch.clone();
        let scheduler = self.scheduler.clone();
        let installed = self
            .services
            .launch_queue
            .set_consumer(Rc::new(move |handles: Vec<Rc<dyn LaunchHandle>>| {
                let dispatch = dispatch.clone();
                scheduler.spawn(Box::pin(async move {
                    match first_launched_file(&handles).await {
                        Ok(Some(file)) => dispatch(ShellAction::FileLaunched { file }),
                        Ok(None) => logging::debug_warn!("launch ignored: no file handle"),
                        Err(err) => logging::warn!("launched file could not be read: {err}"),
                    }
                }));
            }));
        if !installed {
            logging::warn!("file launch queue refused the consumer");
        }
    }
}
