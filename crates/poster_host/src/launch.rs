//! OS file-launch delivery contracts and adapters.
//!
//! When the app is installed and registered as a file handler, the host delivers launch parameters
//! carrying zero or more handles. The shell only ever consumes the first handle, and only when it
//! is a file handle.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use crate::file::IncomingFile;

/// Object-safe boxed future returned by [`LaunchHandle::get_file`].
pub type LaunchFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A single entry in a delivered set of launch handles.
pub trait LaunchHandle {
    /// Whether this handle refers to a file (as opposed to a directory).
    fn is_file_handle(&self) -> bool;

    /// Resolves the handle to its file contents.
    fn get_file(&self) -> LaunchFuture<'_, Result<IncomingFile, String>>;
}

/// Callback receiving each delivered batch of launch handles.
pub type LaunchConsumer = Rc<dyn Fn(Vec<Rc<dyn LaunchHandle>>)>;

/// Host service that registers a consumer for file-launch deliveries.
pub trait LaunchQueueService {
    /// Registers `consumer`, replacing any earlier one.
    ///
    /// Returns `false` when the host has no launch queue; the consumer is then dropped.
    fn set_consumer(&self, consumer: LaunchConsumer) -> bool;
}

#[derive(Default)]
/// In-memory launch queue whose deliveries are triggered explicitly.
pub struct MemoryLaunchQueue {
    consumer: RefCell<Option<LaunchConsumer>>,
}

impl MemoryLaunchQueue {
    /// Whether a consumer is registered.
    pub fn has_consumer(&self) -> bool {
        self.consumer.borrow().is_some()
    }

    /// Delivers a batch of handles to the registered consumer.
    ///
    /// Returns `false` when no consumer is registered.
    pub fn deliver(&self, handles: Vec<Rc<dyn LaunchHandle>>) -> bool {
        let consumer = self.consumer.borrow().clone();
        match consumer {
            Some(consumer) => {
                consumer(handles);
                true
            }
            None => false,
        }
    }
}

impl LaunchQueueService for MemoryLaunchQueue {
    fn set_consumer(&self, consumer: LaunchConsumer) -> bool {
        *self.consumer.borrow_mut() = Some(consumer);
        true
    }
}

#[derive(Debug, Clone)]
/// In-memory launch handle.
pub enum MemoryLaunchHandle {
    /// Handle resolving to the wrapped file.
    File(IncomingFile),
    /// Handle resolving to a read failure.
    Unreadable(String),
    /// Directory handle.
    Directory,
}

impl LaunchHandle for MemoryLaunchHandle {
    fn is_file_handle(&self) -> bool {
        !matches!(self, Self::Directory)
    }

    fn get_file(&self) -> LaunchFuture<'_, Result<IncomingFile, String>> {
        let result = match self {
            Self::File(file) => Ok(file.clone()),
            Self::Unreadable(message) => Err(message.clone()),
            Self::Directory => Err("directory handles have no file contents".to_string()),
        };
        Box::pin(async move { result })
    }
}

/// Resolves the first handle of a launch batch to its file.
///
/// Returns `Ok(None)` when the batch is empty or the first handle is not a file handle. Handles
/// after the first are ignored. The file's media type is not checked here.
pub async fn first_launched_file(
    handles: &[Rc<dyn LaunchHandle>],
) -> Result<Option<IncomingFile>, String> {
    let Some(first) = handles.first() else {
        return Ok(None);
    };
    if !first.is_file_handle() {
        return Ok(None);
    }
    first.get_file().await.map(Some)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn png(name: &str) -> IncomingFile {
        IncomingFile::from_bytes(name, "image/png", vec![7_u8])
    }

    #[test]
    fn first_launched_file_takes_only_the_first_handle() {
        let handles: Vec<Rc<dyn LaunchHandle>> = vec![
            Rc::new(MemoryLaunchHandle::File(png("first.png"))),
            Rc::new(MemoryLaunchHandle::File(png("second.png"))),
        ];
        let file = block_on(first_launched_file(&handles)).expect("launch read");
        assert_eq!(file.map(|file| file.name), Some("first.png".to_string()));
    }

    #[test]
    fn first_launched_file_skips_empty_and_directory_batches() {
        assert_eq!(block_on(first_launched_file(&[])), Ok(None));

        let handles: Vec<Rc<dyn LaunchHandle>> = vec![
            Rc::new(MemoryLaunchHandle::Directory),
            Rc::new(MemoryLaunchHandle::File(png("ignored.png"))),
        ];
        assert_eq!(block_on(first_launched_file(&handles)), Ok(None));
    }

    #[test]
    fn first_launched_file_does_not_check_media_type() {
        let text = IncomingFile::from_bytes("notes.txt", "text/plain", vec![1_u8]);
        let handles: Vec<Rc<dyn LaunchHandle>> = vec![Rc::new(MemoryLaunchHandle::File(text))];
        let file = block_on(first_launched_file(&handles)).expect("launch read");
        assert_eq!(file.map(|file| file.mime_type), Some("text/plain".to_string()));
    }

    #[test]
    fn memory_queue_delivers_only_after_registration() {
        let queue = MemoryLaunchQueue::default();
        assert!(!queue.deliver(Vec::new()));

        let seen = Rc::new(Cell::new(0_usize));
        let seen_in_consumer = seen.clone();
        assert!(queue.set_consumer(Rc::new(move |handles: Vec<Rc<dyn LaunchHandle>>| {
            seen_in_consumer.set(seen_in_consumer.get() + handles.len());
        })));

        assert!(queue.deliver(vec![Rc::new(MemoryLaunchHandle::Directory)]));
        assert_eq!(seen.get(), 1);
    }
}
