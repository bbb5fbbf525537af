//! Durable slot the record store persists to.
//!
//! A slot holds one serialized payload. Reading an absent slot is not an
//! error, and neither is removing one.

use std::{
    cell::{Cell, RefCell},
    fs, io,
    path::{Path, PathBuf},
};

/// A single key-value slot.
pub trait Storage {
    /// Returns the payload, or `None` if the slot is empty.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replaces the payload.
    fn write(&self, payload: &str) -> io::Result<()>;

    /// Removes the payload.
    fn remove(&self) -> io::Result<()>;
}

/// Slot backed by a JSON file on disk.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

/// In-process slot. Counts writes so callers can check write-through behavior.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    payload: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `payload`.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
            writes: Cell::new(0),
        }
    }

    /// Number of successful `write` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Current payload.
    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.payload.borrow().clone())
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        *self.payload.borrow_mut() = Some(payload.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        *self.payload.borrow_mut() = None;
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self) -> io::Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        (**self).write(payload)
    }

    fn remove(&self) -> io::Result<()> {
        (**self).remove()
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self) -> io::Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        (**self).write(payload)
    }

    fn remove(&self) -> io::Result<()> {
        (**self).remove()
    }
}
