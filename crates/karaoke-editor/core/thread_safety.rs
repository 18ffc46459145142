//! Thread-safe session access
//!
//! [`SyncSession`] shares one [`LyricSession`] between the UI thread, a
//! preview timer and an export worker. Edits go through a write lock and a
//! command lock so each edit applies atomically; readers take immutable
//! [`SessionSnapshot`]s that never observe a half-applied edit.

use super::errors::{EditorError, Result};
use super::session::LyricSession;
use crate::commands::{CommandResult, MarkCommand, MarkOperation};
use crate::playback::FrameSource;
use karaoke_core::{evaluate, Lyrics, Millis, RenderDescriptor, SyncConfig};
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handle to a [`LyricSession`]
///
/// Cloning the handle shares the session.
#[derive(Debug, Clone)]
pub struct SyncSession {
    /// The wrapped session behind a read-write lock
    inner: Arc<RwLock<LyricSession>>,

    /// Command execution lock to ensure atomic edits
    command_lock: Arc<Mutex<()>>,

    /// Bumped after every write that changes marks, text or config
    version: Arc<AtomicU64>,
}

impl SyncSession {
    /// Wrap `session` for shared use
    #[must_use]
    pub fn new(session: LyricSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
            command_lock: Arc::new(Mutex::new(())),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Read access to the session
    pub fn read(&self) -> RwLockReadGuard<'_, LyricSession> {
        self.inner.read()
    }

    /// Try to get read access without blocking
    pub fn try_read(&self) -> Option<RwLockReadGuard<'_, LyricSession>> {
        self.inner.try_read()
    }

    /// Try to get write access without blocking
    ///
    /// The version is not bumped; prefer [`Self::with_write`].
    pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, LyricSession>> {
        self.inner.try_write()
    }

    /// Number of writes that changed marks, text or config
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Perform an operation with read access
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LyricSession) -> R,
    {
        f(&self.inner.read())
    }

    /// Perform an operation with write access
    ///
    /// # Errors
    ///
    /// Returns the error of `f`. The version is bumped only when `f`
    /// succeeds and left the marks, text or config different.
    pub fn with_write<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut LyricSession) -> Result<R>,
    {
        let _guard = self.command_lock.lock();
        let mut session = self.inner.write();
        let before = SessionSnapshot::capture(&session, 0);
        let result = f(&mut session)?;
        if !before.matches(&session) {
            self.version.fetch_add(1, Ordering::AcqRel);
        }
        Ok(result)
    }

    /// Execute a mark command atomically
    ///
    /// # Errors
    ///
    /// Returns the command's rejection.
    pub fn execute<C: MarkCommand + ?Sized>(&self, command: &C) -> Result<CommandResult> {
        self.with_write(|session| session.execute(command))
    }

    /// Place the next mark at `time`
    ///
    /// # Errors
    ///
    /// See [`LyricSession::drop_mark_at`].
    pub fn drop_mark_at(&self, time: Millis) -> Result<CommandResult> {
        self.with_write(|session| session.drop_mark_at(time))
    }

    /// Place the next mark at the clock position
    ///
    /// # Errors
    ///
    /// See [`LyricSession::drop_mark_now`].
    pub fn drop_mark_now(&self) -> Result<CommandResult> {
        self.with_write(LyricSession::drop_mark_now)
    }

    /// Move mark `index` to `time`
    ///
    /// # Errors
    ///
    /// See [`LyricSession::drag_mark`].
    pub fn drag_mark(&self, index: usize, time: Millis) -> Result<CommandResult> {
        self.with_write(|session| session.drag_mark(index, time))
    }

    /// Remove mark `index`
    ///
    /// # Errors
    ///
    /// See [`LyricSession::remove_mark`].
    pub fn remove_mark(&self, index: usize) -> Result<CommandResult> {
        self.with_write(|session| session.remove_mark(index))
    }

    /// Replace the lyric text
    ///
    /// # Errors
    ///
    /// See [`LyricSession::set_text`].
    pub fn set_text(&self, text: &str) -> Result<Option<CommandResult>> {
        self.with_write(|session| session.set_text(text))
    }

    /// Undo the last mark edit
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NothingToUndo`] on an empty history.
    pub fn undo(&self) -> Result<MarkOperation> {
        self.with_write(LyricSession::undo)
    }

    /// Redo the last undone mark edit
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NothingToRedo`] when nothing was undone.
    pub fn redo(&self) -> Result<MarkOperation> {
        self.with_write(LyricSession::redo)
    }

    /// Consistent copy of what evaluation needs
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.inner.read(), self.version())
    }

    /// Take a snapshot without blocking on a writer
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ThreadSafetyError`] while an edit holds the
    /// write lock.
    pub fn try_snapshot(&self) -> Result<SessionSnapshot> {
        let session = self
            .inner
            .try_read()
            .ok_or_else(|| EditorError::thread_safety("Session is locked for writing"))?;
        Ok(SessionSnapshot::capture(&session, self.version()))
    }

    /// Display state at `time`
    #[must_use]
    pub fn evaluate_at(&self, time: Millis) -> RenderDescriptor {
        self.inner.read().evaluate_at(time)
    }

    /// Display state at the clock position
    #[must_use]
    pub fn evaluate_now(&self) -> RenderDescriptor {
        self.inner.read().evaluate_now()
    }

    /// Unwrap the session if this is the last handle
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ThreadSafetyError`] while other handles exist.
    pub fn into_inner(self) -> Result<LyricSession> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|_| EditorError::thread_safety("Session is still shared"))
    }
}

impl FrameSource for SyncSession {
    fn evaluate_at(&self, time: Millis) -> RenderDescriptor {
        Self::evaluate_at(self, time)
    }
}

/// Immutable view of a session at one version
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    lyrics: Arc<Lyrics>,
    marks: Vec<Millis>,
    config: SyncConfig,
    version: u64,
}

impl SessionSnapshot {
    fn capture(session: &LyricSession, version: u64) -> Self {
        Self {
            lyrics: session.lyrics_handle(),
            marks: session.marks().as_slice().to_vec(),
            config: session.config().clone(),
            version,
        }
    }

    /// Whether `session` still evaluates exactly like this snapshot
    fn matches(&self, session: &LyricSession) -> bool {
        Arc::ptr_eq(&self.lyrics, &session.lyrics_handle())
            && self.marks == session.marks().as_slice()
            && self.config == *session.config()
    }

    /// Tokenized lyric
    #[must_use]
    pub fn lyrics(&self) -> &Lyrics {
        &self.lyrics
    }

    /// Marks at capture time
    #[must_use]
    pub fn marks(&self) -> &[Millis] {
        &self.marks
    }

    /// Sync settings at capture time
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Session version the snapshot was taken at
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}

impl FrameSource for SessionSnapshot {
    fn evaluate_at(&self, time: Millis) -> RenderDescriptor {
        evaluate(&self.lyrics, &self.marks, time, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AddMarkCommand;
    use std::thread;

    #[test]
    fn edits_bump_version() {
        let shared = SyncSession::new(LyricSession::new("abc"));
        assert_eq!(shared.version(), 0);

        shared.drop_mark_at(0).unwrap();
        shared.execute(&AddMarkCommand::new(100)).unwrap();
        assert_eq!(shared.version(), 2);

        assert!(shared.drop_mark_at(50).is_err());
        assert_eq!(shared.version(), 2);

        shared.undo().unwrap();
        assert_eq!(shared.with_read(|session| session.marks().len()), 1);
        assert_eq!(shared.version(), 3);
    }

    #[test]
    fn unchanged_writes_keep_version() {
        let shared = SyncSession::new(LyricSession::new("ab"));
        assert_eq!(shared.set_text("ab").unwrap(), None);
        assert_eq!(shared.version(), 0);

        shared.drop_mark_at(0).unwrap();
        shared.drag_mark(0, 0).unwrap();
        shared.with_write(|session| Ok(session.marks().len())).unwrap();
        assert_eq!(shared.version(), 1);

        shared.set_text("abc").unwrap();
        assert_eq!(shared.version(), 2);
        let config = SyncConfig::default().with_disappear_period(1_500);
        shared
            .with_write(|session| session.set_config(config))
            .unwrap();
        assert_eq!(shared.version(), 3);
    }

    #[test]
    fn snapshot_is_detached() {
        let shared = SyncSession::new(LyricSession::new("ab"));
        shared.drop_mark_at(0).unwrap();
        shared.drop_mark_at(100).unwrap();
        let before = shared.snapshot();

        shared.drop_mark_at(200).unwrap();
        shared.set_text("abcd").unwrap();

        assert_eq!(before.marks(), &[0, 100]);
        assert_eq!(before.lyrics().word_count(), 2);
        assert_eq!(before.version(), 2);
        assert_eq!(shared.snapshot().marks(), &[0, 100, 200]);
    }

    #[test]
    fn snapshot_matches_live_evaluation() {
        let shared = SyncSession::new(LyricSession::new("ab\ncd"));
        for time in [0, 100, 200, 300, 400] {
            shared.drop_mark_at(time).unwrap();
        }
        let snapshot = shared.snapshot();
        for time in (0..500).step_by(25) {
            assert_eq!(
                FrameSource::evaluate_at(&snapshot, time),
                shared.evaluate_at(time)
            );
        }
    }

    #[test]
    fn try_operations_fail_while_writing() {
        let shared = SyncSession::new(LyricSession::new("ab"));
        let _write_guard = shared.try_write().unwrap();

        assert!(shared.try_read().is_none());
        assert!(matches!(
            shared.try_snapshot(),
            Err(EditorError::ThreadSafetyError { .. })
        ));
    }

    #[test]
    fn concurrent_readers_and_writer() {
        let shared = SyncSession::new(LyricSession::new("abcdefgh"));
        shared.drop_mark_at(0).unwrap();

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for step in 1..=8 {
                    shared.drop_mark_at(step * 100).unwrap();
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let snapshot = shared.snapshot();
                        assert!(snapshot.marks().windows(2).all(|pair| pair[0] < pair[1]));
                        let _ = FrameSource::evaluate_at(&snapshot, 450);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        let session = shared.into_inner().unwrap();
        assert!(session.is_fully_marked());
        assert_eq!(session.marks().len(), 9);
    }

    #[test]
    fn shared_handle_cannot_unwrap() {
        let shared = SyncSession::new(LyricSession::new("ab"));
        let other = shared.clone();
        assert!(shared.into_inner().is_err());
        assert!(other.into_inner().is_ok());
    }
}
