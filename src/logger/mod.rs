//! Public facade.
//!
//! `Logger` wires the policy, the buffer engine, the renderer, and the
//! active sink together and exposes the public operations. One value, one
//! thread: there is no global instance and no internal locking.

mod config;

pub use config::{Config, ConfigError};

use crate::domain::{EntryOptions, FatalLevel, LogEntry, Payload, Severity};
use crate::engine::BufferEngine;
use crate::policy::LevelPolicy;
use crate::render::Renderer;
use crate::sink::{
    CallbackSink, ConsoleSink, FileSink, Sink, SinkError, SinkFn, SinkKind, sanitize_subdir,
};
use tracing::warn;

/// Sink selection handed to [`Logger::set_sink`].
///
/// The callback handler is a concrete closure validated by the type system
/// at registration time.
pub enum SinkSpec {
    Console,
    File,
    Callback(SinkFn),
}

enum ActiveSink {
    Console(ConsoleSink),
    /// File target state lives on the logger so directory and name survive
    /// sink switches.
    File,
    Callback(CallbackSink),
}

pub struct Logger {
    active: bool,
    clear_on_filtered_replay: bool,
    policy: LevelPolicy,
    renderer: Renderer,
    engine: BufferEngine,
    sink: ActiveSink,
    file: FileSink,
}

impl Logger {
    /// A logger with default configuration: console sink, `Warn` threshold,
    /// `Error` fatal trigger.
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// Build from a validated configuration.
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: Config) -> Self {
        let mut renderer = Renderer::new();
        renderer.set_show_time(config.show_time);
        if let Some(pid) = config.pid {
            renderer.set_pid(pid);
        }
        Self {
            active: config.activate,
            clear_on_filtered_replay: config.clear_on_filtered_replay,
            policy: LevelPolicy::new(config.threshold, config.fatal_threshold, config.skip_all),
            renderer,
            engine: BufferEngine::new(),
            sink: ActiveSink::Console(ConsoleSink),
            file: FileSink::new(config.log_dir, config.file_name),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn sink_kind(&self) -> SinkKind {
        match self.sink {
            ActiveSink::Console(_) => SinkKind::Console,
            ActiveSink::File => SinkKind::File,
            ActiveSink::Callback(_) => SinkKind::Callback,
        }
    }

    /// Number of entries currently pending in the buffer.
    pub fn pending(&self) -> usize {
        self.engine.len()
    }

    /// Master switch. While deactivated, every other operation is an inert
    /// no-op; `set_activate(true)` is the only way back.
    pub fn set_activate(&mut self, active: bool) {
        self.active = active;
    }

    /// Tag every rendered line with a process identifier. Empty ids are
    /// ignored.
    pub fn set_process_id(&mut self, pid: impl Into<String>) {
        if !self.active {
            return;
        }
        let pid = pid.into();
        if pid.is_empty() {
            warn!("ignoring empty process id");
            return;
        }
        self.renderer.set_pid(pid);
    }

    pub fn set_threshold(&mut self, level: Severity) {
        if !self.active {
            return;
        }
        self.policy.set_threshold(level);
    }

    /// Set the framed-flush trigger. A level value not strictly more severe
    /// than the threshold is ignored; `Disabled` is always accepted.
    pub fn set_fatal_threshold(&mut self, fatal: FatalLevel) {
        if !self.active {
            return;
        }
        if !self.policy.set_fatal(fatal) {
            warn!(
                ?fatal,
                threshold = %self.policy.threshold(),
                "ignoring fatal threshold not more severe than the threshold"
            );
        }
    }

    pub fn set_global_skip(&mut self, skip: bool) {
        if !self.active {
            return;
        }
        self.policy.set_skip_all(skip);
    }

    pub fn set_show_time(&mut self, show_time: bool) {
        if !self.active {
            return;
        }
        self.renderer.set_show_time(show_time);
    }

    /// Select the output sink. Pending show-marked entries are replayed to
    /// the sink being replaced first, never to the new one.
    pub fn set_sink(&mut self, spec: SinkSpec) -> Result<(), SinkError> {
        if !self.active {
            return Ok(());
        }
        self.show_logs(None)?;
        self.sink = match spec {
            SinkSpec::Console => ActiveSink::Console(ConsoleSink),
            SinkSpec::File => ActiveSink::File,
            SinkSpec::Callback(handler) => ActiveSink::Callback(CallbackSink::new(handler)),
        };
        Ok(())
    }

    /// Append path: stash or emit according to the current policy. At most
    /// one atomic sink write per call.
    pub fn log(
        &mut self,
        payload: impl Into<Payload>,
        level: Severity,
        options: Option<EntryOptions>,
    ) -> Result<(), SinkError> {
        if !self.active {
            return Ok(());
        }
        let entry = LogEntry::now(payload.into(), level, options.unwrap_or_default());
        if let Some(text) = self.engine.process(entry, &self.policy, &self.renderer) {
            self.write_sink(&text)?;
        }
        Ok(())
    }

    /// On-demand replay of the pending buffer (one atomic sink write).
    ///
    /// With a filter, every pending entry at least as severe surfaces and
    /// the buffer is kept unless `clear_on_filtered_replay` was configured.
    /// Without one, show-marked entries surface with their hidden context
    /// framed per the fatal trigger, and the buffer is consumed.
    pub fn show_logs(&mut self, filter: Option<Severity>) -> Result<(), SinkError> {
        if !self.active {
            return Ok(());
        }
        if let Some(text) = self.engine.replay(
            filter,
            &self.policy,
            &self.renderer,
            self.clear_on_filtered_replay,
        ) {
            self.write_sink(&text)?;
        }
        Ok(())
    }

    /// Clear the pending buffer unconditionally. Nothing is emitted.
    pub fn reset_log(&mut self) {
        if !self.active {
            return;
        }
        self.engine.reset();
    }

    /// Extend the file sink target with a sanitized subdirectory. Only
    /// takes effect while the file sink is active; the pending buffer is
    /// replayed under the old target first. The directory is created
    /// recursively when absent.
    pub fn set_subdirectory(&mut self, raw: &str) -> Result<(), SinkError> {
        if !self.active {
            return Ok(());
        }
        let Some(subdir) = sanitize_subdir(raw) else {
            warn!(raw, "ignoring subdirectory that sanitizes to empty");
            return Ok(());
        };
        if !matches!(self.sink, ActiveSink::File) {
            return Ok(());
        }
        self.show_logs(None)?;
        self.file.set_subdir(subdir)
    }

    /// Change the file sink's file name (without extension). Stored
    /// regardless of the active sink; flushes the pending buffer first when
    /// the file sink is active. Empty names are ignored.
    pub fn set_file_name(&mut self, name: &str) -> Result<(), SinkError> {
        if !self.active {
            return Ok(());
        }
        if name.is_empty() {
            warn!("ignoring empty file name");
            return Ok(());
        }
        if matches!(self.sink, ActiveSink::File) {
            self.show_logs(None)?;
        }
        self.file.set_file_name(name.to_string());
        Ok(())
    }

    /// Target path of the file sink under the current configuration.
    pub fn file_path(&self) -> std::path::PathBuf {
        self.file.path()
    }

    fn write_sink(&mut self, text: &str) -> Result<(), SinkError> {
        match &mut self.sink {
            ActiveSink::Console(console) => console.write(text),
            ActiveSink::File => self.file.write(text),
            ActiveSink::Callback(callback) => callback.write(text),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
