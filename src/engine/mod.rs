//! Pending-buffer engine: the stash-or-flush decision core.
//!
//! `BufferEngine` owns the ordered pending buffer and turns accepted
//! entries into rendered output blobs. It never writes to a sink itself:
//! each call returns at most one text blob, which the facade hands to the
//! active sink in a single atomic write.

use crate::domain::{LogEntry, Severity};
use crate::policy::{Decision, LevelPolicy};
use crate::render::Renderer;
use std::collections::VecDeque;
use tracing::trace;

/// FIFO pending buffer plus the flush/replay rules over it.
///
/// Insertion order is preserved; the buffer is unbounded and grows until a
/// flush or an explicit reset.
#[derive(Debug, Default)]
pub struct BufferEngine {
    pending: VecDeque<LogEntry>,
}

impl BufferEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append path. Stashes, drops, or flushes according to the policy.
    ///
    /// Returns the rendered text when the call produced output.
    pub fn process(
        &mut self,
        mut entry: LogEntry,
        policy: &LevelPolicy,
        renderer: &Renderer,
    ) -> Option<String> {
        match policy.accept(entry.level) {
            Decision::Drop => None,
            Decision::BufferOnly => {
                // Stashed silently; the surface marker stays whatever the
                // caller put in the options.
                trace!(level = %entry.level, pending = self.pending.len(), "entry stashed");
                self.pending.push_back(entry);
                None
            }
            Decision::Process => {
                if policy.effective_skip(entry.options.skip) {
                    entry.show = true;
                    self.pending.push_back(entry);
                    return None;
                }
                self.flush_with(entry, policy, renderer)
            }
        }
    }

    /// The flush point: a processed entry consumes the pending buffer.
    fn flush_with(
        &mut self,
        entry: LogEntry,
        policy: &LevelPolicy,
        renderer: &Renderer,
    ) -> Option<String> {
        let framed = !self.pending.is_empty() && policy.is_fatal(entry.level);
        let mut out = String::new();

        if framed {
            out.push_str(&renderer.banner(&entry));
            for stashed in self.pending.drain(..) {
                out.push_str(&renderer.render(&stashed));
            }
        } else {
            // Only show-marked entries surface outside a framed flush; the
            // rest were context for a fatal that never came.
            for stashed in self.pending.drain(..) {
                if stashed.show {
                    out.push_str(&renderer.render(&stashed));
                }
            }
        }

        out.push_str(&renderer.render(&entry));
        if framed {
            trace!(level = %entry.level, "framed flush");
            out.push_str(Renderer::CLOSER);
        }

        if out.is_empty() { None } else { Some(out) }
    }

    /// On-demand replay, independent of the append path.
    ///
    /// With a level filter: renders every stashed entry at least as severe
    /// as the filter, regardless of surface markers; the buffer is consumed
    /// only when `clear_on_filtered` is set.
    ///
    /// Without a filter: walks the buffer in order, grouping non-surfaced
    /// entries as hidden context. Each show-marked entry without its own
    /// skip flag either emits a framed block (banner, hidden context, the
    /// entry, closer) when its level reaches the fatal trigger, or emits
    /// alone; the hidden context is discarded either way. The buffer is
    /// consumed afterwards.
    pub fn replay(
        &mut self,
        filter: Option<Severity>,
        policy: &LevelPolicy,
        renderer: &Renderer,
        clear_on_filtered: bool,
    ) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }

        let out = match filter {
            Some(max) => {
                let mut out = String::new();
                for stashed in &self.pending {
                    if stashed.level <= max {
                        out.push_str(&renderer.render(stashed));
                    }
                }
                if clear_on_filtered {
                    self.pending.clear();
                }
                out
            }
            None => {
                let mut out = String::new();
                let mut hidden: Vec<&LogEntry> = Vec::new();
                for stashed in &self.pending {
                    if stashed.show && !stashed.options.skip {
                        let framed = !hidden.is_empty() && policy.is_fatal(stashed.level);
                        if framed {
                            out.push_str(&renderer.banner(stashed));
                            for context in &hidden {
                                out.push_str(&renderer.render(context));
                            }
                        }
                        out.push_str(&renderer.render(stashed));
                        if framed {
                            out.push_str(Renderer::CLOSER);
                        }
                        hidden.clear();
                    } else {
                        hidden.push(stashed);
                    }
                }
                self.pending.clear();
                out
            }
        };

        if out.is_empty() { None } else { Some(out) }
    }

    /// Clears the buffer unconditionally. No side effects.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryOptions, FatalLevel, Payload};
    use chrono::{TimeZone, Utc};

    fn renderer() -> Renderer {
        let mut renderer = Renderer::new();
        renderer.set_show_time(false);
        renderer
    }

    fn entry(text: &str, level: Severity) -> LogEntry {
        entry_with(text, level, EntryOptions::default())
    }

    fn entry_with(text: &str, level: Severity, options: EntryOptions) -> LogEntry {
        LogEntry::at(
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            Payload::from(text),
            level,
            options,
        )
    }

    #[test]
    fn over_threshold_entries_stash_without_output() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::default();

        let out = engine.process(entry("later", Severity::Info), &policy, &renderer());
        assert!(out.is_none());
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn dropped_entries_leave_no_state() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::new(Severity::Warn, FatalLevel::Disabled, false);

        let out = engine.process(entry("gone", Severity::Debug), &policy, &renderer());
        assert!(out.is_none());
        assert!(engine.is_empty());
    }

    #[test]
    fn processed_entry_renders_directly_with_empty_buffer() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::default();

        let out = engine
            .process(entry("hello", Severity::Warn), &policy, &renderer())
            .unwrap();
        assert_eq!(out, "[WARN] hello\n");
        assert!(engine.is_empty());
    }

    #[test]
    fn fatal_entry_flushes_buffer_inside_one_frame() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::new(Severity::Warn, FatalLevel::At(Severity::Fatal), false);
        let renderer = renderer();

        engine.process(entry("ctx1", Severity::Info), &policy, &renderer);
        engine.process(entry("ctx2", Severity::Debug), &policy, &renderer);
        let out = engine
            .process(entry("boom", Severity::Fatal), &policy, &renderer)
            .unwrap();

        assert_eq!(out.matches("--- ").count(), 1);
        assert_eq!(out.matches(Renderer::CLOSER).count(), 1);
        let ctx1 = out.find("ctx1").unwrap();
        let ctx2 = out.find("ctx2").unwrap();
        let boom = out.find("boom").unwrap();
        assert!(ctx1 < ctx2 && ctx2 < boom);
        assert!(engine.is_empty());
    }

    #[test]
    fn non_fatal_flush_surfaces_only_show_marked_entries() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::new(Severity::Warn, FatalLevel::At(Severity::Fatal), false);
        let renderer = renderer();

        engine.process(entry("silent", Severity::Info), &policy, &renderer);
        engine.process(
            entry_with(
                "marked",
                Severity::Trace,
                EntryOptions {
                    show: true,
                    ..EntryOptions::default()
                },
            ),
            &policy,
            &renderer,
        );
        let out = engine
            .process(entry("now", Severity::Warn), &policy, &renderer)
            .unwrap();

        assert!(!out.contains("silent"));
        assert!(out.contains("marked"));
        assert!(out.contains("now"));
        assert!(!out.contains("--- "));
        assert!(engine.is_empty());
    }

    #[test]
    fn skip_path_stashes_with_surface_marker() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::default();

        let out = engine.process(
            entry_with(
                "deferred",
                Severity::Warn,
                EntryOptions {
                    skip: true,
                    ..EntryOptions::default()
                },
            ),
            &policy,
            &renderer(),
        );
        assert!(out.is_none());
        assert_eq!(engine.len(), 1);

        // A later plain flush surfaces it.
        let out = engine
            .process(entry("flush", Severity::Warn), &policy, &renderer())
            .unwrap();
        assert!(out.contains("deferred"));
    }

    #[test]
    fn global_skip_stashes_everything() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::new(Severity::Warn, FatalLevel::default(), true);

        assert!(
            engine
                .process(entry("a", Severity::Fatal), &policy, &renderer())
                .is_none()
        );
        assert!(
            engine
                .process(entry("b", Severity::Warn), &policy, &renderer())
                .is_none()
        );
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn filtered_replay_ignores_surface_markers_and_keeps_buffer() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::default();
        let renderer = renderer();

        engine.process(entry("deep", Severity::Trace), &policy, &renderer);
        engine.process(entry("mid", Severity::Info), &policy, &renderer);

        let out = engine
            .replay(Some(Severity::Info), &policy, &renderer, false)
            .unwrap();
        assert!(out.contains("mid"));
        assert!(!out.contains("deep"));
        // The filtered path leaves the buffer unless configured to clear.
        assert_eq!(engine.len(), 2);

        let out = engine.replay(Some(Severity::Info), &policy, &renderer, true);
        assert!(out.is_some());
        assert!(engine.is_empty());
    }

    #[test]
    fn unfiltered_replay_frames_hidden_context_before_fatal_show_entries() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::new(Severity::System, FatalLevel::At(Severity::Error), false);
        let renderer = renderer();

        // Plain context entry, never surfaced standalone.
        engine.pending.push_back(entry("hidden", Severity::Info));
        engine
            .pending
            .push_back(entry_with("headline", Severity::Error, EntryOptions {
                show: true,
                ..EntryOptions::default()
            }));

        let out = engine.replay(None, &policy, &renderer, false).unwrap();
        assert_eq!(out.matches("--- ").count(), 1);
        assert_eq!(out.matches(Renderer::CLOSER).count(), 1);
        let hidden = out.find("hidden").unwrap();
        let headline = out.find("headline").unwrap();
        assert!(hidden < headline);
        assert!(engine.is_empty());
    }

    #[test]
    fn unfiltered_replay_emits_mild_show_entries_alone() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::new(Severity::System, FatalLevel::At(Severity::Fatal), false);
        let renderer = renderer();

        engine.pending.push_back(entry("context", Severity::Info));
        engine
            .pending
            .push_back(entry_with("note", Severity::Warn, EntryOptions {
                show: true,
                ..EntryOptions::default()
            }));

        let out = engine.replay(None, &policy, &renderer, false).unwrap();
        assert!(out.contains("note"));
        assert!(!out.contains("context"));
        assert!(!out.contains("--- "));
        assert!(engine.is_empty());
    }

    #[test]
    fn show_and_skip_entries_wait_in_the_hidden_context_group() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::new(Severity::System, FatalLevel::At(Severity::Error), false);
        let renderer = renderer();

        engine.pending.push_back(entry_with(
            "waiting",
            Severity::Warn,
            EntryOptions {
                skip: true,
                show: true,
                ..EntryOptions::default()
            },
        ));
        engine
            .pending
            .push_back(entry_with("trigger", Severity::Error, EntryOptions {
                show: true,
                ..EntryOptions::default()
            }));

        let out = engine.replay(None, &policy, &renderer, false).unwrap();
        // The show+skip entry rides inside the frame of the next show entry.
        assert_eq!(out.matches("--- ").count(), 1);
        let waiting = out.find("waiting").unwrap();
        let trigger = out.find("trigger").unwrap();
        assert!(waiting < trigger);
    }

    #[test]
    fn replay_of_empty_buffer_is_a_no_op() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::default();
        assert!(engine.replay(None, &policy, &renderer(), false).is_none());
        assert!(
            engine
                .replay(Some(Severity::System), &policy, &renderer(), false)
                .is_none()
        );
    }

    #[test]
    fn reset_discards_everything() {
        let mut engine = BufferEngine::new();
        let policy = LevelPolicy::default();
        engine.process(entry("x", Severity::Info), &policy, &renderer());
        assert_eq!(engine.len(), 1);
        engine.reset();
        assert!(engine.is_empty());
        assert!(engine.replay(None, &policy, &renderer(), false).is_none());
    }
}
