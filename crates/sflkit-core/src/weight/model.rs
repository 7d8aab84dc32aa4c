// sflkit-core/src/weight/model.rs
// ============================================================================
// Module: Dependency Weight Model
// Description: Six-level TestDependencyModel..TestAssertDefUsesModel
//              hierarchy, wrapping a TraceModel to re-weight objects by
//              proximity to a failing test's checkpoints.
// Purpose: Re-weight canonical objects by proximity to a failing trace's
//          checkpoints, per the Open-Question resolutions in DESIGN.md.
// Dependencies: crate::event, crate::factory, crate::object, crate::trace
// ============================================================================

//! ## Overview
//! A trace is split into **parts**: contiguous slices of the objects a trace
//! notified, delimited by `TestLine`/`TestStart` checkpoints. Each part is
//! keyed by the checkpoint event that opened it. Only failing traces are
//! partitioned — only while a trace is still failing does it contribute
//! weight; a passing trace contributes none, which is consistent with
//! [`crate::object::tally::Observation::finalize`] leaving `aggregated_weight`
//! at `0.0` when no dependency model ever called `adjust_weight`.
//!
//! [`DependencyWeightModel`] wraps any [`TraceModel`] (serial or parallel)
//! and re-implements the trait itself so the analyzer can drive either
//! uniformly with or without dependency weighting. It tracks one
//! [`TraceState`] per `ThreadId` observed in the event stream — the same
//! struct serves both the serial model (always `ThreadId::default()`) and
//! the parallel variant, since all per-trace scratch state is keyed by
//! `(event_file, thread_id)` and nothing about the partitioning logic below
//! actually depends on which trace model it wraps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::ThreadId;
use crate::event::stream::EventFile;
use crate::factory::ObjectHandle;
use crate::trace::serial::TraceModel;

// ============================================================================
// SECTION: Model Kind
// ============================================================================

/// Which of the six dependency-model levels a [`DependencyWeightModel`]
/// implements, in increasing order of sophistication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyModelKind {
    /// Partitions into parts; applies no weighting of its own.
    Test,
    /// Weights parts `actual`/`before`/`after` relative to test start/end.
    TestFunction,
    /// `TestFunction`, further scaled by temporal distance to the end part.
    TestLine,
    /// `TestFunction`, scaled by def-use graph distance to the end part.
    TestDefUse,
    /// `TestDefUse` with transitive def-chain retargeting.
    TestDefUses,
    /// `TestDefUse` plus an assert-location distance penalty.
    TestAssertDefUse,
    /// `TestDefUses` plus an assert-location distance penalty.
    TestAssertDefUses,
}

impl DependencyModelKind {
    const fn uses_def_use_graph(self) -> bool {
        matches!(
            self,
            Self::TestDefUse | Self::TestDefUses | Self::TestAssertDefUse | Self::TestAssertDefUses
        )
    }

    const fn is_transitive(self) -> bool {
        matches!(self, Self::TestDefUses | Self::TestAssertDefUses)
    }

    const fn applies_assert_penalty(self) -> bool {
        matches!(self, Self::TestAssertDefUse | Self::TestAssertDefUses)
    }

    const fn uses_temporal_distance(self) -> bool {
        matches!(self, Self::TestLine)
    }
}

// ============================================================================
// SECTION: Part & Trace State
// ============================================================================

#[derive(Debug, Default)]
struct Part {
    key: Option<(String, u32)>,
    objects: Vec<ObjectHandle>,
}

#[derive(Debug, Default)]
struct TraceState {
    parts: Vec<Part>,
    current: Option<Part>,
    start_index: Option<usize>,
    end_index: Option<usize>,
    /// Most recent part index that defined each named variable.
    var_def_part: HashMap<String, usize>,
    /// `(def_part, use_part)` edges recorded this trace.
    edges: Vec<(usize, usize)>,
    assert_locations: HashSet<(String, u32)>,
}

impl TraceState {
    fn open_part_index(&self) -> usize {
        self.parts.len()
    }

    fn flush_current(&mut self) {
        if let Some(part) = self.current.take() {
            self.parts.push(part);
        }
    }

    fn start_checkpoint(&mut self, key: (String, u32)) {
        self.flush_current();
        self.current = Some(Part {
            key: Some(key),
            objects: Vec::new(),
        });
    }

    fn record_objects(&mut self, handles: &[ObjectHandle]) {
        if handles.is_empty() {
            return;
        }
        if self.current.is_none() {
            self.current = Some(Part::default());
        }
        if let Some(part) = self.current.as_mut() {
            part.objects.extend(handles.iter().cloned());
        }
    }
}

// ============================================================================
// SECTION: Dependency Weight Model
// ============================================================================

/// Wraps a [`TraceModel`], partitioning each failing trace into parts and
/// re-weighting every object those parts touched once the trace closes.
pub struct DependencyWeightModel<T: TraceModel> {
    inner: T,
    kind: DependencyModelKind,
    failing: bool,
    run: crate::event::model::RunId,
    threads: HashMap<ThreadId, TraceState>,
}

impl<T: TraceModel> DependencyWeightModel<T> {
    /// Wraps `inner`, applying `kind`'s weighting rules to every trace it drains.
    pub fn new(inner: T, kind: DependencyModelKind, run: crate::event::model::RunId) -> Self {
        Self {
            inner,
            kind,
            failing: false,
            run,
            threads: HashMap::new(),
        }
    }

    fn state_for(&mut self, thread: ThreadId) -> &mut TraceState {
        self.threads.entry(thread).or_default()
    }

    fn on_event(&mut self, event: &Event) {
        if !self.failing {
            return;
        }
        let thread = event.thread();
        let kind = self.kind;
        let notified: Vec<ObjectHandle> = self.inner.last_notified().to_vec();
        let state = self.state_for(thread);

        match &event.kind {
            EventKind::TestStart { .. } | EventKind::TestLine => {
                state.start_checkpoint((event.file.clone(), event.line));
                if matches!(event.kind, EventKind::TestStart { .. }) {
                    state.start_index = Some(state.open_part_index());
                }
            }
            EventKind::TestEnd { .. } => {
                state.end_index = Some(state.open_part_index());
            }
            EventKind::TestDef { var, .. } => {
                let idx = state.open_part_index();
                if kind.is_transitive() {
                    if let Some(&old) = state.var_def_part.get(var) {
                        state.edges.push((old, idx));
                    }
                }
                state.var_def_part.insert(var.clone(), idx);
            }
            EventKind::TestUse { var, .. } => {
                let idx = state.open_part_index();
                if let Some(&def_idx) = state.var_def_part.get(var) {
                    state.edges.push((def_idx, idx));
                }
            }
            EventKind::TestAssert => {
                state.assert_locations.insert((event.file.clone(), event.line));
            }
            _ => {}
        }

        state.record_objects(&notified);
    }

    fn finalize_thread(&mut self, state: &mut TraceState) {
        state.flush_current();
        if state.parts.is_empty() {
            return;
        }
        let weights = self.compute_weights(state);
        for (part, weight) in state.parts.iter().zip(weights) {
            for handle in &part.objects {
                handle.lock().adjust_weight(self.run, weight);
            }
        }
    }

    fn compute_weights(&self, state: &TraceState) -> Vec<f64> {
        let n = state.parts.len();
        if self.kind == DependencyModelKind::Test {
            return vec![0.0; n];
        }

        let function_weights = Self::function_weights(n, state.start_index, state.end_index);
        if self.kind == DependencyModelKind::TestFunction {
            return function_weights;
        }

        let anchor = state.end_index.or(state.start_index).unwrap_or(0);
        let mut distance: Vec<f64> = (0..n).map(|i| (i as i64 - anchor as i64).unsigned_abs() as f64).collect();

        if self.kind.uses_def_use_graph() {
            Self::relax_def_use(&mut distance, &state.edges);
        }

        if self.kind.applies_assert_penalty() {
            for (i, part) in state.parts.iter().enumerate() {
                if part.key.as_ref().is_some_and(|key| state.assert_locations.contains(key)) {
                    distance[i] += 1.0;
                }
            }
            Self::relax_def_use(&mut distance, &state.edges);
        }

        if !self.kind.uses_temporal_distance() && !self.kind.uses_def_use_graph() {
            return function_weights;
        }

        let max_distance = distance.iter().cloned().fold(0.0_f64, f64::max);
        function_weights
            .into_iter()
            .zip(distance)
            .map(|(fw, d)| fw * (1.0 - d / (max_distance + 1.0)))
            .collect()
    }

    fn function_weights(n: usize, start: Option<usize>, end: Option<usize>) -> Vec<f64> {
        match (start, end) {
            (Some(start), Some(end)) => (0..n)
                .map(|i| if i >= start && i <= end { 1.0 } else { 0.5 })
                .collect(),
            (Some(start), None) => (0..n).map(|i| if i < start { 0.5 } else { 1.0 }).collect(),
            _ => vec![1.0; n],
        }
    }

    /// Single-source-shortest-path-style relaxation: repeatedly apply
    /// `dist[def] = min(dist[def], dist[use] + 1)` for every recorded
    /// `(def, use)` edge until a pass makes no further change (or the edge
    /// count is exhausted, which bounds the number of passes needed for any
    /// acyclic or cyclic edge set of this size).
    fn relax_def_use(distance: &mut [f64], edges: &[(usize, usize)]) {
        let mut changed = true;
        let mut passes = 0usize;
        while changed && passes <= edges.len() + 1 {
            changed = false;
            for &(def_idx, use_idx) in edges {
                let candidate = distance[use_idx] + 1.0;
                if candidate < distance[def_idx] {
                    distance[def_idx] = candidate;
                    changed = true;
                }
            }
            passes += 1;
        }
    }
}

impl<T: TraceModel> TraceModel for DependencyWeightModel<T> {
    fn prepare(&mut self, event_file: &EventFile) {
        self.inner.prepare(event_file);
        self.failing = event_file.failing;
        self.threads.clear();
    }

    fn dispatch_event(&mut self, event: &Event) {
        self.inner.dispatch_event(event);
        self.on_event(event);
    }

    fn follow_up(&mut self, event_file: &EventFile) {
        self.inner.follow_up(event_file);
        if !self.failing {
            return;
        }
        let threads: Vec<ThreadId> = self.threads.keys().copied().collect();
        for thread in threads {
            let mut state = self.threads.remove(&thread).unwrap_or_default();
            self.finalize_thread(&mut state);
        }
    }

    fn last_notified(&self) -> &[ObjectHandle] {
        self.inner.last_notified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_weights_mark_actual_band_when_end_seen() {
        let weights = DependencyWeightModel::<crate::trace::serial::SerialTraceModel>::function_weights(6, Some(0), Some(3));
        assert_eq!(weights, vec![1.0, 1.0, 1.0, 1.0, 0.5, 0.5]);
    }

    #[test]
    fn function_weights_favor_rest_when_end_unseen() {
        let weights = DependencyWeightModel::<crate::trace::serial::SerialTraceModel>::function_weights(4, Some(2), None);
        assert_eq!(weights, vec![0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn relaxation_propagates_distance_back_through_def_use_chain() {
        let mut distance = vec![5.0, 5.0, 0.0];
        let edges = vec![(0, 1), (1, 2)];
        DependencyWeightModel::<crate::trace::serial::SerialTraceModel>::relax_def_use(&mut distance, &edges);
        assert_eq!(distance, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn weights_stay_within_unit_interval() {
        let state = TraceState {
            parts: (0..5).map(|_| Part::default()).collect(),
            start_index: Some(0),
            end_index: Some(3),
            ..TraceState::default()
        };
        let model = DependencyWeightModel::new(crate::trace::serial::SerialTraceModel::new(
            std::sync::Arc::new(crate::factory::CombinationFactory::default()),
            crate::event::model::RunId(0),
        ), DependencyModelKind::TestLine, crate::event::model::RunId(0));
        for w in model.compute_weights(&state) {
            assert!((0.0..=1.0).contains(&w), "weight {w} out of range");
        }
    }
}
