// sflkit-core/src/analyzer/mod.rs
// ============================================================================
// Module: Analyzer
// Description: Top-level orchestration of trace ingestion, finalization, and
//              ranked/feature-vector output.
// Purpose: Own the shared factory and drive every trace serially or across a
//          bounded worker pool, then expose suggestions or feature vectors.
// Dependencies: rayon, crate::event, crate::factory, crate::features,
//               crate::object, crate::rank, crate::trace, crate::weight
// ============================================================================

//! ## Overview
//! [`Analyzer`] is the crate's single entry point. It owns one shared
//! [`CombinationFactory`] behind an `Arc`, drains each [`EventFile`] against
//! a per-trace [`Driver`] (serial or thread-aware, optionally wrapped in a
//! dependency/weight model per [`crate::weight`]), and once every trace has
//! drained, finalizes every canonical object's tallies. From there callers
//! pull either ranked [`Suggestion`]s (via [`crate::rank::SuggestionRanker`])
//! or per-run [`crate::features::FeatureVector`]s — the two alternate sinks
//! `spec.md` §2 describes (H and J) over the same object registry.
//!
//! A bad trace (`CoreError::Io`/`CorruptStream`/`UnknownEventId`) aborts only
//! that trace: its run id never joins the passed/failed sets that drive
//! finalization, matching the Cancellation policy in `spec.md` §5.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod observer;
pub mod predicate_set;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use observer::AnalyzerObserver;
pub use predicate_set::AnalysisVariant;
pub use predicate_set::PredicateSet;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::errors::CoreError;
use crate::errors::CoreResult;
use crate::event::model::Event;
use crate::event::model::RunId;
use crate::event::stream::EventFile;
use crate::factory::CombinationFactory;
use crate::factory::ObjectHandle;
use crate::features::FeatureVector;
use crate::features::FeatureVectorBuilder;
use crate::metrics::MetricName;
use crate::object::AnalysisObject;
use crate::object::SourceLocator;
use crate::object::Suggestion;
use crate::rank::ScoreSummary;
use crate::rank::SuggestionRanker;
use crate::trace::ParallelTraceModel;
use crate::trace::SerialTraceModel;
use crate::trace::TraceModel;
use crate::weight::DependencyModelKind;
use crate::weight::DependencyWeightModel;

// ============================================================================
// SECTION: Analyzer Configuration
// ============================================================================

/// Plain builder/struct replacing the out-of-scope CLI/config-file surface.
///
/// `spec.md` §6 enumerates configuration by file-format key; this crate
/// exposes the same knobs as a Rust struct instead, since parsing a config
/// file is an external collaborator's job.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Metric names (`events.metrics`) ranking is reported for.
    pub metrics: Vec<MetricName>,
    /// Which analysis variants (`events.predicates`) are admitted into
    /// ranking and feature-vector output.
    pub predicates: PredicateSet,
    /// Whether `BranchFactory` also builds the untaken sibling side.
    pub build_unseen_branch_sibling: bool,
    /// Bounded worker pool size (`test.workers`).
    pub worker_count: usize,
    /// Whether traces carry per-thread `thread_id`s requiring
    /// [`ParallelTraceModel`] (`test.thread_support`).
    pub thread_support: bool,
    /// Which dependency/weight model level (if any) re-weights objects by
    /// proximity to failure-witnessing test checkpoints. `None` leaves every
    /// object at its neutral weight.
    pub dependency_model: Option<DependencyModelKind>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            metrics: vec![MetricName::default_spectrum()],
            predicates: PredicateSet::all(),
            build_unseen_branch_sibling: true,
            worker_count: 4,
            thread_support: false,
            dependency_model: None,
        }
    }
}

// ============================================================================
// SECTION: Per-Trace Driver
// ============================================================================

/// Tagged union over the four trace-model shapes an [`AnalyzerConfig`] can
/// select: serial or thread-aware, each optionally wrapped in a dependency
/// weight model. Matches the rest of this crate's enum-dispatch idiom
/// (see [`crate::object::AnalysisObject`]) rather than a trait object.
enum Driver {
    /// Single-threaded replay, no dependency weighting.
    Serial(SerialTraceModel),
    /// Thread-aware replay, no dependency weighting.
    Parallel(ParallelTraceModel),
    /// Single-threaded replay, re-weighted by a dependency model.
    WeightedSerial(DependencyWeightModel<SerialTraceModel>),
    /// Thread-aware replay, re-weighted by a dependency model.
    WeightedParallel(DependencyWeightModel<ParallelTraceModel>),
}

impl Driver {
    fn new(factory: &Arc<CombinationFactory>, run: RunId, thread_support: bool, dependency_model: Option<DependencyModelKind>) -> Self {
        match (thread_support, dependency_model) {
            (false, None) => Self::Serial(SerialTraceModel::new(Arc::clone(factory), run)),
            (true, None) => Self::Parallel(ParallelTraceModel::new(Arc::clone(factory), run)),
            (false, Some(kind)) => {
                Self::WeightedSerial(DependencyWeightModel::new(SerialTraceModel::new(Arc::clone(factory), run), kind, run))
            }
            (true, Some(kind)) => {
                Self::WeightedParallel(DependencyWeightModel::new(ParallelTraceModel::new(Arc::clone(factory), run), kind, run))
            }
        }
    }

    /// Drains `event_file` to completion, folding each dispatched event's
    /// notified objects into `feature_builder` alongside the ordinary
    /// factory-driven tallying `dispatch_event` performs.
    ///
    /// # Errors
    /// Propagates the underlying source's `CoreError`; this aborts only the
    /// trace being drained (`spec.md` §5's cancellation policy).
    fn drain(&mut self, event_file: &mut EventFile, feature_builder: &FeatureVectorBuilder) -> CoreResult<()> {
        let run = event_file.run_id;
        let failing = event_file.failing;
        self.prepare(event_file);
        while let Some(event) = event_file.next_event()? {
            let thread = event.thread();
            self.dispatch_event(&event);
            feature_builder.record(run, failing, thread, self.last_notified());
        }
        self.follow_up(event_file);
        Ok(())
    }
}

impl TraceModel for Driver {
    fn prepare(&mut self, event_file: &EventFile) {
        match self {
            Self::Serial(model) => model.prepare(event_file),
            Self::Parallel(model) => model.prepare(event_file),
            Self::WeightedSerial(model) => model.prepare(event_file),
            Self::WeightedParallel(model) => model.prepare(event_file),
        }
    }

    fn dispatch_event(&mut self, event: &Event) {
        match self {
            Self::Serial(model) => model.dispatch_event(event),
            Self::Parallel(model) => model.dispatch_event(event),
            Self::WeightedSerial(model) => model.dispatch_event(event),
            Self::WeightedParallel(model) => model.dispatch_event(event),
        }
    }

    fn follow_up(&mut self, event_file: &EventFile) {
        match self {
            Self::Serial(model) => model.follow_up(event_file),
            Self::Parallel(model) => model.follow_up(event_file),
            Self::WeightedSerial(model) => model.follow_up(event_file),
            Self::WeightedParallel(model) => model.follow_up(event_file),
        }
    }

    fn last_notified(&self) -> &[ObjectHandle] {
        match self {
            Self::Serial(model) => model.last_notified(),
            Self::Parallel(model) => model.last_notified(),
            Self::WeightedSerial(model) => model.last_notified(),
            Self::WeightedParallel(model) => model.last_notified(),
        }
    }
}

// ============================================================================
// SECTION: Analyzer
// ============================================================================

/// Top-level orchestrator owning the shared object registry for one
/// analysis run.
pub struct Analyzer {
    config: AnalyzerConfig,
    factory: Arc<CombinationFactory>,
    feature_builder: FeatureVectorBuilder,
    passed: Vec<RunId>,
    failed: Vec<RunId>,
    finalized: bool,
}

impl Analyzer {
    /// Creates a fresh analyzer; no traces have been drained yet.
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        let factory = Arc::new(CombinationFactory::new(config.build_unseen_branch_sibling));
        let feature_builder = FeatureVectorBuilder::new(Arc::clone(&factory));
        Self {
            config,
            factory,
            feature_builder,
            passed: Vec::new(),
            failed: Vec::new(),
            finalized: false,
        }
    }

    /// Drains every `event_file` — across a bounded worker pool sized by
    /// `config.worker_count` — dispatching each against a per-trace
    /// [`Driver`], then finalizes every canonical object's tallies against
    /// the resulting passed/failed run sets.
    ///
    /// Traces that abort mid-stream contribute nothing: their run id never
    /// joins the passed/failed sets finalize consults, matching `spec.md`
    /// §5's cancellation policy. `analyze` itself only fails if the worker
    /// pool cannot be constructed (a `Config`-class error).
    ///
    /// # Errors
    /// Returns `CoreError::Config` if the worker pool fails to build.
    pub fn analyze(&mut self, mut event_files: Vec<EventFile>, observer: Option<&dyn AnalyzerObserver>) -> CoreResult<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count.max(1))
            .build()
            .map_err(|err| CoreError::Config(err.to_string()))?;

        let factory = &self.factory;
        let feature_builder = &self.feature_builder;
        let thread_support = self.config.thread_support;
        let dependency_model = self.config.dependency_model;

        let results: Vec<(RunId, bool, CoreResult<()>)> = pool.install(|| {
            event_files
                .par_iter_mut()
                .map(|event_file| {
                    let run = event_file.run_id;
                    let failing = event_file.failing;
                    if let Some(obs) = observer {
                        obs.on_trace_started(run, failing);
                    }
                    let mut driver = Driver::new(factory, run, thread_support, dependency_model);
                    let outcome = driver.drain(event_file, feature_builder);
                    if let Some(obs) = observer {
                        obs.on_trace_finished(run, failing, &outcome);
                    }
                    (run, failing, outcome)
                })
                .collect()
        });

        for (run, failing, outcome) in &results {
            if outcome.is_ok() {
                if *failing {
                    self.failed.push(*run);
                } else {
                    self.passed.push(*run);
                }
            }
        }

        for handle in self.factory.all() {
            handle.lock().finalize(&self.passed, &self.failed);
        }
        self.finalized = true;

        if let Some(obs) = observer {
            obs.on_finalized(self.factory.all().len());
        }
        Ok(())
    }

    /// Whether `analyze` has finalized at least once.
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Run ids that contributed a successfully drained passing trace.
    #[must_use]
    pub fn passed_runs(&self) -> &[RunId] {
        &self.passed
    }

    /// Run ids that contributed a successfully drained failing trace.
    #[must_use]
    pub fn failed_runs(&self) -> &[RunId] {
        &self.failed
    }

    /// Total canonical objects created across every drained trace.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.factory.all().len()
    }

    /// Ranks every admitted canonical object by `metric` (defaulting to each
    /// variant's own default metric when `None`), resolving block/branch
    /// locations through `locator`.
    #[must_use]
    pub fn rank(&self, metric: Option<&MetricName>, locator: &dyn SourceLocator) -> Vec<Suggestion> {
        let handles = self.factory.all();
        let locks: Vec<_> = handles.iter().map(|handle| handle.lock()).collect();
        let objects: Vec<&AnalysisObject> = locks
            .iter()
            .filter(|guard| self.config.predicates.contains(guard.identity()))
            .map(|guard| &**guard)
            .collect();
        SuggestionRanker::new().rank(&objects, metric, locator)
    }

    /// Ranks once per metric named in `config.metrics` (or the spectrum
    /// default if the list is empty), returning one suggestion list per
    /// metric name in the order configured.
    #[must_use]
    pub fn rank_all_configured(&self, locator: &dyn SourceLocator) -> BTreeMap<MetricName, Vec<Suggestion>> {
        let metrics = if self.config.metrics.is_empty() {
            vec![MetricName::default_spectrum()]
        } else {
            self.config.metrics.clone()
        };
        metrics
            .into_iter()
            .map(|metric| {
                let ranked = self.rank(Some(&metric), locator);
                (metric, ranked)
            })
            .collect()
    }

    /// Aggregate suspiciousness statistics over an already-ranked suggestion set.
    #[must_use]
    pub fn summarize(ranked: &[Suggestion]) -> ScoreSummary {
        SuggestionRanker::summarize(ranked)
    }

    /// Every feature vector accumulated across drained traces, one per run.
    #[must_use]
    pub fn feature_vectors(&self) -> Vec<FeatureVector> {
        self.feature_builder.vectors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::mapping::EventMapping;
    use crate::event::model::EventId;
    use crate::event::model::EventKind;
    use crate::event::stream::VecEventSource;
    use crate::object::SingleLineLocator;

    fn line_event(file: &str, line: u32, id: u64) -> Event {
        Event {
            file: file.to_owned(),
            line,
            event_id: EventId(id),
            thread_id: None,
            kind: EventKind::Line,
        }
    }

    fn event_file(run: u32, failing: bool, lines: &[u32]) -> EventFile {
        let events: Vec<Event> = lines.iter().enumerate().map(|(i, &line)| line_event("a.py", line, i as u64)).collect();
        EventFile::new(RunId(run), failing, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(events)))
    }

    #[test]
    fn basic_line_suspicion_matches_tarantula_scenario() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        let files = vec![
            event_file(0, true, &[1, 5, 6, 7, 9, 10]),
            event_file(1, false, &[1, 5, 6, 12, 13]),
            event_file(2, false, &[1, 5, 6, 12, 13]),
        ];
        analyzer.analyze(files, None).expect("analysis succeeds");

        let locator = SingleLineLocator;
        let metric = MetricName::new("tarantula");
        let ranked = analyzer.rank(Some(&metric), &locator);

        let score_of = |line: u32| -> f64 {
            ranked
                .iter()
                .find(|s| s.locations.iter().any(|l| l.file == "a.py" && l.line == line))
                .map_or(0.0, |s| s.score)
        };

        assert!((score_of(10) - 1.0).abs() < 1e-9);
        assert!((score_of(1) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn aborted_trace_never_joins_passed_or_failed_sets() {
        struct FailingSource;
        impl crate::event::stream::EventSource for FailingSource {
            fn next_event(&mut self) -> CoreResult<Option<Event>> {
                Err(CoreError::CorruptStream("boom".to_owned()))
            }
        }

        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        let bad = EventFile::new(RunId(9), true, Arc::new(EventMapping::new()), Box::new(FailingSource));
        analyzer.analyze(vec![bad], None).expect("analyze itself does not fail");

        assert!(analyzer.passed_runs().is_empty());
        assert!(analyzer.failed_runs().is_empty());
    }

    #[test]
    fn feature_vectors_cover_every_drained_run() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        let files = vec![event_file(0, true, &[1, 2]), event_file(1, false, &[1])];
        analyzer.analyze(files, None).expect("analysis succeeds");

        let vectors = analyzer.feature_vectors();
        assert_eq!(vectors.len(), 2);
    }
}
