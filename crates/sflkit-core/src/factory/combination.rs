// sflkit-core/src/factory/combination.rs
// ============================================================================
// Module: Combination Factory
// Description: Dispatches one event to every sub-factory and concatenates.
// Purpose: Single entry point the trace models drive per event.
// Dependencies: crate::factory::*, crate::object, crate::scope
// ============================================================================

//! ## Overview
//! `CombinationFactory` owns one instance of every concrete factory and is
//! the only thing a trace model talks to. Most events resolve to plain
//! hits; `LoopEnd` additionally carries a classified count that bypasses
//! the generic `hit(event)` path (see [`crate::object::AnalysisObject::hit_count`]).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::factory::branch::BranchFactory;
use crate::factory::condition::ConditionFactory;
use crate::factory::defuse::DefUseFactory;
use crate::factory::function::FunctionFactory;
use crate::factory::function_error::FunctionErrorFactory;
use crate::factory::length::LengthFactory;
use crate::factory::line::LineFactory;
use crate::factory::loop_::LoopFactory;
use crate::factory::registry::ObjectHandle;
use crate::factory::return_::ReturnFactory;
use crate::factory::scalar_pair::ScalarPairFactory;
use crate::factory::string_predicates::StringPredicateFactory;
use crate::factory::variable::NonePredicateFactory;
use crate::factory::variable::VariablePredicateFactory;
use crate::scope::ScopeView;

/// The objects to notify for one event, split between plain hits and the
/// loop family's count-classified notification.
#[derive(Debug, Default)]
pub struct Notification {
    /// Objects to call `hit` on with the triggering event.
    pub hits: Vec<ObjectHandle>,
    /// Loop objects to call `hit_count` on, with the popped iteration count.
    pub count_hit: Option<(Vec<ObjectHandle>, u64)>,
}

/// Owns every concrete factory and dispatches each event to the ones that
/// care about it, concatenating their emitted object lists.
#[derive(Debug, Default)]
pub struct CombinationFactory {
    /// `Line` spectrum objects.
    pub line: LineFactory,
    /// `Branch` predicate objects.
    pub branch: BranchFactory,
    /// `Function` spectrum objects.
    pub function: FunctionFactory,
    /// The three `Loop` spectrum variants.
    pub loop_: LoopFactory,
    /// `DefUse` spectrum objects.
    pub defuse: DefUseFactory,
    /// Negated/non-negated `Condition` predicate objects.
    pub condition: ConditionFactory,
    /// `ScalarPair` predicate objects.
    pub scalar_pair: ScalarPairFactory,
    /// `VariablePredicate` objects.
    pub variable: VariablePredicateFactory,
    /// `NonePredicate` objects.
    pub none_predicate: NonePredicateFactory,
    /// `ReturnPredicate` objects.
    pub return_: ReturnFactory,
    /// String/bytes predicate family.
    pub string_predicates: StringPredicateFactory,
    /// The three `Length` spectrum variants.
    pub length: LengthFactory,
    /// `FunctionErrorPredicate` objects.
    pub function_error: FunctionErrorFactory,
}

impl CombinationFactory {
    /// Creates a factory with `build_unseen_sibling` controlling whether
    /// `BranchFactory` also builds the untaken side.
    #[must_use]
    pub fn new(build_unseen_sibling: bool) -> Self {
        Self {
            branch: BranchFactory::new(build_unseen_sibling),
            ..Self::default()
        }
    }

    /// Dispatches `event` to every sub-factory interested in it.
    #[must_use]
    pub fn get_analysis(&self, event: &Event, run: RunId, thread: ThreadId, scope: Option<ScopeView<'_>>) -> Notification {
        let mut out = Notification::default();

        match &event.kind {
            EventKind::Line => out.hits.extend(self.line.get_analysis(event)),
            EventKind::Branch { .. } => out.hits.extend(self.branch.get_analysis(event)),
            EventKind::FunctionEnter { .. } => {
                out.hits.extend(self.function.get_analysis(event));
                self.defuse.on_function_enter(run, thread);
            }
            EventKind::FunctionExit { .. } => {
                out.hits.extend(self.return_.get_analysis(event));
                out.hits.extend(self.function_error.get_analysis(event));
                self.defuse.on_function_exit(run, thread);
            }
            EventKind::FunctionError { .. } => {
                out.hits.extend(self.function_error.get_analysis(event));
                self.defuse.on_function_exit(run, thread);
            }
            EventKind::Def { .. } => {
                out.hits.extend(self.defuse.get_analysis(event, run, thread));
                out.hits.extend(self.scalar_pair.get_analysis(event, scope));
                out.hits.extend(self.variable.get_analysis(event));
                out.hits.extend(self.none_predicate.get_analysis(event));
                out.hits.extend(self.string_predicates.get_analysis(event));
            }
            EventKind::Use { .. } => out.hits.extend(self.defuse.get_analysis(event, run, thread)),
            EventKind::Condition { .. } => out.hits.extend(self.condition.get_analysis(event)),
            EventKind::LoopBegin { .. } | EventKind::LoopHit { .. } => {
                self.loop_.get_analysis(event, run, thread);
            }
            EventKind::LoopEnd { .. } => {
                out.count_hit = self.loop_.get_analysis(event, run, thread);
            }
            EventKind::Len { .. } => out.hits.extend(self.length.get_analysis(event)),
            EventKind::TestStart { .. }
            | EventKind::TestEnd { .. }
            | EventKind::TestLine
            | EventKind::TestDef { .. }
            | EventKind::TestUse { .. }
            | EventKind::TestAssert => {}
        }

        out
    }

    /// Clears all per-trace scratch state for `(run, thread)`: the def-use
    /// factory's scope stack and the loop factory's iteration counters.
    pub fn reset(&self, run: RunId, thread: ThreadId) {
        self.defuse.reset(run, thread);
        self.loop_.reset(run, thread);
    }

    /// Returns every canonical object created by any sub-factory so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        [
            self.line.all(),
            self.branch.all(),
            self.function.all(),
            self.loop_.all(),
            self.defuse.all(),
            self.condition.all(),
            self.scalar_pair.all(),
            self.variable.all(),
            self.none_predicate.all(),
            self.return_.all(),
            self.string_predicates.all(),
            self.length.all(),
            self.function_error.all(),
        ]
        .concat()
    }
}
