// sflkit-core/src/factory/string_predicates.rs
// ============================================================================
// Module: String Predicate Factories
// Description: EmptyString/EmptyBytes/IsAscii/ContainsDigit/ContainsSpecial.
// Purpose: Cover string- and bytes-shaped predicates driven by Def events.
// Dependencies: crate::factory::registry, crate::object
// ============================================================================

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::TypeTag;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::ComparisonOp;
use crate::object::Identity;
use crate::object::PredicateObject;
use crate::object::SourceSite;

const EXISTENCE_OPS: [ComparisonOp; 2] = [ComparisonOp::Eq, ComparisonOp::Ne];

/// Builds `EmptyString`/`EmptyBytes` objects for string- or bytes-typed
/// definitions, and `IsAscii`/`ContainsDigit`/`ContainsSpecial` objects for
/// string-typed ones.
#[derive(Debug, Default)]
pub struct StringPredicateFactory {
    empty_string: ObjectRegistry,
    empty_bytes: ObjectRegistry,
    is_ascii: ObjectRegistry,
    contains_digit: ObjectRegistry,
    contains_special: ObjectRegistry,
}

impl StringPredicateFactory {
    /// Creates an empty string-predicate factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical objects notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::Def { var, type_tag, .. } = &event.kind else {
            return Vec::new();
        };
        let site = SourceSite::new(event.file.clone(), event.line);
        let mut handles = Vec::new();

        match type_tag {
            TypeTag::Str => {
                for op in EXISTENCE_OPS {
                    let identity = Identity::EmptyStringPredicate(site.clone(), var.clone(), op);
                    handles.push(
                        self.empty_string
                            .get_or_create(identity.clone(), || AnalysisObject::Predicate(PredicateObject::new(identity))),
                    );
                }
                let ascii = Identity::IsAsciiPredicate(site.clone(), var.clone());
                handles.push(
                    self.is_ascii
                        .get_or_create(ascii.clone(), || AnalysisObject::Predicate(PredicateObject::new(ascii))),
                );
                let digit = Identity::ContainsDigitPredicate(site.clone(), var.clone());
                handles.push(
                    self.contains_digit
                        .get_or_create(digit.clone(), || AnalysisObject::Predicate(PredicateObject::new(digit))),
                );
                let special = Identity::ContainsSpecialPredicate(site, var.clone());
                handles.push(
                    self.contains_special
                        .get_or_create(special.clone(), || AnalysisObject::Predicate(PredicateObject::new(special))),
                );
            }
            TypeTag::Bytes => {
                for op in EXISTENCE_OPS {
                    let identity = Identity::EmptyBytesPredicate(site.clone(), var.clone(), op);
                    handles.push(
                        self.empty_bytes
                            .get_or_create(identity.clone(), || AnalysisObject::Predicate(PredicateObject::new(identity))),
                    );
                }
            }
            _ => {}
        }
        handles
    }

    /// Returns every canonical object built so far, across all five families.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        [
            self.empty_string.all(),
            self.empty_bytes.all(),
            self.is_ascii.all(),
            self.contains_digit.all(),
            self.contains_special.all(),
        ]
        .concat()
    }
}
