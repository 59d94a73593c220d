//! Cost-center matching.
//!
//! This module implements the two assignment strategies:
//! - `specificity` - Weighted best match over confirmed analytical models
//! - `legacy` - Product rule before category rule, used when posting
//!
//! Both sit behind the [`CostCenterResolver`] trait and are kept distinct.
//!
//! # Modules
//!
//! - `types` - Matching models, criteria, and legacy rules
//! - `error` - Matching-specific error types
//! - `registry` - Ordered model registry and model lifecycle
//! - `resolver` - Strategy trait and its two implementations

pub mod error;
pub mod legacy;
pub mod registry;
pub mod resolver;
pub mod specificity;
pub mod types;


pub use error::MatchingError;
pub use legacy::{LegacyRuleMatcher, LegacyRuleSet};
pub use registry::ModelRegistry;
pub use resolver::{CostCenterResolver, LegacyRuleResolver, ResolvedMatch, SpecificityResolver};
pub use specificity::{ScoredMatch, SpecificityMatcher};
pub use types::{
    CostCenterAssignment, LegacyRule, MatchCriteria, MatchingModel, ModelStatus, NewMatchingModel,
    RuleKind,
};
