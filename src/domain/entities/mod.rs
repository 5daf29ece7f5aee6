//! Core domain entities.
//!
//! Plain data records mirroring the hosted database, plus the small pieces of
//! business logic attached to them (plan limits, monthly credit reset, email
//! cooldowns, weekly training aggregation).
//!
//! Creation inputs use separate `New*` structs.

pub mod document;
pub mod email;
pub mod plan;
pub mod profile;
pub mod session;
pub mod style;
pub mod template;
pub mod training;

pub use document::{DocumentRecord, GenerationMode, NewDocumentRecord};
pub use email::{EmailType, NewEmailLog};
pub use plan::{Plan, UnknownPlan};
pub use profile::{ActiveDayOutcome, CreditUsage, Profile, ProfileSummary};
pub use session::{ActivityFlag, NewActivityFlag, NewUserSession, UserActivitySummary, UserSession};
pub use style::StyleFingerprint;
pub use template::{
    NewTemplate, SeoTemplate, TemplateFilter, TemplatePage, TemplateSummary, TierCount,
};
pub use training::{
    Evaluation, GoldenSample, NewEvaluation, NewGoldenSample, NewTrainingRun, TrainingRun,
    WeeklyTotals,
};
