//! SkillBridge core: canonical task/match model, payload normalization,
//! discovery filtering and score tiering.
//!
//! Everything here is pure: no I/O, no runtime. The HTTP side lives in
//! `skillbridge-client`, which decodes server payloads through
//! [`normalize`] so the rest of the system only sees one task shape.

pub mod error;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod session;
pub mod tier;

pub use error::{CoreError, Result};
pub use filter::TaskFilter;
pub use model::{
    AppliedTaskRecord, ApplicationId, ApplicationStatus, Match, NewApplication, NewTask,
    SkillRequirement, Task, TaskApplication, TaskId, TaskStatus, TaskUpdate, UserId,
};
pub use normalize::{Listing, NormalizeReport, RawMatch, RawSkills, RawTask, Rejected};
pub use session::{SessionContext, SessionUser, UserRole};
pub use tier::ScoreTier;
