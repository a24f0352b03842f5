mod boss;
mod record;
mod session;
mod setup;
mod stats;
mod user;

pub use boss::{Boss, BossId};
pub use record::{FullRecord, Record, RecordId, RecordStatus, RecordWithBoss};
pub use session::Session;
pub use stats::{ActiveMember, BossCompletions, RecordHolder, SubmissionStats, UserStats};
pub use user::{PublicUser, Role, User, UserId, UserRsn, VerificationStatus};
