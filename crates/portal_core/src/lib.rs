pub mod catalog;
pub mod context;
pub mod domain;
pub mod gate;
pub mod notifications;
pub mod ports;
pub mod profile;
pub mod session;
pub mod spotlight;

pub use catalog::{Catalog, MINIMUM_ATTENDANCE};
pub use domain::{
    Assignment, AssignmentStatus, ChatMessage, ClassSession, ClassType, Course, ExamResult,
    FeeRecord, FeeStatus, Notification, NotificationKind, Sender, Student, View,
};
pub use gate::{attempt_login, LoginError, LoginMode};
pub use notifications::NotificationStore;
pub use ports::{ChatCompletionService, PortError, PortResult};
pub use session::{key_event, reduce, Key, KeyInput, PortalState, UiEvent};
pub use spotlight::{search, SearchResult};
