pub mod topic_admin;

pub use topic_admin::TopicAdmin;
