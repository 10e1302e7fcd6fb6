pub mod logger_adapter;
pub mod mode;
pub mod repository;
pub mod service;

pub use logger_adapter::LoggerAdapter;
pub use mode::{ServiceMode, UnknownServiceMode, build_service};
pub use repository::UserRepository;
pub use service::{Usecase, UserService};
