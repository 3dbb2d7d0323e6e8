pub mod explain;
pub mod init_model;
pub mod inspect;
pub mod predict;
pub mod represent;
