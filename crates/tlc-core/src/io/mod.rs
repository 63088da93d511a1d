pub mod report;
pub mod session;

pub use report::{component_rows, load_csv, save_csv, write_csv, ComponentRow};
pub use session::{load_config, load_session, save_config, save_session};
