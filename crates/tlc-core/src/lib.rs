pub mod annotation;
pub mod calibration;
pub mod capture;
pub mod consts;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod reconcile;
pub mod retention;
