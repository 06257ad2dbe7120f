pub mod facade;
pub mod factory;

pub use facade::{LoggerFacade, FACADE_HANDLES};
pub use factory::LoggerFactory;
