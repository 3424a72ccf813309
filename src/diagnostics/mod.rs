/// The abnormal-termination signal and its interception boundary
mod fault;
/// `env_logger` setup and the panic hook which routes faults through [log]
mod logging;

pub use fault::*;
pub use logging::*;
