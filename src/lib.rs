pub mod command;
pub mod error;
pub mod utils;

pub use command::report::{Mode, Reporter};
pub use command::tree::{build, DurationEntry, DurationTree};
pub use error::{LengthError, Problem};
pub use utils::probe::{DurationProbe, Length, SymphoniaProbe};
pub use utils::time::Style;
