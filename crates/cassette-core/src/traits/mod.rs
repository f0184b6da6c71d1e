mod clock;
mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::KeyValueStore;
