mod persistence;

pub use persistence::{
    timestamp_secs,
    AutoSave,
    SaveCoordinator,
    SaveReceipt,
    SaveRequest,
    SaveTarget,
};
