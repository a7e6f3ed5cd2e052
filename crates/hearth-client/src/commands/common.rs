use std::path::Path;

use crate::ClientResult;
use crate::contracts::types::{DataRange, DataRangeHint};
use crate::setup::{SetupContext, ensure_initialized, ensure_initialized_at};

pub fn data_range_hint(data_range: &DataRange) -> DataRangeHint {
    DataRangeHint {
        earliest: data_range.earliest.clone(),
        latest: data_range.latest.clone(),
    }
}

pub(crate) fn load_setup(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    if let Some(home) = home_override {
        return ensure_initialized_at(home);
    }
    ensure_initialized()
}
