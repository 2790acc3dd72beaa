pub mod sizer;
pub mod spread;

pub use sizer::{
    pip_value_per_lot, standard_lot_size, validate_target, PositionRequest, PositionSizer,
    PositionSizing, TargetValidation,
};
pub use spread::{base_spread, estimate_spread, session_multiplier};
