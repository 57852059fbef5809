pub mod amount;
pub mod approve;

pub use amount::{format_base_units, to_base_units, AmountError, AmountInput};
pub use approve::{
    parse_approve_calldata, update_approval_amount, ApproveCall, CalldataError, IERC20, IPermit2,
};
