//! Display regions and the terminal view that shows them.

pub mod region;
pub mod view;

pub use region::{
    Dashboard, DisplayRegion, APP_INFO_REGION, HEALTH_STATUS_REGION, LOADING_PLACEHOLDER,
};
pub use view::{format_block, spawn_terminal_view};
