pub mod academic;
pub mod export;
pub mod money;
pub mod pagination;
pub mod response;
pub mod sorting;
pub mod stats;
pub mod str_enum;

pub use academic::Term;
pub use export::{ExportFormat, ExportParams};
pub use pagination::{PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use sorting::SortOrder;
pub use stats::{AmountBreakdown, GroupCount};
